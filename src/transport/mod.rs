//! Transport layer: gateway wire format (serialization/deserialization).

mod send_message;

pub use send_message::{decode_send_response, encode_message_json, encode_send_request};
