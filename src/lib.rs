//! Typed Rust client for the CM.com text messaging gateway.
//!
//! The crate is split into a domain layer of strong types (messages, rich
//! content, results), a transport layer owning the gateway's JSON wire format,
//! and a small client layer orchestrating validation, HTTP, and result parsing.
//!
//! ```rust,no_run
//! use cmtext::{Channel, MediaMessage, Message, ProductToken, TextClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), cmtext::TextClientError> {
//!     let client = TextClient::new(ProductToken::new("00000000-0000-0000-0000-000000000000")?);
//!
//!     let message = Message::new("Hello", "CM.com", ["0031612345678"])
//!         .with_channels([Channel::WhatsApp])
//!         .with_hybrid_app_key("your-hybrid-app-key")
//!         .with_rich_message(MediaMessage::new(
//!             "cm.com",
//!             "https://avatars3.githubusercontent.com/u/8234794?s=200&v=4",
//!             "image/png",
//!         ));
//!
//!     let result = client.send(&[message]).await?;
//!     println!("{:?}: {}", result.status_code, result.status_message);
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    BoxFuture, HttpResponse, HttpTransport, MESSAGES_MAXIMUM, TextClient, TextClientBuilder,
    TextClientError, TransportError,
};
pub use domain::{
    Channel, DeliveryStatus, MediaMessage, Message, MessageDetail, MessageParts, PhoneNumber,
    ProductToken, RECIPIENTS_MAXIMUM, Recipient, RichContent, RichMessage, Suggestion,
    TextClientResult, TextClientStatusCode, ValidationError, ViewLocation,
};
pub use transport::{decode_send_response, encode_message_json};
