use serde::{Deserialize, Serialize};

use crate::domain::{
    DeliveryStatus, Message, MessageDetail, ProductToken, RichContent, RichMessage, Suggestion,
    TextClientResult, TextClientStatusCode, ViewLocation,
};

const BODY_TYPE_AUTO: &str = "AUTO";
const CUSTOM_GROUPING: &str = concat!("text-sdk-rust-", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Serialize)]
struct SendJsonRequest<'a> {
    messages: MessagesJson<'a>,
}

#[derive(Debug, Serialize)]
struct MessagesJson<'a> {
    authentication: AuthenticationJson<'a>,
    msg: Vec<MessageJson<'a>>,
}

#[derive(Debug, Serialize)]
struct AuthenticationJson<'a> {
    producttoken: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MessageJson<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<BodyJson<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    from: Option<&'a str>,
    to: Vec<RecipientJson<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reference: Option<&'a str>,
    custom_grouping3: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    minimum_number_of_message_parts: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    maximum_number_of_message_parts: Option<u8>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    allowed_channels: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    app_key: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rich_content: Option<RichContentJson<'a>>,
}

#[derive(Debug, Serialize)]
struct BodyJson<'a> {
    content: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize)]
struct RecipientJson<'a> {
    number: &'a str,
}

#[derive(Debug, Serialize)]
struct RichContentJson<'a> {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    conversation: Vec<RichMessageJson<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    suggestions: Vec<SuggestionJson<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
enum RichMessageJson<'a> {
    Text(&'a str),
    Media(MediaJson<'a>),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MediaJson<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    media_name: Option<&'a str>,
    media_uri: &'a str,
    mime_type: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(tag = "action")]
enum SuggestionJson<'a> {
    Reply {
        label: &'a str,
        postbackdata: &'a str,
    },
    #[serde(rename = "openUrl")]
    OpenUrl { label: &'a str, url: &'a str },
    Dial { label: &'a str, dial: DialJson<'a> },
    #[serde(rename = "viewLocation")]
    ViewLocation {
        label: &'a str,
        #[serde(rename = "viewLocation")]
        view_location: ViewLocationJson<'a>,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DialJson<'a> {
    phone_number: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ViewLocationJson<'a> {
    latitude: String,
    longitude: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    search_query: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    radius: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendJsonResponse {
    error_code: i64,
    #[serde(default)]
    details: Option<String>,
    #[serde(default)]
    messages: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct MessageJsonResult {
    to: Option<String>,
    status: Option<String>,
    reference: Option<String>,
    parts: Option<u32>,
    message_details: Option<String>,
    message_error_code: Option<i64>,
}

/// Serialize the full request envelope for a batch of messages.
pub fn encode_send_request(
    token: &ProductToken,
    messages: &[Message],
) -> Result<String, serde_json::Error> {
    let request = SendJsonRequest {
        messages: MessagesJson {
            authentication: AuthenticationJson {
                producttoken: token.as_str(),
            },
            msg: messages.iter().map(message_json).collect(),
        },
    };
    serde_json::to_string(&request)
}

/// Project a single message onto its wire representation.
pub fn encode_message_json(message: &Message) -> Result<serde_json::Value, serde_json::Error> {
    serde_json::to_value(message_json(message))
}

fn message_json(message: &Message) -> MessageJson<'_> {
    let parts = message.message_parts();
    MessageJson {
        body: message.body().map(|content| BodyJson {
            content,
            kind: BODY_TYPE_AUTO,
        }),
        from: Some(message.sender()).filter(|from| !from.is_empty()),
        to: message
            .recipients()
            .iter()
            .map(|recipient| RecipientJson {
                number: recipient.raw(),
            })
            .collect(),
        reference: message.reference(),
        custom_grouping3: CUSTOM_GROUPING,
        minimum_number_of_message_parts: parts.map(|parts| parts.minimum()),
        maximum_number_of_message_parts: parts.map(|parts| parts.maximum()),
        allowed_channels: message
            .allowed_channels()
            .iter()
            .map(|channel| channel.as_str())
            .collect(),
        app_key: message.app_key(),
        rich_content: message
            .rich_content()
            .filter(|rich| !rich.is_empty())
            .map(rich_content_json),
    }
}

fn rich_content_json(rich: &RichContent) -> RichContentJson<'_> {
    RichContentJson {
        conversation: rich
            .conversation()
            .iter()
            .map(|item| match item {
                RichMessage::Text(text) => RichMessageJson::Text(text),
                RichMessage::Media(media) => RichMessageJson::Media(MediaJson {
                    media_name: media.name(),
                    media_uri: media.uri(),
                    mime_type: media.mime_type(),
                }),
            })
            .collect(),
        suggestions: rich.suggestions().iter().map(suggestion_json).collect(),
    }
}

fn suggestion_json(suggestion: &Suggestion) -> SuggestionJson<'_> {
    match suggestion {
        Suggestion::Reply {
            label,
            postback_data,
        } => SuggestionJson::Reply {
            label,
            postbackdata: postback_data,
        },
        Suggestion::OpenUrl { label, url } => SuggestionJson::OpenUrl { label, url },
        Suggestion::Dial {
            label,
            phone_number,
        } => SuggestionJson::Dial {
            label,
            dial: DialJson { phone_number },
        },
        Suggestion::ViewLocation { label, location } => SuggestionJson::ViewLocation {
            label,
            view_location: view_location_json(location),
        },
    }
}

fn view_location_json(location: &ViewLocation) -> ViewLocationJson<'_> {
    ViewLocationJson {
        latitude: location.latitude.to_string(),
        longitude: location.longitude.to_string(),
        label: location.label.as_deref(),
        search_query: location.search_query.as_deref(),
        radius: location.radius,
    }
}

/// Turn any HTTP response into a result.
///
/// Only a JSON object with an integer `errorCode` is recognized. Everything
/// else yields [`TextClientStatusCode::Unknown`] with the body copied
/// verbatim, whatever the HTTP status. Per-recipient entries that do not
/// parse are skipped without affecting the top-level status.
pub fn decode_send_response(http_status: u16, body: &str) -> TextClientResult {
    match parse_send_response(body) {
        Ok(parsed) => TextClientResult {
            status_code: TextClientStatusCode::from_code(parsed.error_code),
            status_message: parsed.details.unwrap_or_default(),
            details: parsed.messages.and_then(message_details),
            http_status: Some(http_status),
        },
        Err(err) => {
            tracing::debug!(http_status, error = %err, "gateway response is not recognized JSON");
            TextClientResult {
                status_code: TextClientStatusCode::Unknown,
                status_message: body.to_owned(),
                details: None,
                http_status: Some(http_status),
            }
        }
    }
}

fn parse_send_response(body: &str) -> Result<SendJsonResponse, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    if !value.is_object() {
        return Err(serde::de::Error::custom("expected a JSON object"));
    }
    serde_json::from_value(value)
}

fn message_details(messages: serde_json::Value) -> Option<Vec<MessageDetail>> {
    let serde_json::Value::Array(entries) = messages else {
        return None;
    };
    let details = entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<MessageJsonResult>(entry) {
            Ok(entry) => Some(message_detail(entry)),
            Err(err) => {
                tracing::debug!(error = %err, "skipping unreadable message entry");
                None
            }
        })
        .collect();
    Some(details)
}

fn message_detail(value: MessageJsonResult) -> MessageDetail {
    MessageDetail {
        to: value.to,
        status: value.status.as_deref().map(DeliveryStatus::parse),
        reference: value.reference,
        parts: value.parts,
        details: value.message_details,
        error_code: value.message_error_code.map(TextClientStatusCode::from_code),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use crate::domain::{Channel, MediaMessage, MessageParts};

    use super::*;

    fn message_value(message: &Message) -> Value {
        encode_message_json(message).unwrap()
    }

    #[test]
    fn plain_message_omits_absent_fields() {
        let message = Message::new("hello", "CM.com", ["0031612345678"]);
        let value = message_value(&message);

        assert_eq!(
            value,
            json!({
                "body": { "content": "hello", "type": "AUTO" },
                "from": "CM.com",
                "to": [{ "number": "0031612345678" }],
                "customGrouping3": CUSTOM_GROUPING,
            })
        );
    }

    #[test]
    fn whatsapp_media_message_has_channel_app_key_and_rich_content() {
        let message = Message::new("Message Text", "Sender_name", ["Recipient_PhoneNumber"])
            .with_channels([Channel::WhatsApp])
            .with_hybrid_app_key("your-secret-hybrid-app-key")
            .with_rich_message(MediaMessage::new(
                "cm.com",
                "https://avatars3.githubusercontent.com/u/8234794?s=200&v=4",
                "image/png",
            ));
        let value = message_value(&message);

        assert_eq!(value["allowedChannels"], json!(["WhatsApp"]));
        assert_eq!(value["appKey"], json!("your-secret-hybrid-app-key"));
        assert_eq!(
            value["richContent"],
            json!({
                "conversation": [{
                    "media": {
                        "mediaName": "cm.com",
                        "mediaUri": "https://avatars3.githubusercontent.com/u/8234794?s=200&v=4",
                        "mimeType": "image/png"
                    }
                }]
            })
        );
    }

    #[test]
    fn rcs_reply_suggestions_nest_under_rich_content_in_order() {
        let message = Message::new("Message Text", "Sender_name", ["Recipient_PhoneNumber"])
            .with_channels([Channel::Rcs])
            .with_suggestions([
                Suggestion::reply("Opt In", "OK"),
                Suggestion::reply("Opt Out", "STOP"),
            ]);
        let value = message_value(&message);

        assert_eq!(value["allowedChannels"], json!(["RCS"]));
        assert!(value.get("suggestions").is_none());
        assert_eq!(
            value["richContent"],
            json!({
                "suggestions": [
                    { "action": "Reply", "label": "Opt In", "postbackdata": "OK" },
                    { "action": "Reply", "label": "Opt Out", "postbackdata": "STOP" }
                ]
            })
        );
    }

    #[test]
    fn other_suggestions_and_text_items_use_their_own_shapes() {
        let location = ViewLocation {
            label: Some("CM HQ".to_owned()),
            radius: Some(5),
            ..ViewLocation::new(51.5, 4.75)
        };
        let message = Message::default()
            .with_rich_message(RichMessage::Text("Pick one".to_owned()))
            .with_suggestions([
                Suggestion::open_url("Site", "https://www.cm.com"),
                Suggestion::dial("Call", "+31765727000"),
                Suggestion::view_location("Map", location),
            ]);
        let value = message_value(&message);

        assert_eq!(
            value["richContent"],
            json!({
                "conversation": [{ "text": "Pick one" }],
                "suggestions": [
                    { "action": "openUrl", "label": "Site", "url": "https://www.cm.com" },
                    { "action": "Dial", "label": "Call", "dial": { "phoneNumber": "+31765727000" } },
                    {
                        "action": "viewLocation",
                        "label": "Map",
                        "viewLocation": {
                            "latitude": "51.5",
                            "longitude": "4.75",
                            "label": "CM HQ",
                            "radius": 5
                        }
                    }
                ]
            })
        );
    }

    #[test]
    fn unnamed_media_omits_media_name() {
        let message = Message::default().with_rich_message(MediaMessage::unnamed(
            "https://www.cm.com/logo.png",
            "image/png",
        ));
        let value = message_value(&message);

        assert_eq!(
            value["richContent"]["conversation"][0],
            json!({
                "media": {
                    "mediaUri": "https://www.cm.com/logo.png",
                    "mimeType": "image/png"
                }
            })
        );
    }

    #[test]
    fn default_message_serializes_sparsely() {
        let value = message_value(&Message::default());
        assert_eq!(
            value,
            json!({ "to": [], "customGrouping3": CUSTOM_GROUPING })
        );
    }

    #[test]
    fn optional_fields_are_emitted_when_set() {
        let message = Message::new("hi", "CM.com", ["0031612345678"])
            .with_reference("ref-42")
            .with_message_parts(MessageParts::new(1, 3).unwrap());
        let value = message_value(&message);

        assert_eq!(value["reference"], json!("ref-42"));
        assert_eq!(value["minimumNumberOfMessageParts"], json!(1));
        assert_eq!(value["maximumNumberOfMessageParts"], json!(3));
    }

    #[test]
    fn request_envelope_carries_token_and_messages() {
        let token = ProductToken::new("token-123").unwrap();
        let messages = vec![
            Message::new("one", "CM.com", ["0031600000001"]),
            Message::new("two", "CM.com", ["0031600000002"]),
        ];
        let body = encode_send_request(&token, &messages).unwrap();
        let value: Value = serde_json::from_str(&body).unwrap();

        assert_eq!(
            value["messages"]["authentication"],
            json!({ "producttoken": "token-123" })
        );
        let msg = value["messages"]["msg"].as_array().unwrap();
        assert_eq!(msg.len(), 2);
        assert_eq!(msg[0]["body"]["content"], json!("one"));
        assert_eq!(msg[1]["to"], json!([{ "number": "0031600000002" }]));
    }

    #[test]
    fn decode_maps_gateway_response_with_details() {
        let json = r#"
        {
          "details": "Created 1 message(s)",
          "errorCode": 0,
          "messages": [
            {
              "to": "0031612345678",
              "status": "Accepted",
              "reference": "ref-1",
              "parts": 1,
              "messageDetails": null,
              "messageErrorCode": 0
            }
          ]
        }
        "#;

        let result = decode_send_response(200, json);
        assert_eq!(result.status_code, TextClientStatusCode::Ok);
        assert_eq!(result.status_message, "Created 1 message(s)");
        assert_eq!(result.http_status, Some(200));

        let details = result.details.unwrap();
        assert_eq!(
            details,
            vec![MessageDetail {
                to: Some("0031612345678".to_owned()),
                status: Some(DeliveryStatus::Accepted),
                reference: Some("ref-1".to_owned()),
                parts: Some(1),
                details: None,
                error_code: Some(TextClientStatusCode::Ok),
            }]
        );
    }

    #[test]
    fn decode_maps_gateway_error_codes() {
        let json = r#"{"details": "No account found for the given authentication", "errorCode": 101, "messages": []}"#;
        let result = decode_send_response(401, json);
        assert_eq!(result.status_code, TextClientStatusCode::AuthenticationFailed);
        assert_eq!(
            result.status_message,
            "No account found for the given authentication"
        );
        assert_eq!(result.details, Some(Vec::new()));

        let json = r#"{"details": "Something new", "errorCode": 777}"#;
        let result = decode_send_response(400, json);
        assert_eq!(result.status_code, TextClientStatusCode::Unknown);
        assert_eq!(result.status_message, "Something new");
        assert!(result.details.is_none());
    }

    #[test]
    fn decode_keeps_top_level_status_when_entries_are_off_shape() {
        let json = r#"{"details": "Created 1 message(s)", "errorCode": 0, "messages": [null]}"#;
        let result = decode_send_response(200, json);
        assert_eq!(result.status_code, TextClientStatusCode::Ok);
        assert_eq!(result.status_message, "Created 1 message(s)");
        assert_eq!(result.details, Some(Vec::new()));

        let json = r#"
        {
          "details": "Created 2 message(s)",
          "errorCode": 0,
          "messages": [
            { "to": "0031600000001", "status": "Accepted", "parts": "1" },
            { "to": "0031600000002", "status": "Accepted", "parts": 1 }
          ]
        }
        "#;
        let result = decode_send_response(200, json);
        assert_eq!(result.status_code, TextClientStatusCode::Ok);
        let details = result.details.unwrap();
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].to.as_deref(), Some("0031600000002"));
        assert_eq!(details[0].parts, Some(1));
    }

    #[test]
    fn decode_maps_error_code_without_details_text() {
        let result = decode_send_response(401, r#"{"details": null, "errorCode": 101}"#);
        assert_eq!(result.status_code, TextClientStatusCode::AuthenticationFailed);
        assert_eq!(result.status_message, "");
        assert!(result.details.is_none());

        let result = decode_send_response(200, r#"{"errorCode": 0, "messages": {"to": "x"}}"#);
        assert_eq!(result.status_code, TextClientStatusCode::Ok);
        assert!(result.details.is_none());
    }

    #[test]
    fn decode_returns_raw_body_for_invalid_json() {
        let body = "{[nojson";
        let result = decode_send_response(418, body);
        assert_eq!(result.status_code, TextClientStatusCode::Unknown);
        assert_eq!(result.status_message, body);
        assert!(result.details.is_none());
        assert_eq!(result.http_status, Some(418));
    }

    #[test]
    fn decode_returns_raw_body_for_empty_or_unexpected_json() {
        for (status, body) in [
            (200, ""),
            (502, "<html>Bad Gateway</html>"),
            (200, "[1, 2, 3]"),
            (200, r#"{"status": "ok"}"#),
            (200, r#"{"errorCode": "zero", "details": "x"}"#),
            (200, r#"[0, "looks like a struct"]"#),
        ] {
            let result = decode_send_response(status, body);
            assert_eq!(result.status_code, TextClientStatusCode::Unknown, "{body}");
            assert_eq!(result.status_message, body);
            assert!(result.details.is_none());
        }
    }
}
