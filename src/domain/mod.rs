//! Domain layer: strong types with validation and invariants (no I/O).

mod message;
mod response;
mod rich_content;
mod validation;
mod value;

pub use message::{Channel, Message, RECIPIENTS_MAXIMUM};
pub(crate) use response::recipients_exceeded_message;
pub use response::{DeliveryStatus, MessageDetail, TextClientResult, TextClientStatusCode};
pub use rich_content::{MediaMessage, RichContent, RichMessage, Suggestion, ViewLocation};
pub use validation::ValidationError;
pub use value::{MessageParts, PhoneNumber, ProductToken, Recipient};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_token_rejects_empty() {
        assert!(matches!(
            ProductToken::new("   "),
            Err(ValidationError::Empty {
                field: ProductToken::FIELD
            })
        ));
    }

    #[test]
    fn phone_number_parses_with_region_and_trims() {
        let pn = PhoneNumber::parse(Some(phonenumber::country::Id::NL), " 0612345678 ").unwrap();
        assert_eq!(pn.raw(), "0612345678");
    }

    #[test]
    fn recipient_from_phone_number_uses_double_zero_prefix() {
        let pn = PhoneNumber::parse(Some(phonenumber::country::Id::FR), "0334455667").unwrap();
        let recipient: Recipient = pn.into();
        assert_eq!(recipient.raw(), "0033334455667");
    }

    #[test]
    fn suggestions_without_media_still_create_rich_content() {
        let message = Message::new("Opt in?", "CM.com", ["0031612345678"])
            .with_suggestions([Suggestion::reply("Opt In", "OK")]);
        let rich = message.rich_content().unwrap();
        assert!(rich.conversation().is_empty());
        assert_eq!(rich.suggestions().len(), 1);
    }

    #[test]
    fn unknown_result_has_no_details() {
        let result = TextClientResult::unknown("boom");
        assert_eq!(result.status_code, TextClientStatusCode::Unknown);
        assert_eq!(result.status_message, "boom");
        assert!(result.details.is_none());
        assert!(result.http_status.is_none());
        assert!(!result.is_ok());
    }
}
