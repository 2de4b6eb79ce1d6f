/// Message used when a message addresses more recipients than allowed.
pub(crate) fn recipients_exceeded_message(maximum: usize) -> String {
    format!("Maximum amount of Recipients exceeded. ({maximum})")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Normalized gateway status (`errorCode` / `messageErrorCode`).
///
/// Codes this crate does not know collapse into [`TextClientStatusCode::Unknown`].
pub enum TextClientStatusCode {
    Ok,
    AuthenticationFailed,
    BalanceInsufficient,
    ProductTokenIncorrect,
    MessagesContainErrors,
    MalformedRequest,
    InvalidMessageArray,
    InvalidFrom,
    InvalidTo,
    InvalidMsisdn,
    InvalidBody,
    InvalidField,
    SpamFiltered,
    Blacklisted,
    Rejected,
    InternalError,
    Unknown,
}

impl TextClientStatusCode {
    /// Map a raw gateway code.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Ok,
            101 => Self::AuthenticationFailed,
            102 => Self::BalanceInsufficient,
            103 => Self::ProductTokenIncorrect,
            201 => Self::MessagesContainErrors,
            202 => Self::MalformedRequest,
            203 => Self::InvalidMessageArray,
            301 => Self::InvalidFrom,
            302 => Self::InvalidTo,
            303 => Self::InvalidMsisdn,
            304 => Self::InvalidBody,
            305 => Self::InvalidField,
            401 => Self::SpamFiltered,
            402 => Self::Blacklisted,
            403 => Self::Rejected,
            500 => Self::InternalError,
            _ => Self::Unknown,
        }
    }

    /// Gateway code for this status. [`TextClientStatusCode::Unknown`] maps to `999`.
    pub fn code(self) -> i64 {
        match self {
            Self::Ok => 0,
            Self::AuthenticationFailed => 101,
            Self::BalanceInsufficient => 102,
            Self::ProductTokenIncorrect => 103,
            Self::MessagesContainErrors => 201,
            Self::MalformedRequest => 202,
            Self::InvalidMessageArray => 203,
            Self::InvalidFrom => 301,
            Self::InvalidTo => 302,
            Self::InvalidMsisdn => 303,
            Self::InvalidBody => 304,
            Self::InvalidField => 305,
            Self::SpamFiltered => 401,
            Self::Blacklisted => 402,
            Self::Rejected => 403,
            Self::InternalError => 500,
            Self::Unknown => 999,
        }
    }

    pub fn is_ok(self) -> bool {
        self == Self::Ok
    }

    /// Whether the gateway rejected the credentials.
    pub fn is_auth_error(self) -> bool {
        matches!(
            self,
            Self::AuthenticationFailed | Self::ProductTokenIncorrect
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Per-recipient acceptance state reported by the gateway.
pub enum DeliveryStatus {
    Accepted,
    Rejected,
    Other(String),
}

impl DeliveryStatus {
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("accepted") {
            Self::Accepted
        } else if value.eq_ignore_ascii_case("rejected") {
            Self::Rejected
        } else {
            Self::Other(value.to_owned())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Outcome for one recipient of one message.
pub struct MessageDetail {
    pub to: Option<String>,
    pub status: Option<DeliveryStatus>,
    pub reference: Option<String>,
    pub parts: Option<u32>,
    pub details: Option<String>,
    pub error_code: Option<TextClientStatusCode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Outcome of a send call.
///
/// Every send produces one of these, including local limit violations,
/// network failures and unreadable gateway responses, which all surface as
/// [`TextClientStatusCode::Unknown`].
pub struct TextClientResult {
    pub status_code: TextClientStatusCode,
    /// Gateway `details` text, or the raw response body when it could not be understood.
    pub status_message: String,
    pub details: Option<Vec<MessageDetail>>,
    /// HTTP status of the exchange, if one happened.
    pub http_status: Option<u16>,
}

impl TextClientResult {
    /// Result for a failure detected before or instead of an HTTP exchange.
    pub fn unknown(status_message: impl Into<String>) -> Self {
        Self {
            status_code: TextClientStatusCode::Unknown,
            status_message: status_message.into(),
            details: None,
            http_status: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status_code.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_code_mapping_round_trips_known_codes() {
        for code in [0, 101, 102, 103, 201, 202, 203, 301, 302, 303, 304, 305, 401, 402, 403, 500] {
            let status = TextClientStatusCode::from_code(code);
            assert_ne!(status, TextClientStatusCode::Unknown, "code {code}");
            assert_eq!(status.code(), code);
        }
    }

    #[test]
    fn unrecognized_codes_are_unknown() {
        assert_eq!(
            TextClientStatusCode::from_code(999),
            TextClientStatusCode::Unknown
        );
        assert_eq!(
            TextClientStatusCode::from_code(-3),
            TextClientStatusCode::Unknown
        );
        assert_eq!(TextClientStatusCode::Unknown.code(), 999);
    }

    #[test]
    fn status_code_helpers() {
        assert!(TextClientStatusCode::Ok.is_ok());
        assert!(TextClientStatusCode::AuthenticationFailed.is_auth_error());
        assert!(TextClientStatusCode::ProductTokenIncorrect.is_auth_error());
        assert!(!TextClientStatusCode::InvalidBody.is_auth_error());
    }

    #[test]
    fn delivery_status_parses_case_insensitively() {
        assert_eq!(DeliveryStatus::parse("Accepted"), DeliveryStatus::Accepted);
        assert_eq!(DeliveryStatus::parse("REJECTED"), DeliveryStatus::Rejected);
        assert_eq!(
            DeliveryStatus::parse("Queued"),
            DeliveryStatus::Other("Queued".to_owned())
        );
    }

    #[test]
    fn recipients_exceeded_message_matches_gateway_wording() {
        assert_eq!(
            recipients_exceeded_message(1000),
            "Maximum amount of Recipients exceeded. (1000)"
        );
    }
}
