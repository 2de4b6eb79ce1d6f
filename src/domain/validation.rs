use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    InvalidPhoneNumber { input: String },
    MessagePartsOutOfRange { min: u8, max: u8, actual: u8 },
    MessagePartsOrder { minimum: u8, maximum: u8 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::MessagePartsOutOfRange { min, max, actual } => {
                write!(
                    f,
                    "message parts out of range: {actual} (expected {min}..={max})"
                )
            }
            Self::MessagePartsOrder { minimum, maximum } => {
                write!(
                    f,
                    "minimum message parts {minimum} exceeds maximum {maximum}"
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}
