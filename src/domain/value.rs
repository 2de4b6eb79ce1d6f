use crate::domain::validation::ValidationError;

use phonenumber::country;

#[derive(Clone, PartialEq, Eq, Hash)]
/// CM.com product token identifying the sending account.
///
/// Invariant: non-empty after trimming.
pub struct ProductToken(String);

impl ProductToken {
    /// Field name used by the gateway envelope (`producttoken`).
    pub const FIELD: &'static str = "producttoken";

    /// Header carrying the token on every request.
    pub const HEADER: &'static str = "X-CM-PRODUCTTOKEN";

    /// Create a validated [`ProductToken`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ProductToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ProductToken(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Recipient phone number as sent to the gateway (`to[].number`).
///
/// The value is trimmed but otherwise passed through unchanged. The gateway
/// expects international format with a `00` prefix (`0031612345678`); parse
/// into [`PhoneNumber`] first if you need normalization.
pub struct Recipient(String);

impl Recipient {
    /// Field name used by the gateway (`to`).
    pub const FIELD: &'static str = "to";

    /// Wrap a raw phone number.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self(value.trim().to_owned())
    }

    /// Raw (trimmed) value as sent to the gateway.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Recipient {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Recipient {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&String> for Recipient {
    fn from(value: &String) -> Self {
        Self::new(value.as_str())
    }
}

impl From<PhoneNumber> for Recipient {
    /// Convert a parsed phone number into the gateway's `00`-prefixed form.
    fn from(value: PhoneNumber) -> Self {
        Self(value.international())
    }
}

#[derive(Debug, Clone)]
/// Parsed phone number with an E.164 representation.
///
/// Equality, ordering, and hashing are based on the E.164 form.
pub struct PhoneNumber {
    raw: String,
    e164: String,
    parsed: phonenumber::PhoneNumber,
}

impl PhoneNumber {
    /// Field name used by the gateway (`number`).
    pub const FIELD: &'static str = "number";

    /// Parse and normalize a phone number into E.164.
    ///
    /// `default_region` is used when the input does not contain an explicit country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { raw, e164, parsed })
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized E.164 representation (`+31612345678`).
    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// International representation with a `00` prefix (`0031612345678`).
    pub fn international(&self) -> String {
        format!("00{}", self.e164.trim_start_matches('+'))
    }

    /// The parsed phone number from the `phonenumber` crate.
    pub fn parsed(&self) -> &phonenumber::PhoneNumber {
        &self.parsed
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}

impl std::cmp::PartialOrd for PhoneNumber {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::cmp::Ord for PhoneNumber {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.e164.cmp(&other.e164)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Bounds on how many SMS parts a long message may be split into.
///
/// Invariant: `MIN <= minimum <= maximum <= MAX`.
pub struct MessageParts {
    minimum: u8,
    maximum: u8,
}

impl MessageParts {
    /// Smallest allowed part count.
    pub const MIN: u8 = 1;
    /// Largest allowed part count.
    pub const MAX: u8 = 8;

    /// Create validated part bounds.
    pub fn new(minimum: u8, maximum: u8) -> Result<Self, ValidationError> {
        for actual in [minimum, maximum] {
            if !(Self::MIN..=Self::MAX).contains(&actual) {
                return Err(ValidationError::MessagePartsOutOfRange {
                    min: Self::MIN,
                    max: Self::MAX,
                    actual,
                });
            }
        }
        if minimum > maximum {
            return Err(ValidationError::MessagePartsOrder { minimum, maximum });
        }
        Ok(Self { minimum, maximum })
    }

    pub fn minimum(self) -> u8 {
        self.minimum
    }

    pub fn maximum(self) -> u8 {
        self.maximum
    }
}
