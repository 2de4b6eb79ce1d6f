//! Rich content attached to a [`Message`](crate::domain::Message).
//!
//! These are plain data holders: URLs and mime types are not checked here,
//! the gateway decides whether it can deliver them on the chosen channel.

#[derive(Debug, Clone, PartialEq, Default)]
/// Structured payload of a message: conversation items plus suggestions.
pub struct RichContent {
    conversation: Vec<RichMessage>,
    suggestions: Vec<Suggestion>,
}

impl RichContent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a conversation item.
    pub fn push_message(&mut self, message: impl Into<RichMessage>) {
        self.conversation.push(message.into());
    }

    /// Append suggestions after any already present.
    pub fn extend_suggestions(&mut self, suggestions: impl IntoIterator<Item = Suggestion>) {
        self.suggestions.extend(suggestions);
    }

    pub fn conversation(&self) -> &[RichMessage] {
        &self.conversation
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn is_empty(&self) -> bool {
        self.conversation.is_empty() && self.suggestions.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One item of a rich conversation.
pub enum RichMessage {
    /// Plain text bubble.
    Text(String),
    /// Image, video, audio or document.
    Media(MediaMessage),
}

impl From<MediaMessage> for RichMessage {
    fn from(value: MediaMessage) -> Self {
        Self::Media(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Media attachment referenced by URL, with an optional display name.
pub struct MediaMessage {
    name: Option<String>,
    uri: String,
    mime_type: String,
}

impl MediaMessage {
    /// Create a media item with a display name, a public URL and its mime type.
    ///
    /// A blank name is treated as no name.
    pub fn new(
        name: impl Into<String>,
        uri: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        let name = name.into();
        Self {
            name: Some(name).filter(|name| !name.trim().is_empty()),
            uri: uri.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Create a media item without a display name.
    pub fn unnamed(uri: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            name: None,
            uri: uri.into(),
            mime_type: mime_type.into(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Interactive element shown below a rich message (mainly RCS).
pub enum Suggestion {
    /// Quick reply; `postback_data` is sent back when tapped.
    Reply { label: String, postback_data: String },
    /// Opens `url` in a browser.
    OpenUrl { label: String, url: String },
    /// Starts a call to `phone_number`.
    Dial { label: String, phone_number: String },
    /// Shows a location on a map.
    ViewLocation { label: String, location: ViewLocation },
}

impl Suggestion {
    pub fn reply(label: impl Into<String>, postback_data: impl Into<String>) -> Self {
        Self::Reply {
            label: label.into(),
            postback_data: postback_data.into(),
        }
    }

    pub fn open_url(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self::OpenUrl {
            label: label.into(),
            url: url.into(),
        }
    }

    pub fn dial(label: impl Into<String>, phone_number: impl Into<String>) -> Self {
        Self::Dial {
            label: label.into(),
            phone_number: phone_number.into(),
        }
    }

    pub fn view_location(label: impl Into<String>, location: ViewLocation) -> Self {
        Self::ViewLocation {
            label: label.into(),
            location,
        }
    }

    /// Text displayed on the suggestion chip.
    pub fn label(&self) -> &str {
        match self {
            Self::Reply { label, .. }
            | Self::OpenUrl { label, .. }
            | Self::Dial { label, .. }
            | Self::ViewLocation { label, .. } => label,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
/// Target of a [`Suggestion::ViewLocation`].
pub struct ViewLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub label: Option<String>,
    pub search_query: Option<String>,
    /// Search radius in meters.
    pub radius: Option<u32>,
}

impl ViewLocation {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            ..Default::default()
        }
    }
}
