use crate::domain::rich_content::{RichContent, RichMessage, Suggestion};
use crate::domain::value::{MessageParts, Recipient};

/// Maximum number of recipients a single [`Message`] may address.
pub const RECIPIENTS_MAXIMUM: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Delivery channel a message may be routed over.
pub enum Channel {
    Sms,
    WhatsApp,
    Push,
    Rcs,
    Viber,
    AppleBusinessChat,
    Telegram,
    Instagram,
    FacebookMessenger,
    GoogleBusinessMessages,
}

impl Channel {
    /// Channel code as expected in `allowedChannels`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sms => "SMS",
            Self::WhatsApp => "WhatsApp",
            Self::Push => "Push",
            Self::Rcs => "RCS",
            Self::Viber => "Viber",
            Self::AppleBusinessChat => "Apple Business Chat",
            Self::Telegram => "Telegram",
            Self::Instagram => "Instagram",
            Self::FacebookMessenger => "Facebook Messenger",
            Self::GoogleBusinessMessages => "Google Business Messages",
        }
    }
}

#[derive(Debug, Clone, Default)]
/// One outbound message: text and/or rich content for a list of recipients.
///
/// Construction never fails. Limits such as [`RECIPIENTS_MAXIMUM`] are checked
/// when the message is sent, so an oversized message is representable but
/// will not reach the gateway.
pub struct Message {
    body: Option<String>,
    from: String,
    to: Vec<Recipient>,
    reference: Option<String>,
    rich_content: Option<RichContent>,
    allowed_channels: Vec<Channel>,
    app_key: Option<String>,
    message_parts: Option<MessageParts>,
}

impl Message {
    /// Create a plain text message.
    pub fn new<R>(
        body: impl Into<String>,
        from: impl Into<String>,
        to: impl IntoIterator<Item = R>,
    ) -> Self
    where
        R: Into<Recipient>,
    {
        Self {
            body: Some(body.into()),
            from: from.into(),
            to: to.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Restrict delivery to the given channels. Duplicates are dropped, order is kept.
    pub fn with_channels(mut self, channels: impl IntoIterator<Item = Channel>) -> Self {
        for channel in channels {
            if !self.allowed_channels.contains(&channel) {
                self.allowed_channels.push(channel);
            }
        }
        self
    }

    /// Hybrid app key, needed by the gateway for app-based channels such as WhatsApp.
    pub fn with_hybrid_app_key(mut self, app_key: impl Into<String>) -> Self {
        self.app_key = Some(app_key.into());
        self
    }

    /// Append a rich conversation item.
    pub fn with_rich_message(mut self, message: impl Into<RichMessage>) -> Self {
        self.rich_content
            .get_or_insert_with(RichContent::default)
            .push_message(message);
        self
    }

    /// Append suggestions to the rich content.
    pub fn with_suggestions(mut self, suggestions: impl IntoIterator<Item = Suggestion>) -> Self {
        self.rich_content
            .get_or_insert_with(RichContent::default)
            .extend_suggestions(suggestions);
        self
    }

    /// Client-side correlation id echoed back in delivery reports.
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Bound how many SMS parts a long body may be split into.
    pub fn with_message_parts(mut self, parts: MessageParts) -> Self {
        self.message_parts = Some(parts);
        self
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn sender(&self) -> &str {
        &self.from
    }

    pub fn recipients(&self) -> &[Recipient] {
        &self.to
    }

    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    pub fn rich_content(&self) -> Option<&RichContent> {
        self.rich_content.as_ref()
    }

    pub fn allowed_channels(&self) -> &[Channel] {
        &self.allowed_channels
    }

    pub fn app_key(&self) -> Option<&str> {
        self.app_key.as_deref()
    }

    pub fn message_parts(&self) -> Option<MessageParts> {
        self.message_parts
    }

    /// Whether this message addresses more than [`RECIPIENTS_MAXIMUM`] recipients.
    pub fn exceeds_recipients_limit(&self) -> bool {
        self.to.len() > RECIPIENTS_MAXIMUM
    }
}
