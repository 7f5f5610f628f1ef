use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sender recorded when no identity is signed in
pub const ANONYMOUS_SENDER: &str = "Anonymous";

/// Server-assigned message identifier
pub type MessageId = String;

/// A chat message as returned by `GET /messages`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "_id", alias = "id")]
    pub id: MessageId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub sender: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
}

impl Message {
    /// Text body, if the message carries a non-empty one
    pub fn text(&self) -> Option<&str> {
        self.content.as_deref().filter(|c| !c.is_empty())
    }

    /// Image attachment locator, if any
    pub fn image_locator(&self) -> Option<&str> {
        self.attachment
            .as_ref()
            .filter(|a| a.kind.is_image())
            .map(|a| a.locator.as_str())
    }
}

/// Binary attached to a message, stored server-side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(rename = "type")]
    pub kind: AttachmentKind,
    /// Path relative to the API base URL
    #[serde(rename = "url")]
    pub locator: String,
}

/// Coarse media category of an attachment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AttachmentKind {
    Image,
    Video,
    Audio,
    Other(String),
}

impl AttachmentKind {
    pub fn is_image(&self) -> bool {
        matches!(self, Self::Image)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Other(kind) => kind,
        }
    }
}

impl From<String> for AttachmentKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "image" => Self::Image,
            "video" => Self::Video,
            "audio" => Self::Audio,
            _ => Self::Other(kind),
        }
    }
}

impl From<AttachmentKind> for String {
    fn from(kind: AttachmentKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Body of `POST /messages`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMessage {
    pub content: String,
    pub sender: String,
    pub timestamp: DateTime<Utc>,
}

impl NewMessage {
    /// Build an outgoing text message stamped with the current time.
    ///
    /// Returns `None` when `content` is blank. An empty `sender` falls back to
    /// [`ANONYMOUS_SENDER`].
    pub fn compose(content: &str, sender: &str) -> Option<Self> {
        let content = content.trim();
        if content.is_empty() {
            return None;
        }
        Some(Self {
            content: content.to_string(),
            sender: sender_or_anonymous(sender).to_string(),
            timestamp: Utc::now(),
        })
    }
}

/// The sender to submit for `sender`, falling back to [`ANONYMOUS_SENDER`]
pub fn sender_or_anonymous(sender: &str) -> &str {
    if sender.is_empty() {
        ANONYMOUS_SENDER
    } else {
        sender
    }
}

/// Order messages by timestamp ascending, keeping server order on ties
pub fn sort_chronologically(messages: &mut [Message]) {
    messages.sort_by_key(|m| m.timestamp);
}

/// Whether `message` was sent by the signed-in identity
pub fn is_own_message(message: &Message, current_id: &str) -> bool {
    message.sender == current_id
}
