//! Transport abstraction over the chat API
//!
//! [`MessageTransport`] is the seam between the sync client and the network;
//! [`crate::HttpTransport`] is the production implementation.

use crate::error::Result;
use async_trait::async_trait;
use dialchat_types::{Message, NewMessage};
use std::path::Path;

/// Operations the chat API exposes
#[async_trait]
pub trait MessageTransport: Send + Sync {
    /// `GET /messages` - the full message collection, in server order
    async fn fetch_messages(&self) -> Result<Vec<Message>>;

    /// `POST /messages` - create one text message
    async fn create_message(&self, message: &NewMessage) -> Result<()>;

    /// `POST /messages/attachment` - upload a file as a new message
    async fn upload_attachment(&self, upload: AttachmentUpload, sender: &str) -> Result<()>;
}

/// A file selected for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentUpload {
    /// File name sent in the multipart part
    pub file_name: String,
    /// MIME type of the part
    pub mime_type: String,
    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl AttachmentUpload {
    /// Build an upload from in-memory bytes, inferring the MIME type from the name
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime_type = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .to_string();
        Self {
            file_name,
            mime_type,
            bytes,
        }
    }

    /// Read a file from disk
    ///
    /// # Errors
    /// Returns [`crate::ApiError::Io`] if the file cannot be read
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map_or_else(|| "attachment".to_string(), |n| n.to_string_lossy().into_owned());
        Ok(Self::new(file_name, bytes))
    }
}
