//! HTTP implementation of [`MessageTransport`] on top of `reqwest::Client`.

use crate::config::ApiConfig;
use crate::error::{ApiError, Result};
use crate::transport::{AttachmentUpload, MessageTransport};
use async_trait::async_trait;
use dialchat_types::{sender_or_anonymous, Message, NewMessage};
use reqwest::multipart::{Form, Part};
use tracing::debug;

const MESSAGES_PATH: &str = "/messages";
const ATTACHMENT_PATH: &str = "/messages/attachment";

/// Bytes of an error body kept in [`ApiError::Status`]
const BODY_PREVIEW_CHARS: usize = 200;

/// Chat API client over HTTP
#[derive(Clone, Debug)]
pub struct HttpTransport {
    config: ApiConfig,
    inner: reqwest::Client,
}

impl HttpTransport {
    /// Build a client for the configured server
    ///
    /// # Errors
    /// Returns an error if the config is invalid or the client cannot be built
    pub fn new(config: ApiConfig) -> Result<Self> {
        config.validate()?;
        let inner = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, inner })
    }

    /// The configuration this client was built with
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Fail on non-success statuses, keeping a preview of the body
    async fn check_status(
        endpoint: &'static str,
        response: reqwest::Response,
    ) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status {
            endpoint,
            status: status.as_u16(),
            body: body.chars().take(BODY_PREVIEW_CHARS).collect(),
        })
    }
}

#[async_trait]
impl MessageTransport for HttpTransport {
    async fn fetch_messages(&self) -> Result<Vec<Message>> {
        let response = self
            .inner
            .get(self.config.endpoint(MESSAGES_PATH))
            .send()
            .await
            .map_err(|source| ApiError::Request {
                endpoint: MESSAGES_PATH,
                source,
            })?;
        let response = Self::check_status(MESSAGES_PATH, response).await?;

        // text() + from_str() keeps decode failures distinct from transport failures
        let body = response.text().await.map_err(|source| ApiError::Request {
            endpoint: MESSAGES_PATH,
            source,
        })?;
        let messages: Vec<Message> =
            serde_json::from_str(&body).map_err(|source| ApiError::Decode {
                endpoint: MESSAGES_PATH,
                source,
            })?;

        debug!(count = messages.len(), "Fetched messages");
        Ok(messages)
    }

    async fn create_message(&self, message: &NewMessage) -> Result<()> {
        let response = self
            .inner
            .post(self.config.endpoint(MESSAGES_PATH))
            .json(message)
            .send()
            .await
            .map_err(|source| ApiError::Request {
                endpoint: MESSAGES_PATH,
                source,
            })?;
        let response = Self::check_status(MESSAGES_PATH, response).await?;

        debug!(status = %response.status(), sender = %message.sender, "Message created");
        Ok(())
    }

    async fn upload_attachment(&self, upload: AttachmentUpload, sender: &str) -> Result<()> {
        let size = upload.bytes.len();
        let part = Part::bytes(upload.bytes)
            .file_name(upload.file_name.clone())
            .mime_str(&upload.mime_type)
            .map_err(|source| ApiError::Request {
                endpoint: ATTACHMENT_PATH,
                source,
            })?;
        let form = Form::new()
            .part("file", part)
            .text("sender", sender_or_anonymous(sender).to_string());

        let response = self
            .inner
            .post(self.config.endpoint(ATTACHMENT_PATH))
            .multipart(form)
            .send()
            .await
            .map_err(|source| ApiError::Request {
                endpoint: ATTACHMENT_PATH,
                source,
            })?;
        let response = Self::check_status(ATTACHMENT_PATH, response).await?;

        debug!(
            status = %response.status(),
            file = %upload.file_name,
            size,
            "Attachment uploaded"
        );
        Ok(())
    }
}
