//! Dialchat API Client Library
//!
//! Client for the chat server's HTTP API.
//!
//! ## Endpoints
//!
//! - `GET /messages` - full message collection
//! - `POST /messages` - create a text message
//! - `POST /messages/attachment` - multipart upload of a file
//!
//! Transport failures, non-success statuses and undecodable bodies all
//! surface as [`ApiError`].

#![deny(unsafe_code, dead_code, unused_imports, unused_variables, missing_docs)]

pub mod config;
pub mod error;
pub mod http_client;
pub mod transport;

pub use config::ApiConfig;
pub use error::ApiError;
pub use http_client::HttpTransport;
pub use transport::{AttachmentUpload, MessageTransport};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{ApiConfig, ApiError, AttachmentUpload, HttpTransport, MessageTransport};
}
