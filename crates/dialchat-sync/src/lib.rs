//! Message synchronization for the dialchat client.
//!
//! Fetches the full message collection, keeps it ordered by timestamp and
//! polls for changes on a fixed cadence.

pub mod client;
pub mod config;

pub use client::{MessageSyncClient, PollOutcome, SendOutcome, SyncEvent, UploadOutcome};
pub use config::{ChangeDetection, SyncConfig};
