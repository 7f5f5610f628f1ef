//! Dialchat Types - Core types for the dialchat client
//!
//! This module defines the message records exchanged with the chat API and
//! the identities a user can sign in as.

pub mod identity;
pub mod message;

pub use identity::{Identity, IdentityError};
pub use message::{
    is_own_message, sender_or_anonymous, sort_chronologically, Attachment, AttachmentKind,
    Message, MessageId, NewMessage, ANONYMOUS_SENDER,
};
