//! In-memory chat server shared by the app tests

use async_trait::async_trait;
use dialchat_api::error::Result;
use dialchat_api::{ApiError, AttachmentUpload, MessageTransport};
use dialchat_types::{Message, NewMessage};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub struct CountingTransport {
    fetches: AtomicUsize,
    fail_create: AtomicBool,
    messages: Mutex<Vec<Message>>,
}

impl CountingTransport {
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn fail_create(&self, fail: bool) {
        self.fail_create.store(fail, Ordering::SeqCst);
    }

    pub fn contents(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .filter_map(|m| m.content.clone())
            .collect()
    }
}

#[async_trait]
impl MessageTransport for CountingTransport {
    async fn fetch_messages(&self) -> Result<Vec<Message>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.messages.lock().unwrap().clone())
    }

    async fn create_message(&self, message: &NewMessage) -> Result<()> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(ApiError::Status {
                endpoint: "/messages",
                status: 503,
                body: "unavailable".into(),
            });
        }
        let mut messages = self.messages.lock().unwrap();
        let id = messages.len().to_string();
        messages.push(Message {
            id,
            content: Some(message.content.clone()),
            sender: message.sender.clone(),
            timestamp: message.timestamp,
            attachment: None,
        });
        Ok(())
    }

    async fn upload_attachment(&self, _upload: AttachmentUpload, _sender: &str) -> Result<()> {
        Ok(())
    }
}
