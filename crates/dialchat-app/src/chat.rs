use crate::render::MessageView;
use dialchat_api::{AttachmentUpload, MessageTransport};
use dialchat_sync::{MessageSyncClient, SendOutcome, SyncConfig, SyncEvent, UploadOutcome};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// The chat module: a running sync client plus the compose input
pub struct ChatPanel {
    client: MessageSyncClient,
    events: mpsc::UnboundedReceiver<SyncEvent>,
    runner: JoinHandle<()>,
    view: MessageView,
    sender_id: String,
    draft: String,
}

impl ChatPanel {
    /// Start syncing. Polling begins once the initial load finishes.
    pub fn open(
        transport: Arc<dyn MessageTransport>,
        sync: SyncConfig,
        view: MessageView,
        sender_id: &str,
    ) -> Self {
        let (client, events) = MessageSyncClient::new(transport, sync);
        let runner = tokio::spawn({
            let client = client.clone();
            async move { client.run().await }
        });

        let panel = Self {
            client,
            events,
            runner,
            view,
            sender_id: sender_id.to_string(),
            draft: String::new(),
        };
        panel.redraw();
        panel
    }

    pub async fn next_event(&mut self) -> Option<SyncEvent> {
        self.events.recv().await
    }

    pub fn handle_event(&self, event: SyncEvent) {
        match event {
            SyncEvent::LoadComplete => {
                debug!("Initial load complete");
                // A non-empty load is drawn by the ScrollToEnd that follows
                if self.client.messages().is_empty() {
                    self.redraw();
                }
            }
            SyncEvent::ScrollToEnd => self.redraw(),
        }
    }

    /// What the panel currently shows
    fn screen(&self) -> String {
        if self.client.is_loading() {
            return "Loading messages...".to_string();
        }
        let messages = self.client.messages();
        self.view.render(&messages, &self.sender_id)
    }

    fn redraw(&self) {
        println!("\n{}\n", self.screen());
    }

    /// Send `text` as the compose input. Blank lines keep the pending draft.
    pub async fn send_text(&mut self, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        self.draft = text.to_string();
        self.send_draft().await;
    }

    /// Resend whatever is left in the compose input
    pub async fn send_draft(&mut self) {
        match self.client.send(&mut self.draft, &self.sender_id).await {
            SendOutcome::Sent => {}
            SendOutcome::Skipped => println!("Nothing to resend."),
            SendOutcome::Failed => {
                println!("Message not sent. Type /retry to try again.");
            }
        }
    }

    /// Upload the file at `path`. An unreadable file counts as no selection.
    pub async fn attach(&self, path: &str) {
        let file = if path.trim().is_empty() {
            None
        } else {
            match AttachmentUpload::from_path(Path::new(path.trim())).await {
                Ok(file) => Some(file),
                Err(e) => {
                    warn!("Cannot read attachment {}: {}", path.trim(), e);
                    None
                }
            }
        };

        match self.client.send_attachment(file, &self.sender_id).await {
            UploadOutcome::Scheduled => println!("Attachment uploaded."),
            UploadOutcome::Skipped => println!("Usage: /attach <path to an existing file>"),
            UploadOutcome::Failed => println!("Attachment not sent."),
        }
    }

    /// Tear down: stop polling and drop pending refetches
    pub async fn close(self) {
        self.client.shutdown().await;
        if let Err(e) = self.runner.await {
            warn!("Chat sync task ended abnormally: {}", e);
        }
    }
}
