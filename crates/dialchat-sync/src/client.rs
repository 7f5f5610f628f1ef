//! Polling synchronizer between the chat API and the local message view
//!
//! [`MessageSyncClient`] keeps an in-memory, time-ordered copy of the remote
//! message collection. The copy is only ever replaced wholesale by a fresh
//! fetch; nothing is merged or inserted optimistically. Every network failure
//! is logged and swallowed so callers only see outcome values.

use crate::config::{ChangeDetection, SyncConfig};
use dialchat_api::{error::Result as ApiResult, AttachmentUpload, MessageTransport};
use dialchat_types::{sort_chronologically, Message, NewMessage};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, error, info};

/// Side effects requested from the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncEvent {
    /// The initial fetch finished, successfully or not
    LoadComplete,
    /// Local state was replaced; scroll to the newest message
    ScrollToEnd,
}

/// Result of a single poll tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Replaced,
    Unchanged,
    Failed,
}

/// Result of [`MessageSyncClient::send`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank input, nothing was sent
    Skipped,
    Sent,
    Failed,
}

/// Result of [`MessageSyncClient::send_attachment`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    /// No file selected, nothing was sent
    Skipped,
    /// Uploaded; a refetch is scheduled
    Scheduled,
    Failed,
}

struct Inner {
    transport: Arc<dyn MessageTransport>,
    config: SyncConfig,
    messages: watch::Sender<Arc<Vec<Message>>>,
    loading: AtomicBool,
    events: mpsc::UnboundedSender<SyncEvent>,
    deferred: TaskTracker,
    shutdown: CancellationToken,
}

/// Keeps a time-ordered view of the remote messages current
#[derive(Clone)]
pub struct MessageSyncClient {
    inner: Arc<Inner>,
}

impl MessageSyncClient {
    /// Create a client; the receiver yields the view side effects
    pub fn new(
        transport: Arc<dyn MessageTransport>,
        config: SyncConfig,
    ) -> (Self, mpsc::UnboundedReceiver<SyncEvent>) {
        let (events, events_rx) = mpsc::unbounded_channel();
        let (messages, _) = watch::channel(Arc::new(Vec::new()));
        let client = Self {
            inner: Arc::new(Inner {
                transport,
                config,
                messages,
                loading: AtomicBool::new(true),
                events,
                deferred: TaskTracker::new(),
                shutdown: CancellationToken::new(),
            }),
        };
        (client, events_rx)
    }

    /// Current ordered snapshot
    pub fn messages(&self) -> Arc<Vec<Message>> {
        self.inner.messages.borrow().clone()
    }

    /// True until the initial fetch has finished
    pub fn is_loading(&self) -> bool {
        self.inner.loading.load(Ordering::Acquire)
    }

    fn emit(&self, event: SyncEvent) {
        // The view may already be gone during teardown
        let _ = self.inner.events.send(event);
    }

    async fn fetch_sorted(&self) -> ApiResult<Vec<Message>> {
        let mut messages = self.inner.transport.fetch_messages().await?;
        sort_chronologically(&mut messages);
        Ok(messages)
    }

    fn replace(&self, messages: Vec<Message>) {
        debug!(count = messages.len(), "Replacing local messages");
        self.inner.messages.send_replace(Arc::new(messages));
    }

    /// Fetch, sort and replace unconditionally, then request a scroll
    pub async fn refresh(&self) -> bool {
        match self.fetch_sorted().await {
            Ok(messages) => {
                self.replace(messages);
                self.emit(SyncEvent::ScrollToEnd);
                true
            }
            Err(e) => {
                error!("Failed to fetch messages: {}", e);
                false
            }
        }
    }

    /// Initial load. Always ends the loading state, even on failure.
    pub async fn bootstrap(&self) {
        let fetched = self.fetch_sorted().await;
        let loaded = match fetched {
            Ok(messages) => {
                info!("Loaded {} messages", messages.len());
                self.replace(messages);
                true
            }
            Err(e) => {
                error!("Failed to load messages: {}", e);
                false
            }
        };

        self.inner.loading.store(false, Ordering::Release);
        self.emit(SyncEvent::LoadComplete);
        if loaded {
            self.emit(SyncEvent::ScrollToEnd);
        }
    }

    /// One polling tick
    pub async fn poll(&self) -> PollOutcome {
        let fetched = match self.fetch_sorted().await {
            Ok(messages) => messages,
            Err(e) => {
                error!("Polling failed: {}", e);
                return PollOutcome::Failed;
            }
        };

        let changed = {
            let current = self.inner.messages.borrow();
            match self.inner.config.change_detection {
                ChangeDetection::Count => fetched.len() != current.len(),
                ChangeDetection::Content => fetched != **current,
            }
        };

        if changed {
            self.replace(fetched);
            self.emit(SyncEvent::ScrollToEnd);
            PollOutcome::Replaced
        } else {
            PollOutcome::Unchanged
        }
    }

    /// Send the pending input as a text message.
    ///
    /// Blank input is ignored. On success `draft` is cleared and the full
    /// collection is refetched; on failure `draft` is left as typed.
    pub async fn send(&self, draft: &mut String, sender_id: &str) -> SendOutcome {
        let Some(message) = NewMessage::compose(draft, sender_id) else {
            return SendOutcome::Skipped;
        };

        if let Err(e) = self.inner.transport.create_message(&message).await {
            error!("Failed to send message: {}", e);
            return SendOutcome::Failed;
        }

        draft.clear();
        self.refresh().await;
        SendOutcome::Sent
    }

    /// Upload a file as a message; the refetch happens after a short delay
    pub async fn send_attachment(
        &self,
        file: Option<AttachmentUpload>,
        sender_id: &str,
    ) -> UploadOutcome {
        let Some(file) = file else {
            return UploadOutcome::Skipped;
        };

        let file_name = file.file_name.clone();
        if let Err(e) = self.inner.transport.upload_attachment(file, sender_id).await {
            error!("Failed to upload {}: {}", file_name, e);
            return UploadOutcome::Failed;
        }

        info!("Uploaded {}", file_name);
        let delay = self.inner.config.attachment_refetch_delay();
        let client = self.clone();
        self.inner.deferred.spawn(async move {
            tokio::select! {
                () = client.inner.shutdown.cancelled() => {}
                () = time::sleep(delay) => {
                    client.refresh().await;
                }
            }
        });
        UploadOutcome::Scheduled
    }

    /// Wait for scheduled refetches to finish
    pub async fn wait_deferred(&self) {
        self.inner.deferred.close();
        self.inner.deferred.wait().await;
        self.inner.deferred.reopen();
    }

    /// Bootstrap, then poll until [`shutdown`](Self::shutdown).
    ///
    /// The polling timer is armed only after bootstrap and is re-armed
    /// whenever the local message count changes, which restarts the window.
    pub async fn run(&self) {
        tokio::select! {
            () = self.inner.shutdown.cancelled() => return,
            () = self.bootstrap() => {}
        }

        let period = self.inner.config.poll_interval();
        let mut snapshot = self.inner.messages.subscribe();

        loop {
            let armed_count = snapshot.borrow_and_update().len();
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            debug!(count = armed_count, "Polling timer armed");

            loop {
                tokio::select! {
                    () = self.inner.shutdown.cancelled() => {
                        debug!("Polling stopped");
                        return;
                    }
                    _ = ticker.tick() => {
                        self.poll().await;
                    }
                    changed = snapshot.changed() => {
                        if changed.is_err() {
                            return;
                        }
                    }
                }

                if snapshot.borrow().len() != armed_count {
                    break;
                }
            }
        }
    }

    /// Stop polling and cancel pending refetches
    pub async fn shutdown(&self) {
        self.inner.shutdown.cancel();
        self.inner.deferred.close();
        self.inner.deferred.wait().await;
    }

    pub fn is_shut_down(&self) -> bool {
        self.inner.shutdown.is_cancelled()
    }
}
