use serde::Deserialize;
use std::time::Duration;

/// How a poll decides that the remote collection changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeDetection {
    /// Replace only when the message count differs. Misses same-count edits.
    #[default]
    Count,
    /// Replace whenever the fetched collection differs from local state
    Content,
}

/// Polling behaviour of the sync client
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SyncConfig {
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Wait before refetching after an attachment upload
    #[serde(default = "default_attachment_refetch_delay_ms")]
    pub attachment_refetch_delay_ms: u64,

    #[serde(default)]
    pub change_detection: ChangeDetection,
}

fn default_poll_interval_ms() -> u64 {
    3000
}

fn default_attachment_refetch_delay_ms() -> u64 {
    500
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            attachment_refetch_delay_ms: default_attachment_refetch_delay_ms(),
            change_detection: ChangeDetection::default(),
        }
    }
}

impl SyncConfig {
    pub fn poll_interval(&self) -> Duration {
        // A zero period would make the interval panic
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    pub fn attachment_refetch_delay(&self) -> Duration {
        Duration::from_millis(self.attachment_refetch_delay_ms)
    }
}
