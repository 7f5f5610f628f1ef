use crate::config::ViewConfig;
use chrono::Local;
use dialchat_api::ApiConfig;
use dialchat_types::{is_own_message, Message};

/// Terminal rendition of the message list
pub struct MessageView {
    api: ApiConfig,
    view: ViewConfig,
}

impl MessageView {
    pub fn new(api: ApiConfig, view: ViewConfig) -> Self {
        Self { api, view }
    }

    /// Lines of one message bubble. Own messages are right-aligned.
    pub fn render_message(&self, message: &Message, current_id: &str) -> Vec<String> {
        let own = is_own_message(message, current_id);
        let mut lines = Vec::new();

        if let Some(text) = message.text() {
            lines.extend(text.lines().map(str::to_string));
        }
        if let Some(locator) = message.image_locator() {
            lines.push(format!("[image] {}", self.api.attachment_url(locator)));
        }

        let time = message.timestamp.with_timezone(&Local).format("%H:%M:%S");
        lines.push(if own {
            time.to_string()
        } else {
            format!("{} · {}", message.sender, time)
        });

        if own {
            let width = self.view.width;
            lines
                .into_iter()
                .map(|line| format!("{line:>width$}"))
                .collect()
        } else {
            lines
        }
    }

    /// The newest messages, ending at the bottom of the view
    pub fn render(&self, messages: &[Message], current_id: &str) -> String {
        if messages.is_empty() {
            return "No messages yet.".to_string();
        }

        let skip = messages.len().saturating_sub(self.view.tail);
        let mut out = Vec::new();
        if skip > 0 {
            out.push(format!("... {skip} earlier messages"));
        }
        for (i, message) in messages[skip..].iter().enumerate() {
            if i > 0 {
                out.push(String::new());
            }
            out.extend(self.render_message(message, current_id));
        }
        out.join("\n")
    }
}
