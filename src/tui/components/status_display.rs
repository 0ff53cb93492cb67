//! Status display component for showing messages and progress

use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::ui::Styles;
use crate::view_model::{NoticeKind, ViewModel};

/// Types of status messages
#[derive(Debug, Clone, PartialEq)]
pub enum StatusType {
    Info,
    Success,
    Error,
    Loading,
}

/// Status message with type and content
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub message: String,
    pub status_type: StatusType,
    pub timestamp: Option<chrono::DateTime<chrono::Local>>,
}

impl StatusMessage {
    pub fn new(message: String, status_type: StatusType) -> Self {
        Self {
            message,
            status_type,
            timestamp: Some(chrono::Local::now()),
        }
    }
}

/// Status bar showing pending requests first, then the latest notice
pub struct StatusDisplay {
    pub current_message: Option<StatusMessage>,
    pub idle_hint: String,
}

impl Default for StatusDisplay {
    fn default() -> Self {
        Self {
            current_message: None,
            idle_hint: "Ready".to_string(),
        }
    }
}

impl StatusDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_idle_hint(mut self, hint: &str) -> Self {
        self.idle_hint = hint.to_string();
        self
    }

    /// Set current status message
    pub fn set_message(&mut self, message: StatusMessage) {
        self.current_message = Some(message);
    }

    /// Clear current message
    pub fn clear(&mut self) {
        self.current_message = None;
    }

    /// Get current message
    pub fn get_current(&self) -> Option<&StatusMessage> {
        self.current_message.as_ref()
    }

    /// Derive the message from view-model state. A new notice replaces the
    /// previous one; an unchanged notice keeps its timestamp.
    pub fn sync(&mut self, view_model: &ViewModel) {
        if view_model.is_submitting() {
            self.set_loading("Submitting complaint...");
            return;
        }
        if view_model.is_loading_list() {
            self.set_loading("Loading complaints...");
            return;
        }

        match &view_model.notice {
            Some(notice) => {
                let status_type = match notice.kind {
                    NoticeKind::Success => StatusType::Success,
                    NoticeKind::Error => StatusType::Error,
                };
                self.set_if_changed(status_type, notice.text.clone());
            }
            None => match view_model.last_refreshed {
                Some(at) => {
                    let text = format!(
                        "{} complaints, refreshed at {}",
                        view_model.complaints.len(),
                        at.format("%H:%M:%S")
                    );
                    self.set_if_changed(StatusType::Info, text);
                }
                None => self.clear(),
            },
        }
    }

    fn set_loading(&mut self, text: &str) {
        self.set_if_changed(StatusType::Loading, text.to_string());
    }

    fn set_if_changed(&mut self, status_type: StatusType, text: String) {
        let unchanged = self
            .current_message
            .as_ref()
            .map(|m| m.status_type == status_type && m.message == text)
            .unwrap_or(false);
        if !unchanged {
            self.set_message(StatusMessage::new(text, status_type));
        }
    }

    /// Render the status display
    pub fn render(&self, f: &mut Frame, area: Rect) {
        let content = match &self.current_message {
            Some(message) => self.format_message(message),
            None => self.idle_hint.clone(),
        };

        let style = match self.current_message.as_ref().map(|m| &m.status_type) {
            Some(StatusType::Info) => Styles::info(),
            Some(StatusType::Success) => Styles::success(),
            Some(StatusType::Error) => Styles::error(),
            Some(StatusType::Loading) => Styles::warning(),
            None => Styles::inactive(),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::inactive_border());

        let paragraph = Paragraph::new(content).style(style).block(block);

        f.render_widget(paragraph, area);
    }

    /// Format message for display
    fn format_message(&self, message: &StatusMessage) -> String {
        let prefix = match message.status_type {
            StatusType::Info => "ℹ",
            StatusType::Success => "✓",
            StatusType::Error => "✗",
            StatusType::Loading => "⟳",
        };

        match message.timestamp {
            Some(timestamp) => format!(
                "{} [{}] {}",
                prefix,
                timestamp.format("%H:%M:%S"),
                message.message
            ),
            None => format!("{} {}", prefix, message.message),
        }
    }
}
