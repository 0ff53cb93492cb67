//! Form field component for user input

use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::models::{ComplaintDraft, DraftField};
use crate::tui::{traits::FormHandler, ui::Styles};

/// Type of form field
#[derive(Debug, Clone, PartialEq)]
pub enum FormFieldType {
    Text,
    TextArea,
}

/// Individual form field. `cursor_position` counts characters, not bytes.
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: String,
    pub value: String,
    pub placeholder: String,
    pub field_type: FormFieldType,
    pub is_focused: bool,
    pub is_locked: bool,
    pub cursor_position: usize,
    pub validation_error: Option<String>,
}

impl FormField {
    pub fn new(label: &str, field_type: FormFieldType) -> Self {
        Self {
            label: label.to_string(),
            value: String::new(),
            placeholder: String::new(),
            field_type,
            is_focused: false,
            is_locked: false,
            cursor_position: 0,
            validation_error: None,
        }
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor_position = self.char_count();
        self.validation_error = None;
    }

    pub fn set_focus(&mut self, focused: bool) {
        self.is_focused = focused;
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn insert_char(&mut self, c: char) {
        if self.is_locked {
            return;
        }
        let idx = self.byte_index(self.cursor_position);
        self.value.insert(idx, c);
        self.cursor_position += 1;
        self.validation_error = None;
    }

    pub fn delete_char(&mut self) {
        if self.is_locked {
            return;
        }
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let idx = self.byte_index(self.cursor_position);
            self.value.remove(idx);
            self.validation_error = None;
        }
    }

    pub fn delete_char_forward(&mut self) {
        if self.is_locked {
            return;
        }
        if self.cursor_position < self.char_count() {
            let idx = self.byte_index(self.cursor_position);
            self.value.remove(idx);
            self.validation_error = None;
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.char_count() {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_to_start(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_to_end(&mut self) {
        self.cursor_position = self.char_count();
    }

    /// Render the form field
    pub fn render(&self, f: &mut Frame, area: Rect) {
        let display_text = if self.value.is_empty() && !self.placeholder.is_empty() {
            &self.placeholder
        } else {
            &self.value
        };

        let border_style = if self.validation_error.is_some() {
            Styles::error()
        } else if self.is_focused {
            Styles::active_border()
        } else {
            Styles::inactive_border()
        };

        let title = if let Some(ref error) = self.validation_error {
            format!("{} - Error: {}", self.label, error)
        } else {
            self.label.clone()
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style);

        let text_style = if (self.value.is_empty() && !self.placeholder.is_empty()) || self.is_locked
        {
            Styles::inactive()
        } else {
            Styles::default()
        };

        let mut paragraph = Paragraph::new(display_text.to_string())
            .style(text_style)
            .block(block);
        if self.field_type == FormFieldType::TextArea {
            paragraph = paragraph.wrap(Wrap { trim: false });
        }

        f.render_widget(paragraph, area);

        // Cursor tracking is single-line; wrapped text areas only show it on the first row.
        if self.is_focused && !self.is_locked {
            let prefix: String = self.value.chars().take(self.cursor_position).collect();
            let offset = unicode_width::UnicodeWidthStr::width(prefix.as_str()) as u16;
            let cursor_x = area.x + 1 + offset;
            let cursor_y = area.y + 1;
            if cursor_x < area.x + area.width.saturating_sub(1) {
                f.set_cursor(cursor_x, cursor_y);
            }
        }
    }

    /// Flag the field as required-but-empty
    pub fn validate(&mut self) -> bool {
        self.validation_error = None;
        if self.value.trim().is_empty() {
            self.validation_error = Some("required".to_string());
            return false;
        }
        true
    }
}

/// Title/body form backing a [`ComplaintDraft`]
pub struct Form {
    pub fields: Vec<FormField>,
    pub current_field: usize,
    pub has_focus: bool,
}

impl Form {
    pub const TITLE: usize = 0;
    pub const BODY: usize = 1;

    pub fn new(fields: Vec<FormField>) -> Self {
        let mut form = Self {
            fields,
            current_field: 0,
            has_focus: true,
        };
        form.update_focus();
        form
    }

    /// Form with the complaint title and body fields
    pub fn complaint() -> Self {
        Self::new(vec![
            FormField::new("Title", FormFieldType::Text).with_placeholder("e.g., Late delivery"),
            FormField::new("Body", FormFieldType::TextArea)
                .with_placeholder("Describe what went wrong"),
        ])
    }

    fn update_focus(&mut self) {
        let has_focus = self.has_focus;
        for (i, field) in self.fields.iter_mut().enumerate() {
            field.set_focus(has_focus && i == self.current_field);
        }
    }

    pub fn focus(&mut self, field: usize) {
        self.has_focus = true;
        self.set_current_field(field);
        self.update_focus();
    }

    pub fn blur(&mut self) {
        self.has_focus = false;
        self.update_focus();
    }

    pub fn set_locked(&mut self, locked: bool) {
        for field in &mut self.fields {
            field.is_locked = locked;
        }
    }

    pub fn get_field(&self, index: usize) -> Option<&FormField> {
        self.fields.get(index)
    }

    pub fn get_field_mut(&mut self, index: usize) -> Option<&mut FormField> {
        self.fields.get_mut(index)
    }

    pub fn get_current_field_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.current_field)
    }

    fn value(&self, index: usize) -> String {
        self.get_field(index)
            .map(|field| field.value.clone())
            .unwrap_or_default()
    }

    /// Current contents as a draft
    pub fn draft(&self) -> ComplaintDraft {
        ComplaintDraft::new(self.value(Self::TITLE), self.value(Self::BODY))
    }

    /// Replace the field contents with a draft
    pub fn load_draft(&mut self, draft: &ComplaintDraft) {
        if let Some(field) = self.get_field_mut(Self::TITLE) {
            field.set_value(&draft.title);
        }
        if let Some(field) = self.get_field_mut(Self::BODY) {
            field.set_value(&draft.body);
        }
    }

    /// Mark a draft field as missing and move focus to it
    pub fn flag_missing(&mut self, missing: DraftField) {
        let index = match missing {
            DraftField::Title => Self::TITLE,
            DraftField::Body => Self::BODY,
        };
        if let Some(field) = self.get_field_mut(index) {
            field.validate();
        }
        self.focus(index);
    }
}

impl FormHandler for Form {
    fn get_current_field(&self) -> usize {
        self.current_field
    }

    fn set_current_field(&mut self, field: usize) {
        if field < self.fields.len() {
            self.current_field = field;
            self.update_focus();
        }
    }

    fn get_field_count(&self) -> usize {
        self.fields.len()
    }

    fn handle_char_input(&mut self, c: char) {
        if let Some(field) = self.get_current_field_mut() {
            field.insert_char(c);
        }
    }

    fn handle_backspace(&mut self) {
        if let Some(field) = self.get_current_field_mut() {
            field.delete_char();
        }
    }

    fn handle_delete(&mut self) {
        if let Some(field) = self.get_current_field_mut() {
            field.delete_char_forward();
        }
    }
}
