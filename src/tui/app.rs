//! Main TUI application state and logic

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

use super::components::{ComplaintList, Form, StatusDisplay};
use super::events::AppEvent;
use super::traits::{FormHandler, Navigable, Paginated};
use super::ui::{centered_rect, Styles};
use crate::client::{ClientError, ComplaintApi};
use crate::config::Config;
use crate::models::{Complaint, ComplaintDraft, DraftField};
use crate::view_model::{RequestStatus, SubmitStart, ViewModel};

const TICK_RATE: Duration = Duration::from_millis(100);

/// Pane receiving keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Title,
    Body,
    List,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Title => Focus::Body,
            Focus::Body => Focus::List,
            Focus::List => Focus::Title,
        }
    }

    fn previous(self) -> Self {
        match self {
            Focus::Title => Focus::List,
            Focus::Body => Focus::Title,
            Focus::List => Focus::Body,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Focus::Title => "Title",
            Focus::Body => "Body",
            Focus::List => "Complaints",
        }
    }
}

/// Main TUI application state
pub struct App<A> {
    /// Application configuration
    pub config: Config,
    api: Arc<A>,

    pub view_model: ViewModel,
    pub form: Form,
    pub list: ComplaintList,
    pub status: StatusDisplay,
    pub focus: Focus,

    pub should_quit: bool,
    pub show_help_popup: bool,
    /// Complaint shown in the detail popup
    pub detail: Option<Complaint>,

    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
}

impl<A> App<A>
where
    A: ComplaintApi + 'static,
{
    /// Create a new TUI application
    pub fn new(config: Config, api: Arc<A>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let page_size = config.ui.page_size;

        Self {
            config,
            api,

            view_model: ViewModel::new(),
            form: Form::complaint(),
            list: ComplaintList::new(page_size),
            status: StatusDisplay::new()
                .with_idle_hint("Tab: switch pane | Ctrl+S: submit | F5: refresh | F1: help"),
            focus: Focus::Title,

            should_quit: false,
            show_help_popup: false,
            detail: None,

            events_tx,
            events_rx,
        }
    }

    /// Run the main application loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        self.start();

        loop {
            self.drain_events();

            terminal.draw(|f| self.draw(f))?;

            if event::poll(TICK_RATE)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Initial list load
    pub fn start(&mut self) {
        info!("Loading complaints from {}", self.config.base_url());
        self.request_refresh();
    }

    /// Fetch the list unless a fetch is already in flight
    pub fn request_refresh(&mut self) {
        if self.view_model.begin_refresh() {
            self.spawn_fetch();
        }
    }

    /// Submit the form unless a submit is already pending
    pub fn request_submit(&mut self) {
        self.sync_draft();

        match self.view_model.begin_submit() {
            SubmitStart::Ignored => {}
            SubmitStart::Invalid(ClientError::Validation(field)) => {
                self.form.flag_missing(field);
                self.focus = match field {
                    DraftField::Title => Focus::Title,
                    DraftField::Body => Focus::Body,
                };
                self.list.is_focused = false;
            }
            SubmitStart::Invalid(_) => {}
            SubmitStart::Send(draft) => {
                self.form.set_locked(true);
                self.spawn_submit(draft);
            }
        }
    }

    fn spawn_fetch(&self) {
        debug!("Spawning complaint list fetch");
        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = api.list_complaints().await;
            let _ = tx.send(AppEvent::ComplaintsLoaded(result));
        });
    }

    fn spawn_submit(&self, draft: ComplaintDraft) {
        debug!("Spawning complaint submission");
        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = api.submit_complaint(&draft).await;
            let _ = tx.send(AppEvent::ComplaintSubmitted(result));
        });
    }

    /// Apply every completion that has arrived without waiting
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_app_event(event);
        }
    }

    /// Wait for the next completion and apply it
    pub async fn process_next_event(&mut self) -> bool {
        match self.events_rx.recv().await {
            Some(event) => {
                self.handle_app_event(event);
                true
            }
            None => false,
        }
    }

    pub fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::ComplaintsLoaded(result) => {
                if self.view_model.complete_refresh(result) {
                    self.spawn_fetch();
                }
                self.list.set_items(self.view_model.complaints.clone());
            }
            AppEvent::ComplaintSubmitted(result) => {
                if self.view_model.complete_submit(&result) {
                    self.spawn_fetch();
                }
                self.form.set_locked(false);
                if self.view_model.submit_status == RequestStatus::Success {
                    self.form.load_draft(&self.view_model.draft);
                    if self.focus != Focus::List {
                        self.set_focus(Focus::Title);
                    }
                }
            }
        }
    }

    fn sync_draft(&mut self) {
        self.view_model.draft = self.form.draft();
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        match focus {
            Focus::Title => self.form.focus(Form::TITLE),
            Focus::Body => self.form.focus(Form::BODY),
            Focus::List => self.form.blur(),
        }
        self.list.is_focused = focus == Focus::List;
    }

    /// Handle keyboard input events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => self.should_quit = true,
                KeyCode::Char('s') => self.request_submit(),
                KeyCode::Char('r') => self.request_refresh(),
                _ => {}
            }
            return;
        }

        if self.show_help_popup {
            if matches!(key.code, KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?')) {
                self.show_help_popup = false;
            }
            return;
        }

        if self.detail.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                self.detail = None;
            }
            return;
        }

        // Global shortcuts
        match key.code {
            KeyCode::F(1) => {
                self.show_help_popup = true;
                return;
            }
            KeyCode::F(5) => {
                self.request_refresh();
                return;
            }
            KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::Tab => {
                self.set_focus(self.focus.next());
                return;
            }
            KeyCode::BackTab => {
                self.set_focus(self.focus.previous());
                return;
            }
            _ => {}
        }

        match self.focus {
            Focus::Title | Focus::Body => self.handle_form_key(key),
            Focus::List => self.handle_list_key(key),
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        if self.view_model.is_submitting() {
            // Form is read-only until the pending submit resolves.
            return;
        }

        match key.code {
            KeyCode::Enter => {
                if self.focus == Focus::Title {
                    self.set_focus(Focus::Body);
                } else {
                    self.request_submit();
                }
                return;
            }
            KeyCode::Char(c) => self.form.handle_char_input(c),
            KeyCode::Backspace => self.form.handle_backspace(),
            KeyCode::Delete => self.form.handle_delete(),
            KeyCode::Left => {
                if let Some(field) = self.form.get_current_field_mut() {
                    field.move_cursor_left();
                }
            }
            KeyCode::Right => {
                if let Some(field) = self.form.get_current_field_mut() {
                    field.move_cursor_right();
                }
            }
            KeyCode::Home => {
                if let Some(field) = self.form.get_current_field_mut() {
                    field.move_cursor_to_start();
                }
            }
            KeyCode::End => {
                if let Some(field) = self.form.get_current_field_mut() {
                    field.move_cursor_to_end();
                }
            }
            KeyCode::Up => self.set_focus(Focus::Title),
            KeyCode::Down => self.set_focus(Focus::Body),
            _ => {}
        }
        self.sync_draft();
    }

    fn handle_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.list.navigate_up(),
            KeyCode::Down => self.list.navigate_down(),
            KeyCode::Home => self.list.go_to_first_page(),
            KeyCode::End => self.list.go_to_last_page(),
            KeyCode::PageUp | KeyCode::Left => self.list.previous_page(),
            KeyCode::PageDown | KeyCode::Right => self.list.next_page(),
            KeyCode::Enter => self.detail = self.list.selected().cloned(),
            KeyCode::Char('r') => self.request_refresh(),
            KeyCode::Char('?') => self.show_help_popup = true,
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    /// Draw the UI
    pub fn draw(&mut self, f: &mut Frame) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(f, chunks[0]);

        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(chunks[1]);

        self.draw_form(f, panes[0]);
        self.list.render(
            f,
            panes[1],
            self.view_model.is_loading_list(),
            self.view_model.list_status.error(),
        );

        self.status.sync(&self.view_model);
        self.status.render(f, chunks[2]);

        if let Some(complaint) = &self.detail {
            draw_detail_popup(f, size, complaint);
        }

        if self.show_help_popup {
            draw_help_popup(f, size);
        }
    }

    fn draw_header(&self, f: &mut Frame, area: Rect) {
        let header = Paragraph::new(Line::from(vec![
            Span::styled("Complaint Desk", Styles::title()),
            Span::styled(
                format!("  {}  |  Focus: {}", self.config.base_url(), self.focus.as_str()),
                Styles::inactive(),
            ),
        ]))
        .block(Block::default().borders(Borders::ALL));

        f.render_widget(header, area);
    }

    fn draw_form(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(3),
            ])
            .split(area);

        if let Some(field) = self.form.get_field(Form::TITLE) {
            field.render(f, chunks[0]);
        }
        if let Some(field) = self.form.get_field(Form::BODY) {
            field.render(f, chunks[1]);
        }

        let (label, style) = if self.view_model.is_submitting() {
            ("[ Submitting... ]", Styles::inactive())
        } else {
            ("[ Submit: Ctrl+S or Enter in Body ]", Styles::success())
        };
        let submit = Paragraph::new(label)
            .style(style)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(submit, chunks[2]);
    }
}

fn draw_detail_popup(f: &mut Frame, area: Rect, complaint: &Complaint) {
    let popup_area = centered_rect(70, 60, area);
    f.render_widget(Clear, popup_area);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Id: ", Styles::info()),
            Span::raw(complaint.id.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Created: ", Styles::info()),
            Span::raw(complaint.created_at_display()),
        ]),
        Line::from(vec![
            Span::styled("Title: ", Styles::info()),
            Span::raw(complaint.title.clone()),
        ]),
        Line::from(""),
    ];
    lines.extend(complaint.body.lines().map(|l| Line::from(l.to_string())));

    let popup = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title("Complaint - Esc/Enter to close")
                .borders(Borders::ALL)
                .border_style(Styles::active_border()),
        );

    f.render_widget(popup, popup_area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);
    f.render_widget(Clear, popup_area);

    let help = "Global:\n\
        Tab / Shift+Tab - Switch pane\n\
        Ctrl+S - Submit complaint\n\
        F5 / Ctrl+R - Refresh list\n\
        F1 - Toggle this help\n\
        Esc / Ctrl+C - Quit\n\n\
        Form:\n\
        Type to edit, Left/Right/Home/End move the cursor\n\
        Enter in Title - Go to Body\n\
        Enter in Body - Submit\n\n\
        Complaints:\n\
        Up/Down - Select\n\
        PageUp/PageDown or Left/Right - Change page\n\
        Home/End - First/last page\n\
        Enter - Show complaint\n\
        r - Refresh\n\
        q - Quit";

    let popup = Paragraph::new(help).block(
        Block::default()
            .title("Help")
            .borders(Borders::ALL)
            .style(Styles::warning()),
    );

    f.render_widget(popup, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_cycle() {
        assert_eq!(Focus::Title.next(), Focus::Body);
        assert_eq!(Focus::Body.next(), Focus::List);
        assert_eq!(Focus::List.next(), Focus::Title);
        assert_eq!(Focus::Title.previous(), Focus::List);
    }
}
