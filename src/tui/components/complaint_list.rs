//! Paginated complaint list component

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::models::Complaint;
use crate::tui::{
    traits::{Navigable, Paginated},
    ui::{truncate_to_width, Styles},
};

/// Complaint list with page-local selection
pub struct ComplaintList {
    pub items: Vec<Complaint>,
    pub state: ListState,
    pub current_page: usize,
    pub items_per_page: usize,
    pub is_focused: bool,
}

impl ComplaintList {
    pub fn new(items_per_page: usize) -> Self {
        Self {
            items: Vec::new(),
            state: ListState::default(),
            current_page: 0,
            items_per_page: items_per_page.max(1),
            is_focused: false,
        }
    }

    /// Replace the items, keeping the selected complaint when it is still present
    pub fn set_items(&mut self, items: Vec<Complaint>) {
        let selected_id = self.selected().map(|c| c.id);
        self.items = items;

        let position = selected_id.and_then(|id| self.items.iter().position(|c| c.id == id));
        match position {
            Some(index) => self.select_absolute(index),
            None if self.items.is_empty() => {
                self.current_page = 0;
                self.state.select(None);
            }
            None => self.select_absolute(0),
        }
    }

    fn select_absolute(&mut self, index: usize) {
        self.current_page = index / self.items_per_page;
        self.state.select(Some(index % self.items_per_page));
    }

    fn page_range(&self) -> std::ops::Range<usize> {
        let start = self.current_page * self.items_per_page;
        let end = std::cmp::min(start + self.items_per_page, self.items.len());
        start.min(end)..end
    }

    /// Complaints on the current page
    pub fn page_items(&self) -> &[Complaint] {
        &self.items[self.page_range()]
    }

    /// Currently selected complaint
    pub fn selected(&self) -> Option<&Complaint> {
        self.state
            .selected()
            .and_then(|idx| self.page_items().get(idx))
    }

    /// Render the list. `loading` marks the title while a fetch is in flight.
    pub fn render(&mut self, f: &mut Frame, area: Rect, loading: bool, error: Option<&str>) {
        let title_width = (area.width as usize).saturating_sub(30).max(10);
        let items: Vec<ListItem> = self
            .page_items()
            .iter()
            .map(|complaint| {
                let line = Line::from(vec![
                    Span::styled(format!("#{:<5} ", complaint.id), Styles::info()),
                    Span::styled(
                        format!("{:<17} ", complaint.created_at_display()),
                        Styles::inactive(),
                    ),
                    Span::raw(truncate_to_width(&complaint.title, title_width)),
                ]);
                ListItem::new(line)
            })
            .collect();

        let mut title = format!(
            "Complaints ({}) - Page {}/{}",
            self.items.len(),
            if self.items.is_empty() { 0 } else { self.current_page + 1 },
            self.get_total_pages()
        );
        if loading {
            title.push_str(" - Loading...");
        } else if error.is_some() {
            title.push_str(" - Refresh failed");
        }

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(if self.is_focused {
                Styles::active_border()
            } else {
                Styles::inactive_border()
            });

        if items.is_empty() {
            let empty = if loading {
                "Loading complaints..."
            } else {
                "No complaints yet"
            };
            let list = List::new(vec![ListItem::new(Span::styled(empty, Styles::inactive()))])
                .block(block);
            f.render_widget(list, area);
            return;
        }

        let list = List::new(items).block(block).highlight_style(if self.is_focused {
            Styles::selected()
        } else {
            Style::default()
        });

        f.render_stateful_widget(list, area, &mut self.state);
    }
}

impl Navigable for ComplaintList {
    fn navigate_up(&mut self) {
        let count = self.get_item_count();
        if count == 0 {
            return;
        }
        match self.state.selected() {
            Some(0) | None => {
                if self.current_page > 0 {
                    self.current_page -= 1;
                    self.state.select(Some(self.items_per_page - 1));
                } else {
                    self.state.select(Some(0));
                }
            }
            Some(i) => self.state.select(Some(i - 1)),
        }
    }

    fn navigate_down(&mut self) {
        let count = self.get_item_count();
        if count == 0 {
            return;
        }
        match self.state.selected() {
            Some(i) if i + 1 < count => self.state.select(Some(i + 1)),
            Some(_) => {
                if self.current_page + 1 < self.get_total_pages() {
                    self.current_page += 1;
                    self.state.select(Some(0));
                }
            }
            None => self.state.select(Some(0)),
        }
    }

    /// Items on the current page
    fn get_item_count(&self) -> usize {
        self.page_range().len()
    }
}

impl Paginated for ComplaintList {
    fn get_current_page(&self) -> usize {
        self.current_page
    }

    fn set_current_page(&mut self, page: usize) {
        let total = self.get_total_pages();
        if total == 0 {
            self.current_page = 0;
            self.state.select(None);
            return;
        }
        self.current_page = page.min(total - 1);
        self.state.select(Some(0));
    }

    fn get_total_pages(&self) -> usize {
        (self.items.len() + self.items_per_page - 1) / self.items_per_page
    }
}
