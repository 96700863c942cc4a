// Filterable list picker used by the owner, repository and branch screens.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

pub struct PickerState {
    pub title: String,
    items: Vec<String>,
    filter: String,
    // indices into `items` that match `filter`, in listing order
    visible: Vec<usize>,
    pub list_state: ListState,
}

impl PickerState {
    pub fn new(title: impl Into<String>, items: Vec<String>) -> Self {
        let mut s = Self {
            title: title.into(),
            items,
            filter: String::new(),
            visible: Vec::new(),
            list_state: ListState::default(),
        };
        s.refilter(None);
        s
    }

    /// Move the cursor onto `item` if it is listed.
    pub fn with_selected(mut self, item: &str) -> Self {
        self.select_item(item);
        self
    }

    pub fn visible_items(&self) -> impl Iterator<Item = &str> {
        self.visible.iter().map(|&i| self.items[i].as_str())
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn total_len(&self) -> usize {
        self.items.len()
    }

    pub fn navigate_up(&mut self) {
        if self.visible.is_empty() { return; }
        let i = self.list_state.selected().unwrap_or(0);
        let next = if i == 0 { self.visible.len() - 1 } else { i - 1 };
        self.list_state.select(Some(next));
    }

    pub fn navigate_down(&mut self) {
        if self.visible.is_empty() { return; }
        let i = self.list_state.selected().unwrap_or(0);
        let next = (i + 1) % self.visible.len();
        self.list_state.select(Some(next));
    }

    pub fn selected_item(&self) -> Option<&str> {
        let i = self.list_state.selected()?;
        self.visible.get(i).map(|&idx| self.items[idx].as_str())
    }

    pub fn push_filter(&mut self, c: char) {
        let keep = self.selected_item().map(str::to_string);
        self.filter.push(c);
        self.refilter(keep);
    }

    pub fn pop_filter(&mut self) {
        let keep = self.selected_item().map(str::to_string);
        self.filter.pop();
        self.refilter(keep);
    }

    pub fn clear_filter(&mut self) {
        let keep = self.selected_item().map(str::to_string);
        self.filter.clear();
        self.refilter(keep);
    }

    /// Replace the items, keeping the cursor on the same entry when it survives.
    pub fn set_items(&mut self, items: Vec<String>) {
        let keep = self.selected_item().map(str::to_string);
        self.items = items;
        self.refilter(keep);
    }

    fn select_item(&mut self, item: &str) {
        if let Some(pos) = self.visible.iter().position(|&i| self.items[i] == item) {
            self.list_state.select(Some(pos));
        }
    }

    fn refilter(&mut self, keep: Option<String>) {
        let needle = self.filter.to_lowercase();
        self.visible = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.to_lowercase().contains(&needle))
            .map(|(i, _)| i)
            .collect();
        self.list_state.select(if self.visible.is_empty() { None } else { Some(0) });
        if let Some(item) = keep {
            self.select_item(&item);
        }
    }
}

pub fn render_picker(frame: &mut Frame, area: Rect, state: &mut PickerState, filtering: bool) {
    let show_filter = filtering || !state.filter.is_empty();
    let (list_area, filter_area) = if show_filter && area.height > 3 {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);
        (chunks[0], Some(chunks[1]))
    } else {
        (area, None)
    };

    let title = if state.visible_len() == state.total_len() {
        format!(" {} ({}) ", state.title, state.total_len())
    } else {
        format!(" {} ({}/{}) ", state.title, state.visible_len(), state.total_len())
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_style(Style::default().bold());

    if state.visible.is_empty() {
        let msg = if state.items.is_empty() { "  (nothing to show)" } else { "  (no matches)" };
        let para = Paragraph::new(msg)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(para, list_area);
    } else {
        // owned rows, so list_state can be lent mutably below
        let items: Vec<ListItem> = state
            .visible_items()
            .map(|item| ListItem::new(item.to_string()))
            .collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan).bold())
            .highlight_symbol("► ");
        frame.render_stateful_widget(list, list_area, &mut state.list_state);
    }

    if let Some(fa) = filter_area {
        let style = if filtering {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let line = Line::from(vec![
            Span::styled(" / ", style.bold()),
            Span::styled(state.filter.clone(), style),
        ]);
        frame.render_widget(Paragraph::new(line), fa);
        if filtering {
            let x = fa.x + 3 + state.filter.chars().count() as u16;
            frame.set_cursor_position((x.min(fa.x + fa.width.saturating_sub(1)), fa.y));
        }
    }
}
