// Layout orchestration: header, current screen, status bar, overlays.
// Everything here is a projection of App; nothing is mutated except list
// scroll state inside the pickers.

pub mod confirm;
pub mod picker;

use crate::app::{App, Mode, Screen};
use crate::ui::{confirm::render_confirm, picker::render_picker};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Center a popup of given size within `area`.
pub fn popup_center(area: Rect, w: u16, h: u16) -> Rect {
    let w = w.min(area.width);
    let h = h.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

/// Place a popup in the upper third of `area`.
pub fn popup_upper(area: Rect, w: u16, h: u16) -> Rect {
    let w = w.min(area.width);
    let h = h.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height / 3).min(area.height.saturating_sub(h));
    Rect::new(x, y, w, h)
}

pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let sb_height = status_bar_height(app, area.width);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(sb_height),
        ])
        .split(area);
    let main_area = chunks[1];

    render_header(frame, chunks[0], app);

    let filtering = matches!(app.mode, Mode::Filter);
    match &mut app.screen {
        Screen::AuthGate => render_auth_gate(frame, main_area),
        Screen::OwnerPicker { picker }
        | Screen::RepositoryPicker { picker, .. }
        | Screen::BranchPicker { picker, .. } => render_picker(frame, main_area, picker, filtering),
    }

    render_status_bar(frame, chunks[2], app);
    if let Mode::Confirm { message, action } = &app.mode {
        render_confirm(frame, main_area, action.title(), message);
    }
    if let Some(label) = &app.loading {
        render_loading(frame, main_area, label);
    }
}

/// Breadcrumb of the path taken so far.
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let mut crumbs = vec!["ghpm".to_string()];
    match &app.screen {
        Screen::AuthGate => crumbs.push("sign in".into()),
        Screen::OwnerPicker { .. } => crumbs.push("owner".into()),
        Screen::RepositoryPicker { owner, .. } => crumbs.push(owner.clone()),
        Screen::BranchPicker { .. } => {
            if let Some(repo) = &app.session.selected_repository {
                crumbs.push(repo.owner.clone());
                crumbs.push(repo.name.clone());
            }
        }
    }

    let mut spans = Vec::new();
    let last = crumbs.len() - 1;
    for (i, crumb) in crumbs.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" › ", Style::default().fg(Color::DarkGray)));
        }
        let style = if i == last {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(crumb, style));
    }
    if let Some(login) = &app.session.viewer_login {
        let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
        let tail = format!("@{} ", login);
        let pad = (area.width as usize).saturating_sub(used + 1 + tail.chars().count());
        spans.push(Span::raw(" ".repeat(pad + 1)));
        spans.push(Span::styled(tail, Style::default().fg(Color::DarkGray)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_auth_gate(frame: &mut Frame, area: Rect) {
    let popup = popup_center(area, 56, 7);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Not signed in ")
        .border_style(Style::default().fg(Color::Yellow));
    let text = vec![
        Line::from("The GitHub CLI has no authenticated account."),
        Line::from(""),
        Line::from(vec![
            Span::raw("Run "),
            Span::styled("gh auth login", Style::default().fg(Color::Cyan).bold()),
            Span::raw(" in your terminal and restart ghpm."),
        ]),
    ];
    let para = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    frame.render_widget(para, popup);
}

fn get_mode_label(app: &App) -> &'static str {
    match &app.mode {
        Mode::Normal => "NORMAL",
        Mode::Filter => "FILTER",
        Mode::Confirm { .. } => "CONFIRM",
    }
}

fn build_hints(app: &App) -> String {
    let global = "(q)uit";
    match &app.mode {
        Mode::Normal => match &app.screen {
            Screen::AuthGate => global.to_string(),
            Screen::OwnerPicker { .. } => {
                format!("(j/k) move  (Enter) open  ·  (/)filter  ·  {}", global)
            }
            Screen::RepositoryPicker { .. } => format!(
                "(j/k) move  (Enter) open  (Esc) back  ·  (/)filter  ·  {}",
                global
            ),
            Screen::BranchPicker { .. } => format!(
                "(d)elete branch  (p)r/merge/delete  ·  (r)efresh  (/)filter  (Esc) back  ·  {}",
                global
            ),
        },
        Mode::Filter => "type to filter  Enter: open  Esc: clear".to_string(),
        Mode::Confirm { .. } => "(y)es  (n)o".to_string(),
    }
}

// Split hints at "  ·  " scope separators to fit within `available_width` chars per line.
fn wrap_hints(hints: &str, available_width: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for group in hints.split("  ·  ") {
        if current.is_empty() {
            current = group.to_string();
        } else {
            let candidate = format!("{}  {}", current, group);
            if candidate.chars().count() <= available_width {
                current = candidate;
            } else {
                lines.push(std::mem::replace(&mut current, group.to_string()));
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

const STATUS_MAX_ROWS: usize = 3;

// Word-wrap a status message to `width` chars, keeping its own line breaks.
// Words longer than a row are split.
fn wrap_message(msg: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for raw in msg.lines() {
        let mut current = String::new();
        for word in raw.split_whitespace() {
            let len = word.chars().count();
            let needed = if current.is_empty() { len } else { current.chars().count() + 1 + len };
            if needed <= width {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let mut chars: Vec<char> = word.chars().collect();
            while chars.len() > width {
                lines.push(chars.drain(..width).collect());
            }
            current = chars.into_iter().collect();
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Message rows as drawn: at most `STATUS_MAX_ROWS`, the last one marked
/// when more was cut.
fn status_rows(msg: &str, width: usize) -> Vec<String> {
    let mut rows = wrap_message(msg, width);
    if rows.len() > STATUS_MAX_ROWS {
        rows.truncate(STATUS_MAX_ROWS);
        if let Some(last) = rows.last_mut() {
            last.push_str(" …");
        }
    }
    rows
}

fn status_bar_height(app: &App, width: u16) -> u16 {
    let badge_width = get_mode_label(app).len() + 4; // " [LABEL] "
    let available = (width as usize).saturating_sub(badge_width + 1);
    if let Some(msg) = app.status_message.as_deref() {
        return status_rows(msg, available).len() as u16;
    }
    let lines = wrap_hints(&build_hints(app), available);
    (lines.len() as u16).max(1)
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mode_text = format!(" [{}] ", get_mode_label(app));
    let badge_width = mode_text.len();
    let badge_style = Style::default().fg(Color::Black).bg(Color::Yellow).bold();

    let ver = concat!(" v", env!("CARGO_PKG_VERSION"), " ");
    let ver_style = Style::default().fg(Color::DarkGray);

    let available = (area.width as usize).saturating_sub(badge_width + 1);

    // a status message replaces the hints until the next one is set
    let (rows, text_style) = match app.status_message.as_deref() {
        Some(msg) => (status_rows(msg, available), Style::default().fg(Color::Cyan)),
        None => (wrap_hints(&build_hints(app), available), Style::default().fg(Color::Gray)),
    };
    let indent = " ".repeat(badge_width);

    let last = rows.len().saturating_sub(1);
    let mut text_lines: Vec<Line> = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        let lead = if i == 0 {
            Span::styled(mode_text.clone(), badge_style)
        } else {
            Span::raw(indent.clone())
        };
        let left = format!(" {}", row);
        let mut spans = vec![lead];
        if i == last {
            let pad = (area.width as usize).saturating_sub(badge_width + left.chars().count() + ver.len());
            spans.push(Span::styled(left, text_style));
            spans.push(Span::raw(" ".repeat(pad)));
            spans.push(Span::styled(ver, ver_style));
        } else {
            spans.push(Span::styled(left, text_style));
        }
        text_lines.push(Line::from(spans));
    }
    frame.render_widget(Paragraph::new(Text::from(text_lines)), area);
}

fn render_loading(frame: &mut Frame, area: Rect, label: &str) {
    let width = (label.chars().count() as u16).saturating_add(8).max(20);
    let popup = popup_center(area, width, 3);
    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));
    let para = Paragraph::new(format!("  ⏳ {}", label))
        .block(block)
        .style(Style::default().fg(Color::Magenta).bold());
    frame.render_widget(para, popup);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::runner::{testing::ScriptedRunner, CmdOutput};
    use ratatui::{backend::TestBackend, Terminal};
    use std::rc::Rc;

    fn screen_text(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    fn screen_rows(app: &mut App, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buffer.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "))
                    .collect()
            })
            .collect()
    }

    fn app_with(runner: ScriptedRunner, dir: &tempfile::TempDir) -> App {
        App::with_parts(
            Rc::new(runner),
            dir.path().join("config.json"),
            dir.path().join("cache"),
        )
    }

    fn signed_in() -> ScriptedRunner {
        ScriptedRunner::new()
            .on(&["gh", "api", "user/orgs"], CmdOutput::ok("acme\n"))
            .on(&["gh", "api", "user"], CmdOutput::ok("me\n"))
            .on(
                &["gh", "api", "users/acme/repos?per_page=100&page=1"],
                CmdOutput::ok("acme/api\nacme/web\n"),
            )
            .on(&["git", "-C"], CmdOutput::ok("origin/main\norigin/feature\n"))
    }

    #[test]
    fn auth_gate_tells_user_to_log_in() {
        let dir = tempfile::tempdir().unwrap();
        let runner =
            ScriptedRunner::new().on(&["gh", "auth", "status"], CmdOutput::failed("not logged in"));
        let text = screen_text(&mut app_with(runner, &dir));
        assert!(text.contains("gh auth login"));
        assert!(text.contains("(q)uit"));
    }

    #[test]
    fn owner_screen_lists_owners_with_login() {
        let dir = tempfile::tempdir().unwrap();
        let text = screen_text(&mut app_with(signed_in(), &dir));
        assert!(text.contains("Owners (2)"));
        assert!(text.contains("acme"));
        assert!(text.contains("@me"));
        assert!(text.contains("[NORMAL]"));
    }

    #[test]
    fn branch_screen_shows_breadcrumb_and_branches() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with(signed_in(), &dir);
        app.choose_owner("acme");
        app.choose_repository("acme", "acme/api");

        let text = screen_text(&mut app);
        assert!(text.contains("ghpm › acme › api"));
        assert!(text.contains("Branches of acme/api (2)"));
        assert!(text.contains("feature"));
    }

    #[test]
    fn confirm_overlay_names_branch() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with(signed_in(), &dir);
        app.choose_owner("acme");
        app.choose_repository("acme", "acme/api");
        app.dispatch(Action::NavigateDown);
        app.dispatch(Action::DeleteBranch);

        let text = screen_text(&mut app);
        assert!(text.contains("Delete 'feature' from origin?"));
        assert!(text.contains("[CONFIRM]"));
    }

    #[test]
    fn status_message_replaces_hints() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with(signed_in(), &dir);
        app.status_message = Some("Deleted feature".into());
        let text = screen_text(&mut app);
        assert!(text.contains("Deleted feature"));
        assert!(!text.contains("(/)filter"));
    }

    #[test]
    fn loading_overlay_shows_label() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with(signed_in(), &dir);
        app.loading = Some("Loading repositories...".into());
        assert!(screen_text(&mut app).contains("Loading repositories..."));
    }

    #[test]
    fn long_diagnostic_wraps_onto_extra_status_rows() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with(signed_in(), &dir);
        app.status_message = Some(
            "Delete failed: error: unable to delete 'feature': remote ref does not exist\n\
             error: failed to push some refs to 'github.com:acme/api.git'"
                .into(),
        );

        let rows = screen_rows(&mut app, 80, 24);

        assert!(rows[21].starts_with(" [NORMAL]  Delete failed:"));
        assert!(rows[21].contains("remote ref does not"));
        assert_eq!(rows[22].trim(), "exist");
        assert!(rows[23].contains("error: failed to push some refs to 'github.com:acme/api.git'"));
    }

    #[test]
    fn message_wrap_keeps_line_breaks_and_splits_long_words() {
        assert_eq!(wrap_message("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap_message("first\nsecond", 80), vec!["first", "second"]);
        assert_eq!(wrap_message("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap_message("", 10), vec![""]);
    }

    #[test]
    fn status_rows_are_capped_and_marked() {
        let rows = status_rows("a\nb\nc\nd\ne", 20);
        assert_eq!(rows, vec!["a", "b", "c …"]);
        assert_eq!(status_rows("short", 20), vec!["short"]);
    }

    #[test]
    fn hints_wrap_at_group_separators() {
        let lines = wrap_hints("aaa  ·  bbb  ·  ccc", 8);
        assert_eq!(lines, vec!["aaa  bbb", "ccc"]);
        assert_eq!(wrap_hints("aaa  ·  bbb", 80), vec!["aaa  bbb"]);
    }
}
