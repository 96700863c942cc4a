use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;
use anyhow::Result;
use crate::action::Action;

pub fn poll_event(timeout: Duration, in_input: bool) -> Result<Option<Action>> {
    if event::poll(timeout)? {
        let action = match event::read()? {
            // release/repeat events arrive on some platforms; act on presses only
            Event::Key(key) if key.kind == KeyEventKind::Press => translate(key, in_input),
            _ => Action::None,
        };
        Ok(Some(action))
    } else {
        Ok(None)
    }
}

fn translate(key: KeyEvent, in_input: bool) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::ForceQuit;
    }
    if in_input { translate_input_key(key) } else { translate_key(key) }
}

/// Filter mode: only special keys are translated; all chars go to the filter.
fn translate_input_key(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter => Action::Select,
        KeyCode::Esc => Action::InputEscape,
        KeyCode::Backspace => Action::InputBackspace,
        KeyCode::Down => Action::NavigateDown,
        KeyCode::Up => Action::NavigateUp,
        KeyCode::Char(c) => Action::InputChar(c),
        _ => Action::None,
    }
}

/// Normal mode: chars are commands.
fn translate_key(key: KeyEvent) -> Action {
    match (key.modifiers, key.code) {
        (KeyModifiers::NONE, KeyCode::Char('q')) => Action::Quit,
        (KeyModifiers::NONE, KeyCode::Char('j')) | (KeyModifiers::NONE, KeyCode::Down) => Action::NavigateDown,
        (KeyModifiers::NONE, KeyCode::Char('k')) | (KeyModifiers::NONE, KeyCode::Up) => Action::NavigateUp,
        (KeyModifiers::NONE, KeyCode::Enter) => Action::Select,
        (KeyModifiers::NONE, KeyCode::Esc)
        | (KeyModifiers::NONE, KeyCode::Char('b'))
        | (KeyModifiers::NONE, KeyCode::Left) => Action::Back,
        (KeyModifiers::NONE, KeyCode::Char('/')) => Action::StartFilter,
        (KeyModifiers::NONE, KeyCode::Char('d')) => Action::DeleteBranch,
        (KeyModifiers::NONE, KeyCode::Char('p')) => Action::PrMergeDelete,
        (KeyModifiers::NONE, KeyCode::Char('r')) => Action::Refresh,
        (KeyModifiers::NONE, KeyCode::Char('y')) => Action::ConfirmYes,
        (KeyModifiers::NONE, KeyCode::Char('n')) => Action::ConfirmNo,
        _ => Action::None,
    }
}
