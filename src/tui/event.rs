use crossterm::event::{KeyCode, KeyEvent};

use super::app::App;
use crate::ui::TreeKeyAction;

/// Result of handling a key press.
pub enum KeyAction {
    Quit,
    Toggle(String),
    ToggleDetail,
    Reload,
    Continue,
}

/// Handle a key press. Returns an action indicating what the event loop
/// should do.
pub fn handle_key(app: &mut App, key: KeyEvent) -> KeyAction {
    match app.tree.handle_key(key) {
        TreeKeyAction::Quit => KeyAction::Quit,
        TreeKeyAction::Toggle(id) => KeyAction::Toggle(id),
        TreeKeyAction::Continue => KeyAction::Continue,
        TreeKeyAction::Unhandled => match key.code {
            KeyCode::Esc => KeyAction::Quit,
            KeyCode::Enter | KeyCode::Char('d') => KeyAction::ToggleDetail,
            KeyCode::Char('r') => KeyAction::Reload,
            _ => KeyAction::Continue,
        },
    }
}
