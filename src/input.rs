use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    // Navigation
    NextSection, // Tab - next section
    PrevSection, // Shift+Tab - previous section
    NextItem,    // Down arrow, j
    PrevItem,    // Up arrow, k
    Select,      // Enter - open/select highlighted row
    Back,        // Esc - close modal / leave detail / cancel edit

    // Global toggles
    Refresh,           // 'r' - reload current section
    ToggleAutoRefresh, // 'a' - 30s auto-refresh
    ToggleDarkMode,    // 'd' - dark/light palette
    ToggleSidebar,     // 'b' - collapse the nav sidebar
    ShowHelp,          // '?' - help overlay
    StartFilter,       // '/' - edit the section's filter/search box
    DismissToast,      // 'x' - dismiss oldest toast

    // Control
    Quit, // 'q' or Ctrl+C

    // Section-local keys, resolved by the active section
    Char(char),

    // Unknown/unhandled
    Unknown,
}

impl InputEvent {
    pub fn from_key_event(key_event: KeyEvent) -> Self {
        match (key_event.code, key_event.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Self::Quit,

            (KeyCode::Tab, KeyModifiers::NONE) => Self::NextSection,
            (KeyCode::Tab, KeyModifiers::SHIFT) => Self::PrevSection,
            (KeyCode::BackTab, _) => Self::PrevSection,

            (KeyCode::Down | KeyCode::Char('j'), _) => Self::NextItem,
            (KeyCode::Up | KeyCode::Char('k'), _) => Self::PrevItem,

            (KeyCode::Enter, _) => Self::Select,
            (KeyCode::Esc, _) => Self::Back,

            (KeyCode::Char('q'), _) => Self::Quit,
            (KeyCode::Char('r'), _) => Self::Refresh,
            (KeyCode::Char('a'), _) => Self::ToggleAutoRefresh,
            (KeyCode::Char('d'), _) => Self::ToggleDarkMode,
            (KeyCode::Char('b'), _) => Self::ToggleSidebar,
            (KeyCode::Char('?'), _) => Self::ShowHelp,
            (KeyCode::Char('/'), _) => Self::StartFilter,
            (KeyCode::Char('x'), _) => Self::DismissToast,

            (KeyCode::Char(c), _) => Self::Char(c),

            _ => Self::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn global_keys_map() {
        assert_eq!(InputEvent::from_key_event(key(KeyCode::Tab)), InputEvent::NextSection);
        assert_eq!(InputEvent::from_key_event(key(KeyCode::Char('q'))), InputEvent::Quit);
        assert_eq!(
            InputEvent::from_key_event(key(KeyCode::Char('a'))),
            InputEvent::ToggleAutoRefresh
        );
        assert_eq!(
            InputEvent::from_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            InputEvent::Quit
        );
    }

    #[test]
    fn unbound_chars_fall_through_for_sections() {
        assert_eq!(
            InputEvent::from_key_event(key(KeyCode::Char('p'))),
            InputEvent::Char('p')
        );
        assert_eq!(InputEvent::from_key_event(key(KeyCode::F(9))), InputEvent::Unknown);
    }
}
