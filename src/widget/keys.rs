use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{
    input::Edit,
    state::{Event, Focus},
};

/// What a key press means for the running widget.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyAction {
    Widget(Event),
    Quit,
}

/// Maps a terminal key press to a widget event.
///
/// Ctrl+Enter triggers classification from any field. Terminals that cannot
/// report it send Alt+Enter or Ctrl+J instead, so those trigger too.
pub fn map_key(key: KeyEvent, focus: Focus) -> Option<KeyAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    let event = match key.code {
        KeyCode::Esc => return Some(KeyAction::Quit),
        KeyCode::Char('c') if ctrl => return Some(KeyAction::Quit),
        KeyCode::Enter if ctrl || alt => Event::Trigger,
        KeyCode::Char('j') if ctrl => Event::Trigger,
        KeyCode::Enter => match focus {
            Focus::Subject => Event::FocusNext,
            Focus::Body => Event::Edit(Edit::Newline),
            Focus::Button => Event::Trigger,
        },
        KeyCode::Char(' ') if focus == Focus::Button => Event::Trigger,
        KeyCode::Tab => Event::FocusNext,
        KeyCode::BackTab => Event::FocusPrev,
        KeyCode::Char(_) if ctrl || alt => return None,
        KeyCode::Char(ch) => Event::Edit(Edit::Insert(ch)),
        KeyCode::Backspace => Event::Edit(Edit::Backspace),
        KeyCode::Delete => Event::Edit(Edit::Delete),
        KeyCode::Left => Event::Edit(Edit::Left),
        KeyCode::Right => Event::Edit(Edit::Right),
        KeyCode::Home => Event::Edit(Edit::Home),
        KeyCode::End => Event::Edit(Edit::End),
        _ => return None,
    };
    Some(KeyAction::Widget(event))
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventState;

    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn modifier_enter_triggers_from_any_field() {
        for focus in [Focus::Subject, Focus::Body, Focus::Button] {
            for key in [
                press(KeyCode::Enter, KeyModifiers::CONTROL),
                press(KeyCode::Enter, KeyModifiers::ALT),
                press(KeyCode::Char('j'), KeyModifiers::CONTROL),
            ] {
                assert_eq!(
                    map_key(key, focus),
                    Some(KeyAction::Widget(Event::Trigger))
                );
            }
        }
    }

    #[test]
    fn plain_enter_depends_on_focus() {
        let enter = press(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(
            map_key(enter, Focus::Subject),
            Some(KeyAction::Widget(Event::FocusNext))
        );
        assert_eq!(
            map_key(enter, Focus::Body),
            Some(KeyAction::Widget(Event::Edit(Edit::Newline)))
        );
        assert_eq!(
            map_key(enter, Focus::Button),
            Some(KeyAction::Widget(Event::Trigger))
        );
    }

    #[test]
    fn characters_become_edits() {
        assert_eq!(
            map_key(press(KeyCode::Char('A'), KeyModifiers::SHIFT), Focus::Subject),
            Some(KeyAction::Widget(Event::Edit(Edit::Insert('A'))))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('x'), KeyModifiers::CONTROL), Focus::Subject),
            None
        );
    }

    #[test]
    fn escape_and_ctrl_c_quit() {
        assert_eq!(
            map_key(press(KeyCode::Esc, KeyModifiers::NONE), Focus::Body),
            Some(KeyAction::Quit)
        );
        assert_eq!(
            map_key(press(KeyCode::Char('c'), KeyModifiers::CONTROL), Focus::Body),
            Some(KeyAction::Quit)
        );
    }

    #[test]
    fn releases_are_ignored() {
        let release = KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(map_key(release, Focus::Subject), None);
    }
}
