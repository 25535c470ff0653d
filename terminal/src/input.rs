use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use snake_engine::Direction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiAction {
    Turn(Direction),
    TogglePause,
    Restart,
    SpeedUp,
    SlowDown,
    Quit,
}

/// Raw key event to UI action. Reversal suppression is not handled here;
/// the game loop applies that rule when the tick reads the pending turn.
pub fn map_key(key: &KeyEvent) -> Option<UiAction> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(UiAction::Quit);
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(UiAction::Turn(Direction::Up))
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(UiAction::Turn(Direction::Down))
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(UiAction::Turn(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(UiAction::Turn(Direction::Right))
        }
        KeyCode::Char(' ') | KeyCode::Esc => Some(UiAction::TogglePause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(UiAction::Restart),
        KeyCode::Char('+') | KeyCode::Char('=') => Some(UiAction::SpeedUp),
        KeyCode::Char('-') => Some(UiAction::SlowDown),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(UiAction::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrows_and_wasd_map_to_turns() {
        let cases = [
            (KeyCode::Up, Direction::Up),
            (KeyCode::Char('w'), Direction::Up),
            (KeyCode::Down, Direction::Down),
            (KeyCode::Char('s'), Direction::Down),
            (KeyCode::Left, Direction::Left),
            (KeyCode::Char('a'), Direction::Left),
            (KeyCode::Right, Direction::Right),
            (KeyCode::Char('D'), Direction::Right),
        ];

        for (code, direction) in cases {
            let key = KeyEvent::new(code, KeyModifiers::NONE);
            assert_eq!(map_key(&key), Some(UiAction::Turn(direction)));
        }
    }

    #[test]
    fn test_control_c_quits_regardless_of_other_bindings() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(&key), Some(UiAction::Quit));
    }

    #[test]
    fn test_unbound_keys_are_ignored() {
        let key = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(map_key(&key), None);
    }
}
