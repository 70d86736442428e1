//! Keyboard handling.
//!
//! Translates crossterm key events into `GameInput`. Bindings depend on the
//! mode: flappy mode only needs a flap key, hover mode needs four directions.

use crate::game::{Direction, GameInput, GameMode};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Keys shown in the status bar, per mode.
pub fn controls_hint(mode: GameMode) -> &'static [(&'static str, &'static str)] {
    match mode {
        GameMode::Flappy => &[
            ("[Space]", "Flap"),
            ("[P]", "Pause"),
            ("[H]", "Hitboxes"),
            ("[Q]", "Quit"),
        ],
        GameMode::Hover => &[
            ("[WASD]", "Move"),
            ("[P]", "Pause"),
            ("[H]", "Hitboxes"),
            ("[Q]", "Quit"),
        ],
    }
}

/// Map a key event to a game input for the given mode.
pub fn map_key(key: KeyEvent, mode: GameMode) -> GameInput {
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
    {
        return GameInput::Quit;
    }

    if key.kind == KeyEventKind::Release {
        return match (mode, direction_for(key.code)) {
            (GameMode::Hover, Some(dir)) => GameInput::Release(dir),
            _ => GameInput::Other,
        };
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => return GameInput::Quit,
        KeyCode::Char('p') | KeyCode::Char('P') => return GameInput::Pause,
        KeyCode::Char('h') | KeyCode::Char('H') => return GameInput::ToggleHitboxes,
        _ => {}
    }

    match mode {
        GameMode::Flappy => {
            // Holding the key must not auto-flap
            if key.kind == KeyEventKind::Repeat {
                return GameInput::Other;
            }
            match key.code {
                KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Up => GameInput::Flap,
                KeyCode::Char('w') | KeyCode::Char('W') => GameInput::Flap,
                _ => GameInput::Other,
            }
        }
        GameMode::Hover => match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => GameInput::Flap,
            code => direction_for(code)
                .map(GameInput::Press)
                .unwrap_or(GameInput::Other),
        },
    }
}

fn direction_for(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Direction::Right),
        _ => None,
    }
}
