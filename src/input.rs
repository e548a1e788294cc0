use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the unit `(dx, dy)` step for this heading. `y` grows downwards.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// High-level input events consumed by the driver.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Pause,
    Confirm,
    Quit,
    /// Switch to the user-select screen.
    SwitchUser,
    /// Printable character typed on a text screen.
    Char(char),
    Backspace,
    /// Move the user-select cursor.
    SelectPrevious,
    SelectNext,
}

/// Which key map applies: text entry treats letters as characters.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum InputMode {
    Text,
    Game,
}

/// Translates a key press into a game input for the active mode.
#[must_use]
pub fn map_key(key: KeyEvent, mode: InputMode) -> Option<GameInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(GameInput::Quit);
    }

    match mode {
        InputMode::Text => match key.code {
            KeyCode::Enter => Some(GameInput::Confirm),
            KeyCode::Esc => Some(GameInput::Quit),
            KeyCode::Backspace => Some(GameInput::Backspace),
            KeyCode::Up => Some(GameInput::SelectPrevious),
            KeyCode::Down => Some(GameInput::SelectNext),
            KeyCode::Char(c) if !c.is_control() => Some(GameInput::Char(c)),
            _ => None,
        },
        InputMode::Game => match key.code {
            KeyCode::Up | KeyCode::Char('w' | 'W') => Some(GameInput::Direction(Direction::Up)),
            KeyCode::Down | KeyCode::Char('s' | 'S') => {
                Some(GameInput::Direction(Direction::Down))
            }
            KeyCode::Left | KeyCode::Char('a' | 'A') => {
                Some(GameInput::Direction(Direction::Left))
            }
            KeyCode::Right | KeyCode::Char('d' | 'D') => {
                Some(GameInput::Direction(Direction::Right))
            }
            KeyCode::Char('p' | 'P') => Some(GameInput::Pause),
            KeyCode::Char('u' | 'U') => Some(GameInput::SwitchUser),
            KeyCode::Enter | KeyCode::Char(' ') => Some(GameInput::Confirm),
            KeyCode::Esc | KeyCode::Char('q' | 'Q') => Some(GameInput::Quit),
            _ => None,
        },
    }
}

/// Waits up to `timeout` for one key event and maps it.
pub fn poll_input(timeout: Duration, mode: InputMode) -> io::Result<Option<GameInput>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }

    match event::read()? {
        Event::Key(key) => Ok(map_key(key, mode)),
        _ => Ok(None),
    }
}
