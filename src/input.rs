use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::snake::Position;

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

    /// Unit step for this direction; rows grow downwards.
    #[must_use]
    pub fn velocity(self) -> Position {
        match self {
            Self::Up => Position { x: 0, y: -1 },
            Self::Down => Position { x: 0, y: 1 },
            Self::Left => Position { x: -1, y: 0 },
            Self::Right => Position { x: 1, y: 0 },
        }
    }
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// Discrete key symbol delivered to a window.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Char(char),
    /// Any key the game has no symbol for.
    Other,
}

/// Game commands bound to letter keys.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Command {
    TogglePause,
    ToggleHelp,
    Restart,
}

impl Key {
    /// Maps `p`, `h` and `r` (any case) to their command.
    #[must_use]
    pub fn command(self) -> Option<Command> {
        let Self::Char(c) = self else {
            return None;
        };

        match c.to_ascii_lowercase() {
            'p' => Some(Command::TogglePause),
            'h' => Some(Command::ToggleHelp),
            'r' => Some(Command::Restart),
            _ => None,
        }
    }

    #[must_use]
    pub fn direction(self) -> Option<Direction> {
        match self {
            Self::Up => Some(Direction::Up),
            Self::Down => Some(Direction::Down),
            Self::Left => Some(Direction::Left),
            Self::Right => Some(Direction::Right),
            Self::Char(_) | Self::Other => None,
        }
    }

    /// Returns true for `q`/`Q`, which the desktop treats as quit when no window consumed it.
    #[must_use]
    pub fn is_quit(self) -> bool {
        matches!(self, Self::Char('q' | 'Q'))
    }
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        match code {
            KeyCode::Up => Self::Up,
            KeyCode::Down => Self::Down,
            KeyCode::Left => Self::Left,
            KeyCode::Right => Self::Right,
            KeyCode::Char(c) => Self::Char(c),
            _ => Self::Other,
        }
    }
}

/// Events produced by the terminal input layer.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum InputEvent {
    Key(Key),
    /// Ctrl+C.
    Interrupt,
}

/// Reads crossterm key events and turns them into [`InputEvent`]s.
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Waits up to `timeout` for one key press.
    pub fn poll(&mut self, timeout: Duration) -> io::Result<Option<InputEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => Ok(translate_key_event(key)),
            _ => Ok(None),
        }
    }
}

fn translate_key_event(key: KeyEvent) -> Option<InputEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(InputEvent::Interrupt);
    }

    Some(InputEvent::Key(Key::from(key.code)))
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

    use super::{
        Command, Direction, InputEvent, Key, direction_change_is_valid, translate_key_event,
    };

    #[test]
    fn opposite_direction_is_correct() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn opposite_velocities_cancel_out() {
        for direction in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            let sum = direction.velocity() + direction.opposite().velocity();
            assert_eq!((sum.x, sum.y), (0, 0));
        }
    }

    #[test]
    fn direction_change_rejects_reverse() {
        assert!(!direction_change_is_valid(Direction::Up, Direction::Down));
        assert!(!direction_change_is_valid(Direction::Down, Direction::Up));
        assert!(!direction_change_is_valid(
            Direction::Left,
            Direction::Right
        ));
        assert!(!direction_change_is_valid(
            Direction::Right,
            Direction::Left
        ));

        assert!(direction_change_is_valid(Direction::Up, Direction::Left));
        assert!(direction_change_is_valid(Direction::Up, Direction::Right));
        assert!(direction_change_is_valid(Direction::Up, Direction::Up));
    }

    #[test]
    fn command_letters_are_case_insensitive() {
        assert_eq!(Key::Char('p').command(), Some(Command::TogglePause));
        assert_eq!(Key::Char('P').command(), Some(Command::TogglePause));
        assert_eq!(Key::Char('H').command(), Some(Command::ToggleHelp));
        assert_eq!(Key::Char('r').command(), Some(Command::Restart));
        assert_eq!(Key::Char('x').command(), None);
        assert_eq!(Key::Up.command(), None);
    }

    #[test]
    fn ctrl_c_is_interrupt_and_releases_are_dropped() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(translate_key_event(ctrl_c), Some(InputEvent::Interrupt));

        let plain_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);
        assert_eq!(
            translate_key_event(plain_c),
            Some(InputEvent::Key(Key::Char('c')))
        );

        let release =
            KeyEvent::new_with_kind(KeyCode::Up, KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(translate_key_event(release), None);

        let escape = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(translate_key_event(escape), Some(InputEvent::Key(Key::Other)));
    }
}
