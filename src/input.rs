use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};

/// Canonical movement directions.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Left,
    Right,
    Down,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
        }
    }

    /// Returns the direction 90° clockwise.
    #[must_use]
    pub fn clockwise(self) -> Self {
        match self {
            Self::Up => Self::Right,
            Self::Right => Self::Down,
            Self::Down => Self::Left,
            Self::Left => Self::Up,
        }
    }

    /// Returns the direction 90° counter-clockwise.
    #[must_use]
    pub fn counter_clockwise(self) -> Self {
        match self {
            Self::Up => Self::Left,
            Self::Left => Self::Down,
            Self::Down => Self::Right,
            Self::Right => Self::Up,
        }
    }

    /// Unit delta as `(row, col)`.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (-1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
            Self::Down => (1, 0),
        }
    }
}

/// High-level input events consumed by the app loop and the engine.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Confirm,
    Retry,
    Quit,
    /// Debug: satisfy every mission objective of the current stage.
    ForceCompleteMissions,
    /// Debug: jump straight to the ending screen.
    ShowEnding,
    /// Debug: restart on the given stage (1-4).
    JumpToStage(u32),
}

/// Polls the terminal for one input event, waiting at most `timeout`.
///
/// Returns `Ok(None)` on timeout or on events we do not care about
/// (releases, resizes, mouse).
pub fn poll_input(timeout: Duration) -> io::Result<Option<GameInput>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }

    match event::read()? {
        Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) => Ok(map_key(code)),
        _ => Ok(None),
    }
}

fn map_key(code: KeyCode) -> Option<GameInput> {
    match code {
        KeyCode::Up => Some(GameInput::Direction(Direction::Up)),
        KeyCode::Down => Some(GameInput::Direction(Direction::Down)),
        KeyCode::Left => Some(GameInput::Direction(Direction::Left)),
        KeyCode::Right => Some(GameInput::Direction(Direction::Right)),
        KeyCode::Enter => Some(GameInput::Confirm),
        KeyCode::Esc => Some(GameInput::Quit),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'q' => Some(GameInput::Quit),
            'r' => Some(GameInput::Retry),
            'd' => Some(GameInput::ForceCompleteMissions),
            'e' => Some(GameInput::ShowEnding),
            '1'..='4' => Some(GameInput::JumpToStage(u32::from(c as u8 - b'0'))),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyCode;

    use super::{map_key, Direction, GameInput};

    #[test]
    fn opposite_direction_is_correct() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn rotations_cycle_through_all_directions() {
        let mut direction = Direction::Up;
        for _ in 0..4 {
            assert_eq!(direction.clockwise().counter_clockwise(), direction);
            direction = direction.clockwise();
        }
        assert_eq!(direction, Direction::Up);
    }

    #[test]
    fn clockwise_order_matches_exit_priority_table() {
        // The free-gate exit search depends on this exact rotation order.
        assert_eq!(Direction::Up.clockwise(), Direction::Right);
        assert_eq!(Direction::Left.clockwise(), Direction::Up);
        assert_eq!(Direction::Right.clockwise(), Direction::Down);
        assert_eq!(Direction::Down.clockwise(), Direction::Left);
    }

    #[test]
    fn debug_keys_map_to_debug_inputs() {
        assert_eq!(
            map_key(KeyCode::Char('d')),
            Some(GameInput::ForceCompleteMissions)
        );
        assert_eq!(map_key(KeyCode::Char('e')), Some(GameInput::ShowEnding));
        assert_eq!(map_key(KeyCode::Char('3')), Some(GameInput::JumpToStage(3)));
        assert_eq!(map_key(KeyCode::Char('x')), None);
    }
}
