use thiserror::Error;

use crate::input::Direction;

/// Largest row/col value accepted at entity construction time. Anything
/// bigger is treated as a corrupt coordinate rather than a huge map.
pub const COORD_LIMIT: i32 = 10_000;

/// Failure to construct a board entity from raw coordinates.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum EntityError {
    #[error("coordinate ({row}, {col}) has a negative component")]
    Negative { row: i32, col: i32 },
    #[error("coordinate ({row}, {col}) exceeds the {COORD_LIMIT} limit")]
    TooLarge { row: i32, col: i32 },
}

/// Grid position in logical cell coordinates, 1-based on the board.
///
/// Ordering is row-major: rows compare first, columns break ties.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    /// Validated constructor for entity placement. Movement deltas use plain
    /// struct literals; anything that *creates* an entity goes through here.
    pub fn new(row: i32, col: i32) -> Result<Self, EntityError> {
        if row < 0 || col < 0 {
            return Err(EntityError::Negative { row, col });
        }
        if row > COORD_LIMIT || col > COORD_LIMIT {
            return Err(EntityError::TooLarge { row, col });
        }
        Ok(Self { row, col })
    }

    /// Returns the neighboring cell one step in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dr, dc) = direction.delta();
        Self {
            row: self.row + dr,
            col: self.col + dc,
        }
    }

    /// Returns true when `other` lies in this cell's 8-neighborhood or on it.
    #[must_use]
    pub fn touches(self, other: Self) -> bool {
        (self.row - other.row).abs() <= 1 && (self.col - other.col).abs() <= 1
    }
}

/// Where on the board a wall sits. Border walls carry their border side;
/// interior walls have no side and therefore no preferred gate exit.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum WallSide {
    Top,
    Left,
    Right,
    Bottom,
    Interior,
}

impl WallSide {
    /// Direction pointing from this border into the play area. A gate carved
    /// from a border wall always ejects the snake inward.
    #[must_use]
    pub fn inward(self) -> Option<Direction> {
        match self {
            Self::Top => Some(Direction::Down),
            Self::Left => Some(Direction::Right),
            Self::Right => Some(Direction::Left),
            Self::Bottom => Some(Direction::Up),
            Self::Interior => None,
        }
    }
}

/// A regular wall cell. Corner walls are tracked separately as immune walls.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Wall {
    pub coord: Coord,
    pub side: WallSide,
}

impl Wall {
    pub fn new(row: i32, col: i32, side: WallSide) -> Result<Self, EntityError> {
        Ok(Self {
            coord: Coord::new(row, col)?,
            side,
        })
    }
}

/// Tag for everything that can occupy a board cell.
///
/// The fixed set of seven block kinds, discriminated by variant instead of a
/// virtual type accessor.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum BlockKind {
    Wall,
    ImmuneWall,
    SnakeHead,
    SnakeBody,
    GrowthItem,
    PoisonItem,
    TimeItem,
    Gate { active: bool },
}

#[cfg(test)]
mod tests {
    use crate::input::Direction;

    use super::{Coord, EntityError, WallSide};

    #[test]
    fn coord_construction_rejects_negative_components() {
        assert_eq!(
            Coord::new(-1, 5),
            Err(EntityError::Negative { row: -1, col: 5 })
        );
        assert_eq!(
            Coord::new(3, -2),
            Err(EntityError::Negative { row: 3, col: -2 })
        );
    }

    #[test]
    fn coord_construction_rejects_absurdly_large_components() {
        assert_eq!(
            Coord::new(10_001, 1),
            Err(EntityError::TooLarge { row: 10_001, col: 1 })
        );
        assert!(Coord::new(10_000, 10_000).is_ok());
    }

    #[test]
    fn coord_ordering_is_row_major() {
        let a = Coord { row: 1, col: 9 };
        let b = Coord { row: 2, col: 0 };
        let c = Coord { row: 2, col: 1 };

        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn step_applies_unit_deltas() {
        let origin = Coord { row: 5, col: 5 };

        assert_eq!(origin.step(Direction::Up), Coord { row: 4, col: 5 });
        assert_eq!(origin.step(Direction::Left), Coord { row: 5, col: 4 });
        assert_eq!(origin.step(Direction::Right), Coord { row: 5, col: 6 });
        assert_eq!(origin.step(Direction::Down), Coord { row: 6, col: 5 });
    }

    #[test]
    fn border_sides_point_inward() {
        assert_eq!(WallSide::Top.inward(), Some(Direction::Down));
        assert_eq!(WallSide::Left.inward(), Some(Direction::Right));
        assert_eq!(WallSide::Right.inward(), Some(Direction::Left));
        assert_eq!(WallSide::Bottom.inward(), Some(Direction::Up));
        assert_eq!(WallSide::Interior.inward(), None);
    }

    #[test]
    fn touches_covers_the_eight_neighborhood_and_self() {
        let center = Coord { row: 4, col: 4 };
        assert!(center.touches(center));
        assert!(center.touches(Coord { row: 3, col: 5 }));
        assert!(center.touches(Coord { row: 5, col: 3 }));
        assert!(!center.touches(Coord { row: 4, col: 6 }));
    }
}
