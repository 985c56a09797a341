use std::collections::VecDeque;

use crate::config::MIN_SNAKE_SEGMENTS;
use crate::entity::Coord;
use crate::input::Direction;

/// Working-area bound for head movement. Moves that would leave this range
/// are dropped on the floor; the validity pass decides actual fatality.
const WORKING_AREA_LIMIT: i32 = 1_000;

/// Movement state of the snake head.
///
/// `ReverseAttempted` records an illegal 180° input; it sticks until the
/// engine consumes it at the start of the next tick and ends the session.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Heading {
    Idle,
    Moving(Direction),
    ReverseAttempted,
}

/// Snake state: head cell, heading, and body segments ordered head to tail.
///
/// `len()` counts body segments only; the spawn length of 3 is also the
/// minimum length while alive.
#[derive(Debug, Clone)]
pub struct Snake {
    head: Coord,
    heading: Heading,
    segments: VecDeque<Coord>,
}

impl Snake {
    /// Creates an idle snake at `head` with three segments stacked below it.
    #[must_use]
    pub fn spawn(head: Coord) -> Self {
        let segments = (1..=3)
            .map(|i| Coord {
                row: head.row + i,
                col: head.col,
            })
            .collect();

        Self {
            head,
            heading: Heading::Idle,
            segments,
        }
    }

    /// Builds a snake from explicit state, for tests and scenario setups.
    #[must_use]
    pub fn from_parts(head: Coord, heading: Heading, segments: Vec<Coord>) -> Self {
        Self {
            head,
            heading,
            segments: VecDeque::from(segments),
        }
    }

    /// Applies one direction input.
    ///
    /// Inputs equal to the current direction are ignored; inputs opposite to
    /// it flag a reverse attempt instead of turning. A pending reverse
    /// attempt cannot be overwritten by later inputs.
    pub fn steer(&mut self, direction: Direction) {
        match self.heading {
            Heading::ReverseAttempted => {}
            Heading::Moving(current) if direction == current => {}
            Heading::Moving(current) if direction == current.opposite() => {
                self.heading = Heading::ReverseAttempted;
            }
            _ => self.heading = Heading::Moving(direction),
        }
    }

    /// Prepends the current head cell to the body and drops the tail.
    ///
    /// Net effect: the body follows the head one step behind. No-op while
    /// idle.
    pub fn shift_body(&mut self) {
        if matches!(self.heading, Heading::Moving(_)) {
            self.segments.push_front(self.head);
            self.segments.pop_back();
        }
    }

    /// Moves the head one cell along the current direction.
    ///
    /// Results outside the generous working area are silently discarded.
    pub fn advance_head(&mut self) {
        let Heading::Moving(direction) = self.heading else {
            return;
        };

        let next = self.head.step(direction);
        if next.row >= 0
            && next.col >= 0
            && next.row < WORKING_AREA_LIMIT
            && next.col < WORKING_AREA_LIMIT
        {
            self.head = next;
        }
    }

    /// Appends one tail segment, extrapolated by mirroring the vector between
    /// the last two segments. With fewer than two segments the new cell is
    /// placed just below the head.
    pub fn grow(&mut self) {
        if self.segments.len() < 2 {
            self.segments.push_back(Coord {
                row: self.head.row + 1,
                col: self.head.col,
            });
            return;
        }

        let last = self.segments[self.segments.len() - 1];
        let second_last = self.segments[self.segments.len() - 2];
        self.segments.push_back(Coord {
            row: last.row - (second_last.row - last.row),
            col: last.col - (second_last.col - last.col),
        });
    }

    /// Drops the tail segment. Returns `false` (and leaves the body intact)
    /// when already at the minimum length.
    pub fn shrink(&mut self) -> bool {
        if self.segments.len() <= MIN_SNAKE_SEGMENTS {
            return false;
        }
        self.segments.pop_back();
        true
    }

    /// Debug helper: resizes the body to exactly `length` segments,
    /// duplicating the tail cell when growing.
    pub fn force_length(&mut self, length: usize) {
        let tail = self.segments.back().copied().unwrap_or(self.head);
        self.segments.resize(length, tail);
    }

    /// Moves the head to `coord` facing `direction` (gate traversal).
    pub fn teleport(&mut self, coord: Coord, direction: Direction) {
        self.head = coord;
        self.heading = Heading::Moving(direction);
    }

    /// Clears a pending reverse attempt back to the given direction.
    pub fn set_heading(&mut self, heading: Heading) {
        self.heading = heading;
    }

    #[must_use]
    pub fn head(&self) -> Coord {
        self.head
    }

    #[must_use]
    pub fn heading(&self) -> Heading {
        self.heading
    }

    /// Number of body segments (the displayed length).
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns true if the head or any segment occupies `coord`.
    #[must_use]
    pub fn occupies(&self, coord: Coord) -> bool {
        self.head == coord || self.segments.contains(&coord)
    }

    /// Returns true if any body segment sits on the head cell.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        self.segments.contains(&self.head)
    }

    /// Iterates over body segments from head-adjacent to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Coord> {
        self.segments.iter()
    }

    /// The tail cell, if any.
    #[must_use]
    pub fn tail(&self) -> Option<Coord> {
        self.segments.back().copied()
    }
}
