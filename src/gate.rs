use rand::Rng;

use crate::entity::{Coord, Wall, WallSide};
use crate::input::Direction;
use crate::map::Map;

/// Exit rule of a single gate.
///
/// Border gates eject inward with a fixed direction; interior gates pick the
/// first open direction by entry-relative priority.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GateExit {
    Fixed(Direction),
    Free,
}

/// One teleport endpoint. Gates always exist as a linked pair.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Gate {
    pub coord: Coord,
    pub exit: GateExit,
    pub active: bool,
}

impl Gate {
    /// Carves a gate out of a wall. The exit direction is the wall side's
    /// inward direction, or free for interior walls.
    #[must_use]
    pub fn from_wall(wall: &Wall) -> Self {
        Self {
            coord: wall.coord,
            exit: match wall.side.inward() {
                Some(direction) => GateExit::Fixed(direction),
                None => GateExit::Free,
            },
            active: false,
        }
    }
}

/// The two linked teleport endpoints on a map.
#[derive(Debug, Clone, Copy)]
pub struct GatePair {
    gates: [Gate; 2],
}

impl GatePair {
    #[must_use]
    pub fn new(gates: [Gate; 2]) -> Self {
        Self { gates }
    }

    /// Picks two distinct wall anchors and carves gates out of them.
    ///
    /// Anchor preference is tiered: walls with clear surroundings first,
    /// then progressively relaxed fallbacks, ending with any two distinct
    /// walls so a pair always exists.
    pub fn place<R: Rng + ?Sized>(map: &Map, rng: &mut R) -> Self {
        let candidates = anchor_candidates(map);

        let first = candidates[rng.gen_range(0..candidates.len())];
        let second = loop {
            let index = candidates[rng.gen_range(0..candidates.len())];
            if index != first {
                break index;
            }
        };

        Self {
            gates: [
                Gate::from_wall(&map.walls[first]),
                Gate::from_wall(&map.walls[second]),
            ],
        }
    }

    /// Index of the gate occupying `coord`, if any.
    #[must_use]
    pub fn hit_index(&self, coord: Coord) -> Option<usize> {
        self.gates.iter().position(|gate| gate.coord == coord)
    }

    /// The gate paired with `index`.
    #[must_use]
    pub fn other(&self, index: usize) -> &Gate {
        &self.gates[1 - index]
    }

    pub fn activate_both(&mut self) {
        for gate in &mut self.gates {
            gate.active = true;
        }
    }

    pub fn deactivate_both(&mut self) {
        for gate in &mut self.gates {
            gate.active = false;
        }
    }

    /// True when an *active* gate sits on `coord`. Active gates override wall
    /// collision at their own cell only.
    #[must_use]
    pub fn active_at(&self, coord: Coord) -> bool {
        self.gates
            .iter()
            .any(|gate| gate.active && gate.coord == coord)
    }

    #[must_use]
    pub fn gates(&self) -> &[Gate; 2] {
        &self.gates
    }

    #[must_use]
    pub fn gate_at(&self, coord: Coord) -> Option<&Gate> {
        self.gates.iter().find(|gate| gate.coord == coord)
    }
}

/// Resolves where and in which direction the snake leaves `paired` after
/// entering the opposite gate while moving in `entry`.
///
/// Free gates try entry, clockwise, counter-clockwise, then reverse, taking
/// the first unblocked cell. Fixed gates have a single candidate. When every
/// candidate is blocked the snake lands on the gate cell itself; the active
/// grace window makes that safe.
#[must_use]
pub fn resolve_exit(map: &Map, paired: &Gate, entry: Direction) -> (Coord, Direction) {
    match paired.exit {
        GateExit::Free => {
            let priority = [
                entry,
                entry.clockwise(),
                entry.counter_clockwise(),
                entry.opposite(),
            ];
            for direction in priority {
                let target = paired.coord.step(direction);
                if !map.is_blocked(target) {
                    return (target, direction);
                }
            }
            (paired.coord, entry)
        }
        GateExit::Fixed(direction) => {
            let target = paired.coord.step(direction);
            if map.is_blocked(target) {
                (paired.coord, direction)
            } else {
                (target, direction)
            }
        }
    }
}

/// Wall indices eligible as gate anchors, by the strongest tier that yields
/// at least two of them.
fn anchor_candidates(map: &Map) -> Vec<usize> {
    let strong: Vec<usize> = (0..map.walls.len())
        .filter(|&i| strong_anchor(map, &map.walls[i]))
        .collect();
    if strong.len() >= 2 {
        return strong;
    }

    let relaxed: Vec<usize> = (0..map.walls.len())
        .filter(|&i| relaxed_anchor(map, &map.walls[i]))
        .collect();
    if relaxed.len() >= 2 {
        return relaxed;
    }

    let border: Vec<usize> = (0..map.walls.len())
        .filter(|&i| border_band_anchor(map, &map.walls[i]))
        .collect();
    if border.len() >= 2 {
        return border;
    }

    (0..map.walls.len()).collect()
}

/// Strong tier: away from the border band and at least 3 of 4 orthogonal
/// neighbors open and inside the play area.
fn strong_anchor(map: &Map, wall: &Wall) -> bool {
    let Coord { row, col } = wall.coord;
    if row <= 2 || row >= map.size.height - 1 || col <= 2 || col >= map.size.width - 1 {
        return false;
    }

    let open = orthogonal_neighbors(wall.coord)
        .into_iter()
        .filter(|&adj| {
            !map.has_wall(adj)
                && adj.row > 1
                && adj.row < map.size.height
                && adj.col > 1
                && adj.col < map.size.width
        })
        .count();
    open >= 3
}

/// Relaxed tier: a wider inset band and at least one non-wall neighbor.
fn relaxed_anchor(map: &Map, wall: &Wall) -> bool {
    let Coord { row, col } = wall.coord;
    if row <= 2 || row >= map.size.height - 2 || col <= 2 || col >= map.size.width - 2 {
        return false;
    }

    orthogonal_neighbors(wall.coord)
        .into_iter()
        .any(|adj| !map.has_wall(adj))
}

/// Border tier: border walls with row/col inside an inset band, so gates
/// never hug a corner.
fn border_band_anchor(map: &Map, wall: &Wall) -> bool {
    let Coord { row, col } = wall.coord;
    let (h, w) = (map.size.height, map.size.width);

    ((row == 1 || row == h) && col > 5 && col < w - 4)
        || ((col == 1 || col == w) && row > 5 && row < h - 4)
}

fn orthogonal_neighbors(coord: Coord) -> [Coord; 4] {
    [
        Coord { row: coord.row - 1, col: coord.col },
        Coord { row: coord.row + 1, col: coord.col },
        Coord { row: coord.row, col: coord.col - 1 },
        Coord { row: coord.row, col: coord.col + 1 },
    ]
}
