use crate::config::{MAP_HEIGHT, MAP_WIDTH};
use crate::entity::{Coord, Wall, WallSide};
use crate::snake::Snake;

/// Stage map layout archetype.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MapArchetype {
    Basic,
    Maze,
    Islands,
    Cross,
}

impl MapArchetype {
    /// Display name used on the mission panel.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Basic => "BASIC",
            Self::Maze => "MAZE",
            Self::Islands => "ISLANDS",
            Self::Cross => "CROSS",
        }
    }
}

/// Board dimensions in cells, border included.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct MapSize {
    pub height: i32,
    pub width: i32,
}

impl Default for MapSize {
    fn default() -> Self {
        Self {
            height: MAP_HEIGHT,
            width: MAP_WIDTH,
        }
    }
}

/// Static board geometry for one stage: border, interior walls, corner
/// immune walls. Cells are 1-based; the border sits on row/col 1 and
/// height/width.
#[derive(Debug, Clone)]
pub struct Map {
    pub size: MapSize,
    pub archetype: MapArchetype,
    pub walls: Vec<Wall>,
    pub immune_walls: Vec<Coord>,
}

impl Map {
    /// Builds the complete bordered map for `archetype`.
    ///
    /// `stage` only matters for `Cross`, which alternates between `+` and
    /// `×` layouts by stage parity. Interior walls are filtered against the
    /// snake spawn exclusion zone, then swept once more defensively.
    #[must_use]
    pub fn generate(size: MapSize, archetype: MapArchetype, stage: u32) -> Self {
        let mut map = Self {
            size,
            archetype,
            walls: Vec::new(),
            immune_walls: Vec::new(),
        };
        map.build_border();

        let spawn = map.snake_spawn();
        match archetype {
            MapArchetype::Basic => {}
            MapArchetype::Maze => map.build_maze(&spawn),
            MapArchetype::Islands => map.build_islands(&spawn),
            MapArchetype::Cross => map.build_cross(stage.wrapping_sub(1) % 4, &spawn),
        }

        // Re-validate: no generated wall may remain inside the snake's
        // 3x3-per-cell exclusion zone.
        map.walls.retain(|wall| {
            wall.side != WallSide::Interior || !near_snake(wall.coord, &spawn)
        });

        map
    }

    /// The snake spawned for this map: head at the center, tail below.
    #[must_use]
    pub fn snake_spawn(&self) -> Snake {
        Snake::spawn(Coord {
            row: self.size.height / 2,
            col: self.size.width / 2,
        })
    }

    /// Returns true when `coord` lies strictly inside the border.
    #[must_use]
    pub fn in_interior(&self, coord: Coord) -> bool {
        coord.row > 1
            && coord.row < self.size.height
            && coord.col > 1
            && coord.col < self.size.width
    }

    /// Regular wall lookup.
    #[must_use]
    pub fn wall_at(&self, coord: Coord) -> Option<&Wall> {
        self.walls.iter().find(|wall| wall.coord == coord)
    }

    /// True for corner immune walls.
    #[must_use]
    pub fn immune_wall_at(&self, coord: Coord) -> bool {
        self.immune_walls.contains(&coord)
    }

    /// True for any wall, regular or immune.
    #[must_use]
    pub fn has_wall(&self, coord: Coord) -> bool {
        self.wall_at(coord).is_some() || self.immune_wall_at(coord)
    }

    /// True when a cell cannot be entered: occupied by a wall or outside the
    /// play interior. Used for gate exit resolution.
    #[must_use]
    pub fn is_blocked(&self, coord: Coord) -> bool {
        !self.in_interior(coord) || self.has_wall(coord)
    }

    fn build_border(&mut self) {
        let (h, w) = (self.size.height, self.size.width);
        for row in 1..=h {
            for col in 1..=w {
                let coord = Coord { row, col };
                if row == 1 || row == h {
                    if col == 1 || col == w {
                        self.immune_walls.push(coord);
                    } else {
                        let side = if row == 1 { WallSide::Top } else { WallSide::Bottom };
                        self.walls.push(Wall { coord, side });
                    }
                } else if col == 1 || col == w {
                    let side = if col == 1 { WallSide::Left } else { WallSide::Right };
                    self.walls.push(Wall { coord, side });
                }
            }
        }
    }

    fn place_interior(&mut self, row: i32, col: i32, spawn: &Snake) {
        let coord = Coord { row, col };
        if self.in_interior(coord) && !near_snake(coord, spawn) {
            self.walls.push(Wall {
                coord,
                side: WallSide::Interior,
            });
        }
    }

    /// Four L-shaped arms near the corners plus a short bar through the
    /// center.
    fn build_maze(&mut self, spawn: &Snake) {
        let (h, w) = (self.size.height, self.size.width);

        // Top-left arm.
        for col in 2..=6 {
            self.place_interior(2, col, spawn);
        }
        for row in 2..=5 {
            self.place_interior(row, 6, spawn);
        }

        // Top-right arm.
        for col in (w - 5..=w - 1).rev() {
            self.place_interior(2, col, spawn);
        }
        for row in 2..=5 {
            self.place_interior(row, w - 5, spawn);
        }

        // Bottom-left arm.
        for row in (h - 4..=h - 1).rev() {
            self.place_interior(row, 2, spawn);
        }
        for col in 2..=5 {
            self.place_interior(h - 4, col, spawn);
        }

        // Bottom-right arm.
        for row in (h - 4..=h - 1).rev() {
            self.place_interior(row, w - 1, spawn);
        }
        for col in (w - 4..=w - 1).rev() {
            self.place_interior(h - 4, col, spawn);
        }

        // Center bar, kept short to leave room around the spawn.
        for col in w / 2 - 2..=w / 2 + 2 {
            self.place_interior(h / 2, col, spawn);
        }
    }

    /// A single hollow square ring centered on the map.
    fn build_islands(&mut self, spawn: &Snake) {
        let center_row = self.size.height / 2;
        let center_col = self.size.width / 2;
        let half = self.size.height.min(self.size.width) / 6;

        let (top, bottom) = (center_row - half, center_row + half);
        let (left, right) = (center_col - half, center_col + half);

        for row in top..=bottom {
            for col in left..=right {
                if row == top || row == bottom || col == left || col == right {
                    self.place_interior(row, col, spawn);
                }
            }
        }
    }

    /// `+`-shaped arms for even rotations, `×`-shaped diagonals for odd.
    fn build_cross(&mut self, rotation: u32, spawn: &Snake) {
        let center_row = self.size.height / 2;
        let center_col = self.size.width / 2;
        let arm = self.size.height.min(self.size.width) / 3;

        for i in -arm..=arm {
            if rotation % 2 == 0 {
                self.place_interior(center_row + i, center_col, spawn);
                self.place_interior(center_row, center_col + i, spawn);
            } else {
                self.place_interior(center_row + i, center_col + i, spawn);
                self.place_interior(center_row + i, center_col - i, spawn);
            }
        }
    }
}

/// True when `coord` falls inside the 3x3 exclusion zone of any snake cell.
fn near_snake(coord: Coord, snake: &Snake) -> bool {
    coord.touches(snake.head()) || snake.segments().any(|segment| coord.touches(*segment))
}

#[cfg(test)]
mod tests {
    use crate::entity::{Coord, WallSide};

    use super::{near_snake, Map, MapArchetype, MapSize};

    fn generate(archetype: MapArchetype, stage: u32) -> Map {
        Map::generate(MapSize::default(), archetype, stage)
    }

    #[test]
    fn border_has_immune_corners_and_typed_walls() {
        let map = generate(MapArchetype::Basic, 1);
        let MapSize { height, width } = map.size;

        for coord in [
            Coord { row: 1, col: 1 },
            Coord { row: 1, col: width },
            Coord { row: height, col: 1 },
            Coord { row: height, col: width },
        ] {
            assert!(map.immune_wall_at(coord), "corner {coord:?} must be immune");
        }

        assert_eq!(
            map.wall_at(Coord { row: 1, col: 5 }).unwrap().side,
            WallSide::Top
        );
        assert_eq!(
            map.wall_at(Coord { row: height, col: 5 }).unwrap().side,
            WallSide::Bottom
        );
        assert_eq!(
            map.wall_at(Coord { row: 5, col: 1 }).unwrap().side,
            WallSide::Left
        );
        assert_eq!(
            map.wall_at(Coord { row: 5, col: width }).unwrap().side,
            WallSide::Right
        );
    }

    #[test]
    fn basic_map_has_no_interior_walls() {
        let map = generate(MapArchetype::Basic, 1);
        assert!(map.walls.iter().all(|wall| wall.side != WallSide::Interior));
    }

    #[test]
    fn every_archetype_keeps_the_snake_exclusion_zone_clear() {
        for (archetype, stage) in [
            (MapArchetype::Basic, 1),
            (MapArchetype::Maze, 2),
            (MapArchetype::Islands, 3),
            (MapArchetype::Cross, 4),
            (MapArchetype::Cross, 5),
        ] {
            let map = generate(archetype, stage);
            let spawn = map.snake_spawn();

            for wall in map.walls.iter().filter(|w| w.side == WallSide::Interior) {
                assert!(
                    !near_snake(wall.coord, &spawn),
                    "{archetype:?} stage {stage} wall {:?} inside exclusion zone",
                    wall.coord
                );
            }
        }
    }

    #[test]
    fn interior_walls_stay_inside_the_border() {
        for (archetype, stage) in [
            (MapArchetype::Maze, 2),
            (MapArchetype::Islands, 3),
            (MapArchetype::Cross, 4),
        ] {
            let map = generate(archetype, stage);
            for wall in map.walls.iter().filter(|w| w.side == WallSide::Interior) {
                assert!(map.in_interior(wall.coord));
            }
        }
    }

    #[test]
    fn cross_rotation_alternates_plus_and_diagonal() {
        let plus = generate(MapArchetype::Cross, 1); // rotation 0
        let diagonal = generate(MapArchetype::Cross, 2); // rotation 1

        let center_col = plus.size.width / 2;
        // The plus layout puts walls on the center column away from the snake.
        assert!(plus.walls.iter().any(|w| {
            w.side == WallSide::Interior && w.coord.col == center_col && w.coord.row <= 5
        }));
        // The diagonal layout does not touch the vertical center arm up there.
        assert!(!diagonal.walls.iter().any(|w| {
            w.side == WallSide::Interior && w.coord.col == center_col && w.coord.row <= 5
        }));
    }

    #[test]
    fn maze_has_interior_arms() {
        let map = generate(MapArchetype::Maze, 2);
        let interior = map
            .walls
            .iter()
            .filter(|w| w.side == WallSide::Interior)
            .count();
        assert!(interior > 10, "maze should place corner arms, got {interior}");
    }

    #[test]
    fn islands_ring_is_hollow() {
        let map = generate(MapArchetype::Islands, 3);
        let center = Coord {
            row: map.size.height / 2,
            col: map.size.width / 2,
        };
        assert!(!map.has_wall(center));
    }
}
