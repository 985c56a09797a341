use rand::Rng;

use crate::config::ITEM_RESPAWN_INTERVAL_TICKS;
use crate::entity::Coord;
use crate::gate::GatePair;
use crate::map::Map;
use crate::snake::Snake;

/// The three pickup kinds. Exactly one live instance of each exists.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ItemKind {
    Growth,
    Poison,
    Time,
}

/// A pickup currently on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Item {
    pub kind: ItemKind,
    pub coord: Coord,
    age_ticks: u16,
}

impl Item {
    #[must_use]
    pub fn new(kind: ItemKind, coord: Coord) -> Self {
        Self {
            kind,
            coord,
            age_ticks: 0,
        }
    }

    /// Ages the item by one tick. Returns `true` once the respawn interval
    /// is reached; the caller relocates the item and resets the age.
    pub fn tick_age(&mut self) -> bool {
        self.age_ticks += 1;
        self.age_ticks >= ITEM_RESPAWN_INTERVAL_TICKS
    }

    /// Moves the item to a fresh cell and restarts its clock.
    pub fn relocate(&mut self, coord: Coord) {
        self.coord = coord;
        self.age_ticks = 0;
    }
}

/// The live growth/poison/time item triple.
#[derive(Debug, Clone, Copy)]
pub struct ItemSet {
    pub growth: Item,
    pub poison: Item,
    pub time: Item,
}

impl ItemSet {
    /// Spawns all three items on free cells, avoiding each other.
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        map: &Map,
        snake: &Snake,
        gates: &GatePair,
    ) -> Self {
        let growth = Item::new(ItemKind::Growth, spawn_coord(rng, map, snake, gates, &[]));
        let poison = Item::new(
            ItemKind::Poison,
            spawn_coord(rng, map, snake, gates, &[growth.coord]),
        );
        let time = Item::new(
            ItemKind::Time,
            spawn_coord(rng, map, snake, gates, &[growth.coord, poison.coord]),
        );

        Self {
            growth,
            poison,
            time,
        }
    }

    /// Iterates over the three items.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        [&self.growth, &self.poison, &self.time].into_iter()
    }
}

/// Draws a random free interior cell for an item.
///
/// Rejection sampling: the cell must not hold a wall, a snake cell, a gate,
/// or another item, and must not be walled in on all four orthogonal sides
/// (the item has to stay reachable).
pub fn spawn_coord<R: Rng + ?Sized>(
    rng: &mut R,
    map: &Map,
    snake: &Snake,
    gates: &GatePair,
    avoid: &[Coord],
) -> Coord {
    loop {
        let candidate = Coord {
            row: rng.gen_range(2..map.size.height),
            col: rng.gen_range(2..map.size.width),
        };

        if map.has_wall(candidate)
            || snake.occupies(candidate)
            || gates.hit_index(candidate).is_some()
            || avoid.contains(&candidate)
        {
            continue;
        }

        let walled_in = [
            Coord { row: candidate.row - 1, col: candidate.col },
            Coord { row: candidate.row + 1, col: candidate.col },
            Coord { row: candidate.row, col: candidate.col - 1 },
            Coord { row: candidate.row, col: candidate.col + 1 },
        ]
        .into_iter()
        .all(|adj| map.wall_at(adj).is_some());
        if walled_in {
            continue;
        }

        return candidate;
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::config::ITEM_RESPAWN_INTERVAL_TICKS;
    use crate::entity::Coord;
    use crate::gate::GatePair;
    use crate::map::{Map, MapArchetype, MapSize};

    use super::{spawn_coord, Item, ItemKind, ItemSet};

    #[test]
    fn item_age_signals_respawn_at_the_interval() {
        let mut item = Item::new(ItemKind::Growth, Coord { row: 5, col: 5 });

        for _ in 0..ITEM_RESPAWN_INTERVAL_TICKS - 1 {
            assert!(!item.tick_age());
        }
        assert!(item.tick_age());

        item.relocate(Coord { row: 6, col: 6 });
        assert!(!item.tick_age());
    }

    #[test]
    fn spawned_cells_avoid_walls_snake_gates_and_each_other() {
        let map = Map::generate(MapSize::default(), MapArchetype::Islands, 3);
        let snake = map.snake_spawn();
        let mut rng = StdRng::seed_from_u64(99);
        let gates = GatePair::place(&map, &mut rng);

        for _ in 0..50 {
            let items = ItemSet::spawn(&mut rng, &map, &snake, &gates);
            let coords = [items.growth.coord, items.poison.coord, items.time.coord];

            for coord in coords {
                assert!(!map.has_wall(coord));
                assert!(!snake.occupies(coord));
                assert!(gates.hit_index(coord).is_none());
            }
            assert_ne!(coords[0], coords[1]);
            assert_ne!(coords[0], coords[2]);
            assert_ne!(coords[1], coords[2]);
        }
    }

    #[test]
    fn spawn_coord_respects_the_avoid_list() {
        let map = Map::generate(MapSize::default(), MapArchetype::Basic, 1);
        let snake = map.snake_spawn();
        let mut rng = StdRng::seed_from_u64(7);
        let gates = GatePair::place(&map, &mut rng);

        let taken = Coord { row: 5, col: 5 };
        for _ in 0..100 {
            let coord = spawn_coord(&mut rng, &map, &snake, &gates, &[taken]);
            assert_ne!(coord, taken);
        }
    }
}
