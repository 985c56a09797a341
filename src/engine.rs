use std::fmt;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{MIN_SNAKE_SEGMENTS, SPEED_BOOST_DURATION_TICKS, SPEED_BOOST_MULTIPLIER};
use crate::entity::{BlockKind, Coord};
use crate::gate::{resolve_exit, GatePair};
use crate::input::GameInput;
use crate::item::{spawn_coord, ItemSet};
use crate::map::{Map, MapSize};
use crate::mission::{
    archetype_for_stage, base_tick_interval_for_stage, evaluate_missions, targets_for_stage,
    MissionFlags,
};
use crate::snake::{Heading, Snake};

/// Why a run ended. The display strings are shown to the player verbatim.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    ReverseDirection,
    WallCollision,
    ImmuneWallCollision,
    BodyOnWall,
    BodyOnImmuneWall,
    SelfCollision,
    TooShort,
}

impl fmt::Display for DeathReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::ReverseDirection => "Tried moving in the opposite direction.",
            Self::WallCollision => "Collided with the wall.",
            Self::ImmuneWallCollision => "Collided with the immune wall.",
            Self::BodyOnWall => "Snake body overlapped with wall.",
            Self::BodyOnImmuneWall => "Snake body overlapped with immune wall.",
            Self::SelfCollision => "Collided with the body.",
            Self::TooShort => "Length is less than 3.",
        };
        f.write_str(text)
    }
}

/// Terminal state machine of one stage run.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SessionStatus {
    Alive,
    Dead(DeathReason),
}

/// Outcome events of one tick, in the order they happened. Consumed by the
/// presentation layer for the audible cue and overlays.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickEvent {
    GateUsed,
    GrowthCollected,
    PoisonCollected,
    TimeCollected,
    MissionsCompleted,
    Died(DeathReason),
}

/// One stage session: the complete mutable simulation state, exclusively
/// owned and advanced one tick at a time.
#[derive(Debug, Clone)]
pub struct Session {
    pub map: Map,
    pub snake: Snake,
    pub gates: GatePair,
    pub items: ItemSet,
    pub stage: u32,
    pub status: SessionStatus,
    pub missions: MissionFlags,
    pub growth_count: u32,
    pub poison_count: u32,
    pub gates_used: u32,
    /// Highest body length reached this run; doubles as the score.
    pub max_length: usize,
    pub elapsed_ticks: u64,
    /// Remaining ticks of the gate grace window.
    pub gate_grace_ticks: u32,
    pub speed_multiplier: f32,
    pub speed_boost_ticks: u32,
    rng: StdRng,
    events: Vec<TickEvent>,
}

impl Session {
    /// Builds a fresh session for `stage`: new map geometry, spawned snake,
    /// a placed gate pair, and all three items.
    #[must_use]
    pub fn new(stage: u32, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let map = Map::generate(MapSize::default(), archetype_for_stage(stage), stage);
        let snake = map.snake_spawn();
        let gates = GatePair::place(&map, &mut rng);
        let items = ItemSet::spawn(&mut rng, &map, &snake, &gates);

        Self {
            map,
            snake,
            gates,
            items,
            stage,
            status: SessionStatus::Alive,
            missions: MissionFlags::default(),
            growth_count: 0,
            poison_count: 0,
            gates_used: 0,
            max_length: MIN_SNAKE_SEGMENTS,
            elapsed_ticks: 0,
            gate_grace_ticks: 0,
            speed_multiplier: 1.0,
            speed_boost_ticks: 0,
            rng,
            events: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.status == SessionStatus::Alive
    }

    #[must_use]
    pub fn death_reason(&self) -> Option<DeathReason> {
        match self.status {
            SessionStatus::Alive => None,
            SessionStatus::Dead(reason) => Some(reason),
        }
    }

    /// Outcome events of the most recent tick.
    #[must_use]
    pub fn events(&self) -> &[TickEvent] {
        &self.events
    }

    /// Logical tick duration: the stage base interval divided by the current
    /// speed multiplier.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        base_tick_interval_for_stage(self.stage).div_f32(self.speed_multiplier)
    }

    /// Elapsed play time in whole seconds, derived from the tick count.
    #[must_use]
    pub fn elapsed_seconds(&self) -> u64 {
        let base_ms = base_tick_interval_for_stage(self.stage).as_millis() as u64;
        self.elapsed_ticks * base_ms / 1000
    }

    /// Applies one external input event.
    pub fn apply_input(&mut self, input: GameInput) {
        match input {
            GameInput::Direction(direction) => {
                if self.is_alive() {
                    self.snake.steer(direction);
                }
            }
            GameInput::ForceCompleteMissions => self.force_complete_missions(),
            _ => {}
        }
    }

    /// Debug shortcut: satisfies every objective of the current stage.
    pub fn force_complete_missions(&mut self) {
        let targets = targets_for_stage(self.stage);
        self.growth_count = targets.growth_items;
        self.poison_count = targets.poison_items;
        self.gates_used = targets.gate_uses;
        self.snake.force_length(targets.snake_length);
        self.refresh_missions();
    }

    /// Advances the simulation by one tick.
    ///
    /// Returns `true` when the tick was accepted and the snake is still
    /// alive. On `false` the session is dead and `death_reason()` explains
    /// why.
    pub fn tick(&mut self) -> bool {
        self.events.clear();
        if !self.is_alive() {
            return false;
        }

        // 1. A buffered 180° attempt ends the run before any movement.
        if self.snake.heading() == Heading::ReverseAttempted {
            self.die(DeathReason::ReverseDirection);
            return false;
        }

        // 2. Gate grace decay.
        if self.gate_grace_ticks == 0 {
            self.gates.deactivate_both();
        } else {
            self.gate_grace_ticks -= 1;
        }

        // 3. + 4. Body follows, head moves.
        self.snake.shift_body();
        self.snake.advance_head();

        // 5. Gate traversal; at most one per tick.
        if let Heading::Moving(entry) = self.snake.heading() {
            if let Some(index) = self.gates.hit_index(self.snake.head()) {
                self.gates.activate_both();
                self.gate_grace_ticks = self.snake.len() as u32;

                let paired = *self.gates.other(index);
                let (exit_coord, exit_direction) = resolve_exit(&self.map, &paired, entry);
                self.snake.teleport(exit_coord, exit_direction);

                self.gates_used += 1;
                self.events.push(TickEvent::GateUsed);
            }
        }

        // 6. Timers run only while the snake is actually moving.
        if matches!(self.snake.heading(), Heading::Moving(_)) {
            self.elapsed_ticks += 1;

            if self.items.growth.tick_age() {
                self.respawn_growth();
            }
            if self.items.poison.tick_age() {
                self.respawn_poison();
            }
            if self.items.time.tick_age() {
                self.respawn_time();
            }

            if self.speed_boost_ticks > 0 {
                self.speed_boost_ticks -= 1;
                if self.speed_boost_ticks == 0 {
                    self.speed_multiplier = 1.0;
                }
            }
        }

        // 7. Pickups, each checked independently.
        let head = self.snake.head();
        if head == self.items.growth.coord {
            self.events.push(TickEvent::GrowthCollected);
            self.growth_count += 1;
            self.respawn_growth();
            self.snake.grow();
        }
        if head == self.items.poison.coord {
            self.events.push(TickEvent::PoisonCollected);
            self.poison_count += 1;
            self.respawn_poison();
            if !self.snake.shrink() {
                self.die(DeathReason::TooShort);
                return false;
            }
        }
        if head == self.items.time.coord {
            self.events.push(TickEvent::TimeCollected);
            self.respawn_time();
            self.speed_multiplier = SPEED_BOOST_MULTIPLIER;
            self.speed_boost_ticks = SPEED_BOOST_DURATION_TICKS;
        }

        // 8. Mission progress and score tracking.
        self.refresh_missions();
        if self.snake.len() > self.max_length {
            self.max_length = self.snake.len();
        }

        // 9. Validity pass.
        if let Some(reason) = self.violation() {
            self.die(reason);
            return false;
        }
        true
    }

    /// Render snapshot: what occupies `coord`, head drawn over body over
    /// gates over items over walls.
    #[must_use]
    pub fn block_at(&self, coord: Coord) -> Option<BlockKind> {
        if self.snake.head() == coord {
            return Some(BlockKind::SnakeHead);
        }
        if self.snake.segments().any(|segment| *segment == coord) {
            return Some(BlockKind::SnakeBody);
        }
        if let Some(gate) = self.gates.gate_at(coord) {
            return Some(BlockKind::Gate {
                active: gate.active,
            });
        }
        if self.items.growth.coord == coord {
            return Some(BlockKind::GrowthItem);
        }
        if self.items.poison.coord == coord {
            return Some(BlockKind::PoisonItem);
        }
        if self.items.time.coord == coord {
            return Some(BlockKind::TimeItem);
        }
        if self.map.wall_at(coord).is_some() {
            return Some(BlockKind::Wall);
        }
        if self.map.immune_wall_at(coord) {
            return Some(BlockKind::ImmuneWall);
        }
        None
    }

    fn refresh_missions(&mut self) {
        let was_complete = self.missions.all_complete();
        self.missions = evaluate_missions(
            targets_for_stage(self.stage),
            self.snake.len(),
            self.growth_count,
            self.poison_count,
            self.gates_used,
        );
        if self.missions.all_complete() && !was_complete {
            self.events.push(TickEvent::MissionsCompleted);
        }
    }

    /// First violated rule wins; the order fixes the reported reason.
    fn violation(&self) -> Option<DeathReason> {
        let head = self.snake.head();

        // Active gates override wall collision at their own cell only.
        if !self.gates.active_at(head) {
            if self.map.wall_at(head).is_some() {
                return Some(DeathReason::WallCollision);
            }
            if self.map.immune_wall_at(head) {
                return Some(DeathReason::ImmuneWallCollision);
            }
        }

        // Defensive: generation invariants should make these unreachable.
        for segment in self.snake.segments() {
            if self.map.wall_at(*segment).is_some() {
                return Some(DeathReason::BodyOnWall);
            }
            if self.map.immune_wall_at(*segment) {
                return Some(DeathReason::BodyOnImmuneWall);
            }
        }

        if self.snake.head_overlaps_body() {
            return Some(DeathReason::SelfCollision);
        }

        if self.snake.len() < MIN_SNAKE_SEGMENTS {
            return Some(DeathReason::TooShort);
        }

        None
    }

    fn die(&mut self, reason: DeathReason) {
        self.status = SessionStatus::Dead(reason);
        self.events.push(TickEvent::Died(reason));
    }

    fn respawn_growth(&mut self) {
        let coord = spawn_coord(
            &mut self.rng,
            &self.map,
            &self.snake,
            &self.gates,
            &[self.items.poison.coord, self.items.time.coord],
        );
        self.items.growth.relocate(coord);
    }

    fn respawn_poison(&mut self) {
        let coord = spawn_coord(
            &mut self.rng,
            &self.map,
            &self.snake,
            &self.gates,
            &[self.items.growth.coord, self.items.time.coord],
        );
        self.items.poison.relocate(coord);
    }

    fn respawn_time(&mut self) {
        let coord = spawn_coord(
            &mut self.rng,
            &self.map,
            &self.snake,
            &self.gates,
            &[self.items.growth.coord, self.items.poison.coord],
        );
        self.items.time.relocate(coord);
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{
        ITEM_RESPAWN_INTERVAL_TICKS, SPEED_BOOST_DURATION_TICKS, SPEED_BOOST_MULTIPLIER,
    };
    use crate::entity::Coord;
    use crate::input::{Direction, GameInput};
    use crate::mission::targets_for_stage;
    use crate::snake::{Heading, Snake};

    use super::{DeathReason, Session, SessionStatus, TickEvent};

    fn coord(row: i32, col: i32) -> Coord {
        Coord { row, col }
    }

    /// Session on the wall-free stage 1 map with the snake moving right
    /// through open space. Items are parked on row 18, away from the
    /// rows 5..=15 rectangle the driving tests stay inside.
    fn moving_session() -> Session {
        let mut session = Session::new(1, 42);
        session.snake = Snake::from_parts(
            coord(5, 10),
            Heading::Moving(Direction::Right),
            vec![coord(5, 9), coord(5, 8), coord(5, 7)],
        );
        session.items.growth.relocate(coord(18, 30));
        session.items.poison.relocate(coord(18, 32));
        session.items.time.relocate(coord(18, 34));
        session
    }

    /// Steers and ticks along `legs`, stopping after `max_ticks` ticks.
    fn drive(session: &mut Session, legs: &[(Direction, u32)], max_ticks: u32) {
        let mut ticks = 0;
        loop {
            for &(direction, count) in legs {
                session.apply_input(GameInput::Direction(direction));
                for _ in 0..count {
                    assert!(session.tick(), "died after {ticks} ticks: {:?}", session.status);
                    ticks += 1;
                    if ticks >= max_ticks {
                        return;
                    }
                }
            }
        }
    }

    #[test]
    fn growth_pickup_increments_counter_and_length_together() {
        let mut session = moving_session();
        session.items.growth.relocate(coord(5, 11));

        assert!(session.tick());

        assert_eq!(session.growth_count, 1);
        assert_eq!(session.snake.len(), 4);
        assert_eq!(session.max_length, 4);
        assert_ne!(session.items.growth.coord, coord(5, 11));
        assert!(session.events().contains(&TickEvent::GrowthCollected));
    }

    #[test]
    fn poison_pickup_shrinks_a_longer_snake() {
        let mut session = moving_session();
        session.snake = Snake::from_parts(
            coord(5, 10),
            Heading::Moving(Direction::Right),
            vec![coord(5, 9), coord(5, 8), coord(5, 7), coord(5, 6)],
        );
        session.items.poison.relocate(coord(5, 11));

        assert!(session.tick());

        assert_eq!(session.poison_count, 1);
        assert_eq!(session.snake.len(), 3);
        assert!(session.is_alive());
    }

    #[test]
    fn time_pickup_boosts_speed_for_forty_ticks() {
        let mut session = moving_session();
        session.items.time.relocate(coord(5, 11));

        assert!(session.tick());
        assert_eq!(session.speed_multiplier, SPEED_BOOST_MULTIPLIER);
        assert_eq!(session.speed_boost_ticks, SPEED_BOOST_DURATION_TICKS);

        // Park the respawned item again so it cannot be re-collected.
        session.items.time.relocate(coord(18, 36));

        // Drive a rectangle so the boost can run out in open space.
        let boosted = session.tick_interval();
        let legs = [
            (Direction::Down, 10),
            (Direction::Right, 24),
            (Direction::Up, 10),
            (Direction::Left, 20),
        ];
        drive(&mut session, &legs, SPEED_BOOST_DURATION_TICKS);

        assert_eq!(session.speed_multiplier, 1.0);
        assert_eq!(session.speed_boost_ticks, 0);
        assert!(session.tick_interval() > boosted);
    }

    #[test]
    fn items_auto_respawn_after_fifty_moving_ticks() {
        let mut session = moving_session();
        // Long enough to survive a stray poison respawn on the path.
        session.snake = Snake::from_parts(
            coord(5, 10),
            Heading::Moving(Direction::Right),
            vec![coord(5, 9), coord(5, 8), coord(5, 7), coord(5, 6), coord(5, 5)],
        );
        let before = session.items.growth.coord;

        let legs = [
            (Direction::Right, 25),
            (Direction::Down, 10),
            (Direction::Left, 25),
            (Direction::Up, 10),
        ];
        drive(&mut session, &legs, u32::from(ITEM_RESPAWN_INTERVAL_TICKS) + 1);

        // The parked growth item was never driven over, so only the 50-tick
        // timer can have moved it.
        assert_ne!(session.items.growth.coord, before);
        assert_eq!(
            session.elapsed_ticks,
            u64::from(ITEM_RESPAWN_INTERVAL_TICKS) + 1
        );
    }

    #[test]
    fn force_complete_missions_satisfies_every_flag() {
        let mut session = Session::new(1, 7);

        session.apply_input(GameInput::ForceCompleteMissions);

        let targets = targets_for_stage(1);
        assert_eq!(session.growth_count, targets.growth_items);
        assert_eq!(session.snake.len(), targets.snake_length);
        assert!(session.missions.all_complete());
    }

    #[test]
    fn dead_session_refuses_further_ticks() {
        let mut session = moving_session();
        session.snake.set_heading(Heading::ReverseAttempted);

        assert!(!session.tick());
        assert_eq!(
            session.status,
            SessionStatus::Dead(DeathReason::ReverseDirection)
        );

        assert!(!session.tick());
        assert!(session.events().is_empty());
    }

    #[test]
    fn gate_grace_window_decays_to_inactive() {
        let mut session = moving_session();
        session.gates.activate_both();
        session.gate_grace_ticks = 2;

        assert!(session.tick()); // grace 2 -> 1
        assert!(session.gates.gates()[0].active);
        assert!(session.tick()); // grace 1 -> 0
        assert!(session.tick()); // grace 0: both deactivated
        assert!(!session.gates.gates()[0].active);
        assert!(!session.gates.gates()[1].active);
    }

    #[test]
    fn idle_snake_ticks_without_timers_or_movement() {
        let mut session = Session::new(1, 13);
        let head = session.snake.head();

        assert!(session.tick());

        assert_eq!(session.snake.head(), head);
        assert_eq!(session.elapsed_ticks, 0);
    }
}
