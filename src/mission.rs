use std::time::Duration;

use crate::config::STAGE_COUNT;
use crate::map::MapArchetype;

/// Per-stage mission objectives.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct MissionTargets {
    pub snake_length: usize,
    pub growth_items: u32,
    pub poison_items: u32,
    pub gate_uses: u32,
}

/// Objective table for the four stages. Out-of-range stages fall back to the
/// stage 1 targets.
#[must_use]
pub fn targets_for_stage(stage: u32) -> MissionTargets {
    match stage {
        2 => MissionTargets {
            snake_length: 7,
            growth_items: 5,
            poison_items: 2,
            gate_uses: 2,
        },
        3 => MissionTargets {
            snake_length: 9,
            growth_items: 7,
            poison_items: 3,
            gate_uses: 3,
        },
        4 => MissionTargets {
            snake_length: 12,
            growth_items: 8,
            poison_items: 4,
            gate_uses: 2,
        },
        _ => MissionTargets {
            snake_length: 5,
            growth_items: 3,
            poison_items: 1,
            gate_uses: 1,
        },
    }
}

/// Which map layout each stage uses.
#[must_use]
pub fn archetype_for_stage(stage: u32) -> MapArchetype {
    match stage {
        2 => MapArchetype::Maze,
        3 => MapArchetype::Islands,
        4 => MapArchetype::Cross,
        _ => MapArchetype::Basic,
    }
}

/// Base tick interval per stage; later stages run faster.
#[must_use]
pub fn base_tick_interval_for_stage(stage: u32) -> Duration {
    let millis = match stage {
        1 => 250,
        2 => 200,
        3 => 170,
        4 => 150,
        _ => 200,
    };
    Duration::from_millis(millis)
}

/// Completion flags for one stage's objectives.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub struct MissionFlags {
    pub length_met: bool,
    pub growth_met: bool,
    pub poison_met: bool,
    pub gates_met: bool,
}

impl MissionFlags {
    /// True when every objective is satisfied.
    #[must_use]
    pub fn all_complete(self) -> bool {
        self.length_met && self.growth_met && self.poison_met && self.gates_met
    }
}

/// Recomputes mission flags from current progress. Pure, so evaluating twice
/// without a state change yields identical flags.
#[must_use]
pub fn evaluate_missions(
    targets: MissionTargets,
    snake_length: usize,
    growth_count: u32,
    poison_count: u32,
    gates_used: u32,
) -> MissionFlags {
    MissionFlags {
        length_met: snake_length >= targets.snake_length,
        growth_met: growth_count >= targets.growth_items,
        poison_met: poison_count >= targets.poison_items,
        gates_met: gates_used >= targets.gate_uses,
    }
}

/// Tracks the current stage and the wrap back to stage 1 after the ending.
#[derive(Debug, Clone, Copy)]
pub struct StageController {
    stage: u32,
}

impl StageController {
    #[must_use]
    pub fn new(stage: u32) -> Self {
        Self {
            stage: stage.clamp(1, STAGE_COUNT),
        }
    }

    #[must_use]
    pub fn stage(self) -> u32 {
        self.stage
    }

    /// Moves to the next stage. Returns `true` when the last stage was just
    /// cleared: the ending sequence is due and play wraps back to stage 1.
    pub fn advance(&mut self) -> bool {
        self.stage += 1;
        if self.stage > STAGE_COUNT {
            self.stage = 1;
            return true;
        }
        false
    }

    pub fn jump_to(&mut self, stage: u32) {
        self.stage = stage.clamp(1, STAGE_COUNT);
    }
}

#[cfg(test)]
mod tests {
    use crate::map::MapArchetype;

    use super::{
        archetype_for_stage, base_tick_interval_for_stage, evaluate_missions, targets_for_stage,
        MissionTargets, StageController,
    };

    #[test]
    fn mission_table_matches_the_stage_design() {
        assert_eq!(
            targets_for_stage(1),
            MissionTargets {
                snake_length: 5,
                growth_items: 3,
                poison_items: 1,
                gate_uses: 1
            }
        );
        assert_eq!(
            targets_for_stage(4),
            MissionTargets {
                snake_length: 12,
                growth_items: 8,
                poison_items: 4,
                gate_uses: 2
            }
        );
        // Unknown stages fall back to stage 1.
        assert_eq!(targets_for_stage(9), targets_for_stage(1));
    }

    #[test]
    fn stage_archetypes_progress_from_basic_to_cross() {
        assert_eq!(archetype_for_stage(1), MapArchetype::Basic);
        assert_eq!(archetype_for_stage(2), MapArchetype::Maze);
        assert_eq!(archetype_for_stage(3), MapArchetype::Islands);
        assert_eq!(archetype_for_stage(4), MapArchetype::Cross);
    }

    #[test]
    fn later_stages_tick_faster() {
        let intervals: Vec<_> = (1..=4).map(base_tick_interval_for_stage).collect();
        assert!(intervals.windows(2).all(|pair| pair[0] > pair[1]));
    }

    #[test]
    fn stage_one_targets_all_met_sets_the_aggregate_flag() {
        let flags = evaluate_missions(targets_for_stage(1), 5, 3, 1, 1);
        assert!(flags.length_met && flags.growth_met && flags.poison_met && flags.gates_met);
        assert!(flags.all_complete());
    }

    #[test]
    fn evaluation_is_idempotent() {
        let targets = targets_for_stage(2);
        let first = evaluate_missions(targets, 6, 5, 1, 2);
        let second = evaluate_missions(targets, 6, 5, 1, 2);

        assert_eq!(first, second);
        assert!(!first.all_complete());
        assert!(first.growth_met && first.gates_met);
        assert!(!first.length_met && !first.poison_met);
    }

    #[test]
    fn advancing_past_the_last_stage_wraps_and_reports_the_ending() {
        let mut controller = StageController::new(4);

        assert!(controller.advance());
        assert_eq!(controller.stage(), 1);

        assert!(!controller.advance());
        assert_eq!(controller.stage(), 2);
    }
}
