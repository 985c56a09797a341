//! Stage-based terminal snake: four map archetypes, mission objectives,
//! pickup items, and a pair of linked teleport gates.
//!
//! The simulation lives in [`engine::Session`]; everything under `ui/` and
//! `renderer` is presentation glue around it.

pub mod config;
pub mod engine;
pub mod entity;
pub mod gate;
pub mod input;
pub mod item;
pub mod map;
pub mod mission;
pub mod renderer;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
