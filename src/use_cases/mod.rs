// Use cases layer: application workflows for the game server.

pub mod game;
pub mod types;

pub use game::{SimSettings, TickOutcome, step_world, world_task};
pub use types::{GameEvent, JoinAccepted, WorldUpdate};
