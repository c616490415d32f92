// Domain layer: core simulation types and rules.

pub mod geometry;
pub mod policy;
pub mod state;
pub mod systems;
pub mod tuning;

pub use state::{PlayerId, PlayerIntent, World, WorldSnapshot};
