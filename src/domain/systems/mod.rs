// Per-tick simulation stages, run in this order by the world task.

pub mod spawner;
pub mod intent;
pub mod combat;
