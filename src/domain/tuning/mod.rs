// Fixed gameplay tuning tables. Runtime/server settings live in `frameworks::config`.

pub mod enemy;
pub mod player;
pub mod projectile;
pub mod spawn;
