use crate::domain::policy::{FireCooldownPolicy, PursuitPolicy};
use std::{env, net::IpAddr, str::FromStr, time::Duration};

// Runtime/server constants (not gameplay tuning).

pub fn http_port() -> u16 {
    env::var("ARENA_SERVER_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000)
}

pub fn bind_addr() -> IpAddr {
    env::var("ARENA_BIND_ADDR")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(IpAddr::from([127, 0, 0, 1]))
}

pub fn pursuit_policy() -> PursuitPolicy {
    policy_from_env("ARENA_PURSUIT")
}

pub fn fire_cooldown_policy() -> FireCooldownPolicy {
    policy_from_env("ARENA_FIRE_COOLDOWN")
}

/// Fixed seed for the spawner; unset means a fresh seed per process.
pub fn spawn_seed() -> Option<u64> {
    env::var("ARENA_SPAWN_SEED")
        .ok()
        .and_then(|v| v.parse().ok())
}

fn policy_from_env<P>(key: &str) -> P
where
    P: FromStr + Default,
    P::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(value) => value.parse().unwrap_or_else(|e| {
            tracing::warn!(key, error = %e, "invalid policy; using default");
            P::default()
        }),
        Err(_) => P::default(),
    }
}

pub const INPUT_CHANNEL_CAPACITY: usize = 1024;
pub const WORLD_BROADCAST_CAPACITY: usize = 128;

pub const TICK_INTERVAL: Duration = Duration::from_micros(1_000_000 / 30);
