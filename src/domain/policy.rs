// Gameplay policies that change observable behavior and are chosen at startup.

use std::str::FromStr;
use thiserror::Error;

/// How an enemy picks the direction it steps in each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PursuitPolicy {
    /// Step towards every living player in roster order, one full step each.
    /// The net heading ends up biased towards the last player in the roster.
    #[default]
    SequentialSweep,
    /// Single step towards the nearest living player.
    Nearest,
}

/// Where the primary-fire cooldown is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FireCooldownPolicy {
    /// Cooldown is checked against the server's record of the player's last shot.
    #[default]
    ServerTracked,
    /// Cooldown is checked against the `lastShot` value echoed by the client.
    /// The value must be the `last_shot` the server published in its snapshot,
    /// which is on the world clock (ms since the world task started). A client
    /// wall-clock timestamp lies far in the world clock's future and blocks firing.
    /// A client can bypass the cooldown by forging it.
    ClientEcho,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {kind} policy `{value}`")]
pub struct PolicyParseError {
    kind: &'static str,
    value: String,
}

impl FromStr for PursuitPolicy {
    type Err = PolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sweep" | "sequential" => Ok(PursuitPolicy::SequentialSweep),
            "nearest" => Ok(PursuitPolicy::Nearest),
            _ => Err(PolicyParseError {
                kind: "pursuit",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for FireCooldownPolicy {
    type Err = PolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "server" => Ok(FireCooldownPolicy::ServerTracked),
            "client" => Ok(FireCooldownPolicy::ClientEcho),
            _ => Err(PolicyParseError {
                kind: "fire cooldown",
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_env_spellings() {
        assert_eq!("Nearest".parse(), Ok(PursuitPolicy::Nearest));
        assert_eq!(" sweep ".parse(), Ok(PursuitPolicy::SequentialSweep));
        assert_eq!("client".parse(), Ok(FireCooldownPolicy::ClientEcho));
        assert!("fastest".parse::<PursuitPolicy>().is_err());
    }

    #[test]
    fn parse_error_names_the_policy() {
        let err = "nope".parse::<FireCooldownPolicy>().unwrap_err();
        assert_eq!(err.to_string(), "unknown fire cooldown policy `nope`");
    }
}
