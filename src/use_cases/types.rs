// Use-case level inputs/outputs for the game loop.

use crate::domain::{PlayerId, PlayerIntent, WorldSnapshot};
use tokio::sync::oneshot;

/// Everything a connection can tell the world task.
#[derive(Debug)]
pub enum GameEvent {
    /// Register a new player; the world replies with its id and a snapshot that includes it.
    Join { reply: oneshot::Sender<JoinAccepted> },
    Leave { player_id: PlayerId },
    Input { player_id: PlayerId, intent: PlayerIntent },
}

#[derive(Debug, Clone)]
pub struct JoinAccepted {
    pub player_id: PlayerId,
    pub snapshot: WorldSnapshot,
}

/// World state published after every tick.
pub type WorldUpdate = WorldSnapshot;
