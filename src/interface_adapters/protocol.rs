// Wire protocol DTOs and conversions for public game server messages.

use crate::domain::PlayerIntent;
use crate::domain::state::{
    EnemyProjectileSnapshot, EnemySnapshot, PlayerSnapshot, ProjectileSnapshot,
};
use crate::use_cases::{JoinAccepted, WorldUpdate};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Messages the server sends to connected clients over the WebSocket.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum ServerMessage {
    // Sent once to a new connection: who you are and the world as it stands.
    Init(InitDto),
    // Snapshot of the world for a given tick.
    Update(WorldUpdateDto),
}

/// Messages the client sends to the server over the WebSocket.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ClientMessage {
    Input(IntentDto),
}

/// Decode one inbound text frame into an intent.
///
/// Frames carrying a `type` tag must be a valid [`ClientMessage`]; untagged objects are
/// read as a bare intent.
pub fn parse_client_frame(text: &str) -> Result<IntentDto, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    if value.get("type").is_some() {
        let ClientMessage::Input(dto) = serde_json::from_value(value)?;
        Ok(dto)
    } else {
        serde_json::from_value(value)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InitDto {
    pub player_id: String,
    pub game_state: WorldUpdateDto,
}

impl From<JoinAccepted> for InitDto {
    fn from(accepted: JoinAccepted) -> Self {
        Self {
            player_id: accepted.player_id.to_string(),
            game_state: accepted.snapshot.into(),
        }
    }
}

/// Per-tick intent payload. Every field is optional; missing ones mean "no input".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IntentDto {
    pub keys: KeysDto,
    pub joystick: AxisDto,
    pub mouse: MouseDto,
    /// Echo of this player's `last_shot` from the latest snapshot (world clock, ms).
    #[serde(rename = "lastShot")]
    pub last_shot: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct KeysDto {
    pub w: bool,
    pub a: bool,
    pub s: bool,
    pub d: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AxisDto {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MouseDto {
    pub x: f32,
    pub y: f32,
    pub down: bool,
    #[serde(rename = "rightDown")]
    pub right_down: bool,
}

fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() { v } else { 0.0 }
}

impl From<IntentDto> for PlayerIntent {
    fn from(input: IntentDto) -> Self {
        // Out-of-range or garbage numbers degrade to inert values instead of rejecting the input.
        let joystick = Vec2::new(
            finite_or_zero(input.joystick.x).clamp(-1.0, 1.0),
            finite_or_zero(input.joystick.y).clamp(-1.0, 1.0),
        );
        let aim = Vec2::new(finite_or_zero(input.mouse.x), finite_or_zero(input.mouse.y));
        let client_last_shot_ms = if input.last_shot.is_finite() && input.last_shot > 0.0 {
            input.last_shot as u64
        } else {
            0
        };

        Self {
            up: input.keys.w,
            down: input.keys.s,
            left: input.keys.a,
            right: input.keys.d,
            joystick,
            aim,
            fire: input.mouse.down,
            charge: input.mouse.right_down,
            client_last_shot_ms,
        }
    }
}

/// Snapshot of the world sent to clients on each tick.
#[derive(Debug, Clone, Serialize)]
pub struct WorldUpdateDto {
    pub tick: u64,
    pub players: BTreeMap<String, PlayerStateDto>,
    pub enemies: Vec<EnemyStateDto>,
    pub bullets: Vec<BulletStateDto>,
    pub enemy_bullets: Vec<EnemyBulletStateDto>,
    pub enemies_killed: u64,
    pub game_over: bool,
}

impl From<WorldUpdate> for WorldUpdateDto {
    fn from(update: WorldUpdate) -> Self {
        Self {
            tick: update.tick,
            players: update
                .players
                .iter()
                .map(|p| (p.id.to_string(), PlayerStateDto::from(p)))
                .collect(),
            enemies: update.enemies.iter().map(EnemyStateDto::from).collect(),
            bullets: update.projectiles.iter().map(BulletStateDto::from).collect(),
            enemy_bullets: update
                .enemy_projectiles
                .iter()
                .map(EnemyBulletStateDto::from)
                .collect(),
            enemies_killed: update.enemies_killed,
            game_over: update.game_over,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerStateDto {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub health: i32,
    pub score: u32,
    pub railgun_charge: f32,
    pub last_shot: u64,
}

impl From<&PlayerSnapshot> for PlayerStateDto {
    fn from(p: &PlayerSnapshot) -> Self {
        Self {
            id: p.id.to_string(),
            x: p.x,
            y: p.y,
            health: p.health,
            score: p.score,
            railgun_charge: p.railgun_charge,
            last_shot: p.last_shot_ms,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EnemyStateDto {
    pub id: String,
    pub x: f32,
    pub y: f32,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub health: f32,
    pub max_health: f32,
}

impl From<&EnemySnapshot> for EnemyStateDto {
    fn from(e: &EnemySnapshot) -> Self {
        Self {
            id: e.id.to_string(),
            x: e.x,
            y: e.y,
            kind: e.kind.as_str(),
            health: e.health,
            max_health: e.max_health,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BulletStateDto {
    Bullet {
        id: String,
        owner_id: String,
        x: f32,
        y: f32,
        dx: f32,
        dy: f32,
        life: u32,
    },
    Railgun {
        id: String,
        owner_id: String,
        x: f32,
        y: f32,
        end_x: f32,
        end_y: f32,
        damage: f32,
        life: u32,
    },
}

impl From<&ProjectileSnapshot> for BulletStateDto {
    fn from(p: &ProjectileSnapshot) -> Self {
        match *p {
            ProjectileSnapshot::Bullet {
                id,
                owner_id,
                x,
                y,
                dx,
                dy,
                life,
            } => BulletStateDto::Bullet {
                id: id.to_string(),
                owner_id: owner_id.to_string(),
                x,
                y,
                dx,
                dy,
                life,
            },
            ProjectileSnapshot::Railgun {
                id,
                owner_id,
                x,
                y,
                end_x,
                end_y,
                damage,
                life,
            } => BulletStateDto::Railgun {
                id: id.to_string(),
                owner_id: owner_id.to_string(),
                x,
                y,
                end_x,
                end_y,
                damage,
                life,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EnemyBulletStateDto {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
    pub life: u32,
}

impl From<&EnemyProjectileSnapshot> for EnemyBulletStateDto {
    fn from(p: &EnemyProjectileSnapshot) -> Self {
        Self {
            id: p.id.to_string(),
            x: p.x,
            y: p.y,
            dx: p.dx,
            dy: p.dy,
            life: p.life,
        }
    }
}
