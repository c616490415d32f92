// Domain-level simulation entities, the world registry and snapshot types.

use crate::domain::tuning::enemy::EnemyKind;
use crate::domain::tuning::player::PlayerTuning;
use crate::domain::tuning::spawn::SpawnTuning;
use glam::Vec2;
use std::collections::HashSet;

pub type PlayerId = u64;
pub type EntityId = u64;

/// A player's latest expressed input. Every field defaults to "do nothing".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Analog stick, each axis in [-1, 1].
    pub joystick: Vec2,
    /// Aim point in world coordinates.
    pub aim: Vec2,
    /// Primary fire held.
    pub fire: bool,
    /// Railgun trigger held.
    pub charge: bool,
    /// Last-shot time echoed by the client, on the world clock (only read under
    /// `FireCooldownPolicy::ClientEcho`).
    pub client_last_shot_ms: u64,
}

pub struct Player {
    pub id: PlayerId,
    pub pos: Vec2,
    pub health: i32,
    pub score: u32,
    /// 0.0..=1.0
    pub railgun_charge: f32,
    /// Server-side record of the last primary shot.
    pub last_shot_ms: Option<u64>,
    /// Latest intent received since the previous tick (last one wins).
    pub pending_intent: Option<PlayerIntent>,
}

impl Player {
    fn new(id: PlayerId, tuning: &PlayerTuning) -> Self {
        Self {
            id,
            pos: tuning.spawn_point,
            health: tuning.max_health,
            score: 0,
            railgun_charge: 0.0,
            last_shot_ms: None,
            pending_intent: None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Subtract damage, never going below zero.
    pub fn take_damage(&mut self, amount: i32) {
        self.health = (self.health - amount).max(0);
    }
}

pub struct Enemy {
    pub id: EntityId,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub health: f32,
    pub max_health: f32,
    /// Only meaningful for archetypes that shoot.
    pub last_shot_ms: u64,
}

impl Enemy {
    pub fn new(id: EntityId, kind: EnemyKind, pos: Vec2, now_ms: u64) -> Self {
        let health = kind.stats().health;
        Self {
            id,
            kind,
            pos,
            health,
            max_health: health,
            last_shot_ms: now_ms,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.health = (self.health - amount).max(0.0);
    }
}

/// A railgun shot: a fixed segment that damages each enemy at most once.
pub struct Beam {
    pub origin: Vec2,
    pub end: Vec2,
    pub damage: f32,
    pub hit_enemies: HashSet<EntityId>,
}

pub enum ProjectileKind {
    Bullet { pos: Vec2, vel: Vec2 },
    Railgun(Beam),
}

/// Player-fired projectile.
pub struct Projectile {
    pub id: EntityId,
    pub owner_id: PlayerId,
    /// Remaining ticks.
    pub life: u32,
    /// Tombstone set when a bullet is consumed by a hit; compacted after the hit pass.
    pub spent: bool,
    pub kind: ProjectileKind,
}

impl Projectile {
    pub fn bullet(id: EntityId, owner_id: PlayerId, pos: Vec2, vel: Vec2, life: u32) -> Self {
        Self {
            id,
            owner_id,
            life,
            spent: false,
            kind: ProjectileKind::Bullet { pos, vel },
        }
    }

    pub fn beam(
        id: EntityId,
        owner_id: PlayerId,
        origin: Vec2,
        end: Vec2,
        damage: f32,
        life: u32,
    ) -> Self {
        Self {
            id,
            owner_id,
            life,
            spent: false,
            kind: ProjectileKind::Railgun(Beam {
                origin,
                end,
                damage,
                hit_enemies: HashSet::new(),
            }),
        }
    }
}

pub struct EnemyProjectile {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: u32,
}

/// Spawn pacing state for the current round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnClock {
    pub last_spawn_ms: u64,
    pub interval_ms: f64,
}

/// Monotonic id source for enemies and projectiles (players get theirs from the same pool).
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn next(&mut self) -> u64 {
        self.next = self.next.wrapping_add(1);
        self.next
    }
}

/// The authoritative world: every collection the simulation owns.
///
/// Stage functions take `&mut World`; nothing else holds world state.
pub struct World {
    /// Roster in join order; "first-listed" means index 0.
    pub players: Vec<Player>,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub enemy_projectiles: Vec<EnemyProjectile>,
    pub spawn: SpawnClock,
    /// Enemies destroyed by damage this round (contact kills are not counted).
    pub enemies_killed: u64,
    /// One-way latch, cleared only by `reset`.
    pub game_over: bool,
    pub ids: IdAllocator,
    player_tuning: PlayerTuning,
    spawn_tuning: SpawnTuning,
}

impl World {
    pub fn new(player_tuning: PlayerTuning, spawn_tuning: SpawnTuning, now_ms: u64) -> Self {
        Self {
            players: Vec::new(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            enemy_projectiles: Vec::new(),
            spawn: SpawnClock {
                last_spawn_ms: now_ms,
                interval_ms: spawn_tuning.initial_interval_ms,
            },
            enemies_killed: 0,
            game_over: false,
            ids: IdAllocator::default(),
            player_tuning,
            spawn_tuning,
        }
    }

    /// Register a new player with fresh state and return its id.
    pub fn add_player(&mut self) -> PlayerId {
        let id = self.ids.next();
        self.players.push(Player::new(id, &self.player_tuning));
        id
    }

    /// Remove a player. Returns false for unknown ids.
    pub fn remove_player(&mut self, id: PlayerId) -> bool {
        let before = self.players.len();
        self.players.retain(|p| p.id != id);
        self.players.len() != before
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// Buffer an intent for the next tick, replacing any older one. Unknown ids are ignored.
    pub fn queue_intent(&mut self, id: PlayerId, intent: PlayerIntent) -> bool {
        match self.player_mut(id) {
            Some(player) => {
                player.pending_intent = Some(intent);
                true
            }
            None => false,
        }
    }

    pub fn spawn_enemy(&mut self, kind: EnemyKind, pos: Vec2, now_ms: u64) -> EntityId {
        let id = self.ids.next();
        self.enemies.push(Enemy::new(id, kind, pos, now_ms));
        id
    }

    pub fn remove_enemy(&mut self, id: EntityId) -> bool {
        let before = self.enemies.len();
        self.enemies.retain(|e| e.id != id);
        self.enemies.len() != before
    }

    pub fn remove_projectile(&mut self, id: EntityId) -> bool {
        let before = self.projectiles.len();
        self.projectiles.retain(|p| p.id != id);
        self.projectiles.len() != before
    }

    /// True when at least one player is connected and none is alive.
    pub fn all_players_down(&self) -> bool {
        !self.players.is_empty() && self.players.iter().all(|p| !p.is_alive())
    }

    /// Clear every collection and restart spawn pacing and kill counters.
    ///
    /// The id allocator keeps counting so ids stay unique across rounds.
    pub fn reset(&mut self, now_ms: u64) {
        self.players.clear();
        self.enemies.clear();
        self.projectiles.clear();
        self.enemy_projectiles.clear();
        self.spawn = SpawnClock {
            last_spawn_ms: now_ms,
            interval_ms: self.spawn_tuning.initial_interval_ms,
        };
        self.enemies_killed = 0;
        self.game_over = false;
    }

    /// Immutable copy of the world for publication.
    pub fn snapshot(&self, tick: u64) -> WorldSnapshot {
        WorldSnapshot {
            tick,
            players: self.players.iter().map(PlayerSnapshot::from).collect(),
            enemies: self.enemies.iter().map(EnemySnapshot::from).collect(),
            projectiles: self.projectiles.iter().map(ProjectileSnapshot::from).collect(),
            enemy_projectiles: self
                .enemy_projectiles
                .iter()
                .map(EnemyProjectileSnapshot::from)
                .collect(),
            enemies_killed: self.enemies_killed,
            game_over: self.game_over,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub x: f32,
    pub y: f32,
    pub health: i32,
    pub score: u32,
    pub railgun_charge: f32,
    pub last_shot_ms: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnemySnapshot {
    pub id: EntityId,
    pub kind: EnemyKind,
    pub x: f32,
    pub y: f32,
    pub health: f32,
    pub max_health: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProjectileSnapshot {
    Bullet {
        id: EntityId,
        owner_id: PlayerId,
        x: f32,
        y: f32,
        dx: f32,
        dy: f32,
        life: u32,
    },
    Railgun {
        id: EntityId,
        owner_id: PlayerId,
        x: f32,
        y: f32,
        end_x: f32,
        end_y: f32,
        damage: f32,
        life: u32,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnemyProjectileSnapshot {
    pub id: EntityId,
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
    pub life: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub players: Vec<PlayerSnapshot>,
    pub enemies: Vec<EnemySnapshot>,
    pub projectiles: Vec<ProjectileSnapshot>,
    pub enemy_projectiles: Vec<EnemyProjectileSnapshot>,
    pub enemies_killed: u64,
    pub game_over: bool,
}

impl From<&Player> for PlayerSnapshot {
    fn from(p: &Player) -> Self {
        Self {
            id: p.id,
            x: p.pos.x,
            y: p.pos.y,
            health: p.health,
            score: p.score,
            railgun_charge: p.railgun_charge,
            last_shot_ms: p.last_shot_ms.unwrap_or(0),
        }
    }
}

impl From<&Enemy> for EnemySnapshot {
    fn from(e: &Enemy) -> Self {
        Self {
            id: e.id,
            kind: e.kind,
            x: e.pos.x,
            y: e.pos.y,
            health: e.health,
            max_health: e.max_health,
        }
    }
}

impl From<&Projectile> for ProjectileSnapshot {
    fn from(p: &Projectile) -> Self {
        match &p.kind {
            ProjectileKind::Bullet { pos, vel } => ProjectileSnapshot::Bullet {
                id: p.id,
                owner_id: p.owner_id,
                x: pos.x,
                y: pos.y,
                dx: vel.x,
                dy: vel.y,
                life: p.life,
            },
            ProjectileKind::Railgun(beam) => ProjectileSnapshot::Railgun {
                id: p.id,
                owner_id: p.owner_id,
                x: beam.origin.x,
                y: beam.origin.y,
                end_x: beam.end.x,
                end_y: beam.end.y,
                damage: beam.damage,
                life: p.life,
            },
        }
    }
}

impl From<&EnemyProjectile> for EnemyProjectileSnapshot {
    fn from(p: &EnemyProjectile) -> Self {
        Self {
            id: p.id,
            x: p.pos.x,
            y: p.pos.y,
            dx: p.vel.x,
            dy: p.vel.y,
            life: p.life,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> World {
        World::new(PlayerTuning::default(), SpawnTuning::default(), 0)
    }

    #[test]
    fn new_player_starts_at_center_with_full_health() {
        let mut world = world();
        let id = world.add_player();
        let p = world.player(id).expect("player registered");
        assert_eq!(p.pos, Vec2::new(400.0, 300.0));
        assert_eq!(p.health, 100);
        assert_eq!(p.score, 0);
        assert_eq!(p.railgun_charge, 0.0);
    }

    #[test]
    fn stale_ids_are_noops() {
        let mut world = world();
        assert!(!world.remove_player(42));
        assert!(!world.remove_enemy(42));
        assert!(!world.remove_projectile(42));
        assert!(!world.queue_intent(42, PlayerIntent::default()));
    }

    #[test]
    fn latest_intent_wins() {
        let mut world = world();
        let id = world.add_player();
        world.queue_intent(
            id,
            PlayerIntent {
                up: true,
                ..Default::default()
            },
        );
        world.queue_intent(
            id,
            PlayerIntent {
                down: true,
                ..Default::default()
            },
        );
        let pending = world.player(id).and_then(|p| p.pending_intent.clone());
        assert_eq!(
            pending,
            Some(PlayerIntent {
                down: true,
                ..Default::default()
            })
        );
    }

    #[test]
    fn damage_clamps_at_zero() {
        let mut world = world();
        let id = world.add_player();
        let player = world.player_mut(id).expect("player");
        player.take_damage(250);
        assert_eq!(player.health, 0);
        assert!(!player.is_alive());

        let mut enemy = Enemy::new(1, EnemyKind::Triangle, Vec2::ZERO, 0);
        enemy.take_damage(300.0);
        assert_eq!(enemy.health, 0.0);
    }

    #[test]
    fn empty_roster_is_not_all_down() {
        let mut world = world();
        assert!(!world.all_players_down());
        let id = world.add_player();
        assert!(!world.all_players_down());
        world.player_mut(id).expect("player").health = 0;
        assert!(world.all_players_down());
    }

    #[test]
    fn reset_clears_collections_and_pacing() {
        let mut world = world();
        let owner = world.add_player();
        world.spawn_enemy(EnemyKind::Square, Vec2::new(10.0, 10.0), 0);
        let id = world.ids.next();
        world.projectiles.push(Projectile::bullet(
            id,
            owner,
            Vec2::ZERO,
            Vec2::X,
            10,
        ));
        world.spawn.interval_ms = 700.0;
        world.enemies_killed = 9;
        world.game_over = true;

        world.reset(5_000);

        let snap = world.snapshot(0);
        assert!(snap.players.is_empty());
        assert!(snap.enemies.is_empty());
        assert!(snap.projectiles.is_empty());
        assert!(snap.enemy_projectiles.is_empty());
        assert_eq!(snap.enemies_killed, 0);
        assert!(!snap.game_over);
        assert_eq!(
            world.spawn,
            SpawnClock {
                last_spawn_ms: 5_000,
                interval_ms: 2000.0
            }
        );
    }
}
