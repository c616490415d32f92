use crate::domain::geometry::WorldBounds;
use crate::domain::state::{EntityId, World};
use crate::domain::tuning::enemy::EnemyKind;
use crate::domain::tuning::spawn::SpawnTuning;
use glam::Vec2;
use rand::Rng;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub struct SpawnConfig {
    pub tuning: SpawnTuning,
    pub bounds: WorldBounds,
}

/// Spawn at most one enemy if the current interval has elapsed.
///
/// Each spawn tightens the interval geometrically, floored at the tuning minimum.
pub fn tick_spawner<R: Rng + ?Sized>(
    world: &mut World,
    now_ms: u64,
    rng: &mut R,
    cfg: SpawnConfig,
) -> Option<EntityId> {
    let elapsed = now_ms.saturating_sub(world.spawn.last_spawn_ms) as f64;
    if elapsed <= world.spawn.interval_ms {
        return None;
    }

    let pos = edge_spawn_point(rng, cfg.bounds, cfg.tuning.edge_offset);
    let kind = EnemyKind::ALL[rng.gen_range(0..EnemyKind::ALL.len())];
    let id = world.spawn_enemy(kind, pos, now_ms);

    world.spawn.interval_ms =
        (world.spawn.interval_ms * cfg.tuning.decay).max(cfg.tuning.min_interval_ms);
    world.spawn.last_spawn_ms = now_ms;

    debug!(
        enemy_id = id,
        kind = kind.as_str(),
        x = pos.x,
        y = pos.y,
        next_interval_ms = world.spawn.interval_ms,
        "enemy spawned"
    );
    Some(id)
}

/// Random point just outside one of the four arena edges, chosen uniformly.
fn edge_spawn_point<R: Rng + ?Sized>(rng: &mut R, bounds: WorldBounds, offset: f32) -> Vec2 {
    let along_x = rng.gen_range(0.0..bounds.width);
    let along_y = rng.gen_range(0.0..bounds.height);
    match rng.gen_range(0..4u8) {
        0 => Vec2::new(along_x, -offset),
        1 => Vec2::new(bounds.width + offset, along_y),
        2 => Vec2::new(along_x, bounds.height + offset),
        _ => Vec2::new(-offset, along_y),
    }
}
