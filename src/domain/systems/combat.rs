use crate::domain::geometry::{WorldBounds, circles_overlap, direction_to, segment_hits_circle};
use crate::domain::policy::PursuitPolicy;
use crate::domain::state::{Enemy, EnemyProjectile, IdAllocator, Player, ProjectileKind, World};
use crate::domain::tuning::projectile::{BulletTuning, EnemyShotTuning};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy)]
pub struct CombatConfig {
    pub bounds: WorldBounds,
    pub player_radius: f32,
    pub bullet: BulletTuning,
    pub enemy_shot: EnemyShotTuning,
    pub pursuit: PursuitPolicy,
}

/// What happened during one combat pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CombatReport {
    pub contact_kills: u32,
    pub kills: u32,
    pub enemy_shots_fired: u32,
    pub players_shot: u32,
    pub game_over_latched: bool,
}

/// Advance enemies and projectiles by one tick and resolve every collision.
pub fn tick_combat(world: &mut World, now_ms: u64, cfg: CombatConfig) -> CombatReport {
    let mut report = CombatReport::default();

    advance_enemies(world, now_ms, cfg, &mut report);
    advance_projectiles(world, cfg);
    advance_enemy_projectiles(world, cfg, &mut report);
    resolve_projectile_hits(world, cfg, &mut report);

    if !world.game_over && world.all_players_down() {
        world.game_over = true;
        report.game_over_latched = true;
        info!(
            enemies_killed = world.enemies_killed,
            "all players down; round frozen"
        );
    }

    report
}

/// Pursuit, octagon fire and contact damage. Contact always destroys the enemy.
fn advance_enemies(world: &mut World, now_ms: u64, cfg: CombatConfig, report: &mut CombatReport) {
    let World {
        players,
        enemies,
        enemy_projectiles,
        ids,
        ..
    } = world;

    enemies.retain_mut(|enemy| {
        let stats = enemy.kind.stats();
        let min_dist = pursue(enemy, players, stats.speed, cfg.pursuit);

        if stats.shoots {
            if let Some(shot) = try_enemy_fire(enemy, players, now_ms, ids, cfg.enemy_shot) {
                enemy_projectiles.push(shot);
                report.enemy_shots_fired += 1;
            }
        }

        let contact_radius = stats.size + cfg.player_radius;
        if let Some(player) = players
            .iter_mut()
            .filter(|p| p.is_alive())
            .find(|p| enemy.pos.distance(p.pos) < contact_radius)
        {
            player.take_damage(stats.contact_damage);
            report.contact_kills += 1;
            debug!(
                enemy_id = enemy.id,
                player_id = player.id,
                player_health = player.health,
                "contact kill"
            );
            return false;
        }

        // Sitting exactly on a player without triggering contact cannot be resolved further.
        enemy.is_alive() && min_dist > 0.0
    });
}

/// Move an enemy for this tick. Returns the smallest distance to a living player
/// measured during the move (infinity when nobody is alive).
fn pursue(enemy: &mut Enemy, players: &[Player], speed: f32, policy: PursuitPolicy) -> f32 {
    let mut min_dist = f32::INFINITY;
    match policy {
        PursuitPolicy::SequentialSweep => {
            for player in players.iter().filter(|p| p.is_alive()) {
                let dist = enemy.pos.distance(player.pos);
                min_dist = min_dist.min(dist);
                if let Some(dir) = direction_to(enemy.pos, player.pos) {
                    enemy.pos += dir * speed;
                }
            }
        }
        PursuitPolicy::Nearest => {
            let nearest = players
                .iter()
                .filter(|p| p.is_alive())
                .map(|p| (p.pos, enemy.pos.distance(p.pos)))
                .min_by(|a, b| a.1.total_cmp(&b.1));
            if let Some((target, dist)) = nearest {
                min_dist = dist;
                if let Some(dir) = direction_to(enemy.pos, target) {
                    enemy.pos += dir * speed;
                }
            }
        }
    }
    min_dist
}

fn try_enemy_fire(
    enemy: &mut Enemy,
    players: &[Player],
    now_ms: u64,
    ids: &mut IdAllocator,
    tuning: EnemyShotTuning,
) -> Option<EnemyProjectile> {
    if now_ms.saturating_sub(enemy.last_shot_ms) < tuning.interval_ms {
        return None;
    }

    let target = players.iter().find(|p| p.is_alive())?;
    let dir = direction_to(enemy.pos, target.pos)?;
    enemy.last_shot_ms = now_ms;
    Some(EnemyProjectile {
        id: ids.next(),
        pos: enemy.pos,
        vel: dir * tuning.speed,
        life: tuning.life_ticks,
    })
}

fn advance_projectiles(world: &mut World, cfg: CombatConfig) {
    world.projectiles.retain_mut(|p| {
        p.life = p.life.saturating_sub(1);
        match &mut p.kind {
            ProjectileKind::Bullet { pos, vel } => {
                *pos += *vel;
                p.life > 0 && cfg.bounds.contains(*pos)
            }
            ProjectileKind::Railgun(_) => p.life > 0,
        }
    });
}

fn advance_enemy_projectiles(world: &mut World, cfg: CombatConfig, report: &mut CombatReport) {
    let World {
        players,
        enemy_projectiles,
        ..
    } = world;
    let hit_radius = cfg.enemy_shot.radius + cfg.player_radius;

    enemy_projectiles.retain_mut(|shot| {
        shot.pos += shot.vel;
        shot.life = shot.life.saturating_sub(1);

        if let Some(player) = players
            .iter_mut()
            .filter(|p| p.is_alive())
            .find(|p| shot.pos.distance(p.pos) < hit_radius)
        {
            player.take_damage(cfg.enemy_shot.damage);
            report.players_shot += 1;
            return false;
        }

        shot.life > 0 && cfg.bounds.contains(shot.pos)
    });
}

/// Bullets and beams against enemies, enemy-outer and projectile-inner in insertion order.
///
/// Dead enemies and spent bullets are tombstoned during the pass and compacted at the end,
/// so a killed enemy receives no further checks this tick.
fn resolve_projectile_hits(world: &mut World, cfg: CombatConfig, report: &mut CombatReport) {
    let World {
        players,
        enemies,
        projectiles,
        enemies_killed,
        ..
    } = world;

    for enemy in enemies.iter_mut() {
        let size = enemy.kind.stats().size;

        for projectile in projectiles.iter_mut() {
            if !enemy.is_alive() {
                break;
            }
            if projectile.spent {
                continue;
            }

            match &mut projectile.kind {
                ProjectileKind::Bullet { pos, .. } => {
                    if circles_overlap(*pos, cfg.bullet.radius, enemy.pos, size) {
                        enemy.take_damage(cfg.bullet.damage);
                        projectile.spent = true;
                    }
                }
                ProjectileKind::Railgun(beam) => {
                    if !beam.hit_enemies.contains(&enemy.id)
                        && segment_hits_circle(beam.origin, beam.end, enemy.pos, size)
                    {
                        enemy.take_damage(beam.damage);
                        beam.hit_enemies.insert(enemy.id);
                    }
                }
            }
        }

        if !enemy.is_alive() {
            let points = enemy.kind.stats().points;
            *enemies_killed += 1;
            report.kills += 1;
            // Kill credit is shared by everyone connected, not just the shooter.
            for player in players.iter_mut() {
                player.score = player.score.saturating_add(points);
            }
            debug!(
                enemy_id = enemy.id,
                kind = enemy.kind.as_str(),
                points,
                "enemy destroyed"
            );
        }
    }

    enemies.retain(|e| e.is_alive());
    projectiles.retain(|p| !p.spent);
}
