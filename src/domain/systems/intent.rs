use crate::domain::geometry::{WorldBounds, direction_to};
use crate::domain::policy::FireCooldownPolicy;
use crate::domain::state::{IdAllocator, Player, PlayerIntent, Projectile, World};
use crate::domain::tuning::player::PlayerTuning;
use crate::domain::tuning::projectile::{BulletTuning, RailgunTuning};
use glam::Vec2;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub struct IntentConfig {
    pub player: PlayerTuning,
    pub bullet: BulletTuning,
    pub railgun: RailgunTuning,
    pub bounds: WorldBounds,
    pub cooldown: FireCooldownPolicy,
    /// Length of one tick, used to convert the railgun charge time into a per-tick rate.
    pub tick_ms: f32,
}

/// Consume at most one pending intent per living player.
///
/// Dead players have their pending intent discarded.
pub fn apply_intents(world: &mut World, now_ms: u64, cfg: IntentConfig) {
    let World {
        players,
        projectiles,
        ids,
        ..
    } = world;

    for player in players.iter_mut() {
        let Some(intent) = player.pending_intent.take() else {
            continue;
        };
        if !player.is_alive() {
            continue;
        }

        move_player(player, &intent, cfg);
        if let Some(shot) = fire_primary(player, &intent, now_ms, ids, cfg) {
            projectiles.push(shot);
        }
        if let Some(beam) = update_railgun(player, &intent, ids, cfg) {
            projectiles.push(beam);
        }
    }
}

fn move_player(player: &mut Player, intent: &PlayerIntent, cfg: IntentConfig) {
    let speed = cfg.player.speed;
    let mut delta = Vec2::ZERO;
    if intent.up {
        delta.y -= speed;
    }
    if intent.down {
        delta.y += speed;
    }
    if intent.left {
        delta.x -= speed;
    }
    if intent.right {
        delta.x += speed;
    }
    if intent.joystick != Vec2::ZERO {
        delta += intent.joystick * speed;
    }

    player.pos = cfg
        .bounds
        .clamp_inset(player.pos + delta, cfg.player.edge_margin);
}

fn cooldown_ready(player: &Player, intent: &PlayerIntent, now_ms: u64, cfg: IntentConfig) -> bool {
    let cooldown = cfg.bullet.cooldown_ms;
    match cfg.cooldown {
        FireCooldownPolicy::ServerTracked => player
            .last_shot_ms
            .is_none_or(|last| now_ms.saturating_sub(last) >= cooldown),
        FireCooldownPolicy::ClientEcho => {
            intent.client_last_shot_ms.saturating_add(cooldown) <= now_ms
        }
    }
}

fn fire_primary(
    player: &mut Player,
    intent: &PlayerIntent,
    now_ms: u64,
    ids: &mut IdAllocator,
    cfg: IntentConfig,
) -> Option<Projectile> {
    if !intent.fire || !cooldown_ready(player, intent, now_ms, cfg) {
        return None;
    }

    // Aiming at our own position has no direction; no shot, cooldown untouched.
    let dir = direction_to(player.pos, intent.aim)?;
    player.last_shot_ms = Some(now_ms);
    Some(Projectile::bullet(
        ids.next(),
        player.id,
        player.pos,
        dir * cfg.bullet.speed,
        cfg.bullet.life_ticks,
    ))
}

fn update_railgun(
    player: &mut Player,
    intent: &PlayerIntent,
    ids: &mut IdAllocator,
    cfg: IntentConfig,
) -> Option<Projectile> {
    if intent.charge {
        let rate = cfg.railgun.charge_per_tick(cfg.tick_ms);
        player.railgun_charge = (player.railgun_charge + rate).min(1.0);
        return None;
    }
    if player.railgun_charge <= 0.0 {
        return None;
    }

    let charge = player.railgun_charge;
    player.railgun_charge = 0.0;

    let dir = direction_to(player.pos, intent.aim)?;
    let damage = cfg.railgun.damage_for_charge(charge);
    let end = player.pos + dir * cfg.railgun.range;
    debug!(player_id = player.id, charge, damage, "railgun released");
    Some(Projectile::beam(
        ids.next(),
        player.id,
        player.pos,
        end,
        damage,
        cfg.railgun.life_ticks,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::state::ProjectileKind;
    use crate::domain::tuning::spawn::SpawnTuning;

    fn cfg() -> IntentConfig {
        IntentConfig {
            player: PlayerTuning::default(),
            bullet: BulletTuning::default(),
            railgun: RailgunTuning::default(),
            bounds: WorldBounds::default(),
            cooldown: FireCooldownPolicy::ServerTracked,
            tick_ms: 1000.0 / 30.0,
        }
    }

    fn world_with_player() -> (World, u64) {
        let mut world = World::new(PlayerTuning::default(), SpawnTuning::default(), 0);
        let id = world.add_player();
        (world, id)
    }

    fn send(world: &mut World, id: u64, intent: PlayerIntent, now_ms: u64, cfg: IntentConfig) {
        world.queue_intent(id, intent);
        apply_intents(world, now_ms, cfg);
    }

    #[test]
    fn keys_and_joystick_accumulate() {
        let (mut world, id) = world_with_player();
        let intent = PlayerIntent {
            right: true,
            up: true,
            joystick: Vec2::new(1.0, 0.5),
            ..Default::default()
        };
        send(&mut world, id, intent, 0, cfg());
        let p = world.player(id).expect("player");
        assert_eq!(p.pos, Vec2::new(410.0, 297.5));
    }

    #[test]
    fn no_pending_intent_means_no_movement() {
        let (mut world, id) = world_with_player();
        send(
            &mut world,
            id,
            PlayerIntent {
                left: true,
                ..Default::default()
            },
            0,
            cfg(),
        );
        apply_intents(&mut world, 33, cfg());
        assert_eq!(world.player(id).expect("player").pos, Vec2::new(395.0, 300.0));
    }

    #[test]
    fn movement_is_clamped_inside_the_margin() {
        let (mut world, id) = world_with_player();
        world.player_mut(id).expect("player").pos = Vec2::new(22.0, 578.0);
        let intent = PlayerIntent {
            left: true,
            down: true,
            ..Default::default()
        };
        send(&mut world, id, intent, 0, cfg());
        assert_eq!(world.player(id).expect("player").pos, Vec2::new(20.0, 580.0));
    }

    #[test]
    fn dead_players_ignore_intent() {
        let (mut world, id) = world_with_player();
        world.player_mut(id).expect("player").health = 0;
        let intent = PlayerIntent {
            right: true,
            fire: true,
            aim: Vec2::new(700.0, 300.0),
            ..Default::default()
        };
        send(&mut world, id, intent, 1_000, cfg());
        let p = world.player(id).expect("player");
        assert_eq!(p.pos, Vec2::new(400.0, 300.0));
        assert!(p.pending_intent.is_none());
        assert!(world.projectiles.is_empty());
    }

    #[test]
    fn bullet_heads_for_the_aim_point_at_fixed_speed() {
        let (mut world, id) = world_with_player();
        let intent = PlayerIntent {
            fire: true,
            aim: Vec2::new(400.0, 0.0),
            ..Default::default()
        };
        send(&mut world, id, intent, 1_000, cfg());
        assert_eq!(world.projectiles.len(), 1);
        match &world.projectiles[0].kind {
            ProjectileKind::Bullet { pos, vel } => {
                assert_eq!(*pos, Vec2::new(400.0, 300.0));
                assert_eq!(*vel, Vec2::new(0.0, -8.0));
            }
            ProjectileKind::Railgun(_) => panic!("expected a bullet"),
        }
        assert_eq!(world.player(id).and_then(|p| p.last_shot_ms), Some(1_000));
    }

    #[test]
    fn server_tracked_cooldown_blocks_rapid_fire() {
        let (mut world, id) = world_with_player();
        let intent = PlayerIntent {
            fire: true,
            aim: Vec2::new(700.0, 300.0),
            // A forged echo must not matter under the server-tracked policy.
            client_last_shot_ms: 0,
            ..Default::default()
        };
        send(&mut world, id, intent.clone(), 1_000, cfg());
        send(&mut world, id, intent.clone(), 1_200, cfg());
        assert_eq!(world.projectiles.len(), 1);
        send(&mut world, id, intent, 1_250, cfg());
        assert_eq!(world.projectiles.len(), 2);
    }

    #[test]
    fn client_echo_cooldown_trusts_the_payload() {
        let (mut world, id) = world_with_player();
        let cfg = IntentConfig {
            cooldown: FireCooldownPolicy::ClientEcho,
            ..cfg()
        };
        let intent = PlayerIntent {
            fire: true,
            aim: Vec2::new(700.0, 300.0),
            client_last_shot_ms: 900,
            ..Default::default()
        };
        send(&mut world, id, intent.clone(), 1_000, cfg);
        assert!(world.projectiles.is_empty());
        send(&mut world, id, intent.clone(), 1_150, cfg);
        send(&mut world, id, intent, 1_160, cfg);
        assert_eq!(world.projectiles.len(), 2);
    }

    #[test]
    fn client_echo_of_published_last_shot_keeps_firing() {
        let (mut world, id) = world_with_player();
        let cfg = IntentConfig {
            cooldown: FireCooldownPolicy::ClientEcho,
            ..cfg()
        };
        let mut now_ms = 10_000;
        for _ in 0..4 {
            // The client echoes whatever the last snapshot published.
            let echoed = world.snapshot(0).players[0].last_shot_ms;
            let intent = PlayerIntent {
                fire: true,
                aim: Vec2::new(700.0, 300.0),
                client_last_shot_ms: echoed,
                ..Default::default()
            };
            send(&mut world, id, intent, now_ms, cfg);
            now_ms += 250;
        }
        assert_eq!(world.projectiles.len(), 4);
        assert_eq!(world.player(id).and_then(|p| p.last_shot_ms), Some(10_750));
    }

    #[test]
    fn client_echo_of_a_wall_clock_time_never_fires() {
        let (mut world, id) = world_with_player();
        let cfg = IntentConfig {
            cooldown: FireCooldownPolicy::ClientEcho,
            ..cfg()
        };
        let intent = PlayerIntent {
            fire: true,
            aim: Vec2::new(700.0, 300.0),
            client_last_shot_ms: 1_760_000_000_000 - 60_000,
            ..Default::default()
        };
        for tick in 0..100u64 {
            send(&mut world, id, intent.clone(), 10_000 + tick * 33, cfg);
        }
        assert!(world.projectiles.is_empty());
    }

    #[test]
    fn zero_length_aim_fires_nothing() {
        let (mut world, id) = world_with_player();
        let intent = PlayerIntent {
            fire: true,
            aim: Vec2::new(400.0, 300.0),
            ..Default::default()
        };
        send(&mut world, id, intent, 1_000, cfg());
        assert!(world.projectiles.is_empty());
        assert_eq!(world.player(id).and_then(|p| p.last_shot_ms), None);
    }

    fn charge_then_release(ticks: usize) -> (World, u64) {
        let (mut world, id) = world_with_player();
        let hold = PlayerIntent {
            charge: true,
            aim: Vec2::new(700.0, 300.0),
            ..Default::default()
        };
        for tick in 0..ticks {
            send(&mut world, id, hold.clone(), tick as u64 * 33, cfg());
        }
        let release = PlayerIntent {
            aim: Vec2::new(700.0, 300.0),
            ..Default::default()
        };
        send(&mut world, id, release, 10_000, cfg());
        (world, id)
    }

    fn only_beam(world: &World) -> &crate::domain::state::Beam {
        assert_eq!(world.projectiles.len(), 1);
        match &world.projectiles[0].kind {
            ProjectileKind::Railgun(beam) => beam,
            ProjectileKind::Bullet { .. } => panic!("expected a beam"),
        }
    }

    #[test]
    fn full_charge_beam_deals_300() {
        let (world, id) = charge_then_release(400);
        let beam = only_beam(&world);
        assert_eq!(beam.damage, 300.0);
        assert_eq!(beam.origin, Vec2::new(400.0, 300.0));
        assert_eq!(beam.end, Vec2::new(1400.0, 300.0));
        assert!(beam.hit_enemies.is_empty());
        assert_eq!(world.player(id).expect("player").railgun_charge, 0.0);
    }

    #[test]
    fn tap_charge_beam_deals_5() {
        let (mut world, id) = world_with_player();
        world.player_mut(id).expect("player").railgun_charge = 0.03;
        let release = PlayerIntent {
            aim: Vec2::new(400.0, 100.0),
            ..Default::default()
        };
        send(&mut world, id, release, 0, cfg());
        assert_eq!(only_beam(&world).damage, 5.0);
    }

    #[test]
    fn charge_saturates_at_one() {
        let (mut world, id) = world_with_player();
        let hold = PlayerIntent {
            charge: true,
            ..Default::default()
        };
        for _ in 0..200 {
            send(&mut world, id, hold.clone(), 0, cfg());
        }
        assert_eq!(world.player(id).expect("player").railgun_charge, 1.0);
        assert!(world.projectiles.is_empty());
    }

    #[test]
    fn release_without_direction_still_drains_charge() {
        let (mut world, id) = world_with_player();
        world.player_mut(id).expect("player").railgun_charge = 0.5;
        let release = PlayerIntent {
            aim: Vec2::new(400.0, 300.0),
            ..Default::default()
        };
        send(&mut world, id, release, 0, cfg());
        assert!(world.projectiles.is_empty());
        assert_eq!(world.player(id).expect("player").railgun_charge, 0.0);
    }
}
