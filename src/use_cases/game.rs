use super::types::{GameEvent, JoinAccepted, WorldUpdate};
use crate::domain::geometry::WorldBounds;
use crate::domain::policy::{FireCooldownPolicy, PursuitPolicy};
use crate::domain::state::EntityId;
use crate::domain::systems::combat::{self, CombatConfig, CombatReport};
use crate::domain::systems::intent::{self, IntentConfig};
use crate::domain::systems::spawner::{self, SpawnConfig};
use crate::domain::tuning::player::PlayerTuning;
use crate::domain::tuning::projectile::{BulletTuning, EnemyShotTuning, RailgunTuning};
use crate::domain::tuning::spawn::SpawnTuning;
use crate::domain::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::{broadcast, mpsc};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

const OVERRUN_LOG_THROTTLE: Duration = Duration::from_secs(2);

/// Everything the simulation needs to know, fixed for the lifetime of the world task.
#[derive(Debug, Clone, Copy)]
pub struct SimSettings {
    pub tick_interval: Duration,
    pub bounds: WorldBounds,
    pub player: PlayerTuning,
    pub bullet: BulletTuning,
    pub railgun: RailgunTuning,
    pub enemy_shot: EnemyShotTuning,
    pub spawn: SpawnTuning,
    pub pursuit: PursuitPolicy,
    pub fire_cooldown: FireCooldownPolicy,
}

impl SimSettings {
    pub fn new_world(&self, now_ms: u64) -> World {
        World::new(self.player, self.spawn, now_ms)
    }

    fn spawn_config(&self) -> SpawnConfig {
        SpawnConfig {
            tuning: self.spawn,
            bounds: self.bounds,
        }
    }

    fn intent_config(&self) -> IntentConfig {
        IntentConfig {
            player: self.player,
            bullet: self.bullet,
            railgun: self.railgun,
            bounds: self.bounds,
            cooldown: self.fire_cooldown,
            tick_ms: self.tick_interval.as_secs_f32() * 1000.0,
        }
    }

    fn combat_config(&self) -> CombatConfig {
        CombatConfig {
            bounds: self.bounds,
            player_radius: self.player.radius,
            bullet: self.bullet,
            enemy_shot: self.enemy_shot,
            pursuit: self.pursuit,
        }
    }
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_micros(1_000_000 / 30),
            bounds: WorldBounds::default(),
            player: PlayerTuning::default(),
            bullet: BulletTuning::default(),
            railgun: RailgunTuning::default(),
            enemy_shot: EnemyShotTuning::default(),
            spawn: SpawnTuning::default(),
            pursuit: PursuitPolicy::default(),
            fire_cooldown: FireCooldownPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nobody connected; nothing advances.
    Idle,
    /// Game-over latch is set; the world is frozen until reset.
    Frozen,
    Advanced {
        spawned: Option<EntityId>,
        combat: CombatReport,
    },
}

/// Run one tick of the pipeline: spawner, intents, combat.
pub fn step_world<R: Rng + ?Sized>(
    world: &mut World,
    now_ms: u64,
    rng: &mut R,
    settings: &SimSettings,
) -> TickOutcome {
    if world.game_over {
        return TickOutcome::Frozen;
    }
    if world.players.is_empty() {
        return TickOutcome::Idle;
    }

    let spawned = spawner::tick_spawner(world, now_ms, rng, settings.spawn_config());
    intent::apply_intents(world, now_ms, settings.intent_config());
    let combat = combat::tick_combat(world, now_ms, settings.combat_config());

    TickOutcome::Advanced { spawned, combat }
}

/// Apply a connection event. Called between ticks, so registry changes never race the pipeline.
pub fn apply_event(world: &mut World, event: GameEvent, now_ms: u64, tick: u64) {
    match event {
        GameEvent::Join { reply } => {
            let first_in_round = world.players.is_empty();
            let player_id = world.add_player();
            if first_in_round {
                // Spawn pacing runs from the round's first join, not from process start.
                world.spawn.last_spawn_ms = now_ms;
            }
            let accepted = JoinAccepted {
                player_id,
                snapshot: world.snapshot(tick),
            };
            if reply.send(accepted).is_err() {
                // The connection went away while waiting; undo the join.
                remove_player(world, player_id, now_ms);
                return;
            }
            info!(player_id, players = world.players.len(), "player joined");
        }
        GameEvent::Leave { player_id } => remove_player(world, player_id, now_ms),
        GameEvent::Input { player_id, intent } => {
            if !world.queue_intent(player_id, intent) {
                debug!(player_id, "input for unknown player ignored");
            }
        }
    }
}

fn remove_player(world: &mut World, player_id: u64, now_ms: u64) {
    if !world.remove_player(player_id) {
        return;
    }
    info!(player_id, players = world.players.len(), "player left");

    if world.players.is_empty() {
        world.reset(now_ms);
        info!("last player left; world reset");
    }
}

/// The single writer of world state. Drains connection events, runs the pipeline and
/// publishes a snapshot on every tick until the event channel closes.
pub async fn world_task(
    mut input_rx: mpsc::Receiver<GameEvent>,
    world_tx: broadcast::Sender<WorldUpdate>,
    settings: SimSettings,
    mut rng: ChaCha8Rng,
) {
    let started = Instant::now();
    let mut world = settings.new_world(0);
    let mut tick: u64 = 0;
    let mut last_overrun_log = started - OVERRUN_LOG_THROTTLE;

    // Overrunning ticks fire late, never in a catch-up burst.
    let mut interval = tokio::time::interval(settings.tick_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(
        tick_ms = settings.tick_interval.as_millis() as u64,
        pursuit = ?settings.pursuit,
        fire_cooldown = ?settings.fire_cooldown,
        "world task started"
    );

    loop {
        interval.tick().await;
        let tick_started = Instant::now();
        let now_ms = started.elapsed().as_millis() as u64;

        loop {
            match input_rx.try_recv() {
                Ok(event) => apply_event(&mut world, event, now_ms, tick),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    info!(tick, "event channel closed; world task exiting");
                    return;
                }
            }
        }

        match step_world(&mut world, now_ms, &mut rng, &settings) {
            TickOutcome::Advanced { combat, .. } if combat.kills > 0 => {
                debug!(
                    tick,
                    kills = combat.kills,
                    enemies_killed = world.enemies_killed,
                    "enemies destroyed"
                );
            }
            _ => {}
        }

        tick += 1;
        // No receivers (nobody connected) is not an error.
        let _ = world_tx.send(world.snapshot(tick));

        let work = tick_started.elapsed();
        if work > settings.tick_interval && last_overrun_log.elapsed() >= OVERRUN_LOG_THROTTLE {
            last_overrun_log = Instant::now();
            warn!(
                tick,
                work_ms = work.as_millis() as u64,
                "tick overran its interval"
            );
        }
    }
}
