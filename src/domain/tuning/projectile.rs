// Gameplay tuning for projectiles. Speeds are per tick, lifetimes are in ticks.

#[derive(Debug, Clone, Copy)]
pub struct BulletTuning {
    pub speed: f32,
    pub radius: f32,
    pub damage: f32,
    pub life_ticks: u32,
    /// Minimum time between two shots from the same player.
    pub cooldown_ms: u64,
}

impl Default for BulletTuning {
    fn default() -> Self {
        Self {
            speed: 8.0,
            radius: 4.0,
            damage: 50.0,
            life_ticks: 100,
            cooldown_ms: 250,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RailgunTuning {
    /// Time spent holding the trigger to reach full charge.
    pub full_charge_ms: f32,
    /// Beam length from the shooter.
    pub range: f32,
    pub life_ticks: u32,
    /// Charge at or below which the beam deals `min_damage`.
    pub min_charge: f32,
    pub min_damage: f32,
    pub max_damage: f32,
}

impl RailgunTuning {
    /// Charge gained per held tick for a loop running at `tick_ms`.
    pub fn charge_per_tick(&self, tick_ms: f32) -> f32 {
        if self.full_charge_ms <= 0.0 {
            return 1.0;
        }
        tick_ms / self.full_charge_ms
    }

    /// Damage baked into a beam released at `charge`.
    pub fn damage_for_charge(&self, charge: f32) -> f32 {
        if charge <= self.min_charge {
            return self.min_damage;
        }
        let t = (charge - self.min_charge) / (1.0 - self.min_charge);
        self.min_damage + (self.max_damage - self.min_damage) * t
    }
}

impl Default for RailgunTuning {
    fn default() -> Self {
        Self {
            full_charge_ms: 5000.0,
            range: 1000.0,
            life_ticks: 60,
            min_charge: 0.05,
            min_damage: 5.0,
            max_damage: 300.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EnemyShotTuning {
    pub speed: f32,
    pub radius: f32,
    pub damage: i32,
    pub life_ticks: u32,
    /// Time between two shots from the same shooting enemy.
    pub interval_ms: u64,
}

impl Default for EnemyShotTuning {
    fn default() -> Self {
        Self {
            speed: 8.0,
            radius: 6.0,
            damage: 15,
            life_ticks: 100,
            interval_ms: 4000,
        }
    }
}
