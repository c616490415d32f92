// Enemy spawn pacing.

#[derive(Debug, Clone, Copy)]
pub struct SpawnTuning {
    /// Interval at the start of a round.
    pub initial_interval_ms: f64,
    /// Multiplier applied to the interval after every spawn.
    pub decay: f64,
    /// The interval never drops below this.
    pub min_interval_ms: f64,
    /// How far outside the arena edge enemies appear.
    pub edge_offset: f32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            initial_interval_ms: 2000.0,
            decay: 0.99,
            min_interval_ms: 500.0,
            edge_offset: 30.0,
        }
    }
}
