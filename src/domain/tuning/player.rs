use glam::Vec2;

/// Gameplay tuning for player avatars.
///
/// Keep this separate from runtime/server configuration (tick rates, buffer sizes, etc.).
#[derive(Debug, Clone, Copy)]
pub struct PlayerTuning {
    /// Movement per tick per axis, in world units.
    pub speed: f32,

    /// Collision radius in world units (contact and enemy-shot checks).
    pub radius: f32,

    /// Distance kept from every arena edge when clamping movement.
    pub edge_margin: f32,

    /// Health a player joins with.
    pub max_health: i32,

    /// Where a freshly connected player appears.
    pub spawn_point: Vec2,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            speed: 5.0,
            radius: 20.0,
            edge_margin: 20.0,
            max_health: 100,
            spawn_point: Vec2::new(400.0, 300.0),
        }
    }
}
