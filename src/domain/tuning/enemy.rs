// Enemy archetypes and their fixed stat table.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Square,
    Triangle,
    Octagon,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub health: f32,
    /// Pursuit step per tick.
    pub speed: f32,
    /// Collision radius.
    pub size: f32,
    /// Score awarded to every player on a kill.
    pub points: u32,
    /// Damage dealt to a player on contact.
    pub contact_damage: i32,
    /// Whether this archetype fires enemy projectiles.
    pub shoots: bool,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Square, EnemyKind::Triangle, EnemyKind::Octagon];

    pub const fn stats(self) -> EnemyStats {
        match self {
            EnemyKind::Square => EnemyStats {
                health: 200.0,
                speed: 4.0,
                size: 30.0,
                points: 5,
                contact_damage: 15,
                shoots: false,
            },
            EnemyKind::Triangle => EnemyStats {
                health: 50.0,
                speed: 6.5,
                size: 15.0,
                points: 10,
                contact_damage: 25,
                shoots: false,
            },
            EnemyKind::Octagon => EnemyStats {
                health: 800.0,
                speed: 1.0,
                size: 50.0,
                points: 50,
                contact_damage: 50,
                shoots: true,
            },
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            EnemyKind::Square => "square",
            EnemyKind::Triangle => "triangle",
            EnemyKind::Octagon => "octagon",
        }
    }
}
