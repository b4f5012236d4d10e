pub mod common;
pub mod enemy;
pub mod laser;
pub mod movement;
pub mod params;
pub mod sprite;

// Re-export commonly used items at the module root
pub use common::{DamageOutcome, DeathPhase, HitCooldown};
pub use enemy::Enemy;
pub use laser::EnemyLaser;
pub use params::{ArchetypeParams, EnemyKind, MovementModel, RespawnArea, SpeedTable};
pub use sprite::{EnemySprite, HealthBar, HealthBarSprite};
