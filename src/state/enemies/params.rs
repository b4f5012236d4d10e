//! Per-archetype numeric tables. Every enemy runs the same state machine;
//! only these numbers differ between species.

use std::fmt;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::sound_handler::Sound;
use crate::state::coin::{CoinTier, HitboxAxis};
use crate::state::common::{Pos, Scale};

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum EnemyKind {
    SmallAlien,
    MediumAlien,
    RedMachine,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [
        EnemyKind::SmallAlien,
        EnemyKind::MediumAlien,
        EnemyKind::RedMachine,
    ];
}

impl fmt::Display for EnemyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnemyKind::SmallAlien => write!(f, "small alien"),
            EnemyKind::MediumAlien => write!(f, "medium alien"),
            EnemyKind::RedMachine => write!(f, "red machine"),
        }
    }
}

/// Movement step per nominal interval, by death count.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpeedTable {
    /// Deaths needed before the enemy moves at all.
    pub first_tier_at: u32,
    /// Deaths per tier.
    pub tier_width: u32,
    pub steps: Vec<f32>,
}

impl SpeedTable {
    pub fn step_for(&self, death_count: u32) -> Option<f32> {
        if death_count < self.first_tier_at || self.steps.is_empty() {
            return None;
        }
        let tier = ((death_count - self.first_tier_at) / self.tier_width.max(1)) as usize;
        self.steps.get(tier.min(self.steps.len() - 1)).copied()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MovementModel {
    /// Walk toward the player along x.
    Chase { interval: Duration, speed: SpeedTable },
    /// Sweep between `-bound` and `bound` along x.
    Patrol {
        interval: Duration,
        speed: SpeedTable,
        bound: f32,
    },
}

impl MovementModel {
    pub fn interval(&self) -> Duration {
        match self {
            MovementModel::Chase { interval, .. } | MovementModel::Patrol { interval, .. } => {
                *interval
            }
        }
    }

    pub fn speed(&self) -> &SpeedTable {
        match self {
            MovementModel::Chase { speed, .. } | MovementModel::Patrol { speed, .. } => speed,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RespawnArea {
    /// Off-screen left or right with equal odds.
    Sides {
        left: (f32, f32),
        right: (f32, f32),
        y: f32,
    },
    /// Anywhere inside a rectangle.
    Band { x: (f32, f32), y: (f32, f32) },
}

impl RespawnArea {
    pub fn pick(&self, scale: Scale, rng: &mut impl Rng) -> Pos {
        let table_pos = match self {
            RespawnArea::Sides { left, right, y } => {
                let (lo, hi) = if rng.random_bool(0.5) { *left } else { *right };
                Pos::new(rng.random_range(lo..=hi), *y)
            }
            RespawnArea::Band { x, y } => Pos::new(
                rng.random_range(x.0..=x.1),
                rng.random_range(y.0..=y.1),
            ),
        };
        scale.apply(table_pos)
    }

    /// Whether `pick` can draw from every range without panicking.
    fn is_sampleable(&self) -> bool {
        let (ranges, fixed) = match self {
            RespawnArea::Sides { left, right, y } => (vec![*left, *right], Some(*y)),
            RespawnArea::Band { x, y } => (vec![*x, *y], None),
        };
        fixed.is_none_or(f32::is_finite)
            && ranges.iter().all(|&(lo, hi)| {
                lo.is_finite() && hi.is_finite() && lo <= hi && (hi - lo).is_finite()
            })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeathTimings {
    /// How long the first explosion frame shows.
    pub explosion_frame: Duration,
    /// Wait after the second frame before the reward drops.
    pub linger: Duration,
    /// Hidden time between respawn and reappearing.
    pub reappear: Duration,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LaserParams {
    pub interval: Duration,
    pub step: f32,
    /// Distance below the enemy where a shot starts.
    pub muzzle_offset: f32,
    /// Shots re-fire once they fall past this y.
    pub floor: f32,
    pub sound: Sound,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FloatParams {
    pub interval: Duration,
    pub step: f32,
    pub amplitude: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeParams {
    pub kind: EnemyKind,
    pub max_health: u32,
    pub reward: CoinTier,
    pub hit_points: u32,
    pub kill_points: u32,
    /// Spawn coordinates by id; id 1 is the first entry.
    pub spawn_points: Vec<Pos>,
    /// Health bar sits this far above the enemy. `None` means no bar.
    pub health_bar_offset: Option<f32>,
    pub respawn: RespawnArea,
    pub death: DeathTimings,
    pub hit_cooldown: Duration,
    pub walk_frame_interval: Duration,
    /// Whether the sprite alternates walking/still frames.
    pub walk_cycle: bool,
    pub movement: MovementModel,
    pub coin_axis: HitboxAxis,
    pub death_sound: Sound,
    pub hit_sound: Option<Sound>,
    pub laser: Option<LaserParams>,
    pub float: Option<FloatParams>,
}

fn alien_speed() -> SpeedTable {
    SpeedTable {
        first_tier_at: 0,
        tier_width: 6,
        steps: vec![0.3, 0.6, 0.9, 1.2, 1.5, 1.8],
    }
}

fn alien_death() -> DeathTimings {
    DeathTimings {
        explosion_frame: Duration::from_millis(100),
        linger: Duration::from_millis(150),
        reappear: Duration::ZERO,
    }
}

fn alien_respawn(y: f32) -> RespawnArea {
    RespawnArea::Sides {
        left: (-900.0, -690.0),
        right: (690.0, 900.0),
        y,
    }
}

fn row(xs: &[f32], y: f32) -> Vec<Pos> {
    xs.iter().map(|&x| Pos::new(x, y)).collect()
}

impl ArchetypeParams {
    pub fn builtin(kind: EnemyKind) -> Self {
        match kind {
            EnemyKind::SmallAlien => Self::small_alien(),
            EnemyKind::MediumAlien => Self::medium_alien(),
            EnemyKind::RedMachine => Self::red_machine(),
        }
    }

    pub fn small_alien() -> Self {
        ArchetypeParams {
            kind: EnemyKind::SmallAlien,
            max_health: 1,
            reward: CoinTier::Copper,
            hit_points: 0,
            kill_points: 1,
            spawn_points: row(&[-800.0, -700.0, 800.0, 700.0, 750.0], -141.0),
            health_bar_offset: None,
            respawn: alien_respawn(-141.0),
            death: alien_death(),
            hit_cooldown: Duration::from_millis(100),
            walk_frame_interval: Duration::from_millis(5),
            walk_cycle: true,
            movement: MovementModel::Chase {
                interval: Duration::from_millis(12),
                speed: alien_speed(),
            },
            coin_axis: HitboxAxis::Vertical,
            death_sound: Sound::AlienDeath,
            hit_sound: None,
            laser: None,
            float: None,
        }
    }

    pub fn medium_alien() -> Self {
        ArchetypeParams {
            kind: EnemyKind::MediumAlien,
            max_health: 2,
            reward: CoinTier::Silver,
            hit_points: 1,
            kill_points: 2,
            spawn_points: row(&[850.0, -850.0, 900.0, -900.0, 725.0], -124.0),
            health_bar_offset: Some(85.0),
            respawn: alien_respawn(-124.0),
            death: alien_death(),
            hit_cooldown: Duration::from_millis(100),
            walk_frame_interval: Duration::from_millis(5),
            walk_cycle: true,
            movement: MovementModel::Chase {
                interval: Duration::from_millis(12),
                speed: alien_speed(),
            },
            coin_axis: HitboxAxis::Vertical,
            death_sound: Sound::AlienDeath,
            hit_sound: Some(Sound::AlienHit),
            laser: None,
            float: None,
        }
    }

    pub fn red_machine() -> Self {
        ArchetypeParams {
            kind: EnemyKind::RedMachine,
            max_health: 2,
            reward: CoinTier::Gold,
            hit_points: 1,
            kill_points: 5,
            spawn_points: row(&[375.0, -375.0, 325.0, -325.0, 275.0], 220.0),
            health_bar_offset: Some(75.0),
            respawn: RespawnArea::Band {
                x: (-640.0, 640.0),
                y: (120.0, 220.0),
            },
            death: DeathTimings {
                explosion_frame: Duration::from_millis(100),
                linger: Duration::from_millis(150),
                reappear: Duration::from_millis(50),
            },
            hit_cooldown: Duration::from_millis(100),
            walk_frame_interval: Duration::from_millis(5),
            walk_cycle: false,
            movement: MovementModel::Patrol {
                interval: Duration::from_millis(20),
                speed: SpeedTable {
                    first_tier_at: 4,
                    tier_width: 3,
                    steps: vec![2.0, 4.0, 6.0, 8.0, 10.0],
                },
                bound: 640.0,
            },
            coin_axis: HitboxAxis::Horizontal,
            death_sound: Sound::Explosion,
            hit_sound: Some(Sound::Explosion2),
            laser: Some(LaserParams {
                interval: Duration::from_millis(15),
                step: 11.0,
                muzzle_offset: 70.0,
                floor: -360.0,
                sound: Sound::LaserGunEnemy,
            }),
            float: Some(FloatParams {
                interval: Duration::from_micros(7_500),
                step: 0.5,
                amplitude: 50.0,
            }),
        }
    }

    /// Scaled spawn coordinate for a 1-based id.
    pub fn spawn_point(&self, id: u32, scale: Scale) -> Result<Pos> {
        let index = (id as usize).checked_sub(1);
        index
            .and_then(|i| self.spawn_points.get(i))
            .map(|&p| scale.apply(p))
            .ok_or(CoreError::InvalidSpawnId {
                kind: self.kind,
                id,
                known: self.spawn_points.len(),
            })
    }

    pub fn validate(&self) -> Result<()> {
        let fail = |reason: &str| Err(CoreError::config(Some(self.kind), reason));

        if self.max_health == 0 {
            return fail("max_health must be at least 1");
        }
        if self.spawn_points.is_empty() {
            return fail("spawn table is empty");
        }
        if self.hit_cooldown.is_zero() || self.walk_frame_interval.is_zero() {
            return fail("hit cooldown and walk frame interval must be positive");
        }
        if self.movement.interval().is_zero() {
            return fail("movement interval must be positive");
        }
        let speed = self.movement.speed();
        if speed.steps.is_empty() || speed.steps.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            return fail("speed table needs positive steps");
        }
        if speed.tier_width == 0 {
            return fail("speed tier width must be at least 1");
        }
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if let MovementModel::Patrol { bound, .. } = self.movement {
            if !positive(bound) {
                return fail("patrol bound must be finite and positive");
            }
        }
        if self
            .spawn_points
            .iter()
            .any(|p| !p.x.is_finite() || !p.y.is_finite())
        {
            return fail("spawn table has a non-finite coordinate");
        }
        if self.health_bar_offset.is_some_and(|offset| !offset.is_finite()) {
            return fail("health bar offset must be finite");
        }
        if !self.respawn.is_sampleable() {
            return fail("respawn ranges need finite ends with lo <= hi");
        }
        if let Some(laser) = &self.laser {
            let finite = laser.muzzle_offset.is_finite() && laser.floor.is_finite();
            if laser.interval.is_zero() || !positive(laser.step) || !finite {
                return fail("laser needs a positive interval and step and finite geometry");
            }
        }
        if let Some(float) = &self.float {
            if float.interval.is_zero() || !positive(float.step) || !positive(float.amplitude) {
                return fail("float effect needs a positive interval, step and amplitude");
            }
        }
        Ok(())
    }
}
