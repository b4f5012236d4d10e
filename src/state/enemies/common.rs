use std::time::Duration;

use crate::clock::Timestamp;

/// Where an enemy is in its death and respawn sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DeathPhase {
    #[default]
    Alive,
    /// First explosion frame on screen.
    ExplosionFrame1 { entered_at: Timestamp },
    ExplosionFrame2,
    /// Waiting for the reward drop.
    AwaitingRespawn { entered_at: Timestamp },
    /// Coin dropped and sprite hidden.
    RewardGranted,
    /// Moved to the new spawn site, hidden until the reappear delay passes.
    Respawning { entered_at: Timestamp },
}

impl DeathPhase {
    pub fn is_alive(&self) -> bool {
        matches!(self, DeathPhase::Alive)
    }

    /// Numeric probe value, kept for callers that track progress as a number.
    pub fn as_f32(&self) -> f32 {
        match self {
            DeathPhase::Alive => 0.0,
            DeathPhase::ExplosionFrame1 { .. } => 1.0,
            DeathPhase::ExplosionFrame2 => 2.0,
            DeathPhase::AwaitingRespawn { .. } => 3.0,
            DeathPhase::RewardGranted => 3.5,
            DeathPhase::Respawning { .. } => 4.5,
        }
    }
}

/// Invulnerability window after a non-lethal hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum HitCooldown {
    #[default]
    Ready,
    Cooling { entered_at: Timestamp },
    /// Window over; becomes `Ready` on the next poll.
    Elapsed,
}

impl HitCooldown {
    pub fn as_f32(&self) -> f32 {
        match self {
            HitCooldown::Ready => 0.0,
            HitCooldown::Cooling { .. } => 1.0,
            HitCooldown::Elapsed => 9.0,
        }
    }

    pub fn is_active(&self, now: Timestamp, duration: Duration) -> bool {
        match self {
            HitCooldown::Cooling { entered_at } => now.since(*entered_at) < duration,
            _ => false,
        }
    }

    /// Advances one step. Returns true if the cooldown was already spent
    /// when polled.
    pub fn poll(&mut self, now: Timestamp, duration: Duration) -> bool {
        match *self {
            HitCooldown::Elapsed => {
                *self = HitCooldown::Ready;
                true
            }
            HitCooldown::Cooling { entered_at } => {
                if now.since(entered_at) >= duration {
                    *self = HitCooldown::Elapsed;
                }
                false
            }
            HitCooldown::Ready => false,
        }
    }
}

/// What a single incoming shot did to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Dying, cooling down, or not on screen.
    Ignored,
    Hit,
    Killed,
}
