//! Enemy simulation core for a 2D arcade shooter: timed death and respawn,
//! catch-up movement, hit cooldowns and the shared coin pool. Rendering,
//! input and audio playback live outside this crate.

pub mod clock;
pub mod config;
pub mod error;
pub mod sound_handler;
pub mod state;

pub use clock::{Clock, ManualClock, MonotonicClock, Timestamp};
pub use config::CoreConfig;
pub use error::{CoreError, Result};
pub use sound_handler::{Sound, SoundHandler, SoundSettings};
pub use state::{DamageOutcome, Enemy, EnemyKind, GameState, TickInput};
