pub mod animation_handler;
pub mod coin;
pub mod common;
pub mod enemies;
pub mod game_state;
pub mod pool;

pub use coin::{Coin, CoinPool, CoinTier, HitboxAxis};
pub use common::{Dir, Health, Pos, Scale};
pub use enemies::{DamageOutcome, Enemy, EnemyKind};
pub use game_state::{GameState, TickInput};
pub use pool::{Pool, Poolable};
