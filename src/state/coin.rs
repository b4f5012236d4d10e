use serde::{Deserialize, Serialize};

use super::common::Pos;
use super::pool::{Pool, Poolable};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoinTier {
    Copper,
    Silver,
    Gold,
    Platinum,
}

impl CoinTier {
    pub fn value(&self) -> u32 {
        match self {
            CoinTier::Copper => 1,
            CoinTier::Silver => 2,
            CoinTier::Gold => 5,
            CoinTier::Platinum => 10,
        }
    }

    pub fn texture_name(&self) -> &'static str {
        match self {
            CoinTier::Copper => "Copper_Coin",
            CoinTier::Silver => "Silver_Coin",
            CoinTier::Gold => "Gold_Coin",
            CoinTier::Platinum => "Platinum_Coin",
        }
    }
}

/// Which way the collector approaches the coin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitboxAxis {
    /// Band along y, collision line at the coin's x. The player walks into it.
    Vertical,
    /// Band along x, collision line just below the coin. The player flies up into it.
    Horizontal,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hitbox {
    pub axis: HitboxAxis,
    pub range: (f32, f32),
    pub collision_coordinate: f32,
}

impl Hitbox {
    pub fn around(pos: Pos, axis: HitboxAxis, distance: f32) -> Hitbox {
        match axis {
            HitboxAxis::Vertical => Hitbox {
                axis,
                range: (pos.y - distance, pos.y + distance),
                collision_coordinate: pos.x,
            },
            HitboxAxis::Horizontal => Hitbox {
                axis,
                range: (pos.x - distance, pos.x + distance),
                collision_coordinate: pos.y - distance,
            },
        }
    }

    /// Whether a point moving from `from` to `to` crossed the collision line
    /// while inside the band.
    pub fn crossed_by(&self, from: Pos, to: Pos) -> bool {
        let (line_from, line_to, across) = match self.axis {
            HitboxAxis::Vertical => (from.x, to.x, to.y),
            HitboxAxis::Horizontal => (from.y, to.y, to.x),
        };
        let lo = line_from.min(line_to);
        let hi = line_from.max(line_to);
        let on_line = lo <= self.collision_coordinate && self.collision_coordinate <= hi;
        on_line && self.range.0 <= across && across <= self.range.1
    }
}

#[derive(Clone, Debug)]
pub struct Coin {
    pub tier: CoinTier,
    pub pos: Pos,
    pub visible: bool,
    pub hitbox: Hitbox,
}

impl Coin {
    pub fn new(tier: CoinTier, pos: Pos, axis: HitboxAxis, distance: f32) -> Self {
        Coin {
            tier,
            pos,
            visible: true,
            hitbox: Hitbox::around(pos, axis, distance),
        }
    }

    /// Re-points a recycled coin at a new death site.
    pub fn reinstate(&mut self, tier: CoinTier, pos: Pos, axis: HitboxAxis, distance: f32) {
        self.tier = tier;
        self.pos = pos;
        self.hitbox = Hitbox::around(pos, axis, distance);
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}

impl Poolable for Coin {
    fn is_free(&self) -> bool {
        !self.visible
    }
}

/// Coins shared by every enemy. `on_screen` is the visible subset of `all`.
#[derive(Debug)]
pub struct CoinPool {
    pool: Pool<Coin>,
    distance: f32,
}

impl CoinPool {
    pub fn new(distance: f32) -> Self {
        CoinPool {
            pool: Pool::new(),
            distance,
        }
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn drop_coin(&mut self, tier: CoinTier, pos: Pos, axis: HitboxAxis) -> Option<usize> {
        let distance = self.distance;
        self.pool.acquire(
            || Coin::new(tier, pos, axis, distance),
            |coin| coin.reinstate(tier, pos, axis, distance),
        )
    }

    /// Takes a visible coin off the screen and returns its tier.
    pub fn collect(&mut self, index: usize) -> Option<CoinTier> {
        let tier = self.pool.get(index)?.tier;
        self.pool.release(index, Coin::hide).then_some(tier)
    }

    pub fn clear(&mut self) {
        let live = self.pool.live_indices().to_vec();
        for index in live {
            self.pool.release(index, Coin::hide);
        }
    }

    pub fn get(&self, index: usize) -> Option<&Coin> {
        self.pool.get(index)
    }

    pub fn on_screen(&self) -> impl Iterator<Item = (usize, &Coin)> {
        self.pool.iter_live()
    }

    pub fn on_screen_count(&self) -> usize {
        self.pool.live_count()
    }

    pub fn all(&self) -> &[Coin] {
        self.pool.all()
    }
}
