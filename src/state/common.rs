use serde::{Deserialize, Serialize};

#[derive(PartialEq, Eq, Clone, Copy, Debug, Serialize, Deserialize)]
pub enum Dir {
    Left,
    Right,
}

impl Dir {
    pub fn sign(&self) -> f32 {
        match self {
            Dir::Left => -1.0,
            Dir::Right => 1.0,
        }
    }

    /// Facing needed to look at `target_x` from `x`. Ties face right.
    pub fn towards(x: f32, target_x: f32) -> Dir {
        if x > target_x { Dir::Left } else { Dir::Right }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Health {
    pub fn full(max: u32) -> Health {
        Health { current: max, max }
    }

    pub fn is_full(&self) -> bool {
        self.current == self.max
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pos {
    pub x: f32,
    pub y: f32,
}

impl Pos {
    pub fn new(x: f32, y: f32) -> Pos {
        Pos { x, y }
    }

    pub fn offset(&self, dx: f32, dy: f32) -> Pos {
        Pos {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Screen scale factors. Table coordinates are authored for a 1280x720
/// window and multiplied by these.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    pub x: f32,
    pub y: f32,
}

impl Default for Scale {
    fn default() -> Self {
        Scale { x: 1.0, y: 1.0 }
    }
}

impl Scale {
    pub fn apply(&self, pos: Pos) -> Pos {
        Pos {
            x: pos.x * self.x,
            y: pos.y * self.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn towards_resolves_ties_to_right() {
        assert_eq!(Dir::towards(10.0, 10.0), Dir::Right);
        assert_eq!(Dir::towards(10.0, 9.0), Dir::Left);
        assert_eq!(Dir::towards(-3.0, 4.0), Dir::Right);
    }

    #[test]
    fn scale_multiplies_both_axes() {
        let scale = Scale { x: 1.5, y: 2.0 };
        assert_eq!(scale.apply(Pos::new(100.0, -10.0)), Pos::new(150.0, -20.0));
    }

    #[test]
    fn health_is_full_only_at_max() {
        let health = Health { current: 1, max: 2 };
        assert!(!health.is_full());
        assert!(Health::full(2).is_full());
    }
}
