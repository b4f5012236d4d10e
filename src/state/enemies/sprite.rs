use crate::state::common::{Dir, Pos};
use crate::state::enemies::params::EnemyKind;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EnemySprite {
    Still(Dir),
    Walking(Dir),
    /// Machines have a single body frame.
    Idle,
    ExplosionFrame1,
    ExplosionFrame2,
}

impl EnemySprite {
    /// Resting frame for a freshly (re)spawned enemy.
    pub fn resting(kind: EnemyKind) -> Self {
        match kind {
            EnemyKind::RedMachine => EnemySprite::Idle,
            _ => EnemySprite::Still(Dir::Right),
        }
    }

    pub fn texture_name(&self, kind: EnemyKind) -> &'static str {
        use Dir::{Left, Right};
        use EnemySprite::*;

        match (kind, *self) {
            (EnemyKind::RedMachine, ExplosionFrame1) => "Explosion1",
            (EnemyKind::RedMachine, ExplosionFrame2) => "Explosion2",
            (EnemyKind::RedMachine, _) => "Enemy(11-15)",
            (_, ExplosionFrame1) => "Alien_Death_1",
            (_, ExplosionFrame2) => "Alien_Death_2",

            (EnemyKind::SmallAlien, Still(Left)) => "Alien_Still_Left(1-5)",
            (EnemyKind::SmallAlien, Still(Right) | Idle) => "Alien_Still_Right(1-5)",
            (EnemyKind::SmallAlien, Walking(Left)) => "Alien_Walking_Left(1-5)",
            (EnemyKind::SmallAlien, Walking(Right)) => "Alien_Walking_Right(1-5)",

            (EnemyKind::MediumAlien, Still(Left)) => "Alien_Still_Left(6-10)",
            (EnemyKind::MediumAlien, Still(Right) | Idle) => "Alien_Still_Right(6-10)",
            (EnemyKind::MediumAlien, Walking(Left)) => "Alien_Walking_Left(6-10)",
            (EnemyKind::MediumAlien, Walking(Right)) => "Alien_Walking_Right(6-10)",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HealthBarSprite {
    Full,
    Half,
}

impl HealthBarSprite {
    pub fn texture_name(&self) -> &'static str {
        match self {
            HealthBarSprite::Full => "HealthBar_2.2",
            HealthBarSprite::Half => "HealthBar_2.1",
        }
    }
}

/// Bar drawn above two-hit enemies. It follows the owner by the same deltas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HealthBar {
    pub pos: Pos,
    pub sprite: HealthBarSprite,
    pub visible: bool,
}

impl HealthBar {
    pub fn above(owner: Pos, offset: f32) -> Self {
        HealthBar {
            pos: owner.offset(0.0, offset),
            sprite: HealthBarSprite::Full,
            visible: true,
        }
    }

    pub fn shift(&mut self, dx: f32, dy: f32) {
        self.pos = self.pos.offset(dx, dy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alien_textures_follow_facing() {
        let kind = EnemyKind::MediumAlien;
        assert_eq!(
            EnemySprite::Walking(Dir::Left).texture_name(kind),
            "Alien_Walking_Left(6-10)"
        );
        assert_eq!(
            EnemySprite::Still(Dir::Right).texture_name(EnemyKind::SmallAlien),
            "Alien_Still_Right(1-5)"
        );
        assert_eq!(EnemySprite::ExplosionFrame2.texture_name(kind), "Alien_Death_2");
    }

    #[test]
    fn machine_uses_explosion_frames() {
        let kind = EnemyKind::RedMachine;
        assert_eq!(EnemySprite::resting(kind).texture_name(kind), "Enemy(11-15)");
        assert_eq!(EnemySprite::ExplosionFrame1.texture_name(kind), "Explosion1");
    }

    #[test]
    fn health_bar_follows_owner() {
        let mut bar = HealthBar::above(Pos::new(10.0, -124.0), 85.0);
        assert_eq!(bar.pos, Pos::new(10.0, -39.0));
        bar.shift(2.5, 0.0);
        assert_eq!(bar.pos, Pos::new(12.5, -39.0));
        assert_eq!(bar.sprite.texture_name(), "HealthBar_2.2");
    }
}
