use crate::clock::Timestamp;
use crate::sound_handler::SoundHandler;
use crate::state::common::{Pos, Scale};
use crate::state::enemies::movement::CatchUp;
use crate::state::enemies::params::LaserParams;

/// The single shot a machine keeps in flight. It falls straight down and is
/// re-fired from the muzzle once it leaves the bottom of the screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyLaser {
    pub pos: Pos,
    /// Already struck the player this flight; hidden until re-fired.
    has_struck: bool,
    suppressed: bool,
    timer: CatchUp,
}

impl EnemyLaser {
    pub fn loaded(muzzle: Pos) -> Self {
        EnemyLaser {
            pos: muzzle,
            has_struck: false,
            suppressed: false,
            timer: CatchUp::default(),
        }
    }

    pub fn is_visible(&self) -> bool {
        !self.has_struck && !self.suppressed
    }

    pub fn has_struck(&self) -> bool {
        self.has_struck
    }

    pub fn mark_hit(&mut self) {
        self.has_struck = true;
    }

    pub fn reload(&mut self, muzzle: Pos) {
        *self = EnemyLaser::loaded(muzzle);
    }

    pub fn update(
        &mut self,
        now: Timestamp,
        muzzle: Pos,
        params: &LaserParams,
        scale: Scale,
        suppressed: bool,
        sounds: &mut SoundHandler,
    ) {
        self.suppressed = suppressed;
        if suppressed {
            self.pos = muzzle;
            self.has_struck = false;
            self.timer.restart(now);
            return;
        }

        if self.pos.y > params.floor * scale.y {
            if let Some(ratio) = self.timer.tick(now, params.interval) {
                self.pos.y -= params.step * scale.y * ratio;
            }
        } else {
            self.pos = muzzle;
            self.has_struck = false;
            self.timer.restart(now);
            sounds.play(params.sound);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sound_handler::{Sound, SoundSettings};
    use crate::state::enemies::params::ArchetypeParams;
    use std::time::Duration;

    fn params() -> LaserParams {
        ArchetypeParams::red_machine().laser.unwrap()
    }

    #[test]
    fn falls_with_catch_up() {
        let mut sounds = SoundHandler::default();
        let muzzle = Pos::new(375.0, 150.0);
        let mut laser = EnemyLaser::loaded(muzzle);
        let scale = Scale::default();
        laser.update(Timestamp::ZERO, muzzle, &params(), scale, false, &mut sounds);
        laser.update(Timestamp::from_millis(30), muzzle, &params(), scale, false, &mut sounds);
        assert!((laser.pos.y - (150.0 - 22.0)).abs() < 1e-4);
        assert!(sounds.pending().is_empty());
    }

    #[test]
    fn refires_from_muzzle_below_floor() {
        let mut sounds = SoundHandler::new(SoundSettings::default());
        let mut laser = EnemyLaser::loaded(Pos::new(0.0, -361.0));
        laser.mark_hit();
        assert!(!laser.is_visible());

        let muzzle = Pos::new(-40.0, 150.0);
        laser.update(
            Timestamp::from_millis(5),
            muzzle,
            &params(),
            Scale::default(),
            false,
            &mut sounds,
        );
        assert_eq!(laser.pos, muzzle);
        assert!(laser.is_visible());
        assert_eq!(sounds.pending(), &[Sound::LaserGunEnemy]);
    }

    #[test]
    fn suppressed_laser_is_parked() {
        let mut sounds = SoundHandler::default();
        let muzzle = Pos::new(10.0, 150.0);
        let mut laser = EnemyLaser::loaded(Pos::new(10.0, 0.0));
        let now = Timestamp::ZERO + Duration::from_millis(90);
        laser.update(now, muzzle, &params(), Scale::default(), true, &mut sounds);
        assert_eq!(laser.pos, muzzle);
        assert!(!laser.is_visible());
        assert!(sounds.pending().is_empty());
    }
}
