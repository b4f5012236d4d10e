use serde::{Deserialize, Serialize};

macro_rules! define_sounds {
    ($($variant:ident => $file:literal, $category:ident),+ $(,)?) => {
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
        pub enum Sound {
            $($variant),+
        }

        impl Sound {
            pub const ALL: &'static [Sound] = &[
                $(Sound::$variant),+
            ];

            pub const fn file_name(self) -> &'static str {
                match self {
                    $(Sound::$variant => $file),+
                }
            }

            pub const fn category(self) -> SoundCategory {
                match self {
                    $(Sound::$variant => SoundCategory::$category),+
                }
            }
        }
    };
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SoundCategory {
    Death,
    Hit,
    Shooting,
}

define_sounds! {
    AlienDeath    => "Alien_Death_Sound.wav", Death,
    AlienHit      => "Alien_Hit_Sound.wav",   Hit,
    Explosion     => "Explosion.wav",         Death,
    Explosion2    => "Explosion2.wav",        Hit,
    LaserGunEnemy => "Laser_Gun_Enemy.wav",   Shooting,
}

/// Per-category toggles from the player's settings.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundSettings {
    pub death: bool,
    pub hit: bool,
    pub shooting: bool,
}

impl Default for SoundSettings {
    fn default() -> Self {
        SoundSettings {
            death: true,
            hit: true,
            shooting: true,
        }
    }
}

impl SoundSettings {
    pub fn muted() -> Self {
        SoundSettings {
            death: false,
            hit: false,
            shooting: false,
        }
    }

    pub fn allows(&self, sound: Sound) -> bool {
        match sound.category() {
            SoundCategory::Death => self.death,
            SoundCategory::Hit => self.hit,
            SoundCategory::Shooting => self.shooting,
        }
    }
}

/// Sounds requested during a tick. Playback belongs to the audio layer,
/// which drains the queue once per frame.
#[derive(Debug, Default)]
pub struct SoundHandler {
    settings: SoundSettings,
    pending: Vec<Sound>,
}

impl SoundHandler {
    pub fn new(settings: SoundSettings) -> Self {
        SoundHandler {
            settings,
            pending: Vec::new(),
        }
    }

    pub fn settings(&self) -> SoundSettings {
        self.settings
    }

    pub fn set_settings(&mut self, settings: SoundSettings) {
        self.settings = settings;
    }

    pub fn play(&mut self, sound: Sound) {
        if self.settings.allows(sound) {
            self.pending.push(sound);
        }
    }

    pub fn pending(&self) -> &[Sound] {
        &self.pending
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, Sound> {
        self.pending.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_sound_has_a_wav_file() {
        for sound in Sound::ALL {
            assert!(sound.file_name().ends_with(".wav"));
        }
    }

    #[test]
    fn disabled_category_is_not_queued() {
        let mut handler = SoundHandler::new(SoundSettings {
            death: false,
            hit: true,
            shooting: true,
        });
        handler.play(Sound::AlienDeath);
        handler.play(Sound::Explosion);
        handler.play(Sound::AlienHit);
        assert_eq!(handler.pending(), &[Sound::AlienHit]);
    }

    #[test]
    fn drain_empties_the_queue() {
        let mut handler = SoundHandler::new(SoundSettings::default());
        handler.play(Sound::LaserGunEnemy);
        handler.play(Sound::Explosion2);
        let played: Vec<Sound> = handler.drain().collect();
        assert_eq!(played, vec![Sound::LaserGunEnemy, Sound::Explosion2]);
        assert!(handler.pending().is_empty());
    }

    #[test]
    fn muted_settings_block_everything() {
        let mut handler = SoundHandler::new(SoundSettings::muted());
        for sound in Sound::ALL {
            handler.play(*sound);
        }
        assert!(handler.pending().is_empty());
    }
}
