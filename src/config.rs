use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::sound_handler::SoundSettings;
use crate::state::common::Scale;
use crate::state::enemies::{ArchetypeParams, EnemyKind};

pub const DEFAULT_COIN_DISTANCE: f32 = 20.0;

/// Everything the core needs at construction time. Built once at startup
/// and handed to `GameState::new`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub scale: Scale,
    pub sounds: SoundSettings,
    /// Half-width of a coin's hitbox band.
    pub coin_distance: f32,
    pub small_alien: ArchetypeParams,
    pub medium_alien: ArchetypeParams,
    pub red_machine: ArchetypeParams,
}

impl Default for CoreConfig {
    fn default() -> Self {
        CoreConfig {
            scale: Scale::default(),
            sounds: SoundSettings::default(),
            coin_distance: DEFAULT_COIN_DISTANCE,
            small_alien: ArchetypeParams::small_alien(),
            medium_alien: ArchetypeParams::medium_alien(),
            red_machine: ArchetypeParams::red_machine(),
        }
    }
}

impl CoreConfig {
    pub fn params(&self, kind: EnemyKind) -> &ArchetypeParams {
        match kind {
            EnemyKind::SmallAlien => &self.small_alien,
            EnemyKind::MediumAlien => &self.medium_alien,
            EnemyKind::RedMachine => &self.red_machine,
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: CoreConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let s = fs::read_to_string(path)?;
        let config = Self::from_json_str(&s)?;
        log::info!("loaded core config from {}", path.display());
        Ok(config)
    }

    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let s = serde_json::to_string_pretty(self)?;
        fs::write(path, s)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let scale_ok = |v: f32| v.is_finite() && v > 0.0;
        if !scale_ok(self.scale.x) || !scale_ok(self.scale.y) {
            return Err(CoreError::config(None, "scale factors must be finite and positive"));
        }
        if !scale_ok(self.coin_distance) {
            return Err(CoreError::config(None, "coin distance must be positive"));
        }
        for kind in EnemyKind::ALL {
            let params = self.params(kind);
            if params.kind != kind {
                return Err(CoreError::config(
                    Some(kind),
                    format!("slot holds a {} table", params.kind),
                ));
            }
            params.validate()?;
        }
        Ok(())
    }
}
