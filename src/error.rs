use std::fmt;
use std::io;

use crate::state::enemies::EnemyKind;

#[derive(Debug)]
pub enum CoreError {
    /// Spawn ids are 1-based indices into the archetype's spawn table.
    InvalidSpawnId { kind: EnemyKind, id: u32, known: usize },
    InvalidConfig {
        kind: Option<EnemyKind>,
        reason: String,
    },
    Io(io::Error),
    Json(serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    pub(crate) fn config(kind: Option<EnemyKind>, reason: impl Into<String>) -> Self {
        CoreError::InvalidConfig {
            kind,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSpawnId { kind, id, known } => write!(
                f,
                "invalid spawn id {id} for {kind}: expected 1..={known}"
            ),
            Self::InvalidConfig {
                kind: Some(kind),
                reason,
            } => write!(f, "invalid {kind} configuration: {reason}"),
            Self::InvalidConfig { kind: None, reason } => {
                write!(f, "invalid configuration: {reason}")
            }
            Self::Io(e) => write!(f, "config i/o failed: {e}"),
            Self::Json(e) => write!(f, "config is not valid json: {e}"),
        }
    }
}

impl std::error::Error for CoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for CoreError {
    fn from(e: io::Error) -> Self {
        CoreError::Io(e)
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Json(e)
    }
}
