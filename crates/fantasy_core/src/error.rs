use crate::config::ConfigError;
use crate::models::{ChipKind, Gameweek, PlayerId};
use crate::rules::RosterViolation;
use thiserror::Error;

/// Business-rule rejections. Never retried; surfaced to the manager.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuleRejection {
    #[error("Invalid roster: {0}")]
    InvalidRoster(#[from] RosterViolation),

    #[error("Unknown chip: {0}")]
    UnknownChip(String),

    #[error("{chip} has no uses left this season")]
    ChipExhausted { chip: ChipKind },

    #[error("{active} is already active for gameweek {gameweek}; cannot also play {requested}")]
    ChipConflict { active: ChipKind, requested: ChipKind, gameweek: Gameweek },

    #[error("Unknown player: {0}")]
    UnknownPlayer(PlayerId),

    #[error("Invalid transfer: {0}")]
    InvalidTransfer(String),

    #[error("Invalid gameweek: {0}")]
    InvalidGameweek(Gameweek),

    #[error("No roster for manager {manager_id} in gameweek {gameweek}")]
    RosterNotFound { manager_id: String, gameweek: Gameweek },
}

/// Infrastructure failures. `is_recoverable` says which ones a retry can fix.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] rmp_serde::encode::Error),

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] rmp_serde::decode::Error),

    #[error("Decompression error")]
    Decompression,

    #[error("Corrupted data")]
    Corrupted,

    #[error("Checksum mismatch")]
    ChecksumMismatch,

    #[error("Version mismatch: found {found}, expected {expected}")]
    VersionMismatch { found: u32, expected: u32 },

    #[error("Store lock poisoned")]
    Poisoned,
}

impl StoreError {
    pub fn is_recoverable(&self) -> bool {
        match self {
            StoreError::Io(_) => true,
            StoreError::Poisoned => false,
            StoreError::VersionMismatch { .. } => false,
            StoreError::Corrupted => false,
            StoreError::ChecksumMismatch => false,
            _ => false,
        }
    }
}

impl<T> From<std::sync::PoisonError<T>> for StoreError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        StoreError::Poisoned
    }
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Rejected(#[from] RuleRejection),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<RosterViolation> for EngineError {
    fn from(violation: RosterViolation) -> Self {
        EngineError::Rejected(RuleRejection::InvalidRoster(violation))
    }
}

impl EngineError {
    /// Business-rule outcome (4xx-equivalent) rather than a failure.
    pub fn is_rejection(&self) -> bool {
        matches!(self, EngineError::Rejected(_))
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            EngineError::Store(err) => err.is_recoverable(),
            _ => false,
        }
    }

    pub fn rejection(&self) -> Option<&RuleRejection> {
        match self {
            EngineError::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
