//! # fantasy_core - Fantasy League Roster Rules and Gameweek Scoring
//!
//! Rules engine for a 17-player-squad fantasy league.
//!
//! ## Features
//! - Squad and starting-lineup validation with stable violation messages
//! - Gameweek scoring with automatic substitution and captain/vice fallback
//! - Bench Boost, Triple Captain, Wildcard and Free Hit chips
//! - Free-transfer rollover and point cost of extra transfers
//! - In-memory store with atomic, checksummed snapshot files

// Doc formatting lints - purely cosmetic, fix incrementally
#![allow(clippy::doc_lazy_continuation)]
// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]
// Complex types are sometimes necessary for generic APIs
#![allow(clippy::type_complexity)]

pub mod chips;
pub mod config;
pub mod error;
pub mod models;
pub mod rules;
pub mod scoring;
pub mod service;
pub mod store;
pub mod transfers;

#[cfg(test)]
mod test_support;

// Re-export the engine components
pub use chips::{ChipState, ChipStateMachine};
pub use rules::{validate_roster, RosterValidator, RosterViolation};
pub use scoring::{compute_score, Captaincy, ScoreBreakdown, ScoringEngine};
pub use transfers::{TransferLedger, TransferState, TransferSummary};

// Re-export data model
pub use models::{
    Chip, ChipKind, Gameweek, ManagerId, Player, PlayerId, PlayerMeta, Position, Roster,
    RosterSelection, RosterSlot, StatLine, TeamRef,
};

pub use config::{ConfigError, RulesConfig};
pub use error::{EngineError, Result, RuleRejection, StoreError};
pub use service::{FantasyService, LoadedRoster};
pub use store::{FantasyStore, MemoryStore};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
