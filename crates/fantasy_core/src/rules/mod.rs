//! Roster legality rules.

pub mod formation;
mod validator;
mod violation;

pub use formation::{CountRange, FormationLimits, PositionCounts};
pub use validator::{validate_roster, RosterValidator};
pub use violation::RosterViolation;
