//! Gameweek scoring: auto-substitution, captaincy, chip effects and the
//! per-action points table that feeds player stat lines.

mod captaincy;
mod engine;
mod gameweek;
mod points;
mod substitution;

pub use captaincy::Captaincy;
pub use engine::{compute_score, ScoreBreakdown, ScoringEngine};
pub use gameweek::{aggregate_events, score_gameweek, GameweekScoring, ManagerScore, WeeklyScore};
pub use points::{ActionCount, PointsLine, PointsRule, PointsTable};
pub use substitution::AutoSub;
