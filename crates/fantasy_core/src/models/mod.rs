//! Domain data model: players, rosters, chips and per-player stat lines.

pub mod chip;
pub mod player;
pub mod position;
pub mod roster;
pub mod stats;

pub type PlayerId = String;
pub type ManagerId = String;
pub type Gameweek = u32;

pub use chip::{Chip, ChipActivation, ChipKind};
pub use player::{Player, PlayerMeta, TeamRef};
pub use position::Position;
pub use roster::{Roster, RosterSelection, RosterSlot};
pub use stats::{GameweekStats, MatchEvent, StatLine};
