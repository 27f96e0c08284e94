//! Persistence seam.
//!
//! Every mutating call is all-or-nothing: an implementation either applies
//! the whole change or leaves previously stored data untouched.

pub mod data;
pub mod locks;
pub mod memory;
pub mod snapshot;

pub use data::LeagueData;
pub use locks::KeyedLocks;
pub use memory::MemoryStore;

use crate::chips::ChipState;
use crate::error::StoreError;
use crate::models::{Gameweek, GameweekStats, Player, PlayerId, PlayerMeta, Roster};
use crate::scoring::WeeklyScore;
use crate::transfers::{TransferRecord, TransferState};
use std::collections::HashMap;

pub const SNAPSHOT_VERSION: u32 = 1;

pub trait FantasyStore: Send + Sync {
    /// Known players among `ids`, in request order. Unknown ids are skipped.
    fn players(&self, ids: &[PlayerId]) -> Result<Vec<Player>, StoreError>;

    fn upsert_players(&self, players: Vec<Player>) -> Result<(), StoreError>;

    fn player_meta(&self, ids: &[PlayerId]) -> Result<HashMap<PlayerId, PlayerMeta>, StoreError> {
        Ok(self.players(ids)?.into_iter().map(|p| (p.id.clone(), p.meta())).collect())
    }

    fn roster(&self, manager_id: &str, gameweek: Gameweek) -> Result<Option<Roster>, StoreError>;

    /// Most recent roster strictly before `gameweek`.
    fn latest_roster_before(
        &self,
        manager_id: &str,
        gameweek: Gameweek,
    ) -> Result<Option<Roster>, StoreError>;

    /// Every roster saved for `gameweek`, by ascending manager id.
    fn rosters_for_gameweek(&self, gameweek: Gameweek) -> Result<Vec<Roster>, StoreError>;

    fn chip_state(&self, manager_id: &str) -> Result<Option<ChipState>, StoreError>;

    fn put_chip_state(&self, state: ChipState) -> Result<(), StoreError>;

    /// Replace the manager's roster for the gameweek and, when given, their
    /// chip state, as one unit.
    fn commit_roster(&self, roster: Roster, chips: Option<ChipState>) -> Result<(), StoreError>;

    fn transfer_state(
        &self,
        manager_id: &str,
        gameweek: Gameweek,
    ) -> Result<Option<TransferState>, StoreError>;

    fn put_transfer_state(&self, state: TransferState) -> Result<(), StoreError>;

    /// Store the incremented state and append the log entry together.
    fn commit_transfer(&self, state: TransferState, record: TransferRecord) -> Result<(), StoreError>;

    /// Log entries for the manager and gameweek, oldest first.
    fn transfers(&self, manager_id: &str, gameweek: Gameweek) -> Result<Vec<TransferRecord>, StoreError>;

    fn gameweek_stats(&self, gameweek: Gameweek) -> Result<GameweekStats, StoreError>;

    fn put_gameweek_stats(&self, gameweek: Gameweek, stats: GameweekStats) -> Result<(), StoreError>;

    fn upsert_weekly_scores(&self, scores: Vec<WeeklyScore>) -> Result<(), StoreError>;

    fn weekly_score(
        &self,
        manager_id: &str,
        gameweek: Gameweek,
    ) -> Result<Option<WeeklyScore>, StoreError>;
}
