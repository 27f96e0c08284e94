use super::SNAPSHOT_VERSION;
use crate::chips::ChipState;
use crate::error::StoreError;
use crate::models::{Gameweek, GameweekStats, ManagerId, Player, PlayerId, Roster};
use crate::scoring::WeeklyScore;
use crate::transfers::{TransferRecord, TransferState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything the league persists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueData {
    /// Snapshot format version for migration
    pub version: u32,

    pub saved_at: DateTime<Utc>,

    #[serde(default)]
    pub players: BTreeMap<PlayerId, Player>,

    /// manager -> gameweek -> roster
    #[serde(default)]
    pub rosters: BTreeMap<ManagerId, BTreeMap<Gameweek, Roster>>,

    #[serde(default)]
    pub chips: BTreeMap<ManagerId, ChipState>,

    #[serde(default)]
    pub transfer_states: BTreeMap<ManagerId, BTreeMap<Gameweek, TransferState>>,

    /// Append-only, in commit order.
    #[serde(default)]
    pub transfers: Vec<TransferRecord>,

    #[serde(default)]
    pub stats: BTreeMap<Gameweek, GameweekStats>,

    #[serde(default)]
    pub weekly_scores: BTreeMap<ManagerId, BTreeMap<Gameweek, WeeklyScore>>,
}

impl Default for LeagueData {
    fn default() -> Self {
        Self::new()
    }
}

impl LeagueData {
    pub fn new() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            saved_at: Utc::now(),
            players: BTreeMap::new(),
            rosters: BTreeMap::new(),
            chips: BTreeMap::new(),
            transfer_states: BTreeMap::new(),
            transfers: Vec::new(),
            stats: BTreeMap::new(),
            weekly_scores: BTreeMap::new(),
        }
    }

    pub fn touch(&mut self) {
        self.saved_at = Utc::now();
    }

    /// Keys agree with the records they index.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.players.iter().any(|(id, player)| *id != player.id) {
            return Err(StoreError::Corrupted);
        }

        for (manager_id, by_gameweek) in &self.rosters {
            for (gameweek, roster) in by_gameweek {
                if roster.manager_id != *manager_id || roster.gameweek != *gameweek {
                    return Err(StoreError::Corrupted);
                }
            }
        }

        for (manager_id, by_gameweek) in &self.transfer_states {
            for (gameweek, state) in by_gameweek {
                if state.manager_id != *manager_id || state.gameweek != *gameweek {
                    return Err(StoreError::Corrupted);
                }
            }
        }

        if self.chips.iter().any(|(manager_id, state)| *manager_id != state.manager_id) {
            return Err(StoreError::Corrupted);
        }

        for (manager_id, by_gameweek) in &self.weekly_scores {
            for (gameweek, score) in by_gameweek {
                if score.manager_id != *manager_id || score.gameweek != *gameweek {
                    return Err(StoreError::Corrupted);
                }
            }
        }

        Ok(())
    }
}
