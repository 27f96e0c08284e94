use super::data::LeagueData;
use super::snapshot::{read_snapshot, write_snapshot};
use super::FantasyStore;
use crate::chips::ChipState;
use crate::error::StoreError;
use crate::models::{Gameweek, GameweekStats, Player, PlayerId, Roster};
use crate::scoring::WeeklyScore;
use crate::transfers::{TransferRecord, TransferState};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// In-process store. With a snapshot path every mutation is written to
/// disk before it becomes visible.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<LeagueData>,
    snapshot_path: Option<PathBuf>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: LeagueData) -> Self {
        Self { data: RwLock::new(data), snapshot_path: None }
    }

    /// Durable store backed by `path`. Loads the snapshot when it exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let data = if path.exists() {
            let data = read_snapshot(path)?;
            log::info!("League loaded from {:?}", path);
            data
        } else {
            LeagueData::new()
        };

        Ok(Self { data: RwLock::new(data), snapshot_path: Some(path.to_path_buf()) })
    }

    pub fn snapshot_path(&self) -> Option<&Path> {
        self.snapshot_path.as_deref()
    }

    /// Copy of the current data.
    pub fn export(&self) -> Result<LeagueData, StoreError> {
        Ok(self.data.read()?.clone())
    }

    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), StoreError> {
        let mut data = self.export()?;
        data.touch();
        write_snapshot(path.as_ref(), &data)
    }

    fn read<T>(&self, f: impl FnOnce(&LeagueData) -> T) -> Result<T, StoreError> {
        let guard = self.data.read()?;
        Ok(f(&guard))
    }

    /// Apply `f` to a copy, persist the copy, then swap it in.
    /// Each call clones the whole league and rewrites the whole snapshot.
    fn mutate<T>(&self, f: impl FnOnce(&mut LeagueData) -> T) -> Result<T, StoreError> {
        let mut guard = self.data.write()?;
        let mut next = guard.clone();
        let out = f(&mut next);

        if let Some(path) = &self.snapshot_path {
            next.touch();
            write_snapshot(path, &next)?;
        }

        *guard = next;
        Ok(out)
    }
}

impl FantasyStore for MemoryStore {
    fn players(&self, ids: &[PlayerId]) -> Result<Vec<Player>, StoreError> {
        self.read(|data| ids.iter().filter_map(|id| data.players.get(id).cloned()).collect())
    }

    fn upsert_players(&self, players: Vec<Player>) -> Result<(), StoreError> {
        self.mutate(|data| {
            for player in players {
                data.players.insert(player.id.clone(), player);
            }
        })
    }

    fn roster(&self, manager_id: &str, gameweek: Gameweek) -> Result<Option<Roster>, StoreError> {
        self.read(|data| data.rosters.get(manager_id).and_then(|by_gw| by_gw.get(&gameweek)).cloned())
    }

    fn latest_roster_before(
        &self,
        manager_id: &str,
        gameweek: Gameweek,
    ) -> Result<Option<Roster>, StoreError> {
        self.read(|data| {
            data.rosters
                .get(manager_id)
                .and_then(|by_gw| by_gw.range(..gameweek).next_back())
                .map(|(_, roster)| roster.clone())
        })
    }

    fn rosters_for_gameweek(&self, gameweek: Gameweek) -> Result<Vec<Roster>, StoreError> {
        self.read(|data| {
            data.rosters.values().filter_map(|by_gw| by_gw.get(&gameweek).cloned()).collect()
        })
    }

    fn chip_state(&self, manager_id: &str) -> Result<Option<ChipState>, StoreError> {
        self.read(|data| data.chips.get(manager_id).cloned())
    }

    fn put_chip_state(&self, state: ChipState) -> Result<(), StoreError> {
        self.mutate(|data| {
            data.chips.insert(state.manager_id.clone(), state);
        })
    }

    fn commit_roster(&self, roster: Roster, chips: Option<ChipState>) -> Result<(), StoreError> {
        self.mutate(|data| {
            if let Some(state) = chips {
                data.chips.insert(state.manager_id.clone(), state);
            }
            data.rosters
                .entry(roster.manager_id.clone())
                .or_default()
                .insert(roster.gameweek, roster);
        })
    }

    fn transfer_state(
        &self,
        manager_id: &str,
        gameweek: Gameweek,
    ) -> Result<Option<TransferState>, StoreError> {
        self.read(|data| {
            data.transfer_states.get(manager_id).and_then(|by_gw| by_gw.get(&gameweek)).cloned()
        })
    }

    fn put_transfer_state(&self, state: TransferState) -> Result<(), StoreError> {
        self.mutate(|data| {
            data.transfer_states
                .entry(state.manager_id.clone())
                .or_default()
                .insert(state.gameweek, state);
        })
    }

    fn commit_transfer(&self, state: TransferState, record: TransferRecord) -> Result<(), StoreError> {
        self.mutate(|data| {
            data.transfers.push(record);
            data.transfer_states
                .entry(state.manager_id.clone())
                .or_default()
                .insert(state.gameweek, state);
        })
    }

    fn transfers(&self, manager_id: &str, gameweek: Gameweek) -> Result<Vec<TransferRecord>, StoreError> {
        self.read(|data| {
            data.transfers
                .iter()
                .filter(|r| r.manager_id == manager_id && r.gameweek == gameweek)
                .cloned()
                .collect()
        })
    }

    fn gameweek_stats(&self, gameweek: Gameweek) -> Result<GameweekStats, StoreError> {
        self.read(|data| data.stats.get(&gameweek).cloned().unwrap_or_default())
    }

    fn put_gameweek_stats(&self, gameweek: Gameweek, stats: GameweekStats) -> Result<(), StoreError> {
        self.mutate(|data| {
            data.stats.insert(gameweek, stats);
        })
    }

    fn upsert_weekly_scores(&self, scores: Vec<WeeklyScore>) -> Result<(), StoreError> {
        self.mutate(|data| {
            for score in scores {
                data.weekly_scores
                    .entry(score.manager_id.clone())
                    .or_default()
                    .insert(score.gameweek, score);
            }
        })
    }

    fn weekly_score(
        &self,
        manager_id: &str,
        gameweek: Gameweek,
    ) -> Result<Option<WeeklyScore>, StoreError> {
        self.read(|data| {
            data.weekly_scores.get(manager_id).and_then(|by_gw| by_gw.get(&gameweek)).cloned()
        })
    }
}
