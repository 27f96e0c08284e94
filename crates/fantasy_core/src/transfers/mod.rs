//! Free-transfer allowance, rollover and the point cost of extra transfers.

use crate::chips::ChipState;
use crate::config::RulesConfig;
use crate::error::{Result, RuleRejection};
use crate::models::{ChipKind, Gameweek, ManagerId, PlayerId};
use crate::store::{FantasyStore, KeyedLocks};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per manager and gameweek. Created lazily on first access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferState {
    pub manager_id: ManagerId,
    pub gameweek: Gameweek,
    pub free_transfers: u32,
    pub used_transfers: u32,
    #[serde(default)]
    pub wildcard_active: bool,
    #[serde(default)]
    pub free_hit_active: bool,
}

impl TransferState {
    pub fn unused(&self) -> u32 {
        self.free_transfers.saturating_sub(self.used_transfers)
    }

    pub fn cost_waived(&self) -> bool {
        self.wildcard_active || self.free_hit_active
    }

    pub fn cost(&self, transfer_cost: i32) -> i32 {
        if self.cost_waived() {
            return 0;
        }
        self.used_transfers.saturating_sub(self.free_transfers) as i32 * transfer_cost
    }

    /// Copy the wildcard/free-hit flags from chip history. Returns whether
    /// anything changed.
    fn refresh_flags(&mut self, chips: Option<&ChipState>) -> bool {
        let active = chips.and_then(|state| state.active_in(self.gameweek));
        let wildcard = active == Some(ChipKind::Wildcard);
        let free_hit = active == Some(ChipKind::FreeHit);

        let changed = wildcard != self.wildcard_active || free_hit != self.free_hit_active;
        self.wildcard_active = wildcard;
        self.free_hit_active = free_hit;
        changed
    }
}

/// Append-only transfer log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRecord {
    pub id: Uuid,
    pub manager_id: ManagerId,
    pub gameweek: Gameweek,
    pub player_out: PlayerId,
    pub player_in: PlayerId,
    pub created_at: DateTime<Utc>,
}

impl TransferRecord {
    pub fn new(manager_id: &str, gameweek: Gameweek, player_out: &str, player_in: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            manager_id: manager_id.to_string(),
            gameweek,
            player_out: player_out.to_string(),
            player_in: player_in.to_string(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferSummary {
    pub free_transfers: u32,
    pub used_transfers: u32,
    pub cost: i32,
    pub wildcard_active: bool,
    pub free_hit_active: bool,
}

impl TransferSummary {
    fn of(state: &TransferState, rules: &RulesConfig) -> Self {
        Self {
            free_transfers: state.free_transfers,
            used_transfers: state.used_transfers,
            cost: state.cost(rules.transfer_cost),
            wildcard_active: state.wildcard_active,
            free_hit_active: state.free_hit_active,
        }
    }
}

/// Allowance seeded from the previous gameweek's leftover: the base
/// allowance plus at most `max_banked_transfers`, capped at
/// `max_free_transfers`.
pub fn rollover_allowance(previous: Option<&TransferState>, rules: &RulesConfig) -> u32 {
    let unused = previous.map_or(0, TransferState::unused);
    let banked = unused.min(rules.max_banked_transfers);
    (rules.base_free_transfers + banked).min(rules.max_free_transfers)
}

pub struct TransferLedger<'a> {
    store: &'a dyn FantasyStore,
    rules: &'a RulesConfig,
    locks: &'a KeyedLocks<(ManagerId, Gameweek)>,
}

impl<'a> TransferLedger<'a> {
    pub fn new(
        store: &'a dyn FantasyStore,
        rules: &'a RulesConfig,
        locks: &'a KeyedLocks<(ManagerId, Gameweek)>,
    ) -> Self {
        Self { store, rules, locks }
    }

    pub fn get_or_init(&self, manager_id: &str, gameweek: Gameweek) -> Result<TransferState> {
        check_gameweek(gameweek)?;
        self.locks
            .with_lock((manager_id.to_string(), gameweek), || self.load_or_seed(manager_id, gameweek))
    }

    pub fn summary(&self, manager_id: &str, gameweek: Gameweek) -> Result<TransferSummary> {
        let state = self.get_or_init(manager_id, gameweek)?;
        Ok(TransferSummary::of(&state, self.rules))
    }

    pub fn current_cost(&self, manager_id: &str, gameweek: Gameweek) -> Result<i32> {
        Ok(self.summary(manager_id, gameweek)?.cost)
    }

    /// Log a transfer and spend one transfer from the gameweek allowance.
    pub fn record_transfer(
        &self,
        manager_id: &str,
        gameweek: Gameweek,
        player_out: &str,
        player_in: &str,
    ) -> Result<TransferSummary> {
        check_gameweek(gameweek)?;

        let (player_out, player_in) = (player_out.trim(), player_in.trim());
        if player_out.is_empty() || player_in.is_empty() {
            return Err(RuleRejection::InvalidTransfer(
                "player out and player in are required".to_string(),
            )
            .into());
        }
        if player_out == player_in {
            return Err(RuleRejection::InvalidTransfer(
                "cannot transfer a player for themselves".to_string(),
            )
            .into());
        }

        let ids = [player_out.to_string(), player_in.to_string()];
        let found = self.store.players(&ids)?;
        if let Some(missing) = ids.iter().find(|id| !found.iter().any(|p| &p.id == *id)) {
            return Err(RuleRejection::UnknownPlayer(missing.clone()).into());
        }

        self.locks.with_lock((manager_id.to_string(), gameweek), || -> Result<TransferSummary> {
            let mut state = self.load_or_seed(manager_id, gameweek)?;
            state.used_transfers += 1;

            let record = TransferRecord::new(manager_id, gameweek, player_out, player_in);
            self.store.commit_transfer(state.clone(), record)?;

            log::info!(
                "{} gw{}: transfer {} -> {} ({} of {} free)",
                manager_id,
                gameweek,
                player_out,
                player_in,
                state.used_transfers,
                state.free_transfers
            );
            Ok(TransferSummary::of(&state, self.rules))
        })
    }

    /// Transfer log for the gameweek, newest first.
    pub fn transfers(&self, manager_id: &str, gameweek: Gameweek) -> Result<Vec<TransferRecord>> {
        let mut records = self.store.transfers(manager_id, gameweek)?;
        records.reverse();
        Ok(records)
    }

    fn load_or_seed(&self, manager_id: &str, gameweek: Gameweek) -> Result<TransferState> {
        let chips = self.store.chip_state(manager_id)?;

        if let Some(mut state) = self.store.transfer_state(manager_id, gameweek)? {
            if state.refresh_flags(chips.as_ref()) {
                self.store.put_transfer_state(state.clone())?;
            }
            return Ok(state);
        }

        let previous = match gameweek {
            0 | 1 => None,
            gw => self.store.transfer_state(manager_id, gw - 1)?,
        };

        let mut state = TransferState {
            manager_id: manager_id.to_string(),
            gameweek,
            free_transfers: rollover_allowance(previous.as_ref(), self.rules),
            used_transfers: 0,
            wildcard_active: false,
            free_hit_active: false,
        };
        state.refresh_flags(chips.as_ref());
        self.store.put_transfer_state(state.clone())?;

        log::debug!(
            "seeded transfer state for {} gw{}: {} free",
            manager_id,
            gameweek,
            state.free_transfers
        );
        Ok(state)
    }
}

fn check_gameweek(gameweek: Gameweek) -> Result<()> {
    if gameweek == 0 {
        return Err(RuleRejection::InvalidGameweek(gameweek).into());
    }
    Ok(())
}
