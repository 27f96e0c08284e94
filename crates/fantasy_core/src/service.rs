//! In-process entry point for request handlers.
//!
//! Owns the store, the league rules and the per-key locks that serialize
//! check-then-act sequences. Deadline checks are the caller's concern.

use crate::chips::{ChipState, ChipStateMachine};
use crate::config::RulesConfig;
use crate::error::{Result, RuleRejection};
use crate::models::{
    ChipActivation, Gameweek, ManagerId, MatchEvent, Player, PlayerId, Roster, RosterSelection,
};
use crate::rules::RosterValidator;
use crate::scoring::{
    self, aggregate_events, ActionCount, GameweekScoring, ScoreBreakdown, ScoringEngine,
};
use crate::store::{FantasyStore, KeyedLocks, MemoryStore};
use crate::transfers::{TransferLedger, TransferRecord, TransferState, TransferSummary};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A roster as returned to the manager. `rolled_over_from` is set when the
/// gameweek has no roster of its own and the latest earlier one is shown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadedRoster {
    pub roster: Roster,
    pub rolled_over_from: Option<Gameweek>,
}

pub struct FantasyService {
    store: Arc<dyn FantasyStore>,
    rules: RulesConfig,
    roster_locks: KeyedLocks<ManagerId>,
    transfer_locks: KeyedLocks<(ManagerId, Gameweek)>,
    stats_locks: KeyedLocks<Gameweek>,
}

impl FantasyService {
    pub fn new(store: Arc<dyn FantasyStore>, rules: RulesConfig) -> Self {
        Self {
            store,
            rules,
            roster_locks: KeyedLocks::new(),
            transfer_locks: KeyedLocks::new(),
            stats_locks: KeyedLocks::new(),
        }
    }

    /// Service over a fresh, non-durable store.
    pub fn in_memory(rules: RulesConfig) -> Self {
        Self::new(Arc::new(MemoryStore::new()), rules)
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    pub fn store(&self) -> &dyn FantasyStore {
        self.store.as_ref()
    }

    fn ledger(&self) -> TransferLedger<'_> {
        TransferLedger::new(self.store.as_ref(), &self.rules, &self.transfer_locks)
    }

    pub fn register_players(&self, players: Vec<Player>) -> Result<()> {
        let count = players.len();
        self.store.upsert_players(players)?;
        log::info!("Registered {} players", count);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Rosters
    // ------------------------------------------------------------------

    /// Validate a selection and replace the manager's roster for the
    /// gameweek. A requested chip is activated in the same commit; without
    /// one, a chip already played for the gameweek stays on the roster.
    pub fn save_roster(
        &self,
        manager_id: &str,
        gameweek: Gameweek,
        selection: &RosterSelection,
    ) -> Result<Roster> {
        check_gameweek(gameweek)?;
        let selection = selection.normalized();

        let players = self.store.players(&selection.squad_ids)?;
        if let Some(missing) =
            selection.squad_ids.iter().find(|id| !players.iter().any(|p| &p.id == *id))
        {
            return Err(RuleRejection::UnknownPlayer(missing.clone()).into());
        }

        RosterValidator::new(&self.rules).validate(
            &players,
            &selection.starting_ids,
            selection.captain_id.as_deref(),
            selection.vice_id.as_deref(),
        )?;

        let requested = selection.chip.as_deref().map(ChipStateMachine::parse).transpose()?;
        let machine = ChipStateMachine::new(&self.rules);

        self.roster_locks.with_lock(manager_id.to_string(), || -> Result<Roster> {
            let stored = self.store.chip_state(manager_id)?;

            let (chip, chips) = match requested {
                Some(kind) => {
                    let mut state = machine.state_or_seed(manager_id, stored);
                    let chip = machine.activate(&mut state, kind, gameweek)?;
                    (chip, Some(state))
                }
                None => (stored.map(|state| state.chip_for(gameweek)).unwrap_or_default(), None),
            };

            let roster = Roster::new(manager_id, gameweek, selection.to_slots()).with_chip(chip);
            self.store.commit_roster(roster.clone(), chips)?;

            log::info!(
                "Saved roster for {} gw{} ({} starters, chip {:?})",
                manager_id,
                gameweek,
                selection.starting_ids.len(),
                chip.kind()
            );
            Ok(roster)
        })
    }

    /// The gameweek's roster, else the latest earlier one relabelled for
    /// `gameweek`. Chips never roll over.
    pub fn load_roster(&self, manager_id: &str, gameweek: Gameweek) -> Result<Option<LoadedRoster>> {
        if let Some(roster) = self.store.roster(manager_id, gameweek)? {
            return Ok(Some(LoadedRoster { roster, rolled_over_from: None }));
        }

        let Some(mut roster) = self.store.latest_roster_before(manager_id, gameweek)? else {
            return Ok(None);
        };

        let from = roster.gameweek;
        roster.gameweek = gameweek;
        roster.chip = self
            .store
            .chip_state(manager_id)?
            .map(|state| state.chip_for(gameweek))
            .unwrap_or_default();

        Ok(Some(LoadedRoster { roster, rolled_over_from: Some(from) }))
    }

    // ------------------------------------------------------------------
    // Scoring
    // ------------------------------------------------------------------

    pub fn score_manager(&self, manager_id: &str, gameweek: Gameweek) -> Result<ScoreBreakdown> {
        let roster = self.store.roster(manager_id, gameweek)?.ok_or_else(|| {
            RuleRejection::RosterNotFound { manager_id: manager_id.to_string(), gameweek }
        })?;

        let raw = self.store.gameweek_stats(gameweek)?;
        let stats = aggregate_events(&raw.events, &raw.appearances);
        let ids: Vec<PlayerId> = roster.player_ids().cloned().collect();
        let meta = self.store.player_meta(&ids)?;

        Ok(ScoringEngine::new(&self.rules).compute_score(&roster, &stats, &meta))
    }

    pub fn score_gameweek(&self, gameweek: Gameweek) -> Result<GameweekScoring> {
        check_gameweek(gameweek)?;
        scoring::score_gameweek(self.store.as_ref(), &self.rules, gameweek)
    }

    /// Score a player's actions in one match and add them to the gameweek's
    /// stats. Returns the points awarded.
    pub fn record_match_actions(
        &self,
        gameweek: Gameweek,
        match_id: u64,
        player_id: &str,
        actions: &[ActionCount],
    ) -> Result<i32> {
        check_gameweek(gameweek)?;
        let player = self.known_player(player_id)?;
        let events = self.rules.points.events_for(match_id, &player.id, player.position, actions);
        let points = events.iter().map(MatchEvent::points).fold(0i32, i32::saturating_add);

        self.stats_locks.with_lock(gameweek, || -> Result<()> {
            let mut stats = self.store.gameweek_stats(gameweek)?;
            stats.events.extend(events);
            self.store.put_gameweek_stats(gameweek, stats)?;
            Ok(())
        })?;

        log::info!("gw{} match {}: {} scored {} points", gameweek, match_id, player.id, points);
        Ok(points)
    }

    /// Mark a player as having played without any scored action.
    pub fn record_appearance(&self, gameweek: Gameweek, player_id: &str) -> Result<()> {
        check_gameweek(gameweek)?;
        let player = self.known_player(player_id)?;

        self.stats_locks.with_lock(gameweek, || -> Result<()> {
            let mut stats = self.store.gameweek_stats(gameweek)?;
            if stats.appearances.insert(player.id.clone()) {
                self.store.put_gameweek_stats(gameweek, stats)?;
            }
            Ok(())
        })
    }

    fn known_player(&self, player_id: &str) -> Result<Player> {
        let player_id = player_id.trim().to_string();
        self.store
            .players(std::slice::from_ref(&player_id))?
            .into_iter()
            .next()
            .ok_or_else(|| RuleRejection::UnknownPlayer(player_id).into())
    }

    // ------------------------------------------------------------------
    // Transfers and chips
    // ------------------------------------------------------------------

    pub fn transfer_state(&self, manager_id: &str, gameweek: Gameweek) -> Result<TransferState> {
        self.ledger().get_or_init(manager_id, gameweek)
    }

    pub fn transfer_summary(&self, manager_id: &str, gameweek: Gameweek) -> Result<TransferSummary> {
        self.ledger().summary(manager_id, gameweek)
    }

    pub fn current_cost(&self, manager_id: &str, gameweek: Gameweek) -> Result<i32> {
        self.ledger().current_cost(manager_id, gameweek)
    }

    pub fn record_transfer(
        &self,
        manager_id: &str,
        gameweek: Gameweek,
        player_out: &str,
        player_in: &str,
    ) -> Result<TransferSummary> {
        self.ledger().record_transfer(manager_id, gameweek, player_out, player_in)
    }

    /// Transfer log for the gameweek, newest first.
    pub fn transfers(&self, manager_id: &str, gameweek: Gameweek) -> Result<Vec<TransferRecord>> {
        self.ledger().transfers(manager_id, gameweek)
    }

    /// Chip counters, seeded from the rules for a manager without history.
    pub fn chip_state(&self, manager_id: &str) -> Result<ChipState> {
        let stored = self.store.chip_state(manager_id)?;
        Ok(ChipStateMachine::new(&self.rules).state_or_seed(manager_id, stored))
    }

    /// Chip activations in the order they were played.
    pub fn used_chips(&self, manager_id: &str) -> Result<Vec<ChipActivation>> {
        Ok(self
            .store
            .chip_state(manager_id)?
            .map(|state| state.history().to_vec())
            .unwrap_or_default())
    }
}

fn check_gameweek(gameweek: Gameweek) -> Result<()> {
    if gameweek == 0 {
        return Err(RuleRejection::InvalidGameweek(gameweek).into());
    }
    Ok(())
}
