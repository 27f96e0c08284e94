//! Season-long chip allowances and activations.

use crate::config::{ChipAllowances, RulesConfig};
use crate::error::RuleRejection;
use crate::models::{Chip, ChipActivation, ChipKind, Gameweek, ManagerId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One manager's chip counters plus the activations that spent them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChipState {
    pub manager_id: ManagerId,
    remaining: BTreeMap<ChipKind, u32>,
    history: Vec<ChipActivation>,
}

impl ChipState {
    pub fn seeded(manager_id: impl Into<ManagerId>, allowances: &ChipAllowances) -> Self {
        Self {
            manager_id: manager_id.into(),
            remaining: ChipKind::ALL.iter().map(|&kind| (kind, allowances.for_kind(kind))).collect(),
            history: Vec::new(),
        }
    }

    pub fn remaining(&self, kind: ChipKind) -> u32 {
        self.remaining.get(&kind).copied().unwrap_or(0)
    }

    /// Activations in the order they happened.
    pub fn history(&self) -> &[ChipActivation] {
        &self.history
    }

    pub fn active_in(&self, gameweek: Gameweek) -> Option<ChipKind> {
        self.history.iter().find(|a| a.gameweek == gameweek).map(|a| a.chip)
    }

    pub fn has_used(&self, kind: ChipKind) -> bool {
        self.history.iter().any(|a| a.chip == kind)
    }

    /// Chip value for a roster of `gameweek`.
    pub fn chip_for(&self, gameweek: Gameweek) -> Chip {
        self.active_in(gameweek)
            .map(|kind| Chip::from_kind(kind, self.remaining(kind)))
            .unwrap_or_default()
    }
}

/// Decides whether a chip may be played.
#[derive(Debug, Clone, Copy)]
pub struct ChipStateMachine<'a> {
    rules: &'a RulesConfig,
}

impl<'a> ChipStateMachine<'a> {
    pub fn new(rules: &'a RulesConfig) -> Self {
        Self { rules }
    }

    pub fn parse(raw: &str) -> Result<ChipKind, RuleRejection> {
        raw.parse::<ChipKind>().map_err(|_| RuleRejection::UnknownChip(raw.trim().to_string()))
    }

    /// Stored state, or fresh counters for a manager who never played a chip.
    pub fn state_or_seed(&self, manager_id: &str, stored: Option<ChipState>) -> ChipState {
        stored.unwrap_or_else(|| ChipState::seeded(manager_id, &self.rules.chips))
    }

    /// Play `kind` in `gameweek`.
    ///
    /// Replaying the chip already active for the gameweek is a no-op. A
    /// different chip in the same gameweek conflicts. Otherwise one use is
    /// spent and an activation appended.
    pub fn activate(
        &self,
        state: &mut ChipState,
        kind: ChipKind,
        gameweek: Gameweek,
    ) -> Result<Chip, RuleRejection> {
        if gameweek == 0 {
            return Err(RuleRejection::InvalidGameweek(gameweek));
        }

        match state.active_in(gameweek) {
            Some(active) if active == kind => return Ok(state.chip_for(gameweek)),
            Some(active) => {
                return Err(RuleRejection::ChipConflict { active, requested: kind, gameweek });
            }
            None => {}
        }

        let left = state.remaining(kind);
        if left == 0 {
            return Err(RuleRejection::ChipExhausted { chip: kind });
        }

        state.remaining.insert(kind, left - 1);
        state.history.push(ChipActivation::new(state.manager_id.clone(), kind, gameweek));

        log::info!(
            "{} activated {} for gameweek {} ({} left)",
            state.manager_id,
            kind,
            gameweek,
            left - 1
        );
        Ok(Chip::from_kind(kind, left - 1))
    }
}
