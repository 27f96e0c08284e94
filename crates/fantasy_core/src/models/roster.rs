use super::{Chip, Gameweek, ManagerId, PlayerId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One player's place in a manager's gameweek roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterSlot {
    pub player_id: PlayerId,
    pub is_starting: bool,
    #[serde(default)]
    pub is_captain: bool,
    #[serde(default)]
    pub is_vice_captain: bool,
    /// Multiplier recorded at save time (2 for the captain). Scoring
    /// recomputes the effective multiplier from captaincy and chip.
    #[serde(default = "default_multiplier")]
    pub multiplier: u8,
    /// Substitution priority for bench players, 1 = first. `None` sorts last.
    #[serde(default)]
    pub bench_order: Option<u8>,
}

fn default_multiplier() -> u8 {
    1
}

impl RosterSlot {
    pub fn starter(player_id: impl Into<PlayerId>) -> Self {
        Self {
            player_id: player_id.into(),
            is_starting: true,
            is_captain: false,
            is_vice_captain: false,
            multiplier: 1,
            bench_order: None,
        }
    }

    pub fn bench(player_id: impl Into<PlayerId>, order: u8) -> Self {
        Self { is_starting: false, bench_order: Some(order), ..Self::starter(player_id) }
    }

    pub fn captain(mut self) -> Self {
        self.is_captain = true;
        self.multiplier = 2;
        self
    }

    pub fn vice_captain(mut self) -> Self {
        self.is_vice_captain = true;
        self
    }
}

/// A manager's full roster for one gameweek. Replaced wholesale on save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    pub manager_id: ManagerId,
    pub gameweek: Gameweek,
    pub slots: Vec<RosterSlot>,
    #[serde(default)]
    pub chip: Chip,
}

impl Roster {
    pub fn new(manager_id: impl Into<ManagerId>, gameweek: Gameweek, slots: Vec<RosterSlot>) -> Self {
        Self { manager_id: manager_id.into(), gameweek, slots, chip: Chip::None }
    }

    pub fn with_chip(mut self, chip: Chip) -> Self {
        self.chip = chip;
        self
    }

    pub fn starters(&self) -> impl Iterator<Item = &RosterSlot> {
        self.slots.iter().filter(|slot| slot.is_starting)
    }

    /// Bench slots in substitution priority. Ties keep roster order.
    pub fn bench_in_order(&self) -> Vec<&RosterSlot> {
        let mut bench: Vec<&RosterSlot> = self.slots.iter().filter(|slot| !slot.is_starting).collect();
        bench.sort_by_key(|slot| slot.bench_order.unwrap_or(u8::MAX));
        bench
    }

    pub fn captain(&self) -> Option<&RosterSlot> {
        self.slots.iter().find(|slot| slot.is_captain)
    }

    pub fn vice_captain(&self) -> Option<&RosterSlot> {
        self.slots.iter().find(|slot| slot.is_vice_captain)
    }

    pub fn player_ids(&self) -> impl Iterator<Item = &PlayerId> {
        self.slots.iter().map(|slot| &slot.player_id)
    }

    pub fn starting_ids(&self) -> Vec<PlayerId> {
        self.starters().map(|slot| slot.player_id.clone()).collect()
    }
}

/// A manager's requested squad, lineup and captaincy, as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterSelection {
    pub squad_ids: Vec<PlayerId>,
    pub starting_ids: Vec<PlayerId>,
    #[serde(default)]
    pub captain_id: Option<PlayerId>,
    #[serde(default)]
    pub vice_id: Option<PlayerId>,
    /// Chip identifier as sent by the client (`"bench_boost"`, ...).
    #[serde(default)]
    pub chip: Option<String>,
    /// Explicit bench priority. Bench players not listed follow in squad order.
    #[serde(default)]
    pub bench_order: Option<Vec<PlayerId>>,
}

fn dedup_in_order(ids: &[PlayerId]) -> Vec<PlayerId> {
    let mut seen = HashSet::new();
    ids.iter()
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty() && seen.insert(id.clone()))
        .collect()
}

impl RosterSelection {
    /// Trimmed, de-duplicated copy. Captain/vice ids are trimmed and blank
    /// ids become `None`.
    pub fn normalized(&self) -> RosterSelection {
        let clean = |id: &Option<PlayerId>| {
            id.as_deref().map(str::trim).filter(|id| !id.is_empty()).map(str::to_string)
        };

        RosterSelection {
            squad_ids: dedup_in_order(&self.squad_ids),
            starting_ids: dedup_in_order(&self.starting_ids),
            captain_id: clean(&self.captain_id),
            vice_id: clean(&self.vice_id),
            chip: self.chip.as_deref().map(str::trim).filter(|c| !c.is_empty()).map(str::to_string),
            bench_order: self.bench_order.as_deref().map(dedup_in_order),
        }
    }

    /// Build the 17 slots for this selection. Expects a validated selection.
    pub fn to_slots(&self) -> Vec<RosterSlot> {
        let starting: HashSet<&PlayerId> = self.starting_ids.iter().collect();
        let bench: Vec<&PlayerId> =
            self.squad_ids.iter().filter(|id| !starting.contains(id)).collect();

        let mut bench_priority: Vec<&PlayerId> = Vec::with_capacity(bench.len());
        if let Some(order) = &self.bench_order {
            bench_priority.extend(order.iter().filter(|id| bench.contains(id)));
        }
        for id in &bench {
            if !bench_priority.contains(id) {
                bench_priority.push(*id);
            }
        }

        self.squad_ids
            .iter()
            .map(|id| {
                let is_captain = self.captain_id.as_ref() == Some(id);
                let bench_order = if starting.contains(id) {
                    None
                } else {
                    bench_priority.iter().position(|b| *b == id).map(|pos| (pos + 1) as u8)
                };

                RosterSlot {
                    player_id: id.clone(),
                    is_starting: starting.contains(id),
                    is_captain,
                    is_vice_captain: self.vice_id.as_ref() == Some(id),
                    multiplier: if is_captain { 2 } else { 1 },
                    bench_order,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<PlayerId> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalized_trims_and_dedups() {
        let selection = RosterSelection {
            squad_ids: ids(&["a", " a", "b", "", "c"]),
            starting_ids: ids(&["a", "a"]),
            captain_id: Some(" a ".into()),
            vice_id: Some("  ".into()),
            chip: Some(" ".into()),
            bench_order: None,
        }
        .normalized();

        assert_eq!(selection.squad_ids, ids(&["a", "b", "c"]));
        assert_eq!(selection.starting_ids, ids(&["a"]));
        assert_eq!(selection.captain_id.as_deref(), Some("a"));
        assert_eq!(selection.vice_id, None);
        assert_eq!(selection.chip, None);
    }

    #[test]
    fn test_slots_follow_explicit_bench_order_then_squad_order() {
        let selection = RosterSelection {
            squad_ids: ids(&["s1", "s2", "b1", "b2", "b3"]),
            starting_ids: ids(&["s1", "s2"]),
            captain_id: Some("s1".into()),
            vice_id: Some("s2".into()),
            chip: None,
            bench_order: Some(ids(&["b3", "s1", "unknown"])),
        };

        let slots = selection.to_slots();
        let order = |id: &str| slots.iter().find(|s| s.player_id == id).unwrap().bench_order;

        assert_eq!(order("s1"), None);
        assert_eq!(order("b3"), Some(1));
        assert_eq!(order("b1"), Some(2));
        assert_eq!(order("b2"), Some(3));

        let captain = slots.iter().find(|s| s.is_captain).unwrap();
        assert_eq!(captain.player_id, "s1");
        assert_eq!(captain.multiplier, 2);
        assert!(slots.iter().find(|s| s.player_id == "s2").unwrap().is_vice_captain);
    }

    #[test]
    fn test_bench_sorts_missing_order_last() {
        let roster = Roster::new(
            "m1",
            1,
            vec![
                RosterSlot::starter("s"),
                RosterSlot { bench_order: None, ..RosterSlot::bench("late", 0) },
                RosterSlot::bench("second", 2),
                RosterSlot::bench("first", 1),
            ],
        );

        let bench: Vec<&str> = roster.bench_in_order().iter().map(|s| s.player_id.as_str()).collect();
        assert_eq!(bench, vec!["first", "second", "late"]);
    }
}
