//! Shared fixtures for unit tests: a legal 17-player squad spread over six
//! teams, with `gk1` captain and `def1` vice-captain.

use crate::models::{
    Player, PlayerId, PlayerMeta, Position, Roster, RosterSelection, RosterSlot, StatLine, TeamRef,
};
use std::collections::HashMap;

use Position::*;

/// `(id, position, is_lady)` in squad order. First ten start.
pub(crate) const SQUAD: [(&str, Position, bool); 17] = [
    ("gk1", Goalkeeper, false),
    ("def1", Defender, false),
    ("def2", Defender, false),
    ("mid1", Midfielder, false),
    ("mid2", Midfielder, false),
    ("mid3", Midfielder, false),
    ("mid4", Midfielder, false),
    ("fwd1", Forward, false),
    ("fwd2", Forward, false),
    ("lady1", Forward, true),
    ("gk2", Goalkeeper, false),
    ("def3", Defender, false),
    ("mid5", Midfielder, false),
    ("mid6", Midfielder, false),
    ("fwd3", Forward, false),
    ("lady2", Forward, true),
    ("def4", Defender, false),
];

pub(crate) const STARTING: usize = 10;

pub(crate) fn squad() -> Vec<Player> {
    SQUAD
        .iter()
        .enumerate()
        .map(|(i, &(id, position, is_lady))| {
            let player = Player::new(id, position, TeamRef::with_id(format!("t{}", i % 6 + 1)));
            if is_lady {
                player.lady()
            } else {
                player
            }
        })
        .collect()
}

pub(crate) fn squad_ids() -> Vec<PlayerId> {
    SQUAD.iter().map(|(id, _, _)| id.to_string()).collect()
}

pub(crate) fn starting_ids() -> Vec<PlayerId> {
    squad_ids().into_iter().take(STARTING).collect()
}

pub(crate) fn selection() -> RosterSelection {
    RosterSelection {
        squad_ids: squad_ids(),
        starting_ids: starting_ids(),
        captain_id: Some("gk1".into()),
        vice_id: Some("def1".into()),
        chip: None,
        bench_order: None,
    }
}

pub(crate) fn roster(manager_id: &str, gameweek: u32) -> Roster {
    Roster::new(manager_id, gameweek, selection().to_slots())
}

/// Roster with no vice-captain flagged.
pub(crate) fn roster_without_vice(manager_id: &str, gameweek: u32) -> Roster {
    let mut roster = roster(manager_id, gameweek);
    for slot in roster.slots.iter_mut() {
        slot.is_vice_captain = false;
    }
    roster
}

pub(crate) fn meta() -> HashMap<PlayerId, PlayerMeta> {
    squad().into_iter().map(|p| (p.id.clone(), p.meta())).collect()
}

/// Every squad player played and scored `points`.
pub(crate) fn all_played(points: i32) -> HashMap<PlayerId, StatLine> {
    squad_ids().into_iter().map(|id| (id, StatLine::played(points))).collect()
}

pub(crate) fn set(stats: &mut HashMap<PlayerId, StatLine>, id: &str, line: StatLine) {
    stats.insert(id.to_string(), line);
}

pub(crate) fn slot<'a>(roster: &'a mut Roster, id: &str) -> &'a mut RosterSlot {
    roster
        .slots
        .iter_mut()
        .find(|slot| slot.player_id == id)
        .unwrap_or_else(|| panic!("no slot for {}", id))
}
