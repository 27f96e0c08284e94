//! Shared fixtures for integration tests.

#![allow(dead_code)]

use fantasy_core::{Player, PlayerId, RosterSelection};
use serde_json::json;

/// Seventeen players over six clubs, positions written the way upstream feeds
/// spell them. The first ten form a legal 1-2-4-3 lineup.
pub fn squad() -> Vec<Player> {
    let raw = json!([
        {"id": "gk1", "position": "GK", "team": {"id": "lions"}},
        {"id": "def1", "position": "Defender", "team": {"id": "hawks"}},
        {"id": "def2", "position": "def", "team": {"id": "sharks"}},
        {"id": "mid1", "position": "MF", "team": {"id": "bulls"}},
        {"id": "mid2", "position": "Midfielder", "team": {"id": "eagles"}},
        {"id": "mid3", "position": "mid", "team": {"id": "wolves"}},
        {"id": "mid4", "position": "MID", "team": {"id": "lions"}},
        {"id": "fwd1", "position": "Striker", "team": {"id": "hawks"}},
        {"id": "fwd2", "position": "FWD", "team": {"id": "sharks"}},
        {"id": "lady1", "position": "forward", "is_lady": true, "team": {"short_name": "BUL"}},
        {"id": "gk2", "position": "keeper", "team": {"id": "eagles"}},
        {"id": "def3", "position": "DF", "team": {"id": "wolves"}},
        {"id": "mid5", "position": "mid", "team": {"id": "lions"}},
        {"id": "mid6", "position": "mid", "team": {"id": "hawks"}},
        {"id": "fwd3", "position": "FW", "team": {"id": "sharks"}},
        {"id": "lady2", "position": "Forward", "is_lady": true, "team": {"name": "Bul"}},
        {"id": "def4", "position": "defender", "team": {"id": "eagles"}}
    ]);
    serde_json::from_value(raw).expect("fixture squad parses")
}

pub fn ids(raw: &[&str]) -> Vec<PlayerId> {
    raw.iter().map(|id| id.to_string()).collect()
}

pub fn squad_ids() -> Vec<PlayerId> {
    squad().into_iter().map(|p| p.id).collect()
}

pub fn starting_ids() -> Vec<PlayerId> {
    squad_ids().into_iter().take(10).collect()
}

pub fn selection() -> RosterSelection {
    RosterSelection {
        squad_ids: squad_ids(),
        starting_ids: starting_ids(),
        captain_id: Some("mid1".into()),
        vice_id: Some("fwd1".into()),
        chip: None,
        bench_order: Some(ids(&["def3", "mid5", "fwd3", "gk2"])),
    }
}
