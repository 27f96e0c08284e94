use crate::models::{PlayerId, Roster, StatLine};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Who received the captain multiplier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Captaincy {
    Captain,
    Vice,
    #[default]
    None,
}

impl fmt::Display for Captaincy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Captaincy::Captain => "captain",
            Captaincy::Vice => "vice",
            Captaincy::None => "none",
        };
        write!(f, "{}", s)
    }
}

/// Captain if counted and played, else the vice under the same conditions.
/// A substitute never inherits the armband.
pub(crate) fn resolve_captain<'r>(
    roster: &'r Roster,
    counted: &HashSet<&str>,
    stats: &HashMap<PlayerId, StatLine>,
) -> (Captaincy, Option<&'r str>) {
    let eligible = |id: &str| counted.contains(id) && stats.get(id).map_or(false, |s| s.did_play);

    if let Some(captain) = roster.captain().filter(|slot| eligible(&slot.player_id)) {
        return (Captaincy::Captain, Some(captain.player_id.as_str()));
    }
    if let Some(vice) = roster.vice_captain().filter(|slot| eligible(&slot.player_id)) {
        return (Captaincy::Vice, Some(vice.player_id.as_str()));
    }
    (Captaincy::None, None)
}
