//! Player positions and the single normalization seam for upstream position text.

use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Fantasy position. Upstream data arrives as free-form text and is folded
/// into this enum exactly once, when the record is deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

static POSITION_SYNONYMS: Lazy<HashMap<&'static str, Position>> = Lazy::new(|| {
    let mut table = HashMap::new();
    for key in ["gk", "gkp", "goalkeeper", "keeper"] {
        table.insert(key, Position::Goalkeeper);
    }
    for key in ["def", "defender", "df"] {
        table.insert(key, Position::Defender);
    }
    for key in ["mid", "midfielder", "mf"] {
        table.insert(key, Position::Midfielder);
    }
    for key in ["fwd", "forward", "fw", "striker"] {
        table.insert(key, Position::Forward);
    }
    table
});

impl Position {
    pub const ALL: [Position; 4] =
        [Position::Goalkeeper, Position::Defender, Position::Midfielder, Position::Forward];

    /// Case-insensitive synonym lookup. `None` for unrecognized text.
    pub fn recognize(raw: &str) -> Option<Position> {
        let key = raw.trim().to_lowercase();
        POSITION_SYNONYMS.get(key.as_str()).copied()
    }

    /// Lenient normalization: unrecognized or empty text becomes Midfielder
    /// instead of rejecting the record.
    pub fn normalize(raw: &str) -> Position {
        match Self::recognize(raw) {
            Some(position) => position,
            None => {
                log::debug!("Unrecognized position {:?}, defaulting to MID", raw);
                Position::Midfielder
            }
        }
    }

    pub fn is_goalkeeper(&self) -> bool {
        matches!(self, Position::Goalkeeper)
    }

    pub fn is_forward(&self) -> bool {
        matches!(self, Position::Forward)
    }

    /// Short code used on the wire and in scoring tables.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "GK",
            Position::Defender => "DEF",
            Position::Midfielder => "MID",
            Position::Forward => "FWD",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "Goalkeeper",
            Position::Defender => "Defender",
            Position::Midfielder => "Midfielder",
            Position::Forward => "Forward",
        }
    }

    /// Dense index for fixed-size counters.
    pub(crate) fn index(&self) -> usize {
        match self {
            Position::Goalkeeper => 0,
            Position::Defender => 1,
            Position::Midfielder => 2,
            Position::Forward => 3,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::Midfielder
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

impl FromStr for Position {
    type Err = String;

    /// Strict parse. Use [`Position::normalize`] for dirty upstream data.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::recognize(s).ok_or_else(|| format!("Invalid position: {}", s))
    }
}

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.abbreviation())
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(Position::normalize(raw.as_deref().unwrap_or("")))
    }
}
