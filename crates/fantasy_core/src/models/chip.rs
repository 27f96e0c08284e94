use super::{Gameweek, ManagerId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which chip, without any per-activation payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChipKind {
    BenchBoost,
    TripleCaptain,
    Wildcard,
    FreeHit,
}

impl ChipKind {
    pub const ALL: [ChipKind; 4] =
        [ChipKind::BenchBoost, ChipKind::TripleCaptain, ChipKind::Wildcard, ChipKind::FreeHit];

    /// Wire identifier (`bench_boost`, `triple_captain`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            ChipKind::BenchBoost => "bench_boost",
            ChipKind::TripleCaptain => "triple_captain",
            ChipKind::Wildcard => "wildcard",
            ChipKind::FreeHit => "free_hit",
        }
    }

    /// Wildcard and Free Hit make every transfer of their gameweek free.
    pub fn waives_transfer_cost(&self) -> bool {
        matches!(self, ChipKind::Wildcard | ChipKind::FreeHit)
    }
}

impl fmt::Display for ChipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChipKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .map(|c| if c == '-' || c == ' ' { '_' } else { c.to_ascii_lowercase() })
            .collect();

        match key.as_str() {
            "bench_boost" | "benchboost" => Ok(ChipKind::BenchBoost),
            "triple_captain" | "triplecaptain" => Ok(ChipKind::TripleCaptain),
            "wildcard" | "wild_card" => Ok(ChipKind::Wildcard),
            "free_hit" | "freehit" => Ok(ChipKind::FreeHit),
            _ => Err(format!("Invalid chip: {}", s)),
        }
    }
}

/// The chip in effect for one manager and gameweek. Stored once per roster.
///
/// `Wildcard` carries how many wildcard uses the manager has left for the
/// season after this one, so callers never re-derive it from history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Chip {
    #[default]
    None,
    BenchBoost,
    TripleCaptain,
    Wildcard {
        uses_remaining: u32,
    },
    FreeHit,
}

impl Chip {
    pub fn from_kind(kind: ChipKind, uses_remaining: u32) -> Self {
        match kind {
            ChipKind::BenchBoost => Chip::BenchBoost,
            ChipKind::TripleCaptain => Chip::TripleCaptain,
            ChipKind::Wildcard => Chip::Wildcard { uses_remaining },
            ChipKind::FreeHit => Chip::FreeHit,
        }
    }

    pub fn kind(&self) -> Option<ChipKind> {
        match self {
            Chip::None => None,
            Chip::BenchBoost => Some(ChipKind::BenchBoost),
            Chip::TripleCaptain => Some(ChipKind::TripleCaptain),
            Chip::Wildcard { .. } => Some(ChipKind::Wildcard),
            Chip::FreeHit => Some(ChipKind::FreeHit),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Chip::None)
    }

    pub fn is_bench_boost(&self) -> bool {
        matches!(self, Chip::BenchBoost)
    }

    pub fn is_triple_captain(&self) -> bool {
        matches!(self, Chip::TripleCaptain)
    }
}

/// Append-only record that a manager played a chip in a gameweek.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChipActivation {
    pub manager_id: ManagerId,
    pub chip: ChipKind,
    pub gameweek: Gameweek,
    pub activated_at: DateTime<Utc>,
}

impl ChipActivation {
    pub fn new(manager_id: impl Into<ManagerId>, chip: ChipKind, gameweek: Gameweek) -> Self {
        Self { manager_id: manager_id.into(), chip, gameweek, activated_at: Utc::now() }
    }
}
