use super::{PlayerId, Position};
use serde::{Deserialize, Serialize};

/// Real-world team affiliation. Legacy rows sometimes carry only a team name,
/// so every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRef {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl TeamRef {
    pub fn with_id(id: impl Into<String>) -> Self {
        Self { id: Some(id.into()), short_name: None, name: None }
    }

    /// Key used for the per-team quota: the team id when present, else the
    /// lower-cased short name, else the lower-cased name.
    pub fn key(&self) -> Option<String> {
        if let Some(id) = self.id.as_deref().map(str::trim).filter(|id| !id.is_empty()) {
            return Some(id.to_string());
        }

        self.short_name
            .as_deref()
            .or(self.name.as_deref())
            .map(|name| name.trim().to_lowercase())
            .filter(|name| !name.is_empty())
    }
}

/// A selectable player. Immutable for the duration of a gameweek.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub is_lady: bool,
    #[serde(default)]
    pub team: TeamRef,
    /// Price in tenths of a currency unit.
    #[serde(default)]
    pub price: u32,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, position: Position, team: TeamRef) -> Self {
        let id = id.into();
        Self { name: id.clone(), id, position, is_lady: false, team, price: 0 }
    }

    pub fn lady(mut self) -> Self {
        self.is_lady = true;
        self
    }

    pub fn is_lady_forward(&self) -> bool {
        self.is_lady && self.position.is_forward()
    }

    pub fn team_key(&self) -> Option<String> {
        self.team.key()
    }

    pub fn meta(&self) -> PlayerMeta {
        PlayerMeta { position: self.position, is_lady: self.is_lady }
    }
}

/// The slice of player data the scoring engine needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMeta {
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub is_lady: bool,
}
