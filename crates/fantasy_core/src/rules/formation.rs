//! Formation bounds shared by lineup validation and auto-substitution.

use crate::models::Position;
use serde::{Deserialize, Serialize};

/// Inclusive count range for one position in the starting lineup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRange {
    pub min: usize,
    pub max: usize,
}

impl CountRange {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, count: usize) -> bool {
        (self.min..=self.max).contains(&count)
    }
}

/// Allowed starting counts per position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormationLimits {
    pub goalkeepers: CountRange,
    pub defenders: CountRange,
    pub midfielders: CountRange,
    pub forwards: CountRange,
}

impl Default for FormationLimits {
    fn default() -> Self {
        Self {
            goalkeepers: CountRange::new(1, 1),
            defenders: CountRange::new(2, 3),
            midfielders: CountRange::new(3, 5),
            forwards: CountRange::new(2, 3),
        }
    }
}

impl FormationLimits {
    pub fn range(&self, position: Position) -> CountRange {
        match position {
            Position::Goalkeeper => self.goalkeepers,
            Position::Defender => self.defenders,
            Position::Midfielder => self.midfielders,
            Position::Forward => self.forwards,
        }
    }

    /// Every position inside its range.
    pub fn is_complete(&self, counts: &PositionCounts) -> bool {
        Position::ALL.iter().all(|&pos| self.range(pos).contains(counts.get(pos)))
    }

    /// No position above its maximum. A partial lineup that fails this can
    /// never grow into a legal one.
    pub fn within_maximums(&self, counts: &PositionCounts) -> bool {
        Position::ALL.iter().all(|&pos| counts.get(pos) <= self.range(pos).max)
    }

    /// First position outside its range, checked GK, DEF, MID, FWD.
    pub fn first_out_of_range(&self, counts: &PositionCounts) -> Option<(Position, CountRange, usize)> {
        Position::ALL.iter().find_map(|&pos| {
            let range = self.range(pos);
            let count = counts.get(pos);
            (!range.contains(count)).then_some((pos, range, count))
        })
    }

    /// Sum of the minimums, i.e. the smallest legal lineup.
    pub fn minimum_size(&self) -> usize {
        Position::ALL.iter().map(|&pos| self.range(pos).min).sum()
    }

    /// Sum of the maximums, i.e. the largest legal lineup.
    pub fn maximum_size(&self) -> usize {
        Position::ALL.iter().map(|&pos| self.range(pos).max).sum()
    }
}

/// Per-position tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PositionCounts([usize; 4]);

impl PositionCounts {
    pub fn from_positions<I: IntoIterator<Item = Position>>(positions: I) -> Self {
        let mut counts = Self::default();
        for position in positions {
            counts.add(position);
        }
        counts
    }

    pub fn add(&mut self, position: Position) {
        self.0[position.index()] += 1;
    }

    pub fn with(mut self, position: Position) -> Self {
        self.add(position);
        self
    }

    pub fn get(&self, position: Position) -> usize {
        self.0[position.index()]
    }

    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }
}
