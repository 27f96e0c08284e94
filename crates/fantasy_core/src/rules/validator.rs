//! Squad and starting-lineup legality.
//!
//! Checks run in a fixed order and stop at the first failure, so the same
//! selection always produces the same message.

use super::formation::PositionCounts;
use super::RosterViolation;
use crate::config::RulesConfig;
use crate::models::{Player, PlayerId};
use std::collections::HashSet;

/// Stateless roster validator bound to a rule set.
#[derive(Debug, Clone, Copy)]
pub struct RosterValidator<'a> {
    rules: &'a RulesConfig,
}

/// Player counts per real-team key, in first-seen order. Players without any
/// team key are not counted.
fn team_counts<'p>(players: impl Iterator<Item = &'p Player>) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for player in players {
        let Some(key) = player.team_key() else {
            continue;
        };
        match counts.iter_mut().find(|(team, _)| *team == key) {
            Some((_, count)) => *count += 1,
            None => counts.push((key, 1)),
        }
    }
    counts
}

impl<'a> RosterValidator<'a> {
    pub fn new(rules: &'a RulesConfig) -> Self {
        Self { rules }
    }

    /// Validate a full selection. `squad` holds the resolved players.
    pub fn validate(
        &self,
        squad: &[Player],
        starting_ids: &[PlayerId],
        captain_id: Option<&str>,
        vice_id: Option<&str>,
    ) -> Result<(), RosterViolation> {
        self.validate_squad(squad)?;
        let starters = self.validate_starting(squad, starting_ids)?;
        Self::validate_captaincy(&starters, captain_id, vice_id)
    }

    /// Squad-wide rules: size, goalkeepers, lady forwards, per-team quota.
    pub fn validate_squad(&self, squad: &[Player]) -> Result<(), RosterViolation> {
        let rules = self.rules;

        if squad.len() != rules.squad_size {
            return Err(RosterViolation::SquadSize {
                expected: rules.squad_size,
                found: squad.len(),
            });
        }

        let goalkeepers = squad.iter().filter(|p| p.position.is_goalkeeper()).count();
        if goalkeepers != rules.squad_goalkeepers {
            return Err(RosterViolation::SquadGoalkeepers {
                expected: rules.squad_goalkeepers,
                found: goalkeepers,
            });
        }

        let lady_forwards = squad.iter().filter(|p| p.is_lady_forward()).count();
        if lady_forwards != rules.squad_lady_forwards {
            return Err(RosterViolation::SquadLadyForwards {
                expected: rules.squad_lady_forwards,
                found: lady_forwards,
            });
        }

        if let Some((team, found)) =
            team_counts(squad.iter()).into_iter().find(|(_, count)| *count > rules.max_per_team)
        {
            return Err(RosterViolation::SquadTeamLimit { team, max: rules.max_per_team, found });
        }

        Ok(())
    }

    /// Lineup rules. Returns the starting players, in squad order.
    fn validate_starting<'s>(
        &self,
        squad: &'s [Player],
        starting_ids: &[PlayerId],
    ) -> Result<Vec<&'s Player>, RosterViolation> {
        let rules = self.rules;

        let starting_set: HashSet<&str> = starting_ids.iter().map(String::as_str).collect();
        if starting_set.len() != rules.starting_size {
            return Err(RosterViolation::StartingSize {
                expected: rules.starting_size,
                found: starting_set.len(),
            });
        }

        if let Some(missing) = starting_ids.iter().find(|id| !squad.iter().any(|p| &p.id == *id)) {
            return Err(RosterViolation::StarterNotInSquad(missing.clone()));
        }

        let starters: Vec<&Player> =
            squad.iter().filter(|p| starting_set.contains(p.id.as_str())).collect();

        if let Some((team, found)) = team_counts(starters.iter().copied())
            .into_iter()
            .find(|(_, count)| *count > rules.max_per_team)
        {
            return Err(RosterViolation::StartingTeamLimit {
                team,
                max: rules.max_per_team,
                found,
            });
        }

        let counts = PositionCounts::from_positions(starters.iter().map(|p| p.position));
        if let Some((position, range, found)) = rules.formation.first_out_of_range(&counts) {
            return Err(RosterViolation::StartingFormation {
                position,
                min: range.min,
                max: range.max,
                found,
            });
        }

        let lady_forwards = starters.iter().filter(|p| p.is_lady_forward()).count();
        if lady_forwards != rules.starting_lady_forwards {
            return Err(RosterViolation::StartingLadyForwards {
                expected: rules.starting_lady_forwards,
                found: lady_forwards,
            });
        }

        if let Some(lady) = starters.iter().find(|p| p.is_lady && !p.position.is_forward()) {
            return Err(RosterViolation::StartingLadyNonForward(lady.id.clone()));
        }

        Ok(starters)
    }

    fn validate_captaincy(
        starters: &[&Player],
        captain_id: Option<&str>,
        vice_id: Option<&str>,
    ) -> Result<(), RosterViolation> {
        let captain = captain_id.ok_or(RosterViolation::MissingCaptain)?;
        let vice = vice_id.ok_or(RosterViolation::MissingViceCaptain)?;

        if captain == vice {
            return Err(RosterViolation::CaptainIsViceCaptain);
        }

        let starts = |id: &str| starters.iter().any(|p| p.id == id);
        if !starts(captain) {
            return Err(RosterViolation::CaptainNotStarting(captain.to_string()));
        }
        if !starts(vice) {
            return Err(RosterViolation::ViceCaptainNotStarting(vice.to_string()));
        }

        Ok(())
    }
}

/// Validate against the standard league rules.
pub fn validate_roster(
    squad: &[Player],
    starting_ids: &[PlayerId],
    captain_id: Option<&str>,
    vice_id: Option<&str>,
) -> Result<(), RosterViolation> {
    let rules = RulesConfig::default();
    RosterValidator::new(&rules).validate(squad, starting_ids, captain_id, vice_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Position, TeamRef};
    use crate::test_support::{squad, starting_ids};

    fn validate(squad: &[Player], starting: &[PlayerId]) -> Result<(), RosterViolation> {
        validate_roster(squad, starting, Some("gk1"), Some("def1"))
    }

    fn player_mut<'a>(squad: &'a mut [Player], id: &str) -> &'a mut Player {
        squad.iter_mut().find(|p| p.id == id).unwrap()
    }

    #[test]
    fn test_standard_squad_is_legal() {
        assert_eq!(validate(&squad(), &starting_ids()), Ok(()));
    }

    #[test]
    fn test_squad_size() {
        let mut players = squad();
        players.pop();
        assert_eq!(
            validate(&players, &starting_ids()),
            Err(RosterViolation::SquadSize { expected: 17, found: 16 })
        );
    }

    #[test]
    fn test_third_goalkeeper_rejected() {
        let mut players = squad();
        player_mut(&mut players, "mid6").position = Position::Goalkeeper;
        assert_eq!(
            validate(&players, &starting_ids()),
            Err(RosterViolation::SquadGoalkeepers { expected: 2, found: 3 })
        );
    }

    #[test]
    fn test_lady_forward_quota() {
        let mut players = squad();
        player_mut(&mut players, "lady2").is_lady = false;
        assert_eq!(
            validate(&players, &starting_ids()),
            Err(RosterViolation::SquadLadyForwards { expected: 2, found: 1 })
        );
    }

    #[test]
    fn test_fourth_player_from_one_team_in_squad() {
        let mut players = squad();
        player_mut(&mut players, "def4").team = TeamRef::with_id("t1");
        assert_eq!(
            validate(&players, &starting_ids()),
            Err(RosterViolation::SquadTeamLimit { team: "t1".into(), max: 3, found: 4 })
        );
    }

    #[test]
    fn test_team_key_falls_back_to_short_name() {
        let mut players = squad();
        for id in ["gk1", "def1", "def2", "mid1"] {
            player_mut(&mut players, id).team =
                TeamRef { id: None, short_name: Some(" ABC ".into()), name: None };
        }
        assert_eq!(
            validate(&players, &starting_ids()),
            Err(RosterViolation::SquadTeamLimit { team: "abc".into(), max: 3, found: 4 })
        );
    }

    #[test]
    fn test_players_without_team_are_not_counted() {
        let mut players = squad();
        for player in players.iter_mut() {
            player.team = TeamRef::default();
        }
        assert_eq!(validate(&players, &starting_ids()), Ok(()));
    }

    #[test]
    fn test_starting_size_counts_unique_ids() {
        let mut starting = starting_ids();
        starting.pop();
        starting.push("gk1".into());
        assert_eq!(
            validate(&squad(), &starting),
            Err(RosterViolation::StartingSize { expected: 10, found: 9 })
        );
    }

    #[test]
    fn test_starter_must_be_in_squad() {
        let mut starting = starting_ids();
        starting[3] = "stranger".into();
        assert_eq!(
            validate(&squad(), &starting),
            Err(RosterViolation::StarterNotInSquad("stranger".into()))
        );
    }

    #[test]
    fn test_starting_team_limit() {
        // Only reachable when the squad check is skipped or looser.
        let mut players = squad();
        for id in ["gk1", "def1", "def2", "mid1"] {
            player_mut(&mut players, id).team = TeamRef::with_id("t9");
        }
        let rules = RulesConfig::default();
        let validator = RosterValidator::new(&rules);
        assert_eq!(
            validator.validate_starting(&players, &starting_ids()).map(|s| s.len()),
            Err(RosterViolation::StartingTeamLimit { team: "t9".into(), max: 3, found: 4 })
        );
    }

    #[test]
    fn test_fourth_starting_defender_rejected() {
        let mut starting = starting_ids();
        starting.retain(|id| id != "mid4" && id != "mid3");
        starting.push("def3".into());
        starting.push("def4".into());
        assert_eq!(
            validate(&squad(), &starting),
            Err(RosterViolation::StartingFormation {
                position: Position::Defender,
                min: 2,
                max: 3,
                found: 4
            })
        );
    }

    #[test]
    fn test_two_starting_goalkeepers_rejected() {
        let mut starting = starting_ids();
        starting.retain(|id| id != "mid4");
        starting.push("gk2".into());
        assert_eq!(
            validate(&squad(), &starting),
            Err(RosterViolation::StartingFormation {
                position: Position::Goalkeeper,
                min: 1,
                max: 1,
                found: 2
            })
        );
    }

    #[test]
    fn test_second_starting_lady_forward_rejected() {
        let mut starting = starting_ids();
        starting.retain(|id| id != "fwd2");
        starting.push("lady2".into());
        assert_eq!(
            validate(&squad(), &starting),
            Err(RosterViolation::StartingLadyForwards { expected: 1, found: 2 })
        );
    }

    #[test]
    fn test_lady_non_forward_cannot_start() {
        let mut players = squad();
        player_mut(&mut players, "mid1").is_lady = true;
        assert_eq!(
            validate(&players, &starting_ids()),
            Err(RosterViolation::StartingLadyNonForward("mid1".into()))
        );
    }

    #[test]
    fn test_captaincy_rules_in_order() {
        let players = squad();
        let starting = starting_ids();

        assert_eq!(
            validate_roster(&players, &starting, None, Some("def1")),
            Err(RosterViolation::MissingCaptain)
        );
        assert_eq!(
            validate_roster(&players, &starting, Some("gk1"), None),
            Err(RosterViolation::MissingViceCaptain)
        );
        assert_eq!(
            validate_roster(&players, &starting, Some("gk1"), Some("gk1")),
            Err(RosterViolation::CaptainIsViceCaptain)
        );
        assert_eq!(
            validate_roster(&players, &starting, Some("gk2"), Some("def1")),
            Err(RosterViolation::CaptainNotStarting("gk2".into()))
        );
        assert_eq!(
            validate_roster(&players, &starting, Some("gk1"), Some("mid5")),
            Err(RosterViolation::ViceCaptainNotStarting("mid5".into()))
        );
    }

    #[test]
    fn test_first_failure_wins() {
        let mut players = squad();
        player_mut(&mut players, "mid6").position = Position::Goalkeeper;
        // Broken goalkeeper quota is reported even though the captain is missing too.
        assert!(matches!(
            validate_roster(&players, &starting_ids(), None, None),
            Err(RosterViolation::SquadGoalkeepers { .. })
        ));
    }
}
