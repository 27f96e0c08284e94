use crate::models::{PlayerId, Position};
use std::fmt;

/// The first roster invariant a selection breaks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterViolation {
    SquadSize { expected: usize, found: usize },
    SquadGoalkeepers { expected: usize, found: usize },
    SquadLadyForwards { expected: usize, found: usize },
    SquadTeamLimit { team: String, max: usize, found: usize },
    StartingSize { expected: usize, found: usize },
    StarterNotInSquad(PlayerId),
    StartingTeamLimit { team: String, max: usize, found: usize },
    StartingFormation { position: Position, min: usize, max: usize, found: usize },
    StartingLadyForwards { expected: usize, found: usize },
    StartingLadyNonForward(PlayerId),
    MissingCaptain,
    MissingViceCaptain,
    CaptainIsViceCaptain,
    CaptainNotStarting(PlayerId),
    ViceCaptainNotStarting(PlayerId),
}

fn position_noun(position: Position) -> &'static str {
    match position {
        Position::Goalkeeper => "goalkeeper",
        Position::Defender => "defender",
        Position::Midfielder => "midfielder",
        Position::Forward => "forward",
    }
}

impl fmt::Display for RosterViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterViolation::SquadSize { expected, found } => {
                write!(f, "Squad must have exactly {} players (got {}).", expected, found)
            }
            RosterViolation::SquadGoalkeepers { expected, found } => {
                write!(f, "Squad must have exactly {} goalkeepers (got {}).", expected, found)
            }
            RosterViolation::SquadLadyForwards { expected, found } => {
                write!(f, "Squad must have exactly {} lady forwards (got {}).", expected, found)
            }
            RosterViolation::SquadTeamLimit { team, max, found } => write!(
                f,
                "Max {} players per team allowed in your full squad (found {} from {}).",
                max, found, team
            ),
            RosterViolation::StartingSize { expected, found } => {
                write!(f, "Must have exactly {} starting players (got {}).", expected, found)
            }
            RosterViolation::StarterNotInSquad(id) => {
                write!(f, "Starting player {} is not in the squad.", id)
            }
            RosterViolation::StartingTeamLimit { team, max, found } => write!(
                f,
                "Max {} players per team allowed in the starting lineup (found {} from {}).",
                max, found, team
            ),
            RosterViolation::StartingFormation { position, min, max, found } => {
                let noun = position_noun(*position);
                if min == max {
                    let plural = if *min == 1 { "" } else { "s" };
                    write!(
                        f,
                        "Starting lineup must have exactly {} {}{} (got {}).",
                        min, noun, plural, found
                    )
                } else {
                    write!(f, "Starting lineup must have {}-{} {}s (got {}).", min, max, noun, found)
                }
            }
            RosterViolation::StartingLadyForwards { expected, found } => write!(
                f,
                "Starting lineup must have exactly {} lady forward (got {}).",
                expected, found
            ),
            RosterViolation::StartingLadyNonForward(id) => {
                write!(f, "Starting lineup cannot include lady non-forward players ({}).", id)
            }
            RosterViolation::MissingCaptain => write!(f, "Captain is required."),
            RosterViolation::MissingViceCaptain => write!(f, "Vice-captain is required."),
            RosterViolation::CaptainIsViceCaptain => {
                write!(f, "Captain and vice-captain must be different players.")
            }
            RosterViolation::CaptainNotStarting(id) => {
                write!(f, "Captain {} must be in the starting lineup.", id)
            }
            RosterViolation::ViceCaptainNotStarting(id) => {
                write!(f, "Vice-captain {} must be in the starting lineup.", id)
            }
        }
    }
}

impl std::error::Error for RosterViolation {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formation_messages() {
        let gk = RosterViolation::StartingFormation {
            position: Position::Goalkeeper,
            min: 1,
            max: 1,
            found: 2,
        };
        assert_eq!(gk.to_string(), "Starting lineup must have exactly 1 goalkeeper (got 2).");

        let def = RosterViolation::StartingFormation {
            position: Position::Defender,
            min: 2,
            max: 3,
            found: 4,
        };
        assert_eq!(def.to_string(), "Starting lineup must have 2-3 defenders (got 4).");
    }

    #[test]
    fn test_squad_messages_include_counts() {
        let err = RosterViolation::SquadSize { expected: 17, found: 15 };
        assert_eq!(err.to_string(), "Squad must have exactly 17 players (got 15).");
    }
}
