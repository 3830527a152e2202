use serde::{Deserialize, Serialize};

use crate::model::{ScoreEntry, Stage, TeamId};

/// What finally separated the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionBasis {
    Score,
    PenaltyShootout,
    ExplicitPick,
}

/// Result of applying the winner/loser policy to one match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Decided {
        winner: TeamId,
        loser: TeamId,
        basis: DecisionBasis,
    },
    /// No winner can be derived yet. Legitimate, never an error; every
    /// downstream dependent must carry it as unresolved rather than guess.
    Undetermined,
}

impl Outcome {
    pub fn winner(self) -> Option<TeamId> {
        match self {
            Outcome::Decided { winner, .. } => Some(winner),
            Outcome::Undetermined => None,
        }
    }

    pub fn loser(self) -> Option<TeamId> {
        match self {
            Outcome::Decided { loser, .. } => Some(loser),
            Outcome::Undetermined => None,
        }
    }
}

/// The single winner/loser decision table, shared by the knockout cascade,
/// the bonus diff and the application layer's advancement writer.
///
/// Order of rules: unresolved side → undetermined; non-draw score decides;
/// a drawn score in a draw-eliminating round falls to an unequal PSO score,
/// then to an explicit winner pick, then stays undetermined. A group-stage
/// draw is terminal and never yields a winner.
pub fn resolve_outcome(
    entry: Option<&ScoreEntry>,
    stage: Stage,
    home: Option<TeamId>,
    away: Option<TeamId>,
) -> Outcome {
    let (Some(home), Some(away)) = (home, away) else {
        return Outcome::Undetermined;
    };
    let Some(entry) = entry else {
        return Outcome::Undetermined;
    };

    if !entry.is_draw() {
        let (winner, loser) = if entry.home > entry.away {
            (home, away)
        } else {
            (away, home)
        };
        return Outcome::Decided {
            winner,
            loser,
            basis: DecisionBasis::Score,
        };
    }

    if !stage.eliminates_draws() {
        return Outcome::Undetermined;
    }

    if let Some((pso_home, pso_away)) = entry.pso() {
        if pso_home != pso_away {
            let (winner, loser) = if pso_home > pso_away {
                (home, away)
            } else {
                (away, home)
            };
            return Outcome::Decided {
                winner,
                loser,
                basis: DecisionBasis::PenaltyShootout,
            };
        }
    }

    if let Some(pick) = entry.winner_pick {
        if pick == home {
            return Outcome::Decided {
                winner: home,
                loser: away,
                basis: DecisionBasis::ExplicitPick,
            };
        }
        if pick == away {
            return Outcome::Decided {
                winner: away,
                loser: home,
                basis: DecisionBasis::ExplicitPick,
            };
        }
        // A pick naming neither side is meaningless; fall through.
    }

    Outcome::Undetermined
}
