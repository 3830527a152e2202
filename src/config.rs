use serde::{Deserialize, Serialize};

use crate::model::Stage;

/// Point values for the three outcome tiers of a single match prediction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TierPoints {
    pub exact: u32,
    pub goal_difference: u32,
    pub winner: u32,
}

impl TierPoints {
    pub fn new(exact: u32, goal_difference: u32, winner: u32) -> Self {
        TierPoints {
            exact,
            goal_difference,
            winner,
        }
    }
}

/// Per-round multipliers applied on top of the knockout tier points.
/// The round of 32 is always x1; only the five later rounds are tunable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RoundMultipliers {
    pub round_of_16: u32,
    pub quarter_final: u32,
    pub semi_final: u32,
    pub third_place: u32,
    pub final_round: u32,
}

impl RoundMultipliers {
    pub fn for_stage(&self, stage: Stage) -> u32 {
        match stage {
            Stage::Group | Stage::RoundOf32 => 1,
            Stage::RoundOf16 => self.round_of_16,
            Stage::QuarterFinal => self.quarter_final,
            Stage::SemiFinal => self.semi_final,
            Stage::ThirdPlace => self.third_place,
            Stage::Final => self.final_round,
        }
    }
}

/// Bonus category values. `None` means the pool disabled the category: it
/// pays nothing and emits no award, but is never an error.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BonusConfig {
    /// A: winner and runner-up correct, in order.
    pub group_exact: Option<u32>,
    /// A: winner correct, runner-up wrong.
    pub group_winner: Option<u32>,
    /// A: runner-up correct, winner wrong.
    pub group_runner_up: Option<u32>,
    /// A: both qualifiers correct but swapped.
    pub group_swapped: Option<u32>,
    /// A: exactly one of the two present, in the wrong slot.
    pub group_one_misplaced: Option<u32>,
    /// B: all 32 qualifiers predicted.
    pub qualifiers_all: Option<u32>,
    /// B: at least 24 of 32.
    pub qualifiers_75: Option<u32>,
    /// B: at least 16 of 32.
    pub qualifiers_50: Option<u32>,
    /// C: an R32 fixture pairs exactly the predicted two teams.
    pub bracket_pairing: Option<u32>,
    /// D: correct winner of a knockout match, score-independent.
    pub knockout_winner: Option<u32>,
    /// E: podium, each independently.
    pub champion: Option<u32>,
    pub runner_up: Option<u32>,
    pub third_place: Option<u32>,
}

/// Per-pool scoring knobs. Serde-friendly so pools can persist and edit it;
/// the engine only ever reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub group: TierPoints,
    pub knockout: TierPoints,
    pub multipliers: RoundMultipliers,
    /// PSO sub-scoring tiers; `None` disables the additive PSO score.
    pub pso: Option<TierPoints>,
    pub bonus: BonusConfig,
}

impl ScoringConfig {
    pub fn tier_points(&self, stage: Stage) -> TierPoints {
        if stage.is_knockout() {
            self.knockout
        } else {
            self.group
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        ScoringConfig {
            group: TierPoints::new(100, 75, 50),
            knockout: TierPoints::new(150, 100, 75),
            multipliers: RoundMultipliers {
                round_of_16: 2,
                quarter_final: 3,
                semi_final: 4,
                third_place: 4,
                final_round: 8,
            },
            pso: Some(TierPoints::new(50, 25, 25)),
            bonus: BonusConfig {
                group_exact: Some(150),
                group_winner: Some(75),
                group_runner_up: Some(50),
                group_swapped: Some(75),
                group_one_misplaced: Some(25),
                qualifiers_all: Some(1000),
                qualifiers_75: Some(500),
                qualifiers_50: Some(250),
                bracket_pairing: Some(50),
                knockout_winner: Some(50),
                champion: Some(500),
                runner_up: Some(250),
                third_place: Some(125),
            },
        }
    }
}
