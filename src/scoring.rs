use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::model::{EntryMap, Match, Stage};

/// Outcome tier of one prediction against one result. Highest applicable
/// wins; tiers never stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreTier {
    Exact,
    GoalDifference,
    Winner,
    Miss,
}

/// Penalty-shootout scores for the additive PSO sub-score. `predicted` is
/// `None` when the member entered no shootout guess (scores as a miss).
#[derive(Debug, Clone, Copy)]
pub struct PsoInputs {
    pub predicted: Option<(u32, u32)>,
    pub actual: (u32, u32),
}

/// Full breakdown of one match score, pre- and post-multiplier, so the UI
/// layer can show how the total came about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub tier: ScoreTier,
    pub base_points: u32,
    pub multiplier: u32,
    pub pso_tier: Option<ScoreTier>,
    pub pso_points: u32,
    pub total: u32,
}

/// Score one match prediction against the actual result.
pub fn score(
    predicted_home: u32,
    predicted_away: u32,
    actual_home: u32,
    actual_away: u32,
    stage: Stage,
    config: &ScoringConfig,
    pso: Option<PsoInputs>,
) -> ScoreResult {
    let tier = classify(predicted_home, predicted_away, actual_home, actual_away);
    let points = config.tier_points(stage);
    let base_points = match tier {
        ScoreTier::Exact => points.exact,
        ScoreTier::GoalDifference => points.goal_difference,
        ScoreTier::Winner => points.winner,
        ScoreTier::Miss => 0,
    };
    let multiplier = config.multipliers.for_stage(stage);

    let (pso_tier, pso_points) = match (pso, config.pso) {
        (Some(inputs), Some(pso_values)) => {
            let tier = match inputs.predicted {
                Some((ph, pa)) => classify(ph, pa, inputs.actual.0, inputs.actual.1),
                None => ScoreTier::Miss,
            };
            let points = match tier {
                ScoreTier::Exact => pso_values.exact,
                ScoreTier::GoalDifference => pso_values.goal_difference,
                ScoreTier::Winner => pso_values.winner,
                ScoreTier::Miss => 0,
            };
            (Some(tier), points)
        }
        _ => (None, 0),
    };

    ScoreResult {
        tier,
        base_points,
        multiplier,
        pso_tier,
        pso_points,
        total: base_points * multiplier + pso_points,
    }
}

/// Exact score > same winner and margin > same winner > miss. A drawn
/// outcome always carries margin zero, so draws only hit the first two
/// tiers.
fn classify(ph: u32, pa: u32, ah: u32, aa: u32) -> ScoreTier {
    if ph == ah && pa == aa {
        return ScoreTier::Exact;
    }
    let predicted_outcome = ph.cmp(&pa);
    let actual_outcome = ah.cmp(&aa);
    if predicted_outcome != actual_outcome {
        return ScoreTier::Miss;
    }
    if ph as i64 - pa as i64 == ah as i64 - aa as i64 {
        ScoreTier::GoalDifference
    } else {
        ScoreTier::Winner
    }
}

/// One member's points over every completed match they predicted.
pub fn score_member_matches(
    member_entries: &EntryMap,
    matches: &[Match],
    config: &ScoringConfig,
) -> (Vec<(u32, ScoreResult)>, u32) {
    let mut rows = Vec::new();
    let mut total = 0;
    for m in matches {
        if !m.is_completed() {
            continue;
        }
        let (Some(actual_home), Some(actual_away)) = (m.home_score, m.away_score) else {
            continue;
        };
        let Some(entry) = member_entries.get(&m.number) else {
            continue;
        };
        let pso = match (m.pso_home, m.pso_away) {
            (Some(h), Some(a)) => Some(PsoInputs {
                predicted: entry.pso(),
                actual: (h, a),
            }),
            _ => None,
        };
        let result = score(
            entry.home,
            entry.away,
            actual_home,
            actual_away,
            m.stage,
            config,
            pso,
        );
        total += result.total;
        rows.push((m.number, result));
    }
    (rows, total)
}
