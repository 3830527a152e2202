use wc26_pool::{
    PsoInputs, RoundMultipliers, ScoreTier, ScoringConfig, Stage, TierPoints, score,
};

fn pool_config() -> ScoringConfig {
    ScoringConfig {
        group: TierPoints::new(100, 75, 50),
        knockout: TierPoints::new(200, 150, 100),
        multipliers: RoundMultipliers {
            round_of_16: 2,
            quarter_final: 3,
            semi_final: 4,
            third_place: 4,
            final_round: 8,
        },
        pso: Some(TierPoints::new(50, 25, 25)),
        bonus: Default::default(),
    }
}

#[test]
fn group_stage_tiers() {
    let config = pool_config();
    let exact = score(2, 1, 2, 1, Stage::Group, &config, None);
    assert_eq!(exact.tier, ScoreTier::Exact);
    assert_eq!(exact.total, 100);

    let diff = score(3, 2, 2, 1, Stage::Group, &config, None);
    assert_eq!(diff.tier, ScoreTier::GoalDifference);
    assert_eq!(diff.total, 75);

    let winner = score(1, 0, 3, 1, Stage::Group, &config, None);
    assert_eq!(winner.tier, ScoreTier::Winner);
    assert_eq!(winner.total, 50);

    let miss = score(1, 1, 2, 1, Stage::Group, &config, None);
    assert_eq!(miss.tier, ScoreTier::Miss);
    assert_eq!(miss.total, 0);
}

#[test]
fn tiers_never_stack() {
    // An exact hit is also a correct winner and margin; only the top tier pays.
    let result = score(2, 0, 2, 0, Stage::Group, &pool_config(), None);
    assert_eq!(result.tier, ScoreTier::Exact);
    assert_eq!(result.base_points, 100);
}

#[test]
fn knockout_multipliers_apply_on_top_of_base() {
    let config = pool_config();

    let final_exact = score(1, 0, 1, 0, Stage::Final, &config, None);
    assert_eq!(final_exact.base_points, 200);
    assert_eq!(final_exact.multiplier, 8);
    assert_eq!(final_exact.total, 1600);

    let r32 = score(1, 0, 1, 0, Stage::RoundOf32, &config, None);
    assert_eq!(r32.multiplier, 1);
    assert_eq!(r32.total, 200);

    let semi_winner = score(2, 1, 3, 0, Stage::SemiFinal, &config, None);
    assert_eq!(semi_winner.base_points, 100);
    assert_eq!(semi_winner.total, 400);
}

#[test]
fn pso_sub_score_is_additive_and_unmultiplied() {
    let config = pool_config();
    let pso = PsoInputs {
        predicted: Some((4, 2)),
        actual: (4, 2),
    };
    // Full-time prediction missed, shootout exact: the PSO tier pays even
    // though the base tier is a miss.
    let result = score(2, 1, 1, 1, Stage::Final, &config, Some(pso));
    assert_eq!(result.tier, ScoreTier::Miss);
    assert_eq!(result.pso_tier, Some(ScoreTier::Exact));
    assert_eq!(result.total, 50);

    // And it stays additive on top of a scoring full-time tier.
    let result = score(1, 1, 2, 2, Stage::Final, &config, Some(pso));
    assert_eq!(result.tier, ScoreTier::GoalDifference);
    assert_eq!(result.total, 150 * 8 + 50);

    let no_guess = PsoInputs {
        predicted: None,
        actual: (4, 2),
    };
    let result = score(0, 0, 2, 2, Stage::Final, &config, Some(no_guess));
    assert_eq!(result.pso_tier, Some(ScoreTier::Miss));
    assert_eq!(result.pso_points, 0);
}

#[test]
fn pso_scoring_can_be_disabled() {
    let mut config = pool_config();
    config.pso = None;
    let pso = PsoInputs {
        predicted: Some((4, 2)),
        actual: (4, 2),
    };
    let result = score(1, 1, 1, 1, Stage::Final, &config, Some(pso));
    assert_eq!(result.pso_tier, None);
    assert_eq!(result.pso_points, 0);
    assert_eq!(result.total, result.base_points * result.multiplier);
}
