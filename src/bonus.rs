use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::bracket::{resolve_actual_bracket, resolve_bracket};
use crate::config::ScoringConfig;
use crate::error::StructuralError;
use crate::model::{
    BracketResult, ConductRecord, EntryMap, Match, Stage, Team, TeamId, results_as_entries,
};
use crate::policy::resolve_outcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusCategory {
    /// A: per-group winner/runner-up ladder.
    GroupStandings,
    /// B: overlap of the predicted and actual qualified-32 sets.
    Qualifiers,
    /// C: an R32 fixture pairing the exact predicted two teams.
    BracketPairing,
    /// D: correct winner of a knockout match.
    KnockoutWinner,
    /// E: champion / runner-up / third place.
    Podium,
}

/// One itemized bonus award. Emitted as a discrete record per hit so the
/// application layer can show members where every point came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BonusAward {
    pub member_id: String,
    pub category: BonusCategory,
    pub group: Option<char>,
    pub match_number: Option<u32>,
    pub points: u32,
    pub description: String,
}

/// Resolve the member's bracket and diff it against the actual one across
/// the five bonus categories. Pass `actual` to skip re-resolving it when
/// scoring a whole pool. Unconfigured categories emit nothing.
pub fn calculate_all_bonus_points(
    member_id: &str,
    member_entries: &EntryMap,
    matches: &[Match],
    teams: &[Team],
    conduct: Option<&[ConductRecord]>,
    config: &ScoringConfig,
    actual: Option<&BracketResult>,
) -> Result<Vec<BonusAward>, StructuralError> {
    let predicted = resolve_bracket(matches, member_entries, teams, conduct)?;
    let owned_actual;
    let actual = match actual {
        Some(bracket) => bracket,
        None => {
            owned_actual = resolve_actual_bracket(matches, teams, conduct)?;
            &owned_actual
        }
    };
    let actual_entries = results_as_entries(matches);

    let names: HashMap<TeamId, &str> =
        teams.iter().map(|t| (t.id, t.name.as_str())).collect();

    let mut ctx = Context {
        member_id,
        awards: Vec::new(),
    };

    award_group_standings(&mut ctx, &predicted, actual, matches, &actual_entries, config, &names);
    award_qualifiers(&mut ctx, &predicted, actual, matches, &actual_entries, config);
    award_bracket_pairings(&mut ctx, &predicted, actual, matches, config, &names);
    award_knockout_winners(
        &mut ctx,
        &predicted,
        actual,
        matches,
        member_entries,
        &actual_entries,
        config,
        &names,
    );
    award_podium(&mut ctx, &predicted, actual, config, &names);

    Ok(ctx.awards)
}

struct Context<'a> {
    member_id: &'a str,
    awards: Vec<BonusAward>,
}

impl Context<'_> {
    fn push(
        &mut self,
        category: BonusCategory,
        group: Option<char>,
        match_number: Option<u32>,
        points: u32,
        description: String,
    ) {
        self.awards.push(BonusAward {
            member_id: self.member_id.to_string(),
            category,
            group,
            match_number,
            points,
            description,
        });
    }
}

fn team_name<'a>(names: &HashMap<TeamId, &'a str>, id: TeamId) -> &'a str {
    names.get(&id).copied().unwrap_or("?")
}

fn group_is_complete(group: char, matches: &[Match], actual_entries: &EntryMap) -> bool {
    let mut total = 0;
    for m in matches {
        if m.stage == Stage::Group && m.group == Some(group) {
            total += 1;
            if !actual_entries.contains_key(&m.number) {
                return false;
            }
        }
    }
    total == 6
}

/// Category A. Highest single matching rule per group; only judged once the
/// group's six actual matches are complete.
fn award_group_standings(
    ctx: &mut Context,
    predicted: &BracketResult,
    actual: &BracketResult,
    matches: &[Match],
    actual_entries: &EntryMap,
    config: &ScoringConfig,
    names: &HashMap<TeamId, &str>,
) {
    let b = &config.bonus;
    for (group, actual_table) in &actual.group_standings {
        if !group_is_complete(*group, matches, actual_entries) {
            continue;
        }
        let Some(predicted_table) = predicted.group_standings.get(group) else {
            continue;
        };
        let (Some(aw), Some(ar)) = (actual_table.first(), actual_table.get(1)) else {
            continue;
        };
        let (Some(pw), Some(pr)) = (predicted_table.first(), predicted_table.get(1)) else {
            continue;
        };
        let (aw, ar, pw, pr) = (aw.team, ar.team, pw.team, pr.team);

        let hit = if pw == aw && pr == ar {
            b.group_exact
                .map(|p| (p, format!("Group {group}: {} and {} in order", team_name(names, aw), team_name(names, ar))))
        } else if pw == ar && pr == aw {
            b.group_swapped
                .map(|p| (p, format!("Group {group}: both qualifiers, swapped order")))
        } else if pw == aw {
            b.group_winner
                .map(|p| (p, format!("Group {group}: winner {}", team_name(names, aw))))
        } else if pr == ar {
            b.group_runner_up
                .map(|p| (p, format!("Group {group}: runner-up {}", team_name(names, ar))))
        } else if pw == ar || pr == aw {
            b.group_one_misplaced
                .map(|p| (p, format!("Group {group}: one qualifier, wrong slot")))
        } else {
            None
        };

        if let Some((points, description)) = hit {
            ctx.push(BonusCategory::GroupStandings, Some(*group), None, points, description);
        }
    }
}

/// Category B. Once per pool run, only after every group match is complete.
fn award_qualifiers(
    ctx: &mut Context,
    predicted: &BracketResult,
    actual: &BracketResult,
    matches: &[Match],
    actual_entries: &EntryMap,
    config: &ScoringConfig,
) {
    let group_matches: Vec<&Match> =
        matches.iter().filter(|m| m.stage == Stage::Group).collect();
    if group_matches.is_empty()
        || group_matches.iter().any(|m| !actual_entries.contains_key(&m.number))
    {
        return;
    }

    let hits = predicted
        .qualified
        .intersection(&actual.qualified)
        .count();
    let total = actual.qualified.len();
    let b = &config.bonus;
    let tier = if hits == total {
        b.qualifiers_all
    } else if hits * 4 >= total * 3 {
        b.qualifiers_75
    } else if hits * 2 >= total {
        b.qualifiers_50
    } else {
        None
    };
    if let Some(points) = tier {
        ctx.push(
            BonusCategory::Qualifiers,
            None,
            None,
            points,
            format!("{hits} of {total} round-of-32 qualifiers predicted"),
        );
    }
}

/// Category C. Pairing identity per R32 fixture, regardless of side order or
/// who goes on to win.
fn award_bracket_pairings(
    ctx: &mut Context,
    predicted: &BracketResult,
    actual: &BracketResult,
    matches: &[Match],
    config: &ScoringConfig,
    names: &HashMap<TeamId, &str>,
) {
    let Some(points) = config.bonus.bracket_pairing else {
        return;
    };
    for m in matches {
        if m.stage != Stage::RoundOf32 {
            continue;
        }
        let (Some(p), Some(a)) = (predicted.slots.get(&m.number), actual.slots.get(&m.number))
        else {
            continue;
        };
        let (Some(ph), Some(pa)) = (p.home, p.away) else { continue };
        let (Some(ah), Some(aa)) = (a.home, a.away) else { continue };
        let same = (ph == ah && pa == aa) || (ph == aa && pa == ah);
        if same {
            ctx.push(
                BonusCategory::BracketPairing,
                None,
                Some(m.number),
                points,
                format!("Match {}: paired {} with {}", m.number, team_name(names, ah), team_name(names, aa)),
            );
        }
    }
}

/// Category D. The shared winner/loser policy applied to both brackets, then
/// compared by team identity.
#[allow(clippy::too_many_arguments)]
fn award_knockout_winners(
    ctx: &mut Context,
    predicted: &BracketResult,
    actual: &BracketResult,
    matches: &[Match],
    member_entries: &EntryMap,
    actual_entries: &EntryMap,
    config: &ScoringConfig,
    names: &HashMap<TeamId, &str>,
) {
    let Some(points) = config.bonus.knockout_winner else {
        return;
    };
    for m in matches {
        if !m.stage.is_knockout() {
            continue;
        }
        let (Some(p), Some(a)) = (predicted.slots.get(&m.number), actual.slots.get(&m.number))
        else {
            continue;
        };
        let predicted_winner =
            resolve_outcome(member_entries.get(&m.number), m.stage, p.home, p.away).winner();
        let actual_winner =
            resolve_outcome(actual_entries.get(&m.number), m.stage, a.home, a.away).winner();
        if let (Some(pw), Some(aw)) = (predicted_winner, actual_winner) {
            if pw == aw {
                ctx.push(
                    BonusCategory::KnockoutWinner,
                    None,
                    Some(m.number),
                    points,
                    format!("Match {}: winner {}", m.number, team_name(names, aw)),
                );
            }
        }
    }
}

/// Category E. Three independent podium awards.
fn award_podium(
    ctx: &mut Context,
    predicted: &BracketResult,
    actual: &BracketResult,
    config: &ScoringConfig,
    names: &HashMap<TeamId, &str>,
) {
    let b = &config.bonus;
    let spots = [
        (predicted.champion, actual.champion, b.champion, "Champion"),
        (predicted.runner_up, actual.runner_up, b.runner_up, "Runner-up"),
        (predicted.third_place, actual.third_place, b.third_place, "Third place"),
    ];
    for (p, a, value, label) in spots {
        let (Some(p), Some(a), Some(points)) = (p, a, value) else {
            continue;
        };
        if p == a {
            ctx.push(
                BonusCategory::Podium,
                None,
                None,
                points,
                format!("{label}: {}", team_name(names, a)),
            );
        }
    }
}
