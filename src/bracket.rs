use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::annex_c::annex_c;
use crate::error::StructuralError;
use crate::model::{
    BracketResult, ConductRecord, EntryMap, Match, ResolvedPair, Slot, Stage, Team, TeamId,
    results_as_entries,
};
use crate::policy::resolve_outcome;
use crate::standings::calculate_group_standings;
use crate::third_place::{QUALIFYING_THIRDS, rank_third_place_teams};

/// Resolve the complete 48-team bracket from one entry set.
///
/// Runs the group tables, the cross-group third-place ranking and the
/// Annex C round-of-32 seed, then walks the knockout stages in order,
/// dereferencing every winner/loser slot against earlier resolved matches.
/// Matches an incomplete entry set cannot decide stay unresolved (`None`)
/// all the way down; only a malformed schedule or table aborts.
pub fn resolve_bracket(
    matches: &[Match],
    entries: &EntryMap,
    teams: &[Team],
    conduct: Option<&[ConductRecord]>,
) -> Result<BracketResult, StructuralError> {
    let groups = group_letters(teams)?;

    let mut group_standings = BTreeMap::new();
    for group in &groups {
        let table = calculate_group_standings(*group, matches, entries, teams, conduct);
        group_standings.insert(*group, table);
    }

    let third_place_ranking = rank_third_place_teams(&group_standings);
    let mut slots = annex_c()?.seed_round_of_32(&group_standings, &third_place_ranking)?;

    let by_number: HashMap<u32, &Match> = matches.iter().map(|m| (m.number, m)).collect();
    for m in matches {
        if m.stage == Stage::RoundOf32 && !slots.contains_key(&m.number) {
            return Err(StructuralError::UnseededRoundOf32(m.number));
        }
    }

    for stage in [
        Stage::RoundOf16,
        Stage::QuarterFinal,
        Stage::SemiFinal,
        Stage::ThirdPlace,
        Stage::Final,
    ] {
        let mut stage_matches: Vec<&Match> =
            matches.iter().filter(|m| m.stage == stage).collect();
        stage_matches.sort_by_key(|m| m.number);
        for m in stage_matches {
            let home = dereference(&m.home, m.number, &by_number, &slots, entries)?;
            let away = dereference(&m.away, m.number, &by_number, &slots, entries)?;
            slots.insert(m.number, ResolvedPair { home, away });
        }
    }

    let final_outcome = stage_outcome(matches, Stage::Final, &slots, entries);
    let third_outcome = stage_outcome(matches, Stage::ThirdPlace, &slots, entries);

    let mut qualified = BTreeSet::new();
    for table in group_standings.values() {
        for row in table.iter().take(2) {
            qualified.insert(row.team);
        }
    }
    for q in third_place_ranking.iter().take(QUALIFYING_THIRDS) {
        qualified.insert(q.standing.team);
    }
    log::debug!(
        "bracket resolved: {} knockout pairs, champion {:?}",
        slots.len(),
        final_outcome.winner()
    );

    Ok(BracketResult {
        group_standings,
        slots,
        third_place_ranking,
        qualified,
        champion: final_outcome.winner(),
        runner_up: final_outcome.loser(),
        third_place: third_outcome.winner(),
    })
}

/// Resolve the bracket as the tournament actually stands, by lowering the
/// completed results into the entry shape first.
pub fn resolve_actual_bracket(
    matches: &[Match],
    teams: &[Team],
    conduct: Option<&[ConductRecord]>,
) -> Result<BracketResult, StructuralError> {
    let entries = results_as_entries(matches);
    resolve_bracket(matches, &entries, teams, conduct)
}

fn group_letters(teams: &[Team]) -> Result<Vec<char>, StructuralError> {
    let mut counts: BTreeMap<char, usize> = BTreeMap::new();
    for t in teams {
        *counts.entry(t.group).or_insert(0) += 1;
    }
    if counts.len() != 12 || teams.len() != 48 {
        return Err(StructuralError::BadGroupCount {
            groups: counts.len(),
            teams: teams.len(),
        });
    }
    for (group, n) in &counts {
        if *n != 4 {
            return Err(StructuralError::BadGroup(*group));
        }
    }
    Ok(counts.into_keys().collect())
}

/// Resolve one side of a knockout match against the already-resolved map.
fn dereference(
    slot: &Slot,
    by: u32,
    by_number: &HashMap<u32, &Match>,
    slots: &BTreeMap<u32, ResolvedPair>,
    entries: &EntryMap,
) -> Result<Option<TeamId>, StructuralError> {
    let reference = match slot {
        Slot::Team(id) => return Ok(Some(*id)),
        Slot::WinnerOf(n) | Slot::LoserOf(n) => *n,
        Slot::GroupPosition(..) | Slot::BestThird(_) => {
            return Err(StructuralError::BadPlaceholder(format!(
                "match {by} carries a group-derived slot past the round of 32: {slot:?}"
            )));
        }
    };

    let Some(fed_by) = by_number.get(&reference) else {
        return Err(StructuralError::MissingReference { by, reference });
    };
    if reference >= by {
        return Err(StructuralError::ForwardReference { by, reference });
    }
    let Some(pair) = slots.get(&reference) else {
        return Err(StructuralError::MissingReference { by, reference });
    };

    let outcome = resolve_outcome(entries.get(&reference), fed_by.stage, pair.home, pair.away);
    Ok(match slot {
        Slot::LoserOf(_) => outcome.loser(),
        _ => outcome.winner(),
    })
}

fn stage_outcome(
    matches: &[Match],
    stage: Stage,
    slots: &BTreeMap<u32, ResolvedPair>,
    entries: &EntryMap,
) -> crate::policy::Outcome {
    let Some(m) = matches.iter().find(|m| m.stage == stage) else {
        return crate::policy::Outcome::Undetermined;
    };
    let Some(pair) = slots.get(&m.number) else {
        return crate::policy::Outcome::Undetermined;
    };
    resolve_outcome(entries.get(&m.number), stage, pair.home, pair.away)
}
