use std::collections::{BTreeMap, HashMap};

use crate::model::{GroupStanding, ThirdPlaceQualifier};
use crate::standings::order_standings;

/// How many third-placed teams advance to the round of 32.
pub const QUALIFYING_THIRDS: usize = 8;

/// Rank all twelve third-placed teams against each other.
///
/// Uses the same tie-break chain as the in-group table, minus head-to-head
/// (cross-group meetings do not exist at this point). Groups that are only
/// partially predicted still rank on whatever their three matches have
/// produced so far, so the ordering is always total.
pub fn rank_third_place_teams(
    standings: &BTreeMap<char, Vec<GroupStanding>>,
) -> Vec<ThirdPlaceQualifier> {
    let mut thirds: Vec<(char, GroupStanding)> = standings
        .iter()
        .filter_map(|(group, table)| table.get(2).map(|s| (*group, s.clone())))
        .collect();

    let mut rows: Vec<GroupStanding> = thirds.iter().map(|(_, s)| s.clone()).collect();
    order_standings(&mut rows, None);

    let rank: HashMap<_, _> = rows.iter().enumerate().map(|(i, r)| (r.team, i)).collect();
    thirds.sort_by_key(|(_, s)| rank.get(&s.team).copied().unwrap_or(usize::MAX));
    thirds
        .into_iter()
        .map(|(group, standing)| ThirdPlaceQualifier { group, standing })
        .collect()
}

/// Group letters of the best eight, the key ingredient for the Annex C
/// combination lookup.
pub fn qualifying_letters(ranked: &[ThirdPlaceQualifier]) -> Vec<char> {
    ranked
        .iter()
        .take(QUALIFYING_THIRDS)
        .map(|q| q.group)
        .collect()
}
