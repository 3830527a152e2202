use std::collections::HashMap;

use crate::model::{
    ConductRecord, EntryMap, GroupStanding, Match, Slot, Stage, Team, TeamId,
};

/// Decided head-to-head results between group opponents, used only when
/// exactly two teams tie on points, goal difference and goals scored.
type HeadToHead = HashMap<(TeamId, TeamId), TeamId>;

/// Compute one group's table from whatever entries exist for its matches.
///
/// Matches without a usable score simply contribute nothing, so the same
/// call serves both a finished group and a "standings so far" view over a
/// half-filled prediction set. Positions 1–2 qualify outright, position 3
/// goes to the cross-group third-place ranking, position 4 is out.
pub fn calculate_group_standings(
    group: char,
    matches: &[Match],
    entries: &EntryMap,
    teams: &[Team],
    conduct: Option<&[ConductRecord]>,
) -> Vec<GroupStanding> {
    let mut rows: HashMap<TeamId, GroupStanding> = teams
        .iter()
        .filter(|t| t.group == group)
        .map(|t| (t.id, GroupStanding::blank(t.id, t.rating)))
        .collect();

    let conduct_by_key: HashMap<(u32, TeamId), i32> = conduct
        .unwrap_or(&[])
        .iter()
        .map(|c| ((c.match_number, c.team), c.deduction()))
        .collect();

    let mut head_to_head = HeadToHead::new();

    for m in matches {
        if m.stage != Stage::Group || m.group != Some(group) {
            continue;
        }
        let (Slot::Team(home), Slot::Team(away)) = (&m.home, &m.away) else {
            continue;
        };
        let Some(entry) = entries.get(&m.number) else {
            continue;
        };
        if !rows.contains_key(home) || !rows.contains_key(away) {
            continue;
        }

        if let Some(row) = rows.get_mut(home) {
            tally(
                row,
                entry.home,
                entry.away,
                conduct_by_key.get(&(m.number, *home)).copied(),
            );
        }
        if let Some(row) = rows.get_mut(away) {
            tally(
                row,
                entry.away,
                entry.home,
                conduct_by_key.get(&(m.number, *away)).copied(),
            );
        }

        if entry.home > entry.away {
            head_to_head.insert(ordered_pair(*home, *away), *home);
        } else if entry.away > entry.home {
            head_to_head.insert(ordered_pair(*home, *away), *away);
        }
    }

    let mut table: Vec<GroupStanding> = rows.into_values().collect();
    order_standings(&mut table, Some(&head_to_head));
    table
}

fn tally(row: &mut GroupStanding, scored: u32, conceded: u32, deduction: Option<i32>) {
    row.played += 1;
    row.goals_for += scored;
    row.goals_against += conceded;
    row.goal_difference = row.goals_for as i32 - row.goals_against as i32;
    if scored > conceded {
        row.won += 1;
        row.points += 3;
    } else if scored == conceded {
        row.drawn += 1;
        row.points += 1;
    } else {
        row.lost += 1;
    }
    if let Some(d) = deduction {
        row.fair_play += d;
    }
}

fn ordered_pair(a: TeamId, b: TeamId) -> (TeamId, TeamId) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Shared tie-break ordering for both the in-group table and the cross-group
/// third-place ranking: points, goal difference, goals scored, head-to-head
/// (two-way ties only), fair-play deduction, strength rating. Team id is the
/// last resort so the order is total no matter what.
pub(crate) fn order_standings(table: &mut [GroupStanding], head_to_head: Option<&HeadToHead>) {
    table.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then(b.goal_difference.cmp(&a.goal_difference))
            .then(b.goals_for.cmp(&a.goals_for))
            .then(b.fair_play.cmp(&a.fair_play))
            .then(b.rating.cmp(&a.rating))
            .then(a.team.cmp(&b.team))
    });

    let Some(h2h) = head_to_head else {
        return;
    };

    // Head-to-head outranks fair-play, but only for a tie of exactly two
    // teams on the first three keys, and only if their meeting was decided.
    let mut start = 0;
    while start < table.len() {
        let mut end = start + 1;
        while end < table.len() && same_primary(&table[start], &table[end]) {
            end += 1;
        }
        if end - start == 2 {
            let key = ordered_pair(table[start].team, table[start + 1].team);
            if let Some(winner) = h2h.get(&key) {
                if *winner == table[start + 1].team {
                    table.swap(start, start + 1);
                }
            }
        }
        start = end;
    }
}

fn same_primary(a: &GroupStanding, b: &GroupStanding) -> bool {
    a.points == b.points
        && a.goal_difference == b.goal_difference
        && a.goals_for == b.goals_for
}
