use std::collections::HashMap;

use wc26_pool::{
    EntryMap, Match, ScoreEntry, Slot, Stage, StructuralError, Team, TeamId, resolve_bracket,
    world_cup_2026,
};

/// 48 teams, ids 1..=48, four per group, globally descending ratings so every
/// tie-break bottoms out deterministically.
fn teams() -> Vec<Team> {
    let mut out = Vec::new();
    let mut id = 0u32;
    for group in 'A'..='L' {
        for seed in 0..4 {
            id += 1;
            out.push(Team {
                id: TeamId(id),
                name: format!("Team {group}{seed}"),
                code: format!("T{id:02}"),
                group,
                rating: 1000 - id,
                badge: None,
            });
        }
    }
    out
}

/// In-group seat (0..4) of every team, from the team list order.
fn seats(teams: &[Team]) -> HashMap<TeamId, usize> {
    let mut counts: HashMap<char, usize> = HashMap::new();
    let mut out = HashMap::new();
    for t in teams {
        let seat = counts.entry(t.group).or_insert(0);
        out.insert(t.id, *seat);
        *seat += 1;
    }
    out
}

/// Seed-order results: the lower seat always wins 1-0 in the groups, the
/// home side always wins 1-0 in the knockouts. Every group finishes
/// 9/6/3/0 points, so standings follow the seat order exactly.
fn full_entries(matches: &[Match], teams: &[Team]) -> EntryMap {
    let seats = seats(teams);
    let mut entries = EntryMap::new();
    for m in matches {
        match m.stage {
            Stage::Group => {
                let (Slot::Team(home), Slot::Team(away)) = (&m.home, &m.away) else {
                    panic!("group matches carry concrete teams");
                };
                if seats[home] < seats[away] {
                    entries.insert(m.number, ScoreEntry::new(1, 0));
                } else {
                    entries.insert(m.number, ScoreEntry::new(0, 1));
                }
            }
            _ => {
                entries.insert(m.number, ScoreEntry::new(1, 0));
            }
        }
    }
    entries
}

/// First team of a group, id = 4 * group_index + 1.
fn group_winner(group: char) -> TeamId {
    TeamId(4 * (group as u32 - 'A' as u32) + 1)
}

#[test]
fn schedule_template_is_well_formed() {
    let matches = world_cup_2026(&teams()).unwrap();
    assert_eq!(matches.len(), 104);
    let numbers: Vec<u32> = matches.iter().map(|m| m.number).collect();
    let mut sorted = numbers.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(sorted.len(), 104);

    let count = |stage| matches.iter().filter(|m| m.stage == stage).count();
    assert_eq!(count(Stage::Group), 72);
    assert_eq!(count(Stage::RoundOf32), 16);
    assert_eq!(count(Stage::RoundOf16), 8);
    assert_eq!(count(Stage::QuarterFinal), 4);
    assert_eq!(count(Stage::SemiFinal), 2);
    assert_eq!(count(Stage::ThirdPlace), 1);
    assert_eq!(count(Stage::Final), 1);

    // Every winner/loser reference points strictly backwards.
    for m in &matches {
        for slot in [&m.home, &m.away] {
            if let Some(reference) = slot.reference() {
                assert!(reference < m.number, "match {} references {reference}", m.number);
            }
        }
    }
}

#[test]
fn full_resolution_reproduces_the_seeded_tournament() {
    let teams = teams();
    let matches = world_cup_2026(&teams).unwrap();
    let entries = full_entries(&matches, &teams);
    let bracket = resolve_bracket(&matches, &entries, &teams, None).unwrap();

    // Group tables follow the seeded results.
    for (group, table) in &bracket.group_standings {
        assert_eq!(table[0].team, group_winner(*group));
        assert_eq!(table[0].points, 9);
        assert_eq!(table[3].points, 0);
    }

    // Thirds all tie on 3pts/-1/1 and fall through to rating, so groups A–H
    // supply the qualifiers.
    let letters: Vec<char> = bracket
        .third_place_ranking
        .iter()
        .map(|q| q.group)
        .collect();
    assert_eq!(letters, ('A'..='L').collect::<Vec<_>>());

    // 32 qualified: every group's top two plus the eight best thirds.
    assert_eq!(bracket.qualified.len(), 32);
    for group in 'A'..='L' {
        assert!(bracket.qualified.contains(&group_winner(group)));
    }
    for group in 'A'..='H' {
        let third = TeamId(group_winner(group).0 + 2);
        assert!(bracket.qualified.contains(&third));
    }

    // Every knockout pair is fully resolved.
    assert_eq!(bracket.slots.len(), 32);
    assert!(bracket.slots.values().all(|p| p.home.is_some() && p.away.is_some()));

    // Home-side-wins cascade: winner of group A lifts the trophy, winner of
    // group I reaches the final from the other half, winner of group E takes
    // the third-place match.
    assert_eq!(bracket.champion, Some(group_winner('A')));
    assert_eq!(bracket.runner_up, Some(group_winner('I')));
    assert_eq!(bracket.third_place, Some(group_winner('E')));
}

#[test]
fn resolution_is_idempotent() {
    let teams = teams();
    let matches = world_cup_2026(&teams).unwrap();
    let entries = full_entries(&matches, &teams);
    let first = resolve_bracket(&matches, &entries, &teams, None).unwrap();
    let second = resolve_bracket(&matches, &entries, &teams, None).unwrap();
    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::to_value(&second).unwrap()
    );
}

#[test]
fn undetermined_feeds_propagate_as_unresolved() {
    let teams = teams();
    let matches = world_cup_2026(&teams).unwrap();
    let mut entries = full_entries(&matches, &teams);
    // No semi-final predictions: the final and third-place pairs must stay
    // open rather than fabricate a winner.
    entries.remove(&101);
    entries.remove(&102);
    let bracket = resolve_bracket(&matches, &entries, &teams, None).unwrap();

    assert!(bracket.slots[&101].home.is_some());
    assert_eq!(bracket.slots[&104].home, None);
    assert_eq!(bracket.slots[&104].away, None);
    assert_eq!(bracket.slots[&103].home, None);
    assert_eq!(bracket.champion, None);
    assert_eq!(bracket.runner_up, None);
    assert_eq!(bracket.third_place, None);
}

#[test]
fn knockout_draw_needs_pso_or_pick() {
    let teams = teams();
    let matches = world_cup_2026(&teams).unwrap();
    let mut entries = full_entries(&matches, &teams);

    // A bare draw in the final leaves the champion open.
    entries.insert(104, ScoreEntry::new(2, 2));
    let bracket = resolve_bracket(&matches, &entries, &teams, None).unwrap();
    assert!(bracket.slots[&104].home.is_some());
    assert_eq!(bracket.champion, None);

    // The same draw with a shootout score resolves to the away side.
    let mut drawn = ScoreEntry::new(2, 2);
    drawn.pso_home = Some(3);
    drawn.pso_away = Some(5);
    entries.insert(104, drawn);
    let bracket = resolve_bracket(&matches, &entries, &teams, None).unwrap();
    assert_eq!(bracket.champion, Some(group_winner('I')));
    assert_eq!(bracket.runner_up, Some(group_winner('A')));
}

#[test]
fn missing_reference_is_a_structural_error() {
    let teams = teams();
    let mut matches = world_cup_2026(&teams).unwrap();
    let final_match = matches.iter_mut().find(|m| m.number == 104).unwrap();
    final_match.home = Slot::WinnerOf(999);
    let entries = full_entries(&matches, &teams);
    let err = resolve_bracket(&matches, &entries, &teams, None).unwrap_err();
    assert_eq!(err, StructuralError::MissingReference { by: 104, reference: 999 });
}

#[test]
fn dangling_backward_reference_is_missing_not_forward() {
    let teams = teams();
    let mut matches = world_cup_2026(&teams).unwrap();
    // Drop match 90; quarter-final 97 still names it as its away feed.
    matches.retain(|m| m.number != 90);
    let entries = full_entries(&matches, &teams);
    let err = resolve_bracket(&matches, &entries, &teams, None).unwrap_err();
    assert_eq!(err, StructuralError::MissingReference { by: 97, reference: 90 });
}

#[test]
fn forward_reference_is_a_structural_error() {
    let teams = teams();
    let mut matches = world_cup_2026(&teams).unwrap();
    let m89 = matches.iter_mut().find(|m| m.number == 89).unwrap();
    m89.home = Slot::WinnerOf(90);
    let entries = full_entries(&matches, &teams);
    let err = resolve_bracket(&matches, &entries, &teams, None).unwrap_err();
    assert_eq!(err, StructuralError::ForwardReference { by: 89, reference: 90 });
}

#[test]
fn malformed_team_list_is_rejected() {
    let mut teams = teams();
    teams.pop();
    let err = world_cup_2026(&teams).unwrap_err();
    assert!(matches!(err, StructuralError::BadGroupCount { .. }));
}
