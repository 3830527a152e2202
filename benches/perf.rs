use std::collections::HashMap;

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use wc26_pool::{
    EntryMap, Match, MatchStatus, ScoreEntry, ScoringConfig, Slot, Stage, Team, TeamId,
    calculate_all_bonus_points, resolve_actual_bracket, resolve_bracket, world_cup_2026,
};

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

fn seeded_entries(matches: &[Match], teams: &[Team]) -> EntryMap {
    let mut counts: HashMap<char, usize> = HashMap::new();
    let mut seats: HashMap<TeamId, usize> = HashMap::new();
    for t in teams {
        let seat = counts.entry(t.group).or_insert(0);
        seats.insert(t.id, *seat);
        *seat += 1;
    }

    let mut entries = EntryMap::new();
    for m in matches {
        let entry = match (&m.home, &m.away) {
            (Slot::Team(home), Slot::Team(away)) if m.stage == Stage::Group => {
                if seats[home] < seats[away] {
                    ScoreEntry::new(1, 0)
                } else {
                    ScoreEntry::new(0, 1)
                }
            }
            _ => ScoreEntry::new(1, 0),
        };
        entries.insert(m.number, entry);
    }
    entries
}

fn played_world() -> (Vec<Team>, Vec<Match>, EntryMap) {
    let teams = teams();
    let mut matches = world_cup_2026(&teams).expect("valid template");
    let entries = seeded_entries(&matches, &teams);
    for m in &mut matches {
        let entry = entries[&m.number];
        m.home_score = Some(entry.home);
        m.away_score = Some(entry.away);
        m.status = MatchStatus::Completed;
    }
    (teams, matches, entries)
}

fn bench_resolve_bracket(c: &mut Criterion) {
    let (teams, matches, entries) = played_world();
    c.bench_function("resolve_bracket_full", |b| {
        b.iter(|| {
            let bracket =
                resolve_bracket(black_box(&matches), &entries, &teams, None).unwrap();
            black_box(bracket.champion);
        })
    });
}

fn bench_bonus_diff(c: &mut Criterion) {
    let (teams, matches, entries) = played_world();
    let config = ScoringConfig::default();
    let actual = resolve_actual_bracket(&matches, &teams, None).unwrap();
    c.bench_function("bonus_diff_per_member", |b| {
        b.iter(|| {
            let awards = calculate_all_bonus_points(
                "bench",
                black_box(&entries),
                &matches,
                &teams,
                None,
                &config,
                Some(&actual),
            )
            .unwrap();
            black_box(awards.len());
        })
    });
}

criterion_group!(benches, bench_resolve_bracket, bench_bonus_diff);
criterion_main!(benches);
