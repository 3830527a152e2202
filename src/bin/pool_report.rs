use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};

use wc26_pool::{
    Match, ScoreEntry, ScoringConfig, Team, calculate_all_bonus_points, resolve_actual_bracket,
    resolve_bracket, score_member_matches,
};

/// Offline pool report: resolve a bracket from JSON snapshots and print the
/// standings, bracket and point totals.
///
/// Usage: pool_report --teams teams.json --matches matches.json
///                    [--predictions member.json] [--config config.json]
fn main() -> Result<()> {
    let teams: Vec<Team> = load_json(required_arg("--teams")?)?;
    let matches: Vec<Match> = load_json(required_arg("--matches")?)?;
    let config: ScoringConfig = match optional_arg("--config") {
        Some(path) => load_json(path)?,
        None => ScoringConfig::default(),
    };

    let names: HashMap<_, _> = teams.iter().map(|t| (t.id, t.name.as_str())).collect();
    let name = |id| names.get(&id).copied().unwrap_or("-");

    let actual = resolve_actual_bracket(&matches, &teams, None)?;
    println!("Group tables");
    for (group, table) in &actual.group_standings {
        println!("  Group {group}");
        for (pos, row) in table.iter().enumerate() {
            println!(
                "    {}. {:<24} {:>2}pts  gd {:+}  ({}-{}-{})",
                pos + 1,
                name(row.team),
                row.points,
                row.goal_difference,
                row.won,
                row.drawn,
                row.lost
            );
        }
    }

    println!("\nKnockout bracket");
    for (number, pair) in &actual.slots {
        println!(
            "  match {number:>3}: {} vs {}",
            pair.home.map(&name).unwrap_or("?"),
            pair.away.map(&name).unwrap_or("?")
        );
    }
    println!(
        "\nPodium: {} / {} / {}",
        actual.champion.map(&name).unwrap_or("?"),
        actual.runner_up.map(&name).unwrap_or("?"),
        actual.third_place.map(&name).unwrap_or("?")
    );

    if let Some(path) = optional_arg("--predictions") {
        let entries: HashMap<u32, ScoreEntry> = load_json(path)?;
        let predicted = resolve_bracket(&matches, &entries, &teams, None)?;
        let (rows, match_points) = score_member_matches(&entries, &matches, &config);
        let awards =
            calculate_all_bonus_points("member", &entries, &matches, &teams, None, &config, Some(&actual))?;
        let bonus_points: u32 = awards.iter().map(|a| a.points).sum();

        println!("\nPredicted podium: {}", predicted.champion.map(&name).unwrap_or("?"));
        println!("Match points: {match_points} over {} scored matches", rows.len());
        println!("Bonus points: {bonus_points}");
        for award in &awards {
            println!("  +{:>5}  {}", award.points, award.description);
        }
        println!("Total: {}", match_points + bonus_points);
    }

    Ok(())
}

fn load_json<T: serde::de::DeserializeOwned>(path: PathBuf) -> Result<T> {
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("unable to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("unable to parse {}", path.display()))
}

fn required_arg(flag: &str) -> Result<PathBuf> {
    optional_arg(flag).ok_or_else(|| anyhow!("missing {flag} <path>"))
}

fn optional_arg(flag: &str) -> Option<PathBuf> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    args.iter()
        .position(|a| a == flag)
        .and_then(|idx| args.get(idx + 1))
        .map(PathBuf::from)
}
