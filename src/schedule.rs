use std::collections::BTreeMap;

use crate::annex_c::{TemplateSlot, annex_c};
use crate::error::StructuralError;
use crate::model::{Match, MatchStatus, Slot, Stage, Team, TeamId};

/// Parse one placeholder string into a typed slot. Runs once at schedule
/// construction; the cascade resolver only ever sees the typed form.
///
/// Accepted shapes: "Winner Match 39" / "Winner of Match 39",
/// "Loser Match 101", "Winner Group C", "Runner-up Group C",
/// "3rd Place Group C/D/E/F".
pub fn parse_slot(raw: &str) -> Result<Slot, StructuralError> {
    let text = raw.trim().to_lowercase();
    let bad = || StructuralError::BadPlaceholder(raw.to_string());

    if let Some(rest) = text
        .strip_prefix("winner of match")
        .or_else(|| text.strip_prefix("winner match"))
    {
        let n: u32 = rest.trim().parse().map_err(|_| bad())?;
        return Ok(Slot::WinnerOf(n));
    }
    if let Some(rest) = text
        .strip_prefix("loser of match")
        .or_else(|| text.strip_prefix("loser match"))
    {
        let n: u32 = rest.trim().parse().map_err(|_| bad())?;
        return Ok(Slot::LoserOf(n));
    }
    if let Some(rest) = text.strip_prefix("winner group") {
        return Ok(Slot::GroupPosition(group_letter(rest).ok_or_else(bad)?, 1));
    }
    if let Some(rest) = text.strip_prefix("runner-up group") {
        return Ok(Slot::GroupPosition(group_letter(rest).ok_or_else(bad)?, 2));
    }
    if let Some(rest) = text.strip_prefix("3rd place group") {
        let mut letters = Vec::new();
        for part in rest.trim().split('/') {
            letters.push(group_letter(part).ok_or_else(bad)?);
        }
        if letters.is_empty() {
            return Err(bad());
        }
        return Ok(Slot::BestThird(letters));
    }
    Err(bad())
}

fn group_letter(raw: &str) -> Option<char> {
    let c = raw.trim().chars().next()?;
    let upper = c.to_ascii_uppercase();
    ('A'..='L').contains(&upper).then_some(upper)
}

/// Build the full 104-match 2026-format schedule for the given 48 teams:
/// 72 group matches over three rounds, the 16 Annex C round-of-32 fixtures
/// (73–88), round of 16 (89–96), quarter-finals (97–100), semi-finals
/// (101–102), third place (103) and the final (104).
pub fn world_cup_2026(teams: &[Team]) -> Result<Vec<Match>, StructuralError> {
    let mut by_group: BTreeMap<char, Vec<TeamId>> = BTreeMap::new();
    for t in teams {
        by_group.entry(t.group).or_default().push(t.id);
    }
    if by_group.len() != 12 || teams.len() != 48 {
        return Err(StructuralError::BadGroupCount {
            groups: by_group.len(),
            teams: teams.len(),
        });
    }
    for (group, members) in &by_group {
        if members.len() != 4 {
            return Err(StructuralError::BadGroup(*group));
        }
    }

    let mut matches = Vec::with_capacity(104);

    // Group rounds: (0v1, 2v3), (0v2, 3v1), (3v0, 1v2).
    const ROUNDS: [[(usize, usize); 2]; 3] = [[(0, 1), (2, 3)], [(0, 2), (3, 1)], [(3, 0), (1, 2)]];
    let mut number = 1;
    for round in ROUNDS {
        for (group, members) in &by_group {
            for (h, a) in round {
                matches.push(blank(
                    number,
                    Stage::Group,
                    Some(*group),
                    Slot::Team(members[h]),
                    Slot::Team(members[a]),
                ));
                number += 1;
            }
        }
    }

    let table = annex_c()?;
    for f in table.fixtures() {
        let home = template_placeholder(f.home, table)?;
        let away = template_placeholder(f.away, table)?;
        matches.push(blank(f.number, Stage::RoundOf32, None, home, away));
    }

    for k in 0..8u32 {
        matches.push(blank(
            89 + k,
            Stage::RoundOf16,
            None,
            parse_slot(&format!("Winner Match {}", 73 + 2 * k))?,
            parse_slot(&format!("Winner Match {}", 74 + 2 * k))?,
        ));
    }
    for k in 0..4u32 {
        matches.push(blank(
            97 + k,
            Stage::QuarterFinal,
            None,
            parse_slot(&format!("Winner Match {}", 89 + 2 * k))?,
            parse_slot(&format!("Winner Match {}", 90 + 2 * k))?,
        ));
    }
    for k in 0..2u32 {
        matches.push(blank(
            101 + k,
            Stage::SemiFinal,
            None,
            parse_slot(&format!("Winner Match {}", 97 + 2 * k))?,
            parse_slot(&format!("Winner Match {}", 98 + 2 * k))?,
        ));
    }
    matches.push(blank(
        103,
        Stage::ThirdPlace,
        None,
        parse_slot("Loser of Match 101")?,
        parse_slot("Loser of Match 102")?,
    ));
    matches.push(blank(
        104,
        Stage::Final,
        None,
        parse_slot("Winner of Match 101")?,
        parse_slot("Winner of Match 102")?,
    ));

    Ok(matches)
}

fn template_placeholder(
    slot: TemplateSlot,
    table: &crate::annex_c::AnnexC,
) -> Result<Slot, StructuralError> {
    match slot {
        TemplateSlot::Position(group, 1) => parse_slot(&format!("Winner Group {group}")),
        TemplateSlot::Position(group, _) => parse_slot(&format!("Runner-up Group {group}")),
        TemplateSlot::Third(i) => {
            let candidates: Vec<String> = table
                .third_slot_candidates(i)
                .into_iter()
                .map(String::from)
                .collect();
            parse_slot(&format!("3rd Place Group {}", candidates.join("/")))
        }
    }
}

fn blank(number: u32, stage: Stage, group: Option<char>, home: Slot, away: Slot) -> Match {
    Match {
        number,
        stage,
        group,
        home,
        away,
        status: MatchStatus::Scheduled,
        home_score: None,
        away_score: None,
        pso_home: None,
        pso_away: None,
        winner: None,
        completed_at: None,
    }
}
