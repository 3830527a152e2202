use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable team identity. Teams are immutable reference data; everything else
/// in the engine refers to them by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TeamId(pub u32);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Three-letter country code ("FRA", "BRA", ...).
    pub code: String,
    /// Group letter A..L.
    pub group: char,
    /// Seeding strength. Only consulted as the final deterministic tie-break,
    /// so two otherwise identical teams still sort the same way every run.
    pub rating: u32,
    pub badge: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Group,
    RoundOf32,
    RoundOf16,
    QuarterFinal,
    SemiFinal,
    ThirdPlace,
    Final,
}

impl Stage {
    pub fn is_knockout(self) -> bool {
        !matches!(self, Stage::Group)
    }

    /// Knockout rounds cannot end in a draw; a drawn score needs a PSO score
    /// or an explicit winner pick before it resolves.
    pub fn eliminates_draws(self) -> bool {
        self.is_knockout()
    }

    /// Fixed resolution order for the knockout cascade. R32 is seeded from
    /// the Annex C table, every later stage dereferences earlier matches.
    pub const KNOCKOUT_ORDER: [Stage; 6] = [
        Stage::RoundOf32,
        Stage::RoundOf16,
        Stage::QuarterFinal,
        Stage::SemiFinal,
        Stage::ThirdPlace,
        Stage::Final,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Scheduled,
    Live,
    Completed,
    Cancelled,
}

/// One side of a match, parsed once at schedule-construction time so the
/// cascade resolver pattern-matches instead of re-scanning placeholder text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    /// A concrete team (all group-stage matches).
    Team(TeamId),
    /// Winner of an earlier match, by match number.
    WinnerOf(u32),
    /// Loser of an earlier match (third-place play-off only).
    LoserOf(u32),
    /// Finishing position 1 or 2 in a group.
    GroupPosition(char, u8),
    /// One of the best eight third-place teams; the letters are the groups
    /// this slot can legally draw from (never the opposing winner's group).
    BestThird(Vec<char>),
}

impl Slot {
    /// Match number this slot depends on, if it is a winner/loser reference.
    pub fn reference(&self) -> Option<u32> {
        match self {
            Slot::WinnerOf(n) | Slot::LoserOf(n) => Some(*n),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    /// Sequential match number, 1..=104. Placeholders may only reference
    /// strictly smaller numbers; the dependency graph is acyclic.
    pub number: u32,
    pub stage: Stage,
    /// Group letter, group stage only.
    pub group: Option<char>,
    pub home: Slot,
    pub away: Slot,
    pub status: MatchStatus,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub pso_home: Option<u32>,
    pub pso_away: Option<u32>,
    /// Explicit recorded winner, for knockout draws settled outside the
    /// shootout score (or administrative awards).
    pub winner: Option<TeamId>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Match {
    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }
}

/// One score guess for one match. Shared by member predictions and by actual
/// results lowered through [`results_as_entries`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub home: u32,
    pub away: u32,
    pub pso_home: Option<u32>,
    pub pso_away: Option<u32>,
    /// Winner pick for a predicted knockout draw with no PSO entry.
    pub winner_pick: Option<TeamId>,
}

impl ScoreEntry {
    pub fn new(home: u32, away: u32) -> Self {
        ScoreEntry {
            home,
            away,
            pso_home: None,
            pso_away: None,
            winner_pick: None,
        }
    }

    pub fn is_draw(&self) -> bool {
        self.home == self.away
    }

    pub fn pso(&self) -> Option<(u32, u32)> {
        match (self.pso_home, self.pso_away) {
            (Some(h), Some(a)) => Some((h, a)),
            _ => None,
        }
    }
}

/// Prediction (or lowered-result) set, keyed by match number.
pub type EntryMap = HashMap<u32, ScoreEntry>;

/// Lower completed matches into the prediction shape so brackets built from
/// actual results and from member guesses run through identical code.
pub fn results_as_entries(matches: &[Match]) -> EntryMap {
    let mut out = EntryMap::new();
    for m in matches {
        if !m.is_completed() {
            continue;
        }
        let (Some(home), Some(away)) = (m.home_score, m.away_score) else {
            continue;
        };
        out.insert(
            m.number,
            ScoreEntry {
                home,
                away,
                pso_home: m.pso_home,
                pso_away: m.pso_away,
                winner_pick: m.winner,
            },
        );
    }
    out
}

/// Disciplinary counts for one team in one match. Feeds the fair-play
/// tie-break only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ConductRecord {
    pub match_number: u32,
    pub team: TeamId,
    pub yellow: u32,
    /// Second yellow leading to an indirect red.
    pub second_yellow: u32,
    pub direct_red: u32,
    /// Yellow followed by a direct red in the same match.
    pub yellow_then_red: u32,
}

impl ConductRecord {
    /// Fair-play deduction. Less negative ranks higher.
    pub fn deduction(&self) -> i32 {
        -(self.yellow as i32)
            + -3 * (self.second_yellow as i32)
            + -4 * (self.direct_red as i32)
            + -5 * (self.yellow_then_red as i32)
    }
}

/// Per-team aggregate over one group's matches. Never persisted, always
/// recomputed from the match/entry snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupStanding {
    pub team: TeamId,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i32,
    pub points: u32,
    /// Accumulated fair-play deduction (≤ 0) over the counted matches.
    pub fair_play: i32,
    /// Carried from the team record so cross-group ranking can apply the
    /// same final tie-break without a team lookup.
    pub rating: u32,
}

impl GroupStanding {
    pub fn blank(team: TeamId, rating: u32) -> Self {
        GroupStanding {
            team,
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            points: 0,
            fair_play: 0,
            rating,
        }
    }
}

/// A group's third-placed team in the cross-group ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThirdPlaceQualifier {
    pub group: char,
    pub standing: GroupStanding,
}

/// Resolved sides of one knockout match. `None` means the feeding match has
/// not produced a winner yet; that is a legitimate state, not an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPair {
    pub home: Option<TeamId>,
    pub away: Option<TeamId>,
}

/// The engine's primary output: one full resolution of the tournament from a
/// single entry set, whether that set is a member's guesses or the actual
/// results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BracketResult {
    pub group_standings: std::collections::BTreeMap<char, Vec<GroupStanding>>,
    /// Match number → resolved sides, for every knockout match.
    pub slots: std::collections::BTreeMap<u32, ResolvedPair>,
    pub third_place_ranking: Vec<ThirdPlaceQualifier>,
    /// The 32 teams reaching the round of 32: every group's top two plus the
    /// best eight thirds.
    pub qualified: std::collections::BTreeSet<TeamId>,
    pub champion: Option<TeamId>,
    pub runner_up: Option<TeamId>,
    pub third_place: Option<TeamId>,
}
