use std::collections::{BTreeMap, HashSet};

use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::error::StructuralError;
use crate::model::{GroupStanding, ResolvedPair, ThirdPlaceQualifier};
use crate::third_place::QUALIFYING_THIRDS;

/// Number of distinct 8-subsets of the 12 groups; the table must cover all
/// of them or it is unusable.
const COMBINATION_COUNT: usize = 495;

const GROUP_LETTERS: [char; 12] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L'];

/// One side of a round-of-32 fixture template: either a fixed group finisher
/// or one of the eight third-place slots (index 0..8).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateSlot {
    Position(char, u8),
    Third(usize),
}

#[derive(Debug, Clone)]
pub struct FixtureTemplate {
    pub number: u32,
    pub home: TemplateSlot,
    pub away: TemplateSlot,
}

/// The parsed and validated Annex C reference table. Pure immutable data: a
/// lookup keyed by the canonical (sorted) 8-letter combination, plus the 16
/// fixed fixture templates it feeds.
#[derive(Debug)]
pub struct AnnexC {
    pub version: String,
    fixtures: Vec<FixtureTemplate>,
    /// Opponent group letter for each third-place slot; the assigned third
    /// may never come from that group.
    opponents: Vec<char>,
    /// combination key → per-slot group assignment (same length as
    /// `opponents`, a permutation of the key).
    combinations: BTreeMap<String, Vec<char>>,
}

#[derive(Deserialize)]
struct RawAnnexC {
    version: String,
    third_slot_opponents: Vec<char>,
    fixtures: Vec<RawFixture>,
    combinations: BTreeMap<String, String>,
}

#[derive(Deserialize)]
struct RawFixture {
    #[serde(rename = "match")]
    number: u32,
    home: String,
    away: String,
}

static TABLE: Lazy<Result<AnnexC, StructuralError>> =
    Lazy::new(|| AnnexC::parse(include_str!("assets/annex_c.json")));

/// The embedded table, parsed and validated once per process.
pub fn annex_c() -> Result<&'static AnnexC, StructuralError> {
    TABLE.as_ref().map_err(|e| e.clone())
}

impl AnnexC {
    fn parse(raw: &str) -> Result<AnnexC, StructuralError> {
        let raw: RawAnnexC = serde_json::from_str(raw)
            .map_err(|e| StructuralError::BadTable(format!("asset does not parse: {e}")))?;

        let opponents = raw.third_slot_opponents;
        if opponents.len() != QUALIFYING_THIRDS {
            return Err(StructuralError::BadTable(format!(
                "expected {QUALIFYING_THIRDS} third-place slots, found {}",
                opponents.len()
            )));
        }

        let mut fixtures = Vec::with_capacity(raw.fixtures.len());
        for f in &raw.fixtures {
            fixtures.push(FixtureTemplate {
                number: f.number,
                home: parse_template_slot(&f.home)?,
                away: parse_template_slot(&f.away)?,
            });
        }
        if fixtures.len() != 16 {
            return Err(StructuralError::BadTable(format!(
                "expected 16 round-of-32 fixtures, found {}",
                fixtures.len()
            )));
        }
        let third_slots: HashSet<usize> = fixtures
            .iter()
            .flat_map(|f| [f.home, f.away])
            .filter_map(|s| match s {
                TemplateSlot::Third(i) => Some(i),
                TemplateSlot::Position(..) => None,
            })
            .collect();
        if third_slots.len() != QUALIFYING_THIRDS
            || third_slots.iter().any(|i| *i >= QUALIFYING_THIRDS)
        {
            return Err(StructuralError::BadTable(
                "fixtures must reference each third-place slot exactly once".into(),
            ));
        }

        if raw.combinations.len() != COMBINATION_COUNT {
            return Err(StructuralError::BadTable(format!(
                "expected {COMBINATION_COUNT} combinations, found {}",
                raw.combinations.len()
            )));
        }
        let mut combinations = BTreeMap::new();
        for (key, value) in &raw.combinations {
            let letters: Vec<char> = key.chars().collect();
            let strictly_increasing = letters.windows(2).all(|w| w[0] < w[1]);
            if letters.len() != QUALIFYING_THIRDS
                || !strictly_increasing
                || letters.iter().any(|l| !GROUP_LETTERS.contains(l))
            {
                return Err(StructuralError::BadTable(format!(
                    "combination key {key:?} is not a sorted 8-subset of A..L"
                )));
            }
            let assigned: Vec<char> = value.chars().collect();
            let mut sorted = assigned.clone();
            sorted.sort_unstable();
            if sorted != letters {
                return Err(StructuralError::BadTable(format!(
                    "combination {key:?} assignment {value:?} is not a permutation of its key"
                )));
            }
            if assigned.iter().zip(&opponents).any(|(a, o)| a == o) {
                return Err(StructuralError::BadTable(format!(
                    "combination {key:?} pairs a third-place team with its own group winner"
                )));
            }
            combinations.insert(key.clone(), assigned);
        }

        Ok(AnnexC {
            version: raw.version,
            fixtures,
            opponents,
            combinations,
        })
    }

    pub fn fixtures(&self) -> &[FixtureTemplate] {
        &self.fixtures
    }

    /// Candidate group letters for a third-place slot: any group except the
    /// opposing winner's. Used when building schedule placeholders.
    pub fn third_slot_candidates(&self, slot: usize) -> Vec<char> {
        GROUP_LETTERS
            .iter()
            .copied()
            .filter(|l| Some(l) != self.opponents.get(slot))
            .collect()
    }

    fn assignment(&self, qualified: &[char]) -> Result<&[char], StructuralError> {
        let mut key: Vec<char> = qualified.to_vec();
        key.sort_unstable();
        let key: String = key.into_iter().collect();
        self.combinations
            .get(&key)
            .map(|v| v.as_slice())
            .ok_or(StructuralError::UnknownCombination(key))
    }

    /// Substitute concrete teams into the 16 round-of-32 fixtures.
    ///
    /// `standings` must hold a full 4-row table per group (the calculator
    /// always produces one, even before any match is predicted), and
    /// `ranked_thirds` the cross-group ranking whose top eight qualify.
    pub fn seed_round_of_32(
        &self,
        standings: &BTreeMap<char, Vec<GroupStanding>>,
        ranked_thirds: &[ThirdPlaceQualifier],
    ) -> Result<BTreeMap<u32, ResolvedPair>, StructuralError> {
        let qualified: Vec<char> = ranked_thirds
            .iter()
            .take(QUALIFYING_THIRDS)
            .map(|q| q.group)
            .collect();
        let assignment = self.assignment(&qualified)?;
        log::debug!(
            "annex C v{}: combination {:?} -> slots {:?}",
            self.version,
            qualified,
            assignment
        );

        let mut out = BTreeMap::new();
        for f in &self.fixtures {
            let home = self.fill(f.home, standings, ranked_thirds, assignment)?;
            let away = self.fill(f.away, standings, ranked_thirds, assignment)?;
            out.insert(
                f.number,
                ResolvedPair {
                    home: Some(home),
                    away: Some(away),
                },
            );
        }
        Ok(out)
    }

    fn fill(
        &self,
        slot: TemplateSlot,
        standings: &BTreeMap<char, Vec<GroupStanding>>,
        ranked_thirds: &[ThirdPlaceQualifier],
        assignment: &[char],
    ) -> Result<crate::model::TeamId, StructuralError> {
        match slot {
            TemplateSlot::Position(group, position) => standings
                .get(&group)
                .and_then(|table| table.get(position as usize - 1))
                .map(|row| row.team)
                .ok_or(StructuralError::MissingGroupPosition { group, position }),
            TemplateSlot::Third(i) => {
                let group = *assignment
                    .get(i)
                    .ok_or_else(|| StructuralError::BadTable(format!("no slot {i}")))?;
                ranked_thirds
                    .iter()
                    .find(|q| q.group == group)
                    .map(|q| q.standing.team)
                    .ok_or(StructuralError::MissingThirdPlace(group))
            }
        }
    }
}

fn parse_template_slot(raw: &str) -> Result<TemplateSlot, StructuralError> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some('1'), Some(g), None) if GROUP_LETTERS.contains(&g) => {
            Ok(TemplateSlot::Position(g, 1))
        }
        (Some('2'), Some(g), None) if GROUP_LETTERS.contains(&g) => {
            Ok(TemplateSlot::Position(g, 2))
        }
        (Some('T'), Some(d), None) if d.is_ascii_digit() => {
            let n = d.to_digit(10).unwrap_or(0) as usize;
            if n == 0 || n > QUALIFYING_THIRDS {
                return Err(StructuralError::BadTable(format!("bad third slot {raw:?}")));
            }
            Ok(TemplateSlot::Third(n - 1))
        }
        _ => Err(StructuralError::BadTable(format!(
            "unrecognized fixture slot {raw:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_table_is_valid() {
        let table = annex_c().expect("embedded asset must validate");
        assert_eq!(table.fixtures().len(), 16);
        assert_eq!(table.combinations.len(), COMBINATION_COUNT);
        // The shipped table is computed, not the published allocation; the
        // version string must say so until the official data lands.
        assert!(table.version.ends_with("-derived"));
    }

    #[test]
    fn every_combination_avoids_own_group_winner() {
        let table = annex_c().unwrap();
        for (key, assigned) in &table.combinations {
            for (a, o) in assigned.iter().zip(&table.opponents) {
                assert_ne!(a, o, "combination {key} violates the own-group rule");
            }
        }
    }

    #[test]
    fn unknown_combination_is_a_structural_error() {
        let table = annex_c().unwrap();
        // Nine letters can never be a valid key.
        let err = table
            .assignment(&['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I'])
            .unwrap_err();
        assert!(matches!(err, StructuralError::UnknownCombination(_)));
    }
}
