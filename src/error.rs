use thiserror::Error;

/// Malformed schedule or reference data. These abort resolution: guessing a
/// bracket from bad inputs would silently produce a wrong answer.
///
/// A knockout match that merely has no resolvable winner yet is *not* an
/// error; that state is carried as `Outcome::Undetermined` / `None` slots.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    #[error("unparsable slot placeholder: {0:?}")]
    BadPlaceholder(String),

    #[error("match {by} references match {reference}, which is not in the schedule")]
    MissingReference { by: u32, reference: u32 },

    #[error("match {by} references match {reference}, which does not precede it")]
    ForwardReference { by: u32, reference: u32 },

    #[error("no Annex C entry for third-place combination {0:?}")]
    UnknownCombination(String),

    #[error("Annex C table is invalid: {0}")]
    BadTable(String),

    #[error("group {0} does not have exactly 4 teams")]
    BadGroup(char),

    #[error("expected 12 groups of 4 teams, found {groups} groups / {teams} teams")]
    BadGroupCount { groups: usize, teams: usize },

    #[error("no standings entry for group {group} position {position}")]
    MissingGroupPosition { group: char, position: u8 },

    #[error("group {0} supplied no third-place candidate")]
    MissingThirdPlace(char),

    #[error("round-of-32 match {0} has no Annex C fixture template")]
    UnseededRoundOf32(u32),
}
