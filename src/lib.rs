//! Bracket resolution and scoring engine for a 48-team World Cup 2026
//! prediction pool.
//!
//! Everything here is pure, synchronous computation over immutable
//! snapshots: group tables with the full tie-break chain, the cross-group
//! third-place ranking, the Annex C round-of-32 seeding table, the knockout
//! cascade, per-match scoring and the five-category bonus diff. Persistence,
//! permissions and match officiation live with the caller; the engine is a
//! total function of its arguments and is recomputed wholesale after any
//! change.

pub mod annex_c;
pub mod bonus;
pub mod bracket;
pub mod config;
pub mod error;
pub mod model;
pub mod policy;
pub mod schedule;
pub mod scoring;
pub mod standings;
pub mod third_place;

pub use bonus::{BonusAward, BonusCategory, calculate_all_bonus_points};
pub use bracket::{resolve_actual_bracket, resolve_bracket};
pub use config::{BonusConfig, RoundMultipliers, ScoringConfig, TierPoints};
pub use error::StructuralError;
pub use model::{
    BracketResult, ConductRecord, EntryMap, GroupStanding, Match, MatchStatus, ResolvedPair,
    ScoreEntry, Slot, Stage, Team, TeamId, ThirdPlaceQualifier, results_as_entries,
};
pub use policy::{DecisionBasis, Outcome, resolve_outcome};
pub use schedule::{parse_slot, world_cup_2026};
pub use scoring::{PsoInputs, ScoreResult, ScoreTier, score, score_member_matches};
pub use standings::calculate_group_standings;
pub use third_place::{QUALIFYING_THIRDS, rank_third_place_teams};
