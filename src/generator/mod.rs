//! Worklist generators.
//!
//! Three generators build the unordered match worklist the scheduler
//! consumes:
//!
//! - [`PairGenerator`]: teams of two, built from full pair combinations plus randomized
//!   filler passes to satisfy minimum-games and evenness constraints.
//! - [`MatchGenerator`]: four-individual matches chosen greedily from all
//!   4-subsets of the roster, minimizing repeat co-appearances via a weight
//!   matrix.
//! - [`TeamMatchGenerator`]: pairs an even set of teams into 2v2 matches,
//!   minimizing repeat opponents.
//!
//! All generators take `&mut R where R: Rng`; tie-breaks are uniform random
//! so that different seeds explore different equally-good worklists.

mod matches;
mod pairs;
mod team_matches;

pub use matches::MatchGenerator;
pub use pairs::{PairGenerator, TeamList};
pub use team_matches::TeamMatchGenerator;
