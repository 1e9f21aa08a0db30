//! Domain models for round-robin scheduling.
//!
//! Value types flowing through the pipeline: a `Roster` of participants,
//! `Team`s of two, four-participant `Match`es collected into a `MatchList`
//! worklist, and the final `Schedule` of conflict-free `Round`s.
//!
//! All types are immutable once constructed; derived counts (appearances,
//! co-appearances, partners, opponents) are query methods, never cached
//! state.

mod matchup;
mod roster;
mod schedule;
mod team;

pub use matchup::{Lineup, Match, MatchList};
pub use roster::{Participant, Roster};
pub use schedule::{Round, Schedule};
pub use team::Team;
