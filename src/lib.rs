//! Round-robin pairing and scheduling engine.
//!
//! Given a roster of participants, generates a worklist of four-participant
//! matches with evenly distributed pairings, partitions it into conflict-free
//! rounds, and derives fairness statistics over the result.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Roster`, `Team`, `Match`, `MatchList`,
//!   `Round`, `Schedule`
//! - **`generator`**: `PairGenerator` (teams of two), `MatchGenerator`
//!   (balanced 4-subsets), `TeamMatchGenerator` (2v2 pairings)
//! - **`scheduler`**: `RoundScheduler` (conflict-free rounds with optional
//!   participation caps) and `ScheduleStats`
//! - **`error`**: error type shared across generation and scheduling
//!
//! # Pipeline
//!
//! roster → generator → match worklist → `RoundScheduler` → `Schedule` →
//! `ScheduleStats` / reporting collaborators.
//!
//! # Randomness
//!
//! Every randomized decision (shuffles, tie-breaks, coordinator picks) flows
//! through a caller-supplied `rand::Rng`. Seeding a `SmallRng` makes an
//! entire generation run reproducible.

pub mod error;
pub mod generator;
pub mod models;
pub mod scheduler;
