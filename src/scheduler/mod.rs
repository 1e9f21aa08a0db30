//! Round scheduling and schedule statistics.
//!
//! `RoundScheduler` partitions a match worklist into conflict-free rounds
//! (at most one appearance per participant per round by default), with
//! optional per-round match limits, weekly participation caps, excluded
//! slots, and coordinator balancing.
//!
//! `ScheduleStats` aggregates the result: round/week/match counts and
//! min/max/mean summaries per round and per participant.

mod rounds;
mod stats;

pub use rounds::RoundScheduler;
pub use stats::{ScheduleStats, StatSummary};
