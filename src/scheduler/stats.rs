//! Aggregate schedule statistics.
//!
//! Pure functions over a completed `Schedule`; pointwise queries
//! (appearances, co-appearances, partners, opponents) live on the model
//! types themselves.
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Matches per round | min/max/mean over all rounds, empty ones included |
//! | Matches per participant | min/max/mean over scheduled participants |

use serde::{Deserialize, Serialize};

use crate::models::{Round, Schedule};

/// A min/max/mean summary of a count distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatSummary {
    pub min: usize,
    pub max: usize,
    pub mean: f64,
}

impl StatSummary {
    fn from_counts(counts: &[usize]) -> Self {
        if counts.is_empty() {
            return Self {
                min: 0,
                max: 0,
                mean: 0.0,
            };
        }
        let sum: usize = counts.iter().sum();
        Self {
            min: counts.iter().min().copied().unwrap_or(0),
            max: counts.iter().max().copied().unwrap_or(0),
            mean: sum as f64 / counts.len() as f64,
        }
    }
}

/// Aggregate statistics over a completed schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleStats {
    /// Number of weeks (last may be partial).
    pub num_weeks: usize,
    /// Number of rounds, including empty and excluded ones.
    pub num_rounds: usize,
    /// Number of scheduled matches.
    pub num_matches: usize,
    /// Matches the scheduler could not place under its caps.
    pub num_leftover: usize,
    /// Match count distribution across rounds. Excluded or starved rounds
    /// contribute zeros, so `min` may be 0.
    pub matches_per_round: StatSummary,
    /// Appearance distribution across all participants. Participants who
    /// only appear in leftover matches contribute zeros.
    pub matches_per_participant: StatSummary,
}

impl ScheduleStats {
    /// Computes statistics from a schedule.
    pub fn calculate(schedule: &Schedule) -> Self {
        let round_counts: Vec<usize> = schedule.rounds().iter().map(Round::len).collect();

        let mut participants = schedule.participants();
        for m in schedule.leftover() {
            for p in m.players() {
                if !participants.iter().any(|s| s == p) {
                    participants.push(p.to_string());
                }
            }
        }
        let participant_counts: Vec<usize> = participants
            .iter()
            .map(|p| schedule.appearance_count(p))
            .collect();

        Self {
            num_weeks: schedule.num_weeks(),
            num_rounds: schedule.num_rounds(),
            num_matches: schedule.num_matches(),
            num_leftover: schedule.leftover().len(),
            matches_per_round: StatSummary::from_counts(&round_counts),
            matches_per_participant: StatSummary::from_counts(&participant_counts),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::MatchGenerator;
    use crate::models::{MatchList, Roster};
    use crate::scheduler::RoundScheduler;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_eight_participant_balanced_pass() {
        let roster = Roster::from_names(["A", "B", "C", "D", "E", "F", "G", "H"]).unwrap();
        let mut rng = SmallRng::seed_from_u64(42);
        let list = MatchGenerator::new().generate(&roster, &mut rng).unwrap();
        let schedule = RoundScheduler::new().schedule(list, &mut rng).unwrap();

        // Two disjoint matches fit into a single round.
        let stats = ScheduleStats::calculate(&schedule);
        assert_eq!(stats.num_rounds, 1);
        assert_eq!(stats.num_matches, 2);
        assert_eq!(stats.matches_per_round.min, 2);
        assert_eq!(stats.matches_per_round.max, 2);
        assert!((stats.matches_per_round.mean - 2.0).abs() < 1e-10);
        assert_eq!(stats.matches_per_participant.min, 1);
        assert_eq!(stats.matches_per_participant.max, 1);
    }

    #[test]
    fn test_starved_rounds_show_zero_min() {
        let list: MatchList = vec![
            crate::models::Match::open("A", "B", "C", "D").unwrap(),
            crate::models::Match::open("A", "B", "C", "D").unwrap(),
        ]
        .into_iter()
        .collect();
        let mut rng = SmallRng::seed_from_u64(42);
        let schedule = RoundScheduler::new()
            .with_max_per_week(1)
            .schedule(list, &mut rng)
            .unwrap();

        let stats = ScheduleStats::calculate(&schedule);
        assert_eq!(stats.matches_per_round.min, 0);
        assert_eq!(stats.matches_per_round.max, 1);
        assert_eq!(stats.num_leftover, 0);
    }

    #[test]
    fn test_leftover_is_counted() {
        let list: MatchList = vec![crate::models::Match::open("A", "B", "C", "D").unwrap()]
            .into_iter()
            .collect();
        let mut rng = SmallRng::seed_from_u64(42);
        let schedule = RoundScheduler::new()
            .with_max_per_week(0)
            .schedule(list, &mut rng)
            .unwrap();

        let stats = ScheduleStats::calculate(&schedule);
        assert_eq!(stats.num_matches, 0);
        assert_eq!(stats.num_leftover, 1);
        assert_eq!(stats.matches_per_participant.min, 0);
        assert_eq!(stats.matches_per_participant.max, 0);
    }

    #[test]
    fn test_leftover_only_participants_count_zero() {
        use crate::models::{Match, Round, Schedule};

        let played = Round::new(vec![Match::open("A", "B", "C", "D").unwrap()]);
        let leftover = vec![Match::open("E", "F", "G", "H").unwrap()];
        let schedule = Schedule::new(vec![played], 3, leftover);

        let stats = ScheduleStats::calculate(&schedule);
        assert_eq!(stats.matches_per_participant.min, 0);
        assert_eq!(stats.matches_per_participant.max, 1);
        // Four participants at 1, four leftover-only at 0.
        assert!((stats.matches_per_participant.mean - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_empty_schedule() {
        let mut rng = SmallRng::seed_from_u64(42);
        let schedule = RoundScheduler::new()
            .schedule(MatchList::new(), &mut rng)
            .unwrap();
        let stats = ScheduleStats::calculate(&schedule);
        assert_eq!(stats.num_rounds, 0);
        assert_eq!(stats.num_matches, 0);
        assert_eq!(stats.matches_per_round.min, 0);
        assert!((stats.matches_per_round.mean - 0.0).abs() < 1e-10);
    }
}
