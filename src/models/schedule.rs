//! Rounds and the final schedule.
//!
//! A `Round` is a conflict-free batch of matches played in one time slot.
//! A `Schedule` is the ordered sequence of rounds produced by the scheduler,
//! grouped into fixed-size weeks, plus any matches the scheduler could not
//! place under its caps. Both are frozen once produced; reporting
//! collaborators rely on stable iteration order.

use serde::{Deserialize, Serialize};

use crate::models::{Match, Participant};

/// A conflict-free batch of matches for one slot ("day").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    matches: Vec<Match>,
    label: Option<String>,
}

impl Round {
    pub(crate) fn new(matches: Vec<Match>) -> Self {
        Self {
            matches,
            label: None,
        }
    }

    /// An empty round occupying an excluded slot, with an explanatory label.
    pub(crate) fn skipped(label: impl Into<String>) -> Self {
        Self {
            matches: Vec::new(),
            label: Some(label.into()),
        }
    }

    /// Matches in placement order.
    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    /// Number of matches in the round.
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Whether the round has no matches.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// The explanatory label, set only for excluded slots.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Number of matches in this round including the participant.
    pub fn appearance_count(&self, participant: &str) -> usize {
        self.matches.iter().filter(|m| m.contains(participant)).count()
    }

    /// Whether the participant plays in this round.
    pub fn contains_participant(&self, participant: &str) -> bool {
        self.matches.iter().any(|m| m.contains(participant))
    }
}

/// An ordered sequence of rounds, grouped into weeks.
///
/// `leftover` holds matches the scheduler could not place because of
/// per-round or per-week caps; it is reported explicitly rather than
/// silently discarded, so the multiset of scheduled + leftover matches
/// always equals the input worklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    rounds: Vec<Round>,
    rounds_per_week: usize,
    leftover: Vec<Match>,
}

impl Schedule {
    pub(crate) fn new(rounds: Vec<Round>, rounds_per_week: usize, leftover: Vec<Match>) -> Self {
        Self {
            rounds,
            rounds_per_week,
            leftover,
        }
    }

    /// Rounds in play order.
    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    /// Matches that could not be placed under the configured caps.
    pub fn leftover(&self) -> &[Match] {
        &self.leftover
    }

    /// Number of rounds, including empty and excluded ones.
    pub fn num_rounds(&self) -> usize {
        self.rounds.len()
    }

    /// Number of weeks (last week may be partial).
    pub fn num_weeks(&self) -> usize {
        self.rounds.len().div_ceil(self.rounds_per_week)
    }

    /// Total number of scheduled matches.
    pub fn num_matches(&self) -> usize {
        self.rounds.iter().map(Round::len).sum()
    }

    /// Rounds grouped into weeks of `rounds_per_week`.
    pub fn weeks(&self) -> impl Iterator<Item = &[Round]> {
        self.rounds.chunks(self.rounds_per_week)
    }

    /// All scheduled matches, in round order.
    pub fn matches(&self) -> impl Iterator<Item = &Match> {
        self.rounds.iter().flat_map(|r| r.matches().iter())
    }

    /// Distinct scheduled participants, in first-seen order.
    pub fn participants(&self) -> Vec<Participant> {
        let mut seen: Vec<Participant> = Vec::new();
        for m in self.matches() {
            for p in m.players() {
                if !seen.iter().any(|s| s == p) {
                    seen.push(p.to_string());
                }
            }
        }
        seen
    }

    /// Number of scheduled matches including the participant.
    pub fn appearance_count(&self, participant: &str) -> usize {
        self.matches().filter(|m| m.contains(participant)).count()
    }

    /// Number of scheduled matches in which both participants are present.
    pub fn co_appearance_count(&self, p1: &str, p2: &str) -> usize {
        self.matches()
            .filter(|m| m.contains(p1) && m.contains(p2))
            .count()
    }

    /// Number of scheduled matches in which the two participants share a team.
    pub fn partner_count(&self, p1: &str, p2: &str) -> usize {
        self.matches().filter(|m| m.same_team(p1, p2)).count()
    }

    /// Number of scheduled matches in which the two participants oppose each
    /// other.
    pub fn opponent_count(&self, p1: &str, p2: &str) -> usize {
        self.matches().filter(|m| m.opposing(p1, p2)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Team;

    fn open_match(players: [&str; 4]) -> Match {
        Match::open(players[0], players[1], players[2], players[3]).unwrap()
    }

    fn sample_schedule() -> Schedule {
        let r1 = Round::new(vec![
            open_match(["A", "B", "C", "D"]),
            open_match(["E", "F", "G", "H"]),
        ]);
        let r2 = Round::skipped("holiday");
        let r3 = Round::new(vec![open_match(["A", "C", "E", "G"])]);
        let r4 = Round::new(vec![open_match(["B", "D", "F", "H"])]);
        Schedule::new(vec![r1, r2, r3, r4], 3, Vec::new())
    }

    #[test]
    fn test_round_queries() {
        let round = Round::new(vec![open_match(["A", "B", "C", "D"])]);
        assert_eq!(round.len(), 1);
        assert!(round.contains_participant("A"));
        assert!(!round.contains_participant("E"));
        assert_eq!(round.appearance_count("A"), 1);
        assert!(round.label().is_none());
    }

    #[test]
    fn test_skipped_round() {
        let round = Round::skipped("holiday");
        assert!(round.is_empty());
        assert_eq!(round.label(), Some("holiday"));
    }

    #[test]
    fn test_schedule_counts() {
        let s = sample_schedule();
        assert_eq!(s.num_rounds(), 4);
        assert_eq!(s.num_matches(), 4);
        assert_eq!(s.num_weeks(), 2); // 4 rounds / 3 per week, rounded up
    }

    #[test]
    fn test_weeks_chunking() {
        let s = sample_schedule();
        let weeks: Vec<&[Round]> = s.weeks().collect();
        assert_eq!(weeks.len(), 2);
        assert_eq!(weeks[0].len(), 3);
        assert_eq!(weeks[1].len(), 1);
    }

    #[test]
    fn test_appearance_counts() {
        let s = sample_schedule();
        assert_eq!(s.appearance_count("A"), 2);
        assert_eq!(s.appearance_count("H"), 2);
        assert_eq!(s.appearance_count("Z"), 0);
        assert_eq!(s.co_appearance_count("A", "C"), 2);
        assert_eq!(s.co_appearance_count("A", "H"), 0);
    }

    #[test]
    fn test_partner_and_opponent_counts() {
        let m = Match::teamed(
            Team::new("A", "B").unwrap(),
            Team::new("C", "D").unwrap(),
        )
        .unwrap();
        let s = Schedule::new(vec![Round::new(vec![m])], 3, Vec::new());
        assert_eq!(s.partner_count("A", "B"), 1);
        assert_eq!(s.opponent_count("A", "C"), 1);
        assert_eq!(s.opponent_count("A", "B"), 0);
    }

    #[test]
    fn test_leftover_reported() {
        let s = Schedule::new(vec![], 3, vec![open_match(["A", "B", "C", "D"])]);
        assert_eq!(s.num_matches(), 0);
        assert_eq!(s.leftover().len(), 1);
    }

    #[test]
    fn test_participants_first_seen_order() {
        let s = sample_schedule();
        assert_eq!(
            s.participants(),
            vec!["A", "B", "C", "D", "E", "F", "G", "H"]
        );
    }

    #[test]
    fn test_schedule_serde_round_trip() {
        let s = sample_schedule();
        let json = serde_json::to_string(&s).unwrap();
        let back: Schedule = serde_json::from_str(&json).unwrap();
        assert_eq!(s, back);
    }
}
