//! Conflict-free round scheduling.
//!
//! # Algorithm
//!
//! The worklist is drained into rounds. Within a round, each pick prefers
//! the match containing the most participants whose remaining-worklist
//! appearance count is minimal (so nearly-exhausted participants play
//! early); among equally good matches the latest worklist positions win,
//! uniform random within that trailing run. A match is only eligible while
//! all four participants are under the per-round and per-week caps. After a
//! round closes, matches involving participants who sat out move to the
//! back of the worklist, where the tie-break picks them up first.
//!
//! Caps so tight that nothing can ever be placed leave the remainder in
//! `Schedule::leftover` after a full week of empty rounds, rather than
//! looping.

use std::collections::HashMap;

use log::debug;
use rand::Rng;

use crate::error::GenerationError;
use crate::models::{Match, MatchList, Round, Schedule};

/// Partitions a match worklist into an ordered sequence of rounds.
#[derive(Debug, Clone)]
pub struct RoundScheduler {
    per_round_cap: usize,
    max_matches_per_round: Option<usize>,
    max_per_week: Option<usize>,
    rounds_per_week: usize,
    excluded_slots: HashMap<usize, String>,
    balance_coordinators: bool,
}

impl Default for RoundScheduler {
    fn default() -> Self {
        Self {
            per_round_cap: 1,
            max_matches_per_round: None,
            max_per_week: None,
            rounds_per_week: 3,
            excluded_slots: HashMap::new(),
            balance_coordinators: false,
        }
    }
}

impl RoundScheduler {
    /// Creates a scheduler with the default configuration: one appearance
    /// per participant per round, three rounds per week, no weekly cap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum appearances per participant within one round (default 1).
    pub fn with_per_round_cap(mut self, cap: usize) -> Self {
        self.per_round_cap = cap;
        self
    }

    /// Caps the number of matches per round.
    pub fn with_max_matches_per_round(mut self, max: usize) -> Self {
        self.max_matches_per_round = Some(max);
        self
    }

    /// Maximum appearances per participant within one week.
    pub fn with_max_per_week(mut self, max: usize) -> Self {
        self.max_per_week = Some(max);
        self
    }

    /// Number of rounds grouped into a week (default 3, minimum 1).
    pub fn with_rounds_per_week(mut self, rounds: usize) -> Self {
        self.rounds_per_week = rounds.max(1);
        self
    }

    /// Marks a round slot as excluded: it is emitted as an empty round with
    /// the given label, and no participant counters are consumed.
    pub fn with_excluded_slot(mut self, slot: usize, label: impl Into<String>) -> Self {
        self.excluded_slots.insert(slot, label.into());
        self
    }

    /// Assigns a coordinator to each placed match that lacks one, choosing
    /// the member with the fewest coordinator duties so far.
    pub fn with_coordinator_balancing(mut self) -> Self {
        self.balance_coordinators = true;
        self
    }

    /// Schedules the worklist into rounds.
    ///
    /// Every input match ends up either in a round or in the schedule's
    /// leftover; nothing is dropped.
    pub fn schedule<R: Rng>(
        &self,
        worklist: MatchList,
        rng: &mut R,
    ) -> Result<Schedule, GenerationError> {
        let players = worklist.participants();
        let index: HashMap<&str, usize> = players
            .iter()
            .enumerate()
            .map(|(i, p)| (p.as_str(), i))
            .collect();

        let mut remaining = worklist.into_vec();
        let mut rounds: Vec<Round> = Vec::new();
        let mut week_counts = vec![0usize; players.len()];
        let mut coordinator_counts = vec![0usize; players.len()];
        let mut slot = 0usize;
        let mut empty_streak = 0usize;

        while !remaining.is_empty() {
            // The weekly reset happens for excluded slots too: a new week
            // starts whether or not play happens on its first slot.
            if slot % self.rounds_per_week == 0 {
                week_counts.iter_mut().for_each(|c| *c = 0);
            }
            if let Some(label) = self.excluded_slots.get(&slot) {
                rounds.push(Round::skipped(label.clone()));
                slot += 1;
                continue;
            }

            let mut day_counts = vec![0usize; players.len()];
            let mut picked: Vec<Match> = Vec::new();

            loop {
                let Some(pos) = self.pick_match(&remaining, &index, &day_counts, &week_counts, rng)
                else {
                    break;
                };
                let mut m = remaining.remove(pos);
                for p in m.players() {
                    let i = index[p];
                    day_counts[i] += 1;
                    week_counts[i] += 1;
                }
                if self.balance_coordinators && m.coordinator().is_none() {
                    let pick = Self::least_burdened(&m, &index, &coordinator_counts);
                    coordinator_counts[index[pick.as_str()]] += 1;
                    m = m.with_coordinator(pick)?;
                }
                picked.push(m);

                if self
                    .max_matches_per_round
                    .is_some_and(|max| picked.len() >= max)
                {
                    break;
                }
            }

            if picked.is_empty() {
                empty_streak += 1;
            } else {
                empty_streak = 0;
            }
            rounds.push(Round::new(picked));
            slot += 1;

            Self::move_unplayed_to_back(&mut remaining, &index, &day_counts);

            // A whole week of empty rounds straddles a weekly-counter reset,
            // so the caps can never admit another match.
            if empty_streak >= self.rounds_per_week {
                break;
            }
        }

        debug!(
            "scheduled {} rounds ({} matches, {} leftover)",
            rounds.len(),
            rounds.iter().map(Round::len).sum::<usize>(),
            remaining.len()
        );
        Ok(Schedule::new(rounds, self.rounds_per_week, remaining))
    }

    /// Position of the next match for the current round, or `None` when no
    /// remaining match fits under the caps.
    ///
    /// Preference order: most participants from the minimum-appearance set
    /// (appearances counted over the remaining worklist, among participants
    /// still under the per-round cap); on ties, the trailing run of tied
    /// worklist positions, uniform random within it.
    fn pick_match<R: Rng>(
        &self,
        remaining: &[Match],
        index: &HashMap<&str, usize>,
        day_counts: &[usize],
        week_counts: &[usize],
        rng: &mut R,
    ) -> Option<usize> {
        let min_set = self.min_appearance_set(remaining, index, day_counts);

        let mut best_score = 0usize;
        let mut candidates: Vec<usize> = Vec::new();
        for (pos, m) in remaining.iter().enumerate() {
            if !self.eligible(m, index, day_counts, week_counts) {
                continue;
            }
            let score = m
                .players()
                .into_iter()
                .filter(|p| min_set[index[*p]])
                .count();
            if candidates.is_empty() || score > best_score {
                best_score = score;
                candidates.clear();
                candidates.push(pos);
            } else if score == best_score {
                candidates.push(pos);
            }
        }

        if candidates.is_empty() {
            return None;
        }
        // Carried-over matches sit at the back of the worklist; among
        // equally good picks the trailing run wins, so participants who sat
        // out the previous round play first.
        let mut start = candidates.len() - 1;
        while start > 0 && candidates[start - 1] + 1 == candidates[start] {
            start -= 1;
        }
        let run = &candidates[start..];
        Some(run[rng.random_range(0..run.len())])
    }

    /// Whether all four participants are under the per-round and per-week
    /// caps.
    fn eligible(
        &self,
        m: &Match,
        index: &HashMap<&str, usize>,
        day_counts: &[usize],
        week_counts: &[usize],
    ) -> bool {
        m.players().iter().all(|p| {
            let i = index[*p];
            day_counts[i] < self.per_round_cap
                && self.max_per_week.is_none_or(|max| week_counts[i] < max)
        })
    }

    /// Membership mask of the participants (still under the per-round cap)
    /// with the fewest appearances in the remaining worklist.
    fn min_appearance_set(
        &self,
        remaining: &[Match],
        index: &HashMap<&str, usize>,
        day_counts: &[usize],
    ) -> Vec<bool> {
        let mut appearances = vec![0usize; day_counts.len()];
        for m in remaining {
            for p in m.players() {
                appearances[index[p]] += 1;
            }
        }

        let min = appearances
            .iter()
            .zip(day_counts)
            .filter(|&(_, &day)| day < self.per_round_cap)
            .map(|(&a, _)| a)
            .min();

        let mut mask = vec![false; day_counts.len()];
        if let Some(min) = min {
            for i in 0..mask.len() {
                mask[i] = day_counts[i] < self.per_round_cap && appearances[i] == min;
            }
        }
        mask
    }

    /// The match member with the fewest coordinator assignments so far,
    /// first-encountered on ties.
    fn least_burdened(m: &Match, index: &HashMap<&str, usize>, counts: &[usize]) -> String {
        let players = m.players();
        let mut best = players[0];
        for p in &players[1..] {
            if counts[index[*p]] < counts[index[best]] {
                best = *p;
            }
        }
        best.to_string()
    }

    /// Moves every remaining match containing a participant who sat out the
    /// just-closed round to the back of the worklist, preserving relative
    /// order, so those participants are favored in the next round.
    fn move_unplayed_to_back(
        remaining: &mut Vec<Match>,
        index: &HashMap<&str, usize>,
        day_counts: &[usize],
    ) {
        let (moved, kept): (Vec<Match>, Vec<Match>) = remaining
            .drain(..)
            .partition(|m| m.players().iter().any(|p| day_counts[index[*p]] == 0));
        remaining.extend(kept);
        remaining.extend(moved);
    }
}
