//! Team-of-two generation.
//!
//! Builds a `TeamList` from a roster: the full set of pair combinations,
//! repeated whole passes while another pass still fits under the minimum,
//! then randomized filler passes until the minimum games per participant is
//! met and the total team count is even (teams must later pair up into
//! matches).
//!
//! Filler pairing is greedy: participants in random order, each paired with
//! whichever remaining candidate has shared a team with them the fewest
//! times so far.

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{GenerationError, GenerationErrorKind};
use crate::models::{Roster, Team};

/// How many reshuffled filler passes to attempt before giving up.
///
/// With a duplicated odd roster the greedy pass can strand two copies of the
/// same participant at the end of the shuffled pool; a fresh shuffle almost
/// always resolves it.
const FILLER_ATTEMPTS: usize = 32;

/// An ordered collection of teams with pairing-frequency queries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamList {
    teams: Vec<Team>,
}

impl TeamList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a team.
    pub fn push(&mut self, team: Team) {
        self.teams.push(team);
    }

    /// Number of teams.
    pub fn len(&self) -> usize {
        self.teams.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Iterates teams in order.
    pub fn iter(&self) -> impl Iterator<Item = &Team> {
        self.teams.iter()
    }

    /// Number of teams including the participant.
    pub fn count_including(&self, participant: &str) -> usize {
        self.teams.iter().filter(|t| t.contains(participant)).count()
    }

    /// Number of teams pairing exactly these two participants.
    pub fn count_pair(&self, p1: &str, p2: &str) -> usize {
        self.teams
            .iter()
            .filter(|t| t.contains(p1) && t.contains(p2))
            .count()
    }

    /// Teams per participant, asserting every participant has the same count.
    ///
    /// Returns 0 for an empty list. An uneven distribution indicates a bug
    /// in the generation pass and is reported as `UnevenTeamCounts`.
    pub fn teams_per_player(&self) -> Result<usize, GenerationError> {
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for team in &self.teams {
            for player in team.players() {
                match counts.iter_mut().find(|(name, _)| *name == player) {
                    Some((_, count)) => *count += 1,
                    None => counts.push((player, 1)),
                }
            }
        }

        let Some(&(_, first)) = counts.first() else {
            return Ok(0);
        };
        if counts.iter().any(|&(_, count)| count != first) {
            return Err(GenerationError::new(
                GenerationErrorKind::UnevenTeamCounts,
                "not all participants appear in the same number of teams",
            ));
        }
        Ok(first)
    }
}

impl FromIterator<Team> for TeamList {
    fn from_iter<I: IntoIterator<Item = Team>>(iter: I) -> Self {
        Self {
            teams: iter.into_iter().collect(),
        }
    }
}

/// Generates balanced teams of two from a roster.
#[derive(Debug, Clone, Default)]
pub struct PairGenerator {
    min_games_per_player: usize,
}

impl PairGenerator {
    /// Creates a generator with no minimum-games constraint.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum number of teams each participant must appear in.
    pub fn with_min_games(mut self, min_games_per_player: usize) -> Self {
        self.min_games_per_player = min_games_per_player;
        self
    }

    /// Every unordered pair of distinct participants, exactly once, in
    /// deterministic roster order.
    pub fn all_combinations(roster: &Roster) -> Result<TeamList, GenerationError> {
        let names = roster.names();
        let mut teams = TeamList::new();
        for i in 0..names.len() {
            for j in (i + 1)..names.len() {
                teams.push(Team::new(names[i].clone(), names[j].clone())?);
            }
        }
        Ok(teams)
    }

    /// Builds the full team list: combinations, then filler passes until the
    /// minimum is met and the team count is even.
    pub fn generate<R: Rng>(
        &self,
        roster: &Roster,
        rng: &mut R,
    ) -> Result<TeamList, GenerationError> {
        if roster.len() < 2 {
            return Err(GenerationError::new(
                GenerationErrorKind::RosterTooSmall,
                format!("pair generation needs at least 2 participants, got {}", roster.len()),
            ));
        }

        let mut teams = Self::all_combinations(roster)?;
        let per_pass = teams.teams_per_player()?;

        // Whole combination passes while another one still fits under the
        // minimum.
        while teams.teams_per_player()? + per_pass < self.min_games_per_player {
            for team in Self::all_combinations(roster)?.iter() {
                teams.push(team.clone());
            }
        }

        // Filler passes to reach the minimum.
        while teams.teams_per_player()? < self.min_games_per_player {
            for team in self.filler_teams(roster, &teams, rng)? {
                teams.push(team);
            }
        }

        // Filler passes until the overall count is even.
        while teams.len() % 2 != 0 {
            for team in self.filler_teams(roster, &teams, rng)? {
                teams.push(team);
            }
        }

        debug!(
            "generated {} teams, {} per participant",
            teams.len(),
            teams.teams_per_player()?
        );
        Ok(teams)
    }

    /// One randomized filler pass: every participant paired once (twice when
    /// the roster is odd and must be duplicated), greedily minimizing repeat
    /// pairings against `existing` and the teams formed earlier in the pass.
    pub fn filler_teams<R: Rng>(
        &self,
        roster: &Roster,
        existing: &TeamList,
        rng: &mut R,
    ) -> Result<Vec<Team>, GenerationError> {
        if roster.len() < 2 {
            return Err(GenerationError::new(
                GenerationErrorKind::RosterTooSmall,
                format!("filler teams need at least 2 participants, got {}", roster.len()),
            ));
        }

        let mut pool: Vec<&str> = roster.iter().collect();
        if pool.len() % 2 != 0 {
            let doubled = pool.clone();
            pool.extend(doubled);
        }

        for _ in 0..FILLER_ATTEMPTS {
            pool.shuffle(rng);
            if let Some(teams) = Self::greedy_pair(&pool, existing)? {
                return Ok(teams);
            }
        }
        Err(GenerationError::new(
            GenerationErrorKind::PairingExhausted,
            "filler pairing failed to converge after reshuffling",
        ))
    }

    /// Pairs a shuffled pool front to back. `Ok(None)` means the pass got
    /// stuck with only copies of the leading participant remaining.
    fn greedy_pair(
        pool: &[&str],
        existing: &TeamList,
    ) -> Result<Option<Vec<Team>>, GenerationError> {
        let mut pool = pool.to_vec();
        let mut formed: Vec<Team> = Vec::new();

        while !pool.is_empty() {
            let player1 = pool.remove(0);

            let mut best: Option<(usize, usize)> = None;
            for (i, &candidate) in pool.iter().enumerate() {
                if candidate == player1 {
                    continue;
                }
                let count = existing.count_pair(player1, candidate)
                    + formed
                        .iter()
                        .filter(|t| t.contains(player1) && t.contains(candidate))
                        .count();
                if best.map_or(true, |(_, c)| count < c) {
                    best = Some((i, count));
                }
            }

            let Some((i, _)) = best else {
                return Ok(None);
            };
            let player2 = pool.remove(i);
            formed.push(Team::new(player1, player2)?);
        }
        Ok(Some(formed))
    }
}
