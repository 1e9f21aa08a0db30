//! Pairing teams of two into 2v2 matches.
//!
//! Consumes an even-count `TeamList` and produces one match per team pair.
//! The pool is shuffled, then repeatedly the front team is matched against
//! the player-disjoint team whose four pairwise opponent counts (against the
//! matches built so far) have the lowest maximum, with mean as tie-break.

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{GenerationError, GenerationErrorKind};
use crate::generator::TeamList;
use crate::models::{Match, MatchList, Team};

/// Pairs teams into matches with minimized repeat opponents.
#[derive(Debug, Clone, Default)]
pub struct TeamMatchGenerator;

impl TeamMatchGenerator {
    /// Creates a generator.
    pub fn new() -> Self {
        Self
    }

    /// Builds one match per pair of teams.
    ///
    /// The team count must be even (`PairGenerator::generate` guarantees
    /// this). If some team can never find a player-disjoint partner because
    /// every other remaining team shares a player with it, the pairing is
    /// reported as exhausted rather than looping.
    pub fn generate<R: Rng>(
        &self,
        teams: &TeamList,
        rng: &mut R,
    ) -> Result<MatchList, GenerationError> {
        if teams.len() % 2 != 0 {
            return Err(GenerationError::new(
                GenerationErrorKind::OddTeamCount,
                format!("team-vs-team pairing needs an even team count, got {}", teams.len()),
            ));
        }

        let mut pool: Vec<Team> = teams.iter().cloned().collect();
        pool.shuffle(rng);

        let mut matches = MatchList::new();
        let mut stalled = 0usize;

        while !pool.is_empty() {
            let Some(best) = Self::best_opponent(&pool, &matches) else {
                // No disjoint partner for the front team; rotate and try the
                // next one. A full rotation without progress means no valid
                // pairing exists for the remainder.
                stalled += 1;
                if stalled >= pool.len() {
                    return Err(GenerationError::new(
                        GenerationErrorKind::PairingExhausted,
                        format!("{} teams left with no player-disjoint pairing", pool.len()),
                    ));
                }
                pool.rotate_left(1);
                continue;
            };
            stalled = 0;

            let team2 = pool.remove(best);
            let team1 = pool.remove(0);
            matches.push(Match::teamed(team1, team2)?);
        }

        debug!("paired {} teams into {} matches", teams.len(), matches.len());
        Ok(matches)
    }

    /// Index into `pool` of the best opponent for `pool[0]`: player-disjoint,
    /// minimizing the maximum of the four pairwise opponent counts, then the
    /// mean. First-found wins ties.
    fn best_opponent(pool: &[Team], matches: &MatchList) -> Option<usize> {
        let team1 = pool.first()?;
        let mut best: Option<(usize, usize, f64)> = None;

        for (i, candidate) in pool.iter().enumerate().skip(1) {
            if candidate.shares_player(team1) {
                continue;
            }

            let mut counts = [0usize; 4];
            let mut idx = 0;
            for p1 in team1.players() {
                for p2 in candidate.players() {
                    counts[idx] = matches.opponent_count(p1, p2);
                    idx += 1;
                }
            }
            let max = *counts.iter().max().unwrap_or(&0);
            let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;

            let replace = match best {
                None => true,
                Some((_, best_max, best_mean)) => {
                    max < best_max || (max == best_max && mean < best_mean)
                }
            };
            if replace {
                best = Some((i, max, mean));
            }
        }

        best.map(|(i, _, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn team(p1: &str, p2: &str) -> Team {
        Team::new(p1, p2).unwrap()
    }

    #[test]
    fn test_odd_team_count_is_error() {
        let teams: TeamList = vec![team("A", "B")].into_iter().collect();
        let mut rng = SmallRng::seed_from_u64(42);
        let err = TeamMatchGenerator::new().generate(&teams, &mut rng).unwrap_err();
        assert_eq!(err.kind, GenerationErrorKind::OddTeamCount);
    }

    #[test]
    fn test_disjointness_forces_pairing() {
        // A-B can only face C-D, and A-C can only face B-D.
        let teams: TeamList = vec![
            team("A", "B"),
            team("C", "D"),
            team("A", "C"),
            team("B", "D"),
        ]
        .into_iter()
        .collect();
        let mut rng = SmallRng::seed_from_u64(42);
        let matches = TeamMatchGenerator::new().generate(&teams, &mut rng).unwrap();

        assert_eq!(matches.len(), 2);
        assert_eq!(matches.opponent_count("A", "D"), 2);
        assert_eq!(matches.partner_count("A", "B"), 1);
        assert_eq!(matches.partner_count("A", "C"), 1);
        for m in matches.iter() {
            let players = m.players();
            for i in 0..4 {
                for j in (i + 1)..4 {
                    assert_ne!(players[i], players[j]);
                }
            }
        }
    }

    #[test]
    fn test_unpairable_pool_is_error() {
        // Both teams contain A; no disjoint pairing exists.
        let teams: TeamList = vec![team("A", "B"), team("A", "C")].into_iter().collect();
        let mut rng = SmallRng::seed_from_u64(42);
        let err = TeamMatchGenerator::new().generate(&teams, &mut rng).unwrap_err();
        assert_eq!(err.kind, GenerationErrorKind::PairingExhausted);
    }

    #[test]
    fn test_full_combination_pool_pairs_completely() {
        let roster = crate::models::Roster::from_names(["A", "B", "C", "D"]).unwrap();
        let teams = crate::generator::PairGenerator::all_combinations(&roster).unwrap();
        let mut rng = SmallRng::seed_from_u64(42);
        let matches = TeamMatchGenerator::new().generate(&teams, &mut rng).unwrap();
        // 6 teams over 4 players pair into 3 matches: each team's unique
        // disjoint complement.
        assert_eq!(matches.len(), 3);
        for p in roster.iter() {
            assert_eq!(matches.appearance_count(p), 3);
        }
    }
}
