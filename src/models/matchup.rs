//! Matches and match worklists.
//!
//! A `Match` is a single contest of exactly four mutually distinct
//! participants, either four individuals or two teams of two, with an
//! optional coordinator who administers it. Matches are immutable once
//! created; the coordinator is assigned at most once, at creation or at
//! round-assignment time.

use serde::{Deserialize, Serialize};

use crate::error::{GenerationError, GenerationErrorKind};
use crate::models::{Participant, Team};

/// The four participants of a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lineup {
    /// Four individual participants.
    Singles([Participant; 4]),
    /// Two teams of two.
    Teams(Team, Team),
}

/// A single contest of four distinct participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    lineup: Lineup,
    coordinator: Option<Participant>,
}

impl Match {
    /// Creates a four-individual match, rejecting repeated participants.
    pub fn open(
        p1: impl Into<Participant>,
        p2: impl Into<Participant>,
        p3: impl Into<Participant>,
        p4: impl Into<Participant>,
    ) -> Result<Self, GenerationError> {
        let players = [p1.into(), p2.into(), p3.into(), p4.into()];
        for i in 0..players.len() {
            for j in (i + 1)..players.len() {
                if players[i] == players[j] {
                    return Err(GenerationError::new(
                        GenerationErrorKind::DuplicateInMatch,
                        format!("participant '{}' appears twice in match", players[i]),
                    ));
                }
            }
        }
        Ok(Self {
            lineup: Lineup::Singles(players),
            coordinator: None,
        })
    }

    /// Creates a team-vs-team match, rejecting teams that share a player.
    pub fn teamed(team1: Team, team2: Team) -> Result<Self, GenerationError> {
        if team1.shares_player(&team2) {
            return Err(GenerationError::new(
                GenerationErrorKind::DuplicateInMatch,
                "opposing teams share a participant",
            ));
        }
        Ok(Self {
            lineup: Lineup::Teams(team1, team2),
            coordinator: None,
        })
    }

    /// Assigns the coordinator. Exactly one assignment is allowed and the
    /// coordinator must be one of the match's four participants.
    pub fn with_coordinator(
        mut self,
        coordinator: impl Into<Participant>,
    ) -> Result<Self, GenerationError> {
        let coordinator = coordinator.into();
        if self.coordinator.is_some() {
            return Err(GenerationError::new(
                GenerationErrorKind::CoordinatorAlreadyAssigned,
                "match already has a coordinator",
            ));
        }
        if !self.contains(&coordinator) {
            return Err(GenerationError::new(
                GenerationErrorKind::CoordinatorNotInMatch,
                format!("coordinator '{coordinator}' is not in the match"),
            ));
        }
        self.coordinator = Some(coordinator);
        Ok(self)
    }

    /// All four participants.
    pub fn players(&self) -> [&str; 4] {
        match &self.lineup {
            Lineup::Singles(p) => [&p[0], &p[1], &p[2], &p[3]],
            Lineup::Teams(t1, t2) => {
                let [a, b] = t1.players();
                let [c, d] = t2.players();
                [a, b, c, d]
            }
        }
    }

    /// The two teams, when the match was built from teams.
    pub fn teams(&self) -> Option<(&Team, &Team)> {
        match &self.lineup {
            Lineup::Singles(_) => None,
            Lineup::Teams(t1, t2) => Some((t1, t2)),
        }
    }

    /// The assigned coordinator, if any.
    pub fn coordinator(&self) -> Option<&str> {
        self.coordinator.as_deref()
    }

    /// Whether the participant plays in this match.
    pub fn contains(&self, participant: &str) -> bool {
        self.players().iter().any(|p| *p == participant)
    }

    /// Whether all of the given participants play in this match.
    pub fn contains_all<'a, I: IntoIterator<Item = &'a str>>(&self, participants: I) -> bool {
        participants.into_iter().all(|p| self.contains(p))
    }

    /// Whether the two participants are on the same team. Always false for
    /// singles matches.
    pub fn same_team(&self, p1: &str, p2: &str) -> bool {
        match &self.lineup {
            Lineup::Singles(_) => false,
            Lineup::Teams(t1, t2) => {
                p1 != p2
                    && ((t1.contains(p1) && t1.contains(p2))
                        || (t2.contains(p1) && t2.contains(p2)))
            }
        }
    }

    /// Whether the two participants are on opposing teams. Always false for
    /// singles matches.
    pub fn opposing(&self, p1: &str, p2: &str) -> bool {
        match &self.lineup {
            Lineup::Singles(_) => false,
            Lineup::Teams(t1, t2) => {
                (t1.contains(p1) && t2.contains(p2)) || (t2.contains(p1) && t1.contains(p2))
            }
        }
    }
}

/// An ordered collection of matches: the generator worklist, and the building
/// block for rounds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchList {
    matches: Vec<Match>,
}

impl MatchList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a match.
    pub fn push(&mut self, m: Match) {
        self.matches.push(m);
    }

    /// Number of matches.
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Iterates matches in order.
    pub fn iter(&self) -> impl Iterator<Item = &Match> {
        self.matches.iter()
    }

    /// Consumes the list into its matches.
    pub fn into_vec(self) -> Vec<Match> {
        self.matches
    }

    /// Distinct participants, in first-seen order.
    pub fn participants(&self) -> Vec<Participant> {
        let mut seen = Vec::new();
        for m in &self.matches {
            for p in m.players() {
                if !seen.iter().any(|s: &Participant| s == p) {
                    seen.push(p.to_string());
                }
            }
        }
        seen
    }

    /// Number of matches including the participant.
    pub fn appearance_count(&self, participant: &str) -> usize {
        self.matches.iter().filter(|m| m.contains(participant)).count()
    }

    /// Number of matches in which both participants are present, regardless
    /// of team.
    pub fn co_appearance_count(&self, p1: &str, p2: &str) -> usize {
        self.matches
            .iter()
            .filter(|m| m.contains(p1) && m.contains(p2))
            .count()
    }

    /// Number of matches in which the two participants share a team.
    pub fn partner_count(&self, p1: &str, p2: &str) -> usize {
        self.matches.iter().filter(|m| m.same_team(p1, p2)).count()
    }

    /// Number of matches in which the two participants are on opposing teams.
    pub fn opponent_count(&self, p1: &str, p2: &str) -> usize {
        self.matches.iter().filter(|m| m.opposing(p1, p2)).count()
    }

    /// Whether any match includes the participant.
    pub fn contains_participant(&self, participant: &str) -> bool {
        self.matches.iter().any(|m| m.contains(participant))
    }
}

impl FromIterator<Match> for MatchList {
    fn from_iter<I: IntoIterator<Item = Match>>(iter: I) -> Self {
        Self {
            matches: iter.into_iter().collect(),
        }
    }
}
