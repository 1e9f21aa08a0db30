//! A team of two participants.

use serde::{Deserialize, Serialize};

use crate::error::{GenerationError, GenerationErrorKind};
use crate::models::Participant;

/// Exactly two distinct participants, unordered.
///
/// `Team::new("A", "B")` and `Team::new("B", "A")` compare equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    player1: Participant,
    player2: Participant,
}

impl Team {
    /// Creates a team, rejecting a participant paired with itself.
    pub fn new(
        player1: impl Into<Participant>,
        player2: impl Into<Participant>,
    ) -> Result<Self, GenerationError> {
        let player1 = player1.into();
        let player2 = player2.into();
        if player1 == player2 {
            return Err(GenerationError::new(
                GenerationErrorKind::DuplicateInMatch,
                format!("participant '{player1}' cannot be paired with itself"),
            ));
        }
        Ok(Self { player1, player2 })
    }

    /// Both players.
    pub fn players(&self) -> [&str; 2] {
        [&self.player1, &self.player2]
    }

    /// Whether the team includes the participant.
    pub fn contains(&self, participant: &str) -> bool {
        self.player1 == participant || self.player2 == participant
    }

    /// Whether the two teams share any participant.
    pub fn shares_player(&self, other: &Team) -> bool {
        other.contains(&self.player1) || other.contains(&self.player2)
    }
}

impl PartialEq for Team {
    fn eq(&self, other: &Self) -> bool {
        (self.player1 == other.player1 && self.player2 == other.player2)
            || (self.player1 == other.player2 && self.player2 == other.player1)
    }
}

impl Eq for Team {}
