//! Roster of tournament participants.
//!
//! An ordered sequence of unique participant identifiers. Order is only used
//! for deterministic iteration, not ranking.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{GenerationError, GenerationErrorKind};

/// A participant identifier. Opaque; unique within a roster.
pub type Participant = String;

/// An ordered sequence of unique participants.
///
/// Supplied once by the caller and never mutated. Generators iterate it in
/// the supplied order so that a fixed random seed reproduces a run exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    /// Creates a roster, rejecting duplicate identifiers.
    pub fn new(participants: Vec<Participant>) -> Result<Self, GenerationError> {
        let mut seen = HashSet::new();
        for p in &participants {
            if !seen.insert(p.as_str()) {
                return Err(GenerationError::new(
                    GenerationErrorKind::DuplicateParticipant,
                    format!("duplicate participant '{p}' in roster"),
                ));
            }
        }
        Ok(Self { participants })
    }

    /// Builds a roster from anything yielding name-like values.
    pub fn from_names<I, S>(names: I) -> Result<Self, GenerationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Participant>,
    {
        Self::new(names.into_iter().map(Into::into).collect())
    }

    /// Number of participants.
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Whether the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Iterates participants in roster order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.participants.iter().map(String::as_str)
    }

    /// Participant at a roster position.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.participants.get(index).map(String::as_str)
    }

    /// Whether the roster contains the participant.
    pub fn contains(&self, participant: &str) -> bool {
        self.participants.iter().any(|p| p == participant)
    }

    /// All participants, in roster order.
    pub fn names(&self) -> &[Participant] {
        &self.participants
    }
}
