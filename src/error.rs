//! Errors raised by generation and scheduling.
//!
//! Two categories share one type:
//! - Precondition violations (roster too small, odd team count): the input
//!   cannot produce a valid result.
//! - Invariant violations (uneven team counts, exhausted pairing): the
//!   generated data failed a consistency check.
//!
//! All errors are raised synchronously at the point of detection. A failed
//! generation run is discarded wholesale; retrying with a fresh random seed
//! is the caller's decision.

use std::fmt;

/// An error produced during pairing, match generation, or scheduling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationError {
    /// Error category.
    pub kind: GenerationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of generation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationErrorKind {
    /// The roster has fewer participants than the operation requires.
    RosterTooSmall,
    /// The roster contains the same participant twice.
    DuplicateParticipant,
    /// A match or team was built with a repeated participant.
    DuplicateInMatch,
    /// A coordinator was assigned who is not part of the match.
    CoordinatorNotInMatch,
    /// A coordinator was assigned to a match that already has one.
    CoordinatorAlreadyAssigned,
    /// Team-vs-team matches require an even number of teams.
    OddTeamCount,
    /// Not every participant appears in the same number of teams.
    UnevenTeamCounts,
    /// No valid pairing exists for the remaining participants or teams.
    PairingExhausted,
}

impl GenerationError {
    pub(crate) fn new(kind: GenerationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for GenerationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_message() {
        let err = GenerationError::new(GenerationErrorKind::RosterTooSmall, "need 4 participants");
        assert_eq!(err.to_string(), "need 4 participants");
        assert_eq!(err.kind, GenerationErrorKind::RosterTooSmall);
    }
}
