//! Errors raised while editing a profile.

use journey_core::{AttemptId, CourseLevel, ProfileError};

/// Result type for editing operations.
pub type Result<T> = std::result::Result<T, EditError>;

/// Editing errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    /// The editor was opened read-only
    #[error("Profile is read-only")]
    ReadOnly,

    /// No attempt with this id
    #[error("Unknown exam attempt: {0}")]
    UnknownAttempt(AttemptId),

    /// Subject is not examined at this level
    #[error("Subject {id} is not part of the {level} exam")]
    UnknownSubject {
        /// Level of the attempt
        level: CourseLevel,
        /// Requested subject
        id: String,
    },

    /// Precondition violation in the profile itself
    #[error(transparent)]
    Profile(#[from] ProfileError),
}
