//! Precondition errors for profile documents.

use crate::Date;

/// Result type for profile operations.
pub type Result<T> = std::result::Result<T, ProfileError>;

/// A profile, or an edit to it, violates a structural precondition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    /// Foundation route profile without a Foundation stage
    #[error("Foundation route profile has no Foundation stage")]
    MissingFoundation,

    /// Marks above the maximum
    #[error("Marks out of range for {id}: {marks} (max 100)")]
    MarksOutOfRange {
        /// Requirement id
        id: String,
        /// Offending value
        marks: u8,
    },

    /// A required text field is blank
    #[error("Field must not be empty: {0}")]
    EmptyField(&'static str),

    /// No requirement with this id
    #[error("Unknown requirement: {0}")]
    UnknownRequirement(String),

    /// End date precedes start date
    #[error("End date {end} is before start date {start}")]
    EndBeforeStart {
        /// Start date
        start: Date,
        /// End date
        end: Date,
    },
}
