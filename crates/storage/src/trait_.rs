//! Storage trait abstraction.

use async_trait::async_trait;
use journey_core::{CurriculumProfile, OwnerId, ProfileError};

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Transport error talking to the remote store
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote store answered with a non-success status
    #[error("Remote store error (status {status}): {message}")]
    Remote {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// A stored document failed validation
    #[error("Invalid profile: {0}")]
    Invalid(#[from] ProfileError),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Where profiles live.
///
/// Saves are whole-document and last-write-wins.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Load the profile owned by `owner`, if one has been saved.
    async fn load(&self, owner: &OwnerId) -> Result<Option<CurriculumProfile>>;

    /// Save (create or replace) the profile owned by `owner`.
    async fn save(&mut self, owner: &OwnerId, profile: &CurriculumProfile) -> Result<()>;

    /// Owners with a saved profile.
    async fn list_owners(&self) -> Result<Vec<OwnerId>>;
}
