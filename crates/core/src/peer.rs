//! Read-only profiles of other students.

use serde::{Deserialize, Serialize};
use crate::id::OwnerId;
use crate::profile::CurriculumProfile;

/// Another student's profile as shared with peers.
///
/// The attempt log is private and is always emptied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerProfile {
    /// Owner of the source profile
    pub id: OwnerId,

    /// Overall completion percentage at the time of sharing
    pub progress_percentage: u8,

    #[serde(flatten)]
    profile: CurriculumProfile,
}

impl PeerProfile {
    /// Wrap a profile for sharing, dropping its attempt log.
    pub fn new(id: OwnerId, mut profile: CurriculumProfile, progress_percentage: u8) -> Self {
        profile.attempts.clear();
        Self {
            id,
            progress_percentage,
            profile,
        }
    }

    /// Borrow the shared profile.
    pub fn profile(&self) -> &CurriculumProfile {
        &self.profile
    }

    /// The profile to render, with an empty attempt log.
    pub fn into_view(mut self) -> CurriculumProfile {
        self.profile.attempts.clear();
        self.profile
    }
}
