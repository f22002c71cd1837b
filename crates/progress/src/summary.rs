//! Coarse journey summaries for headers and peer listings.

use journey_core::{CourseLevel, CurriculumProfile, ExamStage, OwnerId, PeerProfile, Status};
use serde::Serialize;
use crate::aggregator::overall_progress;

/// Headline stage of a student's journey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum JourneyPhase {
    /// Working towards Foundation
    Beginning,
    /// At Intermediate
    Intermediate,
    /// At Final
    Final,
    /// Final passed and articleship served
    Graduated,
}

impl JourneyPhase {
    /// Short label.
    pub fn as_str(self) -> &'static str {
        match self {
            JourneyPhase::Beginning => "Beginning",
            JourneyPhase::Intermediate => "Intermediate",
            JourneyPhase::Final => "Final",
            JourneyPhase::Graduated => "Graduated",
        }
    }
}

impl std::fmt::Display for JourneyPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Headline phase, from the Final groups, the articleship and `currentLevel`.
pub fn journey_phase(profile: &CurriculumProfile) -> JourneyPhase {
    let final_passed = profile
        .groups(ExamStage::Final)
        .iter()
        .all(|group| group.status() == Status::Completed);
    if final_passed && profile.articleship.status == Status::Completed {
        return JourneyPhase::Graduated;
    }
    match profile.current_level {
        CourseLevel::Final => JourneyPhase::Final,
        CourseLevel::Intermediate => JourneyPhase::Intermediate,
        CourseLevel::Foundation => JourneyPhase::Beginning,
    }
}

/// Share a profile with peers: attempts dropped, percentage attached.
pub fn peer_profile(owner: OwnerId, profile: &CurriculumProfile) -> PeerProfile {
    PeerProfile::new(owner, profile.clone(), overall_progress(profile))
}
