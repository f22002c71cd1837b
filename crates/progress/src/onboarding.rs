//! First-run setup: turn the user's answers into a profile.

use journey_core::{CourseLevel, CurriculumProfile, Date, EntryRoute, ProfileError, Status};
use tracing::info;

/// Marks recorded against papers completed automatically during onboarding.
pub const ONBOARDING_MOCK_MARKS: u8 = 60;

/// Who the student is and how they entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingDetails {
    /// Student name
    pub name: String,
    /// State of residence
    pub state: String,
    /// Entry route
    pub entry_route: EntryRoute,
    /// Registration date
    pub registration_date: Date,
}

/// What the student is studying for right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StudyChoice {
    /// Preparing for Foundation
    #[default]
    Foundation,
    /// Foundation done, studying for Intermediate
    Intermediate,
    /// Intermediate done, studying for Final
    Final,
}

impl std::str::FromStr for StudyChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "foundation" | "foundation_studying" => Ok(StudyChoice::Foundation),
            "intermediate" | "inter" | "inter_studying" => Ok(StudyChoice::Intermediate),
            "final" | "final_studying" => Ok(StudyChoice::Final),
            other => Err(format!("unknown study choice: {other}")),
        }
    }
}

/// Build the initial profile.
///
/// Studying for Intermediate or Final marks every Foundation paper Completed
/// with mock marks; studying for Final also completes both Intermediate
/// groups and ICITSS. Direct Entry then overrides the Foundation papers to
/// Exempted, whatever the choice.
pub fn onboard(details: OnboardingDetails, choice: StudyChoice) -> Result<CurriculumProfile, ProfileError> {
    if details.name.trim().is_empty() {
        return Err(ProfileError::EmptyField("name"));
    }
    if details.state.trim().is_empty() {
        return Err(ProfileError::EmptyField("state"));
    }

    let mut profile = CurriculumProfile::new(
        details.name.trim(),
        details.state.trim(),
        details.entry_route,
        details.registration_date,
    );

    if matches!(choice, StudyChoice::Intermediate | StudyChoice::Final) {
        if let Some(foundation) = profile.foundation.as_mut() {
            foundation.set_all(Status::Completed, Some(ONBOARDING_MOCK_MARKS));
        }
    }

    profile.current_level = match choice {
        StudyChoice::Final => {
            let inter = &mut profile.intermediate;
            inter.group1.set_all(Status::Completed, Some(ONBOARDING_MOCK_MARKS));
            inter.group2.set_all(Status::Completed, Some(ONBOARDING_MOCK_MARKS));
            inter.icitss.status = Status::Completed;
            CourseLevel::Final
        }
        StudyChoice::Intermediate => CourseLevel::Intermediate,
        StudyChoice::Foundation => CourseLevel::Foundation,
    };

    if details.entry_route == EntryRoute::DirectEntry {
        if let Some(foundation) = profile.foundation.as_mut() {
            foundation.set_all(Status::Exempted, None);
        }
    }

    info!(
        "Onboarded {} via {} at {}",
        profile.name, profile.entry_route, profile.current_level
    );
    Ok(profile)
}
