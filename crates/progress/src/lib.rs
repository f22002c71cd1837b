//! Progress Tracking
//!
//! Status roll-up, overall completion, the milestone timeline and the
//! editing surface that keeps derived state consistent.

#![warn(missing_docs)]

pub mod aggregator;
pub mod sequencer;
pub mod editor;
pub mod onboarding;
pub mod attempts;
pub mod summary;
mod error;

pub use aggregator::{aggregate, overall_progress, percent, progress_breakdown, ProgressBreakdown, UnitTally};
pub use sequencer::{sequence, current_marker, current_milestone, CurrentMarker};
pub use editor::{ProfileEditor, Access};
pub use onboarding::{onboard, OnboardingDetails, StudyChoice, ONBOARDING_MOCK_MARKS};
pub use attempts::AttemptDraft;
pub use summary::{journey_phase, peer_profile, JourneyPhase};
pub use error::{EditError, Result};
