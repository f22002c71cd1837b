//! CA Journey core data models.
//!
//! This crate defines the curriculum document that every other crate reads:
//! stages, groups, training modules, the exam attempt log and the derived
//! milestone view.

#![warn(missing_docs)]

// Identities
mod id;

// Status vocabulary
mod status;

// Curriculum structure
mod requirement;
mod training;
mod profile;
mod catalogue;

// History and views
mod attempt;
mod milestone;
mod peer;

mod error;

// Re-exports
pub use id::*;

pub use status::{Status, EntryRoute, CourseLevel};
pub use requirement::{Requirement, Group};
pub use training::{TrainingModule, Articleship, ARTICLESHIP_TERM_MONTHS};
pub use profile::{
    CurriculumProfile, FoundationStage, IntermediateStage, FinalStage,
    SelfPacedModules, SpomSet, GroupSlot, ExamStage, TrainingSlot,
};
pub use attempt::{
    ExamAttempt, AttemptGroup, SubjectResult, AttemptOutcome,
    EXEMPTION_MARKS, SUBJECT_PASS_MARKS, AGGREGATE_PASS_RATIO,
};
pub use milestone::{Milestone, MilestoneKind};
pub use peer::PeerProfile;
pub use error::{ProfileError, Result};

/// Calendar date type used throughout the document (`YYYY-MM-DD`).
pub type Date = chrono::NaiveDate;
