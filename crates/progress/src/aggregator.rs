//! Status aggregation and overall completion.
//!
//! Both functions are pure: they read a snapshot and never fail.

use journey_core::{CurriculumProfile, ExamStage, Requirement, Status, TrainingModule};
use serde::Serialize;

const FOUNDATION_UNITS: u32 = 4;
const STAGE_UNITS: u32 = 7;
const ARTICLESHIP_UNITS: u32 = 1;
const SELF_PACED_UNITS: u32 = 4;

/// Roll a collection of leaf requirements up into one status.
///
/// First match wins: all Completed/Exempted → Completed; any Failed → Failed;
/// any InProgress/Completed/Exempted → InProgress; otherwise Pending.
/// An empty collection is Pending.
pub fn aggregate(requirements: &[Requirement]) -> Status {
    Status::rollup(requirements.iter().map(|r| r.status))
}

/// Completed units out of a fixed weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct UnitTally {
    /// Units earned
    pub completed: u32,
    /// Units available
    pub total: u32,
}

impl UnitTally {
    fn new(completed: u32, total: u32) -> Self {
        Self {
            completed: completed.min(total),
            total,
        }
    }
}

/// Per-component unit counts behind the overall percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressBreakdown {
    /// Foundation papers; `None` when the route skips Foundation
    pub foundation: Option<UnitTally>,
    /// Intermediate subjects plus ICITSS
    pub intermediate: UnitTally,
    /// Articleship
    pub articleship: UnitTally,
    /// Self-paced modules A-D
    pub self_paced: UnitTally,
    /// Final subjects plus Advanced ICITSS
    pub final_stage: UnitTally,
}

impl ProgressBreakdown {
    fn tallies(&self) -> impl Iterator<Item = UnitTally> + '_ {
        self.foundation.into_iter().chain([
            self.intermediate,
            self.articleship,
            self.self_paced,
            self.final_stage,
        ])
    }

    /// Units earned across all components.
    pub fn completed(&self) -> u32 {
        self.tallies().map(|t| t.completed).sum()
    }

    /// Units available across all components: 23 with Foundation, 19 without.
    pub fn total(&self) -> u32 {
        self.tallies().map(|t| t.total).sum()
    }

    /// Rounded completion percentage.
    pub fn percentage(&self) -> u8 {
        percent(self.completed(), self.total())
    }
}

/// Integer percentage, rounding half up. A zero total yields 0.
pub fn percent(completed: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = u64::from(completed.min(total));
    let total = u64::from(total);
    ((200 * completed + total) / (2 * total)) as u8
}

/// Count each component against its fixed weight.
pub fn progress_breakdown(profile: &CurriculumProfile) -> ProgressBreakdown {
    let foundation = profile.entry_route.requires_foundation().then(|| {
        let passed = profile
            .foundation
            .as_ref()
            .map(|f| count(f.papers(), |s| s == Status::Completed))
            .unwrap_or(0);
        UnitTally::new(passed, FOUNDATION_UNITS)
    });

    let self_paced = profile
        .self_paced_modules
        .all()
        .iter()
        .filter(|r| r.status == Status::Completed)
        .count() as u32;

    ProgressBreakdown {
        foundation,
        intermediate: stage_tally(profile, ExamStage::Intermediate, &profile.intermediate.icitss),
        articleship: UnitTally::new(
            u32::from(profile.articleship.status == Status::Completed),
            ARTICLESHIP_UNITS,
        ),
        self_paced: UnitTally::new(self_paced, SELF_PACED_UNITS),
        final_stage: stage_tally(profile, ExamStage::Final, &profile.final_stage.adv_icitss),
    }
}

/// Overall completion, 0-100.
pub fn overall_progress(profile: &CurriculumProfile) -> u8 {
    progress_breakdown(profile).percentage()
}

fn stage_tally(profile: &CurriculumProfile, stage: ExamStage, module: &TrainingModule) -> UnitTally {
    let subjects: u32 = profile
        .groups(stage)
        .iter()
        .map(|g| count(g.subjects(), Status::is_done))
        .sum();
    let module = u32::from(module.status == Status::Completed);
    UnitTally::new(subjects + module, STAGE_UNITS)
}

fn count(requirements: &[Requirement], counts: impl Fn(Status) -> bool) -> u32 {
    requirements.iter().filter(|r| counts(r.status)).count() as u32
}
