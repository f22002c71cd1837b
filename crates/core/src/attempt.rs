//! Exam attempt records.

use serde::{Deserialize, Serialize};
use crate::id::{AttemptId, RequirementId};
use crate::status::CourseLevel;

/// Marks at or above which a subject earns an exemption.
pub const EXEMPTION_MARKS: u8 = 60;

/// Minimum marks per subject for a group pass.
pub const SUBJECT_PASS_MARKS: u8 = 40;

/// Minimum aggregate, as a fraction of the maximum, for a group pass.
pub const AGGREGATE_PASS_RATIO: f32 = 0.5;

/// Result of a group or of a whole attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttemptOutcome {
    /// Passed
    Pass,
    /// Not passed
    Fail,
}

/// Marks for one subject in an attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectResult {
    /// Subject sat
    pub subject_id: RequirementId,

    /// Subject name at the time of the attempt
    pub subject_name: String,

    /// Marks scored
    pub marks: u8,

    /// Scored high enough to be exempt next time
    pub is_exempt: bool,
}

impl SubjectResult {
    /// Record marks for a subject; the exemption flag follows from the marks.
    pub fn new(subject_id: RequirementId, subject_name: impl Into<String>, marks: u8) -> Self {
        Self {
            subject_id,
            subject_name: subject_name.into(),
            marks,
            is_exempt: marks >= EXEMPTION_MARKS,
        }
    }
}

/// A scored group of subjects within an attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptGroup {
    /// Group label
    pub name: String,

    /// Pass or fail
    pub status: AttemptOutcome,

    /// Per-subject marks
    pub subjects: Vec<SubjectResult>,

    /// Sum of subject marks
    pub total_marks: u32,
}

impl AttemptGroup {
    /// Score a set of subject results.
    ///
    /// A group passes when every subject reaches [`SUBJECT_PASS_MARKS`] and the
    /// aggregate reaches half the maximum. An empty group fails.
    pub fn score(name: impl Into<String>, subjects: Vec<SubjectResult>) -> Self {
        let total_marks: u32 = subjects.iter().map(|s| u32::from(s.marks)).sum();
        let every_subject = subjects.iter().all(|s| s.marks >= SUBJECT_PASS_MARKS);
        let max = subjects.len() as u32 * 100;
        let aggregate = max > 0 && total_marks as f32 / max as f32 >= AGGREGATE_PASS_RATIO;

        let status = if every_subject && aggregate {
            AttemptOutcome::Pass
        } else {
            AttemptOutcome::Fail
        };

        Self {
            name: name.into(),
            status,
            subjects,
            total_marks,
        }
    }
}

/// One sitting of an exam. Immutable once logged; replace or delete it instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamAttempt {
    /// Unique identifier
    pub id: AttemptId,

    /// Level sat
    pub level: CourseLevel,

    /// Term label, e.g. "May 2024"
    pub term: String,

    /// 1-based attempt counter for this level
    pub attempt_number: u32,

    /// Scored groups
    pub groups: Vec<AttemptGroup>,
}

impl ExamAttempt {
    /// Passed if any group passed.
    pub fn outcome(&self) -> AttemptOutcome {
        if self.groups.iter().any(|g| g.status == AttemptOutcome::Pass) {
            AttemptOutcome::Pass
        } else {
            AttemptOutcome::Fail
        }
    }

    /// Total marks across groups.
    pub fn total_marks(&self) -> u32 {
        self.groups.iter().map(|g| g.total_marks).sum()
    }
}
