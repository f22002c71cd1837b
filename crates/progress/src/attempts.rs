//! Building exam attempt records from user input.

use journey_core::{
    AttemptGroup, AttemptId, CourseLevel, CurriculumProfile, ExamAttempt, ProfileError,
    RequirementId, SubjectResult,
};
use crate::error::{EditError, Result};

/// Label of the single group an attempt's results are scored under.
pub const RESULT_GROUP: &str = "Result";

/// User input for a new attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptDraft {
    /// Level sat
    pub level: CourseLevel,

    /// Term label, e.g. "Nov 2024"
    pub term: String,

    /// Marks per subject, in entry order
    pub results: Vec<(RequirementId, u8)>,
}

impl AttemptDraft {
    /// Start a draft with no marks.
    pub fn new(level: CourseLevel, term: impl Into<String>) -> Self {
        Self {
            level,
            term: term.into(),
            results: Vec::new(),
        }
    }

    /// Add marks for a subject. Entering a subject again replaces its marks.
    pub fn with_marks(mut self, subject: impl Into<RequirementId>, marks: u8) -> Self {
        let subject = subject.into();
        match self.results.iter_mut().find(|(id, _)| *id == subject) {
            Some(entry) => entry.1 = marks,
            None => self.results.push((subject, marks)),
        }
        self
    }

    /// Resolve subjects against the profile and score the result.
    ///
    /// The attempt number counts earlier attempts at the same level.
    pub fn build(&self, profile: &CurriculumProfile) -> Result<ExamAttempt> {
        let number = profile.attempts_at(self.level) as u32 + 1;
        self.build_numbered(profile, AttemptId::new(), number)
    }

    pub(crate) fn build_numbered(
        &self,
        profile: &CurriculumProfile,
        id: AttemptId,
        attempt_number: u32,
    ) -> Result<ExamAttempt> {
        let term = self.term.trim();
        if term.is_empty() {
            return Err(ProfileError::EmptyField("term").into());
        }

        let subjects = profile.subjects_for_level(self.level);
        let mut results: Vec<SubjectResult> = Vec::with_capacity(self.results.len());
        for (id, marks) in &self.results {
            let subject = subjects
                .iter()
                .find(|s| &s.id == id)
                .ok_or_else(|| EditError::UnknownSubject {
                    level: self.level,
                    id: id.to_string(),
                })?;
            if *marks > 100 {
                return Err(ProfileError::MarksOutOfRange {
                    id: id.to_string(),
                    marks: *marks,
                }
                .into());
            }
            match results.iter_mut().find(|r| &r.subject_id == id) {
                Some(existing) => *existing = SubjectResult::new(id.clone(), &subject.name, *marks),
                None => results.push(SubjectResult::new(id.clone(), &subject.name, *marks)),
            }
        }

        let groups = if results.is_empty() {
            Vec::new()
        } else {
            vec![AttemptGroup::score(RESULT_GROUP, results)]
        };

        Ok(ExamAttempt {
            id,
            level: self.level,
            term: term.to_string(),
            attempt_number,
            groups,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use journey_core::{AttemptOutcome, Date, EntryRoute};

    fn profile() -> CurriculumProfile {
        CurriculumProfile::new("Dev", "Bihar", EntryRoute::Foundation, Date::from_ymd_opt(2024, 1, 1).unwrap())
    }

    #[test]
    fn test_build_scores_single_group() {
        let draft = AttemptDraft::new(CourseLevel::Intermediate, "May 2024")
            .with_marks("I1", 62)
            .with_marks("I2", 48);
        let attempt = draft.build(&profile()).unwrap();

        assert_eq!(attempt.attempt_number, 1);
        assert_eq!(attempt.groups.len(), 1);
        let group = &attempt.groups[0];
        assert_eq!(group.name, "Result");
        assert_eq!(group.total_marks, 110);
        assert_eq!(group.status, AttemptOutcome::Pass);
        assert!(group.subjects[0].is_exempt);
        assert_eq!(group.subjects[0].subject_name, "Paper 1: Advanced Accounting");
        assert!(!group.subjects[1].is_exempt);
    }

    #[test]
    fn test_reentered_marks_replace() {
        let draft = AttemptDraft::new(CourseLevel::Foundation, "Jun 2023")
            .with_marks("F1", 20)
            .with_marks("F1", 75);
        assert_eq!(draft.results, vec![(RequirementId::from("F1"), 75)]);
    }

    #[test]
    fn test_subject_from_other_level_rejected() {
        let draft = AttemptDraft::new(CourseLevel::Foundation, "Jun 2023").with_marks("Fin1", 50);
        let err = draft.build(&profile()).unwrap_err();
        assert!(matches!(err, EditError::UnknownSubject { level: CourseLevel::Foundation, .. }));
    }

    #[test]
    fn test_blank_term_rejected() {
        let draft = AttemptDraft::new(CourseLevel::Final, "   ");
        let err = draft.build(&profile()).unwrap_err();
        assert_eq!(err, EditError::Profile(ProfileError::EmptyField("term")));
    }

    #[test]
    fn test_no_marks_means_no_groups() {
        let attempt = AttemptDraft::new(CourseLevel::Final, "Nov 2025").build(&profile()).unwrap();
        assert!(attempt.groups.is_empty());
        assert_eq!(attempt.outcome(), AttemptOutcome::Fail);
    }
}
