//! Leaf requirements and the groups that roll them up.

use serde::{Deserialize, Serialize};
use crate::error::{ProfileError, Result};
use crate::id::RequirementId;
use crate::status::Status;

/// Highest mark a paper can carry.
pub(crate) const MAX_MARKS: u8 = 100;

/// A single paper, subject or self-paced module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirement {
    /// Catalogue identifier
    pub id: RequirementId,

    /// Display name
    pub name: String,

    /// Score, 0-100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marks: Option<u8>,

    /// Current status
    pub status: Status,

    /// Elective paper
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_elective: bool,
}

impl Requirement {
    /// Create a pending requirement.
    pub fn new(id: impl Into<RequirementId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            marks: None,
            status: Status::Pending,
            is_elective: false,
        }
    }

    /// Record a new status and score.
    pub fn record(&mut self, status: Status, marks: Option<u8>) -> Result<()> {
        check_marks(&self.id, marks)?;
        self.status = status;
        self.marks = marks;
        Ok(())
    }
}

pub(crate) fn check_marks(id: &RequirementId, marks: Option<u8>) -> Result<()> {
    match marks {
        Some(m) if m > MAX_MARKS => Err(ProfileError::MarksOutOfRange {
            id: id.to_string(),
            marks: m,
        }),
        _ => Ok(()),
    }
}

/// A set of subjects passed or failed as a unit.
///
/// The group status is never stored: [`Group::status`] always recomputes it
/// from the subjects, so it cannot go stale. The serialized document still
/// carries a `status` field, which is ignored on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "GroupDocument", from = "GroupDocument")]
pub struct Group {
    id: String,
    name: String,
    subjects: Vec<Requirement>,
}

impl Group {
    /// Create a group from its subjects.
    pub fn new(id: impl Into<String>, name: impl Into<String>, subjects: Vec<Requirement>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            subjects,
        }
    }

    /// Group identifier, e.g. `IG1`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Subjects in catalogue order.
    pub fn subjects(&self) -> &[Requirement] {
        &self.subjects
    }

    /// Derived status of the whole group.
    pub fn status(&self) -> Status {
        Status::rollup(self.subjects.iter().map(|s| s.status))
    }

    /// Completed or Exempted.
    pub fn is_done(&self) -> bool {
        self.status().is_done()
    }

    /// Find a subject by id.
    pub fn subject(&self, id: &RequirementId) -> Option<&Requirement> {
        self.subjects.iter().find(|s| &s.id == id)
    }

    /// Update one subject. The group status follows automatically.
    pub fn set_subject(&mut self, id: &RequirementId, status: Status, marks: Option<u8>) -> Result<()> {
        let subject = self
            .subjects
            .iter_mut()
            .find(|s| &s.id == id)
            .ok_or_else(|| ProfileError::UnknownRequirement(id.to_string()))?;
        subject.record(status, marks)
    }

    /// Set every subject to the same status and score.
    pub fn set_all(&mut self, status: Status, marks: Option<u8>) {
        for subject in &mut self.subjects {
            subject.status = status;
            if marks.is_some() {
                subject.marks = marks;
            }
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        for subject in &self.subjects {
            check_marks(&subject.id, subject.marks)?;
        }
        Ok(())
    }
}

/// On-disk shape of a group.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroupDocument {
    id: String,
    name: String,
    subjects: Vec<Requirement>,
    #[serde(default)]
    status: Option<Status>,
}

impl From<Group> for GroupDocument {
    fn from(group: Group) -> Self {
        let status = Some(group.status());
        Self {
            id: group.id,
            name: group.name,
            subjects: group.subjects,
            status,
        }
    }
}

impl From<GroupDocument> for Group {
    fn from(doc: GroupDocument) -> Self {
        // persisted status is discarded; it is recomputed on access
        Self {
            id: doc.id,
            name: doc.name,
            subjects: doc.subjects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group() -> Group {
        Group::new(
            "IG1",
            "Group 1",
            vec![
                Requirement::new("I1", "Paper 1"),
                Requirement::new("I2", "Paper 2"),
            ],
        )
    }

    #[test]
    fn test_status_follows_subjects() {
        let mut g = group();
        assert_eq!(g.status(), Status::Pending);

        g.set_subject(&"I1".into(), Status::Completed, Some(72)).unwrap();
        assert_eq!(g.status(), Status::InProgress);

        g.set_subject(&"I2".into(), Status::Exempted, None).unwrap();
        assert_eq!(g.status(), Status::Completed);
    }

    #[test]
    fn test_unknown_subject_is_rejected() {
        let mut g = group();
        let err = g.set_subject(&"Z9".into(), Status::Completed, None).unwrap_err();
        assert!(matches!(err, ProfileError::UnknownRequirement(id) if id == "Z9"));
    }

    #[test]
    fn test_marks_above_100_rejected() {
        let mut g = group();
        let err = g.set_subject(&"I1".into(), Status::Completed, Some(101)).unwrap_err();
        assert!(matches!(err, ProfileError::MarksOutOfRange { marks: 101, .. }));
        assert_eq!(g.subject(&"I1".into()).unwrap().status, Status::Pending);
    }

    #[test]
    fn test_persisted_status_is_not_trusted() {
        let json = r#"{
            "id": "IG1",
            "name": "Group 1",
            "status": "Completed",
            "subjects": [
                {"id": "I1", "name": "Paper 1", "status": "Failed"},
                {"id": "I2", "name": "Paper 2", "status": "Completed"}
            ]
        }"#;
        let g: Group = serde_json::from_str(json).unwrap();
        assert_eq!(g.status(), Status::Failed);

        let out = serde_json::to_value(&g).unwrap();
        assert_eq!(out["status"], "Failed");
    }
}
