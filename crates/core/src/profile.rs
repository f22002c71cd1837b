//! The curriculum profile: the root document for one student.

use serde::{Deserialize, Serialize};
use crate::attempt::ExamAttempt;
use crate::error::{ProfileError, Result};
use crate::id::RequirementId;
use crate::requirement::{check_marks, Group, Requirement};
use crate::status::{CourseLevel, EntryRoute, Status};
use crate::training::{Articleship, TrainingModule};
use crate::Date;

/// Everything one student tracks, from registration to the final exam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurriculumProfile {
    /// Student name
    pub name: String,

    /// State of residence
    #[serde(default)]
    pub state: String,

    /// Entry route
    pub entry_route: EntryRoute,

    /// Registration date
    pub registration_date: Date,

    /// Level the student says they are at.
    ///
    /// Set at onboarding and by explicit transitions only. It is not
    /// re-derived from stage statuses and may disagree with the milestone view.
    pub current_level: CourseLevel,

    /// Foundation stage; may be absent for Direct Entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foundation: Option<FoundationStage>,

    /// Intermediate stage
    pub intermediate: IntermediateStage,

    /// Practical training
    pub articleship: Articleship,

    /// Self-paced online modules
    pub self_paced_modules: SelfPacedModules,

    /// Final stage
    #[serde(rename = "final")]
    pub final_stage: FinalStage,

    /// Exam attempt log, newest first
    #[serde(default)]
    pub attempts: Vec<ExamAttempt>,
}

/// Foundation papers. The stage status is derived, like [`Group`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "FoundationDocument", from = "FoundationDocument")]
pub struct FoundationStage {
    papers: Vec<Requirement>,
}

impl FoundationStage {
    /// Create from the four papers.
    pub fn new(papers: Vec<Requirement>) -> Self {
        Self { papers }
    }

    /// Papers in catalogue order.
    pub fn papers(&self) -> &[Requirement] {
        &self.papers
    }

    /// Derived stage status.
    pub fn status(&self) -> Status {
        Status::rollup(self.papers.iter().map(|p| p.status))
    }

    /// Update one paper.
    pub fn set_paper(&mut self, id: &RequirementId, status: Status, marks: Option<u8>) -> Result<()> {
        let paper = self
            .papers
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| ProfileError::UnknownRequirement(id.to_string()))?;
        paper.record(status, marks)
    }

    /// Set every paper to the same status; marks are kept when `None`.
    pub fn set_all(&mut self, status: Status, marks: Option<u8>) {
        for paper in &mut self.papers {
            paper.status = status;
            if marks.is_some() {
                paper.marks = marks;
            }
        }
    }
}

#[derive(Serialize, Deserialize)]
struct FoundationDocument {
    papers: Vec<Requirement>,
    #[serde(default)]
    status: Option<Status>,
}

impl From<FoundationStage> for FoundationDocument {
    fn from(stage: FoundationStage) -> Self {
        let status = Some(stage.status());
        Self { papers: stage.papers, status }
    }
}

impl From<FoundationDocument> for FoundationStage {
    fn from(doc: FoundationDocument) -> Self {
        Self { papers: doc.papers }
    }
}

/// Intermediate: two groups and ICITSS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntermediateStage {
    /// Group 1
    pub group1: Group,
    /// Group 2
    pub group2: Group,
    /// IT and orientation course, gates the articleship
    pub icitss: TrainingModule,
}

/// Final: two groups and Advanced ICITSS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalStage {
    /// Group 1
    pub group1: Group,
    /// Group 2
    pub group2: Group,
    /// Advanced IT and management course, gates the final exam
    pub adv_icitss: TrainingModule,
}

/// The four self-paced online modules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelfPacedModules {
    /// Set A
    pub set_a: Requirement,
    /// Set B
    pub set_b: Requirement,
    /// Set C
    pub set_c: Requirement,
    /// Set D
    pub set_d: Requirement,
}

impl SelfPacedModules {
    /// Borrow one set.
    pub fn get(&self, set: SpomSet) -> &Requirement {
        match set {
            SpomSet::A => &self.set_a,
            SpomSet::B => &self.set_b,
            SpomSet::C => &self.set_c,
            SpomSet::D => &self.set_d,
        }
    }

    /// Mutably borrow one set.
    pub fn get_mut(&mut self, set: SpomSet) -> &mut Requirement {
        match set {
            SpomSet::A => &mut self.set_a,
            SpomSet::B => &mut self.set_b,
            SpomSet::C => &mut self.set_c,
            SpomSet::D => &mut self.set_d,
        }
    }

    /// All four sets in order.
    pub fn all(&self) -> [&Requirement; 4] {
        [&self.set_a, &self.set_b, &self.set_c, &self.set_d]
    }

    /// Sets A and B both Completed. Exempted does not count here.
    pub fn gating_done(&self) -> bool {
        SpomSet::GATING
            .iter()
            .all(|set| self.get(*set).status == Status::Completed)
    }
}

/// One of the self-paced module sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpomSet {
    /// Set A
    A,
    /// Set B
    B,
    /// Set C
    C,
    /// Set D
    D,
}

impl SpomSet {
    /// Sets that gate progression to Final.
    pub const GATING: [SpomSet; 2] = [SpomSet::A, SpomSet::B];

    /// All sets.
    pub const ALL: [SpomSet; 4] = [SpomSet::A, SpomSet::B, SpomSet::C, SpomSet::D];
}

impl std::str::FromStr for SpomSet {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().trim_start_matches("set").trim() {
            "a" => Ok(SpomSet::A),
            "b" => Ok(SpomSet::B),
            "c" => Ok(SpomSet::C),
            "d" => Ok(SpomSet::D),
            other => Err(format!("unknown module set: {other}")),
        }
    }
}

/// Which of a stage's two groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupSlot {
    /// Group 1
    Group1,
    /// Group 2
    Group2,
}

/// A stage that is examined in two groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExamStage {
    /// Intermediate
    Intermediate,
    /// Final
    Final,
}

/// One of the two short training modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrainingSlot {
    /// ICITSS
    Icitss,
    /// Advanced ICITSS
    AdvancedIcitss,
}

impl CurriculumProfile {
    /// Both groups of a stage.
    pub fn groups(&self, stage: ExamStage) -> [&Group; 2] {
        match stage {
            ExamStage::Intermediate => [&self.intermediate.group1, &self.intermediate.group2],
            ExamStage::Final => [&self.final_stage.group1, &self.final_stage.group2],
        }
    }

    /// Mutably borrow one group.
    pub fn group_mut(&mut self, stage: ExamStage, slot: GroupSlot) -> &mut Group {
        match (stage, slot) {
            (ExamStage::Intermediate, GroupSlot::Group1) => &mut self.intermediate.group1,
            (ExamStage::Intermediate, GroupSlot::Group2) => &mut self.intermediate.group2,
            (ExamStage::Final, GroupSlot::Group1) => &mut self.final_stage.group1,
            (ExamStage::Final, GroupSlot::Group2) => &mut self.final_stage.group2,
        }
    }

    /// Both groups of a stage are Completed or Exempted.
    pub fn stage_done(&self, stage: ExamStage) -> bool {
        self.groups(stage).iter().all(|g| g.is_done())
    }

    /// Borrow a training module.
    pub fn training(&self, slot: TrainingSlot) -> &TrainingModule {
        match slot {
            TrainingSlot::Icitss => &self.intermediate.icitss,
            TrainingSlot::AdvancedIcitss => &self.final_stage.adv_icitss,
        }
    }

    /// Mutably borrow a training module.
    pub fn training_mut(&mut self, slot: TrainingSlot) -> &mut TrainingModule {
        match slot {
            TrainingSlot::Icitss => &mut self.intermediate.icitss,
            TrainingSlot::AdvancedIcitss => &mut self.final_stage.adv_icitss,
        }
    }

    /// Aggregated Foundation status; Pending when the stage is absent.
    pub fn foundation_status(&self) -> Status {
        self.foundation
            .as_ref()
            .map(FoundationStage::status)
            .unwrap_or_default()
    }

    /// Foundation passed, or not required for this route.
    pub fn foundation_cleared(&self) -> bool {
        !self.entry_route.requires_foundation() || self.foundation_status().is_done()
    }

    /// Subjects examined at a level, in catalogue order.
    pub fn subjects_for_level(&self, level: CourseLevel) -> Vec<&Requirement> {
        match level {
            CourseLevel::Foundation => self
                .foundation
                .as_ref()
                .map(|f| f.papers().iter().collect())
                .unwrap_or_default(),
            CourseLevel::Intermediate => self
                .groups(ExamStage::Intermediate)
                .into_iter()
                .flat_map(|g| g.subjects())
                .collect(),
            CourseLevel::Final => self
                .groups(ExamStage::Final)
                .into_iter()
                .flat_map(|g| g.subjects())
                .collect(),
        }
    }

    /// Number of attempts already logged at a level.
    pub fn attempts_at(&self, level: CourseLevel) -> usize {
        self.attempts.iter().filter(|a| a.level == level).count()
    }

    /// Check the structural preconditions the progress engine relies on.
    pub fn validate(&self) -> Result<()> {
        if self.entry_route.requires_foundation() && self.foundation.is_none() {
            return Err(ProfileError::MissingFoundation);
        }
        if let Some(foundation) = &self.foundation {
            for paper in foundation.papers() {
                check_marks(&paper.id, paper.marks)?;
            }
        }
        for stage in [ExamStage::Intermediate, ExamStage::Final] {
            for group in self.groups(stage) {
                group.validate()?;
            }
        }
        for set in self.self_paced_modules.all() {
            check_marks(&set.id, set.marks)?;
        }
        Ok(())
    }
}
