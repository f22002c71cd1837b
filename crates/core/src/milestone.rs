//! Milestones: the derived, ordered view of a student's journey.
//!
//! Milestones are recomputed from the profile on every request and are never
//! persisted.

use serde::{Deserialize, Serialize};
use crate::status::Status;
use crate::Date;

/// The fixed set of journey milestones, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MilestoneKind {
    /// Student registration
    #[serde(rename = "reg")]
    Registration,
    /// Foundation examination (Foundation route only)
    #[serde(rename = "found")]
    FoundationExam,
    /// Intermediate course and exam
    #[serde(rename = "inter_study")]
    IntermediateCourse,
    /// ICITSS training
    #[serde(rename = "icitss")]
    IcitssTraining,
    /// Articleship
    #[serde(rename = "articleship")]
    PracticalTraining,
    /// Self-paced modules, sets A and B
    #[serde(rename = "spom")]
    SelfPacedModules,
    /// Advanced ICITSS
    #[serde(rename = "adv_icitss")]
    AdvancedIcitss,
    /// Final examination
    #[serde(rename = "final")]
    FinalExam,
    /// Membership
    #[serde(rename = "convocation")]
    Convocation,
}

impl MilestoneKind {
    /// Canonical order, including the Foundation exam.
    pub const ORDER: [MilestoneKind; 9] = [
        MilestoneKind::Registration,
        MilestoneKind::FoundationExam,
        MilestoneKind::IntermediateCourse,
        MilestoneKind::IcitssTraining,
        MilestoneKind::PracticalTraining,
        MilestoneKind::SelfPacedModules,
        MilestoneKind::AdvancedIcitss,
        MilestoneKind::FinalExam,
        MilestoneKind::Convocation,
    ];

    /// Stable short id.
    pub fn id(self) -> &'static str {
        match self {
            MilestoneKind::Registration => "reg",
            MilestoneKind::FoundationExam => "found",
            MilestoneKind::IntermediateCourse => "inter_study",
            MilestoneKind::IcitssTraining => "icitss",
            MilestoneKind::PracticalTraining => "articleship",
            MilestoneKind::SelfPacedModules => "spom",
            MilestoneKind::AdvancedIcitss => "adv_icitss",
            MilestoneKind::FinalExam => "final",
            MilestoneKind::Convocation => "convocation",
        }
    }

    /// Display title.
    pub fn title(self) -> &'static str {
        match self {
            MilestoneKind::Registration => "Registration",
            MilestoneKind::FoundationExam => "Foundation Exam",
            MilestoneKind::IntermediateCourse => "Intermediate Course",
            MilestoneKind::IcitssTraining => "ICITSS Training",
            MilestoneKind::PracticalTraining => "Practical Training",
            MilestoneKind::SelfPacedModules => "SPOM (Set A & B)",
            MilestoneKind::AdvancedIcitss => "Advanced ICITSS",
            MilestoneKind::FinalExam => "Final Exam",
            MilestoneKind::Convocation => "Convocation",
        }
    }

    /// Fixed description; Registration's is built from the entry route instead.
    pub fn description(self) -> &'static str {
        match self {
            MilestoneKind::Registration => "Registered",
            MilestoneKind::FoundationExam => "Pass Class XII + 4 Months Study",
            MilestoneKind::IntermediateCourse => "Group 1 & Group 2",
            MilestoneKind::IcitssTraining => "IT + OC (4 Weeks)",
            MilestoneKind::PracticalTraining => "2 Years Mandatory Articleship",
            MilestoneKind::SelfPacedModules => "Self-Paced Online Modules",
            MilestoneKind::AdvancedIcitss => "Adv IT + MCS - Before Final Exam",
            MilestoneKind::FinalExam => "Pass Both Groups",
            MilestoneKind::Convocation => "Membership & ACA Title",
        }
    }
}

impl std::fmt::Display for MilestoneKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// One annotated step of the journey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    /// Which milestone
    #[serde(rename = "id")]
    pub kind: MilestoneKind,

    /// Display title
    pub title: String,

    /// Short description
    pub description: String,

    /// Status shown to the user
    pub status: Status,

    /// The "you are here" marker
    pub is_current: bool,

    /// Date attached to the milestone, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<Date>,
}

impl Milestone {
    /// A milestone with its fixed title and description, not current.
    pub fn new(kind: MilestoneKind, status: Status) -> Self {
        Self {
            kind,
            title: kind.title().to_string(),
            description: kind.description().to_string(),
            status,
            is_current: false,
            date: None,
        }
    }

    /// Completed or Exempted.
    pub fn is_done(&self) -> bool {
        self.status.is_done()
    }
}
