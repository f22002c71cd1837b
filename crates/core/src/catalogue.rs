//! The fixed curriculum: every paper, group and module a new profile starts with.

use crate::profile::{
    CurriculumProfile, FinalStage, FoundationStage, IntermediateStage, SelfPacedModules,
};
use crate::requirement::{Group, Requirement};
use crate::status::{CourseLevel, EntryRoute};
use crate::training::{Articleship, TrainingModule};
use crate::Date;

const FOUNDATION_PAPERS: [(&str, &str); 4] = [
    ("F1", "Paper 1: Accounting"),
    ("F2", "Paper 2: Business Laws"),
    ("F3", "Paper 3: Quantitative Aptitude"),
    ("F4", "Paper 4: Business Economics"),
];

const INTERMEDIATE_GROUP1: [(&str, &str); 3] = [
    ("I1", "Paper 1: Advanced Accounting"),
    ("I2", "Paper 2: Corporate and Other Laws"),
    ("I3", "Paper 3: Taxation"),
];

const INTERMEDIATE_GROUP2: [(&str, &str); 3] = [
    ("I4", "Paper 4: Cost and Management Accounting"),
    ("I5", "Paper 5: Auditing and Ethics"),
    ("I6", "Paper 6: FM & SM"),
];

const FINAL_GROUP1: [(&str, &str); 3] = [
    ("Fin1", "Paper 1: Financial Reporting"),
    ("Fin2", "Paper 2: Advanced Financial Management"),
    ("Fin3", "Paper 3: Advanced Auditing, Assurance & Ethics"),
];

const FINAL_GROUP2: [(&str, &str); 3] = [
    ("Fin4", "Paper 4: Direct Tax Laws & Intl Taxation"),
    ("Fin5", "Paper 5: Indirect Tax Laws"),
    ("Fin6", "Paper 6: Integrated Business Solutions"),
];

fn requirements(papers: &[(&str, &str)]) -> Vec<Requirement> {
    papers
        .iter()
        .map(|(id, name)| Requirement::new(*id, *name))
        .collect()
}

impl FoundationStage {
    /// The four Foundation papers, all pending.
    pub fn catalogue() -> Self {
        Self::new(requirements(&FOUNDATION_PAPERS))
    }
}

impl IntermediateStage {
    /// Intermediate groups and ICITSS, all pending.
    pub fn catalogue() -> Self {
        Self {
            group1: Group::new("IG1", "Group 1", requirements(&INTERMEDIATE_GROUP1)),
            group2: Group::new("IG2", "Group 2", requirements(&INTERMEDIATE_GROUP2)),
            icitss: TrainingModule::new(
                "ICITSS",
                "Integrated Course on IT and Soft Skills (ICITSS)",
                "4 Weeks",
                CourseLevel::Intermediate,
            ),
        }
    }
}

impl FinalStage {
    /// Final groups and Advanced ICITSS, all pending.
    pub fn catalogue() -> Self {
        Self {
            group1: Group::new("FG1", "Group 1", requirements(&FINAL_GROUP1)),
            group2: Group::new("FG2", "Group 2", requirements(&FINAL_GROUP2)),
            adv_icitss: TrainingModule::new(
                "ADVICITSS",
                "Advanced ICITSS",
                "4 Weeks",
                CourseLevel::Final,
            ),
        }
    }
}

impl SelfPacedModules {
    /// The four module sets, all pending.
    pub fn catalogue() -> Self {
        let mut set_c = Requirement::new("SPOM_C", "Set C: Elective (Specialization)");
        set_c.is_elective = true;
        Self {
            set_a: Requirement::new("SPOM_A", "Set A: Corporate and Economic Laws"),
            set_b: Requirement::new("SPOM_B", "Set B: Strategic Cost & Performance Mgmt"),
            set_c,
            set_d: Requirement::new("SPOM_D", "Set D: Multi-disciplinary"),
        }
    }
}

impl CurriculumProfile {
    /// A fresh profile with every requirement pending.
    ///
    /// The Foundation stage is always present here; Direct Entry profiles
    /// carry it so onboarding can mark the papers Exempted.
    pub fn new(
        name: impl Into<String>,
        state: impl Into<String>,
        entry_route: EntryRoute,
        registration_date: Date,
    ) -> Self {
        Self {
            name: name.into(),
            state: state.into(),
            entry_route,
            registration_date,
            current_level: CourseLevel::Foundation,
            foundation: Some(FoundationStage::catalogue()),
            intermediate: IntermediateStage::catalogue(),
            articleship: Articleship::default(),
            self_paced_modules: SelfPacedModules::catalogue(),
            final_stage: FinalStage::catalogue(),
            attempts: Vec::new(),
        }
    }
}
