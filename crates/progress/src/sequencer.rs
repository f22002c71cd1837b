//! Milestone sequencing.
//!
//! Builds the ordered timeline for a profile and decides which single
//! milestone is "current". The decision runs in two phases: the articleship
//! override is resolved first, and only when it does not apply does the
//! first-incomplete scan run.

use journey_core::{CurriculumProfile, ExamStage, Milestone, MilestoneKind, Status};

/// Why a milestone was marked current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrentMarker {
    /// The articleship is running alongside later requirements
    Override(usize),
    /// First milestone that is neither Completed nor Exempted
    Scan(usize),
    /// Everything is done; Convocation is current and Completed
    JourneyComplete(usize),
}

impl CurrentMarker {
    /// Position of the marked milestone.
    pub fn index(self) -> usize {
        match self {
            CurrentMarker::Override(i) | CurrentMarker::Scan(i) | CurrentMarker::JourneyComplete(i) => i,
        }
    }
}

/// The ordered, annotated timeline for a profile.
///
/// Pure and deterministic. Direct Entry profiles have no Foundation Exam
/// milestone. At most one milestone is marked current.
pub fn sequence(profile: &CurriculumProfile) -> Vec<Milestone> {
    let mut milestones = derive(profile);
    if let Some(marker) = resolve_current(profile, &milestones) {
        apply(&mut milestones, marker);
    }
    milestones
}

/// Which milestone is current for a profile, and why.
pub fn current_marker(profile: &CurriculumProfile) -> Option<CurrentMarker> {
    resolve_current(profile, &derive(profile))
}

/// The milestone marked current, if any.
pub fn current_milestone(milestones: &[Milestone]) -> Option<&Milestone> {
    milestones.iter().find(|m| m.is_current)
}

/// Milestones with their derived statuses, before any current marking.
pub(crate) fn derive(profile: &CurriculumProfile) -> Vec<Milestone> {
    let inter_done = profile.stage_done(ExamStage::Intermediate);
    let final_done = profile.stage_done(ExamStage::Final);
    let spom_done = profile.self_paced_modules.gating_done();
    let articleship_done = profile.articleship.status == Status::Completed;
    let adv_icitss_done = profile.final_stage.adv_icitss.status == Status::Completed;

    let mut milestones = Vec::with_capacity(MilestoneKind::ORDER.len());
    for kind in MilestoneKind::ORDER {
        let status = match kind {
            MilestoneKind::Registration => Status::Completed,
            MilestoneKind::FoundationExam => {
                if !profile.entry_route.requires_foundation() {
                    continue;
                }
                profile.foundation_status()
            }
            MilestoneKind::IntermediateCourse => {
                if inter_done {
                    Status::Completed
                } else if profile.foundation_cleared() {
                    Status::InProgress
                } else {
                    Status::Pending
                }
            }
            MilestoneKind::IcitssTraining => profile.intermediate.icitss.status,
            MilestoneKind::PracticalTraining => profile.articleship.status,
            MilestoneKind::SelfPacedModules => {
                if spom_done {
                    Status::Completed
                } else {
                    Status::Pending
                }
            }
            MilestoneKind::AdvancedIcitss => profile.final_stage.adv_icitss.status,
            MilestoneKind::FinalExam => {
                if final_done {
                    Status::Completed
                } else if articleship_done && adv_icitss_done && spom_done {
                    Status::InProgress
                } else {
                    Status::Pending
                }
            }
            // terminal case: follows the Final exam, not a field of its own
            MilestoneKind::Convocation => {
                if final_done {
                    Status::Completed
                } else {
                    Status::Pending
                }
            }
        };

        let mut milestone = Milestone::new(kind, status);
        match kind {
            MilestoneKind::Registration => {
                milestone.description = format!("Registered via {}", profile.entry_route);
                milestone.date = Some(profile.registration_date);
            }
            MilestoneKind::PracticalTraining => milestone.date = profile.articleship.start_date,
            _ => {}
        }
        milestones.push(milestone);
    }
    milestones
}

/// Phase one: the articleship override.
pub(crate) fn override_target(profile: &CurriculumProfile, milestones: &[Milestone]) -> Option<usize> {
    if !profile.articleship.is_running() {
        return None;
    }
    milestones
        .iter()
        .position(|m| m.kind == MilestoneKind::PracticalTraining)
}

/// Phase two: the first milestone that is not done.
pub(crate) fn scan_target(milestones: &[Milestone]) -> Option<usize> {
    milestones.iter().position(|m| !m.is_done())
}

/// Decide which milestone is current.
pub(crate) fn resolve_current(profile: &CurriculumProfile, milestones: &[Milestone]) -> Option<CurrentMarker> {
    if let Some(i) = override_target(profile, milestones) {
        return Some(CurrentMarker::Override(i));
    }
    if let Some(i) = scan_target(milestones) {
        return Some(CurrentMarker::Scan(i));
    }
    milestones
        .iter()
        .position(|m| m.kind == MilestoneKind::Convocation && m.status == Status::Completed)
        .map(CurrentMarker::JourneyComplete)
}

fn apply(milestones: &mut [Milestone], marker: CurrentMarker) {
    let Some(milestone) = milestones.get_mut(marker.index()) else {
        return;
    };
    milestone.is_current = true;
    if let CurrentMarker::Scan(_) = marker {
        milestone.status = Status::InProgress;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use journey_core::{Date, EntryRoute, GroupSlot, SpomSet};

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd_opt(y, m, d).unwrap()
    }

    fn profile(route: EntryRoute) -> CurriculumProfile {
        CurriculumProfile::new("Kiran", "Assam", route, date(2023, 6, 1))
    }

    fn complete_intermediate(p: &mut CurriculumProfile) {
        p.group_mut(ExamStage::Intermediate, GroupSlot::Group1).set_all(Status::Completed, None);
        p.group_mut(ExamStage::Intermediate, GroupSlot::Group2).set_all(Status::Completed, None);
        p.intermediate.icitss.status = Status::Completed;
    }

    fn kinds(milestones: &[Milestone]) -> Vec<MilestoneKind> {
        milestones.iter().map(|m| m.kind).collect()
    }

    fn current_kind(p: &CurriculumProfile) -> Option<MilestoneKind> {
        current_milestone(&sequence(p)).map(|m| m.kind)
    }

    #[test]
    fn test_canonical_order_foundation_route() {
        let ms = sequence(&profile(EntryRoute::Foundation));
        assert_eq!(kinds(&ms), MilestoneKind::ORDER.to_vec());
    }

    #[test]
    fn test_direct_entry_skips_foundation() {
        let ms = sequence(&profile(EntryRoute::DirectEntry));
        assert_eq!(ms.len(), 8);
        assert!(!kinds(&ms).contains(&MilestoneKind::FoundationExam));
        assert_eq!(ms[1].kind, MilestoneKind::IntermediateCourse);
    }

    #[test]
    fn test_registration_always_completed() {
        let ms = sequence(&profile(EntryRoute::Foundation));
        assert_eq!(ms[0].status, Status::Completed);
        assert_eq!(ms[0].description, "Registered via Foundation Route");
        assert_eq!(ms[0].date, Some(date(2023, 6, 1)));
    }

    #[test]
    fn test_fresh_profile_current_is_foundation_exam() {
        let ms = sequence(&profile(EntryRoute::Foundation));
        let current: Vec<_> = ms.iter().filter(|m| m.is_current).collect();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].kind, MilestoneKind::FoundationExam);
        // displayed as in progress even though the derivation said pending
        assert_eq!(current[0].status, Status::InProgress);
    }

    #[test]
    fn test_fresh_direct_entry_current_is_intermediate() {
        let p = profile(EntryRoute::DirectEntry);
        assert_eq!(current_kind(&p), Some(MilestoneKind::IntermediateCourse));
    }

    #[test]
    fn test_intermediate_waits_for_foundation() {
        let p = profile(EntryRoute::Foundation);
        let ms = derive(&p);
        assert_eq!(ms[2].kind, MilestoneKind::IntermediateCourse);
        assert_eq!(ms[2].status, Status::Pending);
    }

    #[test]
    fn test_foundation_milestone_mirrors_failed_stage() {
        let mut p = profile(EntryRoute::Foundation);
        if let Some(f) = p.foundation.as_mut() {
            f.set_paper(&"F2".into(), Status::Failed, Some(30)).unwrap();
        }
        let ms = derive(&p);
        assert_eq!(ms[1].status, Status::Failed);
    }

    #[test]
    fn test_spom_partial_is_pending() {
        let mut p = profile(EntryRoute::DirectEntry);
        p.self_paced_modules.get_mut(SpomSet::A).status = Status::Completed;
        let ms = derive(&p);
        let spom = ms.iter().find(|m| m.kind == MilestoneKind::SelfPacedModules).unwrap();
        assert_eq!(spom.status, Status::Pending);
    }

    #[test]
    fn test_articleship_override_beats_scan() {
        let mut p = profile(EntryRoute::DirectEntry);
        complete_intermediate(&mut p);
        p.articleship.start(date(2024, 1, 1));
        p.articleship.status = Status::InProgress;

        let ms = sequence(&p);
        let current: Vec<_> = ms.iter().filter(|m| m.is_current).collect();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].kind, MilestoneKind::PracticalTraining);
        assert_eq!(current[0].date, Some(date(2024, 1, 1)));
    }

    #[test]
    fn test_override_applies_even_before_earlier_gaps() {
        let mut p = profile(EntryRoute::Foundation);
        p.articleship.start(date(2024, 1, 1));
        assert_eq!(
            resolve_current(&p, &derive(&p)),
            Some(CurrentMarker::Override(4))
        );
        // the underlying status is kept, not forced
        let ms = sequence(&p);
        assert_eq!(ms[4].status, Status::Pending);
        assert!(!ms[1].is_current);
    }

    #[test]
    fn test_current_marker_reports_reason() {
        let mut p = profile(EntryRoute::Foundation);
        assert_eq!(current_marker(&p), Some(CurrentMarker::Scan(1)));
        p.articleship.start(date(2024, 1, 1));
        assert_eq!(current_marker(&p), Some(CurrentMarker::Override(4)));
        assert_eq!(current_marker(&p).map(CurrentMarker::index), Some(4));
    }

    #[test]
    fn test_blank_articleship_start_does_not_override() {
        let mut doc = serde_json::to_value(profile(EntryRoute::Foundation)).unwrap();
        doc["articleship"]["startDate"] = "".into();
        doc["articleship"]["endDate"] = "".into();
        doc["intermediate"]["icitss"]["endDate"] = "".into();
        let p: CurriculumProfile = serde_json::from_value(doc).unwrap();

        assert_eq!(p.articleship.start_date, None);
        assert_eq!(override_target(&p, &derive(&p)), None);
        assert_eq!(current_marker(&p), Some(CurrentMarker::Scan(1)));
        let ms = sequence(&p);
        assert_eq!(current_milestone(&ms).unwrap().kind, MilestoneKind::FoundationExam);
    }

    #[test]
    fn test_override_wins_over_final_in_progress() {
        let mut p = profile(EntryRoute::DirectEntry);
        complete_intermediate(&mut p);
        p.self_paced_modules.get_mut(SpomSet::A).status = Status::Completed;
        p.self_paced_modules.get_mut(SpomSet::B).status = Status::Completed;
        p.final_stage.adv_icitss.status = Status::Completed;
        p.articleship.start(date(2022, 1, 1));
        p.articleship.status = Status::InProgress;

        let ms = sequence(&p);
        let final_exam = ms.iter().find(|m| m.kind == MilestoneKind::FinalExam).unwrap();
        assert!(!final_exam.is_current);
        assert_eq!(current_kind(&p), Some(MilestoneKind::PracticalTraining));
        assert_eq!(ms.iter().filter(|m| m.is_current).count(), 1);
    }

    #[test]
    fn test_completed_articleship_with_start_date_does_not_override() {
        let mut p = profile(EntryRoute::DirectEntry);
        complete_intermediate(&mut p);
        p.articleship.start(date(2021, 1, 1));
        p.articleship.status = Status::Completed;
        assert_eq!(override_target(&p, &derive(&p)), None);
        assert_eq!(current_kind(&p), Some(MilestoneKind::SelfPacedModules));
    }

    #[test]
    fn test_final_in_progress_needs_all_gates() {
        let mut p = profile(EntryRoute::DirectEntry);
        complete_intermediate(&mut p);
        p.articleship.status = Status::Completed;
        p.self_paced_modules.get_mut(SpomSet::A).status = Status::Completed;
        p.self_paced_modules.get_mut(SpomSet::B).status = Status::Completed;

        let status_of = |p: &CurriculumProfile| {
            derive(p)
                .into_iter()
                .find(|m| m.kind == MilestoneKind::FinalExam)
                .map(|m| m.status)
        };
        assert_eq!(status_of(&p), Some(Status::Pending));

        p.final_stage.adv_icitss.status = Status::Completed;
        assert_eq!(status_of(&p), Some(Status::InProgress));
        assert_eq!(current_kind(&p), Some(MilestoneKind::FinalExam));
    }

    #[test]
    fn test_journey_complete() {
        let mut p = profile(EntryRoute::DirectEntry);
        complete_intermediate(&mut p);
        p.articleship.status = Status::Completed;
        p.self_paced_modules.get_mut(SpomSet::A).status = Status::Completed;
        p.self_paced_modules.get_mut(SpomSet::B).status = Status::Completed;
        p.final_stage.adv_icitss.status = Status::Completed;
        p.group_mut(ExamStage::Final, GroupSlot::Group1).set_all(Status::Completed, None);
        p.group_mut(ExamStage::Final, GroupSlot::Group2).set_all(Status::Exempted, None);

        let ms = sequence(&p);
        let last = ms.last().unwrap();
        assert_eq!(last.kind, MilestoneKind::Convocation);
        assert!(last.is_current);
        assert_eq!(last.status, Status::Completed);
        assert_eq!(ms.iter().filter(|m| m.is_current).count(), 1);
    }

    #[test]
    fn test_final_done_with_earlier_gap_marks_gap() {
        let mut p = profile(EntryRoute::DirectEntry);
        complete_intermediate(&mut p);
        p.articleship.status = Status::Completed;
        p.group_mut(ExamStage::Final, GroupSlot::Group1).set_all(Status::Completed, None);
        p.group_mut(ExamStage::Final, GroupSlot::Group2).set_all(Status::Completed, None);

        let ms = sequence(&p);
        assert_eq!(current_kind(&p), Some(MilestoneKind::SelfPacedModules));
        let convocation = ms.last().unwrap();
        assert_eq!(convocation.status, Status::Completed);
        assert!(!convocation.is_current);
    }

    #[test]
    fn test_sequence_is_idempotent() {
        let mut p = profile(EntryRoute::Foundation);
        p.articleship.start(date(2024, 5, 5));
        assert_eq!(sequence(&p), sequence(&p));
    }
}
