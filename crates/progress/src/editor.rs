//! Profile editing with a read-only capability.
//!
//! Every mutation goes through [`ProfileEditor`]. Group and stage statuses
//! are derived on access, so a leaf update and its roll-up land in the same
//! call and no stale intermediate state is observable.

use journey_core::{
    AttemptId, CourseLevel, CurriculumProfile, Date, ExamAttempt, ExamStage, GroupSlot,
    Milestone, ProfileError, RequirementId, SpomSet, Status, TrainingSlot,
};
use tracing::{debug, info};
use crate::aggregator::overall_progress;
use crate::attempts::AttemptDraft;
use crate::error::{EditError, Result};
use crate::sequencer::sequence;

/// What the holder of an editor may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Access {
    /// Own profile
    #[default]
    ReadWrite,
    /// Someone else's profile
    ReadOnly,
}

/// A profile plus the capability to change it.
#[derive(Debug, Clone)]
pub struct ProfileEditor {
    profile: CurriculumProfile,
    access: Access,
}

impl ProfileEditor {
    /// Open a profile for editing. Rejects structurally incomplete profiles.
    pub fn new(profile: CurriculumProfile) -> Result<Self> {
        Self::with_access(profile, Access::ReadWrite)
    }

    /// Open a profile for viewing only.
    pub fn read_only(profile: CurriculumProfile) -> Result<Self> {
        Self::with_access(profile, Access::ReadOnly)
    }

    /// Open with an explicit capability.
    pub fn with_access(profile: CurriculumProfile, access: Access) -> Result<Self> {
        profile.validate()?;
        Ok(Self { profile, access })
    }

    /// Borrow the profile.
    pub fn profile(&self) -> &CurriculumProfile {
        &self.profile
    }

    /// Take the profile back.
    pub fn into_profile(self) -> CurriculumProfile {
        self.profile
    }

    /// The editor's capability.
    pub fn access(&self) -> Access {
        self.access
    }

    /// Overall completion, 0-100.
    pub fn progress(&self) -> u8 {
        overall_progress(&self.profile)
    }

    /// The milestone timeline.
    pub fn milestones(&self) -> Vec<Milestone> {
        sequence(&self.profile)
    }

    fn writable(&mut self) -> Result<&mut CurriculumProfile> {
        match self.access {
            Access::ReadWrite => Ok(&mut self.profile),
            Access::ReadOnly => Err(EditError::ReadOnly),
        }
    }

    /// Update a Foundation paper; returns the new stage status.
    pub fn set_foundation_paper(
        &mut self,
        id: &RequirementId,
        status: Status,
        marks: Option<u8>,
    ) -> Result<Status> {
        let profile = self.writable()?;
        let foundation = profile
            .foundation
            .as_mut()
            .ok_or(ProfileError::MissingFoundation)?;
        foundation.set_paper(id, status, marks)?;
        let stage = foundation.status();
        debug!("Foundation paper {} -> {} (stage {})", id, status, stage);
        Ok(stage)
    }

    /// Update a subject in an Intermediate or Final group; returns the new group status.
    pub fn set_group_subject(
        &mut self,
        stage: ExamStage,
        slot: GroupSlot,
        id: &RequirementId,
        status: Status,
        marks: Option<u8>,
    ) -> Result<Status> {
        let group = self.writable()?.group_mut(stage, slot);
        group.set_subject(id, status, marks)?;
        let derived = group.status();
        debug!("{:?} {} subject {} -> {} (group {})", stage, group.name(), id, status, derived);
        Ok(derived)
    }

    /// Update a subject wherever it lives in the Intermediate or Final groups.
    pub fn set_subject(&mut self, id: &RequirementId, status: Status, marks: Option<u8>) -> Result<Status> {
        for stage in [ExamStage::Intermediate, ExamStage::Final] {
            for slot in [GroupSlot::Group1, GroupSlot::Group2] {
                if self.profile.groups(stage)[slot_index(slot)].subject(id).is_some() {
                    return self.set_group_subject(stage, slot, id, status, marks);
                }
            }
        }
        if self
            .profile
            .foundation
            .as_ref()
            .is_some_and(|f| f.papers().iter().any(|p| &p.id == id))
        {
            return self.set_foundation_paper(id, status, marks);
        }
        self.writable()?;
        Err(ProfileError::UnknownRequirement(id.to_string()).into())
    }

    /// Update one self-paced module set.
    pub fn set_self_paced(&mut self, set: SpomSet, status: Status, marks: Option<u8>) -> Result<()> {
        self.writable()?
            .self_paced_modules
            .get_mut(set)
            .record(status, marks)?;
        Ok(())
    }

    /// Set a training module's status.
    pub fn set_training_status(&mut self, slot: TrainingSlot, status: Status) -> Result<()> {
        self.writable()?.training_mut(slot).status = status;
        Ok(())
    }

    /// Set a training module's dates.
    pub fn set_training_dates(
        &mut self,
        slot: TrainingSlot,
        start: Option<Date>,
        end: Option<Date>,
    ) -> Result<()> {
        self.writable()?.training_mut(slot).set_dates(start, end)?;
        Ok(())
    }

    /// Record the articleship start; the end date is derived two years out.
    pub fn start_articleship(&mut self, date: Date) -> Result<()> {
        let articleship = &mut self.writable()?.articleship;
        articleship.start(date);
        info!(
            "Articleship started {} (expected end {:?})",
            date, articleship.end_date
        );
        Ok(())
    }

    /// Override the articleship end date.
    pub fn set_articleship_end(&mut self, date: Option<Date>) -> Result<()> {
        self.writable()?.articleship.set_end(date)?;
        Ok(())
    }

    /// Set the articleship status.
    pub fn set_articleship_status(&mut self, status: Status) -> Result<()> {
        self.writable()?.articleship.status = status;
        Ok(())
    }

    /// Record leave days taken.
    pub fn set_articleship_leaves(&mut self, leaves: u32) -> Result<()> {
        self.writable()?.articleship.leaves_taken = leaves;
        Ok(())
    }

    /// Opt in or out of industrial training.
    pub fn set_industrial_training(&mut self, enabled: bool) -> Result<()> {
        self.writable()?.articleship.industrial_training = enabled;
        Ok(())
    }

    /// Explicit level transition. Never derived from stage statuses.
    pub fn set_current_level(&mut self, level: CourseLevel) -> Result<()> {
        let profile = self.writable()?;
        info!("Current level {} -> {}", profile.current_level, level);
        profile.current_level = level;
        Ok(())
    }

    /// Log a new attempt at the front of the history.
    pub fn log_attempt(&mut self, draft: &AttemptDraft) -> Result<&ExamAttempt> {
        let profile = self.writable()?;
        let attempt = draft.build(profile)?;
        info!(
            "Logged {} attempt #{} ({})",
            attempt.level, attempt.attempt_number, attempt.term
        );
        profile.attempts.insert(0, attempt);
        Ok(&profile.attempts[0])
    }

    /// Replace an attempt wholesale, keeping its id and number.
    pub fn replace_attempt(&mut self, id: &AttemptId, draft: &AttemptDraft) -> Result<&ExamAttempt> {
        let profile = self.writable()?;
        let index = position(profile, id)?;
        let number = profile.attempts[index].attempt_number;
        let attempt = draft.build_numbered(profile, id.clone(), number)?;
        profile.attempts[index] = attempt;
        Ok(&profile.attempts[index])
    }

    /// Delete an attempt.
    pub fn delete_attempt(&mut self, id: &AttemptId) -> Result<ExamAttempt> {
        let profile = self.writable()?;
        let index = position(profile, id)?;
        let removed = profile.attempts.remove(index);
        info!("Deleted {} attempt #{}", removed.level, removed.attempt_number);
        Ok(removed)
    }
}

fn slot_index(slot: GroupSlot) -> usize {
    match slot {
        GroupSlot::Group1 => 0,
        GroupSlot::Group2 => 1,
    }
}

fn position(profile: &CurriculumProfile, id: &AttemptId) -> Result<usize> {
    profile
        .attempts
        .iter()
        .position(|a| &a.id == id)
        .ok_or_else(|| EditError::UnknownAttempt(id.clone()))
}
