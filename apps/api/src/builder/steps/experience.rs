//! Step 3 — work experience.
//!
//! The step keeps two pieces of state: the committed `experience` sequence
//! and an independent scratch [`JobDraft`] for the entry being written.
//! Bullets accumulate on the scratch one confirm at a time; the scratch can
//! only be committed once title, company and at least one achievement are
//! present. Committing appends to the sequence and resets the scratch with a
//! fresh id.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::builder::document::{Achievement, JobEntry, ResumePatch};
use crate::builder::steps::{require_min_chars, FieldErrors, StepEditor};
use crate::builder::wizard::WizardStep;

/// Scratch state for the job being written. Never reaches the document
/// until committed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDraft {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub summary: String,
    pub achievements: Vec<Achievement>,
}

impl JobDraft {
    pub fn new() -> Self {
        JobDraft {
            id: Uuid::new_v4(),
            title: String::new(),
            company: String::new(),
            location: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            current: false,
            summary: String::new(),
            achievements: Vec::new(),
        }
    }

    /// Confirms one achievement bullet. The bullet is appended only if its
    /// trimmed text is non-empty; duplicate text is allowed.
    pub fn add_achievement(&mut self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        self.achievements.push(Achievement::new(text));
        true
    }

    pub fn remove_achievement(&mut self, id: Uuid) {
        self.achievements.retain(|a| a.id != id);
    }

    /// The commit affordance is enabled only with a title, a company and at
    /// least one achievement.
    pub fn can_commit(&self) -> bool {
        !self.title.is_empty() && !self.company.is_empty() && !self.achievements.is_empty()
    }

    /// Turns the scratch into a committed [`JobEntry`] and resets it to an
    /// empty template with a freshly generated id. Returns `None` when the
    /// commit precondition does not hold.
    pub fn commit(&mut self) -> Option<JobEntry> {
        if !self.can_commit() {
            return None;
        }
        let drained = std::mem::replace(self, JobDraft::new());
        Some(JobEntry {
            id: drained.id,
            title: drained.title,
            company: drained.company,
            location: non_empty(drained.location),
            start_date: drained.start_date,
            // An open-ended entry carries no end date.
            end_date: if drained.current {
                None
            } else {
                non_empty(drained.end_date)
            },
            current: drained.current,
            summary: non_empty(drained.summary),
            achievements: drained.achievements,
        })
    }
}

impl Default for JobDraft {
    fn default() -> Self {
        JobDraft::new()
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// The committed sequence submitted at the end of the step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceDraft {
    pub experience: Vec<JobEntry>,
}

impl ExperienceDraft {
    pub fn push(&mut self, job: JobEntry) {
        self.experience.push(job);
    }

    /// Removal from the committed sequence is by positional index.
    pub fn remove(&mut self, index: usize) {
        if index < self.experience.len() {
            self.experience.remove(index);
        }
    }
}

impl StepEditor for ExperienceDraft {
    fn step(&self) -> WizardStep {
        WizardStep::Experience
    }

    fn validate(&self) -> Result<ResumePatch, FieldErrors> {
        let mut errors = FieldErrors::default();

        for (i, job) in self.experience.iter().enumerate() {
            require_min_chars(
                &mut errors,
                &format!("experience[{i}].title"),
                &job.title,
                2,
                "Job title is required",
            );
            require_min_chars(
                &mut errors,
                &format!("experience[{i}].company"),
                &job.company,
                2,
                "Company is required",
            );
            if job.start_date.is_empty() {
                errors.push(format!("experience[{i}].startDate"), "Start date is required");
            }
            if job.achievements.is_empty() {
                errors.push(
                    format!("experience[{i}].achievements"),
                    "Add at least one achievement",
                );
            }
            for (j, achievement) in job.achievements.iter().enumerate() {
                require_min_chars(
                    &mut errors,
                    &format!("experience[{i}].achievements[{j}].text"),
                    &achievement.text,
                    5,
                    "Achievement is too short",
                );
            }
        }

        errors.into_result(ResumePatch {
            experience: Some(self.experience.clone()),
            ..ResumePatch::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_draft() -> JobDraft {
        let mut draft = JobDraft::new();
        draft.title = "PM".to_string();
        draft.company = "Acme".to_string();
        draft.start_date = "2021-03".to_string();
        draft.add_achievement("Shipped X to 2M users");
        draft
    }

    #[test]
    fn test_scratch_without_achievements_is_not_committable() {
        let mut draft = JobDraft::new();
        draft.title = "PM".to_string();
        draft.company = "Acme".to_string();
        assert!(!draft.can_commit());
        assert!(draft.commit().is_none());
    }

    #[test]
    fn test_scratch_with_achievement_and_names_is_committable() {
        let mut draft = filled_draft();
        assert!(draft.can_commit());
        assert!(draft.commit().is_some());
    }

    #[test]
    fn test_commit_resets_scratch_with_fresh_id() {
        let mut draft = filled_draft();
        let old_id = draft.id;
        let job = draft.commit().expect("committable");
        assert_eq!(job.id, old_id);
        assert_ne!(draft.id, old_id);
        assert!(draft.title.is_empty());
        assert!(draft.achievements.is_empty());
    }

    #[test]
    fn test_commit_clears_end_date_of_current_role() {
        let mut draft = filled_draft();
        draft.current = true;
        draft.end_date = "2024-01".to_string();
        let job = draft.commit().expect("committable");
        assert!(job.current);
        assert_eq!(job.end_date, None, "open-ended entry ignores end date");
    }

    #[test]
    fn test_blank_optional_fields_become_absent() {
        let job = filled_draft().commit().expect("committable");
        assert_eq!(job.location, None);
        assert_eq!(job.summary, None);
    }

    #[test]
    fn test_bullet_confirm_requires_non_empty_text() {
        let mut draft = JobDraft::new();
        assert!(!draft.add_achievement("   "));
        assert!(draft.add_achievement("Cut churn by 12%"));
        // No dedup on bullet text.
        assert!(draft.add_achievement("Cut churn by 12%"));
        assert_eq!(draft.achievements.len(), 2);
    }

    #[test]
    fn test_remove_achievement_by_id() {
        let mut draft = JobDraft::new();
        draft.add_achievement("first");
        draft.add_achievement("second");
        let first_id = draft.achievements[0].id;
        draft.remove_achievement(first_id);
        assert_eq!(draft.achievements.len(), 1);
        assert_eq!(draft.achievements[0].text, "second");
    }

    #[test]
    fn test_removal_from_committed_sequence_is_positional() {
        let mut step = ExperienceDraft::default();
        let mut a = filled_draft();
        a.title = "First".to_string();
        let mut b = filled_draft();
        b.title = "Second".to_string();
        step.push(a.commit().expect("committable"));
        step.push(b.commit().expect("committable"));

        step.remove(0);
        assert_eq!(step.experience.len(), 1);
        assert_eq!(step.experience[0].title, "Second");

        // Out-of-range removal is a no-op.
        step.remove(5);
        assert_eq!(step.experience.len(), 1);
    }

    #[test]
    fn test_submission_rejects_short_bullet_text() {
        let mut step = ExperienceDraft::default();
        let mut draft = filled_draft();
        draft.add_achievement("tiny");
        step.push(draft.commit().expect("committable"));

        let errors = step.validate().expect_err("blocked");
        assert_eq!(
            errors.get("experience[0].achievements[1].text"),
            Some("Achievement is too short")
        );
    }

    #[test]
    fn test_submission_requires_start_date() {
        let mut step = ExperienceDraft::default();
        let mut draft = filled_draft();
        draft.start_date = String::new();
        step.push(draft.commit().expect("committable"));

        let errors = step.validate().expect_err("blocked");
        assert!(errors.get("experience[0].startDate").is_some());
    }

    #[test]
    fn test_empty_step_submits_an_empty_sequence() {
        let patch = ExperienceDraft::default().validate().expect("valid");
        assert_eq!(patch.experience, Some(vec![]));
    }
}
