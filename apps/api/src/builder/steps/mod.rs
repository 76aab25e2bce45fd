//! Step editors for the five-step builder wizard.
//!
//! Each step is a pure validate-then-emit unit: it owns a transient draft of
//! the fields it edits and, on submission, either emits a [`ResumePatch`]
//! covering every field it owns or a [`FieldErrors`] map that blocks the
//! submission. Validation failures are field-scoped values, never panics.

pub mod education;
pub mod experience;
pub mod finalize;
pub mod personal;
pub mod summary_skills;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::builder::document::ResumePatch;
use crate::builder::wizard::WizardStep;

pub use education::EducationDraft;
pub use experience::{ExperienceDraft, JobDraft};
pub use finalize::FinalizeDraft;
pub use personal::PersonalDraft;
pub use summary_skills::SummarySkillsDraft;

/// Field-scoped validation failures, keyed by field path
/// (e.g. `experience[0].title`). Ordered for deterministic output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Finishes a validation pass: the patch when clean, the errors otherwise.
    pub fn into_result(self, patch: ResumePatch) -> Result<ResumePatch, FieldErrors> {
        if self.is_empty() {
            Ok(patch)
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// The capability shared by all five step editors.
pub trait StepEditor {
    /// The wizard step this editor belongs to.
    fn step(&self) -> WizardStep;

    /// Validates the draft and emits the complete partial update for every
    /// document field this step owns.
    fn validate(&self) -> Result<ResumePatch, FieldErrors>;
}

/// A submitted step draft, tagged by step. This is the wire shape the step
/// submission endpoint accepts.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum StepDraft {
    Personal(PersonalDraft),
    SummarySkills(SummarySkillsDraft),
    Experience(ExperienceDraft),
    Education(EducationDraft),
    Finalize(FinalizeDraft),
}

impl StepEditor for StepDraft {
    fn step(&self) -> WizardStep {
        match self {
            StepDraft::Personal(d) => d.step(),
            StepDraft::SummarySkills(d) => d.step(),
            StepDraft::Experience(d) => d.step(),
            StepDraft::Education(d) => d.step(),
            StepDraft::Finalize(d) => d.step(),
        }
    }

    fn validate(&self) -> Result<ResumePatch, FieldErrors> {
        match self {
            StepDraft::Personal(d) => d.validate(),
            StepDraft::SummarySkills(d) => d.validate(),
            StepDraft::Experience(d) => d.validate(),
            StepDraft::Education(d) => d.validate(),
            StepDraft::Finalize(d) => d.validate(),
        }
    }
}

// ── Shared validators ───────────────────────────────────────────────────────

/// Records an error when `value` is shorter than `min` characters.
pub(crate) fn require_min_chars(
    errors: &mut FieldErrors,
    field: &str,
    value: &str,
    min: usize,
    message: &str,
) {
    if value.chars().count() < min {
        errors.push(field, message);
    }
}

/// Minimal structural email check: one `@` with a non-empty local part and a
/// dotted domain, no whitespace.
pub(crate) fn is_valid_email(value: &str) -> bool {
    if value.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && domain.len() >= 3
}

/// Link fields accept either a well-formed absolute URL or the empty string.
/// The empty string means "not provided" and is distinct from an absent field.
pub(crate) fn is_url_or_empty(value: &str) -> bool {
    value.is_empty() || url::Url::parse(value).map(|u| u.has_host()).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_errors_keep_first_message_per_field() {
        let mut errors = FieldErrors::default();
        errors.push("email", "Invalid email");
        errors.push("email", "second message is ignored");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("email"), Some("Invalid email"));
    }

    #[test]
    fn test_into_result_passes_clean_patch_through() {
        let patch = ResumePatch {
            summary: Some("s".to_string()),
            ..ResumePatch::default()
        };
        let result = FieldErrors::default().into_result(patch.clone());
        assert_eq!(result, Ok(patch));
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("ana@x.com"));
        assert!(is_valid_email("a.b+tag@sub.example.org"));
        assert!(!is_valid_email("ana"));
        assert!(!is_valid_email("@x.com"));
        assert!(!is_valid_email("ana@nodot"));
        assert!(!is_valid_email("ana@.com"));
        assert!(!is_valid_email("ana @x.com"));
    }

    #[test]
    fn test_is_url_or_empty() {
        assert!(is_url_or_empty(""));
        assert!(is_url_or_empty("https://linkedin.com/in/ana"));
        assert!(!is_url_or_empty("linkedin.com/in/ana"));
        assert!(!is_url_or_empty("not a url"));
    }

    #[test]
    fn test_step_draft_deserializes_by_tag() {
        let draft: StepDraft = serde_json::from_value(serde_json::json!({
            "step": "personal",
            "fullName": "Ana Li",
            "title": "PM",
            "email": "ana@x.com",
            "phone": "+1 555"
        }))
        .expect("deserializes");
        assert_eq!(draft.step(), WizardStep::Personal);
    }
}
