//! Step 4 — education and certifications.
//!
//! Two independently growable sequences. Entries are created blank with a
//! fresh id, edited in place and removed by positional index; required
//! fields are enforced only when the whole step is submitted.

use serde::{Deserialize, Serialize};

use crate::builder::document::{Certification, EducationEntry, ResumePatch};
use crate::builder::steps::{require_min_chars, FieldErrors, StepEditor};
use crate::builder::wizard::WizardStep;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationDraft {
    pub education: Vec<EducationEntry>,
    pub certifications: Vec<Certification>,
}

impl EducationDraft {
    /// Appends a blank education entry and returns a handle for in-place edit.
    pub fn add_education(&mut self) -> &mut EducationEntry {
        self.education.push(EducationEntry::blank());
        self.education.last_mut().expect("just pushed")
    }

    pub fn remove_education(&mut self, index: usize) {
        if index < self.education.len() {
            self.education.remove(index);
        }
    }

    pub fn add_certification(&mut self) -> &mut Certification {
        self.certifications.push(Certification::blank());
        self.certifications.last_mut().expect("just pushed")
    }

    pub fn remove_certification(&mut self, index: usize) {
        if index < self.certifications.len() {
            self.certifications.remove(index);
        }
    }
}

impl StepEditor for EducationDraft {
    fn step(&self) -> WizardStep {
        WizardStep::Education
    }

    fn validate(&self) -> Result<ResumePatch, FieldErrors> {
        let mut errors = FieldErrors::default();

        for (i, entry) in self.education.iter().enumerate() {
            require_min_chars(
                &mut errors,
                &format!("education[{i}].institution"),
                &entry.institution,
                2,
                "Institution is required",
            );
            require_min_chars(
                &mut errors,
                &format!("education[{i}].degree"),
                &entry.degree,
                2,
                "Degree is required",
            );
        }
        for (i, cert) in self.certifications.iter().enumerate() {
            require_min_chars(
                &mut errors,
                &format!("certifications[{i}].name"),
                &cert.name,
                2,
                "Name is required",
            );
            require_min_chars(
                &mut errors,
                &format!("certifications[{i}].issuer"),
                &cert.issuer,
                2,
                "Issuer is required",
            );
        }

        errors.into_result(ResumePatch {
            education: Some(self.education.clone()),
            certifications: Some(self.certifications.clone()),
            ..ResumePatch::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_added_entries_get_distinct_fresh_ids() {
        let mut draft = EducationDraft::default();
        draft.add_education();
        draft.add_education();
        assert_ne!(draft.education[0].id, draft.education[1].id);
    }

    #[test]
    fn test_blank_entry_is_rejected_only_at_submission() {
        let mut draft = EducationDraft::default();
        draft.add_education();
        // Adding a blank entry is fine; submitting it is not.
        let errors = draft.validate().expect_err("blocked");
        assert!(errors.get("education[0].institution").is_some());
        assert!(errors.get("education[0].degree").is_some());
    }

    #[test]
    fn test_filled_entries_submit_both_sequences() {
        let mut draft = EducationDraft::default();
        {
            let entry = draft.add_education();
            entry.institution = "MIT".to_string();
            entry.degree = "BS Computer Science".to_string();
            entry.start_date = Some("2018".to_string());
            entry.end_date = Some("2022".to_string());
        }
        {
            let cert = draft.add_certification();
            cert.name = "AWS Solutions Architect".to_string();
            cert.issuer = "Amazon Web Services".to_string();
        }

        let patch = draft.validate().expect("valid");
        assert_eq!(patch.education.expect("present").len(), 1);
        assert_eq!(patch.certifications.expect("present").len(), 1);
    }

    #[test]
    fn test_certification_requires_name_and_issuer() {
        let mut draft = EducationDraft::default();
        draft.add_certification().name = "CKA".to_string();
        let errors = draft.validate().expect_err("blocked");
        assert_eq!(errors.get("certifications[0].issuer"), Some("Issuer is required"));
    }

    #[test]
    fn test_removal_is_by_positional_index() {
        let mut draft = EducationDraft::default();
        draft.add_education().institution = "First".to_string();
        draft.add_education().institution = "Second".to_string();
        draft.remove_education(0);
        assert_eq!(draft.education.len(), 1);
        assert_eq!(draft.education[0].institution, "Second");
        draft.remove_education(7);
        assert_eq!(draft.education.len(), 1);
    }

    #[test]
    fn test_empty_step_is_submittable() {
        let patch = EducationDraft::default().validate().expect("valid");
        assert_eq!(patch.education, Some(vec![]));
        assert_eq!(patch.certifications, Some(vec![]));
    }
}
