//! Step 1 — personal details.

use serde::{Deserialize, Serialize};

use crate::builder::document::{PersonalInfo, ResumePatch};
use crate::builder::steps::{
    is_url_or_empty, is_valid_email, require_min_chars, FieldErrors, StepEditor,
};
use crate::builder::wizard::WizardStep;

/// Draft of the contact block. Required: name, title, email, phone.
/// `linkedin`/`portfolio` must each be a well-formed URL or the empty string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalDraft {
    pub full_name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub portfolio: Option<String>,
}

impl From<PersonalInfo> for PersonalDraft {
    fn from(personal: PersonalInfo) -> Self {
        PersonalDraft {
            full_name: personal.full_name,
            title: personal.title,
            email: personal.email,
            phone: personal.phone,
            location: personal.location,
            linkedin: personal.linkedin,
            portfolio: personal.portfolio,
        }
    }
}

impl StepEditor for PersonalDraft {
    fn step(&self) -> WizardStep {
        WizardStep::Personal
    }

    fn validate(&self) -> Result<ResumePatch, FieldErrors> {
        let mut errors = FieldErrors::default();

        require_min_chars(&mut errors, "fullName", &self.full_name, 2, "Name is required");
        require_min_chars(
            &mut errors,
            "title",
            &self.title,
            2,
            "Professional title is required",
        );
        if !is_valid_email(&self.email) {
            errors.push("email", "Invalid email");
        }
        require_min_chars(&mut errors, "phone", &self.phone, 5, "Phone is required");

        if let Some(linkedin) = &self.linkedin {
            if !is_url_or_empty(linkedin) {
                errors.push("linkedin", "Must be a valid URL");
            }
        }
        if let Some(portfolio) = &self.portfolio {
            if !is_url_or_empty(portfolio) {
                errors.push("portfolio", "Must be a valid URL");
            }
        }

        errors.into_result(ResumePatch {
            personal: Some(PersonalInfo {
                full_name: self.full_name.clone(),
                title: self.title.clone(),
                email: self.email.clone(),
                phone: self.phone.clone(),
                location: self.location.clone(),
                linkedin: self.linkedin.clone(),
                portfolio: self.portfolio.clone(),
            }),
            ..ResumePatch::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> PersonalDraft {
        PersonalDraft {
            full_name: "Ana Li".to_string(),
            title: "PM".to_string(),
            email: "ana@x.com".to_string(),
            phone: "+1 555".to_string(),
            ..PersonalDraft::default()
        }
    }

    #[test]
    fn test_valid_draft_emits_personal_patch() {
        let patch = valid_draft().validate().expect("valid");
        let personal = patch.personal.expect("personal present");
        assert_eq!(personal.full_name, "Ana Li");
        assert_eq!(personal.phone, "+1 555");
        assert!(patch.summary.is_none(), "step 1 owns only `personal`");
    }

    #[test]
    fn test_invalid_email_blocks_regardless_of_other_fields() {
        let mut draft = valid_draft();
        draft.email = "not-an-email".to_string();
        let errors = draft.validate().expect_err("blocked");
        assert_eq!(errors.get("email"), Some("Invalid email"));
    }

    #[test]
    fn test_short_required_fields_are_each_reported() {
        let draft = PersonalDraft {
            full_name: "A".to_string(),
            title: "".to_string(),
            email: "bad".to_string(),
            phone: "123".to_string(),
            ..PersonalDraft::default()
        };
        let errors = draft.validate().expect_err("blocked");
        assert_eq!(errors.len(), 4);
        assert!(errors.get("fullName").is_some());
        assert!(errors.get("phone").is_some());
    }

    #[test]
    fn test_empty_string_link_is_accepted_as_not_provided() {
        let mut draft = valid_draft();
        draft.linkedin = Some(String::new());
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_malformed_link_is_rejected() {
        let mut draft = valid_draft();
        draft.portfolio = Some("myportfolio".to_string());
        let errors = draft.validate().expect_err("blocked");
        assert_eq!(errors.get("portfolio"), Some("Must be a valid URL"));
    }

    #[test]
    fn test_absent_links_are_accepted() {
        assert!(valid_draft().validate().is_ok());
    }
}
