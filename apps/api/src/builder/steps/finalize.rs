//! Step 5 — projects and languages, the final step.

use serde::{Deserialize, Serialize};

use crate::builder::document::{LanguageEntry, Project, ResumePatch};
use crate::builder::steps::{require_min_chars, FieldErrors, StepEditor};
use crate::builder::wizard::WizardStep;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FinalizeDraft {
    pub projects: Vec<Project>,
    pub languages: Vec<LanguageEntry>,
}

impl FinalizeDraft {
    pub fn add_project(&mut self) -> &mut Project {
        self.projects.push(Project::blank());
        self.projects.last_mut().expect("just pushed")
    }

    pub fn remove_project(&mut self, index: usize) {
        if index < self.projects.len() {
            self.projects.remove(index);
        }
    }

    pub fn add_language(&mut self) -> &mut LanguageEntry {
        self.languages.push(LanguageEntry::default());
        self.languages.last_mut().expect("just pushed")
    }

    pub fn remove_language(&mut self, index: usize) {
        if index < self.languages.len() {
            self.languages.remove(index);
        }
    }
}

impl StepEditor for FinalizeDraft {
    fn step(&self) -> WizardStep {
        WizardStep::Finalize
    }

    fn validate(&self) -> Result<ResumePatch, FieldErrors> {
        let mut errors = FieldErrors::default();

        for (i, project) in self.projects.iter().enumerate() {
            require_min_chars(
                &mut errors,
                &format!("projects[{i}].title"),
                &project.title,
                2,
                "Title is required",
            );
            require_min_chars(
                &mut errors,
                &format!("projects[{i}].description"),
                &project.description,
                10,
                "Description is required",
            );
        }
        for (i, language) in self.languages.iter().enumerate() {
            require_min_chars(
                &mut errors,
                &format!("languages[{i}].language"),
                &language.language,
                2,
                "Language required",
            );
            require_min_chars(
                &mut errors,
                &format!("languages[{i}].proficiency"),
                &language.proficiency,
                2,
                "Proficiency required",
            );
        }

        errors.into_result(ResumePatch {
            projects: Some(self.projects.clone()),
            languages: Some(self.languages.clone()),
            ..ResumePatch::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_final_step_is_submittable() {
        let patch = FinalizeDraft::default().validate().expect("valid");
        assert_eq!(patch.projects, Some(vec![]));
        assert_eq!(patch.languages, Some(vec![]));
    }

    #[test]
    fn test_project_needs_title_and_long_enough_description() {
        let mut draft = FinalizeDraft::default();
        {
            let project = draft.add_project();
            project.title = "Atlas".to_string();
            project.description = "too short".to_string();
        }
        let errors = draft.validate().expect_err("blocked");
        assert_eq!(
            errors.get("projects[0].description"),
            Some("Description is required")
        );
    }

    #[test]
    fn test_filled_project_and_language_submit() {
        let mut draft = FinalizeDraft::default();
        {
            let project = draft.add_project();
            project.title = "Atlas".to_string();
            project.description = "Internal mapping tool for ops".to_string();
            project.role = Some("Lead".to_string());
        }
        {
            let language = draft.add_language();
            language.language = "Spanish".to_string();
            language.proficiency = "Fluent".to_string();
        }
        let patch = draft.validate().expect("valid");
        assert_eq!(patch.projects.expect("present").len(), 1);
        assert_eq!(patch.languages.expect("present").len(), 1);
    }

    #[test]
    fn test_language_requires_both_fields() {
        let mut draft = FinalizeDraft::default();
        draft.add_language().language = "German".to_string();
        let errors = draft.validate().expect_err("blocked");
        assert_eq!(errors.get("languages[0].proficiency"), Some("Proficiency required"));
    }

    #[test]
    fn test_duplicate_languages_are_not_rejected() {
        let mut draft = FinalizeDraft::default();
        for _ in 0..2 {
            let language = draft.add_language();
            language.language = "English".to_string();
            language.proficiency = "Native".to_string();
        }
        assert!(draft.validate().is_ok(), "language uniqueness is not enforced");
    }

    #[test]
    fn test_project_removal_is_positional() {
        let mut draft = FinalizeDraft::default();
        draft.add_project().title = "First".to_string();
        draft.add_project().title = "Second".to_string();
        draft.remove_project(0);
        assert_eq!(draft.projects[0].title, "Second");
    }
}
