//! Step 2 — professional summary and skill tags.

use serde::{Deserialize, Serialize};

use crate::builder::document::{ResumePatch, Skills};
use crate::builder::steps::{FieldErrors, StepEditor};
use crate::builder::wizard::WizardStep;

/// Draft of the summary and the three skill categories. Tag entry goes
/// through [`crate::builder::document::SkillSet::add`], which trims and
/// deduplicates; this draft only gates submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarySkillsDraft {
    pub summary: String,
    pub skills: Skills,
}

impl SummarySkillsDraft {
    /// Confirms one tag into a category, mirroring the Enter-to-add input.
    /// Returns whether the tag was appended.
    pub fn add_skill(&mut self, category: SkillCategory, raw: &str) -> bool {
        self.category_mut(category).add(raw)
    }

    pub fn remove_skill(&mut self, category: SkillCategory, tag: &str) {
        self.category_mut(category).remove(tag);
    }

    fn category_mut(&mut self, category: SkillCategory) -> &mut crate::builder::document::SkillSet {
        match category {
            SkillCategory::Core => &mut self.skills.core,
            SkillCategory::Tools => &mut self.skills.tools,
            SkillCategory::Soft => &mut self.skills.soft,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    Core,
    Tools,
    Soft,
}

impl StepEditor for SummarySkillsDraft {
    fn step(&self) -> WizardStep {
        WizardStep::SummarySkills
    }

    fn validate(&self) -> Result<ResumePatch, FieldErrors> {
        let mut errors = FieldErrors::default();

        if self.summary.chars().count() < 20 {
            errors.push("summary", "Summary should be at least 20 characters");
        }
        if self.skills.core.is_empty() {
            errors.push("skills.core", "Add at least one core skill");
        }

        errors.into_result(ResumePatch {
            summary: Some(self.summary.clone()),
            skills: Some(self.skills.clone()),
            ..ResumePatch::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> SummarySkillsDraft {
        let mut draft = SummarySkillsDraft {
            summary: "Product manager with ten years of shipping".to_string(),
            ..SummarySkillsDraft::default()
        };
        draft.add_skill(SkillCategory::Core, "Leadership");
        draft
    }

    #[test]
    fn test_valid_draft_emits_summary_and_skills() {
        let patch = valid_draft().validate().expect("valid");
        assert!(patch.summary.is_some());
        assert_eq!(
            patch.skills.expect("skills present").core.as_slice(),
            ["Leadership"]
        );
    }

    #[test]
    fn test_empty_core_blocks_regardless_of_summary_length() {
        let draft = SummarySkillsDraft {
            summary: "A perfectly long enough professional summary".to_string(),
            ..SummarySkillsDraft::default()
        };
        let errors = draft.validate().expect_err("blocked");
        assert_eq!(errors.get("skills.core"), Some("Add at least one core skill"));
    }

    #[test]
    fn test_short_summary_blocks() {
        let mut draft = valid_draft();
        draft.summary = "Too short".to_string();
        let errors = draft.validate().expect_err("blocked");
        assert!(errors.get("summary").is_some());
    }

    #[test]
    fn test_tag_confirmation_trims_and_dedups() {
        let mut draft = valid_draft();
        assert!(draft.add_skill(SkillCategory::Tools, "  Figma  "));
        assert!(!draft.add_skill(SkillCategory::Tools, "Figma"));
        assert!(!draft.add_skill(SkillCategory::Tools, "   "));
        assert_eq!(draft.skills.tools.as_slice(), ["Figma"]);
    }

    #[test]
    fn test_removal_deletes_exact_match_only() {
        let mut draft = valid_draft();
        draft.add_skill(SkillCategory::Soft, "Communication");
        draft.add_skill(SkillCategory::Soft, "Coaching");
        draft.remove_skill(SkillCategory::Soft, "Communication");
        assert_eq!(draft.skills.soft.as_slice(), ["Coaching"]);
    }

    #[test]
    fn test_tools_and_soft_are_unconstrained_in_count() {
        let draft = valid_draft();
        assert!(draft.skills.tools.is_empty());
        assert!(draft.validate().is_ok());
    }
}
