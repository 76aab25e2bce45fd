//! The wizard controller: an explicit finite-state machine over the five
//! steps plus a terminal `Done` state.
//!
//! The controller exclusively owns the live [`ResumeDocument`] for the
//! editing session. On each successful submission it merges the step's
//! patch, fires the autosave channel best-effort, and advances. Backward
//! navigation only moves the pointer; it never merges, saves, or truncates
//! data committed by later steps.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::builder::document::{ProfileSeed, ResumeDocument};
use crate::builder::preview::{render, StructuredDocument};
use crate::builder::steps::{FieldErrors, StepDraft, StepEditor};

/// The wizard position. Linear: each submission advances one step, `Done`
/// is terminal. A sixth editing step is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Personal,
    SummarySkills,
    Experience,
    Education,
    Finalize,
    Done,
}

impl WizardStep {
    pub fn next(self) -> WizardStep {
        match self {
            WizardStep::Personal => WizardStep::SummarySkills,
            WizardStep::SummarySkills => WizardStep::Experience,
            WizardStep::Experience => WizardStep::Education,
            WizardStep::Education => WizardStep::Finalize,
            WizardStep::Finalize | WizardStep::Done => WizardStep::Done,
        }
    }

    pub fn back(self) -> WizardStep {
        match self {
            WizardStep::Personal | WizardStep::SummarySkills => WizardStep::Personal,
            WizardStep::Experience => WizardStep::SummarySkills,
            WizardStep::Education => WizardStep::Experience,
            WizardStep::Finalize => WizardStep::Education,
            WizardStep::Done => WizardStep::Finalize,
        }
    }

    /// 1-based step number; `None` for the terminal state.
    pub fn number(self) -> Option<u8> {
        match self {
            WizardStep::Personal => Some(1),
            WizardStep::SummarySkills => Some(2),
            WizardStep::Experience => Some(3),
            WizardStep::Education => Some(4),
            WizardStep::Finalize => Some(5),
            WizardStep::Done => None,
        }
    }
}

/// One-way, fire-and-forget persistence channel. The wizard invokes it after
/// every merge and never blocks progression on its outcome.
#[async_trait]
pub trait Autosave: Send + Sync {
    async fn save(&self, document: &ResumeDocument) -> anyhow::Result<()>;
}

#[derive(Debug, Error)]
pub enum WizardError {
    /// Field-scoped validation failures. Blocks only this submission.
    #[error("step validation failed: {0}")]
    Validation(FieldErrors),
    /// The submitted draft belongs to a different step than the wizard is on.
    #[error("draft is for a different step (wizard is at {current:?}, draft is for {submitted:?})")]
    StepMismatch {
        current: WizardStep,
        submitted: WizardStep,
    },
    /// The wizard already reached its terminal state.
    #[error("the wizard is already complete")]
    Complete,
}

pub struct Wizard<S> {
    step: WizardStep,
    document: ResumeDocument,
    is_saving: bool,
    store: S,
}

impl<S: Autosave> Wizard<S> {
    /// A fresh wizard over an empty document.
    pub fn new(store: S) -> Self {
        Wizard::resume_at(ResumeDocument::default(), WizardStep::Personal, store)
    }

    /// A fresh wizard pre-seeded from the user's stored profile.
    pub fn seeded(seed: &ProfileSeed, store: S) -> Self {
        Wizard::resume_at(
            ResumeDocument::from_profile(seed),
            WizardStep::Personal,
            store,
        )
    }

    /// Re-mounts the wizard over a previously saved document at a given step.
    pub fn resume_at(document: ResumeDocument, step: WizardStep, store: S) -> Self {
        Wizard {
            step,
            document,
            is_saving: false,
            store,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn document(&self) -> &ResumeDocument {
        &self.document
    }

    pub fn is_saving(&self) -> bool {
        self.is_saving
    }

    pub fn is_complete(&self) -> bool {
        self.step == WizardStep::Done
    }

    /// Consumes the wizard and returns the document it owns.
    pub fn into_document(self) -> ResumeDocument {
        self.document
    }

    /// The live preview always reflects the latest merged state; uncommitted
    /// edits to the step in progress are invisible until submission.
    pub fn preview(&self) -> StructuredDocument {
        render(&self.document)
    }

    /// Submits the current step: validate, merge, autosave, advance.
    ///
    /// Autosave failures are logged and swallowed; they never block or roll
    /// back the transition. Durability is eventually consistent with the
    /// backing store.
    pub async fn submit(&mut self, draft: &StepDraft) -> Result<(), WizardError> {
        if self.step == WizardStep::Done {
            return Err(WizardError::Complete);
        }
        if draft.step() != self.step {
            return Err(WizardError::StepMismatch {
                current: self.step,
                submitted: draft.step(),
            });
        }

        let patch = draft.validate().map_err(WizardError::Validation)?;
        self.document = std::mem::take(&mut self.document).merge(patch);

        self.is_saving = true;
        if let Err(err) = self.store.save(&self.document).await {
            tracing::warn!("autosave failed: {err:#}");
        }
        self.is_saving = false;

        self.step = self.step.next();
        Ok(())
    }

    /// Backward navigation: moves the pointer only. No merge, no autosave,
    /// no truncation of data committed by later steps.
    pub fn back(&mut self) {
        self.step = self.step.back();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::document::{PersonalInfo, ProfileSeed};
    use crate::builder::preview::Section;
    use crate::builder::steps::{
        EducationDraft, ExperienceDraft, FinalizeDraft, JobDraft, PersonalDraft,
        SummarySkillsDraft,
    };
    use crate::builder::steps::summary_skills::SkillCategory;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Records every saved snapshot.
    #[derive(Default)]
    struct RecordingStore {
        saves: Mutex<Vec<ResumeDocument>>,
    }

    #[async_trait]
    impl Autosave for &RecordingStore {
        async fn save(&self, document: &ResumeDocument) -> anyhow::Result<()> {
            self.saves.lock().expect("not poisoned").push(document.clone());
            Ok(())
        }
    }

    /// Rejects every save.
    #[derive(Default)]
    struct FailingStore {
        attempts: AtomicUsize,
    }

    #[async_trait]
    impl Autosave for &FailingStore {
        async fn save(&self, _document: &ResumeDocument) -> anyhow::Result<()> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            anyhow::bail!("storage unavailable")
        }
    }

    fn personal_draft() -> StepDraft {
        StepDraft::Personal(PersonalDraft {
            full_name: "Ana Li".to_string(),
            title: "PM".to_string(),
            email: "ana@x.com".to_string(),
            phone: "+1 555".to_string(),
            ..PersonalDraft::default()
        })
    }

    fn summary_draft() -> StepDraft {
        let mut draft = SummarySkillsDraft {
            summary: "PM with 25 chars or more!".to_string(),
            ..SummarySkillsDraft::default()
        };
        draft.add_skill(SkillCategory::Core, "Leadership");
        StepDraft::SummarySkills(draft)
    }

    fn experience_draft() -> StepDraft {
        let mut scratch = JobDraft::new();
        scratch.title = "PM".to_string();
        scratch.company = "Acme".to_string();
        scratch.start_date = "2021-03".to_string();
        scratch.add_achievement("Shipped X");
        let mut step = ExperienceDraft::default();
        step.push(scratch.commit().expect("committable"));
        StepDraft::Experience(step)
    }

    #[test]
    fn test_step_machine_is_linear_and_done_is_terminal() {
        let mut step = WizardStep::Personal;
        for expected in [2, 3, 4, 5] {
            step = step.next();
            assert_eq!(step.number(), Some(expected));
        }
        step = step.next();
        assert_eq!(step, WizardStep::Done);
        assert_eq!(step.next(), WizardStep::Done);
        assert_eq!(WizardStep::Personal.back(), WizardStep::Personal);
        assert_eq!(WizardStep::Done.back(), WizardStep::Finalize);
    }

    #[tokio::test]
    async fn test_submit_merges_saves_and_advances() {
        let store = RecordingStore::default();
        let mut wizard = Wizard::new(&store);

        wizard.submit(&personal_draft()).await.expect("submits");

        assert_eq!(wizard.step(), WizardStep::SummarySkills);
        assert_eq!(wizard.document().personal.full_name, "Ana Li");
        assert!(!wizard.is_saving());
        let saves = store.saves.lock().expect("not poisoned");
        assert_eq!(saves.len(), 1);
        assert_eq!(saves[0].personal.email, "ana@x.com");
    }

    #[tokio::test]
    async fn test_validation_failure_blocks_without_saving() {
        let store = RecordingStore::default();
        let mut wizard = Wizard::new(&store);

        let bad = StepDraft::Personal(PersonalDraft {
            email: "not-an-email".to_string(),
            ..PersonalDraft::default()
        });
        let err = wizard.submit(&bad).await.expect_err("blocked");
        assert!(matches!(err, WizardError::Validation(_)));
        assert_eq!(wizard.step(), WizardStep::Personal);
        assert!(store.saves.lock().expect("not poisoned").is_empty());
    }

    #[tokio::test]
    async fn test_autosave_failure_never_blocks_progression() {
        let store = FailingStore::default();
        let mut wizard = Wizard::new(&store);

        wizard.submit(&personal_draft()).await.expect("advances anyway");

        assert_eq!(store.attempts.load(Ordering::SeqCst), 1);
        assert_eq!(wizard.step(), WizardStep::SummarySkills);
        assert!(!wizard.is_saving(), "saving flag returns to false");
        assert_eq!(wizard.document().personal.full_name, "Ana Li");
    }

    #[tokio::test]
    async fn test_step_mismatch_is_rejected() {
        let store = RecordingStore::default();
        let mut wizard = Wizard::new(&store);

        let err = wizard.submit(&summary_draft()).await.expect_err("rejected");
        assert!(matches!(
            err,
            WizardError::StepMismatch {
                current: WizardStep::Personal,
                submitted: WizardStep::SummarySkills,
            }
        ));
    }

    #[tokio::test]
    async fn test_back_keeps_later_step_data() {
        let store = RecordingStore::default();
        let mut wizard = Wizard::new(&store);
        wizard.submit(&personal_draft()).await.expect("step 1");
        wizard.submit(&summary_draft()).await.expect("step 2");

        wizard.back();
        assert_eq!(wizard.step(), WizardStep::SummarySkills);
        // Back performs no merge and no autosave, and drops nothing.
        assert_eq!(store.saves.lock().expect("not poisoned").len(), 2);
        assert_eq!(wizard.document().skills.core.as_slice(), ["Leadership"]);
    }

    #[tokio::test]
    async fn test_submitting_after_done_is_an_error() {
        let store = RecordingStore::default();
        let mut wizard = Wizard::resume_at(
            ResumeDocument::default(),
            WizardStep::Done,
            &store,
        );
        let err = wizard
            .submit(&StepDraft::Finalize(FinalizeDraft::default()))
            .await
            .expect_err("terminal");
        assert!(matches!(err, WizardError::Complete));
    }

    #[tokio::test]
    async fn test_end_to_end_scenario() {
        // Seed → five submissions (step 4 skipped empty, step 5 empty) →
        // document and preview reflect exactly the submitted data.
        let store = RecordingStore::default();
        let seed = ProfileSeed {
            name: "Ana Li".to_string(),
            email: "ana@x.com".to_string(),
            headline: None,
            role: Some("PM".to_string()),
        };
        let mut wizard = Wizard::seeded(&seed, &store);
        assert_eq!(
            wizard.document().personal,
            PersonalInfo {
                full_name: "Ana Li".to_string(),
                email: "ana@x.com".to_string(),
                title: "PM".to_string(),
                ..PersonalInfo::default()
            }
        );

        wizard.submit(&personal_draft()).await.expect("step 1");
        wizard.submit(&summary_draft()).await.expect("step 2");
        wizard.submit(&experience_draft()).await.expect("step 3");
        wizard
            .submit(&StepDraft::Education(EducationDraft::default()))
            .await
            .expect("step 4");
        wizard
            .submit(&StepDraft::Finalize(FinalizeDraft::default()))
            .await
            .expect("step 5");

        assert!(wizard.is_complete());
        assert_eq!(wizard.document().experience.len(), 1);
        assert_eq!(wizard.document().skills.core.as_slice(), ["Leadership"]);
        assert_eq!(store.saves.lock().expect("not poisoned").len(), 5);

        let preview = wizard.preview();
        let kinds: Vec<&'static str> = preview
            .sections
            .iter()
            .map(Section::heading)
            .collect();
        assert_eq!(
            kinds,
            ["Professional Summary", "Skills", "Work Experience"],
            "education/certifications/projects/languages are omitted"
        );
        assert_eq!(preview.header.name, "Ana Li");
    }
}
