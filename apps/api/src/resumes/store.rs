//! The persistence end of the wizard's autosave channel.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::builder::document::ResumeDocument;
use crate::builder::wizard::Autosave;
use crate::errors::AppError;
use crate::models::resume::ResumeRow;

/// Writes wizard snapshots into one user's resume row. Every save keeps the
/// record in `draft` status; the terminal status transition is left to the
/// host (see DESIGN.md).
pub struct ResumeStore {
    db: PgPool,
    resume_id: Uuid,
    user_id: Uuid,
}

impl ResumeStore {
    pub fn new(db: PgPool, resume_id: Uuid, user_id: Uuid) -> Self {
        ResumeStore {
            db,
            resume_id,
            user_id,
        }
    }
}

#[async_trait]
impl Autosave for ResumeStore {
    async fn save(&self, document: &ResumeDocument) -> anyhow::Result<()> {
        let content = serde_json::to_value(document)?;
        let updated = sqlx::query(
            "UPDATE resumes
             SET content = $1, status = 'draft', updated_at = now()
             WHERE id = $2 AND user_id = $3",
        )
        .bind(content)
        .bind(self.resume_id)
        .bind(self.user_id)
        .execute(&self.db)
        .await?;
        anyhow::ensure!(
            updated.rows_affected() == 1,
            "resume {} not found for autosave",
            self.resume_id
        );
        Ok(())
    }
}

/// Loads a resume scoped to its owner.
pub async fn fetch_owned(
    db: &PgPool,
    resume_id: Uuid,
    user_id: Uuid,
) -> Result<ResumeRow, AppError> {
    let row: Option<ResumeRow> =
        sqlx::query_as("SELECT * FROM resumes WHERE id = $1 AND user_id = $2")
            .bind(resume_id)
            .bind(user_id)
            .fetch_optional(db)
            .await?;
    row.ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))
}

/// Decodes the stored content blob into a document, defaulting to an empty
/// document when the wizard has not saved yet.
pub fn document_from_row(row: &ResumeRow) -> Result<ResumeDocument, AppError> {
    match &row.content {
        Some(content) => serde_json::from_value(content.clone())
            .map_err(|e| AppError::Internal(anyhow::anyhow!("corrupt resume content: {e}"))),
        None => Ok(ResumeDocument::default()),
    }
}
