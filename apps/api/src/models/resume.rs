use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// A stored resume. `content` is the opaque serialized
/// [`crate::builder::document::ResumeDocument`] blob; `status` is `draft`
/// while the wizard is in progress.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub role: Option<String>,
    pub experience_level: Option<String>,
    pub target_role: Option<String>,
    pub content: Option<Value>,
    pub status: String,
    pub ats_score: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
