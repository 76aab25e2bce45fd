use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::ai::refine_draft;
use crate::auth::session::AuthUser;
use crate::builder::document::ResumeDocument;
use crate::builder::preview::render;
use crate::builder::steps::{StepDraft, StepEditor};
use crate::builder::wizard::{Wizard, WizardStep};
use crate::errors::AppError;
use crate::models::resume::ResumeRow;
use crate::resumes::store::{document_from_row, fetch_owned, ResumeStore};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResumeRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub experience_level: Option<String>,
    #[serde(default)]
    pub target_role: Option<String>,
}

/// POST /api/v1/resumes
pub async fn handle_create_resume(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<CreateResumeRequest>,
) -> Result<Json<ResumeRow>, AppError> {
    let title = req
        .title
        .or_else(|| req.target_role.clone())
        .unwrap_or_else(|| "Untitled Resume".to_string());
    let row: ResumeRow = sqlx::query_as(
        "INSERT INTO resumes (user_id, title, role, experience_level, target_role)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING *",
    )
    .bind(user_id)
    .bind(title)
    .bind(&req.role)
    .bind(&req.experience_level)
    .bind(&req.target_role)
    .fetch_one(&state.db)
    .await?;
    Ok(Json(row))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeRow>, AppError> {
    Ok(Json(fetch_owned(&state.db, id, user_id).await?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResumeRequest {
    #[serde(default)]
    pub content: Option<Value>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub ats_score: Option<i32>,
}

/// PUT /api/v1/resumes/:id
///
/// Conditional update: only the fields present in the request change. This
/// is the autosave target for hosts that persist the document blob directly.
pub async fn handle_update_resume(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateResumeRequest>,
) -> Result<Json<ResumeRow>, AppError> {
    let content = match req.content {
        Some(content) => Some(refine_draft(content, req.role.as_deref().unwrap_or("Professional")).await),
        None => None,
    };

    let row: Option<ResumeRow> = sqlx::query_as(
        "UPDATE resumes
         SET content = COALESCE($1, content),
             role = COALESCE($2, role),
             status = COALESCE($3, status),
             ats_score = COALESCE($4, ats_score),
             updated_at = now()
         WHERE id = $5 AND user_id = $6
         RETURNING *",
    )
    .bind(content)
    .bind(&req.role)
    .bind(&req.status)
    .bind(req.ats_score)
    .bind(id)
    .bind(user_id)
    .fetch_optional(&state.db)
    .await?;

    row.map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitStepResponse {
    pub step: WizardStep,
    pub complete: bool,
    pub document: ResumeDocument,
}

/// POST /api/v1/resumes/:id/steps
///
/// Server-side wizard submission: mounts the wizard over the stored
/// document at the submitted draft's step, runs validate → merge →
/// autosave → advance, and returns the new position and document.
pub async fn handle_submit_step(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(draft): Json<StepDraft>,
) -> Result<Json<SubmitStepResponse>, AppError> {
    let row = fetch_owned(&state.db, id, user_id).await?;
    let document = document_from_row(&row)?;

    let store = ResumeStore::new(state.db.clone(), id, user_id);
    let mut wizard = Wizard::resume_at(document, draft.step(), store);
    wizard.submit(&draft).await?;

    Ok(Json(SubmitStepResponse {
        step: wizard.step(),
        complete: wizard.is_complete(),
        document: wizard.into_document(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
    #[serde(default)]
    pub format: Option<String>,
}

/// GET /api/v1/resumes/:id/preview
///
/// Structured preview of the stored document; `?format=text` returns the
/// single-column plain-text projection instead.
pub async fn handle_preview(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Query(query): Query<PreviewQuery>,
) -> Result<Response, AppError> {
    let row = fetch_owned(&state.db, id, user_id).await?;
    let rendered = render(&document_from_row(&row)?);

    if query.format.as_deref() == Some("text") {
        Ok(rendered.to_plain_text().into_response())
    } else {
        Ok(Json(rendered).into_response())
    }
}
