use axum::{extract::State, Json};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::session::issue_token;
use crate::builder::steps::FieldErrors;
use crate::errors::AppError;
use crate::mail::Mailer;
use crate::models::user::{AuthTokenRow, UserRow};
use crate::state::AppState;

const VERIFICATION_TTL_HOURS: i64 = 24;
const RESET_TTL_HOURS: i64 = 1;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    #[serde(default)]
    pub headline: Option<String>,
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub user: PublicUser,
    pub token: String,
}

#[derive(Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<&UserRow> for PublicUser {
    fn from(user: &UserRow) -> Self {
        PublicUser {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

fn validate_sign_up(req: &SignUpRequest) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();
    if req.name.chars().count() < 2 {
        errors.push("name", "Name must be at least 2 characters");
    }
    if !crate::builder::steps::is_valid_email(&req.email) {
        errors.push("email", "Invalid email address");
    }
    if req.password.chars().count() < 6 {
        errors.push("password", "Password must be at least 6 characters");
    }
    if req.password != req.confirm_password {
        errors.push("confirmPassword", "Passwords don't match");
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// POST /api/v1/auth/sign-up
pub async fn handle_sign_up(
    State(state): State<AppState>,
    Json(req): Json<SignUpRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    validate_sign_up(&req).map_err(AppError::FieldValidation)?;

    let existing: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
        .bind(&req.email)
        .fetch_optional(&state.db)
        .await?;
    if existing.is_some() {
        return Err(AppError::Validation("Email already exists".to_string()));
    }

    let user: UserRow = sqlx::query_as(
        "INSERT INTO users (name, email, password_hash, headline)
         VALUES ($1, $2, $3, $4)
         RETURNING *",
    )
    .bind(&req.name)
    .bind(&req.email)
    .bind(hash_password(&req.password))
    .bind(&req.headline)
    .fetch_one(&state.db)
    .await?;

    let token = issue_single_use_token(
        &state,
        "email_verification_tokens",
        user.id,
        VERIFICATION_TTL_HOURS,
    )
    .await?;
    let recipient = user.email.clone();
    send_mail(state.mailer.clone(), move |mailer| {
        mailer.send_verification(&recipient, &token)
    })
    .await?;

    let session = issue_token(user.id, &state.config.jwt_secret)?;
    Ok(Json(SessionResponse {
        user: PublicUser::from(&user),
        token: session,
    }))
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/v1/auth/sign-in
pub async fn handle_sign_in(
    State(state): State<AppState>,
    Json(req): Json<SignInRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let user: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(&req.email)
        .fetch_optional(&state.db)
        .await?;

    let user = user.ok_or(AppError::Unauthorized)?;
    if !verify_password(&req.password, &user.password_hash) {
        return Err(AppError::Unauthorized);
    }

    let session = issue_token(user.id, &state.config.jwt_secret)?;
    Ok(Json(SessionResponse {
        user: PublicUser::from(&user),
        token: session,
    }))
}

#[derive(Debug, Deserialize)]
pub struct VerifyEmailRequest {
    pub token: String,
}

#[derive(Serialize)]
pub struct OkResponse {
    pub success: bool,
}

/// POST /api/v1/auth/verify-email
pub async fn handle_verify_email(
    State(state): State<AppState>,
    Json(req): Json<VerifyEmailRequest>,
) -> Result<Json<OkResponse>, AppError> {
    let row: Option<AuthTokenRow> = sqlx::query_as(
        "SELECT * FROM email_verification_tokens WHERE token = $1 AND expires_at > now()",
    )
    .bind(&req.token)
    .fetch_optional(&state.db)
    .await?;

    let row = row.ok_or_else(|| AppError::Validation("Invalid or expired token".to_string()))?;

    sqlx::query("UPDATE users SET email_verified = now(), updated_at = now() WHERE id = $1")
        .bind(row.user_id)
        .execute(&state.db)
        .await?;
    // Single use: the token is deleted once redeemed.
    sqlx::query("DELETE FROM email_verification_tokens WHERE token = $1")
        .bind(&req.token)
        .execute(&state.db)
        .await?;

    Ok(Json(OkResponse { success: true }))
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// POST /api/v1/auth/forgot-password
///
/// Always answers success so the endpoint cannot be used to probe which
/// addresses have accounts.
pub async fn handle_forgot_password(
    State(state): State<AppState>,
    Json(req): Json<ForgotPasswordRequest>,
) -> Result<Json<OkResponse>, AppError> {
    let user: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(&req.email)
        .fetch_optional(&state.db)
        .await?;

    if let Some(user) = user {
        let token =
            issue_single_use_token(&state, "password_reset_tokens", user.id, RESET_TTL_HOURS)
                .await?;
        // Best effort: a failed reset mail is logged, never surfaced.
        let recipient = user.email.clone();
        if let Err(err) = send_mail(state.mailer.clone(), move |mailer| {
            mailer.send_password_reset(&recipient, &token)
        })
        .await
        {
            tracing::warn!("password reset mail failed: {err}");
        }
    }

    Ok(Json(OkResponse { success: true }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
    pub confirm_new_password: String,
}

/// POST /api/v1/auth/reset-password
pub async fn handle_reset_password(
    State(state): State<AppState>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<Json<OkResponse>, AppError> {
    let mut errors = FieldErrors::default();
    if req.new_password.chars().count() < 6 {
        errors.push("newPassword", "Password must be at least 6 characters");
    }
    if req.new_password != req.confirm_new_password {
        errors.push("confirmNewPassword", "Passwords don't match");
    }
    if !errors.is_empty() {
        return Err(AppError::FieldValidation(errors));
    }

    let row: Option<AuthTokenRow> = sqlx::query_as(
        "SELECT * FROM password_reset_tokens WHERE token = $1 AND expires_at > now()",
    )
    .bind(&req.token)
    .fetch_optional(&state.db)
    .await?;
    let row = row.ok_or_else(|| AppError::Validation("Invalid or expired token".to_string()))?;

    sqlx::query("UPDATE users SET password_hash = $1, updated_at = now() WHERE id = $2")
        .bind(hash_password(&req.new_password))
        .bind(row.user_id)
        .execute(&state.db)
        .await?;
    sqlx::query("DELETE FROM password_reset_tokens WHERE token = $1")
        .bind(&req.token)
        .execute(&state.db)
        .await?;

    Ok(Json(OkResponse { success: true }))
}

// ── Helpers ─────────────────────────────────────────────────────────────────

/// Creates a fresh single-use token in the given table.
async fn issue_single_use_token(
    state: &AppState,
    table: &str,
    user_id: Uuid,
    ttl_hours: i64,
) -> Result<String, AppError> {
    let token = Uuid::new_v4().to_string();
    let expires_at = Utc::now() + Duration::hours(ttl_hours);
    let sql = format!("INSERT INTO {table} (user_id, token, expires_at) VALUES ($1, $2, $3)");
    sqlx::query(&sql)
        .bind(user_id)
        .bind(&token)
        .bind(expires_at)
        .execute(&state.db)
        .await?;
    Ok(token)
}

/// Runs a blocking SMTP send off the async runtime.
async fn send_mail<F>(mailer: Mailer, send: F) -> Result<(), AppError>
where
    F: FnOnce(&Mailer) -> Result<(), AppError> + Send + 'static,
{
    tokio::task::spawn_blocking(move || send(&mailer))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("mail task panicked: {e}")))?
}
