use axum::{extract::State, Json};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::session::AuthUser;
use crate::builder::document::ProfileSeed;
use crate::errors::AppError;
use crate::models::user::UserRow;
use crate::state::AppState;

#[derive(Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub headline: Option<String>,
    pub email_verified: bool,
}

/// GET /api/v1/users/profile
///
/// The wizard host reads this to pre-seed a fresh document
/// (see [`crate::builder::document::ResumeDocument::from_profile`]).
pub async fn handle_get_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ProfileResponse>, AppError> {
    let user: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(&state.db)
        .await?;
    let user = user.ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(ProfileResponse {
        id: user.id,
        name: user.name,
        email: user.email,
        headline: user.headline,
        email_verified: user.email_verified.is_some(),
    }))
}

impl From<&ProfileResponse> for ProfileSeed {
    fn from(profile: &ProfileResponse) -> Self {
        ProfileSeed {
            name: profile.name.clone(),
            email: profile.email.clone(),
            headline: profile.headline.clone(),
            role: None,
        }
    }
}
