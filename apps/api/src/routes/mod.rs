pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::auth::handlers as auth;
use crate::errors::AppError;
use crate::resumes::handlers as resumes;
use crate::state::AppState;
use crate::users;

async fn not_implemented() -> Result<(), AppError> {
    Err(AppError::NotImplemented)
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth API
        .route("/api/v1/auth/sign-up", post(auth::handle_sign_up))
        .route("/api/v1/auth/sign-in", post(auth::handle_sign_in))
        .route("/api/v1/auth/verify-email", post(auth::handle_verify_email))
        .route(
            "/api/v1/auth/forgot-password",
            post(auth::handle_forgot_password),
        )
        .route(
            "/api/v1/auth/reset-password",
            post(auth::handle_reset_password),
        )
        // Users API
        .route("/api/v1/users/profile", get(users::handle_get_profile))
        // Resume API
        .route("/api/v1/resumes", post(resumes::handle_create_resume))
        .route(
            "/api/v1/resumes/:id",
            get(resumes::handle_get_resume).put(resumes::handle_update_resume),
        )
        .route(
            "/api/v1/resumes/:id/steps",
            post(resumes::handle_submit_step),
        )
        .route(
            "/api/v1/resumes/:id/preview",
            get(resumes::handle_preview),
        )
        // LinkedIn/PDF import is not wired up yet
        .route("/api/v1/resumes/import", post(not_implemented))
        .with_state(state)
}
