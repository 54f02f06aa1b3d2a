//! Auth routes: password sign-in, sign-out and the current auth state.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use crate::supabase::BackendError;
use crate::supabase::auth::User;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Wire view of [`crate::auth::AuthState`].
#[derive(Debug, PartialEq, Serialize)]
pub struct AuthSnapshot {
    pub status: &'static str,
    pub user: Option<User>,
}

pub(crate) fn auth_error_to_status(err: &BackendError) -> StatusCode {
    match err {
        BackendError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
        BackendError::Api { status: 400 | 401 | 422, .. } => StatusCode::UNAUTHORIZED,
        _ => StatusCode::BAD_GATEWAY,
    }
}

/// `POST /api/auth/login`: sign in with email and password.
pub async fn login(State(state): State<AppState>, Json(req): Json<LoginRequest>) -> Result<Json<User>, StatusCode> {
    let provider = state.backend.auth().ok_or(StatusCode::SERVICE_UNAVAILABLE)?;
    let session = provider
        .sign_in_with_password(&req.email, &req.password)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "password sign-in failed");
            auth_error_to_status(&e)
        })?;
    Ok(Json(session.user))
}

/// `POST /api/auth/logout`: end the current session.
pub async fn logout(State(state): State<AppState>) -> StatusCode {
    let Some(provider) = state.backend.auth() else {
        return StatusCode::SERVICE_UNAVAILABLE;
    };
    if let Err(e) = provider.sign_out().await {
        // The local session is already gone; the remote revoke is best effort.
        tracing::warn!(error = %e, "remote sign-out failed");
    }
    StatusCode::NO_CONTENT
}

/// `GET /api/auth/me`: current auth state, `pending` until the initial
/// session lookup resolves.
pub async fn me(State(state): State<AppState>) -> Json<AuthSnapshot> {
    let current = state.auth.get();
    Json(AuthSnapshot { status: current.label(), user: current.user().cloned() })
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
