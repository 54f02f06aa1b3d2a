//! UI indicator routes.

use axum::extract::State;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct StatusResponse {
    pub loading: bool,
    pub navigating: bool,
    /// `false` when the backend fell back to its unconfigured variant.
    pub configured: bool,
}

#[derive(Deserialize)]
pub struct NavigatingRequest {
    pub value: bool,
}

fn snapshot(state: &AppState) -> StatusResponse {
    StatusResponse {
        loading: state.ui.loading.is_busy(),
        navigating: state.ui.navigating.get(),
        configured: state.backend.is_configured(),
    }
}

/// `GET /api/status`
pub async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(snapshot(&state))
}

/// `PUT /api/status/navigating`: toggled by the client around page transitions.
pub async fn set_navigating(
    State(state): State<AppState>,
    Json(req): Json<NavigatingRequest>,
) -> Json<StatusResponse> {
    state.ui.navigating.set(req.value);
    Json(snapshot(&state))
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;
