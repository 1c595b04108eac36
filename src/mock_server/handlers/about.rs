//! Server version endpoint.

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use tokio::sync::RwLock;

use crate::mock_server::state::MockState;

/// GET /api/version
pub async fn get_version(State(state): State<Arc<RwLock<MockState>>>) -> impl IntoResponse {
    let mut state = state.write().await;
    state.version_requests += 1;

    Json(serde_json::json!({
        "version": state.version,
        "application": "Dependency-Track",
        "timestamp": "2024-06-21T13:24:28Z",
        "framework": {"name": "Alpine", "version": "2.2.5"}
    }))
}
