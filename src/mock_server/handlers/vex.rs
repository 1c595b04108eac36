//! VEX endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{authorize, error};
use crate::mock_server::state::MockState;
use crate::{VexUploadRequest, CYCLONEDX_JSON};

/// GET /api/v1/vex/cyclonedx/project/{uuid}
pub async fn export_vex(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path(project): Path<Uuid>,
) -> Response {
    let mut state = state.write().await;
    state.api_requests += 1;
    if let Some(denied) = authorize(&state, &headers) {
        return denied;
    }

    match state.vex_documents.get(&project) {
        Some(document) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, CYCLONEDX_JSON)],
            document.clone(),
        )
            .into_response(),
        None => error(StatusCode::NOT_FOUND, "The project could not be found."),
    }
}

/// PUT /api/v1/vex
pub async fn upload_vex(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Json(upload): Json<VexUploadRequest>,
) -> Response {
    let mut state = state.write().await;
    state.api_requests += 1;
    if let Some(denied) = authorize(&state, &headers) {
        return denied;
    }

    let by_name = upload.project_name.is_some() && upload.project_version.is_some();
    if upload.project_uuid.is_none() && !by_name {
        return error(
            StatusCode::BAD_REQUEST,
            "A project UUID or name and version is required.",
        );
    }

    state.vex_uploads.push(upload.vex);
    let token = Uuid::new_v4();
    (StatusCode::OK, Json(serde_json::json!({ "token": token }))).into_response()
}
