//! Component property endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{authorize, error};
use crate::mock_server::state::MockState;
use crate::ComponentProperty;

/// GET /api/v1/component/{uuid}/property
pub async fn list_properties(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path(component): Path<Uuid>,
) -> Response {
    let mut state = state.write().await;
    state.api_requests += 1;
    if let Some(denied) = authorize(&state, &headers) {
        return denied;
    }

    if state.get_component(&component).is_none() {
        return error(StatusCode::NOT_FOUND, "The component could not be found.");
    }

    let properties = state
        .properties
        .get(&component)
        .cloned()
        .unwrap_or_default();
    (StatusCode::OK, Json(properties)).into_response()
}

/// PUT /api/v1/component/{uuid}/property
pub async fn create_property(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path(component): Path<Uuid>,
    Json(property): Json<ComponentProperty>,
) -> Response {
    let mut state = state.write().await;
    state.api_requests += 1;
    if let Some(denied) = authorize(&state, &headers) {
        return denied;
    }

    if state.get_component(&component).is_none() {
        return error(StatusCode::NOT_FOUND, "The component could not be found.");
    }

    let duplicate = state.properties.get(&component).is_some_and(|existing| {
        existing
            .iter()
            .any(|p| p.group == property.group && p.name == property.name)
    });
    if duplicate {
        return error(StatusCode::CONFLICT, "A property with the specified name already exists.");
    }

    let created = state.add_property(component, property).clone();
    (StatusCode::CREATED, Json(created)).into_response()
}

/// DELETE /api/v1/component/{uuid}/property/{property}
pub async fn delete_property(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path((component, property)): Path<(Uuid, Uuid)>,
) -> Response {
    let mut state = state.write().await;
    state.api_requests += 1;
    if let Some(denied) = authorize(&state, &headers) {
        return denied;
    }

    if state.delete_property(&component, &property) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        error(StatusCode::NOT_FOUND, "The component property could not be found.")
    }
}
