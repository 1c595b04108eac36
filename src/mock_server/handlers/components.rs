//! Component endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{authorize, error, paged, PageQuery};
use crate::mock_server::state::MockState;
use crate::{Component, ComponentIdentityQuery};

/// Filter parameters for listing a project's components.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListComponentsQuery {
    pub only_direct: Option<bool>,
    pub only_outdated: Option<bool>,
}

/// Query parameters for an identity lookup.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityQuery {
    pub group: Option<String>,
    pub name: Option<String>,
    pub version: Option<String>,
    pub purl: Option<String>,
    pub cpe: Option<String>,
    pub swid_tag_id: Option<String>,
    pub project: Option<Uuid>,
}

fn sort_key(component: &Component) -> String {
    component.name.clone()
}

/// GET /api/v1/component/{uuid}
pub async fn get_component(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path(uuid): Path<Uuid>,
) -> Response {
    let mut state = state.write().await;
    state.api_requests += 1;
    if let Some(denied) = authorize(&state, &headers) {
        return denied;
    }

    match state.get_component(&uuid) {
        Some(component) => (StatusCode::OK, Json(component.clone())).into_response(),
        None => error(
            StatusCode::NOT_FOUND,
            "The component could not be found.",
        ),
    }
}

/// GET /api/v1/component/project/{uuid}
pub async fn list_project_components(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path(project): Path<Uuid>,
    Query(page): Query<PageQuery>,
    Query(query): Query<ListComponentsQuery>,
) -> Response {
    let mut state = state.write().await;
    state.api_requests += 1;
    if let Some(denied) = authorize(&state, &headers) {
        return denied;
    }

    if !state.project_components.contains_key(&project) {
        return error(StatusCode::NOT_FOUND, "The project could not be found.");
    }

    let components: Vec<Component> = state
        .list_project_components(
            &project,
            query.only_direct.unwrap_or(false),
            query.only_outdated.unwrap_or(false),
        )
        .into_iter()
        .cloned()
        .collect();

    paged(&state, components, &page, sort_key)
}

/// GET /api/v1/component/hash/{hash}
pub async fn get_components_by_hash(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path(hash): Path<String>,
    Query(query): Query<PageQuery>,
) -> Response {
    let mut state = state.write().await;
    state.api_requests += 1;
    if let Some(denied) = authorize(&state, &headers) {
        return denied;
    }

    let components: Vec<Component> = state.find_by_hash(&hash).into_iter().cloned().collect();
    paged(&state, components, &query, sort_key)
}

/// GET /api/v1/component/identity
pub async fn get_components_by_identity(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Query(page): Query<PageQuery>,
    Query(query): Query<IdentityQuery>,
) -> Response {
    let mut state = state.write().await;
    state.api_requests += 1;
    if let Some(denied) = authorize(&state, &headers) {
        return denied;
    }

    let identity = ComponentIdentityQuery {
        group: query.group,
        name: query.name,
        version: query.version,
        purl: query.purl,
        cpe: query.cpe,
        swid_tag_id: query.swid_tag_id,
        project: query.project,
    };
    let components: Vec<Component> = state
        .find_by_identity(&identity)
        .into_iter()
        .cloned()
        .collect();
    paged(&state, components, &page, sort_key)
}

/// GET /api/v1/component/internal/identify
pub async fn identify_internal(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
) -> Response {
    let mut state = state.write().await;
    state.api_requests += 1;
    if let Some(denied) = authorize(&state, &headers) {
        return denied;
    }

    StatusCode::NO_CONTENT.into_response()
}

/// PUT /api/v1/component/project/{uuid}
pub async fn create_component(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path(project): Path<Uuid>,
    Json(component): Json<Component>,
) -> Response {
    let mut state = state.write().await;
    state.api_requests += 1;
    if let Some(denied) = authorize(&state, &headers) {
        return denied;
    }

    if component.name.is_empty() {
        return error(StatusCode::BAD_REQUEST, "A component name is required.");
    }

    let created = state.insert_component(project, component).clone();
    (StatusCode::CREATED, Json(created)).into_response()
}

/// POST /api/v1/component
pub async fn update_component(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Json(component): Json<Component>,
) -> Response {
    let mut state = state.write().await;
    state.api_requests += 1;
    if let Some(denied) = authorize(&state, &headers) {
        return denied;
    }

    match state.update_component(component) {
        Some(updated) => (StatusCode::OK, Json(updated.clone())).into_response(),
        None => error(
            StatusCode::NOT_FOUND,
            "The UUID of the component could not be found.",
        ),
    }
}

/// DELETE /api/v1/component/{uuid}
pub async fn delete_component(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path(uuid): Path<Uuid>,
) -> Response {
    let mut state = state.write().await;
    state.api_requests += 1;
    if let Some(denied) = authorize(&state, &headers) {
        return denied;
    }

    if state.delete_component(&uuid) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        error(
            StatusCode::NOT_FOUND,
            "The UUID of the component could not be found.",
        )
    }
}
