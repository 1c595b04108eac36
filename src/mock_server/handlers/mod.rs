//! HTTP request handlers for the mock server.

pub mod about;
pub mod components;
pub mod properties;
pub mod vex;

pub use about::*;
pub use components::*;
pub use properties::*;
pub use vex::*;

use axum::{
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::mock_server::state::MockState;
use crate::TOTAL_COUNT_HEADER;

/// Paging and sorting parameters shared by list endpoints.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page_number: Option<usize>,
    pub page_size: Option<usize>,
    pub sort_name: Option<String>,
    pub sort_order: Option<String>,
}

/// Reject the request unless it carries the required API key.
pub(crate) fn authorize(state: &MockState, headers: &HeaderMap) -> Option<Response> {
    let required = state.required_api_key.as_deref()?;
    let sent = headers.get("x-api-key").and_then(|v| v.to_str().ok());
    if sent == Some(required) {
        return None;
    }
    Some(error(StatusCode::UNAUTHORIZED, "Invalid or missing API key"))
}

/// A JSON error body the way the server reports failures.
pub(crate) fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "message": message }))).into_response()
}

/// Sort, slice and serialize one page of `items`.
///
/// `X-Total-Count` is only sent when the reported server version has it.
pub(crate) fn paged<T: Serialize + Clone>(
    state: &MockState,
    mut items: Vec<T>,
    query: &PageQuery,
    sort_key: impl Fn(&T) -> String,
) -> Response {
    if query.sort_name.as_deref().is_some_and(|s| !s.is_empty()) {
        items.sort_by_key(|item| sort_key(item));
        if query.sort_order.as_deref() == Some("desc") {
            items.reverse();
        }
    }

    let total = items.len();
    let page: Vec<T> = match query.page_size {
        Some(size) if size > 0 => {
            let number = query.page_number.unwrap_or(1).max(1);
            items
                .into_iter()
                .skip((number - 1) * size)
                .take(size)
                .collect()
        }
        _ => items,
    };

    let mut response = (StatusCode::OK, Json(page)).into_response();
    if state.reports_total_count() {
        response
            .headers_mut()
            .insert(TOTAL_COUNT_HEADER, HeaderValue::from(total));
    }
    response
}
