//! Mock Dependency-Track server.
//!
//! Provides an axum-based HTTP server that simulates the Dependency-Track API.

use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers;
use super::state::MockState;

/// A mock Dependency-Track server for testing.
///
/// The server runs in the background and can be used to test the client
/// against a stateful API implementation.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `url()` to get the server's base URL.
    pub async fn start() -> Self {
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with empty state.
    ///
    /// Useful when you want to control exactly what data is available.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            url: format!("http://{}", addr),
            handle,
            state: shared_state,
        }
    }

    /// Get the base URL of the mock server.
    ///
    /// Use this URL when creating a `DtrackClient` for testing.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    ///
    /// This allows modifying the mock data or reading request counters
    /// during a test.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Shutdown the server.
    ///
    /// This aborts the server task. It's safe to call multiple times.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// Create the default state with common test fixtures.
    fn default_state() -> MockState {
        Self::state_from_scenario(Fixtures::default_scenario())
    }

    /// Create state from a scenario.
    fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        let mut state = MockState::new().with_vex(scenario.project, &scenario.vex);

        for (component, direct) in scenario.components {
            state = if direct {
                state.with_direct_component(scenario.project, component)
            } else {
                state.with_component(scenario.project, component)
            };
        }

        for (component, property) in scenario.properties {
            state.add_property(component, property);
        }

        state
    }

    /// Create the axum router with all routes.
    fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        Router::new()
            .route("/api/version", get(handlers::get_version))
            // Component routes
            .route("/api/v1/component", post(handlers::update_component))
            .route(
                "/api/v1/component/:uuid",
                get(handlers::get_component).delete(handlers::delete_component),
            )
            .route(
                "/api/v1/component/project/:uuid",
                get(handlers::list_project_components).put(handlers::create_component),
            )
            .route(
                "/api/v1/component/hash/:hash",
                get(handlers::get_components_by_hash),
            )
            .route(
                "/api/v1/component/identity",
                get(handlers::get_components_by_identity),
            )
            .route(
                "/api/v1/component/internal/identify",
                get(handlers::identify_internal),
            )
            // Property routes
            .route(
                "/api/v1/component/:uuid/property",
                get(handlers::list_properties).put(handlers::create_property),
            )
            .route(
                "/api/v1/component/:uuid/property/:property",
                delete(handlers::delete_property),
            )
            // VEX routes
            .route(
                "/api/v1/vex/cyclonedx/project/:uuid",
                get(handlers::export_vex),
            )
            .route("/api/v1/vex", put(handlers::upload_vex))
            .with_state(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Component, ComponentListQuery, DtrackClient, Get, List, PageOptions};

    #[tokio::test]
    async fn test_server_reports_version() {
        let server = MockServer::start().await;
        let client = DtrackClient::new(server.url(), "test-key").unwrap();

        let version = client.server_version().await.expect("Failed to get version");
        assert_eq!(version.to_string(), "4.11.4");

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_get_component_with_client() {
        let server = MockServer::start().await;
        let client = DtrackClient::new(server.url(), "test-key").unwrap();

        let component = Component::get(&client, Fixtures::LODASH)
            .await
            .expect("Failed to get component");

        assert_eq!(component.name, "lodash");

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_list_components_with_client() {
        let server = MockServer::start().await;
        let client = DtrackClient::new(server.url(), "test-key").unwrap();

        let query = ComponentListQuery::for_project(Fixtures::PROJECT);
        let page = Component::list_page(&client, &query, PageOptions::new(1, 2))
            .await
            .expect("Failed to list components");

        assert_eq!(page.len(), 2);
        assert_eq!(page.total_count, 3);

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_empty_server() {
        let server = MockServer::start_empty().await;
        let client = DtrackClient::new(server.url(), "test-key").unwrap();

        let err = Component::get(&client, Fixtures::LODASH).await.unwrap_err();
        assert!(err.is_not_found());

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_required_api_key() {
        let state = MockState::new().with_required_api_key("secret");
        let server = MockServer::with_state(state).await;
        let client = DtrackClient::new(server.url(), "wrong").unwrap();

        let err = Component::get(&client, Fixtures::LODASH).await.unwrap_err();
        assert_eq!(err.status(), Some(401));

        server.shutdown().await;
    }
}
