//! Mock Dependency-Track server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the
//! Dependency-Track API for integration and end-to-end testing. Unlike
//! wiremock which mocks at the HTTP level per-test, this server maintains
//! state across requests, enabling realistic workflow testing.
//!
//! The reported server version is part of the state, so the same fixtures
//! can be served as an old or a current release.
//!
//! # Example
//!
//! ```ignore
//! use dtrack::mock_server::{Fixtures, MockServer};
//! use dtrack::{Component, DtrackClient, Get};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = DtrackClient::new(server.url(), "test-key").unwrap();
//!
//!     // Server comes with default fixtures
//!     let component = Component::get(&client, Fixtures::LODASH).await.unwrap();
//!     assert_eq!(component.name, "lodash");
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures};
pub use server::MockServer;
pub use state::MockState;
