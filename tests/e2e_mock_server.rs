//! E2E tests using the mock Dependency-Track server.
//!
//! These tests exercise full workflows against the mock server,
//! testing realistic scenarios rather than individual endpoints.

#![cfg(feature = "test-server")]

use dtrack::mock_server::{Fixtures, MockServer, MockState};
use dtrack::{
    export_cyclonedx, get_components, get_components_by_hash, upload_vex, Component,
    ComponentFilterOptions, ComponentIdentityQuery, ComponentListQuery, ComponentProperty, Create,
    Delete, DtrackClient, DtrackError, Get, List, PageOptions, SortOptions, SortOrder, Update,
    VexUploadRequest,
};

fn client_for(server: &MockServer) -> DtrackClient {
    DtrackClient::new(server.url(), "test-key").unwrap()
}

// =============================================================================
// Server Lifecycle Tests
// =============================================================================

#[tokio::test]
async fn test_server_starts_on_random_port() {
    let server1 = MockServer::start().await;
    let server2 = MockServer::start().await;

    assert_ne!(server1.url(), server2.url());

    server1.shutdown().await;
    server2.shutdown().await;
}

#[tokio::test]
async fn test_server_shutdown_is_clean() {
    let server = MockServer::start().await;
    let url = server.url().to_string();

    server.shutdown().await;

    // After shutdown, server should not respond
    let client = reqwest::Client::new();
    let result = client.get(format!("{}/api/version", url)).send().await;

    assert!(result.is_err());
}

// =============================================================================
// Version Gating
// =============================================================================

#[tokio::test]
async fn test_version_fetched_once_per_client() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    for _ in 0..3 {
        Component::get(&client, Fixtures::LODASH).await.unwrap();
    }
    client.clone().server_version().await.unwrap();

    let state = server.state();
    let state = state.read().await;
    assert_eq!(state.version_requests, 1);
    assert_eq!(state.api_requests, 3);
    drop(state);

    server.shutdown().await;
}

#[tokio::test]
async fn test_old_server_gets_no_listing_request() {
    let server = MockServer::with_state(MockState::new().with_version("3.9.0")).await;
    let client = client_for(&server);

    let query = ComponentListQuery::for_project(Fixtures::PROJECT);
    let err = Component::list_page(&client, &query, PageOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, DtrackError::Version { .. }));
    assert_eq!(server.state().read().await.api_requests, 0);

    server.shutdown().await;
}

#[tokio::test]
async fn test_hash_lookup_on_3x_server_counts_items() {
    let state = MockState::new()
        .with_version("3.9.0")
        .with_component(Fixtures::PROJECT, {
            let mut c = Fixtures::npm_component("lodash", "4.17.21", "MIT");
            c.sha1 = Some(Fixtures::LODASH_SHA1.to_string());
            c
        });
    let server = MockServer::with_state(state).await;
    let client = client_for(&server);

    let all = get_components_by_hash(&client, Fixtures::LODASH_SHA1)
        .await
        .unwrap();
    assert_eq!(all.len(), 1);

    server.shutdown().await;
}

// =============================================================================
// Component Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_list_then_get_workflow() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let query = ComponentListQuery {
        project: Fixtures::PROJECT,
        sort: SortOptions::by("name", SortOrder::Asc),
        ..Default::default()
    };
    let page = Component::list_page(&client, &query, PageOptions::new(1, 10))
        .await
        .unwrap();

    assert_eq!(page.total_count, 3);
    assert_eq!(page.items[0].name, "accepts");

    let uuid = page.items[0].uuid.expect("listed components carry a uuid");
    let component = Component::get(&client, uuid).await.unwrap();
    assert_eq!(component, page.items[0]);

    server.shutdown().await;
}

#[tokio::test]
async fn test_list_filters() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let direct = get_components(
        &client,
        Fixtures::PROJECT,
        ComponentFilterOptions {
            only_direct: true,
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(direct.len(), 2);

    let outdated = get_components(
        &client,
        Fixtures::PROJECT,
        ComponentFilterOptions {
            only_outdated: true,
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(outdated.len(), 1);
    assert_eq!(outdated[0].name, "express");

    server.shutdown().await;
}

#[tokio::test]
async fn test_hash_and_identity_lookups() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let by_hash = get_components_by_hash(&client, Fixtures::LODASH_SHA1)
        .await
        .unwrap();
    assert_eq!(by_hash.len(), 1);
    assert_eq!(by_hash[0].uuid, Some(Fixtures::LODASH));

    let identity = ComponentIdentityQuery {
        purl: Some("pkg:npm/express@4.18.0".to_string()),
        project: Some(Fixtures::PROJECT),
        ..Default::default()
    };
    let page = Component::get_by_identity(
        &client,
        &identity,
        PageOptions::default(),
        &SortOptions::default(),
    )
    .await
    .unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page.items[0].name, "express");

    server.shutdown().await;
}

#[tokio::test]
async fn test_create_update_delete_workflow() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let created = Component::create(&client, Fixtures::PROJECT, Component::new("acme-lib", "1.0.0"))
        .await
        .unwrap();
    let uuid = created.uuid.expect("created component has a uuid");

    let mut changed = created.clone();
    changed.version = "1.0.1".to_string();
    let updated = Component::update(&client, changed).await.unwrap();
    assert_eq!(updated.version, "1.0.1");
    assert_eq!(Component::get(&client, uuid).await.unwrap().version, "1.0.1");

    Component::delete(&client, uuid).await.unwrap();
    let err = Component::get(&client, uuid).await.unwrap_err();
    assert!(err.is_not_found());

    server.shutdown().await;
}

#[tokio::test]
async fn test_property_workflow() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let existing = ComponentProperty::list(&client, Fixtures::LODASH)
        .await
        .unwrap();
    assert_eq!(existing.len(), 1);

    let created = ComponentProperty::create(
        &client,
        Fixtures::LODASH,
        Fixtures::string_property("internal", "tier", "1"),
    )
    .await
    .unwrap();

    let duplicate = ComponentProperty::create(
        &client,
        Fixtures::LODASH,
        Fixtures::string_property("internal", "tier", "2"),
    )
    .await
    .unwrap_err();
    assert_eq!(duplicate.status(), Some(409));

    let property = created.uuid.expect("created property has a uuid");
    ComponentProperty::delete(&client, (Fixtures::LODASH, property))
        .await
        .unwrap();

    let remaining = ComponentProperty::list(&client, Fixtures::LODASH)
        .await
        .unwrap();
    assert_eq!(remaining.len(), 1);

    server.shutdown().await;
}

// =============================================================================
// VEX Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_vex_export_and_upload() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let document = export_cyclonedx(&client, Fixtures::PROJECT).await.unwrap();
    assert!(document.contains("CycloneDX"));

    let upload = VexUploadRequest::for_project(Fixtures::PROJECT, document.clone());
    let token = upload_vex(&client, &upload).await.unwrap();
    assert!(!token.to_string().is_empty());

    let state = server.state();
    let state = state.read().await;
    assert_eq!(state.vex_uploads, vec![document.into_bytes()]);
    drop(state);

    server.shutdown().await;
}
