//! Dependency-Track API client library.
//!
//! A Rust library for the Dependency-Track REST API using a trait-based
//! architecture where each operation (Get, List, Create, Update, Delete)
//! is defined as a trait that entity types implement.
//!
//! # Quick Start
//!
//! ```no_run
//! use dtrack::{Component, ComponentListQuery, DtrackClient, Get, List, PageOptions};
//!
//! #[tokio::main]
//! async fn main() -> dtrack::Result<()> {
//!     // Create client from environment variables
//!     let client = DtrackClient::from_env()?;
//!     println!("Server version: {}", client.server_version().await?);
//!
//!     // List the first page of a project's components
//!     let project = "0c9b2a8e-93a5-4c3f-8f39-2c7b0f9c1a10".parse().unwrap();
//!     let query = ComponentListQuery::for_project(project);
//!     let page = Component::list_page(&client, &query, PageOptions::new(1, 50)).await?;
//!     println!("{} of {} components", page.len(), page.total_count);
//!
//!     // Fetch one of them by UUID
//!     if let Some(uuid) = page.items.first().and_then(|c| c.uuid) {
//!         let component = Component::get(&client, uuid).await?;
//!         println!("{}", component.coordinates());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Server versions
//!
//! Each operation declares the oldest server release that supports it. The
//! client fetches the server's version once, on first use, and rejects an
//! unsupported operation with [`DtrackError::Version`] before sending
//! anything for it.
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `DTRACK_URL` (required) - Base URL of the Dependency-Track API server
//! - `DTRACK_API_KEY` - API key, sent as `X-Api-Key`
//! - `DTRACK_BEARER_TOKEN` - Bearer token, used when no API key is set

mod cancel;
mod client;
mod error;
mod models;
mod pagination;
mod request;
mod response;
mod traits;
mod version;

pub mod cli;
pub mod output;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use cancel::cancellable;
pub use client::{ClientBuilder, Credential, DtrackClient};
pub use error::{DtrackError, Result, StatusKind, TransportError};
pub use pagination::{
    fetch_all, Page, PageOptions, SortOptions, SortOrder, DEFAULT_PAGE_SIZE, TOTAL_COUNT_SUPPORT,
};
pub use request::{with_body, Accept, Deadline, JsonBody, Request, RequestOption};
pub use response::{ResponseMeta, TOTAL_COUNT_HEADER};
pub use version::{ServerVersion, VersionRegistry};

// Re-export traits
pub use traits::{Create, Delete, Get, List, Update};

// Re-export models
pub use models::{
    // Server information
    About,
    Framework,
    // Component types
    Component,
    ComponentFilterOptions,
    ComponentIdentityQuery,
    ComponentListQuery,
    ComponentProperty,
    ExternalReference,
    License,
    ProjectRef,
    PropertyType,
    RepositoryMeta,
    // VEX types
    VexUploadRequest,
    VexUploadToken,
    CYCLONEDX_JSON,
};

// Re-export convenience functions
pub use models::{export_cyclonedx, upload_vex};
pub use models::{get_components, get_components_by_hash};
