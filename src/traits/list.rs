//! List trait for fetching collections of entities.

use async_trait::async_trait;

use crate::client::DtrackClient;
use crate::error::Result;
use crate::pagination::{fetch_all, Page, PageOptions};

/// List/filter entities with pagination support.
///
/// # Example
///
/// ```ignore
/// use dtrack::{ComponentListQuery, Component, DtrackClient, List, PageOptions};
///
/// let client = DtrackClient::from_env()?;
/// let query = ComponentListQuery::for_project(project_uuid);
///
/// // Fetch a single page
/// let page = Component::list_page(&client, &query, PageOptions::new(1, 50)).await?;
///
/// // Fetch all pages
/// let all = Component::list_all(&client, &query).await?;
/// ```
#[async_trait]
pub trait List: Sized + Send {
    /// Parent scope plus filtering and sorting.
    type Query: Default + Send + Sync;

    /// List entities matching the query (single page).
    ///
    /// # Errors
    ///
    /// Returns an error if the server predates the endpoint or the request
    /// fails.
    async fn list_page(
        client: &DtrackClient,
        query: &Self::Query,
        page: PageOptions,
    ) -> Result<Page<Self>>;

    /// List all entities matching the query (fetches all pages).
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    async fn list_all(client: &DtrackClient, query: &Self::Query) -> Result<Vec<Self>> {
        fetch_all(|page| Self::list_page(client, query, page)).await
    }
}
