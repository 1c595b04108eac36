//! Get trait for fetching single entities.

use async_trait::async_trait;

use crate::client::DtrackClient;
use crate::error::Result;

/// Fetch a single entity by ID.
///
/// Implement this trait for entity types that can be fetched individually
/// by a unique identifier (typically a UUID).
///
/// # Example
///
/// ```ignore
/// use dtrack::{DtrackClient, Component, Get};
///
/// let client = DtrackClient::from_env()?;
/// let component = Component::get(&client, component_uuid).await?;
/// ```
#[async_trait]
pub trait Get: Sized {
    /// The ID type for this entity.
    type Id;

    /// Fetch the entity by ID.
    ///
    /// # Errors
    ///
    /// Fails with a not-found HTTP error if the entity does not exist, or
    /// with a version error if the server predates the endpoint.
    async fn get(client: &DtrackClient, id: Self::Id) -> Result<Self>;
}
