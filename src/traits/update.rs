//! Update trait for modifying entities.

use async_trait::async_trait;

use crate::client::DtrackClient;
use crate::error::Result;

/// Update an existing entity.
///
/// The entity carries its own identifier; the server replaces the stored
/// record with it.
///
/// # Example
///
/// ```ignore
/// use dtrack::{Component, DtrackClient, Get, Update};
///
/// let mut component = Component::get(&client, id).await?;
/// component.description = Some("Vendored fork".to_string());
/// let updated = Component::update(&client, component).await?;
/// ```
#[async_trait]
pub trait Update: Sized + Send {
    /// Update the entity and return the updated version.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found or the request fails.
    async fn update(client: &DtrackClient, item: Self) -> Result<Self>;
}
