//! Create trait for adding entities under a parent.

use async_trait::async_trait;

use crate::client::DtrackClient;
use crate::error::Result;

/// Create a new entity under a parent resource.
///
/// # Example
///
/// ```ignore
/// use dtrack::{Component, Create, DtrackClient};
///
/// let created = Component::create(&client, project_uuid, Component::new("acme-lib", "1.2.0")).await?;
/// ```
#[async_trait]
pub trait Create: Sized + Send {
    /// The ID type of the owning resource.
    type Parent: Send;

    /// Create `item` under `parent` and return it as stored by the server.
    async fn create(client: &DtrackClient, parent: Self::Parent, item: Self) -> Result<Self>;
}
