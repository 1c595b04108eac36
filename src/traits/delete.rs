//! Delete trait for removing entities.

use async_trait::async_trait;

use crate::client::DtrackClient;
use crate::error::Result;

/// Delete an entity by ID.
#[async_trait]
pub trait Delete {
    /// The ID type for this entity.
    type Id: Send;

    /// Delete the entity. Nothing is returned on success.
    async fn delete(client: &DtrackClient, id: Self::Id) -> Result<()>;
}
