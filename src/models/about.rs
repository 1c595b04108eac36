//! Server identity and version information.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::client::DtrackClient;
use crate::error::{DtrackError, Result};
use crate::version::ServerVersion;

/// What `GET /api/version` reports about the server.
///
/// Available on every server release and unauthenticated, which is why the
/// version gate uses it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct About {
    /// Instance UUID.
    #[serde(default)]
    pub uuid: Option<Uuid>,

    /// System UUID.
    #[serde(default)]
    pub system_uuid: Option<Uuid>,

    /// Application name (e.g. "Dependency-Track").
    #[serde(default)]
    pub application: Option<String>,

    /// Raw version string as reported, including any suffix.
    pub version: String,

    /// Build timestamp.
    #[serde(default)]
    pub timestamp: Option<String>,

    /// Underlying framework details.
    #[serde(default)]
    pub framework: Option<Framework>,
}

/// Framework the server is built on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Framework {
    #[serde(default)]
    pub uuid: Option<Uuid>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl About {
    /// Fetch the server's about information.
    #[tracing::instrument(skip(client))]
    pub async fn get(client: &DtrackClient) -> Result<Self> {
        let request = client.request(reqwest::Method::GET, "api/version", &[])?;
        let (about, _) = client.execute(request).await?;
        Ok(about)
    }

    /// The comparable server version.
    ///
    /// # Errors
    ///
    /// A version string that is not `major[.minor[.patch]]` is reported as
    /// a decode error, since it came from a response body.
    pub fn server_version(&self) -> Result<ServerVersion> {
        self.version.parse().map_err(|_| {
            DtrackError::Decode(<serde_json::Error as serde::de::Error>::custom(format!(
                "invalid server version '{}'",
                self.version
            )))
        })
    }
}
