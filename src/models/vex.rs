//! Vulnerability Exploitability eXchange (VEX) documents.

use std::fmt;

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_with::{base64::Base64, serde_as, skip_serializing_none};
use uuid::Uuid;

use crate::client::DtrackClient;
use crate::error::Result;
use crate::request::{with_body, Accept};

/// Media type of a CycloneDX JSON document.
pub const CYCLONEDX_JSON: &str = "application/vnd.cyclonedx+json";

/// A VEX document to upload.
///
/// The target project is identified either by UUID or by name and version.
/// The document itself is sent base64-encoded.
#[skip_serializing_none]
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VexUploadRequest {
    /// Target project UUID.
    #[serde(rename = "project")]
    pub project_uuid: Option<Uuid>,
    pub project_name: Option<String>,
    pub project_version: Option<String>,
    /// Raw document bytes (typically CycloneDX JSON).
    #[serde_as(as = "Base64")]
    pub vex: Vec<u8>,
}

impl VexUploadRequest {
    /// Upload `document` to the project with the given UUID.
    pub fn for_project(project: Uuid, document: impl Into<Vec<u8>>) -> Self {
        Self {
            project_uuid: Some(project),
            vex: document.into(),
            ..Default::default()
        }
    }

    /// Upload `document` to the project with the given name and version.
    pub fn for_project_name(
        name: impl Into<String>,
        version: impl Into<String>,
        document: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            project_name: Some(name.into()),
            project_version: Some(version.into()),
            vex: document.into(),
            ..Default::default()
        }
    }
}

/// Opaque token identifying the server-side processing of an upload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VexUploadToken(pub String);

impl fmt::Display for VexUploadToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Deserialize)]
struct VexUploadResponse {
    token: VexUploadToken,
}

/// Export a project's VEX as a CycloneDX JSON document.
#[tracing::instrument(skip(client))]
pub async fn export_cyclonedx(client: &DtrackClient, project: Uuid) -> Result<String> {
    let path = format!("api/v1/vex/cyclonedx/project/{project}");
    let request = client.request(Method::GET, &path, &[&Accept(CYCLONEDX_JSON)])?;
    let (document, _) = client.execute_text(request).await?;
    Ok(document)
}

/// Upload a VEX document and return its processing token.
#[tracing::instrument(skip(client, upload), fields(project = ?upload.project_uuid))]
pub async fn upload_vex(client: &DtrackClient, upload: &VexUploadRequest) -> Result<VexUploadToken> {
    let request = client.request(Method::PUT, "api/v1/vex", &[&with_body(upload)])?;
    let (response, _): (VexUploadResponse, _) = client.execute(request).await?;
    Ok(response.token)
}
