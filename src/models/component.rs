//! Component model and trait implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use uuid::Uuid;

use crate::client::DtrackClient;
use crate::error::{DtrackError, Result};
use crate::pagination::{fetch_all, Page, PageOptions, SortOptions};
use crate::request::{with_body, Request, RequestOption};
use crate::traits::{Create, Delete, Get, List, Update};
use crate::version::ServerVersion;

/// Core component endpoints (get, create, update, delete, hash lookup).
const COMPONENT_API: ServerVersion = ServerVersion::new(3, 0, 0);

/// Listing a project's components with paging and filters.
const PROJECT_LISTING: ServerVersion = ServerVersion::new(4, 0, 0);

/// Lookup by identity attributes.
const IDENTITY_LOOKUP: ServerVersion = ServerVersion::new(4, 0, 0);

/// Internal component identification.
const INTERNAL_IDENTIFICATION: ServerVersion = ServerVersion::new(4, 0, 0);

/// Component properties.
const COMPONENT_PROPERTIES: ServerVersion = ServerVersion::new(4, 11, 0);

/// A software component tracked by Dependency-Track.
///
/// Components belong to a project and are identified by UUID once stored.
/// Unset optional fields are left out of request bodies.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    /// Server-assigned identifier; absent on components not yet created.
    #[serde(default)]
    pub uuid: Option<Uuid>,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default)]
    pub publisher: Option<String>,

    /// Namespace or group (e.g. Maven groupId, npm scope).
    #[serde(default)]
    pub group: Option<String>,

    pub name: String,

    #[serde(default)]
    pub version: String,

    /// CycloneDX classifier (e.g. "LIBRARY", "FRAMEWORK").
    #[serde(default)]
    pub classifier: Option<String>,

    #[serde(default, rename = "filename")]
    pub file_name: Option<String>,

    #[serde(default)]
    pub extension: Option<String>,

    #[serde(default)]
    pub md5: Option<String>,

    #[serde(default)]
    pub sha1: Option<String>,

    #[serde(default)]
    pub sha256: Option<String>,

    #[serde(default)]
    pub sha384: Option<String>,

    #[serde(default)]
    pub sha512: Option<String>,

    #[serde(default, rename = "sha3_256")]
    pub sha3_256: Option<String>,

    #[serde(default, rename = "sha3_384")]
    pub sha3_384: Option<String>,

    #[serde(default, rename = "sha3_512")]
    pub sha3_512: Option<String>,

    #[serde(default, rename = "blake2b_256")]
    pub blake2b_256: Option<String>,

    #[serde(default, rename = "blake2b_384")]
    pub blake2b_384: Option<String>,

    #[serde(default, rename = "blake2b_512")]
    pub blake2b_512: Option<String>,

    #[serde(default)]
    pub blake3: Option<String>,

    /// Common Platform Enumeration identifier.
    #[serde(default)]
    pub cpe: Option<String>,

    /// Package URL.
    #[serde(default)]
    pub purl: Option<String>,

    /// SWID tag identifier.
    #[serde(default)]
    pub swid_tag_id: Option<String>,

    /// Whether the component was identified as internal.
    #[serde(default, rename = "isInternal", skip_serializing_if = "is_false")]
    pub internal: bool,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub copyright: Option<String>,

    /// Unresolved license name as declared.
    #[serde(default)]
    pub license: Option<String>,

    /// License resolved against the server's license catalogue.
    #[serde(default)]
    pub resolved_license: Option<License>,

    /// JSON-encoded list of direct dependencies, as stored by the server.
    #[serde(default)]
    pub direct_dependencies: Option<String>,

    #[serde(default)]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub external_references: Vec<ExternalReference>,

    /// Owning project.
    #[serde(default)]
    pub project: Option<ProjectRef>,

    /// Latest-version information from the configured repositories.
    #[serde(default)]
    pub repository_meta: Option<RepositoryMeta>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Component {
    /// A new, not yet stored component.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            ..Default::default()
        }
    }

    /// `group/name@version`, omitting the group when there is none.
    pub fn coordinates(&self) -> String {
        match self.group.as_deref().filter(|g| !g.is_empty()) {
            Some(group) => format!("{group}/{}@{}", self.name, self.version),
            None => format!("{}@{}", self.name, self.version),
        }
    }

    /// All hashes present on this component, as `(algorithm, value)`.
    pub fn hashes(&self) -> Vec<(&'static str, &str)> {
        [
            ("MD5", &self.md5),
            ("SHA-1", &self.sha1),
            ("SHA-256", &self.sha256),
            ("SHA-384", &self.sha384),
            ("SHA-512", &self.sha512),
            ("SHA3-256", &self.sha3_256),
            ("SHA3-384", &self.sha3_384),
            ("SHA3-512", &self.sha3_512),
            ("BLAKE2b-256", &self.blake2b_256),
            ("BLAKE2b-384", &self.blake2b_384),
            ("BLAKE2b-512", &self.blake2b_512),
            ("BLAKE3", &self.blake3),
        ]
        .into_iter()
        .filter_map(|(alg, value)| value.as_deref().map(|v| (alg, v)))
        .collect()
    }

    /// Whether the repositories know of a newer version.
    pub fn is_outdated(&self) -> bool {
        self.repository_meta
            .as_ref()
            .and_then(|m| m.latest_version.as_deref())
            .is_some_and(|latest| latest != self.version)
    }

    /// Look up components by hash (any supported algorithm).
    ///
    /// Servers before 4.0.0 do not report a total, so there the page's
    /// `total_count` is the number of items returned.
    #[tracing::instrument(skip(client))]
    pub async fn get_by_hash(
        client: &DtrackClient,
        hash: &str,
        page: PageOptions,
        sort: &SortOptions,
    ) -> Result<Page<Self>> {
        client.assert_version_at_least(COMPONENT_API).await?;

        let path = format!("api/v1/component/hash/{}", urlencoding::encode(hash));
        let request = client.request(Method::GET, &path, &[&page, sort])?;
        client.execute_page(request).await
    }

    /// Look up components by identity attributes.
    #[tracing::instrument(skip(client))]
    pub async fn get_by_identity(
        client: &DtrackClient,
        identity: &ComponentIdentityQuery,
        page: PageOptions,
        sort: &SortOptions,
    ) -> Result<Page<Self>> {
        client.assert_version_at_least(IDENTITY_LOOKUP).await?;

        let request = client.request(
            Method::GET,
            "api/v1/component/identity",
            &[&page, sort, identity],
        )?;
        client.execute_page(request).await
    }

    /// Ask the server to re-run internal component identification.
    #[tracing::instrument(skip(client))]
    pub async fn identify_internal(client: &DtrackClient) -> Result<()> {
        client.assert_version_at_least(INTERNAL_IDENTIFICATION).await?;

        let request = client.request(Method::GET, "api/v1/component/internal/identify", &[])?;
        client.execute_discard(request).await?;
        Ok(())
    }

    /// The properties attached to this component.
    ///
    /// # Errors
    ///
    /// Returns an error if the component has no UUID yet.
    pub async fn properties(&self, client: &DtrackClient) -> Result<Vec<ComponentProperty>> {
        let uuid = self.uuid.ok_or_else(|| {
            DtrackError::InvalidRequest("component has no uuid".to_string())
        })?;
        ComponentProperty::list(client, uuid).await
    }
}

/// A license from the server's catalogue.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct License {
    #[serde(default)]
    pub uuid: Option<Uuid>,
    #[serde(default)]
    pub name: Option<String>,
    /// SPDX license identifier.
    #[serde(default)]
    pub license_id: Option<String>,
    #[serde(default, rename = "isOsiApproved")]
    pub osi_approved: Option<bool>,
    #[serde(default, rename = "isFsfLibre")]
    pub fsf_libre: Option<bool>,
    #[serde(default, rename = "isDeprecatedLicenseId")]
    pub deprecated_license_id: Option<bool>,
}

/// A link from a component to an external resource.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalReference {
    /// Reference type (e.g. "vcs", "website", "issue-tracker").
    #[serde(default, rename = "type")]
    pub reference_type: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

/// The project a component belongs to.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectRef {
    #[serde(default)]
    pub uuid: Option<Uuid>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

/// Repository metadata for a component.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryMeta {
    /// Repository type (e.g. "MAVEN", "NPM").
    #[serde(default)]
    pub repository_type: Option<String>,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub latest_version: Option<String>,
    /// When the latest version was published.
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub published: Option<DateTime<Utc>>,
    /// When the repository was last checked.
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub last_check: Option<DateTime<Utc>>,
}

// -----------------------------------------------------------------------------
// Query options
// -----------------------------------------------------------------------------

/// Filters for listing a project's components.
///
/// Flags are only sent when set: an explicit `onlyDirect=false` is not the
/// same request as leaving it out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentFilterOptions {
    /// Only components with a newer version available.
    #[serde(skip_serializing_if = "is_false")]
    pub only_outdated: bool,
    /// Only direct dependencies of the project.
    #[serde(skip_serializing_if = "is_false")]
    pub only_direct: bool,
}

impl RequestOption for ComponentFilterOptions {
    fn apply(&self, request: &mut Request) -> Result<()> {
        if self.only_direct {
            request.set_query("onlyDirect", "true");
        }
        if self.only_outdated {
            request.set_query("onlyOutdated", "true");
        }
        Ok(())
    }
}

/// Identity attributes to look a component up by.
///
/// Unset and empty attributes are never sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentIdentityQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Package URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purl: Option<String>,
    /// Common Platform Enumeration identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpe: Option<String>,
    /// SWID tag identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swid_tag_id: Option<String>,
    /// Restrict the lookup to one project.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<Uuid>,
}

impl RequestOption for ComponentIdentityQuery {
    fn apply(&self, request: &mut Request) -> Result<()> {
        let fields = [
            ("group", &self.group),
            ("name", &self.name),
            ("version", &self.version),
            ("purl", &self.purl),
            ("cpe", &self.cpe),
            ("swidTagId", &self.swid_tag_id),
        ];
        for (key, value) in fields {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                request.set_query(key, value);
            }
        }
        if let Some(project) = self.project.filter(|p| !p.is_nil()) {
            request.set_query("project", project.to_string());
        }
        Ok(())
    }
}

/// Query for listing a project's components.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentListQuery {
    /// The owning project.
    pub project: Uuid,
    pub filter: ComponentFilterOptions,
    pub sort: SortOptions,
}

impl ComponentListQuery {
    /// All components of a project, unfiltered and unsorted.
    pub fn for_project(project: Uuid) -> Self {
        Self {
            project,
            ..Default::default()
        }
    }
}

// -----------------------------------------------------------------------------
// Component operations
// -----------------------------------------------------------------------------

#[async_trait]
impl Get for Component {
    type Id = Uuid;

    #[tracing::instrument(skip(client))]
    async fn get(client: &DtrackClient, uuid: Uuid) -> Result<Self> {
        client.assert_version_at_least(COMPONENT_API).await?;

        let path = format!("api/v1/component/{uuid}");
        let request = client.request(Method::GET, &path, &[])?;
        let (component, _) = client.execute(request).await?;
        Ok(component)
    }
}

#[async_trait]
impl List for Component {
    type Query = ComponentListQuery;

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &DtrackClient,
        query: &Self::Query,
        page: PageOptions,
    ) -> Result<Page<Self>> {
        client.assert_version_at_least(PROJECT_LISTING).await?;

        let path = format!("api/v1/component/project/{}", query.project);
        let request = client.request(
            Method::GET,
            &path,
            &[&page, &query.sort, &query.filter],
        )?;
        client.execute_page(request).await
    }
}

#[async_trait]
impl Create for Component {
    type Parent = Uuid;

    #[tracing::instrument(skip(client, component), fields(name = %component.name))]
    async fn create(client: &DtrackClient, project: Uuid, component: Self) -> Result<Self> {
        client.assert_version_at_least(COMPONENT_API).await?;

        let path = format!("api/v1/component/project/{project}");
        let request = client.request(Method::PUT, &path, &[&with_body(&component)])?;
        let (created, _) = client.execute(request).await?;
        Ok(created)
    }
}

#[async_trait]
impl Update for Component {
    #[tracing::instrument(skip(client, component), fields(uuid = ?component.uuid))]
    async fn update(client: &DtrackClient, component: Self) -> Result<Self> {
        if component.uuid.is_none() {
            return Err(DtrackError::InvalidRequest(
                "component update requires a uuid".to_string(),
            ));
        }
        client.assert_version_at_least(COMPONENT_API).await?;

        let request = client.request(Method::POST, "api/v1/component", &[&with_body(&component)])?;
        let (updated, _) = client.execute(request).await?;
        Ok(updated)
    }
}

#[async_trait]
impl Delete for Component {
    type Id = Uuid;

    #[tracing::instrument(skip(client))]
    async fn delete(client: &DtrackClient, uuid: Uuid) -> Result<()> {
        client.assert_version_at_least(COMPONENT_API).await?;

        let path = format!("api/v1/component/{uuid}");
        let request = client.request(Method::DELETE, &path, &[])?;
        client.execute_discard(request).await?;
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Component properties
// -----------------------------------------------------------------------------

/// Value type of a component property.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyType {
    Boolean,
    Integer,
    Number,
    #[default]
    String,
    #[serde(rename = "ENCRYPTEDSTRING")]
    EncryptedString,
    Timestamp,
    Url,
    Uuid,
}

/// A named, typed property attached to a component.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentProperty {
    /// Server-assigned identifier.
    #[serde(default)]
    pub uuid: Option<Uuid>,
    #[serde(default, rename = "groupName")]
    pub group: Option<String>,
    #[serde(default, rename = "propertyName")]
    pub name: Option<String>,
    #[serde(default, rename = "propertyValue")]
    pub value: Option<String>,
    #[serde(default, rename = "propertyType")]
    pub property_type: PropertyType,
    #[serde(default)]
    pub description: Option<String>,
}

impl ComponentProperty {
    /// All properties of a component.
    #[tracing::instrument(skip(client))]
    pub async fn list(client: &DtrackClient, component: Uuid) -> Result<Vec<Self>> {
        client.assert_version_at_least(COMPONENT_PROPERTIES).await?;

        let path = format!("api/v1/component/{component}/property");
        let request = client.request(Method::GET, &path, &[])?;
        let (properties, _) = client.execute(request).await?;
        Ok(properties)
    }
}

#[async_trait]
impl Create for ComponentProperty {
    type Parent = Uuid;

    #[tracing::instrument(skip(client, property))]
    async fn create(client: &DtrackClient, component: Uuid, property: Self) -> Result<Self> {
        client.assert_version_at_least(COMPONENT_PROPERTIES).await?;

        let path = format!("api/v1/component/{component}/property");
        let request = client.request(Method::PUT, &path, &[&with_body(&property)])?;
        let (created, _) = client.execute(request).await?;
        Ok(created)
    }
}

#[async_trait]
impl Delete for ComponentProperty {
    /// `(component, property)`
    type Id = (Uuid, Uuid);

    #[tracing::instrument(skip(client))]
    async fn delete(client: &DtrackClient, id: (Uuid, Uuid)) -> Result<()> {
        client.assert_version_at_least(COMPONENT_PROPERTIES).await?;

        let (component, property) = id;
        let path = format!("api/v1/component/{component}/property/{property}");
        let request = client.request(Method::DELETE, &path, &[])?;
        client.execute_discard(request).await?;
        Ok(())
    }
}

// Convenience functions for working with components

/// Fetch all components of a project.
///
/// # Example
///
/// ```ignore
/// use dtrack::{get_components, ComponentFilterOptions, DtrackClient};
///
/// let client = DtrackClient::from_env()?;
/// let direct = get_components(
///     &client,
///     project_uuid,
///     ComponentFilterOptions { only_direct: true, ..Default::default() },
/// ).await?;
/// ```
pub async fn get_components(
    client: &DtrackClient,
    project: Uuid,
    filter: ComponentFilterOptions,
) -> Result<Vec<Component>> {
    let query = ComponentListQuery {
        project,
        filter,
        ..Default::default()
    };
    Component::list_all(client, &query).await
}

/// Fetch every component matching a hash, across all pages.
pub async fn get_components_by_hash(client: &DtrackClient, hash: &str) -> Result<Vec<Component>> {
    let sort = SortOptions::default();
    fetch_all(|page| Component::get_by_hash(client, hash, page, &sort)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn build(options: &[&dyn RequestOption]) -> Request {
        let base = Url::parse("https://dtrack.example.com/").unwrap();
        Request::build(&base, Method::GET, "api/v1/component/identity", options).unwrap()
    }

    // -------------------------------------------------------------------------
    // Query option tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_filter_omits_false_flags() {
        let filter = ComponentFilterOptions {
            only_direct: true,
            only_outdated: false,
        };
        let req = build(&[&filter]);

        assert_eq!(req.query_string(), "onlyDirect=true");
        assert!(req.query_param("onlyOutdated").is_none());
    }

    #[test]
    fn test_default_filter_sends_nothing() {
        let req = build(&[&ComponentFilterOptions::default()]);
        assert!(req.query().is_empty());

        let serialized = serde_qs::to_string(&ComponentFilterOptions::default()).unwrap();
        assert!(serialized.is_empty());
    }

    #[test]
    fn test_identity_with_name_only() {
        let identity = ComponentIdentityQuery {
            name: Some("foo".to_string()),
            ..Default::default()
        };
        let req = build(&[&identity]);
        assert_eq!(req.query_string(), "name=foo");

        let serialized = serde_qs::to_string(&identity).unwrap();
        assert_eq!(serialized, "name=foo");
    }

    #[test]
    fn test_identity_skips_empty_values() {
        let identity = ComponentIdentityQuery {
            group: Some(String::new()),
            name: Some("lodash".to_string()),
            purl: Some("pkg:npm/lodash@4.17.21".to_string()),
            project: Some(Uuid::nil()),
            ..Default::default()
        };
        let req = build(&[&identity]);

        assert_eq!(req.query().len(), 2);
        assert_eq!(req.query_param("name"), Some("lodash"));
        assert_eq!(req.query_param("purl"), Some("pkg:npm/lodash@4.17.21"));
        assert!(req.query_param("group").is_none());
        assert!(req.query_param("project").is_none());
    }

    #[test]
    fn test_identity_all_fields() {
        let project = Uuid::new_v4();
        let identity = ComponentIdentityQuery {
            group: Some("org.acme".to_string()),
            name: Some("acme-lib".to_string()),
            version: Some("1.0.0".to_string()),
            purl: Some("pkg:maven/org.acme/acme-lib@1.0.0".to_string()),
            cpe: Some("cpe:2.3:a:acme:acme-lib:1.0.0:*:*:*:*:*:*:*".to_string()),
            swid_tag_id: Some("swidgen-acme-lib".to_string()),
            project: Some(project),
        };
        let req = build(&[&identity]);

        assert_eq!(req.query().len(), 7);
        assert_eq!(req.query_param("swidTagId"), Some("swidgen-acme-lib"));
        assert_eq!(req.query_param("project"), Some(project.to_string().as_str()));
    }

    #[test]
    fn test_later_options_overwrite_earlier_keys() {
        let a = ComponentIdentityQuery {
            name: Some("first".to_string()),
            ..Default::default()
        };
        let b = ComponentIdentityQuery {
            name: Some("second".to_string()),
            ..Default::default()
        };
        let req = build(&[&a, &b]);
        assert_eq!(req.query_param("name"), Some("second"));
    }

    // -------------------------------------------------------------------------
    // Model tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_component_deserialize() {
        let json = r#"{
            "uuid": "1f0e7c4c-1b1a-4d7e-9f3b-5a3c2e9d8b71",
            "group": "org.apache.logging.log4j",
            "name": "log4j-core",
            "version": "2.14.1",
            "purl": "pkg:maven/org.apache.logging.log4j/log4j-core@2.14.1",
            "sha1": "9141212b8507ab50a45525b545b39d224614528b",
            "sha3_256": "aa11",
            "isInternal": false,
            "resolvedLicense": {"licenseId": "Apache-2.0", "name": "Apache License 2.0", "isOsiApproved": true},
            "externalReferences": [{"type": "vcs", "url": "https://github.com/apache/logging-log4j2"}],
            "project": {"uuid": "0c9b2a8e-93a5-4c3f-8f39-2c7b0f9c1a10", "name": "webapp", "version": "1.0"},
            "repositoryMeta": {"repositoryType": "MAVEN", "latestVersion": "2.23.1", "lastCheck": 1718971200000}
        }"#;

        let component: Component = serde_json::from_str(json).expect("Failed to deserialize");

        assert_eq!(component.name, "log4j-core");
        assert_eq!(component.coordinates(), "org.apache.logging.log4j/log4j-core@2.14.1");
        assert_eq!(component.sha3_256.as_deref(), Some("aa11"));
        assert_eq!(
            component.resolved_license.as_ref().unwrap().license_id.as_deref(),
            Some("Apache-2.0")
        );
        assert_eq!(component.external_references.len(), 1);
        assert_eq!(component.project.as_ref().unwrap().name.as_deref(), Some("webapp"));
        assert!(component.repository_meta.as_ref().unwrap().last_check.is_some());
        assert!(component.is_outdated());
        assert_eq!(
            component.hashes(),
            vec![
                ("SHA-1", "9141212b8507ab50a45525b545b39d224614528b"),
                ("SHA3-256", "aa11"),
            ]
        );
    }

    #[test]
    fn test_component_deserialize_minimal() {
        let component: Component = serde_json::from_str(r#"{"name": "left-pad"}"#).unwrap();
        assert!(component.uuid.is_none());
        assert_eq!(component.version, "");
        assert!(!component.internal);
        assert!(component.hashes().is_empty());
        assert!(!component.is_outdated());
    }

    #[test]
    fn test_new_component_serializes_sparse() {
        let component = Component::new("acme-lib", "1.2.0");
        let json = serde_json::to_value(&component).unwrap();

        assert_eq!(json, serde_json::json!({"name": "acme-lib", "version": "1.2.0"}));
    }

    #[test]
    fn test_property_serialize() {
        let property = ComponentProperty {
            group: Some("internal".to_string()),
            name: Some("owner".to_string()),
            value: Some("platform-team".to_string()),
            property_type: PropertyType::String,
            ..Default::default()
        };
        let json = serde_json::to_value(&property).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "groupName": "internal",
                "propertyName": "owner",
                "propertyValue": "platform-team",
                "propertyType": "STRING"
            })
        );
    }

    #[test]
    fn test_property_type_encrypted() {
        let property: ComponentProperty = serde_json::from_str(
            r#"{"propertyName": "token", "propertyType": "ENCRYPTEDSTRING"}"#,
        )
        .unwrap();
        assert_eq!(property.property_type, PropertyType::EncryptedString);
    }
}
