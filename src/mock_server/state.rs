//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Dependency-Track server.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{Component, ComponentIdentityQuery, ComponentProperty, ProjectRef, ServerVersion};

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug)]
pub struct MockState {
    /// Version string reported by `/api/version`.
    pub version: String,

    /// Components indexed by UUID.
    pub components: HashMap<Uuid, Component>,

    /// Component UUIDs per project, in insertion order.
    pub project_components: HashMap<Uuid, Vec<Uuid>>,

    /// Components that are direct dependencies of their project.
    pub direct_components: HashSet<Uuid>,

    /// Properties indexed by component UUID.
    pub properties: HashMap<Uuid, Vec<ComponentProperty>>,

    /// CycloneDX VEX documents indexed by project UUID.
    pub vex_documents: HashMap<Uuid, String>,

    /// Decoded VEX uploads, in arrival order.
    pub vex_uploads: Vec<Vec<u8>>,

    /// Optional API key. If set, requests must send it as `X-Api-Key`.
    pub required_api_key: Option<String>,

    /// Number of requests served by `/api/version`.
    pub version_requests: usize,

    /// Number of requests served by any other endpoint.
    pub api_requests: usize,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            version: "4.11.4".to_string(),
            components: HashMap::new(),
            project_components: HashMap::new(),
            direct_components: HashSet::new(),
            properties: HashMap::new(),
            vex_documents: HashMap::new(),
            vex_uploads: Vec::new(),
            required_api_key: None,
            version_requests: 0,
            api_requests: 0,
        }
    }
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Set the version the server reports.
    pub fn with_version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    /// Add a component to a project.
    ///
    /// A component without a UUID is assigned one.
    pub fn with_component(mut self, project: Uuid, component: Component) -> Self {
        self.insert_component(project, component);
        self
    }

    /// Add a component to a project as a direct dependency.
    pub fn with_direct_component(mut self, project: Uuid, component: Component) -> Self {
        let uuid = self.insert_component(project, component).uuid;
        if let Some(uuid) = uuid {
            self.direct_components.insert(uuid);
        }
        self
    }

    /// Attach a property to a component.
    pub fn with_property(mut self, component: Uuid, property: ComponentProperty) -> Self {
        self.add_property(component, property);
        self
    }

    /// Set the VEX document exported for a project.
    pub fn with_vex(mut self, project: Uuid, document: &str) -> Self {
        self.vex_documents.insert(project, document.to_string());
        self
    }

    /// Set the required API key.
    pub fn with_required_api_key(mut self, key: &str) -> Self {
        self.required_api_key = Some(key.to_string());
        self
    }

    /// Whether the reported version sends `X-Total-Count`.
    pub fn reports_total_count(&self) -> bool {
        self.version
            .parse::<ServerVersion>()
            .is_ok_and(|v| v >= crate::TOTAL_COUNT_SUPPORT)
    }

    /// Whether the reported version is at least `required`.
    pub fn is_at_least(&self, required: ServerVersion) -> bool {
        self.version
            .parse::<ServerVersion>()
            .is_ok_and(|v| v >= required)
    }

    /// Get a component by UUID.
    pub fn get_component(&self, uuid: &Uuid) -> Option<&Component> {
        self.components.get(uuid)
    }

    /// List a project's components, applying the listing filters.
    pub fn list_project_components(
        &self,
        project: &Uuid,
        only_direct: bool,
        only_outdated: bool,
    ) -> Vec<&Component> {
        self.project_components
            .get(project)
            .into_iter()
            .flatten()
            .filter(|uuid| !only_direct || self.direct_components.contains(*uuid))
            .filter_map(|uuid| self.components.get(uuid))
            .filter(|c| !only_outdated || c.is_outdated())
            .collect()
    }

    /// Find components carrying a hash under any algorithm.
    pub fn find_by_hash(&self, hash: &str) -> Vec<&Component> {
        let mut found: Vec<&Component> = self
            .components
            .values()
            .filter(|c| c.hashes().iter().any(|(_, v)| v.eq_ignore_ascii_case(hash)))
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        found
    }

    /// Find components matching every attribute set on `identity`.
    pub fn find_by_identity(&self, identity: &ComponentIdentityQuery) -> Vec<&Component> {
        fn matches(expected: &Option<String>, actual: Option<&str>) -> bool {
            expected.as_deref().map_or(true, |e| Some(e) == actual)
        }

        let mut found: Vec<&Component> = self
            .components
            .values()
            .filter(|c| matches(&identity.group, c.group.as_deref()))
            .filter(|c| matches(&identity.name, Some(c.name.as_str())))
            .filter(|c| matches(&identity.version, Some(c.version.as_str())))
            .filter(|c| matches(&identity.purl, c.purl.as_deref()))
            .filter(|c| matches(&identity.cpe, c.cpe.as_deref()))
            .filter(|c| matches(&identity.swid_tag_id, c.swid_tag_id.as_deref()))
            .filter(|c| {
                identity.project.map_or(true, |p| {
                    c.project.as_ref().and_then(|r| r.uuid) == Some(p)
                })
            })
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        found
    }

    /// Store a new component under a project and return it.
    pub fn insert_component(&mut self, project: Uuid, mut component: Component) -> &Component {
        let uuid = *component.uuid.get_or_insert_with(Uuid::new_v4);
        component.project.get_or_insert_with(|| ProjectRef {
            uuid: Some(project),
            ..Default::default()
        });

        self.project_components.entry(project).or_default().push(uuid);
        self.components.insert(uuid, component);
        &self.components[&uuid]
    }

    /// Replace a stored component, keeping its project.
    pub fn update_component(&mut self, mut component: Component) -> Option<&Component> {
        let uuid = component.uuid?;
        let existing = self.components.get_mut(&uuid)?;
        if component.project.is_none() {
            component.project = existing.project.take();
        }
        *existing = component;
        Some(&*existing)
    }

    /// Remove a component and everything attached to it.
    pub fn delete_component(&mut self, uuid: &Uuid) -> bool {
        if self.components.remove(uuid).is_none() {
            return false;
        }
        for members in self.project_components.values_mut() {
            members.retain(|m| m != uuid);
        }
        self.direct_components.remove(uuid);
        self.properties.remove(uuid);
        true
    }

    /// Attach a property to a component, assigning it a UUID.
    pub fn add_property(
        &mut self,
        component: Uuid,
        mut property: ComponentProperty,
    ) -> &ComponentProperty {
        property.uuid.get_or_insert_with(Uuid::new_v4);
        let properties = self.properties.entry(component).or_default();
        properties.push(property);
        &properties[properties.len() - 1]
    }

    /// Remove a property from a component.
    pub fn delete_property(&mut self, component: &Uuid, property: &Uuid) -> bool {
        let Some(properties) = self.properties.get_mut(component) else {
            return false;
        };
        let before = properties.len();
        properties.retain(|p| p.uuid.as_ref() != Some(property));
        properties.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RepositoryMeta;

    fn component(name: &str, version: &str) -> Component {
        Component::new(name, version)
    }

    #[test]
    fn test_state_add_and_get_component() {
        let project = Uuid::new_v4();
        let state = MockState::new().with_component(project, component("lodash", "4.17.21"));

        let listed = state.list_project_components(&project, false, false);
        assert_eq!(listed.len(), 1);

        let uuid = listed[0].uuid.unwrap();
        let stored = state.get_component(&uuid).unwrap();
        assert_eq!(stored.name, "lodash");
        assert_eq!(stored.project.as_ref().unwrap().uuid, Some(project));
    }

    #[test]
    fn test_state_list_filters() {
        let project = Uuid::new_v4();
        let mut outdated = component("express", "4.18.0");
        outdated.repository_meta = Some(RepositoryMeta {
            latest_version: Some("4.19.2".to_string()),
            ..Default::default()
        });

        let state = MockState::new()
            .with_direct_component(project, component("lodash", "4.17.21"))
            .with_direct_component(project, outdated)
            .with_component(project, component("accepts", "1.3.8"));

        assert_eq!(state.list_project_components(&project, false, false).len(), 3);
        assert_eq!(state.list_project_components(&project, true, false).len(), 2);
        assert_eq!(state.list_project_components(&project, false, true).len(), 1);
        assert!(state.list_project_components(&Uuid::new_v4(), false, false).is_empty());
    }

    #[test]
    fn test_state_find_by_hash_and_identity() {
        let project = Uuid::new_v4();
        let mut hashed = component("log4j-core", "2.14.1");
        hashed.sha1 = Some("9141212B8507AB50A45525B545B39D224614528B".to_string());
        hashed.group = Some("org.apache.logging.log4j".to_string());

        let state = MockState::new()
            .with_component(project, hashed)
            .with_component(project, component("left-pad", "1.3.0"));

        assert_eq!(
            state
                .find_by_hash("9141212b8507ab50a45525b545b39d224614528b")
                .len(),
            1
        );

        let identity = ComponentIdentityQuery {
            group: Some("org.apache.logging.log4j".to_string()),
            ..Default::default()
        };
        assert_eq!(state.find_by_identity(&identity)[0].name, "log4j-core");

        let scoped = ComponentIdentityQuery {
            name: Some("left-pad".to_string()),
            project: Some(Uuid::new_v4()),
            ..Default::default()
        };
        assert!(state.find_by_identity(&scoped).is_empty());
    }

    #[test]
    fn test_state_delete_component_cascades() {
        let project = Uuid::new_v4();
        let mut state = MockState::new().with_component(project, component("lodash", "4.17.21"));
        let uuid = state.list_project_components(&project, false, false)[0]
            .uuid
            .unwrap();
        state.add_property(uuid, ComponentProperty::default());

        assert!(state.delete_component(&uuid));
        assert!(!state.delete_component(&uuid));
        assert!(state.properties.get(&uuid).is_none());
        assert!(state.list_project_components(&project, false, false).is_empty());
    }

    #[test]
    fn test_state_reports_total_count_by_version() {
        assert!(MockState::new().reports_total_count());
        assert!(!MockState::new().with_version("3.8.0").reports_total_count());
        assert!(MockState::new().with_version("4.0.0").reports_total_count());
    }
}
