//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use uuid::Uuid;

use crate::{
    Component, ComponentProperty, License, ProjectRef, PropertyType, RepositoryMeta,
};

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    /// UUID of the project in the default scenario.
    pub const PROJECT: Uuid = Uuid::from_u128(0x0c9b2a8e_93a5_4c3f_8f39_2c7b0f9c1a10);

    /// UUID of the `lodash` component in the default scenario.
    pub const LODASH: Uuid = Uuid::from_u128(0x1f0e7c4c_1b1a_4d7e_9f3b_5a3c2e9d8b71);

    /// SHA-1 of the `lodash` component in the default scenario.
    pub const LODASH_SHA1: &'static str = "c2f0d5a7f0c2d1b3e5a1f4e8b9d2c6a7e3f1b0d4";

    // =========================================================================
    // Component Fixtures
    // =========================================================================

    /// Create a minimal component with required fields only.
    pub fn minimal_component(name: &str, version: &str) -> Component {
        Component::new(name, version)
    }

    /// Create an npm component with a package URL and license.
    pub fn npm_component(name: &str, version: &str, license: &str) -> Component {
        Component {
            purl: Some(format!("pkg:npm/{name}@{version}")),
            classifier: Some("LIBRARY".to_string()),
            resolved_license: Some(License {
                license_id: Some(license.to_string()),
                ..Default::default()
            }),
            ..Self::minimal_component(name, version)
        }
    }

    /// Create a component whose repositories know a newer version.
    pub fn outdated_component(name: &str, version: &str, latest: &str) -> Component {
        Component {
            repository_meta: Some(RepositoryMeta {
                repository_type: Some("NPM".to_string()),
                name: Some(name.to_string()),
                latest_version: Some(latest.to_string()),
                ..Default::default()
            }),
            ..Self::npm_component(name, version, "MIT")
        }
    }

    /// Attach `component` to `project` by reference.
    pub fn in_project(mut component: Component, project: Uuid, name: &str) -> Component {
        component.project = Some(ProjectRef {
            uuid: Some(project),
            name: Some(name.to_string()),
            version: Some("1.0.0".to_string()),
        });
        component
    }

    // =========================================================================
    // Property Fixtures
    // =========================================================================

    /// Create a string property.
    pub fn string_property(group: &str, name: &str, value: &str) -> ComponentProperty {
        ComponentProperty {
            group: Some(group.to_string()),
            name: Some(name.to_string()),
            value: Some(value.to_string()),
            property_type: PropertyType::String,
            ..Default::default()
        }
    }

    // =========================================================================
    // VEX Fixtures
    // =========================================================================

    /// A minimal CycloneDX VEX document for `project`.
    pub fn vex_document(project: Uuid) -> String {
        serde_json::json!({
            "bomFormat": "CycloneDX",
            "specVersion": "1.5",
            "version": 1,
            "metadata": {"component": {"bom-ref": project.to_string(), "name": "webapp"}},
            "vulnerabilities": []
        })
        .to_string()
    }

    // =========================================================================
    // Scenarios
    // =========================================================================

    /// Create a default scenario with a project, components, and a VEX document.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario::new()
    }
}

/// A complete test scenario with related entities.
pub struct DefaultScenario {
    pub project: Uuid,
    /// `(component, direct)` pairs.
    pub components: Vec<(Component, bool)>,
    pub properties: Vec<(Uuid, ComponentProperty)>,
    pub vex: String,
}

impl DefaultScenario {
    fn new() -> Self {
        let project = Fixtures::PROJECT;

        let mut lodash = Fixtures::npm_component("lodash", "4.17.21", "MIT");
        lodash.uuid = Some(Fixtures::LODASH);
        lodash.sha1 = Some(Fixtures::LODASH_SHA1.to_string());

        let components = vec![
            (Fixtures::in_project(lodash, project, "webapp"), true),
            (
                Fixtures::in_project(
                    Fixtures::outdated_component("express", "4.18.0", "4.19.2"),
                    project,
                    "webapp",
                ),
                true,
            ),
            (
                Fixtures::in_project(
                    Fixtures::npm_component("accepts", "1.3.8", "MIT"),
                    project,
                    "webapp",
                ),
                false,
            ),
        ];

        let properties = vec![(
            Fixtures::LODASH,
            Fixtures::string_property("internal", "owner", "platform-team"),
        )];

        Self {
            project,
            components,
            properties,
            vex: Fixtures::vex_document(project),
        }
    }
}
