//! Output formatting tests for CLI display.

use dtrack::output::PrettyPrint;
use dtrack::{Component, ComponentProperty, PropertyType};

#[test]
fn test_component_json_output_omits_unset_fields() {
    let component = Component::new("acme-lib", "1.0.0");
    let json = serde_json::to_string_pretty(&component).unwrap();

    assert!(json.contains("\"name\": \"acme-lib\""));
    assert!(!json.contains("purl"));
    assert!(!json.contains("isInternal"));
}

#[test]
fn test_component_pretty_print_without_group() {
    let component = Component::new("left-pad", "1.3.0");
    let output = component.pretty_print();

    assert!(output.starts_with("Component: left-pad@1.3.0"));
    assert!(!output.contains("Latest:"));
}

#[test]
fn test_internal_component_is_marked() {
    let mut component = Component::new("acme-core", "2.0.0");
    component.internal = true;

    assert!(component.pretty_print().contains("Internal:       yes"));
}

#[test]
fn test_property_pretty_print() {
    let property = ComponentProperty {
        group: Some("internal".to_string()),
        name: Some("owner".to_string()),
        value: Some("platform-team".to_string()),
        property_type: PropertyType::String,
        ..Default::default()
    };

    assert_eq!(
        property.pretty_print(),
        "internal/owner = platform-team (String)"
    );
}
