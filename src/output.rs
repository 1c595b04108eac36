//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use crate::{About, Component, ComponentProperty};

/// Trait for human-readable key-value output.
///
/// Implemented by entity types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

impl PrettyPrint for Component {
    fn pretty_print(&self) -> String {
        let header = format!("Component: {}", self.coordinates());
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![header, divider];

        if let Some(uuid) = self.uuid {
            lines.push(format!("UUID:           {}", uuid));
        }

        if let Some(ref purl) = self.purl {
            lines.push(format!("PURL:           {}", purl));
        }

        if let Some(ref cpe) = self.cpe {
            lines.push(format!("CPE:            {}", cpe));
        }

        let license = self
            .resolved_license
            .as_ref()
            .and_then(|l| l.license_id.as_deref().or(l.name.as_deref()))
            .or(self.license.as_deref());
        if let Some(license) = license {
            lines.push(format!("License:        {}", license));
        }

        if let Some(ref project) = self.project {
            if let Some(ref name) = project.name {
                lines.push(format!(
                    "Project:        {} {}",
                    name,
                    project.version.as_deref().unwrap_or_default()
                ));
            }
        }

        if let Some(latest) = self
            .repository_meta
            .as_ref()
            .and_then(|m| m.latest_version.as_deref())
        {
            let marker = if self.is_outdated() { " (outdated)" } else { "" };
            lines.push(format!("Latest:         {}{}", latest, marker));
        }

        for (algorithm, value) in self.hashes() {
            lines.push(format!("{:<16}{}", format!("{}:", algorithm), value));
        }

        if self.internal {
            lines.push("Internal:       yes".to_string());
        }

        lines.join("\n")
    }
}

impl PrettyPrint for ComponentProperty {
    fn pretty_print(&self) -> String {
        let group = self.group.as_deref().unwrap_or("-");
        let name = self.name.as_deref().unwrap_or("-");
        let value = self.value.as_deref().unwrap_or("");
        format!("{}/{} = {} ({:?})", group, name, value, self.property_type)
    }
}

impl PrettyPrint for About {
    fn pretty_print(&self) -> String {
        let application = self.application.as_deref().unwrap_or("Dependency-Track");
        let mut lines = vec![format!("{} {}", application, self.version)];

        if let Some(ref framework) = self.framework {
            if let (Some(name), Some(version)) = (&framework.name, &framework.version) {
                lines.push(format!("Framework:      {} {}", name, version));
            }
        }

        if let Some(ref timestamp) = self.timestamp {
            lines.push(format!("Built:          {}", timestamp));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_pretty_print_format() {
        let component: Component = serde_json::from_value(serde_json::json!({
            "group": "org.acme",
            "name": "acme-lib",
            "version": "1.0.0",
            "purl": "pkg:maven/org.acme/acme-lib@1.0.0",
            "sha256": "abc123",
            "repositoryMeta": {"latestVersion": "1.2.0"}
        }))
        .unwrap();

        let output = component.pretty_print();
        assert!(output.starts_with("Component: org.acme/acme-lib@1.0.0"));
        assert!(output.contains("PURL:"));
        assert!(output.contains("SHA-256:        abc123"));
        assert!(output.contains("1.2.0 (outdated)"));
    }

    #[test]
    fn test_about_pretty_print() {
        let about: About = serde_json::from_value(serde_json::json!({
            "version": "4.11.4",
            "application": "Dependency-Track",
            "framework": {"name": "Alpine", "version": "2.2.5"}
        }))
        .unwrap();

        let output = about.pretty_print();
        assert!(output.starts_with("Dependency-Track 4.11.4"));
        assert!(output.contains("Alpine 2.2.5"));
    }
}
