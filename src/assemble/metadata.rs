//! The `metadata` block of the output document.

use std::collections::HashSet;

use chrono::{SecondsFormat, Utc};

use super::parent::duplicates_parent;
use crate::config::{AssemblerConfig, SpecVersion, TOOL_NAME, TOOL_VENDOR};
use crate::model::{
    Author, BomMetadata, Component, ComponentType, ExternalRefType, LegacyTool, Lifecycle,
    LifecyclePhase, PurlIdentity, PurlParts, Tools,
};

/// Version recorded for this tool.
const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The tools section in the shape `spec_version` expects.
#[must_use]
pub fn tools_section(spec_version: SpecVersion) -> Tools {
    if !spec_version.at_least_1_5() {
        return Tools::Legacy(vec![LegacyTool {
            vendor: TOOL_VENDOR.to_string(),
            name: TOOL_NAME.to_string(),
            version: TOOL_VERSION.to_string(),
        }]);
    }
    let parts = PurlParts::new("cargo", TOOL_NAME).version(TOOL_VERSION);
    let mut tool = Component::new("", TOOL_NAME, TOOL_VERSION, PurlIdentity::resolve(&parts))
        .with_type(ComponentType::Application);
    tool.author = Some(TOOL_VENDOR.to_string());
    tool.publisher = Some(TOOL_VENDOR.to_string());
    Tools::Components {
        components: vec![tool],
    }
}

/// Configured authors, trimmed; names shorter than two characters are
/// skipped.
#[must_use]
pub fn authors(names: &[String]) -> Vec<Author> {
    names
        .iter()
        .map(|n| n.trim())
        .filter(|n| n.chars().count() >= 2)
        .map(|n| Author { name: n.to_string() })
        .collect()
}

/// Lifecycle phases for the document. Empty before 1.5.
#[must_use]
pub fn lifecycles(config: &AssemblerConfig) -> Vec<Lifecycle> {
    if !config.spec_version.at_least_1_5() {
        return Vec::new();
    }
    if let Some(phase) = config.metadata.lifecycle {
        return vec![Lifecycle { phase }];
    }

    let mut phases = vec![if config.metadata.install_deps {
        LifecyclePhase::Build
    } else {
        LifecyclePhase::PreBuild
    }];
    if config.metadata.deep {
        phases.push(LifecyclePhase::PostBuild);
    }
    if config.project.is_os() {
        phases.push(LifecyclePhase::Operations);
    }
    phases.into_iter().map(|phase| Lifecycle { phase }).collect()
}

/// Strip the collection-time detail that does not belong on the document
/// subject.
fn scrub(component: &mut Component) {
    component.evidence = None;
    component
        .external_references
        .retain(|r| !matches!(r.ref_type, ExternalRefType::Vcs | ExternalRefType::Website));
}

/// Prepare the parent for `metadata.component`.
///
/// Sub-components that repeat the parent (same simple full name, or a
/// synthetic `latest` copy) are removed, the rest are deduplicated by
/// `bom-ref` and scrubbed like the parent.
#[must_use]
pub fn scrub_parent(mut parent: Component) -> Component {
    scrub(&mut parent);

    let parent_name = parent.simple_full_name();
    let mut seen = HashSet::new();
    let subs = std::mem::take(&mut parent.components);
    parent.components = subs
        .into_iter()
        .filter(|sub| sub.simple_full_name() != parent_name && !duplicates_parent(&parent, sub))
        .map(|mut sub| {
            sub.ensure_identity();
            scrub(&mut sub);
            sub
        })
        .filter(|sub| seen.insert(sub.bom_ref.clone()))
        .collect();
    parent
}

/// Assemble the metadata block.
#[must_use]
pub fn build_metadata(config: &AssemblerConfig, parent: Option<Component>) -> BomMetadata {
    BomMetadata {
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        tools: tools_section(config.spec_version),
        authors: authors(&config.metadata.authors),
        lifecycles: lifecycles(config),
        component: parent.map(scrub_parent),
        properties: config.metadata.properties.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ExternalReference;

    #[test]
    fn test_tools_by_version() {
        assert!(matches!(tools_section(SpecVersion::V1_4), Tools::Legacy(_)));
        let Tools::Components { components } = tools_section(SpecVersion::V1_6) else {
            panic!("expected tool components");
        };
        assert_eq!(components[0].name, TOOL_NAME);
        assert!(components[0].purl.starts_with("pkg:cargo/sbom-assembler@"));
    }

    #[test]
    fn test_authors_trimmed_and_filtered() {
        let names = vec!["  Jane Doe ".to_string(), "x".to_string(), " ".to_string()];
        let authors = authors(&names);
        assert_eq!(authors, vec![Author { name: "Jane Doe".into() }]);
    }

    #[test]
    fn test_lifecycles_derived() {
        let config = AssemblerConfig::builder()
            .install_deps(false)
            .deep(true)
            .project_type("os")
            .build();
        let phases: Vec<_> = lifecycles(&config).into_iter().map(|l| l.phase).collect();
        assert_eq!(
            phases,
            vec![
                LifecyclePhase::PreBuild,
                LifecyclePhase::PostBuild,
                LifecyclePhase::Operations
            ]
        );
    }

    #[test]
    fn test_lifecycles_override_and_legacy() {
        let config = AssemblerConfig::builder()
            .lifecycle(LifecyclePhase::Design)
            .deep(true)
            .build();
        assert_eq!(lifecycles(&config), vec![Lifecycle { phase: LifecyclePhase::Design }]);

        let legacy = AssemblerConfig::builder().spec_version(SpecVersion::V1_4).build();
        assert!(lifecycles(&legacy).is_empty());
    }

    #[test]
    fn test_scrub_parent() {
        let mut parent = Component::project("acme", "shop", "1.0");
        parent.evidence = Some(serde_json::json!({"identity": {}}));
        parent.external_references = vec![
            ExternalReference::new(ExternalRefType::Vcs, "https://github.com/acme/shop"),
            ExternalReference::new(ExternalRefType::IssueTracker, "https://github.com/acme/shop/issues"),
        ];
        parent.components = vec![
            Component::project("acme", "shop", "1.0"),
            Component::project("", "shop", "latest"),
            Component::project("", "web", "1.0"),
            Component::project("", "web", "1.0"),
        ];

        let parent = scrub_parent(parent);
        assert!(parent.evidence.is_none());
        assert_eq!(parent.external_references.len(), 1);
        let subs: Vec<_> = parent.components.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(subs, vec!["web"]);
    }

    #[test]
    fn test_build_metadata() {
        let config = AssemblerConfig::builder()
            .author("Jane")
            .metadata_property("cdx:build:env", "ci")
            .build();
        let metadata = build_metadata(&config, Some(Component::project("", "shop", "1")));
        assert!(metadata.timestamp.ends_with('Z'));
        assert_eq!(metadata.authors.len(), 1);
        assert_eq!(metadata.lifecycles, vec![Lifecycle { phase: LifecyclePhase::Build }]);
        assert_eq!(metadata.properties.len(), 1);
        assert_eq!(
            metadata.component.map(|c| c.bom_ref).as_deref(),
            Some("pkg:application/shop@1")
        );
    }
}
