//! Descriptor normalization.
//!
//! [`Normalizer::normalize`] flattens a collector's descriptor forest into a
//! deduplicated component list plus the dependency edges the nesting
//! implies. The walk is an explicit stack, so deep trees cannot overflow,
//! and string back-references (cycle markers) are never descended.
//!
//! A descriptor that resolves to a purl already seen is not emitted again
//! (first wins), but its nested children are still walked: packages that only
//! appear under a repeated subtree are still captured, and every parent that
//! nests a package gets an edge to it.

pub mod classify;
pub mod hashes;
pub mod references;
pub mod scope;

pub use classify::{ClassificationSubject, TypeClassifier, TypeRule};
pub use hashes::{DigestForm, canonicalize_digest, normalize_hashes, parse_integrity};
pub use references::external_references;
pub use scope::resolve_scope;

use indexmap::IndexMap;

use crate::config::AssemblerConfig;
use crate::diagnostics::{Outcome, Warning};
use crate::graph::DependencyGraph;
use crate::model::{
    Component, DependencyEdge, DescriptorForest, ObservedImports, PackageDescriptor,
    PurlIdentity, PurlParts, split_scoped_name,
};

/// Result of normalizing one forest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedPackages {
    /// Emitted components in first-seen order
    pub components: Vec<Component>,
    /// Edges implied by nesting
    pub dependencies: Vec<DependencyEdge>,
    /// The project root of a rooted forest
    pub root: Option<Component>,
}

/// Turns descriptor forests into components.
#[derive(Debug, Clone)]
pub struct Normalizer<'a> {
    config: &'a AssemblerConfig,
    classifier: TypeClassifier,
    observed: Option<&'a ObservedImports>,
}

struct Frame<'d> {
    descriptor: &'d PackageDescriptor,
    parent_ref: Option<String>,
    emit: bool,
}

/// Coordinates and identity of a named descriptor.
struct Resolved {
    group: String,
    name: String,
    version: String,
    identity: PurlIdentity,
}

impl<'a> Normalizer<'a> {
    #[must_use]
    pub fn new(config: &'a AssemblerConfig) -> Self {
        Self {
            config,
            classifier: TypeClassifier::from_config(&config.classification),
            observed: None,
        }
    }

    /// Use `observed` to infer scopes.
    #[must_use]
    pub const fn with_observed_imports(mut self, observed: Option<&'a ObservedImports>) -> Self {
        self.observed = observed;
        self
    }

    /// Flatten `forest`, building purls of type `ecosystem`.
    pub fn normalize(
        &self,
        forest: &DescriptorForest,
        ecosystem: &str,
    ) -> Outcome<NormalizedPackages> {
        let mut warnings = Vec::new();
        let mut components: IndexMap<String, Component> = IndexMap::new();
        let mut graph = DependencyGraph::new();
        let mut root = None;

        let mut stack: Vec<Frame<'_>> = match forest {
            DescriptorForest::Rooted(descriptor) => vec![Frame {
                descriptor,
                parent_ref: None,
                emit: false,
            }],
            DescriptorForest::List(descriptors) => descriptors
                .iter()
                .rev()
                .map(|descriptor| Frame {
                    descriptor,
                    parent_ref: None,
                    emit: true,
                })
                .collect(),
        };

        while let Some(frame) = stack.pop() {
            let descriptor = frame.descriptor;
            if descriptor.extraneous {
                tracing::debug!(name = ?descriptor.name, "skipping extraneous descriptor");
                continue;
            }
            let Some(resolved) = self.resolve(descriptor, ecosystem, &mut warnings) else {
                if !frame.emit {
                    // Nameless project root: its packages are still top-level.
                    stack.extend(descriptor.nested().rev().map(|child| Frame {
                        descriptor: child,
                        parent_ref: None,
                        emit: true,
                    }));
                }
                continue;
            };
            let bom_ref = resolved.identity.bom_ref().to_string();

            match &frame.parent_ref {
                Some(parent) => {
                    graph.add_edge(parent, &bom_ref);
                    graph.add_node(&bom_ref);
                }
                None => graph.add_node(&bom_ref),
            }

            if !frame.emit {
                root = Some(self.build_component(descriptor, resolved, &mut warnings));
            } else if components.contains_key(resolved.identity.purl()) {
                tracing::trace!(purl = resolved.identity.purl(), "duplicate descriptor");
            } else {
                let purl = resolved.identity.purl().to_string();
                let component = self.build_component(descriptor, resolved, &mut warnings);
                components.insert(purl, component);
            }

            for child in descriptor.nested().rev() {
                stack.push(Frame {
                    descriptor: child,
                    parent_ref: Some(bom_ref.clone()),
                    emit: true,
                });
            }
        }

        tracing::debug!(
            ecosystem,
            components = components.len(),
            refs = graph.len(),
            warnings = warnings.len(),
            "normalized descriptor forest"
        );

        Outcome::new(
            NormalizedPackages {
                components: components.into_values().collect(),
                dependencies: graph.into_edges(),
                root,
            },
            warnings,
        )
    }

    fn resolve(
        &self,
        descriptor: &PackageDescriptor,
        ecosystem: &str,
        warnings: &mut Vec<Warning>,
    ) -> Option<Resolved> {
        let full_name = descriptor.name.as_deref().map(str::trim).unwrap_or_default();
        let (scope_group, name) = split_scoped_name(full_name);
        if name.is_empty() {
            let context = descriptor
                .purl
                .clone()
                .or_else(|| descriptor.version.clone().map(|v| format!("version {v}")))
                .unwrap_or_else(|| format!("{ecosystem} descriptor"));
            tracing::debug!(%context, "skipping descriptor without a name");
            warnings.push(Warning::MissingName { context });
            return None;
        }

        let group = descriptor
            .group
            .as_deref()
            .filter(|g| !g.is_empty())
            .or(scope_group)
            .unwrap_or_default()
            .to_string();
        let version = descriptor.version.clone().unwrap_or_default();

        let purl_type = if !ecosystem.is_empty() {
            ecosystem
        } else if descriptor.qualifiers.get("type").map(String::as_str) == Some("jar") {
            "maven"
        } else {
            "generic"
        };

        let identity = match descriptor.purl.as_deref().filter(|p| !p.is_empty()) {
            Some(purl) => PurlIdentity::from_purl(purl),
            None => {
                let mut parts = PurlParts::new(purl_type, name)
                    .version(&version)
                    .qualifiers(&descriptor.qualifiers);
                if !group.is_empty() {
                    parts = parts.namespace(&group);
                }
                parts.subpath = descriptor.subpath.as_deref();
                PurlIdentity::resolve(&parts)
            }
        };

        Some(Resolved {
            group,
            name: name.to_string(),
            version,
            identity,
        })
    }

    fn build_component(
        &self,
        descriptor: &PackageDescriptor,
        resolved: Resolved,
        warnings: &mut Vec<Warning>,
    ) -> Component {
        let Resolved {
            group,
            name,
            version,
            identity,
        } = resolved;

        let subject = ClassificationSubject {
            explicit_type: descriptor.component_type.as_deref(),
            purl: identity.purl(),
            declared_purl: descriptor.purl.as_deref().is_some_and(|p| !p.trim().is_empty()),
            group: &group,
            description: descriptor.description.as_deref(),
            keywords: &descriptor.keywords,
        };
        let component_type = self.classifier.classify(&subject, warnings);
        let scope = resolve_scope(self.observed, &group, &name, descriptor.scope);

        let evidence = descriptor
            .evidence
            .clone()
            .filter(|e| self.config.spec_version.at_least_1_5() && !is_blank(e));

        let mut component = Component::new(group, name, version, identity);
        component.component_type = component_type;
        component.scope = scope;
        component.hashes = normalize_hashes(descriptor, warnings);
        component.licenses = descriptor
            .licenses
            .iter()
            .filter_map(|l| l.to_choice())
            .collect();
        component.evidence = evidence;
        component.properties.clone_from(&descriptor.properties);
        component.external_references = external_references(descriptor);
        component.description.clone_from(&descriptor.description);
        component.author = descriptor.author.as_ref().and_then(|a| a.display_name());
        component.publisher.clone_from(&descriptor.publisher);
        component
    }
}

fn is_blank(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::Object(map) => map.is_empty(),
        serde_json::Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SpecVersion;
    use crate::model::{ComponentType, Scope};

    fn normalize(forest: &DescriptorForest) -> Outcome<NormalizedPackages> {
        let config = AssemblerConfig::default();
        Normalizer::new(&config).normalize(forest, "npm")
    }

    #[test]
    fn test_list_forest_emits_every_package() {
        let forest = DescriptorForest::List(vec![
            PackageDescriptor::new("lodash", "4.17.21"),
            PackageDescriptor::new("@babel/core", "7.24.0"),
        ]);
        let (packages, warnings) = normalize(&forest).into_parts();
        assert!(warnings.is_empty());
        assert!(packages.root.is_none());
        assert_eq!(packages.components.len(), 2);

        let babel = &packages.components[1];
        assert_eq!(babel.group, "@babel");
        assert_eq!(babel.name, "core");
        assert_eq!(babel.purl, "pkg:npm/%40babel/core@7.24.0");
        assert_eq!(babel.bom_ref, "pkg:npm/@babel/core@7.24.0");
        assert_eq!(babel.component_type, ComponentType::Library);
    }

    #[test]
    fn test_rooted_forest_returns_root_and_edges() {
        let root = PackageDescriptor::new("app", "1.0.0")
            .with_child(PackageDescriptor::new("a", "1.0.0"))
            .with_child(PackageDescriptor::new("b", "2.0.0"));
        let (packages, _) = normalize(&DescriptorForest::Rooted(root)).into_parts();

        let root = packages.root.expect("root");
        assert_eq!(root.bom_ref, "pkg:npm/app@1.0.0");
        assert_eq!(packages.components.len(), 2);
        assert_eq!(
            packages.dependencies[0],
            DependencyEdge::new("pkg:npm/app@1.0.0", ["pkg:npm/a@1.0.0", "pkg:npm/b@2.0.0"])
        );
    }

    #[test]
    fn test_duplicate_subtree_still_walked() {
        let first = PackageDescriptor::new("shared", "1.0.0");
        let second = PackageDescriptor::new("shared", "1.0.0")
            .with_child(PackageDescriptor::new("only-here", "3.0.0"));
        let forest = DescriptorForest::List(vec![first, second]);
        let (packages, _) = normalize(&forest).into_parts();

        let names: Vec<_> = packages.components.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["shared", "only-here"]);
        assert_eq!(
            packages.dependencies[0],
            DependencyEdge::new("pkg:npm/shared@1.0.0", ["pkg:npm/only-here@3.0.0"])
        );
    }

    #[test]
    fn test_back_reference_not_descended() {
        let a = PackageDescriptor::new("a", "1.0.0")
            .with_child(PackageDescriptor::new("b", "1.0.0").with_reference("a"));
        let (packages, _) = normalize(&DescriptorForest::List(vec![a])).into_parts();
        assert_eq!(packages.components.len(), 2);
        assert_eq!(
            packages.dependencies,
            vec![
                DependencyEdge::new("pkg:npm/a@1.0.0", ["pkg:npm/b@1.0.0"]),
                DependencyEdge::new("pkg:npm/b@1.0.0", Vec::<String>::new()),
            ]
        );
    }

    #[test]
    fn test_extraneous_and_nameless_skipped_with_subtree() {
        let extraneous = PackageDescriptor {
            extraneous: true,
            ..PackageDescriptor::new("stray", "0.0.1")
        }
        .with_child(PackageDescriptor::new("under-stray", "1.0.0"));
        let nameless = PackageDescriptor {
            version: Some("9.9.9".into()),
            ..PackageDescriptor::default()
        }
        .with_child(PackageDescriptor::new("under-nameless", "1.0.0"));

        let (packages, warnings) =
            normalize(&DescriptorForest::List(vec![extraneous, nameless])).into_parts();
        assert!(packages.components.is_empty());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind(), "missing-name");
    }

    #[test]
    fn test_nameless_root_keeps_packages() {
        let root = PackageDescriptor::default().with_child(PackageDescriptor::new("a", "1.0.0"));
        let (packages, warnings) = normalize(&DescriptorForest::Rooted(root)).into_parts();
        assert!(packages.root.is_none());
        assert_eq!(packages.components.len(), 1);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_supplied_purl_preferred() {
        let descriptor = PackageDescriptor::new("guava", "33.0.0")
            .with_group("com.google.guava")
            .with_purl("pkg:maven/com.google.guava/guava@33.0.0?type=jar");
        let (packages, _) = normalize(&DescriptorForest::List(vec![descriptor])).into_parts();
        assert_eq!(
            packages.components[0].purl,
            "pkg:maven/com.google.guava/guava@33.0.0?type=jar"
        );
    }

    #[test]
    fn test_jar_qualifier_implies_maven() {
        let mut descriptor = PackageDescriptor::new("commons-io", "2.15.1").with_group("commons-io");
        descriptor.qualifiers.insert("type".into(), "jar".into());
        let config = AssemblerConfig::default();
        let (packages, _) = Normalizer::new(&config)
            .normalize(&DescriptorForest::List(vec![descriptor]), "")
            .into_parts();
        assert_eq!(
            packages.components[0].purl,
            "pkg:maven/commons-io/commons-io@2.15.1?type=jar"
        );
    }

    #[test]
    fn test_scope_from_observed_imports() {
        let observed: ObservedImports = ["express".to_string()].into_iter().collect();
        let config = AssemblerConfig::default();
        let forest = DescriptorForest::List(vec![
            PackageDescriptor::new("express", "4.19.2"),
            PackageDescriptor::new("debug", "4.3.4"),
        ]);
        let (packages, _) = Normalizer::new(&config)
            .with_observed_imports(Some(&observed))
            .normalize(&forest, "npm")
            .into_parts();
        assert_eq!(packages.components[0].scope, Some(Scope::Required));
        assert_eq!(packages.components[1].scope, Some(Scope::Optional));
    }

    #[test]
    fn test_evidence_gated_by_spec_version() {
        let descriptor = PackageDescriptor {
            evidence: Some(serde_json::json!({"identity": {"field": "purl"}})),
            ..PackageDescriptor::new("x", "1")
        };
        let forest = DescriptorForest::List(vec![descriptor]);

        let modern = AssemblerConfig::default();
        let (packages, _) = Normalizer::new(&modern).normalize(&forest, "npm").into_parts();
        assert!(packages.components[0].evidence.is_some());

        let legacy = AssemblerConfig::builder().spec_version(SpecVersion::V1_4).build();
        let (packages, _) = Normalizer::new(&legacy).normalize(&forest, "npm").into_parts();
        assert!(packages.components[0].evidence.is_none());
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let mut descriptor = PackageDescriptor::new("n0", "1");
        for i in 1..1_000 {
            descriptor = PackageDescriptor::new(format!("n{i}"), "1").with_child(descriptor);
        }
        let (packages, _) = normalize(&DescriptorForest::List(vec![descriptor])).into_parts();
        assert_eq!(packages.components.len(), 1_000);
    }
}
