//! Normalized components and dependency edges.

use serde::{Deserialize, Serialize};

use super::identifiers::{ParsedPurl, PurlIdentity, PurlParts, decode};
use super::license::LicenseChoice;
use super::metadata::{ComponentType, ExternalReference, Hash, Property, Scope};

/// A normalized CycloneDX component.
///
/// `bom_ref` is always `decode(purl)`; constructors and
/// [`Component::ensure_identity`] keep the two in step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hashes: Vec<Hash>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub licenses: Vec<LicenseChoice>,
    #[serde(default)]
    pub purl: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub external_references: Vec<ExternalReference>,
    #[serde(rename = "type", default)]
    pub component_type: ComponentType,
    #[serde(rename = "bom-ref", alias = "bomRef", default)]
    pub bom_ref: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Property>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Component>,
}

impl Component {
    /// Create a component from its coordinates and a resolved identity.
    #[must_use]
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
        identity: PurlIdentity,
    ) -> Self {
        let (purl, bom_ref) = identity.into_parts();
        Self {
            group: group.into(),
            name: name.into(),
            version: version.into(),
            purl,
            bom_ref,
            ..Self::default()
        }
    }

    /// A project root with an `application` purl.
    #[must_use]
    pub fn project(group: &str, name: &str, version: &str) -> Self {
        let mut parts = PurlParts::new("application", name).version(version);
        if !group.is_empty() {
            parts = parts.namespace(group);
        }
        let mut component = Self::new(group, name, version, PurlIdentity::resolve(&parts));
        component.component_type = ComponentType::Application;
        component
    }

    #[must_use]
    pub fn with_type(mut self, component_type: ComponentType) -> Self {
        self.component_type = component_type;
        self
    }

    /// `group/name@version`, with empty parts left out.
    #[must_use]
    pub fn simple_full_name(&self) -> String {
        let mut full = String::new();
        if !self.group.is_empty() {
            full.push_str(&self.group);
            full.push('/');
        }
        full.push_str(&self.name);
        if !self.version.is_empty() {
            full.push('@');
            full.push_str(&self.version);
        }
        full
    }

    /// True for container images, which never absorb a single sub-project.
    #[must_use]
    pub fn is_container(&self) -> bool {
        self.component_type == ComponentType::Container
            || ["pkg:container", "pkg:oci", "pkg:docker"]
                .iter()
                .any(|prefix| self.purl.starts_with(prefix))
    }

    /// True when the component carries nothing usable.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.purl.is_empty() && self.bom_ref.is_empty()
    }

    /// Restore the purl/`bom-ref` pairing on a component that came from
    /// outside the normalizer.
    ///
    /// A present purl wins and the `bom-ref` is re-derived from it. A lone
    /// `bom-ref` is parsed and re-encoded; if it is not a purl it is kept as
    /// the purl verbatim. With neither, a `generic` purl is built from the
    /// coordinates.
    pub fn ensure_identity(&mut self) {
        if !self.purl.is_empty() {
            self.bom_ref = decode(&self.purl);
            return;
        }
        let identity = if self.bom_ref.is_empty() {
            let mut parts = PurlParts::new("generic", &self.name).version(&self.version);
            if !self.group.is_empty() {
                parts = parts.namespace(&self.group);
            }
            PurlIdentity::resolve(&parts)
        } else {
            match self.bom_ref.parse::<ParsedPurl>() {
                Ok(parsed) => parsed.to_identity(),
                Err(_) => PurlIdentity::from_purl(self.bom_ref.clone()),
            }
        };
        let (purl, bom_ref) = identity.into_parts();
        self.purl = purl;
        self.bom_ref = bom_ref;
    }
}

/// One node's outgoing edges in the dependency graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyEdge {
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(default)]
    pub depends_on: Vec<String>,
}

impl DependencyEdge {
    #[must_use]
    pub fn new<I, S>(reference: impl Into<String>, depends_on: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            reference: reference.into(),
            depends_on: depends_on.into_iter().map(Into::into).collect(),
        }
    }
}
