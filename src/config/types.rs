//! Configuration types for sbom-assembler.
//!
//! A single immutable [`AssemblerConfig`] is threaded through every entry
//! point. Nothing in the library reads process environment.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::defaults::{
    APPLICATION_GROUPS, APPLICATION_PURL_TYPES, CONTAINER_PURL_TYPES, owned,
};
use crate::model::{Component, LifecyclePhase, Property};

// ============================================================================
// Top-level configuration
// ============================================================================

/// Everything that shapes how evidence becomes a BOM.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AssemblerConfig {
    /// CycloneDX specification version of the output
    pub spec_version: SpecVersion,
    /// Explicit project identity
    pub project: ProjectConfig,
    /// Document metadata options
    pub metadata: MetadataConfig,
    /// Component type classification rules
    pub classification: ClassificationConfig,
}

impl AssemblerConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> AssemblerConfigBuilder {
        AssemblerConfigBuilder::default()
    }
}

/// Supported CycloneDX specification versions.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum SpecVersion {
    #[serde(rename = "1.4")]
    V1_4,
    #[default]
    #[serde(rename = "1.5")]
    V1_5,
    #[serde(rename = "1.6")]
    V1_6,
}

impl SpecVersion {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V1_4 => "1.4",
            Self::V1_5 => "1.5",
            Self::V1_6 => "1.6",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "1.4" => Some(Self::V1_4),
            "1.5" => Some(Self::V1_5),
            "1.6" => Some(Self::V1_6),
            _ => None,
        }
    }

    /// Evidence, lifecycles, formulation and the tools object arrived in 1.5.
    #[must_use]
    pub fn at_least_1_5(self) -> bool {
        self >= Self::V1_5
    }
}

impl std::fmt::Display for SpecVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Sub-configurations
// ============================================================================

/// Project identity supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ProjectConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Project kind, e.g. `os` for operating-system scans
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
}

impl ProjectConfig {
    /// The configured parent component, when both name and version are set.
    #[must_use]
    pub fn explicit_parent(&self) -> Option<Component> {
        let name = self.name.as_deref().filter(|n| !n.is_empty())?;
        let version = self.version.as_deref().filter(|v| !v.is_empty())?;
        Some(Component::project(
            self.group.as_deref().unwrap_or_default(),
            name,
            version,
        ))
    }

    #[must_use]
    pub fn is_os(&self) -> bool {
        self.project_type.as_deref() == Some("os")
    }
}

/// Document metadata options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MetadataConfig {
    /// Author names; names shorter than two characters are skipped
    pub authors: Vec<String>,
    /// Fixed lifecycle phase, overriding the derived ones
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifecycle: Option<LifecyclePhase>,
    /// Dependencies were installed before collection
    pub install_deps: bool,
    /// Collectors ran in deep mode
    pub deep: bool,
    /// Emit a formulation section when provenance is supplied
    pub formulation: bool,
    /// Extra document-level properties
    pub properties: Vec<Property>,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            authors: Vec::new(),
            lifecycle: None,
            install_deps: true,
            deep: false,
            formulation: false,
            properties: Vec::new(),
        }
    }
}

/// Component type classification rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ClassificationConfig {
    /// Purl types classified as `container`
    pub container_purl_types: Vec<String>,
    /// Purl types classified as `application`
    pub application_purl_types: Vec<String>,
    /// Groups classified as `application`
    pub application_groups: Vec<String>,
    /// Use the built-in framework list
    pub builtin_frameworks: bool,
    /// Additional framework identifiers (purl prefixes or name tokens)
    pub extra_frameworks: Vec<String>,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            container_purl_types: owned(CONTAINER_PURL_TYPES),
            application_purl_types: owned(APPLICATION_PURL_TYPES),
            application_groups: owned(APPLICATION_GROUPS),
            builtin_frameworks: true,
            extra_frameworks: Vec::new(),
        }
    }
}

// ============================================================================
// Builder for AssemblerConfig
// ============================================================================

/// Builder for constructing `AssemblerConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AssemblerConfigBuilder {
    config: AssemblerConfig,
}

impl AssemblerConfigBuilder {
    pub const fn spec_version(mut self, version: SpecVersion) -> Self {
        self.config.spec_version = version;
        self
    }

    /// Name the project; this makes it the explicit parent component.
    pub fn project(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.config.project.name = Some(name.into());
        self.config.project.version = Some(version.into());
        self
    }

    pub fn project_group(mut self, group: impl Into<String>) -> Self {
        self.config.project.group = Some(group.into());
        self
    }

    pub fn project_type(mut self, project_type: impl Into<String>) -> Self {
        self.config.project.project_type = Some(project_type.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.config.metadata.authors.push(author.into());
        self
    }

    pub const fn lifecycle(mut self, phase: LifecyclePhase) -> Self {
        self.config.metadata.lifecycle = Some(phase);
        self
    }

    pub const fn install_deps(mut self, installed: bool) -> Self {
        self.config.metadata.install_deps = installed;
        self
    }

    pub const fn deep(mut self, deep: bool) -> Self {
        self.config.metadata.deep = deep;
        self
    }

    pub const fn formulation(mut self, enabled: bool) -> Self {
        self.config.metadata.formulation = enabled;
        self
    }

    pub fn metadata_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.metadata.properties.push(Property::new(name, value));
        self
    }

    pub fn extra_framework(mut self, identifier: impl Into<String>) -> Self {
        self.config
            .classification
            .extra_frameworks
            .push(identifier.into());
        self
    }

    pub const fn builtin_frameworks(mut self, enabled: bool) -> Self {
        self.config.classification.builtin_frameworks = enabled;
        self
    }

    #[must_use]
    pub fn build(self) -> AssemblerConfig {
        self.config
    }
}
