//! The CycloneDX document produced by the assembler.

use serde::{Deserialize, Serialize};

use super::component::{Component, DependencyEdge};
use super::metadata::{ComponentType, LifecyclePhase, Property};
use crate::error::{ErrorContext, Result};

/// Top-level CycloneDX JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bom {
    pub bom_format: String,
    pub spec_version: String,
    pub serial_number: String,
    pub version: u32,
    pub metadata: BomMetadata,
    pub components: Vec<Component>,
    pub dependencies: Vec<DependencyEdge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formulation: Option<Vec<Formulation>>,
}

impl Bom {
    /// Pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serializing BOM")
    }

    /// Look up a component by `bom-ref`.
    #[must_use]
    pub fn component(&self, bom_ref: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.bom_ref == bom_ref)
    }

    /// The `dependsOn` list of `bom_ref`, if it has an edge.
    #[must_use]
    pub fn depends_on(&self, bom_ref: &str) -> Option<&[String]> {
        self.dependencies
            .iter()
            .find(|e| e.reference == bom_ref)
            .map(|e| e.depends_on.as_slice())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomMetadata {
    pub timestamp: String,
    pub tools: Tools,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<Author>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lifecycles: Vec<Lifecycle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<Component>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Property>,
}

/// Tools section: a legacy array (1.4) or a component list (1.5+).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tools {
    Legacy(Vec<LegacyTool>),
    Components { components: Vec<Component> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyTool {
    pub vendor: String,
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lifecycle {
    pub phase: LifecyclePhase,
}

/// How the BOM subject was built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formulation {
    #[serde(rename = "bom-ref")]
    pub bom_ref: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<FormulationComponent>,
    pub workflows: Vec<Workflow>,
}

/// A tracked file, with its content hash as the version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormulationComponent {
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    #[serde(rename = "bom-ref")]
    pub bom_ref: String,
    pub uid: String,
    pub inputs: Vec<WorkflowInput>,
    pub task_types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<InputSource>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub environment_vars: Vec<Property>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSource {
    #[serde(rename = "ref")]
    pub reference: String,
}
