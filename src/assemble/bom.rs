use uuid::Uuid;

use super::formulation::BuildProvenance;
use super::metadata::build_metadata;
use crate::config::AssemblerConfig;
use crate::model::{Bom, Component, DependencyEdge};

/// Wraps assembled components and edges into a CycloneDX document.
#[derive(Debug, Clone, Copy)]
pub struct BomAssembler<'a> {
    config: &'a AssemblerConfig,
    provenance: Option<&'a BuildProvenance>,
}

impl<'a> BomAssembler<'a> {
    #[must_use]
    pub const fn new(config: &'a AssemblerConfig) -> Self {
        Self {
            config,
            provenance: None,
        }
    }

    /// Provenance for the `formulation` section.
    #[must_use]
    pub const fn with_provenance(mut self, provenance: &'a BuildProvenance) -> Self {
        self.provenance = Some(provenance);
        self
    }

    /// Build the document. Components and edges are used as given; callers
    /// deduplicate and sort before this point.
    #[must_use]
    pub fn assemble(
        &self,
        parent: Option<Component>,
        components: Vec<Component>,
        dependencies: Vec<DependencyEdge>,
        services: Vec<serde_json::Value>,
    ) -> Bom {
        let spec_version = self.config.spec_version;
        let formulation = self
            .provenance
            .filter(|_| self.config.metadata.formulation && spec_version.at_least_1_5())
            .map(|provenance| vec![provenance.to_formulation()]);

        tracing::info!(
            spec_version = %spec_version,
            components = components.len(),
            dependencies = dependencies.len(),
            services = services.len(),
            has_parent = parent.is_some(),
            "assembled BOM"
        );

        Bom {
            bom_format: "CycloneDX".to_string(),
            spec_version: spec_version.as_str().to_string(),
            serial_number: format!("urn:uuid:{}", Uuid::new_v4()),
            version: 1,
            metadata: build_metadata(self.config, parent),
            components,
            dependencies,
            services: (!services.is_empty()).then_some(services),
            formulation,
        }
    }
}
