//! Project pipeline: collector outputs in, one assembled project out.
//!
//! Each collector reports evidence for a scanned path. Outputs are
//! normalized independently into a [`NormalizedBatch`], folded into a
//! [`ProjectAccumulator`] in collector order, and finished exactly once:
//!
//! ```text
//! Collector ─┐
//! Collector ─┼─> NormalizedBatch ─> ProjectAccumulator ─finish─> AssembledProject ─> Bom
//! Collector ─┘
//! ```

mod accumulator;
mod scan;

pub use accumulator::{AssembledProject, NormalizedBatch, ProjectAccumulator};
pub use scan::ProjectScan;

use std::path::Path;

use crate::error::Result;
use crate::model::{Component, DependencyEdge, DescriptorForest, ObservedImports};

/// Evidence reported by one collector for one scanned path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectorOutput {
    /// Purl type for packages without an explicit purl, e.g. `npm`
    pub ecosystem: String,
    pub packages: DescriptorForest,
    /// Collector-supplied edges, merged with the edges implied by nesting
    pub dependencies: Vec<DependencyEdge>,
    /// Candidate project root
    pub parent: Option<Component>,
    /// Packages actually imported by the source, for scope inference
    pub observed_imports: Option<ObservedImports>,
}

impl CollectorOutput {
    #[must_use]
    pub fn new(ecosystem: impl Into<String>, packages: DescriptorForest) -> Self {
        Self {
            ecosystem: ecosystem.into(),
            packages,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_parent(mut self, parent: Component) -> Self {
        self.parent = Some(parent);
        self
    }

    #[must_use]
    pub fn with_dependencies(mut self, dependencies: Vec<DependencyEdge>) -> Self {
        self.dependencies = dependencies;
        self
    }

    #[must_use]
    pub fn with_observed_imports(mut self, observed: ObservedImports) -> Self {
        self.observed_imports = Some(observed);
        self
    }
}

/// Gathers evidence for one ecosystem.
///
/// Implementations do their own I/O (manifest parsing, tool invocation).
/// `Ok(None)` means the collector found nothing applicable at `path`.
pub trait Collector: Send + Sync {
    /// Name used in logs and warnings.
    fn name(&self) -> &str;

    fn collect(&self, path: &Path) -> Result<Option<CollectorOutput>>;
}
