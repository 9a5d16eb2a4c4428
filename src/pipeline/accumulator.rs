use super::CollectorOutput;
use crate::assemble::{BomAssembler, assemble_parent, dedupe_components};
use crate::config::AssemblerConfig;
use crate::diagnostics::{Outcome, Warning};
use crate::graph::DependencyGraph;
use crate::model::{Bom, Component, DependencyEdge};
use crate::normalize::Normalizer;

/// One collector's output after normalization.
#[derive(Debug, Clone, Default)]
pub struct NormalizedBatch {
    pub components: Vec<Component>,
    pub graph: DependencyGraph,
    /// Candidate project root
    pub parent: Option<Component>,
    pub warnings: Vec<Warning>,
}

impl NormalizedBatch {
    /// Normalize `output` and merge its edges.
    ///
    /// The graph is scoped to the collector's parent, else the root of a
    /// rooted forest, else the configured project. With none of them it
    /// stays unscoped until [`ProjectAccumulator::finish`] picks a parent.
    #[must_use]
    pub fn from_output(config: &AssemblerConfig, output: CollectorOutput) -> Self {
        let CollectorOutput {
            ecosystem,
            packages,
            dependencies,
            parent,
            observed_imports,
        } = output;

        let mut warnings = Vec::new();
        let normalized = Normalizer::new(config)
            .with_observed_imports(observed_imports.as_ref())
            .normalize(&packages, &ecosystem)
            .drain_into(&mut warnings);

        let parent = parent
            .filter(|p| !p.is_empty())
            .map(|mut p| {
                p.ensure_identity();
                p
            })
            .or(normalized.root);

        let scope_ref = parent
            .as_ref()
            .map(|p| p.bom_ref.clone())
            .or_else(|| config.project.explicit_parent().map(|p| p.bom_ref));
        let mut graph = match scope_ref {
            Some(parent_ref) => DependencyGraph::scoped_to(&parent_ref),
            None => {
                tracing::debug!(ecosystem = %ecosystem, "collector output has no parent component");
                DependencyGraph::new()
            }
        };
        graph.extend_edges(&normalized.dependencies);
        graph.extend_edges(&dependencies);

        Self {
            components: normalized.components,
            graph,
            parent,
            warnings,
        }
    }
}

/// The finished result for one scanned path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssembledProject {
    pub parent: Option<Component>,
    pub components: Vec<Component>,
    pub dependencies: Vec<DependencyEdge>,
}

impl AssembledProject {
    /// Wrap the project into a document.
    #[must_use]
    pub fn into_bom(self, assembler: &BomAssembler<'_>, services: Vec<serde_json::Value>) -> Bom {
        assembler.assemble(self.parent, self.components, self.dependencies, services)
    }
}

/// Accumulates every collector's evidence for one scanned path.
///
/// Sorting, deduplication and parent selection happen only in
/// [`ProjectAccumulator::finish`], which consumes the accumulator.
#[derive(Debug)]
pub struct ProjectAccumulator<'a> {
    config: &'a AssemblerConfig,
    components: Vec<Component>,
    graph: DependencyGraph,
    candidates: Vec<Component>,
    warnings: Vec<Warning>,
}

impl<'a> ProjectAccumulator<'a> {
    #[must_use]
    pub fn new(config: &'a AssemblerConfig) -> Self {
        Self {
            config,
            components: Vec::new(),
            graph: DependencyGraph::new(),
            candidates: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Normalize and absorb one collector output.
    pub fn add(&mut self, output: CollectorOutput) {
        let batch = NormalizedBatch::from_output(self.config, output);
        self.absorb(batch);
    }

    /// Absorb an already normalized batch.
    pub fn absorb(&mut self, batch: NormalizedBatch) {
        self.components.extend(batch.components);
        self.graph.absorb(batch.graph);
        self.candidates.extend(batch.parent);
        self.warnings.extend(batch.warnings);
    }

    /// Warnings recorded so far.
    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Select the parent, deduplicate components and render the graph.
    ///
    /// When no collector and no configuration yield a parent the graph is
    /// rendered unscoped and a [`Warning::MissingParent`] is recorded.
    pub fn finish(mut self) -> Outcome<AssembledProject> {
        let parent = assemble_parent(self.config.project.explicit_parent(), self.candidates);
        let components = dedupe_components(self.components);

        let dependencies = match &parent {
            Some(parent) => {
                let mut scoped = DependencyGraph::scoped_to(&parent.bom_ref);
                scoped.absorb(self.graph);
                scoped.into_edges()
            }
            None => {
                tracing::warn!("no parent component; dependencies left unscoped");
                self.warnings.push(Warning::MissingParent);
                self.graph.into_edges()
            }
        };

        tracing::debug!(
            components = components.len(),
            dependencies = dependencies.len(),
            parent = parent.as_ref().map(|p| p.bom_ref.as_str()),
            "finished project"
        );

        Outcome::new(
            AssembledProject {
                parent,
                components,
                dependencies,
            },
            self.warnings,
        )
    }
}
