use std::path::Path;

use rayon::prelude::*;

use super::{AssembledProject, Collector, NormalizedBatch, ProjectAccumulator};
use crate::config::AssemblerConfig;
use crate::diagnostics::{Outcome, Warning};

/// Runs a set of collectors over one path and assembles the project.
///
/// Collectors and their normalization run in parallel. Results are folded
/// in collector order, so the output does not depend on scheduling.
pub struct ProjectScan<'a> {
    config: &'a AssemblerConfig,
    collectors: Vec<Box<dyn Collector>>,
}

impl<'a> ProjectScan<'a> {
    #[must_use]
    pub fn new(config: &'a AssemblerConfig) -> Self {
        Self {
            config,
            collectors: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_collector(mut self, collector: impl Collector + 'static) -> Self {
        self.collectors.push(Box::new(collector));
        self
    }

    /// Names of the registered collectors, in fold order.
    pub fn collector_names(&self) -> impl Iterator<Item = &str> {
        self.collectors.iter().map(|c| c.name())
    }

    pub fn run(&self, path: &Path) -> Outcome<AssembledProject> {
        tracing::info!(path = %path.display(), collectors = self.collectors.len(), "scanning project");

        let batches: Vec<Result<Option<NormalizedBatch>, Warning>> = self
            .collectors
            .par_iter()
            .map(|collector| match collector.collect(path) {
                Ok(Some(output)) => Ok(Some(NormalizedBatch::from_output(self.config, output))),
                Ok(None) => {
                    tracing::debug!(collector = collector.name(), "nothing to collect");
                    Ok(None)
                }
                Err(e) => {
                    tracing::warn!(collector = collector.name(), error = %e, "collector failed");
                    Err(Warning::CollectorFailed {
                        collector: collector.name().to_string(),
                        message: e.to_string(),
                    })
                }
            })
            .collect();

        let mut accumulator = ProjectAccumulator::new(self.config);
        let mut failures = Vec::new();
        for batch in batches {
            match batch {
                Ok(Some(batch)) => accumulator.absorb(batch),
                Ok(None) => {}
                Err(warning) => failures.push(warning),
            }
        }

        let mut outcome = accumulator.finish();
        outcome.warnings.extend(failures);
        outcome
    }
}

impl std::fmt::Debug for ProjectScan<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectScan")
            .field("config", self.config)
            .field("collectors", &self.collector_names().collect::<Vec<_>>())
            .finish()
    }
}
