//! **Component identity and dependency-graph normalization for CycloneDX SBOMs.**
//!
//! `sbom-assembler` takes the raw package evidence that ecosystem collectors
//! gather (nested, sometimes cyclic, often overlapping descriptor trees) and
//! turns it into one consistent CycloneDX document: a deduplicated component
//! list, a merged dependency graph and a parent/child project hierarchy.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: Collector input ([`PackageDescriptor`]), normalized
//!   [`Component`]s keyed by their [`PurlIdentity`], and the output [`Bom`].
//! - **[`normalize`]**: The [`Normalizer`] flattens descriptor forests
//!   iteratively, classifies component types through an ordered rule table
//!   and canonicalizes hashes.
//! - **[`graph`]**: The [`DependencyGraph`] union-merges partial adjacency
//!   lists from several collectors.
//! - **[`assemble`]**: Deduplication, parent selection and the
//!   [`BomAssembler`].
//! - **[`pipeline`]**: Runs [`Collector`]s for one path and folds their
//!   outputs into an [`AssembledProject`].
//! - **[`config`]**: The immutable [`AssemblerConfig`] threaded through every
//!   entry point, with YAML/JSON file discovery.
//!
//! Malformed evidence never aborts a run. Each stage returns an [`Outcome`]
//! carrying the [`Warning`]s it recorded; [`BomError`] is reserved for I/O,
//! configuration and serialization failures.
//!
//! ## Getting Started
//!
//! ```no_run
//! use sbom_assembler::{
//!     AssemblerConfig, BomAssembler, CollectorOutput, DescriptorForest, PackageDescriptor,
//!     ProjectAccumulator,
//! };
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AssemblerConfig::builder().author("Platform Team").build();
//!
//!     let root = PackageDescriptor::new("shop", "1.0.0")
//!         .with_child(PackageDescriptor::new("lodash", "4.17.21"));
//!
//!     let mut project = ProjectAccumulator::new(&config);
//!     project.add(CollectorOutput::new("npm", DescriptorForest::Rooted(root)));
//!
//!     let (assembled, warnings) = project.finish().into_parts();
//!     for warning in &warnings {
//!         eprintln!("warning: {warning}");
//!     }
//!
//!     let bom = assembled.into_bom(&BomAssembler::new(&config), Vec::new());
//!     println!("{}", bom.to_json_string()?);
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Doc completeness: # Errors / # Panics sections are aspirational
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // Config structs legitimately use several bools for toggle flags
    clippy::struct_excessive_bools,
    // Variable names like `old`/`new` are clear in context
    clippy::similar_names
)]

pub mod assemble;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod graph;
pub mod model;
pub mod normalize;
pub mod pipeline;

// Re-export main types for convenience
pub use assemble::{
    BomAssembler, BuildProvenance, TrackedFile, assemble_parent, dedupe_components,
};
pub use config::{
    AssemblerConfig, AssemblerConfigBuilder, ClassificationConfig, MetadataConfig, ProjectConfig,
    SpecVersion,
};
pub use config::{ConfigError, Validatable};
pub use diagnostics::{Outcome, Warning};
pub use error::{BomError, ErrorContext, OptionContext, Result};
pub use graph::{DependencyGraph, merge_dependencies};
pub use model::{
    Bom, Component, ComponentType, DependencyEdge, DescriptorForest, ObservedImports,
    PackageDescriptor, PurlIdentity, PurlParts,
};
pub use normalize::{NormalizedPackages, Normalizer, TypeClassifier, TypeRule, normalize_hashes};
pub use pipeline::{
    AssembledProject, Collector, CollectorOutput, NormalizedBatch, ProjectAccumulator, ProjectScan,
};
