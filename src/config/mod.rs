//! Configuration module for sbom-assembler.
//!
//! This module provides:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - YAML/JSON config file loading and discovery
//! - Override merging
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use sbom_assembler::config::{AssemblerConfig, SpecVersion};
//!
//! // Use defaults
//! let config = AssemblerConfig::default();
//!
//! // Use builder
//! let config = AssemblerConfig::builder()
//!     .spec_version(SpecVersion::V1_6)
//!     .project("shop", "2.0.0")
//!     .deep(true)
//!     .build();
//!
//! // Load from file
//! use sbom_assembler::config::file::load_or_default;
//! let (config, loaded_from) = load_or_default(None, Some(Path::new(".")));
//! ```
//!
//! # Configuration File
//!
//! Place a `.sbom-assembler.yaml` file in your project root or
//! `~/.config/sbom-assembler/`:
//!
//! ```yaml
//! spec_version: "1.5"
//! project:
//!   name: shop
//!   version: 2.0.0
//! metadata:
//!   authors: [Jane Doe]
//!   deep: true
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{
    APPLICATION_GROUPS, APPLICATION_PURL_TYPES, CONTAINER_PURL_TYPES, DEFAULT_SPEC_VERSION,
    KNOWN_FRAMEWORKS, TOOL_NAME, TOOL_VENDOR,
};
pub use types::{
    AssemblerConfig, AssemblerConfigBuilder, ClassificationConfig, MetadataConfig, ProjectConfig,
    SpecVersion,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    ConfigFileError, discover_config_file, generate_example_config, load_config_file,
    load_or_default,
};

/// Generate a JSON Schema for the `AssemblerConfig` configuration format.
///
/// Editors can use it to validate and autocomplete `.sbom-assembler.yaml`.
pub fn generate_json_schema() -> crate::Result<String> {
    let schema = schemars::schema_for!(AssemblerConfig);
    Ok(serde_json::to_string_pretty(&schema)?)
}
