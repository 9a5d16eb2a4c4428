//! Configuration file loading and discovery.
//!
//! Supports YAML and JSON configuration files with automatic discovery.

use super::types::AssemblerConfig;
use crate::error::BomError;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".sbom-assembler.yaml",
    ".sbom-assembler.yml",
    ".sbom-assembler.json",
    "sbom-assembler.yaml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. The project directory being scanned
/// 3. Its git repository root (if any)
/// 4. User config directory (~/.config/sbom-assembler/)
#[must_use]
pub fn discover_config_file(
    explicit_path: Option<&Path>,
    project_dir: Option<&Path>,
) -> Option<PathBuf> {
    if let Some(path) = explicit_path
        && path.exists()
    {
        return Some(path.to_path_buf());
    }

    if let Some(dir) = project_dir {
        if let Some(path) = find_config_in_dir(dir) {
            return Some(path);
        }
        if let Some(git_root) = find_git_root(dir)
            && let Some(path) = find_config_in_dir(&git_root)
        {
            return Some(path);
        }
    }

    dirs::config_dir().and_then(|config_dir| find_config_in_dir(&config_dir.join("sbom-assembler")))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Walk up from `start` to the nearest directory holding `.git`.
fn find_git_root(start: &Path) -> Option<PathBuf> {
    let mut current = start;
    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Yaml(serde_yaml::Error),
    /// JSON parsing error
    Json(serde_json::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Yaml(e) => write!(f, "Failed to parse YAML config file: {e}"),
            Self::Json(e) => write!(f, "Failed to parse JSON config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Yaml(e) => Some(e),
            Self::Json(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigFileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err)
    }
}

impl From<serde_json::Error> for ConfigFileError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<ConfigFileError> for BomError {
    fn from(err: ConfigFileError) -> Self {
        Self::config(err.to_string())
    }
}

/// Load an `AssemblerConfig` from a YAML or JSON file (by extension).
pub fn load_config_file(path: &Path) -> Result<AssemblerConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let config = if is_json {
        serde_json::from_str(&content)?
    } else {
        serde_yaml::from_str(&content)?
    };
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(
    explicit_path: Option<&Path>,
    project_dir: Option<&Path>,
) -> (AssemblerConfig, Option<PathBuf>) {
    discover_config_file(explicit_path, project_dir).map_or_else(
        || (AssemblerConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "loaded configuration");
                (config, Some(path))
            }
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AssemblerConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AssemblerConfig {
    /// Merge another config into this one, with `other` taking precedence
    /// wherever it differs from the defaults.
    pub fn merge(&mut self, other: &Self) {
        let defaults = Self::default();

        if other.spec_version != defaults.spec_version {
            self.spec_version = other.spec_version;
        }

        // Project identity
        if other.project.group.is_some() {
            self.project.group.clone_from(&other.project.group);
        }
        if other.project.name.is_some() {
            self.project.name.clone_from(&other.project.name);
        }
        if other.project.version.is_some() {
            self.project.version.clone_from(&other.project.version);
        }
        if other.project.project_type.is_some() {
            self.project.project_type.clone_from(&other.project.project_type);
        }

        // Metadata
        if !other.metadata.authors.is_empty() {
            self.metadata.authors.clone_from(&other.metadata.authors);
        }
        if other.metadata.lifecycle.is_some() {
            self.metadata.lifecycle = other.metadata.lifecycle;
        }
        if !other.metadata.install_deps {
            self.metadata.install_deps = false;
        }
        if other.metadata.deep {
            self.metadata.deep = true;
        }
        if other.metadata.formulation {
            self.metadata.formulation = true;
        }
        for property in &other.metadata.properties {
            if !self.metadata.properties.contains(property) {
                self.metadata.properties.push(property.clone());
            }
        }

        // Classification
        let classification = &other.classification;
        if classification.container_purl_types != defaults.classification.container_purl_types {
            self.classification
                .container_purl_types
                .clone_from(&classification.container_purl_types);
        }
        if classification.application_purl_types != defaults.classification.application_purl_types {
            self.classification
                .application_purl_types
                .clone_from(&classification.application_purl_types);
        }
        if classification.application_groups != defaults.classification.application_groups {
            self.classification
                .application_groups
                .clone_from(&classification.application_groups);
        }
        if !classification.builtin_frameworks {
            self.classification.builtin_frameworks = false;
        }
        for identifier in &classification.extra_frameworks {
            if !self.classification.extra_frameworks.contains(identifier) {
                self.classification.extra_frameworks.push(identifier.clone());
            }
        }
    }

    /// Load from file and merge caller overrides on top.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        project_dir: Option<&Path>,
        overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path, project_dir);
        config.merge(overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content.
#[must_use]
pub fn generate_example_config() -> String {
    let example = AssemblerConfig::default();
    format!(
        r"# sbom-assembler configuration
# Place this file at .sbom-assembler.yaml in your project root or ~/.config/sbom-assembler/

{}
",
        serde_yaml::to_string(&example).unwrap_or_default()
    )
}

// ============================================================================
// Tests
// ============================================================================
