//! Configuration validation for sbom-assembler.

use super::types::{AssemblerConfig, ClassificationConfig, MetadataConfig, ProjectConfig};

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AssemblerConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.project.validate());
        errors.extend(self.metadata.validate());
        errors.extend(self.classification.validate());
        errors
    }
}

impl Validatable for ProjectConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let has_name = self.name.as_deref().is_some_and(|n| !n.trim().is_empty());
        let has_version = self.version.as_deref().is_some_and(|v| !v.trim().is_empty());

        if self.name.is_some() && !has_name {
            errors.push(ConfigError::new("project.name", "Project name must not be blank"));
        }
        if has_version && !has_name {
            errors.push(ConfigError::new(
                "project.version",
                "A project version was given without a project name",
            ));
        }
        if self.group.is_some() && !has_name {
            errors.push(ConfigError::new(
                "project.group",
                "A project group was given without a project name",
            ));
        }
        errors
    }
}

impl Validatable for MetadataConfig {
    fn validate(&self) -> Vec<ConfigError> {
        self.authors
            .iter()
            .enumerate()
            .filter(|(_, author)| author.trim().chars().count() < 2)
            .map(|(i, author)| {
                ConfigError::new(
                    format!("metadata.authors[{i}]"),
                    format!("Author '{author}' is shorter than 2 characters and will be skipped"),
                )
            })
            .collect()
    }
}

impl Validatable for ClassificationConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let purl_types = [
            ("classification.container_purl_types", &self.container_purl_types),
            ("classification.application_purl_types", &self.application_purl_types),
        ];
        for (field, types) in purl_types {
            for ty in types {
                if ty.is_empty() || ty.starts_with("pkg:") || ty.contains('/') {
                    errors.push(ConfigError::new(
                        field,
                        format!("'{ty}' is not a bare purl type (expected e.g. 'docker')"),
                    ));
                } else if ty.chars().any(|c| c.is_ascii_uppercase()) {
                    errors.push(ConfigError::new(
                        field,
                        format!("Purl type '{ty}' must be lowercase"),
                    ));
                }
            }
        }
        for identifier in &self.extra_frameworks {
            if identifier.trim().is_empty() {
                errors.push(ConfigError::new(
                    "classification.extra_frameworks",
                    "Framework identifiers must not be blank",
                ));
            }
        }
        errors
    }
}
