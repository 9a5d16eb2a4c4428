//! Unified error types for sbom-assembler.
//!
//! Fatal failures (configuration, I/O, serialization, collector contract
//! violations) are [`BomError`] values. Data-quality problems found while
//! normalizing are never fatal; they are reported as
//! [`Warning`](crate::diagnostics::Warning)s instead.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for sbom-assembler operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum BomError {
    /// Errors while serializing or deserializing documents
    #[error("Serialization failed: {context}")]
    Serialization {
        context: String,
        #[source]
        source: SerializationErrorKind,
    },

    /// A collector could not produce output for a path
    #[error("Collector '{collector}' failed: {message}")]
    Collector { collector: String, message: String },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific serialization error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SerializationErrorKind {
    #[error("Invalid JSON: {0}")]
    Json(String),

    #[error("Invalid YAML: {0}")]
    Yaml(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for sbom-assembler operations
pub type Result<T> = std::result::Result<T, BomError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl BomError {
    /// Create a serialization error with context
    pub fn serialization(context: impl Into<String>, source: SerializationErrorKind) -> Self {
        Self::Serialization {
            context: context.into(),
            source,
        }
    }

    /// Create a collector failure
    pub fn collector(collector: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Collector {
            collector: collector.into(),
            message: message.into(),
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for BomError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for BomError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization("JSON", SerializationErrorKind::Json(err.to_string()))
    }
}

impl From<serde_yaml::Error> for BomError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::serialization("YAML", SerializationErrorKind::Yaml(err.to_string()))
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings are prepended to whatever context the error already
/// carries, so the final message reads outermost-first.
///
/// # Example
///
/// ```ignore
/// use sbom_assembler::error::ErrorContext;
///
/// fn write_bom(bom: &Bom, path: &Path) -> Result<()> {
///     let json = bom.to_json_string().context("rendering BOM")?;
///     std::fs::write(path, json)
///         .with_context(|| format!("writing {}", path.display()))
/// }
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<BomError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: BomError, new_ctx: &str) -> BomError {
    match err {
        BomError::Serialization {
            context: existing,
            source,
        } => BomError::Serialization {
            context: chain_context(new_ctx, &existing),
            source,
        },
        BomError::Collector { collector, message } => BomError::Collector {
            collector,
            message: chain_context(new_ctx, &message),
        },
        BomError::Io {
            path,
            message,
            source,
        } => BomError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        BomError::Config(msg) => BomError::Config(chain_context(new_ctx, &msg)),
        BomError::Validation(msg) => BomError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// Returns "`new`: `existing`", or just `new` when nothing is there yet.
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to an error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;

    /// Convert None to an error with context from a closure.
    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| BomError::Validation(context.into()))
    }

    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.ok_or_else(|| BomError::Validation(f().into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BomError::collector("npm", "lock file unreadable");
        let display = err.to_string();
        assert!(display.contains("npm"), "{display}");
        assert!(display.contains("lock file unreadable"), "{display}");

        let err = BomError::config("specVersion 2.0 is not supported");
        assert!(err.to_string().starts_with("Invalid configuration"));
    }

    #[test]
    fn test_io_error_carries_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = BomError::io("/path/to/.sbom-assembler.yaml", io_err);

        assert!(err.to_string().contains("/path/to/.sbom-assembler.yaml"));
    }

    #[test]
    fn test_context_chaining() {
        let initial: Result<()> = Err(BomError::serialization(
            "initial context",
            SerializationErrorKind::Json("eof".to_string()),
        ));

        match initial.context("outer context") {
            Err(BomError::Serialization { context, .. }) => {
                assert_eq!(context, "outer context: initial context");
            }
            other => panic!("Expected Serialization error, got {other:?}"),
        }
    }

    #[test]
    fn test_context_chaining_multiple_levels() {
        fn inner() -> Result<()> {
            Err(BomError::config("base"))
        }

        fn middle() -> Result<()> {
            inner().context("middle")
        }

        fn outer() -> Result<()> {
            middle().with_context(|| "outer".to_string())
        }

        match outer() {
            Err(BomError::Config(msg)) => assert_eq!(msg, "outer: middle: base"),
            other => panic!("Expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn test_serde_json_conversion() {
        let parsed: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: BomError = parsed.expect_err("truncated JSON").into();
        assert!(matches!(
            err,
            BomError::Serialization {
                source: SerializationErrorKind::Json(_),
                ..
            }
        ));
    }

    #[test]
    fn test_option_context() {
        let missing: Option<u8> = None;
        let err = missing.context_none("parent component").expect_err("none");
        assert!(matches!(err, BomError::Validation(ref m) if m == "parent component"));

        let present = Some(3u8).with_context_none(|| "unused");
        assert_eq!(present.ok(), Some(3));
    }
}
