//! Recoverable diagnostics.
//!
//! Normalization tolerates malformed evidence: instead of failing, each
//! stage records a [`Warning`] and keeps going. Stages hand their warnings
//! back inside an [`Outcome`] so callers decide how loud to be.

use serde::Serialize;
use thiserror::Error;

/// A data-quality problem that did not stop processing.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
#[non_exhaustive]
pub enum Warning {
    /// A package URL could not be parsed; purl-based classification was skipped.
    #[error("malformed package URL '{purl}': {reason}")]
    MalformedPurl { purl: String, reason: String },

    /// A descriptor had no usable name and was dropped with its subtree.
    #[error("descriptor without a name skipped ({context})")]
    MissingName { context: String },

    /// Digest content was neither hex nor round-trippable base64.
    #[error("{alg} digest kept verbatim: content is neither hex nor base64")]
    OpaqueHashContent { alg: String, content: String },

    /// Dependencies were merged without a parent reference.
    #[error("dependencies merged without a parent component")]
    MissingParent,

    /// A collector failed; its evidence is missing from the result.
    #[error("collector '{collector}' failed: {message}")]
    CollectorFailed { collector: String, message: String },
}

impl Warning {
    /// Short machine-friendly name of the warning kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MalformedPurl { .. } => "malformed-purl",
            Self::MissingName { .. } => "missing-name",
            Self::OpaqueHashContent { .. } => "opaque-hash-content",
            Self::MissingParent => "missing-parent",
            Self::CollectorFailed { .. } => "collector-failed",
        }
    }
}

/// A value together with the warnings raised while producing it.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct Outcome<T> {
    pub value: T,
    pub warnings: Vec<Warning>,
}

impl<T> Outcome<T> {
    pub const fn new(value: T, warnings: Vec<Warning>) -> Self {
        Self { value, warnings }
    }

    /// An outcome with no warnings.
    pub const fn clean(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        Outcome {
            value: f(self.value),
            warnings: self.warnings,
        }
    }

    /// Split into the value and its warnings.
    pub fn into_parts(self) -> (T, Vec<Warning>) {
        (self.value, self.warnings)
    }

    /// Move this outcome's warnings into `sink` and return the value.
    pub fn drain_into(self, sink: &mut Vec<Warning>) -> T {
        sink.extend(self.warnings);
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_kinds_are_distinct() {
        let warnings = [
            Warning::MalformedPurl {
                purl: "pkg:".into(),
                reason: "empty".into(),
            },
            Warning::MissingName {
                context: "npm".into(),
            },
            Warning::OpaqueHashContent {
                alg: "SHA-1".into(),
                content: "??".into(),
            },
            Warning::MissingParent,
            Warning::CollectorFailed {
                collector: "pip".into(),
                message: "boom".into(),
            },
        ];
        let mut kinds: Vec<_> = warnings.iter().map(Warning::kind).collect();
        kinds.sort_unstable();
        kinds.dedup();
        assert_eq!(kinds.len(), warnings.len());
    }

    #[test]
    fn test_warning_serializes_with_kind_tag() {
        let json = serde_json::to_value(Warning::MissingParent).expect("serialize");
        assert_eq!(json["kind"], "missing-parent");
    }

    #[test]
    fn test_outcome_drain_into() {
        let mut sink = vec![Warning::MissingParent];
        let outcome = Outcome::new(
            7,
            vec![Warning::MissingName {
                context: "x".into(),
            }],
        );
        assert!(outcome.has_warnings());
        let value = outcome.map(|v| v * 2).drain_into(&mut sink);
        assert_eq!(value, 14);
        assert_eq!(sink.len(), 2);
    }
}
