//! Component type classification.
//!
//! Types are resolved by an ordered rule table; the first rule that matches
//! decides. Rules that need the purl are skipped when it does not parse.

use crate::config::{ClassificationConfig, KNOWN_FRAMEWORKS};
use crate::diagnostics::Warning;
use crate::model::{ComponentType, ParsedPurl};

/// The facts about a package that classification looks at.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassificationSubject<'a> {
    pub explicit_type: Option<&'a str>,
    pub purl: &'a str,
    /// The collector supplied `purl` rather than it being derived
    pub declared_purl: bool,
    pub group: &'a str,
    pub description: Option<&'a str>,
    pub keywords: &'a [String],
}

/// One row of the classification table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRule {
    /// An explicit type from the fixed enumeration is used verbatim.
    Explicit,
    /// The purl type is one of `purl_types`.
    PurlType {
        purl_types: Vec<String>,
        component_type: ComponentType,
    },
    /// The group is one of `groups`. Only consulted when the collector
    /// declared no purl.
    Group {
        groups: Vec<String>,
        component_type: ComponentType,
    },
    /// The purl starts with, or its namespace/name contains, an identifier.
    KnownFramework { identifiers: Vec<String> },
    /// The description contains, or a keyword equals, `word`.
    Keyword {
        word: String,
        component_type: ComponentType,
    },
}

impl TypeRule {
    fn needs_purl(&self) -> bool {
        matches!(self, Self::PurlType { .. } | Self::KnownFramework { .. })
    }

    fn evaluate(
        &self,
        subject: &ClassificationSubject<'_>,
        parsed: Option<&ParsedPurl>,
    ) -> Option<ComponentType> {
        match self {
            Self::Explicit => subject.explicit_type.and_then(ComponentType::from_name),
            Self::PurlType {
                purl_types,
                component_type,
            } => {
                let parsed = parsed?;
                purl_types
                    .iter()
                    .any(|t| t.eq_ignore_ascii_case(&parsed.ty))
                    .then_some(*component_type)
            }
            Self::Group {
                groups,
                component_type,
            } => (!subject.declared_purl && groups.iter().any(|g| g == subject.group))
                .then_some(*component_type),
            Self::KnownFramework { identifiers } => {
                let parsed = parsed?;
                let purl = subject.purl.to_lowercase();
                let namespace = parsed.namespace.as_deref().unwrap_or_default().to_lowercase();
                let name = parsed.name.to_lowercase();
                identifiers
                    .iter()
                    .any(|id| purl.starts_with(id) || namespace.contains(id) || name.contains(id))
                    .then_some(ComponentType::Framework)
            }
            Self::Keyword {
                word,
                component_type,
            } => {
                let in_description = subject
                    .description
                    .is_some_and(|d| d.to_lowercase().contains(word.as_str()));
                let in_keywords = subject.keywords.iter().any(|k| k.eq_ignore_ascii_case(word));
                (in_description || in_keywords).then_some(*component_type)
            }
        }
    }
}

/// Ordered rule table with a fallback type.
#[derive(Debug, Clone)]
pub struct TypeClassifier {
    rules: Vec<TypeRule>,
    fallback: ComponentType,
}

impl Default for TypeClassifier {
    fn default() -> Self {
        Self::from_config(&ClassificationConfig::default())
    }
}

impl TypeClassifier {
    #[must_use]
    pub fn new(rules: Vec<TypeRule>, fallback: ComponentType) -> Self {
        Self { rules, fallback }
    }

    /// The standard table: explicit type, container purl types, application
    /// purl types, application groups, known frameworks, the `framework`
    /// keyword, then `library`.
    #[must_use]
    pub fn from_config(config: &ClassificationConfig) -> Self {
        let mut identifiers: Vec<String> = Vec::new();
        if config.builtin_frameworks {
            identifiers.extend(KNOWN_FRAMEWORKS.iter().map(|f| (*f).to_string()));
        }
        identifiers.extend(config.extra_frameworks.iter().map(|f| f.trim().to_lowercase()));

        let rules = vec![
            TypeRule::Explicit,
            TypeRule::PurlType {
                purl_types: config.container_purl_types.clone(),
                component_type: ComponentType::Container,
            },
            TypeRule::PurlType {
                purl_types: config.application_purl_types.clone(),
                component_type: ComponentType::Application,
            },
            TypeRule::Group {
                groups: config.application_groups.clone(),
                component_type: ComponentType::Application,
            },
            TypeRule::KnownFramework { identifiers },
            TypeRule::Keyword {
                word: "framework".to_string(),
                component_type: ComponentType::Framework,
            },
        ];
        Self::new(rules, ComponentType::Library)
    }

    #[must_use]
    pub fn rules(&self) -> &[TypeRule] {
        &self.rules
    }

    /// Classify `subject`. A purl that does not parse records a
    /// [`Warning::MalformedPurl`] and disables the purl-based rules.
    pub fn classify(
        &self,
        subject: &ClassificationSubject<'_>,
        warnings: &mut Vec<Warning>,
    ) -> ComponentType {
        let parsed = if self.rules.iter().any(TypeRule::needs_purl) {
            match subject.purl.parse::<ParsedPurl>() {
                Ok(parsed) => Some(parsed),
                Err(reason) => {
                    tracing::debug!(purl = subject.purl, %reason, "purl rules skipped");
                    warnings.push(Warning::MalformedPurl {
                        purl: subject.purl.to_string(),
                        reason,
                    });
                    None
                }
            }
        } else {
            None
        };

        self.rules
            .iter()
            .find_map(|rule| rule.evaluate(subject, parsed.as_ref()))
            .unwrap_or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(subject: ClassificationSubject<'_>) -> (ComponentType, Vec<Warning>) {
        let mut warnings = Vec::new();
        let t = TypeClassifier::default().classify(&subject, &mut warnings);
        (t, warnings)
    }

    fn purl(purl: &str) -> ClassificationSubject<'_> {
        ClassificationSubject {
            purl,
            ..ClassificationSubject::default()
        }
    }

    #[test]
    fn test_explicit_type_wins() {
        let subject = ClassificationSubject {
            explicit_type: Some("firmware"),
            ..purl("pkg:docker/nginx@1.25")
        };
        assert_eq!(classify(subject).0, ComponentType::Firmware);
    }

    #[test]
    fn test_unknown_explicit_type_falls_through() {
        let subject = ClassificationSubject {
            explicit_type: Some("platform"),
            ..purl("pkg:npm/lodash@4.17.21")
        };
        assert_eq!(classify(subject).0, ComponentType::Library);
    }

    #[test]
    fn test_container_and_forge_purl_types() {
        assert_eq!(classify(purl("pkg:oci/app@sha256%3Aabc")).0, ComponentType::Container);
        assert_eq!(classify(purl("pkg:github/actions/checkout@v4")).0, ComponentType::Application);
    }

    #[test]
    fn test_actions_group() {
        let subject = ClassificationSubject {
            group: "actions",
            ..purl("pkg:generic/actions/setup-node@v4")
        };
        assert_eq!(classify(subject).0, ComponentType::Application);

        let declared = ClassificationSubject {
            group: "actions",
            declared_purl: true,
            ..purl("pkg:maven/actions/toolkit@1.0")
        };
        assert_eq!(classify(declared).0, ComponentType::Library);
    }

    #[test]
    fn test_known_frameworks() {
        assert_eq!(
            classify(purl("pkg:maven/org.springframework/spring-core@6.1.0")).0,
            ComponentType::Framework
        );
        assert_eq!(classify(purl("pkg:npm/%40angular/core@17.0.0")).0, ComponentType::Framework);
        assert_eq!(
            classify(purl("pkg:nuget/Microsoft.AspNetCore.App@8.0.0")).0,
            ComponentType::Framework
        );
        assert_eq!(classify(purl("pkg:npm/react-dom@18.2.0")).0, ComponentType::Library);
    }

    #[test]
    fn test_keyword_rules() {
        let keywords = vec!["Framework".to_string()];
        let subject = ClassificationSubject {
            keywords: &keywords,
            ..purl("pkg:npm/koa@2.15.0")
        };
        assert_eq!(classify(subject).0, ComponentType::Framework);

        let subject = ClassificationSubject {
            description: Some("A tiny web framework"),
            ..purl("pkg:npm/polka@0.5.2")
        };
        assert_eq!(classify(subject).0, ComponentType::Framework);
    }

    #[test]
    fn test_malformed_purl_warns_and_continues() {
        let subject = ClassificationSubject {
            description: Some("testing framework"),
            ..purl("definitely not a purl")
        };
        let (t, warnings) = classify(subject);
        assert_eq!(t, ComponentType::Framework);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind(), "malformed-purl");
    }

    #[test]
    fn test_configured_extra_framework() {
        let config = ClassificationConfig {
            builtin_frameworks: false,
            extra_frameworks: vec!["pkg:npm/fastify@".to_string()],
            ..ClassificationConfig::default()
        };
        let classifier = TypeClassifier::from_config(&config);
        let mut warnings = Vec::new();
        assert_eq!(
            classifier.classify(&purl("pkg:npm/fastify@4.0.0"), &mut warnings),
            ComponentType::Framework
        );
        assert_eq!(
            classifier.classify(&purl("pkg:maven/org.springframework/spring-core@6"), &mut warnings),
            ComponentType::Library
        );
        assert_eq!(classifier.rules().len(), 6);
    }
}
