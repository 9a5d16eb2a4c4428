//! Build provenance for the `formulation` section.
//!
//! The caller gathers provenance (git state, tracked files, environment);
//! this module only filters and shapes it.

use uuid::Uuid;

use crate::model::{
    ComponentType, Formulation, FormulationComponent, InputSource, Property, Workflow,
    WorkflowInput,
};

/// Environment prefixes worth recording.
const ENV_PREFIXES: [&str; 2] = ["GIT", "CI_"];

/// Name fragments that mark a variable as secret.
const SECRET_MARKERS: [&str; 3] = ["key", "token", "pass"];

/// A file under version control and its content hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedFile {
    pub name: String,
    pub hash: String,
}

/// Caller-supplied build provenance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildProvenance {
    pub branch: Option<String>,
    pub origin_url: Option<String>,
    pub files: Vec<TrackedFile>,
    pub environment: Vec<(String, String)>,
}

impl BuildProvenance {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    #[must_use]
    pub fn with_origin(mut self, url: impl Into<String>) -> Self {
        self.origin_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_file(mut self, name: impl Into<String>, hash: impl Into<String>) -> Self {
        self.files.push(TrackedFile {
            name: name.into(),
            hash: hash.into(),
        });
        self
    }

    /// Record environment variables, e.g. from `std::env::vars()`.
    #[must_use]
    pub fn with_environment<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.environment
            .extend(vars.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// `GIT*` and `CI_*` variables that do not look like secrets, with
    /// `GIT_BRANCH` first.
    #[must_use]
    pub fn recorded_environment(&self) -> Vec<Property> {
        let mut recorded = Vec::new();
        if let Some(branch) = self.branch.as_deref().filter(|b| !b.is_empty()) {
            recorded.push(Property::new("GIT_BRANCH", branch));
        }
        for (name, value) in &self.environment {
            if value.is_empty() || !is_recordable(name) {
                continue;
            }
            if recorded.iter().any(|p| &p.name == name) {
                continue;
            }
            recorded.push(Property::new(name.as_str(), value.as_str()));
        }
        recorded
    }

    /// Shape this provenance as a formulation entry.
    #[must_use]
    pub fn to_formulation(&self) -> Formulation {
        let components = self
            .files
            .iter()
            .map(|f| FormulationComponent {
                component_type: ComponentType::File,
                name: f.name.clone(),
                version: f.hash.clone(),
            })
            .collect();

        let environment_vars = self.recorded_environment();
        let source = self
            .origin_url
            .as_deref()
            .filter(|u| !u.is_empty())
            .map(|u| InputSource {
                reference: u.to_string(),
            });
        let inputs = if source.is_some() || !environment_vars.is_empty() {
            vec![WorkflowInput {
                source,
                environment_vars,
            }]
        } else {
            Vec::new()
        };

        Formulation {
            bom_ref: Uuid::new_v4().to_string(),
            components,
            workflows: vec![Workflow {
                bom_ref: Uuid::new_v4().to_string(),
                uid: Uuid::new_v4().to_string(),
                inputs,
                task_types: vec!["build".to_string(), "clone".to_string()],
            }],
        }
    }
}

fn is_recordable(name: &str) -> bool {
    let lower = name.to_lowercase();
    ENV_PREFIXES.iter().any(|p| name.starts_with(p))
        && !SECRET_MARKERS.iter().any(|m| lower.contains(m))
}
