//! Dependency graph accumulation and merging.
//!
//! Collectors each report a partial adjacency list. [`DependencyGraph`]
//! unions them into one `ref -> dependsOn` map:
//!
//! - refs keep first-seen order, children are a set
//! - a node never depends on itself
//! - when scoped to a parent, nothing may depend on the parent
//! - `dependsOn` is sorted only when the graph is rendered
//!
//! Union is idempotent and commutative, so collector order does not change
//! the resulting edge sets.

use indexmap::{IndexMap, IndexSet};

use crate::diagnostics::{Outcome, Warning};
use crate::model::{Component, DependencyEdge};

/// Accumulating adjacency map keyed by `bom-ref`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    adjacency: IndexMap<String, IndexSet<String>>,
    /// Lowercased `bom-ref` of the parent, when scoped
    parent_ref: Option<String>,
}

impl DependencyGraph {
    /// An unscoped graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A graph that drops edges pointing at `parent_ref`.
    #[must_use]
    pub fn scoped_to(parent_ref: &str) -> Self {
        Self {
            adjacency: IndexMap::new(),
            parent_ref: Some(parent_ref.to_lowercase()),
        }
    }

    /// The parent's `bom-ref` this graph filters, lowercased.
    #[must_use]
    pub fn parent_ref(&self) -> Option<&str> {
        self.parent_ref.as_deref()
    }

    /// Register a node with no outgoing edges yet.
    pub fn add_node(&mut self, reference: &str) {
        if !self.adjacency.contains_key(reference) {
            self.adjacency.insert(reference.to_string(), IndexSet::new());
        }
    }

    /// Add `from -> to`. Returns false when the edge was filtered out or
    /// already present.
    pub fn add_edge(&mut self, from: &str, to: &str) -> bool {
        self.add_node(from);
        if from == to || self.is_parent(to) {
            return false;
        }
        self.adjacency
            .get_mut(from)
            .is_some_and(|children| children.insert(to.to_string()))
    }

    /// Union a list of edges into the graph.
    pub fn extend_edges<'a>(&mut self, edges: impl IntoIterator<Item = &'a DependencyEdge>) {
        for edge in edges {
            self.add_node(&edge.reference);
            for child in &edge.depends_on {
                self.add_edge(&edge.reference, child);
            }
        }
    }

    /// Union another graph into this one, applying this graph's filters.
    pub fn absorb(&mut self, other: Self) {
        for (reference, children) in other.adjacency {
            self.add_node(&reference);
            for child in children {
                self.add_edge(&reference, &child);
            }
        }
    }

    #[must_use]
    pub fn contains(&self, reference: &str) -> bool {
        self.adjacency.contains_key(reference)
    }

    /// Children of `reference` in insertion order.
    pub fn children(&self, reference: &str) -> impl Iterator<Item = &str> {
        self.adjacency
            .get(reference)
            .into_iter()
            .flat_map(|children| children.iter().map(String::as_str))
    }

    /// Number of distinct refs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(IndexSet::len).sum()
    }

    /// Render as edges with sorted `dependsOn`.
    #[must_use]
    pub fn to_edges(&self) -> Vec<DependencyEdge> {
        self.adjacency
            .iter()
            .map(|(reference, children)| sorted_edge(reference.clone(), children.iter().cloned()))
            .collect()
    }

    /// Consume into edges with sorted `dependsOn`.
    #[must_use]
    pub fn into_edges(self) -> Vec<DependencyEdge> {
        self.adjacency
            .into_iter()
            .map(|(reference, children)| sorted_edge(reference, children))
            .collect()
    }

    fn is_parent(&self, reference: &str) -> bool {
        self.parent_ref
            .as_deref()
            .is_some_and(|parent| reference.to_lowercase() == parent)
    }
}

fn sorted_edge(reference: String, children: impl IntoIterator<Item = String>) -> DependencyEdge {
    let mut depends_on: Vec<String> = children.into_iter().collect();
    depends_on.sort();
    DependencyEdge {
        reference,
        depends_on,
    }
}

/// Merge two edge lists, scoped to `parent`.
///
/// Without a parent the merge still happens, unscoped, and a
/// [`Warning::MissingParent`] is returned.
pub fn merge_dependencies(
    existing: &[DependencyEdge],
    new: &[DependencyEdge],
    parent: Option<&Component>,
) -> Outcome<Vec<DependencyEdge>> {
    let mut warnings = Vec::new();
    let mut graph = match parent {
        Some(parent) => DependencyGraph::scoped_to(&parent.bom_ref),
        None => {
            tracing::warn!("merging dependencies without a parent component");
            warnings.push(Warning::MissingParent);
            DependencyGraph::new()
        }
    };
    graph.extend_edges(existing);
    graph.extend_edges(new);
    Outcome::new(graph.into_edges(), warnings)
}
