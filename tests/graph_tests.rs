//! Integration tests for dependency merging.

use sbom_assembler::{Component, DependencyEdge, DependencyGraph, Warning, merge_dependencies};

fn edge(reference: &str, depends_on: &[&str]) -> DependencyEdge {
    DependencyEdge::new(reference, depends_on.iter().copied())
}

fn parent() -> Component {
    Component::project("acme", "shop", "1.0.0")
}

#[test]
fn test_union_of_partial_lists() {
    let parent = parent();
    let existing = vec![edge("pkg:npm/a@1", &["pkg:npm/b@1", "pkg:npm/c@1"])];
    let new = vec![
        edge("pkg:npm/a@1", &["pkg:npm/c@1", "pkg:npm/d@1"]),
        edge("pkg:npm/d@1", &[]),
    ];

    let (merged, warnings) = merge_dependencies(&existing, &new, Some(&parent)).into_parts();
    assert!(warnings.is_empty());
    assert_eq!(
        merged,
        vec![
            edge("pkg:npm/a@1", &["pkg:npm/b@1", "pkg:npm/c@1", "pkg:npm/d@1"]),
            edge("pkg:npm/d@1", &[]),
        ]
    );
}

#[test]
fn test_parent_filtered_case_insensitively() {
    let parent = parent();
    let new = vec![
        edge("pkg:npm/a@1", &["PKG:APPLICATION/ACME/SHOP@1.0.0", "pkg:npm/b@1"]),
        edge(&parent.bom_ref, &["pkg:npm/a@1"]),
    ];
    let merged = merge_dependencies(&[], &new, Some(&parent)).value;
    assert_eq!(merged[0].depends_on, vec!["pkg:npm/b@1"]);
    assert_eq!(merged[1].reference, "pkg:application/acme/shop@1.0.0");
    assert_eq!(merged[1].depends_on, vec!["pkg:npm/a@1"]);
}

#[test]
fn test_self_reference_dropped() {
    let merged = merge_dependencies(&[], &[edge("x", &["x", "y"])], Some(&parent())).value;
    assert_eq!(merged, vec![edge("x", &["y"])]);
}

#[test]
fn test_missing_parent_still_merges() {
    let outcome = merge_dependencies(
        &[edge("x", &["shop"])],
        &[edge("x", &["y"])],
        None,
    );
    assert_eq!(outcome.warnings, vec![Warning::MissingParent]);
    assert_eq!(outcome.value, vec![edge("x", &["shop", "y"])]);
}

#[test]
fn test_depends_on_sorted_on_render_only() {
    let mut graph = DependencyGraph::new();
    graph.add_edge("root", "zeta");
    graph.add_edge("root", "alpha");

    let insertion: Vec<_> = graph.children("root").collect();
    assert_eq!(insertion, vec!["zeta", "alpha"]);
    assert_eq!(graph.to_edges(), vec![edge("root", &["alpha", "zeta"])]);
}

#[test]
fn test_refs_keep_first_seen_order() {
    let mut graph = DependencyGraph::new();
    graph.extend_edges(&[edge("b", &["c"]), edge("a", &[])]);
    graph.extend_edges(&[edge("c", &[]), edge("b", &["a"])]);

    let refs: Vec<_> = graph.to_edges().into_iter().map(|e| e.reference).collect();
    assert_eq!(refs, vec!["b", "a", "c"]);
    assert_eq!(graph.edge_count(), 2);
}

#[test]
fn test_absorb_applies_receiver_scope() {
    let mut unscoped = DependencyGraph::new();
    unscoped.add_edge("a", "shop");
    unscoped.add_edge("a", "b");

    let mut scoped = DependencyGraph::scoped_to("SHOP");
    scoped.absorb(unscoped);
    assert_eq!(scoped.parent_ref(), Some("shop"));
    assert_eq!(scoped.into_edges(), vec![edge("a", &["b"])]);
}
