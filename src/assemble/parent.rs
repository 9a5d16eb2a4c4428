//! Parent component selection.
//!
//! A multi-module or multi-ecosystem scan can produce several candidate
//! project roots. One becomes the parent; the others are folded into its
//! `components`.

use super::dedup::dedupe_components;
use crate::model::Component;

/// True when `sub` is only a synthetic copy of `parent`: same name (or the
/// name with a `:latest` suffix) and version exactly `latest`.
#[must_use]
pub fn duplicates_parent(parent: &Component, sub: &Component) -> bool {
    sub.version == "latest"
        && (sub.name == parent.name || sub.name == format!("{}:latest", parent.name))
}

/// Pick the parent and fold the remaining candidates under it.
///
/// The explicit parent wins; otherwise the first non-empty candidate.
/// Candidates sharing the parent's `bom-ref`, and synthetic `latest` copies
/// of it, are dropped; the rest are deduplicated. When exactly one
/// sub-component remains and it has the parent's name, it replaces the
/// parent, unless the parent is a container.
#[must_use]
pub fn assemble_parent(explicit: Option<Component>, candidates: Vec<Component>) -> Option<Component> {
    let mut candidates: Vec<Component> = candidates
        .into_iter()
        .filter(|c| !c.is_empty())
        .map(|mut c| {
            c.ensure_identity();
            c
        })
        .collect();

    let mut parent = match explicit {
        Some(mut parent) => {
            parent.ensure_identity();
            parent
        }
        None if candidates.is_empty() => return None,
        None => candidates.remove(0),
    };

    let subs: Vec<Component> = candidates
        .into_iter()
        .filter(|c| c.bom_ref != parent.bom_ref && !duplicates_parent(&parent, c))
        .collect();
    let mut subs = dedupe_components(subs);

    if subs.len() == 1 && subs[0].name == parent.name && !parent.is_container() {
        let mut promoted = subs.remove(0);
        tracing::debug!(
            from = %parent.bom_ref,
            to = %promoted.bom_ref,
            "promoting single sub-component to parent"
        );
        promoted.components.clear();
        return Some(promoted);
    }

    for sub in subs {
        if !parent.components.iter().any(|c| c.bom_ref == sub.bom_ref) {
            parent.components.push(sub);
        }
    }
    Some(parent)
}
