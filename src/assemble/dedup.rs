use std::collections::HashSet;

use crate::model::Component;

/// Identity used for deduplication: purl, else `bom-ref`, else name+version.
#[must_use]
pub fn dedup_key(component: &Component) -> String {
    if !component.purl.is_empty() {
        component.purl.clone()
    } else if !component.bom_ref.is_empty() {
        component.bom_ref.clone()
    } else {
        format!("{}{}", component.name, component.version)
    }
}

/// Keep the first component per [`dedup_key`], preserving order.
#[must_use]
pub fn dedupe_components(components: Vec<Component>) -> Vec<Component> {
    let mut seen = HashSet::with_capacity(components.len());
    let before = components.len();
    let kept: Vec<Component> = components
        .into_iter()
        .filter(|c| seen.insert(dedup_key(c)))
        .collect();
    if kept.len() != before {
        tracing::debug!(removed = before - kept.len(), "dropped duplicate components");
    }
    kept
}
