//! Scope inference from observed imports.

use crate::model::{ObservedImports, Scope};

/// Decide a component's scope.
///
/// With a non-empty import set, a package is `required` when its name,
/// `group/name`, `@group/name`, `group` or `@group` was imported, and
/// `optional` otherwise. Without imports the collector's hint stands.
#[must_use]
pub fn resolve_scope(
    observed: Option<&ObservedImports>,
    group: &str,
    name: &str,
    hint: Option<Scope>,
) -> Option<Scope> {
    let Some(observed) = observed.filter(|o| !o.is_empty()) else {
        return hint;
    };

    let bare_group = group.trim_start_matches('@');
    let mut candidates = vec![name.to_string()];
    if !bare_group.is_empty() {
        candidates.push(format!("{group}/{name}"));
        candidates.push(format!("@{bare_group}/{name}"));
        candidates.push(group.to_string());
        candidates.push(format!("@{bare_group}"));
    }

    if candidates.iter().any(|c| observed.contains(c)) {
        Some(Scope::Required)
    } else {
        Some(Scope::Optional)
    }
}
