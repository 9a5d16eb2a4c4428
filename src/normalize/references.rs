//! External references derived from descriptor URLs.

use crate::model::{ExternalRefType, ExternalReference, PackageDescriptor};

/// `homepage` (vcs when it points at git, website otherwise), `bugs` and
/// `repository`, in that order.
#[must_use]
pub fn external_references(descriptor: &PackageDescriptor) -> Vec<ExternalReference> {
    let mut references = Vec::new();
    if let Some(url) = descriptor.homepage.as_ref().and_then(|h| h.url()) {
        let ref_type = if url.contains("git") {
            ExternalRefType::Vcs
        } else {
            ExternalRefType::Website
        };
        references.push(ExternalReference::new(ref_type, url));
    }
    if let Some(url) = descriptor.bugs.as_ref().and_then(|b| b.url()) {
        references.push(ExternalReference::new(ExternalRefType::IssueTracker, url));
    }
    if let Some(url) = descriptor.repository.as_ref().and_then(|r| r.url()) {
        references.push(ExternalReference::new(ExternalRefType::Vcs, url));
    }
    references
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UrlField;

    #[test]
    fn test_all_three_sources() {
        let descriptor = PackageDescriptor {
            homepage: Some(UrlField::Text("https://lodash.com/".into())),
            bugs: Some(UrlField::Object {
                url: Some("https://github.com/lodash/lodash/issues".into()),
            }),
            repository: Some(UrlField::Object {
                url: Some("git+https://github.com/lodash/lodash.git".into()),
            }),
            ..PackageDescriptor::default()
        };
        let refs = external_references(&descriptor);
        let types: Vec<_> = refs.iter().map(|r| r.ref_type.clone()).collect();
        assert_eq!(
            types,
            vec![
                ExternalRefType::Website,
                ExternalRefType::IssueTracker,
                ExternalRefType::Vcs
            ]
        );
    }

    #[test]
    fn test_git_homepage_is_vcs() {
        let descriptor = PackageDescriptor {
            homepage: Some(UrlField::Text("https://github.com/acme/tool#readme".into())),
            ..PackageDescriptor::default()
        };
        assert_eq!(external_references(&descriptor)[0].ref_type, ExternalRefType::Vcs);
    }
}
