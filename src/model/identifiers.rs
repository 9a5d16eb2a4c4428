//! Canonical package identifiers.
//!
//! Every component is identified by a Package URL (purl). The `bom-ref` used
//! as the dependency-graph key is always the percent-decoded purl, so the two
//! never drift apart:
//!
//! ```text
//! purl:    pkg:npm/%40babel/core@7.24.0
//! bom-ref: pkg:npm/@babel/core@7.24.0
//! ```
//!
//! Construction is pure and total; parsing (for classification) goes through
//! the `packageurl` crate and may fail.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The pieces a purl is built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PurlParts<'a> {
    pub ty: &'a str,
    pub namespace: Option<&'a str>,
    pub name: &'a str,
    pub version: Option<&'a str>,
    pub qualifiers: Option<&'a BTreeMap<String, String>>,
    pub subpath: Option<&'a str>,
}

impl<'a> PurlParts<'a> {
    #[must_use]
    pub const fn new(ty: &'a str, name: &'a str) -> Self {
        Self {
            ty,
            namespace: None,
            name,
            version: None,
            qualifiers: None,
            subpath: None,
        }
    }

    #[must_use]
    pub const fn namespace(mut self, namespace: &'a str) -> Self {
        self.namespace = Some(namespace);
        self
    }

    #[must_use]
    pub const fn version(mut self, version: &'a str) -> Self {
        self.version = Some(version);
        self
    }

    #[must_use]
    pub const fn qualifiers(mut self, qualifiers: &'a BTreeMap<String, String>) -> Self {
        self.qualifiers = Some(qualifiers);
        self
    }

    #[must_use]
    pub const fn subpath(mut self, subpath: &'a str) -> Self {
        self.subpath = Some(subpath);
        self
    }
}

/// A purl together with its decoded `bom-ref`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PurlIdentity {
    purl: String,
    bom_ref: String,
}

impl PurlIdentity {
    /// Build the canonical purl for `parts`.
    #[must_use]
    pub fn resolve(parts: &PurlParts<'_>) -> Self {
        let mut purl = String::from("pkg:");
        purl.push_str(&parts.ty.trim().to_lowercase());
        purl.push('/');

        if let Some(namespace) = parts.namespace {
            let segments: Vec<String> = namespace
                .split('/')
                .filter(|s| !s.is_empty())
                .map(encode_component)
                .collect();
            if !segments.is_empty() {
                purl.push_str(&segments.join("/"));
                purl.push('/');
            }
        }

        purl.push_str(&encode_component(parts.name));

        if let Some(version) = parts.version.filter(|v| !v.is_empty()) {
            purl.push('@');
            purl.push_str(&encode_component(version));
        }

        if let Some(qualifiers) = parts.qualifiers {
            let sorted: BTreeMap<String, String> = qualifiers
                .iter()
                .filter(|(_, v)| !v.is_empty())
                .map(|(k, v)| (k.to_lowercase(), encode_component(v)))
                .collect();
            if !sorted.is_empty() {
                let rendered: Vec<String> =
                    sorted.iter().map(|(k, v)| format!("{k}={v}")).collect();
                purl.push('?');
                purl.push_str(&rendered.join("&"));
            }
        }

        if let Some(subpath) = parts.subpath {
            let segments: Vec<String> = subpath
                .split('/')
                .filter(|s| !matches!(*s, "" | "." | ".."))
                .map(encode_component)
                .collect();
            if !segments.is_empty() {
                purl.push('#');
                purl.push_str(&segments.join("/"));
            }
        }

        Self::from_purl(purl)
    }

    /// Wrap an already-built purl, deriving its `bom-ref`.
    #[must_use]
    pub fn from_purl(purl: impl Into<String>) -> Self {
        let purl = purl.into();
        let bom_ref = decode(&purl);
        Self { purl, bom_ref }
    }

    #[must_use]
    pub fn purl(&self) -> &str {
        &self.purl
    }

    #[must_use]
    pub fn bom_ref(&self) -> &str {
        &self.bom_ref
    }

    /// Consume into `(purl, bom_ref)`.
    #[must_use]
    pub fn into_parts(self) -> (String, String) {
        (self.purl, self.bom_ref)
    }

    /// Parse the purl with the `packageurl` crate.
    pub fn parse(&self) -> Result<ParsedPurl, String> {
        ParsedPurl::from_str(&self.purl)
    }
}

impl fmt::Display for PurlIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.purl)
    }
}

/// The parts of a parsed purl that classification looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPurl {
    pub ty: String,
    pub namespace: Option<String>,
    pub name: String,
    pub version: Option<String>,
    pub qualifiers: BTreeMap<String, String>,
    pub subpath: Option<String>,
}

impl FromStr for ParsedPurl {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = packageurl::PackageUrl::from_str(s).map_err(|e| e.to_string())?;
        Ok(Self {
            ty: parsed.ty().to_string(),
            namespace: parsed.namespace().map(str::to_string),
            name: parsed.name().to_string(),
            version: parsed.version().map(str::to_string),
            qualifiers: parsed
                .qualifiers()
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            subpath: parsed.subpath().map(str::to_string),
        })
    }
}

impl ParsedPurl {
    /// Rebuild the canonical identity from the parsed parts.
    #[must_use]
    pub fn to_identity(&self) -> PurlIdentity {
        let mut parts = PurlParts::new(&self.ty, &self.name).qualifiers(&self.qualifiers);
        parts.namespace = self.namespace.as_deref();
        parts.version = self.version.as_deref();
        parts.subpath = self.subpath.as_deref();
        PurlIdentity::resolve(&parts)
    }
}

/// Percent-decode a purl or purl component. Invalid UTF-8 is replaced, so
/// decoding never fails.
#[must_use]
pub fn decode(value: &str) -> String {
    String::from_utf8_lossy(&urlencoding::decode_binary(value.as_bytes())).into_owned()
}

/// Percent-encode one purl component. Input is decoded first so encoding an
/// already-encoded value is a no-op; `:` stays literal.
#[must_use]
pub fn encode_component(value: &str) -> String {
    let decoded = if value.contains('%') {
        decode(value)
    } else {
        value.to_string()
    };
    urlencoding::encode(&decoded).replace("%3A", ":")
}

/// Split an npm-style `@scope/name` into `(Some("@scope"), "name")`.
#[must_use]
pub fn split_scoped_name(name: &str) -> (Option<&str>, &str) {
    if name.starts_with('@')
        && let Some((scope, bare)) = name.split_once('/')
    {
        return (Some(scope), bare);
    }
    (None, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoped_npm_package() {
        let id = PurlIdentity::resolve(&PurlParts::new("npm", "core").namespace("@babel").version("7.24.0"));
        assert_eq!(id.purl(), "pkg:npm/%40babel/core@7.24.0");
        assert_eq!(id.bom_ref(), "pkg:npm/@babel/core@7.24.0");
    }

    #[test]
    fn test_type_lowercased_and_version_optional() {
        let id = PurlIdentity::resolve(&PurlParts::new("PyPI", "requests"));
        assert_eq!(id.purl(), "pkg:pypi/requests");
    }

    #[test]
    fn test_colon_kept_literal() {
        let id = PurlIdentity::resolve(&PurlParts::new("docker", "app:latest"));
        assert_eq!(id.purl(), "pkg:docker/app:latest");
    }

    #[test]
    fn test_encoding_is_idempotent() {
        let once = encode_component("a b+c");
        assert_eq!(once, "a%20b%2Bc");
        assert_eq!(encode_component(&once), once);
    }

    #[test]
    fn test_qualifiers_sorted_and_empty_dropped() {
        let mut qualifiers = BTreeMap::new();
        qualifiers.insert("Type".to_string(), "jar".to_string());
        qualifiers.insert("classifier".to_string(), "sources".to_string());
        qualifiers.insert("empty".to_string(), String::new());
        let id = PurlIdentity::resolve(
            &PurlParts::new("maven", "guava")
                .namespace("com.google.guava")
                .version("33.0.0-jre")
                .qualifiers(&qualifiers),
        );
        assert_eq!(
            id.purl(),
            "pkg:maven/com.google.guava/guava@33.0.0-jre?classifier=sources&type=jar"
        );
    }

    #[test]
    fn test_subpath_drops_dot_segments() {
        let id = PurlIdentity::resolve(
            &PurlParts::new("golang", "text")
                .namespace("golang.org/x")
                .subpath("./unicode/../norm/"),
        );
        assert_eq!(id.purl(), "pkg:golang/golang.org/x/text#unicode/norm");
    }

    #[test]
    fn test_decode_is_total() {
        assert_eq!(decode("pkg:npm/%E2%82%AC@1"), "pkg:npm/€@1");
        assert_eq!(decode("pkg:npm/%FF"), "pkg:npm/\u{FFFD}");
        assert_eq!(decode("100%"), "100%");
    }

    #[test]
    fn test_from_purl_keeps_input() {
        let id = PurlIdentity::from_purl("pkg:npm/%40types/node@20.1.0");
        assert_eq!(id.purl(), "pkg:npm/%40types/node@20.1.0");
        assert_eq!(id.bom_ref(), "pkg:npm/@types/node@20.1.0");
    }

    #[test]
    fn test_parse_valid_and_invalid() {
        let parsed = PurlIdentity::from_purl("pkg:maven/org.springframework/spring-core@6.1.0")
            .parse()
            .expect("valid purl");
        assert_eq!(parsed.ty, "maven");
        assert_eq!(parsed.namespace.as_deref(), Some("org.springframework"));
        assert_eq!(parsed.name, "spring-core");

        assert!(PurlIdentity::from_purl("not a purl").parse().is_err());
    }

    #[test]
    fn test_split_scoped_name() {
        assert_eq!(split_scoped_name("@angular/core"), (Some("@angular"), "core"));
        assert_eq!(split_scoped_name("lodash"), (None, "lodash"));
        assert_eq!(split_scoped_name("@weird"), (None, "@weird"));
    }
}
