//! Hash canonicalization.
//!
//! Collectors report digests three ways: explicit `{alg, content}` pairs, a
//! legacy `_shasum` (always SHA-1) or an `_integrity` subresource-integrity
//! string bundling several algorithms. All of them end up as hex.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::diagnostics::Warning;
use crate::model::{Hash, HashAlgorithm, PackageDescriptor};

/// Hex digests of the lengths the supported algorithms produce.
static HEX_DIGEST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([a-fA-F0-9]{32}|[a-fA-F0-9]{40}|[a-fA-F0-9]{64}|[a-fA-F0-9]{96}|[a-fA-F0-9]{128})$",
    )
    .expect("static regex")
});

/// Integrity algorithms in emission order.
const INTEGRITY_ORDER: [&str; 4] = ["sha512", "sha384", "sha256", "sha1"];

/// How a digest string was interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DigestForm {
    /// Already hex of a known length
    Hex,
    /// Valid base64, converted to hex
    Base64(String),
    /// Neither; kept verbatim
    Opaque,
}

/// Classify a digest string.
#[must_use]
pub fn canonicalize_digest(content: &str) -> DigestForm {
    if HEX_DIGEST.is_match(content) {
        return DigestForm::Hex;
    }
    match STANDARD.decode(content) {
        Ok(bytes) if STANDARD.encode(&bytes) == content => DigestForm::Base64(hex::encode(bytes)),
        _ => DigestForm::Opaque,
    }
}

/// Canonical hex content for `content`, recording a warning when it cannot
/// be decoded.
pub fn canonical_content(alg: &HashAlgorithm, content: &str, warnings: &mut Vec<Warning>) -> String {
    match canonicalize_digest(content) {
        DigestForm::Hex => content.to_string(),
        DigestForm::Base64(hex) => hex,
        DigestForm::Opaque => {
            tracing::debug!(alg = %alg, content, "digest is neither hex nor base64");
            warnings.push(Warning::OpaqueHashContent {
                alg: alg.to_string(),
                content: content.to_string(),
            });
            content.to_string()
        }
    }
}

/// Parse an integrity string into `algorithm -> first digest`.
///
/// Tokens look like `<alg>-<digest>[?options]` and are separated by
/// whitespace. Unknown or malformed tokens are ignored.
#[must_use]
pub fn parse_integrity(integrity: &str) -> HashMap<String, String> {
    let mut digests = HashMap::new();
    for token in integrity.split_whitespace() {
        let Some((alg, rest)) = token.split_once('-') else {
            continue;
        };
        let digest = rest.split_once('?').map_or(rest, |(d, _)| d);
        if digest.is_empty() {
            continue;
        }
        digests
            .entry(alg.to_ascii_lowercase())
            .or_insert_with(|| digest.to_string());
    }
    digests
}

/// Collect the hashes of a descriptor. The first available source wins:
/// explicit hashes, then `_shasum`, then `_integrity`.
pub fn normalize_hashes(descriptor: &PackageDescriptor, warnings: &mut Vec<Warning>) -> Vec<Hash> {
    if !descriptor.hashes.is_empty() {
        return descriptor
            .hashes
            .iter()
            .map(|h| Hash::new(h.alg.clone(), canonical_content(&h.alg, &h.content, warnings)))
            .collect();
    }

    if let Some(shasum) = descriptor.shasum.as_deref().filter(|s| !s.is_empty()) {
        let alg = HashAlgorithm::Sha1;
        let content = canonical_content(&alg, shasum, warnings);
        return vec![Hash::new(alg, content)];
    }

    let Some(integrity) = descriptor.integrity.as_deref() else {
        return Vec::new();
    };
    let digests = parse_integrity(integrity);
    INTEGRITY_ORDER
        .iter()
        .filter_map(|token| {
            let digest = digests.get(*token)?;
            let alg = HashAlgorithm::from_integrity_token(token)?;
            let content = canonical_content(&alg, digest, warnings);
            Some(Hash::new(alg, content))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHA1_HEX: &str = "da39a3ee5e6b4b0d3255bfef95601890afd80709";
    const SHA256_HEX: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    fn sha512_hex() -> String {
        "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce\
         47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e"
            .to_string()
    }

    #[test]
    fn test_hex_kept() {
        assert_eq!(canonicalize_digest(SHA1_HEX), DigestForm::Hex);
        assert_eq!(canonicalize_digest(SHA256_HEX), DigestForm::Hex);
    }

    #[test]
    fn test_base64_converted_to_hex() {
        // SHA-256 of the empty string, base64 encoded
        let b64 = "47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU=";
        assert_eq!(canonicalize_digest(b64), DigestForm::Base64(SHA256_HEX.to_string()));
    }

    #[test]
    fn test_opaque_passthrough_warns() {
        let mut warnings = Vec::new();
        let content = canonical_content(&HashAlgorithm::Md5, "not*a*digest", &mut warnings);
        assert_eq!(content, "not*a*digest");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind(), "opaque-hash-content");
    }

    #[test]
    fn test_integrity_two_algorithms_hex_unchanged() {
        let descriptor = PackageDescriptor {
            integrity: Some(format!("sha256-{SHA256_HEX} sha512-{}", sha512_hex())),
            ..PackageDescriptor::default()
        };
        let mut warnings = Vec::new();
        let hashes = normalize_hashes(&descriptor, &mut warnings);

        assert_eq!(hashes.len(), 2);
        assert_eq!(hashes[0], Hash::new(HashAlgorithm::Sha512, sha512_hex()));
        assert_eq!(hashes[1], Hash::new(HashAlgorithm::Sha256, SHA256_HEX));
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_integrity_base64_with_options() {
        let descriptor = PackageDescriptor {
            integrity: Some(
                "sha256-47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU=?foo sha256-ignored".to_string(),
            ),
            ..PackageDescriptor::default()
        };
        let hashes = normalize_hashes(&descriptor, &mut Vec::new());
        assert_eq!(hashes, vec![Hash::new(HashAlgorithm::Sha256, SHA256_HEX)]);
    }

    #[test]
    fn test_source_precedence() {
        let descriptor = PackageDescriptor {
            hashes: vec![Hash::new(HashAlgorithm::Sha256, SHA256_HEX)],
            shasum: Some(SHA1_HEX.to_string()),
            integrity: Some(format!("sha512-{}", sha512_hex())),
            ..PackageDescriptor::default()
        };
        let hashes = normalize_hashes(&descriptor, &mut Vec::new());
        assert_eq!(hashes.len(), 1);
        assert_eq!(hashes[0].alg, HashAlgorithm::Sha256);

        let legacy = PackageDescriptor {
            shasum: Some(SHA1_HEX.to_string()),
            integrity: Some(format!("sha512-{}", sha512_hex())),
            ..PackageDescriptor::default()
        };
        let hashes = normalize_hashes(&legacy, &mut Vec::new());
        assert_eq!(hashes, vec![Hash::new(HashAlgorithm::Sha1, SHA1_HEX)]);
    }

    #[test]
    fn test_no_sources_no_hashes() {
        assert!(normalize_hashes(&PackageDescriptor::default(), &mut Vec::new()).is_empty());
    }

    #[test]
    fn test_parse_integrity_first_digest_wins() {
        let digests = parse_integrity("SHA1-aaa sha1-bbb garbage md5-");
        assert_eq!(digests.get("sha1").map(String::as_str), Some("aaa"));
        assert_eq!(digests.len(), 1);
    }
}
