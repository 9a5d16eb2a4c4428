//! Metadata structures shared by components and the BOM document.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Component type classification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentType {
    Application,
    Framework,
    #[default]
    Library,
    Container,
    OperatingSystem,
    Device,
    DeviceDriver,
    Firmware,
    File,
    MachineLearningModel,
    Data,
}

impl ComponentType {
    pub const ALL: [Self; 11] = [
        Self::Application,
        Self::Framework,
        Self::Library,
        Self::Container,
        Self::OperatingSystem,
        Self::Device,
        Self::DeviceDriver,
        Self::Firmware,
        Self::File,
        Self::MachineLearningModel,
        Self::Data,
    ];

    /// Look up a type by its CycloneDX name. Unknown names return `None`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Application => "application",
            Self::Framework => "framework",
            Self::Library => "library",
            Self::Container => "container",
            Self::OperatingSystem => "operating-system",
            Self::Device => "device",
            Self::DeviceDriver => "device-driver",
            Self::Firmware => "firmware",
            Self::File => "file",
            Self::MachineLearningModel => "machine-learning-model",
            Self::Data => "data",
        }
    }
}

impl std::fmt::Display for ComponentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dependency scope of a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Required,
    Optional,
}

/// Cryptographic hash
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hash {
    /// Hash algorithm
    pub alg: HashAlgorithm,
    /// Digest, hex encoded unless the source could not be decoded
    pub content: String,
}

impl Hash {
    #[must_use]
    pub fn new(alg: HashAlgorithm, content: impl Into<String>) -> Self {
        Self {
            alg,
            content: content.into(),
        }
    }
}

/// Hash algorithm types
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha256,
    Sha384,
    Sha512,
    Sha3_256,
    Sha3_384,
    Sha3_512,
    Blake2b256,
    Blake2b384,
    Blake2b512,
    Blake3,
    Other(String),
}

impl HashAlgorithm {
    /// Map a subresource-integrity algorithm token (`sha512`) to its algorithm.
    #[must_use]
    pub fn from_integrity_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "sha512" => Some(Self::Sha512),
            "sha384" => Some(Self::Sha384),
            "sha256" => Some(Self::Sha256),
            "sha1" => Some(Self::Sha1),
            _ => None,
        }
    }
}

impl From<String> for HashAlgorithm {
    fn from(name: String) -> Self {
        match name.to_ascii_uppercase().as_str() {
            "MD5" => Self::Md5,
            "SHA-1" | "SHA1" => Self::Sha1,
            "SHA-256" | "SHA256" => Self::Sha256,
            "SHA-384" | "SHA384" => Self::Sha384,
            "SHA-512" | "SHA512" => Self::Sha512,
            "SHA3-256" => Self::Sha3_256,
            "SHA3-384" => Self::Sha3_384,
            "SHA3-512" => Self::Sha3_512,
            "BLAKE2B-256" => Self::Blake2b256,
            "BLAKE2B-384" => Self::Blake2b384,
            "BLAKE2B-512" => Self::Blake2b512,
            "BLAKE3" => Self::Blake3,
            _ => Self::Other(name),
        }
    }
}

impl From<HashAlgorithm> for String {
    fn from(alg: HashAlgorithm) -> Self {
        alg.to_string()
    }
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Md5 => write!(f, "MD5"),
            Self::Sha1 => write!(f, "SHA-1"),
            Self::Sha256 => write!(f, "SHA-256"),
            Self::Sha384 => write!(f, "SHA-384"),
            Self::Sha512 => write!(f, "SHA-512"),
            Self::Sha3_256 => write!(f, "SHA3-256"),
            Self::Sha3_384 => write!(f, "SHA3-384"),
            Self::Sha3_512 => write!(f, "SHA3-512"),
            Self::Blake2b256 => write!(f, "BLAKE2b-256"),
            Self::Blake2b384 => write!(f, "BLAKE2b-384"),
            Self::Blake2b512 => write!(f, "BLAKE2b-512"),
            Self::Blake3 => write!(f, "BLAKE3"),
            Self::Other(s) => write!(f, "{s}"),
        }
    }
}

/// Free-form name/value pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Property {
    pub name: String,
    pub value: String,
}

impl Property {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// External reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalReference {
    /// Reference type
    #[serde(rename = "type")]
    pub ref_type: ExternalRefType,
    /// URL or locator
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl ExternalReference {
    #[must_use]
    pub fn new(ref_type: ExternalRefType, url: impl Into<String>) -> Self {
        Self {
            ref_type,
            url: url.into(),
            comment: None,
        }
    }
}

/// External reference types
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExternalRefType {
    Vcs,
    IssueTracker,
    Website,
    Advisories,
    Bom,
    Documentation,
    Support,
    Distribution,
    License,
    BuildMeta,
    ReleaseNotes,
    Other(String),
}

impl From<String> for ExternalRefType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "vcs" => Self::Vcs,
            "issue-tracker" => Self::IssueTracker,
            "website" => Self::Website,
            "advisories" => Self::Advisories,
            "bom" => Self::Bom,
            "documentation" => Self::Documentation,
            "support" => Self::Support,
            "distribution" => Self::Distribution,
            "license" => Self::License,
            "build-meta" => Self::BuildMeta,
            "release-notes" => Self::ReleaseNotes,
            _ => Self::Other(name),
        }
    }
}

impl From<ExternalRefType> for String {
    fn from(t: ExternalRefType) -> Self {
        t.to_string()
    }
}

impl std::fmt::Display for ExternalRefType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vcs => write!(f, "vcs"),
            Self::IssueTracker => write!(f, "issue-tracker"),
            Self::Website => write!(f, "website"),
            Self::Advisories => write!(f, "advisories"),
            Self::Bom => write!(f, "bom"),
            Self::Documentation => write!(f, "documentation"),
            Self::Support => write!(f, "support"),
            Self::Distribution => write!(f, "distribution"),
            Self::License => write!(f, "license"),
            Self::BuildMeta => write!(f, "build-meta"),
            Self::ReleaseNotes => write!(f, "release-notes"),
            Self::Other(s) => write!(f, "{s}"),
        }
    }
}

/// SBOM lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum LifecyclePhase {
    Design,
    PreBuild,
    Build,
    PostBuild,
    Operations,
    Discovery,
    Decommission,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_type_names_round_trip() {
        for t in ComponentType::ALL {
            assert_eq!(ComponentType::from_name(t.as_str()), Some(t));
            let json = serde_json::to_value(t).expect("serialize");
            assert_eq!(json, t.as_str());
        }
        assert_eq!(ComponentType::from_name("platform"), None);
        assert_eq!(ComponentType::default(), ComponentType::Library);
    }

    #[test]
    fn test_hash_algorithm_serializes_as_cyclonedx_name() {
        let hash = Hash::new(HashAlgorithm::Sha512, "ab");
        let json = serde_json::to_value(&hash).expect("serialize");
        assert_eq!(json["alg"], "SHA-512");
        assert_eq!(json["content"], "ab");

        let back: Hash = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back.alg, HashAlgorithm::Sha512);
    }

    #[test]
    fn test_hash_algorithm_unknown_is_preserved() {
        let alg = HashAlgorithm::from("streebog-256".to_string());
        assert_eq!(alg, HashAlgorithm::Other("streebog-256".to_string()));
        assert_eq!(alg.to_string(), "streebog-256");
    }

    #[test]
    fn test_integrity_tokens() {
        assert_eq!(
            HashAlgorithm::from_integrity_token("SHA384"),
            Some(HashAlgorithm::Sha384)
        );
        assert_eq!(HashAlgorithm::from_integrity_token("md5"), None);
    }

    #[test]
    fn test_external_reference_shape() {
        let reference = ExternalReference::new(ExternalRefType::IssueTracker, "https://x/issues");
        let json = serde_json::to_value(&reference).expect("serialize");
        assert_eq!(json["type"], "issue-tracker");
        assert!(json.get("comment").is_none());
    }

    #[test]
    fn test_lifecycle_phase_names() {
        let json = serde_json::to_value(LifecyclePhase::PreBuild).expect("serialize");
        assert_eq!(json, "pre-build");
    }
}
