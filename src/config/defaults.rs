//! Default values for sbom-assembler configuration.

/// CycloneDX specification version used when none is configured.
pub const DEFAULT_SPEC_VERSION: &str = "1.5";

/// Tool identity written into `metadata.tools`.
pub const TOOL_NAME: &str = "sbom-assembler";
pub const TOOL_VENDOR: &str = "binarly-io";

/// Purl types whose components are container images.
pub const CONTAINER_PURL_TYPES: &[&str] = &["docker", "oci", "container"];

/// Purl types whose components are whole applications (source forges).
pub const APPLICATION_PURL_TYPES: &[&str] = &["github"];

/// Groups whose components are applications, e.g. GitHub Actions.
pub const APPLICATION_GROUPS: &[&str] = &["actions"];

/// Curated framework identifiers.
///
/// Entries starting with `pkg:` match as purl prefixes (compared lowercased);
/// bare tokens match as substrings of the purl namespace or name.
pub const KNOWN_FRAMEWORKS: &[&str] = &[
    "pkg:maven/org.springframework",
    "pkg:maven/io.quarkus",
    "pkg:maven/io.micronaut",
    "pkg:maven/io.vertx",
    "pkg:maven/org.apache.struts",
    "pkg:maven/jakarta.platform",
    "pkg:npm/%40angular/core",
    "pkg:npm/%40nestjs/core",
    "pkg:npm/react@",
    "pkg:npm/vue@",
    "pkg:npm/express@",
    "pkg:npm/next@",
    "pkg:npm/svelte@",
    "pkg:pypi/django@",
    "pkg:pypi/flask@",
    "pkg:pypi/fastapi@",
    "pkg:gem/rails@",
    "pkg:composer/laravel/framework",
    "pkg:composer/symfony/framework-bundle",
    "pkg:nuget/microsoft.aspnetcore",
    "springframework",
    "aspnetcore",
    "quarkus",
    "micronaut",
];

pub(crate) fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}
