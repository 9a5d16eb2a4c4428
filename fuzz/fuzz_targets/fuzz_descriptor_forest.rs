#![no_main]
use libfuzzer_sys::fuzz_target;
use sbom_assembler::{AssemblerConfig, CollectorOutput, DescriptorForest, ProjectAccumulator};

/// Fuzz descriptor deserialization and the whole normalization path.
///
/// Any JSON that deserializes as a forest must normalize, merge and
/// assemble without panicking, and every emitted purl must be unique.
fuzz_target!(|data: &[u8]| {
    let Ok(forest) = serde_json::from_slice::<DescriptorForest>(data) else {
        return;
    };
    let config = AssemblerConfig::default();
    let mut accumulator = ProjectAccumulator::new(&config);
    accumulator.add(CollectorOutput::new("npm", forest));
    let project = accumulator.finish().value;

    let mut purls = std::collections::HashSet::new();
    for component in &project.components {
        assert!(purls.insert(component.purl.as_str()));
    }
    for edge in &project.dependencies {
        assert!(!edge.depends_on.contains(&edge.reference));
    }
});
