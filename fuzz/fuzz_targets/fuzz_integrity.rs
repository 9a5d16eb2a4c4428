#![no_main]
use libfuzzer_sys::fuzz_target;
use sbom_assembler::normalize::{canonicalize_digest, parse_integrity};

/// Fuzz subresource-integrity parsing and digest canonicalization.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        for digest in parse_integrity(s).values() {
            let _ = canonicalize_digest(digest);
        }
        let _ = canonicalize_digest(s);
    }
});
