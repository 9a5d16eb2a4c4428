#![no_main]
use libfuzzer_sys::fuzz_target;
use sbom_assembler::model::{PurlIdentity, PurlParts, decode};

/// Fuzz purl construction with arbitrary name and version strings.
fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let (name, version) = s.split_once('\n').unwrap_or((s, ""));
    let identity = PurlIdentity::resolve(&PurlParts::new("generic", name).version(version));
    assert_eq!(decode(identity.purl()), identity.bom_ref());

    // Classification parsing may reject the purl but must not panic.
    let _ = identity.parse();
});
