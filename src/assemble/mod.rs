//! Final assembly: deduplication, parent selection and the output document.

mod bom;
pub mod dedup;
pub mod formulation;
pub mod metadata;
pub mod parent;

pub use bom::BomAssembler;
pub use dedup::{dedup_key, dedupe_components};
pub use formulation::{BuildProvenance, TrackedFile};
pub use metadata::{build_metadata, scrub_parent, tools_section};
pub use parent::{assemble_parent, duplicates_parent};
