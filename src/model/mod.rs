//! Data model: collector input, normalized components and the output document.
//!
//! Collectors hand over [`PackageDescriptor`] trees. The normalizer turns
//! them into [`Component`]s keyed by [`PurlIdentity`], and the assembler
//! wraps everything into a [`Bom`].

mod component;
mod descriptor;
mod document;
mod identifiers;
mod license;
mod metadata;

pub use component::*;
pub use descriptor::*;
pub use document::*;
pub use identifiers::*;
pub use license::*;
pub use metadata::*;
