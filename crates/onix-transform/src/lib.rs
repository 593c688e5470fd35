//! Mapping raw ONIX products onto [`onix_model::NormalizedBook`].
//!
//! Each supported release band has its own [`VersionAdapter`]; both share
//! the field helpers in [`fields`] and the [`runtime`] decoder.

#![deny(unsafe_code)]

pub mod adapter;
pub mod context;
pub mod fields;
pub mod runtime;

pub use adapter::VersionAdapter;
pub use context::ExtractionContext;
pub use runtime::decode_runtime;
