//! Profile fusion layer
//!
//! Combines a raw search result with generative enrichment into the canonical artist
//! record:
//! - [`tag_sanitizer`]: style tag cleanup
//! - [`artwork_merger`]: positional per-artwork metadata merge
//! - [`field_policy`]: per-field candidate chains and defaults
//! - [`profile_assembler`]: orchestration of the above

pub mod artwork_merger;
pub mod field_policy;
pub mod profile_assembler;
pub mod tag_sanitizer;

pub use profile_assembler::{build_artist, ProfileAssembler};
pub use tag_sanitizer::sanitize;
