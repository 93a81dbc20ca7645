//! Modport Populate
//!
//! The population pipeline: resolve a coordinate's transitive closure
//! through the resolver adapter, walk the resulting artifact tree, and
//! upload every protocol-relevant artifact to the blob store — skipping
//! objects the store already holds unless force mode is set.
//!
//! Population is idempotent by construction: re-running it for the same
//! coordinate uploads nothing new once the store holds all artifacts.

mod classify;
mod error;
mod populate;

pub use classify::{classify_candidate, is_upload_candidate};
pub use error::PopulateError;
pub use populate::Populator;
