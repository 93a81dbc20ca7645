//! Modport Module
//!
//! Identity types for the proxy: module coordinates, the reversible
//! escaping scheme used on the storage side, canonical version checking,
//! and storage-key derivation.
//!
//! A coordinate names one immutable artifact set. Internally every
//! storage key is re-derivable from (path, version, artifact kind) alone;
//! nothing about key layout is stored as opaque state.

mod artifact;
mod coordinate;
mod escape;
mod version;

pub use artifact::{ArtifactKind, STORE_PREFIX, VERSION_LIST, storage_key};
pub use coordinate::Coordinate;
pub use escape::{
  EscapeError, escape_path, escape_version, unescape_path, unescape_version,
};
pub use version::{canonical, is_canonical};
