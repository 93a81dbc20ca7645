//! Modport Resolver
//!
//! This crate adapts an external dependency resolver into a capability
//! the populator can call: given one coordinate, produce a local
//! directory tree holding that module's artifacts plus the full
//! transitive closure's, together with the path to its manifest.
//!
//! The adapter's engineering burden is isolation and cleanup, not
//! resolution itself: every call gets a fresh temporary cache root so
//! concurrent populations never share state, and all scratch space is
//! removed on every exit path.

mod error;
mod resolver;

pub use error::ResolveError;
pub use resolver::{CommandResolver, Resolution, Resolver};
