//! Modport Store
//!
//! This crate provides the blob store capability trait and its backends.
//! The store is a single logical namespace of byte objects addressed by
//! storage keys; the proxy only ever needs three operations on it:
//! get-by-key, exists-by-key, and put-by-key.
//!
//! The store is treated as append/overwrite-only — there is no deletion.
//! Puts are whole-object overwrites with no partial or merge semantics.
//!
//! The trait uses async streaming so large archives never have to be
//! buffered in memory.

mod fs;
mod memory;

pub use fs::FsStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;

/// A boxed stream of object bytes.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, Error>> + Send>>;

/// Error type for store operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
  /// No object exists under the requested key.
  #[error("object not found: {0}")]
  NotFound(String),

  /// An I/O error occurred.
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

/// Blob store capability.
///
/// Implementations provide the durable backend. Callers derive keys
/// themselves; the store attaches no meaning to key structure.
#[async_trait]
pub trait Store: Send + Sync {
  /// Retrieve the object stored under `key` as a byte stream.
  async fn get(&self, key: &str) -> Result<ByteStream, Error>;

  /// Check whether an object exists under `key` without fetching it.
  async fn exists(&self, key: &str) -> Result<bool, Error>;

  /// Store an object under `key`, overwriting any previous object.
  async fn put(&self, key: &str, data: ByteStream, content_type: &str) -> Result<(), Error>;
}
