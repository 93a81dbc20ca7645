use thiserror::Error;

/// Errors that can occur during population.
#[derive(Debug, Error)]
pub enum PopulateError {
  /// Upstream resolution failed.
  #[error(transparent)]
  Resolve(#[from] modport_resolver::ResolveError),

  /// The blob store rejected an existence check or upload.
  #[error("store error: {0}")]
  Store(#[from] modport_store::Error),

  /// An I/O error occurred while walking or reading the artifact tree.
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}
