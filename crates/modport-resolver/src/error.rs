use thiserror::Error;

/// Errors that can occur while resolving a module.
#[derive(Debug, Error)]
pub enum ResolveError {
  /// The resolver process exited non-zero. Carries the resolver's own
  /// combined stderr/stdout diagnostics verbatim.
  #[error("{0}")]
  Resolver(String),

  /// The resolver's output could not be parsed into the expected shape.
  #[error("unexpected resolver output: {0}")]
  Output(#[from] serde_json::Error),

  /// An I/O error occurred while setting up or reading the workspace.
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}
