use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Error type for the data-plane handler.
///
/// Maps onto the protocol's three failure classes: malformed input is
/// 400, a missing object is 404 (including a not-found I/O condition
/// surfacing through the store), anything else is 500. The error's
/// message becomes the plain-text response body.
#[derive(Debug, Error)]
pub enum ProxyError {
  /// The request does not follow the wire-protocol grammar.
  #[error("{0}")]
  BadRequest(String),

  /// The store failed to produce the requested object.
  #[error(transparent)]
  Store(#[from] modport_store::Error),
}

impl ProxyError {
  fn status(&self) -> StatusCode {
    match self {
      Self::BadRequest(_) => StatusCode::BAD_REQUEST,
      Self::Store(modport_store::Error::NotFound(_)) => StatusCode::NOT_FOUND,
      Self::Store(modport_store::Error::Io(e))
        if e.kind() == std::io::ErrorKind::NotFound =>
      {
        StatusCode::NOT_FOUND
      }
      Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for ProxyError {
  fn into_response(self) -> Response {
    let status = self.status();
    if status == StatusCode::INTERNAL_SERVER_ERROR {
      tracing::error!(error = %self, "request failed");
    }
    (status, self.to_string()).into_response()
  }
}
