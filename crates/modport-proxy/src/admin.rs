use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::post;

use modport_module::Coordinate;
use modport_populate::Populator;

/// Build the control-plane router.
///
/// `POST /<module-path>@<version>[?f=true]` populates the store for that
/// coordinate; `f=true` forces re-upload of artifacts that already
/// exist. Any other method is rejected with 405.
pub fn admin_router(populator: Arc<Populator>) -> Router {
  Router::new()
    .route("/*path", post(populate_module))
    .with_state(populator)
}

async fn populate_module(State(populator): State<Arc<Populator>>, uri: Uri) -> Response {
  let path = uri.path().trim_start_matches('/');
  let Some((module_path, version)) = path.rsplit_once('@') else {
    return (
      StatusCode::BAD_REQUEST,
      "malformed module path or version",
    )
      .into_response();
  };

  let force = uri
    .query()
    .is_some_and(|q| q.split('&').any(|pair| pair == "f=true"));

  let coordinate = Coordinate::new(module_path, version);
  match populator.copy(force, &coordinate).await {
    Ok(()) => (StatusCode::OK, "ok\n").into_response(),
    Err(e) => {
      tracing::error!(coordinate = %coordinate, error = %e, "population failed");
      (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
    }
  }
}
