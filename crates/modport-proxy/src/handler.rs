use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::extract::State;
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;

use modport_module::{
  ArtifactKind, VERSION_LIST, escape_path, escape_version, is_canonical, storage_key,
  unescape_path, unescape_version,
};
use modport_store::{ByteStream, Store};

use crate::error::ProxyError;

/// Build the data-plane router: every GET in the module wire-protocol
/// grammar, served from the store. Non-GET methods are rejected with 405.
pub fn proxy_router(store: Arc<dyn Store>) -> Router {
  Router::new()
    .route("/*path", get(serve_module))
    .with_state(store)
}

/// Dispatch one read-path request.
///
/// The grammar is `<escaped-module-path>/@v/<what>` where `<what>` is
/// `list`, or `<escaped-version>` plus one of the `.info`/`.mod`/`.zip`
/// extensions. Version pinning is strict: `latest` never resolves here,
/// and every extension except `.info` requires the version to already be
/// canonical.
async fn serve_module(
  State(store): State<Arc<dyn Store>>,
  uri: Uri,
) -> Result<Response, ProxyError> {
  let path = uri.path();

  // Checksum-database proxying is unsupported. Any "sumdb/" segment
  // past the leading slash short-circuits, whatever surrounds it.
  if path.find("sumdb/").is_some_and(|i| i > 0) {
    return Ok(StatusCode::NOT_FOUND.into_response());
  }

  let Some(i) = path.rfind("/@v/") else {
    return Err(ProxyError::BadRequest("no path".to_string()));
  };
  let module_path = unescape_path(path[..i].trim_start_matches('/'))
    .map_err(|e| ProxyError::BadRequest(e.to_string()))?;
  let what = &path[i + "/@v/".len()..];

  match what {
    "latest" => Err(ProxyError::BadRequest("latest is not supported".to_string())),

    VERSION_LIST => {
      let escaped = escape_path(&module_path).map_err(|e| ProxyError::BadRequest(e.to_string()))?;
      let stream = store.get(&storage_key(&escaped, VERSION_LIST)).await?;
      Ok(artifact_response(ArtifactKind::VersionList.content_type(), stream))
    }

    _ => {
      let (base, ext) = split_extension(what);
      let version =
        unescape_version(base).map_err(|e| ProxyError::BadRequest(e.to_string()))?;

      // "latest" must never reach the store, not even under .info.
      if version == "latest" {
        return Err(ProxyError::BadRequest("version latest is disallowed".to_string()));
      }
      if ext != ".info" && !is_canonical(&version) {
        return Err(ProxyError::BadRequest(format!(
          "version {version} is not in canonical form"
        )));
      }

      let kind = match ext {
        ".info" => ArtifactKind::Info,
        ".mod" => ArtifactKind::Mod,
        ".zip" => ArtifactKind::Zip,
        _ => {
          return Err(ProxyError::BadRequest("request not recognized".to_string()));
        }
      };

      let escaped_path =
        escape_path(&module_path).map_err(|e| ProxyError::BadRequest(e.to_string()))?;
      let escaped_version =
        escape_version(&version).map_err(|e| ProxyError::BadRequest(e.to_string()))?;
      let key = storage_key(&escaped_path, &format!("{escaped_version}{ext}"));
      let stream = store.get(&key).await?;
      Ok(artifact_response(kind.content_type(), stream))
    }
  }
}

/// Split `what` into (basename, extension-with-dot). No dot yields an
/// empty extension, which dispatch then rejects.
fn split_extension(what: &str) -> (&str, &str) {
  match what.rfind('.') {
    Some(i) => (&what[..i], &what[i..]),
    None => (what, ""),
  }
}

/// Stream store bytes back with the kind's content type. The body takes
/// ownership of the stream, so it is drained or dropped with the
/// response either way.
fn artifact_response(content_type: &'static str, stream: ByteStream) -> Response {
  (
    [(header::CONTENT_TYPE, content_type)],
    Body::from_stream(stream),
  )
    .into_response()
}
