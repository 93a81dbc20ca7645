//! End-to-end flow: populate a module through the admin endpoint, then
//! serve its artifacts through the data plane out of the same store.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use modport_module::Coordinate;
use modport_populate::Populator;
use modport_proxy::{admin_router, proxy_router};
use modport_resolver::{Resolution, ResolveError, Resolver};
use modport_store::MemoryStore;

/// Resolver stub producing a fixed artifact tree for golang.org/x/text.
struct StubResolver;

#[async_trait]
impl Resolver for StubResolver {
  async fn resolve(&self, _coordinate: &Coordinate) -> Result<Resolution, ResolveError> {
    let cache_root = tempfile::tempdir()?;
    let dir = cache_root
      .path()
      .join("cache")
      .join("download")
      .join("golang.org/x/text/@v");
    std::fs::create_dir_all(&dir)?;
    std::fs::write(dir.join("list"), b"v0.3.7\n")?;
    std::fs::write(dir.join("v0.3.7.info"), br#"{"Version":"v0.3.7"}"#)?;
    std::fs::write(dir.join("v0.3.7.mod"), b"module golang.org/x/text\n")?;
    std::fs::write(dir.join("v0.3.7.zip"), b"archive-bytes")?;
    std::fs::write(dir.join("v0.3.7.ziphash"), b"h1:abc")?;
    Ok(Resolution::new(cache_root, dir.join("v0.3.7.mod")))
  }
}

#[tokio::test]
async fn test_populate_then_serve() {
  let store = Arc::new(MemoryStore::new());
  let populator = Arc::new(Populator::new(Box::new(StubResolver), store.clone()));
  let admin = admin_router(populator);
  let proxy = proxy_router(store.clone());

  // Reads against an empty store miss.
  let resp = proxy
    .clone()
    .oneshot(
      Request::builder()
        .uri("/golang.org/x/text/@v/v0.3.7.zip")
        .body(Body::empty())
        .unwrap(),
    )
    .await
    .unwrap();
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);

  // Populate through the control plane.
  let resp = admin
    .clone()
    .oneshot(
      Request::builder()
        .method("POST")
        .uri("/golang.org/x/text@v0.3.7")
        .body(Body::empty())
        .unwrap(),
    )
    .await
    .unwrap();
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(store.put_count(), 5);

  // The data plane now serves every artifact kind locally.
  for (uri, content_type, body) in [
    (
      "/golang.org/x/text/@v/list",
      "text/plain; charset=UTF-8",
      b"v0.3.7\n".as_slice(),
    ),
    (
      "/golang.org/x/text/@v/v0.3.7.info",
      "application/json",
      br#"{"Version":"v0.3.7"}"#.as_slice(),
    ),
    (
      "/golang.org/x/text/@v/v0.3.7.mod",
      "text/plain; charset=UTF-8",
      b"module golang.org/x/text\n".as_slice(),
    ),
    (
      "/golang.org/x/text/@v/v0.3.7.zip",
      "application/octet-stream",
      b"archive-bytes".as_slice(),
    ),
  ] {
    let resp = proxy
      .clone()
      .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::OK, "{uri}");
    assert_eq!(
      resp.headers().get(header::CONTENT_TYPE).unwrap(),
      content_type,
      "{uri}"
    );
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(bytes.as_ref(), body, "{uri}");
  }

  // A second non-forced populate performs zero uploads.
  let resp = admin
    .oneshot(
      Request::builder()
        .method("POST")
        .uri("/golang.org/x/text@v0.3.7")
        .body(Body::empty())
        .unwrap(),
    )
    .await
    .unwrap();
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(store.put_count(), 5);
}
