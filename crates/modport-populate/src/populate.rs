use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;

use futures::StreamExt;
use tokio::fs::{self, File};
use tokio_util::io::ReaderStream;

use modport_module::{Coordinate, STORE_PREFIX};
use modport_resolver::Resolver;
use modport_store::Store;

use crate::classify::classify_candidate;
use crate::error::PopulateError;

/// Orchestrates one population: resolve, walk the artifact tree, upload.
///
/// Collaborators are injected at construction; the populator holds no
/// per-call state, so one instance serves every control-plane request.
pub struct Populator {
  resolver: Box<dyn Resolver>,
  store: Arc<dyn Store>,
}

impl Populator {
  pub fn new(resolver: Box<dyn Resolver>, store: Arc<dyn Store>) -> Self {
    Self { resolver, store }
  }

  /// Resolve `coordinate` and its transitive closure, then upload every
  /// classified artifact to the store.
  ///
  /// With `force` unset, each object is preceded by an existence check
  /// and skipped when already present; with `force` set, every artifact
  /// is re-uploaded unconditionally. The first failure aborts the walk
  /// and propagates; artifacts uploaded before the failure stay in place
  /// (uploads are independently idempotent, re-runs are safe). The
  /// resolver's cache root is removed when this call returns, whatever
  /// the outcome.
  pub async fn copy(&self, force: bool, coordinate: &Coordinate) -> Result<(), PopulateError> {
    tracing::info!(coordinate = %coordinate, force, "resolving module");
    let resolution = self.resolver.resolve(coordinate).await?;

    let downloads = resolution.download_dir();
    self
      .copy_dir(force, downloads, STORE_PREFIX.to_string())
      .await
    // `resolution` drops here, removing the temporary cache root.
  }

  /// Walk one directory level, recursing into subdirectories and
  /// uploading candidate files. The key prefix mirrors the directory
  /// path with the walked root replaced by the store prefix.
  fn copy_dir<'a>(
    &'a self,
    force: bool,
    dir: PathBuf,
    prefix: String,
  ) -> Pin<Box<dyn Future<Output = Result<(), PopulateError>> + Send + 'a>> {
    Box::pin(async move {
      let mut entries = fs::read_dir(&dir).await?;
      while let Some(entry) = entries.next_entry().await? {
        let file_type = entry.file_type().await?;
        let name = match entry.file_name().into_string() {
          Ok(name) => name,
          Err(_) => continue,
        };

        if file_type.is_dir() {
          self
            .copy_dir(force, entry.path(), format!("{prefix}/{name}"))
            .await?;
          continue;
        }

        let Some(kind) = classify_candidate(&name, false) else {
          continue;
        };

        let key = format!("{prefix}/{name}");
        self
          .upload(force, &entry.path(), &key, kind.content_type())
          .await?;
      }
      Ok(())
    })
  }

  async fn upload(
    &self,
    force: bool,
    src: &Path,
    key: &str,
    content_type: &str,
  ) -> Result<(), PopulateError> {
    if !force {
      tracing::debug!(key = %key, "checking for existing object");
      if self.store.exists(key).await? {
        tracing::debug!(key = %key, "already present, skipping");
        return Ok(());
      }
    }

    tracing::info!(key = %key, "uploading");
    let file = File::open(src).await?;
    let stream = ReaderStream::new(file).map(|r| r.map_err(modport_store::Error::Io));
    self.store.put(key, Box::pin(stream), content_type).await?;
    Ok(())
  }
}
