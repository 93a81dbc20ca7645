use std::path::PathBuf;

use async_trait::async_trait;
use futures::StreamExt;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;

use crate::{ByteStream, Error, Store};

/// Filesystem-backed blob store.
///
/// Objects live at `{root}/{key}`; the key's slashes become directory
/// separators and parent directories are created on demand. Suitable as
/// the single durable backend behind the proxy; an object-storage
/// backend would implement [`Store`] the same way.
pub struct FsStore {
  root: PathBuf,
}

impl FsStore {
  /// Create a store rooted at the given directory.
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  fn object_path(&self, key: &str) -> PathBuf {
    self.root.join(key)
  }
}

#[async_trait]
impl Store for FsStore {
  async fn get(&self, key: &str) -> Result<ByteStream, Error> {
    let path = self.object_path(key);
    let file = File::open(&path).await.map_err(|e| {
      if e.kind() == std::io::ErrorKind::NotFound {
        Error::NotFound(key.to_string())
      } else {
        Error::Io(e)
      }
    })?;
    let stream = ReaderStream::new(file).map(|r| r.map_err(Error::Io));
    Ok(Box::pin(stream))
  }

  async fn exists(&self, key: &str) -> Result<bool, Error> {
    match fs::metadata(self.object_path(key)).await {
      Ok(meta) => Ok(meta.is_file()),
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
      Err(e) => Err(Error::Io(e)),
    }
  }

  async fn put(&self, key: &str, data: ByteStream, _content_type: &str) -> Result<(), Error> {
    let path = self.object_path(key);

    let parent = match path.parent() {
      Some(parent) => {
        fs::create_dir_all(parent).await?;
        parent.to_path_buf()
      }
      None => self.root.clone(),
    };

    // Stream into a temporary file and rename into place once fully
    // written, so a put that fails mid-stream never leaves a truncated
    // object behind for `exists` to report as present.
    let (tmp_file, tmp_path) = tempfile::NamedTempFile::new_in(parent)?.into_parts();
    let mut file = File::from_std(tmp_file);
    let mut stream = std::pin::pin!(data);

    while let Some(chunk) = stream.next().await {
      let bytes = chunk?;
      file.write_all(&bytes).await?;
    }

    file.flush().await?;
    drop(file);
    tmp_path.persist(&path).map_err(|e| Error::Io(e.error))?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use bytes::Bytes;
  use futures::TryStreamExt;

  fn byte_stream(data: &'static [u8]) -> ByteStream {
    Box::pin(futures::stream::once(async move {
      Ok::<_, Error>(Bytes::from_static(data))
    }))
  }

  async fn collect(stream: ByteStream) -> Vec<u8> {
    let chunks: Vec<Bytes> = stream.try_collect().await.unwrap();
    chunks.concat()
  }

  #[tokio::test]
  async fn test_put_then_get() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsStore::new(dir.path());

    let key = "modules/golang.org/x/text/@v/v0.3.7.mod";
    store
      .put(key, byte_stream(b"module golang.org/x/text\n"), "text/plain; charset=UTF-8")
      .await
      .unwrap();

    let body = collect(store.get(key).await.unwrap()).await;
    assert_eq!(body, b"module golang.org/x/text\n");
  }

  #[tokio::test]
  async fn test_get_missing_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsStore::new(dir.path());

    let err = store.get("modules/missing/@v/list").await.err().unwrap();
    assert!(matches!(err, Error::NotFound(_)));
  }

  #[tokio::test]
  async fn test_exists() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsStore::new(dir.path());
    let key = "modules/example.com/m/@v/v1.0.0.info";

    assert!(!store.exists(key).await.unwrap());
    store
      .put(key, byte_stream(b"{}"), "application/json")
      .await
      .unwrap();
    assert!(store.exists(key).await.unwrap());
  }

  #[tokio::test]
  async fn test_failed_put_leaves_no_object() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsStore::new(dir.path());
    let key = "modules/example.com/m/@v/v1.0.0.zip";

    let data: ByteStream = Box::pin(futures::stream::iter(vec![
      Ok(Bytes::from_static(b"partial")),
      Err(Error::Io(std::io::Error::other("stream interrupted"))),
    ]));
    store
      .put(key, data, "application/octet-stream")
      .await
      .unwrap_err();

    assert!(!store.exists(key).await.unwrap());
    assert!(matches!(
      store.get(key).await.err().unwrap(),
      Error::NotFound(_)
    ));

    store
      .put(key, byte_stream(b"zip bytes"), "application/octet-stream")
      .await
      .unwrap();
    let body = collect(store.get(key).await.unwrap()).await;
    assert_eq!(body, b"zip bytes");
  }

  #[tokio::test]
  async fn test_put_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsStore::new(dir.path());
    let key = "modules/example.com/m/@v/list";

    store
      .put(key, byte_stream(b"v1.0.0\n"), "text/plain; charset=UTF-8")
      .await
      .unwrap();
    store
      .put(key, byte_stream(b"v1.0.0\nv1.1.0\n"), "text/plain; charset=UTF-8")
      .await
      .unwrap();

    let body = collect(store.get(key).await.unwrap()).await;
    assert_eq!(body, b"v1.0.0\nv1.1.0\n");
  }
}
