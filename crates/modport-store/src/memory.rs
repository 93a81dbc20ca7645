use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures::StreamExt;

use crate::{ByteStream, Error, Store};

/// In-memory blob store.
///
/// Keeps objects in a map and counts store traffic, so tests can assert
/// how many existence checks and uploads a population actually performed.
/// Not durable; intended for tests and embedding.
#[derive(Default)]
pub struct MemoryStore {
  objects: Mutex<HashMap<String, Bytes>>,
  gets: AtomicUsize,
  puts: AtomicUsize,
  existence_checks: AtomicUsize,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Seed an object directly, bypassing the traffic counters.
  pub fn insert(&self, key: impl Into<String>, data: impl Into<Bytes>) {
    self.objects.lock().unwrap().insert(key.into(), data.into());
  }

  /// Number of `get` calls observed so far.
  pub fn get_count(&self) -> usize {
    self.gets.load(Ordering::SeqCst)
  }

  /// Number of `put` calls observed so far.
  pub fn put_count(&self) -> usize {
    self.puts.load(Ordering::SeqCst)
  }

  /// Number of `exists` calls observed so far.
  pub fn existence_check_count(&self) -> usize {
    self.existence_checks.load(Ordering::SeqCst)
  }

  /// Keys currently held, sorted for stable assertions.
  pub fn keys(&self) -> Vec<String> {
    let mut keys: Vec<String> = self.objects.lock().unwrap().keys().cloned().collect();
    keys.sort();
    keys
  }
}

#[async_trait]
impl Store for MemoryStore {
  async fn get(&self, key: &str) -> Result<ByteStream, Error> {
    self.gets.fetch_add(1, Ordering::SeqCst);
    let data = self
      .objects
      .lock()
      .unwrap()
      .get(key)
      .cloned()
      .ok_or_else(|| Error::NotFound(key.to_string()))?;
    Ok(Box::pin(futures::stream::once(async move {
      Ok::<_, Error>(data)
    })))
  }

  async fn exists(&self, key: &str) -> Result<bool, Error> {
    self.existence_checks.fetch_add(1, Ordering::SeqCst);
    Ok(self.objects.lock().unwrap().contains_key(key))
  }

  async fn put(&self, key: &str, data: ByteStream, _content_type: &str) -> Result<(), Error> {
    let mut buf = BytesMut::new();
    let mut stream = std::pin::pin!(data);
    while let Some(chunk) = stream.next().await {
      buf.extend_from_slice(&chunk?);
    }
    self.puts.fetch_add(1, Ordering::SeqCst);
    self
      .objects
      .lock()
      .unwrap()
      .insert(key.to_string(), buf.freeze());
    Ok(())
  }
}
