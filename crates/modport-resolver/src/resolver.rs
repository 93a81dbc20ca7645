use std::path::{Path, PathBuf};
use std::process::Output;

use async_trait::async_trait;
use serde::Deserialize;
use tempfile::TempDir;
use tokio::fs;
use tokio::process::Command;

use modport_module::Coordinate;

use crate::error::ResolveError;

/// Environment override the external resolver honors for its cache
/// location. Set per spawned process, never on the proxy itself.
const CACHE_ENV: &str = "GOMODCACHE";

/// The outcome of resolving one coordinate: a temporary cache root
/// holding the downloaded artifact tree, and the manifest path within it.
///
/// Owned by exactly one populate call. The cache root is removed when the
/// `Resolution` is dropped, success or failure.
#[derive(Debug)]
pub struct Resolution {
  cache_root: TempDir,
  manifest: PathBuf,
}

impl Resolution {
  pub fn new(cache_root: TempDir, manifest: PathBuf) -> Self {
    Self { cache_root, manifest }
  }

  /// Root of the resolver's working cache.
  pub fn cache_root(&self) -> &Path {
    self.cache_root.path()
  }

  /// The subtree under which downloaded artifacts land.
  pub fn download_dir(&self) -> PathBuf {
    self.cache_root.path().join("cache").join("download")
  }

  /// Path to the resolved module's manifest.
  pub fn manifest(&self) -> &Path {
    &self.manifest
  }
}

/// Resolver capability: resolve one coordinate and its full transitive
/// dependency set into a local artifact tree.
#[async_trait]
pub trait Resolver: Send + Sync {
  async fn resolve(&self, coordinate: &Coordinate) -> Result<Resolution, ResolveError>;
}

/// Structured result the resolver prints for a single-module download.
#[derive(Debug, Deserialize)]
struct DownloadInfo {
  #[serde(rename = "GoMod")]
  manifest: PathBuf,
}

/// Resolver backed by the external module tool, invoked as a subprocess.
///
/// Resolution happens in two passes: one download of the requested
/// coordinate to discover its manifest, then a closure download driven by
/// a scratch copy of that manifest. Both passes share one isolated cache
/// root so the artifact tree accumulates in a single place.
pub struct CommandResolver {
  program: String,
}

impl CommandResolver {
  pub fn new(program: impl Into<String>) -> Self {
    Self {
      program: program.into(),
    }
  }

  async fn run(&self, cmd: &mut Command) -> Result<Output, ResolveError> {
    let output = cmd.output().await?;
    if !output.status.success() {
      let mut diagnostics = String::from_utf8_lossy(&output.stderr).into_owned();
      diagnostics.push_str(&String::from_utf8_lossy(&output.stdout));
      return Err(ResolveError::Resolver(diagnostics));
    }
    Ok(output)
  }
}

impl Default for CommandResolver {
  fn default() -> Self {
    Self::new("go")
  }
}

#[async_trait]
impl Resolver for CommandResolver {
  async fn resolve(&self, coordinate: &Coordinate) -> Result<Resolution, ResolveError> {
    let cache_root = tempfile::tempdir()?;

    tracing::debug!(coordinate = %coordinate, cache = %cache_root.path().display(), "downloading module");
    let output = self
      .run(
        Command::new(&self.program)
          .args(["mod", "download", "-json"])
          .arg(coordinate.to_string())
          .env(CACHE_ENV, cache_root.path()),
      )
      .await?;
    let info: DownloadInfo = serde_json::from_slice(&output.stdout)?;

    // Closure pass: a scratch source dir holding only a copy of the
    // manifest, removed on every exit path when `scratch` drops.
    let scratch = tempfile::tempdir()?;
    let manifest_bytes = fs::read(&info.manifest).await?;
    fs::write(scratch.path().join("go.mod"), manifest_bytes).await?;

    tracing::debug!(coordinate = %coordinate, "downloading transitive dependencies");
    self
      .run(
        Command::new(&self.program)
          .args(["mod", "download", "-json", "all"])
          .current_dir(scratch.path())
          .env(CACHE_ENV, cache_root.path()),
      )
      .await?;

    Ok(Resolution::new(cache_root, info.manifest))
  }
}
