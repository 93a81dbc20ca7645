/// Key prefix under which every artifact lives in the store.
pub const STORE_PREFIX: &str = "modules";

/// Fixed object name of the version-list artifact.
pub const VERSION_LIST: &str = "list";

/// The kinds of persisted artifact blobs for a module version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
  /// Newline-delimited list of known versions for a module.
  VersionList,
  /// Metadata document for one version.
  Info,
  /// Dependency-declaration manifest for one version.
  Mod,
  /// Source archive for one version.
  Zip,
  /// Hash of the source archive.
  ZipHash,
  /// Checksum-database entry cached alongside the artifacts.
  SumDb,
}

impl ArtifactKind {
  /// Classify a directory-entry name into an artifact kind.
  ///
  /// Returns `None` for working files the resolver leaves behind (lock
  /// files, partial downloads, directory markers).
  pub fn classify(file_name: &str) -> Option<Self> {
    if file_name == VERSION_LIST {
      return Some(Self::VersionList);
    }
    match file_name.rsplit_once('.').map(|(_, ext)| ext) {
      Some("info") => return Some(Self::Info),
      Some("mod") => return Some(Self::Mod),
      Some("zip") => return Some(Self::Zip),
      Some("ziphash") => return Some(Self::ZipHash),
      _ => {}
    }
    if file_name.contains("sumdb") {
      return Some(Self::SumDb);
    }
    None
  }

  /// Content type served for this artifact kind.
  pub fn content_type(&self) -> &'static str {
    match self {
      Self::Info => "application/json",
      Self::Zip => "application/octet-stream",
      Self::VersionList | Self::Mod | Self::ZipHash | Self::SumDb => {
        "text/plain; charset=UTF-8"
      }
    }
  }
}

/// Derive the storage key for an object under a module's namespace.
///
/// `escaped_path` is the escaped module path; `object` is either the
/// version-list name or `<escaped-version><extension>`. Keys are stable:
/// the same inputs always produce the same key.
pub fn storage_key(escaped_path: &str, object: &str) -> String {
  format!("{STORE_PREFIX}/{escaped_path}/@v/{object}")
}
