use modport_module::ArtifactKind;

/// Classify a walked directory entry as an artifact that must be
/// persisted, or `None` to skip it.
///
/// Directories are never candidates. A file is a candidate exactly when
/// its name classifies as one of the protocol's artifact kinds; lock
/// files, partial downloads, and other working files are excluded. Pure
/// and total over (name, is_dir) with no filesystem access. The returned
/// kind also carries the content type recorded at upload.
pub fn classify_candidate(name: &str, is_dir: bool) -> Option<ArtifactKind> {
  if is_dir {
    return None;
  }
  ArtifactKind::classify(name)
}

/// Predicate form of [`classify_candidate`].
pub fn is_upload_candidate(name: &str, is_dir: bool) -> bool {
  classify_candidate(name, is_dir).is_some()
}
