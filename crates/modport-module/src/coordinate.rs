use std::fmt;

/// A module path plus a pinned version, identifying one immutable
/// artifact set.
///
/// The path is held in its caller-visible (unescaped) form; the escaped
/// form is derived where a storage key is needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinate {
  pub path: String,
  pub version: String,
}

impl Coordinate {
  pub fn new(path: impl Into<String>, version: impl Into<String>) -> Self {
    Self {
      path: path.into(),
      version: version.into(),
    }
  }
}

impl fmt::Display for Coordinate {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}@{}", self.path, self.version)
  }
}
