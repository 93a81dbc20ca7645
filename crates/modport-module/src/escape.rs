use thiserror::Error;

/// Errors from the path/version escaping scheme.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EscapeError {
  /// The input is empty.
  #[error("empty {kind}")]
  Empty { kind: &'static str },

  /// A character outside the allowed set.
  #[error("invalid character {ch:?} in {kind}")]
  InvalidCharacter { kind: &'static str, ch: char },

  /// An escaped form where `!` is not followed by a lowercase letter.
  #[error("invalid escaped {kind}: '!' must be followed by a lowercase letter")]
  DanglingBang { kind: &'static str },
}

const PATH: &str = "module path";
const VERSION: &str = "version";

/// Escape a module path for use as a storage-key prefix.
///
/// Uppercase ASCII letters become `'!'` followed by the lowercase letter,
/// so that keys are safe on case-insensitive backends. The transformation
/// is deterministic and reversed exactly by [`unescape_path`].
pub fn escape_path(path: &str) -> Result<String, EscapeError> {
  escape(path, PATH, true)
}

/// Reverse [`escape_path`]. Fails on any byte sequence the escaper could
/// not have produced.
pub fn unescape_path(escaped: &str) -> Result<String, EscapeError> {
  unescape(escaped, PATH, true)
}

/// Escape a version string, same scheme as [`escape_path`] minus `/`.
pub fn escape_version(version: &str) -> Result<String, EscapeError> {
  escape(version, VERSION, false)
}

/// Reverse [`escape_version`].
pub fn unescape_version(escaped: &str) -> Result<String, EscapeError> {
  unescape(escaped, VERSION, false)
}

/// Characters permitted in unescaped paths and versions. `'!'` is the
/// escape sentinel and is never a legal input character.
fn allowed(ch: char, allow_slash: bool) -> bool {
  ch.is_ascii_alphanumeric()
    || matches!(ch, '-' | '.' | '_' | '~' | '+')
    || (allow_slash && ch == '/')
}

fn escape(input: &str, kind: &'static str, allow_slash: bool) -> Result<String, EscapeError> {
  if input.is_empty() {
    return Err(EscapeError::Empty { kind });
  }
  let mut out = String::with_capacity(input.len());
  for ch in input.chars() {
    if !allowed(ch, allow_slash) {
      return Err(EscapeError::InvalidCharacter { kind, ch });
    }
    if ch.is_ascii_uppercase() {
      out.push('!');
      out.push(ch.to_ascii_lowercase());
    } else {
      out.push(ch);
    }
  }
  Ok(out)
}

fn unescape(input: &str, kind: &'static str, allow_slash: bool) -> Result<String, EscapeError> {
  if input.is_empty() {
    return Err(EscapeError::Empty { kind });
  }
  let mut out = String::with_capacity(input.len());
  let mut chars = input.chars();
  while let Some(ch) = chars.next() {
    if ch == '!' {
      match chars.next() {
        Some(lower) if lower.is_ascii_lowercase() => out.push(lower.to_ascii_uppercase()),
        _ => return Err(EscapeError::DanglingBang { kind }),
      }
      continue;
    }
    // Uppercase letters cannot appear in a correctly escaped form.
    if ch.is_ascii_uppercase() || !allowed(ch, allow_slash) {
      return Err(EscapeError::InvalidCharacter { kind, ch });
    }
    out.push(ch);
  }
  Ok(out)
}
