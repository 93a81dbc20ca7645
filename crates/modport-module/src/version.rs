/// Compute the canonical form of a version string, if it has one.
///
/// A canonical version is `v` followed by a semver triple, optionally with
/// a prerelease tag. Build metadata is never part of the canonical form.
/// Returns `None` for strings that do not parse as a version at all.
pub fn canonical(version: &str) -> Option<String> {
  let rest = version.strip_prefix('v')?;
  let parsed = semver::Version::parse(rest).ok()?;
  let mut out = format!("v{}.{}.{}", parsed.major, parsed.minor, parsed.patch);
  if !parsed.pre.is_empty() {
    out.push('-');
    out.push_str(parsed.pre.as_str());
  }
  Some(out)
}

/// Whether `version` is already in canonical form.
///
/// Every endpoint except metadata requires this to hold for the requested
/// version; violating inputs are rejected, never silently corrected.
pub fn is_canonical(version: &str) -> bool {
  canonical(version).as_deref() == Some(version)
}
