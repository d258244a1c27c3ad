//! Path normalization.
//!
//! # Responsibilities
//! - Canonicalize raw request paths before lookup (read side)
//! - Guarantee a leading slash before storage (write side)
//!
//! # Design Decisions
//! - Blank input maps to the root path, never to an error
//! - Only separators are touched; segment content is not validated
//! - Sentinel keys are plain constants, not patterns

use std::fmt;
use std::ops::Deref;

/// Root path, also the target of blank input.
pub const MAPPING_ROOT: &str = "/";

/// Reserved key of the error handler.
pub const MAPPING_ERROR: &str = "/_error";

/// Catch-all key. A literal registry key, never produced by [`normalize`].
pub const MAPPING_ALL: &str = "/*";

/// A path that went through the read-side rule.
///
/// Starts with `/` and is free of runs of two or more `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPath(String);

impl NormalizedPath {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for NormalizedPath {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read-side rule: blank becomes `/`, otherwise trim, ensure a leading `/`
/// and collapse repeated `/`.
pub fn normalize(raw: &str) -> NormalizedPath {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return NormalizedPath(MAPPING_ROOT.to_string());
    }

    let mut out = String::with_capacity(trimmed.len() + 1);
    let mut prev_slash = false;
    for c in ensure_leading_slash(trimmed).chars() {
        if c == '/' {
            if prev_slash {
                continue;
            }
            prev_slash = true;
        } else {
            prev_slash = false;
        }
        out.push(c);
    }
    NormalizedPath(out)
}

/// Write-side rule: prepend `/` when the caller omitted it.
pub fn ensure_leading_slash(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

/// Storage key for a registration under `prefix`.
///
/// The joined key obeys the same rule as lookups, so a prefix with a trailing
/// or missing `/` still yields a reachable key.
pub fn storage_key(prefix: &str, raw: &str) -> String {
    let path = normalize(raw);
    normalize(&format!("{}{}", prefix, path)).as_str().to_string()
}
