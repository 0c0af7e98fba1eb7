//! Path normalization utilities
//!
//! Display names always use '/' as separator. Reference targets are resolved
//! lexically against a document directory; the filesystem is not consulted.

use std::path::{Component, Path, PathBuf};

/// Normalize a path to use '/' as separator (for cross-platform consistency)
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Make a path relative to a base directory
pub fn make_relative(path: &Path, base: &Path) -> Option<String> {
    path.strip_prefix(base).ok().map(normalize_path)
}

/// Display name for a document: relative to `base` when possible
pub fn display_name(path: &Path, base: Option<&Path>) -> String {
    base.and_then(|b| make_relative(path, b))
        .filter(|rel| !rel.is_empty())
        .unwrap_or_else(|| normalize_path(path))
}

/// Collapse `.` and `..` components lexically.
///
/// `..` removes the preceding normal component; at the root it is dropped.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match cleaned.components().next_back() {
                Some(Component::Normal(_)) => {
                    cleaned.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => cleaned.push(".."),
            },
            other => cleaned.push(other.as_os_str()),
        }
    }
    cleaned
}

/// Absolute form of a path with `..` collapsed, without touching the filesystem
pub fn absolutize(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    clean_path(&absolute)
}

/// Resolve a '/'-separated relative target against a directory.
///
/// `..` climbs one parent per segment, `.` and empty segments are ignored and a
/// leading '/' is relative to `dir`. A `..` that would climb above the root
/// makes the target malformed: the remaining segments are joined onto `dir`.
pub fn resolve_relative(dir: &Path, target: &str) -> PathBuf {
    let segments: Vec<&str> = target
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect();

    let mut resolved = dir.to_path_buf();
    for (i, segment) in segments.iter().enumerate() {
        if *segment == ".." {
            if !resolved.pop() {
                return segments[i..]
                    .iter()
                    .filter(|s| **s != "..")
                    .fold(dir.to_path_buf(), |acc, s| acc.join(s));
            }
        } else {
            resolved.push(segment);
        }
    }

    resolved
}
