//! Reference extraction and classification
//!
//! Recognized references:
//! - `<<target>>` / `<<target, label>>`
//! - `xref:target[label]`
//!
//! A target containing the document extension or a `#` points at another
//! document and is resolved to an absolute path; anything else is an anchor
//! in the current document.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::paths::{normalize_path, resolve_relative};
use crate::refs::anchors::strip_label;

/// Format: <<target>> or <<target, label>>
static ANGLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<<([^>]+)>>").expect("Invalid ANGLE_RE regex"));

/// Format: xref:target[label]
static XREF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"xref:([^\[]*)\[").expect("Invalid XREF_RE regex"));

/// Separator between a document and an anchor inside it
const ANCHOR_SEPARATOR: char = '#';

/// A reference to another document, optionally to an anchor in it
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExternalRef {
    /// Absolute path of the referenced document
    pub file: PathBuf,
    pub anchor: Option<String>,
}

impl ExternalRef {
    pub fn file_display(&self) -> String {
        normalize_path(&self.file)
    }
}

impl fmt::Display for ExternalRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.anchor {
            Some(anchor) => write!(f, "{}{}{}", self.file_display(), ANCHOR_SEPARATOR, anchor),
            None => write!(f, "{}", self.file_display()),
        }
    }
}

/// A classified reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    /// Anchor name in the scanning document
    Internal(String),
    External(ExternalRef),
}

/// Extracts references for one document
#[derive(Debug, Clone)]
pub struct ReferenceExtractor<'a> {
    /// Absolute path of the scanning document
    document: &'a Path,
    /// Directory containing the scanning document
    dir: &'a Path,
    /// Document extension, e.g. `.adoc`
    extension: &'a str,
}

impl<'a> ReferenceExtractor<'a> {
    pub fn new(document: &'a Path, dir: &'a Path, extension: &'a str) -> Self {
        Self {
            document,
            dir,
            extension,
        }
    }

    /// Extract all references on a line: `<<...>>` first, then `xref:`
    pub fn extract(&self, line: &str) -> Vec<Reference> {
        let angle = ANGLE_RE
            .captures_iter(line)
            .filter_map(|c| c.get(1))
            .map(|m| strip_label(m.as_str()));

        let xref = XREF_RE
            .captures_iter(line)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str().trim());

        angle
            .chain(xref)
            .filter(|target| !target.is_empty())
            .map(|target| self.classify(target))
            .collect()
    }

    /// Classify a label-stripped target as internal or external
    pub fn classify(&self, target: &str) -> Reference {
        if target.contains(self.extension) || target.contains(ANCHOR_SEPARATOR) {
            Reference::External(self.resolve(target))
        } else {
            Reference::Internal(target.to_string())
        }
    }

    /// Normalize to `<file><ext>#<anchor>` and resolve the file part.
    ///
    /// An empty file part (`#anchor`) is the scanning document itself; an
    /// empty anchor part (`file.adoc#`) means no anchor.
    pub fn resolve(&self, target: &str) -> ExternalRef {
        let (file, anchor) = match target.split_once(ANCHOR_SEPARATOR) {
            Some((file, anchor)) => (file.trim(), Some(anchor.trim())),
            None => (target, None),
        };

        let anchor = anchor.filter(|a| !a.is_empty()).map(str::to_string);

        if file.is_empty() {
            return ExternalRef {
                file: self.document.to_path_buf(),
                anchor,
            };
        }

        let file = if file.ends_with(self.extension) {
            resolve_relative(self.dir, file)
        } else {
            resolve_relative(self.dir, &format!("{}{}", file, self.extension))
        };

        ExternalRef { file, anchor }
    }
}
