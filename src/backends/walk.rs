//! Document discovery
//!
//! Turns the paths given on the command line into a list of documents.
//! Directories are walked with the ignore crate and filtered to the document
//! extension; plain paths are taken as-is so that a missing file is still
//! reported by the check.

use ignore::WalkBuilder;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::warn;

/// A document to check plus the base path used for its display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentTarget {
    pub path: PathBuf,
    pub base: Option<PathBuf>,
}

/// Options for directory walks
#[derive(Debug, Clone, Copy)]
pub struct WalkOptions {
    pub hidden: bool,
    pub ignore: bool,
    pub max_depth: Option<usize>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            hidden: false,
            ignore: true,
            max_depth: None,
        }
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.len() > extension.len() && n.ends_with(extension))
        .unwrap_or(false)
}

/// Walk one directory for documents, sorted for stable output
pub fn walk_documents(dir: &Path, extension: &str, options: WalkOptions) -> Vec<PathBuf> {
    let mut builder = WalkBuilder::new(dir);
    builder
        .hidden(!options.hidden)
        .git_ignore(options.ignore)
        .git_global(options.ignore)
        .git_exclude(options.ignore)
        .ignore(options.ignore)
        .parents(options.ignore)
        .require_git(false);

    if let Some(depth) = options.max_depth {
        builder.max_depth(Some(depth));
    }

    let mut documents = Vec::new();
    for entry in builder.build() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };

        let path = entry.path();
        if path.is_file() && has_extension(path, extension) {
            documents.push(path.to_path_buf());
        }
    }

    documents.sort();
    documents
}

/// Expand command-line inputs into document targets.
///
/// Documents found under a directory are displayed relative to `base`, or to
/// that directory when no base was given.
pub fn collect_documents(
    inputs: &[PathBuf],
    base: Option<&Path>,
    extension: &str,
    options: WalkOptions,
) -> Vec<DocumentTarget> {
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut targets = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let dir_base = base.unwrap_or(input.as_path());
            for path in walk_documents(input, extension, options) {
                if seen.insert(path.clone()) {
                    targets.push(DocumentTarget {
                        path,
                        base: Some(dir_base.to_path_buf()),
                    });
                }
            }
        } else if seen.insert(input.clone()) {
            targets.push(DocumentTarget {
                path: input.clone(),
                base: base.map(Path::to_path_buf),
            });
        }
    }

    targets
}
