//! Document scanning
//!
//! A single sequential pass over a document's lines. All state lives in a
//! `DocumentContext` owned by that pass; nothing carries over between
//! documents.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::config::CheckConfig;
use crate::core::error::CheckError;
use crate::core::model::Diagnostic;
use crate::core::paths::{absolutize, display_name};
use crate::core::sink::ReportSink;
use crate::core::source::open_lines;
use crate::refs::anchors::extract_anchors;
use crate::refs::classify::{LineAction, LineState};
use crate::refs::references::{ExternalRef, Reference, ReferenceExtractor};

/// Anchors declared in one document; the first declaration wins
#[derive(Debug, Clone, Default)]
pub struct AnchorTable {
    names: HashSet<String>,
}

impl AnchorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a name; returns false (and leaves the table unchanged) on a duplicate
    pub fn insert(&mut self, name: &str) -> bool {
        if self.names.contains(name) {
            return false;
        }
        self.names.insert(name.to_string())
    }

    #[allow(dead_code)]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn as_set(&self) -> &HashSet<String> {
        &self.names
    }

    /// Names in sorted order
    pub fn sorted(&self) -> Vec<String> {
        let mut names: Vec<String> = self.names.iter().cloned().collect();
        names.sort();
        names
    }
}

/// Per-document scan state
#[derive(Debug, Clone)]
pub struct DocumentContext {
    /// Absolute path of the document
    pub path: PathBuf,

    /// Directory containing the document
    pub dir: PathBuf,

    /// Name used in diagnostics
    pub display_name: String,

    state: LineState,

    pub anchors: AnchorTable,

    pub internal_refs: Vec<String>,

    pub external_refs: Vec<ExternalRef>,
}

impl DocumentContext {
    pub fn new(path: &Path, base: Option<&Path>) -> Self {
        let display = display_name(path, base);
        let path = absolutize(path);
        let dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("/"));

        Self {
            path,
            dir,
            display_name: display,
            state: LineState::Normal,
            anchors: AnchorTable::new(),
            internal_refs: Vec::new(),
            external_refs: Vec::new(),
        }
    }

    /// Current comment state
    #[allow(dead_code)]
    pub fn state(&self) -> LineState {
        self.state
    }

    /// Register a declared anchor, reporting duplicates
    pub fn register_anchor(&mut self, name: &str, sink: &mut impl ReportSink) -> bool {
        if self.anchors.insert(name) {
            return true;
        }

        let error = CheckError::DuplicateAnchor {
            document: self.display_name.clone(),
            anchor: name.to_string(),
        };
        sink.emit(Diagnostic::from_error(&self.display_name, &error));
        false
    }

    /// Feed one raw line: anchors first, then references
    pub fn scan_line(&mut self, line: &str, extension: &str, sink: &mut impl ReportSink) {
        let (state, action) = self.state.classify(line);
        self.state = state;
        if action == LineAction::Skip {
            return;
        }

        for name in extract_anchors(line) {
            self.register_anchor(&name, sink);
        }

        let extractor = ReferenceExtractor::new(&self.path, &self.dir, extension);
        for reference in extractor.extract(line) {
            match reference {
                Reference::Internal(name) => self.internal_refs.push(name),
                Reference::External(target) => self.external_refs.push(target),
            }
        }
    }

    /// Feed a whole line stream; stops at the first read error
    pub fn scan_lines<I>(&mut self, lines: I, extension: &str, sink: &mut impl ReportSink) -> io::Result<()>
    where
        I: IntoIterator<Item = io::Result<String>>,
    {
        for line in lines {
            self.scan_line(&line?, extension, sink);
        }
        Ok(())
    }
}

/// Result of scanning one document
#[derive(Debug, Clone)]
pub struct ScanOutput {
    pub context: DocumentContext,
    /// Diagnostics raised while scanning (duplicate anchors)
    pub diagnostics: Vec<Diagnostic>,
}

/// Scan a document from disk.
///
/// A document that cannot be opened or read yields a single
/// `SourceReadFailure` and no partial results.
pub fn scan_document(
    path: &Path,
    base: Option<&Path>,
    config: &CheckConfig,
) -> Result<ScanOutput, CheckError> {
    let mut context = DocumentContext::new(path, base);
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    let read_failure = |source: io::Error| CheckError::SourceReadFailure {
        document: display_name(path, base),
        source,
    };

    let mut lines = open_lines(&context.path).map_err(read_failure)?;
    context
        .scan_lines(&mut lines, &config.extension, &mut diagnostics)
        .map_err(read_failure)?;

    if lines.lossy_lines() > 0 {
        debug!(
            document = %context.display_name,
            lines = lines.lossy_lines(),
            "invalid UTF-8 replaced"
        );
    }

    debug!(
        document = %context.display_name,
        anchors = context.anchors.len(),
        internal = context.internal_refs.len(),
        external = context.external_refs.len(),
        duplicates = diagnostics.len(),
        "scanned document"
    );

    Ok(ScanOutput {
        context,
        diagnostics,
    })
}
