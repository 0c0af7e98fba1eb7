//! Unified Result Model
//!
//! Every check (scan, internal, external) maps its outcome to a `Diagnostic`
//! before it reaches a sink or a renderer.

use serde::{Deserialize, Serialize};

use crate::core::error::CheckError;

/// Severity of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Info,
}

/// Stable machine-readable diagnostic code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Code {
    DuplicateAnchor,
    UnresolvedInternal,
    UnresolvedExternalFile,
    UnresolvedExternalAnchor,
    SourceReadFailure,
    InternalOk,
    NoInternal,
    ExternalOk,
    NoExternal,
}

impl Code {
    pub fn as_str(&self) -> &'static str {
        match self {
            Code::DuplicateAnchor => "DUPLICATE_ANCHOR",
            Code::UnresolvedInternal => "UNRESOLVED_INTERNAL",
            Code::UnresolvedExternalFile => "UNRESOLVED_EXTERNAL_FILE",
            Code::UnresolvedExternalAnchor => "UNRESOLVED_EXTERNAL_ANCHOR",
            Code::SourceReadFailure => "SOURCE_READ_FAILURE",
            Code::InternalOk => "INTERNAL_OK",
            Code::NoInternal => "NO_INTERNAL",
            Code::ExternalOk => "EXTERNAL_OK",
            Code::NoExternal => "NO_EXTERNAL",
        }
    }
}

/// One message for the reporting sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,

    pub code: Code,

    /// Human-readable message; the wording is stable
    pub message: String,

    /// Display name of the document that produced this diagnostic
    pub document: String,

    /// Anchor name or file the diagnostic is about
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    /// Whether a UI should keep the message until dismissed
    #[serde(default)]
    pub dismissable: bool,
}

impl Diagnostic {
    /// Create a success diagnostic
    pub fn success(code: Code, document: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            code,
            message: message.into(),
            document: document.into(),
            target: None,
            dismissable: false,
        }
    }

    /// Create an informational diagnostic
    pub fn info(code: Code, document: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            code,
            message: message.into(),
            document: document.into(),
            target: None,
            dismissable: false,
        }
    }

    /// Create an error diagnostic from a check failure
    pub fn from_error(document: impl Into<String>, error: &CheckError) -> Self {
        Self {
            severity: Severity::Error,
            code: error.code(),
            message: error.to_string(),
            document: document.into(),
            target: error.target(),
            dismissable: true,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// All diagnostics for one document plus its aggregate outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentReport {
    /// Display name (relative to the base path when one was given)
    pub document: String,

    /// True iff the document was read and every reference resolved
    pub ok: bool,

    pub diagnostics: Vec<Diagnostic>,
}

impl DocumentReport {
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            ok: false,
            diagnostics: Vec::new(),
        }
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(diagnostics);
    }

    /// Number of error diagnostics
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    /// Diagnostics carrying the given code
    #[allow(dead_code)]
    pub fn with_code(&self, code: Code) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.code == code)
    }
}

/// Reports for every document of one run, in input order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportSet {
    pub reports: Vec<DocumentReport>,
}

impl ReportSet {
    pub fn new() -> Self {
        Self {
            reports: Vec::new(),
        }
    }

    pub fn push(&mut self, report: DocumentReport) {
        self.reports.push(report);
    }

    pub fn passed(&self) -> usize {
        self.reports.iter().filter(|r| r.ok).count()
    }

    pub fn failed(&self) -> usize {
        self.reports.len() - self.passed()
    }

    /// Aggregate outcome of the whole run
    pub fn all_ok(&self) -> bool {
        self.reports.iter().all(|r| r.ok)
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

impl FromIterator<DocumentReport> for ReportSet {
    fn from_iter<T: IntoIterator<Item = DocumentReport>>(iter: T) -> Self {
        Self {
            reports: iter.into_iter().collect(),
        }
    }
}

/// Anchors and references found in one document, for `refcheck list`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanSummary {
    pub document: String,
    pub anchors: Vec<String>,
    pub internal: Vec<String>,
    pub external: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}
