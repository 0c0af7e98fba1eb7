//! Reporting sink
//!
//! The scanner and the validator never print; they hand diagnostics to a sink.

use crate::core::model::{Diagnostic, DocumentReport};

/// Receiver of diagnostics
pub trait ReportSink {
    fn emit(&mut self, diagnostic: Diagnostic);
}

impl ReportSink for Vec<Diagnostic> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

impl ReportSink for DocumentReport {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}
