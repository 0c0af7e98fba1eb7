//! Check failures
//!
//! Every failure a scan or a check can produce. The `Display` text of each
//! variant is the message handed to the reporting sink.

use thiserror::Error;

use crate::core::model::Code;

#[derive(Debug, Error)]
pub enum CheckError {
    /// Same anchor declared twice in one document (first declaration wins)
    #[error("Duplicate anchor: `{anchor}` in {document}.")]
    DuplicateAnchor { document: String, anchor: String },

    #[error("Cannot find anchor: `{anchor}` in {document}.")]
    UnresolvedInternalReference { document: String, anchor: String },

    #[error("Cannot find the file: `{file}`.")]
    UnresolvedExternalFile { file: String },

    #[error("Cannot find the anchor: `{anchor}` in `{file}`.")]
    UnresolvedExternalAnchor { file: String, anchor: String },

    /// The scanned document itself could not be read
    #[error("Cannot read document `{document}`: {source}")]
    SourceReadFailure {
        document: String,
        #[source]
        source: std::io::Error,
    },
}

impl CheckError {
    pub fn code(&self) -> Code {
        match self {
            CheckError::DuplicateAnchor { .. } => Code::DuplicateAnchor,
            CheckError::UnresolvedInternalReference { .. } => Code::UnresolvedInternal,
            CheckError::UnresolvedExternalFile { .. } => Code::UnresolvedExternalFile,
            CheckError::UnresolvedExternalAnchor { .. } => Code::UnresolvedExternalAnchor,
            CheckError::SourceReadFailure { .. } => Code::SourceReadFailure,
        }
    }

    /// The anchor or file this failure is about
    pub fn target(&self) -> Option<String> {
        match self {
            CheckError::DuplicateAnchor { anchor, .. }
            | CheckError::UnresolvedInternalReference { anchor, .. } => Some(anchor.clone()),
            CheckError::UnresolvedExternalFile { file } => Some(file.clone()),
            CheckError::UnresolvedExternalAnchor { file, anchor } => {
                Some(format!("{}#{}", file, anchor))
            }
            CheckError::SourceReadFailure { .. } => None,
        }
    }
}
