//! Check configuration

use serde::{Deserialize, Serialize};

/// Default document extension
pub const DEFAULT_EXTENSION: &str = ".adoc";

/// Configuration shared by every document check in one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Document file extension, including the leading dot
    pub extension: String,

    /// Maximum concurrent external checks per document (None = unbounded)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jobs: Option<usize>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            jobs: None,
        }
    }
}

impl CheckConfig {
    /// Build a config, normalizing the extension to start with '.'
    pub fn new(extension: &str, jobs: Option<usize>) -> Self {
        let extension = if extension.is_empty() {
            DEFAULT_EXTENSION.to_string()
        } else if extension.starts_with('.') {
            extension.to_string()
        } else {
            format!(".{}", extension)
        };

        Self {
            extension,
            jobs: jobs.filter(|n| *n > 0),
        }
    }
}
