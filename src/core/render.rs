//! Renderer module
//!
//! Renders check reports and scan summaries to: text, jsonl, json, md

use colored::Colorize;
use serde::Serialize;

use crate::core::model::{Diagnostic, ReportSet, ScanSummary, Severity};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Jsonl,
    Json,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
    /// Colorize severity tags in text output
    pub color: bool,
    /// Only errors in text/md output
    pub quiet: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new(OutputFormat::default())
    }
}

impl RenderConfig {
    /// Create a new render config with default options
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            pretty: false,
            color: true,
            quiet: false,
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }
}

/// Renderer for reports
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    #[allow(dead_code)]
    pub fn new(format: OutputFormat) -> Self {
        Self {
            config: RenderConfig::new(format),
        }
    }

    /// Create a new renderer with render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render check reports to a string
    pub fn render(&self, reports: &ReportSet) -> String {
        match self.config.format {
            OutputFormat::Text => self.render_text(reports),
            OutputFormat::Jsonl => {
                let diagnostics: Vec<&Diagnostic> = reports
                    .reports
                    .iter()
                    .flat_map(|r| r.diagnostics.iter())
                    .collect();
                self.render_jsonl(&diagnostics)
            }
            OutputFormat::Json => self.render_json(reports.reports.as_slice()),
            OutputFormat::Markdown => self.render_markdown(reports),
        }
    }

    /// Render scan summaries (`list`) to a string
    pub fn render_scans(&self, summaries: &[ScanSummary]) -> String {
        match self.config.format {
            OutputFormat::Text => self.render_scans_text(summaries),
            OutputFormat::Jsonl => self.render_jsonl(summaries),
            OutputFormat::Json => self.render_json(summaries),
            OutputFormat::Markdown => self.render_scans_markdown(summaries),
        }
    }

    /// Render as JSON Lines (one JSON object per line)
    fn render_jsonl<T: Serialize>(&self, items: &[T]) -> String {
        items
            .iter()
            .filter_map(|item| {
                if self.config.pretty {
                    serde_json::to_string_pretty(item).ok()
                } else {
                    serde_json::to_string(item).ok()
                }
            })
            .collect::<Vec<_>>()
            .join(if self.config.pretty { "\n\n" } else { "\n" })
    }

    /// Render as a single JSON array
    fn render_json<T: Serialize>(&self, items: &[T]) -> String {
        if self.config.pretty {
            serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string())
        } else {
            serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
        }
    }

    fn tag(&self, severity: Severity) -> String {
        let tag = match severity {
            Severity::Success => "[OK]",
            Severity::Error => "[ERROR]",
            Severity::Info => "[INFO]",
        };
        if !self.config.color {
            return tag.to_string();
        }
        match severity {
            Severity::Success => tag.green().to_string(),
            Severity::Error => tag.red().bold().to_string(),
            Severity::Info => tag.cyan().to_string(),
        }
    }

    fn visible<'a>(&self, diagnostics: &'a [Diagnostic]) -> impl Iterator<Item = &'a Diagnostic> {
        let quiet = self.config.quiet;
        diagnostics.iter().filter(move |d| !quiet || d.is_error())
    }

    /// One line per message, then a summary
    fn render_text(&self, reports: &ReportSet) -> String {
        let mut lines = Vec::new();

        for report in &reports.reports {
            for d in self.visible(&report.diagnostics) {
                lines.push(format!("{} {}: {}", self.tag(d.severity), report.document, d.message));
            }
        }

        if !self.config.quiet {
            lines.push(format!(
                "Checked {} document(s): {} passed, {} failed.",
                reports.len(),
                reports.passed(),
                reports.failed()
            ));
        }

        lines.join("\n")
    }

    /// Render as Markdown, one section per document
    fn render_markdown(&self, reports: &ReportSet) -> String {
        let mut output = String::new();

        for report in &reports.reports {
            let verdict = if report.ok { "passed" } else { "failed" };
            output.push_str(&format!("## `{}` ({})\n\n", report.document, verdict));

            for d in self.visible(&report.diagnostics) {
                let severity = match d.severity {
                    Severity::Success => "OK",
                    Severity::Error => "ERROR",
                    Severity::Info => "INFO",
                };
                output.push_str(&format!(
                    "- **{}** `{}`: {}\n",
                    severity,
                    d.code.as_str(),
                    d.message
                ));
            }
            output.push('\n');
        }

        output
    }

    fn render_scans_text(&self, summaries: &[ScanSummary]) -> String {
        let mut output = String::new();

        for summary in summaries {
            output.push_str(&summary.document);
            output.push('\n');
            for (label, items) in [
                ("anchors", &summary.anchors),
                ("internal", &summary.internal),
                ("external", &summary.external),
            ] {
                output.push_str(&format!("  {} ({}):", label, items.len()));
                for item in items {
                    output.push_str(&format!("\n    {}", item));
                }
                output.push('\n');
            }
            for d in &summary.diagnostics {
                output.push_str(&format!("  {} {}\n", self.tag(d.severity), d.message));
            }
        }

        output.trim_end().to_string()
    }

    fn render_scans_markdown(&self, summaries: &[ScanSummary]) -> String {
        let mut output = String::new();

        for summary in summaries {
            output.push_str(&format!("## `{}`\n\n", summary.document));
            for (label, items) in [
                ("Anchors", &summary.anchors),
                ("Internal references", &summary.internal),
                ("External references", &summary.external),
            ] {
                if items.is_empty() {
                    continue;
                }
                output.push_str(&format!("### {}\n\n", label));
                for item in items {
                    output.push_str(&format!("- `{}`\n", item));
                }
                output.push('\n');
            }
            for d in &summary.diagnostics {
                output.push_str(&format!("> {}\n\n", d.message));
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::CheckError;
    use crate::core::model::{Code, DocumentReport};

    fn sample() -> ReportSet {
        let mut good = DocumentReport::new("good.adoc");
        good.ok = true;
        good.push(Diagnostic::success(Code::InternalOk, "good.adoc", "All internal references are `OK`."));

        let mut bad = DocumentReport::new("bad.adoc");
        bad.push(Diagnostic::info(Code::NoInternal, "bad.adoc", "none"));
        bad.push(Diagnostic::from_error(
            "bad.adoc",
            &CheckError::UnresolvedExternalFile {
                file: "/d/x.adoc".to_string(),
            },
        ));

        vec![good, bad].into_iter().collect()
    }

    fn plain(format: OutputFormat) -> Renderer {
        Renderer::with_config(RenderConfig::new(format).with_color(false))
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("JSONL".parse::<OutputFormat>().unwrap(), OutputFormat::Jsonl);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("markdown".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert!("raw".parse::<OutputFormat>().unwrap_err().contains("Unknown format"));
    }

    #[test]
    fn test_render_config_default() {
        let config = RenderConfig::default();
        assert_eq!(config.format, OutputFormat::Text);
        assert!(!config.pretty);
        assert!(!config.quiet);
    }

    #[test]
    fn test_render_text() {
        let output = plain(OutputFormat::Text).render(&sample());
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "[OK] good.adoc: All internal references are `OK`.");
        assert_eq!(lines[1], "[INFO] bad.adoc: none");
        assert_eq!(lines[2], "[ERROR] bad.adoc: Cannot find the file: `/d/x.adoc`.");
        assert_eq!(lines[3], "Checked 2 document(s): 1 passed, 1 failed.");
    }

    #[test]
    fn test_render_text_quiet() {
        let renderer = Renderer::with_config(
            RenderConfig::new(OutputFormat::Text)
                .with_color(false)
                .with_quiet(true),
        );
        let output = renderer.render(&sample());
        assert_eq!(output.lines().count(), 1);
        assert!(output.starts_with("[ERROR]"));
    }

    #[test]
    fn test_render_jsonl() {
        let output = plain(OutputFormat::Jsonl).render(&sample());
        assert_eq!(output.lines().count(), 3);
        for line in output.lines() {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(value.get("code").is_some());
            assert!(value.get("document").is_some());
        }
    }

    #[test]
    fn test_render_json() {
        let output = plain(OutputFormat::Json).render(&sample());
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[0]["ok"], serde_json::Value::Bool(true));
    }

    #[test]
    fn test_render_json_pretty() {
        let renderer =
            Renderer::with_config(RenderConfig::new(OutputFormat::Json).with_pretty(true));
        assert!(renderer.render(&sample()).contains("  "));
    }

    #[test]
    fn test_render_markdown() {
        let output = plain(OutputFormat::Markdown).render(&sample());
        assert!(output.contains("## `good.adoc` (passed)"));
        assert!(output.contains("## `bad.adoc` (failed)"));
        assert!(output.contains("**ERROR** `UNRESOLVED_EXTERNAL_FILE`"));
    }

    #[test]
    fn test_render_markdown_empty() {
        let output = plain(OutputFormat::Markdown).render(&ReportSet::new());
        assert!(output.is_empty());
    }

    #[test]
    fn test_render_scans_text() {
        let summary = ScanSummary {
            document: "a.adoc".to_string(),
            anchors: vec!["x".to_string()],
            internal: vec![],
            external: vec!["/d/b.adoc#y".to_string()],
            diagnostics: vec![],
        };
        let output = plain(OutputFormat::Text).render_scans(&[summary]);
        assert!(output.starts_with("a.adoc\n"));
        assert!(output.contains("anchors (1):\n    x"));
        assert!(output.contains("internal (0):"));
        assert!(output.contains("/d/b.adoc#y"));
    }

    #[test]
    fn test_render_scans_jsonl() {
        let summary = ScanSummary {
            document: "a.adoc".to_string(),
            ..Default::default()
        };
        let output = plain(OutputFormat::Jsonl).render_scans(&[summary]);
        assert!(output.contains("\"document\":\"a.adoc\""));
        assert!(!output.contains("diagnostics"));
    }
}
