//! Reference check API - per-document entry point, batch check, list

use anyhow::{bail, Result};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use crate::backends::walk::{collect_documents, DocumentTarget, WalkOptions};
use crate::core::config::CheckConfig;
use crate::core::error::CheckError;
use crate::core::model::{Code, Diagnostic, DocumentReport, ReportSet, ScanSummary};
use crate::core::paths::display_name;
use crate::core::render::{RenderConfig, Renderer};
use crate::core::sink::ReportSink;
use crate::core::util::unique;
use crate::refs::scan::{scan_document, ScanOutput};
use crate::refs::validate::{validate_external, validate_internal};

fn failed_report(document: &str, error: &CheckError) -> DocumentReport {
    let mut report = DocumentReport::new(document);
    report.emit(Diagnostic::from_error(document, error));
    report
}

/// Run `scan_document` on the blocking pool
async fn scan_blocking(
    path: &Path,
    base: Option<&Path>,
    config: &CheckConfig,
) -> Result<ScanOutput, CheckError> {
    let document = display_name(path, base);
    let path = path.to_path_buf();
    let base = base.map(Path::to_path_buf);
    let config = config.clone();

    tokio::task::spawn_blocking(move || scan_document(&path, base.as_deref(), &config))
        .await
        .unwrap_or_else(|join| {
            Err(CheckError::SourceReadFailure {
                document,
                source: io::Error::other(join),
            })
        })
}

/// Scan one document and validate every reference in it.
///
/// Never fails: an unreadable document produces a report holding a single
/// `SourceReadFailure` diagnostic.
pub async fn scan_and_validate(
    path: &Path,
    base: Option<&Path>,
    config: &CheckConfig,
) -> DocumentReport {
    let document = display_name(path, base);

    let output = match scan_blocking(path, base, config).await {
        Ok(output) => output,
        Err(error) => {
            warn!(document = %document, error = %error, "cannot scan document");
            return failed_report(&document, &error);
        }
    };

    let mut report = DocumentReport::new(&document);
    report.extend(output.diagnostics);

    let ctx = output.context;
    let internal_ok = validate_internal(&document, &ctx.internal_refs, &ctx.anchors, &mut report);
    let external_ok =
        validate_external(&document, &ctx.external_refs, config.jobs, &mut report).await;

    report.ok = internal_ok && external_ok;
    info!(
        document = %document,
        ok = report.ok,
        errors = report.error_count(),
        "checked document"
    );
    report
}

/// Check many documents concurrently, one independent task each.
///
/// Reports come back in input order.
pub async fn check_documents(targets: Vec<DocumentTarget>, config: &CheckConfig) -> ReportSet {
    let config = Arc::new(config.clone());

    let handles: Vec<_> = targets
        .into_iter()
        .map(|target| {
            let config = Arc::clone(&config);
            let document = display_name(&target.path, target.base.as_deref());
            let handle = tokio::spawn(async move {
                scan_and_validate(&target.path, target.base.as_deref(), &config).await
            });
            (document, handle)
        })
        .collect();

    let mut reports = ReportSet::new();
    for (document, handle) in handles {
        match handle.await {
            Ok(report) => reports.push(report),
            Err(e) => {
                warn!(document = %document, error = %e, "document task failed");
                let error = CheckError::SourceReadFailure {
                    document: document.clone(),
                    source: io::Error::other(e),
                };
                reports.push(failed_report(&document, &error));
            }
        }
    }
    reports
}

/// Collect the anchors and references of one document without validating
pub async fn summarize_document(
    path: &Path,
    base: Option<&Path>,
    config: &CheckConfig,
) -> ScanSummary {
    let document = display_name(path, base);

    match scan_blocking(path, base, config).await {
        Ok(output) => {
            let ctx = output.context;
            ScanSummary {
                document,
                anchors: ctx.anchors.sorted(),
                internal: unique(&ctx.internal_refs),
                external: unique(&ctx.external_refs)
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
                diagnostics: output.diagnostics,
            }
        }
        Err(error) => ScanSummary {
            diagnostics: vec![Diagnostic::from_error(&document, &error)],
            document,
            ..Default::default()
        },
    }
}

/// Run the check command; returns the aggregate outcome
pub async fn run_check(
    inputs: &[PathBuf],
    base: Option<&Path>,
    options: WalkOptions,
    config: &CheckConfig,
    render: RenderConfig,
) -> Result<bool> {
    let targets = collect_documents(inputs, base, &config.extension, options);
    if targets.is_empty() {
        bail!("No {} documents found in the given paths", config.extension);
    }

    let reports = check_documents(targets, config).await;

    let renderer = Renderer::with_config(render);
    println!("{}", renderer.render(&reports));

    Ok(reports.all_ok())
}

/// Run the list command; returns false if any document could not be read
pub async fn run_list(
    inputs: &[PathBuf],
    base: Option<&Path>,
    options: WalkOptions,
    config: &CheckConfig,
    render: RenderConfig,
) -> Result<bool> {
    let targets = collect_documents(inputs, base, &config.extension, options);
    if targets.is_empty() {
        bail!("No {} documents found in the given paths", config.extension);
    }

    let mut summaries: Vec<ScanSummary> = Vec::with_capacity(targets.len());
    for target in &targets {
        summaries.push(summarize_document(&target.path, target.base.as_deref(), config).await);
    }

    let renderer = Renderer::with_config(render);
    println!("{}", renderer.render_scans(&summaries));

    Ok(summaries
        .iter()
        .all(|s| s.diagnostics.iter().all(|d| d.code != Code::SourceReadFailure)))
}
