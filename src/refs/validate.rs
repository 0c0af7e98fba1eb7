//! Reference resolution
//!
//! Internal references are checked against the document's anchor table.
//! External references are deduplicated and each unique target is checked in
//! its own task; the aggregate verdict waits for every task.

use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::core::error::CheckError;
use crate::core::model::{Code, Diagnostic};
use crate::core::sink::ReportSink;
use crate::core::util::{difference, unique};
use crate::refs::references::ExternalRef;
use crate::refs::scan::AnchorTable;

pub const MSG_INTERNAL_OK: &str = "All internal references are `OK`.";
pub const MSG_NO_INTERNAL: &str = "This file does not have any internal references.";
pub const MSG_EXTERNAL_OK: &str = "All external references are `OK`.";
pub const MSG_NO_EXTERNAL: &str = "No external references found.";

/// Check internal references; returns true when all resolve
pub fn validate_internal(
    document: &str,
    internal_refs: &[String],
    anchors: &AnchorTable,
    sink: &mut impl ReportSink,
) -> bool {
    if internal_refs.is_empty() {
        sink.emit(Diagnostic::info(Code::NoInternal, document, MSG_NO_INTERNAL));
        return true;
    }

    let missing = difference(&unique(internal_refs), anchors.as_set());
    if missing.is_empty() {
        sink.emit(Diagnostic::success(Code::InternalOk, document, MSG_INTERNAL_OK));
        return true;
    }

    for anchor in missing {
        let error = CheckError::UnresolvedInternalReference {
            document: document.to_string(),
            anchor,
        };
        sink.emit(Diagnostic::from_error(document, &error));
    }
    false
}

/// Check one external target.
///
/// Without an anchor the file only has to exist. With an anchor the file must
/// be readable and contain the literal `[[anchor]]`.
pub async fn check_external(target: &ExternalRef) -> Result<(), CheckError> {
    let missing_file = || CheckError::UnresolvedExternalFile {
        file: target.file_display(),
    };

    let Some(anchor) = &target.anchor else {
        return match tokio::fs::metadata(&target.file).await {
            Ok(meta) if meta.is_file() => Ok(()),
            _ => Err(missing_file()),
        };
    };

    let bytes = tokio::fs::read(&target.file)
        .await
        .map_err(|_| missing_file())?;
    let content = String::from_utf8_lossy(&bytes);

    if content.contains(&format!("[[{}]]", anchor)) {
        Ok(())
    } else {
        Err(CheckError::UnresolvedExternalAnchor {
            file: target.file_display(),
            anchor: anchor.clone(),
        })
    }
}

/// Check external references concurrently; returns true when all resolve.
///
/// Per-target errors are emitted in first-reference order once every check
/// has finished, followed by the aggregate success message when nothing failed.
pub async fn validate_external(
    document: &str,
    external_refs: &[ExternalRef],
    jobs: Option<usize>,
    sink: &mut impl ReportSink,
) -> bool {
    let targets = unique(external_refs);
    if targets.is_empty() {
        sink.emit(Diagnostic::info(Code::NoExternal, document, MSG_NO_EXTERNAL));
        return true;
    }

    debug!(document, targets = targets.len(), "checking external references");

    let limiter = jobs.map(|n| Arc::new(Semaphore::new(n.max(1))));
    let mut tasks = JoinSet::new();
    for (index, target) in targets.iter().cloned().enumerate() {
        let limiter = limiter.clone();
        tasks.spawn(async move {
            let _permit = match limiter {
                Some(semaphore) => semaphore.acquire_owned().await.ok(),
                None => None,
            };
            (index, check_external(&target).await)
        });
    }

    let mut outcomes: Vec<Option<Result<(), CheckError>>> =
        targets.iter().map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, outcome)) => outcomes[index] = Some(outcome),
            Err(e) => warn!(document, error = %e, "external check task failed"),
        }
    }

    let mut all_ok = true;
    for (target, outcome) in targets.iter().zip(outcomes) {
        let error = match outcome {
            Some(Ok(())) => {
                debug!(document, target = %target, "external reference resolved");
                continue;
            }
            Some(Err(e)) => e,
            // The task died before reporting; treat the target as unreachable
            None => CheckError::UnresolvedExternalFile {
                file: target.file_display(),
            },
        };
        all_ok = false;
        sink.emit(Diagnostic::from_error(document, &error));
    }

    if all_ok {
        sink.emit(Diagnostic::success(Code::ExternalOk, document, MSG_EXTERNAL_OK));
    }
    all_ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::tempdir;

    fn table(names: &[&str]) -> AnchorTable {
        let mut table = AnchorTable::new();
        for name in names {
            table.insert(name);
        }
        table
    }

    fn refs(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn ext(file: &Path, anchor: Option<&str>) -> ExternalRef {
        ExternalRef {
            file: PathBuf::from(file),
            anchor: anchor.map(str::to_string),
        }
    }

    #[test]
    fn test_internal_none() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        assert!(validate_internal("a.adoc", &[], &table(&[]), &mut sink));
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].code, Code::NoInternal);
        assert_eq!(sink[0].message, MSG_NO_INTERNAL);
    }

    #[test]
    fn test_internal_all_resolved() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        assert!(validate_internal("a.adoc", &refs(&["a", "a"]), &table(&["a"]), &mut sink));
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].code, Code::InternalOk);
    }

    #[test]
    fn test_internal_missing_reported_once_each() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        let ok = validate_internal(
            "a.adoc",
            &refs(&["b", "a", "b", "c"]),
            &table(&["a"]),
            &mut sink,
        );
        assert!(!ok);
        let targets: Vec<_> = sink.iter().filter_map(|d| d.target.clone()).collect();
        assert_eq!(targets, vec!["b", "c"]);
        assert!(sink.iter().all(|d| d.code == Code::UnresolvedInternal));
        assert_eq!(sink[0].message, "Cannot find anchor: `b` in a.adoc.");
    }

    #[tokio::test]
    async fn test_external_none() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        assert!(validate_external("a.adoc", &[], None, &mut sink).await);
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].code, Code::NoExternal);
    }

    #[tokio::test]
    async fn test_check_file_exists() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("other.adoc");
        fs::write(&file, "= Other\n").unwrap();

        assert!(check_external(&ext(&file, None)).await.is_ok());
        let missing = check_external(&ext(&temp.path().join("nope.adoc"), None))
            .await
            .unwrap_err();
        assert_eq!(missing.code(), Code::UnresolvedExternalFile);
    }

    #[tokio::test]
    async fn test_check_directory_is_not_a_file() {
        let temp = tempdir().unwrap();
        let err = check_external(&ext(temp.path(), None)).await.unwrap_err();
        assert_eq!(err.code(), Code::UnresolvedExternalFile);
    }

    #[tokio::test]
    async fn test_check_anchor_substring() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("other.adoc");
        fs::write(&file, "[[sec1]]\n== Section\n[#inline]\n").unwrap();

        assert!(check_external(&ext(&file, Some("sec1"))).await.is_ok());

        let err = check_external(&ext(&file, Some("expectedAnchor")))
            .await
            .unwrap_err();
        assert_eq!(err.code(), Code::UnresolvedExternalAnchor);
        assert!(err.to_string().contains("expectedAnchor"));
        assert!(err.to_string().contains("other.adoc"));

        // only the literal [[name]] form counts in the target
        assert!(check_external(&ext(&file, Some("inline"))).await.is_err());
    }

    #[tokio::test]
    async fn test_check_anchor_in_missing_file() {
        let temp = tempdir().unwrap();
        let err = check_external(&ext(&temp.path().join("gone.adoc"), Some("a")))
            .await
            .unwrap_err();
        assert_eq!(err.code(), Code::UnresolvedExternalFile);
    }

    #[tokio::test]
    async fn test_external_dedup_and_aggregate() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("other.adoc");
        fs::write(&file, "[[a]]\n").unwrap();

        let target = ext(&file, Some("a"));
        let mut sink: Vec<Diagnostic> = Vec::new();
        let ok = validate_external("main.adoc", &[target.clone(), target], None, &mut sink).await;
        assert!(ok);
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].code, Code::ExternalOk);
        assert_eq!(sink[0].message, MSG_EXTERNAL_OK);
    }

    #[tokio::test]
    async fn test_external_partial_failure_suppresses_aggregate() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("other.adoc");
        fs::write(&file, "[[a]]\n").unwrap();

        let targets = vec![
            ext(&file, Some("a")),
            ext(&file, Some("missing")),
            ext(&temp.path().join("gone.adoc"), None),
        ];
        let mut sink: Vec<Diagnostic> = Vec::new();
        let ok = validate_external("main.adoc", &targets, Some(2), &mut sink).await;
        assert!(!ok);
        assert_eq!(sink.len(), 2);
        assert_eq!(sink[0].code, Code::UnresolvedExternalAnchor);
        assert_eq!(sink[1].code, Code::UnresolvedExternalFile);
        assert!(sink.iter().all(|d| d.code != Code::ExternalOk));
    }

    #[tokio::test]
    async fn test_external_many_targets_with_limit() {
        let temp = tempdir().unwrap();
        let mut targets = Vec::new();
        for i in 0..20 {
            let file = temp.path().join(format!("doc{}.adoc", i));
            let anchor = format!("a{}", i);
            fs::write(&file, format!("[[{}]]\n", anchor)).unwrap();
            targets.push(ext(&file, Some(anchor.as_str())));
        }

        let mut sink: Vec<Diagnostic> = Vec::new();
        assert!(validate_external("main.adoc", &targets, Some(3), &mut sink).await);
        assert_eq!(sink.len(), 1);
    }
}
