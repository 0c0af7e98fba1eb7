//! Refs module - AsciiDoc anchors and cross-references
//!
//! Provides:
//! - classify: comment-aware line classification
//! - anchors: anchor declarations in a line
//! - references: internal and external references in a line
//! - scan: per-document scanning into a context
//! - validate: internal and concurrent external resolution
//! - api: per-document check, batch check, list

pub mod anchors;
pub mod api;
pub mod classify;
pub mod references;
pub mod scan;
pub mod validate;
