//! Backends module - File system operations
//!
//! Provides:
//! - walk: Document discovery with the ignore crate

pub mod walk;
