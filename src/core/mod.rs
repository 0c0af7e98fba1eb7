//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - Unified report model (Diagnostic, DocumentReport)
//! - Error taxonomy for check failures
//! - Rendering functions for different output formats
//! - Path normalization and reference path resolution
//! - Line source with lossy decoding

pub mod config;
pub mod error;
pub mod model;
pub mod paths;
pub mod render;
pub mod sink;
pub mod source;
pub mod util;
