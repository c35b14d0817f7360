//! Report generation for load run results
//!
//! This crate provides report generators for:
//!
//! - Plain text summaries for the terminal
//! - JSON summaries written to disk

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod json_export;
pub mod text;

pub use json_export::JsonExporter;
pub use text::{TextReport, RULE_WIDTH};
