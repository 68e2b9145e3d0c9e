//! Use case orchestration for gemara.
//!
//! This crate provides the application layer: use cases that coordinate the settings and domain
//! layers and move evaluation logs in and out of files. It is intentionally thin and delegates
//! heavy lifting to the appropriate layers.

#![forbid(unsafe_code)]

mod evaluate;
mod report;

pub use evaluate::{EvaluationInput, EvaluationOutput, run_evaluation};
pub use report::{ReportFormat, parse_log, read_log, serialize_log, write_log};
