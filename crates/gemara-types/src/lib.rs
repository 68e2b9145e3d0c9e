//! Stable DTOs and IDs used across the gemara workspace.
//!
//! This crate is intentionally boring:
//! - the closed vocabularies an assessment produces (verdict, confidence, strategy)
//! - their canonical string forms, shared by JSON and YAML
//! - exporter-facing records of finished assessments
//! - stable schema identifiers

#![forbid(unsafe_code)]

pub mod confidence;
pub mod ids;
pub mod record;
pub mod strategy;
pub mod verdict;

pub use confidence::ConfidenceLevel;
pub use record::{AssessmentRecord, Author, ControlEvaluationRecord, EvaluationLog, Metadata};
pub use strategy::ResolutionStrategy;
pub use verdict::{ParseEnumError, Verdict};
