//! Stable identifiers for serialized documents.

pub const SCHEMA_EVALUATION_LOG_V1: &str = "gemara.evaluation-log.v1";
pub const SCHEMA_CONFIG_V1: &str = "gemara.config.v1";

/// Author name used when the caller does not supply one.
pub const DEFAULT_AUTHOR: &str = "gemara";
