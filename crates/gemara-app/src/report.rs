use anyhow::Context;
use camino::Utf8Path;
use gemara_types::EvaluationLog;
use gemara_types::ids::SCHEMA_EVALUATION_LOG_V1;

/// On-disk encoding of an evaluation log.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Yaml,
}

impl ReportFormat {
    /// Pick the format from the file extension (`.json`, `.yaml`, `.yml`).
    pub fn from_path(path: &Utf8Path) -> anyhow::Result<Self> {
        match path.extension() {
            Some("json") => Ok(ReportFormat::Json),
            Some("yaml" | "yml") => Ok(ReportFormat::Yaml),
            Some(other) => anyhow::bail!("unsupported log extension: .{other} (expected json|yaml|yml)"),
            None => anyhow::bail!("cannot infer log format for {path}: no extension"),
        }
    }
}

pub fn serialize_log(log: &EvaluationLog, format: ReportFormat) -> anyhow::Result<String> {
    match format {
        ReportFormat::Json => serde_json::to_string_pretty(log).context("serialize json log"),
        ReportFormat::Yaml => serde_yaml::to_string(log).context("serialize yaml log"),
    }
}

pub fn parse_log(text: &str, format: ReportFormat) -> anyhow::Result<EvaluationLog> {
    let log: EvaluationLog = match format {
        ReportFormat::Json => serde_json::from_str(text).context("parse json log")?,
        ReportFormat::Yaml => serde_yaml::from_str(text).context("parse yaml log")?,
    };

    if log.schema != SCHEMA_EVALUATION_LOG_V1 {
        anyhow::bail!(
            "unknown log schema: {} (expected {SCHEMA_EVALUATION_LOG_V1})",
            log.schema
        );
    }
    Ok(log)
}

/// Serialize `log` to `path`, creating parent directories as needed.
pub fn write_log(path: &Utf8Path, log: &EvaluationLog) -> anyhow::Result<()> {
    let format = ReportFormat::from_path(path)?;
    let text = serialize_log(log, format)?;
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
    }
    std::fs::write(path, text).with_context(|| format!("write {path}"))?;
    tracing::info!(%path, "wrote evaluation log");
    Ok(())
}

pub fn read_log(path: &Utf8Path) -> anyhow::Result<EvaluationLog> {
    let format = ReportFormat::from_path(path)?;
    let text = std::fs::read_to_string(path).with_context(|| format!("read {path}"))?;
    parse_log(&text, format).with_context(|| format!("parse {path}"))
}
