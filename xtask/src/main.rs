//! Developer tasks (schema generation, contract conformance).
//!
//! Keeping this separate avoids bloating the library crates.

use anyhow::{Context, bail};
use camino::Utf8PathBuf;
use gemara_app::{EvaluationInput, ReportFormat, parse_log, read_log, run_evaluation, write_log};
use gemara_domain::{AssessmentLog, AssessmentStep, ControlEvaluation, StepOutcome};
use gemara_settings::Overrides;
use gemara_test_util::normalize_nondeterministic;
use gemara_types::{ConfidenceLevel, EvaluationLog, Verdict};
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the project root (parent of xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    match manifest_dir.parent() {
        Some(parent) => parent.to_path_buf(),
        None => manifest_dir,
    }
}

/// Get the schemas directory path.
fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

/// Get the contracts/fixtures directory path.
fn contracts_fixtures_dir() -> PathBuf {
    project_root().join("contracts").join("fixtures")
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

/// Generate the EvaluationLog schema.
fn generate_log_schema() -> schemars::Schema {
    schema_for!(EvaluationLog)
}

/// Generate the GemaraConfigV1 schema.
fn generate_config_schema() -> schemars::Schema {
    schema_for!(gemara_settings::GemaraConfigV1)
}

/// List of schemas to generate.
fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "gemara.evaluation-log.v1.json",
            generate: generate_log_schema,
        },
        SchemaSpec {
            filename: "gemara.config.v1.json",
            generate: generate_config_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

/// Emit schemas to the schemas/ directory.
fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();

    if !dir.exists() {
        fs::create_dir_all(&dir).context("Failed to create schemas directory")?;
    }

    for spec in schema_specs() {
        let schema = (spec.generate)();
        let json = serialize_schema(&schema)?;
        let path = dir.join(spec.filename);

        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;

        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  conform           Validate contract fixtures against the evaluation log schema");
    eprintln!("  conform-full      Full conformance: contract fixtures + gemara output validation");
}

fn compile_log_schema() -> anyhow::Result<jsonschema::Validator> {
    let schema_value =
        serde_json::to_value(generate_log_schema()).context("Failed to convert schema to JSON")?;
    jsonschema::validator_for(&schema_value)
        .map_err(|e| anyhow::anyhow!("Failed to compile schema: {}", e))
}

/// Semantic checks the schema cannot express.
fn check_log_invariants(name: &str, log: &EvaluationLog, errors: &mut Vec<String>) {
    let most_severe = log
        .evaluations
        .iter()
        .map(|c| c.result)
        .max_by_key(|v| v.severity_rank())
        .unwrap_or(Verdict::NotRun);
    if most_severe.severity_rank() != log.result.severity_rank() {
        errors.push(format!(
            "{name}: envelope result '{}' is not the most severe control result '{}'",
            log.result, most_severe
        ));
    }

    for control in &log.evaluations {
        for record in &control.assessment_logs {
            let id = &record.requirement_id;
            if !record.steps.is_empty() && record.steps_executed > record.steps.len() as u64 {
                errors.push(format!(
                    "{name}: {id} executed {} of {} steps",
                    record.steps_executed,
                    record.steps.len()
                ));
            }
            if record.result == Verdict::Failed && record.end.is_some() {
                errors.push(format!("{name}: {id} failed but records an end time"));
            }
            if record.result == Verdict::NotRun && record.steps_executed > 0 {
                errors.push(format!("{name}: {id} is Not Run but executed steps"));
            }
            if record.result == Verdict::NotApplicable
                && (record.steps_executed > 0 || record.start.is_some())
            {
                errors.push(format!("{name}: {id} is Not Applicable but records a run"));
            }
        }
    }
}

/// Validate contract fixtures.
///
/// This checks:
/// 1. Schema validation: fixtures validate against the generated evaluation log schema
/// 2. Decoding: fixtures parse as `EvaluationLog` with a known schema id
/// 3. Invariants: envelope result, execution counts, and run times are consistent
fn conform() -> anyhow::Result<()> {
    let compiled = compile_log_schema()?;
    println!("✓ evaluation log schema compiles");

    let fixtures_dir = contracts_fixtures_dir();
    if !fixtures_dir.exists() {
        bail!(
            "contracts/fixtures/ not found at {}\n\n\
            Create contract fixtures first.",
            fixtures_dir.display()
        );
    }

    let mut fixture_count = 0;
    let mut errors = Vec::new();

    for entry in fs::read_dir(&fixtures_dir).context("Failed to read contracts/fixtures/")? {
        let path = entry?.path();
        if path.extension().is_none_or(|ext| ext != "json") {
            continue;
        }
        fixture_count += 1;
        conform_file(&path, &compiled, &mut errors)?;
    }

    if fixture_count == 0 {
        bail!("No contract fixtures found in {}", fixtures_dir.display());
    }

    if errors.is_empty() {
        println!("✓ {} contract fixtures conform", fixture_count);
        Ok(())
    } else {
        for error in &errors {
            eprintln!("  - {}", error);
        }
        bail!("Conformance failed with {} errors", errors.len())
    }
}

fn conform_file(
    path: &Path,
    compiled: &jsonschema::Validator,
    errors: &mut Vec<String>,
) -> anyhow::Result<()> {
    let filename = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", filename))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {} as JSON", filename))?;

    for err in compiled.iter_errors(&value) {
        errors.push(format!("{}: schema validation: {}", filename, err));
    }

    match parse_log(&content, ReportFormat::Json) {
        Ok(log) => check_log_invariants(&filename, &log, errors),
        Err(e) => errors.push(format!("{}: decode: {:#}", filename, e)),
    }
    Ok(())
}

fn sample_controls() -> anyhow::Result<Vec<ControlEvaluation<str>>> {
    let protected = AssessmentLog::new(
        "SAMPLE-01.01",
        "default branch is protected",
        vec!["Maturity Level 1".to_string()],
        vec![AssessmentStep::new("branch_protection", |repo: &str| {
            if repo.contains("protected") {
                StepOutcome::passed("default branch is protected", ConfidenceLevel::High)
            } else {
                StepOutcome::failed("default branch is unprotected", ConfidenceLevel::High)
            }
        })],
    )
    .map_err(|e| anyhow::anyhow!("{e}"))?;

    let reviewed = AssessmentLog::new(
        "SAMPLE-01.02",
        "security policy is reviewed",
        vec!["Maturity Level 2".to_string()],
        vec![AssessmentStep::new("policy_review", |_: &str| {
            StepOutcome::needs_review("policy contents need a human", ConfidenceLevel::Medium)
        })],
    )
    .map_err(|e| anyhow::anyhow!("{e}"))?;

    let mut control = ControlEvaluation::new("SAMPLE-01", "Sample control");
    control.add_assessment(protected);
    control.add_assessment(reviewed);
    Ok(vec![control])
}

fn sample_log(target: &str) -> anyhow::Result<EvaluationLog> {
    let output = run_evaluation(EvaluationInput {
        target,
        controls: sample_controls()?,
        config_text: "",
        overrides: Overrides::default(),
        evaluation_id: "xtask-conform",
    })?;
    Ok(output.log)
}

/// Contract fixtures plus logs produced by the engine itself.
fn conform_full() -> anyhow::Result<()> {
    conform()?;

    let compiled = compile_log_schema()?;
    let tmp = tempfile::tempdir().context("Failed to create temp dir")?;
    let tmp_root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf())
        .map_err(|p| anyhow::anyhow!("non-UTF-8 temp dir: {}", p.display()))?;
    let mut errors = Vec::new();

    for target in ["protected main", "open main"] {
        let log = sample_log(target)?;
        let value = serde_json::to_value(&log).context("Failed to serialize sample log")?;
        for err in compiled.iter_errors(&value) {
            errors.push(format!("{target}: schema validation: {err}"));
        }
        check_log_invariants(target, &log, &mut errors);

        // Determinism: two runs differ only in normalized fields.
        let again = serde_json::to_value(sample_log(target)?)?;
        if normalize_nondeterministic(value) != normalize_nondeterministic(again) {
            errors.push(format!("{target}: output is not deterministic after normalization"));
        }

        for ext in ["json", "yaml"] {
            let path = tmp_root.join(format!("sample.{ext}"));
            write_log(&path, &log)?;
            if read_log(&path)? != log {
                errors.push(format!("{target}: {ext} log does not read back unchanged"));
            }
        }
    }

    if errors.is_empty() {
        println!("✓ gemara output conforms");
        Ok(())
    } else {
        for error in &errors {
            eprintln!("  - {}", error);
        }
        bail!("Full conformance failed with {} errors", errors.len())
    }
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "conform" => conform(),
        "conform-full" => conform_full(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                let name = spec.filename.trim_end_matches(".json");
                println!("{}", name);
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
