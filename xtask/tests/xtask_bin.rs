use std::process::Command;

#[test]
fn xtask_help_runs() {
    let exe = env!("CARGO_BIN_EXE_xtask");
    let output = Command::new(exe)
        .arg("help")
        .output()
        .expect("run xtask");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("xtask commands"));
    assert!(stderr.contains("conform-full"));
    assert!(!stderr.contains("validate-schemas"));
}

#[test]
fn xtask_lists_schema_ids() {
    let exe = env!("CARGO_BIN_EXE_xtask");
    let output = Command::new(exe)
        .arg("print-schema-ids")
        .output()
        .expect("run xtask");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.lines().any(|l| l == "gemara.evaluation-log.v1"));
    assert!(stdout.lines().any(|l| l == "gemara.config.v1"));
}

#[test]
fn xtask_rejects_unknown_commands() {
    let exe = env!("CARGO_BIN_EXE_xtask");
    let output = Command::new(exe)
        .arg("frobnicate")
        .output()
        .expect("run xtask");

    assert!(!output.status.success());
}
