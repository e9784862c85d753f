//! End-to-end tests of the `costkit` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::tempdir;

const WORKLOAD: &str = r#"
model: claude-sonnet
tokens:
  inputTokens: 2000
  outputTokens: 800
features:
  toolCalls: 1
volume:
  emailsPerMonth: 5000
"#;

fn costkit(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_costkit"))
        .args(args)
        .current_dir(dir)
        .env_remove("COSTKIT_CURRENCY")
        .env_remove("COSTKIT_CREDITS_PER_UNIT")
        .env_remove("COSTKIT_CATALOG")
        .env_remove("COSTKIT_SESSIONS_ROOT")
        .output()
        .expect("failed to run costkit")
}

#[test]
fn test_estimate_json() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("workload.yaml"), WORKLOAD).unwrap();

    let output = costkit(temp.path(), &["estimate", "--workload", "workload.yaml", "--json"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["breakdown"]["transactionsPerMonth"], 5000);
    assert_eq!(report["currency"], "USD");
}

#[test]
fn test_unknown_model_is_a_precondition_failure() {
    let temp = tempdir().unwrap();
    let unknown = WORKLOAD.replace("claude-sonnet", "gpt-9");
    fs::write(temp.path().join("workload.yaml"), unknown).unwrap();

    let output = costkit(temp.path(), &["estimate", "-w", "workload.yaml"]);
    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn test_volume_beyond_range_is_a_precondition_failure() {
    let temp = tempdir().unwrap();
    let oversized = WORKLOAD.replace(
        "emailsPerMonth: 5000",
        "emailsPerMonth: 18446744073709551615\n  chatsPerMonth: 1",
    );
    fs::write(temp.path().join("workload.yaml"), oversized).unwrap();

    let output = costkit(temp.path(), &["estimate", "-w", "workload.yaml"]);
    assert_eq!(output.status.code(), Some(4));
    assert!(String::from_utf8_lossy(&output.stderr).contains("supported range"));
}

#[test]
fn test_incomplete_catalog_is_a_configuration_failure() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("workload.yaml"), WORKLOAD).unwrap();
    fs::write(
        temp.path().join("catalog.yaml"),
        concat!(
            "inter_agent_per_million: 3.0\nmodels:\n",
            "  - { name: claude-sonnet, input_per_million: 3, output_per_million: 15,",
            " hosted: true }\n",
        ),
    )
    .unwrap();

    let output = costkit(temp.path(), &["estimate", "-w", "workload.yaml", "-c", "catalog.yaml"]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_replay_builtin_scenario() {
    let temp = tempdir().unwrap();
    let output = costkit(temp.path(), &["replay", "invoice-processing"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[10/10]"));
    assert!(stdout.contains("4,400 transactions / month"));
}

#[test]
fn test_config_file_sets_currency() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("costkit.toml"), "currency = \"EUR\"\n").unwrap();
    let output = costkit(temp.path(), &["catalog"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains('€'));
}

#[test]
fn test_catalog_command_reports_warnings() {
    let temp = tempdir().unwrap();
    let demo = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/catalog.yaml");
    let catalog = fs::read_to_string(demo).unwrap().replace(
        "hosted: false }",
        "hosted: false, enabled: false }",
    );
    fs::write(temp.path().join("catalog.yaml"), catalog).unwrap();

    let output = costkit(temp.path(), &["catalog", "-c", "catalog.yaml"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Model 'custom' is disabled"));
}

#[test]
fn test_sessions_list_and_missing_delete() {
    let temp = tempdir().unwrap();
    let output = costkit(temp.path(), &["sessions", "list"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("No saved sessions"));

    let output = costkit(temp.path(), &["sessions", "delete", "does-not-exist"]);
    assert_eq!(output.status.code(), Some(2));
}
