use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use dishes_test::fixtures;
use tempfile::TempDir;

fn dishes_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_dishes"))
}

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("failed to write fixture");
    path
}

fn run(args: &[&str], prefs: &Path) -> Output {
    dishes_cmd()
        .arg("--quiet")
        .arg("--preferences")
        .arg(prefs)
        .args(args)
        .output()
        .expect("failed to run dishes")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn alice_bob_best_distribution() {
    let dir = TempDir::new().unwrap();
    let prefs = write_file(&dir, "prefs.json", &fixtures::to_json(&fixtures::alice_bob()));

    let output = run(&["--top", "1"], &prefs);

    assert!(output.status.success(), "stderr={}", stderr(&output));
    assert_eq!(stdout(&output), "#1\nAlice: [Pizza], Bob: [Salad]\nscore: 8\n");
}

#[test]
fn full_ranking_in_text() {
    let dir = TempDir::new().unwrap();
    let prefs = write_file(&dir, "prefs.json", &fixtures::to_json(&fixtures::alice_bob()));

    let output = run(&["-k", "4", "--workers", "2"], &prefs);

    assert!(output.status.success(), "stderr={}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "#1\nAlice: [Pizza], Bob: [Salad]\nscore: 8\n\
         #2\nAlice: [Salad], Bob: [Pizza]\nscore: 2\n\
         #3\nAlice: [Pizza, Salad], Bob: []\nscore: 0\n\
         #4\nAlice: [], Bob: [Pizza, Salad]\nscore: 0\n"
    );
}

#[test]
fn json_output() {
    let dir = TempDir::new().unwrap();
    let prefs = write_file(&dir, "prefs.json", &fixtures::to_json(&fixtures::alice_bob()));

    let output = run(&["--format", "json"], &prefs);

    assert!(output.status.success(), "stderr={}", stderr(&output));
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("valid JSON");
    let solutions = value.as_array().expect("array");
    assert_eq!(solutions.len(), 4);
    assert_eq!(solutions[0]["rank"], 1);
    assert_eq!(solutions[0]["score"], 8.0);
    assert_eq!(
        solutions[0]["distribution"],
        serde_json::json!({"Alice": ["Pizza"], "Bob": ["Salad"]})
    );
}

#[test]
fn top_zero_prints_nothing() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("does-not-exist.json");

    let output = run(&["--top", "0"], &missing);

    assert!(output.status.success(), "stderr={}", stderr(&output));
    assert!(output.stdout.is_empty());
}

#[test]
fn missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("does-not-exist.json");

    let output = run(&[], &missing);

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.starts_with("error: load preferences"), "stderr={err}");
    assert!(err.contains("does-not-exist.json"), "stderr={err}");
    assert!(output.stdout.is_empty());
}

#[test]
fn malformed_file_fails() {
    let dir = TempDir::new().unwrap();
    let prefs = write_file(&dir, "prefs.json", r#"{"Alice": {"Pizza": "tasty"}}"#);

    let output = run(&[], &prefs);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("failed to parse preferences"));
}

#[test]
fn empty_preferences_fail() {
    let dir = TempDir::new().unwrap();
    let prefs = write_file(&dir, "prefs.json", "{}");

    let output = run(&[], &prefs);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("preferences are empty"));
}

#[test]
fn people_without_dishes() {
    let dir = TempDir::new().unwrap();
    let prefs = write_file(&dir, "prefs.json", r#"{"Bob": {}, "Alice": {}}"#);

    let output = run(&[], &prefs);

    assert!(output.status.success(), "stderr={}", stderr(&output));
    assert_eq!(stdout(&output), "#1\nAlice: [], Bob: []\nscore: 0\n");
}

#[test]
fn search_space_too_large_fails() {
    let dir = TempDir::new().unwrap();
    let prefs = write_file(
        &dir,
        "prefs.json",
        &fixtures::to_json(&fixtures::generated(10, 20, 5)),
    );

    let output = run(&[], &prefs);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("search space too large"));
}

#[test]
fn sequential_and_parallel_agree() {
    let dir = TempDir::new().unwrap();
    let prefs = write_file(
        &dir,
        "prefs.json",
        &fixtures::to_json(&fixtures::generated(3, 8, 11)),
    );

    let sequential = run(&["-k", "20", "--workers", "0"], &prefs);
    let parallel = run(&["-k", "20", "--workers", "4"], &prefs);

    assert!(sequential.status.success(), "stderr={}", stderr(&sequential));
    assert!(parallel.status.success(), "stderr={}", stderr(&parallel));
    assert_eq!(stdout(&sequential), stdout(&parallel));
}

#[test]
fn config_file_sets_top_k_and_flags_override() {
    let dir = TempDir::new().unwrap();
    let prefs = write_file(&dir, "prefs.json", &fixtures::to_json(&fixtures::alice_bob()));
    let config = write_file(
        &dir,
        "solver.toml",
        "top_k = 2\nworker_count = \"none\"\n",
    );
    let config = config.to_str().unwrap();

    let from_file = run(&["--config", config], &prefs);
    assert!(from_file.status.success(), "stderr={}", stderr(&from_file));
    assert_eq!(stdout(&from_file).matches("score:").count(), 2);

    let overridden = run(&["--config", config, "--top", "3"], &prefs);
    assert!(overridden.status.success(), "stderr={}", stderr(&overridden));
    assert_eq!(stdout(&overridden).matches("score:").count(), 3);
}

#[test]
fn yaml_config_is_accepted() {
    let dir = TempDir::new().unwrap();
    let prefs = write_file(&dir, "prefs.json", &fixtures::to_json(&fixtures::alice_bob()));
    let config = write_file(&dir, "solver.yaml", "top_k: 1\nnormalize: true\n");

    let output = run(&["--config", config.to_str().unwrap()], &prefs);

    assert!(output.status.success(), "stderr={}", stderr(&output));
    let out = stdout(&output);
    assert!(out.starts_with("#1\nAlice: [Pizza], Bob: [Salad]\n"), "stdout={out}");
    assert_eq!(out.matches("score:").count(), 1);
}

#[test]
fn invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    let prefs = write_file(&dir, "prefs.json", &fixtures::to_json(&fixtures::alice_bob()));
    let config = write_file(&dir, "solver.toml", "batch_size = 0\n");

    let output = run(&["--config", config.to_str().unwrap()], &prefs);

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("load config"), "stderr={err}");
    assert!(err.contains("batch_size"), "stderr={err}");
}

#[test]
fn stats_json_is_written() {
    let dir = TempDir::new().unwrap();
    let prefs = write_file(&dir, "prefs.json", &fixtures::to_json(&fixtures::lunch_party()));
    let stats_path = dir.path().join("stats.json");

    let output = run(
        &["-k", "3", "--stats-json", stats_path.to_str().unwrap()],
        &prefs,
    );

    assert!(output.status.success(), "stderr={}", stderr(&output));
    let stats: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&stats_path).unwrap()).unwrap();
    // 4 people, 5 dishes.
    assert_eq!(stats["search_space"], 1024);
    assert_eq!(stats["distributions_scored"], 1024);
    assert_eq!(stats["solutions_selected"], 1024);
    assert!(stats["duration_ms"].is_u64());
}

#[test]
fn progress_logging_goes_to_stderr() {
    let dir = TempDir::new().unwrap();
    let prefs = write_file(&dir, "prefs.json", &fixtures::to_json(&fixtures::alice_bob()));

    let output = dishes_cmd()
        .arg("--preferences")
        .arg(&prefs)
        .args(["--top", "1"])
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run dishes");

    assert!(output.status.success(), "stderr={}", stderr(&output));
    assert_eq!(stdout(&output), "#1\nAlice: [Pizza], Bob: [Salad]\nscore: 8\n");
    assert!(stderr(&output).contains("Solving complete"));
}

#[test]
fn time_limit_aborts_long_search() {
    let dir = TempDir::new().unwrap();
    let prefs = write_file(
        &dir,
        "prefs.json",
        &fixtures::to_json(&fixtures::generated(4, 14, 3)),
    );

    let output = run(&["--time-limit", "1", "--workers", "2"], &prefs);

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("time limit of 1s exceeded"), "stderr={err}");
    assert!(output.stdout.is_empty());
}

#[test]
fn zero_time_limit_is_rejected() {
    let dir = TempDir::new().unwrap();
    let prefs = write_file(&dir, "prefs.json", &fixtures::to_json(&fixtures::alice_bob()));

    let output = run(&["--time-limit", "0"], &prefs);

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("--time-limit"));
}
