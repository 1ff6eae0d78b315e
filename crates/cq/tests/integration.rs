//! End-to-end CLI integration tests for the `cq` binary.
//!
//! Every test runs `cq` inside its own temporary directory with the `CQQL_*`
//! environment cleared, so no config is discovered unless the test writes one.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a `Command` for the cargo-built `cq` binary, run from `dir`.
fn cq(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cq").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("CQQL_DIR")
        .env_remove("CQQL_CONFIG")
        .env_remove("CQQL_MAX_DEPTH")
        .env_remove("CQQL_SEPARATOR")
        .env_remove("CQQL_ORDINAL")
        .env_remove("CQQL_DATA")
        .env("NO_COLOR", "1");
    cmd
}

fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

const SCENARIO: &str = "(A & price__low) | (B & price__high)";

// ---------------------------------------------------------------------------
// Formula stages
// ---------------------------------------------------------------------------

#[test]
fn parse_prints_canonical_form() {
    let tmp = TempDir::new().unwrap();
    cq(&tmp)
        .args(["parse", "A & !B | C"])
        .assert()
        .success()
        .stdout("((A & !(B)) | C)\n");
}

#[test]
fn parse_reads_stdin() {
    let tmp = TempDir::new().unwrap();
    cq(&tmp)
        .args(["parse", "-"])
        .write_stdin("WAND(t1, t2, A, B)\n")
        .assert()
        .success()
        .stdout("WAND(t1,t2,A,B)\n");
}

#[test]
fn atoms_are_sorted_and_include_weights() {
    let tmp = TempDir::new().unwrap();
    cq(&tmp)
        .args(["atoms", "WOR(t2, t1, b, a & b)"])
        .assert()
        .success()
        .stdout("a\nb\nt1\nt2\n");
}

#[test]
fn expand_rewrites_weighted_connectives() {
    let tmp = TempDir::new().unwrap();
    cq(&tmp)
        .args(["expand", "WOR(t1,t2,price__low,price__high)"])
        .assert()
        .success()
        .stdout("((price__low & t1) | (price__high & t2))\n");
}

#[test]
fn normalize_splits_overlapping_buckets() {
    let tmp = TempDir::new().unwrap();
    cq(&tmp)
        .args(["normalize", SCENARIO, "--ordinal", "price"])
        .assert()
        .success()
        .stdout(predicate::str::contains("{A, price__low}"))
        .stdout(predicate::str::contains("{B, price__high, price__low}"))
        .stdout(predicate::str::contains("{B, price__high, !price__low}"));
}

#[test]
fn normalize_json_reports_terms() {
    let tmp = TempDir::new().unwrap();
    let json = json_stdout(cq(&tmp).args(["normalize", SCENARIO, "--ordinal", "price", "--json"]));

    let terms = json["terms"].as_array().unwrap();
    assert_eq!(terms.len(), 3);
    assert_eq!(terms[0], "{A, price__low}");
    assert_eq!(json["overlap_free"], true);
    assert_eq!(json["ordinal"], serde_json::json!(["price"]));
}

#[test]
fn normalize_without_ordinal_attributes_is_plain_dnf() {
    let tmp = TempDir::new().unwrap();
    // An empty config overrides the demo profile's ordinal list.
    cq(&tmp).args(["config", "init", "--empty"]).assert().success();

    let json = json_stdout(cq(&tmp).args(["normalize", SCENARIO, "--json"]));
    assert_eq!(json["terms"].as_array().unwrap().len(), 2);
}

#[test]
fn zero_depth_leaves_overlaps_in_place() {
    let tmp = TempDir::new().unwrap();
    let json = json_stdout(cq(&tmp).args([
        "normalize",
        SCENARIO,
        "--ordinal",
        "price",
        "--max-depth",
        "0",
        "--json",
    ]));

    assert_eq!(
        json["terms"],
        serde_json::json!(["{A, price__low}", "{B, price__high}"])
    );
    assert_eq!(json["overlap_free"], false);
}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

#[test]
fn rank_demo_apartments() {
    let tmp = TempDir::new().unwrap();
    let json = json_stdout(cq(&tmp).args(["rank", "balcony & kreuzberg", "--json"]));

    let ranked = json.as_array().unwrap();
    assert_eq!(ranked.len(), 6);
    assert_eq!(ranked[0]["name"], "Apt1-Kreuzberg-Modern");
    assert_eq!(ranked[0]["score"], 1.0);
    // Ties keep dataset order.
    assert_eq!(ranked[1]["name"], "Apt2-Neukoelln-Budget");
    assert_eq!(ranked[1]["score"], 0.0);
}

#[test]
fn rank_limit() {
    let tmp = TempDir::new().unwrap();
    let json = json_stdout(cq(&tmp).args(["rank", "balcony", "-n", "2", "--json"]));
    assert_eq!(json.as_array().unwrap().len(), 2);
}

#[test]
fn rank_table_output() {
    let tmp = TempDir::new().unwrap();
    cq(&tmp)
        .args(["rank", "balcony & kreuzberg"])
        .assert()
        .success()
        .stdout(predicate::str::contains("OBJECT"))
        .stdout(predicate::str::contains("Apt1-Kreuzberg-Modern"))
        .stdout(predicate::str::contains("1.0000"));
}

#[test]
fn rank_dataset_file_scores_the_ordinal_scenario() {
    let tmp = TempDir::new().unwrap();
    let data = tmp.path().join("objects.jsonl");
    std::fs::write(
        &data,
        concat!(
            r#"{"name": "x", "scores": {"A": 1, "B": 0, "price__low": 0.9, "price__high": 0.1}}"#,
            "\n\n",
            r#"{"name": "empty"}"#,
            "\n",
        ),
    )
    .unwrap();

    let json = json_stdout(cq(&tmp).args([
        "rank",
        SCENARIO,
        "--ordinal",
        "price",
        "--data",
        data.to_str().unwrap(),
        "--json",
    ]));

    let ranked = json.as_array().unwrap();
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0]["name"], "x");
    let score = ranked[0]["score"].as_f64().unwrap();
    assert!((score - 0.9).abs() < 1e-9, "score = {}", score);
    assert_eq!(ranked[1]["score"], 0.0);
}

#[test]
fn rank_reports_bad_dataset_line() {
    let tmp = TempDir::new().unwrap();
    let data = tmp.path().join("bad.jsonl");
    std::fs::write(&data, "{\"name\": \"ok\"}\n{broken\n").unwrap();

    cq(&tmp)
        .args(["rank", "A", "--data", data.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bad.jsonl"))
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn explain_prints_every_stage() {
    let tmp = TempDir::new().unwrap();
    cq(&tmp)
        .args(["explain", "WOR(theta_price,theta_text,price__low,quiet)", "-n", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PARSED"))
        .stdout(predicate::str::contains("EXPANDED"))
        .stdout(predicate::str::contains("NORMALIZED"))
        .stdout(predicate::str::contains("RANKING"))
        .stdout(predicate::str::contains("((price__low & theta_price) | (quiet & theta_text))"));
}

#[test]
fn explain_json_has_all_stages() {
    let tmp = TempDir::new().unwrap();
    let json = json_stdout(cq(&tmp).args(["explain", "WAND(t1,t2,A,B)", "--json"]));

    assert_eq!(json["parsed"], "WAND(t1,t2,A,B)");
    assert_eq!(json["expanded"], "((A | !(t1)) & (B | !(t2)))");
    assert_eq!(json["ranking"].as_array().unwrap().len(), 6);
}

// ---------------------------------------------------------------------------
// Crisp checks
// ---------------------------------------------------------------------------

#[test]
fn check_uses_listed_atoms() {
    let tmp = TempDir::new().unwrap();
    cq(&tmp)
        .args(["check", "A & !B", "A"])
        .assert()
        .success()
        .stdout(predicate::str::contains("true"));

    cq(&tmp)
        .args(["check", "A & !B", "A", "B"])
        .assert()
        .success()
        .stdout(predicate::str::contains("false"));
}

#[test]
fn check_json() {
    let tmp = TempDir::new().unwrap();
    let json = json_stdout(cq(&tmp).args(["check", "WAND(t1,t2,A,B)", "t1", "A", "--json"]));
    assert_eq!(json["value"], true);
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn syntax_error_exits_with_kind() {
    let tmp = TempDir::new().unwrap();
    cq(&tmp)
        .args(["parse", "A &"])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("Error: syntax error:"));
}

#[test]
fn deeply_nested_formula_is_a_syntax_error() {
    let tmp = TempDir::new().unwrap();
    cq(&tmp)
        .args(["parse", "-"])
        .write_stdin(format!("{}A\n", "!".repeat(200_000)))
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("Error: syntax error:"))
        .stderr(predicate::str::contains("nested levels"));
}

#[test]
fn lex_error_names_character_and_offset() {
    let tmp = TempDir::new().unwrap();
    cq(&tmp)
        .args(["parse", "A # B"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "lex error: unexpected character '#' at offset 2",
        ));
}

#[test]
fn errors_as_json() {
    let tmp = TempDir::new().unwrap();
    let output = cq(&tmp).args(["parse", "(A", "--json"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));

    let err: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(err["kind"], "syntax error");
    assert!(err["error"].as_str().unwrap().contains("')'"));
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn config_show_defaults_to_demo_profile() {
    let tmp = TempDir::new().unwrap();
    cq(&tmp)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("built-in demo profile"))
        .stdout(predicate::str::contains("max-depth: 50"));

    let json = json_stdout(cq(&tmp).args(["config", "show", "--json"]));
    assert_eq!(json["source"]["kind"], "demo");
    assert_eq!(json["config"]["attributes"]["balcony"], "db");
}

#[test]
fn config_init_then_show() {
    let tmp = TempDir::new().unwrap();
    cq(&tmp)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.yaml"));
    assert!(tmp.path().join(".cqql/config.yaml").exists());

    let json = json_stdout(cq(&tmp).args(["config", "show", "--json"]));
    assert_eq!(json["source"]["kind"], "file");
    assert_eq!(json["config"]["ordinal"], serde_json::json!(["price", "dist", "size"]));

    // A second init refuses to overwrite.
    cq(&tmp)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
    cq(&tmp).args(["config", "init", "--force", "--empty"]).assert().success();

    let json = json_stdout(cq(&tmp).args(["config", "show", "--json"]));
    assert_eq!(json["config"]["ordinal"], serde_json::json!([]));
}

#[test]
fn config_path_requires_a_config_dir() {
    let tmp = TempDir::new().unwrap();
    cq(&tmp)
        .args(["config", "path"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no .cqql directory found"));

    cq(&tmp).args(["config", "init", "--quiet"]).assert().success();
    cq(&tmp)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with(".cqql/config.yaml\n"));

    let json = json_stdout(cq(&tmp).args(["config", "path", "--json"]));
    assert_eq!(json["exists"], true);
}

#[test]
fn config_file_drives_the_pipeline() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("custom.yaml");
    std::fs::write(&path, "separator: _\nordinal: [price]\n").unwrap();

    let json = json_stdout(cq(&tmp).args([
        "normalize",
        "(A & price_low) | (B & price_high)",
        "--config",
        path.to_str().unwrap(),
        "--json",
    ]));
    assert_eq!(json["terms"].as_array().unwrap().len(), 3);
}

#[test]
fn env_overrides_config() {
    let tmp = TempDir::new().unwrap();
    cq(&tmp)
        .env("CQQL_MAX_DEPTH", "0")
        .args(["normalize", "A"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("max-depth"));
}

#[test]
fn missing_config_file_is_an_error() {
    let tmp = TempDir::new().unwrap();
    cq(&tmp)
        .args(["config", "show", "--config", "nope.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.yaml"));
}

// ---------------------------------------------------------------------------
// Misc
// ---------------------------------------------------------------------------

#[test]
fn completion_bash() {
    let tmp = TempDir::new().unwrap();
    cq(&tmp)
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_cq"));
}

#[test]
fn no_subcommand_prints_help() {
    let tmp = TempDir::new().unwrap();
    cq(&tmp)
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}
