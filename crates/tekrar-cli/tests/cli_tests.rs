//! CLI integration tests using assert_cmd.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use tekrar_core::report::PlanReport;
use tekrar_core::select::ScoreMode;

/// Instant all plan invocations evaluate scores at.
const NOW: &str = "2026-02-25T00:00:00Z";

const RESULTS_CSV: &str = "\
timestamp,word_id,mode,correct
2026-02-20 00:00:00,elma,en-tr,true
2026-02-24 00:00:00,su-eski,en-tr,false
2026-02-23 00:00:00,kitap,en-tr,false
02/10/2026 09:30,elma,tr-en,false
";

const CATALOG_JSON: &str = r#"{
  "items": [
    {"id": "elma", "english": "apple", "turkish": "elma", "tags": ["noun", "freq-100"]},
    {"id": "kitap", "english": "book", "turkish": "kitap", "tags": ["noun"]},
    {"id": "su", "english": "water", "turkish": "su", "tags": ["noun"]},
    {"id": "kosmak", "english": "to run", "turkish": "koşmak", "tags": ["verb"]}
  ],
  "tags": [
    {"id": "noun", "label": "Nouns"},
    {"id": "verb", "label": "Verbs"},
    {"id": "freq-100", "label": "Top 100"}
  ]
}"#;

const ALIASES_JSON: &str = r#"{"aliases": {"su-eski": "su"}}"#;

fn tekrar(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("tekrar").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("RUST_LOG")
        .env_remove("TEKRAR_RESULTS")
        .env_remove("TEKRAR_LIMIT");
    cmd
}

fn write_fixtures(dir: &TempDir) -> (PathBuf, PathBuf, PathBuf) {
    let results = dir.path().join("results.csv");
    let catalog = dir.path().join("quiz.json");
    let aliases = dir.path().join("aliases.json");
    std::fs::write(&results, RESULTS_CSV).unwrap();
    std::fs::write(&catalog, CATALOG_JSON).unwrap();
    std::fs::write(&aliases, ALIASES_JSON).unwrap();
    (results, catalog, aliases)
}

fn plan_cmd(dir: &TempDir, results: &Path, catalog: &Path, aliases: &Path) -> Command {
    let mut cmd = tekrar(dir);
    cmd.arg("plan")
        .arg("--results")
        .arg(results)
        .arg("--catalog")
        .arg(catalog)
        .arg("--aliases")
        .arg(aliases)
        .arg("--now")
        .arg(NOW);
    cmd
}

#[test]
fn plan_selects_the_most_relevant_items() {
    let dir = TempDir::new().unwrap();
    let (results, catalog, aliases) = write_fixtures(&dir);

    plan_cmd(&dir, &results, &catalog, &aliases)
        .arg("--limit")
        .arg("2")
        .assert()
        .success()
        .stdout(predicate::str::diff("su\nkitap\n"));
}

#[test]
fn plan_ranks_the_whole_catalog_under_the_default_limit() {
    let dir = TempDir::new().unwrap();
    let (results, catalog, aliases) = write_fixtures(&dir);

    // Fresh mistakes first, then the decayed one, then the never-drilled
    // verb at pure novelty.
    plan_cmd(&dir, &results, &catalog, &aliases)
        .assert()
        .success()
        .stdout(predicate::str::diff("su\nkitap\nelma\nkosmak\n"));
}

#[test]
fn plan_unknown_mode_falls_back_to_en_tr() {
    let dir = TempDir::new().unwrap();
    let (results, catalog, aliases) = write_fixtures(&dir);

    // en-tr only: elma's recent correct answer drags it below novelty.
    plan_cmd(&dir, &results, &catalog, &aliases)
        .arg("--mode")
        .arg("gibberish")
        .assert()
        .success()
        .stdout(predicate::str::diff("su\nkitap\nkosmak\nelma\n"));
}

#[test]
fn plan_include_tag_narrows_the_catalog() {
    let dir = TempDir::new().unwrap();
    let (results, catalog, aliases) = write_fixtures(&dir);

    plan_cmd(&dir, &results, &catalog, &aliases)
        .arg("--include-tag")
        .arg("verb")
        .assert()
        .success()
        .stdout(predicate::str::diff("kosmak\n"));
}

#[test]
fn plan_exclude_tag_drops_items() {
    let dir = TempDir::new().unwrap();
    let (results, catalog, aliases) = write_fixtures(&dir);

    plan_cmd(&dir, &results, &catalog, &aliases)
        .arg("--exclude-tag")
        .arg("noun")
        .assert()
        .success()
        .stdout(predicate::str::diff("kosmak\n"));
}

#[test]
fn plan_env_limit_applies() {
    let dir = TempDir::new().unwrap();
    let (results, catalog, aliases) = write_fixtures(&dir);

    plan_cmd(&dir, &results, &catalog, &aliases)
        .env("TEKRAR_LIMIT", "1")
        .assert()
        .success()
        .stdout(predicate::str::diff("su\n"));
}

#[test]
fn plan_env_results_points_at_the_log() {
    let dir = TempDir::new().unwrap();
    let (results, catalog, aliases) = write_fixtures(&dir);

    tekrar(&dir)
        .env("TEKRAR_RESULTS", &results)
        .arg("plan")
        .arg("--catalog")
        .arg(&catalog)
        .arg("--aliases")
        .arg(&aliases)
        .arg("--now")
        .arg(NOW)
        .assert()
        .success()
        .stdout(predicate::str::diff("su\nkitap\nelma\nkosmak\n"));
}

#[test]
fn plan_config_file_defaults_and_flag_override() {
    let dir = TempDir::new().unwrap();
    let (results, catalog, aliases) = write_fixtures(&dir);
    std::fs::write(dir.path().join("tekrar.toml"), "[plan]\nlimit = 1\n").unwrap();

    plan_cmd(&dir, &results, &catalog, &aliases)
        .assert()
        .success()
        .stdout(predicate::str::diff("su\n"));

    plan_cmd(&dir, &results, &catalog, &aliases)
        .arg("--limit")
        .arg("2")
        .assert()
        .success()
        .stdout(predicate::str::diff("su\nkitap\n"));
}

#[test]
fn plan_config_file_include_tags() {
    let dir = TempDir::new().unwrap();
    let (results, catalog, aliases) = write_fixtures(&dir);
    std::fs::write(
        dir.path().join("tekrar.toml"),
        "[plan]\ninclude_tags = [\"verb\"]\n",
    )
    .unwrap();

    plan_cmd(&dir, &results, &catalog, &aliases)
        .assert()
        .success()
        .stdout(predicate::str::diff("kosmak\n"));
}

#[test]
fn plan_reads_json_results() {
    let dir = TempDir::new().unwrap();
    let (_, catalog, aliases) = write_fixtures(&dir);
    let results = dir.path().join("results.json");
    std::fs::write(
        &results,
        r#"{"rows": [
            {"timestamp": "2026-02-24 00:00:00", "word_id": "su-eski", "mode": "en-tr", "correct": false}
        ]}"#,
    )
    .unwrap();

    // Only su has history; the rest tie at novelty and sort by id.
    plan_cmd(&dir, &results, &catalog, &aliases)
        .assert()
        .success()
        .stdout(predicate::str::diff("su\nelma\nkitap\nkosmak\n"));
}

#[test]
fn plan_dry_run_prints_a_table() {
    let dir = TempDir::new().unwrap();
    let (results, catalog, aliases) = write_fixtures(&dir);

    plan_cmd(&dir, &results, &catalog, &aliases)
        .arg("--limit")
        .arg("2")
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rank"))
        .stdout(predicate::str::contains("su"))
        .stdout(predicate::str::contains("1.930"));
}

#[test]
fn plan_saves_a_report() {
    let dir = TempDir::new().unwrap();
    let (results, catalog, aliases) = write_fixtures(&dir);
    let output = dir.path().join("plan.json");

    plan_cmd(&dir, &results, &catalog, &aliases)
        .arg("--limit")
        .arg("2")
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("Plan saved to"));

    let plan = PlanReport::load_json(&output).unwrap();
    assert_eq!(plan.mode, ScoreMode::Both);
    assert_eq!(plan.limit, 2);
    assert_eq!(plan.selected, ["su", "kitap"]);
    assert_eq!(plan.scores.len(), 4);
    assert_eq!(plan.scores[0].id, "su");
    assert!(plan.include_tags.is_empty());
}

#[test]
fn plan_rejects_an_empty_results_log() {
    let dir = TempDir::new().unwrap();
    let (_, catalog, aliases) = write_fixtures(&dir);
    let results = dir.path().join("empty.csv");
    std::fs::write(&results, "   \n  \n").unwrap();

    plan_cmd(&dir, &results, &catalog, &aliases)
        .assert()
        .failure()
        .stderr(predicate::str::contains("is empty"));
}

#[test]
fn plan_without_a_results_log_fails() {
    let dir = TempDir::new().unwrap();
    let (_, catalog, aliases) = write_fixtures(&dir);

    tekrar(&dir)
        .arg("plan")
        .arg("--catalog")
        .arg(&catalog)
        .arg("--aliases")
        .arg(&aliases)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no results log"));
}

#[test]
fn plan_rejects_an_unreadable_now() {
    let dir = TempDir::new().unwrap();
    let (results, catalog, aliases) = write_fixtures(&dir);

    tekrar(&dir)
        .arg("plan")
        .arg("--results")
        .arg(&results)
        .arg("--catalog")
        .arg(&catalog)
        .arg("--aliases")
        .arg(&aliases)
        .arg("--now")
        .arg("whenever")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unreadable --now timestamp"));
}

#[test]
fn validate_passes_a_clean_catalog() {
    let dir = TempDir::new().unwrap();
    let (_, catalog, aliases) = write_fixtures(&dir);

    tekrar(&dir)
        .arg("validate")
        .arg("--catalog")
        .arg(&catalog)
        .arg("--aliases")
        .arg(&aliases)
        .assert()
        .success()
        .stdout(predicate::str::contains("4 item(s)"))
        .stdout(predicate::str::contains("Catalog valid."));
}

#[test]
fn validate_reports_problems_and_fails() {
    let dir = TempDir::new().unwrap();
    let catalog = dir.path().join("bad.json");
    let aliases = dir.path().join("bad-aliases.json");
    std::fs::write(
        &catalog,
        r#"{
            "items": [
                {"id": "elma", "tags": ["noun"]},
                {"id": "elma", "tags": ["nope"]}
            ],
            "tags": [{"id": "noun", "label": "Nouns"}]
        }"#,
    )
    .unwrap();
    std::fs::write(&aliases, r#"{"aliases": {"a": "b", "b": "a"}}"#).unwrap();

    tekrar(&dir)
        .arg("validate")
        .arg("--catalog")
        .arg(&catalog)
        .arg("--aliases")
        .arg(&aliases)
        .assert()
        .failure()
        .stdout(predicate::str::contains("[elma] WARNING: duplicate item id"))
        .stdout(predicate::str::contains("unknown tag 'nope'"))
        .stdout(predicate::str::contains("alias chain from 'a' never resolves"))
        .stderr(predicate::str::contains("4 problem(s) found"));
}

#[test]
fn validate_nonexistent_catalog() {
    let dir = TempDir::new().unwrap();

    tekrar(&dir)
        .arg("validate")
        .arg("--catalog")
        .arg("nonexistent.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn help_output() {
    let dir = TempDir::new().unwrap();

    tekrar(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Recency-decay vocabulary drill planner",
        ));
}

#[test]
fn version_output() {
    let dir = TempDir::new().unwrap();

    tekrar(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tekrar"));
}
