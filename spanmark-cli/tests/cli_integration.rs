//! Integration tests for the spanmark CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn spanmark() -> Command {
    Command::cargo_bin("spanmark").unwrap()
}

fn write_corpus(dir: &Path, name: &str, records: &[(&str, &str)]) -> String {
    let lines: Vec<String> = records
        .iter()
        .map(|(id, text)| serde_json::json!({ "id": id, "text": text }).to_string())
        .collect();
    let path = dir.join(name);
    fs::write(&path, lines.join("\n") + "\n").unwrap();
    path.display().to_string()
}

fn parse_lines(output: &[u8]) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(output)
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn test_tag_writes_attribute_jsonl() {
    let dir = TempDir::new().unwrap();
    let input = write_corpus(
        dir.path(),
        "docs.jsonl",
        &[("a", "Hello world.\nShort\n"), ("b", "One two three four.")],
    );

    let assert = spanmark()
        .args(["tag", "-q", "-i", &input, "-s", "c4_v1", "-s", "char_length_v1"])
        .assert()
        .success();

    let records = parse_lines(&assert.get_output().stdout);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["id"], "a");
    assert_eq!(
        records[0]["attributes"]["c4_v1__line_count"],
        serde_json::json!([[0, 19, 3.0]])
    );
    assert_eq!(
        records[1]["attributes"]["char_length_v1__length"],
        serde_json::json!([[0, 19, 19.0]])
    );
}

#[test]
fn test_tag_with_pipeline_config_and_output_file() {
    let dir = TempDir::new().unwrap();
    write_corpus(
        dir.path(),
        "part-0.jsonl",
        &[("x", "the cat the cat the cat")],
    );
    write_corpus(dir.path(), "part-1.jsonl", &[("y", "")]);
    let config = dir.path().join("pipeline.toml");
    fs::write(
        &config,
        r#"
threads = 2

[[signals]]
name = "gopher_v1"
options = { tokenizer = "whitespace" }
"#,
    )
    .unwrap();
    let output = dir.path().join("attributes.jsonl");
    let pattern = format!("{}/part-*.jsonl", dir.path().display());

    spanmark()
        .arg("tag")
        .arg("-q")
        .args(["-i", &pattern])
        .arg("-c")
        .arg(&config)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let records = parse_lines(&fs::read(&output).unwrap());
    assert_eq!(records.len(), 2);
    let most_common =
        &records[0]["attributes"]["gopher_v1__fraction_of_characters_in_most_common_2grams"];
    assert_eq!(most_common[0][2], 0.6);
    assert_eq!(records[1]["attributes"]["gopher_v1__token_count"][0][2], 0.0);
}

#[test]
fn test_text_summary() {
    let dir = TempDir::new().unwrap();
    let input = write_corpus(dir.path(), "docs.jsonl", &[("a", "abc"), ("b", "abcdefg")]);

    spanmark()
        .args(["tag", "-q", "-f", "text", "-i", &input, "-s", "char_length_v1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("documents: 2"))
        .stdout(predicate::str::contains(
            "char_length_v1__length\tdocs=2\tspans=2\tmean_doc_score=5.0000",
        ));
}

#[test]
fn test_unknown_signal_fails() {
    let dir = TempDir::new().unwrap();
    let input = write_corpus(dir.path(), "docs.jsonl", &[("a", "text")]);

    spanmark()
        .args(["tag", "-q", "-i", &input, "-s", "not_a_signal"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not_a_signal"));
}

#[test]
fn test_missing_signals_fails() {
    let dir = TempDir::new().unwrap();
    let input = write_corpus(dir.path(), "docs.jsonl", &[("a", "text")]);

    spanmark()
        .args(["tag", "-q", "-i", &input])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no signals given"));
}

#[test]
fn test_malformed_record_reports_line() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.jsonl");
    fs::write(&path, "{\"id\": \"a\", \"text\": \"ok\"}\nnot json\n").unwrap();

    spanmark()
        .args(["tag", "-q", "-s", "doc_count_v1", "-i"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("bad.jsonl:2"));
}

#[test]
fn test_directory_input() {
    let dir = TempDir::new().unwrap();
    let shard = dir.path().join("shard-1");
    fs::create_dir(&shard).unwrap();
    write_corpus(dir.path(), "part-0.jsonl", &[("a", "haha haha haha haha")]);
    write_corpus(&shard, "part-1.jsonl", &[("b", "plain")]);

    let assert = spanmark()
        .args(["tag", "-q", "-s", "repetitions_v1", "-i"])
        .arg(dir.path())
        .assert()
        .success();

    let records = parse_lines(&assert.get_output().stdout);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["id"], "a");
    // "ha" repeated eight times, copies separated by optional spaces
    assert_eq!(records[0]["attributes"]["repetitions_v1__repetition"][0][2], 8.0);
    assert_eq!(records[1]["attributes"]["repetitions_v1__doc_frac_repetition"][0][2], 0.0);
}

#[test]
fn test_no_matching_input() {
    let dir = TempDir::new().unwrap();
    let pattern = format!("{}/*.jsonl", dir.path().display());

    spanmark()
        .args(["tag", "-q", "-s", "doc_count_v1", "-i", &pattern])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No files found"));
}

#[test]
fn test_list_signals() {
    spanmark()
        .args(["list", "signals"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gopher_v1"))
        .stdout(predicate::str::contains("uniseg_length_paragraphs_with_doc_length_v1"))
        .stdout(predicate::str::contains("random_number_v1"))
        .stdout(predicate::str::contains("tokenizer_repetitions_v2r2"));
}

#[test]
fn test_list_languages() {
    spanmark()
        .args(["list", "languages"])
        .assert()
        .success()
        .stdout(predicate::str::contains("eng\ten\teng"))
        .stdout(predicate::str::contains("jpn\tja\tjpn\tspaceless"));
}

#[test]
fn test_external_language_config() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("languages.toml");
    fs::write(
        &config,
        r#"
spaceless_languages = []

[languages.tlh]
iso639_1 = "tl"
iso639_3 = "tlh"
min_words_per_line = 1
"#,
    )
    .unwrap();

    spanmark()
        .args(["list", "languages", "-l"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("tlh\ttl\ttlh"))
        .stdout(predicate::str::contains("eng").not());
}
