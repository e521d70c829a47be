//! End-to-end CLI tests for chatstats.
//!
//! These tests run the actual binary with various arguments and check its
//! output and the report files it writes.
//!
//! # Test Categories
//!
//! - **Basic functionality**: Each export variant works via CLI
//! - **Report formats**: SVG, CSV, JSON generation
//! - **Flags**: All CLI flags work correctly
//! - **Error handling**: Proper error messages for bad input
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test cli_e2e
//! ```

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::{TempDir, tempdir};

// ============================================================================
// Test Fixtures
// ============================================================================

/// Creates a temporary directory with export fixtures.
fn setup_fixtures() -> TempDir {
    let dir = tempdir().expect("Failed to create temp dir");

    let json = r#"{
  "participants": [{"name": "Alice"}, {"name": "Bob"}],
  "messages": [
    {"sender_name": "Alice", "timestamp_ms": 1577836800000, "content": "Привет мир"},
    {"sender_name": "Bob", "timestamp_ms": 1577840400000, "content": "привет, как дела?"},
    {"sender_name": "Alice", "timestamp_ms": 1577844000000, "content": "Привет!"},
    {"sender_name": "Bob", "timestamp_ms": 1577847600000, "photos": [{"uri": "p.jpg"}]}
  ]
}"#;
    fs::write(dir.path().join("chat.json"), json).unwrap();

    let rich = r#"<html><body>
<div class="msg_item" id="msg1"><div class="from"><b>Алина</b> <a href="/m1">2019.05.16 16:52:51</a></div><div class="msg_body">1111111111</div></div>
<div class="msg_item" id="msg2"><div class="from"><b>Иван</b> <a href="/m2">2019.05.17 08:00:00</a></div><div class="msg_body">Доброе утро</div></div>
</body></html>"#;
    fs::write(dir.path().join("messages.html"), rich).unwrap();

    let simple = r#"<div class="msg_body">кот и пёс</div><div class="msg_body">кот</div>"#;
    fs::write(dir.path().join("simple.html"), simple).unwrap();

    let media_only = r#"[{"sender_name": "Bob", "timestamp_ms": 0, "sticker": {"uri": "s.png"}}]"#;
    fs::write(dir.path().join("media_only.json"), media_only).unwrap();

    fs::write(dir.path().join("broken.json"), "{\"messages\": [").unwrap();

    dir
}

fn chatstats_cmd() -> Command {
    let cmd = std::process::Command::new(env!("CARGO_BIN_EXE_chatstats"));
    Command::from_std(cmd)
}

fn stopwords() -> String {
    format!("{}/data/stopwords_ru.txt", env!("CARGO_MANIFEST_DIR"))
}

fn input(dir: &TempDir, name: &str) -> String {
    dir.path().join(name).to_str().unwrap().to_string()
}

fn out_dir(dir: &TempDir) -> PathBuf {
    dir.path().join("reports")
}

fn run_ok(dir: &TempDir, extra: &[&str]) -> assert_cmd::assert::Assert {
    chatstats_cmd()
        .args(["--stopwords", &stopwords(), "-o", out_dir(dir).to_str().unwrap(), "--utc"])
        .args(extra)
        .assert()
        .success()
}

// ============================================================================
// Basic Functionality Tests
// ============================================================================

mod basic_functionality {
    use super::*;

    #[test]
    fn test_json_export_csv_reports() {
        let fixtures = setup_fixtures();
        run_ok(&fixtures, &[&input(&fixtures, "chat.json"), "--chart", "csv"])
            .stdout(predicate::str::contains("Done"))
            .stdout(predicate::str::contains("Messages:  3"));

        let out = out_dir(&fixtures);
        for suffix in ["word", "person", "date", "hour"] {
            assert!(out.join(format!("chat_{suffix}_frequency.csv")).exists(), "{suffix}");
        }

        let words = fs::read_to_string(out.join("chat_word_frequency.csv")).unwrap();
        let lines: Vec<&str> = words.lines().collect();
        assert_eq!(lines[0], "Word;Count");
        assert_eq!(lines[1], "привет;3");
        assert!(!words.contains("как"));

        let hours = fs::read_to_string(out.join("chat_hour_frequency.csv")).unwrap();
        assert_eq!(hours.lines().collect::<Vec<_>>(), ["Hour;Count", "0;1", "1;1", "2;1"]);
    }

    #[test]
    fn test_rich_html_json_reports() {
        let fixtures = setup_fixtures();
        run_ok(&fixtures, &[&input(&fixtures, "messages.html"), "--chart", "json"])
            .stdout(predicate::str::contains("HTML (rich)"));

        let persons = fs::read_to_string(out_dir(&fixtures).join("messages_person_frequency.json")).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&persons).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 2);
        assert_eq!(parsed[0]["label"], "Алина");

        let dates = fs::read_to_string(out_dir(&fixtures).join("messages_date_frequency.json")).unwrap();
        assert!(dates.contains("16/05/19"));
    }

    #[test]
    fn test_svg_is_default() {
        let fixtures = setup_fixtures();
        run_ok(&fixtures, &[&input(&fixtures, "chat.json")]);

        let svg = fs::read_to_string(out_dir(&fixtures).join("chat_word_frequency.svg")).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Most used words in 3 messages in chat"));
    }

    #[test]
    fn test_simple_html_writes_only_word_report() {
        let fixtures = setup_fixtures();
        run_ok(&fixtures, &[&input(&fixtures, "simple.html"), "--chart", "csv"])
            .stdout(predicate::str::contains("HTML (simple)"));

        let out = out_dir(&fixtures);
        assert!(out.join("simple_word_frequency.csv").exists());
        assert!(!out.join("simple_person_frequency.csv").exists());
        assert!(!out.join("simple_date_frequency.csv").exists());
    }

    #[test]
    fn test_multiple_files_are_combined() {
        let fixtures = setup_fixtures();
        run_ok(
            &fixtures,
            &[
                &input(&fixtures, "chat.json"),
                &input(&fixtures, "messages.html"),
                "--chart",
                "csv",
            ],
        )
        .stdout(predicate::str::contains("Messages:  5"));

        let persons = fs::read_to_string(out_dir(&fixtures).join("combined_person_frequency.csv")).unwrap();
        assert_eq!(persons.lines().count(), 5);
    }

    #[test]
    fn test_directory_input() {
        let fixtures = setup_fixtures();
        let dir = tempdir().unwrap();
        fs::copy(fixtures.path().join("chat.json"), dir.path().join("a.json")).unwrap();
        fs::copy(fixtures.path().join("simple.html"), dir.path().join("b.html")).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        run_ok(&fixtures, &[dir.path().to_str().unwrap(), "--chart", "csv"])
            .stdout(predicate::str::contains("2 analyzed, 0 failed"));
    }
}

// ============================================================================
// Flags Tests
// ============================================================================

mod flags {
    use super::*;

    #[test]
    fn test_top_limits_word_report() {
        let fixtures = setup_fixtures();
        run_ok(&fixtures, &[&input(&fixtures, "chat.json"), "--chart", "csv", "--top", "1"]);

        let words = fs::read_to_string(out_dir(&fixtures).join("chat_word_frequency.csv")).unwrap();
        assert_eq!(words.lines().collect::<Vec<_>>(), ["Word;Count", "привет;3"]);
    }

    #[test]
    fn test_format_override() {
        let fixtures = setup_fixtures();
        let renamed = fixtures.path().join("export.dump");
        fs::copy(fixtures.path().join("chat.json"), &renamed).unwrap();

        run_ok(&fixtures, &[renamed.to_str().unwrap(), "--format", "json", "--chart", "csv"])
            .stdout(predicate::str::contains("Messages:  3"));
    }

    #[test]
    fn test_legacy_stopwords() {
        let fixtures = setup_fixtures();
        run_ok(
            &fixtures,
            &[&input(&fixtures, "chat.json"), "--chart", "csv", "--legacy-stopwords"],
        );

        let words = fs::read_to_string(out_dir(&fixtures).join("chat_word_frequency.csv")).unwrap();
        assert!(words.contains("привет;3"));
    }

    #[test]
    fn test_verbose_logs_to_stderr() {
        let fixtures = setup_fixtures();
        run_ok(&fixtures, &[&input(&fixtures, "chat.json"), "--chart", "csv", "-v"])
            .stderr(predicate::str::contains("analyzed export"));
    }

    #[test]
    fn test_help() {
        chatstats_cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("--legacy-stopwords"))
            .stdout(predicate::str::contains("--output-dir"));
    }

    #[test]
    fn test_version() {
        chatstats_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
}

// ============================================================================
// Error Handling Tests
// ============================================================================

mod error_handling {
    use super::*;

    #[test]
    fn test_no_arguments_prints_usage() {
        chatstats_cmd()
            .assert()
            .failure()
            .stderr(predicate::str::contains("Usage"));
    }

    #[test]
    fn test_invalid_chart_format() {
        let fixtures = setup_fixtures();
        chatstats_cmd()
            .args([&input(&fixtures, "chat.json"), "--chart", "png"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid value"));
    }

    #[test]
    fn test_missing_stopwords_is_fatal() {
        let fixtures = setup_fixtures();
        chatstats_cmd()
            .args([&input(&fixtures, "chat.json"), "--stopwords", "/no/such/stopwords.txt"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Cannot load stop words"));
    }

    #[test]
    fn test_all_files_failed() {
        let fixtures = setup_fixtures();
        chatstats_cmd()
            .args(["--stopwords", &stopwords(), &input(&fixtures, "broken.json")])
            .assert()
            .failure()
            .stderr(predicate::str::contains("All 1 input file(s) failed"));
    }

    #[test]
    fn test_one_failed_file_is_reported() {
        let fixtures = setup_fixtures();
        run_ok(
            &fixtures,
            &[
                &input(&fixtures, "broken.json"),
                &input(&fixtures, "chat.json"),
                "--chart",
                "csv",
            ],
        )
        .stdout(predicate::str::contains("broken.json"))
        .stdout(predicate::str::contains("1 analyzed, 1 failed"));
    }

    #[test]
    fn test_empty_directory_does_not_stop_batch() {
        let fixtures = setup_fixtures();
        let empty = fixtures.path().join("empty");
        fs::create_dir(&empty).unwrap();

        run_ok(
            &fixtures,
            &[&input(&fixtures, "chat.json"), empty.to_str().unwrap(), "--chart", "csv"],
        )
        .stdout(predicate::str::contains("directory contains no"))
        .stdout(predicate::str::contains("1 analyzed, 1 failed"));

        assert!(out_dir(&fixtures).join("combined_word_frequency.csv").exists());
    }

    #[test]
    fn test_unsupported_extension() {
        let fixtures = setup_fixtures();
        let txt = fixtures.path().join("chat.txt");
        fs::write(&txt, "hello").unwrap();

        chatstats_cmd()
            .args(["--stopwords", &stopwords(), txt.to_str().unwrap()])
            .assert()
            .failure()
            .stdout(predicate::str::contains("Unsupported export format"));
    }

    #[test]
    fn test_no_messages_extracted() {
        let fixtures = setup_fixtures();
        run_ok(&fixtures, &[&input(&fixtures, "media_only.json")])
            .stdout(predicate::str::contains("No messages extracted"));

        assert!(!out_dir(&fixtures).exists());
    }
}
