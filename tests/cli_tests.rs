//! Integration tests for the docbatch binary.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Stands in for docling: writes `<stem>.<ext>` into the `--output` directory.
const STUB_CONVERTER: &str = r#"
out=""; to=""
while [ $# -gt 1 ]; do
  case "$1" in
    --output) out="$2"; shift 2 ;;
    --to) to="$2"; shift 2 ;;
    *) shift ;;
  esac
done
name=$(basename "$1"); stem="${name%.*}"
case "$to" in
  md) printf '# %s\n' "$stem" > "$out/$stem.md" ;;
  json) printf '{"name":"%s"}' "$stem" > "$out/$stem.json" ;;
  *) printf '%s\n' "$stem" > "$out/$stem.txt" ;;
esac
"#;

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_docbatch"))
}

fn write_config(dir: &Path, config: &Value) -> PathBuf {
    let path = dir.join("config.json");
    fs::write(&path, serde_json::to_string_pretty(config).unwrap()).unwrap();
    path
}

fn stub_config(output_dir: &Path, overwrite: bool) -> Value {
    json!({
        "supported_formats": [".pdf", ".docx"],
        "output_settings": {
            "output_dir": output_dir,
            "overwrite_existing": overwrite
        },
        "converter_settings": {
            "command": "sh",
            "extra_args": ["-c", STUB_CONVERTER, "stub"]
        }
    })
}

fn broken_converter_config(output_dir: &Path) -> Value {
    json!({
        "supported_formats": [".pdf"],
        "output_settings": { "output_dir": output_dir },
        "converter_settings": { "command": "docbatch-test-missing-converter" }
    })
}

fn touch(path: PathBuf) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"%PDF-1.4").unwrap();
}

#[test]
fn test_malformed_config_exits_with_error() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("config.json");
    fs::write(&config, "{ \"supported_formats\": [").unwrap();
    touch(temp.path().join("doc.pdf"));

    cli()
        .arg("--config")
        .arg(&config)
        .arg("--doc-file")
        .arg(temp.path().join("doc.pdf"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid JSON in configuration file"))
        .stderr(predicate::str::contains("Processing").not());
}

#[test]
fn test_missing_config_exits_with_error() {
    let temp = TempDir::new().unwrap();
    touch(temp.path().join("doc.pdf"));

    cli()
        .arg("--config")
        .arg(temp.path().join("nope.json"))
        .arg("--doc-file")
        .arg(temp.path().join("doc.pdf"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn test_missing_doc_file_fails_before_conversion() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");
    let config = write_config(temp.path(), &stub_config(&out, false));

    cli()
        .arg("--config")
        .arg(&config)
        .arg("--doc-file")
        .arg(temp.path().join("missing.pdf"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("File not found"))
        .stderr(predicate::str::contains("Processing:").not());

    assert!(!out.exists());
}

#[test]
fn test_missing_doc_dir_exits_with_error() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), &stub_config(&temp.path().join("out"), false));

    cli()
        .arg("--config")
        .arg(&config)
        .arg("--doc-dir")
        .arg(temp.path().join("missing"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Directory not found"));
}

#[test]
fn test_empty_directory_succeeds() {
    let temp = TempDir::new().unwrap();
    let docs = temp.path().join("docs");
    fs::create_dir_all(&docs).unwrap();
    fs::write(docs.join("notes.txt"), "plain").unwrap();
    let config = write_config(temp.path(), &stub_config(&temp.path().join("out"), false));

    cli()
        .arg("--config")
        .arg(&config)
        .arg("--doc-dir")
        .arg(&docs)
        .assert()
        .success()
        .stderr(predicate::str::contains("No supported files found in"));
}

#[test]
fn test_all_failures_exit_with_error() {
    let temp = TempDir::new().unwrap();
    let docs = temp.path().join("docs");
    touch(docs.join("a.pdf"));
    touch(docs.join("b.pdf"));
    let out = temp.path().join("out");
    let config = write_config(temp.path(), &broken_converter_config(&out));

    cli()
        .arg("--config")
        .arg(&config)
        .arg("--doc-dir")
        .arg(&docs)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Processing 2 file(s)"))
        .stderr(predicate::str::contains("Successful: 0, Failed: 2"));
}

#[test]
fn test_input_flags_are_mutually_exclusive() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), &stub_config(&temp.path().join("out"), false));

    cli()
        .arg("--config")
        .arg(&config)
        .arg("--doc-file")
        .arg("a.pdf")
        .arg("--doc-dir")
        .arg("docs")
        .assert()
        .code(2);
}

#[cfg(unix)]
#[test]
fn test_directory_batch_writes_markdown() {
    let temp = TempDir::new().unwrap();
    let docs = temp.path().join("docs");
    touch(docs.join("alpha.pdf"));
    touch(docs.join("nested/beta.docx"));
    touch(docs.join("skip.html"));
    let out = temp.path().join("out");
    let config = write_config(temp.path(), &stub_config(&out, false));

    cli()
        .arg("--config")
        .arg(&config)
        .arg("--doc-dir")
        .arg(&docs)
        .arg("-v")
        .assert()
        .success()
        .stderr(predicate::str::contains("Successful: 2, Failed: 0"));

    assert_eq!(fs::read_to_string(out.join("alpha.md")).unwrap(), "# alpha\n");
    assert_eq!(fs::read_to_string(out.join("beta.md")).unwrap(), "# beta\n");
    assert!(!out.join("skip.md").exists());
}

#[cfg(unix)]
#[test]
fn test_rerun_without_overwrite_adds_suffix() {
    let temp = TempDir::new().unwrap();
    let doc = temp.path().join("report.pdf");
    touch(doc.clone());
    let out = temp.path().join("out");
    let config = write_config(temp.path(), &stub_config(&out, false));

    for _ in 0..3 {
        cli()
            .arg("--config")
            .arg(&config)
            .arg("--doc-file")
            .arg(&doc)
            .arg("--output-format")
            .arg("text")
            .assert()
            .success();
    }

    assert!(out.join("report.txt").exists());
    assert!(out.join("report_1.txt").exists());
    assert!(out.join("report_2.txt").exists());
}

#[cfg(unix)]
#[test]
fn test_rerun_with_overwrite_replaces_file() {
    let temp = TempDir::new().unwrap();
    let doc = temp.path().join("report.pdf");
    touch(doc.clone());
    let out = temp.path().join("out");
    let config = write_config(temp.path(), &stub_config(&out, true));

    for _ in 0..2 {
        cli()
            .arg("--config")
            .arg(&config)
            .arg("--doc-file")
            .arg(&doc)
            .arg("--output-format")
            .arg("json")
            .assert()
            .success();
    }

    assert_eq!(
        fs::read_to_string(out.join("report.json")).unwrap(),
        "{\n  \"name\": \"report\"\n}"
    );
    assert!(!out.join("report_1.json").exists());
}

#[cfg(unix)]
#[test]
fn test_format_to_markdown_overrides_output_format() {
    let temp = TempDir::new().unwrap();
    let doc = temp.path().join("report.pdf");
    touch(doc.clone());
    let out = temp.path().join("out");
    let config = write_config(temp.path(), &stub_config(&out, false));

    cli()
        .arg("--config")
        .arg(&config)
        .arg("--doc-file")
        .arg(&doc)
        .arg("--output-format")
        .arg("json")
        .arg("--format-to-markdown")
        .assert()
        .success();

    assert!(out.join("report.md").exists());
    assert!(!out.join("report.json").exists());
}
