use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

fn doc_intake() -> Command {
    let mut cmd = Command::cargo_bin("doc_intake").expect("binary builds");
    cmd.env("RUST_LOG", "off");
    cmd
}

#[test]
fn policy_lists_types_and_limit() {
    doc_intake()
        .arg("policy")
        .assert()
        .success()
        .stdout(predicate::str::contains("image/jpg"))
        .stdout(predicate::str::contains("max file size: 10485760 bytes"));
}

#[test]
fn policy_reflects_size_override() {
    doc_intake()
        .args(["--max-file-size", "2048", "policy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("max file size: 2048 bytes"));
}

#[test]
fn inspect_reports_rejection() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "plain text").unwrap();

    doc_intake()
        .arg("inspect")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("media type: application/octet-stream"))
        .stdout(predicate::str::contains(
            "verdict: rejected (File type application/octet-stream is not supported.",
        ));
}

#[test]
fn process_exports_and_prints_preview() {
    let dir = TempDir::new().unwrap();
    let image = dir.path().join("photo.png");
    let text = dir.path().join("notes.txt");
    std::fs::write(&image, PNG_HEADER).unwrap();
    std::fs::write(&text, "plain text").unwrap();
    let out = dir.path().join("out");

    doc_intake()
        .arg("process")
        .arg(&image)
        .arg(&text)
        .args(["--wait-previews", "--select", "1", "--overlay", "tables", "--export", "all", "--output-dir"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("accepted photo.png (image/png"))
        .stdout(predicate::str::contains("error: File type application/octet-stream"))
        .stdout(predicate::str::contains("language English 95.2%"))
        .stdout(predicate::str::contains("\"kind\": \"image\""))
        .stdout(predicate::str::contains("\"tables\""));

    let bundle = std::fs::read_to_string(out.join("all-extracted-content.txt")).unwrap();
    assert!(bundle.starts_with("=== MARKDOWN ===\n# Document Title"));
}

#[test]
fn process_respects_size_override() {
    let dir = TempDir::new().unwrap();
    let image = dir.path().join("photo.png");
    std::fs::write(&image, PNG_HEADER).unwrap();

    doc_intake()
        .args(["--max-file-size", "4", "process"])
        .arg(&image)
        .assert()
        .success()
        .stdout(predicate::str::contains("error: File size exceeds 4 bytes limit."))
        .stdout(predicate::str::contains("summary: No data available to describe."));
}

#[test]
fn process_requires_files() {
    doc_intake().arg("process").assert().failure();
}
