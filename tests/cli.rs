use std::io::{Cursor, Read};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const KEY: &str = "0123456789abcdef0123456789abcdef";

fn decryptor(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("decryptor").unwrap();
    cmd.env("DECRYPTOR_CONFIG_DIR", config_dir.path())
        .env_remove("DECRYPTOR_KEY")
        .env_remove("RUST_LOG");
    cmd
}

fn seal(config_dir: &TempDir, value: &str) -> String {
    let output = decryptor(config_dir)
        .args(["seal", value, "--key", KEY])
        .output()
        .unwrap();
    assert!(output.status.success());
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}

fn write_ssn_file(dir: &TempDir) -> (std::path::PathBuf, String) {
    let sealed = seal(dir, "111-22-3333");
    let path = dir.path().join("people.csv");
    std::fs::write(&path, format!("id,ssn\n1,{}\n", sealed)).unwrap();
    (path, sealed)
}

#[test]
fn view_decrypts_flagged_column() {
    let dir = TempDir::new().unwrap();
    let (path, _) = write_ssn_file(&dir);

    decryptor(&dir)
        .arg("view")
        .arg(&path)
        .args(["--encrypt", "ssn", "--key", KEY])
        .assert()
        .success()
        .stdout(predicate::str::contains("111-22-3333"))
        .stdout(predicate::str::contains("ssn [enc]"));
}

#[test]
fn view_with_wrong_key_shows_ciphertext() {
    let dir = TempDir::new().unwrap();
    let (path, sealed) = write_ssn_file(&dir);

    decryptor(&dir)
        .arg("view")
        .arg(&path)
        .args(["--encrypt", "#1", "--key", "ffffffffffffffffffffffffffffffff"])
        .assert()
        .success()
        .stdout(predicate::str::contains(sealed))
        .stdout(predicate::str::contains("111-22-3333").not());
}

#[test]
fn export_writes_zip_archive() {
    let dir = TempDir::new().unwrap();
    let (path, _) = write_ssn_file(&dir);

    decryptor(&dir)
        .arg("export")
        .arg(&path)
        .args(["--format", "csv", "--encrypt", "ssn", "--key", KEY, "--out"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("exported-data.csv"));

    let bytes = std::fs::read(dir.path().join("exported-data.zip")).unwrap();
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut text = String::new();
    archive
        .by_name("exported-data.csv")
        .unwrap()
        .read_to_string(&mut text)
        .unwrap();
    assert_eq!(text, "id,ssn\n1,111-22-3333\n");
}

#[test]
fn corrupt_file_reports_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.xlsx");
    std::fs::write(&path, b"PK\x03\x04 not really a workbook").unwrap();

    decryptor(&dir)
        .arg("columns")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Parse error"));
}

#[test]
fn unknown_column_fails() {
    let dir = TempDir::new().unwrap();
    let (path, _) = write_ssn_file(&dir);

    decryptor(&dir)
        .arg("view")
        .arg(&path)
        .args(["--encrypt", "email"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Column not found: email"));
}
