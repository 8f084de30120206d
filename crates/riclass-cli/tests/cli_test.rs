//! End-to-end tests for the riclass binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn riclass() -> Command {
    Command::cargo_bin("riclass").unwrap()
}

#[test]
fn process_csv_prints_totals() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bilancio.csv");
    fs::write(
        &input,
        "Codice;Descrizione;Saldo\n\
         1-1-10;Cassa contanti;1.500,00\n\
         2-2-1;Debiti verso fornitori;500,00\n",
    )
    .unwrap();

    riclass()
        .args(["process", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("TOTALE ATTIVO"))
        .stdout(predicate::str::contains("1.500,00"))
        .stdout(predicate::str::contains("QUADRATURA"));
}

#[test]
fn process_json_writes_csv_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("conti.json");
    fs::write(
        &input,
        r#"[{"codice": "1-1-10", "descrizione": "Cassa", "valore": 100.0}]"#,
    )
    .unwrap();
    let output = dir.path().join("report.csv");

    riclass()
        .args([
            "process",
            input.to_str().unwrap(),
            "--format",
            "csv",
            "--output",
            output.to_str().unwrap(),
        ])
        .assert()
        .success();

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.contains("attivo.circolante.disponibilita"));
    assert!(written.contains("1_1_10"));
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bilancio.xlsx");
    fs::write(&input, "x").unwrap();

    riclass()
        .args(["process", input.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported input format"));
}

#[test]
fn taxonomy_show_prints_default_mapping() {
    riclass()
        .args(["taxonomy", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("disponibilita"))
        .stdout(predicate::str::contains("voci"));
}

#[test]
fn taxonomy_validate_names_the_broken_node() {
    let dir = tempfile::tempdir().unwrap();
    let mapping = dir.path().join("mapping.json");
    fs::write(
        &mapping,
        r#"{"attivo": {"liquidita": {"pattern": "(unclosed"}}, "passivo": {}}"#,
    )
    .unwrap();

    riclass()
        .args(["taxonomy", "validate", mapping.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("attivo.liquidita"));
}

#[test]
fn batch_writes_summary_csv() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("a.csv"),
        "Codice;Descrizione;Saldo\n1-1-10;Cassa contanti;100,00\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("b.csv"),
        "Codice;Descrizione;Saldo\n2-2-1;Debiti verso fornitori;40,00\n",
    )
    .unwrap();
    let out_dir = dir.path().join("out");

    riclass()
        .args([
            "batch",
            &format!("{}/*.csv", dir.path().display()),
            "--output-dir",
            out_dir.to_str().unwrap(),
            "--summary",
        ])
        .assert()
        .success();

    let summary = fs::read_to_string(out_dir.join("summary.csv")).unwrap();
    assert!(summary.contains("a.csv"));
    assert!(summary.contains("b.csv"));
    assert!(out_dir.join("a.json").exists());
}
