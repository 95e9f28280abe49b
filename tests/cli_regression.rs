// Regression tests for the yaml-xref binary.
// Requires: assert_cmd, predicates, tempfile crates in [dev-dependencies]

mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;

use common::write_tree;

fn xref() -> Command {
    let mut cmd = Command::cargo_bin("yaml-xref").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn scan_prints_one_unit() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("manual");
    write_tree(
        &root,
        &[("b.yml", "k: v\n"), ("a/c.yml", "k: v\n"), ("skip.txt", "")],
    );

    let output = xref().arg("scan").arg(&root).assert().success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    let units: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(units.as_array().unwrap().len(), 1);
    assert_eq!(units[0]["Name"], "manual");
    assert_eq!(units[0]["Type"], "yaml");
    assert_eq!(units[0]["Files"], serde_json::json!(["a/c.yml", "b.yml"]));
}

#[test]
fn graph_reads_the_unit_from_stdin() {
    let dir = tempfile::tempdir().unwrap();
    write_tree(dir.path(), &[("a.yml", "one: two\n")]);

    let expected = concat!(
        r#"{"Defs":[],"Refs":["#,
        r#"{"DefUnitType":"yaml","DefUnit":"a","DefPath":"./one","Unit":"docs","File":"a.yml","Start":0,"End":3,"Def":true},"#,
        r#"{"DefUnitType":"yaml","DefUnit":"a","DefPath":"./two","Unit":"docs","File":"a.yml","Start":5,"End":8,"Def":true}"#,
        "]}\n"
    );

    xref()
        .arg("graph")
        .arg("--root")
        .arg(dir.path())
        .write_stdin(r#"[{"Name":"docs","Type":"yaml","Files":["a.yml"]}]"#)
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn graph_accepts_a_single_unit_object() {
    let dir = tempfile::tempdir().unwrap();
    write_tree(dir.path(), &[("a.yml", "k: v\n")]);

    xref()
        .arg("graph")
        .arg("--root")
        .arg(dir.path())
        .arg("--emit-definitions")
        .write_stdin(r#"{"Name":"docs","Type":"yaml","Repo":"o/docs","Files":["a.yml"]}"#)
        .assert()
        .success()
        .stdout(contains(r#""TreePath":"./yaml-manual/docs""#).and(contains(r#""Repo":"o/docs""#)));
}

#[test]
fn multiple_units_fail_without_output() {
    xref()
        .arg("graph")
        .write_stdin(
            r#"[{"Name":"a","Type":"yaml","Files":[]},{"Name":"b","Type":"yaml","Files":[]}]"#,
        )
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(contains("multiple units"));
}

#[test]
fn malformed_unit_data_fails() {
    xref()
        .arg("graph")
        .write_stdin("not json")
        .assert()
        .failure()
        .stderr(contains("malformed source unit description"));
}

#[test]
fn missing_document_is_reported_and_skipped() {
    let dir = tempfile::tempdir().unwrap();
    write_tree(dir.path(), &[("a.yml", "k: v\n")]);

    xref()
        .arg("graph")
        .arg("--root")
        .arg(dir.path())
        .write_stdin(r#"[{"Name":"docs","Type":"yaml","Files":["gone.yml","a.yml"]}]"#)
        .assert()
        .success()
        .stdout(contains(r#""File":"a.yml""#).and(contains("gone.yml").not()))
        .stderr(contains("gone.yml").and(contains("1 of 2 documents")));
}

#[test]
fn graph_reads_input_from_a_file() {
    let dir = tempfile::tempdir().unwrap();
    write_tree(
        dir.path(),
        &[
            ("a.yml", "k: v\n"),
            ("unit.json", r#"{"Name":"docs","Type":"yaml","Files":["a.yml"]}"#),
        ],
    );

    xref()
        .arg("graph")
        .arg("--root")
        .arg(dir.path())
        .arg("--input")
        .arg(dir.path().join("unit.json"))
        .assert()
        .success()
        .stdout(contains(r#""Start":3,"End":4"#));
}

#[test]
fn config_file_changes_the_namespace() {
    let dir = tempfile::tempdir().unwrap();
    write_tree(
        dir.path(),
        &[
            ("a.yml", "k: v\n"),
            ("xref.yml", "emit_definitions: true\ndefinition_namespace: handbook\n"),
        ],
    );

    xref()
        .arg("--config")
        .arg(dir.path().join("xref.yml"))
        .arg("graph")
        .arg("--root")
        .arg(dir.path())
        .write_stdin(r#"{"Name":"docs","Type":"yaml","Files":["a.yml"]}"#)
        .assert()
        .success()
        .stdout(contains(r#""TreePath":"./handbook/docs""#));
}

#[test]
fn tokens_lists_spans() {
    let dir = tempfile::tempdir().unwrap();
    write_tree(dir.path(), &[("a.yml", "one: two\n")]);

    xref()
        .arg("tokens")
        .arg(dir.path().join("a.yml"))
        .assert()
        .success()
        .stdout(contains("0:0\t0..0\t\"\"").and(contains("0:5\t5..8\t\"two\"")));
}

#[test]
fn tokens_reports_parse_errors() {
    let dir = tempfile::tempdir().unwrap();
    write_tree(dir.path(), &[("bad.yml", "a: b\n  c: d\n")]);

    xref()
        .arg("tokens")
        .arg(dir.path().join("bad.yml"))
        .assert()
        .failure()
        .stderr(contains("parse error"));
}
