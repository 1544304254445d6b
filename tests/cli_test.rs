//! CLI integration tests for the schema-form binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("schema-form"))
}

// Helper to create a temp JSON file
fn write_temp_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

mod normalize_command {
    use super::*;

    #[test]
    fn basic_normalize() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(
            &dir,
            "schema.json",
            r#"{
                "properties": {
                    "enabled": { "type": "boolean" }
                }
            }"#,
        );

        cmd()
            .args(["normalize", schema.to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""type":"object""#))
            .stdout(predicate::str::contains(r#""format":"checkbox""#))
            .stderr(predicate::str::contains("W001"));
    }

    #[test]
    fn quiet_suppresses_advisories() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "schema.json", r#"{"properties": {}}"#);

        cmd()
            .args(["normalize", schema.to_str().unwrap(), "--quiet"])
            .assert()
            .success()
            .stderr(predicate::str::contains("W001").not());
    }

    #[test]
    fn normalize_with_pretty() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(
            &dir,
            "schema.json",
            r#"{"type":"object","properties":{"id":{"type":"string"}}}"#,
        );

        cmd()
            .args(["normalize", schema.to_str().unwrap(), "--pretty"])
            .assert()
            .success()
            // Pretty output has newlines and indentation
            .stdout(predicate::str::contains("{\n"));
    }

    #[test]
    fn normalize_with_output_file() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(
            &dir,
            "schema.json",
            r#"{"type":"object","properties":{"id":{"type":"string"}}}"#,
        );
        let output = dir.path().join("output.json");

        cmd()
            .args([
                "normalize",
                schema.to_str().unwrap(),
                "--output",
                output.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::is_empty());

        let content = fs::read_to_string(&output).unwrap();
        assert!(content.contains(r#""type":"object""#));
    }

    #[test]
    fn missing_file_exits_3() {
        cmd()
            .args(["normalize", "/nonexistent/schema.json"])
            .assert()
            .failure()
            .code(3)
            .stderr(predicate::str::contains("file not found"));
    }

    #[test]
    fn invalid_json_exits_2() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "schema.json", "{ not json }");

        cmd()
            .args(["normalize", schema.to_str().unwrap()])
            .assert()
            .failure()
            .code(2)
            .stderr(predicate::str::contains("invalid JSON"));
    }
}

mod inspect_command {
    use super::*;

    #[test]
    fn flat_schema_lists_fields() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(
            &dir,
            "schema.json",
            r#"{
                "type": "object",
                "properties": {
                    "host": { "type": "string", "propertyOrder": 2 },
                    "port": { "type": "number", "propertyOrder": 1 }
                }
            }"#,
        );

        cmd()
            .args(["inspect", schema.to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::contains("Field schema"))
            .stdout(predicate::str::contains("- port"))
            .stdout(predicate::str::contains("- host"));
    }

    #[test]
    fn grouped_schema_lists_groups() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(
            &dir,
            "schema.json",
            r#"{
                "type": "object",
                "properties": {
                    "general": {
                        "type": "object",
                        "title": "General",
                        "properties": { "name": { "type": "string" } }
                    }
                }
            }"#,
        );

        cmd()
            .args(["inspect", schema.to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::contains("Collection schema: 1 group(s)"))
            .stdout(predicate::str::contains("general (General)"));
    }

    #[test]
    fn required_and_empty_narrowing_with_values() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(
            &dir,
            "schema.json",
            r#"{
                "type": "object",
                "required": ["host", "port"],
                "properties": {
                    "host": { "type": "string" },
                    "port": { "type": "number" }
                }
            }"#,
        );
        let values = write_temp_file(&dir, "values.json", r#"{ "host": "ldap://x", "port": null }"#);

        cmd()
            .args([
                "inspect",
                schema.to_str().unwrap(),
                "--values",
                values.to_str().unwrap(),
                "--required-and-empty",
                "--json",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""display": true"#))
            .stdout(predicate::str::contains(r#""port""#))
            .stdout(predicate::str::contains(r#""host""#).not());
    }

    #[test]
    fn fully_filled_form_reports_nothing_to_display() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(
            &dir,
            "schema.json",
            r#"{
                "type": "object",
                "required": ["host"],
                "properties": { "host": { "type": "string" } }
            }"#,
        );
        let values = write_temp_file(&dir, "values.json", r#"{ "host": "filled" }"#);

        cmd()
            .args([
                "inspect",
                schema.to_str().unwrap(),
                "--values",
                values.to_str().unwrap(),
                "--required-and-empty",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Nothing to display"));
    }

    #[test]
    fn narrowing_flags_conflict() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "schema.json", r#"{"type": "object"}"#);

        cmd()
            .args([
                "inspect",
                schema.to_str().unwrap(),
                "--required-only",
                "--required-and-empty",
            ])
            .assert()
            .failure();
    }

    #[test]
    fn json_report_includes_data() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(
            &dir,
            "schema.json",
            r#"{
                "type": "object",
                "properties": { "host": { "type": "string" } }
            }"#,
        );
        let values = write_temp_file(&dir, "values.json", r#"{ "host": "ldap://x" }"#);

        cmd()
            .args([
                "inspect",
                schema.to_str().unwrap(),
                "--values",
                values.to_str().unwrap(),
                "--json",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""grouped": false"#))
            .stdout(predicate::str::contains(r#""host": "ldap://x""#));
    }
}

mod check_command {
    use super::*;

    #[test]
    fn valid_directory_passes() {
        let dir = TempDir::new().unwrap();
        write_temp_file(
            &dir,
            "valid.json",
            r#"{"type": "object", "properties": {"id": {"type": "string"}}}"#,
        );

        cmd()
            .args(["check", dir.path().to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::contains("all passed"));
    }

    #[test]
    fn syntax_error_fails() {
        let dir = TempDir::new().unwrap();
        write_temp_file(&dir, "broken.json", "{ not json }");

        cmd()
            .args(["check", dir.path().to_str().unwrap()])
            .assert()
            .failure()
            .code(1)
            .stdout(predicate::str::contains("E001"));
    }

    #[test]
    fn warnings_pass_unless_strict() {
        let dir = TempDir::new().unwrap();
        write_temp_file(&dir, "warn.json", r#"{"properties": {}}"#);

        cmd()
            .args(["check", dir.path().to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::contains("W001"));

        cmd()
            .args(["check", dir.path().to_str().unwrap(), "--strict"])
            .assert()
            .failure()
            .code(1);
    }

    #[test]
    fn json_format_output() {
        let dir = TempDir::new().unwrap();
        write_temp_file(
            &dir,
            "warn.json",
            r#"{"type": "object", "properties": {"userPassword": {"type": "string"}}}"#,
        );

        cmd()
            .args(["check", dir.path().to_str().unwrap(), "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""code": "W003""#))
            .stdout(predicate::str::contains(r#""severity": "warning""#));
    }

    #[test]
    fn missing_path_exits_2() {
        cmd()
            .args(["check", "/nonexistent/schemas"])
            .assert()
            .failure()
            .code(2)
            .stderr(predicate::str::contains("path not found"));
    }
}
