//! Integration tests for the Octopus CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const SCHEMA: &str = r#"{
  "author": "lechuck",
  "name": "shop",
  "version": "1.0",
  "tables": [
    {
      "name": "tb_user",
      "group": "common",
      "columns": [
        {"name": "id", "type": "long", "pk": true, "autoInc": true},
        {"name": "name", "type": "string", "size": 100, "unique": true},
        {"name": "created_at", "type": "datetime"}
      ]
    },
    {
      "name": "tb_order",
      "group": "shop",
      "columns": [
        {"name": "id", "type": "long", "pk": true},
        {"name": "user_id", "type": "long", "ref": {"table": "tb_user", "column": "id"}}
      ]
    }
  ]
}"#;

/// Get the oct binary with a clean environment
#[allow(deprecated)]
fn oct_cmd() -> Command {
    let mut cmd = Command::cargo_bin("oct").unwrap();
    for var in [
        "OCTOPUS_SOURCE_FORMAT",
        "OCTOPUS_TARGET_FORMAT",
        "OCTOPUS_PACKAGE",
        "OCTOPUS_REMOVE_PREFIX",
        "OCTOPUS_PREFIX",
        "OCTOPUS_GROUPS",
        "OCTOPUS_GO_PACKAGE",
        "OCTOPUS_USE_NOT_NULL_COLUMN",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("db.ojson"), SCHEMA).unwrap();
    dir
}

#[test]
fn test_help_command() {
    oct_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: oct <COMMAND>"))
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("convert"))
        .stdout(predicate::str::contains("generate"));
}

#[test]
fn test_generate_help_lists_flags() {
    oct_cmd()
        .args(["generate", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--sourceFormat"))
        .stdout(predicate::str::contains("--targetFormat"))
        .stdout(predicate::str::contains("--package"))
        .stdout(predicate::str::contains("--removePrefix"))
        .stdout(predicate::str::contains("OCTOPUS_PACKAGE"));
}

#[test]
fn test_version_command() {
    oct_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("Version"))
        .stdout(predicate::str::contains("sql-postgresql"));
}

#[test]
fn test_convert_missing_arguments() {
    oct_cmd().arg("convert").assert().code(1);
    oct_cmd()
        .args(["convert", "db.ojson"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("<TARGET>"));
}

#[test]
fn test_create_default_file() {
    let dir = TempDir::new().unwrap();

    oct_cmd()
        .current_dir(dir.path())
        .arg("create")
        .assert()
        .success()
        .stdout(predicate::str::contains("[WRITE]"));

    let content = fs::read_to_string(dir.path().join("db.ojson")).unwrap();
    assert!(content.contains("\"tables\""));

    // refuses to overwrite
    oct_cmd()
        .current_dir(dir.path())
        .arg("create")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_convert_to_sql() {
    let dir = project();

    oct_cmd()
        .current_dir(dir.path())
        .args(["convert", "db.ojson", "out/schema.sql", "--targetFormat", "sql-mysql"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[MKDIR]"));

    let sql = fs::read_to_string(dir.path().join("out/schema.sql")).unwrap();
    assert!(sql.contains("CREATE TABLE `tb_user`"));
    assert!(sql.contains("FOREIGN KEY (`user_id`) REFERENCES `tb_user` (`id`)"));
}

#[test]
fn test_convert_round_trip_through_xlsx() {
    let dir = project();

    oct_cmd()
        .current_dir(dir.path())
        .args(["convert", "db.ojson", "db.xlsx"])
        .assert()
        .success();
    oct_cmd()
        .current_dir(dir.path())
        .args(["convert", "db.xlsx", "back.ojson"])
        .assert()
        .success();

    let back = fs::read_to_string(dir.path().join("back.ojson")).unwrap();
    assert!(back.contains("\"tb_order\""));
    assert!(back.contains("\"lechuck\""));
}

#[test]
fn test_convert_target_format_from_env() {
    let dir = project();

    oct_cmd()
        .current_dir(dir.path())
        .env("OCTOPUS_TARGET_FORMAT", "sql-sqlite3")
        .args(["convert", "db.ojson", "schema.ddl"])
        .assert()
        .success();

    let sql = fs::read_to_string(dir.path().join("schema.ddl")).unwrap();
    assert!(sql.contains("\"id\" INTEGER PRIMARY KEY AUTOINCREMENT"));
}

#[test]
fn test_unknown_format_fails_before_io() {
    let dir = TempDir::new().unwrap();

    oct_cmd()
        .current_dir(dir.path())
        .args(["convert", "missing.ojson", "out.txt", "--tf", "cobol"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unsupported format `cobol`"));
}

#[test]
fn test_uninferable_extension() {
    let dir = project();

    oct_cmd()
        .current_dir(dir.path())
        .args(["convert", "db.ojson", "out.txt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot infer format"));
}

#[test]
fn test_convert_rejects_multi_file_format() {
    let dir = project();

    oct_cmd()
        .current_dir(dir.path())
        .args(["convert", "db.ojson", "out.kt", "--targetFormat", "jpa-kotlin"])
        .assert()
        .code(1);
}

#[test]
fn test_generate_jpa_kotlin() {
    let dir = project();

    oct_cmd()
        .current_dir(dir.path())
        .args([
            "generate",
            "db.ojson",
            "gen",
            "--targetFormat",
            "jpa-kotlin",
            "--package",
            "com.lechuck.hello",
            "--removePrefix",
            "tb_",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 3 files"));

    let package_dir = dir.path().join("gen/com/lechuck/hello");
    assert!(package_dir.join("AbstractJpaPersistable.kt").exists());
    let user = fs::read_to_string(package_dir.join("User.kt")).unwrap();
    assert!(user.starts_with("package com.lechuck.hello\n"));
    assert!(user.contains("class User("));
    assert!(package_dir.join("Order.kt").exists());
}

#[test]
fn test_generate_protobuf_with_config_file() {
    let dir = project();
    fs::write(
        dir.path().join("octopus.toml"),
        "[generate]\npackage = \"com.lechuck.hello\"\ngo_package = \"proto/hello\"\nremove_prefix = [\"tb_\"]\nprefix = \"common:C\"\ngroups = [\"common\"]\n",
    )
    .unwrap();

    oct_cmd()
        .current_dir(dir.path())
        .args(["generate", "db.ojson", "proto", "--tf", "protobuf"])
        .assert()
        .success();

    let proto = fs::read_to_string(dir.path().join("proto/shop.proto")).unwrap();
    assert!(proto.contains("package com.lechuck.hello;"));
    assert!(proto.contains("option go_package = \"proto/hello\";"));
    assert!(proto.contains("message CUser {"));
    assert!(!proto.contains("Order"));
}

#[test]
fn test_generate_flag_overrides_config() {
    let dir = project();
    fs::write(
        dir.path().join("octopus.toml"),
        "[generate]\npackage = \"from.config\"\n",
    )
    .unwrap();

    oct_cmd()
        .current_dir(dir.path())
        .args(["g", "db.ojson", "proto", "--tf", "protobuf", "-p", "from.flag"])
        .assert()
        .success();

    let proto = fs::read_to_string(dir.path().join("proto/shop.proto")).unwrap();
    assert!(proto.contains("package from.flag;"));
}

#[test]
fn test_generate_graphql_file_name() {
    let dir = project();

    oct_cmd()
        .current_dir(dir.path())
        .args(["generate", "db.ojson", "gql", "--targetFormat", "graphql"])
        .assert()
        .success();

    let graphql = fs::read_to_string(dir.path().join("gql/shop-1.0.graphqls")).unwrap();
    assert!(graphql.contains("type TbUser {"));
    assert!(graphql.contains("  id: ID!"));
}

#[test]
fn test_generate_with_encode_only_source_fails() {
    let dir = project();

    oct_cmd()
        .current_dir(dir.path())
        .args(["generate", "db.ojson", "out", "--sf", "graphql", "--tf", "protobuf"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot be used as a source"));
}

#[test]
fn test_invalid_source_document() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("bad.ojson"), "{ not json").unwrap();

    oct_cmd()
        .current_dir(dir.path())
        .args(["convert", "bad.ojson", "out.sql", "--tf", "sql-mysql"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid octopus document"));
}
