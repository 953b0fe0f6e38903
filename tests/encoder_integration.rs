//! Integration tests for encoders across the canonical model.

use octopus::codec::encode::ProtobufEncoder;
use octopus::codec::sheet::parse_rows;
use octopus::prelude::*;
use pretty_assertions::assert_eq;

fn lechuck_schema() -> Schema {
    let mut schema = Schema::new();
    schema.add_table(
        Table::new("user")
            .with_group("common")
            .with_column(
                Column::new("id", ColumnType::Long)
                    .primary_key()
                    .auto_incremental(),
            )
            .with_column(Column::new("name", ColumnType::String).with_size(100, 0).unique())
            .with_column(Column::new("dec", ColumnType::Decimal).with_size(20, 5))
            .with_column(Column::new("created_at", ColumnType::DateTime))
            .with_column(Column::new("updated_at", ColumnType::DateTime).nullable()),
    );
    schema
}

#[test]
fn test_protobuf_end_to_end() {
    let options = EncodeOptions::new()
        .with_package("com.lechuck.hello")
        .with_go_package("proto/hello")
        .with_prefix_mapper(PrefixMapper::parse("common:C"));

    let files = ProtobufEncoder.encode(&lechuck_schema(), &options).unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].path().to_str(), Some("schema.proto"));

    let expected = r#"syntax = "proto3";

package com.lechuck.hello;

option go_package = "proto/hello";

import "google/protobuf/timestamp.proto";

message CUser {
  int64 id = 1;
  string name = 2;
  double dec = 3;
  google.protobuf.Timestamp createdAt = 4;
  google.protobuf.Timestamp updatedAt = 5;
}
"#;
    assert_eq!(files[0].as_text(), expected);
}

#[test]
fn test_name_synthesis() {
    let namer = Namer::new()
        .with_remove_prefixes(["common_"])
        .with_prefix_mapper(PrefixMapper::parse("common:C"));
    let table = Table::new("common_user").with_group("common");

    assert_eq!(namer.class_name(&table), "CUser");
}

#[test]
fn test_type_normalization() {
    assert_eq!(parse_type("decimal(20,5)"), (ColumnType::Decimal, 20, 5));
    assert_eq!(parse_type("int"), (ColumnType::Int, 0, 0));
    assert_eq!(parse_type("varchar(100)"), (ColumnType::String, 100, 0));
    assert_eq!(parse_type("decimal(x,y)"), (ColumnType::Decimal, 0, 0));
}

#[test]
fn test_nullability_polarity() {
    let header = |label| vec!["Table/Reference", "Column", "Type", "Key", label, "Attributes", "Description"];
    let body = |header: Vec<&'static str>| {
        vec![
            header,
            vec!["user"],
            vec!["", "marked", "string", "", "O"],
            vec!["", "blank", "string", "", ""],
        ]
    };

    let default = parse_rows("common", &body(header("nullable")));
    assert!(default[0].columns[0].nullable);
    assert!(!default[0].columns[1].nullable);

    let flipped = parse_rows("common", &body(header("not null")));
    assert!(!flipped[0].columns[0].nullable);
    assert!(flipped[0].columns[1].nullable);
}

#[test]
fn test_single_primary_key_graphql_id() {
    let files = Registry::with_builtin()
        .encode(Format::Graphql, &lechuck_schema(), &EncodeOptions::new())
        .unwrap();
    let text = files[0].as_text();

    assert!(text.contains("type User {\n  id: ID!\n  name: String!\n"));
    assert!(text.contains("  updatedAt: String\n"));
}

#[test]
fn test_every_encoder_tolerates_unknown_types() {
    let mut schema = Schema::new();
    schema.add_table(
        Table::new("shape")
            .with_column(Column::new("id", ColumnType::Long).primary_key())
            .with_column(Column::parsed("area", "geometry(4326)")),
    );

    let registry = Registry::with_builtin();
    for format in Format::ALL {
        let files = registry
            .encode(format, &schema, &EncodeOptions::new())
            .unwrap_or_else(|e| panic!("{} failed: {}", format, e));
        assert!(!files.is_empty(), "{} produced nothing", format);
    }
}

#[test]
fn test_table_filter_is_honored_everywhere() {
    let mut schema = lechuck_schema();
    schema.add_table(
        Table::new("secret_log")
            .with_group("internal")
            .with_column(Column::new("id", ColumnType::Long).primary_key()),
    );
    let options = EncodeOptions::new().with_table_filter(|t| t.group != "internal");

    let registry = Registry::with_builtin();
    for format in Format::ALL.into_iter().filter(|f| *f != Format::Xlsx) {
        let files = registry.encode(format, &schema, &options).unwrap();
        for file in &files {
            let text = file.as_text();
            assert!(!text.contains("secret_log"), "{}", format);
            assert!(!text.contains("SecretLog"), "{}", format);
        }
    }
}
