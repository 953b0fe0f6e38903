use octopus_schema::{Column, ColumnType, Schema, Table};
use tracing::warn;

use crate::Format;
use crate::codec::{Encoder, GeneratedFile, document_stem};
use crate::error::CodecResult;
use crate::naming::lower_camel;
use crate::options::EncodeOptions;

const INDENT: &str = "  ";
const ID_TYPE: &str = "ID!";

/// Writes a GraphQL schema with a `Query` root and one type per table.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphqlEncoder;

/// Scalar for a canonical type. Unknown types fall back to `String`.
fn scalar(column: &Column) -> &'static str {
    match &column.column_type {
        ColumnType::String
        | ColumnType::Text
        | ColumnType::Date
        | ColumnType::Time
        | ColumnType::DateTime
        | ColumnType::Blob => "String",
        ColumnType::Boolean => "Boolean",
        ColumnType::Long | ColumnType::Int => "Int",
        ColumnType::Decimal | ColumnType::Float | ColumnType::Double => "Float",
        ColumnType::Other(raw) => {
            warn!("unknown column type: '{}', column: {}", raw, column.name);
            "String"
        }
    }
}

struct GraphqlType {
    name: String,
    fields: Vec<(String, String)>,
}

impl GraphqlType {
    fn new(table: &Table, options: &EncodeOptions) -> Self {
        let single_pk = match table.primary_keys().as_slice() {
            [pk] => Some(pk.name.clone()),
            _ => None,
        };

        let fields = table
            .columns
            .iter()
            .map(|column| {
                let field_type = if single_pk.as_deref() == Some(column.name.as_str()) {
                    ID_TYPE.to_string()
                } else if column.nullable {
                    scalar(column).to_string()
                } else {
                    format!("{}!", scalar(column))
                };
                (options.namer.field_name(column), field_type)
            })
            .collect();

        Self {
            name: options.namer.class_name(table),
            fields,
        }
    }
}

impl GraphqlEncoder {
    /// Render the schema document.
    pub fn render(&self, schema: &Schema, options: &EncodeOptions) -> String {
        let types: Vec<GraphqlType> = options
            .tables(schema)
            .map(|table| GraphqlType::new(table, options))
            .collect();

        let mut lines = vec!["schema {\n    query: Query\n}\n".to_string()];

        lines.push("type Query {".to_string());
        for ty in &types {
            let field = options.namer.plural(&lower_camel(&ty.name));
            lines.push(format!("{}{}: [{}]", INDENT, field, ty.name));
        }
        lines.push("}".to_string());
        lines.push(String::new());

        for ty in &types {
            lines.push(format!("type {} {{", ty.name));
            for (name, field_type) in &ty.fields {
                lines.push(format!("{}{}: {}", INDENT, name, field_type));
            }
            lines.push("}".to_string());
            lines.push(String::new());
        }

        lines.join("\n")
    }
}

impl Encoder for GraphqlEncoder {
    fn format(&self) -> Format {
        Format::Graphql
    }

    fn encode(&self, schema: &Schema, options: &EncodeOptions) -> CodecResult<Vec<GeneratedFile>> {
        let stem = document_stem(schema);
        let path = match schema.version.trim() {
            "" => format!("{}.graphqls", stem),
            version => format!("{}-{}.graphqls", stem, version),
        };
        Ok(vec![GeneratedFile::text(path, self.render(schema, options))])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use octopus_schema::PrefixMapper;
    use pretty_assertions::assert_eq;

    fn make_schema() -> Schema {
        let mut schema = Schema::new().with_meta("lechuck", "shop", "1.0");
        schema.add_table(
            Table::new("user")
                .with_group("common")
                .with_column(Column::new("id", ColumnType::Long).primary_key())
                .with_column(Column::parsed("nick_name", "varchar(20)").nullable())
                .with_column(Column::new("score", ColumnType::Decimal))
                .with_column(Column::new("active", ColumnType::Boolean))
                .with_column(Column::new("joined_at", ColumnType::DateTime)),
        );
        schema.add_table(
            Table::new("user_role")
                .with_group("common")
                .with_column(Column::new("user_id", ColumnType::Long).primary_key())
                .with_column(Column::new("role_id", ColumnType::Long).primary_key()),
        );
        schema
    }

    #[test]
    fn test_render() {
        let expected = "\
schema {
    query: Query
}

type Query {
  users: [User]
  userRoles: [UserRole]
}

type User {
  id: ID!
  nickName: String
  score: Float!
  active: Boolean!
  joinedAt: String!
}

type UserRole {
  userId: Int!
  roleId: Int!
}
";
        assert_eq!(GraphqlEncoder.render(&make_schema(), &EncodeOptions::new()), expected);
    }

    #[test]
    fn test_prefix_mapping_and_filter() {
        let mut schema = make_schema();
        schema.add_table(Table::new("order").with_group("shop"));
        let options = EncodeOptions::new()
            .with_prefix_mapper(PrefixMapper::parse("common:C"))
            .with_groups(["common"]);
        let text = GraphqlEncoder.render(&schema, &options);
        assert!(text.contains("  cUsers: [CUser]"));
        assert!(text.contains("type CUserRole {"));
        assert!(!text.contains("Order"));
    }

    #[test]
    fn test_unknown_type_falls_back_to_string() {
        let mut schema = Schema::new();
        schema.add_table(
            Table::new("shape").with_column(Column::new("area", ColumnType::Other("geometry".into()))),
        );
        let text = GraphqlEncoder.render(&schema, &EncodeOptions::new());
        assert!(text.contains("  area: String!"));
    }

    #[test]
    fn test_file_name() {
        let files = GraphqlEncoder.encode(&make_schema(), &EncodeOptions::new()).unwrap();
        assert_eq!(files[0].path().to_str(), Some("shop-1.0.graphqls"));

        let files = GraphqlEncoder.encode(&Schema::new(), &EncodeOptions::new()).unwrap();
        assert_eq!(files[0].path().to_str(), Some("schema.graphqls"));
    }
}
