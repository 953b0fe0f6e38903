use std::collections::BTreeSet;
use std::path::PathBuf;

use octopus_schema::{Column, ColumnType, Schema, Table};
use tracing::{debug, warn};

use crate::Format;
use crate::codec::{Encoder, GeneratedFile};
use crate::error::CodecResult;
use crate::options::EncodeOptions;

const INDENT: &str = "    ";
const BASE_CLASS: &str = "AbstractJpaPersistable";

/// Writes one Kotlin JPA entity per table under the package directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct JpaKotlinEncoder;

/// Kotlin type, non-null default literal and required import.
struct KotlinType {
    name: &'static str,
    default: Option<&'static str>,
    import: Option<&'static str>,
}

impl KotlinType {
    const fn new(name: &'static str, default: &'static str) -> Self {
        Self {
            name,
            default: Some(default),
            import: None,
        }
    }

    const fn imported(name: &'static str, default: &'static str, import: &'static str) -> Self {
        Self {
            name,
            default: Some(default),
            import: Some(import),
        }
    }
}

/// Unknown types fall back to `Any` without a default.
fn kotlin_type(column: &Column) -> KotlinType {
    match &column.column_type {
        ColumnType::String | ColumnType::Text => KotlinType::new("String", "\"\""),
        ColumnType::Boolean => KotlinType::new("Boolean", "false"),
        ColumnType::Long => KotlinType::new("Long", "0L"),
        ColumnType::Int => KotlinType::new("Int", "0"),
        ColumnType::Float => KotlinType::new("Float", "0.0F"),
        ColumnType::Double => KotlinType::new("Double", "0.0"),
        ColumnType::Decimal => {
            KotlinType::imported("BigDecimal", "BigDecimal.ZERO", "java.math.BigDecimal")
        }
        ColumnType::DateTime => {
            KotlinType::imported("LocalDateTime", "LocalDateTime.now()", "java.time.LocalDateTime")
        }
        ColumnType::Date => KotlinType::imported("LocalDate", "LocalDate.now()", "java.time.LocalDate"),
        ColumnType::Time => KotlinType::imported("LocalTime", "LocalTime.now()", "java.time.LocalTime"),
        ColumnType::Blob => KotlinType::new("ByteArray", "ByteArray(0)"),
        ColumnType::Other(raw) => {
            warn!("unknown column type: '{}', column: {}", raw, column.name);
            KotlinType {
                name: "Any",
                default: None,
                import: None,
            }
        }
    }
}

struct KotlinField<'a> {
    column: &'a Column,
    name: String,
    ty: KotlinType,
}

impl KotlinField<'_> {
    /// `name: Type = default`, nullable fields default to `null`.
    fn declaration(&self) -> String {
        if self.column.nullable {
            format!("{}: {}? = null", self.name, self.ty.name)
        } else {
            match self.ty.default {
                Some(default) => format!("{}: {} = {}", self.name, self.ty.name, default),
                None => format!("{}: {}", self.name, self.ty.name),
            }
        }
    }
}

struct EntityWriter<'a> {
    package: &'a str,
    imports: BTreeSet<&'static str>,
    lines: Vec<String>,
}

impl<'a> EntityWriter<'a> {
    fn new(package: &'a str) -> Self {
        let mut imports = BTreeSet::new();
        imports.insert("javax.persistence.*");
        Self {
            package,
            imports,
            lines: Vec::new(),
        }
    }

    fn line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn annotation(&mut self, annotation: &str) {
        self.lines.push(format!("{}{}", INDENT, annotation));
    }

    fn finish(self) -> String {
        let mut contents = Vec::new();
        if !self.package.is_empty() {
            contents.push(format!("package {}", self.package));
            contents.push(String::new());
        }
        contents.extend(self.imports.iter().map(|i| format!("import {}", i)));
        contents.push(String::new());
        contents.extend(self.lines);
        contents.join("\n")
    }
}

impl JpaKotlinEncoder {
    /// Render the entity source for one table.
    pub fn render_entity(&self, table: &Table, options: &EncodeOptions) -> (String, String) {
        let class_name = options.namer.class_name(table);
        let fields: Vec<KotlinField<'_>> = table
            .columns
            .iter()
            .map(|column| KotlinField {
                column,
                name: options.namer.field_name(column),
                ty: kotlin_type(column),
            })
            .collect();
        let pk_fields: Vec<&KotlinField<'_>> = fields.iter().filter(|f| f.column.primary_key).collect();

        let id_type = match pk_fields.as_slice() {
            [] => None,
            [pk] => Some(pk.ty.name.to_string()),
            _ => Some(format!("{}Id", class_name)),
        };

        let mut w = EntityWriter::new(options.package.trim());
        w.line("@Entity");
        w.line(format!("@Table(name = \"{}\")", table.name));
        if pk_fields.len() > 1 {
            w.line(format!("@IdClass({}Id::class)", class_name));
        }
        w.line(format!("class {}(", class_name));

        for (i, field) in fields.iter().enumerate() {
            let column = field.column;
            if column.primary_key {
                w.annotation("@Id");
            }
            if column.auto_incremental {
                w.annotation("@GeneratedValue(strategy = GenerationType.IDENTITY)");
            }
            if column.column_type == ColumnType::Text {
                w.annotation("@Type(type = \"text\")");
                w.imports.insert("org.hibernate.annotations.Type");
            }
            if column.column_type == ColumnType::Blob {
                w.annotation("@Lob");
            }

            let mut attributes = Vec::new();
            if !column.nullable {
                attributes.push("nullable = false".to_string());
            }
            if field.ty.name == "String" && column.size > 0 {
                attributes.push(format!("length = {}", column.size));
            }
            if !attributes.is_empty() {
                w.annotation(&format!("@Column({})", attributes.join(", ")));
            }

            if column.column_type == ColumnType::DateTime {
                match field.name.as_str() {
                    "createdAt" => {
                        w.annotation("@CreationTimestamp");
                        w.imports.insert("org.hibernate.annotations.CreationTimestamp");
                    }
                    "updatedAt" => {
                        w.annotation("@UpdateTimestamp");
                        w.imports.insert("org.hibernate.annotations.UpdateTimestamp");
                    }
                    _ => {}
                }
            }

            let separator = if i + 1 < fields.len() { "," } else { "" };
            w.annotation(&format!("var {}{}", field.declaration(), separator));
            w.line("");

            if let Some(import) = field.ty.import {
                w.imports.insert(import);
            }
        }

        match &id_type {
            Some(id_type) => w.line(format!(") : {}<{}>()", BASE_CLASS, id_type)),
            None => w.line(")"),
        }
        w.line("");

        if pk_fields.len() > 1 {
            w.imports.insert("java.io.Serializable");
            w.line(format!("data class {}Id(", class_name));
            for (i, field) in pk_fields.iter().enumerate() {
                let separator = if i + 1 < pk_fields.len() { "," } else { "" };
                w.annotation(&format!("var {}{}", field.declaration(), separator));
            }
            w.line(") : Serializable");
            w.line("");
        }

        (class_name, w.finish())
    }

    /// Render the shared entity base class.
    pub fn render_base_class(&self, package: &str) -> String {
        let mut out = String::new();
        if !package.is_empty() {
            out.push_str(&format!("package {}\n\n", package));
        }
        out.push_str(BASE_CLASS_SOURCE);
        out
    }
}

const BASE_CLASS_SOURCE: &str = r#"import org.springframework.data.util.ProxyUtils
import java.io.Serializable
import javax.persistence.GeneratedValue
import javax.persistence.Id
import javax.persistence.MappedSuperclass

@MappedSuperclass
abstract class AbstractJpaPersistable<T : Serializable> {
    companion object {
        private val serialVersionUID = -5554308939380869754L
    }

    @Id
    @GeneratedValue
    private var id: T? = null

    fun getId(): T? {
        return id
    }

    override fun equals(other: Any?): Boolean {
        other ?: return false

        if (this === other) return true

        if (javaClass != ProxyUtils.getUserClass(other)) return false

        other as AbstractJpaPersistable<*>

        return if (null == this.getId()) false else this.getId() == other.getId()
    }

    override fun hashCode(): Int {
        return 31
    }

    override fun toString() = "Entity of type ${this.javaClass.name} with id: $id"
}
"#;

fn package_dir(package: &str) -> PathBuf {
    package
        .split('.')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect()
}

impl Encoder for JpaKotlinEncoder {
    fn format(&self) -> Format {
        Format::JpaKotlin
    }

    fn encode(&self, schema: &Schema, options: &EncodeOptions) -> CodecResult<Vec<GeneratedFile>> {
        let package = options.package.trim();
        let dir = package_dir(package);

        let mut files = vec![GeneratedFile::text(
            dir.join(format!("{}.kt", BASE_CLASS)),
            self.render_base_class(package),
        )];

        for table in options.tables(schema) {
            let (class_name, source) = self.render_entity(table, options);
            debug!("entity {} for table {}", class_name, table.name);
            files.push(GeneratedFile::text(dir.join(format!("{}.kt", class_name)), source));
        }

        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use octopus_schema::PrefixMapper;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    fn user_table() -> Table {
        Table::new("user")
            .with_group("common")
            .with_column(Column::new("id", ColumnType::Long).primary_key().auto_incremental())
            .with_column(Column::parsed("name", "string(100)").unique())
            .with_column(Column::parsed("dec", "decimal(20,5)"))
            .with_column(Column::new("bio", ColumnType::Text).nullable())
            .with_column(Column::new("created_at", ColumnType::DateTime))
            .with_column(Column::new("updated_at", ColumnType::DateTime).nullable())
    }

    #[test]
    fn test_render_entity() {
        let options = EncodeOptions::new()
            .with_package("com.lechuck.hello")
            .with_prefix_mapper(PrefixMapper::parse("common:C"));
        let (class_name, source) = JpaKotlinEncoder.render_entity(&user_table(), &options);
        assert_eq!(class_name, "CUser");

        let expected = r#"package com.lechuck.hello

import java.math.BigDecimal
import java.time.LocalDateTime
import javax.persistence.*
import org.hibernate.annotations.CreationTimestamp
import org.hibernate.annotations.Type
import org.hibernate.annotations.UpdateTimestamp

@Entity
@Table(name = "user")
class CUser(
    @Id
    @GeneratedValue(strategy = GenerationType.IDENTITY)
    @Column(nullable = false)
    var id: Long = 0L,

    @Column(nullable = false, length = 100)
    var name: String = "",

    @Column(nullable = false)
    var dec: BigDecimal = BigDecimal.ZERO,

    @Type(type = "text")
    var bio: String? = null,

    @Column(nullable = false)
    @CreationTimestamp
    var createdAt: LocalDateTime = LocalDateTime.now(),

    @UpdateTimestamp
    var updatedAt: LocalDateTime? = null

) : AbstractJpaPersistable<Long>()
"#;
        assert_eq!(source, expected);
    }

    #[test]
    fn test_composite_key() {
        let table = Table::new("user_role")
            .with_column(Column::new("user_id", ColumnType::Long).primary_key())
            .with_column(Column::new("role_id", ColumnType::Int).primary_key());
        let (_, source) = JpaKotlinEncoder.render_entity(&table, &EncodeOptions::new());

        assert!(source.starts_with("import java.io.Serializable\nimport javax.persistence.*\n"));
        assert!(source.contains("@IdClass(UserRoleId::class)\nclass UserRole("));
        assert!(source.contains(") : AbstractJpaPersistable<UserRoleId>()"));
        assert!(source.contains(
            "data class UserRoleId(\n    var userId: Long = 0L,\n    var roleId: Int = 0\n) : Serializable\n"
        ));
    }

    #[test]
    fn test_no_primary_key() {
        let table = Table::new("log").with_column(Column::new("line", ColumnType::Blob));
        let (_, source) = JpaKotlinEncoder.render_entity(&table, &EncodeOptions::new());
        assert!(source.contains("    @Lob\n"));
        assert!(source.contains("    var line: ByteArray = ByteArray(0)\n\n)\n"));
    }

    #[test]
    fn test_unknown_type_falls_back_to_any() {
        let column = Column::new("shape", ColumnType::Other("geometry".into()));
        let ty = kotlin_type(&column);
        assert_eq!(ty.name, "Any");
        assert!(ty.default.is_none());
    }

    #[test]
    fn test_encode_files() {
        let mut schema = Schema::new();
        schema.add_table(user_table());
        schema.add_table(Table::new("tb_order").with_column(Column::new("id", ColumnType::Long)));
        let options = EncodeOptions::new()
            .with_package("com.lechuck.hello")
            .with_remove_prefixes(["tb_"]);

        let files = JpaKotlinEncoder.encode(&schema, &options).unwrap();
        let paths: Vec<&Path> = files.iter().map(GeneratedFile::path).collect();
        assert_eq!(
            paths,
            vec![
                Path::new("com/lechuck/hello/AbstractJpaPersistable.kt"),
                Path::new("com/lechuck/hello/User.kt"),
                Path::new("com/lechuck/hello/Order.kt"),
            ]
        );
        assert!(files[0].as_text().starts_with("package com.lechuck.hello\n\nimport"));
    }

    #[test]
    fn test_base_class_without_package() {
        let source = JpaKotlinEncoder.render_base_class("");
        assert!(source.starts_with("import org.springframework.data.util.ProxyUtils"));
    }
}
