//! DDL (Data Definition Language) support.
//!
//! Builders for `CREATE TABLE` statements plus [`render_schema`], which turns
//! synthesized tables into a dialect-specific script with referenced tables
//! created before the tables that point at them.
//!
//! # Examples
//!
//! ```ignore
//! use reqforge::sql::{ColumnDef, CreateTable, Dialect};
//! use reqforge::FieldType;
//!
//! let table = CreateTable::new("users")
//!     .column(ColumnDef::new("id", FieldType::Integer).primary_key())
//!     .column(ColumnDef::new("email", FieldType::String).not_null().unique());
//!
//! println!("{}", table.to_sql(Dialect::Postgres));
//! ```

use std::collections::HashSet;

use super::dialect::{Dialect, SqlDialect};
use crate::model::{Constraint, Field, FieldType, Table};

// ============================================================================
// CREATE TABLE
// ============================================================================

/// CREATE TABLE statement.
#[derive(Debug, Clone, PartialEq)]
#[must_use = "DDL statements have no effect until converted to SQL with to_sql()"]
pub struct CreateTable {
    pub if_not_exists: bool,
    pub name: String,
    pub columns: Vec<ColumnDef>,
    pub constraints: Vec<TableConstraint>,
}

impl CreateTable {
    /// Create a new CREATE TABLE statement.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            if_not_exists: false,
            name: name.into(),
            columns: Vec::new(),
            constraints: Vec::new(),
        }
    }

    /// Statement for a synthesized table.
    pub fn from_table(table: &Table) -> Self {
        let mut create =
            Self::new(table.name.clone()).columns(table.fields.iter().map(ColumnDef::from_field));
        if !table.unique_together.is_empty() {
            create = create.constraint(TableConstraint::unique(
                table.unique_together.iter().cloned(),
            ));
        }
        create
    }

    /// Add IF NOT EXISTS clause.
    pub fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }

    /// Add a column definition.
    pub fn column(mut self, col: ColumnDef) -> Self {
        self.columns.push(col);
        self
    }

    /// Add multiple column definitions.
    pub fn columns(mut self, cols: impl IntoIterator<Item = ColumnDef>) -> Self {
        self.columns.extend(cols);
        self
    }

    /// Add a table constraint.
    pub fn constraint(mut self, constraint: TableConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Convert to SQL for the given dialect.
    pub fn to_sql(&self, dialect: Dialect) -> String {
        let mut sql = String::from("CREATE TABLE ");
        if self.if_not_exists && dialect.supports_if_not_exists() {
            sql.push_str("IF NOT EXISTS ");
        }
        sql.push_str(&dialect.quote_identifier(&self.name));
        sql.push_str(" (\n");

        let lines: Vec<String> = self
            .columns
            .iter()
            .map(|c| c.to_sql(dialect))
            .chain(self.constraints.iter().map(|c| c.to_sql(dialect)))
            .map(|line| format!("    {}", line))
            .collect();
        sql.push_str(&lines.join(",\n"));
        sql.push_str("\n);");
        sql
    }
}

// ============================================================================
// Column Definition
// ============================================================================

/// Column definition for CREATE TABLE.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: String,
    pub data_type: FieldType,
    pub not_null: bool,
    pub constraints: Vec<ColumnConstraint>,
}

impl ColumnDef {
    /// Create a new, nullable column definition.
    pub fn new(name: impl Into<String>, data_type: FieldType) -> Self {
        Self {
            name: name.into(),
            data_type,
            not_null: false,
            constraints: Vec::new(),
        }
    }

    /// Column for a synthesized field.
    pub fn from_field(field: &Field) -> Self {
        let mut col = Self::new(field.name.clone(), field.data_type);
        for constraint in &field.constraints {
            col = match constraint {
                Constraint::PrimaryKey => col.primary_key(),
                Constraint::NotNull => col.not_null(),
                Constraint::Unique => col.unique(),
                Constraint::ForeignKey { table, column } => col.references(table, column),
            };
        }
        col
    }

    /// Mark column as NOT NULL.
    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    /// Add PRIMARY KEY constraint.
    pub fn primary_key(mut self) -> Self {
        self.constraints.push(ColumnConstraint::PrimaryKey);
        self
    }

    /// Add UNIQUE constraint.
    pub fn unique(mut self) -> Self {
        self.constraints.push(ColumnConstraint::Unique);
        self
    }

    /// Add REFERENCES constraint.
    pub fn references(mut self, table: impl Into<String>, column: impl Into<String>) -> Self {
        self.constraints.push(ColumnConstraint::References {
            table: table.into(),
            column: column.into(),
        });
        self
    }

    fn is_primary_key(&self) -> bool {
        self.constraints.contains(&ColumnConstraint::PrimaryKey)
    }

    /// Convert to SQL for the given dialect.
    pub fn to_sql(&self, dialect: Dialect) -> String {
        let mut parts = vec![
            dialect.quote_identifier(&self.name),
            dialect.emit_data_type(self.data_type).to_string(),
        ];

        // PRIMARY KEY implies NOT NULL
        if self.is_primary_key() {
            parts.push("PRIMARY KEY".to_string());
        } else if self.not_null {
            parts.push("NOT NULL".to_string());
        }

        if self.constraints.contains(&ColumnConstraint::Unique) && !self.is_primary_key() {
            parts.push("UNIQUE".to_string());
        }

        for constraint in &self.constraints {
            if let ColumnConstraint::References { table, column } = constraint {
                parts.push(format!(
                    "REFERENCES {} ({})",
                    dialect.quote_identifier(table),
                    dialect.quote_identifier(column)
                ));
            }
        }

        parts.join(" ")
    }
}

/// Column-level constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnConstraint {
    PrimaryKey,
    Unique,
    References { table: String, column: String },
}

// ============================================================================
// Table Constraints
// ============================================================================

/// Table-level constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableConstraint {
    Unique { columns: Vec<String> },
}

impl TableConstraint {
    /// Create a UNIQUE constraint.
    pub fn unique(columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        TableConstraint::Unique {
            columns: columns.into_iter().map(|c| c.into()).collect(),
        }
    }

    /// Convert to SQL for the given dialect.
    pub fn to_sql(&self, dialect: Dialect) -> String {
        match self {
            TableConstraint::Unique { columns } => {
                let cols: Vec<String> = columns.iter().map(|c| dialect.quote_identifier(c)).collect();
                format!("UNIQUE ({})", cols.join(", "))
            }
        }
    }
}

// ============================================================================
// Schema scripts
// ============================================================================

/// Tables ordered so every referenced table precedes its referrers. Tables
/// keep their original order otherwise; reference cycles are broken at the
/// first table reached again.
pub fn dependency_order(tables: &[Table]) -> Vec<&Table> {
    fn visit<'a>(
        table: &'a Table,
        tables: &'a [Table],
        done: &mut HashSet<&'a str>,
        visiting: &mut HashSet<&'a str>,
        out: &mut Vec<&'a Table>,
    ) {
        if done.contains(table.name.as_str()) || !visiting.insert(table.name.as_str()) {
            return;
        }
        for referenced in table.referenced_tables() {
            if let Some(dep) = tables.iter().find(|t| t.name == referenced) {
                visit(dep, tables, done, visiting, out);
            }
        }
        visiting.remove(table.name.as_str());
        done.insert(table.name.as_str());
        out.push(table);
    }

    let mut done = HashSet::new();
    let mut visiting = HashSet::new();
    let mut out = Vec::with_capacity(tables.len());
    for table in tables {
        visit(table, tables, &mut done, &mut visiting, &mut out);
    }
    out
}

/// Render tables as a `CREATE TABLE` script.
pub fn render_schema(tables: &[Table], dialect: Dialect) -> String {
    dependency_order(tables)
        .into_iter()
        .map(|t| CreateTable::from_table(t).to_sql(dialect))
        .collect::<Vec<_>>()
        .join("\n\n")
}
