//! DuckDB dialect.

use super::helpers;
use super::SqlDialect;
use crate::model::FieldType;

/// DuckDB dialect.
#[derive(Debug, Clone, Copy)]
pub struct DuckDb;

impl SqlDialect for DuckDb {
    fn name(&self) -> &'static str {
        "duckdb"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_double(ident)
    }

    fn emit_data_type(&self, data_type: FieldType) -> &'static str {
        match data_type {
            FieldType::String => "VARCHAR",
            FieldType::Text => "TEXT",
            FieldType::Integer => "INTEGER",
            FieldType::Float => "DOUBLE",
            FieldType::Boolean => "BOOLEAN",
            FieldType::Datetime => "TIMESTAMP",
        }
    }
}
