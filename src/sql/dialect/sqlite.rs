//! SQLite dialect.
//!
//! SQLite has type affinities rather than strict types: booleans are
//! integers and timestamps are ISO-8601 text.

use super::helpers;
use super::SqlDialect;
use crate::model::FieldType;

/// SQLite dialect.
#[derive(Debug, Clone, Copy)]
pub struct Sqlite;

impl SqlDialect for Sqlite {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_double(ident)
    }

    fn emit_data_type(&self, data_type: FieldType) -> &'static str {
        match data_type {
            FieldType::String | FieldType::Text | FieldType::Datetime => "TEXT",
            FieldType::Integer | FieldType::Boolean => "INTEGER",
            FieldType::Float => "REAL",
        }
    }
}
