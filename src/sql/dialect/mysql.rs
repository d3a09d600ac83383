//! MySQL dialect.
//!
//! MySQL differences from ANSI:
//! - Backtick identifier quoting (`` `name` ``)
//! - `INT` and `DATETIME` type names

use super::helpers;
use super::SqlDialect;
use crate::model::FieldType;

/// MySQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct MySql;

impl SqlDialect for MySql {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_backtick(ident)
    }

    fn emit_data_type(&self, data_type: FieldType) -> &'static str {
        match data_type {
            FieldType::String => "VARCHAR(255)",
            FieldType::Text => "TEXT",
            FieldType::Integer => "INT",
            FieldType::Float => "DOUBLE",
            FieldType::Boolean => "BOOLEAN",
            FieldType::Datetime => "DATETIME",
        }
    }
}
