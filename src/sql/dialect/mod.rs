//! SQL dialect definitions.
//!
//! Each dialect implements [`SqlDialect`] to handle its differences:
//!
//! - Identifier quoting: `"` (PostgreSQL/SQLite/DuckDB), `` ` `` (MySQL)
//! - Column type names for the synthesized field types
//!
//! | Field type | PostgreSQL | MySQL | SQLite | DuckDB |
//! |------------|------------|-------|--------|--------|
//! | string | VARCHAR(255) | VARCHAR(255) | TEXT | VARCHAR |
//! | text | TEXT | TEXT | TEXT | TEXT |
//! | integer | INTEGER | INT | INTEGER | INTEGER |
//! | float | DOUBLE PRECISION | DOUBLE | REAL | DOUBLE |
//! | boolean | BOOLEAN | BOOLEAN | INTEGER | BOOLEAN |
//! | datetime | TIMESTAMP | DATETIME | TEXT | TIMESTAMP |

mod duckdb;
pub mod helpers;
mod mysql;
mod postgres;
mod sqlite;

pub use duckdb::DuckDb;
pub use mysql::MySql;
pub use postgres::Postgres;
pub use sqlite::Sqlite;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::model::FieldType;

/// SQL dialect trait - defines how DDL constructs are rendered.
pub trait SqlDialect: std::fmt::Debug {
    /// Dialect name for display/logging.
    fn name(&self) -> &'static str;

    /// Quote an identifier (table, column).
    fn quote_identifier(&self, ident: &str) -> String;

    /// Column type for a synthesized field type.
    fn emit_data_type(&self, data_type: FieldType) -> &'static str;

    /// Whether `CREATE TABLE IF NOT EXISTS` is accepted.
    fn supports_if_not_exists(&self) -> bool {
        true
    }
}

/// Supported SQL dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Postgres,
    MySql,
    Sqlite,
    DuckDb,
}

impl Dialect {
    pub const ALL: [Dialect; 4] = [Dialect::Postgres, Dialect::MySql, Dialect::Sqlite, Dialect::DuckDb];

    /// Get the dialect implementation.
    pub fn dialect(&self) -> &'static dyn SqlDialect {
        match self {
            Dialect::Postgres => &Postgres,
            Dialect::MySql => &MySql,
            Dialect::Sqlite => &Sqlite,
            Dialect::DuckDb => &DuckDb,
        }
    }
}

// Implement SqlDialect for Dialect enum by delegating to concrete types
impl SqlDialect for Dialect {
    fn name(&self) -> &'static str {
        self.dialect().name()
    }

    fn quote_identifier(&self, ident: &str) -> String {
        self.dialect().quote_identifier(ident)
    }

    fn emit_data_type(&self, data_type: FieldType) -> &'static str {
        self.dialect().emit_data_type(data_type)
    }

    fn supports_if_not_exists(&self) -> bool {
        self.dialect().supports_if_not_exists()
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Dialect::Postgres),
            "mysql" => Ok(Dialect::MySql),
            "sqlite" => Ok(Dialect::Sqlite),
            "duckdb" => Ok(Dialect::DuckDb),
            other => Err(format!("unknown dialect '{}'", other)),
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dialect().name())
    }
}
