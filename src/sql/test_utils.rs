//! Parse-back checks for generated DDL.
//!
//! Scripts are parsed with sqlparser in the matching dialect, and every
//! statement must be a `CREATE TABLE`.

use sqlparser::ast::Statement;
use sqlparser::dialect::{DuckDbDialect, MySqlDialect, PostgreSqlDialect, SQLiteDialect};
use sqlparser::parser::Parser;

use super::dialect::Dialect;

fn parser_dialect(dialect: Dialect) -> Box<dyn sqlparser::dialect::Dialect> {
    match dialect {
        Dialect::Postgres => Box::new(PostgreSqlDialect {}),
        Dialect::MySql => Box::new(MySqlDialect {}),
        Dialect::Sqlite => Box::new(SQLiteDialect {}),
        Dialect::DuckDb => Box::new(DuckDbDialect {}),
    }
}

/// Parse a DDL script and return the names of the tables it creates, in
/// statement order.
pub fn created_tables(sql: &str, dialect: Dialect) -> Result<Vec<String>, String> {
    let statements = Parser::parse_sql(&*parser_dialect(dialect), sql)
        .map_err(|e| format!("Invalid SQL for {}: {}\nSQL:\n{}", dialect, e, sql))?;

    statements
        .into_iter()
        .map(|statement| match statement {
            Statement::CreateTable(create) => Ok(create
                .name
                .0
                .last()
                .map(|ident| ident.value.clone())
                .unwrap_or_default()),
            other => Err(format!("Expected CREATE TABLE, got: {}", other)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_tables_in_order() {
        let sql = "CREATE TABLE \"a\" (\"id\" INTEGER PRIMARY KEY);\n\
                   CREATE TABLE \"b\" (\"id\" INTEGER PRIMARY KEY);";
        assert_eq!(created_tables(sql, Dialect::Postgres).unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_rejects_other_statements() {
        assert!(created_tables("SELECT 1", Dialect::Sqlite).is_err());
        assert!(created_tables("CREAT TABLE users", Dialect::Postgres).is_err());
    }
}
