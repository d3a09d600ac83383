//! Tests for DDL rendering of synthesized schemas.
//!
//! Every script is parsed back with sqlparser in the matching dialect.

use reqforge::sql::{render_schema, ColumnDef, CreateTable, Dialect, TableConstraint};
use reqforge::{analyze, AnalyzeOptions, FieldType, Table};
use sqlparser::ast::Statement;
use sqlparser::dialect::{DuckDbDialect, MySqlDialect, PostgreSqlDialect, SQLiteDialect};
use sqlparser::parser::Parser;

fn parse(sql: &str, dialect: Dialect) -> Vec<Statement> {
    let parser_dialect: Box<dyn sqlparser::dialect::Dialect> = match dialect {
        Dialect::Postgres => Box::new(PostgreSqlDialect {}),
        Dialect::MySql => Box::new(MySqlDialect {}),
        Dialect::Sqlite => Box::new(SQLiteDialect {}),
        Dialect::DuckDb => Box::new(DuckDbDialect {}),
    };
    Parser::parse_sql(&*parser_dialect, sql)
        .unwrap_or_else(|e| panic!("Invalid SQL for {}: {}\nSQL:\n{}", dialect, e, sql))
}

fn tables(text: &str) -> Vec<Table> {
    analyze(text, &AnalyzeOptions::default()).unwrap().tables
}

const BOOKINGS: &str = "Guests sign up and log in. A customer has many bookings. \
    Each booking is assigned to a room. Rooms have a capacity and a price. \
    Students belong to many courses. Tasks track isDone, due_date and notes.";

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_schema_parses_in_every_dialect() {
    let tables = tables(BOOKINGS);
    assert!(tables.len() >= 6);

    for dialect in Dialect::ALL {
        let sql = render_schema(&tables, dialect);
        let statements = parse(&sql, dialect);
        assert_eq!(statements.len(), tables.len(), "{}", dialect);
        assert!(statements
            .iter()
            .all(|s| matches!(s, Statement::CreateTable(_))));
    }
}

#[test]
fn test_hand_built_table_parses() {
    let create = CreateTable::new("audit_log")
        .if_not_exists()
        .column(ColumnDef::new("id", FieldType::Integer).primary_key())
        .column(ColumnDef::new("message", FieldType::Text).not_null())
        .column(ColumnDef::new("happened_at", FieldType::Datetime).not_null())
        .column(ColumnDef::new("user_id", FieldType::Integer).references("users", "id"))
        .constraint(TableConstraint::unique(["user_id", "happened_at"]));

    for dialect in Dialect::ALL {
        parse(&create.to_sql(dialect), dialect);
    }
}

// ============================================================================
// Ordering and Output
// ============================================================================

#[test]
fn test_referenced_tables_come_first() {
    let tables = tables(BOOKINGS);
    let sql = render_schema(&tables, Dialect::Postgres);
    let position = |name: &str| {
        sql.find(&format!("CREATE TABLE \"{}\"", name))
            .unwrap_or_else(|| panic!("missing {}", name))
    };

    assert!(position("customers") < position("bookings"));
    assert!(position("rooms") < position("bookings"));
    assert!(position("students") < position("students_courses"));
    assert!(position("courses") < position("students_courses"));
}

#[test]
fn test_junction_schema_postgres() {
    let tables = tables("A student can belong to many courses.");
    insta::assert_snapshot!(render_schema(&tables, Dialect::Postgres), @r#"
    CREATE TABLE "students" (
        "id" INTEGER PRIMARY KEY,
        "name" VARCHAR(255) NOT NULL,
        "created_at" TIMESTAMP NOT NULL
    );

    CREATE TABLE "courses" (
        "id" INTEGER PRIMARY KEY,
        "name" VARCHAR(255) NOT NULL,
        "created_at" TIMESTAMP NOT NULL
    );

    CREATE TABLE "students_courses" (
        "id" INTEGER PRIMARY KEY,
        "student_id" INTEGER NOT NULL REFERENCES "students" ("id"),
        "course_id" INTEGER NOT NULL REFERENCES "courses" ("id"),
        UNIQUE ("student_id", "course_id")
    );
    "#);
}

#[test]
fn test_types_per_dialect() {
    let tables = tables("Tasks track isDone, due_date and notes.");
    let sqlite = render_schema(&tables, Dialect::Sqlite);
    assert!(sqlite.contains("\"is_done\" INTEGER"));
    assert!(sqlite.contains("\"due_date\" TEXT"));

    let mysql = render_schema(&tables, Dialect::MySql);
    assert!(mysql.contains("`is_done` BOOLEAN"));
    assert!(mysql.contains("`due_date` DATETIME"));
    assert!(mysql.contains("`notes` TEXT"));
}

#[test]
fn test_empty_schema_renders_nothing() {
    assert_eq!(render_schema(&[], Dialect::Postgres), "");
}
