//! SQL generation module.
//!
//! Renders synthesized tables as `CREATE TABLE` scripts:
//!
//! - [`ddl`] - CREATE TABLE builders and schema scripts
//! - [`dialect`] - SQL dialect implementations

pub mod ddl;
pub mod dialect;

#[cfg(test)]
pub mod test_utils;

pub use ddl::{
    dependency_order, render_schema, ColumnConstraint, ColumnDef, CreateTable, TableConstraint,
};
pub use dialect::{Dialect, SqlDialect};
