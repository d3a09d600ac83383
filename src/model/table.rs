//! Relational schema types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::FieldType;

/// Column-level constraint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum Constraint {
    PrimaryKey,
    NotNull,
    Unique,
    ForeignKey { table: String, column: String },
}

/// A column of a synthesized table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    pub data_type: FieldType,
    pub constraints: BTreeSet<Constraint>,
}

impl Field {
    /// Create a nullable field with no constraints.
    pub fn new(name: impl Into<String>, data_type: FieldType) -> Self {
        Self {
            name: name.into(),
            data_type,
            constraints: BTreeSet::new(),
        }
    }

    /// The conventional integer `id` primary key.
    pub fn primary_key() -> Self {
        Self::new("id", FieldType::Integer)
            .with(Constraint::PrimaryKey)
            .with(Constraint::NotNull)
    }

    /// An integer foreign key pointing at `table.id`.
    pub fn foreign_key(name: impl Into<String>, table: impl Into<String>) -> Self {
        Self::new(name, FieldType::Integer)
            .with(Constraint::NotNull)
            .with(Constraint::ForeignKey {
                table: table.into(),
                column: "id".to_string(),
            })
    }

    /// Add a constraint.
    pub fn with(mut self, constraint: Constraint) -> Self {
        self.constraints.insert(constraint);
        self
    }

    /// Mark as NOT NULL.
    pub fn not_null(self) -> Self {
        self.with(Constraint::NotNull)
    }

    /// Mark as UNIQUE.
    pub fn unique(self) -> Self {
        self.with(Constraint::Unique)
    }

    pub fn is_primary_key(&self) -> bool {
        self.constraints.contains(&Constraint::PrimaryKey)
    }

    pub fn is_not_null(&self) -> bool {
        self.constraints.contains(&Constraint::NotNull)
    }

    pub fn is_unique(&self) -> bool {
        self.constraints.contains(&Constraint::Unique)
    }

    /// The table this field references, if it is a foreign key.
    pub fn references(&self) -> Option<&str> {
        self.constraints.iter().find_map(|c| match c {
            Constraint::ForeignKey { table, .. } => Some(table.as_str()),
            _ => None,
        })
    }
}

/// What a table realizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    /// One table per detected entity.
    Entity,
    /// Link table for a many-to-many relationship.
    Junction,
}

/// A synthesized table definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub name: String,
    /// Owning entity; `None` for junction tables.
    pub entity: Option<String>,
    pub kind: TableKind,
    pub fields: Vec<Field>,
    /// Composite key columns (junction tables only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unique_together: Vec<String>,
}

impl Table {
    /// Create a table holding only the `id` primary key.
    pub fn new(name: impl Into<String>, entity: Option<String>, kind: TableKind) -> Self {
        Self {
            name: name.into(),
            entity,
            kind,
            fields: vec![Field::primary_key()],
            unique_together: Vec::new(),
        }
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    /// All primary key fields (exactly one for synthesized tables).
    pub fn primary_keys(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.is_primary_key())
    }

    /// Fields that are not part of the primary key.
    pub fn non_key_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| !f.is_primary_key())
    }

    /// Foreign key fields referencing `table`.
    pub fn foreign_keys_to<'a>(&'a self, table: &'a str) -> impl Iterator<Item = &'a Field> + 'a {
        self.fields
            .iter()
            .filter(move |f| f.references() == Some(table))
    }

    /// Tables this table references through foreign keys.
    pub fn referenced_tables(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for table in self.fields.iter().filter_map(Field::references) {
            if !seen.contains(&table) {
                seen.push(table);
            }
        }
        seen
    }
}
