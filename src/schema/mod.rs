//! Schema synthesis.
//!
//! One table per detected entity, plus a junction table per many-to-many
//! relationship. Every table gets the integer `id` primary key first; entity
//! tables then get their discovered attributes, module enrichment, a
//! fallback pair of columns when nothing was discovered, and finally one
//! foreign key per inbound one-to-many or one-to-one relationship.

mod attributes;

use std::collections::HashMap;

use crate::detect::Detection;
use crate::dictionary::{AttributeSpec, Dictionary};
use crate::lexer::inflection::{foreign_key_name, table_name};
use crate::lexer::TokenStream;
use crate::model::{
    Cardinality, Constraint, Field, FieldType, ModuleTag, Relationship, Table, TableKind,
};

/// Default token distance between an attribute and its entity.
pub const DEFAULT_ATTRIBUTE_WINDOW: usize = 6;

/// Builds tables from detection results.
#[derive(Debug, Clone)]
pub struct SchemaSynthesizer<'d> {
    dictionary: &'d Dictionary,
    attribute_window: usize,
}

impl<'d> SchemaSynthesizer<'d> {
    pub fn new(dictionary: &'d Dictionary) -> Self {
        Self {
            dictionary,
            attribute_window: DEFAULT_ATTRIBUTE_WINDOW,
        }
    }

    pub fn with_attribute_window(mut self, window: usize) -> Self {
        self.attribute_window = window;
        self
    }

    pub fn synthesize(
        &self,
        stream: &TokenStream,
        detection: &Detection,
        relationships: &[Relationship],
    ) -> Vec<Table> {
        let mut attributes =
            attributes::collect(stream, detection, self.dictionary, self.attribute_window);
        let auth = detection.has_module(ModuleTag::Authentication);

        let mut tables: Vec<Table> = detection
            .entities
            .iter()
            .map(|entity| {
                let specs = attributes.remove(&entity.name).unwrap_or_default();
                entity_table(&entity.name, &specs, auth)
            })
            .collect();

        let index: HashMap<String, usize> = tables
            .iter()
            .enumerate()
            .filter_map(|(i, t)| t.entity.clone().map(|e| (e, i)))
            .collect();

        let mut junctions = Vec::new();
        for relationship in relationships {
            let (Some(&from), Some(&to)) = (
                index.get(&relationship.from_entity),
                index.get(&relationship.to_entity),
            ) else {
                continue;
            };
            match relationship.cardinality {
                Cardinality::OneToMany | Cardinality::OneToOne => {
                    let parent = tables[from].name.clone();
                    let column = foreign_key_name(&relationship.from_entity);
                    let unique = relationship.cardinality == Cardinality::OneToOne;
                    add_foreign_key(&mut tables[to], &column, &parent, unique);
                }
                Cardinality::ManyToMany => {
                    let junction = junction_table(
                        &tables[from].name,
                        &relationship.from_entity,
                        &tables[to].name,
                        &relationship.to_entity,
                    );
                    let clash = tables.iter().chain(&junctions).any(|t| t.name == junction.name);
                    if !clash {
                        junctions.push(junction);
                    }
                }
            }
        }
        tables.extend(junctions);

        tracing::debug!(tables = tables.len(), "schema synthesized");
        tables
    }
}

fn entity_table(entity: &str, specs: &[AttributeSpec], auth: bool) -> Table {
    let mut table = Table::new(table_name(entity), Some(entity.to_string()), TableKind::Entity);

    for spec in specs {
        merge_field(&mut table, spec.to_field());
    }

    if auth && is_account_entity(entity) {
        for field in account_fields() {
            merge_field(&mut table, field);
        }
    }

    if table.non_key_fields().next().is_none() {
        table
            .fields
            .push(Field::new("name", FieldType::String).not_null());
        table
            .fields
            .push(Field::new("created_at", FieldType::Datetime).not_null());
    }

    table
}

fn is_account_entity(entity: &str) -> bool {
    let lower = entity.to_lowercase();
    lower.contains("user") || lower == "account"
}

fn account_fields() -> [Field; 3] {
    [
        Field::new("email", FieldType::String).not_null().unique(),
        Field::new("password_hash", FieldType::String).not_null(),
        Field::new("username", FieldType::String).not_null().unique(),
    ]
}

/// Add a field, or widen the constraints of an existing one of that name.
fn merge_field(table: &mut Table, field: Field) {
    match table.field_mut(&field.name) {
        Some(existing) => existing.constraints.extend(field.constraints),
        None => table.fields.push(field),
    }
}

fn add_foreign_key(table: &mut Table, column: &str, parent: &str, unique: bool) {
    let mut fk = Field::foreign_key(column, parent);
    if unique {
        fk = fk.unique();
    }

    match table.field_mut(column) {
        Some(existing) => {
            existing.data_type = FieldType::Integer;
            existing.constraints.retain(|c| !matches!(c, Constraint::ForeignKey { .. }));
            existing.constraints.extend(fk.constraints);
        }
        None => table.fields.push(fk),
    }
}

fn junction_table(from_table: &str, from: &str, to_table: &str, to: &str) -> Table {
    let from_column = foreign_key_name(from);
    let to_column = foreign_key_name(to);

    let mut table = Table::new(format!("{}_{}", from_table, to_table), None, TableKind::Junction);
    table.fields.push(Field::foreign_key(from_column.clone(), from_table));
    table.fields.push(Field::foreign_key(to_column.clone(), to_table));
    table.unique_together = vec![from_column, to_column];
    table
}
