//! Tests for schema synthesis: completeness, key consistency and attribute
//! placement.

use reqforge::detect::Detector;
use reqforge::dictionary::Dictionary;
use reqforge::inference::infer_relationships;
use reqforge::lexer::normalize;
use reqforge::schema::SchemaSynthesizer;
use reqforge::{Cardinality, FieldType, Relationship, Table, TableKind};

fn build(text: &str) -> (Vec<Relationship>, Vec<Table>) {
    build_with_window(text, 6)
}

fn build_with_window(text: &str, window: usize) -> (Vec<Relationship>, Vec<Table>) {
    let dictionary = Dictionary::builtin();
    let stream = normalize(text);
    let detection = Detector::new(&dictionary).detect(&stream);
    let relationships = infer_relationships(&stream, &detection);
    let tables = SchemaSynthesizer::new(&dictionary)
        .with_attribute_window(window)
        .synthesize(&stream, &detection, &relationships);
    (relationships, tables)
}

fn table<'a>(tables: &'a [Table], name: &str) -> &'a Table {
    tables
        .iter()
        .find(|t| t.name == name)
        .unwrap_or_else(|| panic!("missing table {}", name))
}

fn field_names(table: &Table) -> Vec<&str> {
    table.fields.iter().map(|f| f.name.as_str()).collect()
}

const SHOP: &str = "Customers register and log in. A customer has many orders. \
    Each order contains several line items. Products belong to many categories. \
    Every product has a price, sku and description. Reviews are owned by customers.";

// ============================================================================
// Invariants
// ============================================================================

#[test]
fn test_every_table_has_one_primary_key_and_a_column() {
    let (_, tables) = build(SHOP);
    assert!(!tables.is_empty());
    for table in &tables {
        let keys: Vec<_> = table.primary_keys().collect();
        assert_eq!(keys.len(), 1, "{}", table.name);
        assert_eq!(keys[0].name, "id");
        assert_eq!(keys[0].data_type, FieldType::Integer);
        assert!(table.non_key_fields().next().is_some(), "{}", table.name);
    }
}

#[test]
fn test_one_foreign_key_per_one_to_many() {
    let (relationships, tables) = build(SHOP);
    let one_to_many: Vec<&Relationship> = relationships
        .iter()
        .filter(|r| r.cardinality == Cardinality::OneToMany)
        .collect();
    assert!(!one_to_many.is_empty());

    for rel in one_to_many {
        let parent = tables
            .iter()
            .find(|t| t.entity.as_deref() == Some(rel.from_entity.as_str()))
            .unwrap();
        let child = tables
            .iter()
            .find(|t| t.entity.as_deref() == Some(rel.to_entity.as_str()))
            .unwrap();
        assert_eq!(
            child.foreign_keys_to(&parent.name).count(),
            1,
            "{} -> {}",
            rel.from_entity,
            rel.to_entity
        );
    }
}

#[test]
fn test_tables_follow_entity_order_then_junctions() {
    let (_, tables) = build(SHOP);
    let names: Vec<&str> = tables.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "customers",
            "orders",
            "line_items",
            "products",
            "categories",
            "reviews",
            "products_categories",
        ]
    );
    assert_eq!(tables[6].kind, TableKind::Junction);
}

// ============================================================================
// Columns
// ============================================================================

#[test]
fn test_attributes_and_types() {
    let (_, tables) = build(SHOP);
    let products = table(&tables, "products");
    assert_eq!(field_names(products), vec!["id", "price", "sku", "description"]);
    assert_eq!(products.field("price").unwrap().data_type, FieldType::Float);
    assert!(products.field("sku").unwrap().is_unique());
    assert_eq!(products.field("description").unwrap().data_type, FieldType::Text);
    assert!(!products.field("description").unwrap().is_not_null());
}

#[test]
fn test_identifier_words_become_columns() {
    let (_, tables) = build("Each task tracks isDone and due_date.");
    let tasks = table(&tables, "tasks");
    assert_eq!(field_names(tasks), vec!["id", "is_done", "due_date"]);
    assert_eq!(tasks.field("is_done").unwrap().data_type, FieldType::Boolean);
    assert_eq!(tasks.field("due_date").unwrap().data_type, FieldType::Datetime);
}

#[test]
fn test_attribute_window_limits_reach() {
    let text = "The event venue will be decided later together with its capacity.";
    let (_, wide) = build_with_window(text, 12);
    assert!(table(&wide, "events").field("capacity").is_some());

    let (_, narrow) = build_with_window(text, 2);
    let events = table(&narrow, "events");
    assert!(events.field("capacity").is_none());
    assert_eq!(field_names(events), vec!["id", "name", "created_at"]);
}

#[test]
fn test_fallback_columns() {
    let (_, tables) = build("Rooms are listed.");
    let rooms = table(&tables, "rooms");
    assert_eq!(field_names(rooms), vec!["id", "name", "created_at"]);
    assert!(rooms.fields.iter().skip(1).all(|f| f.is_not_null()));
}

#[test]
fn test_account_fields_need_authentication() {
    let (_, with_auth) = build("An account is created at registration.");
    let accounts = table(&with_auth, "accounts");
    assert_eq!(
        field_names(accounts),
        vec!["id", "email", "password_hash", "username"]
    );

    let (_, without_auth) = build("An account is created.");
    assert_eq!(
        field_names(table(&without_auth, "accounts")),
        vec!["id", "name", "created_at"]
    );
}

// ============================================================================
// Keys
// ============================================================================

#[test]
fn test_junction_references_both_sides() {
    let (_, tables) = build(SHOP);
    let junction = table(&tables, "products_categories");
    assert_eq!(junction.entity, None);
    assert_eq!(junction.field("product_id").unwrap().references(), Some("products"));
    assert_eq!(
        junction.field("category_id").unwrap().references(),
        Some("categories")
    );
    assert_eq!(junction.unique_together, vec!["product_id", "category_id"]);
}

#[test]
fn test_multi_word_foreign_key_name() {
    let (_, tables) = build(SHOP);
    let line_items = table(&tables, "line_items");
    let fk = line_items.field("order_id").unwrap();
    assert_eq!(fk.references(), Some("orders"));
    assert!(!line_items.referenced_tables().contains(&"customers"));
}

#[test]
fn test_no_entities_no_tables() {
    let (relationships, tables) = build("Make it fast.");
    assert!(relationships.is_empty());
    assert!(tables.is_empty());
}
