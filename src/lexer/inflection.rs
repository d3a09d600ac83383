//! Word inflection for the vocabulary and for generated names.
//!
//! Singular/plural handling for matching "users" against the vocabulary
//! entry "user", plus the naming conventions for entities and tables.
//! Uses the `inflector` crate with a table of irregular plurals that show up
//! in business requirements.

use inflector::Inflector;

/// Irregular plurals inflector gets wrong or that need protecting from its
/// suffix rules (`status` must not become `statu`).
static IRREGULAR_PLURALS: &[(&str, &str)] = &[
    // People
    ("person", "people"),
    ("child", "children"),
    ("man", "men"),
    ("woman", "women"),
    ("staff", "staff"),
    // -f/-fe → -ves
    ("leaf", "leaves"),
    ("life", "lives"),
    ("knife", "knives"),
    ("wife", "wives"),
    ("half", "halves"),
    ("shelf", "shelves"),
    // -s endings
    ("status", "statuses"),
    ("address", "addresses"),
    ("bus", "buses"),
    ("campus", "campuses"),
    ("class", "classes"),
    // Latin/Greek
    ("analysis", "analyses"),
    ("basis", "bases"),
    ("diagnosis", "diagnoses"),
    ("criterion", "criteria"),
    ("datum", "data"),
    ("medium", "media"),
    ("index", "indices"),
    ("matrix", "matrices"),
];

/// Plural form of a word. Irregulars are looked up before `inflector`.
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    let lower = word.to_lowercase();
    for (singular, plural) in IRREGULAR_PLURALS {
        if lower == *singular || lower == *plural {
            return plural.to_string();
        }
    }

    word.to_plural()
}

/// Singular form of a word (`reviews` → `review`, `people` → `person`).
pub fn singularize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    let lower = word.to_lowercase();
    for (singular, plural) in IRREGULAR_PLURALS {
        if lower == *plural || lower == *singular {
            return singular.to_string();
        }
    }

    word.to_singular()
}

/// Whether a lowercase word reads as a plural noun.
pub fn is_plural(word: &str) -> bool {
    let singular = singularize(word);
    !singular.is_empty() && singular != word
}

/// Canonical entity name for a (possibly plural, possibly multi-word) phrase.
///
/// `"line items"` → `"LineItem"`, `"users"` → `"User"`.
pub fn entity_name(phrase: &str) -> String {
    let mut words: Vec<String> = phrase.split_whitespace().map(str::to_lowercase).collect();
    if let Some(last) = words.last_mut() {
        *last = singularize(last);
    }
    words.join(" ").to_pascal_case()
}

/// Table name for an entity: snake_case plural (`LineItem` → `line_items`).
pub fn table_name(entity: &str) -> String {
    let snake = entity.to_snake_case();
    match snake.rsplit_once('_') {
        Some((head, last)) => format!("{}_{}", head, pluralize(last)),
        None => pluralize(&snake),
    }
}

/// Foreign key column name pointing at an entity (`LineItem` → `line_item_id`).
pub fn foreign_key_name(entity: &str) -> String {
    format!("{}_id", entity.to_snake_case())
}

/// snake_case form of an identifier-like word (`isPaid` → `is_paid`).
pub fn snake_case(word: &str) -> String {
    word.to_snake_case()
}
