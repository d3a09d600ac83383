//! Field-name → data type lookup.
//!
//! Applied to the snake_case parts of a field name. Rules are checked in
//! order; the first hit wins and anything unmatched is a string.

use crate::model::FieldType;

const BOOLEAN_PREFIXES: &[&str] = &["is", "has", "can", "allow", "allows"];
const DATETIME_PARTS: &[&str] = &["date", "time", "timestamp", "deadline", "birthday", "dob"];
const DATETIME_SUFFIXES: &[&str] = &["at", "on"];
const FLOAT_PARTS: &[&str] = &[
    "price", "amount", "total", "cost", "discount", "tax", "balance", "weight", "score", "rate",
    "salary", "fee", "latitude", "longitude",
];
const INTEGER_PARTS: &[&str] = &[
    "quantity", "count", "stock", "rating", "age", "capacity", "minutes", "seconds", "year",
];
const TEXT_PARTS: &[&str] = &[
    "description", "content", "bio", "notes", "body", "summary", "text",
];

/// Infer a column type from its name.
///
/// ```ignore
/// assert_eq!(infer_field_type("is_paid"), FieldType::Boolean);
/// assert_eq!(infer_field_type("due_date"), FieldType::Datetime);
/// assert_eq!(infer_field_type("unit_price"), FieldType::Float);
/// ```
pub fn infer_field_type(name: &str) -> FieldType {
    let lower = name.to_lowercase();
    let parts: Vec<&str> = lower.split('_').filter(|p| !p.is_empty()).collect();
    let (Some(first), Some(last)) = (parts.first(), parts.last()) else {
        return FieldType::String;
    };
    let any = |set: &[&str]| parts.iter().any(|p| set.contains(p));

    if parts.len() > 1 && BOOLEAN_PREFIXES.contains(first) {
        FieldType::Boolean
    } else if (parts.len() > 1 && DATETIME_SUFFIXES.contains(last)) || any(DATETIME_PARTS) {
        FieldType::Datetime
    } else if *last == "id" {
        FieldType::Integer
    } else if any(FLOAT_PARTS) {
        FieldType::Float
    } else if any(INTEGER_PARTS) {
        FieldType::Integer
    } else if any(TEXT_PARTS) {
        FieldType::Text
    } else {
        FieldType::String
    }
}
