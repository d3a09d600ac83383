//! Tests for module and entity detection against the built-in and extended
//! dictionaries.

use reqforge::config::DictionarySettings;
use reqforge::detect::{Detection, Detector};
use reqforge::dictionary::{Dictionary, DictionaryError};
use reqforge::lexer::normalize;
use reqforge::ModuleTag;
use std::collections::BTreeMap;

fn detect(text: &str) -> Detection {
    let dictionary = Dictionary::builtin();
    Detector::new(&dictionary).detect(&normalize(text))
}

fn entity_names(detection: &Detection) -> Vec<&str> {
    detection.entities.iter().map(|e| e.name.as_str()).collect()
}

// ============================================================================
// Entities
// ============================================================================

#[test]
fn test_user_and_users_are_one_entity() {
    let detection = detect("A user logs in. Users place orders. The user's orders are listed.");

    assert_eq!(entity_names(&detection), vec!["User", "Order"]);
    assert_eq!(detection.entities[0].mention_count, 3);
    assert_eq!(detection.entities[1].mention_count, 2);
    assert_eq!(detection.mentions.len(), 5);
}

#[test]
fn test_synonyms_map_to_canonical_entity() {
    let detection = detect("Clients and buyers leave reviews");
    assert_eq!(entity_names(&detection), vec!["Customer", "Review"]);
    let customer = &detection.entities[0];
    assert_eq!(
        customer.source_phrases.iter().collect::<Vec<_>>(),
        vec!["buyers", "clients"]
    );
}

#[test]
fn test_mentions_carry_sentence_and_position() {
    let detection = detect("Teachers run courses. Students join courses.");
    let positions: Vec<(&str, usize, usize)> = detection
        .mentions
        .iter()
        .map(|m| (m.entity.as_str(), m.sentence, m.start))
        .collect();
    assert_eq!(
        positions,
        vec![
            ("Teacher", 0, 0),
            ("Course", 0, 2),
            ("Student", 1, 3),
            ("Course", 1, 5),
        ]
    );
    assert_eq!(detection.entity_rank("Student"), Some(2));
    assert_eq!(detection.mentions_in(1).count(), 2);
}

#[test]
fn test_no_entities() {
    let detection = detect("It should be fast and reliable.");
    assert!(detection.entities.is_empty());
    assert!(detection.mentions.is_empty());
}

// ============================================================================
// Modules
// ============================================================================

#[test]
fn test_matched_keywords_are_recorded() {
    let detection = detect("Users register, log in and reset their password.");
    let auth = &detection.modules[0];
    assert_eq!(auth.tag, ModuleTag::Authentication);
    assert_eq!(auth.display_name, "Authentication");
    assert_eq!(
        auth.matched_keywords.iter().collect::<Vec<_>>(),
        vec!["log in", "password", "register", "user"]
    );
}

#[test]
fn test_many_modules() {
    let detection = detect(
        "Store every booking in a database, email a reminder and show a dashboard with charts.",
    );
    let tags = detection.module_tags();
    for tag in [
        ModuleTag::DataStorage,
        ModuleTag::Scheduling,
        ModuleTag::Notification,
        ModuleTag::Ui,
        ModuleTag::Reporting,
    ] {
        assert!(tags.contains(&tag), "missing {}", tag);
    }
    assert_eq!(tags[0], ModuleTag::DataStorage);
}

// ============================================================================
// Extended Dictionary
// ============================================================================

#[test]
fn test_configured_entities_and_keywords() {
    let mut settings = DictionarySettings::default();
    settings
        .entities
        .insert("Vehicle".to_string(), vec!["vehicle".to_string(), "car".to_string()]);
    settings
        .modules
        .insert("authentication".to_string(), vec!["SSO".to_string()]);

    let dictionary = Dictionary::with_extensions(&settings).unwrap();
    let detection = Detector::new(&dictionary).detect(&normalize("Drivers rent cars via sso"));

    assert_eq!(entity_names(&detection), vec!["Vehicle"]);
    assert!(detection.has_module(ModuleTag::Authentication));
}

#[test]
fn test_conflicting_entity_keyword_is_rejected() {
    let mut entities = BTreeMap::new();
    entities.insert("Client".to_string(), vec!["customer".to_string()]);
    let settings = DictionarySettings {
        entities,
        ..DictionarySettings::default()
    };

    let err = Dictionary::with_extensions(&settings).unwrap_err();
    assert!(matches!(err, DictionaryError::ConflictingKeyword { .. }));
}

#[test]
fn test_unknown_module_tag_is_rejected() {
    let mut settings = DictionarySettings::default();
    settings
        .modules
        .insert("billing".to_string(), vec!["ledger".to_string()]);

    let err = Dictionary::with_extensions(&settings).unwrap_err();
    assert_eq!(err, DictionaryError::UnknownModuleTag("billing".to_string()));
}
