//! End-to-end tests for the analysis pipeline.
//!
//! These exercise `analyze` the way callers do: raw requirement text in, a
//! complete `AnalysisResult` out.

use reqforge::config::{Settings, SettingsError};
use reqforge::sql::Dialect;
use reqforge::{
    analyze, AnalysisResult, AnalyzeOptions, Analyzer, Cardinality, ExternalAnalyzer, InputError,
    ModuleTag, PartialDetectionWarning, TableKind, RULE_BASED_PROVENANCE,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

const EXAMPLE: &str = "Users can register and log in. Users place orders. Each order has many items.";

fn run(text: &str) -> AnalysisResult {
    analyze(text, &AnalyzeOptions::default()).unwrap()
}

// ============================================================================
// Reference Example
// ============================================================================

#[test]
fn test_reference_example() {
    let result = run(EXAMPLE);

    assert!(result.has_module(ModuleTag::Authentication));
    let entities: Vec<&str> = result.entities.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(entities, vec!["User", "Order", "Item"]);

    let user_order = result.relationship_between("User", "Order").unwrap();
    assert_eq!(user_order.from_entity, "User");
    assert_eq!(user_order.cardinality, Cardinality::OneToMany);

    let order_item = result.relationship_between("Order", "Item").unwrap();
    assert_eq!(order_item.from_entity, "Order");
    assert_eq!(order_item.cardinality, Cardinality::OneToMany);
    assert_eq!(order_item.evidence, "phrase:has_many");

    let orders = result.table_for_entity("Order").unwrap();
    assert_eq!(orders.foreign_keys_to("users").count(), 1);
    let items = result.table_for_entity("Item").unwrap();
    assert_eq!(items.foreign_keys_to("orders").count(), 1);

    let users = result.table("users").unwrap();
    assert!(users.field("email").unwrap().is_unique());
    assert!(users.field("password_hash").is_some());

    let functions: Vec<&str> = result.pseudocode.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(functions, vec!["register", "login", "logout", "reset_password"]);

    assert_eq!(result.architecture.len(), 3);
    assert!(result.warnings.is_empty());
    assert_eq!(result.powered_by, RULE_BASED_PROVENANCE);
}

#[test]
fn test_reference_example_json_shape() {
    let result = run(EXAMPLE);
    let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();

    assert_eq!(json["poweredBy"], "rule-based");
    assert_eq!(json["modules"][0]["tag"], "authentication");
    assert_eq!(json["relationships"][0]["fromEntity"], "User");
    assert_eq!(json["relationships"][0]["cardinality"], "one-to-many");
    assert_eq!(json["tables"][0]["name"], "users");
    assert_eq!(json["pseudocode"][0]["owningModule"], "authentication");
    assert_eq!(json["pseudocode"][0]["body"][0]["kind"], "validate");
    assert_eq!(json["architecture"][0]["name"], "presentation");
    assert!(json["warnings"].as_array().unwrap().is_empty());
}

#[test]
fn test_result_round_trips_through_json() {
    let result = run(EXAMPLE);
    let json = result.to_json_pretty().unwrap();
    let parsed: AnalysisResult = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, result);
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_output_is_deterministic() {
    let text = "Customers browse products and search categories. A customer has many orders. \
        Orders contain line items. Products belong to many categories. Send an email when an \
        order ships. Admins export monthly sales reports.";

    let first = run(text).to_json().unwrap();
    for _ in 0..5 {
        assert_eq!(run(text).to_json().unwrap(), first);
    }
    let other = Analyzer::new()
        .analyze(text, &AnalyzeOptions::default())
        .unwrap();
    assert_eq!(other.to_json().unwrap(), first);
}

#[test]
fn test_user_and_users_dedup() {
    let result = run("A user creates a profile. Users update profiles.");
    let users: Vec<_> = result.entities.iter().filter(|e| e.name == "User").collect();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].mention_count, 2);
}

#[test]
fn test_no_shared_sentence_no_relationship() {
    let result = run("Employees join departments. Invoices are paid.");
    assert!(result.relationship_between("Employee", "Invoice").is_none());
    assert!(result.relationship_between("Department", "Invoice").is_none());
    assert!(result.relationship_between("Employee", "Department").is_some());
}

#[test]
fn test_schema_invariants_hold() {
    let result = run(
        "Teachers manage courses. Students belong to many courses. Each course has one room. \
         Rooms have a capacity.",
    );
    for table in &result.tables {
        assert_eq!(table.primary_keys().count(), 1, "{}", table.name);
        assert!(table.non_key_fields().next().is_some(), "{}", table.name);
    }
    for rel in &result.relationships {
        if rel.cardinality == Cardinality::OneToMany {
            let parent = result.table_for_entity(&rel.from_entity).unwrap();
            let child = result.table_for_entity(&rel.to_entity).unwrap();
            assert_eq!(child.foreign_keys_to(&parent.name).count(), 1);
        }
    }
    assert!(result
        .tables
        .iter()
        .any(|t| t.kind == TableKind::Junction && t.name == "students_courses"));
}

#[test]
fn test_relationships_reference_known_entities() {
    let result = run(EXAMPLE);
    for rel in &result.relationships {
        assert!(result.entity(&rel.from_entity).is_some());
        assert!(result.entity(&rel.to_entity).is_some());
        assert_ne!(rel.from_entity, rel.to_entity);
        assert!(rel.confidence > 0.0 && rel.confidence <= 1.0);
    }
}

#[test]
fn test_longest_single_sentence_stays_fast() {
    let max = Settings::default().analysis.max_input_chars;
    let unit = "user order item product invoice ";
    let text = unit.repeat(max / unit.len());
    assert!(text.trim().chars().count() <= max);

    let started = Instant::now();
    let result = run(&text);
    let elapsed = started.elapsed();

    assert!(elapsed < Duration::from_secs(30), "took {:?}", elapsed);
    assert_eq!(result.entities.len(), 5);
    assert_eq!(result.relationships.len(), 10);
    assert_eq!(result.relationship_between("User", "Order").unwrap().from_entity, "User");
}

#[test]
fn test_dropping_stop_words_keeps_belongs_to() {
    let settings = Settings::from_toml("[analysis]\nkeep_stop_words = false\n").unwrap();
    let analyzer = Analyzer::from_settings(&settings).unwrap();
    let result = analyzer
        .analyze("An item belongs to an order.", &AnalyzeOptions::default())
        .unwrap();

    let rel = result.relationship_between("Order", "Item").unwrap();
    assert_eq!(rel.from_entity, "Order");
    assert_eq!(rel.evidence, "phrase:belongs_to");
    assert_eq!(result.table("items").unwrap().foreign_keys_to("orders").count(), 1);
}

// ============================================================================
// Partial Detection and Input Errors
// ============================================================================

#[test]
fn test_entities_without_modules() {
    let result = run("Rooms and coupons.");
    assert_eq!(result.warnings, vec![PartialDetectionWarning::NoModules]);
    assert!(result.pseudocode.is_empty());
    assert_eq!(result.tables.len(), 2);
}

#[test]
fn test_modules_without_entities() {
    let result = run("Log in, then search and export.");
    assert_eq!(result.warnings, vec![PartialDetectionWarning::NoEntities]);
    assert!(result.tables.is_empty());
    assert!(result.relationships.is_empty());
    assert!(!result.pseudocode.is_empty());
}

#[test]
fn test_empty_and_whitespace_input() {
    let options = AnalyzeOptions::default();
    assert_eq!(analyze("", &options), Err(InputError::Empty));
    assert_eq!(analyze("   ", &options), Err(InputError::Empty));
    assert_eq!(analyze("\n\t\n", &options), Err(InputError::Empty));
}

#[test]
fn test_length_limit_counts_characters() {
    let settings = Settings::from_toml("[analysis]\nmax_input_chars = 5\n").unwrap();
    let analyzer = Analyzer::from_settings(&settings).unwrap();

    assert!(analyzer.analyze("  héllo  ", &AnalyzeOptions::default()).is_ok());
    assert_eq!(
        analyzer.analyze("héllos", &AnalyzeOptions::default()),
        Err(InputError::TooLong { len: 6, max: 5 })
    );
}

// ============================================================================
// External Analyzer
// ============================================================================

struct Recording {
    calls: AtomicUsize,
    answer: Option<AnalysisResult>,
}

impl ExternalAnalyzer for Recording {
    fn name(&self) -> &str {
        "mock-llm"
    }

    fn analyze(&self, _text: &str) -> Option<AnalysisResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer.clone()
    }
}

#[test]
fn test_unavailable_collaborator_falls_back() {
    let mock = Arc::new(Recording {
        calls: AtomicUsize::new(0),
        answer: None,
    });
    let analyzer = Analyzer::new().with_collaborator(mock.clone());

    let result = analyzer.analyze(EXAMPLE, &AnalyzeOptions::default()).unwrap();
    assert_eq!(mock.calls.load(Ordering::SeqCst), 1);
    assert_eq!(result.powered_by, RULE_BASED_PROVENANCE);
    assert_eq!(result, run(EXAMPLE));
}

#[test]
fn test_collaborator_answer_is_used() {
    let mut answer = run("Users place orders.");
    answer.powered_by = String::new();
    let mock = Arc::new(Recording {
        calls: AtomicUsize::new(0),
        answer: Some(answer),
    });
    let analyzer = Analyzer::new().with_collaborator(mock.clone());

    let result = analyzer.analyze(EXAMPLE, &AnalyzeOptions::default()).unwrap();
    assert_eq!(result.powered_by, "mock-llm");
    assert_eq!(result.entities.len(), 2);
}

#[test]
fn test_fallback_only_never_calls_collaborator() {
    let mock = Arc::new(Recording {
        calls: AtomicUsize::new(0),
        answer: None,
    });
    let analyzer = Analyzer::new().with_collaborator(mock.clone());

    analyzer
        .analyze(EXAMPLE, &AnalyzeOptions::fallback_only())
        .unwrap();
    assert_eq!(mock.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_invalid_input_never_reaches_collaborator() {
    let mock = Arc::new(Recording {
        calls: AtomicUsize::new(0),
        answer: None,
    });
    let analyzer = Analyzer::new().with_collaborator(mock.clone());

    assert!(analyzer.analyze(" ", &AnalyzeOptions::default()).is_err());
    assert_eq!(mock.calls.load(Ordering::SeqCst), 0);
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_settings_file_drives_analysis() {
    let dir = std::env::temp_dir().join(format!("reqforge-it-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("reqforge.toml");
    std::fs::write(
        &path,
        r#"
[analysis]
detect_capitalized_terms = true

[dictionary.modules]
authentication = ["sso"]

[dictionary.entities]
Vehicle = ["vehicle", "car"]

[output]
dialect = "sqlite"
"#,
    )
    .unwrap();

    let settings = Settings::from_file(&path).unwrap();
    assert_eq!(settings.output.dialect, Dialect::Sqlite);

    let analyzer = Analyzer::from_settings(&settings).unwrap();
    let result = analyzer
        .analyze(
            "Drivers rent cars through Hertz and sign in with sso.",
            &AnalyzeOptions::default(),
        )
        .unwrap();

    assert!(result.entity("Vehicle").is_some());
    assert!(result.entity("Hertz").is_some());
    assert!(result.has_module(ModuleTag::Authentication));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_missing_settings_file() {
    let err = Settings::from_file("/nonexistent/reqforge.toml").unwrap_err();
    assert!(matches!(err, SettingsError::FileNotFound(_)));
}

#[test]
fn test_invalid_settings_are_rejected() {
    let err = Settings::from_toml("[analysis]\nattribute_window = 0\n").unwrap_err();
    assert!(matches!(err, SettingsError::InvalidConfig(_)));

    let settings = Settings::from_toml("[dictionary.entities]\nbad_name = [\"thing\"]\n").unwrap();
    assert!(matches!(
        Analyzer::from_settings(&settings),
        Err(SettingsError::Dictionary(_))
    ));
}
