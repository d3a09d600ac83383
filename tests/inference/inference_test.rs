//! Tests for relationship inference over detected mentions.

use reqforge::detect::Detector;
use reqforge::dictionary::Dictionary;
use reqforge::inference::rules::FILLER_ALLOWANCE;
use reqforge::inference::{
    infer_relationships, ConfidenceScore, Inferrer, RelationRules, ScoringFactors,
    COOCCURRENCE_EVIDENCE,
};
use reqforge::lexer::{normalize, Normalizer};
use reqforge::{Cardinality, Relationship};

fn infer(text: &str) -> Vec<Relationship> {
    let dictionary = Dictionary::builtin();
    let stream = normalize(text);
    let detection = Detector::new(&dictionary).detect(&stream);
    infer_relationships(&stream, &detection)
}

fn only(relationships: &[Relationship]) -> &Relationship {
    assert_eq!(relationships.len(), 1, "{:?}", relationships);
    &relationships[0]
}

// ============================================================================
// Phrase Templates
// ============================================================================

#[test]
fn test_verb_with_quantifier() {
    let relationships = infer("Users place many orders.");
    let rel = only(&relationships);
    assert_eq!((rel.from_entity.as_str(), rel.to_entity.as_str()), ("User", "Order"));
    assert_eq!(rel.cardinality, Cardinality::OneToMany);
    assert_eq!(rel.evidence, "phrase:quantified_many");
    assert_eq!(rel.confidence, 0.88);
}

#[test]
fn test_manages_reads_as_has_many() {
    let relationships = infer("A department manages employees.");
    let rel = only(&relationships);
    assert_eq!(rel.from_entity, "Department");
    assert_eq!(rel.to_entity, "Employee");
    assert_eq!(rel.evidence, "phrase:has_many");
}

#[test]
fn test_passive_assignment_points_at_parent() {
    let relationships = infer("Each ticket is assigned to a team.");
    let rel = only(&relationships);
    assert_eq!(rel.from_entity, "Team");
    assert_eq!(rel.to_entity, "Ticket");
    assert_eq!(rel.cardinality, Cardinality::OneToMany);
    assert_eq!(rel.evidence, "phrase:belongs_to");
    assert_eq!(rel.confidence, 0.85);
}

#[test]
fn test_bare_has_with_singular_is_one_to_one() {
    let relationships = infer("Every customer has an address.");
    let rel = only(&relationships);
    assert_eq!(rel.from_entity, "Customer");
    assert_eq!(rel.to_entity, "Address");
    assert_eq!(rel.cardinality, Cardinality::OneToOne);
    assert_eq!(rel.evidence, "phrase:has");
}

#[test]
fn test_bare_has_with_plural_is_one_to_many() {
    let relationships = infer("Projects have tasks.");
    let rel = only(&relationships);
    assert_eq!(rel.cardinality, Cardinality::OneToMany);
    assert_eq!(rel.evidence, "phrase:has");
}

// ============================================================================
// Co-occurrence
// ============================================================================

#[test]
fn test_entities_that_never_share_a_sentence() {
    let relationships = infer("Patients book appointments. Doctors write reports.");
    let pairs: Vec<(&str, &str)> = relationships
        .iter()
        .map(|r| (r.from_entity.as_str(), r.to_entity.as_str()))
        .collect();
    assert_eq!(pairs, vec![("Patient", "Appointment"), ("Doctor", "Report")]);
    assert!(relationships
        .iter()
        .all(|r| r.evidence == COOCCURRENCE_EVIDENCE));
}

#[test]
fn test_repeated_cooccurrence_raises_confidence() {
    let relationships = infer("Customers write reviews. Reviews mention customers.");
    let rel = only(&relationships);
    assert_eq!(rel.from_entity, "Customer");
    assert_eq!(rel.to_entity, "Review");
    // 0.55 + repeated + plural
    assert_eq!(rel.confidence, 0.68);
}

#[test]
fn test_confidence_is_bounded() {
    let relationships = infer(
        "An order's items are listed. Each order has many items. Orders contain items.",
    );
    let rel = only(&relationships);
    assert!(rel.confidence > 0.0 && rel.confidence <= 0.95);
}

// ============================================================================
// Quoting, Stop Words and Gap Width
// ============================================================================

#[test]
fn test_quoted_words_are_not_possessive() {
    let relationships = infer("Users with the 'admin' role. An 'order' items list.");
    assert!(!relationships.is_empty());
    for rel in &relationships {
        assert_ne!(rel.evidence, "phrase:possessive", "{:?}", rel);
        assert!(rel.confidence < 0.95, "{:?}", rel);
    }
}

#[test]
fn test_belongs_to_without_stop_words() {
    let dictionary = Dictionary::builtin();
    let stream = Normalizer::new(false).normalize("An item belongs to an order.");
    let detection = Detector::new(&dictionary).detect(&stream);

    let relationships = Inferrer::default()
        .with_stop_words(false)
        .infer(&stream, &detection);
    let rel = only(&relationships);
    assert_eq!((rel.from_entity.as_str(), rel.to_entity.as_str()), ("Order", "Item"));
    assert_eq!(rel.evidence, "phrase:belongs_to");

    let literal = Inferrer::default().infer(&stream, &detection);
    assert_eq!(only(&literal).evidence, COOCCURRENCE_EVIDENCE);
}

#[test]
fn test_fillers_inside_gap_bound_still_match() {
    let rules = RelationRules::builtin();
    assert_eq!(rules.max_gap(), 5 + FILLER_ALLOWANCE);

    let relationships = infer("A customer can also typically have many orders.");
    assert_eq!(only(&relationships).evidence, "phrase:has_many");
}

#[test]
fn test_distant_mentions_only_cooccur() {
    let relationships = infer(
        "A customer who registers online and then waits quietly for several weeks \
         finally has many orders.",
    );
    let rel = only(&relationships);
    assert_eq!((rel.from_entity.as_str(), rel.to_entity.as_str()), ("Customer", "Order"));
    assert_eq!(rel.evidence, COOCCURRENCE_EVIDENCE);
}

// ============================================================================
// Determinism and Rules
// ============================================================================

#[test]
fn test_repeated_runs_are_identical() {
    let text = "Students enroll in courses. A course has many students. Teachers manage courses.";
    assert_eq!(infer(text), infer(text));
}

#[test]
fn test_custom_rules_instance_matches_builtin() {
    let text = "A student can belong to many courses.";
    let dictionary = Dictionary::builtin();
    let stream = normalize(text);
    let detection = Detector::new(&dictionary).detect(&stream);

    let rules = RelationRules::default();
    let custom = Inferrer::new(&rules).infer(&stream, &detection);
    assert_eq!(custom, infer_relationships(&stream, &detection));
    assert_eq!(custom[0].cardinality, Cardinality::ManyToMany);
}

#[test]
fn test_score_breakdown() {
    let factors = ScoringFactors {
        repeated_evidence: true,
        adjacent_mentions: true,
        plural_target: true,
        possessive: true,
    };
    let score = ConfidenceScore::calculate(0.85, &factors);
    assert_eq!(score.base_score, 0.85);
    assert_eq!(score.adjustments.len(), 4);
    assert_eq!(score.final_score, 0.95);

    let plain = ConfidenceScore::calculate(0.55, &ScoringFactors::default());
    assert!(plain.adjustments.is_empty());
    assert_eq!(plain.final_score, 0.55);
}
