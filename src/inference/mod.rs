//! Relationship inference between detected entities.
//!
//! Every pair of mentions that share a sentence is evidence. Heuristics, in
//! priority order:
//!
//! 1. **Phrase templates**: the words between the two mentions (fillers
//!    removed) match a connector such as "has many" or "belongs to", or the
//!    left mention is possessive with nothing in between ("order's items").
//!    The first explicit match in the text decides direction and
//!    cardinality; "has many" evidence in both directions makes the pair
//!    many-to-many.
//! 2. **Co-occurrence**: one-to-many from the entity mentioned first to the
//!    one mentioned second, taken from the first shared sentence.
//! 3. Pairs that never share a sentence get no relationship.
//!
//! Output follows entity detection order of the pair.

pub mod rules;
pub mod scoring;

pub use rules::{RelationRules, RelationTemplate, Shape, TemplateMatch};
pub use scoring::{ConfidenceScore, ScoreAdjustment, ScoringFactors};

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::detect::{Detection, Mention};
use crate::lexer::TokenStream;
use crate::model::{Cardinality, Relationship};

/// Centralized confidence thresholds and adjustment values.
pub mod thresholds {
    /// Confidence levels for different relationship sources.
    pub mod confidence {
        /// Relationship backed by an explicit phrase template.
        pub const PHRASE_BASE: f64 = 0.85;
        /// Relationship backed only by sentence co-occurrence.
        pub const COOCCURRENCE_BASE: f64 = 0.55;
        /// Maximum confidence for inferred relationships (never 100% certain).
        pub const INFERENCE_CAP: f64 = 0.95;
    }

    /// Confidence score adjustments.
    pub mod adjustment {
        /// Medium confidence boost.
        pub const MEDIUM_BOOST: f64 = 0.10;
        /// Minor confidence boost.
        pub const MINOR_BOOST: f64 = 0.05;
        /// Tiny confidence boost.
        pub const TINY_BOOST: f64 = 0.03;
    }
}

/// Evidence label for co-occurrence relationships.
pub const COOCCURRENCE_EVIDENCE: &str = "co-occurrence";

#[derive(Debug, Clone)]
struct Explicit {
    parent: String,
    child: String,
    child_plural: bool,
    cardinality: Cardinality,
    template: &'static str,
}

#[derive(Debug, Clone)]
struct CoOccurrence {
    first: String,
    second: String,
    second_plural: bool,
}

#[derive(Debug, Clone, Default)]
struct PairEvidence {
    explicit: Option<Explicit>,
    has_many_parents: BTreeSet<String>,
    phrase_sentences: BTreeSet<usize>,
    cooccurrence: Option<CoOccurrence>,
    cooccur_sentences: BTreeSet<usize>,
    adjacent: bool,
    possessive: bool,
}

/// Infers relationships from a detection and its token stream.
#[derive(Debug, Clone, Copy)]
pub struct Inferrer<'r> {
    rules: &'r RelationRules,
    stop_words_kept: bool,
}

impl Default for Inferrer<'static> {
    fn default() -> Self {
        Self::new(RelationRules::builtin())
    }
}

impl<'r> Inferrer<'r> {
    pub fn new(rules: &'r RelationRules) -> Self {
        Self {
            rules,
            stop_words_kept: true,
        }
    }

    /// Whether the stream still carries stop words. Without them, phrases
    /// are matched in their stop-word-free form ("belongs to" as `belongs`).
    pub fn with_stop_words(mut self, kept: bool) -> Self {
        self.stop_words_kept = kept;
        self
    }

    pub fn infer(&self, stream: &TokenStream, detection: &Detection) -> Vec<Relationship> {
        let evidence = self.collect(stream, detection);

        let mut relationships = Vec::new();
        for ((a, b), pair) in &evidence {
            let (Some(a), Some(b)) = (detection.entities.get(*a), detection.entities.get(*b))
            else {
                continue;
            };
            if let Some(relationship) = resolve(&a.name, &b.name, pair) {
                relationships.push(relationship);
            }
        }

        tracing::debug!(
            pairs = evidence.len(),
            relationships = relationships.len(),
            "relationship inference finished"
        );
        relationships
    }

    /// Gather evidence per unordered entity pair, keyed by detection rank.
    fn collect(
        &self,
        stream: &TokenStream,
        detection: &Detection,
    ) -> BTreeMap<(usize, usize), PairEvidence> {
        let tokens = stream.tokens();
        let ranks: HashMap<&str, usize> = detection
            .entities
            .iter()
            .enumerate()
            .map(|(rank, entity)| (entity.name.as_str(), rank))
            .collect();
        let max_gap = self.rules.max_gap();
        let mut evidence: BTreeMap<(usize, usize), PairEvidence> = BTreeMap::new();

        for mentions in detection.mentions.chunk_by(|a, b| a.sentence == b.sentence) {
            let Some(sentence) = mentions.first().map(|m| m.sentence) else {
                continue;
            };
            let ranked: Vec<(usize, &Mention)> = mentions
                .iter()
                .filter_map(|m| ranks.get(m.entity.as_str()).map(|&rank| (rank, m)))
                .collect();

            for (i, &(left_rank, left)) in ranked.iter().enumerate() {
                for &(right_rank, right) in &ranked[i + 1..] {
                    if left_rank == right_rank {
                        continue;
                    }
                    let key = (left_rank.min(right_rank), left_rank.max(right_rank));
                    let pair = evidence.entry(key).or_default();

                    pair.cooccur_sentences.insert(sentence);
                    if pair.cooccurrence.is_none() {
                        pair.cooccurrence = Some(CoOccurrence {
                            first: left.entity.clone(),
                            second: right.entity.clone(),
                            second_plural: right.plural,
                        });
                    }

                    if right.start.saturating_sub(left.end) > max_gap {
                        continue;
                    }

                    let gap: Vec<&str> = tokens[left.end..right.start]
                        .iter()
                        .map(|t| t.text.as_str())
                        .collect();
                    let gap = self.rules.strip_fillers(&gap);
                    let adjacent = gap.is_empty();
                    pair.adjacent |= adjacent;

                    let found = if left.possessive && adjacent {
                        pair.possessive = true;
                        Some(self.rules.possessive(right.plural))
                    } else if self.stop_words_kept {
                        self.rules.match_gap(&gap, right.plural)
                    } else {
                        self.rules.match_gap_without_stop_words(&gap, right.plural)
                    };
                    if let Some(found) = found {
                        record_explicit(pair, sentence, left, right, &found);
                    }
                }
            }
        }

        evidence
    }
}

fn record_explicit(
    pair: &mut PairEvidence,
    sentence: usize,
    left: &Mention,
    right: &Mention,
    found: &TemplateMatch,
) {
    let (parent, child) = if found.left_is_parent {
        (left, right)
    } else {
        (right, left)
    };

    pair.phrase_sentences.insert(sentence);
    if found.is_has_many() {
        pair.has_many_parents.insert(parent.entity.clone());
    }
    if pair.explicit.is_none() {
        pair.explicit = Some(Explicit {
            parent: parent.entity.clone(),
            child: child.entity.clone(),
            child_plural: child.plural,
            cardinality: found.cardinality,
            template: found.template,
        });
    }
}

/// Turn one pair's evidence into a relationship. `first` precedes `second`
/// in detection order.
fn resolve(first: &str, second: &str, pair: &PairEvidence) -> Option<Relationship> {
    if pair.has_many_parents.len() == 2 {
        let factors = ScoringFactors {
            repeated_evidence: pair.phrase_sentences.len() > 1,
            adjacent_mentions: pair.adjacent,
            plural_target: false,
            possessive: pair.possessive,
        };
        return Some(Relationship {
            from_entity: first.to_string(),
            to_entity: second.to_string(),
            cardinality: Cardinality::ManyToMany,
            confidence: score(thresholds::confidence::PHRASE_BASE, &factors),
            evidence: "phrase:mutual_has_many".to_string(),
        });
    }

    if let Some(explicit) = &pair.explicit {
        let factors = ScoringFactors {
            repeated_evidence: pair.phrase_sentences.len() > 1,
            adjacent_mentions: pair.adjacent,
            plural_target: explicit.cardinality == Cardinality::OneToMany && explicit.child_plural,
            possessive: pair.possessive,
        };
        return Some(Relationship {
            from_entity: explicit.parent.clone(),
            to_entity: explicit.child.clone(),
            cardinality: explicit.cardinality,
            confidence: score(thresholds::confidence::PHRASE_BASE, &factors),
            evidence: format!("phrase:{}", explicit.template),
        });
    }

    let co = pair.cooccurrence.as_ref()?;
    let factors = ScoringFactors {
        repeated_evidence: pair.cooccur_sentences.len() > 1,
        adjacent_mentions: pair.adjacent,
        plural_target: co.second_plural,
        possessive: false,
    };
    Some(Relationship {
        from_entity: co.first.clone(),
        to_entity: co.second.clone(),
        cardinality: Cardinality::OneToMany,
        confidence: score(thresholds::confidence::COOCCURRENCE_BASE, &factors),
        evidence: COOCCURRENCE_EVIDENCE.to_string(),
    })
}

fn score(base: f64, factors: &ScoringFactors) -> f64 {
    ConfidenceScore::calculate(base, factors).final_score
}

/// Infer with the built-in rules.
pub fn infer_relationships(stream: &TokenStream, detection: &Detection) -> Vec<Relationship> {
    Inferrer::default().infer(stream, detection)
}
