//! Phrase templates for relationship inference.
//!
//! A template matches the words *between* two entity mentions of the same
//! sentence, after filler words are removed: in "each order has many items"
//! the gap is `has many`. The template's [`Shape`] decides direction and
//! cardinality.

use std::sync::LazyLock;

use crate::lexer::is_stop_word;
use crate::model::Cardinality;

/// How a template relates the left mention (`A`) to the right one (`B`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// A → B, one-to-many.
    HasMany,
    /// A → B, one-to-one.
    HasOne,
    /// A → B; one-to-many when B is written in the plural, else one-to-one.
    Has,
    /// B → A, one-to-many.
    BelongsTo,
    /// A ↔ B, many-to-many.
    BelongsToMany,
}

/// A named set of connector phrases sharing one shape.
#[derive(Debug, Clone, Copy)]
pub struct RelationTemplate {
    pub name: &'static str,
    pub shape: Shape,
    pub phrases: &'static [&'static str],
}

/// A template hit for one mention pair, already oriented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateMatch {
    pub template: &'static str,
    pub left_is_parent: bool,
    pub cardinality: Cardinality,
}

impl TemplateMatch {
    /// "Has many" evidence pointing from the parent.
    pub fn is_has_many(&self) -> bool {
        self.cardinality == Cardinality::OneToMany
    }
}

static TEMPLATES: &[RelationTemplate] = &[
    RelationTemplate {
        name: "belongs_to_many",
        shape: Shape::BelongsToMany,
        phrases: &[
            "belongs to many",
            "belong to many",
            "belongs to multiple",
            "belong to multiple",
            "has and belongs to many",
            "have and belong to many",
            "is linked to many",
            "are linked to many",
        ],
    },
    RelationTemplate {
        name: "belongs_to",
        shape: Shape::BelongsTo,
        phrases: &[
            "belongs to",
            "belong to",
            "belongs to one",
            "belong to one",
            "is owned by",
            "are owned by",
            "is part of",
            "are part of",
            "is assigned to",
            "are assigned to",
        ],
    },
    RelationTemplate {
        name: "has_many",
        shape: Shape::HasMany,
        phrases: &[
            "has many",
            "have many",
            "has multiple",
            "have multiple",
            "has several",
            "have several",
            "has one or more",
            "have one or more",
            "contains",
            "contain",
            "includes",
            "include",
            "owns",
            "own",
            "holds",
            "hold",
            "consists of",
            "consist of",
            "manages",
            "manage",
        ],
    },
    RelationTemplate {
        name: "has_one",
        shape: Shape::HasOne,
        phrases: &["has one", "have one", "has exactly one", "have exactly one", "has only one"],
    },
    RelationTemplate {
        name: "has",
        shape: Shape::Has,
        phrases: &["has", "have", "with"],
    },
];

/// Words dropped from a gap before template matching.
static FILLERS: &[&str] = &[
    "a", "an", "the", "their", "its", "his", "her", "our", "your", "can", "may", "might", "could",
    "will", "would", "should", "must", "also", "each", "every", "any", "typically", "usually",
    "always", "often", "generally",
];

/// Gap tails that read as "verb many": "users place many orders".
static QUANTIFIERS: &[&str] = &["many", "multiple", "several", "numerous"];

/// Filler words tolerated in a gap on top of the longest phrase.
pub const FILLER_ALLOWANCE: usize = 4;

static BUILTIN: LazyLock<RelationRules> = LazyLock::new(RelationRules::default);

/// One connector phrase split into words.
type Phrase = (Vec<&'static str>, &'static RelationTemplate);

/// Phrase templates plus filler vocabulary. Read-only once built.
#[derive(Debug, Clone)]
pub struct RelationRules {
    templates: Vec<Phrase>,
    /// Same phrases with stop words removed, for streams normalized
    /// without them ("belongs to" reads as `belongs`).
    compact: Vec<Phrase>,
    fillers: &'static [&'static str],
    max_gap: usize,
}

impl Default for RelationRules {
    fn default() -> Self {
        let mut templates: Vec<Phrase> = TEMPLATES
            .iter()
            .flat_map(|t| t.phrases.iter().map(move |p| (p.split(' ').collect(), t)))
            .collect();
        // Longest phrase first; "has and belongs to many" before "has".
        templates.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        let mut compact: Vec<Phrase> = templates
            .iter()
            .map(|(words, t)| {
                let words: Vec<&'static str> =
                    words.iter().copied().filter(|w| !is_stop_word(w)).collect();
                (words, *t)
            })
            .filter(|(words, _)| !words.is_empty())
            .collect();
        compact.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        let longest = templates.first().map_or(0, |(words, _)| words.len()).max(2);
        Self {
            templates,
            compact,
            fillers: FILLERS,
            max_gap: longest + FILLER_ALLOWANCE,
        }
    }
}

impl RelationRules {
    /// The shared built-in rules.
    pub fn builtin() -> &'static RelationRules {
        &BUILTIN
    }

    pub fn is_filler(&self, word: &str) -> bool {
        self.fillers.contains(&word)
    }

    /// Gap words with fillers removed.
    pub fn strip_fillers<'a>(&self, words: &[&'a str]) -> Vec<&'a str> {
        words
            .iter()
            .copied()
            .filter(|w| !self.is_filler(w))
            .collect()
    }

    /// Widest raw gap, in tokens, that can still match a template or
    /// collapse to nothing. Pairs further apart only co-occur.
    pub fn max_gap(&self) -> usize {
        self.max_gap
    }

    /// Match a filler-free gap. `right_plural` is whether the right-hand
    /// mention is written in the plural.
    pub fn match_gap(&self, gap: &[&str], right_plural: bool) -> Option<TemplateMatch> {
        self.lookup(&self.templates, gap, right_plural)
    }

    /// Match a gap taken from a stream normalized without stop words.
    pub fn match_gap_without_stop_words(
        &self,
        gap: &[&str],
        right_plural: bool,
    ) -> Option<TemplateMatch> {
        self.lookup(&self.compact, gap, right_plural)
    }

    fn lookup(&self, table: &[Phrase], gap: &[&str], right_plural: bool) -> Option<TemplateMatch> {
        if gap.is_empty() {
            return None;
        }

        if let Some((_, template)) = table.iter().find(|(words, _)| words == gap) {
            return Some(orient(template.name, template.shape, right_plural));
        }

        // "verb many": a single verb followed by a quantifier.
        match gap {
            [verb, quantifier] if QUANTIFIERS.contains(quantifier) && !self.is_filler(verb) => {
                Some(orient("quantified_many", Shape::HasMany, right_plural))
            }
            _ => None,
        }
    }

    /// `A's B`: parent A, one-to-many when B is plural.
    pub fn possessive(&self, right_plural: bool) -> TemplateMatch {
        orient("possessive", Shape::Has, right_plural)
    }
}

fn orient(template: &'static str, shape: Shape, right_plural: bool) -> TemplateMatch {
    let (left_is_parent, cardinality) = match shape {
        Shape::HasMany => (true, Cardinality::OneToMany),
        Shape::HasOne => (true, Cardinality::OneToOne),
        Shape::Has if right_plural => (true, Cardinality::OneToMany),
        Shape::Has => (true, Cardinality::OneToOne),
        Shape::BelongsTo => (false, Cardinality::OneToMany),
        Shape::BelongsToMany => (true, Cardinality::ManyToMany),
    };
    TemplateMatch {
        template,
        left_is_parent,
        cardinality,
    }
}
