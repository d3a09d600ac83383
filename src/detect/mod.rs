//! Module and entity detection.
//!
//! One pass over the token stream per vocabulary: the module index yields
//! tags, the entity index yields canonical entity names. Every entity hit is
//! also kept as a [`Mention`] so relationship inference and schema synthesis
//! can work with positions instead of re-scanning the text.

use std::collections::BTreeSet;

use crate::dictionary::Dictionary;
use crate::lexer::{inflection, Token, TokenStream};
use crate::model::{Entity, Module, ModuleTag};

/// One occurrence of an entity in the token stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mention {
    /// Canonical entity name.
    pub entity: String,
    pub sentence: usize,
    /// First token index.
    pub start: usize,
    /// One past the last token index.
    pub end: usize,
    /// Last token written as `order's`.
    pub possessive: bool,
    /// Last token reads as a plural noun.
    pub plural: bool,
}

/// Everything the detector found.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Detection {
    /// Ordered by first occurrence.
    pub modules: Vec<Module>,
    /// Ordered by first occurrence.
    pub entities: Vec<Entity>,
    /// Ordered by position.
    pub mentions: Vec<Mention>,
}

impl Detection {
    pub fn module_tags(&self) -> Vec<ModuleTag> {
        self.modules.iter().map(|m| m.tag).collect()
    }

    pub fn has_module(&self, tag: ModuleTag) -> bool {
        self.modules.iter().any(|m| m.tag == tag)
    }

    /// Position of an entity in detection order.
    pub fn entity_rank(&self, name: &str) -> Option<usize> {
        self.entities.iter().position(|e| e.name == name)
    }

    /// Mentions of one sentence, in order.
    pub fn mentions_in(&self, sentence: usize) -> impl Iterator<Item = &Mention> {
        let start = self.mentions.partition_point(|m| m.sentence < sentence);
        let end = self.mentions.partition_point(|m| m.sentence <= sentence);
        self.mentions[start..end].iter()
    }
}

/// Scans token streams against a dictionary.
#[derive(Debug, Clone)]
pub struct Detector<'d> {
    dictionary: &'d Dictionary,
    capitalized_terms: bool,
}

impl<'d> Detector<'d> {
    pub fn new(dictionary: &'d Dictionary) -> Self {
        Self {
            dictionary,
            capitalized_terms: false,
        }
    }

    /// Also treat capitalized mid-sentence words as entities.
    pub fn with_capitalized_terms(mut self, enabled: bool) -> Self {
        self.capitalized_terms = enabled;
        self
    }

    pub fn detect(&self, stream: &TokenStream) -> Detection {
        let modules = self.detect_modules(stream);
        let (entities, mentions) = self.detect_entities(stream);

        tracing::debug!(
            modules = modules.len(),
            entities = entities.len(),
            mentions = mentions.len(),
            "detection finished"
        );

        Detection {
            modules,
            entities,
            mentions,
        }
    }

    fn detect_modules(&self, stream: &TokenStream) -> Vec<Module> {
        let mut modules: Vec<Module> = Vec::new();

        for hit in self.dictionary.module_index().scan(stream.tokens()) {
            let tag = hit.entry.value;
            let module = match modules.iter().position(|m| m.tag == tag) {
                Some(pos) => &mut modules[pos],
                None => {
                    modules.push(Module {
                        tag,
                        display_name: tag.display_name().to_string(),
                        matched_keywords: BTreeSet::new(),
                        match_count: 0,
                    });
                    let last = modules.len() - 1;
                    &mut modules[last]
                }
            };
            module.matched_keywords.insert(hit.entry.keyword.clone());
            module.match_count += 1;
        }

        modules
    }

    fn detect_entities(&self, stream: &TokenStream) -> (Vec<Entity>, Vec<Mention>) {
        let tokens = stream.tokens();

        let mut hits: Vec<(usize, usize, String)> = self
            .dictionary
            .entity_index()
            .scan(tokens)
            .into_iter()
            .map(|m| (m.start, m.end, m.entry.value.clone()))
            .collect();

        if self.capitalized_terms {
            let covered: BTreeSet<usize> = hits.iter().flat_map(|(s, e, _)| *s..*e).collect();
            for token in tokens {
                if !covered.contains(&token.index) && is_capitalized_term(stream, token) {
                    hits.push((token.index, token.index + 1, inflection::entity_name(&token.text)));
                }
            }
            hits.sort_by_key(|(start, _, _)| *start);
        }

        let mut entities: Vec<Entity> = Vec::new();
        let mut mentions = Vec::with_capacity(hits.len());

        for (start, end, name) in hits {
            let pos = match entities
                .iter()
                .position(|e| e.name.eq_ignore_ascii_case(&name))
            {
                Some(pos) => pos,
                None => {
                    entities.push(Entity {
                        name,
                        source_phrases: BTreeSet::new(),
                        mention_count: 0,
                    });
                    entities.len() - 1
                }
            };
            let entity = &mut entities[pos];
            entity.source_phrases.insert(stream.span_text(start..end));
            entity.mention_count += 1;

            let last = &tokens[end - 1];
            mentions.push(Mention {
                entity: entity.name.clone(),
                sentence: tokens[start].sentence,
                start,
                end,
                possessive: last.possessive,
                plural: last.is_plural(),
            });
        }

        (entities, mentions)
    }
}

/// `Stripe` in "Payments go through Stripe"; not sentence-initial words,
/// acronyms, stop words or short words.
fn is_capitalized_term(stream: &TokenStream, token: &Token) -> bool {
    let mut chars = token.raw.chars();
    let starts_upper = chars.next().is_some_and(|c| c.is_ascii_uppercase());
    let rest_has_lower = token.raw.chars().skip(1).any(|c| c.is_ascii_lowercase());

    starts_upper
        && rest_has_lower
        && token.raw.len() > 3
        && token.raw.chars().all(|c| c.is_ascii_alphabetic())
        && !token.stop_word
        && !token.identifier
        && !stream.is_sentence_start(token)
}
