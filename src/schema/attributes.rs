//! Attribute discovery: which columns does the text mention for an entity?

use std::collections::{BTreeSet, HashMap};

use crate::detect::{Detection, Mention};
use crate::dictionary::{AttributeSpec, Dictionary};
use crate::lexer::TokenStream;

#[derive(Debug, Clone)]
struct AttributeHit {
    spec: AttributeSpec,
    sentence: usize,
    start: usize,
    end: usize,
}

/// Attributes per entity name, in text order.
///
/// Sources are attribute keywords ("email", "due date") and identifier-like
/// words (`due_date`, `isPaid`). Each attaches to the nearest mention in the
/// same sentence within `window` tokens; on a tie the preceding mention
/// wins.
pub(crate) fn collect(
    stream: &TokenStream,
    detection: &Detection,
    dictionary: &Dictionary,
    window: usize,
) -> HashMap<String, Vec<AttributeSpec>> {
    let mut by_entity: HashMap<String, Vec<AttributeSpec>> = HashMap::new();

    for hit in scan(stream, detection, dictionary) {
        let Some(mention) = nearest(&hit, detection, window) else {
            continue;
        };
        by_entity
            .entry(mention.entity.clone())
            .or_default()
            .push(hit.spec);
    }

    by_entity
}

fn scan(stream: &TokenStream, detection: &Detection, dictionary: &Dictionary) -> Vec<AttributeHit> {
    let tokens = stream.tokens();

    let mut hits: Vec<AttributeHit> = dictionary
        .attribute_index()
        .scan(tokens)
        .into_iter()
        .map(|m| AttributeHit {
            spec: m.entry.value.clone(),
            sentence: tokens[m.start].sentence,
            start: m.start,
            end: m.end,
        })
        .collect();

    let covered: BTreeSet<usize> = hits
        .iter()
        .map(|h| h.start..h.end)
        .chain(detection.mentions.iter().map(|m| m.start..m.end))
        .flatten()
        .collect();

    for token in tokens {
        if !token.identifier || covered.contains(&token.index) || !is_column_name(&token.text) {
            continue;
        }
        hits.push(AttributeHit {
            spec: AttributeSpec::new(token.text.clone(), false, false),
            sentence: token.sentence,
            start: token.index,
            end: token.index + 1,
        });
    }

    hits.sort_by_key(|h| h.start);
    hits
}

fn is_column_name(text: &str) -> bool {
    text != "id"
        && text.starts_with(|c: char| c.is_ascii_lowercase())
        && text
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

fn nearest<'a>(hit: &AttributeHit, detection: &'a Detection, window: usize) -> Option<&'a Mention> {
    detection
        .mentions_in(hit.sentence)
        .map(|m| {
            let (distance, follows) = if hit.start >= m.end {
                (hit.start - m.end + 1, false)
            } else if m.start >= hit.end {
                (m.start - hit.end + 1, true)
            } else {
                (0, false)
            };
            (m, distance, follows)
        })
        .filter(|(_, distance, _)| *distance <= window)
        .min_by_key(|(_, distance, follows)| (*distance, *follows))
        .map(|(m, _, _)| m)
}
