//! Precompiled phrase index.
//!
//! Keywords are bucketed by their first word; each bucket is kept sorted
//! longest-first so a scan can stop at the first (longest) match. The last
//! word of a phrase may also match through the token's singular form, which
//! is how "users" finds "user" and "shopping carts" finds "shopping cart".

use std::collections::HashMap;

use crate::lexer::Token;

/// One indexed keyword.
#[derive(Debug, Clone, PartialEq)]
pub struct PhraseEntry<T> {
    /// The keyword as written in the dictionary.
    pub keyword: String,
    pub words: Vec<String>,
    pub value: T,
}

/// A keyword occurrence in a token stream.
#[derive(Debug, Clone, PartialEq)]
pub struct PhraseMatch<'a, T> {
    pub entry: &'a PhraseEntry<T>,
    /// First token index.
    pub start: usize,
    /// One past the last token index.
    pub end: usize,
}

/// Keyword → value lookup over token runs.
#[derive(Debug, Clone)]
pub struct PhraseIndex<T> {
    by_first: HashMap<String, Vec<PhraseEntry<T>>>,
    len: usize,
}

impl<T> Default for PhraseIndex<T> {
    fn default() -> Self {
        Self {
            by_first: HashMap::new(),
            len: 0,
        }
    }
}

impl<T> PhraseIndex<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a validated keyword (lowercase words separated by single spaces).
    pub fn insert(&mut self, keyword: &str, value: T) {
        let words: Vec<String> = keyword.split(' ').map(str::to_string).collect();
        let Some(first) = words.first().cloned() else {
            return;
        };

        let bucket = self.by_first.entry(first).or_default();
        bucket.push(PhraseEntry {
            keyword: keyword.to_string(),
            words,
            value,
        });
        // Stable: entries sharing a keyword keep insertion order.
        bucket.sort_by(|a, b| {
            b.words
                .len()
                .cmp(&a.words.len())
                .then_with(|| a.keyword.cmp(&b.keyword))
        });
        self.len += 1;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether a keyword is indexed.
    pub fn contains(&self, keyword: &str) -> bool {
        let first = keyword.split(' ').next().unwrap_or_default();
        self.by_first
            .get(first)
            .is_some_and(|bucket| bucket.iter().any(|e| e.keyword == keyword))
    }

    /// Scan `tokens` left to right. At each position the longest matching
    /// keyword wins and its tokens are consumed; when several entries share
    /// that keyword (one keyword, several values) all of them are reported.
    /// Matches never cross sentence boundaries.
    pub fn scan<'a>(&'a self, tokens: &[Token]) -> Vec<PhraseMatch<'a, T>> {
        let lemmas: Vec<String> = tokens.iter().map(Token::lemma).collect();
        let mut matches = Vec::new();
        let mut i = 0;

        while i < tokens.len() {
            let found = self.longest_at(tokens, &lemmas, i);
            let Some(len) = found.first().map(|e| e.words.len()) else {
                i += 1;
                continue;
            };
            for entry in found {
                matches.push(PhraseMatch {
                    entry,
                    start: i,
                    end: i + len,
                });
            }
            i += len;
        }

        matches
    }

    fn longest_at<'a>(
        &'a self,
        tokens: &[Token],
        lemmas: &[String],
        start: usize,
    ) -> Vec<&'a PhraseEntry<T>> {
        let text = &tokens[start].text;
        let lemma = &lemmas[start];

        let exact = self.by_first.get(text).into_iter().flatten();
        let singular = if lemma != text {
            self.by_first.get(lemma)
        } else {
            None
        };
        let candidates = exact.chain(singular.into_iter().flatten());

        let mut best: Vec<&PhraseEntry<T>> = Vec::new();
        let mut best_len = 0;
        for entry in candidates {
            let len = entry.words.len();
            if len < best_len || !matches_at(entry, tokens, lemmas, start) {
                continue;
            }
            if len > best_len {
                best.clear();
                best_len = len;
            }
            if !best.iter().any(|e| std::ptr::eq(*e, entry)) {
                best.push(entry);
            }
        }
        best
    }
}

fn matches_at<T>(entry: &PhraseEntry<T>, tokens: &[Token], lemmas: &[String], start: usize) -> bool {
    let n = entry.words.len();
    if start + n > tokens.len() {
        return false;
    }
    let sentence = tokens[start].sentence;

    entry.words.iter().enumerate().all(|(k, word)| {
        let token = &tokens[start + k];
        if token.sentence != sentence {
            return false;
        }
        token.text == *word || (k + 1 == n && lemmas[start + k] == *word)
    })
}
