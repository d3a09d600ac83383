//! Lexical normalization of requirement text.
//!
//! Turns raw text into an ordered [`TokenStream`]: lowercase,
//! punctuation-stripped tokens that remember their sentence, their original
//! spelling and whether they were written possessively (`order's`).
//!
//! Normalization is deterministic and order-preserving so that multi-word
//! vocabulary entries ("shopping cart", "log in") can be matched as
//! contiguous token runs.
//!
//! # Example
//!
//! ```ignore
//! use reqforge::lexer::Normalizer;
//!
//! let stream = Normalizer::default().normalize("Users place orders. Each order's items ship.");
//! assert_eq!(stream.sentence_count(), 2);
//! assert!(stream.tokens()[4].possessive);
//! ```

pub mod inflection;

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

/// Numbers (with optional decimals), words (with inner apostrophes and
/// underscores), and sentence terminators.
static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d+(?:\.\d+)?|[A-Za-z][A-Za-z0-9_'’]*|[.!?;\n]").unwrap()
});

/// Function words that carry no vocabulary meaning on their own.
static STOP_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "if", "then", "of", "to", "in", "on", "at", "by",
    "for", "with", "from", "into", "as", "is", "are", "was", "were", "be", "been", "being",
    "it", "its", "this", "that", "these", "those", "their", "they", "them", "he", "she", "his",
    "her", "we", "our", "you", "your", "i", "me", "my", "can", "could", "should", "would",
    "will", "shall", "may", "might", "must", "do", "does", "each", "every", "any", "all",
    "some", "also", "so", "such", "which", "who", "whom", "when", "where", "while",
];

/// Whether a lowercase word is a stop word.
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// A normalized token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Lowercase, punctuation-stripped text. snake_case for identifiers.
    pub text: String,
    /// Spelling as it appeared in the input, minus possessive suffix.
    pub raw: String,
    /// Position in the stream.
    pub index: usize,
    /// Sentence number, starting at 0.
    pub sentence: usize,
    /// Written as `word's` or `words'`.
    pub possessive: bool,
    /// Looks like a code identifier (`due_date`, `isPaid`).
    pub identifier: bool,
    pub stop_word: bool,
}

impl Token {
    /// Singular form used for vocabulary lookups; the text itself for stop
    /// words, numbers and very short words.
    pub fn lemma(&self) -> String {
        if self.stop_word || self.identifier || self.text.len() <= 3 {
            return self.text.clone();
        }
        if !self.text.chars().all(|c| c.is_ascii_alphabetic()) {
            return self.text.clone();
        }
        inflection::singularize(&self.text)
    }

    /// Whether the token reads as a plural noun.
    pub fn is_plural(&self) -> bool {
        !self.stop_word && self.text.len() > 3 && inflection::is_plural(&self.text)
    }
}

/// Ordered tokens with sentence boundaries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Vec<Token>,
    sentences: Vec<Range<usize>>,
}

impl TokenStream {
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    /// Tokens of one sentence.
    pub fn sentence(&self, n: usize) -> &[Token] {
        match self.sentences.get(n) {
            Some(range) => &self.tokens[range.clone()],
            None => &[],
        }
    }

    /// Iterate sentences in order.
    pub fn sentences(&self) -> impl Iterator<Item = &[Token]> {
        self.sentences.iter().map(|r| &self.tokens[r.clone()])
    }

    /// Whether a token opens its sentence.
    pub fn is_sentence_start(&self, token: &Token) -> bool {
        self.sentences
            .get(token.sentence)
            .is_some_and(|r| r.start == token.index)
    }

    /// Lowercase text of a token range joined with spaces.
    pub fn span_text(&self, range: Range<usize>) -> String {
        self.tokens[range]
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Configurable normalizer.
#[derive(Debug, Clone)]
pub struct Normalizer {
    /// Keep stop words in the stream. Phrase templates such as "belongs to"
    /// need them.
    pub keep_stop_words: bool,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            keep_stop_words: true,
        }
    }
}

impl Normalizer {
    pub fn new(keep_stop_words: bool) -> Self {
        Self { keep_stop_words }
    }

    /// Tokenize and normalize `text`.
    pub fn normalize(&self, text: &str) -> TokenStream {
        let mut tokens: Vec<Token> = Vec::new();
        let mut sentences = Vec::new();
        let mut sentence = 0;
        let mut sentence_start = 0;

        for m in TOKEN_PATTERN.find_iter(text) {
            let piece = m.as_str();
            if matches!(piece, "." | "!" | "?" | ";" | "\n") {
                if tokens.len() > sentence_start {
                    sentences.push(sentence_start..tokens.len());
                    sentence += 1;
                    sentence_start = tokens.len();
                }
                continue;
            }

            let quoted = text[..m.start()].ends_with(['\'', '‘']);
            let Some(mut token) = make_token(piece, quoted) else {
                continue;
            };
            if token.stop_word && !self.keep_stop_words {
                continue;
            }
            token.index = tokens.len();
            token.sentence = sentence;
            tokens.push(token);
        }

        if tokens.len() > sentence_start {
            sentences.push(sentence_start..tokens.len());
        }

        TokenStream { tokens, sentences }
    }
}

/// Normalize with default settings.
pub fn normalize(text: &str) -> TokenStream {
    Normalizer::default().normalize(text)
}

/// `quoted`: the word opens right after a quote mark, as in `'admin'`.
fn make_token(piece: &str, quoted: bool) -> Option<Token> {
    let piece = piece.replace('’', "'");

    let (stem, possessive) = if let Some(stem) = piece.strip_suffix("'s") {
        (stem.to_string(), true)
    } else if let Some(stem) = piece.strip_suffix('\'') {
        // `users'` is possessive; a closing quote is not.
        (stem.to_string(), stem.ends_with('s') && !quoted)
    } else {
        (piece.clone(), false)
    };

    let raw = stem.trim_matches(|c| c == '_' || c == '\'').to_string();
    if raw.is_empty() {
        return None;
    }

    let identifier = looks_like_identifier(&raw);
    let text = if identifier {
        inflection::snake_case(&raw)
    } else {
        raw.to_lowercase().replace('\'', "")
    };
    let stop_word = is_stop_word(&text);

    Some(Token {
        text,
        raw,
        index: 0,
        sentence: 0,
        possessive,
        identifier,
        stop_word,
    })
}

/// `due_date`, `isPaid`, `createdAt`; not `Users` or `API`.
fn looks_like_identifier(raw: &str) -> bool {
    if raw.contains('_') {
        return raw.chars().any(|c| c.is_ascii_alphabetic());
    }
    let chars: Vec<char> = raw.chars().collect();
    chars
        .windows(2)
        .any(|w| w[0].is_ascii_lowercase() && w[1].is_ascii_uppercase())
}
