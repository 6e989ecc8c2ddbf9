//! Frequency-ranked keyword extraction over the authored sections.
//!
//! Purely lexical: tokens are split on non-alphanumeric characters,
//! lowercased, filtered by length and a stopword list, then ranked by
//! frequency with first occurrence breaking ties.

use std::collections::HashMap;

use crate::model::SectionState;

/// Common English function words that never make useful keywords.
/// Words shorter than the minimum keyword length are filtered separately.
const STOP_WORDS: &[&str] = &[
    "about",
    "above",
    "after",
    "again",
    "against",
    "also",
    "among",
    "another",
    "because",
    "been",
    "before",
    "being",
    "below",
    "between",
    "both",
    "could",
    "does",
    "doing",
    "done",
    "down",
    "during",
    "each",
    "either",
    "else",
    "even",
    "ever",
    "every",
    "from",
    "further",
    "have",
    "having",
    "here",
    "hers",
    "herself",
    "himself",
    "into",
    "itself",
    "just",
    "like",
    "many",
    "more",
    "most",
    "much",
    "must",
    "myself",
    "neither",
    "once",
    "only",
    "onto",
    "other",
    "ought",
    "ours",
    "ourselves",
    "over",
    "same",
    "shall",
    "should",
    "since",
    "some",
    "such",
    "than",
    "that",
    "their",
    "theirs",
    "them",
    "themselves",
    "then",
    "there",
    "these",
    "they",
    "this",
    "those",
    "though",
    "through",
    "thus",
    "under",
    "until",
    "upon",
    "very",
    "were",
    "what",
    "whatever",
    "when",
    "where",
    "whether",
    "which",
    "while",
    "whom",
    "whose",
    "will",
    "with",
    "within",
    "without",
    "would",
    "your",
    "yours",
    "yourself",
    "yourselves",
];

/// Whether `word` (already lowercase) is a stopword.
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.binary_search(&word).is_ok()
}

/// Split `text` into lowercase alphanumeric tokens.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

/// Rank the distinctive terms across all section values.
///
/// Values are scanned in section order. Tokens shorter than `min_len`
/// characters and stopwords are dropped. The result holds at most `limit`
/// distinct lowercase terms ordered by frequency (descending), then by first
/// occurrence (ascending).
pub fn extract_keywords(sections: &[SectionState], limit: usize, min_len: usize) -> Vec<String> {
    // term -> (count, first position)
    let mut stats: HashMap<String, (usize, usize)> = HashMap::new();
    let mut position = 0usize;

    for section in sections {
        for token in tokenize(&section.value) {
            if token.chars().count() < min_len || is_stop_word(&token) {
                continue;
            }
            stats
                .entry(token)
                .and_modify(|(count, _)| *count += 1)
                .or_insert((1, position));
            position += 1;
        }
    }

    let mut ranked: Vec<(String, usize, usize)> = stats
        .into_iter()
        .map(|(term, (count, first))| (term, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked.truncate(limit);
    ranked.into_iter().map(|(term, _, _)| term).collect()
}
