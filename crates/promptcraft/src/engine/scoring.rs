//! Multi-dimensional quality scoring.
//!
//! Each dimension is a pure function of the sections, the options, and the
//! [`ScoringConfig`]; every score is clamped to `0.0..=1.0`.
//!
//! | Dimension   | Signal |
//! |-------------|--------|
//! | clarity     | total words inside the band, minus duplicate-section penalties |
//! | structure   | coverage of required sections, partial credit for short ones |
//! | specificity | numbers and named entities per word, measurable success criteria |
//! | guardrails  | `n / (n + k)`, saturating below 1.0 |
//! | creativity  | creativity target vs exploratory/precise vocabulary balance |

use std::collections::HashSet;

use crate::config::ScoringConfig;
use crate::engine::keywords::tokenize;
use crate::model::{BuilderOptions, PromptMetrics, SectionState, total_word_count};

/// Vocabulary that signals divergent, exploratory intent. Sorted.
const EXPLORATORY_WORDS: &[&str] = &[
    "alternative",
    "alternatives",
    "bold",
    "brainstorm",
    "creative",
    "divergent",
    "experiment",
    "experimental",
    "explore",
    "imaginative",
    "imagine",
    "innovative",
    "inventive",
    "novel",
    "original",
    "playful",
    "possibilities",
    "reimagine",
    "surprising",
    "unconventional",
    "unexpected",
    "vivid",
    "wild",
];

/// Vocabulary that signals precise, constrained intent. Sorted.
const PRECISE_WORDS: &[&str] = &[
    "accurate",
    "compliance",
    "concise",
    "consistent",
    "deterministic",
    "exact",
    "exactly",
    "factual",
    "measurable",
    "must",
    "only",
    "precise",
    "precisely",
    "required",
    "specific",
    "strict",
    "strictly",
    "verified",
    "verify",
];

/// Words that make a success criterion measurable. Sorted.
const MEASURABLE_MARKERS: &[&str] = &[
    "exactly",
    "kpi",
    "kpis",
    "least",
    "maximum",
    "measurable",
    "metric",
    "metrics",
    "minimum",
    "most",
    "per",
    "percent",
    "target",
    "targets",
    "under",
    "within",
];

/// Compute all metrics for one draft.
pub fn score(
    sections: &[SectionState],
    options: &BuilderOptions,
    config: &ScoringConfig,
) -> PromptMetrics {
    let word_count = total_word_count(sections);
    let clarity = clarity_score(sections, word_count, config);
    let structure = structure_score(sections, config);
    let specificity = specificity_score(sections, options, word_count, config);
    let guardrails = guardrail_score(options.guardrails.len(), config);
    let creativity = creativity_score(sections, options, config);

    let w = &config.weights;
    let overall = clamp_unit(
        w.clarity * clarity
            + w.structure * structure
            + w.specificity * specificity
            + w.guardrails * guardrails
            + w.creativity * creativity,
    );

    PromptMetrics {
        clarity,
        structure,
        specificity,
        guardrails,
        creativity,
        overall,
        word_count,
        estimated_tokens: estimate_tokens(word_count, config),
    }
}

/// `word_count × tokens_per_word`, rounded to the nearest integer.
pub fn estimate_tokens(word_count: usize, config: &ScoringConfig) -> usize {
    (word_count as f64 * config.tokens_per_word).round() as usize
}

/// 1.0 inside the word band, reduced proportionally to the distance outside
/// it and by a fixed penalty per duplicated section, never below the floor.
pub fn clarity_score(sections: &[SectionState], word_count: usize, config: &ScoringConfig) -> f64 {
    let band = config.word_band;
    let distance_penalty = if word_count < band.min {
        (band.min - word_count) as f64 / band.min as f64 * config.clarity_under_slope
    } else if word_count > band.max {
        (word_count - band.max) as f64 / band.max as f64 * config.clarity_over_slope
    } else {
        0.0
    };
    let duplicates = duplicate_sections(sections, config.duplicate_similarity).len();
    let duplicate_penalty = duplicates as f64 * config.duplicate_penalty;

    clamp_unit((1.0 - distance_penalty - duplicate_penalty).max(config.clarity_floor))
}

/// Pairs `(earlier, later)` of section indices whose values are near
/// verbatim copies (word-set Jaccard similarity ≥ `threshold`). Each later
/// section appears at most once, paired with the first section it repeats.
pub fn duplicate_sections(sections: &[SectionState], threshold: f64) -> Vec<(usize, usize)> {
    let word_sets: Vec<Option<HashSet<String>>> = sections
        .iter()
        .map(|s| {
            let words: HashSet<String> = tokenize(&s.value).collect();
            (!words.is_empty()).then_some(words)
        })
        .collect();

    let mut pairs = Vec::new();
    for (later, later_words) in word_sets.iter().enumerate() {
        let Some(later_words) = later_words else {
            continue;
        };
        let earlier = word_sets[..later].iter().position(|candidate| {
            candidate
                .as_ref()
                .is_some_and(|words| jaccard(words, later_words) >= threshold)
        });
        if let Some(earlier) = earlier {
            pairs.push((earlier, later));
        }
    }
    pairs
}

fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

/// Average credit over required sections: 0 when blank, interpolated from
/// the partial credit up to 1 below the minimum word count, 1 otherwise.
/// Without required sections, the share of non-blank sections.
pub fn structure_score(sections: &[SectionState], config: &ScoringConfig) -> f64 {
    let required: Vec<&SectionState> = sections.iter().filter(|s| s.is_required()).collect();
    if required.is_empty() {
        if sections.is_empty() {
            return 0.0;
        }
        let filled = sections.iter().filter(|s| !s.is_blank()).count();
        return filled as f64 / sections.len() as f64;
    }

    let min_words = config.structure_min_words.max(1);
    let partial = config.structure_partial_credit;
    let total: f64 = required
        .iter()
        .map(|s| {
            let words = s.word_count();
            if words == 0 {
                0.0
            } else if words < min_words {
                partial + (1.0 - partial) * words as f64 / min_words as f64
            } else {
                1.0
            }
        })
        .sum();
    clamp_unit(total / required.len() as f64)
}

/// Concrete-signal density blended with measurable success criteria.
/// Zero when nothing has been authored.
pub fn specificity_score(
    sections: &[SectionState],
    options: &BuilderOptions,
    word_count: usize,
    config: &ScoringConfig,
) -> f64 {
    if word_count == 0 {
        return 0.0;
    }
    let signals: usize = sections
        .iter()
        .map(|s| count_numbers(&s.value) + count_named_entities(&s.value))
        .sum();
    let density = signals as f64 / word_count as f64;
    let signal_score = (density / config.specificity_target_density).min(1.0);

    let measurable = options
        .success_criteria
        .iter()
        .filter(|c| is_measurable(c))
        .count();
    let criteria_score = if config.specificity_criteria_target == 0 {
        1.0
    } else {
        (measurable as f64 / config.specificity_criteria_target as f64).min(1.0)
    };

    let w = config.specificity_criteria_weight;
    clamp_unit((1.0 - w) * signal_score + w * criteria_score)
}

/// Whitespace tokens containing at least one digit.
pub fn count_numbers(text: &str) -> usize {
    text.split_whitespace()
        .filter(|t| t.chars().any(|c| c.is_ascii_digit()))
        .count()
}

/// Runs of two or more consecutive capitalized words. Sentence-ending
/// punctuation closes a run.
pub fn count_named_entities(text: &str) -> usize {
    let mut entities = 0;
    let mut run = 0;
    for token in text.split_whitespace() {
        let core = token.trim_matches(|c: char| !c.is_alphanumeric());
        if core.chars().next().is_some_and(char::is_uppercase) {
            run += 1;
        } else {
            if run >= 2 {
                entities += 1;
            }
            run = 0;
        }
        if token.ends_with(['.', '!', '?', ':', ';']) {
            if run >= 2 {
                entities += 1;
            }
            run = 0;
        }
    }
    if run >= 2 {
        entities += 1;
    }
    entities
}

/// A criterion is measurable when it contains a digit, a percent sign, or a
/// quantity word such as "within" or "KPI".
pub fn is_measurable(criterion: &str) -> bool {
    criterion.chars().any(|c| c.is_ascii_digit() || c == '%')
        || tokenize(criterion).any(|t| MEASURABLE_MARKERS.binary_search(&t.as_str()).is_ok())
}

/// `n / (n + k)` with `n` capped; non-decreasing and always below 1.0.
pub fn guardrail_score(count: usize, config: &ScoringConfig) -> f64 {
    let n = count.min(config.guardrail_cap) as f64;
    n / (n + config.guardrail_half_saturation)
}

/// Alignment between the requested creativity and the draft's vocabulary.
///
/// The target blends the normalized creativity level with the temperature.
/// The lexical balance is the smoothed share of exploratory words among
/// exploratory and precise words (0.5 when neither appears). The score
/// falls linearly with the gap between the two.
pub fn creativity_score(
    sections: &[SectionState],
    options: &BuilderOptions,
    config: &ScoringConfig,
) -> f64 {
    let level = (options.creativity() - 1) as f64 / 9.0;
    let target = 0.5 * level + 0.5 * options.temperature();
    let lexical = lexical_creativity(sections);
    clamp_unit(1.0 - (target - lexical).abs() * config.creativity_deviation_weight)
}

/// Smoothed exploratory share: `(exploratory + 1) / (exploratory + precise + 2)`.
pub fn lexical_creativity(sections: &[SectionState]) -> f64 {
    let (mut exploratory, mut precise) = (0usize, 0usize);
    for section in sections {
        for token in tokenize(&section.value) {
            if EXPLORATORY_WORDS.binary_search(&token.as_str()).is_ok() {
                exploratory += 1;
            } else if PRECISE_WORDS.binary_search(&token.as_str()).is_ok() {
                precise += 1;
            }
        }
    }
    (exploratory as f64 + 1.0) / ((exploratory + precise) as f64 + 2.0)
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}
