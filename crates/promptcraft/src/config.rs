//! Scoring and analysis constants.
//!
//! Every heuristic threshold the engine uses lives in [`ScoringConfig`] so
//! that scores are reproducible from a single documented value. The defaults
//! are the tuned production values; override individual fields with the
//! `with_*` methods or load a (partial) JSON file with
//! [`ScoringConfig::load`].
//!
//! ```
//! use promptcraft::config::{ScoringConfig, WordBand};
//!
//! let config = ScoringConfig::default()
//!     .with_word_band(WordBand { min: 80, max: 300 })
//!     .with_max_keywords(8);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Target range for the total number of authored words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordBand {
    pub min: usize,
    pub max: usize,
}

impl Default for WordBand {
    fn default() -> Self {
        Self { min: 120, max: 400 }
    }
}

impl WordBand {
    pub fn contains(&self, words: usize) -> bool {
        (self.min..=self.max).contains(&words)
    }
}

/// Contribution of each dimension to the overall score. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub clarity: f64,
    pub structure: f64,
    pub specificity: f64,
    pub guardrails: f64,
    pub creativity: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            clarity: 0.2,
            structure: 0.4,
            specificity: 0.2,
            guardrails: 0.1,
            creativity: 0.1,
        }
    }
}

impl ScoreWeights {
    pub fn sum(&self) -> f64 {
        self.clarity + self.structure + self.specificity + self.guardrails + self.creativity
    }
}

/// Tuning constants for the scorer, the insight rules, and the keyword
/// extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Healthy total word count. Default: `120..=400`.
    pub word_band: WordBand,
    /// Tokens estimated per word. Default: `1.3`.
    pub tokens_per_word: f64,

    /// Lowest clarity score. Default: `0.1`.
    pub clarity_floor: f64,
    /// Clarity lost per band-width fraction below the band. Default: `1.0`.
    pub clarity_under_slope: f64,
    /// Clarity lost per band-width fraction above the band. Default: `0.5`.
    pub clarity_over_slope: f64,
    /// Word-set Jaccard similarity at which two sections count as
    /// duplicates. Default: `0.85`.
    pub duplicate_similarity: f64,
    /// Clarity lost per duplicated section. Default: `0.15`.
    pub duplicate_penalty: f64,

    /// Words a required section needs for full structure credit. Default: `8`.
    pub structure_min_words: usize,
    /// Base credit for a required section that is non-empty but short.
    /// The remainder is interpolated by word count. Default: `0.5`.
    pub structure_partial_credit: f64,

    /// Concrete signals per word that earns full signal credit. Default: `0.05`.
    pub specificity_target_density: f64,
    /// Share of specificity derived from measurable success criteria. Default: `0.3`.
    pub specificity_criteria_weight: f64,
    /// Measurable criteria needed for full criteria credit. Default: `2`.
    pub specificity_criteria_target: usize,

    /// Guardrail count at which the guardrail score reaches 0.5. Default: `1.5`.
    pub guardrail_half_saturation: f64,
    /// Guardrails beyond this count add nothing. Default: `32`.
    pub guardrail_cap: usize,

    /// Creativity score lost per unit of misalignment. Default: `1.25`.
    pub creativity_deviation_weight: f64,

    /// Fewer guardrails than this raises a warning. Default: `2`.
    pub min_guardrails: usize,
    /// Optional sections shorter than this get an elaboration hint. Default: `12`.
    pub elaboration_min_words: usize,
    /// Specificity below this (with adequate length) raises a hint. Default: `0.3`.
    pub low_specificity: f64,

    /// Keywords returned per synthesis. Default: `12`.
    pub max_keywords: usize,
    /// Shortest keyword in characters. Default: `4`.
    pub min_keyword_len: usize,

    pub weights: ScoreWeights,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            word_band: WordBand::default(),
            tokens_per_word: 1.3,
            clarity_floor: 0.1,
            clarity_under_slope: 1.0,
            clarity_over_slope: 0.5,
            duplicate_similarity: 0.85,
            duplicate_penalty: 0.15,
            structure_min_words: 8,
            structure_partial_credit: 0.5,
            specificity_target_density: 0.05,
            specificity_criteria_weight: 0.3,
            specificity_criteria_target: 2,
            guardrail_half_saturation: 1.5,
            guardrail_cap: 32,
            creativity_deviation_weight: 1.25,
            min_guardrails: 2,
            elaboration_min_words: 12,
            low_specificity: 0.3,
            max_keywords: 12,
            min_keyword_len: 4,
            weights: ScoreWeights::default(),
        }
    }
}

impl ScoringConfig {
    /// Load overrides from a JSON file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self, String> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read scoring config '{}': {e}", path.display()))?;
        let config: ScoringConfig = serde_json::from_str(&data)
            .map_err(|e| format!("failed to parse scoring config '{}': {e}", path.display()))?;
        config.validate()?;
        debug!("Loaded scoring config from {}", path.display());
        Ok(config)
    }

    /// Reject configurations that would break the score contracts.
    pub fn validate(&self) -> Result<(), String> {
        if self.word_band.min >= self.word_band.max {
            return Err(format!(
                "word band min ({}) must be below max ({})",
                self.word_band.min, self.word_band.max
            ));
        }
        let w = &self.weights;
        if [w.clarity, w.structure, w.specificity, w.guardrails, w.creativity]
            .iter()
            .any(|v| !(0.0..=1.0).contains(v))
        {
            return Err("score weights must each be within 0.0..=1.0".into());
        }
        if (w.sum() - 1.0).abs() > 1e-6 {
            return Err(format!("score weights must sum to 1.0, got {:.4}", w.sum()));
        }
        if self.guardrail_half_saturation <= 0.0 {
            return Err("guardrail_half_saturation must be positive".into());
        }
        if self.specificity_target_density <= 0.0 {
            return Err("specificity_target_density must be positive".into());
        }
        if !(0.0..=1.0).contains(&self.specificity_criteria_weight) {
            return Err("specificity_criteria_weight must be within 0.0..=1.0".into());
        }
        if !(0.0..=1.0).contains(&self.structure_partial_credit) {
            return Err("structure_partial_credit must be within 0.0..=1.0".into());
        }
        if self.structure_min_words == 0 {
            return Err("structure_min_words must be at least 1".into());
        }
        Ok(())
    }

    pub fn with_word_band(mut self, band: WordBand) -> Self {
        self.word_band = band;
        self
    }

    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_max_keywords(mut self, max: usize) -> Self {
        self.max_keywords = max;
        self
    }

    pub fn with_structure_min_words(mut self, words: usize) -> Self {
        self.structure_min_words = words;
        self
    }

    pub fn with_min_guardrails(mut self, count: usize) -> Self {
        self.min_guardrails = count;
        self
    }

    pub fn with_elaboration_min_words(mut self, words: usize) -> Self {
        self.elaboration_min_words = words;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid_and_weights_sum_to_one() {
        let config = ScoringConfig::default();
        config.validate().unwrap();
        assert!((config.weights.sum() - 1.0).abs() < 1e-9);
        assert!(config.weights.structure > config.weights.guardrails);
        assert!(config.weights.structure > config.weights.creativity);
    }

    #[test]
    fn rejects_weights_not_summing_to_one() {
        let config = ScoringConfig::default().with_weights(ScoreWeights {
            clarity: 0.5,
            ..Default::default()
        });
        assert!(config.validate().unwrap_err().contains("sum to 1.0"));
    }

    #[test]
    fn rejects_inverted_band() {
        let config = ScoringConfig::default().with_word_band(WordBand { min: 400, max: 100 });
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scoring.json");
        std::fs::write(&path, r#"{"max_keywords": 5, "word_band": {"min": 50, "max": 150}}"#)
            .unwrap();

        let config = ScoringConfig::load(&path).unwrap();
        assert_eq!(config.max_keywords, 5);
        assert_eq!(config.word_band, WordBand { min: 50, max: 150 });
        assert_eq!(config.structure_min_words, 8);
    }

    #[test]
    fn load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scoring.json");
        std::fs::write(&path, r#"{"weights": {"clarity": 0.9}}"#).unwrap();
        assert!(ScoringConfig::load(&path).is_err());
    }
}
