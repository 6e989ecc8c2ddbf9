//! The synthesis engine.
//!
//! Each stage is a pure function over borrowed caller state:
//!
//! - [`seeder`]: blueprints + template → fresh sections and options
//! - [`keywords`]: sections → ranked keywords
//! - [`scoring`]: sections + options → [`PromptMetrics`](crate::model::PromptMetrics)
//! - [`insights`]: sections + options → insights and improvements
//! - [`assembler`]: sections + options → prompt text
//!
//! [`Synthesizer`] holds the injected [`Catalog`] and [`ScoringConfig`] and
//! runs all stages in one call.

pub mod assembler;
pub mod insights;
pub mod keywords;
pub mod scoring;
pub mod seeder;

pub use assembler::{PromptBuilder, assemble};
pub use insights::analyze;
pub use keywords::extract_keywords;
pub use scoring::score;
pub use seeder::{options_for_template, seed};

use tracing::debug;

use crate::catalog::Catalog;
use crate::config::ScoringConfig;
use crate::model::{BuilderOptions, SectionState, SynthesisResult};

/// Stateless synthesis entry point.
///
/// Holds only read-only configuration, so one instance can be shared across
/// threads (e.g. behind an `Arc` in a server) and called on every edit.
#[derive(Debug, Clone, Default)]
pub struct Synthesizer {
    catalog: Catalog,
    config: ScoringConfig,
}

impl Synthesizer {
    pub fn new(catalog: Catalog, config: ScoringConfig) -> Self {
        Self { catalog, config }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Produce the prompt, metrics, insights, improvements, and keywords for
    /// one snapshot. Out-of-range creativity and temperature are clamped.
    pub fn synthesize(
        &self,
        sections: &[SectionState],
        options: &BuilderOptions,
    ) -> SynthesisResult {
        let options = options.clamped();
        let metrics = score(sections, &options, &self.config);
        let (insights, improvements) = analyze(sections, &options, &self.catalog, &self.config);
        let keywords = extract_keywords(
            sections,
            self.config.max_keywords,
            self.config.min_keyword_len,
        );
        let prompt = assemble(sections, &options);

        debug!(
            sections = sections.len(),
            words = metrics.word_count,
            overall = metrics.overall,
            insights = insights.len(),
            improvements = improvements.len(),
            "Synthesized prompt"
        );

        SynthesisResult {
            prompt,
            metrics,
            insights,
            improvements,
            keywords,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Severity;

    #[test]
    fn out_of_range_options_are_clamped() {
        let synth = Synthesizer::default();
        let sections = seed(&synth.catalog().blueprints, &synth.catalog().templates[0]);
        let wild = BuilderOptions {
            creativity_level: 99,
            temperature: f64::NAN,
            ..Default::default()
        };
        let clamped = BuilderOptions {
            creativity_level: 10,
            temperature: 0.0,
            ..Default::default()
        };
        assert_eq!(
            synth.synthesize(&sections, &wild),
            synth.synthesize(&sections, &clamped)
        );
    }

    #[test]
    fn empty_draft_is_neutral_not_an_error() {
        let synth = Synthesizer::default();
        let result = synth.synthesize(&[], &BuilderOptions::default());
        assert_eq!(result.prompt, "");
        assert!(result.keywords.is_empty());
        assert_eq!(result.metrics.word_count, 0);
        assert!(result.insights.iter().any(|i| i.severity == Severity::Critical));
    }

    #[test]
    fn keyword_limit_follows_config() {
        let synth = Synthesizer::new(
            Catalog::builtin(),
            ScoringConfig::default().with_max_keywords(2),
        );
        let mut sections = seed(&synth.catalog().blueprints, &synth.catalog().templates[0]);
        sections[0].value = "rollout rollout budget budget timeline owners".into();
        let result = synth.synthesize(&sections, &BuilderOptions::default());
        assert_eq!(result.keywords, vec!["rollout", "budget"]);
    }
}
