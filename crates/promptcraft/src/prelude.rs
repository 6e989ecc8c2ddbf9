//! Convenience re-exports for common `promptcraft` types.
//!
//! ```
//! use promptcraft::prelude::*;
//! ```
//!
//! Individual stage functions (`score`, `analyze`, `assemble`, …) are left
//! out; import them from [`crate::engine`] when driving stages separately.

// ── Configuration ───────────────────────────────────────────────────
pub use crate::catalog::{Catalog, SectionBlueprint, Template};
pub use crate::config::{ScoreWeights, ScoringConfig, WordBand};

// ── Draft state ─────────────────────────────────────────────────────
pub use crate::draft::{Draft, apply_snippet};
pub use crate::model::{BuilderOptions, OrderedSet, SectionState};

// ── Engine ──────────────────────────────────────────────────────────
pub use crate::engine::Synthesizer;
pub use crate::model::{Improvement, Insight, PromptMetrics, Severity, SynthesisResult};

// ── Export ──────────────────────────────────────────────────────────
pub use crate::export::{PromptExport, export_file_name};
pub use crate::json_schema_for;
