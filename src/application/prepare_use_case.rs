// ============================================================
// Layer 2 — PrepareUseCase
// ============================================================
// Orchestrates the full preparation pipeline in order:
//
//   Step 1: Load examples           (Layer 4 - data)
//   Step 2: Build tokenizer adapter (Layer 5 - infra)
//   Step 3: Chunk, align, label     (Layer 4 - data)
//   Step 4: Report label statistics
//   Step 5: Write feature JSONL     (Layer 5 - infra)
//
// The counts logged in Step 4 are the fastest sanity check a
// run has: a dataset with answers that produces 100% no-answer
// labels almost always means the wrong tokenizer or a
// max_length too small for the questions.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::data::{loader::open_dataset, pipeline::FeatureBuilder};
use crate::domain::answer::AnswerPolicy;
use crate::infra::{
    tokenizer::{ChunkingConfig, HfChunkTokenizer},
    writer::FeatureWriter,
};

// ─── Configuration ───────────────────────────────────────────────────────────
/// Everything one preparation run needs. Serialisable so a run's
/// settings can be recorded alongside its output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepareConfig {
    /// Dataset file: SQuAD JSON or .jsonl shorthand
    pub dataset: String,

    /// Path to a HuggingFace tokenizer.json
    pub tokenizer: String,

    /// Output feature file (JSONL)
    pub output: String,

    pub chunking: ChunkingConfig,

    /// Which gold answer labels a multi-answer example
    pub policy: AnswerPolicy,
}

// ─── PrepareUseCase ──────────────────────────────────────────────────────────
pub struct PrepareUseCase {
    config: PrepareConfig,
}

impl PrepareUseCase {
    pub fn new(config: PrepareConfig) -> Self {
        Self { config }
    }

    /// Execute the full preparation pipeline end to end.
    /// Returns the number of features written.
    pub fn execute(&self) -> Result<usize> {
        let cfg = &self.config;

        // ── Step 1: Load raw examples ─────────────────────────────────────────
        tracing::info!("Loading examples from '{}'", cfg.dataset);
        let examples = open_dataset(&cfg.dataset).load_all()?;

        // ── Step 2: Build the tokenizer adapter ───────────────────────────────
        tracing::info!(
            "Loading tokenizer '{}' (max_length={}, stride={})",
            cfg.tokenizer,
            cfg.chunking.max_length,
            cfg.chunking.stride
        );
        let tokenizer = HfChunkTokenizer::from_file(&cfg.tokenizer, &cfg.chunking)?;

        // ── Step 3: Chunk, align and label ────────────────────────────────────
        let builder  = FeatureBuilder::new(tokenizer, cfg.policy);
        let features = builder.build(&examples)?;
        tracing::info!(
            "Built {} features from {} examples",
            features.len(),
            examples.len()
        );

        // ── Step 4: Label statistics ──────────────────────────────────────────
        // Continuation chunks that miss their answer count as
        // no-answer by design, so some no-answer labels are normal
        // even for fully answerable datasets.
        let no_answer = features.iter().filter(|f| f.is_no_answer()).count();
        tracing::info!(
            "Labels: {} answer spans, {} no-answer",
            features.len() - no_answer,
            no_answer
        );

        // ── Step 5: Write the feature file ────────────────────────────────────
        let writer = FeatureWriter::new(&cfg.output);
        writer.write_all(&features)
    }
}
