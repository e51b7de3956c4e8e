// ============================================================
// Layer 4 — Feature Pipeline
// ============================================================
// Composes the whole transform for one batch of examples:
//
//   Step 1: hand all (question, context) pairs to the injected
//           ChunkTokenizer → ordered TokenChunks
//   Step 2: normalise each chunk's answer data (once, up front —
//           no shape checks live past this point)
//   Step 3: classify the chunk's context token range
//   Step 4: align the selected answer span → Label
//   Step 5: assemble QaFeatures, preserving the tokenizer's
//           chunk order per example
//
// The transform is pure and synchronous: every example is
// processed independently and nothing is shared mutably, so a
// parallel map over examples would be sound — order per
// example_index is the only requirement downstream.
//
// Errors carry the example id and the chunk's position within
// its example so a broken record can be found in the dataset.

use anyhow::{anyhow, Context, Result};

use crate::data::aligner::align;
use crate::data::classifier::context_token_range;
use crate::data::dataset::QaFeature;
use crate::domain::answer::AnswerPolicy;
use crate::domain::example::Example;
use crate::domain::traits::ChunkTokenizer;

/// Builds labelled training features from raw examples.
pub struct FeatureBuilder<T: ChunkTokenizer> {
    tokenizer: T,
    policy:    AnswerPolicy,
}

impl<T: ChunkTokenizer> FeatureBuilder<T> {
    pub fn new(tokenizer: T, policy: AnswerPolicy) -> Self {
        Self { tokenizer, policy }
    }

    /// Transform a batch of examples into labelled features.
    /// One example yields one feature per chunk the tokenizer
    /// produced for it, in the tokenizer's emission order.
    pub fn build(&self, examples: &[Example]) -> Result<Vec<QaFeature>> {
        // ── Step 1: tokenize the whole batch ─────────────────────────────────
        let pairs: Vec<(String, String)> = examples
            .iter()
            .map(|e| (e.question.clone(), e.context.clone()))
            .collect();
        let chunks = self.tokenizer.encode_chunks(&pairs)?;

        tracing::debug!(
            "Tokenizer produced {} chunks from {} examples",
            chunks.len(),
            examples.len()
        );

        // ── Steps 2-5: label each chunk independently ────────────────────────
        let mut features = Vec::with_capacity(chunks.len());
        let mut previous_example = usize::MAX;
        let mut chunk_ordinal    = 0usize;

        for chunk in &chunks {
            // Position of this chunk within its example, for diagnostics
            if chunk.example_index == previous_example {
                chunk_ordinal += 1;
            } else {
                previous_example = chunk.example_index;
                chunk_ordinal = 0;
            }

            let example = examples.get(chunk.example_index).ok_or_else(|| {
                anyhow!(
                    "tokenizer mapped a chunk to example {} but the batch holds {}",
                    chunk.example_index,
                    examples.len()
                )
            })?;

            // Normalise the answer shape once, then select per policy
            let answers = example
                .answers
                .normalize()
                .with_context(|| format!("example '{}'", example.id))?;
            let span = answers
                .select(self.policy)
                .with_context(|| format!("example '{}'", example.id))?;

            let range = context_token_range(&chunk.segments);
            let label = align(chunk, range, span).with_context(|| {
                format!("example '{}', chunk {}", example.id, chunk_ordinal)
            })?;

            features.push(QaFeature {
                input_ids:      chunk.input_ids.clone(),
                attention_mask: chunk.attention_mask.clone(),
                start_position: label.start,
                end_position:   label.end,
                example_index:  chunk.example_index,
                no_answer_index: chunk.no_answer_index,
            });
        }

        Ok(features)
    }
}
