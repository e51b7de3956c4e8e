// ============================================================
// Layer 5 — HuggingFace Tokenizer Adapter
// ============================================================
// The production implementation of the ChunkTokenizer trait,
// built on the `tokenizers` crate. All the library-specific
// knowledge is confined to this file:
//
//   - truncation is OnlySecond: the question (sequence 0) stays
//     intact, only the context (sequence 1) is windowed
//   - stride makes consecutive windows overlap, so an answer
//     near a split point survives in at least one window
//   - overflow encodings ARE the continuation chunks; the first
//     encoding plus its overflow list give the full window set
//     in order
//   - encode_char_offsets reports offsets in CHARACTERS, which
//     matches the answer_start convention of SQuAD-style data
//     (plain encode would report bytes)
//   - padding to a fixed max_length on a configurable side; the
//     no-answer token is found by lookup per chunk because left
//     padding shifts it away from position 0
//
// Reference: tokenizers crate documentation
//            Devlin et al. (2019) - BERT paper

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokenizers::{
    Encoding, PaddingDirection, PaddingParams, PaddingStrategy, Tokenizer, TruncationDirection,
    TruncationParams, TruncationStrategy,
};

use crate::domain::chunk::{Segment, TokenChunk};
use crate::domain::traits::ChunkTokenizer;

// ─── Configuration ───────────────────────────────────────────────────────────
/// Which side padding (and therefore the shift of real tokens)
/// is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PadSide {
    Left,
    Right,
}

/// Window and padding settings for chunked encoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Maximum tokens per chunk, specials included
    pub max_length: usize,

    /// Token overlap between consecutive windows of one context
    pub stride: usize,

    pub pad_side: PadSide,

    /// The token labelling "no answer in this chunk" —
    /// conventionally the classification token
    pub no_answer_token: String,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_length:      384,
            stride:          128,
            pad_side:        PadSide::Right,
            no_answer_token: "[CLS]".to_string(),
        }
    }
}

// ─── HfChunkTokenizer ────────────────────────────────────────────────────────
/// ChunkTokenizer backed by a HuggingFace tokenizer.json.
pub struct HfChunkTokenizer {
    tokenizer:       Tokenizer,
    no_answer_id:    u32,
    no_answer_token: String,
}

impl HfChunkTokenizer {
    /// Load a tokenizer.json and apply the chunking settings.
    pub fn from_file(path: impl AsRef<Path>, config: &ChunkingConfig) -> Result<Self> {
        let path = path.as_ref();
        let tokenizer = Tokenizer::from_file(path).map_err(|e| {
            anyhow!("Cannot load tokenizer from '{}': {}", path.display(), e)
        })?;
        Self::from_tokenizer(tokenizer, config)
    }

    /// Wrap an already-constructed tokenizer (used by tests and
    /// callers that build their tokenizer elsewhere).
    pub fn from_tokenizer(mut tokenizer: Tokenizer, config: &ChunkingConfig) -> Result<Self> {
        let no_answer_id = tokenizer.token_to_id(&config.no_answer_token).ok_or_else(|| {
            anyhow!(
                "tokenizer vocabulary has no '{}' token to label no-answer chunks",
                config.no_answer_token
            )
        })?;
        let pad_id = tokenizer.token_to_id("[PAD]").unwrap_or(0);

        // Window only the context; the question survives in full
        // in every chunk
        tokenizer
            .with_truncation(Some(TruncationParams {
                direction:  TruncationDirection::Right,
                max_length: config.max_length,
                strategy:   TruncationStrategy::OnlySecond,
                stride:     config.stride,
            }))
            .map_err(|e| anyhow!("Invalid truncation settings: {}", e))?;

        tokenizer.with_padding(Some(PaddingParams {
            strategy:           PaddingStrategy::Fixed(config.max_length),
            direction:          match config.pad_side {
                PadSide::Left  => PaddingDirection::Left,
                PadSide::Right => PaddingDirection::Right,
            },
            pad_to_multiple_of: None,
            pad_id,
            pad_type_id:        0,
            pad_token:          "[PAD]".to_string(),
        }));

        Ok(Self {
            tokenizer,
            no_answer_id,
            no_answer_token: config.no_answer_token.clone(),
        })
    }

    /// Convert one encoding into a domain TokenChunk.
    fn chunk_from(&self, example_index: usize, encoding: &Encoding) -> Result<TokenChunk> {
        let input_ids = encoding.get_ids().to_vec();

        // Every chunk must carry the no-answer token; a vocabulary
        // that truncates it away cannot be labelled
        let no_answer_index = input_ids
            .iter()
            .position(|&id| id == self.no_answer_id)
            .ok_or_else(|| {
                anyhow!(
                    "chunk of example {} carries no '{}' token",
                    example_index,
                    self.no_answer_token
                )
            })?;

        let segments: Vec<Segment> = encoding
            .get_sequence_ids()
            .into_iter()
            .map(Segment::from_sequence_id)
            .collect();

        Ok(TokenChunk {
            example_index,
            input_ids,
            attention_mask: encoding.get_attention_mask().to_vec(),
            offsets:        encoding.get_offsets().to_vec(),
            segments,
            no_answer_index,
        })
    }
}

impl ChunkTokenizer for HfChunkTokenizer {
    fn encode_chunks(&self, pairs: &[(String, String)]) -> Result<Vec<TokenChunk>> {
        let mut chunks = Vec::new();

        for (example_index, (question, context)) in pairs.iter().enumerate() {
            // Char-level offsets, special tokens added
            let mut encoding = self
                .tokenizer
                .encode_char_offsets((question.as_str(), context.as_str()), true)
                .map_err(|e| {
                    anyhow!("Tokenisation error for example {}: {}", example_index, e)
                })?;

            // The first encoding plus its overflow list are this
            // example's windows, already in stride order
            let overflow = encoding.take_overflowing();
            for window in std::iter::once(encoding).chain(overflow) {
                chunks.push(self.chunk_from(example_index, &window)?);
            }
        }

        tracing::debug!("Encoded {} pairs into {} chunks", pairs.len(), chunks.len());
        Ok(chunks)
    }
}
