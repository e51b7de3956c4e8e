// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The alignment algorithm must not depend on any particular
// tokenizer implementation or dataset file format. These two
// traits are the seams:
//
//   ExampleSource  → something that yields raw Examples
//     - SquadLoader → SQuAD-format JSON files
//     - JsonlLoader → line-per-record shorthand files
//
//   ChunkTokenizer → something that turns (question, context)
//   pairs into overlapping TokenChunks
//     - HfChunkTokenizer → HuggingFace tokenizers crate
//     - test doubles with hand-computed offsets
//
// The data layer only ever sees these traits, so swapping a
// tokenizer or a dataset format never touches the alignment
// code. This is the Dependency Inversion Principle from SOLID,
// applied using Rust's trait system.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::chunk::TokenChunk;
use crate::domain::example::Example;

// ─── ExampleSource ────────────────────────────────────────────────────────────
/// Any component that can load a batch of raw Q&A examples.
pub trait ExampleSource {
    /// Load all available examples from this source.
    fn load_all(&self) -> Result<Vec<Example>>;
}

// ─── ChunkTokenizer ───────────────────────────────────────────────────────────
/// The injected tokenization capability.
///
/// Given a batch of (question, context) pairs, produce one or
/// more overlapping TokenChunks per pair. Implementations must:
///   - set example_index to the pair's position in the batch
///   - emit a pair's chunks in window order (first window first),
///     since downstream code distinguishes first chunks from
///     continuation chunks
///   - report character offsets into the original context and
///     (0, 0) for special/padding tokens
///   - locate the no-answer token in every chunk
pub trait ChunkTokenizer {
    fn encode_chunks(&self, pairs: &[(String, String)]) -> Result<Vec<TokenChunk>>;
}
