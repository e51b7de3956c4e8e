// ============================================================
// Layer 5 — Infrastructure
// ============================================================
// Everything that touches the outside world: the concrete
// tokenizer implementation behind the ChunkTokenizer trait, and
// the feature file writer. The data layer never imports from
// here — it only sees the Layer 3 traits.

/// HuggingFace `tokenizers` adapter: stride chunking, offsets,
/// segments and the no-answer token lookup
pub mod tokenizer;

/// Writes finished features to a JSONL file
pub mod writer;
