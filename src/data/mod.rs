// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// This layer turns raw Q&A records into labelled, fixed-length
// training features. The pipeline flows in this order:
//
//   dataset file (SQuAD JSON / JSONL)
//       │
//       ▼
//   loader            → parses records into Examples
//       │
//       ▼
//   ChunkTokenizer    → splits each pair into overlapping chunks
//       │                 (injected — see Layer 5 infra)
//       ▼
//   classifier        → finds each chunk's context token range
//       │
//       ▼
//   aligner           → maps the answer's char span to token
//       │                 indices, or emits the no-answer label
//       ▼
//   pipeline          → assembles QaFeatures, preserving chunk order
//       │
//       ▼
//   dataset / batcher → Burn Dataset + tensor batches for training
//
// Each module is responsible for exactly one step, so each step
// is independently testable with hand-built chunks.
//
// Reference: Rust Book §13 (Iterators and Closures)

/// Parses SQuAD JSON and JSONL files into Examples
pub mod loader;

/// Finds the context token range of a chunk by scanning segments
pub mod classifier;

/// Maps answer character spans to token-index labels
pub mod aligner;

/// Composes tokenizer, classifier and aligner into features
pub mod pipeline;

/// QaFeature and the Burn Dataset implementation
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;
