// ============================================================
// Layer 3 — Domain Types
// ============================================================
// The core vocabulary of extractive Q&A feature preparation,
// independent of any tokenizer library or file format:
//
//   Example     → one raw (question, context, answers) record
//   AnswerInput → raw answer data as it arrives (scalar or structured)
//   Answers     → the single canonical answer form after normalisation
//   TokenChunk  → one tokenized window derived from one Example
//   Label       → (start, end) token indices for one chunk
//
// Everything in this layer is plain data plus the traits the
// outer layers implement. No I/O, no tokenizer calls.
//
// Reference: Rajpurkar et al. (2016) - SQuAD paper
//            Rust Book §5 (Structs), §6 (Enums)

/// Raw input record: question, context and answer annotations
pub mod example;

/// Scalar/structured answer shapes and the normaliser
pub mod answer;

/// Tokenized chunk, per-token segments and span labels
pub mod chunk;

/// Capability traits implemented by the data and infra layers
pub mod traits;
