// ============================================================
// Layer 3 — Example Domain Type
// ============================================================
// One raw extractive Q&A record as produced by a dataset loader:
//   - a natural language question
//   - a context passage the answer must be found in
//   - zero or more gold answers, each a text plus a CHARACTER
//     offset into the context
//
// Character offsets are the annotation convention of SQuAD-style
// datasets — translating them into TOKEN indices (per chunk) is
// the whole job of the data layer.
//
// An Example is read-only input. It never changes after loading;
// every derived TokenChunk only holds its index back into the
// original batch.
//
// Reference: Rajpurkar et al. (2016) - SQuAD paper
//            Rust Book §5 (Structs)

use serde::{Deserialize, Serialize};

use crate::domain::answer::AnswerInput;

/// A single question/context record with its raw answer data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Example {
    /// Stable identifier — kept for traceability so diagnostics
    /// can name the offending record, not just its batch index
    pub id: String,

    /// The natural language question being asked
    pub question: String,

    /// The context passage that may contain the answer
    pub context: String,

    /// Raw answer annotations; normalised exactly once before
    /// any alignment logic runs
    pub answers: AnswerInput,
}

impl Example {
    /// Create a new Example.
    /// Uses impl Into<String> so callers can pass &str or String.
    pub fn new(
        id:       impl Into<String>,
        question: impl Into<String>,
        context:  impl Into<String>,
        answers:  AnswerInput,
    ) -> Self {
        Self {
            id:       id.into(),
            question: question.into(),
            context:  context.into(),
            answers,
        }
    }
}
