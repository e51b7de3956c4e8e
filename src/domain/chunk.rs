// ============================================================
// Layer 3 — Token Chunk and Span Label
// ============================================================
// A TokenChunk is one length-bounded tokenized window over a
// (question, context) pair. A long context does not fit into
// the model's maximum sequence length, so the tokenizer splits
// it into several overlapping chunks — each one becomes its own
// training feature, and each carries:
//
//   - input ids and attention mask for the model
//   - per-token character offsets back into the ORIGINAL context
//   - per-token segment tags (question / context / special)
//   - the position of the no-answer token ([CLS] by convention)
//
// Several chunks may share an example_index, but a chunk owns
// its arrays exclusively and never references a sibling chunk.
//
// A Label is the supervised target for one chunk: the inclusive
// token range of the answer, or (no_answer_index, no_answer_index)
// when the answer does not fall inside this chunk's window.
//
// Reference: Devlin et al. (2019) - BERT paper, §4.3 (SQuAD setup)

use serde::{Deserialize, Serialize};

// ─── Segment ─────────────────────────────────────────────────────────────────
/// What a single token position belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Segment {
    /// Token from the question text
    Question,

    /// Token from the context passage
    Context,

    /// [CLS], [SEP], padding — any token with no source text
    Special,
}

impl Segment {
    /// Map a tokenizer sequence id to a segment tag.
    /// Convention: sequence 0 is the question, sequence 1 the
    /// context, None a special or padding token.
    pub fn from_sequence_id(id: Option<usize>) -> Self {
        match id {
            Some(0) => Segment::Question,
            Some(_) => Segment::Context,
            None    => Segment::Special,
        }
    }
}

// ─── TokenChunk ──────────────────────────────────────────────────────────────
/// One tokenized window derived from exactly one Example.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenChunk {
    /// Index of the originating Example within its batch
    pub example_index: usize,

    /// Token id sequence: [CLS] question [SEP] context [SEP] [PAD]...
    pub input_ids: Vec<u32>,

    /// 1 for real tokens, 0 for padding
    pub attention_mask: Vec<u32>,

    /// Per-token (char_start, char_end) into the original context,
    /// (0, 0) for special and padding tokens
    pub offsets: Vec<(usize, usize)>,

    /// Per-token segment tag, parallel to input_ids
    pub segments: Vec<Segment>,

    /// Position of the designated no-answer token in this chunk.
    /// Not necessarily index 0 — left padding shifts it right.
    pub no_answer_index: usize,
}

// ─── Label ───────────────────────────────────────────────────────────────────
/// The (start, end) token-index target for one chunk.
/// Invariant: start <= end. Both equal the chunk's no_answer_index
/// when no answer lies in the chunk's visible context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub start: usize,
    pub end:   usize,
}

impl Label {
    /// The no-answer label: both positions point at the chunk's
    /// no-answer token
    pub fn no_answer(no_answer_index: usize) -> Self {
        Self { start: no_answer_index, end: no_answer_index }
    }

    /// Number of tokens in the labelled span (inclusive range)
    pub fn span_length(&self) -> usize {
        self.end.saturating_sub(self.start) + 1
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_from_sequence_id() {
        assert_eq!(Segment::from_sequence_id(Some(0)), Segment::Question);
        assert_eq!(Segment::from_sequence_id(Some(1)), Segment::Context);
        assert_eq!(Segment::from_sequence_id(None),    Segment::Special);
    }

    #[test]
    fn test_no_answer_label_collapses_to_one_position() {
        let label = Label::no_answer(0);
        assert_eq!(label.start, label.end);
        assert_eq!(label.span_length(), 1);
    }

    #[test]
    fn test_span_length_is_inclusive() {
        let label = Label { start: 7, end: 9 };
        assert_eq!(label.span_length(), 3);
    }
}
