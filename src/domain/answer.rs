// ============================================================
// Layer 3 — Answer Shapes and Normalisation
// ============================================================
// Datasets deliver answers in two shapes:
//
//   Structured: { text: ["mat", ...], answer_start: [19, ...] }
//     — the full SQuAD form, possibly several gold answers,
//       possibly empty (unanswerable question)
//
//   Scalar: a single answer string plus a single start offset
//     — a common shorthand when only one answer exists
//
// Rather than scattering shape checks through the alignment
// algorithm, the ambiguity is resolved in exactly one place:
// normalize() maps every shape into the canonical Answers
// struct before any alignment runs. Normalising already
// structured data is the identity — no double wrapping.
//
// When several gold answers exist (evaluation datasets), which
// one becomes the training label is an explicit policy the
// caller chooses, not a hardcoded pick.
//
// Reference: Rajpurkar et al. (2018) - SQuAD 2.0 paper
//            Rust Book §6 (Enums and Pattern Matching)

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

// ─── AnswerInput ─────────────────────────────────────────────────────────────
/// Raw answer data exactly as a loader produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AnswerInput {
    /// Full parallel-array form. May hold zero answers.
    Structured(Answers),

    /// Single-answer shorthand. An empty text means "no answer".
    Scalar {
        text:         String,
        answer_start: usize,
    },
}

impl AnswerInput {
    /// Resolve this input into the canonical structured form.
    ///
    /// - Structured data is validated and passed through unchanged
    /// - An empty scalar becomes the empty (unanswerable) form
    /// - A non-empty scalar becomes a one-element structure
    ///
    /// Fails only on a contract violation: structured data whose
    /// text and answer_start arrays have different lengths.
    pub fn normalize(&self) -> Result<Answers> {
        match self {
            AnswerInput::Structured(answers) => {
                answers.validate()?;
                Ok(answers.clone())
            }
            AnswerInput::Scalar { text, answer_start } => {
                if text.is_empty() {
                    Ok(Answers::empty())
                } else {
                    Ok(Answers {
                        text:         vec![text.clone()],
                        answer_start: vec![*answer_start],
                    })
                }
            }
        }
    }
}

// ─── Answers ─────────────────────────────────────────────────────────────────
/// The canonical answer form: two parallel arrays.
/// Empty arrays denote an unanswerable example.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answers {
    /// Gold answer strings, verbatim substrings of the context
    pub text: Vec<String>,

    /// Character offset of each answer into the context,
    /// parallel to `text`
    pub answer_start: Vec<usize>,
}

impl Answers {
    /// The unanswerable form: no texts, no offsets
    pub fn empty() -> Self {
        Self { text: Vec::new(), answer_start: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Check the parallel-array invariant.
    /// A mismatch means the loader produced inconsistent data —
    /// fatal, never silently coerced.
    pub fn validate(&self) -> Result<()> {
        if self.text.len() != self.answer_start.len() {
            bail!(
                "answer arrays out of sync: {} texts vs {} start offsets",
                self.text.len(),
                self.answer_start.len()
            );
        }
        Ok(())
    }

    /// Select the answer used for label generation, per policy.
    ///
    /// Returns the answer's character span [start, end) in the
    /// context, measured in CHARACTERS (not bytes) to match the
    /// dataset annotation convention. None means no usable answer.
    pub fn select(&self, policy: AnswerPolicy) -> Result<Option<CharSpan>> {
        if self.is_empty() {
            return Ok(None);
        }

        let pick = match policy {
            AnswerPolicy::First => 0,
            AnswerPolicy::Shortest => {
                // Index of the shortest gold answer by character count
                let mut best = 0;
                for (i, text) in self.text.iter().enumerate() {
                    if text.chars().count() < self.text[best].chars().count() {
                        best = i;
                    }
                }
                best
            }
            AnswerPolicy::Index(i) => {
                if i >= self.text.len() {
                    bail!(
                        "answer index {} out of bounds ({} answers available)",
                        i,
                        self.text.len()
                    );
                }
                i
            }
        };

        let text  = &self.text[pick];
        let start = self.answer_start[pick];

        // An empty gold string carries no span to align
        if text.is_empty() {
            return Ok(None);
        }

        Ok(Some(CharSpan {
            start,
            end: start + text.chars().count(),
        }))
    }
}

// ─── AnswerPolicy ────────────────────────────────────────────────────────────
/// Which gold answer becomes the training label when an example
/// carries more than one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerPolicy {
    /// The first annotated answer (the usual training convention)
    First,

    /// The shortest answer by character count
    Shortest,

    /// A fixed caller-supplied index; out of bounds is fatal
    Index(usize),
}

impl Default for AnswerPolicy {
    fn default() -> Self {
        AnswerPolicy::First
    }
}

// ─── CharSpan ────────────────────────────────────────────────────────────────
/// A half-open character range [start, end) into a context string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharSpan {
    pub start: usize,
    pub end:   usize,
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_becomes_structured() {
        let raw = AnswerInput::Scalar { text: "mat".to_string(), answer_start: 19 };
        let normalized = raw.normalize().unwrap();
        assert_eq!(normalized.text, vec!["mat".to_string()]);
        assert_eq!(normalized.answer_start, vec![19]);
    }

    #[test]
    fn test_empty_scalar_becomes_unanswerable() {
        let raw = AnswerInput::Scalar { text: String::new(), answer_start: 0 };
        let normalized = raw.normalize().unwrap();
        assert!(normalized.is_empty());
        assert!(normalized.answer_start.is_empty());
    }

    #[test]
    fn test_normalize_is_idempotent() {
        // Already-structured data must pass through unchanged,
        // even after repeated normalisation
        let answers = Answers {
            text:         vec!["mat".to_string()],
            answer_start: vec![19],
        };
        let once  = AnswerInput::Structured(answers.clone()).normalize().unwrap();
        let twice = AnswerInput::Structured(once.clone()).normalize().unwrap();
        assert_eq!(once, answers);
        assert_eq!(twice, answers);
    }

    #[test]
    fn test_mismatched_arrays_are_fatal() {
        let bad = AnswerInput::Structured(Answers {
            text:         vec!["a".to_string(), "b".to_string()],
            answer_start: vec![0],
        });
        assert!(bad.normalize().is_err());
    }

    #[test]
    fn test_select_first() {
        let answers = Answers {
            text:         vec!["the mat".to_string(), "mat".to_string()],
            answer_start: vec![15, 19],
        };
        let span = answers.select(AnswerPolicy::First).unwrap().unwrap();
        assert_eq!(span.start, 15);
        assert_eq!(span.end, 22);
    }

    #[test]
    fn test_select_shortest() {
        let answers = Answers {
            text:         vec!["the mat".to_string(), "mat".to_string()],
            answer_start: vec![15, 19],
        };
        let span = answers.select(AnswerPolicy::Shortest).unwrap().unwrap();
        assert_eq!(span.start, 19);
        assert_eq!(span.end, 22);
    }

    #[test]
    fn test_select_index_out_of_bounds_is_fatal() {
        let answers = Answers {
            text:         vec!["mat".to_string()],
            answer_start: vec![19],
        };
        assert!(answers.select(AnswerPolicy::Index(3)).is_err());
    }

    #[test]
    fn test_select_empty_yields_none() {
        let span = Answers::empty().select(AnswerPolicy::First).unwrap();
        assert!(span.is_none());
    }

    #[test]
    fn test_span_is_measured_in_chars() {
        // Multi-byte text: span length must count characters, not bytes
        let answers = Answers {
            text:         vec!["café".to_string()],
            answer_start: vec![10],
        };
        let span = answers.select(AnswerPolicy::First).unwrap().unwrap();
        assert_eq!(span.end - span.start, 4);
    }
}
