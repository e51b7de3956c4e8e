// ============================================================
// Layer 4 — Context Range Classifier
// ============================================================
// Finds which token positions of a chunk belong to the context
// passage, as an inclusive (start, end) index range.
//
// The range is derived by SCANNING the segment tags, never by
// arithmetic on the sequence length:
//   - with right padding the context run ends early, followed
//     by [SEP] and padding
//   - with left padding the run starts late, preceded by padding
// Scanning handles both without a padding-side flag.
//
// The context run is normally unique ([CLS] Q [SEP] C [SEP]).
// Should a tokenizer ever emit more than one run, the maximal
// contiguous run wins.
//
// A chunk with zero context tokens returns None — a stride
// window can legitimately land past the end of a short context,
// and the aligner then labels the chunk as no-answer.

use crate::domain::chunk::Segment;

/// Return the inclusive token index range of the maximal
/// contiguous run of Context-tagged tokens, or None when the
/// chunk holds no context tokens at all.
pub fn context_token_range(segments: &[Segment]) -> Option<(usize, usize)> {
    let mut best:      Option<(usize, usize)> = None;
    let mut run_start: Option<usize>          = None;

    for (i, segment) in segments.iter().enumerate() {
        match segment {
            Segment::Context => {
                if run_start.is_none() {
                    run_start = Some(i);
                }
            }
            _ => {
                if let Some(start) = run_start.take() {
                    best = longer_run(best, (start, i - 1));
                }
            }
        }
    }

    // A run reaching the final token closes here
    if let Some(start) = run_start {
        best = longer_run(best, (start, segments.len() - 1));
    }

    best
}

/// Keep whichever inclusive run spans more tokens
fn longer_run(best: Option<(usize, usize)>, candidate: (usize, usize)) -> Option<(usize, usize)> {
    match best {
        Some((s, e)) if e - s >= candidate.1 - candidate.0 => Some((s, e)),
        _ => Some(candidate),
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chunk::Segment::{Context, Question, Special};

    #[test]
    fn test_right_padded_chunk() {
        // [CLS] Q Q [SEP] C C C [SEP] [PAD] [PAD]
        let segments = vec![
            Special, Question, Question, Special,
            Context, Context, Context,
            Special, Special, Special,
        ];
        assert_eq!(context_token_range(&segments), Some((4, 6)));
    }

    #[test]
    fn test_left_padded_chunk() {
        // [PAD] [PAD] [CLS] Q [SEP] C C [SEP]
        let segments = vec![
            Special, Special, Special, Question, Special,
            Context, Context,
            Special,
        ];
        assert_eq!(context_token_range(&segments), Some((5, 6)));
    }

    #[test]
    fn test_run_reaching_final_token() {
        // No trailing [SEP]/padding — the run must still close
        let segments = vec![Special, Question, Special, Context, Context];
        assert_eq!(context_token_range(&segments), Some((3, 4)));
    }

    #[test]
    fn test_no_context_tokens() {
        let segments = vec![Special, Question, Question, Special];
        assert_eq!(context_token_range(&segments), None);
    }

    #[test]
    fn test_empty_segments() {
        assert_eq!(context_token_range(&[]), None);
    }

    #[test]
    fn test_maximal_run_wins() {
        // Pathological double run: the longer one is the answer
        let segments = vec![Context, Special, Context, Context, Context];
        assert_eq!(context_token_range(&segments), Some((2, 4)));
    }

    #[test]
    fn test_single_context_token() {
        let segments = vec![Special, Context, Special];
        assert_eq!(context_token_range(&segments), Some((1, 1)));
    }
}
