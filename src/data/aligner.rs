// ============================================================
// Layer 4 — Answer Span Aligner
// ============================================================
// The heart of feature preparation: translating an answer's
// CHARACTER span [a0, a1) into TOKEN indices within one chunk.
//
// Three outcomes are possible, and only the last is an error:
//
//   1. The answer lies fully inside this chunk's visible
//      context → emit the covering token range (s, e)
//   2. The example is unanswerable, or the stride window
//      truncated the answer out of this chunk → emit the
//      no-answer label. This is a first-class result, produced
//      deterministically for every continuation chunk that
//      misses the answer — never a warning
//   3. The tokenizer supplied offsets with char_end < char_start
//      → the input contract is broken; fail with the token index
//
// Within the context run, token offsets are monotonically
// non-decreasing (special tokens with (0,0) sit OUTSIDE the
// run), so both span endpoints are found by binary search:
//   s = first context token with char_end  > a0
//   e = last  context token with char_start < a1
// Every token in s..=e then overlaps [a0, a1) by at least one
// character; a token that merely touches a boundary with zero
// overlap is excluded by the strict inequalities.
//
// Reference: Devlin et al. (2019) - BERT paper, §4.3 (SQuAD setup)

use anyhow::{anyhow, bail, Result};

use crate::domain::answer::CharSpan;
use crate::domain::chunk::{Label, TokenChunk};

/// Produce the Label for one chunk.
///
/// `context_range` is the classifier's inclusive token range
/// (None when the chunk holds no context tokens), `answer` the
/// selected gold answer span (None when unanswerable).
pub fn align(
    chunk:         &TokenChunk,
    context_range: Option<(usize, usize)>,
    answer:        Option<CharSpan>,
) -> Result<Label> {
    // Unanswerable example: every chunk gets the no-answer label
    let span = match answer {
        Some(span) => span,
        None => return Ok(Label::no_answer(chunk.no_answer_index)),
    };

    // A window with no visible context cannot contain an answer
    let (lo, hi) = match context_range {
        Some(range) => range,
        None => return Ok(Label::no_answer(chunk.no_answer_index)),
    };

    // A zero-width span has nothing to overlap
    if span.end <= span.start {
        return Ok(Label::no_answer(chunk.no_answer_index));
    }

    let ctx = chunk.offsets.get(lo..=hi).ok_or_else(|| {
        anyhow!(
            "context token range {}..={} exceeds {} offsets",
            lo,
            hi,
            chunk.offsets.len()
        )
    })?;

    // Inverted offsets break every assumption below — fatal
    for (i, &(start, end)) in ctx.iter().enumerate() {
        if end < start {
            bail!("malformed offset ({}, {}) at token {}", start, end, lo + i);
        }
    }

    // The character window this chunk can see of the context
    let c0 = ctx[0].0;
    let c1 = ctx[ctx.len() - 1].1;

    // Answer truncated out by the stride window: expected, not an error
    if span.start < c0 || span.end > c1 {
        return Ok(Label::no_answer(chunk.no_answer_index));
    }

    // First token whose span extends past a0...
    let s = lo + ctx.partition_point(|&(_, end)| end <= span.start);
    // ...and last token starting before a1. At least one token
    // starts before a1 here, since c0 <= span.start < span.end.
    let e = lo + ctx.partition_point(|&(start, _)| start < span.end) - 1;

    // The span sits entirely in a gap between tokens (e.g. inside
    // whitespace the tokenizer dropped): no positive overlap exists
    if s > e {
        return Ok(Label::no_answer(chunk.no_answer_index));
    }

    Ok(Label { start: s, end: e })
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chunk::Segment::{self, Context, Question, Special};

    // Build a chunk by hand from offset/segment arrays.
    // Token ids are irrelevant to alignment, so they are zeroed.
    fn chunk(offsets: Vec<(usize, usize)>, segments: Vec<Segment>) -> TokenChunk {
        let n = offsets.len();
        TokenChunk {
            example_index:   0,
            input_ids:       vec![0; n],
            attention_mask:  vec![1; n],
            offsets,
            segments,
            no_answer_index: 0,
        }
    }

    // "The cat sat on the mat" tokenized word by word after a
    // one-token question. Context chars:
    //   The(0,3) cat(4,7) sat(8,11) on(12,14) the(15,18) mat(19,22)
    fn cat_chunk() -> TokenChunk {
        chunk(
            vec![
                (0, 0),                                            // [CLS]
                (0, 0),                                            // question token
                (0, 0),                                            // [SEP]
                (0, 3), (4, 7), (8, 11), (12, 14), (15, 18), (19, 22),
                (0, 0),                                            // [SEP]
            ],
            vec![
                Special, Question, Special,
                Context, Context, Context, Context, Context, Context,
                Special,
            ],
        )
    }

    #[test]
    fn test_single_token_answer() {
        // "mat" at char 19: exactly one covering token, s == e
        let c = cat_chunk();
        let label = align(&c, Some((3, 8)), Some(CharSpan { start: 19, end: 22 })).unwrap();
        assert_eq!(label, Label { start: 8, end: 8 });
        assert_eq!(c.offsets[label.start], (19, 22));
    }

    #[test]
    fn test_multi_token_answer() {
        // "cat sat on" spans chars 4..14 → tokens 4..=6
        let c = cat_chunk();
        let label = align(&c, Some((3, 8)), Some(CharSpan { start: 4, end: 14 })).unwrap();
        assert_eq!(label, Label { start: 4, end: 6 });
        // Minimality: the covered char range is the tightest
        // token superset of the answer span
        assert!(c.offsets[label.start].0 <= 4);
        assert!(c.offsets[label.end].1 >= 14);
        assert!(c.offsets[label.start + 1].0 > 4);
        assert!(c.offsets[label.end - 1].1 < 14);
    }

    #[test]
    fn test_unanswerable_example() {
        let c = cat_chunk();
        let label = align(&c, Some((3, 8)), None).unwrap();
        assert_eq!(label, Label::no_answer(c.no_answer_index));
    }

    #[test]
    fn test_answer_truncated_out_of_window() {
        // Window only sees chars 0..18 ("The cat sat on the");
        // "mat" at 19..22 is cut off by the stride
        let c = chunk(
            vec![(0, 0), (0, 0), (0, 3), (4, 7), (8, 11), (12, 14), (15, 18), (0, 0)],
            vec![Special, Question, Context, Context, Context, Context, Context, Special],
        );
        let label = align(&c, Some((2, 6)), Some(CharSpan { start: 19, end: 22 })).unwrap();
        assert_eq!(label, Label::no_answer(c.no_answer_index));
    }

    #[test]
    fn test_continuation_chunk_contains_answer() {
        // Second stride window sees chars 8..22 ("sat on the mat")
        let c = chunk(
            vec![(0, 0), (0, 0), (8, 11), (12, 14), (15, 18), (19, 22), (0, 0)],
            vec![Special, Question, Context, Context, Context, Context, Special],
        );
        let label = align(&c, Some((2, 5)), Some(CharSpan { start: 19, end: 22 })).unwrap();
        assert_eq!(label, Label { start: 5, end: 5 });
    }

    #[test]
    fn test_answer_start_at_last_character() {
        // answer_start equal to the final character's start:
        // must return the last context token, never panic
        let c = cat_chunk();
        let label = align(&c, Some((3, 8)), Some(CharSpan { start: 21, end: 22 })).unwrap();
        assert_eq!(label, Label { start: 8, end: 8 });
    }

    #[test]
    fn test_zero_overlap_touch_is_excluded() {
        // [4, 4) touches the boundary between "The" and "cat"
        // with zero width — no token counts
        let c = cat_chunk();
        let label = align(&c, Some((3, 8)), Some(CharSpan { start: 4, end: 4 })).unwrap();
        assert_eq!(label, Label::no_answer(c.no_answer_index));
    }

    #[test]
    fn test_span_in_inter_token_gap() {
        // Tokens at (0,3) and (5,8) leave a gap at chars 3..5;
        // a span inside the gap overlaps nothing
        let c = chunk(
            vec![(0, 0), (0, 3), (5, 8), (0, 0)],
            vec![Special, Context, Context, Special],
        );
        let label = align(&c, Some((1, 2)), Some(CharSpan { start: 3, end: 5 })).unwrap();
        assert_eq!(label, Label::no_answer(c.no_answer_index));
    }

    #[test]
    fn test_no_context_range_means_no_answer() {
        let c = chunk(vec![(0, 0), (0, 0)], vec![Special, Question]);
        let label = align(&c, None, Some(CharSpan { start: 0, end: 3 })).unwrap();
        assert_eq!(label, Label::no_answer(c.no_answer_index));
    }

    #[test]
    fn test_malformed_offsets_are_fatal() {
        let c = chunk(
            vec![(0, 0), (0, 3), (7, 4), (0, 0)],
            vec![Special, Context, Context, Special],
        );
        let err = align(&c, Some((1, 2)), Some(CharSpan { start: 0, end: 3 }));
        assert!(err.is_err());
        assert!(err.unwrap_err().to_string().contains("token 2"));
    }

    #[test]
    fn test_answer_spanning_whole_context() {
        let c = cat_chunk();
        let label = align(&c, Some((3, 8)), Some(CharSpan { start: 0, end: 22 })).unwrap();
        assert_eq!(label, Label { start: 3, end: 8 });
    }
}
