// ============================================================
// Layer 4 — Feature Dataset
// ============================================================
// QaFeature is the finished product of the pipeline: one
// fixed-length tokenized chunk plus its span label, ready to be
// consumed as a supervised training target. FeatureDataset wraps
// a batch of them behind Burn's Dataset trait so a DataLoader
// can index into it.
//
// Sequence format: [CLS] question [SEP] context [SEP] [PAD]...

use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

/// One labelled training feature.
/// start/end positions index into input_ids; both point at the
/// no-answer token when this chunk's window misses the answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaFeature {
    pub input_ids:      Vec<u32>,
    pub attention_mask: Vec<u32>,
    pub start_position: usize,
    pub end_position:   usize,

    /// Which example of the source batch this chunk came from.
    /// Several features share an index when a long context was
    /// split across stride windows.
    pub example_index: usize,

    /// Position of the chunk's no-answer token. Lets consumers
    /// distinguish a genuine one-token answer from the no-answer
    /// label without re-deriving the token layout.
    pub no_answer_index: usize,
}

impl QaFeature {
    /// True when this chunk's window holds no answer (either the
    /// example is unanswerable or the stride cut the answer out)
    pub fn is_no_answer(&self) -> bool {
        self.start_position == self.no_answer_index && self.end_position == self.no_answer_index
    }

    /// Number of tokens in the labelled span (inclusive range)
    pub fn span_length(&self) -> usize {
        self.end_position.saturating_sub(self.start_position) + 1
    }

    /// The token ids covered by the label
    pub fn answer_ids(&self) -> &[u32] {
        &self.input_ids[self.start_position..=self.end_position]
    }
}

pub struct FeatureDataset {
    features: Vec<QaFeature>,
}

impl FeatureDataset {
    pub fn new(features: Vec<QaFeature>) -> Self {
        Self { features }
    }
}

impl Dataset<QaFeature> for FeatureDataset {
    fn get(&self, index: usize) -> Option<QaFeature> {
        self.features.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.features.len()
    }
}
