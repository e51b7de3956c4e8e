// ============================================================
// Layer 4 — Feature Batcher
// ============================================================
// Implements Burn's Batcher trait to stack a Vec<QaFeature>
// into tensors for a training step:
//
//   Input:  N features, each padded to the same length S
//   Output: QaBatch with [N, S] int tensors for ids and mask,
//           [N] int tensors for the span label positions
//
// Every feature left the pipeline already padded to max_length,
// so stacking is a flatten + reshape — no dynamic padding here.
//
// B is the Burn Backend (e.g. Wgpu, NdArray), generic so the
// same batcher works on any device.

use burn::{data::dataloader::batcher::Batcher, prelude::*};

use crate::data::dataset::QaFeature;

/// A batch of labelled features ready for a model forward pass.
#[derive(Debug, Clone)]
pub struct QaBatch<B: Backend> {
    /// Token id sequences — shape [batch_size, seq_len]
    pub input_ids: Tensor<B, 2, Int>,

    /// Attention masks — shape [batch_size, seq_len]
    pub attention_mask: Tensor<B, 2, Int>,

    /// Target start token positions — shape [batch_size]
    pub start_positions: Tensor<B, 1, Int>,

    /// Target end token positions — shape [batch_size]
    pub end_positions: Tensor<B, 1, Int>,
}

/// Holds the target device so tensors land on the right GPU/CPU.
#[derive(Clone, Debug)]
pub struct FeatureBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> FeatureBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<QaFeature, QaBatch<B>> for FeatureBatcher<B> {
    fn batch(&self, items: Vec<QaFeature>) -> QaBatch<B> {
        let batch_size = items.len();
        // All features share the tokenizer's fixed max_length
        let seq_len = items[0].input_ids.len();

        // Flatten sample-major, then reshape to [batch, seq].
        // Burn's Int tensors are built from i32 values.
        let ids_flat: Vec<i32> = items
            .iter()
            .flat_map(|f| f.input_ids.iter().map(|&t| t as i32))
            .collect();

        let mask_flat: Vec<i32> = items
            .iter()
            .flat_map(|f| f.attention_mask.iter().map(|&m| m as i32))
            .collect();

        let starts: Vec<i32> = items.iter().map(|f| f.start_position as i32).collect();
        let ends:   Vec<i32> = items.iter().map(|f| f.end_position as i32).collect();

        let input_ids = Tensor::<B, 1, Int>::from_ints(ids_flat.as_slice(), &self.device)
            .reshape([batch_size, seq_len]);

        let attention_mask = Tensor::<B, 1, Int>::from_ints(mask_flat.as_slice(), &self.device)
            .reshape([batch_size, seq_len]);

        let start_positions = Tensor::<B, 1, Int>::from_ints(starts.as_slice(), &self.device);
        let end_positions   = Tensor::<B, 1, Int>::from_ints(ends.as_slice(), &self.device);

        QaBatch {
            input_ids,
            attention_mask,
            start_positions,
            end_positions,
        }
    }
}
