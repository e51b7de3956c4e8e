// ============================================================
// Layer 2 — InspectUseCase
// ============================================================
// Encodes ONE example and prints every chunk it produces: the
// context token range, the label, and the context characters the
// labelled tokens cover. This is the tool for answering "why did
// example 4217 get a no-answer label?" without re-running a full
// preparation pass.

use anyhow::{bail, Result};

use crate::data::{
    aligner::align,
    classifier::context_token_range,
    loader::open_dataset,
};
use crate::domain::traits::ChunkTokenizer;
use crate::infra::tokenizer::{ChunkingConfig, HfChunkTokenizer};

pub struct InspectConfig {
    pub dataset:   String,
    pub tokenizer: String,
    pub chunking:  ChunkingConfig,

    /// Which example of the dataset to break down
    pub index: usize,
}

pub struct InspectUseCase {
    config: InspectConfig,
}

impl InspectUseCase {
    pub fn new(config: InspectConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<()> {
        let cfg = &self.config;

        let examples = open_dataset(&cfg.dataset).load_all()?;
        let Some(example) = examples.get(cfg.index) else {
            bail!(
                "example index {} out of bounds — dataset holds {} examples",
                cfg.index,
                examples.len()
            );
        };

        let tokenizer = HfChunkTokenizer::from_file(&cfg.tokenizer, &cfg.chunking)?;
        let pair   = vec![(example.question.clone(), example.context.clone())];
        let chunks = tokenizer.encode_chunks(&pair)?;

        let answers = example.answers.normalize()?;
        let span    = answers.select(crate::domain::answer::AnswerPolicy::First)?;

        println!("example '{}': {}", example.id, example.question);
        match span {
            Some(s) => println!("gold answer chars [{}, {})", s.start, s.end),
            None    => println!("gold answer: none (unanswerable)"),
        }
        println!("{} chunk(s) at max_length={}", chunks.len(), cfg.chunking.max_length);

        for (i, chunk) in chunks.iter().enumerate() {
            let range = context_token_range(&chunk.segments);
            let label = align(chunk, range, span)?;

            match range {
                Some((lo, hi)) => {
                    println!(
                        "chunk {}: context tokens {}..={} (chars {}..{})",
                        i, lo, hi, chunk.offsets[lo].0, chunk.offsets[hi].1
                    );
                }
                None => println!("chunk {}: no context tokens in window", i),
            }

            if label.start == chunk.no_answer_index && label.end == chunk.no_answer_index {
                println!("chunk {}: label = no-answer (token {})", i, chunk.no_answer_index);
            } else {
                // Reconstruct the characters the labelled tokens cover
                let (c0, _) = chunk.offsets[label.start];
                let (_, c1) = chunk.offsets[label.end];
                let covered: String = example
                    .context
                    .chars()
                    .skip(c0)
                    .take(c1.saturating_sub(c0))
                    .collect();
                println!(
                    "chunk {}: label = tokens {}..={} covering {:?}",
                    i, label.start, label.end, covered
                );
            }
        }

        Ok(())
    }
}
