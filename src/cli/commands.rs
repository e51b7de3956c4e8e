// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands: `prepare` and `inspect`
// and all their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, enums, etc.)
//
// Reference: Rust Book §12 (Building a CLI Program)

use anyhow::{bail, Result};
use clap::{Args, Subcommand, ValueEnum};

use crate::application::inspect_use_case::InspectConfig;
use crate::application::prepare_use_case::PrepareConfig;
use crate::domain::answer::AnswerPolicy;
use crate::infra::tokenizer::{ChunkingConfig, PadSide};

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a Q&A dataset into labelled training features
    Prepare(PrepareArgs),

    /// Print one example's chunks and labels for debugging
    Inspect(InspectArgs),
}

// ─── Shared tokenization flags ───────────────────────────────────────────────
/// Window and padding flags used by both subcommands.
#[derive(Args, Debug, Clone)]
pub struct ChunkingArgs {
    /// Maximum number of tokens per chunk, special tokens included
    #[arg(long, default_value_t = 384)]
    pub max_length: usize,

    /// Token overlap between consecutive chunks of one context,
    /// so an answer near a split point survives in one of them
    #[arg(long, default_value_t = 128)]
    pub stride: usize,

    /// Which side the tokenizer pads on
    #[arg(long, value_enum, default_value_t = PadSideArg::Right)]
    pub pad_side: PadSideArg,

    /// The token whose position labels "no answer in this chunk"
    #[arg(long, default_value = "[CLS]")]
    pub no_answer_token: String,
}

/// clap-facing mirror of the infra PadSide setting
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadSideArg {
    Left,
    Right,
}

impl From<PadSideArg> for PadSide {
    fn from(side: PadSideArg) -> Self {
        match side {
            PadSideArg::Left  => PadSide::Left,
            PadSideArg::Right => PadSide::Right,
        }
    }
}

impl From<ChunkingArgs> for ChunkingConfig {
    fn from(a: ChunkingArgs) -> Self {
        ChunkingConfig {
            max_length:      a.max_length,
            stride:          a.stride,
            pad_side:        a.pad_side.into(),
            no_answer_token: a.no_answer_token,
        }
    }
}

// ─── prepare ─────────────────────────────────────────────────────────────────
/// All arguments for the `prepare` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct PrepareArgs {
    /// Dataset file: SQuAD-format JSON, or JSONL shorthand
    /// with scalar answer/answer_start fields
    #[arg(long)]
    pub dataset: String,

    /// Path to a HuggingFace tokenizer.json
    #[arg(long)]
    pub tokenizer: String,

    /// Output feature file (one JSON feature per line)
    #[arg(long, default_value = "features.jsonl")]
    pub output: String,

    #[command(flatten)]
    pub chunking: ChunkingArgs,

    /// Which gold answer labels a multi-answer example
    #[arg(long, value_enum, default_value_t = AnswerPolicyArg::First)]
    pub answer_policy: AnswerPolicyArg,

    /// Use the answer at this fixed index instead of a policy.
    /// Out-of-bounds indices fail the run.
    #[arg(long, conflicts_with = "answer_policy")]
    pub answer_index: Option<usize>,
}

/// clap-facing mirror of the domain AnswerPolicy
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerPolicyArg {
    First,
    Shortest,
}

/// Convert CLI PrepareArgs into the application-layer config.
/// This is the boundary between Layer 1 and Layer 2 —
/// the application layer never sees clap types.
impl TryFrom<PrepareArgs> for PrepareConfig {
    type Error = anyhow::Error;

    fn try_from(a: PrepareArgs) -> Result<Self> {
        if a.chunking.stride >= a.chunking.max_length {
            bail!(
                "stride ({}) must be smaller than max_length ({})",
                a.chunking.stride,
                a.chunking.max_length
            );
        }

        let policy = match (a.answer_index, a.answer_policy) {
            (Some(i), _)                      => AnswerPolicy::Index(i),
            (None, AnswerPolicyArg::First)    => AnswerPolicy::First,
            (None, AnswerPolicyArg::Shortest) => AnswerPolicy::Shortest,
        };

        Ok(PrepareConfig {
            dataset:   a.dataset,
            tokenizer: a.tokenizer,
            output:    a.output,
            chunking:  a.chunking.into(),
            policy,
        })
    }
}

// ─── inspect ─────────────────────────────────────────────────────────────────
/// All arguments for the `inspect` command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Dataset file (same formats as `prepare`)
    #[arg(long)]
    pub dataset: String,

    /// Path to a HuggingFace tokenizer.json
    #[arg(long)]
    pub tokenizer: String,

    /// Index of the example to break down
    #[arg(long, default_value_t = 0)]
    pub index: usize,

    #[command(flatten)]
    pub chunking: ChunkingArgs,
}

impl From<InspectArgs> for InspectConfig {
    fn from(a: InspectArgs) -> Self {
        InspectConfig {
            dataset:   a.dataset,
            tokenizer: a.tokenizer,
            chunking:  a.chunking.into(),
            index:     a.index,
        }
    }
}
