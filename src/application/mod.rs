// ============================================================
// Layer 2 — Application Use Cases
// ============================================================
// One module per user-facing operation. Use cases own the
// step-by-step orchestration and nothing else: the CLI layer
// routes into them, the data and infra layers do the work.

/// Full dataset → labelled feature file run
pub mod prepare_use_case;

/// Single-example chunk/label breakdown for debugging
pub mod inspect_use_case;
