// ============================================================
// Layer 5 — Feature Writer
// ============================================================
// Persists finished features as JSONL: one serialized QaFeature
// per line. JSONL keeps the handoff to a training process
// trivial — stream the file, parse a line, get a feature —
// and appending batches never requires rewriting the file.
//
// Output example (one line, wrapped here for readability):
//   {"input_ids":[101,...],"attention_mask":[1,...],
//    "start_position":27,"end_position":29,"example_index":4}

use anyhow::{Context, Result};
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::PathBuf,
};

use crate::data::dataset::QaFeature;

pub struct FeatureWriter {
    path: PathBuf,
}

impl FeatureWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Write all features, one JSON object per line.
    /// Returns the number of lines written.
    pub fn write_all(&self, features: &[QaFeature]) -> Result<usize> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Cannot create output directory '{}'", parent.display())
                })?;
            }
        }

        let file = File::create(&self.path)
            .with_context(|| format!("Cannot create '{}'", self.path.display()))?;
        let mut writer = BufWriter::new(file);

        for feature in features {
            let line = serde_json::to_string(feature)?;
            writeln!(writer, "{}", line)?;
        }
        writer.flush()?;

        tracing::info!(
            "Wrote {} features to '{}'",
            features.len(),
            self.path.display()
        );
        Ok(features.len())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn feature(example_index: usize) -> QaFeature {
        QaFeature {
            input_ids:      vec![101, 5, 102, 8, 102, 0],
            attention_mask: vec![1, 1, 1, 1, 1, 0],
            start_position: 3,
            end_position:   3,
            example_index,
            no_answer_index: 0,
        }
    }

    #[test]
    fn test_writes_one_line_per_feature() {
        let path = std::env::temp_dir().join(format!("qa-features-test-{}.jsonl", std::process::id()));
        let writer = FeatureWriter::new(&path);

        let written = writer.write_all(&[feature(0), feature(0), feature(1)]).unwrap();
        assert_eq!(written, 3);

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);

        // Each line parses back into an identical feature
        let parsed: QaFeature = serde_json::from_str(lines[2]).unwrap();
        assert_eq!(parsed.example_index, 1);
        assert_eq!(parsed.input_ids, feature(1).input_ids);

        std::fs::remove_file(&path).ok();
    }
}
