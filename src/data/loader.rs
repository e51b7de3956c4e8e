// ============================================================
// Layer 4 — Dataset Loaders
// ============================================================
// Parses raw dataset files into domain Examples. Two formats:
//
//   SQuAD JSON — the standard nested tree:
//     data[] → paragraphs[] → qas[] with answers[{text,
//     answer_start}] and an optional is_impossible flag (v2).
//     Answers arrive in the STRUCTURED shape.
//
//   JSONL — one record per line with the single-answer
//     shorthand: {question, context, answer?, answer_start?}.
//     Answers arrive in the SCALAR shape, which is exactly the
//     input the normaliser exists for.
//
// Both loaders implement the ExampleSource trait so the
// application layer never knows which format fed it.
//
// Reference: Rajpurkar et al. (2016, 2018) - SQuAD papers
//            https://rajpurkar.github.io/SQuAD-explorer/

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::PathBuf};

use crate::domain::answer::{AnswerInput, Answers};
use crate::domain::example::Example;
use crate::domain::traits::ExampleSource;

// ─── SQuAD JSON ──────────────────────────────────────────────────────────────
// The serde mirror of the SQuAD file tree. Only the fields the
// pipeline needs are declared; serde skips the rest.

#[derive(Debug, Deserialize)]
struct SquadFile {
    data: Vec<SquadArticle>,
}

#[derive(Debug, Deserialize)]
struct SquadArticle {
    paragraphs: Vec<SquadParagraph>,
}

#[derive(Debug, Deserialize)]
struct SquadParagraph {
    context: String,
    qas:     Vec<SquadQa>,
}

#[derive(Debug, Deserialize)]
struct SquadQa {
    id:       String,
    question: String,
    answers:  Vec<SquadAnswer>,
    #[serde(default)]
    is_impossible: bool,
}

#[derive(Debug, Deserialize)]
struct SquadAnswer {
    text:         String,
    answer_start: usize,
}

/// Loads SQuAD-format JSON files.
pub struct SquadLoader {
    path: PathBuf,
}

impl SquadLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ExampleSource for SquadLoader {
    fn load_all(&self) -> Result<Vec<Example>> {
        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("Cannot read dataset '{}'", self.path.display()))?;
        let examples = parse_squad(&json)
            .with_context(|| format!("Cannot parse SQuAD file '{}'", self.path.display()))?;
        tracing::info!(
            "Loaded {} examples from '{}'",
            examples.len(),
            self.path.display()
        );
        Ok(examples)
    }
}

/// Parse SQuAD JSON text into Examples. The paragraph context is
/// cloned per question, since every question owns its record.
pub fn parse_squad(json: &str) -> Result<Vec<Example>> {
    let file: SquadFile = serde_json::from_str(json)?;

    let mut examples = Vec::new();
    for article in file.data {
        for paragraph in article.paragraphs {
            for qa in paragraph.qas {
                // v2 marks unanswerable questions explicitly; an
                // empty answers array means the same thing
                let answers = if qa.is_impossible || qa.answers.is_empty() {
                    Answers::empty()
                } else {
                    Answers {
                        text:         qa.answers.iter().map(|a| a.text.clone()).collect(),
                        answer_start: qa.answers.iter().map(|a| a.answer_start).collect(),
                    }
                };
                examples.push(Example::new(
                    qa.id,
                    qa.question,
                    paragraph.context.clone(),
                    AnswerInput::Structured(answers),
                ));
            }
        }
    }
    Ok(examples)
}

// ─── JSONL shorthand ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct JsonlRecord {
    #[serde(default)]
    id:       Option<String>,
    question: String,
    context:  String,
    /// Single answer text; absent means unanswerable
    #[serde(default)]
    answer: Option<String>,
    /// Character offset paired with `answer`
    #[serde(default)]
    answer_start: Option<usize>,
}

/// Loads line-per-record JSONL files with scalar answers.
pub struct JsonlLoader {
    path: PathBuf,
}

impl JsonlLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ExampleSource for JsonlLoader {
    fn load_all(&self) -> Result<Vec<Example>> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("Cannot read dataset '{}'", self.path.display()))?;
        let examples = parse_jsonl(&text)
            .with_context(|| format!("Cannot parse JSONL file '{}'", self.path.display()))?;
        tracing::info!(
            "Loaded {} examples from '{}'",
            examples.len(),
            self.path.display()
        );
        Ok(examples)
    }
}

/// Parse JSONL text into Examples. Records keep the scalar
/// answer shape — normalisation happens in the pipeline.
pub fn parse_jsonl(text: &str) -> Result<Vec<Example>> {
    let mut examples = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record: JsonlRecord = serde_json::from_str(line)
            .with_context(|| format!("line {}", line_no + 1))?;

        // Missing id → synthesize one from the line number
        let id = record
            .id
            .unwrap_or_else(|| format!("line-{}", line_no + 1));

        examples.push(Example::new(
            id,
            record.question,
            record.context,
            AnswerInput::Scalar {
                text:         record.answer.unwrap_or_default(),
                answer_start: record.answer_start.unwrap_or(0),
            },
        ));
    }
    Ok(examples)
}

// ─── Format detection ────────────────────────────────────────────────────────
/// Pick a loader by file extension: `.jsonl` means the scalar
/// shorthand, anything else is treated as SQuAD JSON.
pub fn open_dataset(path: impl Into<PathBuf>) -> Box<dyn ExampleSource> {
    let path = path.into();
    match path.extension().and_then(|e| e.to_str()) {
        Some("jsonl") => Box::new(JsonlLoader::new(path)),
        _             => Box::new(SquadLoader::new(path)),
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_squad_tree() {
        let json = r#"{
            "version": "v2.0",
            "data": [{
                "title": "Cats",
                "paragraphs": [{
                    "context": "The cat sat on the mat",
                    "qas": [
                        {
                            "id": "q1",
                            "question": "Where did the cat sit?",
                            "answers": [{"text": "mat", "answer_start": 19}]
                        },
                        {
                            "id": "q2",
                            "question": "Where did the dog sit?",
                            "answers": [],
                            "is_impossible": true
                        }
                    ]
                }]
            }]
        }"#;

        let examples = parse_squad(json).unwrap();
        assert_eq!(examples.len(), 2);
        assert_eq!(examples[0].id, "q1");
        assert_eq!(examples[0].context, "The cat sat on the mat");

        let answers = examples[0].answers.normalize().unwrap();
        assert_eq!(answers.text, vec!["mat".to_string()]);
        assert_eq!(answers.answer_start, vec![19]);

        // Impossible question normalises to the empty form
        assert!(examples[1].answers.normalize().unwrap().is_empty());
    }

    #[test]
    fn test_parse_jsonl_scalar_shorthand() {
        let text = concat!(
            r#"{"id": "a", "question": "Where?", "context": "The cat sat on the mat", "answer": "mat", "answer_start": 19}"#,
            "\n",
            "\n",
            r#"{"question": "Why?", "context": "No reason given"}"#,
            "\n",
        );

        let examples = parse_jsonl(text).unwrap();
        assert_eq!(examples.len(), 2);

        let first = examples[0].answers.normalize().unwrap();
        assert_eq!(first.text, vec!["mat".to_string()]);

        // Second record has no answer fields at all
        assert_eq!(examples[1].id, "line-3");
        assert!(examples[1].answers.normalize().unwrap().is_empty());
    }

    #[test]
    fn test_jsonl_error_names_the_line() {
        let err = parse_jsonl("{\"question\": \"ok\", \"context\": \"ok\"}\nnot json\n").unwrap_err();
        assert!(format!("{:#}", err).contains("line 2"));
    }
}
