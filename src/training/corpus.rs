// src/training/corpus.rs

use std::io::BufRead;
use std::path::Path;

use anyhow::Result;
use serde::Deserialize;

use crate::relations::RelLabel;
use crate::tokenizer::tokenize;

/// One hand-labeled utterance: per-token head index and relation label.
#[derive(Clone, Debug)]
pub struct TrainExample {
    pub text: String,
    pub heads: Vec<usize>,
    pub deps: Vec<RelLabel>,
}

impl TrainExample {
    /// heads/deps must line up with what the tokenizer produces for `text`,
    /// and every head must point inside the utterance.
    pub fn is_aligned(&self) -> bool {
        let n = tokenize(&self.text).len();
        n > 0
            && self.heads.len() == n
            && self.deps.len() == n
            && self.heads.iter().all(|&h| h < n)
    }
}

fn ex(text: &str, heads: &[usize], deps: &[RelLabel]) -> TrainExample {
    TrainExample {
        text: text.to_string(),
        heads: heads.to_vec(),
        deps: deps.to_vec(),
    }
}

/// The annotated corpus the parser is fine-tuned on. Head indices refer to
/// token positions within the utterance; roots point at themselves.
pub fn builtin_corpus() -> Vec<TrainExample> {
    use RelLabel::*;
    vec![
        ex("hi there", &[0, 0], &[Root, NoRel]),
        ex("hey you", &[0, 0], &[Root, Target]),
        ex("hello bot", &[0, 0], &[Root, Target]),
        ex("good morning", &[1, 1], &[Quality, Root]),
        ex("hi", &[0], &[Root]),
        ex("how are you", &[0, 2, 0], &[Root, State, Target]),
        ex("how are you feeling", &[0, 2, 0, 2], &[Root, State, Target, State]),
        ex(
            "how are you doing?",
            &[0, 2, 0, 2, 0],
            &[Root, State, Target, State, Question],
        ),
        ex("how you doing", &[0, 2, 0], &[Root, Target, State]),
        ex("I'm feeling sad", &[3, 0, 3, 3], &[Target, State, NoRel, Root]),
        ex(
            "oh I feel anxious now",
            &[0, 3, 1, 3, 3],
            &[NoRel, Target, State, Root, Time],
        ),
        ex(
            "I'm so happy today",
            &[3, 0, 3, 3, 3],
            &[Target, State, NoRel, Root, Time],
        ),
        ex("I'm very angry", &[3, 0, 3, 3], &[Target, State, NoRel, Root]),
        ex(
            "I'm very stressed because of school",
            &[2, 2, 2, 5, 5, 2, 2],
            &[Target, State, NoRel, Root, NoRel, NoRel, Reason],
        ),
        ex(
            "My job is very stressful",
            &[4, 0, 4, 4, 4],
            &[Target, Reason, State, NoRel, Root],
        ),
        ex("I'm not good", &[3, 0, 3, 3], &[Target, State, Attribute, Root]),
        ex(
            "I'm feeling a little down",
            &[5, 0, 5, 4, 5, 5],
            &[Target, State, State, NoRel, NoRel, Root],
        ),
        ex(
            "Today is a bad day",
            &[0, 3, 3, 4, 4],
            &[Time, State, NoRel, Root, Target],
        ),
        ex("Goodbye chatbot", &[0, 0], &[Root, Target]),
        ex(
            "Bye talk to you later",
            &[0, 0, 3, 1, 1],
            &[Root, State, NoRel, Target, Time],
        ),
        ex("Farewell my friend", &[0, 2, 0], &[Root, NoRel, Target]),
        ex("Byebye bot", &[0, 0], &[Root, Target]),
        ex("Sayonara bot", &[0, 0], &[Root, Target]),
        ex(
            "I'm going to sleep goodnight",
            &[4, 0, 4, 4, 5, 5],
            &[Target, State, NoRel, NoRel, State, Root],
        ),
    ]
}

#[derive(Deserialize)]
struct CorpusRow {
    text: String,
    heads: Vec<usize>,
    deps: Vec<String>,
}

/// Extra corpus rows, one JSON object per line:
/// `{"text": "...", "heads": [...], "deps": ["ROOT", ...]}`
/// Lines that fail to parse or don't align with the tokenizer are skipped.
pub fn load_jsonl(path: &Path) -> Result<Vec<TrainExample>> {
    let f = std::fs::File::open(path)?;
    let rdr = std::io::BufReader::new(f);
    let mut out = Vec::new();
    let mut skipped = 0usize;
    for line in rdr.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let Ok(row) = serde_json::from_str::<CorpusRow>(&line) else {
            skipped += 1;
            continue;
        };
        let deps: Vec<RelLabel> = row
            .deps
            .iter()
            .map(|d| RelLabel::parse(d).unwrap_or(RelLabel::NoRel))
            .collect();
        let example = TrainExample {
            text: row.text,
            heads: row.heads,
            deps,
        };
        if example.is_aligned() {
            out.push(example);
        } else {
            skipped += 1;
        }
    }
    if skipped > 0 {
        eprintln!("[data] skipped {skipped} malformed rows in {}", path.display());
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_corpus_aligns_with_tokenizer() {
        for e in builtin_corpus() {
            assert!(e.is_aligned(), "misaligned example: {:?}", e.text);
        }
    }

    #[test]
    fn heads_stay_in_range() {
        for e in builtin_corpus() {
            let n = e.heads.len();
            assert!(e.heads.iter().all(|&h| h < n), "head out of range: {:?}", e.text);
        }
    }

    #[test]
    fn jsonl_loader_keeps_only_well_formed_rows() {
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extra.jsonl");
        let mut f = std::fs::File::create(&path).unwrap();
        // valid
        writeln!(f, r#"{{"text":"hi bot","heads":[0,0],"deps":["ROOT","TARGET"]}}"#).unwrap();
        // not JSON at all
        writeln!(f, "{{not json").unwrap();
        // heads/deps shorter than the tokenized text
        writeln!(f, r#"{{"text":"hi bot","heads":[0],"deps":["ROOT"]}}"#).unwrap();
        // head index outside the utterance
        writeln!(f, r#"{{"text":"hi bot","heads":[100,0],"deps":["ROOT","TARGET"]}}"#).unwrap();
        drop(f);

        let rows = load_jsonl(&path).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].text, "hi bot");
        assert_eq!(rows[0].deps, vec![RelLabel::Root, RelLabel::Target]);
    }

    #[test]
    fn out_of_range_head_is_misaligned() {
        let bad = TrainExample {
            text: "hi bot".into(),
            heads: vec![100, 0],
            deps: vec![RelLabel::Root, RelLabel::Target],
        };
        assert!(!bad.is_aligned());
    }

    #[test]
    fn every_example_has_a_root() {
        for e in builtin_corpus() {
            assert!(
                e.deps.contains(&RelLabel::Root),
                "no ROOT in {:?}",
                e.text
            );
        }
    }
}
