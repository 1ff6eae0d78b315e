//! Scored objects and their JSON Lines encoding.
//!
//! Each line of a dataset file is one object:
//!
//! ```text
//! {"name": "Apt1", "scores": {"balcony": 1, "price__low": 0.6}}
//! ```

use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};

use serde::{Deserialize, Serialize};

/// A candidate object with its per-atom scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredObject {
    pub name: String,
    #[serde(default)]
    pub scores: BTreeMap<String, f64>,
}

impl ScoredObject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scores: BTreeMap::new(),
        }
    }

    /// Builder-style score insert.
    pub fn score(mut self, atom: impl Into<String>, value: f64) -> Self {
        self.scores.insert(atom.into(), value);
        self
    }
}

/// Error type for dataset operations.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error at line {line}: {source}")]
    Json {
        line: usize,
        source: serde_json::Error,
    },
}

/// Result alias for dataset operations.
pub type Result<T> = std::result::Result<T, DatasetError>;

/// Writes objects as JSONL to the given writer.
pub fn write_jsonl<W: Write>(writer: &mut W, objects: &[ScoredObject]) -> Result<()> {
    for (i, obj) in objects.iter().enumerate() {
        serde_json::to_writer(&mut *writer, obj)
            .map_err(|e| DatasetError::Json { line: i + 1, source: e })?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Returns an iterator that reads objects from a JSONL reader.
///
/// Empty lines are skipped.
pub fn read_jsonl<R: BufRead>(reader: R) -> JsonlIter<R> {
    JsonlIter {
        reader,
        line_number: 0,
    }
}

/// Reads every object of a JSONL reader, stopping at the first error.
pub fn read_all<R: BufRead>(reader: R) -> Result<Vec<ScoredObject>> {
    read_jsonl(reader).collect()
}

/// Iterator over JSONL-encoded objects.
pub struct JsonlIter<R> {
    reader: R,
    line_number: usize,
}

impl<R: BufRead> Iterator for JsonlIter<R> {
    type Item = Result<ScoredObject>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = String::new();
        loop {
            line.clear();
            match self.reader.read_line(&mut line) {
                Ok(0) => return None,
                Ok(_) => {
                    self.line_number += 1;
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    return Some(serde_json::from_str(trimmed).map_err(|e| {
                        DatasetError::Json {
                            line: self.line_number,
                            source: e,
                        }
                    }));
                }
                Err(e) => return Some(Err(DatasetError::Io(e))),
            }
        }
    }
}
