// Corpus preparation — collocation merging, vocabulary, sparse encoding.
//
// Everything here is deterministic and side-effect free: the same documents
// and parameters always produce byte-identical output.

pub mod collocation;
pub mod encoding;
pub mod vocabulary;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};

/// A document is an ordered sequence of normalized tokens, produced by the
/// upstream tokenizer/lemmatizer. Immutable once loaded.
pub type Document = Vec<String>;

/// Load tokenized documents from a JSON-lines file: one JSON array of token
/// strings per line. Blank lines are skipped.
pub fn load_documents(path: &Path) -> Result<Vec<Document>> {
    let file = File::open(path)
        .with_context(|| format!("cannot open document file: {}", path.display()))?;

    let mut documents = Vec::new();
    for (line_no, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let tokens: Document = serde_json::from_str(&line)
            .with_context(|| format!("{}:{} is not a JSON token array", path.display(), line_no + 1))?;
        documents.push(tokens);
    }

    Ok(documents)
}
