// Pipeline orchestration — corpus preparation and the topic-count search.
//
// Preparation fails fast: emptiness at any stage (input, vocabulary,
// encodings) is detected here, before any expensive training starts.

pub mod search;

use tracing::info;

use crate::corpus::collocation::{CollocationModel, CollocationParams};
use crate::corpus::encoding::{encode_all, EncodedDocument};
use crate::corpus::vocabulary::{Vocabulary, VocabularyParams};
use crate::corpus::Document;
use crate::error::{PipelineError, Result};

/// Everything the training/search stages consume: the collocation-merged
/// documents, the filtered vocabulary, and the sparse encodings. All fields
/// are read-only shared inputs from here on.
#[derive(Debug)]
pub struct PreparedCorpus {
    pub collocations: CollocationModel,
    /// Collocation-merged token sequences (the coherence metric needs these)
    pub documents: Vec<Document>,
    pub vocabulary: Vocabulary,
    pub encoded: Vec<EncodedDocument>,
}

/// Run collocation detection, vocabulary construction, and encoding.
///
/// Errors with `EmptyInput` when the collection is empty, when filtering
/// removes every token, or when no document retains an in-vocabulary token.
pub fn prepare(
    documents: &[Document],
    collocation: &CollocationParams,
    vocabulary: &VocabularyParams,
) -> Result<PreparedCorpus> {
    if documents.is_empty() {
        return Err(PipelineError::empty_input("no documents supplied"));
    }

    let collocations = CollocationModel::detect(documents, collocation);
    let merged = collocations.apply_all(documents);

    let vocab = Vocabulary::build(&merged, vocabulary)?;
    if vocab.is_empty() {
        return Err(PipelineError::empty_input(
            "vocabulary filtering removed every token",
        ));
    }

    let encoded = encode_all(&merged, &vocab);
    if encoded.iter().all(EncodedDocument::is_empty) {
        return Err(PipelineError::empty_input(
            "no document retains an in-vocabulary token",
        ));
    }

    info!(
        documents = merged.len(),
        vocabulary = vocab.len(),
        collocation_rules = collocations.len(),
        "Corpus prepared"
    );

    Ok(PreparedCorpus {
        collocations,
        documents: merged,
        vocabulary: vocab,
        encoded,
    })
}
