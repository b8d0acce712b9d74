use std::collections::HashMap;

use ragkit_core::config::RetrievalConfig;
use ragkit_core::types::{Chunk, ChunkId};
use ragkit_core::{Error, Result};
use ragkit_lexical::{Bm25Index, TokenizerOptions};
use ragkit_vector::TfIdfIndex;

/// One fully built, immutable index state: the chunk set plus both
/// per-corpus indexes, always built from the same chunk slice with the
/// same tokenizer options.
///
/// Snapshots are only ever handed out behind an `Arc`; reindexing
/// builds a new snapshot off to the side and swaps the published
/// reference, so no published snapshot is ever mutated.
#[derive(Debug)]
pub struct IndexSnapshot {
    chunks: HashMap<ChunkId, Chunk>,
    bm25: Bm25Index,
    tfidf: TfIdfIndex,
}

impl IndexSnapshot {
    /// Validate `chunks` and build both indexes.
    ///
    /// Validation errors (empty text, duplicate ids) fail the whole
    /// call; nothing is partially indexed.
    pub fn build(chunks: &[Chunk], config: &RetrievalConfig) -> Result<Self> {
        let mut by_id: HashMap<ChunkId, Chunk> = HashMap::with_capacity(chunks.len());
        for chunk in chunks {
            if chunk.text.trim().is_empty() {
                return Err(Error::Validation(format!("chunk '{}' has empty text", chunk.id)));
            }
            if by_id.insert(chunk.id.clone(), chunk.clone()).is_some() {
                return Err(Error::Validation(format!("duplicate chunk id '{}'", chunk.id)));
            }
        }

        let options = TokenizerOptions { remove_stopwords: config.remove_stopwords };
        Ok(Self {
            chunks: by_id,
            bm25: Bm25Index::build(chunks, options),
            tfidf: TfIdfIndex::build(chunks, options),
        })
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn chunk(&self, id: &str) -> Option<&Chunk> {
        self.chunks.get(id)
    }

    pub fn bm25(&self) -> &Bm25Index {
        &self.bm25
    }

    pub fn tfidf(&self) -> &TfIdfIndex {
        &self.tfidf
    }
}
