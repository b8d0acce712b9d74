use std::collections::HashMap;

use ragkit_core::types::{Chunk, ChunkId};
use serde::{Deserialize, Serialize};

use crate::tokenize::{tokenize, TokenizerOptions};

/// BM25 scoring parameters.
///
/// `k1` controls term-frequency saturation, `b` controls document-length
/// normalization.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bm25Params {
    pub k1: f64,
    pub b: f64,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self { k1: 1.5, b: 0.75 }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Posting {
    /// Ordinal of the chunk within this index's build order.
    pub ordinal: usize,
    /// Term frequency within that chunk.
    pub tf: u32,
}

/// Inverted-index term statistics over one corpus of chunks.
///
/// Built in full by [`Bm25Index::build`] and immutable afterwards.
/// Document frequency is implicit in each posting list's length.
#[derive(Debug)]
pub struct Bm25Index {
    pub(crate) chunk_ids: Vec<ChunkId>,
    pub(crate) postings: HashMap<String, Vec<Posting>>,
    pub(crate) lengths: Vec<usize>,
    pub(crate) avgdl: f64,
    pub(crate) options: TokenizerOptions,
}

impl Bm25Index {
    /// Tokenize every chunk and build postings, per-chunk lengths and the
    /// corpus average length. An empty `chunks` slice builds an empty
    /// index that scores every query to an empty ranking.
    pub fn build(chunks: &[Chunk], options: TokenizerOptions) -> Self {
        let mut chunk_ids = Vec::with_capacity(chunks.len());
        let mut postings: HashMap<String, Vec<Posting>> = HashMap::new();
        let mut lengths = Vec::with_capacity(chunks.len());

        for (ordinal, chunk) in chunks.iter().enumerate() {
            let tokens = tokenize(&chunk.text, options);
            lengths.push(tokens.len());
            chunk_ids.push(chunk.id.clone());

            let mut tf: HashMap<String, u32> = HashMap::new();
            for token in tokens {
                *tf.entry(token).or_default() += 1;
            }
            for (term, count) in tf {
                postings.entry(term).or_default().push(Posting { ordinal, tf: count });
            }
        }

        let avgdl = if lengths.is_empty() {
            0.0
        } else {
            let total: usize = lengths.iter().sum();
            total as f64 / lengths.len() as f64
        };

        Self { chunk_ids, postings, lengths, avgdl, options }
    }

    /// Number of indexed chunks.
    pub fn len(&self) -> usize {
        self.chunk_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunk_ids.is_empty()
    }

    /// Options the index was built with; queries must tokenize the same way.
    pub fn tokenizer_options(&self) -> TokenizerOptions {
        self.options
    }
}
