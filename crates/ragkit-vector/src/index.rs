use std::collections::HashMap;

use ragkit_core::types::{Chunk, ChunkId};
use ragkit_lexical::tokenize::{tokenize, TokenizerOptions};

/// Sparse term → weight mapping, L2-normalized at build time.
pub type SparseVector = HashMap<String, f64>;

/// TF-IDF vector table over one corpus of chunks.
///
/// Invariant: every stored vector has norm 1, except chunks that
/// tokenize to nothing, which keep the zero vector (norm 0).
#[derive(Debug)]
pub struct TfIdfIndex {
    pub(crate) chunk_ids: Vec<ChunkId>,
    pub(crate) ordinals: HashMap<ChunkId, usize>,
    pub(crate) vectors: Vec<SparseVector>,
    pub(crate) idf: HashMap<String, f64>,
    pub(crate) options: TokenizerOptions,
}

impl TfIdfIndex {
    /// Compute the corpus idf table (`ln((n+1)/(df+1))`), then one
    /// normalized TF-IDF vector per chunk (term frequency divided by
    /// chunk token count).
    pub fn build(chunks: &[Chunk], options: TokenizerOptions) -> Self {
        let n = chunks.len();
        let mut tf_maps: Vec<SparseVector> = Vec::with_capacity(n);
        let mut df: HashMap<String, usize> = HashMap::new();

        for chunk in chunks {
            let tokens = tokenize(&chunk.text, options);
            let total = tokens.len().max(1) as f64;
            let mut counts: SparseVector = HashMap::new();
            for token in tokens {
                *counts.entry(token).or_default() += 1.0;
            }
            for (term, count) in &mut counts {
                *df.entry(term.clone()).or_insert(0) += 1;
                *count /= total;
            }
            tf_maps.push(counts);
        }

        let idf: HashMap<String, f64> = df
            .into_iter()
            .map(|(term, d)| {
                let weight = ((n as f64 + 1.0) / (d as f64 + 1.0)).ln();
                (term, weight)
            })
            .collect();

        let mut chunk_ids = Vec::with_capacity(n);
        let mut ordinals = HashMap::with_capacity(n);
        let mut vectors = Vec::with_capacity(n);
        for (ordinal, (chunk, tf)) in chunks.iter().zip(tf_maps).enumerate() {
            chunk_ids.push(chunk.id.clone());
            ordinals.insert(chunk.id.clone(), ordinal);
            let mut vector: SparseVector = tf
                .into_iter()
                .map(|(term, freq)| {
                    let weight = freq * idf.get(&term).copied().unwrap_or(0.0);
                    (term, weight)
                })
                .collect();
            normalize(&mut vector);
            vectors.push(vector);
        }

        Self { chunk_ids, ordinals, vectors, idf, options }
    }

    pub fn len(&self) -> usize {
        self.chunk_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunk_ids.is_empty()
    }

    /// The normalized vector for a chunk, if the id was indexed.
    pub fn vector(&self, chunk_id: &str) -> Option<&SparseVector> {
        self.ordinals.get(chunk_id).map(|&ordinal| &self.vectors[ordinal])
    }

    /// Cosine similarity between two indexed chunks. Unknown ids and
    /// degenerate (empty) chunks yield 0.
    pub fn similarity(&self, a: &str, b: &str) -> f64 {
        match (self.vector(a), self.vector(b)) {
            (Some(va), Some(vb)) => dot(va, vb),
            _ => 0.0,
        }
    }
}

/// Scale to unit norm. The zero vector stays zero.
pub(crate) fn normalize(vector: &mut SparseVector) {
    let norm = vector.values().map(|w| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for weight in vector.values_mut() {
            *weight /= norm;
        }
    }
}

/// Dot product of two sparse vectors; cosine when both are normalized.
pub(crate) fn dot(a: &SparseVector, b: &SparseVector) -> f64 {
    // Iterate the smaller map.
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small
        .iter()
        .filter_map(|(term, wa)| large.get(term).map(|wb| wa * wb))
        .sum()
}
