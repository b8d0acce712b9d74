use ragkit_core::types::{SearchHit, SourceKind};
use ragkit_lexical::tokenize::tokenize;

use crate::index::{dot, normalize, SparseVector, TfIdfIndex};

impl TfIdfIndex {
    /// Build the query's TF-IDF vector against the corpus idf table.
    /// Out-of-vocabulary query terms get zero weight (they are simply
    /// absent from the sparse map).
    pub fn query_vector(&self, query: &str) -> SparseVector {
        let tokens = tokenize(query, self.options);
        let total = tokens.len().max(1) as f64;
        let mut counts: SparseVector = std::collections::HashMap::new();
        for token in tokens {
            *counts.entry(token).or_default() += 1.0;
        }
        let mut vector: SparseVector = counts
            .into_iter()
            .filter_map(|(term, count)| {
                self.idf.get(&term).map(|idf| (term, count / total * idf))
            })
            .collect();
        normalize(&mut vector);
        vector
    }

    /// Rank the corpus by cosine similarity to `query`, returning up to
    /// `k` hits with similarity > 0, best first. Deterministic: equal
    /// similarities break by ascending chunk id.
    pub fn search(&self, query: &str, k: usize) -> Vec<SearchHit> {
        if self.is_empty() || k == 0 {
            return Vec::new();
        }
        let query_vector = self.query_vector(query);
        if query_vector.is_empty() {
            return Vec::new();
        }

        let mut ranked: Vec<(usize, f64)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(ordinal, vector)| (ordinal, dot(&query_vector, vector)))
            .filter(|(_, similarity)| *similarity > 0.0)
            .collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| self.chunk_ids[a.0].cmp(&self.chunk_ids[b.0]))
        });
        ranked.truncate(k);

        ranked
            .into_iter()
            .enumerate()
            .map(|(i, (ordinal, score))| SearchHit {
                id: self.chunk_ids[ordinal].clone(),
                score,
                rank: i + 1,
                source: SourceKind::Vector,
            })
            .collect()
    }
}
