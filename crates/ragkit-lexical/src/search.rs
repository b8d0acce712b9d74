use ragkit_core::types::{SearchHit, SourceKind};

use crate::index::{Bm25Index, Bm25Params};
use crate::tokenize::tokenize;

impl Bm25Index {
    /// Rank the corpus for `query` and return up to `k` hits with
    /// score > 0, best first.
    ///
    /// Score per chunk is the sum over query terms of
    /// `idf(t) * tf*(k1+1) / (tf + k1*(1 - b + b*len/avgdl))` with
    /// `idf(t) = ln((n - df + 0.5)/(df + 0.5) + 1)`. Terms absent from
    /// the corpus contribute zero. Ties break by ascending chunk id so
    /// rankings are fully deterministic.
    pub fn search(&self, query: &str, k: usize, params: &Bm25Params) -> Vec<SearchHit> {
        if self.is_empty() || k == 0 {
            return Vec::new();
        }

        let query_terms = tokenize(query, self.tokenizer_options());
        let n = self.len() as f64;
        let mut scores = vec![0.0f64; self.len()];

        for term in &query_terms {
            let Some(postings) = self.postings.get(term) else {
                continue;
            };
            let df = postings.len() as f64;
            let idf = ((n - df + 0.5) / (df + 0.5) + 1.0).ln();
            for posting in postings {
                let tf = f64::from(posting.tf);
                let len_ratio = if self.avgdl > 0.0 {
                    self.lengths[posting.ordinal] as f64 / self.avgdl
                } else {
                    0.0
                };
                let numerator = tf * (params.k1 + 1.0);
                let denominator = tf + params.k1 * (1.0 - params.b + params.b * len_ratio);
                scores[posting.ordinal] += idf * numerator / denominator;
            }
        }

        let mut ranked: Vec<(usize, f64)> = scores
            .into_iter()
            .enumerate()
            .filter(|(_, score)| *score > 0.0)
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
                source: SourceKind::Lexical,
            })
            .collect()
    }
}
