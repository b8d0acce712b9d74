//! Near-duplicate removal over the fused candidate window.
//!
//! Similarity metric: cosine over the snapshot's normalized TF-IDF
//! chunk vectors, reusing what the vector index already built. Tests
//! elsewhere assert the threshold contract, not the metric itself.

use ragkit_vector::TfIdfIndex;

use crate::fusion::FusedCandidate;

/// Walk `candidates` in score order, dropping any whose similarity to
/// an already-accepted chunk is at or above `threshold`. Stable: the
/// relative order of survivors is unchanged, so a lower-ranked
/// duplicate can never displace its higher-ranked original.
///
/// Quadratic in the window size, which the caller bounds via the
/// oversample factor, never the full corpus.
pub fn dedup(
    candidates: Vec<FusedCandidate>,
    tfidf: &TfIdfIndex,
    threshold: f64,
) -> Vec<FusedCandidate> {
    let mut accepted: Vec<FusedCandidate> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let duplicate = accepted
            .iter()
            .any(|kept| tfidf.similarity(&candidate.chunk_id, &kept.chunk_id) >= threshold);
        if !duplicate {
            accepted.push(candidate);
        }
    }
    accepted
}
