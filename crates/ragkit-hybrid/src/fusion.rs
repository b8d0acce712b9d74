//! Reciprocal Rank Fusion: fused(chunk) = Σ_list 1/(k_rrf + rank).
//!
//! Rank-based, so the lexical and vector scores never need to be
//! normalized against each other. A chunk absent from one list simply
//! receives no contribution from it, rather than a worst-rank penalty.

use std::collections::HashMap;

use ragkit_core::types::{ChunkId, SearchHit};

/// A candidate after fusion, still carrying both raw per-index scores
/// for observability.
#[derive(Debug, Clone)]
pub struct FusedCandidate {
    pub chunk_id: ChunkId,
    pub lexical_score: f64,
    pub vector_score: f64,
    pub fused_score: f64,
}

/// Fuse the lexical and vector rankings over the union of their chunks,
/// ordered by fused score descending. Equal fused scores break by
/// ascending chunk id so the output order is fully deterministic.
pub fn fuse(lexical: &[SearchHit], vector: &[SearchHit], k_rrf: u32) -> Vec<FusedCandidate> {
    let mut by_id: HashMap<ChunkId, FusedCandidate> = HashMap::new();

    for hit in lexical {
        let entry = by_id.entry(hit.id.clone()).or_insert_with(|| FusedCandidate {
            chunk_id: hit.id.clone(),
            lexical_score: 0.0,
            vector_score: 0.0,
            fused_score: 0.0,
        });
        entry.lexical_score = hit.score;
        entry.fused_score += 1.0 / (f64::from(k_rrf) + hit.rank as f64);
    }
    for hit in vector {
        let entry = by_id.entry(hit.id.clone()).or_insert_with(|| FusedCandidate {
            chunk_id: hit.id.clone(),
            lexical_score: 0.0,
            vector_score: 0.0,
            fused_score: 0.0,
        });
        entry.vector_score = hit.score;
        entry.fused_score += 1.0 / (f64::from(k_rrf) + hit.rank as f64);
    }

    let mut fused: Vec<FusedCandidate> = by_id.into_values().collect();
    fused.sort_by(|a, b| {
        b.fused_score
            .partial_cmp(&a.fused_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.chunk_id.cmp(&b.chunk_id))
    });
    fused
}

#[cfg(test)]
mod tests {
    use super::*;
    use ragkit_core::types::SourceKind;

    fn hits(source: SourceKind, ids: &[&str]) -> Vec<SearchHit> {
        ids.iter()
            .enumerate()
            .map(|(i, id)| SearchHit {
                id: (*id).to_string(),
                score: 1.0 / (i + 1) as f64,
                rank: i + 1,
                source,
            })
            .collect()
    }

    #[test]
    fn top_of_both_lists_tops_the_fusion() {
        let lexical = hits(SourceKind::Lexical, &["a", "b", "c"]);
        let vector = hits(SourceKind::Vector, &["a", "c", "b"]);
        let fused = fuse(&lexical, &vector, 60);
        assert_eq!(fused[0].chunk_id, "a");
    }

    #[test]
    fn union_includes_single_list_members() {
        let lexical = hits(SourceKind::Lexical, &["a", "b"]);
        let vector = hits(SourceKind::Vector, &["c"]);
        let fused = fuse(&lexical, &vector, 60);
        assert_eq!(fused.len(), 3);
        assert!(fused.iter().any(|c| c.chunk_id == "c"));
    }

    #[test]
    fn absence_contributes_zero_not_worst_rank() {
        // "b" is rank 2 lexically and absent from the vector list; its
        // fused score must be exactly the one contribution.
        let lexical = hits(SourceKind::Lexical, &["a", "b"]);
        let vector = hits(SourceKind::Vector, &["a"]);
        let fused = fuse(&lexical, &vector, 60);
        let b = fused.iter().find(|c| c.chunk_id == "b").expect("b fused");
        assert!((b.fused_score - 1.0 / 62.0).abs() < 1e-12);
    }

    #[test]
    fn equal_scores_tie_break_by_ascending_id() {
        // Both chunks appear only once at rank 1 of one list each.
        let lexical = hits(SourceKind::Lexical, &["z"]);
        let vector = hits(SourceKind::Vector, &["m"]);
        let fused = fuse(&lexical, &vector, 60);
        assert_eq!(fused[0].chunk_id, "m");
        assert_eq!(fused[1].chunk_id, "z");
    }

    #[test]
    fn raw_scores_are_carried_through() {
        let lexical = hits(SourceKind::Lexical, &["a"]);
        let vector = hits(SourceKind::Vector, &["a"]);
        let fused = fuse(&lexical, &vector, 60);
        assert!((fused[0].lexical_score - 1.0).abs() < 1e-12);
        assert!((fused[0].vector_score - 1.0).abs() < 1e-12);
        assert!((fused[0].fused_score - 2.0 / 61.0).abs() < 1e-12);
    }
}
