use crate::config::RetrievalConfig;
use crate::types::{Chunk, Retrieval, ScoredResult};

/// The surface the orchestrator exposes to callers.
pub trait SearchEngine: Send + Sync {
    /// Full rebuild: validate `chunks`, build a fresh snapshot and
    /// atomically publish it. Never mutates a published snapshot.
    fn index(&self, chunks: &[Chunk]) -> crate::Result<()>;

    /// Score `query` against the current snapshot. Read-only; safe to
    /// call concurrently.
    fn retrieve(&self, query: &str, config: &RetrievalConfig) -> crate::Result<Retrieval>;
}

/// Secondary scorer applied to the post-dedup candidate window.
///
/// Contract: the returned list is a permutation of the input set with
/// updated `final_score`s. Members must never be added or removed; the
/// engine treats a violation the same as [`crate::Error::RerankUnavailable`]
/// and keeps the pre-rerank order.
pub trait Reranker: Send + Sync {
    fn rerank(&self, query: &str, candidates: Vec<ScoredResult>)
        -> crate::Result<Vec<ScoredResult>>;
}
