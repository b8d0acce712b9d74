use std::sync::{Arc, RwLock};
use std::time::Duration;

use tracing::{debug, info, warn};

use ragkit_core::config::RetrievalConfig;
use ragkit_core::traits::{Reranker, SearchEngine};
use ragkit_core::types::{Chunk, Retrieval, ScoredResult};
use ragkit_core::{Error, Result};
use ragkit_lexical::Bm25Params;

use crate::dedup::dedup;
use crate::fusion::fuse;
use crate::rerank::{is_permutation, rerank_with_timeout, NoopReranker};
use crate::snapshot::IndexSnapshot;

/// The retrieval orchestrator.
///
/// Holds the published snapshot behind a lock that is only taken for
/// the pointer swap (writer) or the pointer clone (readers). Every
/// `retrieve()` call binds the snapshot current at call time and scores
/// against its own `Arc`, so rebuilds never disturb in-flight queries
/// and queries share no mutable state.
pub struct HybridRetrievalEngine {
    snapshot: RwLock<Option<Arc<IndexSnapshot>>>,
    reranker: Arc<dyn Reranker>,
    index_config: RetrievalConfig,
}

impl HybridRetrievalEngine {
    /// Engine with no external scorer; reranking is a no-op.
    pub fn new(index_config: RetrievalConfig) -> Self {
        Self::with_reranker(index_config, Arc::new(NoopReranker))
    }

    /// Engine with an injected reranker, selected at construction
    /// rather than sniffed at runtime. `index_config` drives index-time
    /// choices (tokenizer flags); `retrieve()` takes its own config per
    /// call.
    pub fn with_reranker(index_config: RetrievalConfig, reranker: Arc<dyn Reranker>) -> Self {
        Self { snapshot: RwLock::new(None), reranker, index_config }
    }

    /// Full rebuild. Validates, builds a fresh snapshot off to the side
    /// and atomically publishes it. An empty `chunks` slice is allowed
    /// and publishes an empty snapshot.
    pub fn index(&self, chunks: &[Chunk]) -> Result<()> {
        let snapshot = IndexSnapshot::build(chunks, &self.index_config)?;
        info!(chunks = snapshot.len(), "publishing rebuilt index snapshot");
        let mut published = self.snapshot.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        *published = Some(Arc::new(snapshot));
        Ok(())
    }

    /// Score `query` against the current snapshot and return the top-k
    /// results with per-stage scores.
    ///
    /// Pure with respect to engine state: concurrent calls are safe and
    /// a reindex mid-call is invisible to this query. An empty result
    /// list means "nothing relevant found" and is not an error;
    /// [`Error::EmptyIndex`] is returned only when `index()` has never
    /// succeeded.
    pub fn retrieve(&self, query: &str, config: &RetrievalConfig) -> Result<Retrieval> {
        config.validate()?;
        let snapshot = self.current_snapshot().ok_or(Error::EmptyIndex)?;
        if snapshot.is_empty() {
            return Ok(Retrieval::default());
        }

        let window = config.window();
        let params = Bm25Params { k1: config.k1, b: config.b };
        let lexical = snapshot.bm25().search(query, window, &params);
        let vector = snapshot.tfidf().search(query, window);
        debug!(lexical = lexical.len(), vector = vector.len(), "per-index rankings computed");

        let mut fused = fuse(&lexical, &vector, config.k_rrf);
        fused.truncate(window);
        let deduped = dedup(fused, snapshot.tfidf(), config.dedup_threshold);

        let mut results: Vec<ScoredResult> = deduped
            .into_iter()
            .filter_map(|candidate| {
                snapshot.chunk(&candidate.chunk_id).map(|chunk| ScoredResult {
                    chunk_id: candidate.chunk_id,
                    text: chunk.text.clone(),
                    lexical_score: candidate.lexical_score,
                    vector_score: candidate.vector_score,
                    fused_score: candidate.fused_score,
                    final_score: candidate.fused_score,
                    rank: 0,
                })
            })
            .collect();

        let mut rerank_degraded = false;
        if config.use_reranker && !results.is_empty() {
            let timeout = Duration::from_millis(config.rerank_timeout_ms);
            match rerank_with_timeout(&self.reranker, query, results.clone(), timeout) {
                Ok(reranked) if is_permutation(&results, &reranked) => results = reranked,
                Ok(_) => {
                    warn!("reranker violated the permutation contract; keeping fused order");
                    rerank_degraded = true;
                }
                Err(e) => {
                    warn!(error = %e, "rerank failed; keeping fused order");
                    rerank_degraded = true;
                }
            }
        }

        results.retain(|r| r.final_score >= config.relevance_threshold);
        results.truncate(config.top_k);
        for (i, result) in results.iter_mut().enumerate() {
            result.rank = i + 1;
        }

        Ok(Retrieval { results, rerank_degraded })
    }

    fn current_snapshot(&self) -> Option<Arc<IndexSnapshot>> {
        self.snapshot
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl SearchEngine for HybridRetrievalEngine {
    fn index(&self, chunks: &[Chunk]) -> Result<()> {
        Self::index(self, chunks)
    }

    fn retrieve(&self, query: &str, config: &RetrievalConfig) -> Result<Retrieval> {
        Self::retrieve(self, query, config)
    }
}
