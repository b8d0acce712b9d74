//! Domain types shared by the lexical, vector and hybrid engines.

use serde::{Deserialize, Serialize};

pub type ChunkId = String;

/// A chunk of a source document that is independently indexed.
///
/// - `id`: unique chunk identifier within one `index()` call
/// - `doc_id`: stable identity of the parent document
/// - `text`: the text payload, never empty once indexed
/// - `position`: ordinal of the chunk within the parent document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub id: ChunkId,
    pub doc_id: String,
    pub text: String,
    pub position: usize,
}

impl Chunk {
    pub fn new(
        id: impl Into<ChunkId>,
        doc_id: impl Into<String>,
        text: impl Into<String>,
        position: usize,
    ) -> Self {
        Self { id: id.into(), doc_id: doc_id.into(), text: text.into(), position }
    }
}

/// Indicates which index produced a ranked hit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SourceKind {
    Lexical,
    Vector,
}

/// One entry of a single index's ranking.
///
/// `id` matches `Chunk::id`. `score` is index-specific but higher is
/// always better. `rank` is 1-based, 1 = best.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: ChunkId,
    pub score: f64,
    pub rank: usize,
    pub source: SourceKind,
}

/// A fully scored retrieval result, carrying every stage's score so
/// downstream consumers can see why a chunk ranked where it did.
///
/// `final_score` equals `fused_score` unless a reranker rescored the
/// candidate. Results are per-query and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredResult {
    pub chunk_id: ChunkId,
    pub text: String,
    pub lexical_score: f64,
    pub vector_score: f64,
    pub fused_score: f64,
    pub final_score: f64,
    pub rank: usize,
}

/// The answer to one `retrieve()` call.
///
/// An empty `results` list is a normal outcome ("nothing relevant
/// found"), distinct from any error. `rerank_degraded` is set when a
/// requested rerank failed or timed out and the pre-rerank order was
/// kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Retrieval {
    pub results: Vec<ScoredResult>,
    pub rerank_degraded: bool,
}

impl Retrieval {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
