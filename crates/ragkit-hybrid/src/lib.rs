//! ragkit-hybrid
//!
//! The retrieval orchestrator: fuses the BM25 and TF-IDF rankings with
//! reciprocal rank fusion, removes near-duplicates, optionally reranks,
//! gates low-relevance results and returns fully scored results. Index
//! state lives in an immutable snapshot that `index()` replaces
//! atomically, so queries never observe a partial rebuild.

pub mod dedup;
pub mod engine;
pub mod fusion;
pub mod rerank;
pub mod snapshot;

pub use engine::HybridRetrievalEngine;
pub use rerank::{NoopReranker, TermOverlapReranker};
pub use snapshot::IndexSnapshot;
