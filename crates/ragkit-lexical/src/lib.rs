//! ragkit-lexical
//!
//! In-memory inverted index with BM25 scoring. Built in full by every
//! `index()` call; a built index is immutable and safe to share across
//! concurrent queries. See `index` and `search` modules.

pub mod index;
pub mod search;
pub mod tokenize;

pub use index::{Bm25Index, Bm25Params};
pub use tokenize::{tokenize, TokenizerOptions};
