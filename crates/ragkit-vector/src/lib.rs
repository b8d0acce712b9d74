//! ragkit-vector
//!
//! TF-IDF vector space over a chunk corpus with cosine-similarity
//! search. Shares its tokenizer with `ragkit-lexical` so both spaces
//! see the same vocabulary. Built in full per snapshot; immutable and
//! deterministic afterwards.

pub mod index;
pub mod search;

pub use index::TfIdfIndex;
