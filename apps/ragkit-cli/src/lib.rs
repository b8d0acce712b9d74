//! ragkit-cli
//!
//! Thin front end over the hybrid retrieval engine: walks a directory
//! of `.txt` files, chunks them on paragraph boundaries (standing in
//! for a real chunking pipeline) and answers queries. The index is
//! in-memory by design; persistence is deliberately out of scope.

pub mod ingest;
