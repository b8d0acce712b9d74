use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Index is empty: call index() before retrieve()")]
    EmptyIndex,

    /// Non-fatal: the engine falls back to pre-rerank ordering.
    #[error("Reranker unavailable: {0}")]
    RerankUnavailable(String),
}

pub type Result<T> = std::result::Result<T, Error>;
