use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;

use crate::error::{Error, Result};

/// Every tunable of the retrieval pipeline in one place, with stated
/// defaults. Loadable from `config.toml` (`[retrieval]` table) plus
/// `APP_RETRIEVAL__*` environment variables; see [`RetrievalConfig::load`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Number of results returned by `retrieve()`. Must be > 0.
    pub top_k: usize,
    /// Candidate window multiplier applied before dedup/rerank.
    /// Window size is `top_k * oversample_factor`. Must be >= 1.
    pub oversample_factor: usize,
    /// Results with `final_score` below this are dropped. Scores are
    /// RRF-scale unless a reranker rescored them.
    pub relevance_threshold: f64,
    /// Pairwise similarity at or above this marks a near-duplicate.
    pub dedup_threshold: f64,
    /// Whether `retrieve()` invokes the configured reranker.
    pub use_reranker: bool,
    /// Upper bound on one reranker invocation, in milliseconds.
    pub rerank_timeout_ms: u64,
    /// RRF smoothing constant. Higher values flatten the influence of
    /// top ranks from any single list.
    pub k_rrf: u32,
    /// BM25 term-frequency saturation parameter.
    pub k1: f64,
    /// BM25 document-length normalization parameter.
    pub b: f64,
    /// Drop English stop words during tokenization. Applies at index
    /// time; queries follow whatever the snapshot was built with.
    pub remove_stopwords: bool,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            oversample_factor: 3,
            relevance_threshold: 0.01,
            dedup_threshold: 0.7,
            use_reranker: false,
            rerank_timeout_ms: 500,
            k_rrf: 60,
            k1: 1.5,
            b: 0.75,
            remove_stopwords: false,
        }
    }
}

impl RetrievalConfig {
    /// Load from `config.toml` + `config.<env>.toml` (selected by
    /// `RUST_ENV`) + `APP_RETRIEVAL__*` env vars, on top of the defaults.
    /// Missing files and missing keys fall back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::from(Serialized::defaults(ConfigFile::default()))
            .merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        // Double underscore separates nesting so APP_RETRIEVAL__TOP_K
        // maps to retrieval.top_k without splitting snake_case keys.
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let file: ConfigFile = figment
            .extract()
            .map_err(|e| anyhow::anyhow!("Failed to load retrieval config: {e}"))?;
        file.retrieval.validate()?;
        Ok(file.retrieval)
    }

    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(Error::InvalidConfig("top_k must be > 0".into()));
        }
        if self.oversample_factor == 0 {
            return Err(Error::InvalidConfig("oversample_factor must be >= 1".into()));
        }
        if !(self.k1 > 0.0 && self.k1.is_finite()) {
            return Err(Error::InvalidConfig(format!("k1 must be positive, got {}", self.k1)));
        }
        if !(0.0..=1.0).contains(&self.b) {
            return Err(Error::InvalidConfig(format!("b must be within [0, 1], got {}", self.b)));
        }
        if !self.relevance_threshold.is_finite() {
            return Err(Error::InvalidConfig("relevance_threshold must be finite".into()));
        }
        if !(0.0..=1.0).contains(&self.dedup_threshold) {
            return Err(Error::InvalidConfig(format!(
                "dedup_threshold must be within [0, 1], got {}",
                self.dedup_threshold
            )));
        }
        Ok(())
    }

    /// Candidate window considered before dedup, rerank and gating.
    pub fn window(&self) -> usize {
        self.top_k * self.oversample_factor
    }
}

/// Top-level shape of `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    retrieval: RetrievalConfig,
}
