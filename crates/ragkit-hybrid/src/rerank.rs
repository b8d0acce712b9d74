//! Reranker implementations and the bounded-time invocation helper.
//!
//! The engine never lets a reranker fail or stall a query: errors,
//! timeouts and contract violations all fall back to the pre-rerank
//! ordering with the degraded flag set.

use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use ragkit_core::traits::Reranker;
use ragkit_core::types::ScoredResult;
use ragkit_core::{Error, Result};
use ragkit_lexical::{tokenize, TokenizerOptions};

/// Leaves candidates untouched. The default when no external scorer is
/// configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReranker;

impl Reranker for NoopReranker {
    fn rerank(&self, _query: &str, candidates: Vec<ScoredResult>) -> Result<Vec<ScoredResult>> {
        Ok(candidates)
    }
}

/// Reorders candidates by raw query-term frequency in the chunk text,
/// a cheap stand-in for a cross-encoder. Rescores `final_score` to the
/// overlap count; order ties keep the incoming (fused) order.
#[derive(Debug, Default, Clone, Copy)]
pub struct TermOverlapReranker;

impl Reranker for TermOverlapReranker {
    fn rerank(&self, query: &str, mut candidates: Vec<ScoredResult>) -> Result<Vec<ScoredResult>> {
        let query_terms = tokenize(query, TokenizerOptions::default());
        for candidate in &mut candidates {
            let text_tokens = tokenize(&candidate.text, TokenizerOptions::default());
            let overlap = text_tokens.iter().filter(|t| query_terms.contains(t)).count();
            candidate.final_score = overlap as f64;
        }
        candidates.sort_by(|a, b| {
            b.final_score.partial_cmp(&a.final_score).unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(candidates)
    }
}

/// Run `reranker` on a helper thread, waiting at most `timeout`.
///
/// On timeout the helper is abandoned (its result is discarded when it
/// eventually finishes); the caller falls back to pre-rerank order.
pub fn rerank_with_timeout(
    reranker: &Arc<dyn Reranker>,
    query: &str,
    candidates: Vec<ScoredResult>,
    timeout: Duration,
) -> Result<Vec<ScoredResult>> {
    let (tx, rx) = mpsc::channel();
    let worker = Arc::clone(reranker);
    let query = query.to_string();
    thread::spawn(move || {
        let outcome = worker.rerank(&query, candidates);
        // Receiver may be gone after a timeout; nothing to do then.
        let _ = tx.send(outcome);
    });

    match rx.recv_timeout(timeout) {
        Ok(outcome) => outcome,
        Err(mpsc::RecvTimeoutError::Timeout) => Err(Error::RerankUnavailable(format!(
            "timed out after {}ms",
            timeout.as_millis()
        ))),
        Err(mpsc::RecvTimeoutError::Disconnected) => {
            Err(Error::RerankUnavailable("reranker panicked".into()))
        }
    }
}

/// The permutation contract: same member set, nothing added, removed or
/// duplicated.
pub fn is_permutation(before: &[ScoredResult], after: &[ScoredResult]) -> bool {
    if before.len() != after.len() {
        return false;
    }
    let mut expected: Vec<&str> = before.iter().map(|r| r.chunk_id.as_str()).collect();
    let mut actual: Vec<&str> = after.iter().map(|r| r.chunk_id.as_str()).collect();
    expected.sort_unstable();
    actual.sort_unstable();
    expected == actual
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(id: &str, text: &str, fused: f64) -> ScoredResult {
        ScoredResult {
            chunk_id: id.to_string(),
            text: text.to_string(),
            lexical_score: 0.0,
            vector_score: 0.0,
            fused_score: fused,
            final_score: fused,
            rank: 0,
        }
    }

    #[test]
    fn noop_preserves_order_and_scores() {
        let input = vec![result("a", "x", 0.9), result("b", "y", 0.5)];
        let output = NoopReranker.rerank("q", input.clone()).expect("noop");
        assert_eq!(output.len(), 2);
        assert_eq!(output[0].chunk_id, "a");
        assert!((output[0].final_score - 0.9).abs() < 1e-12);
    }

    #[test]
    fn term_overlap_promotes_denser_match() {
        let input = vec![
            result("a", "rust mentioned once", 0.9),
            result("b", "rust rust rust everywhere rust", 0.5),
        ];
        let output = TermOverlapReranker.rerank("rust", input).expect("rerank");
        assert_eq!(output[0].chunk_id, "b");
        assert!((output[0].final_score - 4.0).abs() < 1e-12);
    }

    #[test]
    fn timeout_reports_unavailable() {
        struct SlowReranker;
        impl Reranker for SlowReranker {
            fn rerank(
                &self,
                _query: &str,
                candidates: Vec<ScoredResult>,
            ) -> Result<Vec<ScoredResult>> {
                thread::sleep(Duration::from_millis(200));
                Ok(candidates)
            }
        }
        let reranker: Arc<dyn Reranker> = Arc::new(SlowReranker);
        let outcome = rerank_with_timeout(
            &reranker,
            "q",
            vec![result("a", "x", 0.9)],
            Duration::from_millis(10),
        );
        assert!(matches!(outcome, Err(Error::RerankUnavailable(_))));
    }

    #[test]
    fn permutation_check_catches_member_changes() {
        let before = vec![result("a", "x", 0.9), result("b", "y", 0.5)];
        let same = vec![result("b", "y", 0.5), result("a", "x", 0.9)];
        assert!(is_permutation(&before, &same));

        let dropped = vec![result("a", "x", 0.9)];
        assert!(!is_permutation(&before, &dropped));

        let swapped = vec![result("a", "x", 0.9), result("c", "z", 0.5)];
        assert!(!is_permutation(&before, &swapped));

        let duplicated = vec![result("a", "x", 0.9), result("a", "x", 0.9)];
        assert!(!is_permutation(&before, &duplicated));
    }
}
