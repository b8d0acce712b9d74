use std::env;
use std::path::PathBuf;

use ragkit_cli::ingest::chunks_from_directory;
use ragkit_core::config::RetrievalConfig;
use ragkit_hybrid::{HybridRetrievalEngine, TermOverlapReranker};

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    if args.is_empty() {
        eprintln!("Usage: {prog} <ingest|query> [args...]");
        eprintln!("  ingest <data_dir>            index and report chunk counts");
        eprintln!("  query <data_dir> \"<query>\"   index then retrieve");
        std::process::exit(1);
    }
    let cmd = args.remove(0);
    (cmd, args)
}

fn build_engine(config: &RetrievalConfig) -> HybridRetrievalEngine {
    HybridRetrievalEngine::with_reranker(
        config.clone(),
        std::sync::Arc::new(TermOverlapReranker),
    )
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = RetrievalConfig::load().map_err(|e| {
        eprintln!("Error loading config: {e}");
        e
    })?;
    let (cmd, args) = parse_args();
    match cmd.as_str() {
        "ingest" => {
            let data_dir = args.first().map(PathBuf::from).unwrap_or_else(|| {
                eprintln!("Usage: ragkit ingest <data_dir>");
                std::process::exit(1)
            });
            println!("Ingesting from {}", data_dir.display());
            let chunks = chunks_from_directory(&data_dir)?;
            let engine = build_engine(&config);
            engine.index(&chunks)?;
            println!("✅ Ingest complete ({} chunks)", chunks.len());
        }
        "query" => {
            let data_dir = args.first().map(PathBuf::from).unwrap_or_else(|| {
                eprintln!("Usage: ragkit query <data_dir> \"<query>\"");
                std::process::exit(1)
            });
            let query_text = args.get(1).cloned().unwrap_or_else(|| {
                eprintln!("Usage: ragkit query <data_dir> \"<query>\"");
                std::process::exit(1)
            });
            let chunks = chunks_from_directory(&data_dir)?;
            let engine = build_engine(&config);
            engine.index(&chunks)?;

            let retrieval = engine.retrieve(&query_text, &config)?;
            if retrieval.is_empty() {
                // Empty is a normal outcome; downstream callers emit an
                // explicit no-answer response instead of fabricating one.
                println!("No relevant information found for: \"{query_text}\"");
                return Ok(());
            }
            if retrieval.rerank_degraded {
                println!("⚠️  reranker unavailable; showing fused order");
            }
            println!("🔍 {} results for: \"{}\"", retrieval.results.len(), query_text);
            for result in &retrieval.results {
                println!(
                    "\n  {}. id={}  lexical={:.4}  vector={:.4}  fused={:.4}  final={:.4}",
                    result.rank,
                    result.chunk_id,
                    result.lexical_score,
                    result.vector_score,
                    result.fused_score,
                    result.final_score,
                );
                let snippet: String = result.text.chars().take(120).collect();
                println!("     📝 {snippet}");
            }
        }
        _ => {
            eprintln!("Unknown command: {cmd}");
            std::process::exit(1);
        }
    }
    Ok(())
}
