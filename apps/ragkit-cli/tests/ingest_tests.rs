use std::fs;
use std::io::Write;

use tempfile::TempDir;

use ragkit_cli::ingest::chunks_from_directory;
use ragkit_core::config::RetrievalConfig;
use ragkit_hybrid::HybridRetrievalEngine;

#[test]
fn single_small_file_becomes_one_chunk() {
    let tmp = TempDir::new().expect("tempdir");
    let dir = tmp.path();
    let mut f = fs::File::create(dir.join("a.txt")).expect("create");
    writeln!(f, "Short text").expect("write");

    let chunks = chunks_from_directory(dir).expect("ingest");
    assert_eq!(chunks.len(), 1, "one small paragraph becomes one chunk");
    assert_eq!(chunks[0].text.trim(), "Short text");
    assert_eq!(chunks[0].doc_id, "a");
}

#[test]
fn non_txt_files_are_skipped() {
    let tmp = TempDir::new().expect("tempdir");
    let dir = tmp.path();
    fs::write(dir.join("a.txt"), "alpha bravo").expect("write");
    fs::write(dir.join("b.md"), "charlie delta").expect("write");

    let chunks = chunks_from_directory(dir).expect("ingest");
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].doc_id, "a");
}

#[test]
fn ingest_order_is_deterministic() {
    let tmp = TempDir::new().expect("tempdir");
    let dir = tmp.path();
    fs::write(dir.join("b.txt"), "second file").expect("write");
    fs::write(dir.join("a.txt"), "first file").expect("write");

    let chunks = chunks_from_directory(dir).expect("ingest");
    let doc_ids: Vec<&str> = chunks.iter().map(|c| c.doc_id.as_str()).collect();
    assert_eq!(doc_ids, vec!["a", "b"]);
}

#[test]
fn same_named_files_in_subdirectories_do_not_collide() {
    let tmp = TempDir::new().expect("tempdir");
    let dir = tmp.path();
    fs::create_dir(dir.join("a")).expect("mkdir");
    fs::create_dir(dir.join("b")).expect("mkdir");
    fs::write(dir.join("a").join("notes.txt"), "alpha paragraph").expect("write");
    fs::write(dir.join("b").join("notes.txt"), "bravo paragraph").expect("write");

    let chunks = chunks_from_directory(dir).expect("ingest");
    assert_eq!(chunks.len(), 2);
    let ids: std::collections::HashSet<&str> = chunks.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids.len(), 2, "relative-path doc ids keep chunk ids unique");

    let engine = HybridRetrievalEngine::new(RetrievalConfig::default());
    engine.index(&chunks).expect("recursive ingest must index cleanly");
}

#[test]
fn ingested_corpus_answers_queries_end_to_end() {
    let tmp = TempDir::new().expect("tempdir");
    let dir = tmp.path();
    fs::write(
        dir.join("refund.txt"),
        "Items may be returned within thirty days.\n\nRefunds are issued to the original payment method.",
    )
    .expect("write");
    fs::write(dir.join("shipping.txt"), "Orders ship within two business days.").expect("write");

    let chunks = chunks_from_directory(dir).expect("ingest");
    assert_eq!(chunks.len(), 3);

    let config = RetrievalConfig::default();
    let engine = HybridRetrievalEngine::new(config.clone());
    engine.index(&chunks).expect("index");

    let retrieval = engine.retrieve("returned within thirty days", &config).expect("retrieve");
    assert!(!retrieval.is_empty());
    assert!(retrieval.results[0].chunk_id.starts_with("refund"));
}
