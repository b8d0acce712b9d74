use std::path::Path;

use anyhow::Result;
use ragkit_core::types::Chunk;

/// Walk `data_dir` for `.txt` files and split each into paragraph
/// chunks. Chunk ids follow `<doc_id>_chunk_<n>` where the document id
/// is the file path relative to `data_dir` (extension stripped). Files
/// that read as empty contribute nothing.
pub fn chunks_from_directory(data_dir: &Path) -> Result<Vec<Chunk>> {
    let mut files: Vec<_> = walkdir::WalkDir::new(data_dir)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("txt"))
        .map(|e| e.path().to_path_buf())
        .collect();
    // Deterministic ingest order regardless of directory walk order.
    files.sort();

    let mut all_chunks = Vec::new();
    for file_path in files {
        let content = std::fs::read_to_string(&file_path)?;
        let doc_id = doc_id_for(data_dir, &file_path);
        all_chunks.extend(chunk_document(&doc_id, &content));
    }
    Ok(all_chunks)
}

/// Document id from the path relative to the ingest root, extension
/// stripped and path separators flattened to `_`. Keeps same-named
/// files in different subdirectories from colliding.
fn doc_id_for(data_dir: &Path, file_path: &Path) -> String {
    let relative = file_path.strip_prefix(data_dir).unwrap_or(file_path);
    relative
        .with_extension("")
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("_")
}

/// Split one document into chunks on blank-line boundaries.
pub fn chunk_document(doc_id: &str, content: &str) -> Vec<Chunk> {
    content
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .enumerate()
        .map(|(position, paragraph)| {
            Chunk::new(format!("{doc_id}_chunk_{position}"), doc_id, paragraph, position)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_blank_lines() {
        let chunks = chunk_document("doc", "first paragraph\n\nsecond paragraph\n\n\n");
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].id, "doc_chunk_0");
        assert_eq!(chunks[0].position, 0);
        assert_eq!(chunks[1].text, "second paragraph");
    }

    #[test]
    fn whitespace_only_paragraphs_are_dropped() {
        let chunks = chunk_document("doc", "real text\n\n   \n\nmore text");
        assert_eq!(chunks.len(), 2);
    }

    #[test]
    fn document_ids_carry_the_relative_path() {
        let root = Path::new("/data");
        assert_eq!(doc_id_for(root, Path::new("/data/notes.txt")), "notes");
        assert_eq!(doc_id_for(root, Path::new("/data/a/notes.txt")), "a_notes");
        assert_eq!(doc_id_for(root, Path::new("/data/b/notes.txt")), "b_notes");
    }
}
