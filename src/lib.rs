mod docx;
mod error;
mod extract;
mod model;
pub mod report;

pub use docx::archive::{
    AmbiguityPolicy, DocxArchive, Suffix, rels_dir_for, rels_path_for, resolve_target,
};
pub use docx::namespaces::resolve_namespaces;
pub use docx::relationships::{collect_embed_refs, map_relationships, parse_relationship_entries};
pub use docx::walk::find_attribute;
pub use docx::{IndexOptions, index_archive};
pub use error::Error;
pub use extract::{ExtractedImage, extract_images, extract_images_from_path, read_image};
pub use model::{
    DocumentImageIndex, DrawingRef, NamespaceTable, ParagraphRecord, RelationshipEntry,
    RelationshipMap, RunRecord,
};

use std::path::Path;
use std::time::Instant;

pub fn index_docx(input: &Path) -> Result<DocumentImageIndex, Error> {
    index_docx_with(input, &IndexOptions::default())
}

pub fn index_docx_with(input: &Path, options: &IndexOptions) -> Result<DocumentImageIndex, Error> {
    let t0 = Instant::now();
    let index = index_archive(DocxArchive::open(input)?, options)?;
    log_indexed(&input.display().to_string(), &index, t0);
    Ok(index)
}

pub fn index_docx_bytes(input: &[u8]) -> Result<DocumentImageIndex, Error> {
    index_docx_bytes_with(input, &IndexOptions::default())
}

pub fn index_docx_bytes_with(
    input: &[u8],
    options: &IndexOptions,
) -> Result<DocumentImageIndex, Error> {
    let t0 = Instant::now();
    let index = index_archive(DocxArchive::from_bytes(input)?, options)?;
    log_indexed("<memory>", &index, t0);
    Ok(index)
}

fn log_indexed(source: &str, index: &DocumentImageIndex, t0: Instant) {
    log::info!(
        "Indexed {}: {} paragraphs, {} images ({} unresolved) in {:.1}ms",
        source,
        index.num_paras(),
        index.num_images(),
        index.unresolved().count(),
        t0.elapsed().as_secs_f64() * 1000.0,
    );
}
