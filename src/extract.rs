use std::collections::HashSet;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use crate::docx::archive::DocxArchive;
use crate::error::Error;
use crate::model::{DocumentImageIndex, DrawingRef};

#[derive(Clone, Debug)]
pub struct ExtractedImage {
    /// Entry name inside the container, e.g. "word/media/image1.png".
    pub archive_path: String,
    pub output_path: PathBuf,
    pub size: usize,
    /// Sniffed from the bytes, not from the file extension.
    pub format: Option<image::ImageFormat>,
}

/// Bytes of the archive entry a drawing resolves to.
///
/// `Ok(None)` for unresolved or external references and for targets the
/// archive doesn't contain.
pub fn read_image<R: Read + Seek>(
    archive: &mut DocxArchive<R>,
    index: &DocumentImageIndex,
    drawing: &DrawingRef,
) -> Result<Option<Vec<u8>>, Error> {
    let Some(path) = index.archive_path(drawing) else {
        return Ok(None);
    };
    if !archive.contains(&path) {
        log::warn!("Image target {} is not in the archive", path);
        return Ok(None);
    }
    archive.read_entry(&path).map(Some)
}

fn unique_file_name(archive_path: &str, used: &mut HashSet<String>) -> String {
    let base = archive_path.rsplit('/').next().unwrap_or(archive_path);
    let base = if base.is_empty() { "image" } else { base };
    if used.insert(base.to_string()) {
        return base.to_string();
    }
    let (stem, ext) = match base.rsplit_once('.') {
        Some((s, e)) => (s, format!(".{e}")),
        None => (base, String::new()),
    };
    let mut n = 1;
    loop {
        let candidate = format!("{stem}-{n}{ext}");
        if used.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

/// Copy every distinct resolved image out of the container into `out_dir`.
///
/// Images are written in document order of their first reference. File names
/// keep the entry's base name, suffixed with `-N` on collision.
pub fn extract_images<R: Read + Seek>(
    archive: &mut DocxArchive<R>,
    index: &DocumentImageIndex,
    out_dir: &Path,
) -> Result<Vec<ExtractedImage>, Error> {
    std::fs::create_dir_all(out_dir)?;

    let mut seen = HashSet::new();
    let mut used_names = HashSet::new();
    let mut extracted = Vec::new();

    for (p_idx, r_idx, drawing) in index.drawings() {
        let Some(path) = index.archive_path(drawing) else {
            log::debug!(
                "Skipping unresolved drawing {:?} in paragraph {} run {}",
                drawing.rel_id,
                p_idx,
                r_idx
            );
            continue;
        };
        if !seen.insert(path.clone()) {
            continue;
        }
        let Some(data) = read_image(archive, index, drawing)? else {
            continue;
        };

        let output_path = out_dir.join(unique_file_name(&path, &mut used_names));
        std::fs::write(&output_path, &data)?;
        let format = image::guess_format(&data).ok();
        log::info!(
            "Extracted {} -> {} ({} bytes, {:?})",
            path,
            output_path.display(),
            data.len(),
            format
        );
        extracted.push(ExtractedImage {
            archive_path: path,
            output_path,
            size: data.len(),
            format,
        });
    }

    Ok(extracted)
}

/// Open the container at `input` and extract its images; see [`extract_images`].
pub fn extract_images_from_path(
    input: &Path,
    index: &DocumentImageIndex,
    out_dir: &Path,
) -> Result<Vec<ExtractedImage>, Error> {
    let mut archive = DocxArchive::open(input)?;
    extract_images(&mut archive, index, out_dir)
}
