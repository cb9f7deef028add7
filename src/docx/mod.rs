pub mod archive;
pub mod namespaces;
pub mod relationships;
pub mod walk;

use std::io::{Read, Seek};

use crate::error::Error;
use crate::model::{DocumentImageIndex, NamespaceTable};

use archive::{AmbiguityPolicy, DocxArchive, Suffix, rels_dir_for, rels_path_for};

pub(crate) const DML_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
pub(crate) const REL_NS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// How the main document stream and its relationship stream are located.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexOptions {
    /// Substring identifying the main document stream, e.g. "document.xml".
    pub document_marker: String,
    /// Name suffix that marks the relationship stream.
    pub rels_suffix: String,
    pub ambiguity: AmbiguityPolicy,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            document_marker: "document.xml".to_string(),
            rels_suffix: "rels".to_string(),
            ambiguity: AmbiguityPolicy::default(),
        }
    }
}

/// Owned copies of the two XML parts, detached from the archive.
pub(crate) struct RawStreams {
    pub(crate) document_part: String,
    pub(crate) document_xml: String,
    pub(crate) rels_part: Option<String>,
    pub(crate) rels_xml: Option<String>,
}

/// Children of `node` named `prefix:local`, with `prefix` resolved through `ns`.
/// Yields nothing when the prefix is unbound.
pub(crate) fn qualified_children<'a>(
    node: roxmltree::Node<'a, 'a>,
    ns: &NamespaceTable,
    prefix: &str,
    local: &'static str,
) -> impl Iterator<Item = roxmltree::Node<'a, 'a>> {
    let uri = ns.uri(prefix).map(String::from);
    node.children().filter(move |n| {
        n.is_element()
            && n.tag_name().name() == local
            && uri.is_some()
            && n.tag_name().namespace() == uri.as_deref()
    })
}

pub(crate) fn read_streams<R: Read + Seek>(
    archive: &mut DocxArchive<R>,
    options: &IndexOptions,
) -> Result<RawStreams, Error> {
    let marker = options.document_marker.as_str();
    let suffix = options.rels_suffix.as_str();

    let document_part = archive
        .find_entry(marker, Suffix::Excluded(suffix), options.ambiguity)?
        .ok_or_else(|| Error::StreamNotFound(marker.to_string()))?;
    let document_xml = archive.read_text(&document_part)?;
    log::debug!("Main document stream: {} ({} bytes)", document_part, document_xml.len());

    // Relationships only ever come from the document's own `_rels/` directory.
    let companion = rels_path_for(&document_part);
    let rels_part = if archive.contains(&companion) {
        Some(companion)
    } else {
        archive.find_entry_in(
            &rels_dir_for(&document_part),
            marker,
            Suffix::Required(suffix),
            options.ambiguity,
        )?
    };

    let rels_xml = match &rels_part {
        Some(name) => match archive.read_text(name) {
            Ok(text) => Some(text),
            Err(e) => {
                log::warn!("Cannot read relationship stream {name}: {e}");
                None
            }
        },
        None => {
            log::debug!("No relationship stream for {}", document_part);
            None
        }
    };

    Ok(RawStreams {
        document_part,
        document_xml,
        rels_part,
        rels_xml,
    })
}

pub(crate) fn build_index(streams: RawStreams) -> Result<DocumentImageIndex, Error> {
    let ns = namespaces::resolve_namespaces(&streams.document_xml);
    let rels = relationships::map_relationships(
        &streams.document_xml,
        streams.rels_xml.as_deref(),
        &ns,
    );

    let xml = roxmltree::Document::parse(&streams.document_xml)?;
    let body = walk::index_body(&xml, &ns, &rels);

    Ok(DocumentImageIndex::new(
        streams.document_part,
        streams.rels_part,
        body.num_paras,
        body.paragraphs,
        rels,
    ))
}

/// Index an opened archive. The archive is consumed and closed as soon as
/// both streams are read, before any parsing happens.
pub fn index_archive<R: Read + Seek>(
    mut archive: DocxArchive<R>,
    options: &IndexOptions,
) -> Result<DocumentImageIndex, Error> {
    let streams = read_streams(&mut archive, options)?;
    drop(archive);
    build_index(streams)
}
