use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::docx::archive::resolve_target;

/// Prefix → namespace URI bindings harvested from a document part.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NamespaceTable {
    bindings: BTreeMap<String, String>,
}

impl NamespaceTable {
    pub(crate) fn from_bindings(bindings: BTreeMap<String, String>) -> Self {
        Self { bindings }
    }

    pub fn uri(&self, prefix: &str) -> Option<&str> {
        self.bindings.get(prefix).map(String::as_str)
    }

    /// First prefix (in lexical order) bound to `uri`.
    pub fn prefix_for(&self, uri: &str) -> Option<&str> {
        self.bindings
            .iter()
            .find(|(_, u)| u.as_str() == uri)
            .map(|(p, _)| p.as_str())
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings.iter().map(|(p, u)| (p.as_str(), u.as_str()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RelationshipEntry {
    pub id: String,
    pub target: String,
    /// `TargetMode="External"`: the target is a URI, not an archive entry.
    pub external: bool,
}

/// Relationship ID → target, restricted to IDs the document embeds as images.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RelationshipMap {
    entries: BTreeMap<String, RelationshipEntry>,
}

impl RelationshipMap {
    pub(crate) fn insert(&mut self, entry: RelationshipEntry) {
        self.entries.insert(entry.id.clone(), entry);
    }

    pub fn get(&self, id: &str) -> Option<&RelationshipEntry> {
        self.entries.get(id)
    }

    pub fn target(&self, id: &str) -> Option<&str> {
        self.get(id).map(|e| e.target.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RelationshipEntry> {
        self.entries.values()
    }
}

/// One `w:drawing` occurrence.
///
/// `rel_id` is `None` when no embed attribute exists under the drawing;
/// `target` is empty when the ID did not resolve through the relationship map.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DrawingRef {
    pub rel_id: Option<String>,
    pub target: String,
}

impl DrawingRef {
    pub fn is_resolved(&self) -> bool {
        !self.target.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RunRecord {
    pub index: usize,
    pub drawings: Vec<DrawingRef>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ParagraphRecord {
    pub index: usize,
    /// `w14:paraId`, or empty when the paragraph carries none.
    pub para_id: String,
    pub run_count: usize,
    /// Only runs holding at least one drawing, keyed by run index.
    pub runs: BTreeMap<usize, RunRecord>,
}

impl ParagraphRecord {
    pub fn image_count(&self) -> usize {
        self.runs.values().map(|r| r.drawings.len()).sum()
    }
}

/// Where the images of a document live, paragraph by paragraph.
///
/// Built in a single pass by [`crate::index_docx`] and immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DocumentImageIndex {
    document_part: String,
    rels_part: Option<String>,
    num_paras: usize,
    num_images: usize,
    image_paragraphs: Vec<usize>,
    paragraph_ids: Vec<String>,
    paragraphs: BTreeMap<usize, ParagraphRecord>,
    relationships: RelationshipMap,
}

impl DocumentImageIndex {
    pub(crate) fn new(
        document_part: String,
        rels_part: Option<String>,
        num_paras: usize,
        paragraphs: BTreeMap<usize, ParagraphRecord>,
        relationships: RelationshipMap,
    ) -> Self {
        let num_images = paragraphs.values().map(ParagraphRecord::image_count).sum();
        let image_paragraphs = paragraphs.keys().copied().collect();
        let paragraph_ids = paragraphs.values().map(|p| p.para_id.clone()).collect();
        Self {
            document_part,
            rels_part,
            num_paras,
            num_images,
            image_paragraphs,
            paragraph_ids,
            paragraphs,
            relationships,
        }
    }

    /// Archive entry name of the main document stream.
    pub fn document_part(&self) -> &str {
        &self.document_part
    }

    /// Archive entry name of the relationship stream, if the container had one.
    pub fn rels_part(&self) -> Option<&str> {
        self.rels_part.as_deref()
    }

    pub fn num_paras(&self) -> usize {
        self.num_paras
    }

    pub fn num_images(&self) -> usize {
        self.num_images
    }

    /// Indices of paragraphs holding at least one drawing, ascending.
    pub fn image_paragraphs(&self) -> &[usize] {
        &self.image_paragraphs
    }

    /// Paragraph IDs parallel to [`Self::image_paragraphs`].
    pub fn paragraph_ids(&self) -> &[String] {
        &self.paragraph_ids
    }

    pub fn paragraphs(&self) -> &BTreeMap<usize, ParagraphRecord> {
        &self.paragraphs
    }

    pub fn paragraph(&self, index: usize) -> Option<&ParagraphRecord> {
        self.paragraphs.get(&index)
    }

    pub fn relationships(&self) -> &RelationshipMap {
        &self.relationships
    }

    /// Every drawing as `(paragraph index, run index, drawing)` in document order.
    pub fn drawings(&self) -> impl Iterator<Item = (usize, usize, &DrawingRef)> {
        self.paragraphs.values().flat_map(|p| {
            p.runs
                .values()
                .flat_map(move |r| r.drawings.iter().map(move |d| (p.index, r.index, d)))
        })
    }

    pub fn unresolved(&self) -> impl Iterator<Item = (usize, usize, &DrawingRef)> {
        self.drawings().filter(|(_, _, d)| !d.is_resolved())
    }

    /// Archive entry name a drawing points at. `None` for unresolved or external targets.
    pub fn archive_path(&self, drawing: &DrawingRef) -> Option<String> {
        if !drawing.is_resolved() {
            return None;
        }
        let external = drawing
            .rel_id
            .as_deref()
            .and_then(|id| self.relationships.get(id))
            .is_some_and(|e| e.external);
        if external {
            return None;
        }
        Some(resolve_target(&self.document_part, &drawing.target))
    }

    /// Distinct archive entries referenced by resolved drawings.
    pub fn image_parts(&self) -> BTreeSet<String> {
        self.drawings()
            .filter_map(|(_, _, d)| self.archive_path(d))
            .collect()
    }
}
