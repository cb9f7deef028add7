use std::collections::BTreeMap;

use crate::model::{DrawingRef, NamespaceTable, ParagraphRecord, RelationshipMap, RunRecord};

use super::qualified_children;

/// Paragraph records for every image-bearing paragraph, plus the total paragraph count.
pub struct BodyIndex {
    pub num_paras: usize,
    pub paragraphs: BTreeMap<usize, ParagraphRecord>,
}

/// Value of the first attribute whose name contains `needle`, searched in
/// pre-order over the descendants of `node` (the node's own attributes excluded).
pub fn find_attribute<'a>(node: roxmltree::Node<'a, 'a>, needle: &str) -> Option<&'a str> {
    for child in node.children().filter(|n| n.is_element()) {
        if let Some(attr) = child.attributes().find(|a| a.name().contains(needle)) {
            return Some(attr.value());
        }
        if let Some(found) = find_attribute(child, needle) {
            return Some(found);
        }
    }
    None
}

fn paragraph_id(para: roxmltree::Node) -> String {
    para.attributes()
        .filter(|a| a.name().contains("paraId"))
        .last()
        .map(|a| a.value().to_string())
        .unwrap_or_default()
}

fn drawing_ref(drawing: roxmltree::Node, rels: &RelationshipMap) -> DrawingRef {
    let rel_id = find_attribute(drawing, "embed");
    let target = rel_id.and_then(|id| rels.target(id)).unwrap_or_default();
    if let Some(id) = rel_id
        && target.is_empty()
    {
        log::debug!("Drawing references {id}, which has no image target");
    }
    DrawingRef {
        rel_id: rel_id.map(String::from),
        target: target.to_string(),
    }
}

/// Walk `w:body` → `w:p` → `w:r` → `w:drawing` and record every drawing.
///
/// The body is the first element child of the document root. Without a body,
/// or without a binding for the `w` prefix, the document has zero paragraphs.
pub fn index_body(xml: &roxmltree::Document, ns: &NamespaceTable, rels: &RelationshipMap) -> BodyIndex {
    let mut result = BodyIndex {
        num_paras: 0,
        paragraphs: BTreeMap::new(),
    };
    let Some(body) = xml.root_element().first_element_child() else {
        return result;
    };

    for (p_idx, para) in qualified_children(body, ns, "w", "p").enumerate() {
        result.num_paras += 1;

        let mut runs = BTreeMap::new();
        let mut run_count = 0;
        for (r_idx, run) in qualified_children(para, ns, "w", "r").enumerate() {
            run_count += 1;
            let drawings: Vec<DrawingRef> = qualified_children(run, ns, "w", "drawing")
                .map(|d| drawing_ref(d, rels))
                .collect();
            if !drawings.is_empty() {
                runs.insert(
                    r_idx,
                    RunRecord {
                        index: r_idx,
                        drawings,
                    },
                );
            }
        }

        if runs.is_empty() {
            continue;
        }
        result.paragraphs.insert(
            p_idx,
            ParagraphRecord {
                index: p_idx,
                para_id: paragraph_id(para),
                run_count,
                runs,
            },
        );
    }

    result
}
