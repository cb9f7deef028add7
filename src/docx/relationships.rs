use std::collections::HashSet;

use regex::Regex;

use crate::model::{NamespaceTable, RelationshipEntry, RelationshipMap};

use super::{DML_NS, REL_NS};

/// Relationship IDs referenced by `<a:* r:embed="...">` elements, in encounter order.
/// Both quote styles are accepted.
///
/// Prefixes come from the namespace table; documents that never declare the
/// DrawingML or relationship namespaces fall back to the conventional `a`/`r`.
pub fn collect_embed_refs(document_xml: &str, ns: &NamespaceTable) -> Vec<String> {
    let dml = ns.prefix_for(DML_NS).unwrap_or("a");
    let rel = ns.prefix_for(REL_NS).unwrap_or("r");
    let pattern = format!(
        r#"<{}:[\w.-]+[^>]*?\s{}:embed\s*=\s*(?:"([^"]*)"|'([^']*)')"#,
        regex::escape(dml),
        regex::escape(rel)
    );
    let Ok(re) = Regex::new(&pattern) else {
        log::warn!("Cannot build embed pattern for prefixes {dml:?}/{rel:?}");
        return Vec::new();
    };
    re.captures_iter(document_xml)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Every child of the relationship root carrying both `Id` and `Target`.
pub fn parse_relationship_entries(
    rels_xml: &str,
) -> Result<Vec<RelationshipEntry>, roxmltree::Error> {
    let xml = roxmltree::Document::parse(rels_xml)?;
    let entries = xml
        .root_element()
        .children()
        .filter(|n| n.is_element())
        .filter_map(|node| {
            let (Some(id), Some(target)) = (node.attribute("Id"), node.attribute("Target")) else {
                return None;
            };
            Some(RelationshipEntry {
                id: id.to_string(),
                target: target.to_string(),
                external: node
                    .attribute("TargetMode")
                    .is_some_and(|m| m.eq_ignore_ascii_case("external")),
            })
        })
        .collect();
    Ok(entries)
}

/// Join the document's embed references against the relationship stream by ID.
///
/// A missing, blank or malformed relationship stream yields an empty map.
pub fn map_relationships(
    document_xml: &str,
    rels_xml: Option<&str>,
    ns: &NamespaceTable,
) -> RelationshipMap {
    let mut map = RelationshipMap::default();

    let embeds: HashSet<String> = collect_embed_refs(document_xml, ns).into_iter().collect();
    log::debug!("Found {} distinct image embed references", embeds.len());

    let Some(rels_xml) = rels_xml.filter(|s| !s.trim().is_empty()) else {
        return map;
    };
    let entries = match parse_relationship_entries(rels_xml) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("Ignoring unparseable relationship stream: {e}");
            return map;
        }
    };

    for entry in entries {
        if embeds.contains(&entry.id) {
            map.insert(entry);
        }
    }

    for id in &embeds {
        if map.get(id).is_none() {
            log::warn!("Image relationship {id} has no target in the relationship stream");
        }
    }

    map
}
