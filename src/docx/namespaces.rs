use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::NamespaceTable;

static XMLNS_DECL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"xmlns:([^\s="':]+)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap());

/// Harvest `xmlns:prefix="uri"` declarations from raw XML text.
///
/// Scans the whole text, not just the root element; a prefix declared twice
/// keeps the last URI seen.
pub fn resolve_namespaces(xml: &str) -> NamespaceTable {
    let mut bindings = BTreeMap::new();
    for caps in XMLNS_DECL.captures_iter(xml) {
        let uri = caps.get(2).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
        bindings.insert(caps[1].to_string(), uri.to_string());
    }
    if bindings.is_empty() {
        log::debug!("No namespace declarations found");
    }
    NamespaceTable::from_bindings(bindings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn harvests_root_declarations() {
        let xml = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:w14="http://schemas.microsoft.com/office/word/2010/wordml"><w:body/></w:document>"#;
        let ns = resolve_namespaces(xml);
        assert_eq!(ns.len(), 2);
        assert_eq!(
            ns.uri("w"),
            Some("http://schemas.openxmlformats.org/wordprocessingml/2006/main")
        );
        assert_eq!(
            ns.prefix_for("http://schemas.microsoft.com/office/word/2010/wordml"),
            Some("w14")
        );
    }

    #[test]
    fn last_declaration_wins() {
        let xml = r#"<x:a xmlns:x="urn:one"><x:b xmlns:x="urn:two"/></x:a>"#;
        assert_eq!(resolve_namespaces(xml).uri("x"), Some("urn:two"));
    }

    #[test]
    fn single_quoted_declarations_are_read() {
        let xml = "<w:document xmlns:w='urn:main' xmlns:r=\"urn:rel\"/>";
        let ns = resolve_namespaces(xml);
        assert_eq!(ns.uri("w"), Some("urn:main"));
        assert_eq!(ns.uri("r"), Some("urn:rel"));
    }

    #[test]
    fn default_namespace_is_not_a_prefix() {
        let ns = resolve_namespaces(r#"<a xmlns="urn:default"/>"#);
        assert!(ns.is_empty());
    }
}
