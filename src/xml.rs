// ============================================================================
// Tree-query helpers over the XML substrate
// ============================================================================
//
// The engine navigates parsed documents through roxmltree nodes. Views are
// non-owning: every helper hands back references tied to the document's
// lifetime, and nothing here caches or mutates.

use roxmltree::{Document, Node};

use crate::error::ValueError;

/// First same-namespace child element with the given local name.
pub fn child_elem<'a>(node: Node<'a, 'a>, ns: Option<&str>, local: &str) -> Option<Node<'a, 'a>> {
    node.children()
        .find(|c| c.is_element() && c.tag_name().name() == local && c.tag_name().namespace() == ns)
}

/// All same-namespace child elements with the given local name, in document order.
pub fn child_elems<'a>(
    node: Node<'a, 'a>,
    ns: Option<&'a str>,
    local: &'a str,
) -> impl Iterator<Item = Node<'a, 'a>> + 'a {
    node.children()
        .filter(move |c| c.is_element() && c.tag_name().name() == local && c.tag_name().namespace() == ns)
}

/// Trimmed text content of an element, empty when it has none.
pub fn elem_text<'a>(node: Node<'a, 'a>) -> &'a str {
    node.text().map(str::trim).unwrap_or("")
}

/// Trimmed text of the first matching child, absent when there is none.
pub fn child_text<'a>(node: Node<'a, 'a>, ns: Option<&str>, local: &str) -> Option<&'a str> {
    child_elem(node, ns, local).map(elem_text)
}

/// Trimmed text of a child the schema requires.
pub fn required_child_text<'a>(
    node: Node<'a, 'a>,
    ns: Option<&str>,
    element: &'static str,
    child: &'static str,
) -> Result<&'a str, ValueError> {
    child_text(node, ns, child).ok_or(ValueError::MissingChild { element, child })
}

/// Strict integer parse for a value that is present in the document.
pub fn parse_int(element: &'static str, field: &'static str, value: &str) -> Result<i64, ValueError> {
    value.trim().parse().map_err(|_| ValueError::InvalidInt {
        element,
        field,
        value: value.to_string(),
    })
}

/// Strict boolean parse over the XML Schema lexical space (true|false|1|0).
pub fn parse_bool(element: &'static str, field: &'static str, value: &str) -> Result<bool, ValueError> {
    match value.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ValueError::InvalidBool {
            element,
            field,
            value: value.to_string(),
        }),
    }
}

/// The element's original markup, sliced out of the source text.
pub fn raw_xml<'a>(doc: &'a Document, node: Node) -> &'a str {
    &doc.input_text()[node.range()]
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<root xmlns="urn:a"><item id="1"> first </item><item id="2">second</item><other/></root>"#;

    #[test]
    fn test_child_lookup_respects_namespace() {
        let doc = Document::parse(SAMPLE).unwrap();
        let root = doc.root_element();

        assert!(child_elem(root, Some("urn:a"), "item").is_some());
        assert!(child_elem(root, None, "item").is_none());
        assert_eq!(child_elems(root, Some("urn:a"), "item").count(), 2);
    }

    #[test]
    fn test_child_text_is_trimmed_and_first_wins() {
        let doc = Document::parse(SAMPLE).unwrap();
        let root = doc.root_element();

        assert_eq!(child_text(root, Some("urn:a"), "item"), Some("first"));
        assert_eq!(child_text(root, Some("urn:a"), "other"), Some(""));
        assert_eq!(child_text(root, Some("urn:a"), "missing"), None);
    }

    #[test]
    fn test_required_child_text_reports_missing() {
        let doc = Document::parse(SAMPLE).unwrap();
        let root = doc.root_element();

        assert_eq!(
            required_child_text(root, Some("urn:a"), "root", "missing"),
            Err(ValueError::MissingChild {
                element: "root",
                child: "missing"
            })
        );
    }

    #[test]
    fn test_strict_parsers() {
        assert_eq!(parse_int("e", "f", " 42 "), Ok(42));
        assert!(matches!(
            parse_int("e", "f", "fifty"),
            Err(ValueError::InvalidInt { .. })
        ));

        assert_eq!(parse_bool("e", "f", "true"), Ok(true));
        assert_eq!(parse_bool("e", "f", "0"), Ok(false));
        // Java's Boolean.parseBoolean would silently map this to false.
        assert!(matches!(
            parse_bool("e", "f", "yes"),
            Err(ValueError::InvalidBool { .. })
        ));
    }

    #[test]
    fn test_raw_xml_slice_covers_whole_element() {
        let doc = Document::parse(SAMPLE).unwrap();
        let root = doc.root_element();
        let item = child_elem(root, Some("urn:a"), "item").unwrap();

        assert_eq!(raw_xml(&doc, item), r#"<item id="1"> first </item>"#);
    }
}
