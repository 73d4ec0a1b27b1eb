//! quick-xml backed parser producing an [`XmlTree`]

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;

use super::{NodeId, XmlTree};
use crate::error::{Result, SspError};

/// Parse `xml` into an arena tree
///
/// Whitespace-only text inside the root element is kept so that descendant
/// text concatenation sees the document exactly as written.
pub(super) fn parse_document(xml: &str) -> Result<XmlTree> {
    let mut reader = NsReader::from_str(xml);
    let mut tree = XmlTree::new();
    let mut stack: Vec<NodeId> = vec![NodeId::DOCUMENT];
    let mut seen_root = false;

    loop {
        let position = reader.buffer_position() as u64;
        let (resolved, event) = match reader.read_resolved_event() {
            Ok(pair) => pair,
            Err(e) => return Err(SspError::malformed(position, e.to_string())),
        };

        match event {
            Event::Start(start) => {
                let id = open_element(&mut tree, &stack, &mut seen_root, resolved, &start, position)?;
                stack.push(id);
            }
            Event::Empty(start) => {
                open_element(&mut tree, &stack, &mut seen_root, resolved, &start, position)?;
            }
            Event::End(_) => {
                if stack.len() <= 1 {
                    return Err(SspError::malformed(position, "closing tag without an open element"));
                }
                stack.pop();
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|e| SspError::malformed(position, e.to_string()))?;
                append_character_data(&mut tree, &stack, &text, false, position)?;
            }
            Event::CData(data) => {
                let text = decode(&data, position)?;
                append_character_data(&mut tree, &stack, text, true, position)?;
            }
            Event::Comment(comment) => {
                let text = decode(&comment, position)?;
                tree.append_comment(current(&stack), text);
            }
            Event::PI(pi) => {
                let content = decode(&pi, position)?;
                tree.append_processing_instruction(current(&stack), content);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    let end = reader.buffer_position() as u64;
    if stack.len() > 1 {
        let open = stack.last().and_then(|&id| tree.node(id)).and_then(|n| n.local_name.clone());
        return Err(SspError::malformed(
            end,
            format!("unclosed element <{}>", open.unwrap_or_default()),
        ));
    }
    if !seen_root {
        return Err(SspError::malformed(end, "document has no root element"));
    }

    Ok(tree)
}

fn current(stack: &[NodeId]) -> NodeId {
    stack.last().copied().unwrap_or(NodeId::DOCUMENT)
}

fn decode(bytes: &[u8], position: u64) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| SspError::malformed(position, e.to_string()))
}

fn open_element(
    tree: &mut XmlTree,
    stack: &[NodeId],
    seen_root: &mut bool,
    resolved: ResolveResult<'_>,
    start: &BytesStart<'_>,
    position: u64,
) -> Result<NodeId> {
    let parent = current(stack);
    if parent == NodeId::DOCUMENT {
        if *seen_root {
            return Err(SspError::malformed(position, "more than one root element"));
        }
        *seen_root = true;
    }

    let namespace = match resolved {
        ResolveResult::Bound(ns) => Some(decode(ns.as_ref(), position)?.to_string()),
        ResolveResult::Unbound => None,
        ResolveResult::Unknown(prefix) => {
            return Err(SspError::malformed(
                position,
                format!("unbound namespace prefix '{}'", String::from_utf8_lossy(&prefix)),
            ));
        }
    };

    let name = decode(start.name().as_ref(), position)?.to_string();

    let mut attributes: Vec<(String, String)> = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| SspError::malformed(position, e.to_string()))?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let key = decode(attr.key.as_ref(), position)?.to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| SspError::malformed(position, e.to_string()))?;
        attributes.push((key, value.into_owned()));
    }
    let borrowed: Vec<(&str, &str)> = attributes
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();

    Ok(tree.append_element(parent, &name, namespace.as_deref(), &borrowed))
}

fn append_character_data(
    tree: &mut XmlTree,
    stack: &[NodeId],
    text: &str,
    cdata: bool,
    position: u64,
) -> Result<()> {
    let parent = current(stack);
    if parent == NodeId::DOCUMENT {
        if text.trim().is_empty() {
            return Ok(());
        }
        return Err(SspError::malformed(position, "text outside the root element"));
    }
    if cdata {
        tree.append_cdata(parent, text);
    } else {
        tree.append_text(parent, text);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{NodeKind, TreeNavigator};

    #[test]
    fn test_parses_namespaced_document() {
        let xml = r#"<?xml version="1.0"?>
<o:system-security-plan xmlns:o="http://csrc.nist.gov/ns/oscal/1.0" uuid="abc">
  <o:metadata><o:title>Plan &amp; Notes</o:title></o:metadata>
</o:system-security-plan>"#;
        let tree = parse_document(xml).unwrap();
        let root = tree.root_element().unwrap();
        assert_eq!(tree.local_name(root), Some("system-security-plan"));
        assert_eq!(tree.prefix(root), Some("o"));
        assert_eq!(tree.namespace_uri(root), Some("http://csrc.nist.gov/ns/oscal/1.0"));
        assert_eq!(tree.attribute(root, "uuid"), Some("abc"));
        assert!(tree.attribute(root, "xmlns:o").is_none());

        let title = tree.first_descendant_named(root, "title").unwrap();
        assert_eq!(tree.descendant_text(title), "Plan & Notes");
    }

    #[test]
    fn test_keeps_comments_and_cdata() {
        let tree = parse_document("<r><!--c--><![CDATA[<raw>]]></r>").unwrap();
        let root = tree.root_element().unwrap();
        let kinds: Vec<_> = tree
            .children(root)
            .iter()
            .map(|&c| tree.kind(c).unwrap())
            .collect();
        assert_eq!(kinds, vec![NodeKind::Comment, NodeKind::CData]);
        assert_eq!(tree.descendant_text(root), "<raw>");
    }

    #[test]
    fn test_rejects_mismatched_tags() {
        let err = parse_document("<a><b></a>").unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_rejects_unclosed_root() {
        let err = parse_document("<a><b/>").unwrap_err();
        assert!(matches!(err, SspError::Malformed { .. }));
    }

    #[test]
    fn test_rejects_empty_and_plain_text() {
        assert!(parse_document("").is_err());
        assert!(parse_document("not xml at all").is_err());
    }

    #[test]
    fn test_rejects_multiple_roots() {
        let err = parse_document("<a/><b/>").unwrap_err();
        assert!(err.to_string().contains("more than one root"));
    }

    #[test]
    fn test_rejects_unbound_prefix() {
        let err = parse_document("<x:a/>").unwrap_err();
        assert!(err.to_string().contains("unbound namespace prefix"));
    }
}
