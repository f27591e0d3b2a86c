//! Renders a protocol object tree as XML text
//!
//! The renderer is deliberately generic: it walks the tree in order and
//! knows nothing about EPP semantics. Element order and attribute order
//! are exactly the tree's insertion order, which the builders already
//! arranged to match the schemas.

use crate::epp::tree::Element;

pub const XML_DECLARATION: &str =
    r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#;

/// Serialize a tree to an XML document string.
pub fn render(root: &Element) -> String {
    let mut out = String::with_capacity(512);
    out.push_str(XML_DECLARATION);
    write_element(&mut out, root);
    out
}

fn write_element(out: &mut String, el: &Element) {
    out.push('<');
    out.push_str(el.tag());
    for (key, value) in el.attributes() {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        escape_into(out, value, true);
        out.push('"');
    }

    if el.is_empty() {
        out.push_str("/>");
        return;
    }

    out.push('>');
    if let Some(text) = el.value() {
        escape_into(out, text, false);
    }
    for child in el.elements() {
        write_element(out, child);
    }
    out.push_str("</");
    out.push_str(el.tag());
    out.push('>');
}

fn escape_into(out: &mut String, raw: &str, attribute: bool) {
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            '\'' if attribute => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
}
