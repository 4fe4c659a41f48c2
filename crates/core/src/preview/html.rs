//! HTML serialisation of preview trees.

use super::render::{render_preview, Viewport};
use super::vnode::VNode;
use crate::document::model::Document;

/// Elements written without a closing tag.
const VOID_ELEMENTS: [&str; 6] = ["img", "input", "br", "hr", "meta", "link"];

struct Writer {
    buffer: String,
}

impl Writer {
    fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn node(&mut self, node: &VNode) {
        match node {
            VNode::Text { content } => self.add(&escape_text(content)),
            VNode::Raw { html } => self.add(html),
            VNode::Element {
                tag,
                attributes,
                styles,
                children,
                key,
            } => {
                self.add("<");
                self.add(tag);
                if let Some(key) = key {
                    self.attr("data-key", key);
                }
                for (name, value) in attributes {
                    self.attr(name, value);
                }
                if !styles.is_empty() {
                    let style = styles
                        .iter()
                        .map(|(k, v)| format!("{k}: {v}"))
                        .collect::<Vec<_>>()
                        .join("; ");
                    self.attr("style", &style);
                }
                self.add(">");

                if VOID_ELEMENTS.contains(&tag.as_str()) {
                    return;
                }
                for child in children {
                    self.node(child);
                }
                self.add("</");
                self.add(tag);
                self.add(">");
            }
        }
    }

    fn attr(&mut self, name: &str, value: &str) {
        self.add(" ");
        self.add(name);
        self.add("=\"");
        self.add(&escape_attr(value));
        self.add("\"");
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(text: &str) -> String {
    escape_text(text).replace('"', "&quot;")
}

/// Serialise a single tree fragment.
pub fn to_html(node: &VNode) -> String {
    let mut writer = Writer::new();
    writer.node(node);
    writer.buffer
}

/// A standalone right-to-left HTML page previewing `doc`.
pub fn render_page_html(doc: &Document, viewport: Viewport) -> String {
    let body = to_html(&render_preview(doc, viewport));
    format!(
        "<!DOCTYPE html><html dir=\"rtl\"><head><meta charset=\"utf-8\"><title>{}</title></head><body>{}</body></html>",
        escape_text(&doc.name),
        body
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_and_attributes_are_escaped() {
        let node = VNode::element("p")
            .with_attr("title", "a \"b\" <c>")
            .with_child(VNode::text("1 < 2 & 3"));
        assert_eq!(
            to_html(&node),
            "<p title=\"a &quot;b&quot; &lt;c&gt;\">1 &lt; 2 &amp; 3</p>"
        );
    }

    #[test]
    fn raw_markup_is_verbatim() {
        let node = VNode::element("div").with_child(VNode::raw("<b>bold</b>"));
        assert_eq!(to_html(&node), "<div><b>bold</b></div>");
    }

    #[test]
    fn void_elements_and_styles() {
        let node = VNode::element("input")
            .with_key("name")
            .with_style("color", "red")
            .with_style("border", "0");
        assert_eq!(
            to_html(&node),
            "<input data-key=\"name\" style=\"border: 0; color: red\">"
        );
    }

    #[test]
    fn page_wraps_the_preview() {
        let doc = Document::draft();
        let html = render_page_html(&doc, Viewport::Narrow);
        assert!(html.starts_with("<!DOCTYPE html><html dir=\"rtl\">"));
        assert!(html.contains("preview-narrow"));
        assert!(html.ends_with("</body></html>"));
    }
}
