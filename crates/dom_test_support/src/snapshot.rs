//! Deterministic line-based rendering of a finished document.
//!
//! Not a public stable format; intended for test comparisons only.
//! One line per node, two-space indentation per depth:
//!
//! ```text
//! #document
//!   <!DOCTYPE html>
//!   <ul>
//!     <li id="a">
//!       "text"
//!     <!-- note -->
//! ```

use crate::escape_text;
use dom::{Document, NodeKind, NodeRef};
use std::fmt::Write;

pub fn snapshot_lines(doc: &Document) -> Vec<String> {
    let mut lines = Vec::with_capacity(doc.node_count());
    walk(doc.root(), 0, &mut lines);
    lines
}

pub fn render(doc: &Document) -> String {
    snapshot_lines(doc).join("\n")
}

/// Panic with a line diff when the document does not match `expected`.
pub fn assert_tree_eq(doc: &Document, expected: &[&str]) {
    let actual = snapshot_lines(doc);
    let expected: Vec<String> = expected.iter().map(|line| line.to_string()).collect();
    if actual != expected {
        panic!(
            "tree snapshot mismatch\n{}",
            crate::diff_lines(&expected, &actual)
        );
    }
}

fn walk(node: NodeRef<'_>, depth: usize, lines: &mut Vec<String>) {
    lines.push(format!("{}{}", "  ".repeat(depth), node_label(node)));
    for child in node.children() {
        walk(child, depth + 1, lines);
    }
}

fn node_label(node: NodeRef<'_>) -> String {
    match node.kind() {
        NodeKind::Document => "#document".to_string(),
        NodeKind::Element => {
            let mut label = String::new();
            let _ = write!(&mut label, "<{}", node.tag_name().unwrap_or(""));
            for (name, value) in node.attributes() {
                let _ = write!(&mut label, " {name}=\"{}\"", escape_text(value));
            }
            label.push('>');
            label
        }
        NodeKind::Text => format!("\"{}\"", escape_text(node.text().unwrap_or(""))),
        NodeKind::Comment => format!("<!-- {} -->", escape_text(node.text().unwrap_or(""))),
        NodeKind::Doctype => {
            let doctype = node.as_doctype().unwrap_or(dom::Doctype {
                name: None,
                public_id: None,
                system_id: None,
            });
            let mut label = String::from("<!DOCTYPE");
            if let Some(name) = doctype.name {
                let _ = write!(&mut label, " {name}");
            }
            if let Some(public_id) = doctype.public_id {
                let _ = write!(&mut label, " PUBLIC \"{}\"", escape_text(public_id));
            }
            if let Some(system_id) = doctype.system_id {
                let _ = write!(&mut label, " SYSTEM \"{}\"", escape_text(system_id));
            }
            label.push('>');
            label
        }
    }
}
