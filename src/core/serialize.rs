//! Render a locale tree back to module source.
//!
//! Output is deterministic: keys in insertion order, two-space indentation,
//! trailing commas, double-quoted strings. Anything the literal parser
//! produces renders to text that parses back to an equal tree.

use super::{
    key_path::is_plain_segment,
    parsers::{ExportForm, LocaleDocument},
    tree::{LocaleTree, Node, Scalar, format_number},
};

const INDENT: &str = "  ";

/// Render `tree` as `export default { ... };`.
pub fn serialize(tree: &LocaleTree) -> String {
    render(tree, &ExportForm::Default)
}

/// Render a document with the export form it was read with.
pub fn serialize_document(document: &LocaleDocument) -> String {
    render(&document.tree, &document.export)
}

fn render(tree: &LocaleTree, export: &ExportForm) -> String {
    let mut out = String::new();
    match export {
        ExportForm::Default => out.push_str("export default "),
        ExportForm::Named(name) => {
            out.push_str("export const ");
            out.push_str(name);
            out.push_str(" = ");
        }
        ExportForm::CommonJs => out.push_str("module.exports = "),
    }
    write_map(&mut out, tree, 0);
    out.push_str(";\n");
    out
}

fn write_map(out: &mut String, tree: &LocaleTree, depth: usize) {
    if tree.is_empty() {
        out.push_str("{}");
        return;
    }

    out.push_str("{\n");
    for (key, node) in tree.iter() {
        push_indent(out, depth + 1);
        write_key(out, key);
        out.push_str(": ");
        match node {
            Node::Scalar(scalar) => write_scalar(out, scalar),
            Node::List(items) => write_list(out, items),
            Node::Map(child) => write_map(out, child, depth + 1),
        }
        out.push_str(",\n");
    }
    push_indent(out, depth);
    out.push('}');
}

fn write_list(out: &mut String, items: &[Scalar]) {
    out.push('[');
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        write_scalar(out, item);
    }
    out.push(']');
}

fn write_scalar(out: &mut String, scalar: &Scalar) {
    match scalar {
        Scalar::String(s) => write_string(out, s),
        Scalar::Number(n) => out.push_str(&format_number(*n)),
        Scalar::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
    }
}

fn write_key(out: &mut String, key: &str) {
    if is_identifier(key) {
        out.push_str(key);
    } else {
        write_string(out, key);
    }
}

/// Keys that can be written bare: plain segments that don't start with a
/// digit and contain no `-`.
fn is_identifier(key: &str) -> bool {
    is_plain_segment(key)
        && !key.contains('-')
        && !key.starts_with(|c: char| c.is_ascii_digit())
}

fn write_string(out: &mut String, value: &str) {
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\u{2028}' | '\u{2029}' => out.push_str(&format!("\\u{:04x}", c as u32)),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}
