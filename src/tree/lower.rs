//! Lowering from the tree-sitter CST to the declaration tree.
//!
//! Only nodes the censoring rules care about become declarations; everything
//! else (package/import declarations, enum constants, annotation elements)
//! is left untouched in the source text and simply never enters the tree.

use crate::tree::{Decl, DeclId, DeclKind, DeclTree, Span, Visibility};
use crate::ts::ParsedSource;
use tree_sitter::Node;

/// Build a declaration tree from a parsed source file.
pub fn lower_source(parsed: &ParsedSource) -> DeclTree {
    let mut tree = DeclTree::new();
    let root = parsed.root_node();
    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        lower_node(parsed, child, None, &mut tree);
    }
    tree
}

fn decl_kind(node_kind: &str) -> Option<DeclKind> {
    match node_kind {
        "class_declaration" => Some(DeclKind::Class),
        "interface_declaration" => Some(DeclKind::Interface),
        "enum_declaration" => Some(DeclKind::Enum),
        "record_declaration" => Some(DeclKind::Record),
        "annotation_type_declaration" => Some(DeclKind::Annotation),
        "method_declaration" => Some(DeclKind::Method),
        "constructor_declaration" | "compact_constructor_declaration" => {
            Some(DeclKind::Constructor)
        }
        // Interface fields surface as constant_declaration in the grammar
        "field_declaration" | "constant_declaration" => Some(DeclKind::Field),
        // Instance initializers are bare blocks inside a class body
        "static_initializer" | "block" => Some(DeclKind::Initializer),
        _ => None,
    }
}

fn lower_node(
    parsed: &ParsedSource,
    node: Node<'_>,
    parent: Option<DeclId>,
    tree: &mut DeclTree,
) -> Option<DeclId> {
    let kind = decl_kind(node.kind())?;

    let span = Span::new(extended_start(node), node.end_byte());
    let mut decl = Decl::new(kind, visibility_of(node), span);
    decl.name = node
        .child_by_field_name("name")
        .map(|n| parsed.node_text(n).to_string());

    let body = node.child_by_field_name("body");
    decl.body_span = body.map(|b| Span::new(b.start_byte(), b.end_byte()));

    let id = tree.alloc(decl, parent);

    if kind.is_type_like() {
        if let Some(body) = body {
            lower_body(parsed, body, id, tree);
        }
    }

    Some(id)
}

fn lower_body(parsed: &ParsedSource, body: Node<'_>, parent: DeclId, tree: &mut DeclTree) {
    let mut cursor = body.walk();
    for child in body.children(&mut cursor) {
        // Enum members live one level down, behind the constant list
        if child.kind() == "enum_body_declarations" {
            lower_body(parsed, child, parent, tree);
        } else {
            lower_node(parsed, child, Some(parent), tree);
        }
    }
}

/// Start of the declaration including its leading attached comments.
///
/// A run of comments directly above a declaration (no blank line in the
/// chain) belongs to it: when the declaration is deleted, its javadoc goes
/// with it, the way JavaParser treats attached comments.
fn extended_start(node: Node<'_>) -> usize {
    let mut start = node.start_byte();
    let mut row = node.start_position().row;
    let mut cur = node;
    while let Some(prev) = cur.prev_sibling() {
        if !is_comment(prev) || row.saturating_sub(prev.end_position().row) > 1 {
            break;
        }
        // A trailing comment on the previous sibling's line belongs to
        // that sibling, not to this declaration
        let trails_previous = prev.prev_sibling().is_some_and(|before| {
            !is_comment(before) && before.end_position().row == prev.start_position().row
        });
        if trails_previous {
            break;
        }
        start = prev.start_byte();
        row = prev.start_position().row;
        cur = prev;
    }
    start
}

fn is_comment(node: Node<'_>) -> bool {
    matches!(node.kind(), "line_comment" | "block_comment")
}

fn visibility_of(node: Node<'_>) -> Visibility {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "modifiers" {
            let mut modifiers = child.walk();
            for m in child.children(&mut modifiers) {
                if m.kind() == "public" {
                    return Visibility::Public;
                }
            }
        }
    }
    Visibility::NonPublic
}
