//! The annotation pass.
//!
//! Runs strictly after redaction: a class or interface left with zero
//! direct members (of kind method, field, or constructor) gets a block of
//! orphan marker comments appended inside its body. Nested types do not
//! count toward emptiness, and traversal continues into them either way.

use crate::censor::stub::{REDACTION_NOTICE, TOOL_NOTICE};
use crate::tree::{DeclId, DeclTree};

/// Append marker comments to every emptied class or interface.
///
/// Not idempotent by design: the pass checks member emptiness, not prior
/// annotation, so a second run over an already-annotated empty type appends
/// a second block of markers. The pass runs exactly once per file.
pub fn annotate(tree: &mut DeclTree) {
    for root in tree.roots().to_vec() {
        visit(tree, root);
    }
}

fn visit(tree: &mut DeclTree, id: DeclId) {
    let decl = tree.get(id);
    if decl.kind.is_class_or_interface()
        && decl.body_span.is_some()
        && tree.counted_member_len(id) == 0
    {
        for line in marker_comment_lines() {
            tree.get_mut(id).orphan_comments.push(line);
        }
    }

    for member in tree.members(id).to_vec() {
        visit(tree, member);
    }
}

/// The five orphan comment lines written into an emptied type, in order:
/// blank, notice, blank, tool line, blank.
pub fn marker_comment_lines() -> Vec<String> {
    vec![
        String::new(),
        REDACTION_NOTICE.to_string(),
        String::new(),
        TOOL_NOTICE.to_string(),
        String::new(),
    ]
}
