//! Rendering the mutated declaration tree back to source text.
//!
//! The tree records what changed (tombstones, stub bodies, orphan
//! comments); this module turns those records into [`SpanEdit`]s against
//! the original text and splices them. Untouched declarations, comments,
//! and formatting round-trip byte-for-byte.

use crate::edit::{splice_all, EditError, SpanEdit};
use crate::tree::{Decl, DeclTree, Span};

/// Render the censored source for a mutated tree.
pub fn render(source: &str, tree: &DeclTree) -> Result<String, EditError> {
    splice_all(source, collect_edits(source, tree))
}

/// Derive the span edits implied by the tree's mutation records.
pub fn collect_edits(source: &str, tree: &DeclTree) -> Vec<SpanEdit> {
    let mut edits = Vec::new();
    let mut deletions: Vec<Span> = Vec::new();

    for (id, decl) in tree.all_decls() {
        if decl.is_removed() {
            // Only the top-most removed declaration emits a deletion; its
            // descendants are covered by the same span.
            let parent_removed = decl
                .parent
                .is_some_and(|p| tree.in_removed_subtree(p));
            if !parent_removed {
                deletions.push(deletion_span(source, decl.span));
            }
            continue;
        }

        // Unreachable survivors inside a removed subtree get no edits of
        // their own; the ancestor's deletion swallows them.
        if tree.in_removed_subtree(id) {
            continue;
        }

        if let (Some(stub), Some(body)) = (&decl.stub, decl.body_span) {
            edits.push(SpanEdit::replace(
                body.start,
                body.end,
                stub_text(source, decl, &stub.marker, &stub.placeholder),
            ));
        }

        if !decl.orphan_comments.is_empty() {
            if let Some(body) = decl.body_span {
                // Just inside the opening brace, insertion order preserved
                edits.push(SpanEdit::insert(body.start + 1, orphan_text(source, decl)));
            }
        }
    }

    // Whitespace hygiene can make deletions of same-line neighbors touch;
    // merge them so the splice never sees overlapping spans.
    deletions.sort_by_key(|s| s.start);
    let mut merged: Vec<Span> = Vec::with_capacity(deletions.len());
    for span in deletions {
        match merged.last_mut() {
            Some(last) if span.start <= last.end => last.end = last.end.max(span.end),
            _ => merged.push(span),
        }
    }
    edits.extend(merged.into_iter().map(|s| SpanEdit::delete(s.start, s.end)));

    edits
}

/// Deletion with whitespace hygiene: eat the indentation before the span
/// and the remainder of the final line including its newline.
fn deletion_span(source: &str, span: Span) -> Span {
    let bytes = source.as_bytes();

    let mut start = span.start;
    while start > 0 && matches!(bytes[start - 1], b' ' | b'\t') {
        start -= 1;
    }

    let mut end = span.end;
    while end < bytes.len() && matches!(bytes[end], b' ' | b'\t') {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'\r' {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'\n' {
        end += 1;
    }

    Span::new(start, end)
}

/// Replacement body: exactly one throw of a runtime exception, preceded by
/// the marker line comment.
fn stub_text(source: &str, decl: &Decl, marker: &str, placeholder: &str) -> String {
    let indent = line_indent(source, decl.span.start);
    let inner = format!("{indent}    ");
    format!(
        "{{\n{inner}// {marker}\n{inner}throw new java.lang.RuntimeException(\"{}\");\n{indent}}}",
        escape_literal(placeholder)
    )
}

/// Orphan comment block inserted after a type body's opening brace.
fn orphan_text(source: &str, decl: &Decl) -> String {
    let indent = line_indent(source, decl.span.start);
    let inner = format!("{indent}    ");
    let mut out = String::from("\n");
    for line in &decl.orphan_comments {
        if line.is_empty() {
            out.push_str(&format!("{inner}//\n"));
        } else {
            out.push_str(&format!("{inner}// {line}\n"));
        }
    }
    out
}

/// Leading whitespace of the line containing the given byte offset.
fn line_indent(source: &str, byte: usize) -> &str {
    let bytes = source.as_bytes();
    let line_start = source[..byte.min(source.len())]
        .rfind('\n')
        .map_or(0, |i| i + 1);
    let mut end = line_start;
    while end < bytes.len() && matches!(bytes[end], b' ' | b'\t') {
        end += 1;
    }
    &source[line_start..end]
}

fn escape_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out
}
