//! The redaction pass.
//!
//! Depth-first, pre-order: a declaration's fate is decided before its
//! children are visited, and removed subtrees are never re-visited. The
//! rule table is a single match over [`DeclKind`], total over every kind
//! the lowering can produce, so the pass cannot fail on a parsed tree.

use crate::censor::stub::{PlaceholderRotation, TOOL_NOTICE};
use crate::tree::{DeclId, DeclKind, DeclTree, StubBody};

/// Rewrites a declaration tree so only the public contract survives.
///
/// Public method and constructor bodies are replaced with a single throw of
/// a runtime exception; non-public members are deleted; interface members
/// are kept untouched regardless of visibility.
pub struct Redactor {
    placeholders: PlaceholderRotation,
}

impl Redactor {
    pub fn new(placeholders: PlaceholderRotation) -> Self {
        Self { placeholders }
    }

    /// Run the pass over the whole tree.
    ///
    /// Re-running on an already-redacted tree performs no further removals;
    /// the pass is a stable fixed point with respect to the tree shape.
    pub fn redact(&mut self, tree: &mut DeclTree) {
        for root in tree.roots().to_vec() {
            self.visit(tree, root);
        }
    }

    fn visit(&mut self, tree: &mut DeclTree, id: DeclId) {
        match tree.get(id).kind {
            DeclKind::Class | DeclKind::Interface => self.visit_type(tree, id),
            DeclKind::Method => self.visit_method(tree, id),
            DeclKind::Field => self.visit_field(tree, id),
            // Constructors are decided inline by the enclosing type rule;
            // they never get an independent rule of their own.
            DeclKind::Constructor => {}
            // Enums, records, annotation types, initializers: no rule,
            // but nested declarations still get processed.
            _ => self.visit_children(tree, id),
        }
    }

    fn visit_children(&mut self, tree: &mut DeclTree, id: DeclId) {
        for member in tree.members(id).to_vec() {
            self.visit(tree, member);
        }
    }

    fn visit_type(&mut self, tree: &mut DeclTree, id: DeclId) {
        if tree.get(id).visibility.is_public() {
            // Public constructors keep their signature with a stub body,
            // non-public constructors are deleted.
            for ctor in tree.members_of_kind(id, DeclKind::Constructor) {
                if tree.get(ctor).visibility.is_public() {
                    self.stub_body(tree, ctor);
                } else {
                    tree.remove(ctor);
                }
            }
        } else {
            // Non-public type: every directly-owned method, field, and
            // constructor goes, regardless of the member's own visibility.
            for member in tree.members(id).to_vec() {
                if tree.get(member).kind.is_counted_member() {
                    tree.remove(member);
                }
            }
        }

        // Outer visibility does not propagate: nested declarations are
        // processed independently by the same rules.
        self.visit_children(tree, id);
    }

    fn visit_method(&mut self, tree: &mut DeclTree, id: DeclId) {
        if tree.parent_is_interface(id) {
            // Interface members are part of the contract, kept untouched.
            return;
        }
        if tree.get(id).visibility.is_public() {
            self.stub_body(tree, id);
        } else {
            tree.remove(id);
        }
    }

    fn visit_field(&mut self, tree: &mut DeclTree, id: DeclId) {
        if tree.parent_is_interface(id) || tree.get(id).visibility.is_public() {
            return;
        }
        tree.remove(id);
    }

    fn stub_body(&mut self, tree: &mut DeclTree, id: DeclId) {
        // Abstract declarations carry no body; nothing to replace.
        if tree.get(id).body_span.is_none() {
            return;
        }
        tree.get_mut(id).stub = Some(StubBody {
            placeholder: self.placeholders.next_text(),
            marker: TOOL_NOTICE.to_string(),
        });
    }
}
