//! The declaration tree the censoring passes operate on.
//!
//! Lowered from the tree-sitter CST (see [`lower`]), the tree is an arena of
//! declaration nodes addressed by [`DeclId`] handles. Children are held as an
//! ordered list of ids on their parent; the parent linkage is a non-owning
//! back-reference used only for "is my enclosing declaration an interface?"
//! queries, never for traversal or ownership.
//!
//! Removal is a tombstone: the declaration is detached from its parent's
//! member list (so every live query stops seeing it) but stays in the arena
//! so the renderer can emit a deletion edit for its span.

pub mod lower;

pub use lower::lower_source;

/// Byte range into the original source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// Stable handle into the declaration arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeclId(u32);

impl DeclId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Kind of a declaration node.
///
/// Only classes, interfaces, methods, constructors, and fields carry
/// censoring rules; every other kind passes through traversal unchanged,
/// which keeps the rule table total over any tree the parser produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
    Method,
    Constructor,
    Field,
    Initializer,
    Other,
}

impl DeclKind {
    /// Class or interface: the kinds the marker pass considers.
    pub fn is_class_or_interface(self) -> bool {
        matches!(self, DeclKind::Class | DeclKind::Interface)
    }

    /// Method, field, or constructor: the kinds counted for emptiness.
    pub fn is_counted_member(self) -> bool {
        matches!(
            self,
            DeclKind::Method | DeclKind::Constructor | DeclKind::Field
        )
    }

    /// Any declaration kind that owns a brace-delimited member body.
    pub fn is_type_like(self) -> bool {
        matches!(
            self,
            DeclKind::Class
                | DeclKind::Interface
                | DeclKind::Enum
                | DeclKind::Record
                | DeclKind::Annotation
        )
    }
}

/// Visibility of a declaration, as read from its modifier list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    NonPublic,
}

impl Visibility {
    pub fn is_public(self) -> bool {
        matches!(self, Visibility::Public)
    }
}

/// Replacement body recorded on a stubbed method or constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubBody {
    /// String literal handed to the runtime-exception constructor.
    pub placeholder: String,
    /// Marker line comment placed above the throw.
    pub marker: String,
}

/// A single declaration node.
#[derive(Debug, Clone)]
pub struct Decl {
    pub kind: DeclKind,
    pub name: Option<String>,
    pub visibility: Visibility,
    pub parent: Option<DeclId>,
    /// Full span of the declaration, including leading attached comments.
    pub span: Span,
    /// Span of the brace-delimited body, when the declaration has one
    /// (method/constructor block, or the `{ ... }` of a type declaration).
    pub body_span: Option<Span>,
    /// Set by the redaction pass when the body is replaced.
    pub stub: Option<StubBody>,
    /// Free-floating comments attached by the annotation pass, in
    /// insertion order.
    pub orphan_comments: Vec<String>,
    members: Vec<DeclId>,
    removed: bool,
}

impl Decl {
    pub fn new(kind: DeclKind, visibility: Visibility, span: Span) -> Self {
        Self {
            kind,
            name: None,
            visibility,
            parent: None,
            span,
            body_span: None,
            stub: None,
            orphan_comments: Vec::new(),
            members: Vec::new(),
            removed: false,
        }
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }
}

/// Arena-backed declaration tree for one source file.
#[derive(Debug, Default)]
pub struct DeclTree {
    decls: Vec<Decl>,
    roots: Vec<DeclId>,
}

impl DeclTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a declaration, wiring up the parent back-reference and the
    /// parent's member list.
    pub fn alloc(&mut self, mut decl: Decl, parent: Option<DeclId>) -> DeclId {
        decl.parent = parent;
        let id = DeclId(self.decls.len() as u32);
        self.decls.push(decl);
        match parent {
            Some(parent_id) => self.decls[parent_id.index()].members.push(id),
            None => self.roots.push(id),
        }
        id
    }

    pub fn get(&self, id: DeclId) -> &Decl {
        &self.decls[id.index()]
    }

    pub fn get_mut(&mut self, id: DeclId) -> &mut Decl {
        &mut self.decls[id.index()]
    }

    /// Top-level declarations, in source order.
    pub fn roots(&self) -> &[DeclId] {
        &self.roots
    }

    /// Live members of a declaration, in source order.
    pub fn members(&self, id: DeclId) -> &[DeclId] {
        &self.get(id).members
    }

    /// Live members of a given kind.
    pub fn members_of_kind(&self, id: DeclId, kind: DeclKind) -> Vec<DeclId> {
        self.members(id)
            .iter()
            .copied()
            .filter(|&m| self.get(m).kind == kind)
            .collect()
    }

    /// Count of live direct members of kind method, field, or constructor.
    ///
    /// Nested type declarations do not count: a type whose only remaining
    /// content is nested types is still "empty" for annotation purposes.
    pub fn counted_member_len(&self, id: DeclId) -> usize {
        self.members(id)
            .iter()
            .filter(|&&m| self.get(m).kind.is_counted_member())
            .count()
    }

    /// True only if the immediate enclosing declaration is an interface.
    pub fn parent_is_interface(&self, id: DeclId) -> bool {
        match self.get(id).parent {
            Some(parent) => self.get(parent).kind == DeclKind::Interface,
            None => false,
        }
    }

    /// Tombstone a declaration and detach it from its parent's member list.
    ///
    /// Removing an already-removed declaration is a no-op, which makes the
    /// redaction pass a stable fixed point under re-runs.
    pub fn remove(&mut self, id: DeclId) {
        if self.decls[id.index()].removed {
            return;
        }
        self.decls[id.index()].removed = true;
        match self.decls[id.index()].parent {
            Some(parent) => self.decls[parent.index()].members.retain(|&m| m != id),
            None => self.roots.retain(|&r| r != id),
        }
    }

    /// True if this declaration or any of its ancestors is tombstoned.
    pub fn in_removed_subtree(&self, id: DeclId) -> bool {
        let mut cur = Some(id);
        while let Some(d) = cur {
            if self.get(d).is_removed() {
                return true;
            }
            cur = self.get(d).parent;
        }
        false
    }

    /// All declarations ever allocated, tombstoned ones included.
    pub fn all_decls(&self) -> impl Iterator<Item = (DeclId, &Decl)> {
        self.decls
            .iter()
            .enumerate()
            .map(|(i, d)| (DeclId(i as u32), d))
    }

    /// All live declarations, depth-first from the roots.
    pub fn live_decls(&self) -> Vec<DeclId> {
        let mut out = Vec::new();
        let mut stack: Vec<DeclId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.members(id).iter().rev().copied());
        }
        out
    }
}
