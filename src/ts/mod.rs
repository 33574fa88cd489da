//! Tree-sitter parse boundary for Java source.
//!
//! Parsing is treated as a black-box capability: source text goes in, a
//! concrete syntax tree with byte spans comes out, and comments, modifiers,
//! and nesting are preserved faithfully enough to round-trip. The censoring
//! passes never see tree-sitter nodes directly; they operate on the
//! declaration tree lowered from the CST (see [`crate::tree`]).

pub mod errors;
pub mod parser;

pub use errors::ParseError;
pub use parser::{ErrorNode, JavaParser, ParsedSource};
