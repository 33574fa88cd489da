//! The censoring engine: redaction and annotation passes.
//!
//! Two independent, composable traversal jobs over one declaration tree,
//! invoked strictly in order. The redaction pass decides keep / strip /
//! replace per declaration; the annotation pass then marks every type
//! declaration it left empty. They share no mutable state, and keeping them
//! separate preserves the ordering guarantee (annotation sees the final
//! emptiness of each type).

pub mod annotate;
pub mod redact;
pub mod stub;

pub use annotate::{annotate, marker_comment_lines};
pub use redact::Redactor;
pub use stub::{is_marker, PlaceholderRotation, DEFAULT_PLACEHOLDERS, REDACTION_NOTICE, TOOL_NOTICE};
