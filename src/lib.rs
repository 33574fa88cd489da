//! Java Censor: redact implementations, keep the public contract.
//!
//! Censors a body of Java source so it can be shared (interviews,
//! portfolios, licensing demos) without exposing proprietary logic: public
//! types, public method/field signatures, and interface members stay
//! visible and compilable; public method and constructor bodies are
//! replaced with a stub that throws at call time; non-public members are
//! deleted outright. Output is always syntactically valid Java.
//!
//! # Architecture
//!
//! Source text is parsed with tree-sitter ([`ts`]) and lowered into an
//! arena-backed declaration tree ([`tree`]). Two independent passes mutate
//! the tree in order: the redaction pass ([`censor::Redactor`]) applies the
//! keep / strip / replace rules, then the annotation pass
//! ([`censor::annotate`]) marks every type it left empty. Rendering
//! ([`render`]) compiles the tree's mutation records down to byte-span
//! edits ([`edit::SpanEdit`]) spliced against the original text, so
//! untouched code round-trips byte-for-byte.
//!
//! # Example
//!
//! ```no_run
//! use java_censor::{censor_source, CensorConfig};
//!
//! let source = "public class A { private int x; }";
//! let censored = censor_source(source, &CensorConfig::default())?;
//! assert!(!censored.contains("private int x"));
//! # Ok::<(), java_censor::CensorError>(())
//! ```

pub mod censor;
pub mod config;
pub mod edit;
pub mod job;
pub mod render;
pub mod tree;
pub mod ts;

// Re-exports
pub use censor::{annotate, is_marker, PlaceholderRotation, Redactor};
pub use config::{load_from_path, load_from_str, CensorConfig, ConfigError};
pub use edit::{splice_all, EditError, SpanEdit};
pub use job::{censor_file, censor_source, CensorError, CensorJob, JobError, JobSummary};
pub use render::render;
pub use tree::{lower_source, DeclId, DeclKind, DeclTree, Visibility};
pub use ts::{JavaParser, ParseError, ParsedSource};
