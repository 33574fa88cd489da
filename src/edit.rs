//! The fundamental rendering primitive: byte-span replacement.
//!
//! Every change the passes make compiles down to [`SpanEdit`]s applied
//! bottom-to-top against the original source text. Intelligence lives in
//! span acquisition (the declaration tree), not in the application logic,
//! and everything outside an edited span round-trips byte-for-byte.

use std::fs;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// A single byte-span replacement against one source text.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "SpanEdit does nothing until spliced"]
pub struct SpanEdit {
    /// Starting byte offset (inclusive)
    pub byte_start: usize,
    /// Ending byte offset (exclusive)
    pub byte_end: usize,
    /// New text to insert at [byte_start, byte_end)
    pub new_text: String,
}

impl SpanEdit {
    pub fn replace(byte_start: usize, byte_end: usize, new_text: impl Into<String>) -> Self {
        Self {
            byte_start,
            byte_end,
            new_text: new_text.into(),
        }
    }

    pub fn delete(byte_start: usize, byte_end: usize) -> Self {
        Self::replace(byte_start, byte_end, "")
    }

    pub fn insert(at: usize, new_text: impl Into<String>) -> Self {
        Self::replace(at, at, new_text)
    }
}

#[derive(Error, Debug)]
pub enum EditError {
    #[error("invalid byte range: [{byte_start}, {byte_end}) in source of length {source_len}")]
    InvalidByteRange {
        byte_start: usize,
        byte_end: usize,
        source_len: usize,
    },

    #[error("overlapping edits: span ending at {earlier_end} overlaps span starting at {later_start}")]
    OverlappingEdits {
        earlier_end: usize,
        later_start: usize,
    },

    #[error("edit would create malformed UTF-8")]
    InvalidUtf8Edit,

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Apply a set of edits to a source text in one pass.
///
/// Edits are sorted by byte_start descending and applied bottom-to-top so
/// earlier offsets stay valid. Overlapping spans are rejected; an
/// overlapping set means the span acquisition is buggy, never the input.
pub fn splice_all(source: &str, mut edits: Vec<SpanEdit>) -> Result<String, EditError> {
    if edits.is_empty() {
        return Ok(source.to_string());
    }

    // Descending by start, longest span first on ties: an insertion at the
    // start of a deleted span is applied after the deletion and lands
    // before the surviving text.
    edits.sort_by(|a, b| {
        b.byte_start
            .cmp(&a.byte_start)
            .then(b.byte_end.cmp(&a.byte_end))
    });

    for edit in &edits {
        if edit.byte_start > edit.byte_end || edit.byte_end > source.len() {
            return Err(EditError::InvalidByteRange {
                byte_start: edit.byte_start,
                byte_end: edit.byte_end,
                source_len: source.len(),
            });
        }
    }

    // Sorted descending: for each adjacent pair, the earlier edit must end
    // at or before the later edit starts.
    for window in edits.windows(2) {
        let (later, earlier) = (&window[0], &window[1]);
        if earlier.byte_end > later.byte_start {
            return Err(EditError::OverlappingEdits {
                earlier_end: earlier.byte_end,
                later_start: later.byte_start,
            });
        }
    }

    let mut content = source.as_bytes().to_vec();
    for edit in &edits {
        content.splice(
            edit.byte_start..edit.byte_end,
            edit.new_text.bytes(),
        );
    }

    String::from_utf8(content).map_err(|_| EditError::InvalidUtf8Edit)
}

/// Atomic file write: tempfile + fsync + rename.
///
/// Either the full write succeeds or the file is left unchanged.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<(), EditError> {
    // Tempfile in the same directory, so the rename stays on one filesystem
    let parent = path.parent().ok_or_else(|| {
        EditError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "path has no parent directory",
        ))
    })?;

    let mut temp = tempfile::NamedTempFile::new_in(parent)?;
    temp.write_all(content)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;

    Ok(())
}

/// Read a file, apply the given edits, and write the result back atomically.
///
/// No-op (no write) when the edit set produces identical content.
pub fn apply_to_file(path: &Path, edits: Vec<SpanEdit>) -> Result<bool, EditError> {
    let source = fs::read_to_string(path)?;
    let output = splice_all(&source, edits)?;
    if output == source {
        return Ok(false);
    }
    atomic_write(path, output.as_bytes())?;
    Ok(true)
}
