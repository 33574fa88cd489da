//! Placeholder and marker text used by the censoring passes.

/// Notice written into emptied type bodies and recognized as a marker.
pub const REDACTION_NOTICE: &str = "Source removed";

/// Tool notice attached to every stub body and emptied type.
pub const TOOL_NOTICE: &str =
    "This code was redacted by java-censor - the public API surface is preserved";

/// Default placeholder texts handed to the runtime-exception constructor.
pub const DEFAULT_PLACEHOLDERS: &[&str] = &[
    "Source removed",
    "Implementation redacted",
    "Not part of this distribution",
];

/// True if a comment line matches one of the recognized marker strings.
pub fn is_marker(text: &str) -> bool {
    let text = text.trim();
    text == TOOL_NOTICE || DEFAULT_PLACEHOLDERS.contains(&text)
}

/// Deterministic rotation over a fixed list of placeholder texts.
///
/// Injected into the redaction pass at construction time, so tests can
/// supply a known sequence and parallel file processing needs no shared
/// counter. Cycles in call order, wrapping around.
#[derive(Debug, Clone)]
pub struct PlaceholderRotation {
    texts: Vec<String>,
    next: usize,
}

impl PlaceholderRotation {
    pub fn new(texts: Vec<String>) -> Self {
        let texts = if texts.is_empty() {
            DEFAULT_PLACEHOLDERS.iter().map(|s| s.to_string()).collect()
        } else {
            texts
        };
        Self { texts, next: 0 }
    }

    /// The next placeholder in rotation.
    pub fn next_text(&mut self) -> String {
        let text = self.texts[self.next % self.texts.len()].clone();
        self.next = (self.next + 1) % self.texts.len();
        text
    }
}

impl Default for PlaceholderRotation {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_cycles_and_wraps() {
        let mut rotation = PlaceholderRotation::new(vec!["a".into(), "b".into()]);
        assert_eq!(rotation.next_text(), "a");
        assert_eq!(rotation.next_text(), "b");
        assert_eq!(rotation.next_text(), "a");
    }

    #[test]
    fn empty_list_falls_back_to_defaults() {
        let mut rotation = PlaceholderRotation::new(Vec::new());
        assert_eq!(rotation.next_text(), DEFAULT_PLACEHOLDERS[0]);
    }

    #[test]
    fn marker_recognition() {
        assert!(is_marker(REDACTION_NOTICE));
        assert!(is_marker(TOOL_NOTICE));
        assert!(is_marker("  Source removed  "));
        assert!(!is_marker("ordinary comment"));
    }
}
