use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("failed to set Java language for parser")]
    LanguageSet,

    #[error("failed to parse source code")]
    ParseFailed,

    #[error("syntax error at line {line}, byte {byte_start}..{byte_end}")]
    SyntaxError {
        byte_start: usize,
        byte_end: usize,
        line: usize,
    },

    #[error("multiple syntax errors detected: {count} ERROR nodes")]
    MultipleSyntaxErrors { count: usize },
}
