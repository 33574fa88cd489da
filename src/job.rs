//! Orchestration: the censor-copy job and per-file entry points.
//!
//! Each file is processed independently end-to-end (read, parse, redact,
//! annotate, render, write); nothing is shared between files, and the first
//! failure aborts the run with the underlying error. There is no partial
//! recovery: a file that does not parse stops the whole job.

use crate::censor::{annotate, PlaceholderRotation, Redactor};
use crate::config::CensorConfig;
use crate::edit::{atomic_write, EditError};
use crate::render::render;
use crate::tree::lower_source;
use crate::ts::{JavaParser, ParseError};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum CensorError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Edit(#[from] EditError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum JobError {
    #[error("output is not a directory: {0}")]
    OutputNotADirectory(PathBuf),

    #[error("input does not exist: {0}")]
    MissingInput(PathBuf),

    #[error("failed to censor {path}: {source}")]
    Censor {
        path: PathBuf,
        #[source]
        source: CensorError,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Walk(#[from] walkdir::Error),
}

/// Censor one source text: parse, redact, annotate, render.
///
/// The placeholder rotation is constructed fresh from the config for every
/// file, so output is deterministic per file and parallel callers need no
/// shared state.
pub fn censor_source(source: &str, config: &CensorConfig) -> Result<String, CensorError> {
    let mut parser = JavaParser::new()?;
    let parsed = parser.parse_with_source(source)?;
    parsed.check_syntax()?;

    let mut tree = lower_source(&parsed);
    Redactor::new(PlaceholderRotation::new(config.placeholders.clone())).redact(&mut tree);
    annotate(&mut tree);

    Ok(render(source, &tree)?)
}

/// Censor a file in place, rewriting its contents atomically.
///
/// Returns whether the file changed. Parse errors propagate unchanged.
pub fn censor_file(path: &Path, config: &CensorConfig) -> Result<bool, CensorError> {
    let source = fs::read_to_string(path)?;
    let output = censor_source(&source, config)?;
    if output == source {
        return Ok(false);
    }
    atomic_write(path, output.as_bytes())?;
    Ok(true)
}

/// Outcome counts for one job run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JobSummary {
    /// Files copied into the output directory.
    pub copied: usize,
    /// Files censored in the output directory.
    pub censored: usize,
}

/// Copy a configured input set into an output directory, then censor every
/// file there whose extension is configured for censoring.
#[derive(Debug, Clone)]
pub struct CensorJob {
    inputs: Vec<PathBuf>,
    output: PathBuf,
    config: CensorConfig,
}

impl CensorJob {
    pub fn new(inputs: Vec<PathBuf>, output: PathBuf, config: CensorConfig) -> Self {
        Self {
            inputs,
            output,
            config,
        }
    }

    pub fn run(&self) -> Result<JobSummary, JobError> {
        // Invalid output aborts before any file is touched
        if !self.output.is_dir() {
            return Err(JobError::OutputNotADirectory(self.output.clone()));
        }

        let mut summary = JobSummary::default();
        for input in &self.inputs {
            summary.copied += copy_into(input, &self.output)?;
        }

        for entry in WalkDir::new(&self.output) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if !self.config.censors_path(path) {
                continue;
            }
            censor_file(path, &self.config).map_err(|source| JobError::Censor {
                path: path.to_path_buf(),
                source,
            })?;
            summary.censored += 1;
        }

        Ok(summary)
    }
}

fn copy_into(input: &Path, output: &Path) -> Result<usize, JobError> {
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| JobError::Io { path, source }
    };

    if input.is_file() {
        let name = input.file_name().ok_or_else(|| JobError::MissingInput(input.to_path_buf()))?;
        fs::copy(input, output.join(name)).map_err(io_err(input))?;
        return Ok(1);
    }

    if !input.is_dir() {
        return Err(JobError::MissingInput(input.to_path_buf()));
    }

    let mut copied = 0;
    for entry in WalkDir::new(input) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        // strip_prefix cannot fail: the walk is rooted at input
        let rel = entry
            .path()
            .strip_prefix(input)
            .unwrap_or(entry.path());
        let dest = output.join(rel);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(io_err(parent))?;
        }
        fs::copy(entry.path(), &dest).map_err(io_err(entry.path()))?;
        copied += 1;
    }
    Ok(copied)
}
