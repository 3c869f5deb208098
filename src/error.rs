//! Defines custom error types for the application.

use thiserror::Error;

/// Error type returned when splitting a multi-case file fails.
#[derive(Error, Debug)]
pub enum SplitError {
    #[error("Case '{title}' at line {line} is truncated: expected a restriction count and a stock width after the title.")]
    TruncatedHeader { title: String, line: usize },

    #[error("Line {line} appears before any case title. Every case must start with a single-quoted title line.")]
    ContentBeforeFirstCase { line: usize },

    #[error("Case title '{title}' at line {line} cannot be used as a file name.")]
    InvalidTitle { title: String, line: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
