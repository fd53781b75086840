// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the automaton and the command-line driver.

use std::path::PathBuf;

/// Rejection reasons for [`Trie::add`](crate::trie::Trie::add).
///
/// None of these leave the trie in a modified state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddError {
    /// Search text has zero length.
    #[error("empty pattern")]
    EmptyPattern,

    /// Search text exceeds the maximum accepted length.
    #[error("pattern too long ({len} bytes, max: {max} bytes)")]
    PatternTooLong { len: usize, max: usize },

    /// Another pattern with the same search text is already in the trie.
    #[error("duplicate pattern")]
    DuplicatePattern,

    /// The trie has been finalized and accepts no more patterns.
    #[error("trie is closed")]
    TrieClosed,
}

/// Precondition failures for [`Matcher`](crate::matcher::Matcher).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("trie is not finalized")]
    NotFinalized,
}

/// Precondition failures for [`Replacer`](crate::replace::Replacer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ReplaceError {
    #[error("trie is not finalized")]
    NotFinalized,

    /// No pattern in the trie carries replacement text.
    #[error("no replacements configured")]
    NoReplacementsConfigured,
}

/// Driver error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Rules file not found or invalid
    #[error("config error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// Invalid command-line arguments
    #[error("argument error: {0}")]
    Argument(String),

    /// File I/O error
    #[error("io error: {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configured pattern was rejected by the trie.
    #[error("pattern #{index} rejected: {source}")]
    Pattern {
        index: usize,
        #[source]
        source: AddError,
    },

    #[error(transparent)]
    Replace(#[from] ReplaceError),

    #[error(transparent)]
    Search(#[from] SearchError),

    /// Internal error (bug)
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type using the driver Error
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Command succeeded (and, for `search`, something matched)
    Success = 0,
    /// `search` found nothing
    NoMatch = 1,
    /// Configuration or argument error
    ConfigError = 2,
    /// Internal error
    InternalError = 3,
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::Config { .. } | Error::Argument(_) | Error::Pattern { .. } => {
                ExitCode::ConfigError
            }
            Error::Replace(ReplaceError::NoReplacementsConfigured) => ExitCode::ConfigError,
            Error::Replace(_) | Error::Search(_) => ExitCode::InternalError,
            Error::Io { .. } => ExitCode::InternalError,
            Error::Internal(_) => ExitCode::InternalError,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
