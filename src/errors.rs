/*!
 * Error types for the annotext application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

use crate::language::LanguageTag;

/// Errors an analyzer can raise internally.
///
/// These never reach callers of the pipeline directly; the pipeline is the
/// only place that turns them into an [`AnalysisError`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyzerError {
    /// The analyzer did not answer in time
    #[error("Analyzer timed out after {0} ms")]
    Timeout(u64),

    /// The analyzer rejected the input encoding or shape
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// A backing service failed
    #[error("Backend error: {0}")]
    Backend(String),

    /// The analyzer produced segments that break the segment invariants
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Errors surfaced by the annotation pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Blank or whitespace-only text
    #[error("Please enter some text to analyze.")]
    EmptyInput,

    /// Language tag outside the supported set
    #[error("Unsupported language tag: '{0}'")]
    UnsupportedLanguageTag(String),

    /// The resolved analyzer could not produce a result
    #[error("Analysis failed for {language}: {reason}")]
    AnalyzerFailure {
        /// Language the request was issued for
        language: LanguageTag,
        /// Underlying analyzer error
        reason: AnalyzerError,
    },
}

impl AnalysisError {
    /// Whether the caller should offer a retry with the same input
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::AnalyzerFailure { .. })
    }

    /// Short machine-readable kind used by event consumers
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyInput => "empty_input",
            Self::UnsupportedLanguageTag(_) => "unsupported_language_tag",
            Self::AnalyzerFailure { .. } => "analyzer_failure",
        }
    }
}

/// Errors that can occur while loading a lexicon
#[derive(Error, Debug)]
pub enum LexiconError {
    /// The lexicon file could not be read
    #[error("Failed to read lexicon {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The lexicon file is not a valid JSON entry map
    #[error("Failed to parse lexicon {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// An entry would produce an interactive segment without a definition
    #[error("Lexicon {path} has a blank definition for '{key}'")]
    InvalidEntry { path: String, key: String },
}

/// Errors raised by an analysis session
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    /// Saving requires a completed analysis of the current input
    #[error("Please analyze the text before saving.")]
    NotAnalyzed,

    /// Retry was requested but no failed request is pending
    #[error("Nothing to retry")]
    NothingToRetry,
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the annotation pipeline
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// Error from lexicon loading
    #[error("Lexicon error: {0}")]
    Lexicon(#[from] LexiconError),

    /// Error from the session
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
