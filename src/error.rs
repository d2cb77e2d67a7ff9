// error.rs - Error type for compiling and running composed patterns.
//
// Building an expression never fails. Errors appear only once the
// rendered text reaches the engine.

use std::fmt;

/// Error type for pattern compilation and matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The engine rejected the rendered pattern text.
    Pattern { pattern: String, message: String },
    /// The engine failed while searching, e.g. the backtrack limit was hit.
    Execution { message: String },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn pattern(pattern: &str, err: fancy_regex::Error) -> Self {
        Error::Pattern {
            pattern: pattern.to_string(),
            message: err.to_string(),
        }
    }

    pub(crate) fn execution(err: fancy_regex::Error) -> Self {
        Error::Execution {
            message: err.to_string(),
        }
    }

    /// The rejected pattern text, for [`Error::Pattern`].
    pub fn pattern_text(&self) -> Option<&str> {
        match self {
            Error::Pattern { pattern, .. } => Some(pattern),
            Error::Execution { .. } => None,
        }
    }

    /// The engine's description of the failure.
    pub fn message(&self) -> &str {
        match self {
            Error::Pattern { message, .. } | Error::Execution { message } => message,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Pattern { pattern, message } => {
                write!(f, "invalid pattern {:?}: {}", pattern, message)
            }
            Error::Execution { message } => write!(f, "match failed: {}", message),
        }
    }
}

impl std::error::Error for Error {}
