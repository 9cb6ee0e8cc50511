use std::fmt;

/// Pattern syntax error
///
/// Returned by [`RoutePattern::parse`](super::RoutePattern::parse) and by
/// every matcher's `add()`. Offsets are byte offsets into the sub-pattern
/// (protocol, hostname, pathname or search) that failed to parse, which is
/// carried alongside for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// An opening `(` without a matching `)`
    UnclosedGroup {
        /// The sub-pattern being parsed
        source: String,
        /// Offset of the unmatched `(`
        offset: usize,
    },
    /// A `)` with no open group to close
    UnmatchedClose {
        /// The sub-pattern being parsed
        source: String,
        /// Offset of the stray `)`
        offset: usize,
    },
    /// A `:` not followed by a parameter name
    MissingParamName {
        /// The sub-pattern being parsed
        source: String,
        /// Offset of the `:`
        offset: usize,
    },
    /// A parameter or wildcard name used twice in one pattern
    DuplicateParam {
        /// The full pattern
        pattern: String,
        /// The repeated name
        name: String,
    },
    /// The generated regular expression was rejected (size limits)
    Regex {
        /// The full pattern
        pattern: String,
        /// Message from the regex engine
        message: String,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnclosedGroup { source, offset } => {
                write!(f, "unclosed '(' at offset {offset} in pattern '{source}'")
            }
            ParseError::UnmatchedClose { source, offset } => {
                write!(f, "unmatched ')' at offset {offset} in pattern '{source}'")
            }
            ParseError::MissingParamName { source, offset } => {
                write!(
                    f,
                    "missing parameter name after ':' at offset {offset} in pattern '{source}'"
                )
            }
            ParseError::DuplicateParam { pattern, name } => {
                write!(f, "parameter '{name}' is used more than once in pattern '{pattern}'")
            }
            ParseError::Regex { pattern, message } => {
                write!(f, "pattern '{pattern}' could not be compiled: {message}")
            }
        }
    }
}

impl std::error::Error for ParseError {}
