//! Parse errors.
//!
//! No error here is fatal to a whole parse: the stylesheet parser records
//! each one as a formatted diagnostic string and recovers at statement
//! granularity, and value-parse failures are substituted with defaults by
//! the caller.

use core::fmt;

use thiserror::Error;

/// Source position attached to an error: a character offset, or end of
/// input when the failing lexeme was the EOF sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorOffset {
    /// A character offset into the source.
    At(usize),
    /// The error occurred at end of input.
    Eof,
}

impl fmt::Display for ErrorOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::At(offset) => write!(f, "{offset}"),
            Self::Eof => f.write_str("EOF"),
        }
    }
}

/// An error raised while parsing a stylesheet or a declaration value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// An expectation assertion failed: the message names the expected
    /// token set and what was actually found.
    #[error("unexpected {found}, expected {expected}")]
    Unexpected {
        /// Human-readable description of the expected token set.
        expected: String,
        /// Display of the lexeme actually found.
        found: String,
        /// Where the offending lexeme sits in the source.
        offset: ErrorOffset,
    },

    /// A grammar or semantic violation with a free-form message.
    #[error("{message}")]
    Invalid {
        /// What went wrong.
        message: String,
        /// Where it went wrong.
        offset: ErrorOffset,
    },

    /// An `@import` chain revisited a file already being imported.
    #[error("import cycle detected: {chain}")]
    ImportCycle {
        /// The full cycle chain, e.g. `a.css -> b.css -> a.css`.
        chain: String,
        /// Offset of the offending `@import`.
        offset: ErrorOffset,
    },

    /// An imported source could not be loaded.
    #[error("cannot load '{path}': {reason}")]
    SourceLoad {
        /// The logical path that failed to resolve.
        path: String,
        /// Loader-supplied reason.
        reason: String,
        /// Offset of the `@import` that requested it.
        offset: ErrorOffset,
    },
}

impl ParseError {
    /// A free-form error at the given offset.
    #[must_use]
    pub fn invalid(message: impl Into<String>, offset: ErrorOffset) -> Self {
        Self::Invalid {
            message: message.into(),
            offset,
        }
    }

    /// The source position this error refers to.
    #[must_use]
    pub const fn offset(&self) -> ErrorOffset {
        match self {
            Self::Unexpected { offset, .. }
            | Self::Invalid { offset, .. }
            | Self::ImportCycle { offset, .. }
            | Self::SourceLoad { offset, .. } => *offset,
        }
    }

    /// Format this error as the diagnostic string recorded on a
    /// stylesheet: `[ParseError, file=<name>, offset=<int|"EOF">]:
    /// <message>`, with the `file=` segment omitted when no file name is
    /// known.
    #[must_use]
    pub fn diagnostic(&self, file: Option<&str>) -> String {
        match file {
            Some(name) => format!("[ParseError, file={name}, offset={}]: {self}", self.offset()),
            None => format!("[ParseError, offset={}]: {self}", self.offset()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_format() {
        let err = ParseError::invalid("something broke", ErrorOffset::At(42));
        assert_eq!(
            err.diagnostic(Some("theme.css")),
            "[ParseError, file=theme.css, offset=42]: something broke"
        );
        assert_eq!(
            err.diagnostic(None),
            "[ParseError, offset=42]: something broke"
        );
    }

    #[test]
    fn eof_offset_renders_as_text() {
        let err = ParseError::invalid("ran out", ErrorOffset::Eof);
        assert_eq!(err.diagnostic(None), "[ParseError, offset=EOF]: ran out");
    }
}
