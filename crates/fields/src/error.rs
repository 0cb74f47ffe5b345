//! Error types for header field parsing and rendering.
//!
//! Errors are split by granularity: [`FieldError`] for problems detected while
//! converting a single field between its string and structured forms,
//! [`HeaderError`] for problems detected while processing a whole header
//! block, and [`MessageError`] for start-line level problems.
//!
//! Whether an error surfaces to the caller is decided by the
//! [`ErrorStrategy`](crate::strategy::ErrorStrategy) attached to the field or
//! collection that detected it; only the raise strategy turns one of these
//! into an `Err` the caller sees.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// The text does not match the field's declared line grammar. The text is
    /// still stored; this is a soft, best-effort failure.
    #[error("{input:?} is not a valid {kind} value")]
    GrammarMismatch { kind: &'static str, input: String },

    /// The grammar matched but the structured conversion is impossible.
    #[error("cannot parse {input:?} as {kind}: {reason}")]
    Unparseable { kind: &'static str, input: String, reason: String },

    /// The structured value has the wrong shape for the field's kind, e.g. a
    /// list assigned to an integer field.
    #[error("structured value has the wrong shape for a {kind} field")]
    WrongShape { kind: &'static str },

    /// Range units other than `bytes` are not supported.
    #[error("unsupported range unit {unit:?}")]
    UnsupportedRangeUnit { unit: String },

    /// A date outside the representable HTTP-date range.
    #[error("date {seconds} is not representable as an HTTP-date")]
    UnrepresentableDate { seconds: u64 },
}

impl FieldError {
    pub fn grammar_mismatch(kind: &'static str, input: &str) -> Self {
        Self::GrammarMismatch { kind, input: input.to_owned() }
    }

    pub fn unparseable<S: ToString>(kind: &'static str, input: &str, reason: S) -> Self {
        Self::Unparseable { kind, input: input.to_owned(), reason: reason.to_string() }
    }

    pub fn wrong_shape(kind: &'static str) -> Self {
        Self::WrongShape { kind }
    }

    pub fn unsupported_range_unit(unit: &str) -> Self {
        Self::UnsupportedRangeUnit { unit: unit.to_owned() }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HeaderError {
    /// A physical header line without a colon separator.
    #[error("malformed header line: {line:?}")]
    MalformedLine { line: String },

    /// A CGI-style variable that is neither `HTTP_*` nor one of the
    /// `CONTENT_TYPE`/`CONTENT_LENGTH` pass-throughs.
    #[error("environment variable {name:?} is not a header")]
    UnexpectedEnvName { name: String },

    #[error("field error: {source}")]
    Field {
        #[from]
        source: FieldError,
    },
}

impl HeaderError {
    pub fn malformed_line(line: &str) -> Self {
        Self::MalformedLine { line: line.to_owned() }
    }

    pub fn unexpected_env_name(name: &str) -> Self {
        Self::UnexpectedEnvName { name: name.to_owned() }
    }
}

#[derive(Error, Debug)]
pub enum MessageError {
    #[error("malformed start line: {line:?}")]
    MalformedStartLine { line: String },

    #[error("invalid http method in start line: {line:?}")]
    InvalidMethod { line: String },

    #[error("invalid status code in start line: {line:?}")]
    InvalidStatus { line: String },

    #[error("unsupported http version: {version:?}")]
    UnsupportedVersion { version: String },

    #[error("header error: {source}")]
    Header {
        #[from]
        source: HeaderError,
    },
}

impl MessageError {
    pub fn malformed_start_line(line: &str) -> Self {
        Self::MalformedStartLine { line: line.to_owned() }
    }

    pub fn invalid_method(line: &str) -> Self {
        Self::InvalidMethod { line: line.to_owned() }
    }

    pub fn invalid_status(line: &str) -> Self {
        Self::InvalidStatus { line: line.to_owned() }
    }

    pub fn unsupported_version(version: &str) -> Self {
        Self::UnsupportedVersion { version: version.to_owned() }
    }
}
