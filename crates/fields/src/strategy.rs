//! Pluggable handling of grammar and parse failures.
//!
//! Every field value and header collection carries an [`ErrorStrategy`] chosen
//! at construction time. The strategy decides what a detected problem turns
//! into: an `Err` for the caller, a log line, an invalid-mark on the subject,
//! or nothing at all. The default is [`ErrorStrategy::Ignore`], matching the
//! "be liberal in what you accept" posture of the parser: bad input degrades
//! to default values instead of failing the whole message.

use tracing::warn;

/// What to do when input (or a structured value) violates a field's grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorStrategy {
    /// Propagate the failure to the caller as an `Err`.
    Raise,
    /// Swallow the failure; the subject keeps whatever partial state it had.
    #[default]
    Ignore,
    /// Report through `tracing::warn!`, then continue as [`Self::Ignore`].
    Log,
    /// Mark the subject invalid, then continue.
    Invalidate,
}

impl ErrorStrategy {
    /// Dispose of a detected error according to the strategy.
    ///
    /// `subject` names the field (or collection) that detected the problem;
    /// `valid` is its invalid-mark, cleared by [`Self::Invalidate`].
    pub(crate) fn dispose<E: std::fmt::Display>(self, subject: &str, valid: &mut bool, err: E) -> Result<(), E> {
        match self {
            Self::Raise => Err(err),
            Self::Ignore => Ok(()),
            Self::Log => {
                warn!(subject, error = %err, "header field error");
                Ok(())
            }
            Self::Invalidate => {
                *valid = false;
                Ok(())
            }
        }
    }
}
