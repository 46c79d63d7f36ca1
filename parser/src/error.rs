//! Parse errors.
//!
//! Every error is fatal to the parse that raised it. Positions are 0-based
//! indexes into the token slice handed to [`parse`](crate::parse).

use std::fmt;

use argscan_core::CoercionError;
use thiserror::Error;

/// Where a rejected value was headed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueTarget {
    /// An option; `position` is the token that supplied the value (or the
    /// option token itself for inline values and terminated runs).
    Option { name: String, position: usize },
    /// A positional slot, by declaration index.
    Slot { name: String, index: usize },
}

impl fmt::Display for ValueTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Option { name, position } => write!(f, "option {name} at token {position}"),
            Self::Slot { name, index } => write!(f, "argument `{name}` (slot {index})"),
        }
    }
}

/// Errors produced while scanning or binding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A short or long identifier is not in the registry.
    #[error("unknown option `{token}` at token {position}")]
    UnknownOption { token: String, position: usize },

    /// A value-consuming option ran out of input.
    #[error("expected a value for option {option} at token {position}")]
    MissingValue { option: String, position: usize },

    /// An inline value was given to an option that cannot take one.
    #[error("option {option} does not accept the inline value `{value}` at token {position}")]
    UnexpectedValue {
        option: String,
        value: String,
        position: usize,
    },

    /// Input ended inside a terminated run.
    #[error("terminator `{terminator}` for option {option} (token {position}) not found")]
    TerminatorNotFound {
        option: String,
        terminator: String,
        position: usize,
    },

    /// A scalar terminated run did not hold exactly one token.
    #[error(
        "option {option} at token {position} expects {expected} value \
         before `{terminator}`, found {found}"
    )]
    ArityMismatch {
        option: String,
        terminator: String,
        expected: usize,
        found: usize,
        position: usize,
    },

    /// A raw value was rejected by its declared type.
    #[error("invalid value for {target}: {source}")]
    CoercionFailure {
        target: ValueTarget,
        #[source]
        source: CoercionError,
    },

    /// A required positional slot received no token.
    #[error("missing required argument `{slot}` (slot {index})")]
    MissingRequiredArgument { slot: String, index: usize },

    /// A required option never appeared.
    #[error("required option {option} was not specified")]
    MissingRequiredOption { option: String },
}

impl ParseError {
    /// Token position the error points at, when it has one.
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::UnknownOption { position, .. }
            | Self::MissingValue { position, .. }
            | Self::UnexpectedValue { position, .. }
            | Self::TerminatorNotFound { position, .. }
            | Self::ArityMismatch { position, .. } => Some(*position),
            Self::CoercionFailure {
                target: ValueTarget::Option { position, .. },
                ..
            } => Some(*position),
            _ => None,
        }
    }
}

/// A failed parse: the error plus the leftover gathered before it.
///
/// For positional binding failures `leftover` is the complete leftover
/// sequence the binder was given, not what remained after the failing slot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{error}")]
pub struct ParseFailure {
    pub error: ParseError,
    pub leftover: Vec<String>,
}

impl ParseFailure {
    pub(crate) fn new(error: ParseError, leftover: Vec<String>) -> Self {
        Self { error, leftover }
    }
}

#[cfg(test)]
mod tests {
    use argscan_core::{ValueType, coerce};

    use super::*;

    #[test]
    fn test_coercion_failure_message_embeds_raw_token() {
        let source = coerce(ValueType::Integer, "notint1").unwrap_err();
        let err = ParseError::CoercionFailure {
            target: ValueTarget::Slot {
                name: "rest".into(),
                index: 0,
            },
            source,
        };

        let message = err.to_string();
        assert!(message.contains("notint1"));
        assert!(message.contains("slot 0"));
        assert_eq!(err.position(), None);
    }

    #[test]
    fn test_arity_message_names_option_and_count() {
        let err = ParseError::ArityMismatch {
            option: "--val".into(),
            terminator: "END".into(),
            expected: 1,
            found: 2,
            position: 0,
        };
        assert_eq!(
            err.to_string(),
            "option --val at token 0 expects 1 value before `END`, found 2"
        );
        assert_eq!(err.position(), Some(0));
    }

    #[test]
    fn test_failure_displays_inner_error() {
        let failure = ParseFailure::new(
            ParseError::MissingRequiredOption {
                option: "--mode".into(),
            },
            vec!["x".into()],
        );
        assert_eq!(failure.to_string(), "required option --mode was not specified");
    }
}
