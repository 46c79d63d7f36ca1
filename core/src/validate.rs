//! Schema validation.
//!
//! Catches structural problems in a [`ParserSchema`] before a registry is
//! built from it: malformed or duplicate identifiers, terminators that cannot
//! work, and positional layouts the binder cannot satisfy.
//!
//! # Examples
//!
//! ```
//! use argscan_core::*;
//!
//! let schema = ParserSchema::new("tool")
//!     .with_option(OptionSchema::boolean("verbose", Some('v'), Some("verbose")));
//! assert!(validate_schema(&schema).is_empty());
//!
//! // Invalid: long identifier written with its dashes
//! let bad = ParserSchema::new("tool")
//!     .with_option(OptionSchema::boolean("verbose", None, Some("--verbose")));
//! assert!(!validate_schema(&bad).is_empty());
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::{OptionKind, OptionSchema, ParserSchema};

/// Schema validation errors.
///
/// Each variant describes one structural problem. The `Display` impl gives a
/// human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// An option or positional slot has an empty sink name.
    #[error("sink name cannot be empty")]
    EmptyName,
    /// An option has neither short nor long identifier.
    #[error("option `{0}` must define a short or long identifier")]
    MissingOptionName(String),
    /// Short identifier is `-`, `=` or whitespace.
    #[error("invalid short identifier: {0:?}")]
    InvalidShortName(char),
    /// Long identifier is empty, starts with `-`, or contains `=` or whitespace.
    #[error("invalid long identifier: {0:?}")]
    InvalidLongName(String),
    /// Two options share a short or long identifier.
    #[error("duplicate option identifier: {0}")]
    DuplicateOption(String),
    /// Two options or slots write to the same sink name.
    #[error("duplicate sink name: {0}")]
    DuplicateName(String),
    /// A bool option declares a terminator.
    #[error("bool option {0} cannot declare a terminator")]
    TerminatorOnBool(String),
    /// A terminator literal is empty.
    #[error("option {0} declares an empty terminator")]
    EmptyTerminator(String),
    /// A repeating positional slot is followed by another slot.
    #[error("repeating positional `{0}` must be the last slot")]
    RepeatingSlotNotLast(String),
    /// A required positional slot follows an optional one.
    #[error("required positional `{0}` follows an optional slot")]
    RequiredAfterOptional(String),
}

/// Validates a parser schema.
///
/// Returns every problem found, in declaration order, or an empty vector for
/// a valid schema.
///
/// # Examples
///
/// ```
/// use argscan_core::*;
///
/// let schema = ParserSchema::new("tool")
///     .with_arg(ArgSchema::optional("rest", ValueType::String).allow_multiple())
///     .with_arg(ArgSchema::optional("tail", ValueType::String));
/// let errors = validate_schema(&schema);
/// assert_eq!(errors, vec![SchemaError::RepeatingSlotNotLast("rest".into())]);
/// ```
pub fn validate_schema(schema: &ParserSchema) -> Vec<SchemaError> {
    let mut names: HashSet<&str> = HashSet::new();
    let mut errors = validate_options(&schema.options, &mut names);

    let mut seen_optional = false;
    for (index, slot) in schema.positional.iter().enumerate() {
        if slot.name.trim().is_empty() {
            errors.push(SchemaError::EmptyName);
        } else if !names.insert(slot.name.as_str()) {
            errors.push(SchemaError::DuplicateName(slot.name.clone()));
        }
        if slot.multiple && index + 1 != schema.positional.len() {
            errors.push(SchemaError::RepeatingSlotNotLast(slot.name.clone()));
        }
        if slot.required && seen_optional {
            errors.push(SchemaError::RequiredAfterOptional(slot.name.clone()));
        }
        seen_optional |= !slot.required;
    }

    errors
}

fn validate_options<'a>(
    options: &'a [OptionSchema],
    names: &mut HashSet<&'a str>,
) -> Vec<SchemaError> {
    let mut errors = Vec::new();
    let mut shorts = HashSet::new();
    let mut longs = HashSet::new();

    for option in options {
        if option.name.trim().is_empty() {
            errors.push(SchemaError::EmptyName);
        } else if !names.insert(option.name.as_str()) {
            errors.push(SchemaError::DuplicateName(option.name.clone()));
        }

        if option.short.is_none() && option.long.is_none() {
            errors.push(SchemaError::MissingOptionName(option.name.clone()));
        }

        if let Some(short) = option.short {
            if short == '-' || short == '=' || short.is_whitespace() {
                errors.push(SchemaError::InvalidShortName(short));
            } else if !shorts.insert(short) {
                errors.push(SchemaError::DuplicateOption(format!("-{short}")));
            }
        }

        if let Some(long) = &option.long {
            if long.is_empty()
                || long.starts_with('-')
                || long.contains('=')
                || long.chars().any(char::is_whitespace)
            {
                errors.push(SchemaError::InvalidLongName(long.clone()));
            } else if !longs.insert(long.as_str()) {
                errors.push(SchemaError::DuplicateOption(format!("--{long}")));
            }
        }

        if let Some(terminator) = &option.terminator {
            if option.kind == OptionKind::Bool {
                errors.push(SchemaError::TerminatorOnBool(option.display_name()));
            } else if terminator.is_empty() {
                errors.push(SchemaError::EmptyTerminator(option.display_name()));
            }
        }
    }

    errors
}
