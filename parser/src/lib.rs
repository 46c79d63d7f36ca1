//! Streaming argument scanner and value binder.
//!
//! Turns a flat token sequence into option values written to an
//! [`OptionSink`] plus a leftover token list, under a [`PassThrough`]
//! policy chosen when the [`Parser`] is built.
//!
//! # Main entry points
//!
//! - [`Parser`]: owns a compiled [`Registry`] and a policy; reusable across
//!   sequential parses.
//! - [`parse`]: the same operation as a free function over a borrowed
//!   registry.
//!
//! A parse either returns the leftover tokens or a [`ParseFailure`] holding
//! both the [`ParseError`] and the leftover gathered before it failed.
//!
//! # Example
//!
//! ```
//! use argscan_core::*;
//! use argscan_parser::Parser;
//!
//! let schema = ParserSchema::new("runner")
//!     .with_option(OptionSchema::boolean("verbose", Some('v'), None))
//!     .with_option(
//!         OptionSchema::list("args", Some('a'), Some("args"), ValueType::String)
//!             .terminated_by(";"),
//!     );
//! let parser = Parser::new(&schema, PassThrough::PassDoubleDash).unwrap();
//!
//! let mut values = ValueStore::new();
//! let leftover = parser
//!     .parse(&["-v", "--args", "bin", "-xyz", ";", "--", "-v"], &mut values)
//!     .unwrap();
//!
//! assert_eq!(leftover, vec!["-v"]);
//! assert_eq!(values.get_bool("verbose"), Some(true));
//! assert_eq!(values.get_list("args"), Some(&[Value::String("bin -xyz".into())][..]));
//! ```
//!
//! # Concurrency
//!
//! A [`Parser`] holds no per-parse state and is `Sync`. Sinks keep values
//! between parses; reset or replace them between calls.

mod error;
mod policy;
mod positional;
mod scanner;
pub mod terminator;

pub use error::{ParseError, ParseFailure, ValueTarget};

use argscan_core::{OptionSink, ParserConfig, ParserSchema, PassThrough, Registry, SchemaError};
use tracing::debug;

use crate::policy::PolicyEngine;
use crate::scanner::Scanner;

/// A compiled registry paired with a pass-through policy.
#[derive(Debug, Clone)]
pub struct Parser {
    registry: Registry,
    policy: PassThrough,
}

impl Parser {
    /// Compiles `schema` and fixes the policy.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaError`] found in `schema`.
    pub fn new(schema: &ParserSchema, policy: PassThrough) -> Result<Self, SchemaError> {
        Ok(Self::from_registry(Registry::build(schema)?, policy))
    }

    pub fn from_registry(registry: Registry, policy: PassThrough) -> Self {
        Self { registry, policy }
    }

    /// Builds a parser from a loaded [`ParserConfig`].
    pub fn from_config(config: &ParserConfig) -> Result<Self, SchemaError> {
        Self::new(&config.schema, config.policy)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn policy(&self) -> PassThrough {
        self.policy
    }

    /// Parses `tokens`, writing values to `sink`. See [`parse`].
    pub fn parse<S, K>(&self, tokens: &[S], sink: &mut K) -> Result<Vec<String>, ParseFailure>
    where
        S: AsRef<str>,
        K: OptionSink + ?Sized,
    {
        parse(tokens, self.policy, &self.registry, sink)
    }
}

/// Scans `tokens` against `registry`, then binds the leftover to the
/// registry's positional slots.
///
/// Option values and positional values are written to `sink` as they are
/// resolved. On success the returned vector holds the tokens that were
/// neither consumed as options nor bound to a slot.
///
/// # Errors
///
/// Returns a [`ParseFailure`] on the first fatal error. Its `leftover` is
/// what had been gathered when scanning stopped, or the complete leftover if
/// positional binding failed.
///
/// # Examples
///
/// ```
/// use argscan_core::*;
/// use argscan_parser::{ParseError, parse};
///
/// let schema = ParserSchema::new("tool")
///     .with_option(OptionSchema::boolean("verbose", Some('v'), None))
///     .with_arg(ArgSchema::required("rest", ValueType::Integer).allow_multiple());
/// let registry = Registry::build(&schema).unwrap();
///
/// let mut values = ValueStore::new();
/// let failure = parse(
///     &["-v", "arg", "-v", "-g"],
///     PassThrough::PassAfterNonOption,
///     &registry,
///     &mut values,
/// )
/// .unwrap_err();
///
/// assert!(matches!(failure.error, ParseError::CoercionFailure { .. }));
/// assert!(failure.to_string().contains("arg"));
/// assert_eq!(failure.leftover, vec!["arg", "-v", "-g"]);
/// ```
pub fn parse<S, K>(
    tokens: &[S],
    policy: PassThrough,
    registry: &Registry,
    sink: &mut K,
) -> Result<Vec<String>, ParseFailure>
where
    S: AsRef<str>,
    K: OptionSink + ?Sized,
{
    let tokens: Vec<&str> = tokens.iter().map(AsRef::as_ref).collect();
    debug!(tokens = tokens.len(), policy = policy.as_str(), "Parsing arguments");

    let leftover = Scanner::new(registry, PolicyEngine::new(policy), &mut *sink, &tokens).run()?;
    positional::bind(registry.positional(), leftover, sink)
}
