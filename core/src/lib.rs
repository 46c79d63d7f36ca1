//! Core schema types, registry and value coercion for argscan.
//!
//! This crate defines everything the argument scanner needs besides the scan
//! itself:
//!
//! - [`ParserSchema`]: options ([`OptionSchema`]) and positional slots
//!   ([`ArgSchema`]) a command accepts.
//! - [`Registry`]: the schema compiled into constant-time identifier lookup
//!   ([`OptionSpec`]).
//! - [`coerce`]: raw string to typed [`Value`] conversion.
//! - [`OptionSink`]: the write-back interface the parser reports values
//!   through, with [`ValueStore`] as the stock implementation.
//! - [`ParserConfig`]: policy plus schema, loadable from YAML or JSON.
//!
//! Validation ([`validate_schema`]) catches malformed identifiers, duplicate
//! options, unusable terminators and impossible positional layouts.
//!
//! # Example
//!
//! ```
//! use argscan_core::*;
//!
//! let schema = ParserSchema::new("runner")
//!     .with_option(
//!         OptionSchema::boolean("verbose", Some('v'), Some("verbose"))
//!             .with_description("Enable verbose output"),
//!     )
//!     .with_option(
//!         OptionSchema::list("args", Some('a'), Some("args"), ValueType::String)
//!             .terminated_by(";"),
//!     )
//!     .with_arg(ArgSchema::optional("files", ValueType::String).allow_multiple());
//!
//! assert!(validate_schema(&schema).is_empty());
//! let registry = Registry::build(&schema).unwrap();
//! assert_eq!(registry.lookup_short('a').unwrap().terminator.as_deref(), Some(";"));
//! ```

mod config;
mod registry;
mod sink;
mod types;
mod validate;
mod value;

pub use config::{ConfigError, ParserConfig};
pub use registry::{OptionSpec, Registry};
pub use sink::{Binding, OptionSink, ValueStore};
pub use types::*;
pub use validate::{SchemaError, validate_schema};
pub use value::{CoercionError, Value, coerce};
