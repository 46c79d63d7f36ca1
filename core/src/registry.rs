//! Compiled option lookup.
//!
//! A [`Registry`] is built once from a [`ParserSchema`] and is read-only
//! afterwards. It resolves short and long identifiers to [`OptionSpec`]s in
//! constant time so the scanning loop never walks the schema.

use std::collections::HashMap;

use crate::{ArgSchema, OptionKind, ParserSchema, SchemaError, ValueType, validate_schema};

/// Compiled form of one [`OptionSchema`](crate::OptionSchema).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    /// Position in the registry, stable for the registry's lifetime.
    pub id: usize,
    /// Sink key.
    pub name: String,
    /// `--long` or `-s`, precomputed for diagnostics.
    pub display: String,
    pub short: Option<char>,
    pub long: Option<String>,
    pub kind: OptionKind,
    pub value_type: ValueType,
    pub required: bool,
    pub terminator: Option<String>,
}

impl OptionSpec {
    /// Returns `true` if the option consumes a value or a terminated run.
    pub fn takes_value(&self) -> bool {
        self.kind.takes_value()
    }
}

/// Immutable identifier lookup plus the positional layout.
///
/// A registry holds no per-parse state and can serve any number of
/// sequential parses.
///
/// # Examples
///
/// ```
/// use argscan_core::*;
///
/// let schema = ParserSchema::new("tool")
///     .with_option(OptionSchema::boolean("verbose", Some('v'), Some("verbose")))
///     .with_option(OptionSchema::scalar("mode", Some('m'), None, ValueType::Integer));
/// let registry = Registry::build(&schema).unwrap();
///
/// assert_eq!(registry.lookup_short('v').unwrap().name, "verbose");
/// assert_eq!(registry.lookup_long("verbose").unwrap().display, "--verbose");
/// assert!(registry.lookup_long("mode").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Registry {
    options: Vec<OptionSpec>,
    by_short: HashMap<char, usize>,
    by_long: HashMap<String, usize>,
    positional: Vec<ArgSchema>,
}

impl Registry {
    /// Validates `schema` and compiles it.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaError`] reported by
    /// [`validate_schema`].
    pub fn build(schema: &ParserSchema) -> Result<Self, SchemaError> {
        if let Some(err) = validate_schema(schema).into_iter().next() {
            return Err(err);
        }

        let mut registry = Self {
            positional: schema.positional.clone(),
            ..Self::default()
        };

        for (id, option) in schema.options.iter().enumerate() {
            if let Some(short) = option.short {
                registry.by_short.insert(short, id);
            }
            if let Some(long) = &option.long {
                registry.by_long.insert(long.clone(), id);
            }
            registry.options.push(OptionSpec {
                id,
                name: option.name.clone(),
                display: option.display_name(),
                short: option.short,
                long: option.long.clone(),
                kind: option.kind,
                value_type: option.value_type,
                required: option.required,
                terminator: option.terminator.clone(),
            });
        }

        Ok(registry)
    }

    pub fn lookup_short(&self, c: char) -> Option<&OptionSpec> {
        self.by_short.get(&c).map(|&id| &self.options[id])
    }

    pub fn lookup_long(&self, long: &str) -> Option<&OptionSpec> {
        self.by_long.get(long).map(|&id| &self.options[id])
    }

    /// All options, in declaration order.
    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    /// Positional slots, in binding order.
    pub fn positional(&self) -> &[ArgSchema] {
        &self.positional
    }

    /// Options marked required.
    pub fn required_options(&self) -> impl Iterator<Item = &OptionSpec> {
        self.options.iter().filter(|o| o.required)
    }
}
