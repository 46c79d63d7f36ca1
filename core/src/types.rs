//! Schema type definitions for option and positional declarations.
//!
//! This module defines the data model a caller uses to describe what a
//! command line may contain. The types are designed for serialization with
//! [`serde`] so a schema can live in a YAML or JSON config file, and are
//! compiled once into a [`Registry`](crate::Registry) before parsing.

use serde::{Deserialize, Serialize};

/// Version of the schema contract (semver).
///
/// Embedded in every [`ParserConfig`](crate::ParserConfig) written by
/// [`ParserConfig::save`](crate::ParserConfig::save).
pub const SCHEMA_CONTRACT_VERSION: &str = "1.0.0";

/// Pass-through policy selected once per parser.
///
/// Decides what happens to tokens that are not part of an in-progress
/// option: whether scanning for options continues, or stops permanently and
/// the rest of the input is handed back verbatim.
///
/// # Examples
///
/// ```
/// use argscan_core::PassThrough;
///
/// assert_eq!(PassThrough::default(), PassThrough::Default);
/// let policy: PassThrough = serde_json::from_str("\"pass-double-dash\"").unwrap();
/// assert_eq!(policy, PassThrough::PassDoubleDash);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PassThrough {
    /// `--` and positional tokens go to leftover; scanning never stops.
    #[default]
    Default,
    /// The first `--` is swallowed and everything after it is leftover.
    PassDoubleDash,
    /// The first positional token and everything after it is leftover.
    PassAfterNonOption,
}

impl PassThrough {
    /// Stable kebab-case name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::PassDoubleDash => "pass-double-dash",
            Self::PassAfterNonOption => "pass-after-non-option",
        }
    }
}

impl std::str::FromStr for PassThrough {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Self::Default),
            "pass-double-dash" => Ok(Self::PassDoubleDash),
            "pass-after-non-option" => Ok(Self::PassAfterNonOption),
            other => Err(format!("unknown pass-through policy: {other}")),
        }
    }
}

/// Element type of a value-carrying option or positional slot.
///
/// # Examples
///
/// ```
/// use argscan_core::ValueType;
///
/// assert_eq!(ValueType::default(), ValueType::String);
/// assert_eq!(ValueType::Integer.as_str(), "integer");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// `true`/`false` (also `1`/`0`).
    Bool,
    /// Base-10 signed 64-bit integer.
    Integer,
    /// Raw text, taken as-is (the default).
    #[default]
    String,
}

impl ValueType {
    /// Lowercase name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Integer => "integer",
            Self::String => "string",
        }
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape of an option: a presence switch, a single value, or a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    /// Presence sets `true`; takes no value (the default).
    #[default]
    Bool,
    /// One value; repeated occurrences overwrite.
    Scalar,
    /// Repeatable; every occurrence appends one element.
    List,
}

impl OptionKind {
    /// Returns `true` for kinds that consume a value.
    pub fn takes_value(&self) -> bool {
        !matches!(self, Self::Bool)
    }
}

/// Declaration of a single option.
///
/// An option has an optional short identifier (`v` for `-v`), an optional
/// long identifier (`verbose` for `--verbose`), a [`kind`](OptionKind), and
/// the sink `name` its values are written under. Options that consume a
/// multi-token run carry a `terminator` literal.
///
/// Identifiers are stored without their leading dashes.
///
/// # Examples
///
/// ```
/// use argscan_core::{OptionKind, OptionSchema, ValueType};
///
/// let verbose = OptionSchema::boolean("verbose", Some('v'), Some("verbose"))
///     .with_description("Enable verbose output");
/// assert_eq!(verbose.display_name(), "--verbose");
/// assert!(!verbose.kind.takes_value());
///
/// let exec = OptionSchema::list("exec", Some('a'), Some("args"), ValueType::String)
///     .terminated_by(";");
/// assert_eq!(exec.kind, OptionKind::List);
/// assert_eq!(exec.terminator.as_deref(), Some(";"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSchema {
    /// Sink key the option's values are written under.
    pub name: String,
    /// Short identifier, without the dash.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<char>,
    /// Long identifier, without the dashes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long: Option<String>,
    /// Bool, scalar or list.
    #[serde(default)]
    pub kind: OptionKind,
    /// Element type for scalar and list options. Ignored for bool options.
    #[serde(default)]
    pub value_type: ValueType,
    /// Whether the option must appear at least once.
    #[serde(default)]
    pub required: bool,
    /// Literal that ends a multi-token run for this option.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminator: Option<String>,
    /// Free-form description, carried for help renderers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl OptionSchema {
    fn new(name: &str, short: Option<char>, long: Option<&str>, kind: OptionKind) -> Self {
        Self {
            name: name.to_string(),
            short,
            long: long.map(String::from),
            kind,
            value_type: ValueType::String,
            required: false,
            terminator: None,
            description: None,
        }
    }

    /// Creates a presence switch.
    pub fn boolean(name: &str, short: Option<char>, long: Option<&str>) -> Self {
        Self::new(name, short, long, OptionKind::Bool)
    }

    /// Creates a single-value option.
    pub fn scalar(
        name: &str,
        short: Option<char>,
        long: Option<&str>,
        value_type: ValueType,
    ) -> Self {
        Self {
            value_type,
            ..Self::new(name, short, long, OptionKind::Scalar)
        }
    }

    /// Creates a repeatable option that appends one element per occurrence.
    pub fn list(
        name: &str,
        short: Option<char>,
        long: Option<&str>,
        value_type: ValueType,
    ) -> Self {
        Self {
            value_type,
            ..Self::new(name, short, long, OptionKind::List)
        }
    }

    /// Makes the option consume every following token up to `literal`.
    pub fn terminated_by(mut self, literal: &str) -> Self {
        self.terminator = Some(literal.to_string());
        self
    }

    /// Marks the option as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    /// Returns the name used in diagnostics: `--long` preferred, then `-s`,
    /// then the sink name.
    ///
    /// # Examples
    ///
    /// ```
    /// use argscan_core::OptionSchema;
    ///
    /// let both = OptionSchema::boolean("v", Some('v'), Some("verbose"));
    /// assert_eq!(both.display_name(), "--verbose");
    /// assert_eq!(OptionSchema::boolean("v", Some('v'), None).display_name(), "-v");
    /// ```
    pub fn display_name(&self) -> String {
        match (&self.long, self.short) {
            (Some(long), _) => format!("--{long}"),
            (None, Some(short)) => format!("-{short}"),
            (None, None) => self.name.clone(),
        }
    }
}

/// Declaration of a positional slot.
///
/// Slots bind leftover tokens in declaration order. Only the last slot may
/// be `multiple`, in which case it absorbs every remaining token.
///
/// # Examples
///
/// ```
/// use argscan_core::{ArgSchema, ValueType};
///
/// let src = ArgSchema::required("source", ValueType::String);
/// assert!(src.required);
///
/// let rest = ArgSchema::optional("rest", ValueType::Integer).allow_multiple();
/// assert!(!rest.required);
/// assert!(rest.multiple);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgSchema {
    /// Sink key the slot's value(s) are written under.
    pub name: String,
    /// Element type.
    #[serde(default)]
    pub value_type: ValueType,
    /// Whether at least one token must bind to this slot.
    #[serde(default)]
    pub required: bool,
    /// Absorbs every remaining token.
    #[serde(default)]
    pub multiple: bool,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ArgSchema {
    /// Creates a required positional slot.
    pub fn required(name: &str, value_type: ValueType) -> Self {
        Self {
            name: name.to_string(),
            value_type,
            required: true,
            multiple: false,
            description: None,
        }
    }

    /// Creates an optional positional slot.
    pub fn optional(name: &str, value_type: ValueType) -> Self {
        Self {
            name: name.to_string(),
            value_type,
            required: false,
            multiple: false,
            description: None,
        }
    }

    /// Marks the slot as repeating.
    pub fn allow_multiple(mut self) -> Self {
        self.multiple = true;
        self
    }
}

/// Complete option and positional declaration for one command.
///
/// # Examples
///
/// ```
/// use argscan_core::*;
///
/// let schema = ParserSchema::new("tool")
///     .with_option(OptionSchema::boolean("verbose", Some('v'), Some("verbose")))
///     .with_option(OptionSchema::scalar("mode", Some('m'), None, ValueType::Integer))
///     .with_arg(ArgSchema::optional("files", ValueType::String).allow_multiple());
///
/// assert_eq!(schema.options.len(), 2);
/// assert!(validate_schema(&schema).is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserSchema {
    /// Command name, used only for diagnostics.
    #[serde(default)]
    pub name: String,
    /// Short description of the command.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Declared options.
    #[serde(default)]
    pub options: Vec<OptionSchema>,
    /// Declared positional slots, in binding order.
    #[serde(default)]
    pub positional: Vec<ArgSchema>,
}

impl ParserSchema {
    /// Creates an empty schema for the named command.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Adds an option.
    pub fn with_option(mut self, option: OptionSchema) -> Self {
        self.options.push(option);
        self
    }

    /// Adds a positional slot.
    pub fn with_arg(mut self, arg: ArgSchema) -> Self {
        self.positional.push(arg);
        self
    }
}
