//! Write-back interface between the parser and caller storage.
//!
//! The parser never owns the values it produces. It hands each one to an
//! [`OptionSink`] keyed by the option or positional slot name. [`ValueStore`]
//! is the stock implementation: an ordered map that can be inspected after a
//! parse and serialized for display.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::Value;

/// Receives values produced while parsing.
///
/// `name` is the [`OptionSchema::name`](crate::OptionSchema::name) or
/// [`ArgSchema::name`](crate::ArgSchema::name) of the target.
///
/// A sink keeps whatever it was given across parses. Callers that reuse a
/// sink between parses must reset it themselves, and must not share one sink
/// between concurrent parses.
pub trait OptionSink {
    /// A bool option was present.
    fn set_bool(&mut self, name: &str, value: bool);
    /// A scalar option or slot was bound; replaces any previous value.
    fn set_scalar(&mut self, name: &str, value: Value);
    /// A list option or repeating slot received one more element.
    fn append_list_element(&mut self, name: &str, value: Value);
}

/// A bound value as stored by [`ValueStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Binding {
    Bool(bool),
    Scalar(Value),
    List(Vec<Value>),
}

/// Ordered in-memory sink.
///
/// # Examples
///
/// ```
/// use argscan_core::{OptionSink, Value, ValueStore};
///
/// let mut store = ValueStore::new();
/// store.set_bool("verbose", true);
/// store.set_scalar("mode", Value::Integer(1));
/// store.set_scalar("mode", Value::Integer(2));
/// store.append_list_element("args", Value::String("a b".into()));
/// store.append_list_element("args", Value::String("c".into()));
///
/// assert_eq!(store.get_bool("verbose"), Some(true));
/// assert_eq!(store.get_scalar("mode"), Some(&Value::Integer(2)));
/// assert_eq!(store.get_list("args").map(|l| l.len()), Some(2));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValueStore {
    values: BTreeMap<String, Binding>,
}

impl ValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.values.get(name)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        match self.values.get(name)? {
            Binding::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn get_scalar(&self, name: &str) -> Option<&Value> {
        match self.values.get(name)? {
            Binding::Scalar(v) => Some(v),
            _ => None,
        }
    }

    pub fn get_list(&self, name: &str) -> Option<&[Value]> {
        match self.values.get(name)? {
            Binding::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Forgets every bound value, for reuse across parses.
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl OptionSink for ValueStore {
    fn set_bool(&mut self, name: &str, value: bool) {
        self.values.insert(name.to_string(), Binding::Bool(value));
    }

    fn set_scalar(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), Binding::Scalar(value));
    }

    fn append_list_element(&mut self, name: &str, value: Value) {
        let entry = self
            .values
            .entry(name.to_string())
            .or_insert_with(|| Binding::List(Vec::new()));
        match entry {
            Binding::List(items) => items.push(value),
            // A name first bound as a scalar is promoted so nothing is lost.
            other => {
                let previous = std::mem::replace(other, Binding::List(Vec::new()));
                if let Binding::List(items) = other {
                    match previous {
                        Binding::Scalar(v) => items.push(v),
                        Binding::Bool(b) => items.push(Value::Bool(b)),
                        Binding::List(_) => {}
                    }
                    items.push(value);
                }
            }
        }
    }
}
