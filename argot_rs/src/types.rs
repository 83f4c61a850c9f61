//! Value types shared by the grammar, the parser and the help formatter.
//!
//! `ValueType` is the closed set of types an option or argument can declare.
//! `Value` is what the parser binds after coercion.

use std::fmt;
use std::str::FromStr;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::GrammarError;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl FromStr for ColorMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "auto" => Ok(ColorMode::Auto),
            "always" | "yes" | "true" => Ok(ColorMode::Always),
            "never" | "no" | "false" => Ok(ColorMode::Never),
            _ => Err(format!(
                "Invalid color mode '{}'. Use: auto, always, or never.",
                value
            )),
        }
    }
}

/// Declared type of an option or argument.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ValueType {
    #[default]
    String,
    Integer,
    Boolean,
    /// Collects every remaining positional token.
    List,
    /// Collects every remaining positional token as `key:value` entries.
    Map,
}

impl ValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Integer => "integer",
            ValueType::Boolean => "boolean",
            ValueType::List => "list",
            ValueType::Map => "map",
        }
    }

    /// List and map arguments consume the rest of the positional tokens.
    pub fn is_collection(&self) -> bool {
        matches!(self, ValueType::List | ValueType::Map)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueType {
    type Err = GrammarError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "string" => Ok(ValueType::String),
            "integer" | "int" => Ok(ValueType::Integer),
            "boolean" | "bool" => Ok(ValueType::Boolean),
            "list" | "array" => Ok(ValueType::List),
            "map" | "hash" => Ok(ValueType::Map),
            other => Err(GrammarError::UnsupportedType(other.to_string())),
        }
    }
}

/// Key of a map entry: either the text before `:` or the index of a bare token.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub enum MapKey {
    Named(String),
    Index(usize),
}

impl fmt::Display for MapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapKey::Named(name) => f.write_str(name),
            MapKey::Index(index) => write!(f, "{}", index),
        }
    }
}

/// Insertion-ordered map produced by `map` arguments and options.
///
/// Named keys overwrite in place. Bare entries get the next free index,
/// counting only bare entries, so `["a:1", "b", "c:2", "d"]` yields
/// `{a: 1, 0: b, c: 2, 1: d}`. A key written in canonical decimal form
/// (`0:x`) is an index key and moves the counter past itself, so
/// `["0:x", "y"]` yields `{0: x, 1: y}`.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct MapValue {
    entries: Vec<(MapKey, String)>,
    next_index: usize,
}

impl MapValue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one raw token, splitting on its first `:`.
    pub fn push_token(&mut self, token: &str) {
        match token.split_once(':') {
            Some((key, value)) => self.insert(key, value),
            None => self.push_bare(token),
        }
    }

    pub fn insert(&mut self, key: &str, value: &str) {
        let key = map_key(key);
        if let MapKey::Index(index) = key {
            self.next_index = self.next_index.max(index + 1);
        }
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value.to_string();
        } else {
            self.entries.push((key, value.to_string()));
        }
    }

    pub fn push_bare(&mut self, value: &str) {
        self.entries
            .push((MapKey::Index(self.next_index), value.to_string()));
        self.next_index += 1;
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        let key = map_key(key);
        self.entries
            .iter()
            .find_map(|(k, v)| (*k == key).then_some(v.as_str()))
    }

    pub fn get_index(&self, index: usize) -> Option<&str> {
        self.entries.iter().find_map(|(k, v)| match k {
            MapKey::Index(i) if *i == index => Some(v.as_str()),
            _ => None,
        })
    }

    pub fn entries(&self) -> &[(MapKey, String)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// `"3"` is `Index(3)`; `"03"`, `"+3"` and `"-3"` stay named.
fn map_key(key: &str) -> MapKey {
    match key.parse::<usize>() {
        Ok(index) if index.to_string() == key => MapKey::Index(index),
        _ => MapKey::Named(key.to_string()),
    }
}

impl fmt::Display for MapValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .entries
            .iter()
            .map(|(k, v)| format!("{}:{}", k, v))
            .collect();
        f.write_str(&rendered.join(","))
    }
}

impl Serialize for MapValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(&key.to_string(), value)?;
        }
        map.end()
    }
}

/// A bound, coerced value.
#[derive(Clone, PartialEq, Eq, Debug, serde::Serialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Integer(i64),
    Boolean(bool),
    List(Vec<String>),
    Map(MapValue),
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::String(_) => ValueType::String,
            Value::Integer(_) => ValueType::Integer,
            Value::Boolean(_) => ValueType::Boolean,
            Value::List(_) => ValueType::List,
            Value::Map(_) => ValueType::Map,
        }
    }

    /// Empty values do not count as defaults: `""`, `0`, `false`, `[]` and `{}`.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::String(s) => s.is_empty(),
            Value::Integer(n) => *n == 0,
            Value::Boolean(b) => !b,
            Value::List(items) => items.is_empty(),
            Value::Map(map) => map.is_empty(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&MapValue> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::List(items) => f.write_str(&items.join(",")),
            Value::Map(map) => write!(f, "{}", map),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<Vec<String>> for Value {
    fn from(value: Vec<String>) -> Self {
        Value::List(value)
    }
}

impl From<MapValue> for Value {
    fn from(value: MapValue) -> Self {
        Value::Map(value)
    }
}

// ============================================================================
// Tests
// ============================================================================
