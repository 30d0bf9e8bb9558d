//! Typed property bags shared by type records and instances.
//!
//! Lookups are presence-based: `Some(PropertyValue::Bool(false))` is a real
//! answer that stops inheritance, while `None` means "keep walking" and,
//! at the end of the chain, "use the caller's default".

use std::collections::BTreeMap;
use std::fmt;

/// Keys understood by the core plus a [`PropertyKey::Custom`] escape hatch for
/// game-specific data.
///
/// The string form is kebab-case (`"blocks-movement"`); any other string parses
/// into `Custom`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum PropertyKey {
    /// Behavior handle resolved by the scheduler.
    Act,
    Name,
    Description,
    Glyph,
    Color,
    Hp,
    MaxHp,
    /// Default time cost of the entity's timed actions.
    Delay,
    /// Scheduler tick at which the entity may act again.
    NextAction,
    Walkable,
    BlocksMovement,
    Transparent,
    /// Tile types (matched through inheritance) the entity may enter regardless
    /// of their walkability.
    CanTraverse,
    Custom(String),
}

impl PropertyKey {
    /// Creates a game-specific key.
    pub fn custom(name: impl Into<String>) -> Self {
        PropertyKey::Custom(name.into())
    }

    pub fn as_str(&self) -> &str {
        match self {
            PropertyKey::Act => "act",
            PropertyKey::Name => "name",
            PropertyKey::Description => "description",
            PropertyKey::Glyph => "glyph",
            PropertyKey::Color => "color",
            PropertyKey::Hp => "hp",
            PropertyKey::MaxHp => "max-hp",
            PropertyKey::Delay => "delay",
            PropertyKey::NextAction => "next-action",
            PropertyKey::Walkable => "walkable",
            PropertyKey::BlocksMovement => "blocks-movement",
            PropertyKey::Transparent => "transparent",
            PropertyKey::CanTraverse => "can-traverse",
            PropertyKey::Custom(name) => name,
        }
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for PropertyKey {
    fn from(value: &str) -> Self {
        match value {
            "act" => PropertyKey::Act,
            "name" => PropertyKey::Name,
            "description" => PropertyKey::Description,
            "glyph" => PropertyKey::Glyph,
            "color" => PropertyKey::Color,
            "hp" => PropertyKey::Hp,
            "max-hp" => PropertyKey::MaxHp,
            "delay" => PropertyKey::Delay,
            "next-action" => PropertyKey::NextAction,
            "walkable" => PropertyKey::Walkable,
            "blocks-movement" => PropertyKey::BlocksMovement,
            "transparent" => PropertyKey::Transparent,
            "can-traverse" => PropertyKey::CanTraverse,
            other => PropertyKey::Custom(other.to_owned()),
        }
    }
}

impl From<String> for PropertyKey {
    fn from(value: String) -> Self {
        PropertyKey::from(value.as_str())
    }
}

impl From<PropertyKey> for String {
    fn from(key: PropertyKey) -> Self {
        match key {
            PropertyKey::Custom(name) => name,
            other => other.as_str().to_owned(),
        }
    }
}

/// Opaque handle naming a behavior implementation registered in the
/// [`TypeRegistry`](super::TypeRegistry).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BehaviorKey(pub String);

impl BehaviorKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BehaviorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tagged property value.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PropertyValue {
    Bool(bool),
    Int(i64),
    Text(String),
    Char(char),
    List(Vec<String>),
    Behavior(BehaviorKey),
}

impl PropertyValue {
    /// Only `Bool(false)` is falsy; `Int(0)` and empty text are truthy values.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, PropertyValue::Bool(false))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            PropertyValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            PropertyValue::Char(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            PropertyValue::List(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_behavior(&self) -> Option<&BehaviorKey> {
        match self {
            PropertyValue::Behavior(key) => Some(key),
            _ => None,
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Int(value)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        PropertyValue::Int(i64::from(value))
    }
}

impl From<u64> for PropertyValue {
    fn from(value: u64) -> Self {
        PropertyValue::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<char> for PropertyValue {
    fn from(value: char) -> Self {
        PropertyValue::Char(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Text(value.to_owned())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Text(value)
    }
}

impl From<BehaviorKey> for PropertyValue {
    fn from(value: BehaviorKey) -> Self {
        PropertyValue::Behavior(value)
    }
}

/// Ordered property bag.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Properties {
    values: BTreeMap<PropertyKey, PropertyValue>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<PropertyKey>, value: impl Into<PropertyValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Inserts or replaces a value, returning the previous one.
    pub fn set(
        &mut self,
        key: impl Into<PropertyKey>,
        value: impl Into<PropertyValue>,
    ) -> Option<PropertyValue> {
        self.values.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &PropertyKey) -> Option<&PropertyValue> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &PropertyKey) -> bool {
        self.values.contains_key(key)
    }

    pub fn remove(&mut self, key: &PropertyKey) -> Option<PropertyValue> {
        self.values.remove(key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PropertyKey, &PropertyValue)> {
        self.values.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for Properties
where
    K: Into<PropertyKey>,
    V: Into<PropertyValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}
