use crate::registry::{Category, Instance, Properties, PropertyKey, PropertyValue};

use super::{EntityId, Position};

/// An actor or object placed in the world.
///
/// Pure data: the type name selects display and behavior through the
/// [`TypeRegistry`](crate::TypeRegistry), and `properties` hold per-instance
/// overrides such as current hit points or scheduling fields.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    pub id: EntityId,
    pub type_name: String,
    pub position: Position,
    pub properties: Properties,
}

impl Entity {
    pub fn new(id: EntityId, type_name: impl Into<String>, position: Position) -> Self {
        Self {
            id,
            type_name: type_name.into(),
            position,
            properties: Properties::new(),
        }
    }

    #[must_use]
    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<PropertyKey>, value: impl Into<PropertyValue>) -> Self {
        self.properties.set(key, value);
        self
    }
}

impl Instance for Entity {
    const CATEGORY: Category = Category::Entity;

    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn properties(&self) -> &Properties {
        &self.properties
    }
}

/// A map cell. Tiles change only by being replaced in the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub type_name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub properties: Properties,
}

impl Tile {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            properties: Properties::new(),
        }
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<PropertyKey>, value: impl Into<PropertyValue>) -> Self {
        self.properties.set(key, value);
        self
    }
}

impl Instance for Tile {
    const CATEGORY: Category = Category::Tile;

    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn properties(&self) -> &Properties {
        &self.properties
    }
}
