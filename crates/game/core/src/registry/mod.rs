//! Inheritance-aware type catalog.
//!
//! Every property lookup in the crate flows through [`TypeRegistry`]: an
//! instance value wins, otherwise the instance's type is consulted, then its
//! parent, and so on until a record defines the key or the chain ends.
//!
//! Behavior is resolved the same way. An entity type's `act` property holds a
//! [`BehaviorKey`], and the registry maps that key to a shared
//! [`Behavior`] implementation. Entities never store the implementation, which
//! keeps them plain data.
//!
//! ```text
//! TypeRegistry
//! ├── entity_types: name → TypeRecord { parent, properties }
//! ├── tile_types:   name → TypeRecord { parent, properties }
//! └── behaviors:    BehaviorKey → Arc<dyn Behavior>
//! ```

mod builder;
mod error;
mod property;

pub use builder::RegistryBuilder;
pub use error::RegistryError;
pub use property::{BehaviorKey, Properties, PropertyKey, PropertyValue};

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use crate::engine::Behavior;

/// Namespace a type name lives in.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Category {
    Entity,
    Tile,
}

/// A named bag of properties with an optional parent type in the same category.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeRecord {
    #[cfg_attr(feature = "serde", serde(default))]
    pub parent: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub properties: Properties,
}

impl TypeRecord {
    pub fn new(parent: Option<&str>, properties: Properties) -> Self {
        Self {
            parent: parent.map(str::to_owned),
            properties,
        }
    }
}

/// Anything that carries a type name plus instance-level overrides.
pub trait Instance {
    /// Category the instance's type name is looked up in.
    const CATEGORY: Category;

    fn type_name(&self) -> &str;

    fn properties(&self) -> &Properties;
}

/// Validated, read-only type catalog.
///
/// Built once through [`RegistryBuilder`] and shared (typically behind an
/// `Arc`) for the lifetime of the game.
pub struct TypeRegistry {
    entity_types: BTreeMap<String, TypeRecord>,
    tile_types: BTreeMap<String, TypeRecord>,
    behaviors: HashMap<BehaviorKey, Arc<dyn Behavior>>,
}

impl TypeRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    fn types(&self, category: Category) -> &BTreeMap<String, TypeRecord> {
        match category {
            Category::Entity => &self.entity_types,
            Category::Tile => &self.tile_types,
        }
    }

    /// Returns the record defined for `name`, if any.
    pub fn record(&self, category: Category, name: &str) -> Option<&TypeRecord> {
        self.types(category).get(name)
    }

    pub fn contains(&self, category: Category, name: &str) -> bool {
        self.types(category).contains_key(name)
    }

    /// Iterates `name`, its parent, its grandparent, and so on.
    ///
    /// Unknown names yield nothing.
    pub fn lineage<'a>(&'a self, category: Category, name: &str) -> Lineage<'a> {
        Lineage {
            types: self.types(category),
            next: self.types(category).get_key_value(name).map(|(k, _)| k.as_str()),
        }
    }

    /// Returns true if `name` is `ancestor` or inherits from it.
    pub fn is_a(&self, category: Category, name: &str, ancestor: &str) -> bool {
        self.lineage(category, name).any(|type_name| type_name == ancestor)
    }

    /// Walks the parent chain of `name` and returns the nearest definition of `key`.
    ///
    /// Presence-based: a record that defines `key` as `Bool(false)` stops the
    /// walk. Unknown type names resolve to `None`.
    pub fn resolve_type_property(
        &self,
        category: Category,
        name: &str,
        key: &PropertyKey,
    ) -> Option<&PropertyValue> {
        let types = self.types(category);
        self.lineage(category, name)
            .find_map(|type_name| types.get(type_name)?.properties.get(key))
    }

    /// Returns the instance's own value for `key`, falling back to its type chain.
    pub fn resolve_instance_property<'a, I: Instance>(
        &'a self,
        instance: &'a I,
        key: &PropertyKey,
    ) -> Option<&'a PropertyValue> {
        instance
            .properties()
            .get(key)
            .or_else(|| self.resolve_type_property(I::CATEGORY, instance.type_name(), key))
    }

    pub fn resolve_bool<I: Instance>(&self, instance: &I, key: &PropertyKey) -> Option<bool> {
        self.resolve_instance_property(instance, key)
            .and_then(PropertyValue::as_bool)
    }

    pub fn resolve_int<I: Instance>(&self, instance: &I, key: &PropertyKey) -> Option<i64> {
        self.resolve_instance_property(instance, key)
            .and_then(PropertyValue::as_int)
    }

    pub fn resolve_text<'a, I: Instance>(
        &'a self,
        instance: &'a I,
        key: &PropertyKey,
    ) -> Option<&'a str> {
        self.resolve_instance_property(instance, key)
            .and_then(PropertyValue::as_text)
    }

    /// Resolves the behavior implementation for an entity type.
    ///
    /// This is exactly the `act` property of the type chain mapped through the
    /// behavior table; `None` means the type is inert.
    pub fn behavior(&self, entity_type: &str) -> Option<&Arc<dyn Behavior>> {
        let key = self
            .resolve_type_property(Category::Entity, entity_type, &PropertyKey::Act)?
            .as_behavior()?;
        self.behaviors.get(key)
    }

    pub fn has_behavior(&self, entity_type: &str) -> bool {
        self.behavior(entity_type).is_some()
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut behaviors: Vec<_> = self.behaviors.keys().map(BehaviorKey::as_str).collect();
        behaviors.sort_unstable();
        f.debug_struct("TypeRegistry")
            .field("entity_types", &self.entity_types.keys().collect::<Vec<_>>())
            .field("tile_types", &self.tile_types.keys().collect::<Vec<_>>())
            .field("behaviors", &behaviors)
            .finish()
    }
}

/// Iterator over a type's inheritance chain, nearest first.
pub struct Lineage<'a> {
    types: &'a BTreeMap<String, TypeRecord>,
    next: Option<&'a str>,
}

impl<'a> Iterator for Lineage<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self
            .types
            .get(current)
            .and_then(|record| record.parent.as_deref());
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creature_chain() -> TypeRegistry {
        TypeRegistry::builder()
            .entity(
                "creature",
                None,
                Properties::new()
                    .with(PropertyKey::custom("mortal"), true)
                    .with(PropertyKey::Glyph, 'c'),
            )
            .entity(
                "humanoid",
                Some("creature"),
                Properties::new()
                    .with(PropertyKey::custom("has-hands"), true)
                    .with(PropertyKey::Glyph, 'h'),
            )
            .entity(
                "goblin",
                Some("humanoid"),
                Properties::new()
                    .with(PropertyKey::custom("base-hp"), 5)
                    .with(PropertyKey::custom("mortal"), false),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn resolves_through_ancestors() {
        let registry = creature_chain();
        let base_hp = PropertyKey::custom("base-hp");
        let has_hands = PropertyKey::custom("has-hands");

        assert_eq!(
            registry.resolve_type_property(Category::Entity, "goblin", &has_hands),
            Some(&PropertyValue::Bool(true))
        );
        assert_eq!(
            registry.resolve_type_property(Category::Entity, "goblin", &base_hp),
            Some(&PropertyValue::Int(5))
        );
    }

    #[test]
    fn nearest_definition_wins() {
        let registry = creature_chain();
        assert_eq!(
            registry.resolve_type_property(Category::Entity, "goblin", &PropertyKey::Glyph),
            Some(&PropertyValue::Char('h'))
        );
    }

    #[test]
    fn falsy_definition_stops_the_walk() {
        let registry = creature_chain();
        assert_eq!(
            registry.resolve_type_property(
                Category::Entity,
                "goblin",
                &PropertyKey::custom("mortal")
            ),
            Some(&PropertyValue::Bool(false))
        );
    }

    #[test]
    fn unknown_type_resolves_to_none() {
        let registry = creature_chain();
        assert_eq!(
            registry.resolve_type_property(Category::Entity, "dragon", &PropertyKey::Glyph),
            None
        );
        assert_eq!(
            registry.resolve_type_property(Category::Tile, "goblin", &PropertyKey::Glyph),
            None
        );
        assert_eq!(registry.lineage(Category::Entity, "dragon").count(), 0);
    }

    #[test]
    fn lineage_and_is_a() {
        let registry = creature_chain();
        let chain: Vec<_> = registry.lineage(Category::Entity, "goblin").collect();
        assert_eq!(chain, ["goblin", "humanoid", "creature"]);
        assert!(registry.is_a(Category::Entity, "goblin", "creature"));
        assert!(!registry.is_a(Category::Entity, "humanoid", "goblin"));
    }

    #[test]
    fn redefinition_overwrites() {
        let registry = TypeRegistry::builder()
            .tile("floor", None, Properties::new().with(PropertyKey::Glyph, '.'))
            .tile("floor", None, Properties::new().with(PropertyKey::Glyph, ','))
            .build()
            .unwrap();
        assert_eq!(
            registry.resolve_type_property(Category::Tile, "floor", &PropertyKey::Glyph),
            Some(&PropertyValue::Char(','))
        );
    }

    #[test]
    fn rejects_unknown_parent() {
        let err = TypeRegistry::builder()
            .entity("orc", Some("humanoid"), Properties::new())
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::UnknownParent {
                category: Category::Entity,
                name: "orc".into(),
                parent: "humanoid".into(),
            }
        );
    }

    #[test]
    fn parents_do_not_cross_categories() {
        let err = TypeRegistry::builder()
            .entity("stone", None, Properties::new())
            .tile("rubble", Some("stone"), Properties::new())
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::UnknownParent {
                category: Category::Tile,
                ..
            }
        ));
    }

    #[test]
    fn rejects_inheritance_cycles() {
        let err = TypeRegistry::builder()
            .tile("a", Some("c"), Properties::new())
            .tile("b", Some("a"), Properties::new())
            .tile("c", Some("b"), Properties::new())
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::InheritanceCycle {
                category: Category::Tile,
                ..
            }
        ));

        let err = TypeRegistry::builder()
            .entity("self-parent", Some("self-parent"), Properties::new())
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::InheritanceCycle {
                category: Category::Entity,
                name: "self-parent".into(),
            }
        );
    }

    #[test]
    fn rejects_unregistered_behavior() {
        let err = TypeRegistry::builder()
            .entity(
                "rat",
                None,
                Properties::new().with(PropertyKey::Act, BehaviorKey::new("wander")),
            )
            .build()
            .unwrap_err();
        assert!(matches!(err, RegistryError::UnknownBehavior { .. }));

        let err = TypeRegistry::builder()
            .entity("rat", None, Properties::new().with(PropertyKey::Act, "wander"))
            .build()
            .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidBehaviorValue { .. }));
    }
}
