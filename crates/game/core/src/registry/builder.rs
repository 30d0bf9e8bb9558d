use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use crate::engine::Behavior;

use super::{
    BehaviorKey, Category, Properties, PropertyKey, PropertyValue, RegistryError, TypeRecord,
    TypeRegistry,
};

/// Collects type definitions and behavior implementations, then validates the
/// whole catalog at once.
///
/// Definitions may arrive in any order; parents are only checked in
/// [`build`](Self::build).
#[derive(Default)]
pub struct RegistryBuilder {
    entity_types: BTreeMap<String, TypeRecord>,
    tile_types: BTreeMap<String, TypeRecord>,
    behaviors: HashMap<BehaviorKey, Arc<dyn Behavior>>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a type, replacing any previous definition with the same name.
    #[must_use]
    pub fn define(
        mut self,
        category: Category,
        name: impl Into<String>,
        parent: Option<&str>,
        properties: Properties,
    ) -> Self {
        self.insert(
            category,
            name,
            TypeRecord {
                parent: parent.map(str::to_owned),
                properties,
            },
        );
        self
    }

    /// Shorthand for `define(Category::Entity, ..)`.
    #[must_use]
    pub fn entity(self, name: impl Into<String>, parent: Option<&str>, properties: Properties) -> Self {
        self.define(Category::Entity, name, parent, properties)
    }

    /// Shorthand for `define(Category::Tile, ..)`.
    #[must_use]
    pub fn tile(self, name: impl Into<String>, parent: Option<&str>, properties: Properties) -> Self {
        self.define(Category::Tile, name, parent, properties)
    }

    /// Registers a behavior implementation under `key`.
    ///
    /// Entity types refer to it with `act = Behavior(key)`.
    #[must_use]
    pub fn behavior(mut self, key: impl Into<String>, behavior: impl Behavior + 'static) -> Self {
        self.behaviors
            .insert(BehaviorKey::new(key), Arc::new(behavior));
        self
    }

    /// Registers an already shared behavior implementation.
    #[must_use]
    pub fn shared_behavior(mut self, key: impl Into<String>, behavior: Arc<dyn Behavior>) -> Self {
        self.behaviors.insert(BehaviorKey::new(key), behavior);
        self
    }

    /// In-place variant of [`define`](Self::define) for loaders.
    pub fn insert(&mut self, category: Category, name: impl Into<String>, record: TypeRecord) {
        let types = match category {
            Category::Entity => &mut self.entity_types,
            Category::Tile => &mut self.tile_types,
        };
        types.insert(name.into(), record);
    }

    /// Validates the catalog and freezes it into a [`TypeRegistry`].
    ///
    /// # Errors
    ///
    /// - [`RegistryError::UnknownParent`] if a parent name is not defined in the same category
    /// - [`RegistryError::InheritanceCycle`] if a parent chain loops
    /// - [`RegistryError::InvalidBehaviorValue`] / [`RegistryError::UnknownBehavior`] if an
    ///   entity type's `act` property does not name a registered behavior
    pub fn build(self) -> Result<TypeRegistry, RegistryError> {
        for (category, types) in [
            (Category::Entity, &self.entity_types),
            (Category::Tile, &self.tile_types),
        ] {
            validate_parents(category, types)?;
            validate_acyclic(category, types)?;
        }

        for (name, record) in &self.entity_types {
            let Some(value) = record.properties.get(&PropertyKey::Act) else {
                continue;
            };
            let PropertyValue::Behavior(key) = value else {
                return Err(RegistryError::InvalidBehaviorValue { name: name.clone() });
            };
            if !self.behaviors.contains_key(key) {
                return Err(RegistryError::UnknownBehavior {
                    name: name.clone(),
                    behavior: key.clone(),
                });
            }
        }

        tracing::debug!(
            entity_types = self.entity_types.len(),
            tile_types = self.tile_types.len(),
            behaviors = self.behaviors.len(),
            "type registry built"
        );

        Ok(TypeRegistry {
            entity_types: self.entity_types,
            tile_types: self.tile_types,
            behaviors: self.behaviors,
        })
    }
}

fn validate_parents(
    category: Category,
    types: &BTreeMap<String, TypeRecord>,
) -> Result<(), RegistryError> {
    for (name, record) in types {
        if let Some(parent) = &record.parent
            && !types.contains_key(parent)
        {
            return Err(RegistryError::UnknownParent {
                category,
                name: name.clone(),
                parent: parent.clone(),
            });
        }
    }
    Ok(())
}

// Every parent exists at this point, so each walk either ends at a root or revisits a name.
fn validate_acyclic(
    category: Category,
    types: &BTreeMap<String, TypeRecord>,
) -> Result<(), RegistryError> {
    let mut known_acyclic: HashSet<&str> = HashSet::new();

    for start in types.keys() {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut current = Some(start.as_str());

        while let Some(name) = current {
            if known_acyclic.contains(name) {
                break;
            }
            if !visited.insert(name) {
                return Err(RegistryError::InheritanceCycle {
                    category,
                    name: start.clone(),
                });
            }
            current = types.get(name).and_then(|record| record.parent.as_deref());
        }

        known_acyclic.extend(visited);
    }
    Ok(())
}
