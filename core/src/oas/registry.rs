#![deny(missing_docs)]

//! # Entity Registry
//!
//! Stores named object schemas in the document's `components/schemas` and
//! hands out `$ref` pointers to them.
//!
//! Registration is split in two steps:
//! - `extract_entities` walks a fragment and returns the rewritten tree plus
//!   the `(name, fragment)` pairs to register, touching no state.
//! - `EntityRegistry::register` applies those pairs.
//!
//! Names are not checked for collisions: a later registration under the same
//! name replaces the earlier one.

use crate::oas::models::SchemaFragment;
use crate::oas::routes::naming::{item_entity_name, nested_entity_name};
use crate::oas::schemas::refs::{component_ref, entity_pointer};
use indexmap::IndexMap;

/// Entities produced by one extraction, parent first.
pub type ExtractedEntities = Vec<(String, SchemaFragment)>;

/// Splits an object fragment into named entities.
///
/// Nested object fields (and object items of array fields) are replaced by
/// pointers to their own entities, named after the parent entity and the
/// field. Returns the pointer to `name` plus every entity to register.
/// Non-object fragments are returned unchanged with no entities.
pub fn extract_entities(name: &str, fragment: SchemaFragment) -> (SchemaFragment, ExtractedEntities) {
    if !fragment.is_object() {
        return (fragment, Vec::new());
    }
    let mut entities = Vec::new();
    extract_into(name, fragment, &mut entities);
    (SchemaFragment::reference(component_ref(name)), entities)
}

fn extract_into(name: &str, mut fragment: SchemaFragment, out: &mut ExtractedEntities) {
    let mut nested = Vec::new();
    if let Some(properties) = fragment.properties.take() {
        let rewritten = properties
            .into_iter()
            .map(|(field, child)| {
                let child = lift_field(name, &field, child, &mut nested);
                (field, child)
            })
            .collect::<IndexMap<_, _>>();
        fragment.properties = Some(rewritten);
    }
    out.push((name.to_string(), fragment));
    out.extend(nested);
}

fn lift_field(
    parent: &str,
    field: &str,
    child: SchemaFragment,
    out: &mut ExtractedEntities,
) -> SchemaFragment {
    if child.is_object() {
        let entity = nested_entity_name(parent, field);
        let pointer = entity_pointer(&entity, &child);
        extract_into(&entity, child, out);
        return pointer;
    }

    match child.items {
        Some(items) if items.is_object() => {
            let entity = item_entity_name(parent, field);
            let pointer = entity_pointer(&entity, &items);
            extract_into(&entity, *items, out);
            SchemaFragment {
                items: Some(Box::new(pointer)),
                ..child
            }
        }
        items => SchemaFragment { items, ..child },
    }
}

/// Named schemas destined for `components/schemas`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityRegistry {
    schemas: IndexMap<String, SchemaFragment>,
}

impl EntityRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry pre-seeded with existing component schemas.
    pub fn with_schemas(schemas: IndexMap<String, SchemaFragment>) -> Self {
        Self { schemas }
    }

    /// Registers an object fragment and its nested objects.
    ///
    /// Returns the `$ref` location of `name`. Non-object fragments are
    /// registered as-is.
    pub fn register(&mut self, name: &str, fragment: SchemaFragment) -> String {
        let (_, entities) = extract_entities(name, fragment.clone());
        if entities.is_empty() {
            self.insert(name.to_string(), fragment);
        } else {
            self.apply(entities);
        }
        component_ref(name)
    }

    /// Registers a fragment when it is an object, otherwise returns it inline.
    pub fn register_if_object(&mut self, name: &str, fragment: SchemaFragment) -> SchemaFragment {
        let (schema, entities) = extract_entities(name, fragment);
        self.apply(entities);
        schema
    }

    /// Inserts pre-extracted entities in order.
    pub fn apply(&mut self, entities: ExtractedEntities) {
        for (name, schema) in entities {
            self.insert(name, schema);
        }
    }

    fn insert(&mut self, name: String, schema: SchemaFragment) {
        tracing::debug!(entity = %name, "registering component schema");
        if self
            .schemas
            .get(&name)
            .is_some_and(|existing| existing != &schema)
        {
            tracing::warn!(entity = %name, "component schema overwritten by a later registration");
        }
        self.schemas.insert(name, schema);
    }

    /// Looks up a registered entity.
    pub fn get(&self, name: &str) -> Option<&SchemaFragment> {
        self.schemas.get(name)
    }

    /// Whether an entity is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Borrows every registered schema.
    pub fn schemas(&self) -> &IndexMap<String, SchemaFragment> {
        &self.schemas
    }

    /// Consumes the registry, returning the schemas for `components/schemas`.
    pub fn into_schemas(self) -> IndexMap<String, SchemaFragment> {
        self.schemas
    }
}
