#![deny(missing_docs)]

//! # Reference Resolution
//!
//! helper functions to build and resolve `#/components/schemas/...` pointers.

use crate::oas::models::SchemaFragment;

/// Prefix of every component schema pointer.
pub const COMPONENT_SCHEMA_PREFIX: &str = "#/components/schemas/";

/// Builds the pointer string for a registered entity.
pub fn component_ref(name: &str) -> String {
    format!("{}{}", COMPONENT_SCHEMA_PREFIX, name)
}

/// Extracts the entity name from a local component pointer.
/// e.g. `#/components/schemas/Hero` -> `Hero`
pub fn extract_ref_name(ref_loc: &str) -> Option<&str> {
    ref_loc
        .strip_prefix(COMPONENT_SCHEMA_PREFIX)
        .filter(|name| !name.is_empty())
}

/// Pointer to a nested entity, placed where `site` used to be.
///
/// OpenAPI 3.0 ignores siblings of `$ref`, so when the field carries a
/// non-empty description, `nullable` or a `default`, the pointer is wrapped
/// in `allOf` and those keywords stay next to it.
pub fn entity_pointer(name: &str, site: &SchemaFragment) -> SchemaFragment {
    let pointer = SchemaFragment::reference(component_ref(name));
    let description = site.description.clone().filter(|d| !d.is_empty());
    if description.is_none() && site.nullable.is_none() && site.default.is_none() {
        return pointer;
    }
    SchemaFragment {
        all_of: Some(vec![pointer]),
        description,
        nullable: site.nullable,
        default: site.default.clone(),
        ..SchemaFragment::default()
    }
}
