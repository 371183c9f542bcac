#![deny(missing_docs)]

//! # Body Resolution
//!
//! Builds request bodies and picks their media type. A body containing a
//! binary field anywhere (following registered `$ref`s) is sent as
//! `multipart/form-data`; everything else is `application/json`.

use crate::oas::models::{MediaType, RequestBody, SchemaFragment};
use crate::oas::schemas::refs::extract_ref_name;
use indexmap::IndexMap;
use std::collections::HashSet;

/// JSON payload media type.
pub const APPLICATION_JSON: &str = "application/json";
/// Multipart payload media type, used when a binary field is present.
pub const MULTIPART_FORM_DATA: &str = "multipart/form-data";

/// Wraps a body schema into a request body with the detected media type.
pub fn build_request_body(
    schema: SchemaFragment,
    components: &IndexMap<String, SchemaFragment>,
) -> RequestBody {
    let media_type = body_media_type(&schema, components);
    let mut content = IndexMap::new();
    content.insert(media_type.to_string(), MediaType { schema });
    RequestBody { content }
}

/// The media type of a body schema.
pub fn body_media_type(
    schema: &SchemaFragment,
    components: &IndexMap<String, SchemaFragment>,
) -> &'static str {
    if contains_binary(schema, components) {
        MULTIPART_FORM_DATA
    } else {
        APPLICATION_JSON
    }
}

/// Whether any fragment reachable from `schema` has `format: binary`.
///
/// Walks properties, items and composition keywords, and follows
/// `#/components/schemas/...` pointers. Each entity is visited at most once,
/// so self-referencing entities terminate.
pub fn contains_binary(
    schema: &SchemaFragment,
    components: &IndexMap<String, SchemaFragment>,
) -> bool {
    let mut visited = HashSet::new();
    walk(schema, components, &mut visited)
}

fn walk<'a>(
    schema: &'a SchemaFragment,
    components: &'a IndexMap<String, SchemaFragment>,
    visited: &mut HashSet<&'a str>,
) -> bool {
    if schema.format.as_deref() == Some("binary") {
        return true;
    }

    if let Some(name) = schema.reference.as_deref().and_then(extract_ref_name) {
        if visited.insert(name) {
            if let Some(target) = components.get(name) {
                if walk(target, components, visited) {
                    return true;
                }
            }
        }
    }

    let properties = schema.properties.iter().flat_map(|p| p.values());
    let items = schema.items.iter().map(|i| &**i);
    let compositions = [&schema.one_of, &schema.any_of, &schema.all_of]
        .into_iter()
        .flatten()
        .flatten();

    properties
        .chain(items)
        .chain(compositions)
        .any(|child| walk(child, components, visited))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::registry::extract_entities;
    use crate::oas::schemas::convert;
    use crate::oas::schemas::refs::component_ref;
    use crate::parser::Describe;
    use serde_json::json;

    fn fragment(raw: serde_json::Value) -> SchemaFragment {
        convert(&raw.describe().unwrap())
    }

    #[test]
    fn test_plain_body_is_json() {
        let schema = fragment(json!({
            "type": "object",
            "keys": { "nickName": { "type": "string" } }
        }));
        let body = build_request_body(schema, &IndexMap::new());
        assert!(body.content.contains_key(APPLICATION_JSON));
    }

    #[test]
    fn test_binary_field_forces_multipart() {
        let schema = fragment(json!({
            "type": "object",
            "keys": { "certificate": { "type": "binary", "flags": { "encoding": "base64" } } }
        }));
        assert_eq!(body_media_type(&schema, &IndexMap::new()), MULTIPART_FORM_DATA);
    }

    #[test]
    fn test_binary_array_items_force_multipart() {
        let schema = fragment(json!({
            "type": "object",
            "keys": { "photos": { "type": "array", "items": [{ "type": "binary" }] } }
        }));
        assert!(contains_binary(&schema, &IndexMap::new()));
    }

    #[test]
    fn test_binary_detected_through_registered_entities() {
        let schema = fragment(json!({
            "type": "object",
            "keys": {
                "profile": {
                    "type": "object",
                    "flags": { "description": "Nested" },
                    "keys": {
                        "documents": {
                            "type": "object",
                            "keys": { "scan": { "type": "binary" } }
                        }
                    }
                }
            }
        }));
        let (pointer, entities) = extract_entities("UploadBody", schema);
        let components: IndexMap<String, SchemaFragment> = entities.into_iter().collect();

        assert!(contains_binary(&pointer, &components));
        let body = build_request_body(pointer, &components);
        assert!(body.content.contains_key(MULTIPART_FORM_DATA));
    }

    #[test]
    fn test_self_reference_terminates() {
        let mut components = IndexMap::new();
        let mut properties = IndexMap::new();
        properties.insert(
            "parent".to_string(),
            SchemaFragment::reference(component_ref("Node")),
        );
        components.insert(
            "Node".to_string(),
            SchemaFragment {
                properties: Some(properties),
                ..SchemaFragment::typed("object")
            },
        );
        let pointer = SchemaFragment::reference(component_ref("Node"));
        assert!(!contains_binary(&pointer, &components));
    }
}
