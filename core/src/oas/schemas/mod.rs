#![deny(missing_docs)]

//! # Schema Conversion
//!
//! Converts one structural description into one OpenAPI 3.0 schema fragment.
//!
//! Dispatch is a single match over `NodeKind`; each kind has its own mapping
//! function. Unknown or missing types take the object path. Every fragment
//! carries a `description` (empty when absent) plus the node's first example,
//! default, enum and nullability.

pub mod refs;

use crate::oas::models::SchemaFragment;
use crate::oas::normalization::{mark_nullable, split_null};
use crate::parser::{Description, NodeKind, Rule};
use indexmap::IndexMap;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Converts a structural description into a schema fragment.
///
/// Pure and total: the same description always yields the same fragment.
pub fn convert(node: &Description) -> SchemaFragment {
    let mut schema = match node.kind() {
        NodeKind::String => convert_string(node),
        NodeKind::Number | NodeKind::Integer => convert_number(node),
        NodeKind::Boolean => SchemaFragment::typed("boolean"),
        NodeKind::Date => convert_date(node),
        NodeKind::Binary => convert_binary(node),
        NodeKind::Array => convert_array(node),
        NodeKind::Alternatives => convert_alternatives(node),
        NodeKind::Null => SchemaFragment {
            nullable: Some(true),
            ..SchemaFragment::default()
        },
        NodeKind::Object | NodeKind::Unknown => convert_object(node),
    };
    apply_annotations(&mut schema, node);
    schema
}

fn apply_annotations(schema: &mut SchemaFragment, node: &Description) {
    match node.description_text() {
        Some(text) => schema.description = Some(text.to_string()),
        None if schema.description.is_none() => schema.description = Some(String::new()),
        None => {}
    }
    if let Some(example) = node.examples.first() {
        schema.example = Some(example.clone());
    }
    if let Some(default) = &node.flags.default {
        schema.default = Some(default.clone());
    }
    if let Some(values) = node.enum_values() {
        schema.enum_values = Some(values);
    }
    mark_nullable(schema, node.allows_null());
}

fn convert_string(node: &Description) -> SchemaFragment {
    let mut schema = SchemaFragment::typed("string");
    schema.content_encoding = node.flags.encoding.clone();
    schema.content_media_type = node.content_media_type().map(str::to_string);

    for rule in &node.rules {
        match rule.name.as_str() {
            "min" => schema.min_length = rule.count(),
            "max" => schema.max_length = rule.count(),
            "length" => {
                schema.min_length = rule.count();
                schema.max_length = rule.count();
            }
            "email" => schema.format = Some("email".to_string()),
            "hostname" | "domain" => schema.format = Some("hostname".to_string()),
            "uri" => schema.format = Some("uri".to_string()),
            "guid" | "uuid" => schema.format = Some("uuid".to_string()),
            "isoDate" => schema.format = Some("date-time".to_string()),
            "ip" => apply_ip_versions(&mut schema, &ip_versions(rule)),
            "regex" | "pattern" => {
                if let Some(source) = pattern_source(rule) {
                    schema.pattern = Some(strip_regex_delimiters(&source));
                }
            }
            _ => {}
        }
    }
    schema
}

fn ip_versions(rule: &Rule) -> Vec<String> {
    let raw = rule
        .argument("options")
        .and_then(|o| o.get("version"))
        .or_else(|| rule.argument("version"));
    match raw {
        Some(Value::String(v)) => vec![v.clone()],
        Some(Value::Array(list)) => list
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn apply_ip_versions(schema: &mut SchemaFragment, versions: &[String]) {
    match versions {
        [] => schema.format = Some("ipv4".to_string()),
        [single] => schema.format = Some(single.clone()),
        many => {
            schema.one_of = Some(
                many.iter()
                    .map(|v| SchemaFragment {
                        format: Some(v.clone()),
                        ..SchemaFragment::default()
                    })
                    .collect(),
            )
        }
    }
}

fn pattern_source(rule: &Rule) -> Option<String> {
    let raw = rule
        .argument("regex")
        .or_else(|| rule.argument("pattern"))?;
    match raw {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => map
            .get("source")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

/// Strips `/.../flags` delimiters from a regex literal; other strings pass through.
pub(crate) fn strip_regex_delimiters(literal: &str) -> String {
    static LITERAL_RE: OnceLock<Regex> = OnceLock::new();
    let re = LITERAL_RE
        .get_or_init(|| Regex::new(r"(?s)^/(.*)/[a-z]*$").expect("Invalid regex constant"));
    re.captures(literal)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| literal.to_string())
}

fn convert_number(node: &Description) -> SchemaFragment {
    let integer = node.kind() == NodeKind::Integer || node.has_rule("integer");
    let mut schema = SchemaFragment::typed(if integer { "integer" } else { "number" });

    for rule in &node.rules {
        match rule.name.as_str() {
            "max" => schema.maximum = rule.limit().cloned(),
            "min" => schema.minimum = rule.limit().cloned(),
            "greater" => {
                schema.exclusive_minimum = Some(true);
                schema.minimum = rule.limit().cloned();
            }
            "less" => {
                schema.exclusive_maximum = Some(true);
                schema.maximum = rule.limit().cloned();
            }
            "multiple" => {
                schema.multiple_of = rule
                    .argument("base")
                    .and_then(Value::as_number)
                    .cloned();
            }
            _ => {}
        }
    }
    schema
}

fn convert_date(node: &Description) -> SchemaFragment {
    if node.is_timestamp() {
        return SchemaFragment::typed("integer");
    }
    // Date-only and time-only cannot be told apart from date-time.
    SchemaFragment {
        format: Some("date-time".to_string()),
        ..SchemaFragment::typed("string")
    }
}

fn convert_binary(node: &Description) -> SchemaFragment {
    SchemaFragment {
        format: Some("binary".to_string()),
        content_encoding: node.flags.encoding.clone(),
        ..SchemaFragment::typed("string")
    }
}

fn convert_array(node: &Description) -> SchemaFragment {
    let mut schema = SchemaFragment::typed("array");

    for rule in &node.rules {
        match rule.name.as_str() {
            "max" => schema.max_items = rule.count(),
            "min" => schema.min_items = rule.count(),
            "length" => {
                schema.max_items = rule.count();
                schema.min_items = rule.count();
            }
            "unique" => schema.unique_items = Some(true),
            _ => {}
        }
    }

    let split = split_null(&node.items);
    let mut items = match split.candidates.as_slice() {
        [] => SchemaFragment::default(),
        [single] => convert(single),
        many => SchemaFragment {
            any_of: Some(many.iter().copied().map(convert).collect()),
            ..SchemaFragment::default()
        },
    };
    mark_nullable(&mut items, split.nullable);
    schema.items = Some(Box::new(items));
    schema
}

fn convert_object(node: &Description) -> SchemaFragment {
    let mut properties = IndexMap::new();
    let mut required = Vec::new();

    for (name, child) in &node.keys {
        if child.is_required() {
            required.push(name.clone());
        }
        properties.insert(name.clone(), convert(child));
    }

    SchemaFragment {
        schema_type: Some("object".to_string()),
        properties: Some(properties),
        required: if required.is_empty() {
            None
        } else {
            Some(required)
        },
        additional_properties: if node.flags.unknown == Some(true) {
            Some(true)
        } else {
            None
        },
        ..SchemaFragment::default()
    }
}

fn convert_alternatives(node: &Description) -> SchemaFragment {
    let split = split_null(node.alternatives());
    let mut schema = match split.candidates.as_slice() {
        [] => SchemaFragment::default(),
        [single] if split.nullable => convert(single),
        candidates => SchemaFragment {
            one_of: Some(candidates.iter().copied().map(convert).collect()),
            ..SchemaFragment::default()
        },
    };
    mark_nullable(&mut schema, split.nullable);
    schema
}
