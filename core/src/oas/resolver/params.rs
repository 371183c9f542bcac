#![deny(missing_docs)]

//! # Parameter Resolution
//!
//! Turns the fields of a converted object schema into OpenAPI 3.0 parameters.
//!
//! Parameters carry `description` and `example` themselves; the nested
//! `schema` never repeats them. When an example exists it is appended to the
//! description as ` (Example: <value>)`.

use crate::oas::models::{Parameter, ParameterIn, SchemaFragment};
use serde_json::Value;

/// Builds the parameter for one field of an object schema.
///
/// Missing fields degrade to a bare `{type: string}` schema with no
/// description. Path parameters are always required; other locations are
/// required iff the field is in the parent's `required` list.
pub fn to_parameter(object_schema: &SchemaFragment, field: &str, location: ParameterIn) -> Parameter {
    let required = location == ParameterIn::Path || object_schema.requires(field);

    let Some(field_schema) = object_schema.property(field) else {
        return Parameter {
            name: field.to_string(),
            location,
            description: String::new(),
            required,
            example: None,
            schema: SchemaFragment::typed("string"),
        };
    };

    let mut schema = field_schema.clone();
    let description = schema.description.take().unwrap_or_default();
    let example = schema.example.take();

    Parameter {
        name: field.to_string(),
        location,
        description: describe_with_example(&description, example.as_ref()),
        required,
        example,
        schema,
    }
}

/// Builds one parameter per field of an object schema, in field order.
pub fn parameters_for(object_schema: &SchemaFragment, location: ParameterIn) -> Vec<Parameter> {
    object_schema
        .properties
        .iter()
        .flat_map(|props| props.keys())
        .map(|field| to_parameter(object_schema, field, location))
        .collect()
}

/// Builds path parameters for the placeholders captured from a path template.
///
/// Without a path validator every placeholder becomes a required string.
pub fn path_parameters(names: &[String], path_schema: Option<&SchemaFragment>) -> Vec<Parameter> {
    let empty = SchemaFragment::default();
    let schema = path_schema.unwrap_or(&empty);
    names
        .iter()
        .map(|name| to_parameter(schema, name, ParameterIn::Path))
        .collect()
}

/// Appends ` (Example: <value>)` to a description when an example exists.
pub fn describe_with_example(description: &str, example: Option<&Value>) -> String {
    match example {
        None => description.to_string(),
        Some(value) => format!("{} (Example: {})", description, render_example(value))
            .trim_start()
            .to_string(),
    }
}

fn render_example(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
