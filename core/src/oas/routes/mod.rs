#![deny(missing_docs)]

//! # Routes Module
//!
//! Assembles one route definition into one OpenAPI operation.
//!
//! Orchestrates Describe -> Convert -> Register -> Resolve for every validator
//! of the route, in a fixed order: path, query and header parameters, then the
//! request body, then response examples.

pub mod naming;

use crate::error::AppResult;
use crate::oas::document::OperationDefaults;
use crate::oas::models::{Operation, ParameterIn, SchemaFragment};
use crate::oas::registry::EntityRegistry;
use crate::oas::resolver::{build_request_body, build_response, parameters_for, path_parameters};
use crate::oas::routes::naming::{body_entity_name, path_template, response_entity_name};
use crate::oas::schemas::convert;
use crate::parser::{Describe, RouteDefinition};
use serde_json::Value;

/// An operation ready to be placed into `paths`.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledOperation {
    /// Path template key, e.g. `/hero/{id}`.
    pub path: String,
    /// Lower-case HTTP method.
    pub method: String,
    /// The operation itself.
    pub operation: Operation,
}

/// Assembles the operation of one route.
///
/// Returns `Ok(None)` for routes without a resolvable handler name; those are
/// placeholders and contribute nothing. Entities produced by the body and
/// response validators are written into `registry`.
///
/// # Errors
///
/// Returns `AppError::InvalidSchemaSource` when a validator is not a described
/// rule tree.
pub fn assemble_operation(
    base_path: &str,
    tag: &str,
    route: &RouteDefinition,
    defaults: &OperationDefaults,
    registry: &mut EntityRegistry,
) -> AppResult<Option<AssembledOperation>> {
    let Some(handler) = route.handler_name() else {
        tracing::debug!(
            method = %route.method,
            path = %route.path,
            "skipping route without a named handler"
        );
        return Ok(None);
    };

    let template = path_template(base_path, &route.path);
    let method = route.method.to_lowercase();
    tracing::debug!(%method, path = %template.template, %handler, "assembling operation");

    let validators = route.validators.clone().unwrap_or_default();

    let mut tags = defaults.tags.clone();
    tags.push(tag.to_string());

    let mut operation = Operation {
        tags,
        summary: route
            .summary
            .clone()
            .or_else(|| defaults.summary.clone())
            .unwrap_or_default(),
        description: route
            .description
            .clone()
            .or_else(|| defaults.description.clone())
            .unwrap_or_default(),
        deprecated: route.deprecated,
        ..Operation::default()
    };

    let path_schema = convert_validator(validators.path.as_ref())?;
    operation
        .parameters
        .extend(path_parameters(&template.params, path_schema.as_ref()));

    for (location, validator) in [
        (ParameterIn::Query, validators.query.as_ref()),
        (ParameterIn::Header, validators.header.as_ref()),
    ] {
        if let Some(schema) = convert_validator(validator)? {
            operation.parameters.extend(parameters_for(&schema, location));
        }
    }

    if let Some(schema) = convert_validator(validators.body.as_ref())? {
        let pointer = registry.register_if_object(&body_entity_name(handler), schema);
        operation.request_body = Some(build_request_body(pointer, registry.schemas()));
    }

    for example in &route.response_examples {
        let Some(schema) = convert_validator(example.schema.as_ref())? else {
            continue;
        };
        let code = example.code.to_string();
        let pointer = registry.register_if_object(&response_entity_name(handler, &code), schema);
        operation
            .responses
            .insert(code, build_response(example, pointer));
    }

    for (code, response) in defaults.responses_with_server_error() {
        operation.responses.entry(code).or_insert(response);
    }

    Ok(Some(AssembledOperation {
        path: template.template,
        method,
        operation,
    }))
}

fn convert_validator(validator: Option<&Value>) -> AppResult<Option<SchemaFragment>> {
    validator
        .map(|raw| raw.describe().map(|description| convert(&description)))
        .transpose()
}
