#![deny(missing_docs)]

//! # Document Assembly
//!
//! Builds the complete OpenAPI document from module route groups.
//!
//! Callers customize the output through two skeletons:
//! - `DocumentSkeleton` overrides root keys (`info`, `servers`, `components`, ...).
//! - `OperationDefaults` seeds every operation (`tags`, `summary`, `responses`, ...).
//!
//! Both follow the same merge rule: a key supplied by the caller replaces the
//! default wholesale, absent keys keep the default. The shared `Error` schema
//! and the `500` response are ensured after merging.

use crate::error::AppResult;
use crate::oas::models::{
    error_schema, Components, Document, Info, PathItem, Response, Server, Tag, ERROR_SCHEMA,
    OPENAPI_VERSION,
};
use crate::oas::registry::EntityRegistry;
use crate::oas::resolver::responses::{server_error_response, SERVER_ERROR_CODE};
use crate::oas::routes::assemble_operation;
use crate::oas::routes::naming::module_id;
use crate::parser::ModuleRoutes;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Server URL used when the skeleton supplies no servers.
pub const DEFAULT_SERVER_URL: &str = "http://localhost/";

/// Caller supplied overrides for the document root.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSkeleton {
    /// OpenAPI version string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openapi: Option<String>,
    /// Root metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<Info>,
    /// Servers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servers: Option<Vec<Server>>,
    /// Tags placed before the module tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
    /// Pre-existing paths; module operations are added to them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paths: Option<IndexMap<String, PathItem>>,
    /// Pre-existing components; module entities are added to them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Components>,
    /// External documentation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<Value>,
    /// Global security requirements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security: Option<Vec<Value>>,
}

impl DocumentSkeleton {
    /// Replaces the server list with a single URL.
    pub fn with_server_url(mut self, url: impl Into<String>) -> Self {
        self.servers = Some(vec![Server::new(url)]);
        self
    }

    /// Merges the skeleton over the defaults.
    ///
    /// The result always contains the shared `Error` schema; it is inserted
    /// first when the caller's components lack it.
    pub fn merge(&self) -> Document {
        let mut components = self.components.clone().unwrap_or_default();
        if !components.schemas.contains_key(ERROR_SCHEMA) {
            components
                .schemas
                .shift_insert(0, ERROR_SCHEMA.to_string(), error_schema());
        }

        Document {
            openapi: self
                .openapi
                .clone()
                .unwrap_or_else(|| OPENAPI_VERSION.to_string()),
            info: self.info.clone().unwrap_or_default(),
            servers: self
                .servers
                .clone()
                .unwrap_or_else(|| vec![Server::new(DEFAULT_SERVER_URL)]),
            tags: self.tags.clone().unwrap_or_default(),
            paths: self.paths.clone().unwrap_or_default(),
            components,
            external_docs: self.external_docs.clone(),
            security: self.security.clone(),
        }
    }
}

/// Values every assembled operation starts from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OperationDefaults {
    /// Tags placed before the module tag.
    pub tags: Vec<String>,
    /// Summary used when a route has none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Description used when a route has none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Responses added to every operation unless a route declares the same code.
    pub responses: IndexMap<String, Response>,
}

impl Default for OperationDefaults {
    fn default() -> Self {
        let mut responses = IndexMap::new();
        responses.insert(SERVER_ERROR_CODE.to_string(), server_error_response());
        Self {
            tags: Vec::new(),
            summary: None,
            description: None,
            responses,
        }
    }
}

impl OperationDefaults {
    /// The default responses, with the `500` entry ensured.
    pub fn responses_with_server_error(&self) -> IndexMap<String, Response> {
        let mut responses = self.responses.clone();
        responses
            .entry(SERVER_ERROR_CODE.to_string())
            .or_insert_with(server_error_response);
        responses
    }
}

/// Builds the document for all module route groups, in order.
///
/// # Errors
///
/// Propagates `AppError::InvalidSchemaSource` from any route validator.
pub fn build_document(modules: &[ModuleRoutes], skeleton: &DocumentSkeleton) -> AppResult<Document> {
    build_document_with_operation_defaults(modules, skeleton, &OperationDefaults::default())
}

/// Builds the document with caller supplied operation defaults.
pub fn build_document_with_operation_defaults(
    modules: &[ModuleRoutes],
    skeleton: &DocumentSkeleton,
    defaults: &OperationDefaults,
) -> AppResult<Document> {
    let mut document = skeleton.merge();
    let mut registry =
        EntityRegistry::with_schemas(std::mem::take(&mut document.components.schemas));

    for module in modules {
        add_module(&mut document, &mut registry, module, defaults)?;
    }

    document.components.schemas = registry.into_schemas();
    tracing::debug!(
        paths = document.paths.len(),
        schemas = document.components.schemas.len(),
        "document assembled"
    );
    Ok(document)
}

fn add_module(
    document: &mut Document,
    registry: &mut EntityRegistry,
    module: &ModuleRoutes,
    defaults: &OperationDefaults,
) -> AppResult<()> {
    let id = module_id(&module.base_path);
    let tag = module.name.clone().unwrap_or_else(|| id.clone());
    tracing::debug!(%tag, base_path = %module.base_path, routes = module.routes.len(), "adding module");

    document.tags.push(Tag {
        name: tag.clone(),
        description: Some(module.description.clone().unwrap_or(id)),
    });

    for route in &module.routes {
        let Some(assembled) =
            assemble_operation(&module.base_path, &tag, route, defaults, registry)?
        else {
            continue;
        };
        let path_item = document.paths.entry(assembled.path).or_default();
        if path_item
            .insert(assembled.method.clone(), assembled.operation)
            .is_some()
        {
            tracing::warn!(method = %assembled.method, %tag, "operation replaced by a later route");
        }
    }
    Ok(())
}
