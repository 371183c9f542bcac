#![deny(missing_docs)]

//! # Routedoc Core
//!
//! Converts validation rule descriptions attached to route definitions into
//! an OpenAPI 3.0 document.

/// Shared error types.
pub mod error;

/// Input models: rule descriptions and route groups.
pub mod parser;

/// OpenAPI document generation.
pub mod oas;

pub use error::{AppError, AppResult};
pub use oas::{
    assemble_operation, build_document, build_document_with_operation_defaults, convert,
    extract_entities, AssembledOperation, Document, DocumentSkeleton, EntityRegistry, Operation,
    OperationDefaults, Parameter, ParameterIn, SchemaFragment,
};
pub use parser::{Describe, Description, ModuleRoutes, NodeKind, RouteDefinition};
