#![deny(missing_docs)]

//! # OpenAPI Generation Module
//!
//! - **models**: Output document structures.
//! - **schemas**: Structural description -> schema fragment conversion.
//! - **registry**: Named entities under `components/schemas`.
//! - **resolver**: Parameters, request bodies and responses.
//! - **routes**: Route -> operation assembly.
//! - **document**: Skeleton merging and document assembly.

pub mod document;
pub mod models;
pub(crate) mod normalization;
pub mod registry;
pub mod resolver;
pub mod routes;
pub mod schemas;

pub use document::{
    build_document, build_document_with_operation_defaults, DocumentSkeleton, OperationDefaults,
};
pub use models::{Document, Operation, Parameter, ParameterIn, SchemaFragment};
pub use registry::{extract_entities, EntityRegistry};
pub use routes::{assemble_operation, AssembledOperation};
pub use schemas::convert;
