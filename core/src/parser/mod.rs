#![deny(missing_docs)]

//! # Parser Module
//!
//! Input side of the conversion: structural descriptions of validation rule
//! trees and the route groups that carry them.

pub mod description;
pub mod routes;

// Re-export major types
pub use description::{Alternative, Describe, Description, Flags, NodeKind, Rule};
pub use routes::{
    Action, ModuleRoutes, ResponseCode, ResponseExample, RouteDefinition, Validators,
};
