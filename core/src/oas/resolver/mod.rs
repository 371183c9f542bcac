#![deny(missing_docs)]

//! # Resolver Module
//!
//! Maps converted schema fragments onto operation parts.
//!
//! - **params**: path, query and header parameters.
//! - **body**: request bodies and media type detection.
//! - **responses**: response entries and the default server error response.

pub mod body;
pub mod params;
pub mod responses;

pub use body::{build_request_body, contains_binary};
pub use params::{parameters_for, path_parameters, to_parameter};
pub use responses::{build_response, server_error_response};
