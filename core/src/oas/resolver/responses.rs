#![deny(missing_docs)]

//! # Response Resolution
//!
//! Builds response entries from declared response examples and supplies the
//! default server error response.

use crate::oas::models::{Response, SchemaFragment, ERROR_SCHEMA};
use crate::oas::schemas::refs::component_ref;
use crate::parser::routes::ResponseExample;

/// Description used when a response example declares none.
pub const DEFAULT_RESPONSE_DESCRIPTION: &str = "Normal Response";
/// Media type used when a response example declares none.
pub const DEFAULT_RESPONSE_MEDIA_TYPE: &str = "application/json";
/// Status key of the server error response present on every operation.
pub const SERVER_ERROR_CODE: &str = "500";

/// Builds the response entry for one example and its converted payload schema.
pub fn build_response(example: &ResponseExample, schema: SchemaFragment) -> Response {
    let description = example
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or(DEFAULT_RESPONSE_DESCRIPTION);
    let media_type = example
        .media_type
        .as_deref()
        .filter(|m| !m.is_empty())
        .unwrap_or(DEFAULT_RESPONSE_MEDIA_TYPE);
    Response::with_content(description, media_type, schema)
}

/// The default `500` response pointing at the shared error schema.
pub fn server_error_response() -> Response {
    Response::with_content(
        "When Server takes a nap.",
        DEFAULT_RESPONSE_MEDIA_TYPE,
        SchemaFragment::reference(component_ref(ERROR_SCHEMA)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::routes::ResponseCode;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn example(description: Option<&str>, media_type: Option<&str>) -> ResponseExample {
        ResponseExample {
            code: ResponseCode::Status(200),
            schema: Some(json!({ "type": "object" })),
            description: description.map(String::from),
            media_type: media_type.map(String::from),
        }
    }

    #[test]
    fn test_defaults_apply() {
        let response = build_response(
            &example(None, None),
            SchemaFragment::reference(component_ref("ListHeroesResponse200")),
        );
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "description": "Normal Response",
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/ListHeroesResponse200" }
                    }
                }
            })
        );
    }

    #[test]
    fn test_declared_description_and_media_type_win() {
        let response = build_response(
            &example(Some("Hero avatar"), Some("image/png")),
            SchemaFragment::typed("string"),
        );
        assert_eq!(response.description, "Hero avatar");
        assert!(response.content.contains_key("image/png"));
    }

    #[test]
    fn test_server_error_response() {
        assert_eq!(
            serde_json::to_value(server_error_response()).unwrap(),
            json!({
                "description": "When Server takes a nap.",
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/Error" }
                    }
                }
            })
        );
    }
}
