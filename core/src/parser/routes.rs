#![deny(missing_docs)]

//! # Route Definitions
//!
//! Input models for module route groups. These are consumed as plain data;
//! validators stay raw until the route assembler describes them.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A named collection of routes sharing a base path. Maps to one document tag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleRoutes {
    /// Path prefix prepended to every route path, e.g. `/hero`.
    pub base_path: String,
    /// Explicit tag name. Defaults to the module id derived from `base_path`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Tag description. Defaults to the module id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Routes in declaration order.
    #[serde(default)]
    pub routes: Vec<RouteDefinition>,
}

/// The handler (or middleware chain) bound to a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Action {
    /// A single named handler.
    Handler(String),
    /// A middleware chain; the last entry is the handler.
    Chain(Vec<Option<String>>),
}

impl Action {
    /// The resolved handler identifier, `None` for anonymous handlers.
    pub fn handler_name(&self) -> Option<&str> {
        let name = match self {
            Action::Handler(name) => Some(name.as_str()),
            Action::Chain(chain) => chain.last().and_then(|n| n.as_deref()),
        };
        name.map(str::trim).filter(|n| !n.is_empty())
    }
}

/// Raw validators per request location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Validators {
    /// Query string validator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<Value>,
    /// Header validator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<Value>,
    /// Path parameter validator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Value>,
    /// Request body validator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

/// Response status key, numeric (`200`) or named (`default`, `2XX`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseCode {
    /// Numeric HTTP status.
    Status(u16),
    /// Any other key.
    Named(String),
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseCode::Status(code) => write!(f, "{}", code),
            ResponseCode::Named(name) => write!(f, "{}", name),
        }
    }
}

/// A declared response example.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseExample {
    /// Status code key.
    pub code: ResponseCode,
    /// Raw validator of the response payload. Examples without one are skipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
    /// Response description. Defaults to `Normal Response`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Media type. Defaults to `application/json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
}

/// One route of a module.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDefinition {
    /// HTTP method, any case.
    pub method: String,
    /// Route path relative to the module base path. Placeholders are `:name` or `{name}`.
    pub path: String,
    /// Operation summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Operation description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Marks the operation deprecated.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,
    /// Bound handler.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
    /// Request validators.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validators: Option<Validators>,
    /// Declared response examples.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub response_examples: Vec<ResponseExample>,
}

impl RouteDefinition {
    /// The resolved handler identifier, if any.
    pub fn handler_name(&self) -> Option<&str> {
        self.action.as_ref().and_then(Action::handler_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_handler_name_resolution() {
        assert_eq!(Action::Handler("listHeroes".into()).handler_name(), Some("listHeroes"));
        let chain = Action::Chain(vec![Some("auth".into()), Some("createHero".into())]);
        assert_eq!(chain.handler_name(), Some("createHero"));
        let anonymous = Action::Chain(vec![Some("auth".into()), None]);
        assert_eq!(anonymous.handler_name(), None);
        assert_eq!(Action::Handler("  ".into()).handler_name(), None);
        assert_eq!(Action::Chain(vec![]).handler_name(), None);
    }

    #[test]
    fn test_route_group_deserializes_from_json() {
        let raw = json!({
            "basePath": "/hero",
            "description": "Hero related APIs",
            "routes": [{
                "method": "post",
                "path": "/:id",
                "action": ["auth", "updateHero"],
                "deprecated": true,
                "validators": { "body": { "type": "object" } },
                "responseExamples": [{ "code": 200, "schema": { "type": "object" } }]
            }, {
                "method": "get",
                "path": "/",
                "action": null
            }]
        });
        let module: ModuleRoutes = serde_json::from_value(raw).unwrap();
        assert_eq!(module.base_path, "/hero");
        assert_eq!(module.name, None);
        let update = &module.routes[0];
        assert_eq!(update.handler_name(), Some("updateHero"));
        assert!(update.deprecated);
        assert!(update.validators.as_ref().unwrap().body.is_some());
        assert_eq!(update.response_examples[0].code, ResponseCode::Status(200));
        assert_eq!(module.routes[1].handler_name(), None);
    }

    #[test]
    fn test_response_code_display() {
        assert_eq!(ResponseCode::Status(201).to_string(), "201");
        assert_eq!(ResponseCode::Named("default".into()).to_string(), "default");
    }

    #[test]
    fn test_route_group_deserializes_from_yaml() {
        let yaml = r#"
basePath: /villain
name: villains
routes:
  - method: GET
    path: /{id}
    action: openVillain
"#;
        let module: ModuleRoutes = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(module.name.as_deref(), Some("villains"));
        assert_eq!(module.routes[0].handler_name(), Some("openVillain"));
    }
}
