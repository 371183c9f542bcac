#![deny(missing_docs)]

//! # OpenAPI Models
//!
//! Output structures for OpenAPI 3.0 documents.
//!
//! Every optional key is skipped when absent, so a serialized fragment only
//! contains keys that were explicitly set for its node type.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// OpenAPI version emitted by default.
pub const OPENAPI_VERSION: &str = "3.0.1";

/// Name of the shared error schema seeded into every document.
pub const ERROR_SCHEMA: &str = "Error";

/// A JSON-Schema-family fragment describing one node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaFragment {
    /// Pointer to a registered component.
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// JSON type name.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    /// Format modifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// OpenAPI 3.0 nullability flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
    /// Human readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Default value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// First example value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    /// Exhaustive value list.
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
    /// Lower numeric bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<Number>,
    /// Upper numeric bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<Number>,
    /// `minimum` is exclusive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusive_minimum: Option<bool>,
    /// `maximum` is exclusive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusive_maximum: Option<bool>,
    /// Divisor constraint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiple_of: Option<Number>,
    /// Minimum string length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    /// Maximum string length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    /// Regular expression source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Content encoding (e.g. `base64`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_encoding: Option<String>,
    /// Content media type (e.g. `image/png`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_media_type: Option<String>,
    /// Minimum array length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,
    /// Maximum array length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,
    /// Array entries are unique.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_items: Option<bool>,
    /// Array item schema. An empty fragment means "any".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaFragment>>,
    /// Object fields, in declaration order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, SchemaFragment>>,
    /// Required object fields. Never empty when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    /// Object accepts unknown keys.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<bool>,
    /// Exactly one candidate matches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<SchemaFragment>>,
    /// At least one candidate matches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub any_of: Option<Vec<SchemaFragment>>,
    /// All candidates match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_of: Option<Vec<SchemaFragment>>,
}

impl SchemaFragment {
    /// A fragment with only `type` set.
    pub fn typed(schema_type: impl Into<String>) -> Self {
        Self {
            schema_type: Some(schema_type.into()),
            ..Self::default()
        }
    }

    /// A bare `$ref` pointer.
    pub fn reference(location: impl Into<String>) -> Self {
        Self {
            reference: Some(location.into()),
            ..Self::default()
        }
    }

    /// Whether this fragment describes an object with fields.
    pub fn is_object(&self) -> bool {
        self.schema_type.as_deref() == Some("object") && self.properties.is_some()
    }

    /// Whether `field` is listed as required.
    pub fn requires(&self, field: &str) -> bool {
        self.required
            .as_ref()
            .is_some_and(|r| r.iter().any(|f| f == field))
    }

    /// Looks up a property fragment.
    pub fn property(&self, field: &str) -> Option<&SchemaFragment> {
        self.properties.as_ref().and_then(|p| p.get(field))
    }
}

/// Request parameter location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterIn {
    /// `?name=value`
    Query,
    /// Request header.
    Header,
    /// Templated path segment.
    Path,
}

/// An operation parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Field name.
    pub name: String,
    /// Location.
    #[serde(rename = "in")]
    pub location: ParameterIn,
    /// Description, with the example appended when one exists.
    #[serde(default)]
    pub description: String,
    /// Whether the parameter must be supplied.
    #[serde(default)]
    pub required: bool,
    /// Example value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    /// Value schema, without description or example.
    pub schema: SchemaFragment,
}

/// A schema bound to a media type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
    /// Payload schema.
    pub schema: SchemaFragment,
}

/// Operation request body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    /// Payload per media type.
    pub content: IndexMap<String, MediaType>,
}

/// One response entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Response description.
    pub description: String,
    /// Payload per media type.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub content: IndexMap<String, MediaType>,
}

impl Response {
    /// A response with a single media type.
    pub fn with_content(
        description: impl Into<String>,
        media_type: impl Into<String>,
        schema: SchemaFragment,
    ) -> Self {
        let mut content = IndexMap::new();
        content.insert(media_type.into(), MediaType { schema });
        Self {
            description: description.into(),
            content,
        }
    }
}

/// One HTTP method handler at one path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Grouping tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Short summary.
    #[serde(default)]
    pub summary: String,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// Deprecation marker, only emitted when set.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,
    /// Path, query and header parameters.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Request payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    /// Responses keyed by status code.
    #[serde(default)]
    pub responses: IndexMap<String, Response>,
}

/// Operations of one path, keyed by lower-case method.
pub type PathItem = IndexMap<String, Operation>;

/// Document tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag name.
    pub name: String,
    /// Tag description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Root `info` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    /// Document title.
    pub title: String,
    /// API description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// API version.
    pub version: String,
    /// Terms of service URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms_of_service: Option<String>,
    /// Contact object, kept as-is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<Value>,
    /// License object, kept as-is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<Value>,
}

impl Default for Info {
    fn default() -> Self {
        Self {
            title: "API Docs".to_string(),
            description: Some("API Docs".to_string()),
            version: "1.0.0".to_string(),
            terms_of_service: None,
            contact: None,
            license: None,
        }
    }
}

/// Server entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    /// Base URL.
    pub url: String,
    /// Server description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Server {
    /// A server with only a URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            description: None,
        }
    }
}

/// Shared component section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Components {
    /// Registered entity schemas.
    #[serde(default)]
    pub schemas: IndexMap<String, SchemaFragment>,
    /// Other component kinds (`securitySchemes`, ...) passed through untouched.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// The assembled OpenAPI document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// OpenAPI version string.
    pub openapi: String,
    /// Root metadata.
    pub info: Info,
    /// Servers.
    #[serde(default)]
    pub servers: Vec<Server>,
    /// One tag per module, in processing order.
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Operations keyed by path template.
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
    /// Shared components.
    #[serde(default)]
    pub components: Components,
    /// External documentation, kept as-is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<Value>,
    /// Global security requirements, kept as-is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security: Option<Vec<Value>>,
}

impl Document {
    /// Serializes the document to pretty JSON.
    pub fn to_json_pretty(&self) -> crate::error::AppResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serializes the document to YAML.
    pub fn to_yaml(&self) -> crate::error::AppResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// The shared error schema: `{code, err}` strings, both required.
pub fn error_schema() -> SchemaFragment {
    let mut properties = IndexMap::new();
    properties.insert("code".to_string(), SchemaFragment::typed("string"));
    properties.insert("err".to_string(), SchemaFragment::typed("string"));
    SchemaFragment {
        schema_type: Some("object".to_string()),
        properties: Some(properties),
        required: Some(vec!["code".to_string(), "err".to_string()]),
        ..SchemaFragment::default()
    }
}
