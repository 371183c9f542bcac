#![deny(missing_docs)]

//! # Structural Descriptions
//!
//! The introspected form of a validation rule tree, as emitted by the rule
//! library's `describe()`. Both the older (`children`, `alternatives`, `arg`)
//! and newer (`keys`, `matches`, `args`) layouts deserialize into the same model.

use crate::error::{AppError, AppResult};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

/// The node types the converter distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// `string`
    String,
    /// `number`
    Number,
    /// `integer`
    Integer,
    /// `boolean`
    Boolean,
    /// `date`
    Date,
    /// `binary`
    Binary,
    /// `array`
    Array,
    /// `object`
    Object,
    /// `alternatives`
    Alternatives,
    /// An explicit `null` candidate inside alternatives or array items.
    Null,
    /// Missing or unrecognized type. Converted through the object path.
    Unknown,
}

impl NodeKind {
    /// Maps a raw `type` string to a node kind.
    pub fn from_type_name(name: Option<&str>) -> Self {
        match name {
            Some("string") => NodeKind::String,
            Some("number") => NodeKind::Number,
            Some("integer") => NodeKind::Integer,
            Some("boolean") => NodeKind::Boolean,
            Some("date") => NodeKind::Date,
            Some("binary") => NodeKind::Binary,
            Some("array") => NodeKind::Array,
            Some("object") => NodeKind::Object,
            Some("alternatives") => NodeKind::Alternatives,
            Some("null") => NodeKind::Null,
            _ => NodeKind::Unknown,
        }
    }
}

/// A single constraint directive, e.g. `min` with limit `3`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Directive name (`min`, `max`, `pattern`, `email`, ...).
    pub name: String,
    /// Named arguments (newer layout).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Value>,
    /// Positional argument (older layout).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arg: Option<Value>,
}

impl Rule {
    /// Looks up an argument by key.
    ///
    /// Named arguments win. A scalar positional `arg` answers any key, an
    /// object positional `arg` is searched by key.
    pub fn argument(&self, key: &str) -> Option<&Value> {
        if let Some(Value::Object(args)) = &self.args {
            if let Some(v) = args.get(key) {
                return Some(v);
            }
        }
        match &self.arg {
            Some(Value::Object(map)) => map.get(key),
            Some(Value::Null) | None => None,
            Some(other) => Some(other),
        }
    }

    /// Numeric `limit` argument used by min/max/length/greater/less.
    pub fn limit(&self) -> Option<&Number> {
        self.argument("limit").and_then(Value::as_number)
    }

    /// Non-negative integer `limit` argument used by length and item counts.
    pub fn count(&self) -> Option<u64> {
        self.argument("limit").and_then(Value::as_u64)
    }
}

/// Node flags set by the rule library.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flags {
    /// `required`, `optional` or `forbidden`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presence: Option<String>,
    /// Default value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Content encoding of strings and binaries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    /// Object accepts unknown keys.
    #[serde(default, alias = "allowUnknown", skip_serializing_if = "Option::is_none")]
    pub unknown: Option<bool>,
    /// Older timestamp marker on dates (`unix`, `javascript` or `true`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Value>,
    /// Date format (`iso`, `unix`, `javascript`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Value>,
    /// The `allow` list is exhaustive. Older layouts spell it `allowOnly`.
    #[serde(default, alias = "allowOnly", skip_serializing_if = "Option::is_none")]
    pub only: Option<bool>,
    /// Newer location of the description text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A candidate inside an `alternatives` node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Alternative {
    /// Newer layout: `{ "schema": { ... } }`.
    Match {
        /// The candidate description.
        schema: Description,
    },
    /// Older layout: the candidate description itself.
    Schema(Description),
}

impl Alternative {
    /// The candidate description regardless of layout.
    pub fn schema(&self) -> &Description {
        match self {
            Alternative::Match { schema } | Alternative::Schema(schema) => schema,
        }
    }
}

/// One node of a structural description tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Description {
    /// Raw type name.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    /// Node flags.
    #[serde(default)]
    pub flags: Flags,
    /// Ordered constraint directives.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<Rule>,
    /// Ordered example values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<Value>,
    /// Older location of the description text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Free-form metadata entries.
    #[serde(default, alias = "meta", skip_serializing_if = "Vec::is_empty")]
    pub metas: Vec<Value>,
    /// Explicitly allowed values.
    #[serde(default, alias = "valids", skip_serializing_if = "Vec::is_empty")]
    pub allow: Vec<Value>,
    /// Object fields, in declaration order.
    #[serde(default, alias = "children", skip_serializing_if = "IndexMap::is_empty")]
    pub keys: IndexMap<String, Description>,
    /// Array item candidates.
    #[serde(
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub items: Vec<Description>,
    /// Alternatives candidates.
    #[serde(default, alias = "alternatives", skip_serializing_if = "Vec::is_empty")]
    pub matches: Vec<Alternative>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<Description>),
    One(Box<Description>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<Description>, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed: Option<OneOrMany> = Option::deserialize(deserializer)?;
    Ok(match parsed {
        Some(OneOrMany::Many(items)) => items,
        Some(OneOrMany::One(item)) => vec![*item],
        None => Vec::new(),
    })
}

impl Description {
    /// Creates an empty node of the given type.
    pub fn of_type(type_name: impl Into<String>) -> Self {
        Self {
            type_name: Some(type_name.into()),
            ..Self::default()
        }
    }

    /// The node kind derived from the raw type name.
    pub fn kind(&self) -> NodeKind {
        NodeKind::from_type_name(self.type_name.as_deref())
    }

    /// Description text from either layout.
    pub fn description_text(&self) -> Option<&str> {
        self.flags
            .description
            .as_deref()
            .or(self.description.as_deref())
    }

    /// Whether the node's presence flag is `required`.
    pub fn is_required(&self) -> bool {
        self.flags.presence.as_deref() == Some("required")
    }

    /// Whether a rule with the given name is present.
    pub fn has_rule(&self, name: &str) -> bool {
        self.rules.iter().any(|r| r.name == name)
    }

    /// Whether `null` is an allowed value.
    pub fn allows_null(&self) -> bool {
        self.allow.iter().any(Value::is_null)
    }

    /// Alternatives candidates regardless of layout.
    pub fn alternatives(&self) -> impl Iterator<Item = &Description> {
        self.matches.iter().map(Alternative::schema)
    }

    /// Exhaustive value list with empty strings and nulls removed.
    ///
    /// `None` unless the node is restricted to its `allow` list.
    pub fn enum_values(&self) -> Option<Vec<Value>> {
        if self.flags.only != Some(true) {
            return None;
        }
        let values: Vec<Value> = self
            .allow
            .iter()
            .filter(|v| !is_empty_value(v))
            .cloned()
            .collect();
        if values.is_empty() {
            None
        } else {
            Some(values)
        }
    }

    /// The first `contentMediaType` found in the metadata entries.
    pub fn content_media_type(&self) -> Option<&str> {
        self.metas
            .iter()
            .find_map(|m| m.get("contentMediaType").and_then(Value::as_str))
    }

    /// Whether a date node is a numeric timestamp.
    pub fn is_timestamp(&self) -> bool {
        let timestamp = match &self.flags.timestamp {
            Some(Value::Bool(flag)) => *flag,
            Some(Value::Null) | None => false,
            Some(_) => true,
        };
        let format = matches!(
            self.flags.format.as_ref().and_then(Value::as_str),
            Some("unix") | Some("javascript")
        );
        timestamp || format
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        _ => false,
    }
}

/// Anything that can be introspected into a structural description.
pub trait Describe {
    /// Produces the structural description of this validator.
    fn describe(&self) -> AppResult<Description>;
}

impl Describe for Description {
    fn describe(&self) -> AppResult<Description> {
        Ok(self.clone())
    }
}

impl Describe for Value {
    /// Parses a raw `describe()` output.
    ///
    /// Anything other than a JSON object cannot be a rule tree and fails
    /// with `AppError::InvalidSchemaSource`.
    fn describe(&self) -> AppResult<Description> {
        if !self.is_object() {
            return Err(AppError::InvalidSchemaSource(format!(
                "expected a described rule tree (object), found {}",
                json_kind(self)
            )));
        }
        serde_json::from_value(self.clone())
            .map_err(|e| AppError::InvalidSchemaSource(e.to_string()))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
