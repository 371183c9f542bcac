#![deny(missing_docs)]

//! # Naming Utilities
//!
//! Helper functions for deriving tag ids, path templates and entity names
//! from module base paths, route paths and handler identifiers.

use heck::ToUpperCamelCase;
use regex::Regex;
use std::sync::OnceLock;

/// Derives the module id from a base path.
///
/// The leading slash is dropped and inner slashes become hyphens,
/// e.g. `/api/v1/hero` -> `api-v1-hero`.
pub fn module_id(base_path: &str) -> String {
    base_path
        .strip_prefix('/')
        .unwrap_or(base_path)
        .replace('/', "-")
}

/// A templated path plus the placeholder names it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    /// Slash-joined template, e.g. `/hero/{id}`.
    pub template: String,
    /// Placeholder names in order of appearance.
    pub params: Vec<String>,
}

/// Joins a base path and a route path into an OpenAPI path template.
///
/// `:name` and `{name}` segments are captured as path parameters and emitted
/// as `{name}`. Empty segments are dropped, so `/hero` + `/` is `/hero`.
pub fn path_template(base_path: &str, route_path: &str) -> PathTemplate {
    static PLACEHOLDER_RE: OnceLock<Regex> = OnceLock::new();
    let re = PLACEHOLDER_RE.get_or_init(|| {
        Regex::new(r"^(?::(?P<colon>.+)|\{(?P<brace>[^}]+)\})$").expect("Invalid regex constant")
    });

    let joined = format!("{}{}", base_path, route_path);
    let mut params = Vec::new();
    let segments: Vec<String> = joined
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| match re.captures(segment) {
            Some(caps) => {
                let name = caps
                    .name("colon")
                    .or_else(|| caps.name("brace"))
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default();
                let rendered = format!("{{{}}}", name);
                params.push(name);
                rendered
            }
            None => segment.to_string(),
        })
        .collect();

    PathTemplate {
        template: format!("/{}", segments.join("/")),
        params,
    }
}

/// Entity name of a request body, e.g. `createHero` -> `CreateHeroBody`.
pub fn body_entity_name(handler: &str) -> String {
    format!("{}Body", handler.to_upper_camel_case())
}

/// Entity name of a response payload, e.g. `listHeroes`, `200` -> `ListHeroesResponse200`.
pub fn response_entity_name(handler: &str, code: &str) -> String {
    format!(
        "{}Response{}",
        handler.to_upper_camel_case(),
        code.to_upper_camel_case()
    )
}

/// Entity name of a nested object field, e.g. `ListHeroesResponse200`, `data` -> `ListHeroesResponse200Data`.
pub fn nested_entity_name(parent: &str, field: &str) -> String {
    format!("{}{}", parent, field.to_upper_camel_case())
}

/// Entity name of object items inside an array field.
pub fn item_entity_name(parent: &str, field: &str) -> String {
    format!("{}Item", nested_entity_name(parent, field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_id() {
        assert_eq!(module_id("/hero"), "hero");
        assert_eq!(module_id("/api/v1/hero"), "api-v1-hero");
        assert_eq!(module_id("hero"), "hero");
    }

    #[test]
    fn test_root_route_collapses_trailing_slash() {
        let t = path_template("/hero", "/");
        assert_eq!(t.template, "/hero");
        assert!(t.params.is_empty());
    }

    #[test]
    fn test_colon_placeholder_conversion() {
        let t = path_template("/hero", "/hero/:id");
        assert_eq!(t.template, "/hero/hero/{id}");
        assert_eq!(t.params, vec!["id"]);
    }

    #[test]
    fn test_brace_placeholders_and_order() {
        let t = path_template("/teams/:teamId", "/members/{memberId}/roles");
        assert_eq!(t.template, "/teams/{teamId}/members/{memberId}/roles");
        assert_eq!(t.params, vec!["teamId", "memberId"]);
    }

    #[test]
    fn test_empty_paths() {
        assert_eq!(path_template("", "/").template, "/");
        assert_eq!(path_template("/", "/status").template, "/status");
    }

    #[test]
    fn test_entity_names() {
        assert_eq!(body_entity_name("createHero"), "CreateHeroBody");
        assert_eq!(response_entity_name("listHeroes", "200"), "ListHeroesResponse200");
        assert_eq!(response_entity_name("list_heroes", "default"), "ListHeroesResponseDefault");
        assert_eq!(nested_entity_name("ListHeroesResponse200", "data"), "ListHeroesResponse200Data");
        assert_eq!(item_entity_name("Data", "records"), "DataRecordsItem");
    }
}
