use pretty_assertions::assert_eq;
use routedoc_core::oas::models::{Info, Server};
use routedoc_core::{build_document, AppError, Document, DocumentSkeleton, ModuleRoutes};
use serde_json::{json, Value};

fn hero_module() -> ModuleRoutes {
    serde_json::from_str(include_str!("fixtures/hero-routes.json")).unwrap()
}

fn hero_document() -> Document {
    let skeleton = DocumentSkeleton {
        servers: Some(vec![Server::new("http://localhost/api")]),
        info: Some(Info {
            title: "Hero API Docs".into(),
            description: Some("Helps to CRUD hero information.".into()),
            version: "1.0.0".into(),
            terms_of_service: None,
            contact: None,
            license: None,
        }),
        ..DocumentSkeleton::default()
    };
    build_document(&[hero_module()], &skeleton).unwrap()
}

fn hero_value() -> Value {
    serde_json::to_value(hero_document()).unwrap()
}

#[test]
fn test_document_root() {
    let doc = hero_value();
    assert_eq!(doc["openapi"], "3.0.1");
    assert_eq!(doc["info"]["title"], "Hero API Docs");
    assert_eq!(doc["servers"], json!([{ "url": "http://localhost/api" }]));
    assert_eq!(
        doc["tags"],
        json!([{ "name": "hero", "description": "Hero related APIs" }])
    );
}

#[test]
fn test_paths_and_methods() {
    let doc = hero_document();
    let paths: Vec<&String> = doc.paths.keys().collect();
    assert_eq!(paths, vec!["/hero", "/hero/{id}", "/hero/deprecated/{id}"]);

    let root: Vec<&String> = doc.paths["/hero"].keys().collect();
    assert_eq!(root, vec!["get", "post"]);
    let by_id: Vec<&String> = doc.paths["/hero/{id}"].keys().collect();
    assert_eq!(by_id, vec!["post", "get"]);

    // Routes without a named handler are placeholders.
    assert!(!doc.paths.contains_key("/hero/preview"));
}

#[test]
fn test_list_query_parameters() {
    let doc = hero_value();
    let list = &doc["paths"]["/hero"]["get"];
    assert_eq!(list["tags"], json!(["hero"]));
    assert_eq!(list["summary"], "List");
    assert_eq!(
        list["parameters"],
        json!([
            {
                "name": "heroId",
                "in": "query",
                "description": "Hero ID (Example: 621)",
                "required": false,
                "example": "621",
                "schema": { "type": "string" }
            },
            {
                "name": "sort",
                "in": "query",
                "description": "",
                "required": false,
                "schema": {
                    "type": "string",
                    "nullable": true,
                    "default": "createdAt",
                    "enum": ["createdAt", "updatedAt"]
                }
            },
            {
                "name": "direction",
                "in": "query",
                "description": "",
                "required": false,
                "schema": { "type": "string", "default": "desc", "enum": ["desc", "asc"] }
            },
            {
                "name": "limit",
                "in": "query",
                "description": "",
                "required": false,
                "schema": {
                    "type": "integer",
                    "default": 100,
                    "minimum": 1,
                    "maximum": 100,
                    "multipleOf": 10
                }
            },
            {
                "name": "page",
                "in": "query",
                "description": "",
                "required": false,
                "schema": {
                    "type": "integer",
                    "minimum": 0,
                    "exclusiveMinimum": true,
                    "maximum": 10,
                    "exclusiveMaximum": true
                }
            }
        ])
    );
}

#[test]
fn test_list_response_entities() {
    let doc = hero_value();
    let responses = &doc["paths"]["/hero"]["get"]["responses"];
    assert_eq!(
        responses["200"],
        json!({
            "description": "Normal Response",
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/ListHeroesResponse200" }
                }
            }
        })
    );
    assert_eq!(
        responses["500"]["content"]["application/json"]["schema"],
        json!({ "$ref": "#/components/schemas/Error" })
    );

    let schemas = &doc["components"]["schemas"];
    assert_eq!(
        schemas["ListHeroesResponse200"]["properties"]["data"],
        json!({ "$ref": "#/components/schemas/ListHeroesResponse200Data" })
    );
    assert_eq!(schemas["ListHeroesResponse200"]["required"], json!(["code"]));
    assert_eq!(
        schemas["ListHeroesResponse200Data"]["properties"]["records"]["items"],
        json!({ "$ref": "#/components/schemas/ListHeroesResponse200DataRecordsItem" })
    );
    assert_eq!(
        schemas["ListHeroesResponse200Data"]["required"],
        json!(["totalCount", "page"])
    );
    assert_eq!(
        schemas["ListHeroesResponse200DataRecordsItem"]["properties"]["nickName"],
        json!({ "type": "string", "description": "Nick name", "example": "Ken" })
    );
}

#[test]
fn test_create_body_entity() {
    let doc = hero_value();
    let create = &doc["paths"]["/hero"]["post"];
    assert_eq!(
        create["requestBody"],
        json!({
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/CreateHeroBody" }
                }
            }
        })
    );

    let body = &doc["components"]["schemas"]["CreateHeroBody"];
    assert_eq!(body["description"], "Hero profile");
    assert_eq!(body["additionalProperties"], true);
    assert_eq!(body["required"], json!(["nickName", "avatar"]));

    let props = &body["properties"];
    assert_eq!(
        props["nickName"],
        json!({
            "type": "string",
            "description": "Hero Nickname",
            "example": "Ken",
            "minLength": 3,
            "maxLength": 20,
            "pattern": "^[a-z]+$"
        })
    );
    assert_eq!(props["avatar"]["format"], "uri");
    assert_eq!(props["icon"]["contentMediaType"], "image/png");
    assert_eq!(props["email"]["format"], "email");
    assert_eq!(
        props["ip"]["oneOf"],
        json!([{ "format": "ipv4" }, { "format": "ipv6" }])
    );
    assert_eq!(props["hostname"]["format"], "hostname");
    assert_eq!(props["gender"]["enum"], json!(["Male", "Female"]));
    assert_eq!(
        props["birthday"],
        json!({ "type": "string", "format": "date-time", "description": "" })
    );
    assert_eq!(props["birthTime"], json!({ "type": "integer", "description": "" }));
    assert_eq!(props["retired"], json!({ "type": "boolean", "description": "" }));

    let skills = &props["skills"];
    assert_eq!(skills["description"], "Skills");
    assert_eq!(skills["minItems"], 1);
    assert_eq!(skills["maxItems"], 3);
    assert_eq!(skills["uniqueItems"], true);
    assert_eq!(skills["items"]["oneOf"][0]["type"], "string");
    assert_eq!(
        skills["items"]["oneOf"][1]["properties"]["level"],
        json!({ "type": "integer", "description": "Skill Level", "example": 1 })
    );
}

#[test]
fn test_binary_body_is_multipart() {
    let doc = hero_value();
    let update = &doc["paths"]["/hero/{id}"]["post"];
    assert_eq!(
        update["requestBody"],
        json!({
            "content": {
                "multipart/form-data": {
                    "schema": { "$ref": "#/components/schemas/UpdateHeroBody" }
                }
            }
        })
    );
    assert_eq!(
        doc["components"]["schemas"]["UpdateHeroBody"]["properties"]["certificate"],
        json!({
            "type": "string",
            "format": "binary",
            "description": "",
            "contentEncoding": "base64"
        })
    );
    // The placeholder is captured without a path validator.
    assert_eq!(
        update["parameters"],
        json!([{
            "name": "id",
            "in": "path",
            "description": "",
            "required": true,
            "schema": { "type": "string" }
        }])
    );
}

#[test]
fn test_path_parameter_from_validator() {
    let doc = hero_value();
    let open = &doc["paths"]["/hero/{id}"]["get"];
    assert_eq!(
        open["parameters"],
        json!([{
            "name": "id",
            "in": "path",
            "description": "Hero Id (Example: 1)",
            "required": true,
            "example": 1,
            "schema": { "type": "number" }
        }])
    );
    assert!(open.get("deprecated").is_none());
    assert!(open.get("requestBody").is_none());
}

#[test]
fn test_deprecated_route() {
    let doc = hero_value();
    let deprecated = &doc["paths"]["/hero/deprecated/{id}"]["get"];
    assert_eq!(deprecated["deprecated"], true);
    assert_eq!(deprecated["summary"], "Deprecated api");
}

#[test]
fn test_component_order() {
    let doc = hero_document();
    let names: Vec<&String> = doc.components.schemas.keys().collect();
    assert_eq!(
        names,
        vec![
            "Error",
            "ListHeroesResponse200",
            "ListHeroesResponse200Data",
            "ListHeroesResponse200DataRecordsItem",
            "CreateHeroBody",
            "UpdateHeroBody"
        ]
    );
}

#[test]
fn test_same_input_same_document() {
    assert_eq!(
        hero_document().to_json_pretty().unwrap(),
        hero_document().to_json_pretty().unwrap()
    );
}

#[test]
fn test_yaml_output_round_trips() {
    let yaml = hero_document().to_yaml().unwrap();
    let parsed: Document = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(parsed, hero_document());
}

#[test]
fn test_invalid_validator_aborts_build() {
    let mut module = hero_module();
    module.routes[0]
        .validators
        .as_mut()
        .unwrap()
        .query = Some(json!(["not", "a", "description"]));
    let err = build_document(&[module], &DocumentSkeleton::default()).unwrap_err();
    assert!(matches!(err, AppError::InvalidSchemaSource(_)));
}
