//! Raw text -> [`ApiDeclaration`].

use std::fmt;

use tracing::{debug, warn};

use super::spec::{ApiDeclaration, Items, UnknownFields};
use crate::error::{GenError, Result};

/// Swagger's schema reference key, stored as `ref` in the data model.
const REFERENCE_KEY: &str = "$ref";
const REWRITTEN_KEY: &str = "ref";

/// How a member differs from the data model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldIssue {
    /// The document has a key the model does not know.
    Unknown,
    /// A member the model requires is absent or `null`.
    Missing,
}

/// One member mismatch between the document and the data model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldWarning {
    /// JSON path of the object holding the key, e.g. `apis[0].operations[1]`.
    pub path: String,
    /// Name of the offending member.
    pub field: String,
    /// Whether the member is extra or absent.
    pub issue: FieldIssue,
}

impl fmt::Display for FieldWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.issue {
            FieldIssue::Unknown => write!(f, "Could not find member '{}'", self.field)?,
            FieldIssue::Missing => write!(f, "Required member '{}' is missing", self.field)?,
        }
        if !self.path.is_empty() {
            write!(f, " on {}", self.path)?;
        }
        Ok(())
    }
}

/// Parsed declaration plus the field mismatches seen on the way.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    /// The best-effort declaration.
    pub declaration: ApiDeclaration,
    /// Unknown and missing members, in document order.
    pub warnings: Vec<FieldWarning>,
}

/// Blunt textual rewrite of every `$ref` to `ref`. Applying it again is a
/// no-op since no `$ref` survives the first pass.
pub fn rewrite_references(json: &str) -> String {
    json.replace(REFERENCE_KEY, REWRITTEN_KEY)
}

/// Parse a Swagger API declaration.
///
/// Unknown keys and missing required members are logged one by one and
/// returned as warnings; they never abort parsing. `null` collections read as
/// empty. A document without any `apis` is rejected with
/// [`GenError::NotSwagger`].
pub fn parse_document(json: &str) -> Result<ParsedDocument> {
    let json = rewrite_references(json);

    let declaration: ApiDeclaration =
        serde_json::from_str(&json).map_err(|err| GenError::InvalidJson(err.to_string()))?;

    let warnings = collect_field_warnings(&declaration);
    for warning in &warnings {
        warn!(path = %warning.path, field = %warning.field, issue = ?warning.issue, "{warning}");
    }

    if declaration.apis.as_ref().is_none_or(Vec::is_empty) {
        return Err(GenError::NotSwagger);
    }

    debug!(
        apis = declaration.apis.as_ref().map_or(0, Vec::len),
        models = declaration.models.len(),
        warnings = warnings.len(),
        "Parsed Swagger document."
    );

    Ok(ParsedDocument {
        declaration,
        warnings,
    })
}

/// Walk the whole declaration and list every unrecognised key and every
/// absent required member in document order.
pub fn collect_field_warnings(declaration: &ApiDeclaration) -> Vec<FieldWarning> {
    let mut warnings = Vec::new();
    push_unknown(&mut warnings, "", &declaration.unknown);

    for (api_index, api) in declaration.apis.iter().flatten().enumerate() {
        let api_path = format!("apis[{api_index}]");
        push_missing(&mut warnings, &api_path, "path", api.path.is_none());
        push_unknown(&mut warnings, &api_path, &api.unknown);

        for (op_index, op) in api.operations.iter().enumerate() {
            let op_path = format!("{api_path}.operations[{op_index}]");
            push_missing(&mut warnings, &op_path, "method", op.method.is_none());
            push_unknown(&mut warnings, &op_path, &op.unknown);
            push_items(&mut warnings, &op_path, op.items.as_ref());

            for (param_index, param) in op.parameters.iter().enumerate() {
                let param_path = format!("{op_path}.parameters[{param_index}]");
                push_missing(&mut warnings, &param_path, "paramType", param.param_type.is_none());
                push_missing(&mut warnings, &param_path, "name", param.name.is_none());
                push_unknown(&mut warnings, &param_path, &param.unknown);
                push_items(&mut warnings, &param_path, param.items.as_ref());
            }

            for (msg_index, msg) in op.response_messages.iter().enumerate() {
                let msg_path = format!("{op_path}.responseMessages[{msg_index}]");
                push_missing(&mut warnings, &msg_path, "code", msg.code.is_none());
                push_unknown(&mut warnings, &msg_path, &msg.unknown);
            }
        }
    }

    for (model_name, model) in &declaration.models {
        let model_path = format!("models.{model_name}");
        push_unknown(&mut warnings, &model_path, &model.unknown);

        for (prop_name, prop) in &model.properties {
            let prop_path = format!("{model_path}.properties.{prop_name}");
            push_unknown(&mut warnings, &prop_path, &prop.unknown);
            push_items(&mut warnings, &prop_path, prop.items.as_ref());
        }
    }

    warnings
}

fn push_items(warnings: &mut Vec<FieldWarning>, parent: &str, items: Option<&Items>) {
    if let Some(items) = items {
        push_unknown(warnings, &format!("{parent}.items"), &items.unknown);
    }
}

fn push_unknown(warnings: &mut Vec<FieldWarning>, path: &str, unknown: &UnknownFields) {
    warnings.extend(unknown.keys().map(|field| FieldWarning {
        path: path.to_string(),
        field: field.clone(),
        issue: FieldIssue::Unknown,
    }));
}

fn push_missing(warnings: &mut Vec<FieldWarning>, path: &str, field: &str, missing: bool) {
    if missing {
        warnings.push(FieldWarning {
            path: path.to_string(),
            field: field.to_string(),
            issue: FieldIssue::Missing,
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const PETS_JSON: &str = r##"{
  "swaggerVersion": "1.2",
  "basePath": "http://petstore.example.com/api",
  "resourcePath": "/pets",
  "apis": [
    {
      "path": "/pets/{petId}",
      "operations": [
        {
          "method": "GET",
          "nickname": "getPetById",
          "type": "Pet",
          "parameters": [
            { "paramType": "path", "name": "petId", "type": "integer", "format": "int64", "required": true }
          ]
        }
      ]
    }
  ],
  "models": {
    "Pet": {
      "id": "Pet",
      "required": ["id"],
      "properties": {
        "id": { "type": "integer", "format": "int64" },
        "category": { "$ref": "Category" },
        "tags": { "type": "array", "items": { "$ref": "Tag" } }
      }
    },
    "Category": { "id": "Category", "properties": { "name": { "type": "string" } } },
    "Tag": { "id": "Tag", "properties": { "name": { "type": "string" } } }
  }
}"##;

    #[test]
    fn test_parse_resolves_references() {
        let parsed = parse_document(PETS_JSON).unwrap();
        let pet = &parsed.declaration.models["Pet"];

        assert_eq!(pet.properties["category"].reference.as_deref(), Some("Category"));
        let tags_items = pet.properties["tags"].items.as_ref().unwrap();
        assert_eq!(tags_items.reference.as_deref(), Some("Tag"));
        assert!(parsed.warnings.is_empty(), "{:?}", parsed.warnings);
    }

    #[test]
    fn test_rewrite_is_idempotent() {
        let once = rewrite_references(PETS_JSON);
        let twice = rewrite_references(&once);
        assert_eq!(once, twice);
        assert!(!once.contains("$ref"));

        let from_once = parse_document(&once).unwrap();
        let from_twice = parse_document(&twice).unwrap();
        assert_eq!(
            format!("{:?}", from_once.declaration),
            format!("{:?}", from_twice.declaration)
        );
    }

    #[test]
    fn test_rewrite_leaves_similar_names_alone() {
        let json = r#"{"reference":"a","preferred":"b","$ref":"c"}"#;
        assert_eq!(
            rewrite_references(json),
            r#"{"reference":"a","preferred":"b","ref":"c"}"#
        );
    }

    #[test]
    fn test_unknown_fields_warn_without_failing() {
        let json = r#"{
            "apis": [{ "path": "/pets", "shiny": true, "operations": [
                { "method": "GET", "authorizations": {} }
            ]}],
            "info": { "title": "Pets" },
            "models": { "Pet": { "properties": { "name": { "type": "string", "xml": {} } } } }
        }"#;

        let parsed = parse_document(json).unwrap();
        let rendered: Vec<String> = parsed.warnings.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            [
                "Could not find member 'info'",
                "Could not find member 'shiny' on apis[0]",
                "Could not find member 'authorizations' on apis[0].operations[0]",
                "Could not find member 'xml' on models.Pet.properties.name",
            ]
        );
    }

    #[test]
    fn test_missing_required_members_warn_without_failing() {
        let json = r#"{
            "apis": [{ "operations": [
                { "nickname": "listPets", "parameters": [{ "type": "string" }], "responseMessages": [{ "message": "gone" }] }
            ]}]
        }"#;

        let parsed = parse_document(json).unwrap();
        let rendered: Vec<String> = parsed.warnings.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            [
                "Required member 'path' is missing on apis[0]",
                "Required member 'method' is missing on apis[0].operations[0]",
                "Required member 'paramType' is missing on apis[0].operations[0].parameters[0]",
                "Required member 'name' is missing on apis[0].operations[0].parameters[0]",
                "Required member 'code' is missing on apis[0].operations[0].responseMessages[0]",
            ]
        );
        assert!(parsed.warnings.iter().all(|w| w.issue == FieldIssue::Missing));
        let op = &parsed.declaration.apis.as_ref().unwrap()[0].operations[0];
        assert_eq!(op.nickname.as_deref(), Some("listPets"));
        assert_eq!(op.parameters[0].data_type.as_deref(), Some("string"));
    }

    #[test]
    fn test_null_collections_parse_as_empty() {
        let json = r#"{
            "apis": [{ "path": "/pets", "operations": [
                { "method": "GET", "parameters": null, "responseMessages": null }
            ]}],
            "models": null
        }"#;

        let parsed = parse_document(json).unwrap();
        assert!(parsed.warnings.is_empty(), "{:?}", parsed.warnings);
        assert!(parsed.declaration.models.is_empty());
    }

    #[test]
    fn test_null_apis_is_not_swagger() {
        let err = parse_document(r#"{"apis":null}"#).unwrap_err();
        assert!(matches!(err, GenError::NotSwagger), "{err}");
    }

    #[test]
    fn test_missing_apis_is_not_swagger() {
        let err = parse_document(r#"{"foo":"bar"}"#).unwrap_err();
        assert!(matches!(err, GenError::NotSwagger), "{err}");
    }

    #[test]
    fn test_empty_apis_is_not_swagger_even_with_models() {
        let json = r#"{"apis":[],"models":{"Pet":{"properties":{"name":{"type":"string"}}}}}"#;
        let err = parse_document(json).unwrap_err();
        assert!(matches!(err, GenError::NotSwagger), "{err}");
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        let err = parse_document(r#"{"apis": ["#).unwrap_err();
        assert!(matches!(err, GenError::InvalidJson(_)), "{err}");
    }

    #[test]
    fn test_non_object_json_is_rejected() {
        let err = parse_document("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, GenError::InvalidJson(_)), "{err}");
    }
}
