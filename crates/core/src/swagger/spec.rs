//! Swagger 1.2 API declaration structs for serde deserialization.
//!
//! Only the subset needed to drive code generation is modelled. Every struct
//! keeps keys it does not recognise in an `unknown` map so the parser can
//! report them instead of dropping them silently.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Keys that were present in the document but are not part of the model.
pub type UnknownFields = BTreeMap<String, Value>;

/// Treat an explicit `null` like an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Root API declaration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDeclaration {
    /// Declared Swagger version, e.g. `1.2`.
    pub swagger_version: Option<String>,
    /// Version of the described API.
    pub api_version: Option<String>,
    /// Root URL the API paths are relative to.
    pub base_path: Option<String>,
    /// Path of this declaration within the resource listing.
    pub resource_path: Option<String>,
    /// Default response MIME types.
    pub produces: Option<Vec<String>>,
    /// Default request MIME types.
    pub consumes: Option<Vec<String>>,
    /// Operation groups. `None` means the document is not a Swagger document.
    pub apis: Option<Vec<Api>>,
    /// Model definitions in declaration order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub models: IndexMap<String, ModelDefinition>,
    /// Unrecognised keys.
    #[serde(flatten)]
    pub unknown: UnknownFields,
}

/// A group of operations sharing one path.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Api {
    /// Relative path, with `{param}` placeholders. Required.
    pub path: Option<String>,
    /// Free-form description of the group.
    pub description: Option<String>,
    /// Operations available on `path`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub operations: Vec<Operation>,
    /// Unrecognised keys.
    #[serde(flatten)]
    pub unknown: UnknownFields,
}

/// A single callable endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// HTTP method. Required.
    pub method: Option<String>,
    /// Unique operation name, used for the generated method name.
    pub nickname: Option<String>,
    /// Short summary.
    pub summary: Option<String>,
    /// Longer notes.
    pub notes: Option<String>,
    /// Return type: a primitive, `void`, `array`, or a model id.
    #[serde(rename = "type")]
    pub return_type: Option<String>,
    /// Format refining `return_type`, e.g. `int64`.
    pub format: Option<String>,
    /// Element type when `return_type` is `array`.
    pub items: Option<Items>,
    /// Declared parameters, in order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub parameters: Vec<Parameter>,
    /// Documented non-default responses.
    #[serde(default, deserialize_with = "null_as_default")]
    pub response_messages: Vec<ResponseMessage>,
    /// Response MIME types.
    pub produces: Option<Vec<String>>,
    /// Request MIME types.
    pub consumes: Option<Vec<String>>,
    /// Deprecation marker.
    pub deprecated: Option<Deprecated>,
    /// Unrecognised keys.
    #[serde(flatten)]
    pub unknown: UnknownFields,
}

/// `deprecated` is a string in Swagger 1.2 but boolean in the wild.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Deprecated {
    /// `"deprecated": true`
    Bool(bool),
    /// `"deprecated": "true"`
    Text(String),
}

impl Deprecated {
    /// True when the operation is marked deprecated.
    pub fn is_set(&self) -> bool {
        match self {
            Deprecated::Bool(value) => *value,
            Deprecated::Text(text) => text.eq_ignore_ascii_case("true"),
        }
    }
}

/// An operation parameter.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    /// `path`, `query`, `body`, `header`, or `form`. Required.
    pub param_type: Option<String>,
    /// Wire name. Required.
    pub name: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Whether the caller must supply the parameter.
    #[serde(default, deserialize_with = "null_as_default")]
    pub required: bool,
    /// A primitive or a model id.
    #[serde(rename = "type")]
    pub data_type: Option<String>,
    /// Format refining `data_type`.
    pub format: Option<String>,
    /// Element type when `data_type` is `array`.
    pub items: Option<Items>,
    /// The parameter accepts a list of values.
    #[serde(default, deserialize_with = "null_as_default")]
    pub allow_multiple: bool,
    /// Unrecognised keys.
    #[serde(flatten)]
    pub unknown: UnknownFields,
}

/// A documented response status.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMessage {
    /// HTTP status code. Required.
    pub code: Option<i64>,
    /// Explanation of the status.
    pub message: Option<String>,
    /// Model returned with this status.
    pub response_model: Option<String>,
    /// Unrecognised keys.
    #[serde(flatten)]
    pub unknown: UnknownFields,
}

/// A named data type.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDefinition {
    /// Model id, normally equal to its key in `models`.
    pub id: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Names of properties that must be present.
    #[serde(default, deserialize_with = "null_as_default")]
    pub required: Vec<String>,
    /// Properties in declaration order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: IndexMap<String, Property>,
    /// Names of models that specialise this one.
    pub sub_types: Option<Vec<String>>,
    /// Property that tells subtypes apart.
    pub discriminator: Option<String>,
    /// Unrecognised keys.
    #[serde(flatten)]
    pub unknown: UnknownFields,
}

/// A model property.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// A primitive, `array`, or a model id.
    #[serde(rename = "type")]
    pub data_type: Option<String>,
    /// Format refining `data_type`.
    pub format: Option<String>,
    /// Model reference. Arrives as `$ref` and is rewritten before parsing.
    #[serde(rename = "ref")]
    pub reference: Option<String>,
    /// Element type when `data_type` is `array`.
    pub items: Option<Items>,
    /// Free-form description.
    pub description: Option<String>,
    /// Allowed values.
    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<Value>>,
    /// Value assumed when the property is absent.
    pub default_value: Option<Value>,
    /// Lower bound for numbers.
    pub minimum: Option<Value>,
    /// Upper bound for numbers.
    pub maximum: Option<Value>,
    /// Array elements must be distinct.
    pub unique_items: Option<bool>,
    /// Unrecognised keys.
    #[serde(flatten)]
    pub unknown: UnknownFields,
}

/// Element type of an array.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Items {
    /// A primitive type name.
    #[serde(rename = "type")]
    pub data_type: Option<String>,
    /// Format refining `data_type`.
    pub format: Option<String>,
    /// Model reference, rewritten from `$ref`.
    #[serde(rename = "ref")]
    pub reference: Option<String>,
    /// Unrecognised keys.
    #[serde(flatten)]
    pub unknown: UnknownFields,
}

/// Outcome of looking up the model that declares `name` as a subtype.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParentLookup {
    /// Exactly one model lists the name.
    Found(String),
    /// No model lists the name.
    NotFound,
    /// More than one model lists the name in its `subTypes`.
    Ambiguous(Vec<String>),
}

impl ParentLookup {
    /// The parent, when there is exactly one.
    pub fn found(&self) -> Option<&str> {
        match self {
            ParentLookup::Found(parent) => Some(parent),
            ParentLookup::NotFound | ParentLookup::Ambiguous(_) => None,
        }
    }
}

impl ApiDeclaration {
    /// Reverse lookup of the model whose `subTypes` contains `name`.
    pub fn parent_of(&self, name: &str) -> ParentLookup {
        let mut parents: Vec<String> = self
            .models
            .iter()
            .filter(|(_, model)| {
                model
                    .sub_types
                    .as_ref()
                    .is_some_and(|subs| subs.iter().any(|sub| sub == name))
            })
            .map(|(parent, _)| parent.clone())
            .collect();

        match parents.len() {
            0 => ParentLookup::NotFound,
            1 => ParentLookup::Found(parents.remove(0)),
            _ => ParentLookup::Ambiguous(parents),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn declaration(json: &str) -> ApiDeclaration {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_models_keep_declaration_order() {
        let decl = declaration(
            r#"{"apis":[],"models":{"Zebra":{},"Apple":{},"Mango":{}}}"#,
        );
        let names: Vec<_> = decl.models.keys().cloned().collect();
        assert_eq!(names, ["Zebra", "Apple", "Mango"]);
    }

    #[test]
    fn test_unknown_keys_are_kept() {
        let decl = declaration(r#"{"apis":[],"extra":1,"models":{"Pet":{"xml":{}}}}"#);
        assert!(decl.unknown.contains_key("extra"));
        assert!(decl.models["Pet"].unknown.contains_key("xml"));
    }

    #[test]
    fn test_parent_found() {
        let decl = declaration(
            r#"{"apis":[],"models":{
                "Animal":{"subTypes":["Cat","Dog"]},
                "Cat":{},
                "Dog":{}
            }}"#,
        );
        assert_eq!(decl.parent_of("Cat"), ParentLookup::Found("Animal".into()));
        assert_eq!(decl.parent_of("Dog").found(), Some("Animal"));
    }

    #[test]
    fn test_parent_not_found() {
        let decl = declaration(r#"{"apis":[],"models":{"Animal":{"subTypes":["Cat"]}}}"#);
        assert_eq!(decl.parent_of("Animal"), ParentLookup::NotFound);
        assert_eq!(decl.parent_of("Missing"), ParentLookup::NotFound);
    }

    #[test]
    fn test_parent_ambiguous() {
        let decl = declaration(
            r#"{"apis":[],"models":{
                "Animal":{"subTypes":["Cat"]},
                "Pet":{"subTypes":["Cat"]},
                "Cat":{}
            }}"#,
        );
        assert_eq!(
            decl.parent_of("Cat"),
            ParentLookup::Ambiguous(vec!["Animal".into(), "Pet".into()])
        );
        assert_eq!(decl.parent_of("Cat").found(), None);
    }

    #[test]
    fn test_null_collections_are_empty() {
        let decl = declaration(
            r#"{"apis":[{"path":"/pets","operations":null},
                        {"path":"/tags","operations":[{"method":"GET","parameters":null,"responseMessages":null}]}],
                "models":null}"#,
        );
        let apis = decl.apis.unwrap();
        assert!(apis[0].operations.is_empty());
        assert!(apis[1].operations[0].parameters.is_empty());
        assert!(apis[1].operations[0].response_messages.is_empty());
        assert!(decl.models.is_empty());

        let decl = declaration(
            r#"{"apis":[],"models":{"Pet":{"required":null,"properties":null}}}"#,
        );
        assert!(decl.models["Pet"].required.is_empty());
        assert!(decl.models["Pet"].properties.is_empty());
    }

    #[test]
    fn test_missing_required_members_default_to_none() {
        let decl = declaration(
            r#"{"apis":[{"operations":[{"parameters":[{}],"responseMessages":[{}]}]}]}"#,
        );
        let api = &decl.apis.unwrap()[0];
        assert_eq!(api.path, None);
        let op = &api.operations[0];
        assert_eq!(op.method, None);
        assert_eq!(op.parameters[0].param_type, None);
        assert_eq!(op.parameters[0].name, None);
        assert!(!op.parameters[0].required);
        assert_eq!(op.response_messages[0].code, None);
    }

    #[test]
    fn test_deprecated_forms() {
        assert!(Deprecated::Bool(true).is_set());
        assert!(Deprecated::Text("true".into()).is_set());
        assert!(!Deprecated::Text("false".into()).is_set());
    }
}
