//! Language converters: parsed declaration -> template-ready descriptors.
//!
//! The pipeline is:
//! 1. Registry: converter key -> factory
//! 2. `register_safe_types`: reserve identifiers that collide with the target
//!    language
//! 3. `models` / `apis`: normalized descriptors handed to the renderer
//!
//! Language specifics (keywords, casing, type mapping) live behind
//! [`TargetLanguage`]; [`SwaggerConverter`] does the language-neutral walk.

mod converter;
mod csharp;
pub mod ident;
mod registry;
mod typescript;

use std::fmt;

use serde::Serialize;

use crate::swagger::Items;

pub use converter::{SafeTypes, SwaggerConverter};
pub use csharp::CSharp;
pub use registry::{ConverterFactory, ConverterRegistry};
pub use typescript::TypeScript;

/// Capability set every target-language converter provides.
pub trait LanguageConverter: fmt::Debug {
    /// Rename identifiers that collide with the target language. Call once
    /// before reading descriptors; repeated calls are no-ops.
    fn register_safe_types(&mut self);

    /// Model descriptors in declaration order.
    fn models(&self) -> Vec<DataType>;

    /// Operation groups in declaration order.
    fn apis(&self) -> Vec<ApiDescriptor>;

    /// Extension of generated files, without the dot.
    fn default_extension(&self) -> &'static str;
}

/// Identifier and type rules of one target language.
pub trait TargetLanguage: fmt::Debug {
    /// Extension of generated files, without the dot.
    const EXTENSION: &'static str;

    /// Identifier for the model declared as `name`.
    fn type_identifier(&self, name: &str) -> String;

    /// Identifier for property `json_name` declared on type `owner`
    /// (already a safe type identifier).
    fn property_identifier(&self, json_name: &str, owner: &str) -> String;

    /// Identifier for an operation parameter.
    fn parameter_identifier(&self, name: &str) -> String;

    /// Identifier for an operation, from its nickname or method/path words.
    fn method_identifier(&self, words: &[String]) -> String;

    /// Render a resolved type. `model` maps a model name to its safe type name.
    fn render_type(&self, kind: &TypeKind, model: &dyn Fn(&str) -> String) -> String;

    /// Stem of the file a model is written to.
    fn file_stem(&self, type_name: &str) -> String {
        type_name.to_string()
    }
}

/// Swagger primitive type names, including the legacy 1.1 spellings.
const PRIMITIVES: &[&str] = &[
    "integer", "number", "string", "boolean", "File", "int", "long", "float", "double", "byte",
    "date", "dateTime", "date-time",
];

/// Language-neutral view of a Swagger type reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    /// A Swagger primitive.
    Primitive {
        /// Primitive type name, e.g. `integer`.
        name: String,
        /// Optional refinement, e.g. `int64`.
        format: Option<String>,
    },
    /// A list of the inner kind.
    Array(Box<TypeKind>),
    /// A model, by declared name.
    Model(String),
    /// No value.
    Void,
    /// No type information.
    Unknown,
}

impl TypeKind {
    /// Resolve `type`/`format`/`ref`/`items` into a kind. `ref` wins over
    /// `type`, and a non-primitive `type` names a model.
    pub fn resolve(
        data_type: Option<&str>,
        format: Option<&str>,
        reference: Option<&str>,
        items: Option<&Items>,
    ) -> Self {
        if let Some(reference) = reference {
            return TypeKind::Model(reference.to_string());
        }
        match data_type {
            None => TypeKind::Unknown,
            Some("void") => TypeKind::Void,
            Some("array") => {
                let inner = items.map_or(TypeKind::Unknown, |items| {
                    TypeKind::resolve(
                        items.data_type.as_deref(),
                        items.format.as_deref(),
                        items.reference.as_deref(),
                        None,
                    )
                });
                TypeKind::Array(Box::new(inner))
            }
            Some(name) if PRIMITIVES.contains(&name) => TypeKind::Primitive {
                name: name.to_string(),
                format: format.map(str::to_string),
            },
            Some(model) => TypeKind::Model(model.to_string()),
        }
    }

    /// True for arrays of any element kind.
    pub const fn is_array(&self) -> bool {
        matches!(self, TypeKind::Array(_))
    }

    /// True for model references, directly or as array elements.
    pub fn is_reference(&self) -> bool {
        match self {
            TypeKind::Model(_) => true,
            TypeKind::Array(inner) => inner.is_reference(),
            _ => false,
        }
    }
}

/// Normalized model descriptor bound into the model template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DataType {
    /// Safe type identifier.
    pub name: String,
    /// Name as declared in the document.
    pub original_name: String,
    /// Output file stem, unique within one declaration.
    pub file_name: String,
    /// Model description.
    pub description: Option<String>,
    /// Properties in declaration order.
    pub properties: Vec<DataProperty>,
    /// Safe name of the declaring parent, when exactly one model lists this
    /// one in its `subTypes`.
    pub parent: Option<String>,
    /// Safe names of the models listed in `subTypes`.
    pub sub_types: Vec<String>,
    /// Property telling subtypes apart.
    pub discriminator: Option<String>,
}

/// One model property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DataProperty {
    /// Safe member identifier, unique within the model.
    pub name: String,
    /// Key in the JSON payload.
    pub json_name: String,
    /// Rendered target-language type.
    #[serde(rename = "Type")]
    pub type_name: String,
    /// Property description.
    pub description: Option<String>,
    /// Listed in the model's `required`.
    pub required: bool,
    /// The type is a list.
    pub is_array: bool,
    /// The type names a model, directly or as list element.
    pub is_reference: bool,
    /// Allowed values, as text.
    #[serde(rename = "Enum")]
    pub enum_values: Vec<String>,
}

/// Normalized operation group (one per declared `apis` entry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApiDescriptor {
    /// Relative path; empty when the document omits it.
    pub path: String,
    /// Group description.
    pub description: Option<String>,
    /// Operations in declaration order.
    pub operations: Vec<OperationDescriptor>,
}

/// One callable endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct OperationDescriptor {
    /// Method identifier, unique within the operations file.
    pub name: String,
    /// Uppercase HTTP method.
    pub method: String,
    /// Path of the owning group.
    pub path: String,
    /// Rendered return type; the language's void spelling when absent.
    pub return_type: String,
    /// Short summary.
    pub summary: Option<String>,
    /// Longer notes.
    pub notes: Option<String>,
    /// Marked deprecated.
    pub deprecated: bool,
    /// Parameters in declaration order.
    pub parameters: Vec<ParameterDescriptor>,
}

/// One operation parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ParameterDescriptor {
    /// Safe identifier, unique within the operation.
    pub name: String,
    /// Wire name.
    pub json_name: String,
    /// Rendered target-language type.
    #[serde(rename = "Type")]
    pub type_name: String,
    /// `path`, `query`, `body`, `header` or `form`.
    pub location: String,
    /// The caller must supply it.
    pub required: bool,
    /// Parameter description.
    pub description: Option<String>,
}
