//! Language-neutral walk from declaration to descriptors.

use std::borrow::Cow;
use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, warn};

use super::ident::{UniqueNames, operation_words};
use super::{
    ApiDescriptor, DataProperty, DataType, LanguageConverter, OperationDescriptor,
    ParameterDescriptor, TargetLanguage, TypeKind,
};
use crate::swagger::{Api, ApiDeclaration, ModelDefinition, Operation, Parameter, ParentLookup};

/// Reserved identifiers for one declaration: model name -> safe type name,
/// and (model, property) -> safe property name.
#[derive(Debug, Clone, Default)]
pub struct SafeTypes {
    types: HashMap<String, String>,
    properties: HashMap<(String, String), String>,
}

impl SafeTypes {
    /// Build the table for every model and property in `declaration`.
    ///
    /// Names that collide after conversion get a numeric suffix, in
    /// declaration order. Model names are compared by their file stem,
    /// ignoring case.
    pub fn build<L: TargetLanguage>(declaration: &ApiDeclaration, language: &L) -> Self {
        let mut safe = Self::default();

        let mut file_stems = UniqueNames::case_insensitive();
        for name in declaration.models.keys() {
            let candidate = language.type_identifier(name);
            let stem = language.file_stem(&candidate);
            let unique_stem = file_stems.claim(&stem);
            let type_name = match unique_stem.strip_prefix(stem.as_str()) {
                Some(suffix) if !suffix.is_empty() => format!("{candidate}{suffix}"),
                _ => candidate,
            };
            if &type_name != name {
                debug!(original = %name, renamed = %type_name, "Renamed model identifier.");
            }
            safe.types.insert(name.clone(), type_name);
        }

        for (model_name, model) in &declaration.models {
            let owner = safe.type_name(language, model_name).into_owned();
            let mut property_names = UniqueNames::new();
            for json_name in model.properties.keys() {
                let prop_name =
                    property_names.claim(&language.property_identifier(json_name, &owner));
                if &prop_name != json_name {
                    debug!(
                        model = %model_name,
                        original = %json_name,
                        renamed = %prop_name,
                        "Renamed property identifier."
                    );
                }
                safe.properties
                    .insert((model_name.clone(), json_name.clone()), prop_name);
            }
        }

        safe
    }

    /// Safe name for a model. Undeclared names are converted on the fly.
    pub fn type_name<L: TargetLanguage>(&self, language: &L, name: &str) -> Cow<'_, str> {
        match self.types.get(name) {
            Some(safe) => Cow::Borrowed(safe.as_str()),
            None => Cow::Owned(language.type_identifier(name)),
        }
    }

    fn property_name(&self, model: &str, json_name: &str) -> Option<&str> {
        self.properties
            .get(&(model.to_string(), json_name.to_string()))
            .map(String::as_str)
    }
}

/// Language-neutral converter driven by a [`TargetLanguage`].
#[derive(Debug)]
pub struct SwaggerConverter<L: TargetLanguage> {
    declaration: ApiDeclaration,
    language: L,
    safe_types: Option<SafeTypes>,
}

impl<L: TargetLanguage> SwaggerConverter<L> {
    /// Converter for `declaration`. Call `register_safe_types` before
    /// reading descriptors.
    pub fn new(declaration: ApiDeclaration, language: L) -> Self {
        Self {
            declaration,
            language,
            safe_types: None,
        }
    }

    fn safe_types(&self) -> Cow<'_, SafeTypes> {
        match &self.safe_types {
            Some(safe) => Cow::Borrowed(safe),
            None => {
                warn!("Descriptors read before safe types were registered.");
                Cow::Owned(SafeTypes::build(&self.declaration, &self.language))
            }
        }
    }

    fn render(&self, safe: &SafeTypes, kind: &TypeKind) -> String {
        let model = |name: &str| safe.type_name(&self.language, name).into_owned();
        self.language.render_type(kind, &model)
    }

    fn data_type(&self, safe: &SafeTypes, name: &str, model: &ModelDefinition) -> DataType {
        let type_name = safe.type_name(&self.language, name).into_owned();

        let properties = model
            .properties
            .iter()
            .map(|(json_name, prop)| {
                let kind = TypeKind::resolve(
                    prop.data_type.as_deref(),
                    prop.format.as_deref(),
                    prop.reference.as_deref(),
                    prop.items.as_ref(),
                );
                let prop_name = safe.property_name(name, json_name).map_or_else(
                    || self.language.property_identifier(json_name, &type_name),
                    str::to_string,
                );
                DataProperty {
                    name: prop_name,
                    json_name: json_name.clone(),
                    type_name: self.render(safe, &kind),
                    description: prop.description.clone(),
                    required: model.required.iter().any(|r| r == json_name),
                    is_array: kind.is_array(),
                    is_reference: kind.is_reference(),
                    enum_values: prop
                        .enum_values
                        .iter()
                        .flatten()
                        .map(enum_value_text)
                        .collect(),
                }
            })
            .collect();

        let parent = match self.declaration.parent_of(name) {
            ParentLookup::Found(parent) => {
                Some(safe.type_name(&self.language, &parent).into_owned())
            }
            ParentLookup::NotFound => None,
            ParentLookup::Ambiguous(parents) => {
                warn!(
                    model = %name,
                    parents = ?parents,
                    "Model is listed as a subtype of several models; no parent assigned."
                );
                None
            }
        };

        DataType {
            file_name: self.language.file_stem(&type_name),
            name: type_name,
            original_name: name.to_string(),
            description: model.description.clone(),
            properties,
            parent,
            sub_types: model
                .sub_types
                .iter()
                .flatten()
                .map(|sub| safe.type_name(&self.language, sub).into_owned())
                .collect(),
            discriminator: model.discriminator.clone(),
        }
    }

    fn api(&self, safe: &SafeTypes, api: &Api, methods: &mut UniqueNames) -> ApiDescriptor {
        let path = api.path.as_deref().unwrap_or_default();
        ApiDescriptor {
            path: path.to_string(),
            description: api.description.clone(),
            operations: api
                .operations
                .iter()
                .map(|op| self.operation(safe, path, op, methods))
                .collect(),
        }
    }

    fn operation(
        &self,
        safe: &SafeTypes,
        path: &str,
        op: &Operation,
        methods: &mut UniqueNames,
    ) -> OperationDescriptor {
        let method = op.method.as_deref().unwrap_or_default();
        let words = match op.nickname.as_deref().filter(|n| !n.is_empty()) {
            Some(nickname) => vec![nickname.to_string()],
            None => operation_words(method, path),
        };

        let return_kind = match op.return_type.as_deref() {
            None => TypeKind::Void,
            Some(data_type) => TypeKind::resolve(
                Some(data_type),
                op.format.as_deref(),
                None,
                op.items.as_ref(),
            ),
        };

        OperationDescriptor {
            name: methods.claim(&self.language.method_identifier(&words)),
            method: method.to_ascii_uppercase(),
            path: path.to_string(),
            return_type: self.render(safe, &return_kind),
            summary: op.summary.clone(),
            notes: op.notes.clone(),
            deprecated: op.deprecated.as_ref().is_some_and(|d| d.is_set()),
            parameters: {
                let mut names = UniqueNames::new();
                op.parameters
                    .iter()
                    .map(|param| self.parameter(safe, param, &mut names))
                    .collect()
            },
        }
    }

    fn parameter(
        &self,
        safe: &SafeTypes,
        param: &Parameter,
        names: &mut UniqueNames,
    ) -> ParameterDescriptor {
        let json_name = param.name.as_deref().unwrap_or_default();
        let mut kind = TypeKind::resolve(
            param.data_type.as_deref(),
            param.format.as_deref(),
            None,
            param.items.as_ref(),
        );
        if param.allow_multiple && !kind.is_array() {
            kind = TypeKind::Array(Box::new(kind));
        }

        ParameterDescriptor {
            name: names.claim(&self.language.parameter_identifier(json_name)),
            json_name: json_name.to_string(),
            type_name: self.render(safe, &kind),
            location: param
                .param_type
                .as_deref()
                .unwrap_or_default()
                .to_ascii_lowercase(),
            required: param.required,
            description: param.description.clone(),
        }
    }
}

impl<L: TargetLanguage> LanguageConverter for SwaggerConverter<L> {
    fn register_safe_types(&mut self) {
        if self.safe_types.is_some() {
            return;
        }
        let safe = SafeTypes::build(&self.declaration, &self.language);
        debug!(
            types = safe.types.len(),
            properties = safe.properties.len(),
            "Registered safe types."
        );
        self.safe_types = Some(safe);
    }

    fn models(&self) -> Vec<DataType> {
        let safe = self.safe_types();
        self.declaration
            .models
            .iter()
            .map(|(name, model)| self.data_type(&safe, name, model))
            .collect()
    }

    fn apis(&self) -> Vec<ApiDescriptor> {
        let safe = self.safe_types();
        let mut methods = UniqueNames::new();
        self.declaration
            .apis
            .iter()
            .flatten()
            .map(|api| self.api(&safe, api, &mut methods))
            .collect()
    }

    fn default_extension(&self) -> &'static str {
        L::EXTENSION
    }
}

fn enum_value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
