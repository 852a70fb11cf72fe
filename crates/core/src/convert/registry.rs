//! Converter key -> factory lookup.
//!
//! The registry is built once at startup and passed to the pipeline
//! explicitly. Adding a language means one [`TargetLanguage`] implementation
//! and one `register` call in [`ConverterRegistry::builtin`].
//!
//! [`TargetLanguage`]: super::TargetLanguage

use std::collections::BTreeMap;
use std::fmt;

use super::{CSharp, LanguageConverter, SwaggerConverter, TypeScript};
use crate::error::{GenError, Result};
use crate::swagger::ApiDeclaration;

/// Builds a converter for a parsed declaration.
pub type ConverterFactory = fn(ApiDeclaration) -> Box<dyn LanguageConverter>;

/// Case-sensitive mapping from language key to converter factory.
#[derive(Clone, Default)]
pub struct ConverterRegistry {
    factories: BTreeMap<String, ConverterFactory>,
}

impl fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterRegistry")
            .field("keys", &self.keys())
            .finish()
    }
}

fn csharp(declaration: ApiDeclaration) -> Box<dyn LanguageConverter> {
    Box::new(SwaggerConverter::new(declaration, CSharp))
}

fn typescript(declaration: ApiDeclaration) -> Box<dyn LanguageConverter> {
    Box::new(SwaggerConverter::new(declaration, TypeScript))
}

impl ConverterRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every converter shipped in this crate.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("c#", csharp);
        registry.register("typescript", typescript);
        registry
    }

    /// Add or replace the factory for `key`.
    pub fn register(&mut self, key: impl Into<String>, factory: ConverterFactory) {
        self.factories.insert(key.into(), factory);
    }

    /// Look up a factory. Unknown keys fail; there is no default.
    pub fn resolve(&self, key: &str) -> Result<ConverterFactory> {
        self.factories
            .get(key)
            .copied()
            .ok_or_else(|| GenError::UnknownConverter {
                key: key.to_string(),
                known: self.keys(),
            })
    }

    /// Registered keys in sorted order.
    pub fn keys(&self) -> Vec<String> {
        self.factories.keys().cloned().collect()
    }
}
