//! Template lookup and rendering.
//!
//! Templates are plain tera files named
//! `<template_dir>/<prefix><Model|Action>Template.txt`. The view is bound under
//! a single top-level variable, `Model`.

use std::error::Error as _;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::Serialize;
use tera::Context;
use tracing::debug;

use crate::convert::{ApiDescriptor, DataType};
use crate::error::{GenError, Result};
use crate::options::Options;

/// Variable every template reads its view from.
pub const VIEW_VARIABLE: &str = "Model";

/// Which of the two templates to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    /// One file per model.
    Model,
    /// The aggregate operations file.
    Action,
}

impl TemplateKind {
    /// Name used in the template file name.
    pub const fn as_str(self) -> &'static str {
        match self {
            TemplateKind::Model => "Model",
            TemplateKind::Action => "Action",
        }
    }
}

/// View bound into the model template.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModelFileView<'a> {
    /// Document locator as given.
    pub resourceurl: &'a str,
    /// Configured namespace.
    pub namespace: &'a str,
    /// The model being rendered.
    pub data_type: &'a DataType,
}

/// View bound into the operations template.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct OperationsFileView<'a> {
    /// Document locator as given.
    pub resourceurl: &'a str,
    /// Configured namespace.
    pub namespace: &'a str,
    /// Base name of the document, also the output file name.
    pub name: &'a str,
    /// Every operation group in declaration order.
    pub apis: &'a [ApiDescriptor],
}

/// Loads templates from one folder and renders views through them.
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    template_dir: PathBuf,
    prefix: String,
}

impl TemplateRenderer {
    /// Renderer reading `<template_dir>/<prefix>...Template.txt`.
    pub fn new(template_dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            template_dir: template_dir.into(),
            prefix: prefix.into(),
        }
    }

    /// Renderer for the configured template folder and prefix.
    pub fn from_options(options: &Options) -> Self {
        Self::new(&options.template_dir, &options.template_prefix)
    }

    /// File the template for `kind` is read from.
    pub fn template_path(&self, kind: TemplateKind) -> PathBuf {
        self.template_dir
            .join(format!("{}{}Template.txt", self.prefix, kind.as_str()))
    }

    /// Render `view` with the template for `kind`. The template source is
    /// read from disk on every call.
    pub fn render<V: Serialize>(&self, kind: TemplateKind, view: &V) -> Result<String> {
        let path = self.template_path(kind);
        let source = fs::read_to_string(&path).map_err(|err| {
            if err.kind() == ErrorKind::NotFound {
                GenError::TemplateMissing { path: path.clone() }
            } else {
                GenError::io(&path, &err)
            }
        })?;

        let mut context = Context::new();
        context.insert(VIEW_VARIABLE, view);

        let rendered = tera::Tera::one_off(&source, &context, false).map_err(|err| {
            GenError::Render {
                template: path.display().to_string(),
                message: describe_tera_error(&err),
            }
        })?;

        debug!(
            template = %path.display(),
            rendered_len = rendered.len(),
            "Rendered template."
        );
        Ok(rendered)
    }
}

/// Tera's top-level message is generic; the cause chain holds the detail.
fn describe_tera_error(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
