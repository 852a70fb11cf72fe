//! Swagger API declaration model and parser.

mod parser;
mod spec;

pub use parser::{
    FieldIssue, FieldWarning, ParsedDocument, collect_field_warnings, parse_document,
    rewrite_references,
};
pub use spec::{
    Api, ApiDeclaration, Deprecated, Items, ModelDefinition, Operation, ParentLookup, Parameter,
    Property, ResponseMessage, UnknownFields,
};
