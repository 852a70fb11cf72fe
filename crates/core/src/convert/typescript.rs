//! TypeScript target: `.ts` files, camelCase members, `_`-escaped reserved words.

use std::collections::HashSet;
use std::sync::LazyLock;

use super::ident::{capitalize_first, lowercase_first};
use super::{TargetLanguage, TypeKind};

/// TypeScript reserved words that cannot be used as identifiers.
pub static TS_RESERVED_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "break",
        "case",
        "catch",
        "class",
        "const",
        "continue",
        "debugger",
        "default",
        "delete",
        "do",
        "else",
        "enum",
        "export",
        "extends",
        "false",
        "finally",
        "for",
        "function",
        "if",
        "import",
        "in",
        "instanceof",
        "new",
        "null",
        "return",
        "super",
        "switch",
        "this",
        "throw",
        "true",
        "try",
        "typeof",
        "var",
        "void",
        "while",
        "with",
        "yield",
        "let",
        "static",
        "implements",
        "interface",
        "package",
        "private",
        "protected",
        "public",
        "await",
        "async",
    ]
    .into_iter()
    .collect()
});

/// Check if a property name has to be quoted.
///
/// Returns true if the name:
/// - Is empty
/// - Doesn't start with a letter, underscore, or dollar sign
/// - Contains characters other than alphanumeric, underscore, or dollar sign
pub fn needs_quoting(name: &str) -> bool {
    name.is_empty()
        || !name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Escape backslashes and double quotes for a string literal.
pub fn escape_js_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Quote a property key if it is not a valid identifier.
pub fn quote_if_needed(name: &str) -> String {
    if needs_quoting(name) {
        format!("\"{}\"", escape_js_string(name))
    } else {
        name.to_string()
    }
}

/// Sanitize a name into a valid TypeScript identifier.
/// - Splits on `-`, `.`, ` ` and joins as camelCase
/// - Prepends `_` if it starts with a digit
/// - Escapes reserved words with a `_` prefix
pub fn sanitize_ts_identifier(name: &str) -> String {
    let mut result = String::new();
    for (i, part) in name.split(['-', '.', ' ']).enumerate() {
        if part.is_empty() {
            continue;
        }
        if i == 0 || result.is_empty() {
            result.push_str(part);
        } else {
            result.push_str(&capitalize_first(part));
        }
    }

    result.retain(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if result.is_empty() {
        return "_empty".to_string();
    }

    if result.starts_with(|c: char| c.is_ascii_digit()) {
        result.insert(0, '_');
    }

    if TS_RESERVED_WORDS.contains(result.as_str()) {
        result.insert(0, '_');
    }

    result
}

/// The `typescript` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScript;

impl TargetLanguage for TypeScript {
    const EXTENSION: &'static str = "ts";

    fn type_identifier(&self, name: &str) -> String {
        sanitize_ts_identifier(&capitalize_first(name))
    }

    fn property_identifier(&self, json_name: &str, _owner: &str) -> String {
        quote_if_needed(json_name)
    }

    fn parameter_identifier(&self, name: &str) -> String {
        sanitize_ts_identifier(name)
    }

    fn method_identifier(&self, words: &[String]) -> String {
        sanitize_ts_identifier(&lowercase_first(&words.join("-")))
    }

    fn render_type(&self, kind: &TypeKind, model: &dyn Fn(&str) -> String) -> String {
        match kind {
            TypeKind::Primitive { name, .. } => match name.as_str() {
                "integer" | "number" | "int" | "long" | "float" | "double" => "number",
                "string" | "byte" | "date" | "dateTime" | "date-time" => "string",
                "boolean" => "boolean",
                "File" => "Blob",
                _ => "unknown",
            }
            .to_string(),
            TypeKind::Array(inner) => format!("{}[]", self.render_type(inner, model)),
            TypeKind::Model(name) => model(name),
            TypeKind::Void => "void".to_string(),
            TypeKind::Unknown => "unknown".to_string(),
        }
    }
}
