//! C# target: `.cs` files, PascalCase members, `@`-escaped keywords.

use std::collections::HashSet;
use std::sync::LazyLock;

use super::ident::{capitalize_first, replace_illegal, to_camel_case, to_pascal_case};
use super::{TargetLanguage, TypeKind};

/// C# reserved keywords that cannot be used as plain identifiers.
pub static CSHARP_KEYWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
        "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
        "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
        "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
        "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
        "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed",
        "short", "sizeof", "stackalloc", "static", "string", "struct", "switch", "this",
        "throw", "true", "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort",
        "using", "virtual", "void", "volatile", "while",
    ]
    .into_iter()
    .collect()
});

/// The `c#` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct CSharp;

impl CSharp {
    /// Make `name` a legal C# identifier. Keywords become verbatim
    /// identifiers (`@class`); applying it again changes nothing.
    pub fn safe_identifier(name: &str) -> String {
        if let Some(rest) = name.strip_prefix('@')
            && CSHARP_KEYWORDS.contains(rest)
        {
            return name.to_string();
        }

        let ident = replace_illegal(name, |c| c.is_alphanumeric() || c == '_');
        if CSHARP_KEYWORDS.contains(ident.as_str()) {
            format!("@{ident}")
        } else {
            ident
        }
    }

    fn primitive(name: &str, format: Option<&str>) -> &'static str {
        match (name, format) {
            ("integer", Some("int64")) | ("long", _) => "long",
            ("integer", _) | ("int", _) => "int",
            ("number", Some("double")) | ("double", _) => "double",
            ("number", _) | ("float", _) => "float",
            ("string", Some("date" | "date-time")) | ("date" | "dateTime" | "date-time", _) => {
                "DateTime"
            }
            ("string", Some("byte")) | ("byte", _) => "byte",
            ("string", _) => "string",
            ("boolean", _) => "bool",
            _ => "object",
        }
    }
}

impl TargetLanguage for CSharp {
    const EXTENSION: &'static str = "cs";

    fn type_identifier(&self, name: &str) -> String {
        Self::safe_identifier(name)
    }

    fn property_identifier(&self, json_name: &str, owner: &str) -> String {
        let pascal = to_pascal_case(json_name);
        let ident = if pascal.is_empty() {
            Self::safe_identifier(json_name)
        } else {
            Self::safe_identifier(&pascal)
        };
        // Members may not share the enclosing type's name.
        if ident == owner.trim_start_matches('@') {
            format!("{ident}Value")
        } else {
            ident
        }
    }

    fn parameter_identifier(&self, name: &str) -> String {
        let camel = to_camel_case(name);
        if camel.is_empty() {
            Self::safe_identifier(name)
        } else {
            Self::safe_identifier(&camel)
        }
    }

    fn method_identifier(&self, words: &[String]) -> String {
        let pascal: String = words
            .iter()
            .map(|word| capitalize_first(&to_pascal_case(word)))
            .collect();
        Self::safe_identifier(&pascal)
    }

    fn render_type(&self, kind: &TypeKind, model: &dyn Fn(&str) -> String) -> String {
        match kind {
            TypeKind::Primitive { name, format } => {
                Self::primitive(name, format.as_deref()).to_string()
            }
            TypeKind::Array(inner) => format!("List<{}>", self.render_type(inner, model)),
            TypeKind::Model(name) => model(name),
            TypeKind::Void => "void".to_string(),
            TypeKind::Unknown => "object".to_string(),
        }
    }

    fn file_stem(&self, type_name: &str) -> String {
        type_name.trim_start_matches('@').to_string()
    }
}
