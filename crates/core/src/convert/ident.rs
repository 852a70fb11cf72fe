//! Identifier helpers shared by the language converters.

use std::collections::HashSet;

/// Split a name into words on any character that is not ASCII alphanumeric.
/// Case inside a word is kept, so `petId` stays one word.
pub fn split_words(name: &str) -> Vec<&str> {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect()
}

/// Capitalize the first letter of a string.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Lowercase the first letter of a string.
pub fn lowercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

/// `first_name` -> `FirstName`, `petId` -> `PetId`.
pub fn to_pascal_case(name: &str) -> String {
    split_words(name).into_iter().map(capitalize_first).collect()
}

/// `first_name` -> `firstName`, `PetId` -> `petId`.
pub fn to_camel_case(name: &str) -> String {
    lowercase_first(&to_pascal_case(name))
}

/// Replace every character rejected by `allowed` with `_`, and prefix `_`
/// when the result would start with a digit.
pub fn replace_illegal(name: &str, allowed: impl Fn(char) -> bool) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| if allowed(c) { c } else { '_' })
        .collect();

    if ident.is_empty() {
        return "_".to_string();
    }
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

/// Words for an operation that has no nickname, e.g. `GET /pets/{petId}`
/// becomes `get pets by petId`.
pub fn operation_words(method: &str, path: &str) -> Vec<String> {
    let mut words = vec![method.to_ascii_lowercase()];
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        if let Some(param) = segment
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
        {
            words.push("by".to_string());
            words.push(param.to_string());
        } else {
            words.push(segment.to_string());
        }
    }
    words
}

/// Hands out identifiers that are unique within one scope. A name already
/// taken gets the first free numeric suffix (`Pet`, `Pet1`, `Pet2`, ...).
#[derive(Debug, Clone, Default)]
pub struct UniqueNames {
    taken: HashSet<String>,
    fold_case: bool,
}

impl UniqueNames {
    /// Scope where names differing only by case are distinct.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope where `Pet` and `pet` collide, for names that become file stems.
    pub fn case_insensitive() -> Self {
        Self {
            taken: HashSet::new(),
            fold_case: true,
        }
    }

    /// Reserve `candidate`, or the first suffixed variant not yet taken.
    pub fn claim(&mut self, candidate: &str) -> String {
        let mut name = candidate.to_string();
        let mut suffix = 0_usize;
        while !self.taken.insert(self.key(&name)) {
            suffix += 1;
            name = format!("{candidate}{suffix}");
        }
        name
    }

    fn key(&self, name: &str) -> String {
        if self.fold_case {
            name.to_lowercase()
        } else {
            name.to_string()
        }
    }
}
