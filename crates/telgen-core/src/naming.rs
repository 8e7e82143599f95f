//! # Identifier Casing
//!
//! Metric names are snake_case (`lambda_invoke`) and metadata type names are
//! camelCase (`awsRegion`). Generated type names are PascalCase of either:
//! `LambdaInvoke`, `AwsRegion`.

/// Convert a snake_case, kebab-case, dotted or camelCase name to PascalCase.
///
/// Every run of non-alphanumeric characters is a word boundary. The first
/// character of each word is upper-cased and the rest is kept as written, so
/// existing camel humps survive (`awsRegion` → `AwsRegion`).
pub fn pascal_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for word in name.split(|c: char| !c.is_ascii_alphanumeric()) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.extend(chars);
        }
    }
    out
}

/// True if `name` can be written as a bare property key or type name.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Render `value` as a single-quoted string literal.
pub fn quote_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('\'');
    out
}
