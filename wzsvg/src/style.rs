//! Helpers for inline `style="prop:value;prop:value"` attributes.
//!
//! Declarations are handled as raw slices so that anything not being edited
//! is written back byte-for-byte.

/// Splits a style attribute into its `;`-separated declarations.
pub fn declarations(style: &str) -> impl Iterator<Item = &str> {
    style.split(';')
}

/// Property name of a single declaration, trimmed (`" fill : red"` -> `"fill"`).
pub fn property_name(declaration: &str) -> &str {
    declaration
        .split_once(':')
        .map(|(name, _)| name)
        .unwrap_or(declaration)
        .trim()
}

/// Value of the first declaration for `property`, trimmed.
pub fn property_value<'a>(style: &'a str, property: &str) -> Option<&'a str> {
    declarations(style)
        .filter(|decl| property_name(decl) == property)
        .find_map(|decl| decl.split_once(':').map(|(_, value)| value.trim()))
}

/// Replaces the first declaration of `property` with `property:value`,
/// appending one if the style has none. Other declarations are untouched.
pub fn set_property(style: &str, property: &str, value: &str) -> String {
    let replacement = format!("{}:{}", property, value);
    let mut replaced = false;
    let mut parts: Vec<&str> = Vec::new();
    for decl in declarations(style) {
        if !replaced && property_name(decl) == property {
            parts.push(&replacement);
            replaced = true;
        } else {
            parts.push(decl);
        }
    }
    if !replaced {
        if style.trim().is_empty() {
            return replacement;
        }
        if !style.ends_with(';') {
            return format!("{};{}", style, replacement);
        }
        return format!("{}{}", style, replacement);
    }
    parts.join(";")
}
