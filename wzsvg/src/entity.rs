//! General entities: the five XML built-ins plus whatever the DOCTYPE's
//! internal subset declares (Illustrator writes `<!ENTITY ns_svg "...">`).

use quick_xml::escape::unescape_with;
use std::collections::HashMap;

const DECLARATION: &str = "<!ENTITY";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Entities {
    declared: HashMap<String, String>,
}

impl Entities {
    /// Collects internal `<!ENTITY name "value">` declarations from a DOCTYPE
    /// body. Parameter entities and external (`SYSTEM`/`PUBLIC`) entities are
    /// skipped; when a name is declared twice the first one binds.
    pub(crate) fn from_doctype(body: &str) -> Self {
        let mut declared = HashMap::new();
        let mut rest = body;

        while let Some(start) = rest.find(DECLARATION) {
            rest = rest[start + DECLARATION.len()..].trim_start();
            if rest.starts_with('%') {
                continue;
            }
            let Some(name_end) = rest.find(char::is_whitespace) else {
                break;
            };
            let name = &rest[..name_end];
            rest = rest[name_end..].trim_start();

            let Some(quote) = rest.chars().next().filter(|c| *c == '"' || *c == '\'') else {
                continue;
            };
            let value = &rest[1..];
            let Some(value_end) = value.find(quote) else {
                break;
            };
            if !declared.contains_key(name) {
                // References inside the replacement text expand at declaration.
                let raw = &value[..value_end];
                let expanded = unescape_with(raw, |inner| {
                    builtin(inner).or_else(|| declared.get(inner).map(String::as_str))
                })
                .map(|text| text.into_owned())
                .unwrap_or_else(|_| raw.to_string());
                declared.insert(name.to_string(), expanded);
            }
            rest = &value[value_end + 1..];
        }

        if !declared.is_empty() {
            log::debug!("DOCTYPE declares {} entities", declared.len());
        }
        Self { declared }
    }

    /// Replacement text for `&name;`, built-ins first.
    pub(crate) fn resolve(&self, name: &str) -> Option<&str> {
        builtin(name).or_else(|| self.declared.get(name).map(String::as_str))
    }
}

fn builtin(name: &str) -> Option<&'static str> {
    match name {
        "lt" => Some("<"),
        "gt" => Some(">"),
        "amp" => Some("&"),
        "apos" => Some("'"),
        "quot" => Some("\""),
        _ => None,
    }
}
