use crate::error::MapError;
use wzsvg::{Document, Element};

pub type TerritoryId = u32;

/// Substring that marks an element as a territory (`Territory_12`).
pub const TERRITORY_MARKER: &str = "Territory_";

/// A territory as read from the map. Built fresh from the document on every
/// query; nothing here is cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Territory {
    pub id: TerritoryId,
    /// Display name; empty when neither a title nor a label is set.
    pub name: String,
    /// The raw `id` attribute of the element, e.g. `Territory_12`.
    pub element_id: String,
}

impl Territory {
    pub fn from_element(element: &Element) -> Result<Self, MapError> {
        Ok(Self {
            id: territory_id(element)?,
            name: territory_name(element),
            element_id: element.id().to_string(),
        })
    }

    /// Whether the name is usable on the live map.
    pub fn has_name(&self) -> bool {
        !is_placeholder_name(&self.name)
    }
}

pub fn is_territory(element: &Element) -> bool {
    element.id().contains(TERRITORY_MARKER)
}

/// Parses the numeric part of a territory element id.
pub fn territory_id(element: &Element) -> Result<TerritoryId, MapError> {
    let raw = element.id();
    raw.replace(TERRITORY_MARKER, "")
        .trim()
        .parse()
        .map_err(|_| MapError::InvalidTerritoryId {
            element_id: raw.to_string(),
        })
}

/// Resolves the display name: the `<title>` text if non-empty, otherwise the
/// Inkscape label, otherwise `""`.
pub fn territory_name(element: &Element) -> String {
    let title = element
        .find_descendant("title")
        .map(|title| title.text())
        .unwrap_or_default();
    if !title.is_empty() {
        return title;
    }
    element.label().to_string()
}

/// Empty names and names containing `#` (Inkscape's auto-generated
/// `path#123` style) count as unset.
pub fn is_placeholder_name(name: &str) -> bool {
    name.is_empty() || name.contains('#')
}

/// Territory elements below `element`, in document order.
pub fn territory_elements(element: &Element) -> impl Iterator<Item = &Element> {
    element.descendants().filter(|e| is_territory(e))
}

/// Every territory in the document, in document order.
pub fn territories(doc: &Document) -> Result<Vec<Territory>, MapError> {
    doc.elements()
        .filter(|e| is_territory(e))
        .map(Territory::from_element)
        .collect()
}
