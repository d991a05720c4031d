//! Marks territories that still need a name by giving them a white border.

use crate::territory::{is_placeholder_name, is_territory, territory_name};
use wzsvg::{style, Document, Element};

pub const HIGHLIGHT_COLOR: &str = "#ffffff";

fn is_unnamed_territory(element: &Element) -> bool {
    is_territory(element) && is_placeholder_name(&territory_name(element))
}

/// Sets the `stroke` of every unnamed territory to [`HIGHLIGHT_COLOR`].
///
/// Only the stroke declaration changes; a territory without one gets it
/// appended. Returns the element ids that were highlighted.
pub fn highlight_unnamed(doc: &mut Document) -> Vec<String> {
    let mut highlighted = Vec::new();
    doc.for_each_element_mut(|element| {
        if !is_unnamed_territory(element) {
            return;
        }
        let updated = style::set_property(
            element.attr("style").unwrap_or(""),
            "stroke",
            HIGHLIGHT_COLOR,
        );
        element.set_attr("style", &updated);
        highlighted.push(element.id().to_string());
    });
    log::debug!("Highlighted {} unnamed territories", highlighted.len());
    highlighted
}
