//! Strips an Inkscape map down to what the game needs for upload.
//!
//! The passes run in a fixed order, each over the whole tree as left by the
//! previous one:
//!
//! 1. `BonusLink_` elements keep geometry, transform and id only.
//! 2. Territories lose all children and keep `d`, `id`, `transform`.
//! 3. Groups keep `transform` only.
//! 4. Everything else that is not an information box, bonus link or portal
//!    label has its style reduced to fill/stroke, keeps `d`, `id`,
//!    `transform`, `style` (the `<svg>` root keeps all), and loses titles.
//! 5. `<defs>` and `<sodipodi:namedview>` are dropped.
//!
//! Running it on its own output changes nothing.

use crate::territory::is_territory;
use wzsvg::{Document, Element};

pub const BONUS_LINK_MARKER: &str = "BonusLink_";
pub const INFORMATION_MARKER: &str = "Information";
pub const PORTAL_LABEL: &str = "portal";

const BONUS_LINK_ATTRS: &[&str] = &[
    "d",
    "id",
    "transform",
    "width",
    "height",
    "x",
    "y",
    "ry",
    "rx",
];
const TERRITORY_ATTRS: &[&str] = &["d", "id", "transform"];
const GROUP_ATTRS: &[&str] = &["transform"];
const SHAPE_ATTRS: &[&str] = &["d", "id", "transform", "style"];
const DROPPED_ELEMENTS: &[&str] = &["defs", "sodipodi:namedview"];

/// What a lightening run removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LightenStats {
    pub attributes_removed: usize,
    pub styles_compressed: usize,
    /// Child nodes and elements removed, text and whitespace included.
    pub nodes_removed: usize,
}

impl LightenStats {
    /// True when the run left the document exactly as it found it.
    pub fn is_noop(&self) -> bool {
        *self == Self::default()
    }
}

/// Keeps only the comma-separated parts of a style that mention fill or
/// stroke, joined with `;`.
pub fn compress_style(style: &str) -> String {
    style
        .split(',')
        .filter(|part| part.contains("fill") || part.contains("stroke"))
        .collect::<Vec<_>>()
        .join(";")
}

fn keep_allowed(element: &mut Element, allowed: &[&str]) -> usize {
    element.retain_attributes(|name| allowed.contains(&name))
}

/// Elements that pass 4 leaves alone.
fn keeps_markup(element: &Element) -> bool {
    let id = element.id();
    id.contains(INFORMATION_MARKER)
        || id.contains(BONUS_LINK_MARKER)
        || element.label().contains(PORTAL_LABEL)
}

/// Returns a lightened copy of `doc`, leaving the input untouched.
pub fn lighten(doc: &Document) -> (Document, LightenStats) {
    let mut light = doc.clone();
    let stats = lighten_in_place(&mut light);
    (light, stats)
}

pub fn lighten_in_place(doc: &mut Document) -> LightenStats {
    let mut stats = LightenStats::default();

    doc.for_each_element_mut(|element| {
        if element.id().contains(BONUS_LINK_MARKER) {
            stats.attributes_removed += keep_allowed(element, BONUS_LINK_ATTRS);
        }
    });
    log::debug!("Bonus links: {} attributes removed", stats.attributes_removed);

    doc.for_each_element_mut(|element| {
        if is_territory(element) {
            stats.nodes_removed += element.clear_children();
            stats.attributes_removed += keep_allowed(element, TERRITORY_ATTRS);
        }
    });
    log::debug!("Territories: {} child nodes removed", stats.nodes_removed);

    doc.for_each_element_mut(|element| {
        if element.name == "g" {
            stats.attributes_removed += keep_allowed(element, GROUP_ATTRS);
        }
    });
    log::debug!("Groups: {} attributes removed so far", stats.attributes_removed);

    doc.for_each_element_mut(|element| {
        if keeps_markup(element) {
            return;
        }

        if let Some(compressed) = element.attr("style").map(compress_style) {
            if element.attr("style") != Some(compressed.as_str()) {
                element.set_attr("style", &compressed);
                stats.styles_compressed += 1;
            }
        }

        if element.name != "svg" {
            stats.attributes_removed += keep_allowed(element, SHAPE_ATTRS);
        }

        if is_territory(element) {
            stats.nodes_removed += element.clear_children();
        } else {
            stats.nodes_removed += element.remove_descendants(&|child: &Element| child.name == "title");
        }
    });

    stats.nodes_removed += doc.remove_elements(|element| DROPPED_ELEMENTS.contains(&element.name.as_str()));

    log::info!(
        "Lightened map: {} attributes, {} nodes removed, {} styles compressed",
        stats.attributes_removed,
        stats.nodes_removed,
        stats.styles_compressed
    );
    stats
}
