//! Penalty bonuses: one negative single-territory bonus per territory in the
//! group labelled "penalty".

use crate::command::Command;
use crate::error::MapError;
use crate::report::Report;
use crate::territory::{territory_elements, Territory};
use wzsvg::{Document, Element};

pub const PENALTY_LABEL: &str = "penalty";
pub const PENALTY_ARMIES: i32 = -1;
pub const PENALTY_COLOR: &str = "#000000";

/// The first `<g>` whose label contains "penalty" (any case), if any.
pub fn find_penalty_group(doc: &Document) -> Option<&Element> {
    doc.elements_named("g")
        .find(|group| group.label().to_lowercase().contains(PENALTY_LABEL))
}

/// Emits `addBonus "- <name>"` then `addTerritoryToBonus` for every territory
/// in the penalty group, direct or nested.
pub fn penalty_commands(doc: &Document) -> Result<Report, MapError> {
    let layer = find_penalty_group(doc).ok_or(MapError::MissingPenaltyGroup)?;
    let mut report = Report::new();

    for element in territory_elements(layer) {
        let territory = Territory::from_element(element)?;
        if !territory.has_name() {
            log::warn!(
                "Penalty territory {} has no name; its bonus will be called '- {}'",
                territory.element_id,
                territory.name
            );
        }
        let name = format!("- {}", territory.name);
        report.push(Command::AddBonus {
            name: name.clone(),
            armies: PENALTY_ARMIES,
            color: PENALTY_COLOR.to_string(),
        });
        report.push(Command::AddTerritoryToBonus {
            id: territory.id,
            bonus_name: name,
        });
    }

    log::debug!("Generated {} penalty commands", report.commands.len());
    Ok(report)
}
