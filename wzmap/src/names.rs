//! Territory naming commands.

use crate::command::Command;
use crate::error::MapError;
use crate::report::{Issue, Report};
use crate::territory::{territories, TerritoryId};
use std::collections::HashMap;
use wzsvg::Document;

/// Emits one `setTerritoryName` per named territory, in document order.
///
/// Unnamed and placeholder-named territories are skipped. A name used twice
/// is flagged but the second command is still emitted, so the report shows
/// the whole picture.
pub fn name_commands(doc: &Document) -> Result<Report, MapError> {
    let mut report = Report::new();
    let mut seen: HashMap<String, TerritoryId> = HashMap::new();

    for territory in territories(doc)? {
        if !territory.has_name() {
            continue;
        }

        match seen.get(&territory.name) {
            Some(&first_id) => report.flag(Issue::DuplicateName {
                name: territory.name.clone(),
                id: territory.id,
                first_id,
            }),
            None => {
                seen.insert(territory.name.clone(), territory.id);
            }
        }

        report.push(Command::SetTerritoryName {
            id: territory.id,
            name: territory.name,
        });
    }

    log::debug!("Generated {} territory name commands", report.commands.len());
    Ok(report)
}
