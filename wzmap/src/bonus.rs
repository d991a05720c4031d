//! Bonus creation from labelled groups.
//!
//! Any `<g>` whose Inkscape label contains "bonus" (any case) is a bonus.
//! Its id becomes the bonus name, its territories the members, and the fill
//! of the first member the bonus colour.

use crate::command::Command;
use crate::error::MapError;
use crate::report::{Issue, Report};
use crate::territory::{territory_elements, Territory, TerritoryId};
use wzsvg::{style, Document, Element};

pub const BONUS_LABEL: &str = "bonus";
/// Group ids containing this marker are capital bonuses.
pub const CAPITAL_MARKER: &str = "Capital:";

/// A bonus ready to be turned into commands.
#[derive(Debug, Clone, PartialEq)]
pub struct BonusGroup {
    /// Group id with underscores turned into spaces.
    pub name: String,
    pub territories: Vec<TerritoryId>,
    pub color: String,
    pub is_capital: bool,
}

impl BonusGroup {
    pub fn armies(&self) -> i32 {
        bonus_value(self.territories.len(), self.is_capital)
    }
}

/// Army value for a bonus of `territories` members.
pub fn bonus_value(territories: usize, is_capital: bool) -> i32 {
    let n = territories as f64;
    if is_capital {
        return (3.5 + (n * 0.8).max(1.0) * 2.0).floor() as i32;
    }
    if territories == 1 {
        return 2;
    }
    (n * 0.55).floor() as i32
}

fn is_bonus_group(element: &Element) -> bool {
    element.name == "g" && element.label().to_lowercase().contains(BONUS_LABEL)
}

/// Reads one bonus group. `Ok(Err(issue))` means the group is unusable but
/// the run may continue.
fn read_group(group: &Element) -> Result<Result<BonusGroup, Issue>, MapError> {
    let group_id = group.id();
    if group_id.is_empty() {
        return Ok(Err(Issue::UnnamedBonus {
            label: group.label().to_string(),
        }));
    }

    let members: Vec<&Element> = territory_elements(group).collect();
    let Some(first) = members.first() else {
        return Ok(Err(Issue::EmptyBonus {
            group: group_id.to_string(),
        }));
    };

    let territories = members
        .iter()
        .map(|element| Territory::from_element(element).map(|t| t.id))
        .collect::<Result<Vec<_>, _>>()?;

    let Some(color) = first
        .attr("style")
        .and_then(|css| style::property_value(css, "fill"))
    else {
        return Ok(Err(Issue::MissingFill {
            group: group_id.to_string(),
            territory: territories[0],
        }));
    };

    Ok(Ok(BonusGroup {
        name: group_id.replace('_', " "),
        territories,
        color: color.to_string(),
        is_capital: group_id.contains(CAPITAL_MARKER),
    }))
}

/// Every bonus group in document order, plus issues for the unusable ones.
pub fn bonus_groups(doc: &Document) -> Result<(Vec<BonusGroup>, Vec<Issue>), MapError> {
    let mut groups = Vec::new();
    let mut issues = Vec::new();
    for group in doc.elements().filter(|e| is_bonus_group(e)) {
        log::debug!("Reading bonus group '{}'", group.id());
        match read_group(group)? {
            Ok(bonus) => groups.push(bonus),
            Err(issue) => issues.push(issue),
        }
    }
    Ok((groups, issues))
}

/// Emits `addBonus` followed by its `addTerritoryToBonus` commands for each
/// bonus group.
pub fn bonus_commands(doc: &Document) -> Result<Report, MapError> {
    let (groups, issues) = bonus_groups(doc)?;
    let mut report = Report::new();
    for issue in issues {
        report.flag(issue);
    }

    for bonus in groups {
        report.push(Command::AddBonus {
            name: bonus.name.clone(),
            armies: bonus.armies(),
            color: bonus.color.clone(),
        });
        for id in &bonus.territories {
            report.push(Command::AddTerritoryToBonus {
                id: *id,
                bonus_name: bonus.name.clone(),
            });
        }
    }

    log::debug!("Generated {} bonus commands", report.commands.len());
    Ok(report)
}
