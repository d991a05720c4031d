use crate::territory::TerritoryId;
use serde::{Deserialize, Serialize};

/// One map-editing command in the shape the SetMapDetails API expects.
///
/// Serializes as e.g. `{"command":"addBonus","name":"Europe","armies":5,"color":"#0000ff"}`.
/// An `AddBonus` must come before any `AddTerritoryToBonus` that names it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum Command {
    SetTerritoryName {
        id: TerritoryId,
        name: String,
    },
    AddBonus {
        name: String,
        armies: i32,
        color: String,
    },
    AddTerritoryToBonus {
        id: TerritoryId,
        #[serde(rename = "bonusName")]
        bonus_name: String,
    },
}
