//! Map semantics for Warzone map SVGs.
//!
//! Territories are elements whose id contains `Territory_<n>`; bonuses and
//! penalties are Inkscape groups identified by their label. This crate turns
//! those conventions into [`Command`] batches for the SetMapDetails API and
//! provides the read-only analyses and rewrites used while authoring a map.

pub mod bonus;
pub mod command;
pub mod error;
pub mod gaps;
pub mod highlight;
pub mod lighten;
pub mod names;
pub mod penalty;
pub mod report;
pub mod territory;

pub use bonus::{bonus_commands, bonus_value, BonusGroup};
pub use command::Command;
pub use error::MapError;
pub use gaps::{find_gaps, GapReport};
pub use highlight::highlight_unnamed;
pub use lighten::{lighten, lighten_in_place, LightenStats};
pub use names::name_commands;
pub use penalty::penalty_commands;
pub use report::{Issue, Report};
pub use territory::{Territory, TerritoryId};
