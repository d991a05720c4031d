//! Skipped and duplicated territory ids.

use crate::error::MapError;
use crate::territory::{territories, TerritoryId};
use wzsvg::Document;

/// At most this many missing ids are listed; the rest are only counted.
pub const MAX_LISTED_MISSING: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GapReport {
    pub first: TerritoryId,
    /// Highest id in use; the next free id is `last + 1`.
    pub last: TerritoryId,
    /// Ids in `first..=last` that no territory uses, ascending, truncated to
    /// [`MAX_LISTED_MISSING`].
    pub missing: Vec<TerritoryId>,
    /// Total number of unused ids in `first..=last`.
    pub missing_count: u64,
    /// Ids used by more than one territory, ascending.
    pub duplicates: Vec<TerritoryId>,
}

/// Scans all territory ids in the document.
pub fn find_gaps(doc: &Document) -> Result<GapReport, MapError> {
    let ids = territories(doc)?.into_iter().map(|t| t.id).collect();
    analyze_ids(ids)
}

pub fn analyze_ids(mut ids: Vec<TerritoryId>) -> Result<GapReport, MapError> {
    ids.sort_unstable();
    let (Some(&first), Some(&last)) = (ids.first(), ids.last()) else {
        return Err(MapError::NoTerritories);
    };

    let mut duplicates: Vec<TerritoryId> = ids
        .windows(2)
        .filter(|pair| pair[0] == pair[1])
        .map(|pair| pair[0])
        .collect();
    duplicates.dedup();

    let mut missing = Vec::new();
    let mut missing_count = 0u64;
    for pair in ids.windows(2) {
        let (low, high) = (pair[0], pair[1]);
        if high - low <= 1 {
            continue;
        }
        missing_count += u64::from(high - low - 1);
        let room = MAX_LISTED_MISSING - missing.len();
        missing.extend((low + 1..high).take(room));
    }

    Ok(GapReport {
        first,
        last,
        missing,
        missing_count,
        duplicates,
    })
}
