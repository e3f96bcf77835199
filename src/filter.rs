//! Filter engine: pure row predicates over the launch table.
//!
//! Both filters return a new table and never touch their input. They compose
//! in a fixed order: payload range first, then site.

use serde::{Deserialize, Serialize};

use crate::data::LaunchTable;

/// Sentinel dropdown value meaning "no site filter".
pub const ALL_SITES: &str = "ALL";

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Dropdown selection: every site, or one concrete site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SiteSelection {
    All,
    Site(String),
}

impl SiteSelection {
    pub fn parse(value: &str) -> Self {
        if value == ALL_SITES {
            Self::All
        } else {
            Self::Site(value.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_SITES,
            Self::Site(site) => site,
        }
    }
}

impl From<String> for SiteSelection {
    fn from(value: String) -> Self {
        if value == ALL_SITES {
            Self::All
        } else {
            Self::Site(value)
        }
    }
}

impl From<SiteSelection> for String {
    fn from(value: SiteSelection) -> Self {
        match value {
            SiteSelection::All => ALL_SITES.to_string(),
            SiteSelection::Site(site) => site,
        }
    }
}

impl std::fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed payload interval `[low, high]` in kilograms.
///
/// `low > high` is representable and simply matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, mass: f64) -> bool {
        self.low <= mass && mass <= self.high
    }
}

impl From<[f64; 2]> for PayloadRange {
    fn from([low, high]: [f64; 2]) -> Self {
        Self { low, high }
    }
}

impl From<PayloadRange> for [f64; 2] {
    fn from(range: PayloadRange) -> Self {
        [range.low, range.high]
    }
}

/// Current widget values: the dropdown and slider together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    pub site: SiteSelection,
    pub payload: PayloadRange,
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Rows launched from `site`, or the whole table for [`SiteSelection::All`].
pub fn filter_by_site(table: &LaunchTable, site: &SiteSelection) -> LaunchTable {
    match site {
        SiteSelection::All => table.clone(),
        SiteSelection::Site(name) => table
            .iter()
            .filter(|r| &r.launch_site == name)
            .cloned()
            .collect(),
    }
}

/// Rows with `low <= payload <= high`.
pub fn filter_by_payload_range(table: &LaunchTable, low: f64, high: f64) -> LaunchTable {
    let range = PayloadRange::new(low, high);
    table
        .iter()
        .filter(|r| range.contains(r.payload_mass))
        .cloned()
        .collect()
}

/// Apply the full selection: payload range, then site.
pub fn apply_selection(table: &LaunchTable, state: &SelectionState) -> LaunchTable {
    let in_range = filter_by_payload_range(table, state.payload.low, state.payload.high);
    filter_by_site(&in_range, &state.site)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
