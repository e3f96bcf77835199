//! Launch record table: the immutable dataset behind the dashboard.
//!
//! The table is loaded once at startup (see [`loader`]) and shared read-only
//! behind an `Arc` for the lifetime of the process.

pub mod error;
pub mod loader;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub use error::DataError;

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

pub const COL_LAUNCH_SITE: &str = "LaunchSite";
pub const COL_PAYLOAD_MASS: &str = "PayloadMass";
pub const COL_CLASS: &str = "Class";
pub const COL_BOOSTER_VERSION: &str = "BoosterVersion";

/// Columns every launch CSV must carry. Other columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    COL_LAUNCH_SITE,
    COL_PAYLOAD_MASS,
    COL_CLASS,
    COL_BOOSTER_VERSION,
];

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A single launch row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchRecord {
    #[serde(rename = "LaunchSite")]
    pub launch_site: String,
    /// Payload mass in kilograms.
    #[serde(rename = "PayloadMass")]
    pub payload_mass: f64,
    /// Outcome class: 1 = success, 0 = failure.
    #[serde(rename = "Class")]
    pub class: u8,
    #[serde(rename = "BoosterVersion")]
    pub booster_version: String,
}

impl LaunchRecord {
    pub fn new(
        launch_site: impl Into<String>,
        payload_mass: f64,
        class: u8,
        booster_version: impl Into<String>,
    ) -> Self {
        Self {
            launch_site: launch_site.into(),
            payload_mass,
            class,
            booster_version: booster_version.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.class == 1
    }
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// Ordered, immutable sequence of launch records.
///
/// Filters produce new tables; nothing mutates an existing one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaunchTable {
    rows: Vec<LaunchRecord>,
}

impl LaunchTable {
    pub fn new(rows: Vec<LaunchRecord>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[LaunchRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LaunchRecord> {
        self.rows.iter()
    }

    /// Minimum and maximum payload mass across all rows.
    pub fn payload_range(&self) -> Result<(f64, f64), DataError> {
        let mut iter = self.rows.iter().map(|r| r.payload_mass);
        let first = iter.next().ok_or(DataError::EmptyDataset)?;
        Ok(iter.fold((first, first), |(lo, hi), m| (lo.min(m), hi.max(m))))
    }

    /// Distinct launch sites in first-occurrence order.
    pub fn distinct_sites(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for row in &self.rows {
            if !seen.iter().any(|s| s == &row.launch_site) {
                seen.push(row.launch_site.clone());
            }
        }
        seen
    }

    /// Per-site launch and success counts, in first-occurrence site order.
    pub fn site_summaries(&self) -> Vec<SiteSummary> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut summaries: Vec<SiteSummary> = Vec::new();

        for row in &self.rows {
            let slot = *index.entry(row.launch_site.as_str()).or_insert_with(|| {
                summaries.push(SiteSummary {
                    site: row.launch_site.clone(),
                    launches: 0,
                    successes: 0,
                });
                summaries.len() - 1
            });
            summaries[slot].launches += 1;
            if row.is_success() {
                summaries[slot].successes += 1;
            }
        }

        summaries
    }
}

impl FromIterator<LaunchRecord> for LaunchTable {
    fn from_iter<I: IntoIterator<Item = LaunchRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a LaunchTable {
    type Item = &'a LaunchRecord;
    type IntoIter = std::slice::Iter<'a, LaunchRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

// ---------------------------------------------------------------------------
// Summaries
// ---------------------------------------------------------------------------

/// Launch counts for one site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteSummary {
    pub site: String,
    pub launches: usize,
    pub successes: usize,
}

impl SiteSummary {
    /// Success percentage, returns 0.0 when there are no launches.
    pub fn success_pct(&self) -> f64 {
        if self.launches == 0 {
            0.0
        } else {
            (self.successes as f64 / self.launches as f64) * 100.0
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
