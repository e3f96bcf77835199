//! The assembled dashboard: table, layout, and binder built once at startup.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::binder::Binder;
use crate::config::DashConfig;
use crate::config::schema::SliderConfig;
use crate::data::{DataError, LaunchTable, loader};
use crate::filter::{PayloadRange, SelectionState, SiteSelection};
use crate::layout::{Layout, build_layout};

/// Process-lifetime dashboard state. Read-only once constructed.
pub struct Dashboard {
    table: Arc<LaunchTable>,
    layout: Layout,
    binder: Binder,
    source: String,
    default_state: SelectionState,
}

impl Dashboard {
    /// Build the dashboard around an already-loaded table.
    ///
    /// Fails with [`DataError::EmptyDataset`] when there is nothing to plot,
    /// since the slider default cannot be derived.
    pub fn new(
        table: LaunchTable,
        slider: &SliderConfig,
        source: impl Into<String>,
    ) -> Result<Self, DataError> {
        let (min, max) = table.payload_range()?;
        let layout = build_layout(&table.distinct_sites(), (min, max), slider);
        let table = Arc::new(table);

        Ok(Self {
            binder: Binder::dashboard(Arc::clone(&table)),
            table,
            layout,
            source: source.into(),
            default_state: SelectionState {
                site: SiteSelection::All,
                payload: PayloadRange::new(min, max),
            },
        })
    }

    /// Load the configured data source and build the dashboard.
    pub fn load(config: &DashConfig) -> Result<Self> {
        let source = &config.data.source;
        let table = loader::load(source, Duration::from_millis(config.data.timeout_ms))
            .with_context(|| format!("failed to load launch data from {source}"))?;
        Self::new(table, &config.slider, source.clone())
            .context("launch data has no rows to plot")
    }

    pub fn table(&self) -> &LaunchTable {
        &self.table
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn binder(&self) -> &Binder {
        &self.binder
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Selection matching the widgets' initial values.
    pub fn default_state(&self) -> &SelectionState {
        &self.default_state
    }
}
