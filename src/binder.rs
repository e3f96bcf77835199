//! Reactive binder: wires input ids to chart cells.
//!
//! Each [`ReactiveCell`] declares the inputs it listens to and the single
//! output it republishes. A trigger recomputes every cell bound to the
//! changed input, and each of those cells yields exactly one
//! [`Publication`]. Cells hold the shared table from construction and keep
//! no other state, so invocations never observe one another.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::charts::{ChartError, ChartSpec, render_pie, render_scatter};
use crate::data::LaunchTable;
use crate::filter::SelectionState;
use crate::layout::{PAYLOAD_SLIDER, PIE_CHART, SCATTER_CHART, SITE_DROPDOWN};

#[derive(Debug, Error)]
pub enum BindError {
    #[error("no cell is bound to input '{0}'")]
    UnknownInput(String),

    #[error("cell '{output}' failed to render: {source}")]
    Render {
        output: String,
        #[source]
        source: ChartError,
    },
}

/// One republished output: the target id and the chart to place there.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Publication {
    pub output: String,
    #[serde(flatten)]
    pub chart: ChartSpec,
}

// ---------------------------------------------------------------------------
// Cells
// ---------------------------------------------------------------------------

/// A reactive binding from one or more inputs to one output.
pub trait ReactiveCell: Send + Sync {
    /// Input ids that trigger this cell.
    fn inputs(&self) -> &'static [&'static str];

    /// Output id this cell republishes.
    fn output(&self) -> &'static str;

    /// Recompute the chart from the full table for the current selection.
    fn compute(&self, state: &SelectionState) -> Result<ChartSpec, ChartError>;

    fn listens_to(&self, input: &str) -> bool {
        self.inputs().iter().any(|&i| i == input)
    }
}

/// Pie chart cell: reacts to the site dropdown only.
pub struct PieCell {
    table: Arc<LaunchTable>,
}

impl PieCell {
    pub fn new(table: Arc<LaunchTable>) -> Self {
        Self { table }
    }
}

impl ReactiveCell for PieCell {
    fn inputs(&self) -> &'static [&'static str] {
        &[SITE_DROPDOWN]
    }

    fn output(&self) -> &'static str {
        PIE_CHART
    }

    fn compute(&self, state: &SelectionState) -> Result<ChartSpec, ChartError> {
        render_pie(&self.table, &state.site)
    }
}

/// Scatter chart cell: reacts to the dropdown and the payload slider.
pub struct ScatterCell {
    table: Arc<LaunchTable>,
}

impl ScatterCell {
    pub fn new(table: Arc<LaunchTable>) -> Self {
        Self { table }
    }
}

impl ReactiveCell for ScatterCell {
    fn inputs(&self) -> &'static [&'static str] {
        &[SITE_DROPDOWN, PAYLOAD_SLIDER]
    }

    fn output(&self) -> &'static str {
        SCATTER_CHART
    }

    fn compute(&self, state: &SelectionState) -> Result<ChartSpec, ChartError> {
        render_scatter(&self.table, state)
    }
}

// ---------------------------------------------------------------------------
// Binder
// ---------------------------------------------------------------------------

/// Registry of reactive cells.
pub struct Binder {
    cells: Vec<Box<dyn ReactiveCell>>,
}

impl Binder {
    pub fn new() -> Self {
        Self { cells: Vec::new() }
    }

    /// The dashboard's two cells, both sharing `table`.
    pub fn dashboard(table: Arc<LaunchTable>) -> Self {
        let mut binder = Self::new();
        binder.register(Box::new(PieCell::new(Arc::clone(&table))));
        binder.register(Box::new(ScatterCell::new(table)));
        binder
    }

    pub fn register(&mut self, cell: Box<dyn ReactiveCell>) {
        self.cells.push(cell);
    }

    /// Output ids in registration order.
    pub fn outputs(&self) -> Vec<&'static str> {
        self.cells.iter().map(|c| c.output()).collect()
    }

    /// Recompute every cell bound to `input`.
    pub fn trigger(
        &self,
        input: &str,
        state: &SelectionState,
    ) -> Result<Vec<Publication>, BindError> {
        let publications = self
            .cells
            .iter()
            .filter(|cell| cell.listens_to(input))
            .map(|cell| publish(cell.as_ref(), state))
            .collect::<Result<Vec<_>, _>>()?;

        if publications.is_empty() {
            return Err(BindError::UnknownInput(input.to_string()));
        }
        Ok(publications)
    }

    /// Fire every cell once, as on first page load.
    pub fn initial(&self, state: &SelectionState) -> Result<Vec<Publication>, BindError> {
        self.cells
            .iter()
            .map(|cell| publish(cell.as_ref(), state))
            .collect()
    }
}

impl Default for Binder {
    fn default() -> Self {
        Self::new()
    }
}

fn publish(cell: &dyn ReactiveCell, state: &SelectionState) -> Result<Publication, BindError> {
    let chart = cell.compute(state).map_err(|source| BindError::Render {
        output: cell.output().to_string(),
        source,
    })?;
    Ok(Publication {
        output: cell.output().to_string(),
        chart,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ChartKind;
    use crate::data::LaunchRecord;
    use crate::filter::{PayloadRange, SiteSelection};

    fn binder() -> Binder {
        let table = LaunchTable::new(vec![
            LaunchRecord::new("CCAFS", 1000.0, 1, "F9 v1.1"),
            LaunchRecord::new("KSC", 6000.0, 0, "F9 FT"),
        ]);
        Binder::dashboard(Arc::new(table))
    }

    fn state() -> SelectionState {
        SelectionState {
            site: SiteSelection::All,
            payload: PayloadRange::new(0.0, 10000.0),
        }
    }

    #[test]
    fn dropdown_republishes_both_charts() {
        let pubs = binder().trigger(SITE_DROPDOWN, &state()).unwrap();
        let outputs: Vec<&str> = pubs.iter().map(|p| p.output.as_str()).collect();
        assert_eq!(outputs, vec![PIE_CHART, SCATTER_CHART]);
    }

    #[test]
    fn slider_republishes_scatter_only() {
        let pubs = binder().trigger(PAYLOAD_SLIDER, &state()).unwrap();
        assert_eq!(pubs.len(), 1);
        assert_eq!(pubs[0].output, SCATTER_CHART);
        assert_eq!(pubs[0].chart.kind, ChartKind::Scatter);
    }

    #[test]
    fn unknown_input_is_rejected() {
        let err = binder().trigger("mystery-input", &state()).unwrap_err();
        assert!(matches!(err, BindError::UnknownInput(ref id) if id == "mystery-input"));
    }

    #[test]
    fn initial_fires_every_cell_once() {
        let b = binder();
        let pubs = b.initial(&state()).unwrap();
        assert_eq!(pubs.len(), 2);
        assert_eq!(b.outputs(), vec![PIE_CHART, SCATTER_CHART]);
    }
}
