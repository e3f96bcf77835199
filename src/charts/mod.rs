//! Chart renderers: pure mappings from filtered rows to plotly figures.
//!
//! Figures are assembled with the `plotly` crate and carried as its JSON
//! (`data` plus `layout`), which the frontend hands to `Plotly.react`.
//! An empty selection still yields a valid figure. The
//! [`ChartWarning::EmptyResult`] travels next to the figure, not inside it.

pub mod pie;
pub mod scatter;

use plotly::Plot;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub use pie::render_pie;
pub use scatter::render_scatter;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("failed to encode plotly figure: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Pie,
    Scatter,
}

/// A rendered chart: the plotly figure plus what the dashboard reports
/// alongside it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    /// Number of source rows the chart was built from.
    pub row_count: usize,
    /// Plotly figure JSON: `{ "data": [...], "layout": {...} }`.
    pub figure: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<ChartWarning>,
}

impl ChartSpec {
    fn from_plot(
        kind: ChartKind,
        title: String,
        row_count: usize,
        plot: &Plot,
        warning: Option<ChartWarning>,
    ) -> Result<Self, ChartError> {
        let figure = serde_json::from_str(&plot.to_json())?;
        Ok(Self {
            kind,
            title,
            row_count,
            figure,
            warning,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn warning(&self) -> Option<&ChartWarning> {
        self.warning.as_ref()
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Plotly traces in draw order.
    pub fn traces(&self) -> &[Value] {
        self.figure["data"]
            .as_array()
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Non-fatal condition attached to a rendered chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartWarning {
    /// The selection matched no rows; the chart is empty but valid.
    EmptyResult { message: String },
}

impl ChartWarning {
    pub fn empty_result(message: impl Into<String>) -> Self {
        Self::EmptyResult {
            message: message.into(),
        }
    }
}
