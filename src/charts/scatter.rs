/// Scatter renderer: payload mass against outcome class, one trace per
/// booster version.
use plotly::common::{Mode, Title};
use plotly::layout::Axis;
use plotly::{Layout, Plot, Scatter};

use crate::data::{COL_CLASS, COL_PAYLOAD_MASS, LaunchTable};
use crate::filter::{SelectionState, SiteSelection, apply_selection};

use super::{ChartError, ChartKind, ChartSpec, ChartWarning};

pub const ALL_SITES_TITLE: &str = "Correlation between Payload and Success for all Sites";

/// Points of one booster version, in row order. Plotly colors each trace
/// from its default colorway.
struct Series {
    name: String,
    x: Vec<f64>,
    y: Vec<u8>,
}

/// Render the scatter chart for the current selection.
///
/// The table is filtered by payload range, then site, before plotting.
pub fn render_scatter(
    table: &LaunchTable,
    state: &SelectionState,
) -> Result<ChartSpec, ChartError> {
    let rows = apply_selection(table, state);

    let mut series: Vec<Series> = Vec::new();
    for row in &rows {
        let slot = match series.iter().position(|s| s.name == row.booster_version) {
            Some(i) => i,
            None => {
                series.push(Series {
                    name: row.booster_version.clone(),
                    x: Vec::new(),
                    y: Vec::new(),
                });
                series.len() - 1
            }
        };
        series[slot].x.push(row.payload_mass);
        series[slot].y.push(row.class);
    }

    let title = match &state.site {
        SiteSelection::All => ALL_SITES_TITLE.to_string(),
        SiteSelection::Site(site) => {
            format!("Correlation between Payload and Success for site {site}")
        }
    };

    let warning = rows.is_empty().then(|| {
        ChartWarning::empty_result(format!(
            "no launches for {} with payload between {} and {} kg",
            state.site, state.payload.low, state.payload.high
        ))
    });

    let mut plot = Plot::new();
    for s in series {
        plot.add_trace(
            Scatter::new(s.x, s.y)
                .mode(Mode::Markers)
                .name(s.name.as_str()),
        );
    }
    plot.set_layout(
        Layout::new()
            .title(Title::from(title.as_str()))
            .x_axis(Axis::new().title(Title::from(COL_PAYLOAD_MASS)))
            .y_axis(Axis::new().title(Title::from(COL_CLASS))),
    );

    ChartSpec::from_plot(ChartKind::Scatter, title, rows.len(), &plot, warning)
}
