/// Pie renderer.
///
/// - All sites: one slice per launch site, magnitude = sum of outcome class.
///   The payload range is not applied here; the scatter chart is the only
///   view that honors the slider.
/// - One site: slices count outcome classes `0` and `1` for that site.
use std::collections::HashMap;

use plotly::common::Title;
use plotly::{Layout, Pie, Plot};

use crate::data::LaunchTable;
use crate::filter::{SiteSelection, filter_by_site};

use super::{ChartError, ChartKind, ChartSpec, ChartWarning};

pub const ALL_SITES_TITLE: &str = "Total Success Launches by Site";

/// Render the pie chart for `site` from the full launch table.
pub fn render_pie(table: &LaunchTable, site: &SiteSelection) -> Result<ChartSpec, ChartError> {
    match site {
        SiteSelection::All => {
            let (labels, values) = successes_by_site(table);
            let warning = table
                .is_empty()
                .then(|| ChartWarning::empty_result("no launches in the dataset"));
            build(ALL_SITES_TITLE.to_string(), labels, values, table.len(), warning)
        }
        SiteSelection::Site(name) => {
            let rows = filter_by_site(table, site);
            let (labels, values) = outcome_counts(&rows);
            let warning = rows
                .is_empty()
                .then(|| ChartWarning::empty_result(format!("no launches recorded for site {name}")));
            build(
                format!("Total Success vs. Failure for site {name}"),
                labels,
                values,
                rows.len(),
                warning,
            )
        }
    }
}

fn build(
    title: String,
    labels: Vec<String>,
    values: Vec<u32>,
    row_count: usize,
    warning: Option<ChartWarning>,
) -> Result<ChartSpec, ChartError> {
    let mut plot = Plot::new();
    plot.add_trace(Pie::new(values).labels(labels));
    plot.set_layout(Layout::new().title(Title::from(title.as_str())));
    ChartSpec::from_plot(ChartKind::Pie, title, row_count, &plot, warning)
}

/// Sum of outcome class per site, sites in first-occurrence order.
fn successes_by_site(table: &LaunchTable) -> (Vec<String>, Vec<u32>) {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut labels: Vec<String> = Vec::new();
    let mut values: Vec<u32> = Vec::new();

    for row in table {
        let slot = *index.entry(row.launch_site.as_str()).or_insert_with(|| {
            labels.push(row.launch_site.clone());
            values.push(0);
            labels.len() - 1
        });
        values[slot] += u32::from(row.class);
    }
    (labels, values)
}

/// Row count per outcome class, classes in first-occurrence order.
/// Classes with no rows get no slice.
fn outcome_counts(rows: &LaunchTable) -> (Vec<String>, Vec<u32>) {
    let mut labels: Vec<String> = Vec::new();
    let mut values: Vec<u32> = Vec::new();
    for row in rows {
        let label = row.class.to_string();
        match labels.iter().position(|l| *l == label) {
            Some(i) => values[i] += 1,
            None => {
                labels.push(label);
                values.push(1);
            }
        }
    }
    (labels, values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::LaunchRecord;
    use serde_json::json;

    fn table() -> LaunchTable {
        LaunchTable::new(vec![
            LaunchRecord::new("CCAFS", 1000.0, 1, "F9 v1.1"),
            LaunchRecord::new("KSC", 3000.0, 0, "F9 FT"),
            LaunchRecord::new("CCAFS", 6000.0, 1, "F9 B4"),
            LaunchRecord::new("KSC", 8000.0, 0, "F9 B5"),
        ])
    }

    #[test]
    fn all_sites_sums_class_per_site() {
        let chart = render_pie(&table(), &SiteSelection::All).unwrap();
        assert_eq!(chart.title, ALL_SITES_TITLE);
        assert_eq!(chart.figure["layout"]["title"]["text"], ALL_SITES_TITLE);

        let traces = chart.traces();
        assert_eq!(traces.len(), 1);
        assert_eq!(traces[0]["type"], "pie");
        assert_eq!(traces[0]["labels"], json!(["CCAFS", "KSC"]));
        assert_eq!(traces[0]["values"], json!([2, 0]));
        assert!(chart.warning.is_none());
    }

    #[test]
    fn single_site_counts_outcomes() {
        let mut rows = table().rows().to_vec();
        rows.push(LaunchRecord::new("KSC", 4000.0, 1, "F9 B5"));
        let chart = render_pie(&LaunchTable::new(rows), &SiteSelection::parse("KSC")).unwrap();
        assert_eq!(chart.title, "Total Success vs. Failure for site KSC");
        assert_eq!(chart.traces()[0]["labels"], json!(["0", "1"]));
        assert_eq!(chart.traces()[0]["values"], json!([2, 1]));
        assert_eq!(chart.row_count, 3);
    }

    #[test]
    fn single_site_omits_absent_classes() {
        let chart = render_pie(&table(), &SiteSelection::parse("CCAFS")).unwrap();
        assert_eq!(chart.traces()[0]["labels"], json!(["1"]));
        assert_eq!(chart.traces()[0]["values"], json!([2]));
    }

    #[test]
    fn unknown_site_gives_empty_chart_with_warning() {
        let chart = render_pie(&table(), &SiteSelection::parse("VAFB")).unwrap();
        assert_eq!(chart.row_count, 0);
        assert_eq!(chart.traces()[0]["values"], json!([]));
        assert!(matches!(chart.warning, Some(ChartWarning::EmptyResult { .. })));
    }
}
