/// End-to-end dashboard behavior: load → layout → binder → charts.
///
/// Covers the filter properties over a realistic table and the four
/// interaction scenarios. Network sources are never touched; every table
/// comes from an in-memory CSV or a temp file.
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use launchdash::binder::Binder;
use launchdash::charts::{ChartKind, ChartWarning, render_pie};
use launchdash::config::schema::SliderConfig;
use launchdash::dashboard::Dashboard;
use launchdash::data::{DataError, LaunchTable, loader};
use launchdash::filter::{
    PayloadRange, SelectionState, SiteSelection, filter_by_payload_range, filter_by_site,
};
use launchdash::layout::{
    Component, PAYLOAD_SLIDER, PIE_CHART, SCATTER_CHART, SITE_DROPDOWN,
};
use serde_json::json;

const LAUNCHES_CSV: &str = "\
FlightNumber,Date,BoosterVersion,PayloadMass,Orbit,LaunchSite,Outcome,Class
1,2010-06-04,F9 v1.0  B0003,0.0,LEO,CCAFS LC-40,None None,0
2,2012-05-22,F9 v1.0  B0005,525.0,LEO,CCAFS LC-40,None None,0
3,2013-09-29,F9 v1.1  B1003,500.0,PO,VAFB SLC-4E,False Ocean,0
4,2016-04-08,F9 FT B1021.1,3136.0,ISS,CCAFS LC-40,True ASDS,1
5,2017-02-19,F9 FT B1031.1,2490.0,ISS,KSC LC-39A,True RTLS,1
6,2017-03-16,F9 FT B1030,5600.0,GTO,KSC LC-39A,None None,0
7,2017-05-01,F9 FT B1032.1,5300.0,LEO,KSC LC-39A,True RTLS,1
8,2018-01-31,F9 B4 B1032.2,4230.0,GTO,CCAFS SLC-40,True Ocean,1
9,2018-05-11,F9 B5 B1046.1,3600.0,GTO,KSC LC-39A,True ASDS,1
10,2019-01-11,F9 B5 B1049.2,9600.0,PO,VAFB SLC-4E,True ASDS,1
";

fn table() -> LaunchTable {
    loader::from_reader(LAUNCHES_CSV.as_bytes()).unwrap()
}

fn state(site: &str, low: f64, high: f64) -> SelectionState {
    SelectionState {
        site: SiteSelection::parse(site),
        payload: PayloadRange::new(low, high),
    }
}

// ---------------------------------------------------------------------------
// Loader
// ---------------------------------------------------------------------------

#[test]
fn loads_table_from_file_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(LAUNCHES_CSV.as_bytes()).unwrap();

    let loaded = loader::load(file.path().to_str().unwrap(), Duration::from_secs(1)).unwrap();
    assert_eq!(loaded, table());
    assert_eq!(loaded.len(), 10);
}

#[test]
fn malformed_file_fails_load() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"Site,Mass\nKSC,1\n").unwrap();

    let err = loader::load(file.path().to_str().unwrap(), Duration::from_secs(1)).unwrap_err();
    assert!(matches!(err, DataError::MissingColumn(_)));
}

// ---------------------------------------------------------------------------
// Filter properties
// ---------------------------------------------------------------------------

#[test]
fn all_sites_filter_is_identity() {
    let t = table();
    let filtered = filter_by_site(&t, &SiteSelection::All);
    assert_eq!(filtered.len(), t.len());
    assert_eq!(filtered, t);
}

#[test]
fn site_filter_matches_source_counts_for_every_site() {
    let t = table();
    for site in t.distinct_sites() {
        let filtered = filter_by_site(&t, &SiteSelection::parse(&site));
        let expected = t.iter().filter(|r| r.launch_site == site).count();
        assert_eq!(filtered.len(), expected, "count mismatch for {site}");
        assert!(filtered.iter().all(|r| r.launch_site == site));
    }
}

#[test]
fn payload_filter_respects_bounds() {
    let t = table();
    for (low, high) in [(0.0, 10000.0), (500.0, 3600.0), (5300.0, 5300.0), (9601.0, 20000.0)] {
        let filtered = filter_by_payload_range(&t, low, high);
        assert!(
            filtered
                .iter()
                .all(|r| low <= r.payload_mass && r.payload_mass <= high)
        );
    }
    assert!(filter_by_payload_range(&t, 5000.0, 4999.0).is_empty());
}

#[test]
fn filters_are_idempotent() {
    let t = table();
    let site = SiteSelection::parse("KSC LC-39A");
    let once = filter_by_site(&t, &site);
    assert_eq!(filter_by_site(&once, &site), once);

    let once = filter_by_payload_range(&t, 2000.0, 6000.0);
    assert_eq!(filter_by_payload_range(&once, 2000.0, 6000.0), once);
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn scenario_all_sites_pie_sums_class_per_site() {
    let csv = "LaunchSite,PayloadMass,Class,BoosterVersion\n\
CCAFS,1000,1,F9\n\
KSC,2000,0,F9\n\
CCAFS,3000,1,F9\n\
KSC,4000,0,F9\n";
    let t = loader::from_reader(csv.as_bytes()).unwrap();

    let chart = render_pie(&t, &SiteSelection::All).unwrap();
    assert_eq!(chart.kind, ChartKind::Pie);
    let traces = chart.traces();
    assert_eq!(traces.len(), 1);
    assert_eq!(traces[0]["labels"], json!(["CCAFS", "KSC"]));
    assert_eq!(traces[0]["values"], json!([2, 0]));
}

#[test]
fn scenario_site_selection_limits_scatter_to_that_site() {
    let t = Arc::new(table());
    let binder = Binder::dashboard(Arc::clone(&t));

    let pubs = binder
        .trigger(SITE_DROPDOWN, &state("KSC LC-39A", 0.0, 10000.0))
        .unwrap();
    let chart = &pubs.iter().find(|p| p.output == SCATTER_CHART).unwrap().chart;

    let plotted: usize = chart
        .traces()
        .iter()
        .map(|t| t["x"].as_array().map_or(0, Vec::len))
        .sum();
    let ksc_rows = t.iter().filter(|r| r.launch_site == "KSC LC-39A").count();
    assert_eq!(plotted, ksc_rows);
    assert_eq!(
        chart.title,
        "Correlation between Payload and Success for site KSC LC-39A"
    );
}

#[test]
fn scenario_range_excluding_site_gives_empty_scatter() {
    let binder = Binder::dashboard(Arc::new(table()));

    let pubs = binder
        .trigger(PAYLOAD_SLIDER, &state("CCAFS LC-40", 5000.0, 10000.0))
        .unwrap();
    assert_eq!(pubs.len(), 1);
    let chart = &pubs[0].chart;
    assert_eq!(chart.kind, ChartKind::Scatter);
    assert!(chart.traces().is_empty());
    assert!(matches!(chart.warning, Some(ChartWarning::EmptyResult { .. })));
}

#[test]
fn scenario_default_slider_value_comes_from_data() {
    let dash = Dashboard::new(table(), &SliderConfig::default(), "memory").unwrap();

    let Some(Component::RangeSlider {
        min, max, value, ..
    }) = dash.layout().find(PAYLOAD_SLIDER)
    else {
        panic!("slider missing from layout");
    };
    assert_eq!((*min, *max), (0.0, 10000.0));
    assert_eq!(*value, [0.0, 9600.0]);
}

// ---------------------------------------------------------------------------
// Binder and asymmetry between the two charts
// ---------------------------------------------------------------------------

#[test]
fn all_sites_pie_ignores_payload_range() {
    let binder = Binder::dashboard(Arc::new(table()));

    let narrow = binder
        .trigger(SITE_DROPDOWN, &state("ALL", 9000.0, 10000.0))
        .unwrap();
    let wide = binder
        .trigger(SITE_DROPDOWN, &state("ALL", 0.0, 10000.0))
        .unwrap();

    let pie_of = |pubs: &[launchdash::binder::Publication]| {
        pubs.iter()
            .find(|p| p.output == PIE_CHART)
            .map(|p| p.chart.clone())
            .unwrap()
    };
    assert_eq!(pie_of(&narrow), pie_of(&wide));

    let narrow_scatter = narrow.iter().find(|p| p.output == SCATTER_CHART).unwrap();
    assert_eq!(narrow_scatter.chart.row_count(), 1);
}

#[test]
fn every_trigger_recomputes_from_full_table() {
    let binder = Binder::dashboard(Arc::new(table()));

    let first = binder
        .trigger(PAYLOAD_SLIDER, &state("ALL", 0.0, 1000.0))
        .unwrap();
    let second = binder
        .trigger(PAYLOAD_SLIDER, &state("ALL", 0.0, 10000.0))
        .unwrap();
    assert_eq!(first[0].chart.row_count(), 3);
    assert_eq!(second[0].chart.row_count(), 10);
}

#[test]
fn dropdown_lists_sites_in_first_occurrence_order() {
    let dash = Dashboard::new(table(), &SliderConfig::default(), "memory").unwrap();
    let Some(Component::Dropdown { options, .. }) = dash.layout().find(SITE_DROPDOWN) else {
        panic!("dropdown missing from layout");
    };
    let values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
    assert_eq!(
        values,
        vec!["ALL", "CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"]
    );
}
