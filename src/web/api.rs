//! JSON API handlers for the dashboard.
//!
//! Each handler corresponds to an API endpoint and returns a
//! `Response<Cursor<Vec<u8>>>` with JSON content.

use std::io::Cursor;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tiny_http::{Response, StatusCode};

use crate::analytics::events::{InteractionEvent, InteractionLog, OutputRecord};
use crate::binder::{BindError, Publication};
use crate::dashboard::Dashboard;
use crate::filter::{PayloadRange, SelectionState, SiteSelection};

use super::content_type_json;

// ---------------------------------------------------------------------------
// JSON request / response types
// ---------------------------------------------------------------------------

/// Callback request: the input that changed plus the current widget values.
///
/// `trigger: null` requests the initial render of every output.
#[derive(Debug, Deserialize)]
pub(crate) struct CallbackRequest {
    #[serde(default)]
    trigger: Option<String>,
    site: String,
    payload: [f64; 2],
}

impl CallbackRequest {
    fn state(&self) -> SelectionState {
        SelectionState {
            site: SiteSelection::parse(&self.site),
            payload: PayloadRange::from(self.payload),
        }
    }
}

#[derive(Debug, Serialize)]
struct CallbackResponse {
    publications: Vec<Publication>,
}

#[derive(Serialize)]
struct SummaryResponse {
    source: String,
    rows: usize,
    payload_min: f64,
    payload_max: f64,
    sites: Vec<SiteSummaryResponse>,
}

#[derive(Serialize)]
struct SiteSummaryResponse {
    site: String,
    launches: usize,
    successes: usize,
    success_pct: f64,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    source: String,
    rows: usize,
    sites: usize,
    outputs: Vec<&'static str>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a JSON success response.
fn json_response<T: Serialize>(data: &T) -> Result<Response<Cursor<Vec<u8>>>> {
    let body = serde_json::to_string(data).context("failed to serialize JSON response")?;
    Ok(Response::from_data(body.into_bytes())
        .with_header(content_type_json())
        .with_status_code(StatusCode(200)))
}

/// Build a JSON error response with the given status.
pub(crate) fn error_response(status: u16, message: &str) -> Response<Cursor<Vec<u8>>> {
    let body = serde_json::json!({ "error": message }).to_string();
    Response::from_data(body.into_bytes())
        .with_header(content_type_json())
        .with_status_code(StatusCode(status))
}

/// Run the binder for a callback request and log the invocation.
fn run_callback(
    dash: &Dashboard,
    log: &InteractionLog,
    req: &CallbackRequest,
) -> Result<Vec<Publication>, BindError> {
    let state = req.state();
    let started = Instant::now();

    let publications = match req.trigger.as_deref() {
        Some(input) => dash.binder().trigger(input, &state)?,
        None => dash.binder().initial(&state)?,
    };

    let outputs: Vec<OutputRecord> = publications
        .iter()
        .map(|p| OutputRecord {
            output: p.output.clone(),
            rows: p.chart.row_count(),
        })
        .collect();
    let empty_result = publications.iter().any(|p| p.chart.warning().is_some());

    log.record(&InteractionEvent::now(
        req.trigger.as_deref(),
        state.site.as_str(),
        (state.payload.low, state.payload.high),
        outputs,
        empty_result,
        started.elapsed().as_millis() as u64,
    ));

    Ok(publications)
}

// ---------------------------------------------------------------------------
// API Handlers
// ---------------------------------------------------------------------------

/// `GET /api/layout`: the static component tree.
pub fn get_layout(dash: &Dashboard) -> Result<Response<Cursor<Vec<u8>>>> {
    json_response(dash.layout())
}

/// `POST /api/callback`: recompute the outputs bound to the changed input.
///
/// Expects JSON body: `{ "trigger": "payload-slider", "site": "ALL", "payload": [0, 9600] }`
pub fn post_callback(
    dash: &Dashboard,
    log: &InteractionLog,
    body: &str,
) -> Result<Response<Cursor<Vec<u8>>>> {
    let req: CallbackRequest = match serde_json::from_str(body) {
        Ok(req) => req,
        Err(e) => return Ok(error_response(400, &format!("invalid callback request: {e}"))),
    };

    match run_callback(dash, log, &req) {
        Ok(publications) => json_response(&CallbackResponse { publications }),
        Err(e @ BindError::UnknownInput(_)) => Ok(error_response(400, &e.to_string())),
        Err(e) => Ok(error_response(500, &e.to_string())),
    }
}

/// `GET /api/summary`: per-site launch counts and the payload range.
pub fn get_summary(dash: &Dashboard) -> Result<Response<Cursor<Vec<u8>>>> {
    let table = dash.table();
    let (payload_min, payload_max) = table.payload_range()?;

    let resp = SummaryResponse {
        source: dash.source().to_string(),
        rows: table.len(),
        payload_min,
        payload_max,
        sites: table
            .site_summaries()
            .into_iter()
            .map(|s| SiteSummaryResponse {
                success_pct: s.success_pct(),
                site: s.site,
                launches: s.launches,
                successes: s.successes,
            })
            .collect(),
    };

    json_response(&resp)
}

/// `GET /api/health`: liveness, dataset size and the bound chart outputs.
pub fn get_health(dash: &Dashboard) -> Result<Response<Cursor<Vec<u8>>>> {
    json_response(&health(dash))
}

fn health(dash: &Dashboard) -> HealthResponse {
    HealthResponse {
        status: "ok",
        source: dash.source().to_string(),
        rows: dash.table().len(),
        sites: dash.table().distinct_sites().len(),
        outputs: dash.binder().outputs(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::SliderConfig;
    use crate::data::{LaunchRecord, LaunchTable};
    use crate::layout::{PAYLOAD_SLIDER, PIE_CHART, SCATTER_CHART};

    fn dashboard() -> Dashboard {
        let table = LaunchTable::new(vec![
            LaunchRecord::new("CCAFS", 1000.0, 1, "F9 v1.1"),
            LaunchRecord::new("KSC", 6000.0, 0, "F9 FT"),
        ]);
        Dashboard::new(table, &SliderConfig::default(), "memory").unwrap()
    }

    fn request(json: &str) -> CallbackRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn callback_request_defaults_trigger_to_initial() {
        let req = request(r#"{"site": "ALL", "payload": [0, 10000]}"#);
        assert!(req.trigger.is_none());
        assert_eq!(req.state().payload, PayloadRange::new(0.0, 10000.0));
    }

    #[test]
    fn slider_callback_publishes_scatter_and_logs() {
        let dir = tempfile::tempdir().unwrap();
        let log = InteractionLog::at(dir.path().join("log.jsonl"));
        let req = request(r#"{"trigger": "payload-slider", "site": "KSC", "payload": [7000, 10000]}"#);

        let pubs = run_callback(&dashboard(), &log, &req).unwrap();
        assert_eq!(pubs.len(), 1);
        assert_eq!(pubs[0].output, SCATTER_CHART);

        let events = log.read_all();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].trigger.as_deref(), Some(PAYLOAD_SLIDER));
        assert!(events[0].empty_result);
        assert_eq!(events[0].outputs[0].rows, 0);
    }

    #[test]
    fn initial_callback_publishes_everything() {
        let req = request(r#"{"trigger": null, "site": "ALL", "payload": [0, 10000]}"#);
        let pubs = run_callback(&dashboard(), &InteractionLog::disabled(), &req).unwrap();
        assert_eq!(pubs.len(), 2);
    }

    #[test]
    fn malformed_body_is_bad_request() {
        let resp = post_callback(&dashboard(), &InteractionLog::disabled(), "{not json").unwrap();
        assert_eq!(resp.status_code().0, 400);
    }

    #[test]
    fn unknown_trigger_is_bad_request() {
        let body = r#"{"trigger": "nope", "site": "ALL", "payload": [0, 1]}"#;
        let resp = post_callback(&dashboard(), &InteractionLog::disabled(), body).unwrap();
        assert_eq!(resp.status_code().0, 400);
    }

    #[test]
    fn published_warning_sits_beside_figure() {
        let req = request(r#"{"trigger": "payload-slider", "site": "KSC", "payload": [7000, 10000]}"#);
        let pubs = run_callback(&dashboard(), &InteractionLog::disabled(), &req).unwrap();
        let json = serde_json::to_value(&CallbackResponse { publications: pubs }).unwrap();

        let publication = &json["publications"][0];
        assert_eq!(publication["output"], SCATTER_CHART);
        assert_eq!(publication["warning"]["kind"], "empty_result");
        assert_eq!(publication["figure"]["data"], serde_json::json!([]));
    }

    #[test]
    fn health_lists_bound_outputs() {
        let json = serde_json::to_value(health(&dashboard())).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["outputs"], serde_json::json!([PIE_CHART, SCATTER_CHART]));
    }

    #[test]
    fn read_endpoints_succeed() {
        let dash = dashboard();
        assert_eq!(get_layout(&dash).unwrap().status_code().0, 200);
        assert_eq!(get_summary(&dash).unwrap().status_code().0, 200);
        assert_eq!(get_health(&dash).unwrap().status_code().0, 200);
    }
}
