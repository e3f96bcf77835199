//! Embedded web dashboard.
//!
//! Provides a lightweight HTTP server (sync, via `tiny_http`) that serves:
//! - The single-page dashboard (layout renderer, pie and scatter charts)
//! - JSON API endpoints for the layout, reactive callbacks, and summaries
//!
//! Launched via `launchdash serve` (default: `http://127.0.0.1:8050`).

mod api;
mod frontend;

use std::io::Cursor;

use anyhow::{Context, Result};
use colored::Colorize;
use tiny_http::{Header, Method, Response, Server, StatusCode};

use crate::analytics::events::InteractionLog;
use crate::dashboard::Dashboard;

/// Per-server settings that are not part of the dashboard itself.
#[derive(Debug, Clone)]
pub struct ServeOptions {
    pub addr: String,
    pub open_browser: bool,
    pub access_log: bool,
}

// ---------------------------------------------------------------------------
// Server entry point
// ---------------------------------------------------------------------------

/// Start the dashboard server.
///
/// Blocks the current thread. Handles requests sequentially: each callback
/// runs to completion before the next input event is read. Errors are
/// handled per-request without stopping the server.
pub fn serve(dash: &Dashboard, log: &InteractionLog, opts: &ServeOptions) -> Result<()> {
    let addr = &opts.addr;
    let server = Server::http(addr)
        .map_err(|e| anyhow::anyhow!("failed to start HTTP server on {addr}: {e}"))?;

    println!(
        "{} {} launches from {}",
        "launchdash".bold().cyan(),
        dash.table().len(),
        dash.source()
    );
    println!("Dashboard running at http://{addr}");
    if let Some(path) = log.path() {
        println!("Interaction log: {}", path.display());
    }
    println!("Press Ctrl+C to stop.\n");

    if opts.open_browser {
        let _ = open_browser(&format!("http://{addr}"));
    }

    for mut request in server.incoming_requests() {
        let method = request.method().clone();
        let url = request.url().to_string();

        // Read body up-front for methods that carry one
        let body = if matches!(method, Method::Put | Method::Post | Method::Patch) {
            let mut buf = String::new();
            let _ = request.as_reader().read_to_string(&mut buf);
            Some(buf)
        } else {
            None
        };

        let resp = dispatch(dash, log, &method, &url, body.as_deref())
            .unwrap_or_else(|e| api::error_response(500, &e.to_string()));
        let status = resp.status_code().0;
        let _ = request.respond(resp);

        if opts.access_log {
            access_log(&method, &url, status);
        }
    }

    Ok(())
}

/// One-line request log: method, url, status, local time.
fn access_log(method: &Method, url: &str, status: u16) {
    let status_str = match status {
        200..=299 => status.to_string().green(),
        400..=499 => status.to_string().yellow(),
        _ => status.to_string().red(),
    };
    println!(
        "{} {} {} {}",
        method,
        url,
        status_str,
        chrono::Local::now().format("%H:%M:%S")
    );
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Dispatch an incoming request to the appropriate handler.
pub fn dispatch(
    dash: &Dashboard,
    log: &InteractionLog,
    method: &Method,
    url: &str,
    body: Option<&str>,
) -> Result<Response<Cursor<Vec<u8>>>> {
    // Strip query string for path matching
    let path = url.split('?').next().unwrap_or(url);

    match (method, path) {
        // Frontend
        (&Method::Get, "/") | (&Method::Get, "/index.html") => Ok(serve_frontend()),

        // API
        (&Method::Get, "/api/layout") => api::get_layout(dash),
        (&Method::Post, "/api/callback") => api::post_callback(dash, log, body.unwrap_or("")),
        (&Method::Get, "/api/summary") => api::get_summary(dash),
        (&Method::Get, "/api/health") => api::get_health(dash),

        // 404
        _ => Ok(not_found()),
    }
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

/// Serve the embedded single-page frontend.
fn serve_frontend() -> Response<Cursor<Vec<u8>>> {
    let html = frontend::INDEX_HTML;
    Response::from_data(html.as_bytes().to_vec())
        .with_header(content_type_html())
        .with_status_code(StatusCode(200))
}

/// 404 response.
fn not_found() -> Response<Cursor<Vec<u8>>> {
    api::error_response(404, "not found")
}

/// JSON content type header.
pub(crate) fn content_type_json() -> Header {
    Header::from_bytes("Content-Type", "application/json; charset=utf-8").unwrap()
}

/// HTML content type header.
fn content_type_html() -> Header {
    Header::from_bytes("Content-Type", "text/html; charset=utf-8").unwrap()
}

/// Attempt to open a URL in the system default browser.
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", url])
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::SliderConfig;
    use crate::data::{LaunchRecord, LaunchTable};

    fn dashboard() -> Dashboard {
        let table = LaunchTable::new(vec![LaunchRecord::new("KSC", 2000.0, 1, "F9 FT")]);
        Dashboard::new(table, &SliderConfig::default(), "memory").unwrap()
    }

    fn status(method: Method, url: &str, body: Option<&str>) -> u16 {
        dispatch(&dashboard(), &InteractionLog::disabled(), &method, url, body)
            .unwrap()
            .status_code()
            .0
    }

    #[test]
    fn routes_frontend_and_api() {
        assert_eq!(status(Method::Get, "/", None), 200);
        assert_eq!(status(Method::Get, "/index.html", None), 200);
        assert_eq!(status(Method::Get, "/api/layout?x=1", None), 200);
        assert_eq!(status(Method::Get, "/api/health", None), 200);
    }

    #[test]
    fn callback_requires_post() {
        assert_eq!(status(Method::Get, "/api/callback", None), 404);
        let body = r#"{"trigger": "site-dropdown", "site": "KSC", "payload": [0, 10000]}"#;
        assert_eq!(status(Method::Post, "/api/callback", Some(body)), 200);
    }

    #[test]
    fn missing_body_is_bad_request() {
        assert_eq!(status(Method::Post, "/api/callback", None), 400);
    }

    #[test]
    fn frontend_draws_with_plotly() {
        assert!(frontend::INDEX_HTML.contains("cdn.plot.ly/plotly-"));
        assert!(frontend::INDEX_HTML.contains("Plotly.react(plot, pub.figure.data"));
    }

    #[test]
    fn unknown_route_is_not_found() {
        assert_eq!(status(Method::Get, "/api/nope", None), 404);
    }
}
