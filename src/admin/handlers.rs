//! Admin console pages and JSON endpoints.

use axum::{
    extract::State,
    response::{Html, IntoResponse},
    Json,
};
use maud::html;
use serde::Serialize;

use crate::admin::layout::layout;
use crate::config::PrefixMode;
use crate::http::server::AppState;

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub uptime_secs: u64,
    pub requests_total: u64,
    pub default_locale: String,
    pub locales: Vec<String>,
}

fn mode_label(mode: PrefixMode) -> &'static str {
    match mode {
        PrefixMode::Always => "always",
        PrefixMode::AsNeeded => "as-needed",
        PrefixMode::Never => "never",
    }
}

/// Overview page.
pub async fn get_overview(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.snapshot.load_full();
    let content = html! {
        h1 { "Overview" }
        dl {
            dt { "Version" }
            dd { (env!("CARGO_PKG_VERSION")) }
            dt { "Uptime" }
            dd { (state.uptime_secs()) "s" }
            dt { "Requests served" }
            dd { (state.requests_total()) }
            dt { "Locales" }
            dd { (snapshot.policy.supported().len()) " configured, default " (snapshot.policy.default_locale()) }
        }
    };
    Html(layout("Overview", content).into_string())
}

/// Locale configuration page.
pub async fn get_locales(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.snapshot.load_full();
    let default_locale = snapshot.policy.default_locale();
    let content = html! {
        h1 { "Locales" }
        p { "Prefix mode: " code { (mode_label(snapshot.policy.mode())) } }
        table {
            thead { tr { th { "Locale" } th { "Default" } } }
            tbody {
                @for locale in snapshot.policy.supported() {
                    tr {
                        td { code { (locale) } }
                        td {
                            @if locale.eq_ignore_ascii_case(default_locale) { "yes" } @else { "" }
                        }
                    }
                }
            }
        }
    };
    Html(layout("Locales", content).into_string())
}

/// Routing exclusions page.
pub async fn get_routing(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.snapshot.load_full();
    let config = &snapshot.config.matcher;
    let content = html! {
        h1 { "Routing" }
        h2 { "Excluded path prefixes" }
        ul {
            @for prefix in &config.exclude_prefixes {
                li { code { (prefix) } }
            }
        }
        p {
            "Static-file heuristic (paths containing a dot): "
            @if config.exclude_dotted { "enabled" } @else { "disabled" }
        }
    };
    Html(layout("Routing", content).into_string())
}

/// JSON status endpoint for the management CLI.
pub async fn get_status(State(state): State<AppState>) -> Json<SystemStatus> {
    let snapshot = state.snapshot.load_full();
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        uptime_secs: state.uptime_secs(),
        requests_total: state.requests_total(),
        default_locale: snapshot.policy.default_locale().to_string(),
        locales: snapshot.policy.supported().to_vec(),
    })
}
