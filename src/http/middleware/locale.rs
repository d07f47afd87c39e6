//! Locale routing middleware.
//!
//! Runs once per request, before normal handling. Excluded paths (API,
//! framework-internal, assets, dotted static-file paths) pass through
//! untouched; every other path consults the locale policy exactly once and
//! the decision is applied here: pass, 307 redirect, or internal rewrite.

use axum::{
    body::Body,
    extract::State,
    http::{header, uri::PathAndQuery, Request, StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::http::server::AppState;
use crate::observability::metrics;
use crate::routing::{RouteDecision, LOCALE_COOKIE};

/// Locale resolved for this request, attached to request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocale(pub String);

pub async fn locale_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    state.record_request();
    let snapshot = state.snapshot.load_full();
    let path = req.uri().path().to_string();

    // 1. Exclusion filter first: the policy never sees these paths.
    if snapshot.exclusions.is_excluded(&path) {
        tracing::trace!(path = %path, "Path excluded from locale routing");
        metrics::record_decision("excluded");
        return next.run(req).await;
    }

    // 2. Single policy consultation.
    match snapshot.policy.decide(&req) {
        RouteDecision::Pass { locale } => {
            tracing::debug!(path = %path, locale = %locale, "Locale pass-through");
            metrics::record_decision("pass");
            req.extensions_mut().insert(ResolvedLocale(locale));
            next.run(req).await
        }
        RouteDecision::Rewrite { locale, path: internal } => {
            tracing::debug!(path = %path, internal = %internal, locale = %locale, "Locale rewrite");
            metrics::record_decision("rewrite");
            rewrite_uri(&mut req, &internal);
            req.extensions_mut().insert(ResolvedLocale(locale));
            next.run(req).await
        }
        RouteDecision::Redirect { locale, location } => {
            tracing::debug!(path = %path, location = %location, locale = %locale, "Locale redirect");
            metrics::record_decision("redirect");
            (
                StatusCode::TEMPORARY_REDIRECT,
                [
                    (header::LOCATION, location),
                    (
                        header::SET_COOKIE,
                        format!("{LOCALE_COOKIE}={locale}; Path=/; SameSite=Lax"),
                    ),
                ],
            )
                .into_response()
        }
    }
}

/// Replace the request path, keeping the original query string. A path the
/// URI type rejects leaves the request unchanged.
fn rewrite_uri(req: &mut Request<Body>, path: &str) {
    let path_and_query = match req.uri().query() {
        Some(q) => format!("{path}?{q}"),
        None => path.to_string(),
    };

    let mut parts = req.uri().clone().into_parts();
    match PathAndQuery::try_from(path_and_query.as_str()) {
        Ok(pq) => parts.path_and_query = Some(pq),
        Err(_) => return,
    }

    if let Ok(uri) = Uri::from_parts(parts) {
        *req.uri_mut() = uri;
    }
}
