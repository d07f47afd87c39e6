//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with gateway pages, admin console, and assets
//! - Wire up middleware (locale routing, tracing, timeout, request ID)
//! - Bind the server to a listener and serve with graceful shutdown
//! - Apply hot-reloaded configurations by swapping the routing snapshot

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwap;
use axum::{
    body::Body,
    http::Request,
    middleware,
    response::{Html, IntoResponse},
    routing::{any, get},
    Router,
};
use maud::{html, DOCTYPE};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::admin;
use crate::assets::{serve_asset, AssetRegistry};
use crate::config::AppConfig;
use crate::http::middleware::{locale_middleware, ResolvedLocale};
use crate::http::request::RequestIdLayer;
use crate::routing::{ExclusionMatcher, LocalePolicy};

/// Immutable view of the configuration compiled for request handling.
/// Replaced wholesale on config reload.
pub struct Snapshot {
    pub config: AppConfig,
    pub policy: LocalePolicy,
    pub exclusions: ExclusionMatcher,
}

impl Snapshot {
    pub fn from_config(config: AppConfig) -> Self {
        let policy = LocalePolicy::from_config(&config.locale);
        let exclusions = ExclusionMatcher::from_config(&config.matcher);
        Self {
            config,
            policy,
            exclusions,
        }
    }
}

/// Application state injected into handlers and middleware.
#[derive(Clone)]
pub struct AppState {
    /// Current routing snapshot, swapped atomically on reload.
    pub snapshot: Arc<ArcSwap<Snapshot>>,
    /// Assets registered at startup.
    pub assets: Arc<AssetRegistry>,
    started_at: Instant,
    requests: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            snapshot: Arc::new(ArcSwap::from_pointee(Snapshot::from_config(config))),
            assets: Arc::new(AssetRegistry::builtin()),
            started_at: Instant::now(),
            requests: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Swap in a new configuration snapshot.
    pub fn apply(&self, config: AppConfig) {
        self.snapshot.store(Arc::new(Snapshot::from_config(config)));
    }

    pub fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
        crate::observability::metrics::record_request();
    }

    pub fn requests_total(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        let state = AppState::new(config.clone());
        let router = Self::build_router(&config, state.clone());
        Self { router, state }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        // Locale routing applies only to page traffic; admin and assets sit
        // outside it.
        let pages = Router::new()
            .route("/", any(page_handler))
            .route("/{*path}", any(page_handler))
            .layer(middleware::from_fn_with_state(
                state.clone(),
                locale_middleware,
            ));

        Router::new()
            .merge(admin::admin_router(state.clone()))
            .route("/_assets/{*path}", get(serve_asset))
            .merge(pages)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<AppConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let state = self.state.clone();
        tokio::spawn(async move {
            while let Some(new_config) = config_updates.recv().await {
                tracing::info!("Applying reloaded configuration");
                state.apply(new_config);
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Catch-all page handler. Pages reach it after locale routing has settled:
/// the URI carries the internal (unprefixed) path and the resolved locale
/// sits in request extensions. Excluded paths arrive without a locale.
async fn page_handler(req: Request<Body>) -> impl IntoResponse {
    let locale = req.extensions().get::<ResolvedLocale>().map(|l| l.0.clone());
    let path = req.uri().path().to_string();

    let markup = html! {
        (DOCTYPE)
        html lang=[locale.as_deref()] {
            head {
                meta charset="utf-8";
                title { "polyroute" }
            }
            body {
                main data-path=(path) data-locale=[locale.as_deref()] {
                    h1 { "polyroute" }
                    p { "Serving " (path) }
                    @if let Some(locale) = &locale {
                        p { "Locale: " (locale) }
                    }
                }
            }
        }
    };

    Html(markup.into_string())
}
