//! Admin console: layout-wrapped pages plus a JSON API for the CLI.

pub mod auth;
pub mod handlers;
pub mod layout;

use axum::{middleware, routing::get, Router};

use self::auth::admin_auth_middleware;
use self::handlers::*;
use crate::http::server::AppState;

pub fn admin_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/admin", get(get_overview))
        .route("/admin/locales", get(get_locales))
        .route("/admin/routing", get(get_routing))
        .route("/admin/api/status", get(get_status))
        .layer(middleware::from_fn_with_state(state, admin_auth_middleware))
}
