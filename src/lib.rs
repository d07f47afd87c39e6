//! polyroute — locale-aware routing gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                  GATEWAY                      │
//!                      │                                               │
//!     Client Request   │  ┌─────────┐   ┌───────────┐   ┌──────────┐  │
//!     ─────────────────┼─▶│  http   │──▶│ exclusion │──▶│  locale  │  │
//!                      │  │ server  │   │  matcher  │   │  policy  │  │
//!                      │  └─────────┘   └───────────┘   └────┬─────┘  │
//!                      │                                      │        │
//!                      │              pass / redirect / rewrite        │
//!                      │                                      ▼        │
//!     Client Response  │  ┌──────────────┐   ┌─────────────────────┐  │
//!     ◀────────────────┼──│ page / admin │◀──│  resolved locale in  │  │
//!                      │  │   handlers   │   │  request extensions  │  │
//!                      │  └──────────────┘   └─────────────────────┘  │
//!                      │                                               │
//!                      │  ┌─────────────────────────────────────────┐ │
//!                      │  │          Cross-Cutting Concerns          │ │
//!                      │  │  config · assets · observability ·       │ │
//!                      │  │  lifecycle                               │ │
//!                      │  └─────────────────────────────────────────┘ │
//!                      └──────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod config;
pub mod http;
pub mod routing;

// Application surfaces
pub mod admin;
pub mod assets;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::{AppConfig, ConfigError};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
