//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files, and
//! every section has a `Default` so a minimal (or empty) config is valid.

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Locale routing policy configuration.
    pub locale: LocaleConfig,

    /// Paths excluded from locale routing.
    pub matcher: MatcherConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Admin console settings.
    pub admin: AdminConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// How locale prefixes appear in public URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrefixMode {
    /// Every page path carries a locale prefix; unprefixed paths redirect.
    Always,
    /// Only non-default locales are prefixed; a default-locale prefix
    /// redirects to the unprefixed form.
    AsNeeded,
    /// Prefixes are stripped via redirect; locale comes from detection only.
    Never,
}

impl Default for PrefixMode {
    fn default() -> Self {
        PrefixMode::AsNeeded
    }
}

/// Locale routing policy configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LocaleConfig {
    /// Supported locale identifiers (e.g., "en", "fr", "pt-BR").
    pub supported: Vec<String>,

    /// Default locale. Must be one of `supported`.
    pub default: String,

    /// Locale prefix strategy for public URLs.
    pub prefix: PrefixMode,

    /// Consult the `locale` cookie when detecting a locale.
    pub cookie_detection: bool,

    /// Consult the Accept-Language header when detecting a locale.
    pub accept_language_detection: bool,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            supported: vec!["en".to_string(), "fr".to_string(), "de".to_string()],
            default: "en".to_string(),
            prefix: PrefixMode::AsNeeded,
            cookie_detection: true,
            accept_language_detection: true,
        }
    }
}

/// Exclusion matcher configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Path prefixes that bypass locale routing entirely.
    pub exclude_prefixes: Vec<String>,

    /// Exclude any path containing a literal dot (static-file heuristic).
    pub exclude_dotted: bool,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            exclude_prefixes: vec![
                "/api".to_string(),
                "/_next".to_string(),
                "/_vercel".to_string(),
                "/_assets".to_string(),
            ],
            exclude_dotted: true,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Admin console configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Enable the admin console under /admin.
    pub enabled: bool,

    /// API key for authentication (Bearer token).
    pub api_key: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            // WARNING: This is a placeholder! Change this in production.
            api_key: "CHANGE_ME_IN_PRODUCTION".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
