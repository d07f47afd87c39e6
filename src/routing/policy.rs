//! Locale routing policy.
//!
//! # Responsibilities
//! - Detect the request locale (path prefix, cookie, Accept-Language)
//! - Decide pass-through, redirect, or internal rewrite per the prefix mode
//! - Preserve query strings across redirects and rewrites
//!
//! # Design Decisions
//! - Compiled from config at startup, immutable at runtime
//! - Deterministic: same request always yields the same decision
//! - Locale comparison is ASCII case-insensitive; the configured spelling
//!   is the canonical form in decisions
//! - Detection order: path prefix, cookie, Accept-Language, default

use axum::http::{header, HeaderMap, Request};

use crate::config::schema::{LocaleConfig, PrefixMode};

/// Name of the cookie consulted (and set on redirects) for the locale.
pub const LOCALE_COOKIE: &str = "locale";

/// The outcome of consulting the policy for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Let the request through unchanged.
    Pass { locale: String },
    /// Redirect the client to a different public path.
    Redirect { locale: String, location: String },
    /// Rewrite the internal path before normal handling.
    Rewrite { locale: String, path: String },
}

/// Locale routing policy compiled from [`LocaleConfig`].
#[derive(Debug, Clone)]
pub struct LocalePolicy {
    supported: Vec<String>,
    default_locale: String,
    mode: PrefixMode,
    cookie_detection: bool,
    accept_language_detection: bool,
}

impl LocalePolicy {
    /// Compile the policy from configuration. The default locale is
    /// canonicalized to its spelling in the supported list.
    pub fn from_config(config: &LocaleConfig) -> Self {
        let default_locale = config
            .supported
            .iter()
            .find(|l| l.eq_ignore_ascii_case(&config.default))
            .cloned()
            .unwrap_or_else(|| config.default.clone());

        Self {
            supported: config.supported.clone(),
            default_locale,
            mode: config.prefix,
            cookie_detection: config.cookie_detection,
            accept_language_detection: config.accept_language_detection,
        }
    }

    pub fn supported(&self) -> &[String] {
        &self.supported
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    pub fn mode(&self) -> PrefixMode {
        self.mode
    }

    /// Decide how to route one request. Consulted exactly once per
    /// non-excluded request.
    pub fn decide<B>(&self, req: &Request<B>) -> RouteDecision {
        let path = req.uri().path();
        let query = req.uri().query();

        if let Some((locale, rest)) = self.split_locale_prefix(path) {
            let strip = match self.mode {
                PrefixMode::Never => true,
                PrefixMode::AsNeeded => locale.eq_ignore_ascii_case(&self.default_locale),
                PrefixMode::Always => false,
            };

            if strip {
                return RouteDecision::Redirect {
                    locale,
                    location: with_query(rest, query),
                };
            }
            return RouteDecision::Rewrite {
                locale,
                path: rest.to_string(),
            };
        }

        let locale = self.detect(req.headers());
        let needs_prefix = match self.mode {
            PrefixMode::Always => true,
            PrefixMode::AsNeeded => !locale.eq_ignore_ascii_case(&self.default_locale),
            PrefixMode::Never => false,
        };

        if needs_prefix {
            let target = if path == "/" {
                format!("/{locale}")
            } else {
                format!("/{locale}{path}")
            };
            return RouteDecision::Redirect {
                locale,
                location: with_query(&target, query),
            };
        }

        RouteDecision::Pass { locale }
    }

    /// If the first path segment is a supported locale, return the canonical
    /// locale and the remaining path (never empty, at least "/").
    fn split_locale_prefix<'a>(&self, path: &'a str) -> Option<(String, &'a str)> {
        let trimmed = path.strip_prefix('/')?;
        let (head, rest) = match trimmed.find('/') {
            Some(i) => (&trimmed[..i], &trimmed[i..]),
            None => (trimmed, ""),
        };
        if head.is_empty() {
            return None;
        }

        let locale = self.supported.iter().find(|l| l.eq_ignore_ascii_case(head))?;
        let rest = if rest.is_empty() { "/" } else { rest };
        Some((locale.clone(), rest))
    }

    /// Detect the locale for an unprefixed path.
    fn detect(&self, headers: &HeaderMap) -> String {
        if self.cookie_detection {
            if let Some(locale) = self.cookie_locale(headers) {
                return locale;
            }
        }

        if self.accept_language_detection {
            if let Some(locale) = headers
                .get(header::ACCEPT_LANGUAGE)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| self.negotiate(v))
            {
                return locale;
            }
        }

        self.default_locale.clone()
    }

    fn cookie_locale(&self, headers: &HeaderMap) -> Option<String> {
        let raw = headers.get(header::COOKIE)?.to_str().ok()?;
        for pair in raw.split(';') {
            let Some((name, value)) = pair.trim().split_once('=') else {
                continue;
            };
            if name.trim() != LOCALE_COOKIE {
                continue;
            }
            let value = value.trim();
            if let Some(locale) = self.supported.iter().find(|l| l.eq_ignore_ascii_case(value)) {
                return Some(locale.clone());
            }
        }
        None
    }

    /// RFC 9110 Accept-Language negotiation: highest q-value wins, header
    /// order breaks ties, primary subtags fall back both ways ("en-GB"
    /// matches supported "en"; "en" matches supported "en-US").
    fn negotiate(&self, header: &str) -> Option<String> {
        let mut candidates: Vec<(f32, &str)> = Vec::new();

        for part in header.split(',') {
            let mut params = part.trim().split(';');
            let tag = params.next().unwrap_or("").trim();
            if tag.is_empty() {
                continue;
            }

            let mut q = 1.0f32;
            for param in params {
                if let Some(value) = param.trim().strip_prefix("q=") {
                    q = value.trim().parse().unwrap_or(0.0);
                }
            }
            if q > 0.0 {
                candidates.push((q, tag));
            }
        }

        // Stable sort keeps header order among equal q-values.
        candidates.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        candidates
            .iter()
            .filter(|&&(_, tag)| tag != "*")
            .find_map(|&(_, tag)| self.match_tag(tag))
    }

    fn match_tag(&self, tag: &str) -> Option<String> {
        if let Some(locale) = self.supported.iter().find(|l| l.eq_ignore_ascii_case(tag)) {
            return Some(locale.clone());
        }

        let primary = tag.split('-').next().unwrap_or(tag);
        if let Some(locale) = self.supported.iter().find(|l| l.eq_ignore_ascii_case(primary)) {
            return Some(locale.clone());
        }
        self.supported
            .iter()
            .find(|l| {
                l.split('-')
                    .next()
                    .is_some_and(|p| p.eq_ignore_ascii_case(primary))
            })
            .cloned()
    }
}

fn with_query(path: &str, query: Option<&str>) -> String {
    match query {
        Some(q) => format!("{path}?{q}"),
        None => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn policy(mode: PrefixMode) -> LocalePolicy {
        LocalePolicy::from_config(&LocaleConfig {
            prefix: mode,
            ..LocaleConfig::default()
        })
    }

    fn request(path: &str) -> Request<Body> {
        Request::builder().uri(path).body(Body::empty()).unwrap()
    }

    fn request_with(path: &str, name: header::HeaderName, value: &str) -> Request<Body> {
        Request::builder()
            .uri(path)
            .header(name, value)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn default_locale_passes_through_in_as_needed_mode() {
        let decision = policy(PrefixMode::AsNeeded).decide(&request("/dashboard"));
        assert_eq!(
            decision,
            RouteDecision::Pass {
                locale: "en".to_string()
            }
        );
    }

    #[test]
    fn cookie_triggers_redirect_to_prefixed_path() {
        let req = request_with("/dashboard", header::COOKIE, "theme=dark; locale=fr");
        let decision = policy(PrefixMode::AsNeeded).decide(&req);
        assert_eq!(
            decision,
            RouteDecision::Redirect {
                locale: "fr".to_string(),
                location: "/fr/dashboard".to_string(),
            }
        );
    }

    #[test]
    fn accept_language_picks_highest_q_supported_locale() {
        let req = request_with(
            "/dashboard",
            header::ACCEPT_LANGUAGE,
            "es;q=0.9, de-CH;q=0.8, fr;q=0.7",
        );
        let decision = policy(PrefixMode::AsNeeded).decide(&req);
        assert_eq!(
            decision,
            RouteDecision::Redirect {
                locale: "de".to_string(),
                location: "/de/dashboard".to_string(),
            }
        );
    }

    #[test]
    fn cookie_wins_over_accept_language() {
        let req = Request::builder()
            .uri("/dashboard")
            .header(header::COOKIE, "locale=de")
            .header(header::ACCEPT_LANGUAGE, "fr")
            .body(Body::empty())
            .unwrap();
        let decision = policy(PrefixMode::AsNeeded).decide(&req);
        assert_eq!(
            decision,
            RouteDecision::Redirect {
                locale: "de".to_string(),
                location: "/de/dashboard".to_string(),
            }
        );
    }

    #[test]
    fn unknown_cookie_value_falls_back_to_default() {
        let req = request_with("/pricing", header::COOKIE, "locale=jp");
        let decision = policy(PrefixMode::AsNeeded).decide(&req);
        assert_eq!(
            decision,
            RouteDecision::Pass {
                locale: "en".to_string()
            }
        );
    }

    #[test]
    fn supported_prefix_rewrites_to_stripped_path() {
        let decision = policy(PrefixMode::AsNeeded).decide(&request("/fr/dashboard"));
        assert_eq!(
            decision,
            RouteDecision::Rewrite {
                locale: "fr".to_string(),
                path: "/dashboard".to_string(),
            }
        );
    }

    #[test]
    fn bare_locale_prefix_rewrites_to_root() {
        let decision = policy(PrefixMode::AsNeeded).decide(&request("/fr"));
        assert_eq!(
            decision,
            RouteDecision::Rewrite {
                locale: "fr".to_string(),
                path: "/".to_string(),
            }
        );
    }

    #[test]
    fn default_locale_prefix_redirects_to_unprefixed_form() {
        let decision = policy(PrefixMode::AsNeeded).decide(&request("/en/dashboard"));
        assert_eq!(
            decision,
            RouteDecision::Redirect {
                locale: "en".to_string(),
                location: "/dashboard".to_string(),
            }
        );
    }

    #[test]
    fn always_mode_redirects_unprefixed_default_locale() {
        let decision = policy(PrefixMode::Always).decide(&request("/pricing"));
        assert_eq!(
            decision,
            RouteDecision::Redirect {
                locale: "en".to_string(),
                location: "/en/pricing".to_string(),
            }
        );
    }

    #[test]
    fn always_mode_keeps_default_locale_prefix() {
        let decision = policy(PrefixMode::Always).decide(&request("/en/pricing"));
        assert_eq!(
            decision,
            RouteDecision::Rewrite {
                locale: "en".to_string(),
                path: "/pricing".to_string(),
            }
        );
    }

    #[test]
    fn never_mode_strips_any_locale_prefix() {
        let decision = policy(PrefixMode::Never).decide(&request("/fr/dashboard"));
        assert_eq!(
            decision,
            RouteDecision::Redirect {
                locale: "fr".to_string(),
                location: "/dashboard".to_string(),
            }
        );
    }

    #[test]
    fn never_mode_passes_with_detected_locale() {
        let req = request_with("/dashboard", header::COOKIE, "locale=fr");
        let decision = policy(PrefixMode::Never).decide(&req);
        assert_eq!(
            decision,
            RouteDecision::Pass {
                locale: "fr".to_string()
            }
        );
    }

    #[test]
    fn query_string_survives_redirects() {
        let req = request_with("/search?q=rust&page=2", header::COOKIE, "locale=fr");
        let decision = policy(PrefixMode::AsNeeded).decide(&req);
        assert_eq!(
            decision,
            RouteDecision::Redirect {
                locale: "fr".to_string(),
                location: "/fr/search?q=rust&page=2".to_string(),
            }
        );
    }

    #[test]
    fn prefix_match_is_case_insensitive_with_canonical_output() {
        let decision = policy(PrefixMode::AsNeeded).decide(&request("/FR/dashboard"));
        assert_eq!(
            decision,
            RouteDecision::Rewrite {
                locale: "fr".to_string(),
                path: "/dashboard".to_string(),
            }
        );
    }

    #[test]
    fn region_tag_falls_back_to_primary_subtag() {
        let req = request_with("/dashboard", header::ACCEPT_LANGUAGE, "fr-CA");
        let decision = policy(PrefixMode::AsNeeded).decide(&req);
        assert_eq!(
            decision,
            RouteDecision::Redirect {
                locale: "fr".to_string(),
                location: "/fr/dashboard".to_string(),
            }
        );
    }

    #[test]
    fn wildcard_and_zero_q_entries_are_ignored() {
        let req = request_with("/dashboard", header::ACCEPT_LANGUAGE, "*, fr;q=0");
        let decision = policy(PrefixMode::AsNeeded).decide(&req);
        assert_eq!(
            decision,
            RouteDecision::Pass {
                locale: "en".to_string()
            }
        );
    }

    #[test]
    fn unsupported_languages_fall_back_to_default() {
        let req = request_with("/dashboard", header::ACCEPT_LANGUAGE, "ja, ko;q=0.8");
        let decision = policy(PrefixMode::AsNeeded).decide(&req);
        assert_eq!(
            decision,
            RouteDecision::Pass {
                locale: "en".to_string()
            }
        );
    }
}
