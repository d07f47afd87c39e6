//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (default locale is a supported locale)
//! - Validate value shapes (locale identifiers, exclusion patterns)
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::AppConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("no supported locales configured")]
    NoLocales,

    #[error("default locale {0:?} is not in the supported list")]
    UnknownDefault(String),

    #[error("duplicate locale {0:?}")]
    DuplicateLocale(String),

    #[error("invalid locale identifier {0:?}")]
    InvalidLocale(String),

    #[error("exclusion pattern {0:?} must start with '/'")]
    RelativePattern(String),

    #[error("request timeout must be greater than zero")]
    ZeroTimeout,

    #[error("admin console enabled without an api key")]
    MissingAdminKey,

    #[error("invalid metrics address {0:?}")]
    InvalidMetricsAddress(String),

    #[error("invalid log level {0:?}")]
    InvalidLogLevel(String),
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.locale.supported.is_empty() {
        errors.push(ValidationError::NoLocales);
    }

    for locale in &config.locale.supported {
        if !is_valid_locale(locale) {
            errors.push(ValidationError::InvalidLocale(locale.clone()));
        }
    }

    for (i, locale) in config.locale.supported.iter().enumerate() {
        if config.locale.supported[..i]
            .iter()
            .any(|other| other.eq_ignore_ascii_case(locale))
        {
            errors.push(ValidationError::DuplicateLocale(locale.clone()));
        }
    }

    if !config.locale.supported.is_empty()
        && !config
            .locale
            .supported
            .iter()
            .any(|l| l.eq_ignore_ascii_case(&config.locale.default))
    {
        errors.push(ValidationError::UnknownDefault(config.locale.default.clone()));
    }

    for pattern in &config.matcher.exclude_prefixes {
        if !pattern.starts_with('/') {
            errors.push(ValidationError::RelativePattern(pattern.clone()));
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.admin.enabled && config.admin.api_key.trim().is_empty() {
        errors.push(ValidationError::MissingAdminKey);
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if !matches!(
        config.observability.log_level.as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    ) {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// A locale identifier is a BCP 47-ish tag: a 2-3 letter primary subtag,
/// optionally followed by dash-separated alphanumeric subtags.
fn is_valid_locale(locale: &str) -> bool {
    let mut subtags = locale.split('-');

    let primary = match subtags.next() {
        Some(p) => p,
        None => return false,
    };
    if !(2..=3).contains(&primary.len()) || !primary.chars().all(|c| c.is_ascii_alphabetic()) {
        return false;
    }

    subtags.all(|s| (1..=8).contains(&s.len()) && s.chars().all(|c| c.is_ascii_alphanumeric()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::AppConfig;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&AppConfig::default()).is_ok());
    }

    #[test]
    fn rejects_unknown_default_locale() {
        let mut config = AppConfig::default();
        config.locale.default = "jp".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::UnknownDefault("jp".to_string())));
    }

    #[test]
    fn rejects_duplicate_locales_case_insensitively() {
        let mut config = AppConfig::default();
        config.locale.supported = vec!["en".into(), "fr".into(), "EN".into()];
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::DuplicateLocale("EN".to_string())));
    }

    #[test]
    fn rejects_malformed_locale_identifiers() {
        let mut config = AppConfig::default();
        config.locale.supported = vec!["en".into(), "e".into(), "en_US".into()];
        config.locale.default = "en".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::InvalidLocale("e".to_string())));
        assert!(errors.contains(&ValidationError::InvalidLocale("en_US".to_string())));
    }

    #[test]
    fn accepts_region_subtags() {
        assert!(is_valid_locale("pt-BR"));
        assert!(is_valid_locale("zh-Hant-TW"));
        assert!(!is_valid_locale("toolong-locale-subtag-x"));
    }

    #[test]
    fn rejects_relative_exclusion_patterns() {
        let mut config = AppConfig::default();
        config.matcher.exclude_prefixes = vec!["api".to_string()];
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::RelativePattern("api".to_string())));
    }

    #[test]
    fn collects_multiple_errors() {
        let mut config = AppConfig::default();
        config.locale.supported.clear();
        config.timeouts.request_secs = 0;
        config.admin.enabled = true;
        config.admin.api_key = "  ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
