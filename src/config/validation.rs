//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check route prefixes and upstream URLs
//! - Validate value ranges (timeouts > 0)
//! - Detect conflicting routes
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function over the config
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use thiserror::Error;
use url::Url;

use crate::config::schema::ProxyConfig;

/// A single semantic problem found in a config.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("no routes configured")]
    NoRoutes,

    #[error("route at index {0} has an empty name")]
    EmptyRouteName(usize),

    #[error("route '{0}': path_prefix '{1}' must start with '/'")]
    InvalidPrefix(String, String),

    #[error("route '{0}': upstream_base '{1}' is not a valid absolute URL: {2}")]
    InvalidUpstream(String, String, url::ParseError),

    #[error("route '{0}': upstream_base '{1}' must use http or https")]
    UnsupportedScheme(String, String),

    #[error("duplicate path_prefix '{0}'")]
    DuplicatePrefix(String),

    #[error("timeout '{0}' must be greater than zero")]
    ZeroTimeout(&'static str),
}

/// Validate a parsed config, collecting every problem found.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.routes.is_empty() {
        errors.push(ValidationError::NoRoutes);
    }

    let mut seen_prefixes = HashSet::new();
    for (index, route) in config.routes.iter().enumerate() {
        if route.name.is_empty() {
            errors.push(ValidationError::EmptyRouteName(index));
        }

        if !route.path_prefix.starts_with('/') {
            errors.push(ValidationError::InvalidPrefix(
                route.name.clone(),
                route.path_prefix.clone(),
            ));
        }

        match Url::parse(&route.upstream_base) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    errors.push(ValidationError::UnsupportedScheme(
                        route.name.clone(),
                        route.upstream_base.clone(),
                    ));
                }
            }
            Err(e) => {
                errors.push(ValidationError::InvalidUpstream(
                    route.name.clone(),
                    route.upstream_base.clone(),
                    e,
                ));
            }
        }

        if !seen_prefixes.insert(route.path_prefix.clone()) {
            errors.push(ValidationError::DuplicatePrefix(route.path_prefix.clone()));
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("request_secs"));
    }
    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("connect_secs"));
    }
    if config.timeouts.upstream_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("upstream_secs"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ProxyConfig::default()).is_ok());
    }

    #[test]
    fn test_empty_routes_rejected() {
        let mut config = ProxyConfig::default();
        config.routes.clear();
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::NoRoutes));
    }

    #[test]
    fn test_bad_prefix_and_url_both_reported() {
        let mut config = ProxyConfig::default();
        config.routes[0].path_prefix = "api/gamma".to_string();
        config.routes[1].upstream_base = "not a url".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_duplicate_prefix_rejected() {
        let mut config = ProxyConfig::default();
        config.routes[1].path_prefix = config.routes[0].path_prefix.clone();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::DuplicatePrefix(_))));
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        let mut config = ProxyConfig::default();
        config.routes[0].upstream_base = "ftp://example.com".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::UnsupportedScheme(_, _))));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = ProxyConfig::default();
        config.timeouts.upstream_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::ZeroTimeout("upstream_secs"))));
    }
}
