//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the proxy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Route definitions mapping path prefixes to upstream APIs.
    pub routes: Vec<RouteConfig>,

    /// Static file surface for paths that match no route.
    pub static_files: StaticFilesConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            routes: default_routes(),
            static_files: StaticFilesConfig::default(),
            timeouts: TimeoutConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Route configuration mapping a path prefix to an upstream base URL.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Route identifier for logging, metrics, and error messages.
    pub name: String,

    /// Inbound path prefix to match (e.g., "/api/gamma").
    pub path_prefix: String,

    /// Absolute base URL of the upstream API.
    pub upstream_base: String,

    /// Cache-control hint attached to proxied responses.
    pub cache: CacheControlConfig,
}

impl RouteConfig {
    /// Resolve the outbound URL for a matched request.
    ///
    /// The remaining path is appended verbatim to the upstream base, and the
    /// inbound query string is carried over untouched.
    pub fn target_url(&self, rest: &str, query: Option<&str>) -> String {
        let base = self.upstream_base.trim_end_matches('/');
        let rest = rest.trim_start_matches('/');
        let mut url = format!("{base}/{rest}");
        if let Some(query) = query {
            url.push('?');
            url.push_str(query);
        }
        url
    }
}

/// Cache freshness hint, relayed to intermediary caches via a header.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheControlConfig {
    /// Seconds the response may be served fresh from a shared cache.
    pub fresh_secs: u64,

    /// Seconds a stale response may be served while revalidating.
    pub stale_secs: u64,
}

impl CacheControlConfig {
    /// Render the directive as a Cache-Control header value.
    pub fn header_value(&self) -> String {
        format!(
            "s-maxage={}, stale-while-revalidate={}",
            self.fresh_secs, self.stale_secs
        )
    }
}

/// Static file serving configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// Serve files for unmatched paths.
    pub enabled: bool,

    /// Directory files are served from.
    pub root: std::path::PathBuf,
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            root: std::path::PathBuf::from("."),
        }
    }
}

/// Timeout configuration for inbound and outbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Total time allowed for an inbound request in seconds.
    pub request_secs: u64,

    /// Connection establishment timeout for upstream calls in seconds.
    pub connect_secs: u64,

    /// Total timeout for a single upstream call in seconds.
    pub upstream_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            connect_secs: 5,
            upstream_secs: 10,
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

/// The two production upstream routes, used when no config file is given.
pub fn default_routes() -> Vec<RouteConfig> {
    vec![
        RouteConfig {
            name: "gamma".to_string(),
            path_prefix: "/api/gamma".to_string(),
            upstream_base: "https://gamma-api.polymarket.com".to_string(),
            cache: CacheControlConfig {
                fresh_secs: 60,
                stale_secs: 300,
            },
        },
        RouteConfig {
            name: "binance".to_string(),
            path_prefix: "/api/binance".to_string(),
            upstream_base: "https://api.binance.com".to_string(),
            cache: CacheControlConfig {
                fresh_secs: 30,
                stale_secs: 120,
            },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gamma() -> RouteConfig {
        default_routes().remove(0)
    }

    #[test]
    fn test_target_url_joins_path() {
        let route = gamma();
        assert_eq!(
            route.target_url("/markets", None),
            "https://gamma-api.polymarket.com/markets"
        );
    }

    #[test]
    fn test_target_url_preserves_query() {
        let route = gamma();
        assert_eq!(
            route.target_url("/markets", Some("limit=5")),
            "https://gamma-api.polymarket.com/markets?limit=5"
        );
    }

    #[test]
    fn test_target_url_empty_rest() {
        let route = gamma();
        assert_eq!(
            route.target_url("", None),
            "https://gamma-api.polymarket.com/"
        );
    }

    #[test]
    fn test_target_url_base_trailing_slash() {
        let mut route = gamma();
        route.upstream_base = "https://gamma-api.polymarket.com/".to_string();
        assert_eq!(
            route.target_url("/markets", None),
            "https://gamma-api.polymarket.com/markets"
        );
    }

    #[test]
    fn test_cache_header_value() {
        let cache = CacheControlConfig {
            fresh_secs: 60,
            stale_secs: 300,
        };
        assert_eq!(
            cache.header_value(),
            "s-maxage=60, stale-while-revalidate=300"
        );
    }
}
