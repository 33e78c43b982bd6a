//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store compiled routes
//! - Look up matching route for a request path
//! - Return matched route plus path remainder, or explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) prefix scan (two routes in practice)
//! - Longest prefix wins; deterministic for any route order

use crate::config::RouteConfig;
use crate::routing::matcher::PathPrefixMatcher;

/// A route with its compiled matcher.
#[derive(Debug)]
struct CompiledRoute {
    matcher: PathPrefixMatcher,
    route: RouteConfig,
}

/// The result of a successful route lookup.
#[derive(Debug)]
pub struct RouteMatch<'a> {
    /// The matched route configuration.
    pub route: &'a RouteConfig,
    /// Path remainder after the prefix, empty or starting with '/'.
    pub rest: &'a str,
}

/// Immutable route table, compiled once at startup.
#[derive(Debug)]
pub struct Router {
    routes: Vec<CompiledRoute>,
}

impl Router {
    /// Compile a route table from configuration.
    pub fn from_config(routes: Vec<RouteConfig>) -> Self {
        let mut compiled: Vec<CompiledRoute> = routes
            .into_iter()
            .map(|route| CompiledRoute {
                matcher: PathPrefixMatcher::new(route.path_prefix.clone()),
                route,
            })
            .collect();

        // Longest prefix first, so "/api/gamma/books" would win over "/api/gamma".
        compiled.sort_by(|a, b| b.matcher.len().cmp(&a.matcher.len()));

        Self { routes: compiled }
    }

    /// Find the route matching a request path.
    pub fn match_path<'a>(&'a self, path: &'a str) -> Option<RouteMatch<'a>> {
        self.routes.iter().find_map(|compiled| {
            compiled.matcher.strip(path).map(|rest| RouteMatch {
                route: &compiled.route,
                rest,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::default_routes;
    use crate::config::CacheControlConfig;

    #[test]
    fn test_matches_configured_routes() {
        let router = Router::from_config(default_routes());

        let m = router.match_path("/api/gamma/markets").unwrap();
        assert_eq!(m.route.name, "gamma");
        assert_eq!(m.rest, "/markets");

        let m = router.match_path("/api/binance/api/v3/ticker/price").unwrap();
        assert_eq!(m.route.name, "binance");
        assert_eq!(m.rest, "/api/v3/ticker/price");
    }

    #[test]
    fn test_no_match_for_static_paths() {
        let router = Router::from_config(default_routes());
        assert!(router.match_path("/index.html").is_none());
        assert!(router.match_path("/api/other").is_none());
    }

    #[test]
    fn test_longest_prefix_wins() {
        let mut routes = default_routes();
        routes.push(RouteConfig {
            name: "gamma-events".to_string(),
            path_prefix: "/api/gamma/events".to_string(),
            upstream_base: "https://events.example.com".to_string(),
            cache: CacheControlConfig {
                fresh_secs: 10,
                stale_secs: 60,
            },
        });
        // Insertion order must not matter.
        routes.rotate_left(1);

        let router = Router::from_config(routes);
        let m = router.match_path("/api/gamma/events/123").unwrap();
        assert_eq!(m.route.name, "gamma-events");
        assert_eq!(m.rest, "/123");
    }
}
