//! CORS relay proxy for market-data and exchange APIs.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod upstream;

pub use config::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
