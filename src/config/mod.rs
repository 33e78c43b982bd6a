//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the route table is fixed at startup
//! - All fields have defaults so the binary runs with no config file at all
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::CacheControlConfig;
pub use schema::ListenerConfig;
pub use schema::ProxyConfig;
pub use schema::RouteConfig;
pub use schema::StaticFilesConfig;
pub use schema::TimeoutConfig;
