//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path)
//!     → router.rs (route lookup)
//!     → matcher.rs (prefix match, remainder extraction)
//!     → Return: matched Route + path remainder, or NoMatch
//!
//! Route Compilation (at startup):
//!     RouteConfig[]
//!     → Sort by prefix length (longest first)
//!     → Freeze as immutable Router
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: same input always matches same route

pub mod matcher;
pub mod router;

pub use router::{RouteMatch, Router};
