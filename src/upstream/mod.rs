//! Upstream forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! Matched request (route, method, path remainder, query)
//!     → client.rs (resolve target URL, single outbound call)
//!     → upstream JSON body parsed
//!     → Return: ForwardedResponse (status + body, or synthesized 500)
//! ```
//!
//! # Design Decisions
//! - Exactly one outbound call per inbound request; no retries
//! - All upstream failures collapse into one opaque 500 for the client
//! - Timeouts come from config; the transport default alone is not trusted

pub mod client;

pub use client::{ForwardedResponse, Forwarder, UpstreamError};
