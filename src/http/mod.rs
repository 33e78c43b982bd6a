//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, dispatch)
//!     → middleware/ (CORS headers, preflight short-circuit)
//!     → request.rs (request ID)
//!     → [route table picks upstream] → upstream call
//!     → static_files.rs (unmatched paths)
//!     → Send to client
//! ```

pub mod middleware;
pub mod request;
pub mod server;
pub mod static_files;

pub use request::{RequestIdLayer, X_REQUEST_ID};
pub use server::HttpServer;
