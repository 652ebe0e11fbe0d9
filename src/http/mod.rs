//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, landing / asset / fallback routes)
//!     → request.rs (request ID injection)
//!     → dispatch (SSR state machine for the catch-all route)
//!     → views.rs (final response body for landing and rendered pages)
//!     → proxy.rs (development-mode asset forwarding, bypasses dispatch)
//! ```

pub mod proxy;
pub mod request;
pub mod server;
pub mod views;

pub use request::{RequestIdLayer, X_REQUEST_ID};
pub use server::HttpServer;
pub use views::{HtmlShell, ViewEngine, ViewError};
