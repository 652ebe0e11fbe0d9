//! Server-side rendering dispatch gateway.
//!
//! # Architecture Overview
//!
//! ```text
//! request path
//!     → routing (table walk, guards, redirects)
//!     → preload (path-keyed data)
//!     → state (per-request store from reducer + preload)
//!     → render (deterministic markup from the view tree)
//!     → dispatch (outcome per request)
//!     → http (response assembly, landing view, dev asset proxy)
//! ```
//!
//! The route table, preload resolver, reducer and renderer are read-only
//! after startup and injected into the dispatcher; every request owns its
//! store and produces exactly one outcome.

// Core subsystems
pub mod config;
pub mod dispatch;
pub mod http;
pub mod preload;
pub mod render;
pub mod routing;
pub mod state;

// Application wiring
pub mod app;

// Cross-cutting concerns
pub mod observability;

pub use config::GatewayConfig;
pub use dispatch::{DispatchOutcome, Dispatcher};
pub use http::HttpServer;
