//! Per-request SSR dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! request URI
//!     → routing (match, guards)
//!     → { Redirect | MatchError | NotFound } terminal outcomes
//!     → preload resolution
//!     → store construction
//!     → render + snapshot
//!     → DispatchOutcome handed to the HTTP layer
//! ```
//!
//! # Design Decisions
//! - All collaborators are injected at construction, no module singletons
//! - Exactly one outcome per request; failures never cross requests
//! - Match errors forward their message; render errors map to a generic
//!   message so partial markup never leaks

pub mod dispatcher;

pub use dispatcher::{DispatchOutcome, Dispatcher};
