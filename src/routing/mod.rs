//! Route table and request matching subsystem.
//!
//! # Data Flow
//! ```text
//! request path (+ query string)
//!     → matcher.rs (walk route table in order)
//!     → guard evaluation (may redirect before any data work)
//!     → MatchResult { Redirect | Matched | Error | NoMatch }
//! ```
//!
//! # Design Decisions
//! - Route table is immutable after startup (thread-safe without locks)
//! - First match wins; table order is the priority order
//! - Guards are pure functions, never closures over request state
//! - Pattern errors surface as an explicit Error variant, distinct from NoMatch

pub mod matcher;
pub mod route;

pub use matcher::{match_route, MatchError, MatchResult, RouteMatch};
pub use route::{Guard, GuardResult, Params, Route, RouteTable};
