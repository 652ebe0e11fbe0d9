//! Preload data resolution subsystem.
//!
//! # Data Flow
//! ```text
//! request path
//!     → resolver.rs (lookup in finite path → generator table)
//!     → Map<String, Value> merged into the request's initial state
//! ```
//!
//! # Design Decisions
//! - Pure lookup, no I/O; unknown paths resolve to an empty mapping
//! - Generators are plain fns so resolution is trivially idempotent
//! - Mapping preserves insertion order for stable serialization

pub mod resolver;

pub use resolver::{PreloadFn, PreloadResolver};
