//! Per-request state container subsystem.
//!
//! # Data Flow
//! ```text
//! preload mapping
//!     → store.rs (shallow merge over empty base, one init reduction)
//!     → Store owned by exactly one request
//!     → snapshot() serialized into the response for hydration
//! ```
//!
//! # Design Decisions
//! - One store per request; never shared, never persisted
//! - The reducer is an opaque pure `(state, action) -> state` function,
//!   the only cross-request shared piece besides the route table
//! - No locking: single-owner access by construction

pub mod store;

pub use store::{create_store, Reducer, Store, INIT_ACTION};
