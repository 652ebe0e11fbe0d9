//! View tree and markup rendering subsystem.
//!
//! # Data Flow
//! ```text
//! matched route's ViewTree + request Store
//!     → html.rs (depth-first walk, bindings resolved against state)
//!     → markup string, byte-for-byte deterministic
//! ```
//!
//! # Design Decisions
//! - Rendering is read-only over the store; it never dispatches actions
//! - Interpolated text is HTML-escaped; raw markup never comes from state
//! - Failures return RenderError to the dispatcher, which owns the
//!   HTTP-level policy for them

pub mod html;
pub mod view;

pub use html::{HtmlRenderer, Render, RenderError};
pub use view::ViewTree;
