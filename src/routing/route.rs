//! Route and route table definitions.
//!
//! # Responsibilities
//! - Declare path patterns and the view tree each one renders
//! - Attach optional pre-render guards
//! - Hold the ordered table shared read-only across requests

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::render::ViewTree;

/// Parameters extracted from a matched path pattern, keyed by segment name.
pub type Params = BTreeMap<String, String>;

/// Decision returned by a route guard before any preload or render work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardResult {
    /// Proceed into the render pipeline.
    Continue,
    /// Redirect to the given path instead of rendering.
    Redirect(String),
}

/// A pre-render guard: pure function of the extracted params.
pub type Guard = Arc<dyn Fn(&Params) -> GuardResult + Send + Sync>;

/// A single route: path pattern, view tree, optional guard.
///
/// Patterns are matched segment-wise. `:name` captures a named parameter,
/// a trailing `*` captures the remainder of the path under the `splat` key.
#[derive(Clone)]
pub struct Route {
    /// Route identifier for logging.
    pub name: String,

    /// Raw path pattern (e.g. `/trips/:id`).
    pub pattern: String,

    /// View tree rendered when this route matches.
    pub view: ViewTree,

    /// Optional guard, evaluated strictly before preload and render.
    pub guard: Option<Guard>,
}

impl Route {
    /// Create a route with no guard.
    pub fn new(name: impl Into<String>, pattern: impl Into<String>, view: ViewTree) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            view,
            guard: None,
        }
    }

    /// Attach a guard to this route.
    pub fn with_guard<F>(mut self, guard: F) -> Self
    where
        F: Fn(&Params) -> GuardResult + Send + Sync + 'static,
    {
        self.guard = Some(Arc::new(guard));
        self
    }
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("name", &self.name)
            .field("pattern", &self.pattern)
            .field("guarded", &self.guard.is_some())
            .finish()
    }
}

/// Ordered route table, evaluated first-match-wins.
///
/// Built once at startup and shared via `Arc`; never mutated afterwards.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Build a table from routes in priority order.
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// Routes in match order.
    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    /// Number of routes in the table.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// True if the table has no routes.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
