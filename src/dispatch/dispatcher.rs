//! The SSR dispatch state machine.

use std::sync::Arc;

use crate::preload::PreloadResolver;
use crate::render::Render;
use crate::routing::{match_route, MatchResult, RouteTable};
use crate::state::{create_store, Reducer};

/// Body used for internal render failures; never carries renderer detail.
const RENDER_FAILURE_BODY: &str = "Internal Server Error";

/// Terminal outcome of dispatching one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Successful render: markup plus the serialized state snapshot.
    Rendered { markup: String, state: String },

    /// A route guard redirected; `location` includes the search string.
    Redirect { location: String },

    /// No route matched and no catch-all exists.
    NotFound,

    /// Match or render failure; `message` is the HTTP 500 body.
    Failed { message: String },
}

/// Orchestrates match → preload → store → render for each request.
///
/// Holds only read-only shared collaborators; every request gets its own
/// store and its own outcome value.
pub struct Dispatcher {
    table: Arc<RouteTable>,
    resolver: Arc<PreloadResolver>,
    reducer: Reducer,
    renderer: Arc<dyn Render>,
}

impl Dispatcher {
    pub fn new(
        table: Arc<RouteTable>,
        resolver: Arc<PreloadResolver>,
        reducer: Reducer,
        renderer: Arc<dyn Render>,
    ) -> Self {
        Self {
            table,
            resolver,
            reducer,
            renderer,
        }
    }

    /// Run the full pipeline for one request URI (path plus optional query).
    pub fn dispatch(&self, request_uri: &str) -> DispatchOutcome {
        let path = request_uri.split('?').next().unwrap_or(request_uri);

        let matched = match match_route(&self.table, request_uri) {
            MatchResult::Error(err) => {
                tracing::error!(path, error = %err, "route matching failed");
                return DispatchOutcome::Failed {
                    message: err.to_string(),
                };
            }
            MatchResult::Redirect { location } => {
                tracing::debug!(path, location = %location, "guard redirect");
                return DispatchOutcome::Redirect { location };
            }
            MatchResult::NoMatch => {
                tracing::debug!(path, "no route matched");
                return DispatchOutcome::NotFound;
            }
            MatchResult::Matched(matched) => matched,
        };

        let preload = self.resolver.resolve(path);
        let store = create_store(self.reducer.clone(), preload);

        match self.renderer.render(&matched.route.view, &store) {
            Ok(markup) => {
                let snapshot = store.snapshot();
                match serde_json::to_string(&snapshot) {
                    Ok(state) => {
                        tracing::debug!(path, route = %matched.route.name, "rendered");
                        DispatchOutcome::Rendered { markup, state }
                    }
                    Err(err) => {
                        tracing::error!(path, error = %err, "state serialization failed");
                        DispatchOutcome::Failed {
                            message: RENDER_FAILURE_BODY.to_string(),
                        }
                    }
                }
            }
            Err(err) => {
                // Render detail goes to the log, never to the client.
                tracing::error!(path, route = %matched.route.name, error = %err, "render failed");
                DispatchOutcome::Failed {
                    message: RENDER_FAILURE_BODY.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{HtmlRenderer, RenderError, ViewTree};
    use crate::routing::{GuardResult, Route};
    use crate::state::Store;
    use serde_json::{json, Map, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingRenderer {
        calls: AtomicUsize,
        inner: HtmlRenderer,
    }

    impl Render for CountingRenderer {
        fn render(&self, view: &ViewTree, store: &Store) -> Result<String, RenderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.render(view, store)
        }
    }

    fn identity() -> Reducer {
        Arc::new(|state, _| state)
    }

    fn numbers_preload() -> Map<String, Value> {
        let mut m = Map::new();
        m.insert("numbers".to_string(), json!([1, 2, 3]));
        m
    }

    fn dispatcher_with(routes: Vec<Route>, renderer: Arc<dyn Render>) -> Dispatcher {
        Dispatcher::new(
            Arc::new(RouteTable::new(routes)),
            Arc::new(PreloadResolver::new().register("/numbers", numbers_preload)),
            identity(),
            renderer,
        )
    }

    #[test]
    fn unmatched_path_is_not_found() {
        let d = dispatcher_with(
            vec![Route::new("numbers", "/numbers", ViewTree::text("n"))],
            Arc::new(HtmlRenderer),
        );
        assert_eq!(d.dispatch("/elsewhere"), DispatchOutcome::NotFound);
    }

    #[test]
    fn guard_redirect_skips_rendering() {
        let renderer = Arc::new(CountingRenderer {
            calls: AtomicUsize::new(0),
            inner: HtmlRenderer,
        });
        let d = dispatcher_with(
            vec![Route::new("old", "/old", ViewTree::text("x"))
                .with_guard(|_| GuardResult::Redirect("/new".to_string()))],
            renderer.clone(),
        );
        assert_eq!(
            d.dispatch("/old?keep=1"),
            DispatchOutcome::Redirect {
                location: "/new?keep=1".to_string()
            }
        );
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn match_error_forwards_the_message() {
        let d = dispatcher_with(
            vec![Route::new("bad", "/x/:", ViewTree::text("x"))],
            Arc::new(HtmlRenderer),
        );
        match d.dispatch("/x/1") {
            DispatchOutcome::Failed { message } => {
                assert!(message.contains("parameter segment with no name"))
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn render_failure_yields_generic_message() {
        let d = dispatcher_with(
            vec![Route::new("broken", "/broken", ViewTree::binding("/absent"))],
            Arc::new(HtmlRenderer),
        );
        match d.dispatch("/broken") {
            DispatchOutcome::Failed { message } => {
                assert_eq!(message, "Internal Server Error");
                assert!(!message.contains("absent"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn rendered_state_round_trips_the_store_snapshot() {
        let d = dispatcher_with(
            vec![Route::new(
                "numbers",
                "/numbers",
                ViewTree::each("/numbers", ViewTree::binding("")),
            )],
            Arc::new(HtmlRenderer),
        );
        match d.dispatch("/numbers") {
            DispatchOutcome::Rendered { markup, state } => {
                assert_eq!(markup, "123");
                let parsed: Value = serde_json::from_str(&state).unwrap();
                let expected = create_store(identity(), numbers_preload()).snapshot();
                assert_eq!(parsed, expected);
            }
            other => panic!("expected render, got {other:?}"),
        }
    }

    #[test]
    fn preload_is_scoped_to_the_request_path() {
        let d = dispatcher_with(
            vec![
                Route::new(
                    "numbers",
                    "/numbers",
                    ViewTree::each("/numbers", ViewTree::binding("")),
                ),
                Route::new("empty", "/empty", ViewTree::text("-")),
            ],
            Arc::new(HtmlRenderer),
        );
        match d.dispatch("/empty") {
            DispatchOutcome::Rendered { state, .. } => assert_eq!(state, "{}"),
            other => panic!("expected render, got {other:?}"),
        }
    }
}
