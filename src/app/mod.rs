//! Built-in application wiring: route table, reducer, preload data.
//!
//! Everything here is plain data handed to the dispatcher at startup; the
//! dispatch core treats all of it as opaque plug-ins.

use std::sync::Arc;

use serde_json::{json, Map, Value};

use crate::preload::PreloadResolver;
use crate::render::ViewTree;
use crate::routing::{GuardResult, Route, RouteTable};
use crate::state::Reducer;

/// The ordered route table, loaded once at startup.
pub fn route_table() -> RouteTable {
    RouteTable::new(vec![
        Route::new("trips", "/trips", trips_view()),
        Route::new("trip-detail", "/trips/:id", trip_detail_view()),
        // Legacy path kept alive as a redirect.
        Route::new("home", "/home", ViewTree::text(""))
            .with_guard(|_| GuardResult::Redirect("/trips".to_string())),
    ])
}

/// Preload data source, keyed by exact request path.
pub fn preload_resolver() -> PreloadResolver {
    PreloadResolver::new().register("/trips", trips_preload)
}

/// Application reducer. Unknown actions leave the state untouched.
pub fn reducer() -> Reducer {
    Arc::new(|state, _action| state)
}

fn trips_preload() -> Map<String, Value> {
    let mut data = Map::new();
    data.insert(
        "trips".to_string(),
        json!([
            { "id": 1, "label": "First trip", "likes": 1 },
            { "id": 2, "label": "Second trip!", "likes": 2 },
            { "id": 3, "label": "Third trip", "likes": 3 },
        ]),
    );
    data
}

fn trips_view() -> ViewTree {
    ViewTree::element(
        "ul",
        vec![ViewTree::each(
            "/trips",
            ViewTree::element(
                "li",
                vec![
                    ViewTree::element("span", vec![ViewTree::binding("/label")])
                        .attr("class", "trip-label"),
                    ViewTree::text(" · "),
                    ViewTree::element("span", vec![ViewTree::binding("/likes")])
                        .attr("class", "trip-likes"),
                ],
            ),
        )],
    )
    .attr("class", "trips")
}

fn trip_detail_view() -> ViewTree {
    ViewTree::element(
        "section",
        vec![ViewTree::text("Trip details load on the client.")],
    )
    .attr("class", "trip-detail")
}
