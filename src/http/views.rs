//! View-rendering collaborator.
//!
//! # Responsibilities
//! - Turn a logical view name plus a data bag into a response body
//! - Own document framing; the dispatch core only supplies named fields
//!
//! # Design Decisions
//! - The `landing` view consumes `{layout, title}`; the `index` view
//!   consumes `{preloadedState, reactHTML}` — exactly the dispatch contract
//! - Serialized state is embedded with `<` escaped so the JSON can never
//!   close the script element early

use serde_json::{Map, Value};
use thiserror::Error;

use crate::render::html::escape;

/// Failure while producing a response body from a view.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("unknown view `{0}`")]
    UnknownView(String),

    #[error("view `{view}` is missing variable `{var}`")]
    MissingVar { view: String, var: String },
}

/// Resolves logical view names to response bodies.
pub trait ViewEngine: Send + Sync {
    fn render_view(&self, name: &str, vars: &Map<String, Value>) -> Result<String, ViewError>;
}

/// Built-in HTML shell implementing the `landing` and `index` views.
pub struct HtmlShell;

impl ViewEngine for HtmlShell {
    fn render_view(&self, name: &str, vars: &Map<String, Value>) -> Result<String, ViewError> {
        match name {
            "landing" => {
                let layout = string_var("landing", vars, "layout")?;
                let title = string_var("landing", vars, "title")?;
                Ok(format!(
                    "<!doctype html><html><head><meta charset=\"utf-8\">\
                     <title>{title}</title></head>\
                     <body class=\"{layout}\"><h1>{title}</h1>\
                     <p>Welcome to {title}</p></body></html>",
                    title = escape(title),
                    layout = escape(layout),
                ))
            }
            "index" => {
                let state = string_var("index", vars, "preloadedState")?;
                let markup = string_var("index", vars, "reactHTML")?;
                Ok(format!(
                    "<!doctype html><html><head><meta charset=\"utf-8\">\
                     <title>App</title></head>\
                     <body><div id=\"app\">{markup}</div>\
                     <script>window.__PRELOADED_STATE__ = {state};</script>\
                     <script src=\"/build/bundle.js\"></script></body></html>",
                    markup = markup,
                    state = state.replace('<', "\\u003c"),
                ))
            }
            other => Err(ViewError::UnknownView(other.to_string())),
        }
    }
}

fn string_var<'a>(
    view: &str,
    vars: &'a Map<String, Value>,
    var: &str,
) -> Result<&'a str, ViewError> {
    vars.get(var)
        .and_then(Value::as_str)
        .ok_or_else(|| ViewError::MissingVar {
            view: view.to_string(),
            var: var.to_string(),
        })
}
