//! Deterministic HTML rendering of view trees.
//!
//! # Responsibilities
//! - Walk the view tree depth-first, resolving bindings against the store
//! - Escape all interpolated text
//! - Surface binding failures as errors instead of emitting partial markup
//!
//! # Design Decisions
//! - Attributes render in declaration order for byte-stable output
//! - Void elements (br, img, ...) close without a closing tag
//! - Scalar bindings only; a binding that hits a list or object is an error

use serde_json::Value;
use thiserror::Error;

use crate::render::view::ViewTree;
use crate::state::Store;

/// Failure while producing markup from a matched view tree.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("no state value at pointer `{0}`")]
    MissingBinding(String),

    #[error("state value at pointer `{0}` is not renderable as text")]
    NonScalarBinding(String),

    #[error("`each` pointer `{0}` does not reference a list")]
    NotAList(String),
}

/// Markup renderer over a view tree and a request store.
pub trait Render: Send + Sync {
    /// Render the tree against the store. Same tree and same state snapshot
    /// must produce identical bytes; the store is never mutated.
    fn render(&self, view: &ViewTree, store: &Store) -> Result<String, RenderError>;
}

/// Built-in HTML renderer.
pub struct HtmlRenderer;

const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

impl Render for HtmlRenderer {
    fn render(&self, view: &ViewTree, store: &Store) -> Result<String, RenderError> {
        let mut out = String::new();
        render_node(view, store.state(), &mut out)?;
        Ok(out)
    }
}

fn render_node(node: &ViewTree, scope: &Value, out: &mut String) -> Result<(), RenderError> {
    match node {
        ViewTree::Text(text) => {
            out.push_str(&escape(text));
        }
        ViewTree::Binding { pointer } => {
            let value = scope
                .pointer(pointer)
                .ok_or_else(|| RenderError::MissingBinding(pointer.clone()))?;
            out.push_str(&escape(&scalar_text(pointer, value)?));
        }
        ViewTree::Each { pointer, body } => {
            let items = scope
                .pointer(pointer)
                .ok_or_else(|| RenderError::MissingBinding(pointer.clone()))?
                .as_array()
                .ok_or_else(|| RenderError::NotAList(pointer.clone()))?;
            for item in items {
                render_node(body, item, out)?;
            }
        }
        ViewTree::Element {
            tag,
            attrs,
            children,
        } => {
            out.push('<');
            out.push_str(tag);
            for (name, value) in attrs {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                out.push_str(&escape(value));
                out.push('"');
            }
            out.push('>');
            if VOID_ELEMENTS.contains(&tag.as_str()) {
                return Ok(());
            }
            for child in children {
                render_node(child, scope, out)?;
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
    }
    Ok(())
}

fn scalar_text(pointer: &str, value: &Value) -> Result<String, RenderError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        Value::Array(_) | Value::Object(_) => {
            Err(RenderError::NonScalarBinding(pointer.to_string()))
        }
    }
}

pub(crate) fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{create_store, Reducer};
    use serde_json::{json, Map};
    use std::sync::Arc;

    fn identity() -> Reducer {
        Arc::new(|state, _| state)
    }

    fn store_with(key: &str, value: Value) -> Store {
        let mut m = Map::new();
        m.insert(key.to_string(), value);
        create_store(identity(), m)
    }

    #[test]
    fn renders_elements_text_and_attrs() {
        let view = ViewTree::element("div", vec![ViewTree::text("hi")]).attr("class", "app");
        let store = store_with("unused", json!(null));
        let html = HtmlRenderer.render(&view, &store).unwrap();
        assert_eq!(html, r#"<div class="app">hi</div>"#);
    }

    #[test]
    fn bindings_resolve_against_state() {
        let view = ViewTree::binding("/title");
        let store = store_with("title", json!("Trips & Friends"));
        let html = HtmlRenderer.render(&view, &store).unwrap();
        assert_eq!(html, "Trips &amp; Friends");
    }

    #[test]
    fn each_iterates_list_items_in_order() {
        let view = ViewTree::each(
            "/trips",
            ViewTree::element("li", vec![ViewTree::binding("/label")]),
        );
        let store = store_with(
            "trips",
            json!([{ "label": "First" }, { "label": "Second" }]),
        );
        let html = HtmlRenderer.render(&view, &store).unwrap();
        assert_eq!(html, "<li>First</li><li>Second</li>");
    }

    #[test]
    fn missing_binding_is_an_error() {
        let view = ViewTree::binding("/absent");
        let store = store_with("present", json!(1));
        assert_eq!(
            HtmlRenderer.render(&view, &store),
            Err(RenderError::MissingBinding("/absent".to_string()))
        );
    }

    #[test]
    fn non_scalar_binding_is_an_error() {
        let view = ViewTree::binding("/trips");
        let store = store_with("trips", json!([1, 2]));
        assert_eq!(
            HtmlRenderer.render(&view, &store),
            Err(RenderError::NonScalarBinding("/trips".to_string()))
        );
    }

    #[test]
    fn rendering_is_deterministic() {
        let view = ViewTree::element(
            "ul",
            vec![ViewTree::each(
                "/trips",
                ViewTree::element("li", vec![ViewTree::binding("/likes")]),
            )],
        );
        let store = store_with("trips", json!([{ "likes": 1 }, { "likes": 2 }]));
        let first = HtmlRenderer.render(&view, &store).unwrap();
        let second = HtmlRenderer.render(&view, &store).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn void_elements_have_no_closing_tag() {
        let view = ViewTree::element("br", vec![]);
        let store = store_with("unused", json!(null));
        assert_eq!(HtmlRenderer.render(&view, &store).unwrap(), "<br>");
    }
}
