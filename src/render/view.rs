//! Declarative view tree descriptors.
//!
//! A `ViewTree` is the opaque payload a route carries: the renderer walks
//! it against the request's store to produce markup. Bindings address state
//! with JSON pointers; inside `Each`, pointers resolve against the current
//! list item.

/// A node in a route's view tree.
#[derive(Debug, Clone)]
pub enum ViewTree {
    /// An element with attributes and children.
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
        children: Vec<ViewTree>,
    },

    /// Literal text, escaped on output.
    Text(String),

    /// Text interpolated from the state at a JSON pointer (e.g. `/trips/0/label`).
    Binding { pointer: String },

    /// Repeat `body` once per item of the list at `pointer`; bindings inside
    /// `body` resolve against the item.
    Each { pointer: String, body: Box<ViewTree> },
}

impl ViewTree {
    pub fn element(tag: impl Into<String>, children: Vec<ViewTree>) -> Self {
        ViewTree::Element {
            tag: tag.into(),
            attrs: Vec::new(),
            children,
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        ViewTree::Text(value.into())
    }

    pub fn binding(pointer: impl Into<String>) -> Self {
        ViewTree::Binding {
            pointer: pointer.into(),
        }
    }

    pub fn each(pointer: impl Into<String>, body: ViewTree) -> Self {
        ViewTree::Each {
            pointer: pointer.into(),
            body: Box::new(body),
        }
    }

    /// Add an attribute; only meaningful on `Element` nodes.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let ViewTree::Element { attrs, .. } = &mut self {
            attrs.push((name.into(), value.into()));
        }
        self
    }
}
