//! Request-scoped state store built from a reducer and preload data.

use std::sync::Arc;

use serde_json::{json, Map, Value};

/// Action type dispatched once when a store is created.
pub const INIT_ACTION: &str = "@@gateway/INIT";

/// Opaque pure state-transition function: `(state, action) -> state`.
///
/// The core never inspects the action vocabulary; it only requires the
/// function to be deterministic and free of observable side effects.
pub type Reducer = Arc<dyn Fn(Value, &Value) -> Value + Send + Sync>;

/// Single-owner holder of one request's application state.
pub struct Store {
    reducer: Reducer,
    state: Value,
}

/// Build a fresh store for one request.
///
/// The initial state is a shallow merge of an empty base object with the
/// preload mapping (later keys override earlier ones), then reduced once
/// with the init action.
pub fn create_store(reducer: Reducer, preload: Map<String, Value>) -> Store {
    let mut initial = Map::new();
    for (key, value) in preload {
        initial.insert(key, value);
    }
    let init = json!({ "type": INIT_ACTION });
    let state = (reducer)(Value::Object(initial), &init);
    Store { reducer, state }
}

impl Store {
    /// Current state value.
    pub fn state(&self) -> &Value {
        &self.state
    }

    /// Apply the reducer to the current state with the given action.
    pub fn dispatch(&mut self, action: &Value) {
        let current = std::mem::replace(&mut self.state, Value::Null);
        self.state = (self.reducer)(current, action);
    }

    /// Owned copy of the current state, ready for serialization.
    pub fn snapshot(&self) -> Value {
        self.state.clone()
    }
}
