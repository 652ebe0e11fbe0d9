//! Path-keyed preload data lookup.

use serde_json::{Map, Value};

/// Generator producing the preload mapping for one path.
pub type PreloadFn = fn() -> Map<String, Value>;

/// Resolves request paths to preload data from a finite, explicit table.
///
/// Resolution is side-effect free: calling it any number of times with the
/// same path yields identical values.
#[derive(Default)]
pub struct PreloadResolver {
    entries: Vec<(String, PreloadFn)>,
}

impl PreloadResolver {
    /// Create an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a generator for an exact path.
    pub fn register(mut self, path: impl Into<String>, generator: PreloadFn) -> Self {
        self.entries.push((path.into(), generator));
        self
    }

    /// Resolve preload data for a path. Unknown paths yield an empty mapping.
    pub fn resolve(&self, path: &str) -> Map<String, Value> {
        self.entries
            .iter()
            .find(|(p, _)| p.as_str() == path)
            .map(|(_, generator)| generator())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Map<String, Value> {
        let mut m = Map::new();
        m.insert("answer".to_string(), json!(42));
        m
    }

    #[test]
    fn known_path_resolves_to_registered_data() {
        let resolver = PreloadResolver::new().register("/answers", sample);
        let data = resolver.resolve("/answers");
        assert_eq!(data.get("answer"), Some(&json!(42)));
    }

    #[test]
    fn unknown_path_resolves_to_empty_mapping() {
        let resolver = PreloadResolver::new().register("/answers", sample);
        assert!(resolver.resolve("/nowhere").is_empty());
    }

    #[test]
    fn resolution_is_idempotent() {
        let resolver = PreloadResolver::new().register("/answers", sample);
        assert_eq!(resolver.resolve("/answers"), resolver.resolve("/answers"));
    }
}
