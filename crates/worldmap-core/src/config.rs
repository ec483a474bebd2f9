// crates/worldmap-core/src/config.rs

//! # Configuration Store
//!
//! A nested key-value tree addressed with dotted paths (`"map.zoom.max"`).
//! Absence is normal: every reader supplies its own default at the call
//! site, and no error is raised for a missing path.

use crate::error::{MapError, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::Path;

/// The defaults shipped with the crate.
pub const DEFAULT_CONFIG_JSON: &str = include_str!("../data/config.json");

static DEFAULT_TREE: Lazy<Value> = Lazy::new(|| {
    serde_json::from_str(DEFAULT_CONFIG_JSON).unwrap_or_else(|e| {
        log::error!("embedded config.json is not valid JSON: {e}");
        Value::Object(Map::new())
    })
});

/// Process-wide settings, loaded once and mutated only through [`Config::set`].
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    root: Value,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: DEFAULT_TREE.clone(),
        }
    }
}

impl Config {
    /// An empty tree. Every lookup falls back to the caller's default.
    pub fn empty() -> Self {
        Self {
            root: Value::Object(Map::new()),
        }
    }

    /// Wraps an existing JSON tree.
    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// Defaults overlaid with the given JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let overlay: Value = serde_json::from_str(json)?;
        if !overlay.is_object() {
            return Err(MapError::Config(
                "top-level configuration must be an object".into(),
            ));
        }
        let mut cfg = Self::default();
        cfg.merge(overlay);
        Ok(cfg)
    }

    /// Defaults overlaid with a JSON file on disk.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            MapError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&text)
    }

    /// The raw node at `path`, if every segment exists.
    ///
    /// ```
    /// use worldmap_core::config::Config;
    ///
    /// let cfg = Config::default();
    /// assert_eq!(cfg.get("map.zoom.max").and_then(|v| v.as_u64()), Some(19));
    /// assert!(cfg.get("map.zoom.nope").is_none());
    /// ```
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut node = &self.root;
        for key in path.split('.') {
            node = node.as_object()?.get(key)?;
        }
        Some(node)
    }

    /// The value at `path` deserialized as `T`, or `default` when the path is
    /// missing or the node has a different shape.
    pub fn get_or<T: DeserializeOwned>(&self, path: &str, default: T) -> T {
        match self.get(path) {
            Some(v) => T::deserialize(v).unwrap_or(default),
            None => default,
        }
    }

    /// Convenience for UI strings.
    pub fn text(&self, path: &str, default: &str) -> String {
        self.get(path)
            .and_then(Value::as_str)
            .unwrap_or(default)
            .to_string()
    }

    /// Overwrites the leaf at `path`, creating intermediate objects as needed.
    /// Any non-object node in the way is replaced by an empty object.
    pub fn set(&mut self, path: &str, value: Value) {
        let keys: Vec<&str> = path.split('.').collect();
        let Some((leaf, parents)) = keys.split_last() else {
            return;
        };

        let mut node = &mut self.root;
        for key in parents {
            node = ensure_object(node)
                .entry((*key).to_string())
                .or_insert_with(|| Value::Object(Map::new()));
        }
        ensure_object(node).insert((*leaf).to_string(), value.clone());
        log::debug!("config updated: {path} = {value}");
    }

    /// Deep-merges `overlay` into this tree. Objects merge key by key,
    /// everything else replaces what was there.
    pub fn merge(&mut self, overlay: Value) {
        merge_into(&mut self.root, overlay);
    }

    /// The whole tree.
    pub fn as_value(&self) -> &Value {
        &self.root
    }
}

fn ensure_object(node: &mut Value) -> &mut Map<String, Value> {
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    match node {
        Value::Object(map) => map,
        _ => unreachable!("node was just replaced by an object"),
    }
}

fn merge_into(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(over_map)) => {
            for (k, v) in over_map {
                match base_map.get_mut(&k) {
                    Some(existing) => merge_into(existing, v),
                    None => {
                        base_map.insert(k, v);
                    }
                }
            }
        }
        (slot, v) => *slot = v,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_carry_the_map_settings() {
        let cfg = Config::default();
        assert_eq!(cfg.get_or("map.initialView.center", [0.0, 0.0]), [20.0, 0.0]);
        assert_eq!(cfg.get_or("search.timeout", 0u64), 3000);
        assert_eq!(cfg.get_or("countries.smallCountryThreshold", 0.0), 0.5);
        assert_eq!(cfg.get_or("countries.normalCountryPadding", [0u32; 2]), [30, 30]);
    }

    #[test]
    fn missing_or_untraversable_paths_yield_the_default() {
        let cfg = Config::default();
        assert_eq!(cfg.get_or("nope.deeper", 7), 7);
        // "map.zoom.max" is a number, so it cannot be traversed further
        assert_eq!(cfg.get_or("map.zoom.max.inner", 3), 3);
        // wrong shape falls back as well
        assert_eq!(cfg.get_or("ui.title", 42), 42);
    }

    #[test]
    fn set_creates_intermediate_nodes() {
        let mut cfg = Config::empty();
        cfg.set("a.b.c", json!(1));
        assert_eq!(cfg.get("a.b.c"), Some(&json!(1)));

        // a scalar in the way is replaced by an object
        cfg.set("a.b.c.d", json!("x"));
        assert_eq!(cfg.get("a.b.c.d"), Some(&json!("x")));
    }

    #[test]
    fn set_overwrites_leaf() {
        let mut cfg = Config::default();
        cfg.set("search.timeout", json!(500));
        assert_eq!(cfg.get_or("search.timeout", 0u64), 500);
        assert_eq!(cfg.get_or("search.limit", 0usize), 8);
    }

    #[test]
    fn overlay_merges_deeply() {
        let cfg = Config::from_json_str(r#"{"search": {"limit": 3}}"#).unwrap();
        assert_eq!(cfg.get_or("search.limit", 0usize), 3);
        assert_eq!(cfg.get_or("search.timeout", 0u64), 3000);
    }

    #[test]
    fn overlay_must_be_an_object() {
        assert!(matches!(
            Config::from_json_str("[1, 2]"),
            Err(MapError::Config(_))
        ));
    }
}
