//! Extra-properties store.
//!
//! Ordered name/value side-map an instance uses to retain JSON properties
//! its declared shape does not bind. Keys are unique and keep their
//! first-seen position; capturing an existing key overwrites the value in
//! place. Values are opaque `serde_json::Value`s, so nested unknown
//! structures pass through untouched (the crate enables `preserve_order`,
//! which keeps key order inside them as well).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Insertion-order-preserving map of unrecognized properties.
///
/// Created empty per instance and owned exclusively by it. Not
/// synchronized; a single document is expected to populate it from a
/// single thread.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtraProperties(Map<String, Value>);

impl ExtraProperties {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Record one unrecognized property. Last write for a key wins; the
    /// key keeps the position of its first capture.
    pub fn capture(&mut self, name: impl Into<String>, value: Value) {
        self.0.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Property names in capture order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    /// Name/value pairs in capture order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for ExtraProperties {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl IntoIterator for ExtraProperties {
    type Item = (String, Value);
    type IntoIter = <Map<String, Value> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ExtraProperties {
    type Item = (&'a String, &'a Value);
    type IntoIter = <&'a Map<String, Value> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        (&self.0).into_iter()
    }
}
