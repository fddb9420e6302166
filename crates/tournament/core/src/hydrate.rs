//! Field-by-field extraction from loosely shaped JSON objects.
//!
//! Records are stored by other front-end code that never validated them, so
//! hydration takes what it understands and leaves everything else in the
//! remainder map. A field is only consumed when it has the expected type.

use serde_json::{Map, Value};

pub(crate) struct Fields {
    map: Map<String, Value>,
}

impl Fields {
    /// Returns `None` unless `value` is a JSON object.
    pub(crate) fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self { map }),
            _ => None,
        }
    }

    pub(crate) fn empty() -> Self {
        Self { map: Map::new() }
    }

    /// Take `key` if `convert` accepts its value; otherwise leave it in place.
    pub(crate) fn take_with<T>(
        &mut self,
        key: &str,
        convert: impl FnOnce(&Value) -> Option<T>,
    ) -> Option<T> {
        let converted = self.map.get(key).and_then(convert)?;
        self.map.remove(key);
        Some(converted)
    }

    pub(crate) fn take_string(&mut self, key: &str) -> Option<String> {
        self.take_with(key, |value| value.as_str().map(str::to_owned))
    }

    /// Drop `key` regardless of its type.
    pub(crate) fn discard(&mut self, key: &str) {
        self.map.remove(key);
    }

    pub(crate) fn into_remainder(self) -> Map<String, Value> {
        self.map
    }
}
