//! Typed read-only view over a parsed configuration document.
//!
//! All getters share one policy: a key that is absent returns the
//! caller-supplied default, and a key that is present but cannot be coerced to
//! the requested type returns the default as well. The second half is a
//! deliberate convention: a wrong-shaped value behaves exactly like a missing
//! one, so callers only ever reason about "usable value or my fallback".

use std::collections::HashMap;
use std::time::Duration;

use config::{Value, ValueKind};
use serde::de::DeserializeOwned;

use crate::coerce;
use crate::error::LoadError;

/// Read-only query facade over one parsed document.
///
/// Keys are dotted paths into the document tree (`"namespace1.key1"`).
/// Default arguments accept either a bare value or `None`:
///
/// ```
/// use confetch::{ConfigSource, StaticSource};
///
/// let view = StaticSource::new("retries: 4").load().unwrap();
/// assert_eq!(view.get_as_int("retries", None), Some(4));
/// assert_eq!(view.get_as_int("missing", 7), Some(7));
/// ```
#[derive(Debug, Clone)]
pub struct ConfigView {
    doc: config::Config,
}

impl ConfigView {
    pub(crate) fn new(doc: config::Config) -> Self {
        Self { doc }
    }

    /// Whether the document has a value at `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.raw(key).is_some()
    }

    /// Value at `key` formatted as text. Scalars (numbers, bools) coerce to
    /// their textual form; lists and maps do not.
    pub fn get(&self, key: &str, default: impl Into<Option<String>>) -> Option<String> {
        self.raw(key)
            .and_then(|value| value.into_string().ok())
            .or_else(|| default.into())
    }

    /// Value at `key` as an integer. Textual values that parse as integers
    /// coerce; anything malformed returns the default, never zero.
    pub fn get_as_int(&self, key: &str, default: impl Into<Option<i64>>) -> Option<i64> {
        self.raw(key)
            .and_then(|value| value.into_int().ok())
            .or_else(|| default.into())
    }

    /// Value at `key` as an ordered sequence of integers. The value must be a
    /// sequence and every element must coerce; otherwise the default is
    /// returned (same malformed-value policy as [`get_as_int`](Self::get_as_int)).
    pub fn get_as_int_slice(
        &self,
        key: &str,
        default: impl Into<Option<Vec<i64>>>,
    ) -> Option<Vec<i64>> {
        let default = default.into();
        let Some(value) = self.raw(key) else {
            return default;
        };
        let Ok(items) = value.into_array() else {
            return default;
        };

        let mut ints = Vec::with_capacity(items.len());
        for item in items {
            match item.into_int() {
                Ok(int) => ints.push(int),
                Err(_) => return default,
            }
        }
        Some(ints)
    }

    /// Value at `key` as a boolean. The value's textual form must be the
    /// literal `true` or `false` (ASCII case-insensitive); anything else
    /// returns the default.
    pub fn get_as_bool(&self, key: &str, default: impl Into<Option<bool>>) -> Option<bool> {
        let default = default.into();
        let Some(text) = self.raw(key).and_then(|value| value.into_string().ok()) else {
            return default;
        };
        if text.eq_ignore_ascii_case("true") {
            Some(true)
        } else if text.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            default
        }
    }

    /// Value at `key` as a duration, parsed with [`coerce::parse_duration`]
    /// (`30s`, `5m`, `2h`; a bare number means seconds).
    pub fn get_as_duration(
        &self,
        key: &str,
        default: impl Into<Option<Duration>>,
    ) -> Option<Duration> {
        self.raw(key)
            .and_then(|value| value.into_string().ok())
            .and_then(|text| coerce::parse_duration(&text))
            .or_else(|| default.into())
    }

    /// Value at `key` as a sequence of string-to-string maps.
    ///
    /// Entries that are not maps are skipped, as are map pairs whose value is
    /// not a string, and maps left empty after filtering. An absent key or an
    /// empty result yields an empty vec, never an error.
    pub fn get_as_slice_of_maps(&self, key: &str) -> Vec<HashMap<String, String>> {
        let Some(value) = self.raw(key) else {
            return Vec::new();
        };
        let Ok(items) = value.into_array() else {
            return Vec::new();
        };

        let mut maps = Vec::new();
        for item in items {
            let Ok(table) = item.into_table() else {
                continue;
            };
            let mut entry = HashMap::new();
            for (map_key, map_value) in table {
                if let ValueKind::String(text) = map_value.kind {
                    entry.insert(map_key, text);
                }
            }
            if !entry.is_empty() {
                maps.push(entry);
            }
        }
        maps
    }

    /// Extract the whole document into a typed struct.
    pub fn try_deserialize<T: DeserializeOwned>(&self) -> Result<T, LoadError> {
        Ok(self.doc.clone().try_deserialize()?)
    }

    fn raw(&self, key: &str) -> Option<Value> {
        self.doc.get::<Value>(key).ok()
    }
}
