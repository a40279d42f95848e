//! Tracked JSON object

use std::fmt;

use indexmap::IndexMap;
use serde_json::{Map, Value as Json};

use super::{key_path, Entry, TrackedArray};
use crate::coerce::{ensure_scalar_request, FromValue};
use crate::error::Result;
use crate::value::{Value, ValueKind};

/// A JSON object whose entries remember how often they were read.
///
/// Typed reads go through `&self` and bump the entry's counter only when the
/// value coerces. Nested containers are owned by their entry, so
/// [`get_object`](Self::get_object) hands back the same instance every time
/// and the nested counters persist between lookups.
///
/// Keys keep insertion order for stable serialization; lookups and equality
/// ignore order.
///
/// # Example
///
/// ```
/// use jsontally::{TrackedObject, Visited};
///
/// let config = TrackedObject::parse(r#"{"name": "reef", "depth": 12, "typo": 1}"#)?;
///
/// assert_eq!(config.get::<String>("name")?.as_deref(), Some("reef"));
/// assert_eq!(config.get::<f64>("depth")?, Some(12.0));
///
/// let unread: Vec<String> = config.never_visited().into_iter().collect();
/// assert_eq!(unread, vec!["typo".to_string()]);
/// # Ok::<(), jsontally::JsonTallyError>(())
/// ```
#[derive(Clone, Default)]
pub struct TrackedObject {
    path: String,
    entries: IndexMap<String, Entry>,
}

impl TrackedObject {
    /// Create an empty root object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a serde_json map. Every counter starts at zero.
    pub fn from_json(map: &Map<String, Json>) -> Self {
        Self::from_json_at(map, "")
    }

    pub(crate) fn from_json_at(map: &Map<String, Json>, path: &str) -> Self {
        let entries = map
            .iter()
            .map(|(key, json)| {
                let value = Value::from_json_at(json, &key_path(path, key));
                (key.clone(), Entry::new(value))
            })
            .collect();
        Self {
            path: path.to_string(),
            entries,
        }
    }

    /// Convert to a serde_json object without counting reads.
    pub fn to_json(&self) -> Json {
        Json::Object(
            self.entries
                .iter()
                .map(|(key, entry)| (key.clone(), entry.value.to_json()))
                .collect(),
        )
    }

    /// Location of this object inside its root document; empty for a root.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the object has no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `key` is present. A key holding `null` is present.
    ///
    /// Presence checks never count as a read.
    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Keys and raw values in insertion order, without counting reads.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .map(|(key, entry)| (key.as_str(), &entry.value))
    }

    /// Kind of the value stored under `key`, without counting a read.
    pub fn kind_of(&self, key: &str) -> Option<ValueKind> {
        self.entries.get(key).map(|entry| entry.value.kind())
    }

    /// Read `key` as `T`.
    ///
    /// Returns `Ok(None)` when the key is absent or holds `null`. A present
    /// value that coerces to `T` counts as one read.
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` if the stored value cannot coerce to `T`; the
    /// read is not counted.
    pub fn get<T: FromValue>(&self, key: &str) -> Result<Option<T>> {
        match self.entries.get(key) {
            Some(entry) => entry.read(&self.child_path(key)),
            None => Ok(None),
        }
    }

    /// Read `key` as `T`, substituting `default` when absent or `null`.
    pub fn get_or<T: FromValue>(&self, key: &str, default: T) -> Result<T> {
        Ok(self.get(key)?.unwrap_or(default))
    }

    /// Read `key` coerced to a runtime-chosen scalar kind.
    ///
    /// # Errors
    ///
    /// Returns `IllegalUsage` for `Object`/`Array` before looking at the data,
    /// and `TypeMismatch` if the value cannot coerce.
    pub fn get_kind(&self, kind: ValueKind, key: &str) -> Result<Option<Value>> {
        ensure_scalar_request(kind)?;
        match self.entries.get(key) {
            Some(entry) => entry.read_kind(kind, &self.child_path(key)),
            None => Ok(None),
        }
    }

    /// Handle to the nested object under `key`.
    ///
    /// Repeated calls return the same instance, so reads made through it are
    /// kept. Returns `Ok(None)` for an absent key or a `null` value.
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` if the key holds anything else.
    pub fn get_object(&self, key: &str) -> Result<Option<&TrackedObject>> {
        match self.entries.get(key) {
            Some(entry) => entry.fetch_object(&self.child_path(key)),
            None => Ok(None),
        }
    }

    /// Handle to the nested array under `key`. See [`get_object`](Self::get_object).
    pub fn get_array(&self, key: &str) -> Result<Option<&TrackedArray>> {
        match self.entries.get(key) {
            Some(entry) => entry.fetch_array(&self.child_path(key)),
            None => Ok(None),
        }
    }

    /// Store `value` under `key` with a fresh counter, returning the previous value.
    ///
    /// An existing key keeps its position.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        self.insert_entry(key, Entry::new(value.into()))
            .map(|previous| previous.value)
    }

    /// Remove `key`, returning its value. Remaining keys keep their order.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key).map(|entry| entry.value)
    }

    /// An independent deep copy, counters included.
    pub fn copy(&self) -> TrackedObject {
        self.clone()
    }

    pub(crate) fn insert_entry(&mut self, key: String, mut entry: Entry) -> Option<Entry> {
        entry.value.rebase(key_path(&self.path, &key));
        self.entries.insert(key, entry)
    }

    pub(crate) fn entries(&self) -> &IndexMap<String, Entry> {
        &self.entries
    }

    pub(crate) fn entries_mut(&mut self) -> &mut IndexMap<String, Entry> {
        &mut self.entries
    }

    pub(crate) fn rebase(&mut self, path: String) {
        for (key, entry) in self.entries.iter_mut() {
            entry.value.rebase(key_path(&path, key));
        }
        self.path = path;
    }

    fn child_path(&self, key: &str) -> String {
        key_path(&self.path, key)
    }
}

impl fmt::Debug for TrackedObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl fmt::Display for TrackedObject {
    /// Compact JSON text.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_json(), f)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::JsonTallyError;

    fn sample() -> TrackedObject {
        let json = json!({
            "name": "Australia",
            "area": 7_692_024,
            "nothing": null,
            "capital": {"name": "Canberra"},
            "cities": ["Sydney", "Melbourne"]
        });
        match json {
            Json::Object(map) => TrackedObject::from_json(&map),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_missing_key_is_none() {
        let obj = sample();
        assert_eq!(obj.get::<String>("missing").unwrap(), None);
        assert_eq!(obj.get_or("missing", "Default".to_string()).unwrap(), "Default");
        assert!(obj.get_object("missing").unwrap().is_none());
    }

    #[test]
    fn test_null_is_present_and_reads_as_none() {
        let obj = sample();
        assert!(obj.has("nothing"));
        assert_eq!(obj.kind_of("nothing"), Some(ValueKind::Null));
        assert_eq!(obj.get::<i64>("nothing").unwrap(), None);
        assert_eq!(obj.get_or("nothing", 3i64).unwrap(), 3);
        assert_eq!(obj.entries()["nothing"].reads(), 2);
    }

    #[test]
    fn test_get_coerces_and_counts() {
        let obj = sample();
        assert_eq!(obj.get::<f64>("area").unwrap(), Some(7_692_024.0));
        assert_eq!(obj.get::<String>("area").unwrap().as_deref(), Some("7692024"));
        assert_eq!(obj.entries()["area"].reads(), 2);
    }

    #[test]
    fn test_mismatch_does_not_count() {
        let obj = sample();
        let err = obj.get::<bool>("name").unwrap_err();
        assert!(matches!(err, JsonTallyError::TypeMismatch { ref path, .. } if path == "name"));
        assert_eq!(obj.entries()["name"].reads(), 0);
    }

    #[test]
    fn test_nested_handles_are_stable() {
        let obj = sample();
        let first = obj.get_object("capital").unwrap().unwrap();
        first.get::<String>("name").unwrap();
        let second = obj.get_object("capital").unwrap().unwrap();
        assert!(std::ptr::eq(first, second));
        assert_eq!(second.entries()["name"].reads(), 1);
        assert_eq!(second.path(), "capital");
    }

    #[test]
    fn test_container_kind_mismatch() {
        let obj = sample();
        assert!(matches!(
            obj.get_object("name"),
            Err(JsonTallyError::TypeMismatch {
                expected: ValueKind::Object,
                found: ValueKind::String,
                ..
            })
        ));
        assert!(matches!(
            obj.get_array("capital"),
            Err(JsonTallyError::TypeMismatch { .. })
        ));
        assert!(matches!(
            obj.get::<String>("cities"),
            Err(JsonTallyError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_get_kind_guards_containers() {
        let obj = sample();
        assert!(matches!(
            obj.get_kind(ValueKind::Object, "capital"),
            Err(JsonTallyError::IllegalUsage(_))
        ));
        assert!(matches!(
            obj.get_kind(ValueKind::Array, "missing"),
            Err(JsonTallyError::IllegalUsage(_))
        ));
        assert_eq!(
            obj.get_kind(ValueKind::String, "name").unwrap().and_then(|v| v.as_str().map(str::to_owned)),
            Some("Australia".to_string())
        );
    }

    #[test]
    fn test_nested_error_path() {
        let obj = sample();
        let cities = obj.get_array("cities").unwrap().unwrap();
        let err = cities.get::<f64>(1).unwrap_err();
        assert!(matches!(err, JsonTallyError::TypeMismatch { ref path, .. } if path == "cities[2]"));
    }

    #[test]
    fn test_put_rebases_containers() {
        let mut root = TrackedObject::new();
        let mut child = TrackedObject::new();
        child.put("leaf", true);
        root.put("outer", child);

        let outer = root.get_object("outer").unwrap().unwrap();
        assert_eq!(outer.path(), "outer");
        let err = outer.get::<i32>("leaf").unwrap_err();
        assert!(matches!(err, JsonTallyError::TypeMismatch { ref path, .. } if path == "outer.leaf"));
    }

    #[test]
    fn test_put_replaces_in_place_and_remove_keeps_order() {
        let mut obj = TrackedObject::new();
        obj.put("a", 1);
        obj.put("b", 2);
        obj.put("c", 3);
        assert_eq!(obj.put("a", 10).and_then(|v| v.as_i64()), Some(1));
        assert_eq!(obj.remove("b").and_then(|v| v.as_i64()), Some(2));
        assert_eq!(obj.keys().collect::<Vec<_>>(), vec!["a", "c"]);
        assert!(obj.remove("b").is_none());
    }

    #[test]
    fn test_copy_is_independent() {
        let obj = sample();
        obj.get::<String>("name").unwrap();
        let mut copy = obj.copy();
        assert_eq!(copy.entries()["name"].reads(), 1);

        copy.put("name", "changed");
        copy.get::<f64>("area").unwrap();
        assert_eq!(obj.get::<String>("name").unwrap().as_deref(), Some("Australia"));
        assert_eq!(obj.entries()["area"].reads(), 0);
    }

    #[test]
    fn test_display_is_compact_json() {
        let mut obj = TrackedObject::new();
        obj.put("a", 1);
        obj.put("b", vec!["x"]);
        assert_eq!(obj.to_string(), r#"{"a":1,"b":["x"]}"#);
    }
}
