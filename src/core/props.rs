//! Generic keyed property storage.
//!
//! Engine-wide ad hoc state (turn counters, configuration flags) and
//! per-definition custom data both live in a `PropMap`: a string-keyed,
//! last-write-wins map of tagged values. Typed reads return `Option` so
//! an absent key or a type mismatch fails predictably instead of being
//! silently papered over; `*_or` variants supply a default for callers
//! that want one.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A tagged property value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PropValue {
    /// Integer value (counters, ids, costs).
    Int(i64),
    /// Float value (rates, multipliers).
    Float(f64),
    /// Text value (tags, labels).
    Text(String),
    /// Boolean flag.
    Bool(bool),
}

impl PropValue {
    /// Get as integer if this is an `Int` value.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            PropValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as float if this is a `Float` value.
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            PropValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as string reference if this is a `Text` value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get as bool if this is a `Bool` value.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropValue::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<i64> for PropValue {
    fn from(v: i64) -> Self {
        PropValue::Int(v)
    }
}

impl From<i32> for PropValue {
    fn from(v: i32) -> Self {
        PropValue::Int(v as i64)
    }
}

impl From<f64> for PropValue {
    fn from(v: f64) -> Self {
        PropValue::Float(v)
    }
}

impl From<bool> for PropValue {
    fn from(v: bool) -> Self {
        PropValue::Bool(v)
    }
}

impl From<String> for PropValue {
    fn from(v: String) -> Self {
        PropValue::Text(v)
    }
}

impl From<&str> for PropValue {
    fn from(v: &str) -> Self {
        PropValue::Text(v.to_string())
    }
}

/// How a typed write combines with the existing value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropChange {
    /// Overwrite the previous value.
    Set,
    /// Combine with the previous value: numeric addition for ints and
    /// floats, concatenation for text. An absent or differently typed
    /// previous value counts as the type's zero value.
    Add,
}

/// String-keyed, last-write-wins property map.
///
/// ## Example
///
/// ```
/// use card_engine::core::{PropChange, PropMap};
///
/// let mut props = PropMap::new();
/// props.set("turn", 1);
/// props.apply_int("turn", PropChange::Add, 1);
/// assert_eq!(props.int("turn"), Some(2));
/// assert_eq!(props.text("turn"), None); // wrong type reads as absent
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PropMap {
    values: FxHashMap<String, PropValue>,
}

impl PropMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property, overwriting any previous value or type.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<PropValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Get the raw tagged value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PropValue> {
        self.values.get(name)
    }

    /// Remove a property, returning its previous value.
    pub fn remove(&mut self, name: &str) -> Option<PropValue> {
        self.values.remove(name)
    }

    /// Typed integer read. `None` when absent or not an `Int`.
    #[must_use]
    pub fn int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(PropValue::as_int)
    }

    /// Integer read with a default.
    #[must_use]
    pub fn int_or(&self, name: &str, default: i64) -> i64 {
        self.int(name).unwrap_or(default)
    }

    /// Typed float read. `None` when absent or not a `Float`.
    #[must_use]
    pub fn float(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(PropValue::as_float)
    }

    /// Float read with a default.
    #[must_use]
    pub fn float_or(&self, name: &str, default: f64) -> f64 {
        self.float(name).unwrap_or(default)
    }

    /// Typed text read. `None` when absent or not `Text`.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(PropValue::as_text)
    }

    /// Typed bool read. `None` when absent or not a `Bool`.
    #[must_use]
    pub fn bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(PropValue::as_bool)
    }

    /// Bool read with a default.
    #[must_use]
    pub fn bool_or(&self, name: &str, default: bool) -> bool {
        self.bool(name).unwrap_or(default)
    }

    /// Typed integer write with set/add semantics.
    pub fn apply_int(&mut self, name: &str, change: PropChange, value: i64) {
        let next = match change {
            PropChange::Set => value,
            PropChange::Add => self.int_or(name, 0) + value,
        };
        self.set(name, next);
    }

    /// Typed float write with set/add semantics.
    pub fn apply_float(&mut self, name: &str, change: PropChange, value: f64) {
        let next = match change {
            PropChange::Set => value,
            PropChange::Add => self.float_or(name, 0.0) + value,
        };
        self.set(name, next);
    }

    /// Typed text write with set/append semantics.
    pub fn apply_text(&mut self, name: &str, change: PropChange, value: &str) {
        let next = match change {
            PropChange::Set => value.to_string(),
            PropChange::Add => {
                let mut s = self.text(name).unwrap_or("").to_string();
                s.push_str(value);
                s
            }
        };
        self.set(name, next);
    }

    /// Number of stored properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check whether the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over name/value pairs (unordered).
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_typed_get() {
        let mut props = PropMap::new();
        props.set("count", 3);
        props.set("rate", 0.5);
        props.set("label", "deck");
        props.set("active", true);

        assert_eq!(props.int("count"), Some(3));
        assert_eq!(props.float("rate"), Some(0.5));
        assert_eq!(props.text("label"), Some("deck"));
        assert_eq!(props.bool("active"), Some(true));
    }

    #[test]
    fn test_absent_and_mismatch_read_as_none() {
        let mut props = PropMap::new();
        props.set("count", 3);

        assert_eq!(props.int("missing"), None);
        assert_eq!(props.text("count"), None);
        assert_eq!(props.int_or("missing", 9), 9);
        assert_eq!(props.float_or("count", 1.5), 1.5);
    }

    #[test]
    fn test_last_write_wins_across_types() {
        let mut props = PropMap::new();
        props.set("x", 1);
        props.set("x", "now text");

        assert_eq!(props.int("x"), None);
        assert_eq!(props.text("x"), Some("now text"));
    }

    #[test]
    fn test_apply_int_add() {
        let mut props = PropMap::new();
        props.apply_int("turn", PropChange::Add, 1);
        props.apply_int("turn", PropChange::Add, 1);
        assert_eq!(props.int("turn"), Some(2));

        props.apply_int("turn", PropChange::Set, 10);
        assert_eq!(props.int("turn"), Some(10));
    }

    #[test]
    fn test_apply_add_over_mismatched_type() {
        let mut props = PropMap::new();
        props.set("turn", "not a number");

        // Mismatched previous value counts as zero, then gets overwritten.
        props.apply_int("turn", PropChange::Add, 5);
        assert_eq!(props.int("turn"), Some(5));
    }

    #[test]
    fn test_apply_float_and_text() {
        let mut props = PropMap::new();
        props.apply_float("speed", PropChange::Add, 0.25);
        props.apply_float("speed", PropChange::Add, 0.25);
        assert_eq!(props.float("speed"), Some(0.5));

        props.apply_text("log", PropChange::Add, "a");
        props.apply_text("log", PropChange::Add, "b");
        assert_eq!(props.text("log"), Some("ab"));

        props.apply_text("log", PropChange::Set, "c");
        assert_eq!(props.text("log"), Some("c"));
    }

    #[test]
    fn test_serde_round_trip() {
        let mut props = PropMap::new();
        props.set("count", 3);
        props.set("label", "deck");

        let json = serde_json::to_string(&props).unwrap();
        let back: PropMap = serde_json::from_str(&json).unwrap();
        assert_eq!(props, back);
    }
}
