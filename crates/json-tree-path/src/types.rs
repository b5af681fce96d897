//! Type definitions for tree paths.

use std::fmt;

use serde_json::Value;

/// A step in a tree path.
///
/// Object members are addressed by string, array positions (and any other
/// integer-keyed children) by index. Keys order all indices before all
/// strings; this is the order canonical serialized entries are sorted in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Index(u64),
    Str(String),
}

/// A path from the tree root. The empty path is the root itself.
pub type Path = Vec<Key>;

impl Key {
    /// Returns the string form if this is a string key.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Str(s) => Some(s),
            Key::Index(_) => None,
        }
    }

    /// Returns the index if this is an index key.
    pub fn as_index(&self) -> Option<u64> {
        match self {
            Key::Index(i) => Some(*i),
            Key::Str(_) => None,
        }
    }

    /// Interpret the key as an array position.
    ///
    /// String keys qualify when they are a canonical decimal index
    /// (`"0"`, `"17"`, but not `"01"` or `"-1"`).
    pub fn to_index(&self) -> Option<usize> {
        match self {
            Key::Index(i) => usize::try_from(*i).ok(),
            Key::Str(s) if crate::is_valid_index(s) => s.parse().ok(),
            Key::Str(_) => None,
        }
    }

    /// The property name this key addresses in a JSON object.
    pub fn to_property(&self) -> String {
        match self {
            Key::Str(s) => s.clone(),
            Key::Index(i) => i.to_string(),
        }
    }

    /// Encode as a JSON value: strings stay strings, indices become numbers.
    pub fn to_json(&self) -> Value {
        match self {
            Key::Str(s) => Value::String(s.clone()),
            Key::Index(i) => Value::from(*i),
        }
    }

    /// Decode a JSON string or non-negative integer into a key.
    pub fn from_json(value: &Value) -> Option<Key> {
        match value {
            Value::String(s) => Some(Key::Str(s.clone())),
            Value::Number(n) => n.as_u64().map(Key::Index),
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Str(s) => f.write_str(s),
            Key::Index(i) => write!(f, "{i}"),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(s.to_owned())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Str(s)
    }
}

impl From<u64> for Key {
    fn from(i: u64) -> Self {
        Key::Index(i)
    }
}

impl From<usize> for Key {
    fn from(i: usize) -> Self {
        Key::Index(u64::try_from(i).unwrap_or(u64::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn indices_sort_before_strings() {
        let mut keys = vec![Key::from("b"), Key::Index(10), Key::from("a"), Key::Index(2)];
        keys.sort();
        assert_eq!(keys, vec![Key::Index(2), Key::Index(10), Key::from("a"), Key::from("b")]);
    }

    #[test]
    fn to_index_accepts_canonical_digits_only() {
        assert_eq!(Key::Index(3).to_index(), Some(3));
        assert_eq!(Key::from(7usize), Key::Index(7));
        assert_eq!(Key::from("12").to_index(), Some(12));
        assert_eq!(Key::from("012").to_index(), None);
        assert_eq!(Key::from("x").to_index(), None);
    }

    #[test]
    fn json_encoding() {
        assert_eq!(Key::from("a").to_json(), json!("a"));
        assert_eq!(Key::Index(4).to_json(), json!(4));
        assert_eq!(Key::from_json(&json!(4)), Some(Key::Index(4)));
        assert_eq!(Key::from_json(&json!("4")), Some(Key::from("4")));
        assert_eq!(Key::from_json(&json!(-1)), None);
        assert_eq!(Key::from_json(&json!(1.5)), None);
        assert_eq!(Key::from_json(&json!(null)), None);
    }

    #[test]
    fn display() {
        assert_eq!(Key::from("idk").to_string(), "idk");
        assert_eq!(Key::Index(7).to_string(), "7");
    }
}
