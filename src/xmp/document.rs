//! XMP key maps
//!
//! A parsed packet is kept as two maps written in lockstep: `raw`, keyed by
//! the original element or attribute name, and `flattened`, keyed by the
//! camel-cased element path. A key written once holds a single value; the
//! second write turns it into a list and later writes append.

use std::collections::BTreeMap;

use serde::Serialize;

/// A coerced XMP value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum XmpValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl XmpValue {
    /// Numeric view of the value; text is parsed as a float
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            XmpValue::Integer(v) => Some(*v as f64),
            XmpValue::Float(v) => Some(*v),
            XmpValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// One key's value: a scalar until the key repeats
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum XmpEntry {
    Single(XmpValue),
    Multiple(Vec<XmpValue>),
}

impl XmpEntry {
    /// The first value written for the key
    pub fn first(&self) -> Option<&XmpValue> {
        match self {
            XmpEntry::Single(value) => Some(value),
            XmpEntry::Multiple(values) => values.first(),
        }
    }

    /// Number of values written for the key
    pub fn len(&self) -> usize {
        match self {
            XmpEntry::Single(_) => 1,
            XmpEntry::Multiple(values) => values.len(),
        }
    }

    /// Always false: an entry exists only once a value was written
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Key map type shared by `raw` and `flattened`
pub type XmpMap = BTreeMap<String, XmpEntry>;

/// Writes `value` under `key`, promoting repeated keys to a list
pub fn upsert(map: &mut XmpMap, key: String, value: XmpValue) {
    match map.remove(&key) {
        None => {
            map.insert(key, XmpEntry::Single(value));
        }
        Some(XmpEntry::Single(previous)) => {
            map.insert(key, XmpEntry::Multiple(vec![previous, value]));
        }
        Some(XmpEntry::Multiple(mut values)) => {
            values.push(value);
            map.insert(key, XmpEntry::Multiple(values));
        }
    }
}

/// A parsed XMP packet
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct XmpDocument {
    /// Values by original element or attribute name
    pub raw: XmpMap,
    /// Values by camel-cased element path
    pub flattened: XmpMap,
}

impl XmpDocument {
    /// Whether nothing was extracted
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty() && self.flattened.is_empty()
    }

    /// Looks up a flattened key
    pub fn get(&self, key: &str) -> Option<&XmpEntry> {
        self.flattened.get(key)
    }

    /// Looks up a raw key
    pub fn get_raw(&self, key: &str) -> Option<&XmpEntry> {
        self.raw.get(key)
    }

    /// Numeric value of a flattened key (first value if repeated)
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key)?.first()?.as_f64()
    }
}
