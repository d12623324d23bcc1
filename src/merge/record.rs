// src/merge/record.rs
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Column name of the field the merger adds to every row.
pub const CONTINENT_FIELD: &str = "Continent";

/// Continent assigned when a row's code has no entry in the lookup.
pub const UNKNOWN_CONTINENT: &str = "Unknown";

/// One population row plus its resolved continent, as ordered `(column, value)` pairs.
///
/// Serializes as a JSON object whose keys keep insertion order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PopulationRecord {
    fields: Vec<(String, String)>,
}

impl PopulationRecord {
    /// Start a record whose first field is `Continent`.
    pub fn with_continent(continent: impl Into<String>) -> Self {
        Self {
            fields: vec![(CONTINENT_FIELD.to_string(), continent.into())],
        }
    }

    /// Set `key` to `value`. An existing key keeps its position and takes the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn continent(&self) -> Option<&str> {
        self.get(CONTINENT_FIELD)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Serialize for PopulationRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
