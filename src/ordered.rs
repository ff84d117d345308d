use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Keyed collection that remembers the order its keys were declared in.
///
/// Quarter and transition ordering is part of the data contract, so the
/// order is held as an explicit key list next to the lookup table.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V> {
    keys: Vec<String>,
    entries: HashMap<String, V>,
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            entries: HashMap::new(),
        }
    }
}

impl<V> OrderedMap<V> {
    /// Builds a map from `(key, value)` pairs, keeping the first occurrence
    /// order. Returns the offending key if it appears twice.
    pub fn from_entries<I>(entries: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = (String, V)>,
    {
        let mut map = Self::default();
        for (key, value) in entries {
            if map.entries.contains_key(&key) {
                return Err(key);
            }
            map.keys.push(key.clone());
            map.entries.insert(key, value);
        }
        Ok(map)
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    /// Returns the stored key alongside the value, borrowed from the map.
    pub fn get_key_value(&self, key: &str) -> Option<(&str, &V)> {
        self.entries
            .get_key_value(key)
            .map(|(key, value)| (key.as_str(), value))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn first_key(&self) -> Option<&str> {
        self.keys.first().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.keys
            .iter()
            .filter_map(|key| self.entries.get(key).map(|value| (key.as_str(), value)))
    }
}

impl<'de, V> Deserialize<'de> for OrderedMap<V>
where
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

struct OrderedMapVisitor<V>(PhantomData<V>);

impl<'de, V> Visitor<'de> for OrderedMapVisitor<V>
where
    V: Deserialize<'de>,
{
    type Value = OrderedMap<V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a JSON object keyed by identifier")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut pairs = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, V>()? {
            pairs.push((key, value));
        }

        OrderedMap::from_entries(pairs)
            .map_err(|key| de::Error::custom(format!("duplicate key: {key}")))
    }
}

impl<V> Serialize for OrderedMap<V>
where
    V: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::OrderedMap;

    #[test]
    fn deserialize_keeps_document_order() {
        let raw = r#"{"2025Q1": 3, "2024Q3": 1, "2024Q4": 2}"#;
        let map: OrderedMap<u32> = serde_json::from_str(raw).expect("object should parse");

        assert_eq!(map.keys(), ["2025Q1", "2024Q3", "2024Q4"]);
        assert_eq!(map.first_key(), Some("2025Q1"));
        assert_eq!(map.get("2024Q4"), Some(&2));
        let values: Vec<u32> = map.iter().map(|(_, value)| *value).collect();
        assert_eq!(values, vec![3, 1, 2]);
    }

    #[test]
    fn deserialize_rejects_duplicate_keys() {
        let raw = r#"{"Q1": 1, "Q1": 2}"#;
        let err = serde_json::from_str::<OrderedMap<u32>>(raw).expect_err("duplicate must fail");
        assert!(err.to_string().contains("duplicate key: Q1"));
    }

    #[test]
    fn serialize_writes_entries_in_declared_order() {
        let map = OrderedMap::from_entries(vec![("b".to_string(), 1), ("a".to_string(), 2)])
            .expect("unique keys");
        let json = serde_json::to_string(&map).expect("serialize");
        assert_eq!(json, r#"{"b":1,"a":2}"#);
    }

    #[test]
    fn get_key_value_borrows_stored_key() {
        let map: OrderedMap<u32> =
            serde_json::from_str(r#"{"2024Q3": 1, "2024Q4": 2}"#).expect("object should parse");
        let requested = String::from("2024Q4");

        let (key, value) = map.get_key_value(&requested).expect("key present");
        drop(requested);
        assert_eq!((key, *value), ("2024Q4", 2));
        assert!(map.get_key_value("2025Q1").is_none());
    }

    #[test]
    fn empty_object_yields_empty_map() {
        let map: OrderedMap<u32> = serde_json::from_str("{}").expect("empty object");
        assert!(map.is_empty());
        assert_eq!(map.first_key(), None);
    }
}
