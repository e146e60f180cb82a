use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque formatting blob attached to every node (font, style, borders...).
///
/// The engine never interprets the keys, it only copies them. `Clone` is a
/// deep copy, so a cloned node never shares formatting state with its source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties(Map<String, Value>);

impl Properties {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Set a property, returning the previous value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Replace every property with a copy of `source`'s
    pub fn copy_from(&mut self, source: &Properties) {
        self.0.clone_from(&source.0);
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_copy_is_independent() {
        let mut source: Properties = [("bold", json!(true)), ("font", json!({"size": 12}))]
            .into_iter()
            .collect();
        let mut copy = Properties::new();
        copy.copy_from(&source);
        assert_eq!(copy, source);

        source.set("bold", false);
        assert_eq!(copy.get("bold"), Some(&json!(true)));
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let props: Properties = [("italic", json!(true))].into_iter().collect();
        let value = serde_json::to_value(&props).unwrap();
        assert_eq!(value, json!({"italic": true}));
    }
}
