use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Value;

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => n.serialize(serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(arr) => serializer.collect_seq(arr),
            Value::Object(map) => serializer.collect_map(map),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_like_serde_json() {
        let doc = json!({
            "title": "Analyst",
            "salary": {"min": 1000, "max": 2000.5},
            "tags": ["x"],
        });
        let text = serde_json::to_string(&Value::from(doc.clone())).unwrap();
        assert_eq!(text, serde_json::to_string(&doc).unwrap());
    }

    #[test]
    fn deserializes_from_text() {
        let v: Value = serde_json::from_str(r#"{"a": [1, null, "b"]}"#).unwrap();
        assert_eq!(v, Value::from(json!({"a": [1, null, "b"]})));
    }
}
