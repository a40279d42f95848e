//! serde::Serialize for values and tracked containers

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use super::*;

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Integer(n) => serializer.serialize_i32(*n),
            Value::Long(n) => serializer.serialize_i64(*n),
            Value::Float(n) => serializer.serialize_f32(*n),
            Value::Double(n) => serializer.serialize_f64(*n),
            Value::String(s) => serializer.serialize_str(s),
            Value::Object(o) => o.serialize(serializer),
            Value::Array(a) => a.serialize(serializer),
        }
    }
}

impl Serialize for TrackedObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl Serialize for TrackedArray {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for value in self.iter() {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_object_keeps_insertion_order() {
        let mut obj = TrackedObject::new();
        obj.put("zeta", 1);
        obj.put("alpha", Value::Null);
        obj.put("mid", vec![true, false]);

        let text = serde_json::to_string(&obj).unwrap();
        assert_eq!(text, r#"{"zeta":1,"alpha":null,"mid":[true,false]}"#);
    }

    #[test]
    fn test_serialize_float_uses_short_form() {
        let text = serde_json::to_string(&Value::Float(0.1)).unwrap();
        assert_eq!(text, "0.1");
    }
}
