//! Conversions between Value and serde_json's generic tree

use serde_json::{Number, Value as Json};

use super::*;

impl Value {
    /// Build a value from a parsed serde_json tree, rooting nested containers at `path`.
    pub(crate) fn from_json_at(json: &Json, path: &str) -> Value {
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Boolean(*b),
            Json::Number(n) => number_to_value(n),
            Json::String(s) => Value::String(s.clone()),
            Json::Array(items) => Value::Array(TrackedArray::from_json_at(items, path)),
            Json::Object(map) => Value::Object(TrackedObject::from_json_at(map, path)),
        }
    }

    /// Convert to a serde_json tree. Read counters are left untouched.
    pub fn to_json(&self) -> Json {
        match self {
            Value::Null => Json::Null,
            Value::Boolean(b) => Json::Bool(*b),
            Value::Integer(n) => Json::from(*n),
            Value::Long(n) => Json::from(*n),
            Value::Float(n) => float_to_json(shortest_f32_as_f64(*n)),
            Value::Double(n) => float_to_json(*n),
            Value::String(s) => Json::String(s.clone()),
            Value::Object(o) => o.to_json(),
            Value::Array(a) => a.to_json(),
        }
    }
}

impl From<&Json> for Value {
    fn from(json: &Json) -> Self {
        Value::from_json_at(json, "")
    }
}

fn number_to_value(n: &Number) -> Value {
    if let Some(i) = n.as_i64() {
        return i32::try_from(i).map_or(Value::Long(i), Value::Integer);
    }
    // u64 beyond i64::MAX and every fractional number
    n.as_f64().map_or(Value::Null, Value::Double)
}

fn float_to_json(n: f64) -> Json {
    // serde_json has no representation for NaN or infinities
    Number::from_f64(n).map_or(Json::Null, Json::Number)
}

/// Widen an f32 through its shortest decimal form so `0.1f32` prints as `0.1`.
pub(crate) fn shortest_f32_as_f64(n: f32) -> f64 {
    n.to_string().parse().unwrap_or_else(|_| f64::from(n))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_numbers_pick_narrowest_integral_kind() {
        assert!(matches!(Value::from(&json!(42)), Value::Integer(42)));
        assert!(matches!(
            Value::from(&json!(3_000_000_000i64)),
            Value::Long(3_000_000_000)
        ));
        assert!(matches!(Value::from(&json!(5.624)), Value::Double(_)));
        assert!(matches!(Value::from(&json!(u64::MAX)), Value::Double(_)));
    }

    #[test]
    fn test_to_json_scalars() {
        assert_eq!(Value::Null.to_json(), json!(null));
        assert_eq!(Value::Boolean(true).to_json(), json!(true));
        assert_eq!(Value::Long(7).to_json(), json!(7));
        assert_eq!(Value::Float(0.1).to_json(), json!(0.1));
        assert_eq!(Value::Double(f64::NAN).to_json(), json!(null));
    }

    #[test]
    fn test_nested_round_trip() {
        let source = json!({"a": [1, {"b": null}], "c": "d"});
        assert_eq!(Value::from(&source).to_json(), source);
    }
}
