//! Coercion of stored values into caller-requested types
//!
//! The rules, applied in order:
//!
//! 1. `null` coerces to any requested type as `null`.
//! 2. A value whose kind already matches is returned unchanged.
//! 3. Any scalar coerces to `String` through its [`Display`](std::fmt::Display) form.
//! 4. Integral values widen to `Float` or `Double`. `Integer` never becomes `Long`.
//! 5. `Float` widens to `Double`; `Double` narrows to `Float` (precision may be lost).
//! 6. Anything else is a [`JsonTallyError::TypeMismatch`].
//!
//! Containers are never coerced. Asking for `Object` or `Array` here is an
//! [`JsonTallyError::IllegalUsage`]; use the dedicated container accessors.

use crate::error::{JsonTallyError, Result};
use crate::value::{Value, ValueKind};

/// Coerce `value` to `kind`, naming `path` in any mismatch.
pub fn coerce(value: &Value, kind: ValueKind, path: &str) -> Result<Value> {
    ensure_scalar_request(kind)?;

    let coerced = match (value, kind) {
        (Value::Null, _) => Value::Null,
        (v, k) if v.kind() == k => v.clone(),
        (Value::Object(_) | Value::Array(_), _) => {
            return Err(JsonTallyError::type_mismatch(path, kind, value))
        }
        (v, ValueKind::String) => Value::String(v.to_string()),

        (Value::Integer(n), ValueKind::Float) => Value::Float(*n as f32),
        (Value::Integer(n), ValueKind::Double) => Value::Double(f64::from(*n)),
        (Value::Long(n), ValueKind::Float) => Value::Float(*n as f32),
        (Value::Long(n), ValueKind::Double) => Value::Double(*n as f64),

        (Value::Float(n), ValueKind::Double) => Value::Double(f64::from(*n)),
        (Value::Double(n), ValueKind::Float) => Value::Float(*n as f32),

        _ => return Err(JsonTallyError::type_mismatch(path, kind, value)),
    };
    Ok(coerced)
}

/// Reject container kinds on the scalar access path.
pub(crate) fn ensure_scalar_request(kind: ValueKind) -> Result<()> {
    match kind {
        ValueKind::Object => Err(JsonTallyError::IllegalUsage(
            "cannot read an Object through a scalar accessor; use `get_object` instead".into(),
        )),
        ValueKind::Array => Err(JsonTallyError::IllegalUsage(
            "cannot read an Array through a scalar accessor; use `get_array` instead".into(),
        )),
        _ => Ok(()),
    }
}

/// Rust types that typed accessors can return.
///
/// Each type names the [`ValueKind`] it is requested as; the accessor runs
/// [`coerce`] and then hands the coerced value to [`FromValue::from_value`].
pub trait FromValue: Sized {
    /// The kind requested from the coercion table
    const KIND: ValueKind;

    /// Extract from a value already coerced to [`Self::KIND`]
    fn from_value(value: Value) -> Option<Self>;
}

impl FromValue for bool {
    const KIND: ValueKind = ValueKind::Boolean;

    fn from_value(value: Value) -> Option<Self> {
        value.as_bool()
    }
}

impl FromValue for i32 {
    const KIND: ValueKind = ValueKind::Integer;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Integer(n) => Some(n),
            _ => None,
        }
    }
}

impl FromValue for i64 {
    const KIND: ValueKind = ValueKind::Long;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Long(n) => Some(n),
            _ => None,
        }
    }
}

impl FromValue for f32 {
    const KIND: ValueKind = ValueKind::Float;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Float(n) => Some(n),
            _ => None,
        }
    }
}

impl FromValue for f64 {
    const KIND: ValueKind = ValueKind::Double;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Double(n) => Some(n),
            _ => None,
        }
    }
}

impl FromValue for String {
    const KIND: ValueKind = ValueKind::String;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(value: Value, kind: ValueKind) -> Value {
        coerce(&value, kind, "attr").unwrap()
    }

    fn mismatch(value: Value, kind: ValueKind) -> bool {
        matches!(
            coerce(&value, kind, "attr"),
            Err(JsonTallyError::TypeMismatch { .. })
        )
    }

    #[test]
    fn test_null_coerces_to_anything() {
        for kind in [
            ValueKind::Boolean,
            ValueKind::Integer,
            ValueKind::Long,
            ValueKind::Float,
            ValueKind::Double,
            ValueKind::String,
        ] {
            assert!(ok(Value::Null, kind).is_null());
        }
    }

    #[test]
    fn test_same_kind_is_unchanged() {
        assert_eq!(ok(Value::Integer(5), ValueKind::Integer).as_i64(), Some(5));
        assert_eq!(ok(Value::string("x"), ValueKind::String).as_str(), Some("x"));
        assert_eq!(ok(Value::Boolean(true), ValueKind::Boolean).as_bool(), Some(true));
    }

    #[test]
    fn test_everything_scalar_becomes_string() {
        assert_eq!(ok(Value::Integer(5), ValueKind::String).as_str(), Some("5"));
        assert_eq!(ok(Value::Boolean(false), ValueKind::String).as_str(), Some("false"));
        assert_eq!(ok(Value::Double(1.5), ValueKind::String).as_str(), Some("1.5"));
    }

    #[test]
    fn test_integral_widening() {
        assert!(matches!(ok(Value::Integer(5), ValueKind::Double), Value::Double(n) if n == 5.0));
        assert!(matches!(ok(Value::Integer(5), ValueKind::Float), Value::Float(n) if n == 5.0));
        assert!(matches!(ok(Value::Long(1 << 40), ValueKind::Double), Value::Double(_)));
    }

    #[test]
    fn test_floating_widening_and_narrowing() {
        assert!(matches!(ok(Value::Float(0.5), ValueKind::Double), Value::Double(n) if n == 0.5));
        assert!(matches!(ok(Value::Double(0.25), ValueKind::Float), Value::Float(n) if n == 0.25));
    }

    #[test]
    fn test_rejected_combinations() {
        assert!(mismatch(Value::string("5"), ValueKind::Double));
        assert!(mismatch(Value::string("true"), ValueKind::Boolean));
        assert!(mismatch(Value::Double(5.0), ValueKind::Integer));
        assert!(mismatch(Value::Long(5), ValueKind::Integer));
        assert!(mismatch(Value::Integer(5), ValueKind::Long));
        assert!(mismatch(Value::Boolean(true), ValueKind::Integer));
        assert!(mismatch(Value::object(), ValueKind::String));
        assert!(mismatch(Value::array(), ValueKind::Double));
    }

    #[test]
    fn test_mismatch_carries_path_and_kinds() {
        match coerce(&Value::string("5"), ValueKind::Double, "a.b[2]") {
            Err(JsonTallyError::TypeMismatch {
                path,
                expected,
                found,
            }) => {
                assert_eq!(path, "a.b[2]");
                assert_eq!(expected, ValueKind::Double);
                assert_eq!(found, ValueKind::String);
            }
            other => panic!("expected TypeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_container_request_is_illegal() {
        assert!(matches!(
            coerce(&Value::object(), ValueKind::Object, "a"),
            Err(JsonTallyError::IllegalUsage(_))
        ));
        assert!(matches!(
            coerce(&Value::Null, ValueKind::Array, "a"),
            Err(JsonTallyError::IllegalUsage(_))
        ));
    }
}
