//! Hashable wrapper for Value to index array elements by identity key

use std::hash::{Hash, Hasher};

use super::Value;

/// A borrowed Value that implements Hash and Eq.
///
/// Only non-null, non-NaN scalars can be used as keys; check [`HashableValue::is_hashable`]
/// before wrapping. Equality follows the structural rule, so `Integer(5)` and
/// `Long(5)` are distinct keys.
#[derive(Debug, Clone, Copy)]
pub(crate) struct HashableValue<'a>(pub &'a Value);

impl<'a> HashableValue<'a> {
    /// Check if a value can be hashed
    pub(crate) fn is_hashable(value: &Value) -> bool {
        match value {
            // NaN is not equal to itself, so it could never be found again
            Value::Float(n) => !n.is_nan(),
            Value::Double(n) => !n.is_nan(),
            Value::Boolean(_) | Value::Integer(_) | Value::Long(_) | Value::String(_) => true,
            Value::Null | Value::Object(_) | Value::Array(_) => false,
        }
    }

    /// Wrap a value if it can serve as an identity key
    pub(crate) fn new(value: &'a Value) -> Option<Self> {
        Self::is_hashable(value).then_some(HashableValue(value))
    }
}

impl Hash for HashableValue<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self.0).hash(state);

        match self.0 {
            Value::Boolean(b) => b.hash(state),
            Value::Integer(n) => n.hash(state),
            Value::Long(n) => n.hash(state),
            // 0.0 and -0.0 compare equal, so they must hash equal
            Value::Float(n) => (if *n == 0.0 { 0 } else { n.to_bits() }).hash(state),
            Value::Double(n) => (if *n == 0.0 { 0 } else { n.to_bits() }).hash(state),
            Value::String(s) => s.hash(state),
            Value::Null | Value::Object(_) | Value::Array(_) => {}
        }
    }
}

impl PartialEq for HashableValue<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for HashableValue<'_> {}
