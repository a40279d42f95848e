//! Value representation for JSON documents

mod display;
mod hashable;
mod impls;
mod json;
mod serialize;

pub(crate) use hashable::HashableValue;

use std::fmt;

use crate::tracked::{TrackedArray, TrackedObject};

/// A single JSON value, tagged by its runtime kind.
///
/// Numbers keep the width they were parsed or built with: integers that fit
/// 32 bits are `Integer`, wider ones `Long`, and every fractional number read
/// from text is a `Double`. `Float` only appears when built programmatically
/// or through coercion.
///
/// Containers own their children outright, so a `Value` tree never shares
/// nodes and cannot contain cycles.
#[derive(Clone)]
pub enum Value {
    /// JSON `null`
    Null,

    /// `true` or `false`
    Boolean(bool),

    /// 32-bit signed integer
    Integer(i32),

    /// 64-bit signed integer
    Long(i64),

    /// 32-bit floating point
    Float(f32),

    /// 64-bit floating point
    Double(f64),

    /// UTF-8 string
    String(String),

    /// Nested object with its own read accounting
    Object(TrackedObject),

    /// Nested array with its own read accounting
    Array(TrackedArray),
}

impl Value {
    /// The runtime kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Integer(_) => ValueKind::Integer,
            Value::Long(_) => ValueKind::Long,
            Value::Float(_) => ValueKind::Float,
            Value::Double(_) => ValueKind::Double,
            Value::String(_) => ValueKind::String,
            Value::Object(_) => ValueKind::Object,
            Value::Array(_) => ValueKind::Array,
        }
    }
}

/// The kinds a [`Value`] can take, used to request a type from typed accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueKind {
    /// JSON `null`
    Null,
    /// `bool`
    Boolean,
    /// `i32`
    Integer,
    /// `i64`
    Long,
    /// `f32`
    Float,
    /// `f64`
    Double,
    /// `String`
    String,
    /// Nested object
    Object,
    /// Nested array
    Array,
}

impl ValueKind {
    /// Human-readable name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Null => "Null",
            ValueKind::Boolean => "Boolean",
            ValueKind::Integer => "Integer",
            ValueKind::Long => "Long",
            ValueKind::Float => "Float",
            ValueKind::Double => "Double",
            ValueKind::String => "String",
            ValueKind::Object => "Object",
            ValueKind::Array => "Array",
        }
    }

    /// Object or array.
    pub fn is_container(self) -> bool {
        matches!(self, ValueKind::Object | ValueKind::Array)
    }

    /// Integer or long.
    pub fn is_integral(self) -> bool {
        matches!(self, ValueKind::Integer | ValueKind::Long)
    }

    /// Float or double.
    pub fn is_floating(self) -> bool {
        matches!(self, ValueKind::Float | ValueKind::Double)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
