//! Slot Values
//!
//! Parameter and argument values are carried as a closed set of kinds so they
//! can be validated, widened and compared before any container code runs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A parameter or argument value
///
/// Serialized with its kind (`{"kind": "i64", "value": 5}`) so a reloaded
/// report yields the same variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Value {
    /// Absence of a value, only valid for nullable slots
    Null,
    /// Boolean
    Bool(bool),
    /// 32-bit signed integer
    I32(i32),
    /// 64-bit signed integer
    I64(i64),
    /// 32-bit float
    F32(f32),
    /// 64-bit float
    F64(f64),
    /// Exact decimal
    Decimal(Decimal),
    /// Text
    Str(String),
}

impl Value {
    /// Kind of this value, `None` for [`Value::Null`]
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            Value::Null => None,
            Value::Bool(_) => Some(ValueKind::Bool),
            Value::I32(_) => Some(ValueKind::I32),
            Value::I64(_) => Some(ValueKind::I64),
            Value::F32(_) => Some(ValueKind::F32),
            Value::F64(_) => Some(ValueKind::F64),
            Value::Decimal(_) => Some(ValueKind::Decimal),
            Value::Str(_) => Some(ValueKind::Str),
        }
    }

    /// Whether this is [`Value::Null`]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Source-like rendering: strings are quoted, null is spelled out
    pub fn literal(&self) -> String {
        match self {
            Value::Str(s) => format!("\"{}\"", s),
            other => other.to_string(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::I32(a), Value::I32(b)) => a == b,
            (Value::I64(a), Value::I64(b)) => a == b,
            // Bitwise so that equality stays reflexive for NaN and usable as a map key
            (Value::F32(a), Value::F32(b)) => a.to_bits() == b.to_bits(),
            (Value::F64(a), Value::F64(b)) => a.to_bits() == b.to_bits(),
            (Value::Decimal(a), Value::Decimal(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Bool(v) => v.hash(state),
            Value::I32(v) => v.hash(state),
            Value::I64(v) => v.hash(state),
            Value::F32(v) => v.to_bits().hash(state),
            Value::F64(v) => v.to_bits().hash(state),
            Value::Decimal(v) => v.hash(state),
            Value::Str(v) => v.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::I32(v) => write!(f, "{}", v),
            Value::I64(v) => write!(f, "{}", v),
            Value::F32(v) => write!(f, "{}", v),
            Value::F64(v) => write!(f, "{}", v),
            Value::Decimal(v) => write!(f, "{}", v),
            Value::Str(v) => write!(f, "{}", v),
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from! {
    bool => Bool,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
    Decimal => Decimal,
    String => Str,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Build a `Vec<Value>` from heterogeneous literals
///
/// ```
/// use tinybench_core::{Value, values};
/// let v = values![1, "x", 2.5];
/// assert_eq!(v[1], Value::Str("x".into()));
/// ```
#[macro_export]
macro_rules! values {
    () => { ::std::vec::Vec::<$crate::Value>::new() };
    ($($v:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($v)),+]
    };
}

// ─── Slot types ──────────────────────────────────────────────────────────────

/// Kind of a value slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// `bool`
    Bool,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `f32`
    F32,
    /// `f64`
    F64,
    /// `Decimal`
    Decimal,
    /// `String`
    Str,
}

impl ValueKind {
    /// Whether the kind is numeric
    pub fn is_numeric(self) -> bool {
        !matches!(self, ValueKind::Bool | ValueKind::Str)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Bool => "bool",
            ValueKind::I32 => "i32",
            ValueKind::I64 => "i64",
            ValueKind::F32 => "f32",
            ValueKind::F64 => "f64",
            ValueKind::Decimal => "Decimal",
            ValueKind::Str => "String",
        };
        f.write_str(name)
    }
}

/// Declared type of a property or method parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeSpec {
    /// Value kind
    pub kind: ValueKind,
    /// Whether the slot accepts [`Value::Null`]
    pub nullable: bool,
}

impl TypeSpec {
    /// Non-nullable slot of the given kind
    pub const fn of(kind: ValueKind) -> Self {
        Self {
            kind,
            nullable: false,
        }
    }

    /// Nullable slot of the given kind
    pub const fn nullable(kind: ValueKind) -> Self {
        Self {
            kind,
            nullable: true,
        }
    }
}

impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable {
            write!(f, "Option<{}>", self.kind)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

/// Rust types that can occupy a parameter or argument slot
///
/// `from_value` only accepts a value of exactly the declared kind. Widening
/// happens once, when references are built, so invocation never converts.
pub trait SlotValue: Sized + 'static {
    /// Declared slot type
    fn type_spec() -> TypeSpec;
    /// Decode an already validated value
    fn from_value(value: &Value) -> Option<Self>;
    /// Encode into a value
    fn into_value(self) -> Value;
}

macro_rules! impl_slot {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl SlotValue for $ty {
                fn type_spec() -> TypeSpec {
                    TypeSpec::of(ValueKind::$variant)
                }

                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::$variant(v) => Some(v.clone()),
                        _ => None,
                    }
                }

                fn into_value(self) -> Value {
                    Value::$variant(self)
                }
            }
        )*
    };
}

impl_slot! {
    bool => Bool,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
    Decimal => Decimal,
    String => Str,
}

impl<T: SlotValue> SlotValue for Option<T> {
    fn type_spec() -> TypeSpec {
        TypeSpec::nullable(T::type_spec().kind)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            other => T::from_value(other).map(Some),
        }
    }

    fn into_value(self) -> Value {
        self.map_or(Value::Null, SlotValue::into_value)
    }
}
