//! Value Coercion
//!
//! A value is accepted for a slot when it is directly assignable, when it is
//! null and the slot is nullable, or when one of a closed set of widenings
//! applies:
//!
//! | from     | to                                   |
//! |----------|--------------------------------------|
//! | `i32`    | `i64`, `f32`, `f64`, `Decimal`       |
//! | `i64`    | `f64`, `Decimal`                     |
//! | `f32`    | `f64`, `Decimal`                     |
//! | `f64`    | `Decimal`                            |
//! | `String` | any numeric kind, when the text parses |

use crate::error::ConfigurationError;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use std::str::FromStr;
use tinybench_core::{TypeSpec, Value, ValueKind};

/// Render a declared tuple, e.g. `(1, "x")`
pub fn format_tuple(values: &[Value]) -> String {
    let items: Vec<String> = values.iter().map(Value::literal).collect();
    format!("({})", items.join(", "))
}

/// Widen `value` to `target`, `None` when no widening applies
pub fn widen(value: &Value, target: ValueKind) -> Option<Value> {
    match (value, target) {
        (Value::I32(v), ValueKind::I64) => Some(Value::I64(i64::from(*v))),
        (Value::I32(v), ValueKind::F32) => Some(Value::F32(*v as f32)),
        (Value::I32(v), ValueKind::F64) => Some(Value::F64(f64::from(*v))),
        (Value::I32(v), ValueKind::Decimal) => Some(Value::Decimal(Decimal::from(*v))),
        (Value::I64(v), ValueKind::F64) => Some(Value::F64(*v as f64)),
        (Value::I64(v), ValueKind::Decimal) => Some(Value::Decimal(Decimal::from(*v))),
        (Value::F32(v), ValueKind::F64) => Some(Value::F64(f64::from(*v))),
        (Value::F32(v), ValueKind::Decimal) => Decimal::from_f32(*v).map(Value::Decimal),
        (Value::F64(v), ValueKind::Decimal) => Decimal::from_f64(*v).map(Value::Decimal),
        (Value::Str(s), kind) if kind.is_numeric() => parse_numeric(s.trim(), kind),
        _ => None,
    }
}

fn parse_numeric(text: &str, kind: ValueKind) -> Option<Value> {
    match kind {
        ValueKind::I32 => text.parse().ok().map(Value::I32),
        ValueKind::I64 => text.parse().ok().map(Value::I64),
        ValueKind::F32 => text
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Value::F32),
        ValueKind::F64 => text
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Value::F64),
        ValueKind::Decimal => Decimal::from_str(text).ok().map(Value::Decimal),
        ValueKind::Bool | ValueKind::Str => None,
    }
}

/// Validates the values of one declared tuple against their slot types
pub struct TypeTransformer<'a> {
    member: &'a str,
    tuple: String,
}

impl<'a> TypeTransformer<'a> {
    /// Transformer for the tuple `values` declared on `member`
    pub fn new(member: &'a str, values: &[Value]) -> Self {
        Self {
            member,
            tuple: format_tuple(values),
        }
    }

    /// Value to store in a slot of type `target`
    pub fn transform(&self, value: &Value, target: TypeSpec) -> Result<Value, ConfigurationError> {
        match value.kind() {
            None if target.nullable => Ok(Value::Null),
            None => Err(ConfigurationError::NullNotAllowed {
                member: self.member.to_string(),
                tuple: self.tuple.clone(),
                target: target.to_string(),
            }),
            Some(kind) if kind == target.kind => Ok(value.clone()),
            Some(_) => {
                widen(value, target.kind).ok_or_else(|| ConfigurationError::IncompatibleValue {
                    member: self.member.to_string(),
                    tuple: self.tuple.clone(),
                    value: value.literal(),
                    target: target.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinybench_core::values;

    fn spec(kind: ValueKind) -> TypeSpec {
        TypeSpec::of(kind)
    }

    #[test]
    fn test_direct_assignment() {
        let t = TypeTransformer::new("M", &values![1]);
        assert_eq!(t.transform(&Value::I32(1), spec(ValueKind::I32)), Ok(Value::I32(1)));
        assert_eq!(
            t.transform(&Value::I32(1), TypeSpec::nullable(ValueKind::I32)),
            Ok(Value::I32(1))
        );
    }

    #[test]
    fn test_i32_widening() {
        let t = TypeTransformer::new("M", &values![7]);
        assert_eq!(t.transform(&Value::I32(7), spec(ValueKind::I64)), Ok(Value::I64(7)));
        assert_eq!(
            t.transform(&Value::I32(7), spec(ValueKind::Decimal)),
            Ok(Value::Decimal(Decimal::from(7)))
        );
        assert_eq!(t.transform(&Value::I32(7), spec(ValueKind::F64)), Ok(Value::F64(7.0)));
    }

    #[test]
    fn test_narrowing_is_rejected() {
        let t = TypeTransformer::new("M", &values![7i64]);
        let err = t.transform(&Value::I64(7), spec(ValueKind::I32)).unwrap_err();
        assert!(matches!(err, ConfigurationError::IncompatibleValue { .. }));
        assert!(widen(&Value::F64(1.5), ValueKind::F32).is_none());
        assert!(widen(&Value::Bool(true), ValueKind::I32).is_none());
    }

    #[test]
    fn test_numeric_string() {
        let t = TypeTransformer::new("M", &values!["12.50"]);
        assert_eq!(
            t.transform(&Value::from("12.50"), spec(ValueKind::Decimal)),
            Ok(Value::Decimal(Decimal::new(1250, 2)))
        );
        assert_eq!(widen(&Value::from(" 42 "), ValueKind::I64), Some(Value::I64(42)));
        assert!(widen(&Value::from("NaN"), ValueKind::F64).is_none());
    }

    #[test]
    fn test_non_numeric_string_into_decimal_names_everything() {
        let t = TypeTransformer::new("Compute", &values![1, "abc"]);
        let err = t
            .transform(&Value::from("abc"), spec(ValueKind::Decimal))
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Compute"));
        assert!(message.contains("(1, \"abc\")"));
        assert!(message.contains("\"abc\""));
        assert!(message.contains("Decimal"));
    }

    #[test]
    fn test_null_handling() {
        let t = TypeTransformer::new("P", &[Value::Null]);
        assert_eq!(
            t.transform(&Value::Null, TypeSpec::nullable(ValueKind::Str)),
            Ok(Value::Null)
        );
        let err = t.transform(&Value::Null, spec(ValueKind::I32)).unwrap_err();
        assert!(matches!(err, ConfigurationError::NullNotAllowed { .. }));
    }
}
