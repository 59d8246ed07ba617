use crate::coercion::{TypeTransformer, format_tuple};
use crate::error::ConfigurationError;
use crate::references::ArgumentsReference;
use tinybench_core::{Marker, MethodDef};

/// One reference per `Arguments` marker, arity-checked and coerced to the
/// declared parameter types.
pub(crate) fn build_arguments<C>(method: &MethodDef<C>) -> Result<Vec<ArgumentsReference>, ConfigurationError> {
    let params = method.params();
    let mut references = Vec::new();

    for marker in method.markers() {
        let Marker::Arguments(values) = marker else {
            continue;
        };
        if values.len() != params.len() {
            return Err(ConfigurationError::ArityMismatch {
                method: method.name().to_string(),
                tuple: format_tuple(values),
                expected: params.len(),
                got: values.len(),
            });
        }

        let transformer = TypeTransformer::new(method.name(), values);
        let coerced = values
            .iter()
            .zip(params)
            .map(|(value, param)| transformer.transform(value, param.ty))
            .collect::<Result<Vec<_>, _>>()?;
        let names = params.iter().map(|p| p.name.clone()).collect();
        references.push(ArgumentsReference::new(names, coerced));
    }

    // A parameterized benchmark without any tuple could never be invoked
    if references.is_empty() && !params.is_empty() {
        return Err(ConfigurationError::ArityMismatch {
            method: method.name().to_string(),
            tuple: format_tuple(&[]),
            expected: params.len(),
            got: 0,
        });
    }

    Ok(references)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use tinybench_core::{Method, Value, values};

    struct Host;

    fn sum() -> Method<Host> {
        Method::binary("Sum", ["a", "b"], |_: &mut Host, _: i64, _: Decimal| {})
    }

    #[test]
    fn test_tuples_are_coerced() {
        let method = sum().arguments(values![1, 2]).arguments(values![3i64, "4.5"]);
        let refs = build_arguments(&method).unwrap();
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].values(), &[Value::I64(1), Value::Decimal(Decimal::from(2))]);
        assert_eq!(refs[1].values(), &[Value::I64(3), Value::Decimal(Decimal::new(45, 1))]);
        assert_eq!(refs[0].names(), &["a".to_string(), "b".to_string()]);
        assert_eq!(refs[0].to_string(), "a=1, b=2");
    }

    #[test]
    fn test_arity_mismatch() {
        for tuple in [values![1], values![1, 2, 3]] {
            let method = sum().arguments(tuple.clone());
            let err = build_arguments(&method).unwrap_err();
            assert_eq!(
                err,
                ConfigurationError::ArityMismatch {
                    method: "Sum".to_string(),
                    tuple: format_tuple(&tuple),
                    expected: 2,
                    got: tuple.len(),
                }
            );
        }
    }

    #[test]
    fn test_missing_tuple_for_parameterized_method() {
        let err = build_arguments(&sum()).unwrap_err();
        assert!(matches!(err, ConfigurationError::ArityMismatch { got: 0, .. }));
    }

    #[test]
    fn test_incompatible_value() {
        let method = sum().arguments(values![1, "many"]);
        let err = build_arguments(&method).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Sum: value \"many\" in (1, \"many\") is not compatible with Decimal"
        );
    }

    #[test]
    fn test_parameterless_method_without_tuples() {
        let method = Method::new("Run", |_: &mut Host| {});
        assert!(build_arguments(&method).unwrap().is_empty());
    }
}
