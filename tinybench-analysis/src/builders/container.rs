use super::benchmark::build_benchmarks;
use super::init::{resolve_container_init, resolve_init};
use crate::coercion::TypeTransformer;
use crate::error::ConfigurationError;
use crate::introspector::MemberTable;
use crate::parameters::ParametersSetCollection;
use crate::references::ContainerReference;
use crate::scanner::ScanOptions;
use std::rc::Rc;
use tinybench_core::{ContainerDescriptor, Setter};

type ParameterSetters<C> = Vec<(String, Setter<C>)>;

/// Parameter lists of every property carrying values, coerced to the
/// property type, plus the setters needed to apply them.
fn build_parameters<C>(
    members: &MemberTable<'_, C>,
) -> Result<(ParametersSetCollection, ParameterSetters<C>), ConfigurationError> {
    let mut collection = ParametersSetCollection::new();
    let mut setters = Vec::new();

    for property in members.properties() {
        let Some(values) = property.param_values() else {
            continue;
        };
        let Some(setter) = property.setter() else {
            return Err(ConfigurationError::ReadOnlyProperty {
                container: members.container().to_string(),
                property: property.name().to_string(),
            });
        };
        if values.is_empty() {
            return Err(ConfigurationError::EmptyParameterValues {
                container: members.container().to_string(),
                property: property.name().to_string(),
            });
        }

        let transformer = TypeTransformer::new(property.name(), values);
        let coerced = values
            .iter()
            .map(|v| transformer.transform(v, property.ty()))
            .collect::<Result<Vec<_>, _>>()?;
        collection.add(property.name(), coerced)?;
        setters.push((property.name().to_string(), Rc::clone(setter)));
    }

    Ok((collection, setters))
}

/// Resolve every declaration of `descriptor` into a container reference
pub(crate) fn build_container<C>(
    descriptor: &ContainerDescriptor<C>,
    options: &ScanOptions,
) -> Result<ContainerReference<C>, ConfigurationError> {
    let members = MemberTable::new(descriptor)?;

    let init_container = resolve_container_init(&members, options)?;
    let init = resolve_init(&members, options)?;
    let (parameters, setters) = build_parameters(&members)?;
    let benchmarks = build_benchmarks(&members, options)?;

    tracing::debug!(
        container = descriptor.name(),
        benchmarks = benchmarks.len(),
        parameter_sets = parameters.len(),
        "Scanned container"
    );

    Ok(ContainerReference::new(
        descriptor.name().to_string(),
        descriptor.type_name().to_string(),
        init_container,
        init,
        parameters,
        benchmarks,
        setters,
        descriptor.factory().clone(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::ParametersSet;
    use tinybench_core::{Benchmark, Method, OutputLevel, BenchmarkOutput, LeveledSink, OutputSink, Property, Value, values};

    #[derive(Default)]
    struct Tuned {
        size: i64,
        label: Option<String>,
    }

    fn descriptor() -> ContainerDescriptor<Tuned> {
        ContainerDescriptor::new(Tuned::default)
            .named("Tuning")
            .property(Property::new("Size", |t: &mut Tuned, v: i64| t.size = v).param(values![1, 2]))
            .property(
                Property::new("Label", |t: &mut Tuned, v: Option<String>| t.label = v)
                    .param(vec![Value::from("x"), Value::Null]),
            )
            .property(Property::new("Untuned", |_: &mut Tuned, _: bool| {}))
            .method(Method::new("Run", |_: &mut Tuned| {}).benchmark(Benchmark::new()))
    }

    #[test]
    fn test_parameters_are_coerced_and_applied() {
        let reference = build_container(&descriptor(), &ScanOptions::default()).unwrap();
        assert_eq!(reference.name, "Tuning");
        assert_eq!(reference.type_name, "Tuned");
        assert_eq!(reference.parameters.len(), 4);
        assert_eq!(
            reference.parameters.properties().collect::<Vec<_>>(),
            vec!["Size", "Label"]
        );

        let set = reference.parameters.get(1).unwrap();
        assert_eq!(set.get("Size"), Some(&Value::I64(1)));
        assert_eq!(set.get("Label"), Some(&Value::Null));

        let sink: Rc<dyn OutputSink> = Rc::new(LeveledSink::new(
            Rc::new(BenchmarkOutput::captured(OutputLevel::Silent)),
            OutputLevel::Verbose,
        ));
        let mut instance = reference.create(&sink);
        reference.apply(&reference.parameters.get(2).unwrap(), &mut instance).unwrap();
        assert_eq!(instance.size, 2);
        assert_eq!(instance.label.as_deref(), Some("x"));

        reference.apply(&ParametersSet::new(), &mut instance).unwrap();
        assert_eq!(instance.size, 2);
    }

    #[test]
    fn test_read_only_parameter_rejected() {
        let d = descriptor().property(Property::read_only::<i32>("Fixed").param(values![1]));
        assert_eq!(
            build_container(&d, &ScanOptions::default()).unwrap_err(),
            ConfigurationError::ReadOnlyProperty {
                container: "Tuned".to_string(),
                property: "Fixed".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_and_invalid_parameter_values() {
        let d = descriptor().property(Property::new("Empty", |_: &mut Tuned, _: i32| {}).param(Vec::new()));
        assert!(matches!(
            build_container(&d, &ScanOptions::default()).unwrap_err(),
            ConfigurationError::EmptyParameterValues { .. }
        ));

        let d = descriptor().property(Property::new("Count", |_: &mut Tuned, _: i32| {}).param(vec![Value::Null]));
        assert!(matches!(
            build_container(&d, &ScanOptions::default()).unwrap_err(),
            ConfigurationError::NullNotAllowed { .. }
        ));
    }
}
