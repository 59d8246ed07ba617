use super::arguments::build_arguments;
use super::init::resolve_init_with;
use super::warmup::build_warmups;
use crate::error::ConfigurationError;
use crate::introspector::MemberTable;
use crate::references::BenchmarkReference;
use crate::scanner::ScanOptions;
use std::rc::Rc;
use tinybench_core::{Benchmark, Marker, MethodDef};

fn benchmark_marker<'a, C>(
    members: &MemberTable<'_, C>,
    method: &'a MethodDef<C>,
) -> Result<Option<&'a Benchmark>, ConfigurationError> {
    let markers: Vec<&Benchmark> = method
        .markers()
        .iter()
        .filter_map(|m| match m {
            Marker::Benchmark(b) => Some(b),
            _ => None,
        })
        .collect();
    match markers.as_slice() {
        [] => Ok(None),
        [marker] => Ok(Some(*marker)),
        _ => Err(ConfigurationError::MultipleExplicit {
            container: members.container().to_string(),
            slot: format!("benchmark \"{}\"", method.name()),
            candidates: vec![method.name().to_string(); markers.len()],
        }),
    }
}

/// Every marked method as a benchmark reference, stably sorted by order
pub(crate) fn build_benchmarks<C>(
    members: &MemberTable<'_, C>,
    options: &ScanOptions,
) -> Result<Vec<Rc<BenchmarkReference<C>>>, ConfigurationError> {
    let mut benchmarks = Vec::new();

    for method in members.methods() {
        let Some(marker) = benchmark_marker(members, method)? else {
            continue;
        };
        let iterations = u32::try_from(marker.iterations)
            .ok()
            .filter(|&n| n > 0)
            .ok_or_else(|| ConfigurationError::NonPositiveIterations {
                container: members.container().to_string(),
                benchmark: method.name().to_string(),
                iterations: marker.iterations,
            })?;

        let init_with = resolve_init_with(members, options, method)?;
        let warmups = build_warmups(members, options, method)?;
        let arguments = build_arguments(method)?;

        tracing::debug!(
            container = members.container(),
            benchmark = method.name(),
            iterations,
            warmups = warmups.len(),
            argument_sets = arguments.len(),
            "Resolved benchmark"
        );

        benchmarks.push(BenchmarkReference::new(
            marker.name.clone().unwrap_or_else(|| method.name().to_string()),
            method.name().to_string(),
            marker.order,
            init_with,
            warmups,
            arguments,
            iterations,
            marker.baseline,
            Rc::clone(method.invoker()),
        ));
    }

    let baselines: Vec<String> = benchmarks
        .iter()
        .filter(|b| b.baseline)
        .map(|b| b.name.clone())
        .collect();
    if baselines.len() > 1 {
        return Err(ConfigurationError::MultipleBaselines {
            container: members.container().to_string(),
            benchmarks: baselines,
        });
    }

    benchmarks.sort_by_key(|b| b.order);
    Ok(benchmarks.into_iter().map(Rc::new).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinybench_core::{ContainerDescriptor, Method};

    #[derive(Default)]
    struct Host;

    fn noop() -> impl Fn(&mut Host) + 'static {
        |_: &mut Host| {}
    }

    fn build(d: &ContainerDescriptor<Host>) -> Result<Vec<Rc<BenchmarkReference<Host>>>, ConfigurationError> {
        let members = MemberTable::new(d)?;
        build_benchmarks(&members, &ScanOptions::default())
    }

    #[test]
    fn test_defaults_and_order() {
        let d = ContainerDescriptor::new(Host::default)
            .method(Method::new("Third", noop()).benchmark(Benchmark::new().order(2)))
            .method(Method::new("First", noop()).benchmark(Benchmark::new().named("Fast path")))
            .method(Method::new("Helper", noop()))
            .method(Method::new("Second", noop()).benchmark(Benchmark::new().iterations(4)));

        let benchmarks = build(&d).unwrap();
        let names: Vec<_> = benchmarks.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Fast path", "Second", "Third"]);
        assert_eq!(benchmarks[0].method, "First");
        assert_eq!(benchmarks[0].iterations, 1);
        assert_eq!(benchmarks[1].iterations, 4);
        assert!(!benchmarks[0].baseline);
    }

    #[test]
    fn test_non_positive_iterations() {
        for iterations in [0, -3] {
            let d = ContainerDescriptor::new(Host::default)
                .method(Method::new("Run", noop()).benchmark(Benchmark::new().iterations(iterations)));
            assert_eq!(
                build(&d).unwrap_err(),
                ConfigurationError::NonPositiveIterations {
                    container: "Host".to_string(),
                    benchmark: "Run".to_string(),
                    iterations,
                }
            );
        }
    }

    #[test]
    fn test_multiple_baselines_rejected() {
        let d = ContainerDescriptor::new(Host::default)
            .method(Method::new("A", noop()).benchmark(Benchmark::new().baseline()))
            .method(Method::new("B", noop()).benchmark(Benchmark::new().baseline()));
        assert!(matches!(
            build(&d).unwrap_err(),
            ConfigurationError::MultipleBaselines { benchmarks, .. } if benchmarks == ["A", "B"]
        ));
    }

    #[test]
    fn test_double_marker_rejected() {
        let d = ContainerDescriptor::new(Host::default).method(
            Method::new("A", noop())
                .benchmark(Benchmark::new())
                .benchmark(Benchmark::new().iterations(2)),
        );
        assert!(matches!(
            build(&d).unwrap_err(),
            ConfigurationError::MultipleExplicit { .. }
        ));
    }
}
