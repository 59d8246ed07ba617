use super::{convention_matches, require_parameterless};
use crate::error::ConfigurationError;
use crate::introspector::MemberTable;
use crate::references::WarmupReference;
use crate::scanner::ScanOptions;
use std::rc::Rc;
use tinybench_core::{Marker, MethodDef};

/// Warmups of `benchmark`: `WarmupWith` markers first, then convention
/// matches at order 0, each method once, stably sorted by order.
pub(crate) fn build_warmups<C>(
    members: &MemberTable<'_, C>,
    options: &ScanOptions,
    benchmark: &MethodDef<C>,
) -> Result<Vec<WarmupReference<C>>, ConfigurationError> {
    let slot = format!("warmup of \"{}\"", benchmark.name());
    let mut found: Vec<(i32, &MethodDef<C>)> = Vec::new();

    for marker in benchmark.markers() {
        let Marker::WarmupWith { method, order } = marker else {
            continue;
        };
        let resolved = members
            .method(method)
            .ok_or_else(|| ConfigurationError::UnresolvedReference {
                container: members.container().to_string(),
                referrer: benchmark.name().to_string(),
                name: method.clone(),
            })?;
        require_parameterless(members, &slot, resolved)?;
        if !found.iter().any(|(_, m)| m.name() == resolved.name()) {
            found.push((*order, resolved));
        }
    }

    if options.use_conventions {
        let m = benchmark.name();
        let conventions = [
            format!("{m}Warmup"),
            format!("{m}_Warmup"),
            format!("WarmupFor{m}"),
            format!("WarmupFor_{m}"),
        ];
        for resolved in convention_matches(members, &conventions) {
            require_parameterless(members, &slot, resolved)?;
            if !found.iter().any(|(_, m)| m.name() == resolved.name()) {
                found.push((0, resolved));
            }
        }
    }

    // Stable: equal orders keep discovery order
    found.sort_by_key(|(order, _)| *order);

    Ok(found
        .into_iter()
        .map(|(order, m)| WarmupReference::new(m.name(), order, Rc::clone(m.invoker())))
        .collect())
}
