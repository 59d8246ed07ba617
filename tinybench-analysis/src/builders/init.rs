use super::resolve_single;
use crate::error::ConfigurationError;
use crate::introspector::MemberTable;
use crate::references::InitReference;
use crate::scanner::ScanOptions;
use std::rc::Rc;
use tinybench_core::{Marker, MethodDef};

fn reference<C>(method: &MethodDef<C>) -> InitReference<C> {
    InitReference::new(method.name(), Rc::clone(method.invoker()))
}

/// `InitContainer` marker, else `InitContainer` / `Init{TypeName}`
pub(crate) fn resolve_container_init<C>(
    members: &MemberTable<'_, C>,
    options: &ScanOptions,
) -> Result<Option<InitReference<C>>, ConfigurationError> {
    let explicit = members.marked(|m| matches!(m, Marker::InitContainer));
    let conventions = [
        "InitContainer".to_string(),
        format!("Init{}", members.container()),
    ];
    let method = resolve_single(
        members,
        "container init",
        explicit,
        options.use_conventions.then_some(&conventions[..]),
    )?;
    Ok(method.map(reference))
}

/// `Init` marker, else a method named `Init`
pub(crate) fn resolve_init<C>(
    members: &MemberTable<'_, C>,
    options: &ScanOptions,
) -> Result<Option<InitReference<C>>, ConfigurationError> {
    let explicit = members.marked(|m| matches!(m, Marker::Init));
    let conventions = ["Init".to_string()];
    let method = resolve_single(
        members,
        "init",
        explicit,
        options.use_conventions.then_some(&conventions[..]),
    )?;
    Ok(method.map(reference))
}

/// `InitWith` marker on the benchmark, else `{m}Init`, `{m}_Init`, `Init{m}`, `Init_{m}`
pub(crate) fn resolve_init_with<C>(
    members: &MemberTable<'_, C>,
    options: &ScanOptions,
    benchmark: &MethodDef<C>,
) -> Result<Option<InitReference<C>>, ConfigurationError> {
    let slot = format!("init of \"{}\"", benchmark.name());
    let names: Vec<&str> = benchmark
        .markers()
        .iter()
        .filter_map(|m| match m {
            Marker::InitWith(name) => Some(name.as_str()),
            _ => None,
        })
        .collect();

    let mut explicit = Vec::with_capacity(names.len());
    for name in &names {
        let method = members
            .method(name)
            .ok_or_else(|| ConfigurationError::UnresolvedReference {
                container: members.container().to_string(),
                referrer: benchmark.name().to_string(),
                name: name.to_string(),
            })?;
        explicit.push(method);
    }

    let m = benchmark.name();
    let conventions = [
        format!("{m}Init"),
        format!("{m}_Init"),
        format!("Init{m}"),
        format!("Init_{m}"),
    ];
    let method = resolve_single(
        members,
        &slot,
        explicit,
        options.use_conventions.then_some(&conventions[..]),
    )?;
    Ok(method.map(reference))
}
