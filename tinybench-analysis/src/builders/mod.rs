//! Reference Builders
//!
//! Each builder resolves one kind of declaration. A marker, when present,
//! disables convention search for its slot; conventions compare names
//! ignoring case while marker references must name the method exactly.

mod arguments;
mod benchmark;
mod container;
mod init;
mod warmup;

pub(crate) use container::build_container;

use crate::error::ConfigurationError;
use crate::introspector::MemberTable;
use tinybench_core::MethodDef;

/// Reject methods that declare parameters for a parameterless slot
fn require_parameterless<'a, C>(
    members: &MemberTable<'_, C>,
    slot: &str,
    method: &'a MethodDef<C>,
) -> Result<&'a MethodDef<C>, ConfigurationError> {
    if method.arity() > 0 {
        return Err(ConfigurationError::ParameterizedMethod {
            container: members.container().to_string(),
            slot: slot.to_string(),
            method: method.name().to_string(),
        });
    }
    Ok(method)
}

/// Methods matching any of `names` ignoring case, each method once, in name order
fn convention_matches<'a, C>(members: &MemberTable<'a, C>, names: &[String]) -> Vec<&'a MethodDef<C>> {
    let mut found: Vec<&'a MethodDef<C>> = Vec::new();
    for name in names {
        for method in members.methods_ignoring_case(name) {
            if !found.iter().any(|m| m.name() == method.name()) {
                found.push(method);
            }
        }
    }
    found
}

/// Resolve a single-method slot: one marker, else one convention match, else nothing
fn resolve_single<'a, C>(
    members: &MemberTable<'a, C>,
    slot: &str,
    explicit: Vec<&'a MethodDef<C>>,
    conventions: Option<&[String]>,
) -> Result<Option<&'a MethodDef<C>>, ConfigurationError> {
    match explicit.as_slice() {
        [] => {}
        [method] => return require_parameterless(members, slot, *method).map(Some),
        many => {
            return Err(ConfigurationError::MultipleExplicit {
                container: members.container().to_string(),
                slot: slot.to_string(),
                candidates: many.iter().map(|m| m.name().to_string()).collect(),
            });
        }
    }

    let Some(names) = conventions else {
        return Ok(None);
    };
    match convention_matches(members, names).as_slice() {
        [] => Ok(None),
        [method] => require_parameterless(members, slot, *method).map(Some),
        many => Err(ConfigurationError::AmbiguousConvention {
            container: members.container().to_string(),
            slot: slot.to_string(),
            candidates: many.iter().map(|m| m.name().to_string()).collect(),
        }),
    }
}
