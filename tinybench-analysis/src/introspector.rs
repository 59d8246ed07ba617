//! Member Lookup
//!
//! Indexes a container description by exact and case-folded member name.
//! Lookup only; precedence rules live in the builders.

use crate::error::ConfigurationError;
use fxhash::{FxHashMap, FxHashSet};
use tinybench_core::{ContainerDescriptor, Marker, MethodDef, PropertyDef};

/// Name index over one container description
pub struct MemberTable<'a, C> {
    descriptor: &'a ContainerDescriptor<C>,
    exact: FxHashMap<&'a str, usize>,
    folded: FxHashMap<String, Vec<usize>>,
}

impl<'a, C> MemberTable<'a, C> {
    /// Index `descriptor`; member names must be unique
    pub fn new(descriptor: &'a ContainerDescriptor<C>) -> Result<Self, ConfigurationError> {
        let mut seen = FxHashSet::default();
        let names = descriptor
            .methods()
            .iter()
            .map(MethodDef::name)
            .chain(descriptor.properties().iter().map(PropertyDef::name));
        for name in names {
            if !seen.insert(name) {
                return Err(ConfigurationError::DuplicateMember {
                    container: descriptor.type_name().to_string(),
                    name: name.to_string(),
                });
            }
        }

        let mut exact = FxHashMap::default();
        let mut folded: FxHashMap<String, Vec<usize>> = FxHashMap::default();
        for (i, method) in descriptor.methods().iter().enumerate() {
            exact.insert(method.name(), i);
            folded.entry(method.name().to_lowercase()).or_default().push(i);
        }

        Ok(Self {
            descriptor,
            exact,
            folded,
        })
    }

    /// Underlying description
    pub fn descriptor(&self) -> &'a ContainerDescriptor<C> {
        self.descriptor
    }

    /// Container type name
    pub fn container(&self) -> &'a str {
        self.descriptor.type_name()
    }

    /// Methods in registration order
    pub fn methods(&self) -> &'a [MethodDef<C>] {
        self.descriptor.methods()
    }

    /// Properties in registration order
    pub fn properties(&self) -> &'a [PropertyDef<C>] {
        self.descriptor.properties()
    }

    /// Method with exactly this name
    pub fn method(&self, name: &str) -> Option<&'a MethodDef<C>> {
        let methods = self.descriptor.methods();
        self.exact.get(name).map(|&i| &methods[i])
    }

    /// Methods whose name equals `name` ignoring case
    pub fn methods_ignoring_case(&self, name: &str) -> Vec<&'a MethodDef<C>> {
        let methods = self.descriptor.methods();
        self.folded
            .get(&name.to_lowercase())
            .map(|indices| indices.iter().map(|&i| &methods[i]).collect())
            .unwrap_or_default()
    }

    /// Methods carrying a marker accepted by `predicate`
    pub fn marked(&self, predicate: impl Fn(&Marker) -> bool) -> Vec<&'a MethodDef<C>> {
        self.descriptor
            .methods()
            .iter()
            .filter(|m| m.markers().iter().any(&predicate))
            .collect()
    }
}
