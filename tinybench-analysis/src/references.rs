//! Resolved References
//!
//! Immutable records produced once per container type by the builders and
//! shared by every plan of a run.

use crate::parameters::{ParametersSet, ParametersSetCollection};
use std::fmt;
use std::rc::Rc;
use tinybench_core::{Factory, Invoker, OutputSink, Setter, Value};

/// A parameterless setup method
pub struct InitReference<C> {
    name: String,
    invoker: Invoker<C>,
}

impl<C> InitReference<C> {
    pub(crate) fn new(name: impl Into<String>, invoker: Invoker<C>) -> Self {
        Self {
            name: name.into(),
            invoker,
        }
    }

    /// Method name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the method on `container`
    pub fn invoke(&self, container: &mut C) -> anyhow::Result<()> {
        (self.invoker)(container, &[])
    }
}

impl<C> fmt::Debug for InitReference<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("InitReference").field(&self.name).finish()
    }
}

/// A parameterless warmup method with its position
pub struct WarmupReference<C> {
    name: String,
    order: i32,
    invoker: Invoker<C>,
}

impl<C> WarmupReference<C> {
    pub(crate) fn new(name: impl Into<String>, order: i32, invoker: Invoker<C>) -> Self {
        Self {
            name: name.into(),
            order,
            invoker,
        }
    }

    /// Method name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sort key; ties keep discovery order
    pub fn order(&self) -> i32 {
        self.order
    }

    /// Run the method on `container`
    pub fn invoke(&self, container: &mut C) -> anyhow::Result<()> {
        (self.invoker)(container, &[])
    }
}

impl<C> fmt::Debug for WarmupReference<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WarmupReference")
            .field("name", &self.name)
            .field("order", &self.order)
            .finish()
    }
}

/// One validated argument tuple, keyed by parameter name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArgumentsReference {
    names: Vec<String>,
    values: Vec<Value>,
}

impl ArgumentsReference {
    pub(crate) fn new(names: Vec<String>, values: Vec<Value>) -> Self {
        debug_assert_eq!(names.len(), values.len());
        Self { names, values }
    }

    /// Parameter names, in declaration order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Coerced values, in declaration order
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Tuple arity
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the tuple is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(name, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.names.iter().map(String::as_str).zip(&self.values)
    }
}

impl fmt::Display for ArgumentsReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", name, value.literal())?;
        }
        Ok(())
    }
}

/// A fully resolved benchmark
pub struct BenchmarkReference<C> {
    /// Display name
    pub name: String,
    /// Registered method name
    pub method: String,
    /// Sort order among the container's benchmarks
    pub order: i32,
    /// Benchmark-specific init
    pub init_with: Option<InitReference<C>>,
    /// Warmups in execution order
    pub warmups: Vec<WarmupReference<C>>,
    /// Argument tuples; empty means one invocation without arguments
    pub arguments: Vec<ArgumentsReference>,
    /// Measured iterations, at least 1
    pub iterations: u32,
    /// Whether this is the baseline of its parameter group
    pub baseline: bool,
    invoker: Invoker<C>,
}

impl<C> BenchmarkReference<C> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        name: String,
        method: String,
        order: i32,
        init_with: Option<InitReference<C>>,
        warmups: Vec<WarmupReference<C>>,
        arguments: Vec<ArgumentsReference>,
        iterations: u32,
        baseline: bool,
        invoker: Invoker<C>,
    ) -> Self {
        Self {
            name,
            method,
            order,
            init_with,
            warmups,
            arguments,
            iterations,
            baseline,
            invoker,
        }
    }

    /// Invoke the benchmark body once
    pub fn invoke(&self, container: &mut C, arguments: Option<&ArgumentsReference>) -> anyhow::Result<()> {
        let values = arguments.map(ArgumentsReference::values).unwrap_or(&[]);
        (self.invoker)(container, values)
    }
}

impl<C> fmt::Debug for BenchmarkReference<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BenchmarkReference")
            .field("name", &self.name)
            .field("method", &self.method)
            .field("order", &self.order)
            .field("init_with", &self.init_with)
            .field("warmups", &self.warmups)
            .field("arguments", &self.arguments)
            .field("iterations", &self.iterations)
            .field("baseline", &self.baseline)
            .finish_non_exhaustive()
    }
}

/// A fully resolved container
pub struct ContainerReference<C> {
    /// Name shown in reports
    pub name: String,
    /// Type name used by conventions
    pub type_name: String,
    /// Container-level init
    pub init_container: Option<InitReference<C>>,
    /// Per-container init
    pub init: Option<InitReference<C>>,
    /// Parameter combinatorics
    pub parameters: ParametersSetCollection,
    /// Benchmarks, sorted by order
    pub benchmarks: Vec<Rc<BenchmarkReference<C>>>,
    setters: Vec<(String, Setter<C>)>,
    factory: Factory<C>,
}

impl<C> ContainerReference<C> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        name: String,
        type_name: String,
        init_container: Option<InitReference<C>>,
        init: Option<InitReference<C>>,
        parameters: ParametersSetCollection,
        benchmarks: Vec<Rc<BenchmarkReference<C>>>,
        setters: Vec<(String, Setter<C>)>,
        factory: Factory<C>,
    ) -> Self {
        Self {
            name,
            type_name,
            init_container,
            init,
            parameters,
            benchmarks,
            setters,
            factory,
        }
    }

    /// Create a fresh instance
    pub fn create(&self, sink: &Rc<dyn OutputSink>) -> C {
        self.factory.create(sink)
    }

    /// Whether instances receive the output sink
    pub fn wants_output(&self) -> bool {
        self.factory.wants_output()
    }

    /// Assign every value of `set` on `container`
    pub fn apply(&self, set: &ParametersSet, container: &mut C) -> anyhow::Result<()> {
        for (name, value) in set.iter() {
            let (_, setter) = self
                .setters
                .iter()
                .find(|(n, _)| n == name)
                .ok_or_else(|| anyhow::anyhow!("no setter for parameter \"{}\"", name))?;
            setter(container, value)?;
        }
        Ok(())
    }
}

impl<C> fmt::Debug for ContainerReference<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerReference")
            .field("name", &self.name)
            .field("type_name", &self.type_name)
            .field("init_container", &self.init_container)
            .field("init", &self.init)
            .field("parameters", &self.parameters)
            .field("benchmarks", &self.benchmarks)
            .finish_non_exhaustive()
    }
}
