//! Container Description
//!
//! A benchmark container registers its methods and tunable properties in a
//! [`ContainerDescriptor`]. Markers attached to each entry carry the
//! declarative information (benchmark, init, warmup, arguments); naming
//! conventions are resolved later, by `tinybench-analysis`.
//!
//! ```ignore
//! impl BenchmarksContainer for Sorting {
//!     fn describe() -> ContainerDescriptor<Self> {
//!         ContainerDescriptor::new(Sorting::default)
//!             .property(Property::new("Size", |c: &mut Sorting, v: i32| c.size = v).param(values![10, 100]))
//!             .method(Method::new("Init", Sorting::init))
//!             .method(Method::new("Sort", Sorting::sort).benchmark(Benchmark::new().iterations(5)))
//!     }
//! }
//! ```

use crate::output::OutputSink;
use crate::value::{SlotValue, TypeSpec, Value};
use std::fmt;
use std::rc::Rc;

/// Type-erased method body
pub type Invoker<C> = Rc<dyn Fn(&mut C, &[Value]) -> anyhow::Result<()>>;

/// Type-erased property setter
pub type Setter<C> = Rc<dyn Fn(&mut C, &Value) -> anyhow::Result<()>>;

/// A type that describes its own benchmarks
pub trait BenchmarksContainer: Sized + 'static {
    /// Registration table for this container type
    fn describe() -> ContainerDescriptor<Self>;
}

/// Last path segment of a type name, without generic arguments
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// Return values a registered method may produce
pub trait IntoOutcome {
    /// Convert into the engine's outcome type
    fn into_outcome(self) -> anyhow::Result<()>;
}

impl IntoOutcome for () {
    fn into_outcome(self) -> anyhow::Result<()> {
        Ok(())
    }
}

impl<E: Into<anyhow::Error>> IntoOutcome for Result<(), E> {
    fn into_outcome(self) -> anyhow::Result<()> {
        self.map_err(Into::into)
    }
}

// ─── Factory ─────────────────────────────────────────────────────────────────

/// How a fresh container instance is created
pub enum Factory<C> {
    /// Parameterless construction
    Plain(Rc<dyn Fn() -> C>),
    /// Construction receiving the run's output sink
    WithOutput(Rc<dyn Fn(Rc<dyn OutputSink>) -> C>),
}

impl<C> Factory<C> {
    /// Create an instance, handing over `sink` when the factory asks for it
    pub fn create(&self, sink: &Rc<dyn OutputSink>) -> C {
        match self {
            Factory::Plain(f) => f(),
            Factory::WithOutput(f) => f(Rc::clone(sink)),
        }
    }

    /// Whether this factory requests the output sink
    pub fn wants_output(&self) -> bool {
        matches!(self, Factory::WithOutput(_))
    }
}

impl<C> Clone for Factory<C> {
    fn clone(&self) -> Self {
        match self {
            Factory::Plain(f) => Factory::Plain(Rc::clone(f)),
            Factory::WithOutput(f) => Factory::WithOutput(Rc::clone(f)),
        }
    }
}

// ─── Markers ─────────────────────────────────────────────────────────────────

/// Benchmark marker options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Benchmark {
    /// Display name (defaults to the method name)
    pub name: Option<String>,
    /// Number of measured iterations, must be positive
    pub iterations: i32,
    /// Sort order among the container's benchmarks
    pub order: i32,
    /// Whether this is the group's baseline
    pub baseline: bool,
}

impl Default for Benchmark {
    fn default() -> Self {
        Self {
            name: None,
            iterations: 1,
            order: 0,
            baseline: false,
        }
    }
}

impl Benchmark {
    /// Default options: one iteration, order 0, not a baseline
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the display name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the iteration count
    pub fn iterations(mut self, iterations: i32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the sort order
    pub fn order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    /// Flag as baseline
    pub fn baseline(mut self) -> Self {
        self.baseline = true;
        self
    }
}

/// Declarative information attached to a method
#[derive(Debug, Clone, PartialEq)]
pub enum Marker {
    /// The method is a benchmark
    Benchmark(Benchmark),
    /// The method initializes the container before each plan
    InitContainer,
    /// The method is the container's per-plan init
    Init,
    /// The benchmark uses the named method as its init
    InitWith(String),
    /// The benchmark is preceded by the named warmup method
    WarmupWith {
        /// Warmup method name
        method: String,
        /// Position among the benchmark's warmups
        order: i32,
    },
    /// One argument tuple for the benchmark
    Arguments(Vec<Value>),
}

// ─── Methods ─────────────────────────────────────────────────────────────────

/// A declared method parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDecl {
    /// Parameter name
    pub name: String,
    /// Parameter type
    pub ty: TypeSpec,
}

impl ParamDecl {
    /// Parameter of Rust type `T`
    pub fn of<T: SlotValue>(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: T::type_spec(),
        }
    }
}

/// A registered container method
pub struct MethodDef<C> {
    name: String,
    params: Vec<ParamDecl>,
    invoker: Invoker<C>,
    markers: Vec<Marker>,
}

fn decode<T: SlotValue>(args: &[Value], index: usize, decl: &ParamDecl) -> anyhow::Result<T> {
    let value = args
        .get(index)
        .ok_or_else(|| anyhow::anyhow!("missing argument \"{}\"", decl.name))?;
    T::from_value(value).ok_or_else(|| {
        anyhow::anyhow!(
            "argument \"{}\" expects {}, got {}",
            decl.name,
            decl.ty,
            value.literal()
        )
    })
}

fn check_arity(name: &str, args: &[Value], expected: usize) -> anyhow::Result<()> {
    if args.len() != expected {
        anyhow::bail!(
            "{} takes {} argument(s), {} supplied",
            name,
            expected,
            args.len()
        );
    }
    Ok(())
}

impl<C: 'static> MethodDef<C> {
    /// Parameterless method
    pub fn new<R: IntoOutcome>(name: impl Into<String>, f: impl Fn(&mut C) -> R + 'static) -> Self {
        let name = name.into();
        let label = name.clone();
        Self {
            name,
            params: Vec::new(),
            invoker: Rc::new(move |c: &mut C, args: &[Value]| {
                check_arity(&label, args, 0)?;
                f(c).into_outcome()
            }),
            markers: Vec::new(),
        }
    }

    /// Method taking one typed argument
    pub fn unary<A, R>(
        name: impl Into<String>,
        param: impl Into<String>,
        f: impl Fn(&mut C, A) -> R + 'static,
    ) -> Self
    where
        A: SlotValue,
        R: IntoOutcome,
    {
        let name = name.into();
        let label = name.clone();
        let decl = ParamDecl::of::<A>(param);
        let params = vec![decl.clone()];
        Self {
            name,
            params,
            invoker: Rc::new(move |c: &mut C, args: &[Value]| {
                check_arity(&label, args, 1)?;
                let a = decode::<A>(args, 0, &decl)?;
                f(c, a).into_outcome()
            }),
            markers: Vec::new(),
        }
    }

    /// Method taking two typed arguments
    pub fn binary<A, B, R>(
        name: impl Into<String>,
        params: [&str; 2],
        f: impl Fn(&mut C, A, B) -> R + 'static,
    ) -> Self
    where
        A: SlotValue,
        B: SlotValue,
        R: IntoOutcome,
    {
        let name = name.into();
        let label = name.clone();
        let first = ParamDecl::of::<A>(params[0]);
        let second = ParamDecl::of::<B>(params[1]);
        let decls = vec![first.clone(), second.clone()];
        Self {
            name,
            params: decls,
            invoker: Rc::new(move |c: &mut C, args: &[Value]| {
                check_arity(&label, args, 2)?;
                let a = decode::<A>(args, 0, &first)?;
                let b = decode::<B>(args, 1, &second)?;
                f(c, a, b).into_outcome()
            }),
            markers: Vec::new(),
        }
    }

    /// Method with any number of declared parameters, receiving the raw values
    pub fn variadic<R: IntoOutcome>(
        name: impl Into<String>,
        params: Vec<ParamDecl>,
        f: impl Fn(&mut C, &[Value]) -> R + 'static,
    ) -> Self {
        let name = name.into();
        let label = name.clone();
        let arity = params.len();
        Self {
            name,
            params,
            invoker: Rc::new(move |c: &mut C, args: &[Value]| {
                check_arity(&label, args, arity)?;
                f(c, args).into_outcome()
            }),
            markers: Vec::new(),
        }
    }

    /// Attach an arbitrary marker
    pub fn marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    /// Mark as benchmark
    pub fn benchmark(self, options: Benchmark) -> Self {
        self.marker(Marker::Benchmark(options))
    }

    /// Mark as container init
    pub fn init_container(self) -> Self {
        self.marker(Marker::InitContainer)
    }

    /// Mark as per-plan init
    pub fn init(self) -> Self {
        self.marker(Marker::Init)
    }

    /// Use the named method as this benchmark's init
    pub fn init_with(self, method: impl Into<String>) -> Self {
        self.marker(Marker::InitWith(method.into()))
    }

    /// Run the named method as a warmup before this benchmark
    pub fn warmup_with(self, method: impl Into<String>, order: i32) -> Self {
        self.marker(Marker::WarmupWith {
            method: method.into(),
            order,
        })
    }

    /// Add one argument tuple
    pub fn arguments(self, values: Vec<Value>) -> Self {
        self.marker(Marker::Arguments(values))
    }
}

impl<C> MethodDef<C> {
    /// Method name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared parameters
    pub fn params(&self) -> &[ParamDecl] {
        &self.params
    }

    /// Number of declared parameters
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Attached markers, in registration order
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Type-erased body
    pub fn invoker(&self) -> &Invoker<C> {
        &self.invoker
    }
}

impl<C> fmt::Debug for MethodDef<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDef")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("markers", &self.markers)
            .finish_non_exhaustive()
    }
}

// ─── Properties ──────────────────────────────────────────────────────────────

/// A registered container property
pub struct PropertyDef<C> {
    name: String,
    ty: TypeSpec,
    setter: Option<Setter<C>>,
    param: Option<Vec<Value>>,
}

impl<C: 'static> PropertyDef<C> {
    /// Writable property of Rust type `T`
    pub fn new<T: SlotValue>(name: impl Into<String>, set: impl Fn(&mut C, T) + 'static) -> Self {
        let name = name.into();
        let label = name.clone();
        Self {
            name,
            ty: T::type_spec(),
            setter: Some(Rc::new(move |c: &mut C, value: &Value| {
                let v = T::from_value(value).ok_or_else(|| {
                    anyhow::anyhow!(
                        "property \"{}\" expects {}, got {}",
                        label,
                        T::type_spec(),
                        value.literal()
                    )
                })?;
                set(c, v);
                Ok(())
            })),
            param: None,
        }
    }

    /// Property without a setter
    pub fn read_only<T: SlotValue>(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: T::type_spec(),
            setter: None,
            param: None,
        }
    }

    /// Declare the candidate values this property takes across runs
    pub fn param(mut self, values: Vec<Value>) -> Self {
        self.param = Some(values);
        self
    }
}

impl<C> PropertyDef<C> {
    /// Property name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type
    pub fn ty(&self) -> TypeSpec {
        self.ty
    }

    /// Setter, `None` for read-only properties
    pub fn setter(&self) -> Option<&Setter<C>> {
        self.setter.as_ref()
    }

    /// Declared parameter values, if any
    pub fn param_values(&self) -> Option<&[Value]> {
        self.param.as_deref()
    }
}

impl<C> fmt::Debug for PropertyDef<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDef")
            .field("name", &self.name)
            .field("ty", &self.ty)
            .field("writable", &self.setter.is_some())
            .field("param", &self.param)
            .finish()
    }
}

// ─── Descriptor ──────────────────────────────────────────────────────────────

/// Registration table of a container type
pub struct ContainerDescriptor<C> {
    type_name: String,
    display_name: Option<String>,
    factory: Factory<C>,
    methods: Vec<MethodDef<C>>,
    properties: Vec<PropertyDef<C>>,
}

impl<C: 'static> ContainerDescriptor<C> {
    /// Descriptor whose instances come from a parameterless factory
    pub fn new(factory: impl Fn() -> C + 'static) -> Self {
        Self::with_factory(Factory::Plain(Rc::new(factory)))
    }

    /// Descriptor whose instances receive the run's output sink
    pub fn with_output(factory: impl Fn(Rc<dyn OutputSink>) -> C + 'static) -> Self {
        Self::with_factory(Factory::WithOutput(Rc::new(factory)))
    }

    fn with_factory(factory: Factory<C>) -> Self {
        Self {
            type_name: short_type_name::<C>().to_string(),
            display_name: None,
            factory,
            methods: Vec::new(),
            properties: Vec::new(),
        }
    }

    /// Override the name shown in reports
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Register a method
    pub fn method(mut self, method: MethodDef<C>) -> Self {
        self.methods.push(method);
        self
    }

    /// Register a property
    pub fn property(mut self, property: PropertyDef<C>) -> Self {
        self.properties.push(property);
        self
    }
}

impl<C> ContainerDescriptor<C> {
    /// Type name used by naming conventions
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Display name override
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Name shown in reports
    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.type_name)
    }

    /// Instance factory
    pub fn factory(&self) -> &Factory<C> {
        &self.factory
    }

    /// Registered methods, in registration order
    pub fn methods(&self) -> &[MethodDef<C>] {
        &self.methods
    }

    /// Registered properties, in registration order
    pub fn properties(&self) -> &[PropertyDef<C>] {
        &self.properties
    }
}
