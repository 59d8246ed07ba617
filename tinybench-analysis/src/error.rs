//! Configuration Errors
//!
//! Every way a container description can be rejected before it runs.

use thiserror::Error;

/// A container description that cannot be turned into references
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// An explicit marker names a method that does not exist
    #[error("{container}: method \"{name}\" referenced by {referrer} was not found")]
    UnresolvedReference {
        /// Container type name
        container: String,
        /// Method carrying the marker
        referrer: String,
        /// Referenced method name
        name: String,
    },

    /// More than one method matches the naming conventions of a single slot
    #[error("{container}: {slot} is ambiguous, conventions match {}", .candidates.join(", "))]
    AmbiguousConvention {
        /// Container type name
        container: String,
        /// Slot being resolved
        slot: String,
        /// Matching method names
        candidates: Vec<String>,
    },

    /// More than one explicit marker for a single slot
    #[error("{container}: {slot} is declared more than once ({})", .candidates.join(", "))]
    MultipleExplicit {
        /// Container type name
        container: String,
        /// Slot being resolved
        slot: String,
        /// Conflicting declarations
        candidates: Vec<String>,
    },

    /// A benchmark declares zero or negative iterations
    #[error("{container}: benchmark \"{benchmark}\" has {iterations} iterations, must be positive")]
    NonPositiveIterations {
        /// Container type name
        container: String,
        /// Benchmark method
        benchmark: String,
        /// Declared count
        iterations: i32,
    },

    /// An init or warmup method declares parameters
    #[error("{container}: {slot} method \"{method}\" must not take parameters")]
    ParameterizedMethod {
        /// Container type name
        container: String,
        /// Slot the method resolved to
        slot: String,
        /// Method name
        method: String,
    },

    /// An argument tuple does not match the method's parameter count
    #[error("{method}: arguments {tuple} provide {got} value(s), {expected} declared")]
    ArityMismatch {
        /// Declaring method
        method: String,
        /// Declared tuple
        tuple: String,
        /// Declared parameter count
        expected: usize,
        /// Tuple length
        got: usize,
    },

    /// A value can neither be assigned nor widened to its slot type
    #[error("{member}: value {value} in {tuple} is not compatible with {target}")]
    IncompatibleValue {
        /// Declaring method or property
        member: String,
        /// Declared tuple
        tuple: String,
        /// Offending value
        value: String,
        /// Slot type
        target: String,
    },

    /// Null assigned to a non-nullable slot
    #[error("{member}: null in {tuple} is not allowed for {target}")]
    NullNotAllowed {
        /// Declaring method or property
        member: String,
        /// Declared tuple
        tuple: String,
        /// Slot type
        target: String,
    },

    /// Parameter values declared on a property without a setter
    #[error("{container}: property \"{property}\" is read-only and cannot take parameter values")]
    ReadOnlyProperty {
        /// Container type name
        container: String,
        /// Property name
        property: String,
    },

    /// A property declares an empty parameter list
    #[error("{container}: property \"{property}\" declares no parameter values")]
    EmptyParameterValues {
        /// Container type name
        container: String,
        /// Property name
        property: String,
    },

    /// A parameter set already holds a value for the name
    #[error("parameter \"{name}\" is assigned more than once")]
    DuplicateParameter {
        /// Parameter name
        name: String,
    },

    /// More than one benchmark is flagged as baseline
    #[error("{container}: only one baseline is allowed, found {}", .benchmarks.join(", "))]
    MultipleBaselines {
        /// Container type name
        container: String,
        /// Baseline benchmark names
        benchmarks: Vec<String>,
    },

    /// Two members share a name
    #[error("{container}: member \"{name}\" is registered more than once")]
    DuplicateMember {
        /// Container type name
        container: String,
        /// Member name
        name: String,
    },
}
