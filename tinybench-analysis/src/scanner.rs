//! Container Scanning

use crate::builders;
use crate::error::ConfigurationError;
use crate::references::ContainerReference;
use tinybench_core::BenchmarksContainer;

/// Options controlling reference resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Resolve init and warmup methods by naming convention when no marker is present
    pub use_conventions: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            use_conventions: true,
        }
    }
}

/// Build the references of container type `C`
pub fn scan<C: BenchmarksContainer>(options: &ScanOptions) -> Result<ContainerReference<C>, ConfigurationError> {
    let descriptor = C::describe();
    builders::build_container(&descriptor, options)
}
