//! Reference Registry
//!
//! Session-owned cache of container references keyed by container type.

use crate::error::ConfigurationError;
use crate::references::ContainerReference;
use crate::scanner::{ScanOptions, scan};
use fxhash::FxHashMap;
use std::any::{Any, TypeId};
use std::rc::Rc;
use tinybench_core::BenchmarksContainer;

/// Builds each container's references once per session
#[derive(Default)]
pub struct ReferenceRegistry {
    options: ScanOptions,
    entries: FxHashMap<TypeId, Rc<dyn Any>>,
}

impl ReferenceRegistry {
    /// Empty registry resolving with `options`
    pub fn new(options: ScanOptions) -> Self {
        Self {
            options,
            entries: FxHashMap::default(),
        }
    }

    /// Options used when scanning
    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Cached references of `C`, scanning on first use
    pub fn get_or_scan<C: BenchmarksContainer>(&mut self) -> Result<Rc<ContainerReference<C>>, ConfigurationError> {
        let id = TypeId::of::<C>();
        if let Some(entry) = self.entries.get(&id) {
            if let Ok(reference) = Rc::clone(entry).downcast::<ContainerReference<C>>() {
                return Ok(reference);
            }
        }

        let reference = Rc::new(scan::<C>(&self.options)?);
        self.entries.insert(id, Rc::clone(&reference) as Rc<dyn Any>);
        Ok(reference)
    }

    /// Number of cached container types
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is cached
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
