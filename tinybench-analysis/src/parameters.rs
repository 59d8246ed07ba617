//! Parameter Combinatorics
//!
//! A [`ParametersSetCollection`] holds one candidate list per tunable
//! property and enumerates their cross product as an odometer: the rightmost
//! property advances fastest, an exhausted cursor resets and carries into its
//! left neighbour, and enumeration ends when the leftmost cursor overflows.
//!
//! ```text
//! A = [1, 2], B = ["x", "y"]
//!
//!   A=1, B=x
//!   A=1, B=y
//!   A=2, B=x
//!   A=2, B=y
//! ```

use crate::error::ConfigurationError;
use std::fmt;
use std::iter::FusedIterator;
use tinybench_core::Value;

/// One concrete assignment of values to properties
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ParametersSet {
    values: Vec<(String, Value)>,
}

impl ParametersSet {
    /// Empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `value` to `name`; each name can be assigned once
    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Result<(), ConfigurationError> {
        let name = name.into();
        if self.get(&name).is_some() {
            return Err(ConfigurationError::DuplicateParameter { name });
        }
        self.values.push((name, value));
        Ok(())
    }

    /// Value assigned to `name`
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Number of assigned properties
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no property is assigned
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Assignments in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v))
    }
}

impl fmt::Display for ParametersSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", name, value)?;
        }
        Ok(())
    }
}

/// Declared candidate values per property
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParametersSetCollection {
    properties: Vec<(String, Vec<Value>)>,
}

impl ParametersSetCollection {
    /// Collection without tunable properties; it yields a single empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the candidate values of `property`
    pub fn add(
        &mut self,
        property: impl Into<String>,
        values: Vec<Value>,
    ) -> Result<(), ConfigurationError> {
        let property = property.into();
        if self.properties.iter().any(|(name, _)| *name == property) {
            return Err(ConfigurationError::DuplicateParameter { name: property });
        }
        self.properties.push((property, values));
        Ok(())
    }

    /// Number of sets: the product of the list lengths, 1 without properties
    pub fn len(&self) -> usize {
        self.properties
            .iter()
            .map(|(_, values)| values.len())
            .product()
    }

    /// Whether enumeration yields nothing (some list is empty)
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Declared property names, leftmost first
    pub fn properties(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|(name, _)| name.as_str())
    }

    /// The `index`-th set of the enumeration
    pub fn get(&self, mut index: usize) -> Option<ParametersSet> {
        if index >= self.len() {
            return None;
        }
        let mut cursors = vec![0; self.properties.len()];
        for (cursor, (_, values)) in cursors.iter_mut().zip(&self.properties).rev() {
            *cursor = index % values.len();
            index /= values.len();
        }
        Some(self.assemble(&cursors))
    }

    /// Enumerate every set, leftmost property changing slowest
    pub fn iter(&self) -> ParametersSetIter<'_> {
        ParametersSetIter {
            collection: self,
            cursors: vec![0; self.properties.len()],
            remaining: self.len(),
        }
    }

    fn assemble(&self, cursors: &[usize]) -> ParametersSet {
        ParametersSet {
            values: self
                .properties
                .iter()
                .zip(cursors)
                .map(|((name, values), &i)| (name.clone(), values[i].clone()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ParametersSetCollection {
    type Item = ParametersSet;
    type IntoIter = ParametersSetIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Odometer over a [`ParametersSetCollection`]
pub struct ParametersSetIter<'a> {
    collection: &'a ParametersSetCollection,
    cursors: Vec<usize>,
    remaining: usize,
}

impl ParametersSetIter<'_> {
    fn advance(&mut self) {
        for (cursor, (_, values)) in self
            .cursors
            .iter_mut()
            .zip(&self.collection.properties)
            .rev()
        {
            *cursor += 1;
            if *cursor < values.len() {
                return;
            }
            // Carry into the left neighbour
            *cursor = 0;
        }
    }
}

impl Iterator for ParametersSetIter<'_> {
    type Item = ParametersSet;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let set = self.collection.assemble(&self.cursors);
        self.remaining -= 1;
        self.advance();
        Some(set)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ParametersSetIter<'_> {}

impl FusedIterator for ParametersSetIter<'_> {}
