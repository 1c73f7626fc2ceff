//! `Permutation`: a bijection between `0..len` and a set of values.
//!
//! Built incrementally through [`PermutationBuilder`]; the built value has no
//! mutating methods at all.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::Function;

/// Collects distinct values into a [`Permutation`].
#[derive(Debug, Clone)]
pub struct PermutationBuilder<V> {
    values: Vec<V>,
    inverse: HashMap<V, usize>,
}

impl<V: Copy + Eq + Hash + std::fmt::Debug> PermutationBuilder<V> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self {
            values: Vec::new(),
            inverse: HashMap::new(),
        }
    }

    /// Creates an empty builder with room for `capacity` values.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
            inverse: HashMap::with_capacity(capacity),
        }
    }

    /// Appends `value` and returns its index.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if `value` was already added.
    pub fn add(&mut self, value: V) -> Result<usize> {
        self.insert_new(value).ok_or_else(|| {
            Error::InvalidArgument(format!("{value:?} is already part of the permutation"))
        })
    }

    /// Returns `true` if `value` was already added.
    pub fn contains(&self, value: &V) -> bool {
        self.inverse.contains_key(value)
    }

    /// Appends `value` unless it is present; `None` for a repeat.
    fn insert_new(&mut self, value: V) -> Option<usize> {
        let index = self.values.len();
        match self.inverse.entry(value) {
            Entry::Occupied(_) => None,
            Entry::Vacant(slot) => {
                slot.insert(index);
                self.values.push(value);
                Some(index)
            }
        }
    }

    /// Number of values added so far.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if nothing was added.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Freezes the builder.
    pub fn build(self) -> Permutation<V> {
        Permutation {
            values: self.values,
            inverse: self.inverse,
        }
    }
}

impl<V: Copy + Eq + Hash + std::fmt::Debug> Default for PermutationBuilder<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable bijection `0..len ↔ values`.
///
/// Serializes as the plain value sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(
    into = "Vec<V>",
    try_from = "Vec<V>",
    bound(
        serialize = "V: Serialize + Clone",
        deserialize = "V: Deserialize<'de> + Copy + Eq + Hash + std::fmt::Debug"
    )
)]
pub struct Permutation<V> {
    values: Vec<V>,
    inverse: HashMap<V, usize>,
}

impl<V: Copy + Eq + Hash> Permutation<V> {
    /// Number of values.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the permutation is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The value at `index`.
    #[inline]
    pub fn value(&self, index: usize) -> Option<V> {
        self.values.get(index).copied()
    }

    /// The index of `value`.
    #[inline]
    pub fn index_of(&self, value: &V) -> Option<usize> {
        self.inverse.get(value).copied()
    }

    /// Values in index order.
    pub fn values(&self) -> &[V] {
        &self.values
    }

    /// Iterates over `(index, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, V)> + '_ {
        self.values.iter().copied().enumerate()
    }
}

impl<V: Copy + Eq + Hash> Function<usize, V> for Permutation<V> {
    fn get(&self, index: usize) -> Option<V> {
        self.value(index)
    }

    fn entries<'a>(&'a self) -> Box<dyn Iterator<Item = (usize, V)> + 'a>
    where
        V: 'a,
    {
        Box::new(self.iter())
    }
}

impl<V: PartialEq> PartialEq for Permutation<V> {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl<V> From<Permutation<V>> for Vec<V> {
    fn from(permutation: Permutation<V>) -> Self {
        permutation.values
    }
}

impl<V: Copy + Eq + Hash + std::fmt::Debug> TryFrom<Vec<V>> for Permutation<V> {
    type Error = Error;

    fn try_from(values: Vec<V>) -> Result<Self> {
        let mut builder = PermutationBuilder::with_capacity(values.len());
        for value in values {
            builder.add(value)?;
        }
        Ok(builder.build())
    }
}

impl<V: Copy + Eq + Hash + std::fmt::Debug> FromIterator<V> for PermutationBuilder<V> {
    /// Collects distinct values, silently skipping repeats.
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let mut builder = Self::new();
        for value in iter {
            // repeats keep their first index
            builder.insert_new(value);
        }
        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::VertexId;

    #[test]
    fn bijection() {
        let mut builder = PermutationBuilder::new();
        assert_eq!(builder.add(VertexId::new(7)).unwrap(), 0);
        assert_eq!(builder.add(VertexId::new(3)).unwrap(), 1);
        let permutation = builder.build();
        assert_eq!(permutation.len(), 2);
        assert_eq!(permutation.value(1), Some(VertexId::new(3)));
        assert_eq!(permutation.index_of(&VertexId::new(7)), Some(0));
        assert_eq!(permutation.index_of(&VertexId::new(4)), None);
        assert_eq!(Function::get(&permutation, 5), None);
        assert_eq!(permutation.entries().count(), 2);
    }

    #[test]
    fn duplicates_are_rejected() {
        let mut builder = PermutationBuilder::new();
        builder.add(1u32).unwrap();
        builder.add(2u32).unwrap();
        assert!(matches!(builder.add(1), Err(Error::InvalidArgument(_))));
        let permutation = builder.build();
        assert_eq!(permutation.len(), 2);
        assert_eq!(permutation.index_of(&1), Some(0));
    }

    #[test]
    fn from_iterator_skips_repeats() {
        let permutation = [4u8, 4, 2].into_iter().collect::<PermutationBuilder<_>>().build();
        assert_eq!(permutation.values(), &[4, 2]);
    }

    #[test]
    fn collected_repeats_keep_first_position() {
        let builder: PermutationBuilder<VertexId> =
            [5, 1, 5, 3, 1, 1].into_iter().map(VertexId::new).collect();
        assert_eq!(builder.len(), 3);
        assert!(builder.contains(&VertexId::new(3)));
        assert!(!builder.contains(&VertexId::new(0)));

        let permutation = builder.build();
        assert_eq!(
            permutation.values(),
            &[VertexId::new(5), VertexId::new(1), VertexId::new(3)]
        );
        assert_eq!(permutation.index_of(&VertexId::new(1)), Some(1));
    }

    #[test]
    fn rejects_duplicates_from_vec() {
        assert!(Permutation::try_from(vec![1u8, 2, 1]).is_err());
        let permutation = Permutation::try_from(vec![9u8, 8]).unwrap();
        assert_eq!(permutation.index_of(&8), Some(1));
    }
}
