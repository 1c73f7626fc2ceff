//! Typed key→value mappings used as algorithm inputs and results.
//!
//! - [`Function`]: partial mapping with optional mutation and lazy entries
//! - [`BooleanFunction`]: total predicate (subgraph and navigability filters)
//! - numeric views: [`IntFunction`], [`LongFunction`], [`DoubleFunction`]
//! - `binary`: two-argument variants and the dense [`VertexMatrix`]
//! - `permutation`: index↔value bijections linearizing vertex sets
//!
//! Closures are functions too: any `Fn(K) -> V` is a total [`Function`] and
//! any `Fn(K) -> bool` a [`BooleanFunction`].

pub mod binary;
pub mod permutation;

use crate::error::{Error, Result};

pub use binary::{BinaryDoubleFunction, BinaryFunction, Relation, VertexMatrix};
pub use permutation::{Permutation, PermutationBuilder};

/// A partial mapping from `K` to `V`.
pub trait Function<K, V> {
    /// The value for `key`, or `None` where undefined.
    fn get(&self, key: K) -> Option<V>;

    /// Returns `true` if `key` has a value.
    fn is_defined(&self, key: K) -> bool {
        self.get(key).is_some()
    }

    /// Assigns `value` to `key`, returning the previous value.
    ///
    /// # Errors
    /// Immutable functions return [`Error::Unsupported`].
    fn set(&mut self, _key: K, _value: V) -> Result<Option<V>> {
        Err(Error::Unsupported("set on an immutable function"))
    }

    /// Lazily enumerates the defined `(key, value)` pairs.
    ///
    /// Total functions such as closures have no enumerable domain and yield
    /// nothing.
    fn entries<'a>(&'a self) -> Box<dyn Iterator<Item = (K, V)> + 'a>
    where
        K: 'a,
        V: 'a,
    {
        Box::new(std::iter::empty())
    }
}

impl<K, V, F> Function<K, V> for F
where
    F: Fn(K) -> V,
{
    #[inline]
    fn get(&self, key: K) -> Option<V> {
        Some(self(key))
    }

    #[inline]
    fn is_defined(&self, _key: K) -> bool {
        true
    }
}

/// A total predicate over `K`.
pub trait BooleanFunction<K> {
    /// Evaluates the predicate.
    fn get(&self, key: K) -> bool;
}

impl<K, F> BooleanFunction<K> for F
where
    F: Fn(K) -> bool,
{
    #[inline]
    fn get(&self, key: K) -> bool {
        self(key)
    }
}

/// An `i32`-valued [`Function`].
pub trait IntFunction<K>: Function<K, i32> {}
impl<K, T: Function<K, i32> + ?Sized> IntFunction<K> for T {}

/// An `i64`-valued [`Function`].
pub trait LongFunction<K>: Function<K, i64> {}
impl<K, T: Function<K, i64> + ?Sized> LongFunction<K> for T {}

/// An `f64`-valued [`Function`].
pub trait DoubleFunction<K>: Function<K, f64> {}
impl<K, T: Function<K, f64> + ?Sized> DoubleFunction<K> for T {}
