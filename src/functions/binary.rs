//! Two-argument functions and the dense vertex matrix.
//!
//! All-pairs results are exposed as [`VertexMatrix`]: a flat row-major
//! `n × n` buffer whose rows and columns are addressed through a shared
//! [`Permutation`] of the vertices.
//!
//! ### Performance Characteristics
//! | Operation | Complexity | Notes |
//! |-----------|------------|-------|
//! | `get` by vertex pair | \(O(1)\) average | Two permutation lookups |
//! | `cell` by index pair | \(O(1)\) | Direct row-major offset |

use std::rc::Rc;

use crate::error::{Error, Result};
use crate::graph::VertexId;

use super::Permutation;

/// A partial mapping from pairs `(A, B)` to `V`.
pub trait BinaryFunction<A, B, V> {
    /// The value for `(a, b)`, or `None` where undefined.
    fn get(&self, a: A, b: B) -> Option<V>;

    /// Returns `true` if `(a, b)` has a value.
    fn is_defined(&self, a: A, b: B) -> bool {
        self.get(a, b).is_some()
    }

    /// Assigns `value` to `(a, b)`.
    ///
    /// # Errors
    /// Immutable functions return [`Error::Unsupported`].
    fn set(&mut self, _a: A, _b: B, _value: V) -> Result<Option<V>> {
        Err(Error::Unsupported("set on an immutable binary function"))
    }
}

impl<A, B, V, F> BinaryFunction<A, B, V> for F
where
    F: Fn(A, B) -> V,
{
    #[inline]
    fn get(&self, a: A, b: B) -> Option<V> {
        Some(self(a, b))
    }
}

/// An `f64`-valued [`BinaryFunction`], e.g. an A* heuristic.
pub trait BinaryDoubleFunction<A, B>: BinaryFunction<A, B, f64> {}
impl<A, B, T: BinaryFunction<A, B, f64> + ?Sized> BinaryDoubleFunction<A, B> for T {}

/// A binary predicate.
pub trait Relation<A, B> {
    /// Returns `true` if `a` is related to `b`.
    fn get(&self, a: A, b: B) -> bool;
}

impl<A, B, F> Relation<A, B> for F
where
    F: Fn(A, B) -> bool,
{
    #[inline]
    fn get(&self, a: A, b: B) -> bool {
        self(a, b)
    }
}

/// Immutable `n × n` matrix of optional cells indexed by vertex pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexMatrix<T> {
    cells: Vec<Option<T>>,
    permutation: Rc<Permutation<VertexId>>,
}

impl<T> VertexMatrix<T> {
    /// Creates a matrix with every cell undefined.
    pub(crate) fn new(permutation: Rc<Permutation<VertexId>>) -> Self {
        let n = permutation.len();
        let mut cells = Vec::with_capacity(n * n);
        cells.resize_with(n * n, || None);
        Self { cells, permutation }
    }

    /// Side length `n`.
    #[inline]
    pub fn size(&self) -> usize {
        self.permutation.len()
    }

    /// The permutation translating vertices to row/column indices.
    pub fn permutation(&self) -> &Rc<Permutation<VertexId>> {
        &self.permutation
    }

    /// The cell at `(row, col)`.
    ///
    /// # Panics
    /// Panics if an index is `>= size()`.
    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> Option<&T> {
        let n = self.size();
        assert!(row < n && col < n, "cell ({row}, {col}) out of bounds for n={n}");
        self.cells[row * n + col].as_ref()
    }

    /// Mutable access to the cell at `(row, col)`.
    ///
    /// # Panics
    /// Panics if an index is `>= size()`.
    #[inline]
    pub(crate) fn cell_mut(&mut self, row: usize, col: usize) -> &mut Option<T> {
        let n = self.size();
        assert!(row < n && col < n, "cell ({row}, {col}) out of bounds for n={n}");
        &mut self.cells[row * n + col]
    }

    /// The cells of row `row` in column order.
    ///
    /// # Panics
    /// Panics if `row >= size()`.
    pub fn row(&self, row: usize) -> &[Option<T>] {
        let n = self.size();
        assert!(row < n, "row {row} out of bounds for n={n}");
        &self.cells[row * n..(row + 1) * n]
    }

    #[inline]
    fn offset(&self, a: VertexId, b: VertexId) -> Option<usize> {
        let row = self.permutation.index_of(&a)?;
        let col = self.permutation.index_of(&b)?;
        Some(row * self.size() + col)
    }
}

impl<T: Clone> BinaryFunction<VertexId, VertexId, T> for VertexMatrix<T> {
    fn get(&self, a: VertexId, b: VertexId) -> Option<T> {
        self.cells[self.offset(a, b)?].clone()
    }
}

impl Relation<VertexId, VertexId> for VertexMatrix<bool> {
    fn get(&self, a: VertexId, b: VertexId) -> bool {
        self.offset(a, b)
            .map_or(false, |offset| self.cells[offset] == Some(true))
    }
}
