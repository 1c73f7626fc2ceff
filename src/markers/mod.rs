//! Graph markers: associative arrays keyed by vertex or edge id.
//!
//! A [`Marker`] couples one backing [`MarkStorage`] with the graph it was
//! created for. It subscribes to the graph's listener registry, so:
//! - capacity growth resizes the storage without losing marks;
//! - deleting a vertex or edge removes its mark.
//!
//! Storages are organized by encoding:
//! - `array`: dense `Vec<Option<T>>`
//! - `bit_set`: one bit per element, no value
//! - `primitive`: dense numeric values with a presence bit set
//! - `hash`: sparse index map, footprint independent of graph capacity
//!
//! Every storage presents the same contract; which one to pick is purely a
//! footprint/performance decision.

pub mod array;
pub mod bit_set;
pub mod hash;
pub mod primitive;
pub mod subgraph;

use std::cell::RefCell;
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use crate::error::Result;
use crate::functions::{BooleanFunction, Function};
use crate::graph::{EdgeId, ElementKind, Graph, GraphElement, GraphId, StructureListener, VertexId};

pub use array::ArrayStorage;
pub use bit_set::BitSetStorage;
pub use hash::HashStorage;
pub use primitive::PrimitiveStorage;
pub use subgraph::SubgraphMarker;

/// Backing storage of a marker, addressed by dense element index.
///
/// Implementations must keep `len` incrementally and must accept indices
/// beyond their current capacity in `set` by growing.
pub trait MarkStorage: 'static {
    /// Stored value type.
    type Value: Clone;

    /// Creates an empty storage able to hold indices `< capacity` without
    /// reallocating.
    fn with_capacity(capacity: usize) -> Self;

    /// Current index capacity.
    fn capacity(&self) -> usize;

    /// Ensures indices `< capacity` are addressable. Never shrinks.
    fn grow(&mut self, capacity: usize);

    /// Stores `value` at `index`, returning the previous value.
    fn set(&mut self, index: usize, value: Self::Value) -> Option<Self::Value>;

    /// The value at `index`, if marked.
    fn get(&self, index: usize) -> Option<Self::Value>;

    /// Removes the mark at `index`. Returns `true` if it was marked.
    fn unset(&mut self, index: usize) -> bool;

    /// Returns `true` if `index` is marked.
    fn contains(&self, index: usize) -> bool;

    /// Number of marked indices.
    fn len(&self) -> usize;

    /// Removes every mark.
    fn clear(&mut self);

    /// Positional iteration: returns the first marked index at or after
    /// `cursor` together with the cursor to continue from.
    fn advance(&self, cursor: usize) -> Option<(usize, usize)>;
}

/// Doubling growth target for an out-of-range index.
#[inline]
pub(crate) fn grown_capacity(current: usize, index: usize) -> usize {
    (index + 1).max(current.saturating_mul(2))
}

/// The uniform marker contract, shared by all storages.
pub trait GraphMarker<E: GraphElement> {
    /// Value type of the marks.
    type Value;

    /// Marks `element`, returning the previous value if it was marked.
    fn mark(&mut self, element: E, value: Self::Value) -> Option<Self::Value>;

    /// The current mark of `element`.
    fn get_mark(&self, element: E) -> Option<Self::Value>;

    /// Removes the mark of `element`. Returns `true` if it was marked.
    fn remove_mark(&mut self, element: E) -> bool;

    /// Returns `true` if `element` is marked.
    fn is_marked(&self, element: E) -> bool;

    /// Number of marked elements.
    fn size(&self) -> usize;

    /// Returns `true` if nothing is marked.
    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Removes every mark.
    fn clear(&mut self);

    /// The graph this marker is bound to.
    fn graph_id(&self) -> GraphId;
}

struct Binding<E, S> {
    storage: S,
    _element: PhantomData<fn() -> E>,
}

impl<E: GraphElement, S: MarkStorage> StructureListener for Binding<E, S> {
    fn vertex_deleted(&mut self, vertex: VertexId) {
        if E::KIND == ElementKind::Vertex {
            self.storage.unset(vertex.index());
        }
    }

    fn edge_deleted(&mut self, edge: EdgeId) {
        if E::KIND == ElementKind::Edge {
            self.storage.unset(edge.index());
        }
    }

    fn max_vertex_count_increased(&mut self, new_max: usize) {
        if E::KIND == ElementKind::Vertex {
            tracing::trace!(new_max, "growing vertex marker storage");
            self.storage.grow(new_max);
        }
    }

    fn max_edge_count_increased(&mut self, new_max: usize) {
        if E::KIND == ElementKind::Edge {
            tracing::trace!(new_max, "growing edge marker storage");
            self.storage.grow(new_max);
        }
    }
}

/// A marker over elements `E` of one graph, backed by storage `S`.
///
/// The marker owns its storage jointly with the graph's listener registry,
/// which only holds a weak reference: dropping the marker unsubscribes it.
/// Markers are `!Send` and `!Sync`.
pub struct Marker<E, S> {
    binding: Rc<RefCell<Binding<E, S>>>,
    graph: GraphId,
}

/// Dense array marker over any element kind.
pub type ArrayGraphMarker<E, T> = Marker<E, ArrayStorage<T>>;
/// Dense array vertex marker.
pub type ArrayVertexMarker<T> = Marker<VertexId, ArrayStorage<T>>;
/// Dense array edge marker.
pub type ArrayEdgeMarker<T> = Marker<EdgeId, ArrayStorage<T>>;
/// Bit-set vertex marker.
pub type BitSetVertexMarker = Marker<VertexId, BitSetStorage>;
/// Bit-set edge marker.
pub type BitSetEdgeMarker = Marker<EdgeId, BitSetStorage>;
/// `i32` vertex marker.
pub type IntegerVertexMarker = Marker<VertexId, PrimitiveStorage<i32>>;
/// `i32` edge marker.
pub type IntegerEdgeMarker = Marker<EdgeId, PrimitiveStorage<i32>>;
/// `i64` vertex marker.
pub type LongVertexMarker = Marker<VertexId, PrimitiveStorage<i64>>;
/// `i64` edge marker.
pub type LongEdgeMarker = Marker<EdgeId, PrimitiveStorage<i64>>;
/// `f64` vertex marker.
pub type DoubleVertexMarker = Marker<VertexId, PrimitiveStorage<f64>>;
/// `f64` edge marker.
pub type DoubleEdgeMarker = Marker<EdgeId, PrimitiveStorage<f64>>;
/// Sparse vertex marker.
pub type HashVertexMarker<T> = Marker<VertexId, HashStorage<T>>;
/// Sparse edge marker.
pub type HashEdgeMarker<T> = Marker<EdgeId, HashStorage<T>>;

impl<E: GraphElement, S: MarkStorage> Marker<E, S> {
    /// Creates an empty marker bound to `graph`, sized to its current capacity.
    pub fn new<G: Graph>(graph: &G) -> Self {
        let binding = Rc::new(RefCell::new(Binding {
            storage: S::with_capacity(E::capacity_in(graph)),
            _element: PhantomData,
        }));
        let listener: Rc<RefCell<dyn StructureListener>> = binding.clone();
        graph.listeners().subscribe(&listener);
        Self {
            binding,
            graph: graph.id(),
        }
    }

    /// A second handle onto the same storage, used when an algorithm and one
    /// of its visitors must both see the same marks.
    pub(crate) fn share(&self) -> Self {
        Self {
            binding: Rc::clone(&self.binding),
            graph: self.graph,
        }
    }

    /// Marks `element`, returning the previous value if it was marked.
    #[inline]
    pub fn mark(&mut self, element: E, value: S::Value) -> Option<S::Value> {
        self.binding.borrow_mut().storage.set(element.index(), value)
    }

    /// The current mark of `element`.
    #[inline]
    pub fn get_mark(&self, element: E) -> Option<S::Value> {
        self.binding.borrow().storage.get(element.index())
    }

    /// The current mark of `element`, or `default` if unmarked.
    #[inline]
    pub fn get_mark_or(&self, element: E, default: S::Value) -> S::Value {
        self.get_mark(element).unwrap_or(default)
    }

    /// Removes the mark of `element`. Returns `true` if it was marked.
    #[inline]
    pub fn remove_mark(&mut self, element: E) -> bool {
        self.binding.borrow_mut().storage.unset(element.index())
    }

    /// Returns `true` if `element` is marked.
    #[inline]
    pub fn is_marked(&self, element: E) -> bool {
        self.binding.borrow().storage.contains(element.index())
    }

    /// Number of marked elements.
    #[inline]
    pub fn size(&self) -> usize {
        self.binding.borrow().storage.len()
    }

    /// Returns `true` if nothing is marked.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Removes every mark.
    pub fn clear(&mut self) {
        self.binding.borrow_mut().storage.clear();
    }

    /// Index capacity of the backing storage.
    pub fn capacity(&self) -> usize {
        self.binding.borrow().storage.capacity()
    }

    /// The graph this marker is bound to.
    pub fn graph_id(&self) -> GraphId {
        self.graph
    }

    /// Lazily iterates over the marked elements.
    ///
    /// Creating a new iterator restarts from the beginning. Marks added or
    /// removed through other handles during iteration may or may not be seen.
    pub fn marked_elements(&self) -> MarkedElements<'_, E, S> {
        MarkedElements {
            binding: &self.binding,
            cursor: 0,
        }
    }
}

impl<E: GraphElement> Marker<E, BitSetStorage> {
    /// Marks `element`; returns `true` if it was not marked before.
    #[inline]
    pub fn try_mark(&mut self, element: E) -> bool {
        self.mark(element, ()).is_none()
    }
}

impl<E: GraphElement, S: MarkStorage> GraphMarker<E> for Marker<E, S> {
    type Value = S::Value;

    fn mark(&mut self, element: E, value: S::Value) -> Option<S::Value> {
        Marker::mark(self, element, value)
    }

    fn get_mark(&self, element: E) -> Option<S::Value> {
        Marker::get_mark(self, element)
    }

    fn remove_mark(&mut self, element: E) -> bool {
        Marker::remove_mark(self, element)
    }

    fn is_marked(&self, element: E) -> bool {
        Marker::is_marked(self, element)
    }

    fn size(&self) -> usize {
        Marker::size(self)
    }

    fn clear(&mut self) {
        Marker::clear(self)
    }

    fn graph_id(&self) -> GraphId {
        self.graph
    }
}

impl<E: GraphElement, S: MarkStorage> Function<E, S::Value> for Marker<E, S> {
    fn get(&self, key: E) -> Option<S::Value> {
        self.get_mark(key)
    }

    fn is_defined(&self, key: E) -> bool {
        self.is_marked(key)
    }

    fn set(&mut self, key: E, value: S::Value) -> Result<Option<S::Value>> {
        Ok(self.mark(key, value))
    }

    fn entries<'a>(&'a self) -> Box<dyn Iterator<Item = (E, S::Value)> + 'a>
    where
        E: 'a,
        S::Value: 'a,
    {
        Box::new(
            self.marked_elements()
                .filter_map(move |element| self.get_mark(element).map(|value| (element, value))),
        )
    }
}

impl<E: GraphElement> BooleanFunction<E> for Marker<E, BitSetStorage> {
    fn get(&self, key: E) -> bool {
        self.is_marked(key)
    }
}

impl<E: GraphElement, S: MarkStorage> fmt::Debug for Marker<E, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Marker")
            .field("graph", &self.graph)
            .field("size", &self.size())
            .field("capacity", &self.capacity())
            .finish()
    }
}

/// Lazy iterator over the marked elements of a [`Marker`].
pub struct MarkedElements<'a, E, S> {
    binding: &'a RefCell<Binding<E, S>>,
    cursor: usize,
}

impl<'a, E: GraphElement, S: MarkStorage> Iterator for MarkedElements<'a, E, S> {
    type Item = E;

    fn next(&mut self) -> Option<E> {
        let binding = self.binding.borrow();
        let (index, next) = binding.storage.advance(self.cursor)?;
        self.cursor = next;
        Some(E::from_index(index))
    }
}
