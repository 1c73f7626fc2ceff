//! Structural-change notifications.
//!
//! Graphs keep weak references to their listeners, so dropping a marker is
//! all it takes to unsubscribe it. Dead entries are pruned on every
//! subscription and notification, so a graph that is only read never
//! accumulates them.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use super::{EdgeId, VertexId};

/// Receives structural changes of a graph. Every method defaults to a no-op.
pub trait StructureListener {
    /// A vertex was created.
    fn vertex_added(&mut self, _vertex: VertexId) {}

    /// A vertex was deleted (its incident edges were deleted before).
    fn vertex_deleted(&mut self, _vertex: VertexId) {}

    /// An edge was created.
    fn edge_added(&mut self, _edge: EdgeId) {}

    /// An edge was deleted.
    fn edge_deleted(&mut self, _edge: EdgeId) {}

    /// The vertex index capacity grew to `new_max`.
    fn max_vertex_count_increased(&mut self, _new_max: usize) {}

    /// The edge index capacity grew to `new_max`.
    fn max_edge_count_increased(&mut self, _new_max: usize) {}
}

/// Weakly-held list of structural listeners.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: RefCell<Vec<Weak<RefCell<dyn StructureListener>>>>,
}

impl ListenerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes `listener`. The registry only keeps a weak reference.
    pub fn subscribe(&self, listener: &Rc<RefCell<dyn StructureListener>>) {
        let mut listeners = self.listeners.borrow_mut();
        listeners.retain(|weak| weak.strong_count() > 0);
        listeners.push(Rc::downgrade(listener));
    }

    /// Removes `listener`. Returns `true` if it was subscribed.
    pub fn unsubscribe(&self, listener: &Rc<RefCell<dyn StructureListener>>) -> bool {
        let target = Rc::downgrade(listener);
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|weak| !Weak::ptr_eq(weak, &target));
        before != listeners.len()
    }

    /// Number of listeners that are still alive.
    pub fn len(&self) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    /// Returns `true` if no live listener is subscribed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of stored entries, dead ones included.
    #[cfg(test)]
    pub(crate) fn entry_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Delivers one event to every live listener, pruning dead ones.
    ///
    /// # Panics
    /// Panics if a listener is mutably borrowed elsewhere, which cannot happen
    /// for markers since they never hand out borrows of their storage.
    pub fn notify(&self, mut event: impl FnMut(&mut dyn StructureListener)) {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|weak| match weak.upgrade() {
            Some(listener) => {
                event(&mut *listener.borrow_mut());
                true
            }
            None => false,
        });
        if listeners.len() != before {
            tracing::trace!(pruned = before - listeners.len(), "pruned dropped structure listeners");
        }
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("live", &self.len())
            .finish()
    }
}
