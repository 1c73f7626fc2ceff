//! Visitor compositions.
//!
//! Both compositions hold shared handles (`Rc<RefCell<V>>`) so the caller can
//! keep a handle to read a visitor's results after the run. The member vector
//! is only allocated on the first registration; firing an event on an empty
//! composition touches no memory.

use core::ops::ControlFlow;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::Visitor;

#[inline]
fn same<V: ?Sized>(a: &Rc<RefCell<V>>, b: &Rc<RefCell<V>>) -> bool {
    Rc::as_ptr(a).cast::<()>() == Rc::as_ptr(b).cast::<()>()
}

/// Ordered composition of visitors; the same visitor may be registered twice
/// and then receives every event twice.
pub struct VisitorList<V: ?Sized> {
    members: Option<Vec<Rc<RefCell<V>>>>,
}

impl<V: ?Sized> VisitorList<V> {
    /// Creates an empty list without allocating.
    pub const fn new() -> Self {
        Self { members: None }
    }

    /// Appends `visitor`.
    pub fn add(&mut self, visitor: Rc<RefCell<V>>) {
        self.members.get_or_insert_with(Vec::new).push(visitor);
    }

    /// Removes the first registration of `visitor`. Returns `true` if found.
    pub fn remove(&mut self, visitor: &Rc<RefCell<V>>) -> bool {
        let Some(members) = self.members.as_mut() else {
            return false;
        };
        match members.iter().position(|member| same(member, visitor)) {
            Some(index) => {
                members.remove(index);
                true
            }
            None => false,
        }
    }

    /// Removes every visitor.
    pub fn clear(&mut self) {
        if let Some(members) = self.members.as_mut() {
            members.clear();
        }
    }

    /// Number of registrations.
    pub fn len(&self) -> usize {
        self.members.as_ref().map_or(0, Vec::len)
    }

    /// Returns `true` if no visitor is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if `visitor` is registered.
    pub fn contains(&self, visitor: &Rc<RefCell<V>>) -> bool {
        self.iter().any(|member| same(member, visitor))
    }

    /// Iterates over the registered visitors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Rc<RefCell<V>>> + '_ {
        self.members.iter().flatten()
    }

    /// Delivers one event to every member.
    ///
    /// All members see the event even if an earlier one breaks; the result is
    /// `Break` if any member asked for it.
    #[inline]
    pub fn fire(&self, mut event: impl FnMut(&mut V) -> ControlFlow<()>) -> ControlFlow<()> {
        let mut flow = ControlFlow::Continue(());
        for member in self.iter() {
            if event(&mut *member.borrow_mut()).is_break() {
                flow = ControlFlow::Break(());
            }
        }
        flow
    }
}

impl<V: Visitor + ?Sized> VisitorList<V> {
    /// Resets every member.
    pub fn reset_all(&self) {
        for member in self.iter() {
            member.borrow_mut().reset();
        }
    }
}

impl<V: ?Sized> Default for VisitorList<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: ?Sized> fmt::Debug for VisitorList<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisitorList").field("len", &self.len()).finish()
    }
}

/// Duplicate-free composition of visitors, compared by identity.
pub struct VisitorSet<V: ?Sized> {
    list: VisitorList<V>,
}

impl<V: ?Sized> VisitorSet<V> {
    /// Creates an empty set without allocating.
    pub const fn new() -> Self {
        Self {
            list: VisitorList::new(),
        }
    }

    /// Adds `visitor`. Returns `false` if it was already a member.
    pub fn add(&mut self, visitor: Rc<RefCell<V>>) -> bool {
        if self.list.contains(&visitor) {
            return false;
        }
        self.list.add(visitor);
        true
    }

    /// Removes `visitor`. Returns `true` if it was a member.
    pub fn remove(&mut self, visitor: &Rc<RefCell<V>>) -> bool {
        self.list.remove(visitor)
    }

    /// Removes every visitor.
    pub fn clear(&mut self) {
        self.list.clear();
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Returns `true` if `visitor` is a member.
    pub fn contains(&self, visitor: &Rc<RefCell<V>>) -> bool {
        self.list.contains(visitor)
    }

    /// Delivers one event to every member. See [`VisitorList::fire`].
    #[inline]
    pub fn fire(&self, event: impl FnMut(&mut V) -> ControlFlow<()>) -> ControlFlow<()> {
        self.list.fire(event)
    }
}

impl<V: Visitor + ?Sized> VisitorSet<V> {
    /// Resets every member.
    pub fn reset_all(&self) {
        self.list.reset_all();
    }
}

impl<V: ?Sized> Default for VisitorSet<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: ?Sized> fmt::Debug for VisitorSet<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisitorSet").field("len", &self.len()).finish()
    }
}
