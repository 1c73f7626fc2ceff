//! `PriorityQueue`: an indexed binary min-heap with decrease-key.
//!
//! Items are dense indices (vertex indices in practice). A position table maps
//! every queued item to its heap slot, so `contains`, `priority` and
//! decrease-key run without searching the heap.
//!
//! ### Performance Characteristics
//! | Operation | Complexity | Notes |
//! |-----------|------------|-------|
//! | `push_or_decrease` | \(O(\log n)\) | Sift-up from the new or updated slot |
//! | `pop` | \(O(\log n)\) | Swap with last, sift-down |
//! | `contains` / `priority` | \(O(1)\) | Position table lookup |

use core::fmt;

#[derive(Debug, Clone, Copy)]
struct Entry<P> {
    item: usize,
    priority: P,
}

/// A min-priority queue over dense item indices.
///
/// Priorities only need `PartialOrd`; incomparable values (NaN) never win a
/// comparison, so they sink to the bottom.
#[derive(Clone)]
pub struct PriorityQueue<P> {
    heap: Vec<Entry<P>>,
    positions: Vec<Option<usize>>,
}

impl<P: PartialOrd + Copy> PriorityQueue<P> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            heap: Vec::new(),
            positions: Vec::new(),
        }
    }

    /// Creates an empty queue for items `< capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            positions: vec![None; capacity],
        }
    }

    /// Returns the number of queued items.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns `true` if the queue is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns `true` if `item` is queued.
    #[inline]
    pub fn contains(&self, item: usize) -> bool {
        matches!(self.positions.get(item), Some(Some(_)))
    }

    /// The current priority of `item`, if queued.
    #[inline]
    pub fn priority(&self, item: usize) -> Option<P> {
        let slot = (*self.positions.get(item)?)?;
        Some(self.heap[slot].priority)
    }

    /// Queues `item` with `priority`, or lowers its priority if it is queued
    /// with a higher one.
    ///
    /// Returns `true` if the queue changed.
    pub fn push_or_decrease(&mut self, item: usize, priority: P) -> bool {
        if item >= self.positions.len() {
            self.positions.resize((item + 1).max(self.positions.len() * 2), None);
        }
        match self.positions[item] {
            Some(slot) => {
                if priority < self.heap[slot].priority {
                    self.heap[slot].priority = priority;
                    self.sift_up(slot);
                    true
                } else {
                    false
                }
            }
            None => {
                self.heap.push(Entry { item, priority });
                let slot = self.heap.len() - 1;
                self.positions[item] = Some(slot);
                self.sift_up(slot);
                true
            }
        }
    }

    /// The minimum item and its priority, without removing it.
    pub fn peek(&self) -> Option<(usize, P)> {
        self.heap.first().map(|entry| (entry.item, entry.priority))
    }

    /// Removes and returns the minimum item and its priority.
    pub fn pop(&mut self) -> Option<(usize, P)> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let entry = self.heap.pop()?;
        self.positions[entry.item] = None;
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some((entry.item, entry.priority))
    }

    /// Removes every item.
    pub fn clear(&mut self) {
        for entry in self.heap.drain(..) {
            self.positions[entry.item] = None;
        }
    }

    fn sift_up(&mut self, mut node: usize) {
        while node > 0 {
            let parent = (node - 1) / 2;
            if self.less(node, parent) {
                self.swap(parent, node);
                node = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut node: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * node + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let mut smaller = left;
            if right < len && self.less(right, left) {
                smaller = right;
            }

            if self.less(smaller, node) {
                self.swap(node, smaller);
                node = smaller;
            } else {
                break;
            }
        }
    }

    #[inline]
    fn less(&self, a: usize, b: usize) -> bool {
        self.heap[a].priority < self.heap[b].priority
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.positions[self.heap[a].item] = Some(a);
        self.positions[self.heap[b].item] = Some(b);
    }
}

impl<P: PartialOrd + Copy> Default for PriorityQueue<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: fmt::Debug> fmt::Debug for PriorityQueue<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("len", &self.heap.len())
            .finish()
    }
}
