//! `ArrayStorage`: dense `Vec<Option<T>>` indexed by element id.

use super::{grown_capacity, MarkStorage};

/// Dense storage of arbitrary values.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayStorage<T> {
    slots: Vec<Option<T>>,
    len: usize,
}

impl<T> ArrayStorage<T> {
    /// Iterates over `(index, &value)` in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|value| (index, value)))
    }
}

impl<T: Clone + 'static> MarkStorage for ArrayStorage<T> {
    type Value = T;

    fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self { slots, len: 0 }
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn grow(&mut self, capacity: usize) {
        if capacity > self.slots.len() {
            self.slots.resize_with(capacity, || None);
        }
    }

    fn set(&mut self, index: usize, value: T) -> Option<T> {
        if index >= self.slots.len() {
            self.grow(grown_capacity(self.slots.len(), index));
        }
        let previous = self.slots[index].replace(value);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    #[inline]
    fn get(&self, index: usize) -> Option<T> {
        self.slots.get(index)?.clone()
    }

    fn unset(&mut self, index: usize) -> bool {
        match self.slots.get_mut(index).and_then(Option::take) {
            Some(_) => {
                self.len -= 1;
                true
            }
            None => false,
        }
    }

    #[inline]
    fn contains(&self, index: usize) -> bool {
        matches!(self.slots.get(index), Some(Some(_)))
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.len = 0;
    }

    fn advance(&self, cursor: usize) -> Option<(usize, usize)> {
        let offset = self.slots.get(cursor..)?.iter().position(Option::is_some)?;
        let index = cursor + offset;
        Some((index, index + 1))
    }
}
