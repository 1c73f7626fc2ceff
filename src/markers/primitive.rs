//! `PrimitiveStorage`: dense numeric values plus a presence bit set.
//!
//! Values are stored unboxed; which slots are marked is tracked separately,
//! so `0` is an ordinary mark value and not a sentinel.

use num_traits::Zero;

use super::{grown_capacity, BitSetStorage, MarkStorage};

/// Dense storage of `Copy` numbers (`i32`, `i64`, `f64`, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveStorage<T> {
    values: Vec<T>,
    present: BitSetStorage,
}

impl<T: Copy + Zero + 'static> MarkStorage for PrimitiveStorage<T> {
    type Value = T;

    fn with_capacity(capacity: usize) -> Self {
        Self {
            values: vec![T::zero(); capacity],
            present: BitSetStorage::with_capacity(capacity),
        }
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.values.len()
    }

    fn grow(&mut self, capacity: usize) {
        if capacity > self.values.len() {
            self.values.resize(capacity, T::zero());
            self.present.grow(capacity);
        }
    }

    fn set(&mut self, index: usize, value: T) -> Option<T> {
        if index >= self.values.len() {
            self.grow(grown_capacity(self.values.len(), index));
        }
        let previous = std::mem::replace(&mut self.values[index], value);
        if self.present.insert(index) {
            None
        } else {
            Some(previous)
        }
    }

    #[inline]
    fn get(&self, index: usize) -> Option<T> {
        if self.present.contains_bit(index) {
            Some(self.values[index])
        } else {
            None
        }
    }

    fn unset(&mut self, index: usize) -> bool {
        if self.present.remove(index) {
            self.values[index] = T::zero();
            true
        } else {
            false
        }
    }

    #[inline]
    fn contains(&self, index: usize) -> bool {
        self.present.contains_bit(index)
    }

    #[inline]
    fn len(&self) -> usize {
        self.present.len()
    }

    fn clear(&mut self) {
        self.present.clear();
        self.values.iter_mut().for_each(|value| *value = T::zero());
    }

    #[inline]
    fn advance(&self, cursor: usize) -> Option<(usize, usize)> {
        self.present.advance(cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_a_real_mark() {
        let mut storage: PrimitiveStorage<i64> = PrimitiveStorage::with_capacity(4);
        assert_eq!(storage.get(1), None);
        assert_eq!(storage.set(1, 0), None);
        assert_eq!(storage.get(1), Some(0));
        assert_eq!(storage.set(1, -7), Some(0));
        assert_eq!(storage.len(), 1);
        assert!(storage.unset(1));
        assert_eq!(storage.get(1), None);
    }

    #[test]
    fn doubles_grow_and_iterate() {
        let mut storage: PrimitiveStorage<f64> = PrimitiveStorage::with_capacity(1);
        storage.set(0, 0.5);
        storage.set(70, f64::INFINITY);
        assert!(storage.capacity() > 70);
        assert_eq!(storage.advance(0), Some((0, 1)));
        assert_eq!(storage.advance(1), Some((70, 71)));
        assert_eq!(storage.get(70), Some(f64::INFINITY));
        storage.clear();
        assert_eq!(storage.len(), 0);
        assert_eq!(storage.advance(0), None);
    }
}
