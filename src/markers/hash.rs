//! `HashStorage`: sparse marks in a hash table over dense vectors.
//!
//! Structure:
//! - **Hash Table**: maps an element index to its position in the dense vectors.
//! - **Dense Vectors**: `keys` and `values`, compacted with `swap_remove`.
//!
//! Memory is proportional to the number of marks, not to graph capacity,
//! which makes this the storage of choice when few elements are marked.
//! Positional iteration walks the dense `keys` vector.

use std::collections::HashMap;

use super::MarkStorage;

/// Sparse storage of arbitrary values.
#[derive(Debug, Clone)]
pub struct HashStorage<T> {
    positions: HashMap<usize, usize>,
    keys: Vec<usize>,
    values: Vec<T>,
    capacity: usize,
}

impl<T: Clone + 'static> MarkStorage for HashStorage<T> {
    type Value = T;

    fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: HashMap::new(),
            keys: Vec::new(),
            values: Vec::new(),
            capacity,
        }
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn grow(&mut self, capacity: usize) {
        self.capacity = self.capacity.max(capacity);
    }

    fn set(&mut self, index: usize, value: T) -> Option<T> {
        self.capacity = self.capacity.max(index + 1);
        match self.positions.get(&index) {
            Some(&pos) => Some(std::mem::replace(&mut self.values[pos], value)),
            None => {
                self.positions.insert(index, self.keys.len());
                self.keys.push(index);
                self.values.push(value);
                None
            }
        }
    }

    #[inline]
    fn get(&self, index: usize) -> Option<T> {
        self.positions.get(&index).map(|&pos| self.values[pos].clone())
    }

    fn unset(&mut self, index: usize) -> bool {
        let Some(pos) = self.positions.remove(&index) else {
            return false;
        };
        self.keys.swap_remove(pos);
        self.values.swap_remove(pos);
        if let Some(&moved) = self.keys.get(pos) {
            self.positions.insert(moved, pos);
        }
        true
    }

    #[inline]
    fn contains(&self, index: usize) -> bool {
        self.positions.contains_key(&index)
    }

    #[inline]
    fn len(&self) -> usize {
        self.keys.len()
    }

    fn clear(&mut self) {
        self.positions.clear();
        self.keys.clear();
        self.values.clear();
    }

    #[inline]
    fn advance(&self, cursor: usize) -> Option<(usize, usize)> {
        self.keys.get(cursor).map(|&index| (index, cursor + 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_keeps_positions_consistent() {
        let mut storage: HashStorage<char> = HashStorage::with_capacity(0);
        storage.set(10, 'a');
        storage.set(20, 'b');
        storage.set(30, 'c');
        assert!(storage.unset(10));
        // 30 moved into the freed slot.
        assert_eq!(storage.get(30), Some('c'));
        assert!(storage.unset(30));
        assert_eq!(storage.get(20), Some('b'));
        assert_eq!(storage.len(), 1);
        assert!(!storage.unset(10));
    }

    #[test]
    fn iteration_visits_every_mark_once() {
        let mut storage: HashStorage<u32> = HashStorage::with_capacity(4);
        for index in [7, 3, 1_000_000] {
            storage.set(index, index as u32);
        }
        assert!(storage.capacity() > 1_000_000);
        let mut cursor = 0;
        let mut seen = Vec::new();
        while let Some((index, next)) = storage.advance(cursor) {
            seen.push(index);
            cursor = next;
        }
        seen.sort_unstable();
        assert_eq!(seen, vec![3, 7, 1_000_000]);
    }
}
