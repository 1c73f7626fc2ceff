//! `BitSetStorage`: one bit per element index.
//!
//! The mark value is `()`: a bit-set marker only answers "is this element
//! marked". Words are scanned with `trailing_zeros`, so iteration skips
//! 64 unmarked indices at a time.

use super::{grown_capacity, MarkStorage};

const WORD_BITS: usize = u64::BITS as usize;

#[inline]
fn words_for(bits: usize) -> usize {
    (bits + WORD_BITS - 1) / WORD_BITS
}

/// A growable bit set with an incrementally maintained population count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitSetStorage {
    words: Vec<u64>,
    capacity: usize,
    /// Number of set bits.
    len: usize,
}

impl BitSetStorage {
    /// Sets bit `bit`. Returns `true` if it was not set before.
    pub fn insert(&mut self, bit: usize) -> bool {
        if bit >= self.capacity {
            self.grow(grown_capacity(self.capacity, bit));
        }
        let mask = 1u64 << (bit % WORD_BITS);
        let word = &mut self.words[bit / WORD_BITS];
        if *word & mask == 0 {
            *word |= mask;
            self.len += 1;
            true
        } else {
            false
        }
    }

    /// Clears bit `bit`. Returns `true` if it was set.
    pub fn remove(&mut self, bit: usize) -> bool {
        let mask = 1u64 << (bit % WORD_BITS);
        match self.words.get_mut(bit / WORD_BITS) {
            Some(word) if *word & mask != 0 => {
                *word &= !mask;
                self.len -= 1;
                true
            }
            _ => false,
        }
    }

    /// Returns `true` if bit `bit` is set.
    #[inline]
    pub fn contains_bit(&self, bit: usize) -> bool {
        self.words
            .get(bit / WORD_BITS)
            .map_or(false, |word| word & (1u64 << (bit % WORD_BITS)) != 0)
    }

    /// Iterates over the set bits in ascending order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            words: self.words.iter().enumerate(),
            current_word: 0,
            word_idx: 0,
        }
    }
}

impl MarkStorage for BitSetStorage {
    type Value = ();

    fn with_capacity(capacity: usize) -> Self {
        Self {
            words: vec![0; words_for(capacity)],
            capacity,
            len: 0,
        }
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn grow(&mut self, capacity: usize) {
        if capacity > self.capacity {
            self.words.resize(words_for(capacity), 0);
            self.capacity = capacity;
        }
    }

    #[inline]
    fn set(&mut self, index: usize, _value: ()) -> Option<()> {
        if self.insert(index) {
            None
        } else {
            Some(())
        }
    }

    #[inline]
    fn get(&self, index: usize) -> Option<()> {
        self.contains_bit(index).then_some(())
    }

    #[inline]
    fn unset(&mut self, index: usize) -> bool {
        self.remove(index)
    }

    #[inline]
    fn contains(&self, index: usize) -> bool {
        self.contains_bit(index)
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        self.words.iter_mut().for_each(|word| *word = 0);
        self.len = 0;
    }

    fn advance(&self, cursor: usize) -> Option<(usize, usize)> {
        let mut word_idx = cursor / WORD_BITS;
        // Mask off bits below the cursor in the first word.
        let mut word = *self.words.get(word_idx)? & (!0u64 << (cursor % WORD_BITS));
        loop {
            if word != 0 {
                let bit = word_idx * WORD_BITS + word.trailing_zeros() as usize;
                return Some((bit, bit + 1));
            }
            word_idx += 1;
            word = *self.words.get(word_idx)?;
        }
    }
}

/// Ascending iterator over the set bits of a [`BitSetStorage`].
pub struct Iter<'a> {
    words: std::iter::Enumerate<std::slice::Iter<'a, u64>>,
    current_word: u64,
    word_idx: usize,
}

impl Iterator for Iter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        loop {
            if self.current_word != 0 {
                let trailing = self.current_word.trailing_zeros();
                self.current_word &= self.current_word - 1;
                return Some(self.word_idx * WORD_BITS + trailing as usize);
            }
            let (idx, &word) = self.words.next()?;
            self.word_idx = idx;
            self.current_word = word;
        }
    }
}
