//! This module contains utility functionality needed for this crate. Most
//! prominently, it contains the definition of the [ValueSet] used for storing
//! the candidate values of a cell.

use std::fmt::{self, Display, Formatter};
use std::ops::{BitAnd, BitOr, Sub};
use std::slice::Iter;

/// A set of candidate values in the range `[1, max]`, implemented as a bit
/// vector. Each value is represented by one bit in a vector of words, which
/// generally has better performance than a `HashSet` for the small, dense
/// ranges a Sudoku grid deals with.
///
/// All values handed to a `ValueSet` must lie within the bounds given at
/// construction time, and all binary operations require both operands to have
/// the same bounds. Violating either is a programming error and panics.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ValueSet {
    max: usize,
    len: usize,
    content: Vec<u64>
}

fn required_words(max: usize) -> usize {
    (max + 63) >> 6
}

impl ValueSet {

    /// Creates a new, empty `ValueSet` which can hold the values `1` to `max`
    /// (inclusive).
    pub fn empty(max: usize) -> ValueSet {
        assert!(max >= 1, "value set must be able to hold at least one value");

        ValueSet {
            max,
            len: 0,
            content: vec![0u64; required_words(max)]
        }
    }

    /// Creates a new `ValueSet` containing every value from `1` to `max`
    /// (inclusive).
    pub fn full(max: usize) -> ValueSet {
        let mut set = ValueSet::empty(max);

        for word_index in 0..(max >> 6) {
            set.content[word_index] = !0;
        }

        let remainder = max & 63;

        if remainder > 0 {
            set.content[max >> 6] = (1u64 << remainder) - 1;
        }

        set.len = max;
        set
    }

    /// Creates a new `ValueSet` with bounds `[1, max]` that contains exactly
    /// the given `value`.
    pub fn singleton(max: usize, value: usize) -> ValueSet {
        let mut set = ValueSet::empty(max);
        set.insert(value);
        set
    }

    fn index(&self, value: usize) -> (usize, u64) {
        assert!(value >= 1 && value <= self.max,
            "value {} out of set bounds [1, {}]", value, self.max);

        let index = value - 1;
        (index >> 6, 1u64 << (index & 63))
    }

    /// Returns the maximum value this set can contain (inclusive).
    pub fn max(&self) -> usize {
        self.max
    }

    /// Returns the number of values contained in this set.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Indicates whether this set contains no values at all.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Indicates whether this set contains the given value. Values outside
    /// the bounds are never contained.
    pub fn contains(&self, value: usize) -> bool {
        if value < 1 || value > self.max {
            return false;
        }

        let (word_index, mask) = self.index(value);
        self.content[word_index] & mask > 0
    }

    /// Inserts the given value into this set. Returns `true` if and only if
    /// the set changed, i.e. the value was not present before.
    pub fn insert(&mut self, value: usize) -> bool {
        let (word_index, mask) = self.index(value);
        let word = &mut self.content[word_index];

        if *word & mask == 0 {
            *word |= mask;
            self.len += 1;
            true
        }
        else {
            false
        }
    }

    /// Removes the given value from this set. Returns `true` if and only if
    /// the set changed, i.e. the value was present before.
    pub fn remove(&mut self, value: usize) -> bool {
        let (word_index, mask) = self.index(value);
        let word = &mut self.content[word_index];

        if *word & mask > 0 {
            *word &= !mask;
            self.len -= 1;
            true
        }
        else {
            false
        }
    }

    /// If this set holds exactly one value, returns it, otherwise `None`.
    pub fn sole_value(&self) -> Option<usize> {
        if self.len != 1 {
            return None;
        }

        self.iter().next()
    }

    /// Returns an iterator over the values contained in this set in ascending
    /// order.
    pub fn iter(&self) -> ValueSetIter<'_> {
        ValueSetIter {
            word_base: 0,
            current: 0,
            content: self.content.iter()
        }
    }

    fn op_assign(&mut self, other: &ValueSet, op: impl Fn(u64, u64) -> u64)
            -> bool {
        assert!(self.max == other.max,
            "value sets have different bounds ({} and {})", self.max,
            other.max);

        let mut changed = false;

        for (word, &other_word) in
                self.content.iter_mut().zip(other.content.iter()) {
            let before = *word;
            *word = op(before, other_word);
            changed |= before != *word;
        }

        self.len = self.content.iter()
            .map(|word| word.count_ones() as usize)
            .sum();
        changed
    }

    /// Computes the union of this set and `other` and stores the result in
    /// this set. Returns `true` if and only if this set changed.
    pub fn union_assign(&mut self, other: &ValueSet) -> bool {
        self.op_assign(other, |a, b| a | b)
    }

    /// Computes the intersection of this set and `other` and stores the
    /// result in this set. Returns `true` if and only if this set changed.
    pub fn intersect_assign(&mut self, other: &ValueSet) -> bool {
        self.op_assign(other, |a, b| a & b)
    }

    /// Removes all values contained in `other` from this set. Returns `true`
    /// if and only if this set changed.
    pub fn difference_assign(&mut self, other: &ValueSet) -> bool {
        self.op_assign(other, |a, b| a & !b)
    }
}

/// An iterator over the content of a [ValueSet], in ascending order.
pub struct ValueSetIter<'a> {
    word_base: usize,
    current: u64,
    content: Iter<'a, u64>
}

impl<'a> Iterator for ValueSetIter<'a> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.current == 0 {
            let &word = self.content.next()?;
            self.current = word;
            self.word_base += 64;
        }

        // word_base counts past the current word, so back off by 64; the +1
        // maps the zero-based bit index to a one-based value
        let bit = self.current.trailing_zeros() as usize;
        let value = self.word_base - 64 + bit + 1;
        self.current &= self.current - 1;
        Some(value)
    }
}

impl Display for ValueSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut first = true;

        for value in self.iter() {
            if !first {
                write!(f, ",")?;
            }

            write!(f, "{}", value)?;
            first = false;
        }

        Ok(())
    }
}

impl BitOr for &ValueSet {
    type Output = ValueSet;

    fn bitor(self, rhs: &ValueSet) -> ValueSet {
        let mut result = self.clone();
        result.union_assign(rhs);
        result
    }
}

impl BitAnd for &ValueSet {
    type Output = ValueSet;

    fn bitand(self, rhs: &ValueSet) -> ValueSet {
        let mut result = self.clone();
        result.intersect_assign(rhs);
        result
    }
}

impl Sub for &ValueSet {
    type Output = ValueSet;

    fn sub(self, rhs: &ValueSet) -> ValueSet {
        let mut result = self.clone();
        result.difference_assign(rhs);
        result
    }
}

/// Creates a new [ValueSet] with the given maximum that contains the
/// specified elements. First, the maximum value must be specified, then,
/// after a semicolon, a comma-separated list of the contained values.
///
/// ```
/// use sudoku_deduce::values;
///
/// let set = values!(9; 2, 4);
/// assert_eq!(9, set.max());
/// assert!(set.contains(2));
/// assert!(!set.contains(3));
/// ```
#[macro_export]
macro_rules! values {
    ($max:expr; $($es:expr),+) => {
        {
            let mut set = $crate::util::ValueSet::empty($max);
            $(set.insert($es);)+
            set
        }
    };
}
