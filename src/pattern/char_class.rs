//! Character class bitmap over the 16-bit code-unit range.

use std::fmt;

use bitvec::array::BitArray;
use bitvec::order::Lsb0;

/// Number of distinct code units a class can hold.
pub const UNIT_COUNT: usize = 1 << 16;

type Bitmap = BitArray<[u64; UNIT_COUNT / 64], Lsb0>;

/// Set of UTF-16 code units with O(1) membership.
///
/// Built once while compiling a `[...]` class and never changed while
/// matching.
#[derive(Clone, PartialEq, Eq)]
pub struct CharClass {
    bits: Bitmap,
}

impl Default for CharClass {
    fn default() -> Self {
        Self::new()
    }
}

impl CharClass {
    pub fn new() -> Self {
        Self {
            bits: BitArray::new([0u64; UNIT_COUNT / 64]),
        }
    }

    /// Class holding every unit for which `pred` is true.
    pub fn from_predicate(pred: impl Fn(u16) -> bool) -> Self {
        let mut class = Self::new();
        for c in 0..=u16::MAX {
            if pred(c) {
                class.add_char(c);
            }
        }
        class
    }

    pub fn add_char(&mut self, c: u16) {
        self.bits.set(usize::from(c), true);
    }

    /// Add the inclusive range `lo..=hi`. Empty when `lo > hi`.
    pub fn add_range(&mut self, lo: u16, hi: u16) {
        if lo <= hi {
            self.bits[usize::from(lo)..=usize::from(hi)].fill(true);
        }
    }

    pub fn contains(&self, c: u16) -> bool {
        self.bits[usize::from(c)]
    }

    pub fn union(&mut self, other: &CharClass) {
        self.combine(other, |a, b| a | b);
    }

    pub fn intersect(&mut self, other: &CharClass) {
        self.combine(other, |a, b| a & b);
    }

    pub fn subtract(&mut self, other: &CharClass) {
        self.combine(other, |a, b| a & !b);
    }

    pub fn negate(&mut self) {
        for word in self.bits.as_raw_mut_slice() {
            *word = !*word;
        }
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    fn combine(&mut self, other: &CharClass, op: impl Fn(u64, u64) -> u64) {
        let theirs = other.bits.as_raw_slice();
        for (mine, theirs) in self.bits.as_raw_mut_slice().iter_mut().zip(theirs) {
            *mine = op(*mine, *theirs);
        }
    }
}

impl fmt::Debug for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CharClass({} units)", self.len())
    }
}
