use std::fmt;
use itertools::Itertools;

pub type Bits = Vec<bool>;

/// One addressable data unit, masked to the configured word width.
pub type Word = usize;

/// Little-endian bit expansion of `value` into `size` bits.
pub fn usize_to_bits(mut value: usize, size: usize) -> Bits {
    let mut bits = vec![false; size];
    for bit in bits.iter_mut() {
        *bit = 0 != (value & 0x1);
        value >>= 1;
    }
    bits
}

pub fn bits_to_usize(bits: &[bool]) -> usize {
    bits.iter()
        .enumerate()
        .fold(0, |value, (i, &bit)| if bit { value | (1 << i) } else { value })
}

/// All-ones mask of `size` bits.
pub fn full_bits_number(size: usize) -> usize {
    if size >= usize::BITS as usize {
        usize::MAX
    } else {
        (1usize << size) - 1
    }
}

/// A decoder output: all zero, or exactly one bit set.
///
/// There is no public way to build a vector with more than one set bit, so
/// consumers that multiplex with OR can rely on at most one active term.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectVector {
    bits: Bits,
}

impl SelectVector {
    /// All-zero vector of `size` lines.
    pub fn none(size: usize) -> Self {
        Self { bits: vec![false; size] }
    }

    /// Vector of `size` lines with only `index` set.
    ///
    /// # Panics
    /// If `index >= size`.
    pub fn one_hot(size: usize, index: usize) -> Self {
        assert!(index < size, "select index {} out of range {}", index, size);
        let mut bits = vec![false; size];
        bits[index] = true;
        Self { bits }
    }

    /// Wrap the raw output lines of a decoder. The AND plane guarantees the
    /// one-hot shape; it is only re-checked in debug builds.
    pub(crate) fn from_decoded(bits: Bits) -> Self {
        debug_assert!(bits.iter().filter(|&&b| b).count() <= 1, "decoder produced a non one-hot vector");
        Self { bits }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    #[inline]
    pub fn is_selected(&self, index: usize) -> bool {
        self.bits.get(index).copied().unwrap_or(false)
    }

    /// Index of the set line, `None` when nothing is selected.
    pub fn selected(&self) -> Option<usize> {
        self.bits.iter().position(|&b| b)
    }

    pub fn popcount(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }
}

impl fmt::Debug for SelectVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines = self.bits.iter().rev().map(|&b| if b { '1' } else { '0' }).join("");
        write!(f, "SelectVector({})", lines)
    }
}
