//! Fixed-length BitSet implementation backed by a Vec<u64>.
//! Optimized for "no bloat" philosophy - minimal allocations, direct bitwise ops.
//!
//! Unlike a growable bit vector, the length is fixed at creation time and every
//! positional operation is checked against it. One bitset represents one
//! entity's booked hours across the whole horizon.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::predicate::{Predicate, PredicateKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitSet {
    words: Vec<u64>,
    len: usize,
}

impl BitSet {
    /// Create a zero-initialized BitSet of exactly `len` bits.
    pub fn new(len: usize) -> Result<Self> {
        if len == 0 {
            return Err(GridError::InvalidLength);
        }
        let num_words = len.div_ceil(64);
        Ok(Self {
            words: vec![0; num_words],
            len,
        })
    }

    /// Number of bits in this set (the horizon).
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the bit at `pos`. Fails if `pos` is outside the horizon.
    pub fn get(&self, pos: usize) -> Result<bool> {
        self.check_pos(pos)?;
        Ok(self.contains(pos))
    }

    /// Check if the bit at `pos` is set. Positions past the horizon read as clear.
    pub fn contains(&self, pos: usize) -> bool {
        let (word_idx, bit_idx) = (pos / 64, pos % 64);
        if word_idx >= self.words.len() {
            return false;
        }
        (self.words[word_idx] & (1 << bit_idx)) != 0
    }

    /// Set the bit at `pos`. Fails if `pos` is outside the horizon.
    pub fn set(&mut self, pos: usize) -> Result<()> {
        self.check_pos(pos)?;
        self.apply_range(pos, pos + 1, true);
        Ok(())
    }

    /// Clear the bit at `pos`. Fails if `pos` is outside the horizon.
    pub fn clear(&mut self, pos: usize) -> Result<()> {
        self.check_pos(pos)?;
        self.apply_range(pos, pos + 1, false);
        Ok(())
    }

    /// Set every bit in `[start, end)`. Returns the number of bits that were
    /// previously clear. The range is validated before any word is touched, so
    /// a failed call leaves the set unchanged.
    pub fn set_range(&mut self, start: usize, end: usize) -> Result<usize> {
        self.check_range(start, end)?;
        Ok(self.apply_range(start, end, true))
    }

    /// Clear every bit in `[start, end)`. Returns the number of bits that were
    /// previously set. Validation happens before any mutation.
    pub fn clear_range(&mut self, start: usize, end: usize) -> Result<usize> {
        self.check_range(start, end)?;
        Ok(self.apply_range(start, end, false))
    }

    /// Count of set bits across the whole horizon.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Evaluate a predicate, failing if any listed position is outside the
    /// horizon. Use [`BitSet::matches`] for the clipped, infallible form.
    pub fn evaluate(&self, predicate: &Predicate) -> Result<bool> {
        for &pos in predicate.positions() {
            self.check_pos(pos)?;
        }
        Ok(self.matches(predicate))
    }

    /// Evaluate a predicate, reading positions past the horizon as clear bits.
    pub fn matches(&self, predicate: &Predicate) -> bool {
        let positions = predicate.positions();
        match predicate.kind() {
            PredicateKind::AllSet => positions.iter().all(|&p| self.contains(p)),
            PredicateKind::AllClear => positions.iter().all(|&p| !self.contains(p)),
            PredicateKind::AnySet => positions.iter().any(|&p| self.contains(p)),
            PredicateKind::AnyClear => positions.iter().any(|&p| !self.contains(p)),
        }
    }

    /// Returns iterator over indices of set bits
    pub fn ones(&self) -> OnesIter {
        OnesIter {
            bitset: self,
            word_idx: 0,
            current_word: if self.words.is_empty() {
                0
            } else {
                self.words[0]
            },
        }
    }

    /// Maximal runs of set (`true`) or clear (`false`) bits as `(start, end)`
    /// half-open pairs, in ascending order.
    pub fn runs(&self, set: bool) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        let mut run_start = None;
        for pos in 0..self.len {
            if self.contains(pos) == set {
                run_start.get_or_insert(pos);
            } else if let Some(start) = run_start.take() {
                out.push((start, pos));
            }
        }
        if let Some(start) = run_start {
            out.push((start, self.len));
        }
        out
    }

    // Bounds check before any position arithmetic; `pos + 1` on an unchecked
    // usize::MAX would overflow instead of taking the error path.
    fn check_pos(&self, pos: usize) -> Result<()> {
        if pos >= self.len {
            return Err(GridError::OutOfRange {
                start: pos,
                end: pos.saturating_add(1),
                len: self.len,
            });
        }
        Ok(())
    }

    fn check_range(&self, start: usize, end: usize) -> Result<()> {
        if start > end || end > self.len {
            return Err(GridError::OutOfRange {
                start,
                end,
                len: self.len,
            });
        }
        Ok(())
    }

    /// Word-masked bulk write over a pre-validated range. Returns how many
    /// bits actually flipped.
    fn apply_range(&mut self, start: usize, end: usize, set: bool) -> usize {
        if start == end {
            return 0;
        }
        let first_word = start / 64;
        let last_word = (end - 1) / 64;
        let mut flipped = 0;
        for word_idx in first_word..=last_word {
            let lo = if word_idx == first_word { start % 64 } else { 0 };
            let hi = if word_idx == last_word {
                (end - 1) % 64 + 1
            } else {
                64
            };
            let mask = if hi - lo == 64 {
                u64::MAX
            } else {
                ((1u64 << (hi - lo)) - 1) << lo
            };
            let old = self.words[word_idx];
            let new = if set { old | mask } else { old & !mask };
            flipped += (old ^ new).count_ones() as usize;
            self.words[word_idx] = new;
        }
        flipped
    }
}

pub struct OnesIter<'a> {
    bitset: &'a BitSet,
    word_idx: usize,
    current_word: u64,
}

impl<'a> Iterator for OnesIter<'a> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.current_word != 0 {
                let trailing = self.current_word.trailing_zeros();
                self.current_word &= !(1 << trailing); // Clear the bit we just found
                return Some(self.word_idx * 64 + trailing as usize);
            }

            self.word_idx += 1;
            if self.word_idx >= self.bitset.words.len() {
                return None;
            }
            self.current_word = self.bitset.words[self.word_idx];
        }
    }
}
