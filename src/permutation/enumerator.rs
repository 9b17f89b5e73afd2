//! A restartable odometer over every arrangement with repetition.
use serde::{Deserialize, Serialize};
use std::{fmt::Display, iter::FusedIterator};

use super::{EnumerationError, arrangement_count};
use crate::Arrangement;

///A lazy cursor over the `n^k` arrangements of length `k` drawn with
///repetition from `n` source elements.
///
///The cursor keeps a `k` digit base-`n` counter (least significant digit
///first) and an overflow flag which is set exactly once, when the counter
///wraps past its maximum. Each call to [`Enumerator::advance`] first
///publishes the arrangement for the counter as it stands and only then
///increments it, so the first call after [`Enumerator::reset`] returns the
///all-zero arrangement.
///
///```
///use repetition_permutations::Enumerator;
///
///let mut e = Enumerator::new(['A', 'B'], 2)?;
///let mut seen = vec![];
///while !e.is_done() {
///    seen.push(e.advance().into_vec());
///}
///assert_eq!(seen, [['A', 'A'], ['A', 'B'], ['B', 'A'], ['B', 'B']]);
///# Ok::<(), repetition_permutations::EnumerationError>(())
///```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enumerator<T> {
    source: Box<[T]>,
    digits: Box<[usize]>,
    overflow: bool,
    ordinal: u128,
    current: Vec<T>,
}

///A snapshot of an [`Enumerator`]'s progress which can be stored and later
///restored onto an enumerator over a source set of the same shape.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Checkpoint {
    pub source_len: usize,
    pub length: usize,
    pub ordinal: u128,
}

impl<T: Clone> Enumerator<T> {
    ///Creates a cursor over all arrangements of `length` elements of `source`.
    ///
    ///Fails with [`EnumerationError::InvalidDomain`] if `source` is empty
    ///while `length > 0`.
    pub fn new(source: impl Into<Vec<T>>, length: usize) -> Result<Self, EnumerationError> {
        let source = source.into();
        if source.is_empty() && length > 0 {
            return Err(EnumerationError::InvalidDomain { length });
        }
        Ok(Enumerator::from_checked_parts(source, length))
    }

    //`source` must be non-empty unless `length` is 0.
    pub(super) fn from_checked_parts(source: Vec<T>, length: usize) -> Self {
        let mut e = Enumerator {
            source: source.into_boxed_slice(),
            digits: vec![0; length].into_boxed_slice(),
            overflow: false,
            ordinal: 0,
            current: Vec::with_capacity(length),
        };
        e.reset();
        e
    }

    ///Restarts the enumeration from the beginning.
    pub fn reset(&mut self) {
        self.digits.fill(0);
        self.overflow = false;
        self.ordinal = 0;
        self.current.clear();
        if let Some(first) = self.source.first() {
            self.current
                .extend(std::iter::repeat_n(first.clone(), self.digits.len()));
        }
    }

    ///Returns the current arrangement and moves past it.
    ///
    ///Once every arrangement has been produced this does nothing and keeps
    ///returning the final arrangement.
    pub fn advance(&mut self) -> Arrangement<T> {
        if !self.overflow {
            self.ordinal = self.ordinal.saturating_add(1);
            self.publish();
            self.increment();
        }
        self.current()
    }

    ///An owned copy of the last published arrangement.
    pub fn current(&self) -> Arrangement<T> {
        self.current.clone().into()
    }

    ///Moves the cursor to the state reached by calling [`Enumerator::reset`]
    ///followed by `ordinal` calls to [`Enumerator::advance`].
    pub fn seek(&mut self, ordinal: u128) -> Result<(), EnumerationError> {
        if let Some(count) = self.total() {
            if ordinal > count {
                return Err(EnumerationError::OutOfRange { ordinal, count });
            }
        }

        self.reset();
        if ordinal == 0 {
            return Ok(());
        }

        let n = self.source.len() as u128;
        let mut rest = ordinal - 1;
        for digit in self.digits.iter_mut() {
            *digit = (rest % n) as usize;
            rest /= n;
        }
        self.ordinal = ordinal;
        self.publish();
        self.increment();
        Ok(())
    }

    //Position 0 of the arrangement holds the most significant digit.
    fn publish(&mut self) {
        let k = self.digits.len();
        for (j, &d) in self.digits.iter().enumerate().rev() {
            self.current[k - 1 - j] = self.source[d].clone();
        }
    }

    fn increment(&mut self) {
        let n = self.source.len();
        for digit in self.digits.iter_mut() {
            if *digit + 1 < n {
                *digit += 1;
                return;
            }
            *digit = 0;
        }
        self.overflow = true;
    }

    ///Restores progress saved by [`Enumerator::checkpoint`].
    pub fn restore(&mut self, checkpoint: &Checkpoint) -> Result<(), EnumerationError> {
        if checkpoint.source_len != self.source.len() || checkpoint.length != self.length() {
            return Err(EnumerationError::CheckpointMismatch {
                source_len: self.source.len(),
                length: self.length(),
                found_source_len: checkpoint.source_len,
                found_length: checkpoint.length,
            });
        }
        self.seek(checkpoint.ordinal)
    }
}

impl<T> Enumerator<T> {
    ///Returns true once all arrangements have been produced.
    pub fn is_done(&self) -> bool {
        self.overflow
    }

    pub fn source(&self) -> &[T] {
        &self.source
    }

    ///The length `k` of every arrangement.
    pub fn length(&self) -> usize {
        self.digits.len()
    }

    ///How many arrangements have been produced since the last reset.
    ///
    ///Saturates at `u128::MAX` for enumerations too long to count.
    pub fn ordinal(&self) -> u128 {
        self.ordinal
    }

    ///The total number of arrangements, or `None` if it overflows a `u128`.
    pub fn total(&self) -> Option<u128> {
        arrangement_count(self.source.len(), self.digits.len())
    }

    ///How many arrangements are still to be produced.
    pub fn remaining(&self) -> Option<u128> {
        if self.overflow {
            Some(0)
        } else {
            self.total().map(|c| c - self.ordinal)
        }
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            source_len: self.source.len(),
            length: self.length(),
            ordinal: self.ordinal,
        }
    }
}

impl<T: Clone> Iterator for Enumerator<T> {
    type Item = Arrangement<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_done() {
            None
        } else {
            Some(self.advance())
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining().map(usize::try_from) {
            Some(Ok(r)) => (r, Some(r)),
            _ => (usize::MAX, None),
        }
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        if self.is_done() {
            return None;
        }
        let target = self.ordinal.saturating_add(n as u128);
        let target = match self.total() {
            Some(c) => target.min(c),
            None => target,
        };
        self.seek(target).ok()?;
        self.next()
    }
}

impl<T: Clone> FusedIterator for Enumerator<T> {}

impl<T: Display> Display for Enumerator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Enumerator=[#{}, [", self.ordinal)?;
        for (i, x) in self.current.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{x}")?;
        }
        write!(f, "]]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<T: Clone>(e: &mut Enumerator<T>) -> Vec<Vec<T>> {
        let mut v = vec![];
        while !e.is_done() {
            v.push(e.advance().into_vec());
        }
        v
    }

    #[test]
    fn two_by_two() -> anyhow::Result<()> {
        let mut e = Enumerator::new(vec!['A', 'B'], 2)?;
        assert_eq!(
            drain(&mut e),
            [['A', 'A'], ['A', 'B'], ['B', 'A'], ['B', 'B']]
        );
        assert_eq!(e.ordinal(), 4);
        Ok(())
    }

    #[test]
    fn most_significant_digit_first() -> anyhow::Result<()> {
        let mut e = Enumerator::new([0usize, 1, 2], 3)?;
        for (m, a) in drain(&mut e).into_iter().enumerate() {
            let expected: Vec<usize> = (0..3u32).map(|p| (m / 3usize.pow(2 - p)) % 3).collect();
            assert_eq!(a, expected);
        }
        Ok(())
    }

    #[test]
    fn current_before_first_advance() -> anyhow::Result<()> {
        let e = Enumerator::new(["x", "y", "z"], 4)?;
        assert_eq!(e.current(), ["x"; 4]);
        assert!(!e.is_done());
        assert_eq!(e.ordinal(), 0);

        let e = Enumerator::new(["x"], 0)?;
        assert!(e.current().is_empty());
        Ok(())
    }

    #[test]
    fn empty_length() -> anyhow::Result<()> {
        let mut e = Enumerator::new([1, 2, 3], 0)?;
        assert_eq!(drain(&mut e), vec![Vec::<i32>::new()]);
        assert!(e.is_done());
        assert!(e.advance().is_empty());
        assert!(e.is_done());
        Ok(())
    }

    #[test]
    fn empty_source() {
        assert_eq!(
            Enumerator::<u8>::new(vec![], 3),
            Err(EnumerationError::InvalidDomain { length: 3 })
        );

        let mut e = Enumerator::<u8>::new(vec![], 0).unwrap();
        assert_eq!(e.total(), Some(1));
        assert_eq!(drain(&mut e), vec![Vec::<u8>::new()]);
    }

    #[test]
    fn single_element() -> anyhow::Result<()> {
        let mut e = Enumerator::new(['X'], 5)?;
        assert_eq!(drain(&mut e), vec![vec!['X'; 5]]);
        Ok(())
    }

    #[test]
    fn exhaustion_is_idempotent() -> anyhow::Result<()> {
        let mut e = Enumerator::new([1, 2, 3], 2)?;
        let all = drain(&mut e);
        let last = Arrangement::from(all.last().unwrap().clone());
        assert_eq!(last, [3, 3]);
        for _ in 0..5 {
            assert_eq!(e.advance(), last);
            assert!(e.is_done());
            assert_eq!(e.ordinal(), 9);
        }
        assert_eq!(e.current(), last);
        assert_eq!(e.next(), None);
        Ok(())
    }

    #[test]
    fn reset_restarts() -> anyhow::Result<()> {
        let mut e = Enumerator::new(["a", "b", "c"], 3)?;
        let all = drain(&mut e);
        e.reset();
        assert_eq!(drain(&mut e), all);

        e.reset();
        for _ in 0..7 {
            e.advance();
        }
        e.reset();
        assert_eq!(e.current(), ["a", "a", "a"]);
        assert_eq!(drain(&mut e), all);
        Ok(())
    }

    #[test]
    fn returned_arrangements_are_copies() -> anyhow::Result<()> {
        let mut e = Enumerator::new([1, 2], 2)?;
        let first = e.advance();
        let current = e.current();
        e.advance();
        e.advance();
        assert_eq!(first, [1, 1]);
        assert_eq!(current, [1, 1]);
        assert_eq!(e.current(), [2, 1]);
        Ok(())
    }

    #[test]
    fn seek_matches_advancing() -> anyhow::Result<()> {
        let mut reference = Enumerator::new(['p', 'q', 'r'], 3)?;
        for m in 0..=27u128 {
            let mut e = Enumerator::new(['p', 'q', 'r'], 3)?;
            e.seek(m)?;
            assert_eq!(e, reference);
            reference.advance();
        }

        let mut e = Enumerator::new(['p', 'q', 'r'], 3)?;
        assert_eq!(
            e.seek(28),
            Err(EnumerationError::OutOfRange {
                ordinal: 28,
                count: 27
            })
        );
        Ok(())
    }

    #[test]
    fn seek_to_the_end() -> anyhow::Result<()> {
        let mut e = Enumerator::new([0, 1], 4)?;
        e.seek(16)?;
        assert!(e.is_done());
        assert_eq!(e.current(), [1, 1, 1, 1]);
        assert_eq!(e.remaining(), Some(0));
        Ok(())
    }

    #[test]
    fn checkpoints() -> anyhow::Result<()> {
        let mut e = Enumerator::new(["a", "b", "c", "d"], 3)?;
        for _ in 0..21 {
            e.advance();
        }
        let checkpoint = e.checkpoint();
        let rest: Vec<_> = e.by_ref().collect();

        let json = serde_json::to_string(&checkpoint)?;
        let checkpoint: Checkpoint = serde_json::from_str(&json)?;

        let mut resumed = Enumerator::new(["a", "b", "c", "d"], 3)?;
        resumed.restore(&checkpoint)?;
        assert_eq!(resumed.ordinal(), 21);
        assert_eq!(resumed.collect::<Vec<_>>(), rest);

        let mut other = Enumerator::new(["a", "b"], 3)?;
        assert!(matches!(
            other.restore(&checkpoint),
            Err(EnumerationError::CheckpointMismatch { .. })
        ));

        let edited: Checkpoint =
            serde_json::from_str(r#"{"source_len":4,"length":3,"ordinal":65}"#)?;
        assert_eq!(
            e.restore(&edited),
            Err(EnumerationError::OutOfRange {
                ordinal: 65,
                count: 64
            })
        );
        Ok(())
    }

    #[test]
    fn iterator_protocol() -> anyhow::Result<()> {
        let mut e = Enumerator::new([0u8, 1, 2, 3, 4], 2)?;
        assert_eq!(e.size_hint(), (25, Some(25)));
        e.next();
        assert_eq!(e.size_hint(), (24, Some(24)));
        assert_eq!(e.nth(10), Some(Arrangement::from(vec![2u8, 1])));
        assert_eq!(e.size_hint(), (13, Some(13)));
        assert_eq!(e.nth(100), None);
        assert!(e.is_done());
        assert_eq!(e.next(), None);
        Ok(())
    }

    #[test]
    fn huge_counts() -> anyhow::Result<()> {
        let e = Enumerator::new((0u8..10).collect::<Vec<_>>(), 38)?;
        assert_eq!(e.total(), Some(10u128.pow(38)));
        assert_eq!(e.size_hint(), (usize::MAX, None));

        let mut e = Enumerator::new([0u8, 1], 200)?;
        assert_eq!(e.total(), None);
        e.seek(u128::MAX - 1)?;
        let a = e.advance();
        assert!(!e.is_done());
        assert_eq!(e.ordinal(), u128::MAX);
        assert_eq!(a[199], 0);
        assert_eq!(a[72..199], [1u8; 127]);
        assert_eq!(a[..72], [0u8; 72]);
        Ok(())
    }

    #[test]
    fn ordinal_saturates() -> anyhow::Result<()> {
        let mut e = Enumerator::new([0u8, 1], 200)?;
        e.seek(u128::MAX)?;
        let a = e.advance();
        assert_eq!(e.ordinal(), u128::MAX);
        assert_eq!(a[72..], [1u8; 128]);
        assert_eq!(a[..72], [0u8; 72]);

        let b = e.advance();
        assert_eq!(e.ordinal(), u128::MAX);
        assert!(!e.is_done());
        assert_eq!(b[71], 1);
        assert_eq!(b.iter().filter(|&&x| x == 1).count(), 1);

        e.seek(u128::MAX - 5)?;
        assert_eq!(e.nth(usize::MAX), Some(a));
        assert_eq!(e.ordinal(), u128::MAX);
        assert!(
            e.to_string()
                .starts_with("Enumerator=[#340282366920938463463374607431768211455, [0, ")
        );
        Ok(())
    }

    #[test]
    fn printing() -> anyhow::Result<()> {
        let mut e = Enumerator::new(["apple", "orange"], 2)?;
        assert_eq!(e.to_string(), "Enumerator=[#0, [apple, apple]]");
        e.advance();
        e.advance();
        assert_eq!(e.to_string(), "Enumerator=[#2, [apple, orange]]");
        Ok(())
    }
}
