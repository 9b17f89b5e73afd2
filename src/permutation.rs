//! Generation of permutations with repetition: every ordered arrangement of
//! length `k` whose elements are drawn, repeats allowed, from `n` source
//! elements.
#[cfg(feature = "sampling")]
use rand::Rng;
use thiserror::Error;

use crate::Arrangement;

mod enumerator;
pub use enumerator::{Checkpoint, Enumerator};

///Errors from building or positioning an [`Enumerator`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EnumerationError {
    ///Asking for a non-empty arrangement from an empty source set.
    #[error("Cannot pick {length} repeated elements from an empty set!")]
    InvalidDomain { length: usize },
    ///Seeking past the last arrangement.
    #[error("Ordinal {ordinal} is past the end of {count} arrangements!")]
    OutOfRange { ordinal: u128, count: u128 },
    ///Restoring a checkpoint taken from an enumerator of another shape.
    #[error(
        "Checkpoint of length {found_length} over {found_source_len} elements doesn't fit an enumerator of length {length} over {source_len} elements!"
    )]
    CheckpointMismatch {
        source_len: usize,
        length: usize,
        found_source_len: usize,
        found_length: usize,
    },
}

///`n^k`, or `None` if it doesn't fit in a `u128`.
pub(crate) fn arrangement_count(n: usize, k: usize) -> Option<u128> {
    match n {
        0 => Some(if k == 0 { 1 } else { 0 }),
        1 => Some(1),
        _ => (n as u128).checked_pow(u32::try_from(k).ok()?),
    }
}

///Holds a source set and an arrangement length, and hands out
///[`Enumerator`]s over them along with some bulk helpers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PermutationGenerator<T> {
    source: Vec<T>,
    length: usize,
}

impl<T: Clone> PermutationGenerator<T> {
    pub fn new(source: impl Into<Vec<T>>, length: usize) -> Result<Self, EnumerationError> {
        let source = source.into();
        if source.is_empty() && length > 0 {
            return Err(EnumerationError::InvalidDomain { length });
        }
        Ok(PermutationGenerator { source, length })
    }

    pub fn source(&self) -> &[T] {
        &self.source
    }

    pub fn length(&self) -> usize {
        self.length
    }

    ///The number of arrangements, `n^k`, or `None` if it overflows a `u128`.
    pub fn total(&self) -> Option<u128> {
        arrangement_count(self.source.len(), self.length)
    }

    ///A fresh enumerator over a copy of the source set.
    pub fn enumerator(&self) -> Enumerator<T> {
        Enumerator::from_checked_parts(self.source.clone(), self.length)
    }

    ///Collects every arrangement. Only sensible for small sets!
    pub fn generate_all(&self) -> Vec<Arrangement<T>> {
        self.enumerator().collect()
    }

    ///The arrangements whose ordinals are in `start..stop`.
    pub fn generate_range(&self, start: u128, stop: u128) -> Vec<Arrangement<T>> {
        let stop = match self.total() {
            Some(total) => stop.min(total),
            None => stop,
        };
        if start >= stop {
            return vec![];
        }

        let mut e = self.enumerator();
        if e.seek(start).is_err() {
            return vec![];
        }
        e.take(usize::try_from(stop - start).unwrap_or(usize::MAX))
            .collect()
    }

    ///The arrangements for which `filter(ordinal, arrangement)` holds.
    pub fn generate_filtered(
        &self,
        mut filter: impl FnMut(u128, &Arrangement<T>) -> bool,
    ) -> Vec<Arrangement<T>> {
        (0u128..)
            .zip(self.enumerator())
            .filter_map(|(i, a)| filter(i, &a).then_some(a))
            .collect()
    }

    ///The arrangement at position `ordinal` of the enumeration.
    pub fn arrangement_at(&self, ordinal: u128) -> Result<Arrangement<T>, EnumerationError> {
        if let Some(count) = self.total() {
            if ordinal >= count {
                return Err(EnumerationError::OutOfRange { ordinal, count });
            }
        }
        let mut e = self.enumerator();
        e.seek(ordinal)?;
        Ok(e.advance())
    }

    ///Draws an arrangement uniformly at random.
    #[cfg(feature = "sampling")]
    pub fn sample(&self, rng: &mut impl Rng) -> Arrangement<T> {
        (0..self.length)
            .map(|_| self.source[rng.random_range(0..self.source.len())].clone())
            .collect()
    }
}

impl<T: Clone> IntoIterator for &PermutationGenerator<T> {
    type Item = Arrangement<T>;
    type IntoIter = Enumerator<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.enumerator()
    }
}
