//! Owned arrangements handed out by the enumerator.
use serde::{Deserialize, Serialize};
use std::{fmt::Display, ops::Deref};

///An ordered sequence of elements picked from a source set.
///
///Every arrangement is an independent copy, so holding on to one never
///observes later progress of the enumerator that produced it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[serde(transparent)]
pub struct Arrangement<T>(Vec<T>);

impl<T> Arrangement<T> {
    ///The empty arrangement (the only arrangement of length 0).
    pub fn empty() -> Self {
        Arrangement(vec![])
    }

    pub fn into_vec(self) -> Vec<T> {
        self.0
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }
}

impl<T> Deref for Arrangement<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> From<Vec<T>> for Arrangement<T> {
    fn from(value: Vec<T>) -> Self {
        Arrangement(value)
    }
}

impl<T> FromIterator<T> for Arrangement<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Arrangement(iter.into_iter().collect())
    }
}

impl<T> IntoIterator for Arrangement<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Arrangement<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T: PartialEq> PartialEq<[T]> for Arrangement<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.0.as_slice() == other
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for Arrangement<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.0.as_slice() == other.as_slice()
    }
}

impl<T: Display> Display for Arrangement<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, x) in self.0.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{x}")?;
        }
        write!(f, "]")
    }
}
