//! Lazy enumeration of permutations with repetition.
//!
//! Given `n` source elements and a length `k`, an [`Enumerator`] walks all
//! `n^k` ordered arrangements one at a time, like an odometer, without ever
//! materializing the whole sequence.
//!
//! ```
//! use repetition_permutations::PermutationGenerator;
//!
//! let g = PermutationGenerator::new(["apple", "orange"], 2)?;
//! let names: Vec<_> = g.into_iter().map(|a| a.to_string()).collect();
//! assert_eq!(
//!     names,
//!     [
//!         "[apple, apple]",
//!         "[apple, orange]",
//!         "[orange, apple]",
//!         "[orange, orange]"
//!     ]
//! );
//! # Ok::<(), repetition_permutations::EnumerationError>(())
//! ```

mod arrangement;
mod permutation;

pub use arrangement::Arrangement;
pub use permutation::{Checkpoint, EnumerationError, Enumerator, PermutationGenerator};
